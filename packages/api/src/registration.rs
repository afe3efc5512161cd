//! # Registration flow
//!
//! Registration is a two-step state machine:
//!
//! 1. **[`Step::Phone`]**: [`Registration::validate`] posts the phone to
//!    `/validate-phone`. A known phone stores the role and moves to step 2; the backend
//!    emails a one-time code at that point.
//! 2. **[`Step::Code`]**: [`Registration::confirm`] posts phone and code to
//!    `/verify-code`. A valid code stores phone and name, which logs the user in.
//!
//! Failures keep the current step and surface a message through [`FlowStatus::Failed`].
//! There is no retry policy, no expiry and no attempt counting: the user simply
//! submits again.
//!
//! The UI owns the [`Registration`] inside a signal. Since a signal guard cannot be
//! held across an await, screens clone the flow, call [`Registration::mark_in_flight`]
//! on the signal so the button disables, run the async step on the clone, then write
//! the clone back.

use store::{KeyValueStore, Role, SessionStore, StoreError};
use thiserror::Error;

use crate::client::Backend;
use crate::error::ApiError;
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Phone,
    Code,
}

/// Lifecycle of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowStatus {
    #[default]
    Idle,
    InFlight,
    Failed(String),
    Done,
}

impl FlowStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FlowStatus::InFlight)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Enter your phone number")]
    EmptyPhone,
    #[error("Enter the verification code")]
    EmptyCode,
    #[error("You must accept the terms to continue")]
    TermsNotAccepted,
    #[error("This number is not registered")]
    PhoneNotRegistered,
    #[error("Incorrect code")]
    IncorrectCode,
    #[error("A request is already in progress")]
    Busy,
    #[error("This step is not available right now")]
    WrongStep,
    #[error("Could not reach the server")]
    Backend(#[from] ApiError),
    #[error("Could not save your session on this device")]
    Store(#[from] StoreError),
}

impl RegistrationError {
    pub fn notice(&self) -> Notice {
        Notice::error("Error", self.to_string())
    }
}

/// Form state of the registration screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub phone: String,
    pub name: String,
    pub code: String,
    step: Step,
    status: FlowStatus,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    pub fn new() -> Self {
        Self {
            phone: String::new(),
            name: String::new(),
            code: String::new(),
            step: Step::Phone,
            status: FlowStatus::Idle,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_in_flight()
    }

    /// The phone cannot be edited once a code has been sent to it.
    pub fn phone_locked(&self) -> bool {
        self.step == Step::Code
    }

    pub fn mark_in_flight(&mut self) {
        self.status = FlowStatus::InFlight;
    }

    /// Back to step 1, keeping the typed phone.
    pub fn reset(&mut self) {
        self.step = Step::Phone;
        self.code.clear();
        self.status = FlowStatus::Idle;
    }

    /// Step 1: check that the phone is registered.
    ///
    /// On success the role is persisted and the flow moves to [`Step::Code`]. On any
    /// failure nothing is persisted and the flow stays on [`Step::Phone`].
    pub async fn validate<B: Backend, S: KeyValueStore>(
        &mut self,
        backend: &B,
        session: &SessionStore<S>,
    ) -> Result<Notice, RegistrationError> {
        self.guard(Step::Phone)?;

        let phone = self.phone.trim().to_string();
        if phone.is_empty() {
            return self.fail(RegistrationError::EmptyPhone);
        }

        self.status = FlowStatus::InFlight;
        let check = match backend.validate_phone(&phone).await {
            Ok(check) => check,
            Err(e) => return self.fail(e.into()),
        };
        if !check.exists {
            return self.fail(RegistrationError::PhoneNotRegistered);
        }

        let role = Role::from_admin_flag(check.is_admin);
        if let Err(e) = session.set_role(role).await {
            return self.fail(e.into());
        }

        tracing::info!("Phone validated, role {}", role.as_str());
        self.phone = phone;
        self.step = Step::Code;
        self.status = FlowStatus::Idle;
        Ok(Notice::info(
            "Code sent",
            "Check your email and enter the verification code.",
        ))
    }

    /// Step 2: confirm the code and persist the identity.
    pub async fn confirm<B: Backend, S: KeyValueStore>(
        &mut self,
        backend: &B,
        session: &SessionStore<S>,
        accepted_terms: bool,
    ) -> Result<Notice, RegistrationError> {
        self.guard(Step::Code)?;

        let code = self.code.trim().to_string();
        if code.is_empty() {
            return self.fail(RegistrationError::EmptyCode);
        }
        if !accepted_terms {
            return self.fail(RegistrationError::TermsNotAccepted);
        }

        self.status = FlowStatus::InFlight;
        let check = match backend.verify_code(&self.phone, &code).await {
            Ok(check) => check,
            Err(e) => return self.fail(e.into()),
        };
        if !check.valid {
            return self.fail(RegistrationError::IncorrectCode);
        }

        let name = self.name.trim().to_string();
        if let Err(e) = session.set_identity(&self.phone, &name).await {
            return self.fail(e.into());
        }

        tracing::info!("Registration completed");
        self.name = name;
        self.status = FlowStatus::Done;
        Ok(Notice::success("Success", "Registration completed"))
    }

    // A clone taken after `mark_in_flight` is not busy; only the live state is.
    fn guard(&self, expected: Step) -> Result<(), RegistrationError> {
        if self.is_busy() {
            return Err(RegistrationError::Busy);
        }
        if self.step != expected || self.status == FlowStatus::Done {
            return Err(RegistrationError::WrongStep);
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: RegistrationError) -> Result<T, RegistrationError> {
        match &err {
            RegistrationError::Backend(e) => tracing::warn!("Registration request failed: {}", e),
            RegistrationError::Store(e) => tracing::error!("Session write failed: {}", e),
            other => tracing::debug!("Registration rejected: {}", other),
        }
        self.status = FlowStatus::Failed(err.to_string());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use store::session::{USER_NAME_KEY, USER_PHONE_KEY, USER_ROLE_KEY};
    use store::MemoryStore;

    use super::*;
    use crate::fake::{Call, FakeBackend};

    fn session() -> (MemoryStore, SessionStore<MemoryStore>) {
        let kv = MemoryStore::new();
        (kv.clone(), SessionStore::new(kv))
    }

    #[tokio::test]
    async fn test_empty_phone_is_rejected_locally() {
        let backend = FakeBackend::new().with_phone_check(true, false);
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = "   ".into();

        let err = flow.validate(&backend, &session).await.unwrap_err();

        assert!(matches!(err, RegistrationError::EmptyPhone));
        assert!(backend.calls().is_empty());
        assert!(kv.is_empty());
        assert_eq!(flow.step(), Step::Phone);
        assert_eq!(flow.status().error(), Some("Enter your phone number"));
    }

    #[tokio::test]
    async fn test_unknown_phone_stays_on_step_one() {
        let backend = FakeBackend::new().with_phone_check(false, false);
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();

        let err = flow.validate(&backend, &session).await.unwrap_err();

        assert!(matches!(err, RegistrationError::PhoneNotRegistered));
        assert_eq!(flow.step(), Step::Phone);
        assert!(!flow.phone_locked());
        assert!(kv.is_empty());
        assert_eq!(backend.calls(), vec![Call::ValidatePhone("3001234567".into())]);
    }

    #[tokio::test]
    async fn test_network_failure_stays_on_step_one() {
        // No scripted answer: the fake fails with a 500.
        let backend = FakeBackend::new();
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();

        let err = flow.validate(&backend, &session).await.unwrap_err();

        assert!(matches!(err, RegistrationError::Backend(_)));
        assert_eq!(err.notice().message, "Could not reach the server");
        assert_eq!(flow.step(), Step::Phone);
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_known_phone_stores_role_and_advances() {
        let backend = FakeBackend::new().with_phone_check(true, true);
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = " 3001234567 ".into();

        let notice = flow.validate(&backend, &session).await.unwrap();

        assert_eq!(notice.title, "Code sent");
        assert_eq!(flow.step(), Step::Code);
        assert!(flow.phone_locked());
        assert_eq!(flow.phone, "3001234567");
        assert_eq!(kv.get(USER_ROLE_KEY).await.unwrap().as_deref(), Some("admin"));
        assert!(kv.get(USER_PHONE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_code_persists_exactly_phone_and_name() {
        let backend = FakeBackend::new()
            .with_phone_check(true, false)
            .with_code_check(true);
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();
        flow.validate(&backend, &session).await.unwrap();

        flow.name = "Ana Ruiz".into();
        flow.code = "4821".into();
        let notice = flow.confirm(&backend, &session, true).await.unwrap();

        assert_eq!(notice.message, "Registration completed");
        assert_eq!(flow.status(), &FlowStatus::Done);
        assert_eq!(kv.get(USER_PHONE_KEY).await.unwrap().as_deref(), Some("3001234567"));
        assert_eq!(kv.get(USER_NAME_KEY).await.unwrap().as_deref(), Some("Ana Ruiz"));
        assert_eq!(kv.get(USER_ROLE_KEY).await.unwrap().as_deref(), Some("user"));
        assert_eq!(kv.len(), 3);
        assert_eq!(
            backend.calls()[1],
            Call::VerifyCode("3001234567".into(), "4821".into())
        );
    }

    #[tokio::test]
    async fn test_incorrect_code_stays_on_step_two() {
        let backend = FakeBackend::new()
            .with_phone_check(true, false)
            .with_code_check(false);
        let (kv, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();
        flow.validate(&backend, &session).await.unwrap();

        flow.code = "0000".into();
        let err = flow.confirm(&backend, &session, true).await.unwrap_err();

        assert!(matches!(err, RegistrationError::IncorrectCode));
        assert_eq!(flow.step(), Step::Code);
        assert!(kv.get(USER_PHONE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_confirm_requires_code_and_terms() {
        let backend = FakeBackend::new()
            .with_phone_check(true, false)
            .with_code_check(true);
        let (_, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();
        flow.validate(&backend, &session).await.unwrap();

        let err = flow.confirm(&backend, &session, true).await.unwrap_err();
        assert!(matches!(err, RegistrationError::EmptyCode));

        flow.code = "4821".into();
        let err = flow.confirm(&backend, &session, false).await.unwrap_err();
        assert!(matches!(err, RegistrationError::TermsNotAccepted));

        // Only the validate call reached the backend.
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_busy_and_out_of_order_submissions_are_refused() {
        let backend = FakeBackend::new().with_code_check(true);
        let (_, session) = session();

        let mut flow = Registration::new();
        flow.code = "4821".into();
        let err = flow.confirm(&backend, &session, true).await.unwrap_err();
        assert!(matches!(err, RegistrationError::WrongStep));

        flow.phone = "3001234567".into();
        flow.mark_in_flight();
        let err = flow.validate(&backend, &session).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Busy));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reset_unlocks_phone() {
        let backend = FakeBackend::new().with_phone_check(true, false);
        let (_, session) = session();
        let mut flow = Registration::new();
        flow.phone = "3001234567".into();
        flow.validate(&backend, &session).await.unwrap();
        flow.code = "12".into();

        flow.reset();

        assert_eq!(flow.step(), Step::Phone);
        assert!(flow.code.is_empty());
        assert_eq!(flow.phone, "3001234567");
    }
}
