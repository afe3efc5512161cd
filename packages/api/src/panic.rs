//! # Panic trigger
//!
//! One press of the panic button runs a straight sequence:
//!
//! ```text
//! Idle ─► RequestingPermission ─► AcquiringLocation ─► Posting ─► Idle
//!              │ denied                  │ error           │ error
//!              └──────────► Idle ◄───────┴─────────────────┘
//! ```
//!
//! Before anything else the stored phone is read. Without one the press ends with a
//! warning: no permission prompt, no location fix, no `/panic` call.
//!
//! Permission is checked first without prompting and only requested when it is not
//! already granted. The fix is taken at the highest accuracy the device offers. The
//! alert is fire-and-forget: no queueing, no retry, no partial success.

use store::{KeyValueStore, SessionStore, StoreError};
use thiserror::Error;

use crate::client::Backend;
use crate::error::ApiError;
use crate::models::{Coordinates, PanicAlert};
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked, or the platform cannot tell without prompting.
    Undetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Highest,
    Balanced,
}

/// Platform failure while checking permission or reading the position.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct LocationError(String);

impl LocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Device geolocation.
pub trait LocationProvider {
    /// Current permission, without prompting the user.
    fn permission(&self) -> impl std::future::Future<Output = Result<Permission, LocationError>>;
    /// Prompt the user and return the answer.
    fn request_permission(
        &self,
    ) -> impl std::future::Future<Output = Result<Permission, LocationError>>;
    fn current_position(
        &self,
        accuracy: Accuracy,
    ) -> impl std::future::Future<Output = Result<Coordinates, LocationError>>;
}

#[derive(Debug, Error)]
pub enum PanicError {
    #[error("No registered phone number was found")]
    NoRegisteredPhone,
    #[error("You must allow location access to send the alert")]
    PermissionDenied,
    #[error("An alert is already being sent")]
    Busy,
    #[error("Could not get your location: {0}")]
    Location(#[from] LocationError),
    #[error("Could not send the alert: {0}")]
    Backend(#[from] ApiError),
    #[error("Could not read your session: {0}")]
    Store(#[from] StoreError),
}

impl PanicError {
    pub fn notice(&self) -> Notice {
        match self {
            PanicError::NoRegisteredPhone | PanicError::Busy => {
                Notice::warning("Warning", self.to_string())
            }
            PanicError::PermissionDenied => Notice::error("Permission denied", self.to_string()),
            other => Notice::error(
                "Error",
                format!("The alert could not be sent. Please try again.\n\nDetails: {other}"),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanicState {
    #[default]
    Idle,
    RequestingPermission,
    AcquiringLocation,
    Posting,
}

impl PanicState {
    pub fn is_idle(&self) -> bool {
        *self == PanicState::Idle
    }
}

#[derive(Debug, Clone, Default)]
pub struct PanicTrigger {
    state: PanicState,
}

impl PanicTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanicState {
        self.state
    }

    pub async fn fire<S, L, B>(
        &mut self,
        session: &SessionStore<S>,
        locator: &L,
        backend: &B,
    ) -> Result<Notice, PanicError>
    where
        S: KeyValueStore,
        L: LocationProvider,
        B: Backend,
    {
        self.fire_with(session, locator, backend, |_| {}).await
    }

    /// Like [`fire`](Self::fire), reporting every state change to `on_state`.
    pub async fn fire_with<S, L, B>(
        &mut self,
        session: &SessionStore<S>,
        locator: &L,
        backend: &B,
        mut on_state: impl FnMut(PanicState),
    ) -> Result<Notice, PanicError>
    where
        S: KeyValueStore,
        L: LocationProvider,
        B: Backend,
    {
        if !self.state.is_idle() {
            return Err(PanicError::Busy);
        }

        let result = self.run(session, locator, backend, &mut on_state).await;
        self.enter(PanicState::Idle, &mut on_state);

        match &result {
            Ok(_) => tracing::info!("Panic alert sent"),
            Err(e @ (PanicError::NoRegisteredPhone | PanicError::PermissionDenied)) => {
                tracing::warn!("Panic alert not sent: {}", e)
            }
            Err(e) => tracing::error!("Panic alert failed: {}", e),
        }
        result
    }

    async fn run<S, L, B>(
        &mut self,
        session: &SessionStore<S>,
        locator: &L,
        backend: &B,
        on_state: &mut impl FnMut(PanicState),
    ) -> Result<Notice, PanicError>
    where
        S: KeyValueStore,
        L: LocationProvider,
        B: Backend,
    {
        let phone = session.phone().await?.ok_or(PanicError::NoRegisteredPhone)?;

        self.enter(PanicState::RequestingPermission, on_state);
        let mut permission = locator.permission().await?;
        if permission != Permission::Granted {
            permission = locator.request_permission().await?;
        }
        if permission != Permission::Granted {
            return Err(PanicError::PermissionDenied);
        }

        self.enter(PanicState::AcquiringLocation, on_state);
        let position = locator.current_position(Accuracy::Highest).await?;

        self.enter(PanicState::Posting, on_state);
        backend.send_panic(&PanicAlert::new(phone, position)).await?;

        Ok(Notice::success(
            "Alert sent",
            "Your emergency contacts have been notified.",
        ))
    }

    fn enter(&mut self, state: PanicState, on_state: &mut impl FnMut(PanicState)) {
        if self.state != state {
            self.state = state;
            on_state(state);
        }
    }
}
