//! In-memory [`Backend`] and [`LocationProvider`] doubles for flow tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::client::Backend;
use crate::error::ApiError;
use crate::models::{CodeCheck, Coordinates, Level, LocationOption, NewUser, PanicAlert, PhoneCheck};
use crate::panic::{Accuracy, LocationError, LocationProvider, Permission};

/// Every backend call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Departments,
    Children(Level, i64),
    CreateUser(NewUser),
    ValidatePhone(String),
    VerifyCode(String, String),
    Panic(PanicAlert),
}

pub fn server_error(path: &str) -> ApiError {
    ApiError::Status {
        url: format!("http://backend.test{path}"),
        status: 500,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub calls: RefCell<Vec<Call>>,
    pub phone_check: Cell<Option<PhoneCheck>>,
    pub code_check: Cell<Option<CodeCheck>>,
    pub departments: RefCell<Vec<LocationOption>>,
    pub failing_children: RefCell<HashSet<(Level, i64)>>,
    pub fail_writes: Cell<bool>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phone_check(self, exists: bool, is_admin: bool) -> Self {
        self.phone_check.set(Some(PhoneCheck { exists, is_admin }));
        self
    }

    pub fn with_code_check(self, valid: bool) -> Self {
        self.code_check.set(Some(CodeCheck { valid }));
        self
    }

    /// Two departments; every other level answers two children per parent id.
    pub fn with_hierarchy(self) -> Self {
        *self.departments.borrow_mut() = vec![
            LocationOption::new(1, "Antioquia"),
            LocationOption::new(2, "Cundinamarca"),
        ];
        self
    }

    /// Make the options of `level` under `parent_id` fail with a 500.
    pub fn failing_children(self, level: Level, parent_id: i64) -> Self {
        self.failing_children.borrow_mut().insert((level, parent_id));
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.set(true);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn panic_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Panic(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Backend for FakeBackend {
    async fn departments(&self) -> Result<Vec<LocationOption>, ApiError> {
        self.record(Call::Departments);
        Ok(self.departments.borrow().clone())
    }

    async fn children(&self, level: Level, parent_id: i64) -> Result<Vec<LocationOption>, ApiError> {
        self.record(Call::Children(level, parent_id));
        if self.failing_children.borrow().contains(&(level, parent_id)) {
            return Err(server_error(&level.path(Some(parent_id)).unwrap_or_default()));
        }
        Ok(vec![
            LocationOption::new(parent_id * 10 + 1, format!("{} {}-1", level.label(), parent_id)),
            LocationOption::new(parent_id * 10 + 2, format!("{} {}-2", level.label(), parent_id)),
        ])
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.record(Call::CreateUser(user.clone()));
        if self.fail_writes.get() {
            return Err(server_error("/create-user"));
        }
        Ok(())
    }

    async fn validate_phone(&self, phone: &str) -> Result<PhoneCheck, ApiError> {
        self.record(Call::ValidatePhone(phone.to_string()));
        self.phone_check
            .get()
            .ok_or_else(|| server_error("/validate-phone"))
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<CodeCheck, ApiError> {
        self.record(Call::VerifyCode(phone.to_string(), code.to_string()));
        self.code_check.get().ok_or_else(|| server_error("/verify-code"))
    }

    async fn send_panic(&self, alert: &PanicAlert) -> Result<(), ApiError> {
        self.record(Call::Panic(alert.clone()));
        if self.fail_writes.get() {
            return Err(server_error("/panic"));
        }
        Ok(())
    }
}

/// Scripted device location.
pub struct FakeLocator {
    pub permission: Cell<Permission>,
    /// Answer given when the user is prompted.
    pub prompt_answer: Permission,
    pub position: Result<Coordinates, String>,
    pub prompts: Cell<usize>,
    pub fixes: RefCell<Vec<Accuracy>>,
}

impl FakeLocator {
    pub fn granted() -> Self {
        Self {
            permission: Cell::new(Permission::Granted),
            prompt_answer: Permission::Granted,
            position: Ok(Coordinates {
                latitude: 6.2442,
                longitude: -75.5812,
                accuracy: Some(4.0),
            }),
            prompts: Cell::new(0),
            fixes: RefCell::new(Vec::new()),
        }
    }

    pub fn undetermined(answer: Permission) -> Self {
        Self {
            permission: Cell::new(Permission::Undetermined),
            prompt_answer: answer,
            ..Self::granted()
        }
    }

    pub fn without_fix(message: &str) -> Self {
        Self {
            position: Err(message.to_string()),
            ..Self::granted()
        }
    }
}

impl LocationProvider for FakeLocator {
    async fn permission(&self) -> Result<Permission, LocationError> {
        Ok(self.permission.get())
    }

    async fn request_permission(&self) -> Result<Permission, LocationError> {
        self.prompts.set(self.prompts.get() + 1);
        self.permission.set(self.prompt_answer);
        Ok(self.prompt_answer)
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates, LocationError> {
        self.fixes.borrow_mut().push(accuracy);
        self.position.clone().map_err(LocationError::new)
    }
}
