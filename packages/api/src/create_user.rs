//! Admin user-creation form.
//!
//! The form is valid only when name, email and phone are filled in, every level of
//! the [`LocationCascade`] has a selection, and a service id is configured. An
//! invalid form never reaches the backend.
//!
//! The cascade is passed in rather than owned: the picker updates it on its own as
//! option lists arrive, while the form only reads it at submission.

use thiserror::Error;

use crate::cascade::LocationCascade;
use crate::client::Backend;
use crate::error::ApiError;
use crate::models::{Level, NewUser};
use crate::notice::Notice;
use crate::registration::FlowStatus;

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("All fields are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("A request is already in progress")]
    Busy,
    #[error("Could not create the user")]
    Backend(#[from] ApiError),
}

impl CreateUserError {
    pub fn notice(&self) -> Notice {
        Notice::error("Error", self.to_string())
    }
}

/// Free-text fields of the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Form state of the create-user screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserForm {
    pub draft: UserDraft,
    status: FlowStatus,
}

fn level_field(level: Level) -> &'static str {
    match level {
        Level::Department => "department",
        Level::Area => "area",
        Level::City => "city",
        Level::District => "district",
        Level::Locality => "locality",
    }
}

impl CreateUserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_in_flight()
    }

    pub fn mark_in_flight(&mut self) {
        self.status = FlowStatus::InFlight;
    }

    /// Validate and build the payload without touching the network.
    pub fn build(
        &self,
        cascade: &LocationCascade,
        service_id: i64,
    ) -> Result<NewUser, CreateUserError> {
        let name = self.draft.name.trim();
        let email = self.draft.email.trim();
        let phone = self.draft.phone.trim();

        let mut missing = Vec::new();
        for (field, value) in [("name", name), ("email", email), ("phone", phone)] {
            if value.is_empty() {
                missing.push(field);
            }
        }
        missing.extend(cascade.missing().into_iter().map(level_field));
        if service_id <= 0 {
            missing.push("service");
        }

        let Some(location) = cascade.selection().filter(|_| missing.is_empty()) else {
            return Err(CreateUserError::MissingFields(missing));
        };

        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            service_id,
            department_id: location.department_id,
            area_id: location.area_id,
            city_id: location.city_id,
            district_id: location.district_id,
            locality_id: location.locality_id,
            contact_id: None,
        })
    }

    /// Post the form. The caller navigates home on success.
    pub async fn submit<B: Backend>(
        &mut self,
        backend: &B,
        cascade: &LocationCascade,
        service_id: i64,
    ) -> Result<Notice, CreateUserError> {
        if self.is_busy() {
            return Err(CreateUserError::Busy);
        }

        let user = match self.build(cascade, service_id) {
            Ok(user) => user,
            Err(e) => {
                self.status = FlowStatus::Failed(e.to_string());
                return Err(e);
            }
        };

        self.status = FlowStatus::InFlight;
        if let Err(e) = backend.create_user(&user).await {
            tracing::warn!("Create user failed: {}", e);
            let err = CreateUserError::from(e);
            self.status = FlowStatus::Failed(err.to_string());
            return Err(err);
        }

        tracing::info!("Created user for locality {}", user.locality_id);
        self.status = FlowStatus::Done;
        Ok(Notice::success("Success", "User created"))
    }
}
