//! Launch routing and the home screen's view of the session.

use store::{KeyValueStore, Session, SessionStore, StoreError};

use crate::notice::Notice;

/// Where the app goes after the launch check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Register,
    Home,
}

/// A stored phone means the user is logged in.
pub async fn initial_route<S: KeyValueStore>(
    session: &SessionStore<S>,
) -> Result<Destination, StoreError> {
    let destination = if session.is_registered().await? {
        Destination::Home
    } else {
        Destination::Register
    };
    tracing::debug!("Launch route: {:?}", destination);
    Ok(destination)
}

/// Actions offered to administrators on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    CreateUser,
    CreateContact,
}

impl AdminAction {
    pub fn label(self) -> &'static str {
        match self {
            AdminAction::CreateUser => "Create user",
            AdminAction::CreateContact => "Create contact",
        }
    }

    /// Contact creation has no screen yet; the button is shown disabled.
    pub fn is_available(self) -> bool {
        matches!(self, AdminAction::CreateUser)
    }
}

/// What the home screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeProfile {
    pub phone: Option<String>,
    pub name: Option<String>,
    pub is_admin: bool,
}

impl HomeProfile {
    pub async fn load<S: KeyValueStore>(session: &SessionStore<S>) -> Result<Self, StoreError> {
        Ok(Self::from(session.load().await?))
    }

    pub fn admin_actions(&self) -> &'static [AdminAction] {
        if self.is_admin {
            &[AdminAction::CreateUser, AdminAction::CreateContact]
        } else {
            &[]
        }
    }
}

impl From<Session> for HomeProfile {
    fn from(session: Session) -> Self {
        let is_admin = session.is_admin();
        Self {
            phone: session.phone,
            name: session.name,
            is_admin,
        }
    }
}

/// Forget the user on this device. The caller routes back to registration.
pub async fn delete_session<S: KeyValueStore>(
    session: &SessionStore<S>,
) -> Result<Notice, StoreError> {
    session.clear().await?;
    tracing::info!("Session deleted");
    Ok(Notice::info("User deleted", "You must register again."))
}
