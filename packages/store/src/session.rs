//! # Session store
//!
//! The logged-in user is three plain strings in a [`KeyValueStore`]:
//!
//! | Key | Written by | Meaning |
//! |-----|-----------|---------|
//! | [`USER_PHONE_KEY`] | code confirmation | Registered phone. Its presence means "logged in". |
//! | [`USER_NAME_KEY`] | code confirmation | Display name typed during registration. |
//! | [`USER_ROLE_KEY`] | phone validation | `"admin"` or `"user"`. |
//!
//! [`SessionStore`] owns every access to these keys so screens never touch them
//! directly. The lifecycle is simple: populated during registration, read when a
//! screen mounts, cleared when the user deletes the account from the device.

use serde::{Deserialize, Serialize};

use crate::kv::{KeyValueStore, StoreError};

pub const USER_PHONE_KEY: &str = "userPhone";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_ROLE_KEY: &str = "userRole";

/// User role as reported by the backend when the phone is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Only the exact admin marker counts as admin.
    pub fn parse(s: &str) -> Self {
        if s == "admin" {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Snapshot of the persisted session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub phone: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn is_registered(&self) -> bool {
        self.phone.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Typed access to the session keys of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    kv: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &S {
        &self.kv
    }

    /// Read all three session fields.
    pub async fn load(&self) -> Result<Session, StoreError> {
        Ok(Session {
            phone: self.read(USER_PHONE_KEY).await?,
            name: self.read(USER_NAME_KEY).await?,
            role: self.read(USER_ROLE_KEY).await?.map(|r| Role::parse(&r)),
        })
    }

    /// The registered phone, if any.
    pub async fn phone(&self) -> Result<Option<String>, StoreError> {
        self.read(USER_PHONE_KEY).await
    }

    pub async fn is_registered(&self) -> Result<bool, StoreError> {
        Ok(self.phone().await?.is_some())
    }

    pub async fn set_role(&self, role: Role) -> Result<(), StoreError> {
        self.kv.set(USER_ROLE_KEY, role.as_str()).await
    }

    /// Persist the confirmed identity.
    pub async fn set_identity(&self, phone: &str, name: &str) -> Result<(), StoreError> {
        self.kv.set(USER_PHONE_KEY, phone).await?;
        self.kv.set(USER_NAME_KEY, name).await
    }

    /// Remove every session key.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(USER_PHONE_KEY).await?;
        self.kv.remove(USER_NAME_KEY).await?;
        self.kv.remove(USER_ROLE_KEY).await
    }

    // Empty strings are treated the same as a missing key.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.kv.get(key).await?.filter(|v| !v.is_empty()))
    }
}
