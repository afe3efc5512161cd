//! Request and response bodies for `/validate-phone` and `/verify-code`.

use serde::{Deserialize, Serialize};

/// Body of `POST /validate-phone`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoneRequest {
    pub phone: String,
}

/// Answer of `POST /validate-phone`.
///
/// Missing flags read as `false`, so a bare `{}` means "not registered".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneCheck {
    #[serde(default)]
    pub exists: bool,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Body of `POST /verify-code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeRequest {
    pub phone: String,
    pub code: String,
}

/// Answer of `POST /verify-code`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeCheck {
    #[serde(default)]
    pub valid: bool,
}
