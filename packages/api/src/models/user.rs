//! # New user payload for `POST /create-user`
//!
//! The backend expects its own column names, so every field is renamed on the wire.
//! `cont_id` (emergency contact) is always sent as `null`: contacts are attached
//! later, server-side.

use serde::{Deserialize, Serialize};

/// User created by an administrator from the location form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    #[serde(rename = "Usua_Name")]
    pub name: String,
    #[serde(rename = "Usua_Email")]
    pub email: String,
    pub phone: String,
    #[serde(rename = "serv_id")]
    pub service_id: i64,
    #[serde(rename = "dpto_id")]
    pub department_id: i64,
    pub area_id: i64,
    #[serde(rename = "ciud_id")]
    pub city_id: i64,
    #[serde(rename = "vere_id")]
    pub district_id: i64,
    #[serde(rename = "loca_id")]
    pub locality_id: i64,
    #[serde(rename = "cont_id")]
    pub contact_id: Option<i64>,
}
