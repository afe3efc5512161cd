use serde::{Deserialize, Serialize};

/// A position fix from the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the platform reports it.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Body of `POST /panic`. Coordinates travel as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanicAlert {
    pub phone: String,
    pub latitude: String,
    pub longitude: String,
}

impl PanicAlert {
    pub fn new(phone: impl Into<String>, at: Coordinates) -> Self {
        Self {
            phone: phone.into(),
            latitude: at.latitude.to_string(),
            longitude: at.longitude.to_string(),
        }
    }
}
