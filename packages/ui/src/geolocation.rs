//! Device location through the webview's `navigator.geolocation`.
//!
//! Permission is read with the Permissions API, which never prompts. Where that
//! API is missing the state counts as undetermined. Requesting permission is a
//! low-accuracy position request, since the geolocation API has no prompt of its own.

use api::{Accuracy, Coordinates, LocationError, LocationProvider, Permission};
use dioxus::prelude::*;
use serde::Deserialize;

const PERMISSION_JS: &str = r#"
if (!navigator.permissions || !navigator.permissions.query) {
    dioxus.send("prompt");
} else {
    navigator.permissions.query({ name: "geolocation" })
        .then((status) => dioxus.send(status.state))
        .catch(() => dioxus.send("prompt"));
}
"#;

const REQUEST_JS: &str = r#"
if (!navigator.geolocation) {
    dioxus.send("denied");
} else {
    navigator.geolocation.getCurrentPosition(
        () => dioxus.send("granted"),
        (err) => dioxus.send(err.code === err.PERMISSION_DENIED ? "denied" : "granted"),
        { enableHighAccuracy: false, maximumAge: Infinity }
    );
}
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewLocator;

#[derive(Deserialize)]
#[serde(untagged)]
enum Fix {
    Position(Coordinates),
    Failed { error: String },
}

fn parse_permission(state: &str) -> Permission {
    match state {
        "granted" => Permission::Granted,
        "denied" => Permission::Denied,
        _ => Permission::Undetermined,
    }
}

fn position_js(accuracy: Accuracy) -> String {
    let high = matches!(accuracy, Accuracy::Highest);
    format!(
        r#"
if (!navigator.geolocation) {{
    dioxus.send({{ error: "Geolocation is not available on this device" }});
}} else {{
    navigator.geolocation.getCurrentPosition(
        (pos) => dioxus.send({{
            latitude: pos.coords.latitude,
            longitude: pos.coords.longitude,
            accuracy: pos.coords.accuracy,
        }}),
        (err) => dioxus.send({{ error: err.message || "Position unavailable" }}),
        {{ enableHighAccuracy: {high}, maximumAge: 0 }}
    );
}}
"#
    )
}

async fn eval_permission(js: &str) -> Result<Permission, LocationError> {
    let mut eval = document::eval(js);
    let state = eval
        .recv::<String>()
        .await
        .map_err(|e| LocationError::new(format!("Permission check failed: {e}")))?;
    Ok(parse_permission(&state))
}

impl LocationProvider for WebviewLocator {
    async fn permission(&self) -> Result<Permission, LocationError> {
        eval_permission(PERMISSION_JS).await
    }

    async fn request_permission(&self) -> Result<Permission, LocationError> {
        let permission = eval_permission(REQUEST_JS).await?;
        tracing::info!("Location permission answer: {:?}", permission);
        Ok(permission)
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates, LocationError> {
        let mut eval = document::eval(&position_js(accuracy));
        let fix = eval
            .recv::<Fix>()
            .await
            .map_err(|e| LocationError::new(e.to_string()))?;
        match fix {
            Fix::Position(coords) => Ok(coords),
            Fix::Failed { error } => Err(LocationError::new(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_states() {
        assert_eq!(parse_permission("granted"), Permission::Granted);
        assert_eq!(parse_permission("denied"), Permission::Denied);
        assert_eq!(parse_permission("prompt"), Permission::Undetermined);
    }

    #[test]
    fn test_position_script_accuracy() {
        assert!(position_js(Accuracy::Highest).contains("enableHighAccuracy: true"));
        assert!(position_js(Accuracy::Balanced).contains("enableHighAccuracy: false"));
    }
}
