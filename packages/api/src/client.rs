//! # Backend client
//!
//! [`Backend`] is the seam between the flows and the REST server: one async method
//! per endpoint. [`HttpBackend`] implements it with `reqwest` and JSON bodies; tests
//! implement it with in-memory fakes.
//!
//! Requests use the transport defaults: no explicit timeout and no retry. A non-2xx
//! status becomes [`ApiError::Status`] and a body that does not match the expected
//! shape becomes [`ApiError::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::AppConfig;

use crate::error::ApiError;
use crate::models::{
    CodeCheck, CodeRequest, Level, LocationOption, NewUser, PanicAlert, PhoneCheck, PhoneRequest,
};

/// Async interface to the PanicButton backend.
pub trait Backend {
    /// `GET /departamentos`
    fn departments(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<LocationOption>, ApiError>>;
    /// Options of `level`, scoped to the id selected at its parent level.
    fn children(
        &self,
        level: Level,
        parent_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<LocationOption>, ApiError>>;
    /// `POST /create-user`
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;
    /// `POST /validate-phone`
    fn validate_phone(
        &self,
        phone: &str,
    ) -> impl std::future::Future<Output = Result<PhoneCheck, ApiError>>;
    /// `POST /verify-code`
    fn verify_code(
        &self,
        phone: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<CodeCheck, ApiError>>;
    /// `POST /panic`
    fn send_panic(
        &self,
        alert: &PanicAlert,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;
}

/// `reqwest`-backed [`Backend`] talking JSON to a fixed base URL.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config.base_url())
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await;
        let body = read_body(&url, response).await?;
        decode(&url, &body)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = self.post(path, body).await?;
        decode(&self.url(path), &body)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await;
        read_body(&url, response).await
    }
}

async fn read_body(
    url: &str,
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<Vec<u8>, ApiError> {
    let http = |source| ApiError::Http {
        url: url.to_string(),
        source,
    };
    let response = response.map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} answered {}", url, status);
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await.map_err(http)?.to_vec())
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| {
        tracing::warn!("Undecodable response from {}: {}", url, source);
        ApiError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

impl Backend for HttpBackend {
    async fn departments(&self) -> Result<Vec<LocationOption>, ApiError> {
        let path = Level::Department
            .path(None)
            .ok_or(ApiError::NoParentEndpoint(Level::Department))?;
        self.get_json(&path).await
    }

    async fn children(&self, level: Level, parent_id: i64) -> Result<Vec<LocationOption>, ApiError> {
        let path = level
            .path(Some(parent_id))
            .ok_or(ApiError::NoParentEndpoint(level))?;
        self.get_json(&path).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.post("/create-user", user).await.map(|_| ())
    }

    async fn validate_phone(&self, phone: &str) -> Result<PhoneCheck, ApiError> {
        let body = PhoneRequest {
            phone: phone.to_string(),
        };
        self.post_json("/validate-phone", &body).await
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<CodeCheck, ApiError> {
        let body = CodeRequest {
            phone: phone.to_string(),
            code: code.to_string(),
        };
        self.post_json("/verify-code", &body).await
    }

    async fn send_panic(&self, alert: &PanicAlert) -> Result<(), ApiError> {
        self.post("/panic", alert).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::models::Coordinates;

    type Captured = Arc<Mutex<Vec<Value>>>;

    async fn serve(router: Router) -> HttpBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpBackend::new(&AppConfig::default().with_base_url(format!("http://{addr}/")))
    }

    fn capture(captured: &Captured, response: Value) -> impl Fn(Json<Value>) -> std::future::Ready<Json<Value>> + Clone {
        let captured = captured.clone();
        move |Json(body): Json<Value>| {
            captured.lock().unwrap().push(body);
            std::future::ready(Json(response.clone()))
        }
    }

    #[tokio::test]
    async fn test_location_endpoints() {
        let router = Router::new()
            .route(
                "/departamentos",
                get(|| async { Json(json!([{"Dpto_ID": 5, "Dpto_Name": "Antioquia"}])) }),
            )
            .route(
                "/ciudades/{id}",
                get(|Path(id): Path<i64>| async move {
                    Json(json!([{"Ciud_ID": id * 10, "Ciud_Name": "Medellín"}]))
                }),
            );
        let backend = serve(router).await;

        let departments = backend.departments().await.unwrap();
        assert_eq!(departments, vec![LocationOption::new(5, "Antioquia")]);

        let cities = backend.children(Level::City, 4).await.unwrap();
        assert_eq!(cities, vec![LocationOption::new(40, "Medellín")]);
    }

    #[tokio::test]
    async fn test_department_is_not_a_child_level() {
        let backend = HttpBackend::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
        let err = backend.children(Level::Department, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::NoParentEndpoint(Level::Department)));
    }

    #[tokio::test]
    async fn test_registration_bodies() {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route(
                "/validate-phone",
                post(capture(&captured, json!({"exists": true, "isAdmin": false}))),
            )
            .route("/verify-code", post(capture(&captured, json!({"valid": true}))));
        let backend = serve(router).await;

        let check = backend.validate_phone("3001234567").await.unwrap();
        assert!(check.exists);
        assert!(!check.is_admin);

        let check = backend.verify_code("3001234567", "4821").await.unwrap();
        assert!(check.valid);

        let bodies = captured.lock().unwrap().clone();
        assert_eq!(
            bodies,
            vec![
                json!({"phone": "3001234567"}),
                json!({"phone": "3001234567", "code": "4821"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_panic_body() {
        let captured: Captured = Arc::default();
        let router = Router::new().route("/panic", post(capture(&captured, json!({"ok": true}))));
        let backend = serve(router).await;

        let alert = PanicAlert::new(
            "3001234567",
            Coordinates {
                latitude: 6.2442,
                longitude: -75.5812,
                accuracy: None,
            },
        );
        backend.send_panic(&alert).await.unwrap();

        assert_eq!(
            captured.lock().unwrap()[0],
            json!({"phone": "3001234567", "latitude": "6.2442", "longitude": "-75.5812"})
        );
    }

    #[tokio::test]
    async fn test_error_status_and_decode() {
        let router = Router::new()
            .route(
                "/create-user",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/verify-code", post(|| async { "not json" }));
        let backend = serve(router).await;

        let user = NewUser {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "3001234567".into(),
            service_id: 1,
            department_id: 1,
            area_id: 2,
            city_id: 3,
            district_id: 4,
            locality_id: 5,
            contact_id: None,
        };
        let err = backend.create_user(&user).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));

        let err = backend.verify_code("3001234567", "0000").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::with_client(reqwest::Client::new(), &format!("http://{addr}"));
        let err = backend.validate_phone("3001234567").await.unwrap_err();
        assert!(matches!(err, ApiError::Http { .. }));
    }
}
