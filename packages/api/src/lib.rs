//! # API crate: backend client and client-side flows for PanicButton
//!
//! This crate holds everything the screens do that is not drawing: talking to the
//! REST backend, and the small state machines behind each screen. Nothing in here
//! depends on Dioxus, so every flow is testable with a fake [`Backend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`Backend`] trait and the `reqwest`-based [`HttpBackend`] |
//! | [`error`] | [`ApiError`] for transport/status/decode failures |
//! | [`models`] | Wire types: location options, registration checks, new users, panic alerts |
//! | [`notice`] | User-facing [`Notice`] messages returned by every flow |
//! | [`registration`] | Two-step phone validation → code confirmation |
//! | [`cascade`] | Five-level dependent location selection |
//! | [`create_user`] | Admin user-creation form validation and submission |
//! | [`panic`] | Permission → location → post panic trigger |
//! | [`session_gate`] | Launch routing, home profile, session deletion |
//!
//! ## Endpoints
//!
//! - **Locations**: `GET /departamentos`, `/areas/{id}`, `/ciudades/{id}`, `/veredas/{id}`, `/localidades/{id}`
//! - **Registration**: `POST /validate-phone`, `POST /verify-code`
//! - **Administration**: `POST /create-user`
//! - **Alerts**: `POST /panic`

pub mod cascade;
pub mod client;
pub mod create_user;
pub mod error;
pub mod models;
pub mod notice;
pub mod panic;
pub mod registration;
pub mod session_gate;

#[cfg(test)]
mod fake;

pub use cascade::{Fetch, LocationCascade, LocationSelection};
pub use client::{Backend, HttpBackend};
pub use create_user::{CreateUserError, CreateUserForm, UserDraft};
pub use error::ApiError;
pub use models::{
    CodeCheck, Coordinates, Level, LocationOption, NewUser, PanicAlert, PhoneCheck,
};
pub use notice::{Notice, NoticeKind};
pub use panic::{
    Accuracy, LocationError, LocationProvider, PanicError, PanicState, PanicTrigger, Permission,
};
pub use registration::{FlowStatus, Registration, RegistrationError, Step};
pub use session_gate::{delete_session, initial_route, AdminAction, Destination, HomeProfile};

pub use store::{AppConfig, Role, Session, SessionStore};
