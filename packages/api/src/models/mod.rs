//! Wire models for the backend endpoints.

mod location;
mod panic;
mod registration;
mod user;

pub use location::{Level, LocationOption};
pub use panic::{Coordinates, PanicAlert};
pub use registration::{CodeCheck, CodeRequest, PhoneCheck, PhoneRequest};
pub use user::NewUser;
