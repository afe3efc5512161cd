mod register;
pub use register::Register;

mod home;
pub use home::Home;

mod create_user;
pub use create_user::CreateUser;
