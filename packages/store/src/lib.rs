pub mod config;
pub mod kv;
pub mod session;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use config::AppConfig;
pub use kv::{KeyValueStore, StoreError};
pub use session::{Role, Session, SessionStore};
