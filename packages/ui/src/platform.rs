//! Shared constructors for all platforms.
//!
//! - **Desktop / Mobile** (native): session keys live under `<data_dir>/panicbutton/`
//!   and `panicbutton.toml` is read from the same directory.
//! - **Web** (WASM): an in-memory session that lasts as long as the page, and the
//!   compiled-in default config.

use std::sync::OnceLock;

use api::HttpBackend;
use store::{AppConfig, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(target_arch = "wasm32")]
pub type PlatformStore = store::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("panicbutton")
}

/// Open the device session. Cheap; call it wherever the session is needed.
pub fn make_session() -> SessionStore<PlatformStore> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        SessionStore::new(store::FileStore::new(data_dir()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        static MEMORY: OnceLock<store::MemoryStore> = OnceLock::new();
        SessionStore::new(MEMORY.get_or_init(store::MemoryStore::new).clone())
    }
}

/// App configuration, loaded once.
///
/// A missing file means defaults. An unreadable or malformed file is logged and
/// also falls back to defaults so the panic button keeps working.
pub fn app_config() -> &'static AppConfig {
    static CONFIG: OnceLock<AppConfig> = OnceLock::new();
    CONFIG.get_or_init(load_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> AppConfig {
    let path = data_dir().join(AppConfig::filename());
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return AppConfig::default();
        }
    };
    match AppConfig::from_toml(&contents) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Invalid config in {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> AppConfig {
    AppConfig::default()
}

/// Backend client for the configured server. Clones share one connection pool.
pub fn make_backend() -> HttpBackend {
    static BACKEND: OnceLock<HttpBackend> = OnceLock::new();
    BACKEND
        .get_or_init(|| HttpBackend::new(app_config()))
        .clone()
}
