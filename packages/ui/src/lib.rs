//! Shared UI for the PanicButton app: platform constructors, dialogs, and the
//! widgets the screens are built from.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod platform;
pub use platform::{app_config, make_backend, make_session, PlatformStore};

mod notice;
pub use notice::{use_notice, NoticeProvider};

mod dialog;
pub use dialog::{ConfirmDialog, ModalOverlay};

mod geolocation;
pub use geolocation::WebviewLocator;

mod panic_button;
pub use panic_button::PanicButton;

mod location_picker;
pub use location_picker::LocationPicker;

mod profile;
pub use profile::use_home_profile;
