use api::HomeProfile;
use dioxus::prelude::*;

use crate::make_session;

/// The stored profile, read once when the screen mounts.
///
/// `None` while loading. A store failure is logged and shows as an empty profile.
pub fn use_home_profile() -> Resource<HomeProfile> {
    use_resource(move || async move {
        match HomeProfile::load(&make_session()).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to read session: {}", e);
                HomeProfile::default()
            }
        }
    })
}
