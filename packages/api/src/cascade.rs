//! # Location cascade
//!
//! Five dependent dropdowns (department → area → city → district → locality). The
//! whole clearing rule lives in [`LocationCascade::select`]: choosing an id at level
//! *k* clears the ids and option lists of every level below *k* and names the one
//! fetch that must follow. Nothing below a level is fetched before that level has a
//! selection.
//!
//! Selection and fetching are split so a UI can update its signal synchronously,
//! await the request without holding the signal, and hand the answer to
//! [`LocationCascade::apply_options`]. Answers for a parent that is no longer
//! selected are dropped, since an in-flight request cannot be cancelled.
//!
//! A failed fetch leaves the level empty, logs a warning, and records a load error
//! the picker shows under the dropdown.

use crate::client::Backend;
use crate::error::ApiError;
use crate::models::{Level, LocationOption};

/// Options request that follows a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fetch {
    pub level: Level,
    pub parent_id: Option<i64>,
}

impl Fetch {
    pub fn departments() -> Self {
        Self {
            level: Level::Department,
            parent_id: None,
        }
    }
}

/// Run a [`Fetch`] against the backend.
pub async fn fetch_options<B: Backend>(
    backend: &B,
    fetch: &Fetch,
) -> Result<Vec<LocationOption>, ApiError> {
    match fetch.parent_id {
        None if fetch.level == Level::Department => backend.departments().await,
        Some(parent_id) => backend.children(fetch.level, parent_id).await,
        None => Err(ApiError::NoParentEndpoint(fetch.level)),
    }
}

/// The five ids of a complete selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSelection {
    pub department_id: i64,
    pub area_id: i64,
    pub city_id: i64,
    pub district_id: i64,
    pub locality_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Slot {
    options: Vec<LocationOption>,
    selected: Option<i64>,
    load_error: Option<String>,
}

impl Slot {
    fn reset(&mut self) {
        *self = Slot::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationCascade {
    slots: [Slot; 5],
}

impl LocationCascade {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, level: Level) -> &Slot {
        &self.slots[level.index()]
    }

    fn slot_mut(&mut self, level: Level) -> &mut Slot {
        &mut self.slots[level.index()]
    }

    pub fn options(&self, level: Level) -> &[LocationOption] {
        &self.slot(level).options
    }

    pub fn selected(&self, level: Level) -> Option<i64> {
        self.slot(level).selected
    }

    pub fn load_error(&self, level: Level) -> Option<&str> {
        self.slot(level).load_error.as_deref()
    }

    /// A level can be picked from once its parent has a selection.
    pub fn is_enabled(&self, level: Level) -> bool {
        match level.parent() {
            None => true,
            Some(parent) => self.selected(parent).is_some(),
        }
    }

    /// Choose `id` at `level`.
    ///
    /// Clears every lower level and returns the fetch for the next level, or `None`
    /// at the last level or when `level` is not enabled yet (nothing changes then).
    pub fn select(&mut self, level: Level, id: i64) -> Option<Fetch> {
        if !self.is_enabled(level) {
            tracing::debug!("Ignoring {:?} selection before its parent", level);
            return None;
        }
        self.slot_mut(level).selected = Some(id);
        self.clear_below(level);
        level.next().map(|next| Fetch {
            level: next,
            parent_id: Some(id),
        })
    }

    /// Go back to the placeholder at `level`, clearing it and everything below.
    /// The level keeps its options so the user can pick again.
    pub fn deselect(&mut self, level: Level) {
        self.slot_mut(level).selected = None;
        self.clear_below(level);
    }

    fn clear_below(&mut self, level: Level) {
        for slot in &mut self.slots[level.index() + 1..] {
            slot.reset();
        }
    }

    /// Install the answer of `fetch`. Returns `false` when the answer is stale.
    pub fn apply_options(
        &mut self,
        fetch: &Fetch,
        result: Result<Vec<LocationOption>, ApiError>,
    ) -> bool {
        let current_parent = fetch.level.parent().and_then(|p| self.selected(p));
        if current_parent != fetch.parent_id {
            tracing::debug!("Dropping stale {:?} options", fetch.level);
            return false;
        }

        let slot = self.slot_mut(fetch.level);
        match result {
            Ok(options) => {
                slot.options = options;
                slot.load_error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load {:?} options: {}", fetch.level, e);
                slot.options.clear();
                slot.load_error = Some(format!(
                    "Could not load {} options",
                    fetch.level.label().to_lowercase()
                ));
            }
        }
        true
    }

    /// Fetch and install the department list.
    pub async fn load_departments<B: Backend>(&mut self, backend: &B) {
        let fetch = Fetch::departments();
        let result = fetch_options(backend, &fetch).await;
        self.apply_options(&fetch, result);
    }

    /// Select and fetch the next level in one go.
    pub async fn choose<B: Backend>(&mut self, backend: &B, level: Level, id: i64) {
        if let Some(fetch) = self.select(level, id) {
            let result = fetch_options(backend, &fetch).await;
            self.apply_options(&fetch, result);
        }
    }

    /// Levels without a selection, broadest first.
    pub fn missing(&self) -> Vec<Level> {
        Level::ALL
            .into_iter()
            .filter(|level| self.selected(*level).is_none())
            .collect()
    }

    pub fn selection(&self) -> Option<LocationSelection> {
        Some(LocationSelection {
            department_id: self.selected(Level::Department)?,
            area_id: self.selected(Level::Area)?,
            city_id: self.selected(Level::City)?,
            district_id: self.selected(Level::District)?,
            locality_id: self.selected(Level::Locality)?,
        })
    }
}
