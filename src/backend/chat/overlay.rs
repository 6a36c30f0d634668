/**
 * Name Overlay
 *
 * Each participant may give the other participant of a thread a custom
 * display name. The overlay is keyed by the *viewer*, the participant who
 * chose the name, not by the participant being named:
 *
 * ```text
 * thread 111_222, overlay {"111": "Bob"}
 *   viewer 111 sees 222 as "Bob"
 *   viewer 222 sees 111 as "111" (nothing saved, raw identifier)
 * ```
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::backend::chat::model::Thread;

/// Viewer identifier to display name chosen by that viewer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameOverlay(BTreeMap<String, String>);

impl NameOverlay {
    /// Name `viewer` saved for the other participant, if any
    pub fn get(&self, viewer: &str) -> Option<&str> {
        self.0.get(viewer).map(String::as_str)
    }

    pub fn contains(&self, viewer: &str) -> bool {
        self.0.contains_key(viewer)
    }

    /// Set or replace the name saved by `viewer`
    pub fn set(&mut self, viewer: impl Into<String>, name: impl Into<String>) {
        self.0.insert(viewer.into(), name.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for NameOverlay {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Name under which `viewer` sees the other participant of `thread`.
///
/// Falls back to the other participant's raw identifier when `viewer` has
/// not saved a name. Returns `None` if `viewer` is not a participant.
pub fn resolve_display_name(thread: &Thread, viewer: &str) -> Option<String> {
    let other = thread.other_participant(viewer)?;
    let name = thread.name_overlay.get(viewer).unwrap_or(other);
    Some(name.to_string())
}
