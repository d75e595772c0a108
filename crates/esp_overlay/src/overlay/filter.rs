//! Per-object visibility gate
//!
//! Stateless predicate deciding whether an object receives an overlay this
//! frame. Target-only mode is the strictest gate and short-circuits the
//! category rules.

use serde::{Deserialize, Serialize};

use crate::assets::selector::ObjectCategory;
use crate::overlay::{ObjectId, ObjectSnapshot};

/// Visibility filter configuration
///
/// Read fresh each frame; defaults mirror the conventional setup of showing
/// primary-category objects only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Only the object the viewer is currently aiming at is admitted
    pub target_only: bool,
    /// Restrict overlays to primary-category objects
    pub primary_only: bool,
    /// Admit secondary-category objects (ignored while `primary_only` is set)
    pub include_secondary: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            target_only: false,
            primary_only: true,
            include_secondary: false,
        }
    }
}

/// Decide whether `object` receives an overlay this frame
pub fn admits(
    object: &ObjectSnapshot,
    viewer_target: Option<ObjectId>,
    config: &FilterConfig,
) -> bool {
    if config.target_only && viewer_target != Some(object.id) {
        return false;
    }

    match object.category {
        ObjectCategory::Primary => true,
        ObjectCategory::Secondary => !config.primary_only && config.include_secondary,
    }
}
