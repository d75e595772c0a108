//! Image selection per object category
//!
//! Pure resolution from (category, configuration, directory listing) to a
//! logical filename. Never touches the filesystem or the cache; the frame
//! pass owns the fallback-on-miss retry (selected filename, then
//! [`DEFAULT_IMAGE`], then skip).

use serde::{Deserialize, Serialize};

/// Fixed fallback filename used when nothing else resolves
pub const DEFAULT_IMAGE: &str = "default.png";

/// Category of a tracked object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCategory {
    /// First-class objects (e.g. players)
    Primary,
    /// Everything else trackable (e.g. mobs)
    Secondary,
}

/// How to pick an image for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageChoice {
    /// Use the fixed default filename
    Default,
    /// 1-based index into the sorted directory listing, clamped into range
    Index(u32),
    /// Explicit filename, used verbatim
    Named(String),
}

impl Default for ImageChoice {
    fn default() -> Self {
        Self::Default
    }
}

/// Per-category image selection configuration
///
/// Read fresh each frame by the host; nothing here is assumed immutable
/// across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Choice for primary-category objects
    pub primary: ImageChoice,
    /// Choice for secondary-category objects
    pub secondary: ImageChoice,
}

impl SelectionConfig {
    /// The choice configured for `category`
    pub fn choice_for(&self, category: ObjectCategory) -> &ImageChoice {
        match category {
            ObjectCategory::Primary => &self.primary,
            ObjectCategory::Secondary => &self.secondary,
        }
    }
}

/// Resolve the logical filename to request for one object
///
/// Priority, first match wins:
/// 1. explicit non-empty filename, used verbatim
/// 2. 1-based index clamped into `[1, files.len()]`; an empty listing falls
///    through rather than erroring
/// 3. [`DEFAULT_IMAGE`]
///
/// The result always names a candidate, so resolution terminates even when
/// every earlier candidate is absent from disk.
pub fn select_filename(
    category: ObjectCategory,
    config: &SelectionConfig,
    files: &[String],
) -> String {
    match config.choice_for(category) {
        ImageChoice::Named(name) if !name.is_empty() => name.clone(),
        ImageChoice::Index(index) if !files.is_empty() => {
            let clamped = (*index).clamp(1, files.len() as u32) as usize;
            files[clamped - 1].clone()
        }
        _ => DEFAULT_IMAGE.to_string(),
    }
}
