//! Texture cache with negative caching
//!
//! Memoizes decode results per logical filename so that `resolve` may be
//! called dozens of times per frame for the same image without touching the
//! filesystem. Failures are cached too: a filename that failed to load once
//! is not retried until [`TextureCache::invalidate`] is called. This keeps
//! the at-most-one-decode-per-filename contract enforceable and testable.

use std::collections::HashMap;

use crate::assets::image_loader::{ImageData, ImageSource};
use crate::foundation::collections::{Handle, HandleMap};

/// Opaque reference to a cached texture plus its dimensions
///
/// Cheap to copy and share across draw calls within a frame. A handle is
/// valid until the cache entry that produced it is invalidated; resolving
/// pixels through a stale handle simply yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandle {
    key: Handle,
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
}

/// Memoizing texture cache keyed by normalized logical filename
///
/// Owns the decoded pixel data. The upload to a rendering backend is kept
/// opaque: backends fetch pixels through [`TextureCache::pixels`] when they
/// first see a handle and keep their own GPU-side mapping.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HandleMap<ImageData>,
    /// `None` records a failed load: attempted, do not retry this session
    entries: HashMap<String, Option<TextureHandle>>,
}

impl TextureCache {
    /// Create a new empty texture cache
    pub fn new() -> Self {
        Self {
            textures: HandleMap::new(),
            entries: HashMap::new(),
        }
    }

    /// Resolve a filename to a texture handle, loading on first request
    ///
    /// On the first request for a filename this calls `source.load`; on
    /// success the decoded image is stored and a handle returned, on failure
    /// the failure itself is cached and `None` returned. Subsequent requests
    /// return the stored value without touching the source. Each failed
    /// filename is logged once per cache lifetime.
    pub fn resolve(
        &mut self,
        source: &mut dyn ImageSource,
        filename: &str,
    ) -> Option<TextureHandle> {
        let key = normalize_key(filename);

        if let Some(cached) = self.entries.get(&key) {
            return *cached;
        }

        let resolved = match source.load(filename) {
            Ok(image) => {
                let (width, height) = (image.width, image.height);
                let slot = self.textures.insert(image);
                log::debug!("Cached texture '{}' ({}x{})", key, width, height);
                Some(TextureHandle {
                    key: slot,
                    width,
                    height,
                })
            }
            Err(err) => {
                log::warn!("Failed to load '{}': {}", filename, err);
                None
            }
        };

        self.entries.insert(key, resolved);
        resolved
    }

    /// Get a cached handle without attempting a load
    pub fn get_cached(&self, filename: &str) -> Option<TextureHandle> {
        self.entries
            .get(&normalize_key(filename))
            .copied()
            .flatten()
    }

    /// Access the decoded pixels behind a handle
    ///
    /// Returns `None` for handles invalidated since they were issued.
    pub fn pixels(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.textures.get(handle.key)
    }

    /// Clear all entries, positive and negative
    ///
    /// The next `resolve` for any filename re-attempts the load. All
    /// previously issued handles become stale.
    pub fn invalidate(&mut self) {
        let count = self.entries.len();
        self.textures.clear();
        self.entries.clear();
        if count > 0 {
            log::debug!("Invalidated {} cache entries", count);
        }
    }

    /// Number of entries, failed loads included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a filename into a logical cache key
///
/// Lowercase, with characters outside `[a-z0-9_./-]` replaced by `_`, so a
/// key is stable regardless of filename casing on disk.
fn normalize_key(filename: &str) -> String {
    filename
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '/' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
