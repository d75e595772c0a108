//! Per-frame overlay pass
//!
//! [`OverlaySystem`] ties the subsystems together: the host hands it a
//! [`FrameView`] and a [`QuadRasterizer`] once per frame, and for each
//! admitted object it selects a filename, resolves it through the texture
//! cache (falling back to the default image exactly once on a miss), builds
//! the billboard quad, and submits the draw. Every failure degrades to
//! "skip this object this frame"; nothing here aborts the frame loop.

pub mod billboard;
pub mod filter;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::assets::image_loader::DiskImageStore;
use crate::assets::selector::{self, ObjectCategory, DEFAULT_IMAGE};
use crate::assets::texture_cache::{TextureCache, TextureHandle};
use crate::config::OverlayConfig;
use crate::foundation::math::Vec3;
use crate::overlay::billboard::{BillboardProjector, BillboardQuad, ViewerPose};

pub use billboard::{BillboardVertex, ScaleMode};
pub use filter::FilterConfig;

/// Identity of a tracked object, stable within a session
pub type ObjectId = u64;

/// Per-frame, read-only view of one tracked object
///
/// Produced fresh each frame by the host's frame/world provider; never
/// persisted across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectSnapshot {
    /// Stable identity used for target matching
    pub id: ObjectId,
    /// Category driving selection and filtering
    pub category: ObjectCategory,
    /// Interpolated world position at this frame's render time
    pub position: Vec3,
    /// Vertical extent of the object; degenerate values are clamped
    pub height: f32,
}

/// Everything the host's frame/world provider yields for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Viewer position and orientation
    pub viewer: ViewerPose,
    /// The object the viewer currently aims at, if any
    pub target: Option<ObjectId>,
    /// All live objects, in no particular order
    pub objects: &'a [ObjectSnapshot],
}

/// Blend mode requested for a billboard draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard alpha blending
    Translucent,
}

/// Host-provided rasterizer that draws one quad with one texture
///
/// Assumed synchronous and always available once a frame has begun.
pub trait QuadRasterizer {
    /// Draw `quad` textured with `texture`
    fn draw(&mut self, quad: &BillboardQuad, texture: TextureHandle, blend: BlendMode);
}

/// The overlay subsystem: directory scan, texture cache, and frame pass
///
/// Owns the cache explicitly; create on subsystem enable, drop (or
/// [`OverlaySystem::disable`]) when the host turns the overlay off. No
/// global state.
#[derive(Debug)]
pub struct OverlaySystem {
    store: DiskImageStore,
    cache: TextureCache,
    image_files: Vec<String>,
}

impl OverlaySystem {
    /// Create a subsystem reading images from `image_dir`
    ///
    /// The host is responsible for creating the directory; an absent
    /// directory just means no images are available.
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: DiskImageStore::new(image_dir),
            cache: TextureCache::new(),
            image_files: Vec::new(),
        }
    }

    /// Scan the image directory; call when the host enables the overlay
    pub fn enable(&mut self) {
        self.image_files = self.store.list_images();
    }

    /// Drop all cached textures and the file listing
    pub fn disable(&mut self) {
        self.cache.invalidate();
        self.image_files.clear();
        log::debug!("Overlay disabled, cache cleared");
    }

    /// Re-list the directory and invalidate the cache
    ///
    /// The one retry mechanism: previously failed filenames are attempted
    /// again on the next frame after this call.
    pub fn rescan(&mut self) {
        self.image_files = self.store.list_images();
        self.cache.invalidate();
    }

    /// The directory this subsystem reads images from
    pub fn image_dir(&self) -> &Path {
        self.store.dir()
    }

    /// The sorted filenames found by the last scan
    pub fn image_files(&self) -> &[String] {
        &self.image_files
    }

    /// Access the texture cache, e.g. for a backend fetching pixels
    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    /// Run the overlay pass for one frame
    ///
    /// For each object: filter -> select -> resolve -> project -> draw.
    /// A miss on the selected filename retries with [`DEFAULT_IMAGE`]
    /// exactly once, so a partial asset set still renders sensibly.
    pub fn render(
        &mut self,
        frame: &FrameView<'_>,
        config: &OverlayConfig,
        rasterizer: &mut dyn QuadRasterizer,
    ) {
        let projector = BillboardProjector::new(config.scale, config.opacity);

        for object in frame.objects {
            if !filter::admits(object, frame.target, &config.filter) {
                continue;
            }

            let filename =
                selector::select_filename(object.category, &config.selection, &self.image_files);

            let Some(texture) = self.resolve_with_fallback(&filename) else {
                continue;
            };

            let quad = projector.project(object.position, object.height, &frame.viewer);
            rasterizer.draw(&quad, texture, BlendMode::Translucent);
        }
    }

    /// Resolve the selected filename, retrying the default image once
    fn resolve_with_fallback(&mut self, filename: &str) -> Option<TextureHandle> {
        if let Some(texture) = self.cache.resolve(&mut self.store, filename) {
            return Some(texture);
        }
        if filename == DEFAULT_IMAGE {
            return None;
        }
        self.cache.resolve(&mut self.store, DEFAULT_IMAGE)
    }
}
