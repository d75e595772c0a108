//! # ESP Overlay
//!
//! A per-entity image billboard overlay subsystem for live 3D scenes.
//!
//! The crate decodes image files from a user-managed directory, caches the
//! results (including failures), picks an image per object category, and
//! emits camera-facing quad geometry anchored above each tracked object.
//! The host application supplies the per-frame world view and a rasterizer;
//! this crate supplies everything in between.
//!
//! ## Features
//!
//! - **Negative-caching texture cache**: at most one decode attempt per
//!   filename per cache lifetime
//! - **Configurable selection**: explicit filename, 1-based index into the
//!   sorted directory listing, or a fixed default
//! - **Visibility filtering**: category restriction, target-only mode
//! - **Backend-agnostic geometry**: plain vertex buffers, no GPU API types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use esp_overlay::prelude::*;
//!
//! let mut overlay = OverlaySystem::new("esp-images");
//! overlay.enable();
//!
//! // Each frame, with a FrameView from the host and a rasterizer:
//! # struct NullRasterizer;
//! # impl QuadRasterizer for NullRasterizer {
//! #     fn draw(&mut self, _: &BillboardQuad, _: TextureHandle, _: BlendMode) {}
//! # }
//! # let (viewer, objects) = (ViewerPose::default(), vec![]);
//! # let mut rasterizer = NullRasterizer;
//! let config = OverlayConfig::default();
//! let frame = FrameView { viewer, target: None, objects: &objects };
//! overlay.render(&frame, &config, &mut rasterizer);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod overlay;

pub use assets::{AssetError, ImageData, TextureCache, TextureHandle};
pub use config::{Config, ConfigError, OverlayConfig};
pub use overlay::{FrameView, ObjectSnapshot, OverlaySystem, QuadRasterizer};

/// Common imports for overlay users
pub mod prelude {
    pub use crate::{
        assets::{
            image_loader::{DiskImageStore, ImageSource},
            selector::{ImageChoice, ObjectCategory, SelectionConfig},
            AssetError, ImageData, TextureCache, TextureHandle,
        },
        config::{Config, ConfigError, OverlayConfig},
        foundation::math::{Quat, Vec2, Vec3},
        overlay::{
            billboard::{BillboardQuad, BillboardVertex, ScaleMode, ViewerPose},
            filter::FilterConfig,
            BlendMode, FrameView, ObjectId, ObjectSnapshot, OverlaySystem, QuadRasterizer,
        },
    };
}
