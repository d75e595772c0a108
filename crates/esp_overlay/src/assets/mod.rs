//! Asset resolution and caching
//!
//! The pipeline is: [`image_loader`] reads and decodes files from the overlay
//! directory, [`texture_cache`] memoizes the results (failures included), and
//! [`selector`] decides which logical filename to request for a given object
//! category.

pub mod image_loader;
pub mod selector;
pub mod texture_cache;

pub use image_loader::{list_images, DiskImageStore, ImageData, ImageSource};
pub use selector::{select_filename, ImageChoice, ObjectCategory, SelectionConfig, DEFAULT_IMAGE};
pub use texture_cache::{TextureCache, TextureHandle};

use thiserror::Error;

/// Asset loading errors
///
/// Every variant is non-fatal to the frame loop: failures degrade to "no
/// texture for this object this frame" and are recorded by the cache so the
/// load is not retried until an explicit invalidation.
#[derive(Error, Debug)]
pub enum AssetError {
    /// File absent from the overlay directory
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// File present but corrupt or not a recognized image format
    #[error("Failed to decode asset: {0}")]
    Decode(String),

    /// Index-based selection requested but the directory holds no images
    #[error("No image files available")]
    EmptyDirectory,

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
