//! Image loading for overlay textures
//!
//! Decodes standard bitmap files (PNG, JPEG, BMP) into raw RGBA8 buffers and
//! scans the overlay directory for candidate files. No caching happens here;
//! that is [`super::texture_cache`]'s job.

use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// File extensions accepted by the directory scan, matched case-insensitively
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Decoded image data ready for upload to a rendering backend
///
/// Pixels are row-major RGBA8 with the top row first. Channel order and
/// alpha are preserved bit-for-bit from the source file; no color-space
/// conversion or premultiplication is applied.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// Fails with [`AssetError::NotFound`] if the file is absent and
    /// [`AssetError::Decode`] if it cannot be decoded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::Decode(format!("{}: {}", path_ref.display(), e)))?;

        // Convert to RGBA8 (standard for GPU upload); exact for RGBA sources
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Load image from memory (useful for embedded fallback assets)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::Decode(format!("in-memory image: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// List image filenames in a directory, lexicographically sorted
///
/// Only files with a recognized image extension are included; the extension
/// match is case-insensitive. An absent or empty directory yields an empty
/// list rather than an error, since a user-managed overlay directory may
/// legitimately hold nothing yet.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Vec<String> {
    let dir = dir.as_ref();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            log::info!("Overlay directory {:?} not readable, no images", dir);
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| has_image_extension(name))
        .collect();

    files.sort();

    if files.is_empty() {
        log::info!("No image files found in {:?}", dir);
    } else {
        log::info!("Found {} image(s) in {:?}: {:?}", files.len(), dir, files);
    }

    files
}

fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Source of decoded images, keyed by logical filename
///
/// The seam between the texture cache and the filesystem. Production code
/// uses [`DiskImageStore`]; tests substitute counting or failing sources to
/// exercise the cache contract.
pub trait ImageSource {
    /// Load and decode the image for `filename`
    fn load(&mut self, filename: &str) -> Result<ImageData, AssetError>;
}

/// Image source backed by a single overlay directory on disk
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory does not need to exist yet; creation is the host's
    /// responsibility alongside its other one-time setup.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List image filenames in this store's directory, sorted
    pub fn list_images(&self) -> Vec<String> {
        list_images(&self.dir)
    }
}

impl ImageSource for DiskImageStore {
    fn load(&mut self, filename: &str) -> Result<ImageData, AssetError> {
        ImageData::from_file(self.dir.join(filename))
    }
}
