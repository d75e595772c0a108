//! End-to-end tests for the overlay frame pass
//!
//! These run the whole pipeline against real files in a scratch directory:
//! scan, filter, select, cache resolve with fallback, project, draw.

use std::path::Path;

use crate::assets::image_loader::ImageData;
use crate::assets::selector::{ImageChoice, ObjectCategory};
use crate::assets::texture_cache::TextureHandle;
use crate::config::OverlayConfig;
use crate::foundation::math::Vec3;
use crate::overlay::billboard::{BillboardQuad, ViewerPose};
use crate::overlay::{BlendMode, FrameView, ObjectSnapshot, OverlaySystem, QuadRasterizer};

/// Rasterizer that records every submitted draw
#[derive(Default)]
struct RecordingRasterizer {
    draws: Vec<(BillboardQuad, TextureHandle)>,
}

impl QuadRasterizer for RecordingRasterizer {
    fn draw(&mut self, quad: &BillboardQuad, texture: TextureHandle, blend: BlendMode) {
        assert_eq!(blend, BlendMode::Translucent);
        self.draws.push((*quad, texture));
    }
}

fn write_png(dir: &Path, name: &str) {
    let pixels = ImageData::solid_color(4, 4, [255, 255, 255, 255]);
    image::save_buffer(dir.join(name), &pixels.data, 4, 4, image::ExtendedColorType::Rgba8).unwrap();
}

fn object(id: u64, category: ObjectCategory) -> ObjectSnapshot {
    ObjectSnapshot {
        id,
        category,
        position: Vec3::new(0.0, 0.0, -5.0),
        height: 1.8,
    }
}

fn frame(objects: &[ObjectSnapshot]) -> FrameView<'_> {
    FrameView {
        viewer: ViewerPose::default(),
        target: None,
        objects,
    }
}

#[test]
fn test_present_image_draws_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "default.png");
    write_png(dir.path(), "player.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();
    assert_eq!(overlay.image_files(), ["default.png", "player.png"]);

    let mut config = OverlayConfig::default();
    config.selection.primary = ImageChoice::Named("player.png".to_string());

    let objects = [object(1, ObjectCategory::Primary)];
    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);

    assert_eq!(rasterizer.draws.len(), 1);
    let drawn = rasterizer.draws[0].1;
    assert_eq!(overlay.cache().get_cached("player.png"), Some(drawn));

    // The default image was never touched
    assert_eq!(overlay.cache().len(), 1);
}

#[test]
fn test_absent_image_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "default.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let mut config = OverlayConfig::default();
    config.filter.primary_only = false;
    config.filter.include_secondary = true;
    config.selection.secondary = ImageChoice::Named("mob.png".to_string());

    let objects = [object(2, ObjectCategory::Secondary)];
    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);

    assert_eq!(rasterizer.draws.len(), 1);
    let drawn = rasterizer.draws[0].1;
    assert_eq!(overlay.cache().get_cached("default.png"), Some(drawn));

    // The miss on mob.png is negative-cached alongside the default entry
    assert_eq!(overlay.cache().len(), 2);
    assert_eq!(overlay.cache().get_cached("mob.png"), None);
}

#[test]
fn test_empty_directory_with_index_selection_skips_quietly() {
    let dir = tempfile::tempdir().unwrap();

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();
    assert!(overlay.image_files().is_empty());

    let mut config = OverlayConfig::default();
    config.selection.primary = ImageChoice::Index(3);

    let objects = [object(1, ObjectCategory::Primary)];
    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);

    // Index falls through to the default filename, which is also absent;
    // the object is skipped with a single negative cache entry
    assert!(rasterizer.draws.is_empty());
    assert_eq!(overlay.cache().len(), 1);
}

#[test]
fn test_index_selection_picks_from_sorted_listing() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "apple.png");
    write_png(dir.path(), "banana.png");
    write_png(dir.path(), "cherry.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let mut config = OverlayConfig::default();
    config.selection.primary = ImageChoice::Index(2);

    let objects = [object(1, ObjectCategory::Primary)];
    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);

    assert_eq!(rasterizer.draws.len(), 1);
    assert_eq!(
        overlay.cache().get_cached("banana.png"),
        Some(rasterizer.draws[0].1)
    );
}

#[test]
fn test_rescan_retries_previously_missing_image() {
    let dir = tempfile::tempdir().unwrap();

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let config = OverlayConfig::default();
    let objects = [object(1, ObjectCategory::Primary)];

    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);
    assert!(rasterizer.draws.is_empty());

    // The default image appears on disk; nothing changes until a rescan
    write_png(dir.path(), "default.png");
    overlay.render(&frame(&objects), &config, &mut rasterizer);
    assert!(rasterizer.draws.is_empty());

    overlay.rescan();
    overlay.render(&frame(&objects), &config, &mut rasterizer);
    assert_eq!(rasterizer.draws.len(), 1);
}

#[test]
fn test_target_only_draws_single_object() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "default.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let mut config = OverlayConfig::default();
    config.filter.target_only = true;

    let objects = [
        object(1, ObjectCategory::Primary),
        object(2, ObjectCategory::Primary),
        object(3, ObjectCategory::Primary),
    ];
    let view = FrameView {
        viewer: ViewerPose::default(),
        target: Some(2),
        objects: &objects,
    };

    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&view, &config, &mut rasterizer);
    assert_eq!(rasterizer.draws.len(), 1);
}

#[test]
fn test_shared_texture_across_draws() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "default.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let config = OverlayConfig::default();
    let objects = [
        object(1, ObjectCategory::Primary),
        object(2, ObjectCategory::Primary),
    ];

    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);

    // One decode, one handle, two draws
    assert_eq!(rasterizer.draws.len(), 2);
    assert_eq!(rasterizer.draws[0].1, rasterizer.draws[1].1);
    assert_eq!(overlay.cache().len(), 1);
}

#[test]
fn test_disable_clears_state() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "default.png");

    let mut overlay = OverlaySystem::new(dir.path());
    overlay.enable();

    let config = OverlayConfig::default();
    let objects = [object(1, ObjectCategory::Primary)];
    let mut rasterizer = RecordingRasterizer::default();
    overlay.render(&frame(&objects), &config, &mut rasterizer);
    assert!(!overlay.cache().is_empty());

    overlay.disable();
    assert!(overlay.cache().is_empty());
    assert!(overlay.image_files().is_empty());
}
