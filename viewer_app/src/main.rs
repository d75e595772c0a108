//! Headless overlay viewer demo
//!
//! Stands in for a real host: creates the image directory, seeds a default
//! image on first run, fabricates a small scene, and runs one overlay pass
//! with a rasterizer that logs every draw instead of hitting a GPU.
//!
//! Usage: `overlay_viewer [image-dir] [config.toml|config.ron]`

use esp_overlay::prelude::*;

/// Rasterizer that prints submitted quads to the log
#[derive(Default)]
struct LoggingRasterizer {
    submitted: usize,
}

impl QuadRasterizer for LoggingRasterizer {
    fn draw(&mut self, quad: &BillboardQuad, texture: TextureHandle, _blend: BlendMode) {
        self.submitted += 1;
        let center = quad.center();
        log::info!(
            "draw #{}: {}x{} texture at ({:.2}, {:.2}, {:.2}), {:.2}x{:.2} world units",
            self.submitted,
            texture.width,
            texture.height,
            center.x,
            center.y,
            center.z,
            quad.width(),
            quad.height(),
        );
    }
}

fn seed_default_image(dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join("default.png");
    if path.exists() {
        return Ok(());
    }

    // Translucent white square so first runs have something to draw
    let pixels = ImageData::solid_color(64, 64, [255, 255, 255, 200]);
    image::save_buffer(&path, &pixels.data, 64, 64, image::ExtendedColorType::Rgba8)?;
    log::info!("Seeded {:?}", path);
    Ok(())
}

fn demo_scene() -> Vec<ObjectSnapshot> {
    vec![
        ObjectSnapshot {
            id: 1,
            category: ObjectCategory::Primary,
            position: Vec3::new(2.0, 0.0, -8.0),
            height: 1.8,
        },
        ObjectSnapshot {
            id: 2,
            category: ObjectCategory::Primary,
            position: Vec3::new(-3.5, 0.0, -12.0),
            height: 1.8,
        },
        ObjectSnapshot {
            id: 3,
            category: ObjectCategory::Secondary,
            position: Vec3::new(0.5, 0.0, -6.0),
            height: 0.7,
        },
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let image_dir = args.next().unwrap_or_else(|| "esp-images".to_string());
    let config = match args.next() {
        Some(path) => OverlayConfig::load_from_file(&path)?,
        None => {
            // No config given: show everything in the demo scene
            let mut config = OverlayConfig::default();
            config.filter.primary_only = false;
            config.filter.include_secondary = true;
            config
        }
    };

    // Directory creation is the host's job, so the demo does it here
    std::fs::create_dir_all(&image_dir)?;
    seed_default_image(std::path::Path::new(&image_dir))?;

    let mut overlay = OverlaySystem::new(image_dir);
    overlay.enable();
    log::info!(
        "Scanned {:?}: {} image(s)",
        overlay.image_dir(),
        overlay.image_files().len()
    );

    let objects = demo_scene();
    let frame = FrameView {
        viewer: ViewerPose {
            position: Vec3::new(0.0, 1.6, 0.0),
            rotation: Quat::identity(),
        },
        target: Some(1),
        objects: &objects,
    };

    let mut rasterizer = LoggingRasterizer::default();
    overlay.render(&frame, &config, &mut rasterizer);

    log::info!("Frame complete: {} draw(s) submitted", rasterizer.submitted);
    Ok(())
}
