//! Billboard quad projection
//!
//! Builds a world-space quad anchored above a tracked object and oriented by
//! the viewer's rotation. Using the viewer's own orientation rather than a
//! recomputed per-object look-at keeps every quad in a frame identically
//! facing, which is the visually correct behavior for camera-aligned
//! billboards and avoids per-object trigonometry.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Vec3};

/// Vertical gap between the top of an object and its billboard anchor
pub const VERTICAL_OFFSET: f32 = 0.2;

/// Floor for an object's reported height; degenerate extents clamp here
pub const MIN_OBJECT_HEIGHT: f32 = 0.1;

/// Floor for the effective billboard scale; quads never collapse to zero
pub const SCALE_FLOOR: f32 = 0.05;

/// Viewer position and orientation for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    /// Viewer position in world space
    pub position: Vec3,
    /// Viewer orientation; the quad plane follows this rotation
    pub rotation: Quat,
}

impl Default for ViewerPose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl ViewerPose {
    /// The viewer's right axis in world space
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// The viewer's up axis in world space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }
}

/// How the billboard's world-space size is derived
///
/// Both modes are supported as alternate configurations; they are distinct
/// formulas, not blended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Fixed scale in world units
    Fixed(f32),
    /// Scale derived from the object's own (clamped) height
    ObjectHeight {
        /// Multiplier applied to the object's height
        factor: f32,
    },
}

impl Default for ScaleMode {
    fn default() -> Self {
        Self::Fixed(1.0)
    }
}

/// Vertex data for a billboard quad
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BillboardVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Texture coordinates, (0,0) at the texture's top-left
    pub uv: [f32; 2],
    /// RGBA color; white with the configured opacity in alpha
    pub color: [f32; 4],
}

/// A camera-facing quad, produced per object per frame and consumed
/// immediately by the rasterizer
///
/// Vertices are ordered top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardQuad {
    /// The four corner vertices
    pub vertices: [BillboardVertex; 4],
}

impl BillboardQuad {
    /// Center of the quad in world space
    pub fn center(&self) -> Vec3 {
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::zeros(), |acc, v| acc + Vec3::from(v.position));
        sum / 4.0
    }

    /// World-space width of the quad
    pub fn width(&self) -> f32 {
        (Vec3::from(self.vertices[1].position) - Vec3::from(self.vertices[0].position)).norm()
    }

    /// World-space height of the quad
    pub fn height(&self) -> f32 {
        (Vec3::from(self.vertices[0].position) - Vec3::from(self.vertices[3].position)).norm()
    }
}

/// Projects billboards for one frame's scale and opacity settings
#[derive(Debug, Clone, Copy)]
pub struct BillboardProjector {
    scale_mode: ScaleMode,
    opacity: f32,
}

impl BillboardProjector {
    /// Create a projector for this frame's configuration
    pub fn new(scale_mode: ScaleMode, opacity: f32) -> Self {
        Self {
            scale_mode,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Build the quad for one object
    ///
    /// The anchor sits at `position + (0, height + VERTICAL_OFFSET, 0)` with
    /// the object's height clamped to [`MIN_OBJECT_HEIGHT`] first, lifting
    /// the quad clear of the object's own geometry. The quad is centered on
    /// the anchor, spans the viewer's right/up axes, and maps the full
    /// texture with the top row on its top edge.
    pub fn project(
        &self,
        object_position: Vec3,
        object_height: f32,
        viewer: &ViewerPose,
    ) -> BillboardQuad {
        let height = object_height.max(MIN_OBJECT_HEIGHT);
        let anchor = object_position + Vec3::new(0.0, height + VERTICAL_OFFSET, 0.0);

        let effective = match self.scale_mode {
            ScaleMode::Fixed(scale) => scale,
            ScaleMode::ObjectHeight { factor } => height * factor,
        }
        .max(SCALE_FLOOR);

        let half_right = viewer.right() * (effective / 2.0);
        let half_up = viewer.up() * (effective / 2.0);

        let color = [1.0, 1.0, 1.0, self.opacity];
        let corner = |position: Vec3, uv: [f32; 2]| BillboardVertex {
            position: position.into(),
            uv,
            color,
        };

        BillboardQuad {
            vertices: [
                corner(anchor - half_right + half_up, [0.0, 0.0]),
                corner(anchor + half_right + half_up, [1.0, 0.0]),
                corner(anchor + half_right - half_up, [1.0, 1.0]),
                corner(anchor - half_right - half_up, [0.0, 1.0]),
            ],
        }
    }
}
