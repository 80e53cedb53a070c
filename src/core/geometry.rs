use crate::core::color::ColorRgb;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// How a mesh's index buffer encodes triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Indices consumed in consecutive groups of three.
    TriangleList,
    /// Each index from position 2 onward closes a triangle with the two
    /// preceding indices, alternating winding to keep faces consistent.
    TriangleStrip,
}

/// A single model-space vertex, immutable once loaded.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Per-vertex color, used when no diffuse texture is bound.
    pub color: ColorRgb,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector for normal mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            color: ColorRgb::WHITE,
            uv,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_color(mut self, color: ColorRgb) -> Self {
        self.color = color;
        self
    }
}

/// Interpolation-ready vertex produced by the vertex stage each frame.
///
/// `position` holds screen-space x/y in pixels, NDC depth in z, and the
/// original clip-space w (kept for perspective-correct interpolation).
#[derive(Debug, Clone, Copy)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub color: ColorRgb,
    pub uv: Vector2<f32>,
    /// World-space normal (not divided by w).
    pub normal: Vector3<f32>,
    /// World-space tangent (not divided by w).
    pub tangent: Vector3<f32>,
    /// Normalized direction from the camera to the world-space point.
    pub view_direction: Vector3<f32>,
}
