use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{PrimitiveTopology, VertexOut};
use crate::core::math::interpolation::{
    interpolate_reciprocal, is_inside_triangle, BarycentricSolver,
};
use crate::shading::{RenderOptions, Shader};
use nalgebra::{Point2, Vector4};

/// Converts triangles into shaded pixels with correct visibility ordering.
///
/// Triangles are processed strictly in index order and pixels are committed
/// with a strict less-than depth test, so overlapping geometry resolves to
/// the nearest surface regardless of submission order, and equal-depth ties
/// keep whichever triangle came first.
pub struct Rasterizer;

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterizes one mesh's triangles from its transformed vertices.
    ///
    /// For `TriangleList`, the index count must be a multiple of three;
    /// anything else is a configuration error and nothing is drawn. For
    /// `TriangleStrip`, index position i >= 2 closes a triangle with the two
    /// preceding indices, swapping the first two on odd i to preserve
    /// winding across the strip.
    pub fn draw_mesh(
        &self,
        framebuffer: &mut FrameBuffer,
        vertices_out: &[VertexOut],
        indices: &[u32],
        topology: PrimitiveTopology,
        shader: &Shader,
        options: &RenderOptions,
    ) -> Result<(), String> {
        match topology {
            PrimitiveTopology::TriangleList => {
                if indices.len() % 3 != 0 {
                    return Err(format!(
                        "triangle list index count {} is not a multiple of 3",
                        indices.len()
                    ));
                }
                for triple in indices.chunks_exact(3) {
                    self.draw_triangle(
                        framebuffer,
                        &vertices_out[triple[0] as usize],
                        &vertices_out[triple[1] as usize],
                        &vertices_out[triple[2] as usize],
                        shader,
                        options,
                    );
                }
            }
            PrimitiveTopology::TriangleStrip => {
                for i in 2..indices.len() {
                    let [a, b, c] = strip_triangle(indices, i);
                    self.draw_triangle(
                        framebuffer,
                        &vertices_out[a as usize],
                        &vertices_out[b as usize],
                        &vertices_out[c as usize],
                        shader,
                        options,
                    );
                }
            }
        }
        Ok(())
    }

    fn draw_triangle(
        &self,
        framebuffer: &mut FrameBuffer,
        v0: &VertexOut,
        v1: &VertexOut,
        v2: &VertexOut,
        shader: &Shader,
        options: &RenderOptions,
    ) {
        // Any vertex behind the camera rejects the whole triangle; partial
        // clipping is out of scope.
        if v0.position.w < 0.0 || v1.position.w < 0.0 || v2.position.w < 0.0 {
            return;
        }

        let p0 = Point2::new(v0.position.x, v0.position.y);
        let p1 = Point2::new(v1.position.x, v1.position.y);
        let p2 = Point2::new(v2.position.x, v2.position.y);

        // Zero-area triangles contribute no pixels
        let Some(solver) = BarycentricSolver::new(p0, p1, p2) else {
            return;
        };

        // Bounding box padded by one pixel on each side, clamped to the
        // viewport.
        let width = framebuffer.width as i32;
        let height = framebuffer.height as i32;
        let min_x = (p0.x.min(p1.x).min(p2.x).floor() as i32 - 1).clamp(0, width - 1);
        let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as i32 + 1).clamp(0, width - 1);
        let min_y = (p0.y.min(p1.y).min(p2.y).floor() as i32 - 1).clamp(0, height - 1);
        let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as i32 + 1).clamp(0, height - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let pixel = Point2::new(px as f32 + 0.5, py as f32 + 0.5);

                let weights = solver.weights(pixel);
                if !is_inside_triangle(weights) {
                    continue;
                }

                // Perspective-correct depth from the three NDC depths; this
                // doubles as the near/far frustum rejection.
                let depth_z = interpolate_reciprocal(
                    weights,
                    v0.position.z,
                    v1.position.z,
                    v2.position.z,
                );
                if !(0.0..=1.0).contains(&depth_z) {
                    continue;
                }

                // Cheap rejection before any attribute interpolation
                let (x, y) = (px as usize, py as usize);
                if !framebuffer.depth_test(x, y, depth_z) {
                    continue;
                }

                let fragment = interpolate_fragment(weights, v0, v1, v2, pixel, depth_z);

                if !shader.can_shade(&fragment) {
                    continue;
                }

                framebuffer.write_depth(x, y, depth_z);
                let color = shader.shade(&fragment, options).max_to_one();
                framebuffer.write_color(x, y, color);
            }
        }
    }
}

/// The triangle closed by strip position `i` (i >= 2). Odd positions swap
/// the two preceding indices so winding alternates along the strip.
#[inline]
fn strip_triangle(indices: &[u32], i: usize) -> [u32; 3] {
    if i % 2 == 0 {
        [indices[i - 2], indices[i - 1], indices[i]]
    } else {
        [indices[i - 1], indices[i - 2], indices[i]]
    }
}

/// Perspective-correct attribute interpolation: each attribute is blended as
/// sum(attr_i / w_i * weight_i) and multiplied back by the interpolated w to
/// undo the perspective division. Direction vectors are renormalized after
/// blending.
fn interpolate_fragment(
    weights: nalgebra::Vector3<f32>,
    v0: &VertexOut,
    v1: &VertexOut,
    v2: &VertexOut,
    pixel: Point2<f32>,
    depth_z: f32,
) -> VertexOut {
    let (w0, w1, w2) = (v0.position.w, v1.position.w, v2.position.w);
    let depth_w = interpolate_reciprocal(weights, w0, w1, w2);

    let color = (v0.color * (weights.x / w0)
        + v1.color * (weights.y / w1)
        + v2.color * (weights.z / w2))
        * depth_w;
    let uv = (v0.uv * (weights.x / w0) + v1.uv * (weights.y / w1) + v2.uv * (weights.z / w2))
        * depth_w;
    let normal = ((v0.normal * (weights.x / w0)
        + v1.normal * (weights.y / w1)
        + v2.normal * (weights.z / w2))
        * depth_w)
        .normalize();
    let tangent = ((v0.tangent * (weights.x / w0)
        + v1.tangent * (weights.y / w1)
        + v2.tangent * (weights.z / w2))
        * depth_w)
        .try_normalize(1e-6)
        .unwrap_or_else(nalgebra::Vector3::zeros);
    let view_direction = ((v0.view_direction * (weights.x / w0)
        + v1.view_direction * (weights.y / w1)
        + v2.view_direction * (weights.z / w2))
        * depth_w)
        .normalize();

    VertexOut {
        position: Vector4::new(pixel.x, pixel.y, depth_z, depth_w),
        color,
        uv,
        normal,
        tangent,
        view_direction,
    }
}
