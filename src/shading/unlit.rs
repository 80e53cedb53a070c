use crate::core::color::ColorRgb;
use crate::core::geometry::VertexOut;
use crate::scene::texture::Texture;
use std::sync::Arc;

/// Returns the sampled diffuse color (or the vertex color) without any
/// lighting. Used for emissive cutout geometry such as particle quads.
pub struct UnlitShader {
    pub diffuse_texture: Option<Arc<Texture>>,
    /// Fragments whose sampled alpha is at or below this threshold are
    /// discarded. 0.0 disables clipping.
    pub alpha_clip: f32,
}

impl Default for UnlitShader {
    fn default() -> Self {
        Self {
            diffuse_texture: None,
            alpha_clip: 0.0,
        }
    }
}

impl UnlitShader {
    pub fn can_shade(&self, vertex: &VertexOut) -> bool {
        if self.alpha_clip > 0.0 {
            if let Some(texture) = &self.diffuse_texture {
                // Out-of-range UV samples as zero alpha and is clipped
                return texture.sample_alpha(vertex.uv).unwrap_or(0.0) > self.alpha_clip;
            }
        }
        true
    }

    pub fn shade(&self, vertex: &VertexOut) -> ColorRgb {
        match &self.diffuse_texture {
            // A bound texture owns the result: out-of-range UV is a defined
            // black sample, not a fallback to the vertex color.
            Some(texture) => texture.sample_color(vertex.uv).unwrap_or(ColorRgb::BLACK),
            None => vertex.color,
        }
    }
}
