use crate::core::color::ColorRgb;
use crate::core::geometry::VertexOut;
use crate::scene::texture::Texture;
use crate::shading::{RenderOptions, ShadingMode};
use nalgebra::Vector3;
use std::f32::consts::PI;
use std::sync::Arc;

/// Lambert diffuse with a Phong specular highlight and optional normal
/// mapping, the lighting model behind both the `Lambert` and `Opaque`
/// shader variants.
///
/// Every texture channel is optional and falls back to a neutral default:
/// vertex color for diffuse, the geometric normal for normal mapping, and
/// zero contribution for gloss/specular.
pub struct LambertShader {
    pub diffuse_texture: Option<Arc<Texture>>,
    pub normal_texture: Option<Arc<Texture>>,
    pub gloss_texture: Option<Arc<Texture>>,
    pub specular_texture: Option<Arc<Texture>>,

    pub ambient_light: ColorRgb,
    /// Direction the light travels (from the light toward the scene).
    pub light_direction: Vector3<f32>,
    /// Diffuse reflectance kd; divided by pi in the lambert term.
    pub diffuse_reflection: f32,
    /// Specular exponent scale; the gloss sample multiplies into this.
    pub shininess: f32,
    /// Alpha-clip threshold, 0.0 disables the gate.
    pub alpha_clip: f32,
}

impl Default for LambertShader {
    fn default() -> Self {
        Self {
            diffuse_texture: None,
            normal_texture: None,
            gloss_texture: None,
            specular_texture: None,
            ambient_light: ColorRgb::BLACK,
            light_direction: Vector3::new(0.577, -0.577, 0.577),
            diffuse_reflection: 7.0,
            shininess: 25.0,
            alpha_clip: 0.0,
        }
    }
}

impl LambertShader {
    pub fn can_shade(&self, vertex: &VertexOut) -> bool {
        if self.alpha_clip > 0.0 {
            if let Some(texture) = &self.diffuse_texture {
                return texture.sample_alpha(vertex.uv).unwrap_or(0.0) > self.alpha_clip;
            }
        }
        true
    }

    pub fn shade(&self, vertex: &VertexOut, options: &RenderOptions) -> ColorRgb {
        let normal = self.shading_normal(vertex, options);

        // A bound texture owns the result: out-of-range UV is a defined
        // black sample. The vertex color stands in only when no texture is
        // bound at all.
        let diffuse_color = match &self.diffuse_texture {
            Some(texture) => texture.sample_color(vertex.uv).unwrap_or(ColorRgb::BLACK),
            None => vertex.color,
        };

        let lambertian = (-self.light_direction).dot(&normal).max(0.0);
        let specular = self.specular_term(vertex, normal);
        let kd = self.diffuse_reflection / PI;

        match options.shading_mode {
            ShadingMode::ObservedArea => ColorRgb::gray(lambertian),
            ShadingMode::Diffuse => diffuse_color * (kd * lambertian),
            ShadingMode::Specular => ColorRgb::gray(specular),
            ShadingMode::Combined => {
                diffuse_color * ((ColorRgb::gray(lambertian) + self.ambient_light) * kd)
                    + ColorRgb::gray(specular)
            }
        }
    }

    /// Resolves the shading normal, applying the normal map in tangent
    /// space when one is bound and the per-frame toggle allows it.
    fn shading_normal(&self, vertex: &VertexOut, options: &RenderOptions) -> Vector3<f32> {
        if !options.use_normal_map {
            return vertex.normal;
        }
        let Some(texture) = &self.normal_texture else {
            return vertex.normal;
        };
        let Some(sample) = texture.sample_normal(vertex.uv) else {
            return vertex.normal;
        };

        let binormal = vertex.normal.cross(&vertex.tangent);
        // Tangent-space basis applied column-wise: sample.x along the
        // tangent, sample.y along the binormal, sample.z along the normal.
        vertex.tangent * sample.x + binormal * sample.y + vertex.normal * sample.z
    }

    /// Phong highlight: reflect the inverted light direction about the
    /// normal and raise the view-dot to a gloss-scaled exponent. Requires
    /// both the gloss and specular maps; otherwise contributes nothing.
    fn specular_term(&self, vertex: &VertexOut, normal: Vector3<f32>) -> f32 {
        let (Some(gloss), Some(specular)) = (&self.gloss_texture, &self.specular_texture) else {
            return 0.0;
        };

        let incident = -self.light_direction;
        let reflected = incident - normal * (2.0 * incident.dot(&normal));
        let cos_alpha = reflected.dot(&vertex.view_direction);
        if cos_alpha <= 0.0 {
            return 0.0;
        }

        let gloss_sample = gloss.sample_gray(vertex.uv).unwrap_or(0.0);
        let exponent = specular.sample_gray(vertex.uv).unwrap_or(0.0) * self.shininess;
        gloss_sample * cos_alpha.powf(exponent)
    }
}
