use crate::core::color::ColorRgb;
use image::{DynamicImage, GenericImageView};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;
use std::sync::Arc;

/// An image-backed texture sampled with normalized UV coordinates.
///
/// All samplers return `None` when either UV component falls outside
/// [0, 1]; callers treat that as a defined zero-contribution result.
#[derive(Debug, Clone)]
pub struct Texture {
    image: Arc<DynamicImage>,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture {:?}: {}", path_ref, e))?;

        let width = img.width();
        let height = img.height();
        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Ok(Self {
            image: Arc::new(img),
            width,
            height,
        })
    }

    /// Builds a texture from an in-memory image. Used by tests.
    pub fn from_image(img: DynamicImage) -> Self {
        let width = img.width();
        let height = img.height();
        Self {
            image: Arc::new(img),
            width,
            height,
        }
    }

    /// Maps UV to a texel, or `None` when outside [0, 1] on either axis.
    fn texel(&self, uv: Vector2<f32>) -> Option<image::Rgba<u8>> {
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return None;
        }

        // u = 1.0 maps onto the last texel, not one past it
        let px = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let py = ((uv.y * self.height as f32) as u32).min(self.height - 1);
        Some(self.image.get_pixel(px, py))
    }

    /// Samples the RGB channels as a linear-space color.
    /// Stored texel values are assumed sRGB and are linearized here so that
    /// lighting math operates in linear space.
    pub fn sample_color(&self, uv: Vector2<f32>) -> Option<ColorRgb> {
        let p = self.texel(uv)?;
        Some(ColorRgb::new(
            (p[0] as f32 / 255.0).powf(2.2),
            (p[1] as f32 / 255.0).powf(2.2),
            (p[2] as f32 / 255.0).powf(2.2),
        ))
    }

    /// Samples a single grayscale channel (red) in [0, 1].
    pub fn sample_gray(&self, uv: Vector2<f32>) -> Option<f32> {
        let p = self.texel(uv)?;
        Some(p[0] as f32 / 255.0)
    }

    /// Samples the alpha channel in [0, 1].
    pub fn sample_alpha(&self, uv: Vector2<f32>) -> Option<f32> {
        let p = self.texel(uv)?;
        Some(p[3] as f32 / 255.0)
    }

    /// Reconstructs a tangent-space normal from a packed [0, 1] RGB texel
    /// via 2c - 1 per component.
    pub fn sample_normal(&self, uv: Vector2<f32>) -> Option<Vector3<f32>> {
        let p = self.texel(uv)?;
        Some(Vector3::new(
            2.0 * (p[0] as f32 / 255.0) - 1.0,
            2.0 * (p[1] as f32 / 255.0) - 1.0,
            2.0 * (p[2] as f32 / 255.0) - 1.0,
        ))
    }
}
