use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Linear RGB color with unclamped float channels.
///
/// Values stay in linear space throughout the pipeline; gamma correction is
/// applied once when the framebuffer is packed for output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb::new(0.0, 0.0, 0.0);
    pub const WHITE: ColorRgb = ColorRgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Uniform gray value on all three channels.
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Scales all channels down uniformly so the largest equals 1.0.
    ///
    /// Unlike a per-channel clamp this preserves hue: (1.4, 0.7, 0.0)
    /// becomes (1.0, 0.5, 0.0), not (1.0, 0.7, 0.0).
    pub fn max_to_one(self) -> Self {
        let max = self.r.max(self.g).max(self.b);
        if max > 1.0 { self * (1.0 / max) } else { self }
    }

    /// Converts linear RGB to sRGB (gamma correction).
    /// Applied once at output time, after all lighting math.
    pub fn to_srgb(self) -> Self {
        let gamma = 1.0 / 2.2;
        Self::new(
            self.r.max(0.0).powf(gamma),
            self.g.max(0.0).powf(gamma),
            self.b.max(0.0).powf(gamma),
        )
    }

    /// Packs into 0RGB byte order after clamping to [0, 1].
    pub fn to_packed(self) -> u32 {
        let r = (self.r.clamp(0.0, 1.0) * 255.0) as u32;
        let g = (self.g.clamp(0.0, 1.0) * 255.0) as u32;
        let b = (self.b.clamp(0.0, 1.0) * 255.0) as u32;
        (r << 16) | (g << 8) | b
    }
}

impl Add for ColorRgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for ColorRgb {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for ColorRgb {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

/// Component-wise color modulation.
impl Mul for ColorRgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl MulAssign for ColorRgb {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
