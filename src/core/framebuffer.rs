use crate::core::color::ColorRgb;
use rayon::prelude::*;

/// Per-pixel color and depth storage for one frame.
///
/// The rasterizer is the only writer during a render call, and triangles are
/// processed strictly in submission order, so plain buffers suffice. With a
/// strict less-than depth test this makes tie resolution deterministic:
/// equal-depth pixels keep whichever triangle was processed first.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color: Vec<ColorRgb>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color: vec![ColorRgb::BLACK; size],
            depth: vec![f32::INFINITY; size],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        y * self.width + x
    }

    /// Resets the depth buffer to +infinity and the color buffer to the
    /// given background color. Called at the start of every frame.
    pub fn clear(&mut self, background: ColorRgb) {
        self.color.par_iter_mut().for_each(|c| *c = background);
        self.depth.par_iter_mut().for_each(|d| *d = f32::INFINITY);
    }

    /// Strict less-than depth test against the stored value.
    /// Does not modify the buffer; passing pixels commit via `write_depth`.
    #[inline]
    pub fn depth_test(&self, x: usize, y: usize, depth: f32) -> bool {
        depth < self.depth[self.index(x, y)]
    }

    #[inline]
    pub fn write_depth(&mut self, x: usize, y: usize, depth: f32) {
        let idx = self.index(x, y);
        self.depth[idx] = depth;
    }

    #[inline]
    pub fn write_color(&mut self, x: usize, y: usize, color: ColorRgb) {
        let idx = self.index(x, y);
        self.color[idx] = color;
    }

    pub fn color_at(&self, x: usize, y: usize) -> ColorRgb {
        self.color[self.index(x, y)]
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }

    /// Packs the color buffer into 0RGB words with gamma correction applied.
    pub fn pack_colors(&self) -> Vec<u32> {
        self.color
            .par_iter()
            .map(|c| c.to_srgb().to_packed())
            .collect()
    }

    /// Packs a grayscale visualization of the depth buffer.
    ///
    /// Stored depths cluster near 1.0 for typical scene distances, so the
    /// value is remapped from [0.985, 1.0] before display; unwritten pixels
    /// (infinite depth) come out white.
    pub fn pack_depth(&self) -> Vec<u32> {
        self.depth
            .par_iter()
            .map(|&d| {
                let remapped = if d.is_finite() {
                    ((d - 0.985) / 0.015).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                ColorRgb::gray(remapped).to_packed()
            })
            .collect()
    }
}
