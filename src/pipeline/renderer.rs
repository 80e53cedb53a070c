use crate::core::color::ColorRgb;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::pipeline::rasterizer::Rasterizer;
use crate::pipeline::vertex::process_vertices;
use crate::scene::Scene;
use crate::shading::RenderOptions;

/// The high-level renderer that orchestrates the pipeline stages.
///
/// Owns the framebuffer for the process lifetime (there is no resize
/// contract) along with per-object vertex scratch buffers that are reused
/// across frames.
pub struct Renderer {
    pub framebuffer: FrameBuffer,
    rasterizer: Rasterizer,
    background: ColorRgb,
    vertex_cache: Vec<Vec<VertexOut>>,
}

impl Renderer {
    pub fn new(width: usize, height: usize, background: ColorRgb) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            rasterizer: Rasterizer::new(),
            background,
            vertex_cache: Vec::new(),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.framebuffer.width as f32 / self.framebuffer.height as f32
    }

    /// Renders one frame of the scene.
    ///
    /// Vertex processing for every mesh completes before rasterization of
    /// any of them begins; then each mesh's triangles are rasterized in
    /// submission order. An error from a misconfigured mesh aborts the
    /// remainder of the frame.
    pub fn render(&mut self, scene: &Scene, options: &RenderOptions) -> Result<(), String> {
        self.framebuffer.clear(self.background);

        self.vertex_cache.resize_with(scene.objects.len(), Vec::new);

        for (object, cache) in scene.objects.iter().zip(self.vertex_cache.iter_mut()) {
            process_vertices(
                &object.mesh,
                &scene.camera,
                self.framebuffer.width,
                self.framebuffer.height,
                cache,
            );
        }

        for (object, cache) in scene.objects.iter().zip(self.vertex_cache.iter()) {
            self.rasterizer.draw_mesh(
                &mut self.framebuffer,
                cache,
                &object.mesh.indices,
                object.mesh.topology,
                &object.shader,
                options,
            )?;
        }

        Ok(())
    }
}
