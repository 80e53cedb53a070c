use crate::scene::mesh::Mesh;
use crate::shading::Shader;
use std::sync::Arc;

/// Pairs one mesh with one shader instance.
///
/// Shaders are reference-counted so several objects can share a single
/// instance (two particles sharing one unlit shader, for example); the
/// rasterizer only ever borrows them immutably.
pub struct ShadableObject {
    pub mesh: Mesh,
    pub shader: Arc<Shader>,
    /// Spin around the object's local Y axis in radians per second,
    /// applied by `Scene::update` between frames. 0.0 means static.
    pub spin_speed: f32,
}

impl ShadableObject {
    pub fn new(mesh: Mesh, shader: Arc<Shader>) -> Self {
        Self {
            mesh,
            shader,
            spin_speed: 0.0,
        }
    }

    pub fn with_spin(mut self, radians_per_second: f32) -> Self {
        self.spin_speed = radians_per_second;
        self
    }
}
