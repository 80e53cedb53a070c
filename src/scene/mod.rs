pub mod camera;
pub mod loader;
pub mod mesh;
pub mod shadable;
pub mod texture;

use crate::core::math::transform::TransformFactory;
use camera::Camera;
use nalgebra::Vector2;
use shadable::ShadableObject;

/// Everything the renderer consumes for one frame: an ordered collection of
/// shadable objects and the camera.
pub struct Scene {
    pub objects: Vec<ShadableObject>,
    pub camera: Camera,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            camera,
        }
    }

    pub fn add_object(&mut self, object: ShadableObject) {
        self.objects.push(object);
    }

    /// Advances animation state by `elapsed` seconds. This is the only
    /// place world matrices change; it must never run during a render call.
    pub fn update(&mut self, elapsed: f32) {
        for object in &mut self.objects {
            if object.spin_speed != 0.0 {
                let spin = TransformFactory::rotation_y(object.spin_speed * elapsed);
                object.mesh.world *= spin;
            }
        }

        // Recompute the camera's derived state once per frame.
        self.camera.update(Vector2::zeros(), Vector2::zeros(), elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::Mesh;
    use crate::shading::{Shader, UnlitShader};
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector4};
    use std::sync::Arc;

    #[test]
    fn update_spins_objects_about_local_y() {
        let camera = Camera::new(60.0, 0.1, 100.0, Point3::origin(), 1.0);
        let mut scene = Scene::new(camera);
        let shader = Arc::new(Shader::Unlit(UnlitShader::default()));
        scene.add_object(
            ShadableObject::new(Mesh::create_test_triangle(), shader)
                .with_spin(std::f32::consts::FRAC_PI_2),
        );

        scene.update(1.0);
        let world = scene.objects[0].mesh.world;
        // A quarter turn maps local +X to world -Z
        let x = world * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(x.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(x.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn static_objects_keep_their_world_matrix() {
        let camera = Camera::new(60.0, 0.1, 100.0, Point3::origin(), 1.0);
        let mut scene = Scene::new(camera);
        let shader = Arc::new(Shader::Unlit(UnlitShader::default()));
        scene.add_object(ShadableObject::new(Mesh::create_test_triangle(), shader));

        let before = scene.objects[0].mesh.world;
        scene.update(0.5);
        assert_eq!(scene.objects[0].mesh.world, before);
    }
}
