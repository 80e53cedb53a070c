use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// First-person camera driven by yaw/pitch deltas.
///
/// Orientation and position feed a per-frame recompute of the basis and the
/// view/projection matrices; nothing else is persisted across frames.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    /// tan(fov_degrees / 2), cached from the configured angle.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,

    pub total_yaw: f32,
    pub total_pitch: f32,

    pub rotation_speed: f32,
    pub walk_speed: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(fov_degrees: f32, near: f32, far: f32, origin: Point3<f32>, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            origin,
            fov: (fov_degrees.to_radians() / 2.0).tan(),
            aspect_ratio,
            near,
            far,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            total_yaw: 0.0,
            total_pitch: 0.0,
            rotation_speed: 0.01,
            walk_speed: 10.0,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        camera.update_matrices();
        camera
    }

    /// Applies input deltas and recomputes the derived state.
    ///
    /// `orientation_delta` is (yaw, pitch) in input units (scaled by
    /// `rotation_speed`, not by elapsed time, matching mouse-style input);
    /// `movement_delta` is (strafe, walk) along the camera's local
    /// right/forward axes, scaled by `walk_speed * elapsed`.
    pub fn update(&mut self, orientation_delta: Vector2<f32>, movement_delta: Vector2<f32>, elapsed: f32) {
        self.total_yaw += orientation_delta.x * self.rotation_speed;
        self.total_pitch += orientation_delta.y * self.rotation_speed;

        let step = self.walk_speed * elapsed;
        self.origin += self.forward * (movement_delta.y * step);
        self.origin += self.right * (movement_delta.x * step);

        self.update_matrices();
    }

    /// Recomputes basis and matrices: pitch about the local X axis first,
    /// then yaw about the world Y axis; view is the inverse of the look-at
    /// frame built from origin + forward + world up.
    fn update_matrices(&mut self) {
        let rotation =
            TransformFactory::rotation_y(self.total_yaw) * TransformFactory::rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector(&Vector3::z());
        self.right = rotation.transform_vector(&Vector3::x());
        self.up = rotation.transform_vector(&Vector3::y());

        let cam_to_world = TransformFactory::look_at_lh(&self.origin, &self.forward, &Vector3::y());
        self.view_matrix = cam_to_world.try_inverse().unwrap_or_else(Matrix4::identity);
        self.projection_matrix =
            TransformFactory::perspective_lh(self.aspect_ratio, self.fov, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}
