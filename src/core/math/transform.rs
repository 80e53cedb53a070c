use nalgebra::{Matrix4, Point2, Point3, Vector3};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating transformation matrices.
/// Manually implemented to keep full control over the coordinate system:
/// left-handed, camera looking down +Z, NDC depth mapped to [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Builds the camera-to-world matrix for a left-handed look-at frame.
    ///
    /// `forward` is the viewing direction (+Z in camera space). The view
    /// matrix is the inverse of this matrix.
    pub fn look_at_lh(origin: &Point3<f32>, forward: &Vector3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = forward.normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Matrix4::new(
            x_axis.x, y_axis.x, z_axis.x, origin.x,
            x_axis.y, y_axis.y, z_axis.y, origin.y,
            x_axis.z, y_axis.z, z_axis.z, origin.z,
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a left-handed perspective projection matrix.
    ///
    /// `fov_tan` is tan(vertical_fov / 2). Depth maps to NDC z in [0, 1]
    /// for points between the near and far planes; w receives view-space z.
    pub fn perspective_lh(aspect_ratio: f32, fov_tan: f32, near: f32, far: f32) -> Matrix4<f32> {
        let range = far / (far - near);

        Matrix4::new(
            1.0 / (aspect_ratio * fov_tan), 0.0,           0.0,   0.0,
            0.0,                            1.0 / fov_tan, 0.0,   0.0,
            0.0,                            0.0,           range, -range * near,
            0.0,                            0.0,           1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Converts NDC x/y to screen coordinates (viewport transform).
/// Note: Y-axis is flipped (NDC +Y is up, screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn ndc_to_screen_flips_y() {
        // NDC (-1, 1) is the top-left corner of the viewport
        let p = ndc_to_screen(-1.0, 1.0, 640.0, 480.0);
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);

        let center = ndc_to_screen(0.0, 0.0, 640.0, 480.0);
        assert_relative_eq!(center.x, 320.0);
        assert_relative_eq!(center.y, 240.0);
    }

    #[test]
    fn perspective_maps_near_far_to_unit_depth() {
        let fov_tan = (45.0_f32.to_radians() / 2.0).tan();
        let proj = TransformFactory::perspective_lh(4.0 / 3.0, fov_tan, 1.0, 100.0);

        let near = proj * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-6);

        let far = proj * Vector4::new(0.0, 0.0, 100.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_keeps_view_z_in_w() {
        let proj = TransformFactory::perspective_lh(1.0, 1.0, 0.1, 50.0);
        let clip = proj * Vector4::new(1.0, 2.0, 7.5, 1.0);
        assert_relative_eq!(clip.w, 7.5);
    }

    #[test]
    fn look_at_inverse_moves_origin_to_zero() {
        let origin = Point3::new(1.0, 2.0, -3.0);
        let cam_to_world = TransformFactory::look_at_lh(
            &origin,
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        let view = cam_to_world.try_inverse().unwrap();
        let eye = view * Vector4::new(origin.x, origin.y, origin.z, 1.0);
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-5);
    }
}
