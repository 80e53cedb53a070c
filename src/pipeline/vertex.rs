use crate::core::geometry::VertexOut;
use crate::core::math::transform::ndc_to_screen;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::Vector4;

/// Transforms every vertex of a mesh from model space to screen space,
/// producing interpolation-ready attributes.
///
/// The combined world-view-projection transform takes positions to clip
/// space; normals and tangents go through the world matrix only so their
/// direction semantics survive. After the perspective divide, x/y are mapped
/// to pixel coordinates (Y flipped, screen origin is top-left) and z is NDC
/// depth; the clip-space w is retained for perspective-correct
/// interpolation later.
///
/// This stage never rejects vertices. Culling is deferred to triangle level
/// so the rasterizer can compute correct per-triangle bounding boxes; depths
/// outside [0, 1] are legal here and rejected per pixel.
///
/// `out` is scratch storage reused across frames; it is cleared and refilled
/// on every call.
pub fn process_vertices(
    mesh: &Mesh,
    camera: &Camera,
    viewport_width: usize,
    viewport_height: usize,
    out: &mut Vec<VertexOut>,
) {
    let world = mesh.world;
    let wvp = camera.projection_matrix() * camera.view_matrix() * world;
    let world_rotation = world.fixed_view::<3, 3>(0, 0);

    out.clear();
    out.reserve(mesh.vertices.len());

    for vertex in &mesh.vertices {
        let mut position = wvp * vertex.position.to_homogeneous();

        let normal = (world_rotation * vertex.normal).normalize();
        // Meshes without UVs carry zero tangents; keep them zero instead of
        // normalizing into NaNs.
        let tangent = (world_rotation * vertex.tangent)
            .try_normalize(1e-6)
            .unwrap_or_else(nalgebra::Vector3::zeros);

        let world_position = world * vertex.position.to_homogeneous();
        let view_direction = (world_position.xyz() - camera.origin.coords).normalize();

        // Perspective divide; w stays untouched for later interpolation
        let w = position.w;
        position = Vector4::new(position.x / w, position.y / w, position.z / w, w);

        let screen = ndc_to_screen(
            position.x,
            position.y,
            viewport_width as f32,
            viewport_height as f32,
        );
        position.x = screen.x;
        position.y = screen.y;

        out.push(VertexOut {
            position,
            color: vertex.color,
            uv: vertex.uv,
            normal,
            tangent,
            view_direction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector2};

    fn test_camera() -> Camera {
        Camera::new(90.0, 1.0, 100.0, Point3::new(0.0, 0.0, -10.0), 1.0)
    }

    #[test]
    fn centered_vertex_lands_mid_viewport() {
        let mesh = Mesh::create_test_triangle();
        let mut camera = test_camera();
        camera.update(Vector2::zeros(), Vector2::zeros(), 0.0);

        let mut out = Vec::new();
        // A vertex on the view axis projects to the viewport center
        let mut centered = mesh;
        centered.vertices[0].position = Point3::origin();
        process_vertices(&centered, &camera, 640, 480, &mut out);

        assert_relative_eq!(out[0].position.x, 320.0, epsilon = 1e-2);
        assert_relative_eq!(out[0].position.y, 240.0, epsilon = 1e-2);
    }

    #[test]
    fn depth_is_normalized_and_w_retained() {
        let mut camera = test_camera();
        camera.update(Vector2::zeros(), Vector2::zeros(), 0.0);
        let mesh = Mesh::create_test_triangle();

        let mut out = Vec::new();
        process_vertices(&mesh, &camera, 640, 480, &mut out);

        for v in &out {
            // 10 units in front of the camera, inside [near, far]
            assert!(v.position.z > 0.0 && v.position.z < 1.0);
            assert_relative_eq!(v.position.w, 10.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn view_direction_points_from_camera_to_vertex() {
        let mut camera = test_camera();
        camera.update(Vector2::zeros(), Vector2::zeros(), 0.0);
        let mut mesh = Mesh::create_test_triangle();
        mesh.vertices[0].position = Point3::origin();

        let mut out = Vec::new();
        process_vertices(&mesh, &camera, 640, 480, &mut out);

        // Camera sits at -10 on Z looking toward the origin
        assert_relative_eq!(out[0].view_direction.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn stage_never_rejects_vertices() {
        let mut camera = test_camera();
        camera.update(Vector2::zeros(), Vector2::zeros(), 0.0);
        let mut mesh = Mesh::create_test_triangle();
        // Put one vertex far behind the camera
        mesh.vertices[1].position = Point3::new(0.0, 0.0, -100.0);

        let mut out = Vec::new();
        process_vertices(&mesh, &camera, 640, 480, &mut out);
        assert_eq!(out.len(), mesh.vertices.len());
        assert!(out[1].position.w < 0.0);
    }
}
