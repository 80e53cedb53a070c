//! End-to-end renders of small synthetic scenes, without any file I/O.

use nalgebra::{Point3, Vector2, Vector3};
use softras::core::color::ColorRgb;
use softras::core::geometry::{PrimitiveTopology, Vertex};
use softras::pipeline::renderer::Renderer;
use softras::scene::camera::Camera;
use softras::scene::mesh::Mesh;
use softras::scene::shadable::ShadableObject;
use softras::scene::Scene;
use softras::shading::{RenderOptions, Shader, UnlitShader};
use std::sync::Arc;

const BACKGROUND: ColorRgb = ColorRgb {
    r: 0.1,
    g: 0.1,
    b: 0.1,
};

fn test_camera(aspect_ratio: f32) -> Camera {
    Camera::new(45.0, 0.1, 100.0, Point3::new(0.0, 0.0, -10.0), aspect_ratio)
}

fn unlit() -> Arc<Shader> {
    Arc::new(Shader::Unlit(UnlitShader::default()))
}

/// A large triangle at the given depth, colored uniformly, centered on the
/// view axis so it covers the middle of the framebuffer.
fn solid_triangle(color: ColorRgb, z: f32) -> Mesh {
    let normal = Vector3::new(0.0, 0.0, -1.0);
    let vertices = vec![
        Vertex::new(Point3::new(0.0, 3.0, z), normal, Vector2::new(0.5, 0.0)).with_color(color),
        Vertex::new(Point3::new(3.0, -3.0, z), normal, Vector2::new(1.0, 1.0)).with_color(color),
        Vertex::new(Point3::new(-3.0, -3.0, z), normal, Vector2::new(0.0, 1.0)).with_color(color),
    ];
    Mesh::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
}

#[test]
fn triangle_covers_center_and_leaves_corners() {
    let mut renderer = Renderer::new(64, 64, BACKGROUND);
    let mut scene = Scene::new(test_camera(renderer.aspect_ratio()));
    scene.add_object(ShadableObject::new(
        solid_triangle(ColorRgb::new(1.0, 0.0, 0.0), 0.0),
        unlit(),
    ));

    renderer
        .render(&scene, &RenderOptions::default())
        .unwrap();

    let center = renderer.framebuffer.color_at(32, 32);
    assert!(center.r > 0.9 && center.g < 0.1);
    assert!(renderer.framebuffer.depth_at(32, 32).is_finite());

    let corner = renderer.framebuffer.color_at(0, 0);
    assert_eq!(corner.r, BACKGROUND.r);
    assert!(renderer.framebuffer.depth_at(0, 0).is_infinite());
}

#[test]
fn nearer_triangle_occludes_farther_regardless_of_order() {
    let near = solid_triangle(ColorRgb::new(1.0, 0.0, 0.0), 0.0);
    let far = solid_triangle(ColorRgb::new(0.0, 0.0, 1.0), 5.0);

    for meshes in [
        [near.clone(), far.clone()],
        [far.clone(), near.clone()],
    ] {
        let mut renderer = Renderer::new(64, 64, BACKGROUND);
        let mut scene = Scene::new(test_camera(renderer.aspect_ratio()));
        for mesh in meshes {
            scene.add_object(ShadableObject::new(mesh, unlit()));
        }

        renderer
            .render(&scene, &RenderOptions::default())
            .unwrap();

        let center = renderer.framebuffer.color_at(32, 32);
        assert!(center.r > 0.9, "near red triangle should win: {:?}", center);
        assert!(center.b < 0.1);
    }
}

#[test]
fn strip_quad_fills_both_halves() {
    let mut quad = Mesh::create_quad();
    for vertex in &mut quad.vertices {
        vertex.color = ColorRgb::new(0.0, 1.0, 0.0);
    }
    // Scale the quad up so it covers a solid block of pixels.
    quad.world = softras::core::math::transform::TransformFactory::scaling(&Vector3::new(
        6.0, 6.0, 1.0,
    ));

    let mut renderer = Renderer::new(64, 64, BACKGROUND);
    let mut scene = Scene::new(test_camera(renderer.aspect_ratio()));
    scene.add_object(ShadableObject::new(quad, unlit()));

    renderer
        .render(&scene, &RenderOptions::default())
        .unwrap();

    // One sample in each strip triangle's half of the quad.
    for (x, y) in [(20, 44), (44, 20)] {
        let color = renderer.framebuffer.color_at(x, y);
        assert!(color.g > 0.9, "quad should cover ({}, {}): {:?}", x, y, color);
    }
}

#[test]
fn spinning_object_changes_between_frames() {
    let mut renderer = Renderer::new(64, 64, BACKGROUND);
    let mut scene = Scene::new(test_camera(renderer.aspect_ratio()));
    scene.add_object(
        ShadableObject::new(solid_triangle(ColorRgb::new(1.0, 1.0, 1.0), 0.0), unlit())
            .with_spin(std::f32::consts::FRAC_PI_2),
    );

    renderer
        .render(&scene, &RenderOptions::default())
        .unwrap();
    let before = coverage(&renderer);

    // A quarter turn leaves the triangle edge-on to the camera.
    scene.update(1.0);
    renderer
        .render(&scene, &RenderOptions::default())
        .unwrap();
    let after = coverage(&renderer);

    assert!(before > 0);
    assert!(after < before / 4, "edge-on coverage {} vs {}", after, before);
}

fn coverage(renderer: &Renderer) -> usize {
    let mut count = 0;
    for y in 0..64 {
        for x in 0..64 {
            if renderer.framebuffer.depth_at(x, y).is_finite() {
                count += 1;
            }
        }
    }
    count
}
