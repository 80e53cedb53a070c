use crate::core::color::ColorRgb;
use crate::core::geometry::{PrimitiveTopology, Vertex};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
///
/// The vertex and index buffers are immutable after loading; only the world
/// matrix may change between frames (for animation), never during a render.
#[derive(Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    pub world: Matrix4<f32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world: Matrix4::identity(),
        }
    }

    pub fn with_world(mut self, world: Matrix4<f32>) -> Self {
        self.world = world;
        self
    }

    /// A single counter-clockwise triangle facing -Z, for tests and as a
    /// placeholder when loading fails.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 2.0, 0.0), normal, Vector2::new(0.5, 0.0))
                .with_color(ColorRgb::new(1.0, 0.0, 0.0)),
            Vertex::new(Point3::new(2.0, -2.0, 0.0), normal, Vector2::new(1.0, 1.0))
                .with_color(ColorRgb::new(0.0, 1.0, 0.0)),
            Vertex::new(Point3::new(-2.0, -2.0, 0.0), normal, Vector2::new(0.0, 1.0))
                .with_color(ColorRgb::new(0.0, 0.0, 1.0)),
        ];
        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }

    /// A unit quad in the XY plane facing -Z, as two strip triangles.
    pub fn create_quad() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(-0.5, 0.5, 0.0), normal, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(0.5, 0.5, 0.0), normal, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal, Vector2::new(0.0, 1.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal, Vector2::new(1.0, 1.0)),
        ];
        Self::new(vertices, vec![0, 1, 2, 3], PrimitiveTopology::TriangleStrip)
    }
}
