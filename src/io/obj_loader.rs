use crate::core::geometry::{PrimitiveTopology, Vertex};
use crate::scene::mesh::Mesh;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified triangle-list mesh.
///
/// All sub-meshes are merged into one vertex/index buffer. Tangents are
/// accumulated per face from UV deltas so normal mapping works out of the
/// box; meshes without UVs end up with zero tangents (and the shaders fall
/// back to the geometric normal).
pub fn load_obj(path: &str) -> Result<Mesh, String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for position/normal/UV
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut missing_normals = Vec::new();
    let mut index_offset = 0;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();
        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Computing smooth normals from faces.",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::zeros()
            };

            let uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, uv));
            missing_normals.push(!has_normals);
        }

        // Offset merged indices past the vertices of earlier sub-meshes
        for index in &mesh.indices {
            indices.push(index + index_offset);
        }
        index_offset += num_vertices as u32;
    }

    if missing_normals.iter().any(|&m| m) {
        compute_smooth_normals(&mut vertices, &indices, &missing_normals);
    }
    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh::new(vertices, indices, PrimitiveTopology::TriangleList))
}

/// Area-weighted smooth normals for vertices the OBJ left without any.
/// Vertices that came with authored normals are left untouched.
fn compute_smooth_normals(vertices: &mut [Vertex], indices: &[u32], missing: &[bool]) {
    for triple in indices.chunks_exact(3) {
        let (i0, i1, i2) = (triple[0] as usize, triple[1] as usize, triple[2] as usize);

        let edge1 = vertices[i1].position - vertices[i0].position;
        let edge2 = vertices[i2].position - vertices[i0].position;
        // Unnormalized cross weights each face by its area
        let face_normal = edge1.cross(&edge2);

        for &i in &[i0, i1, i2] {
            if missing[i] {
                vertices[i].normal += face_normal;
            }
        }
    }

    for (vertex, &was_missing) in vertices.iter_mut().zip(missing) {
        if was_missing {
            vertex.normal = vertex
                .normal
                .try_normalize(1e-8)
                .unwrap_or_else(Vector3::y);
        }
    }
}

/// Accumulates per-face tangents from UV deltas, then Gram-Schmidt
/// orthogonalizes each against its vertex normal.
fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    for triple in indices.chunks_exact(3) {
        let (i0, i1, i2) = (triple[0] as usize, triple[1] as usize, triple[2] as usize);

        let edge1 = vertices[i1].position - vertices[i0].position;
        let edge2 = vertices[i2].position - vertices[i0].position;
        let duv1 = vertices[i1].uv - vertices[i0].uv;
        let duv2 = vertices[i2].uv - vertices[i0].uv;

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det.abs() < 1e-8 {
            continue; // Degenerate UV mapping on this face
        }

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        vertices[i0].tangent += tangent;
        vertices[i1].tangent += tangent;
        vertices[i2].tangent += tangent;
    }

    for vertex in vertices.iter_mut() {
        let projected = vertex.tangent - vertex.normal * vertex.normal.dot(&vertex.tangent);
        vertex.tangent = projected.try_normalize(1e-6).unwrap_or_else(Vector3::zeros);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorRgb;

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("does/not/exist.obj").is_err());
    }

    #[test]
    fn tangents_follow_the_uv_axes() {
        // A quad in the XY plane with UVs aligned to X/Y: the U axis runs
        // along +X, so tangents must too.
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::new(0.0, 0.0))
                .with_color(ColorRgb::WHITE),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z(), Vector2::new(0.0, 1.0)),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);

        for v in &vertices {
            assert!((v.tangent.x - 1.0).abs() < 1e-5, "tangent {:?}", v.tangent);
            assert!(v.tangent.y.abs() < 1e-5);
        }
    }

    #[test]
    fn smooth_normals_fill_only_missing_vertices() {
        let authored = Vector3::x();
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Vector2::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), Vector2::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), authored, Vector2::zeros()),
        ];
        compute_smooth_normals(&mut vertices, &[0, 1, 2], &[true, true, false]);

        // XY-plane triangle with this winding faces +Z
        for v in &vertices[..2] {
            assert!((v.normal.z - 1.0).abs() < 1e-5, "normal {:?}", v.normal);
        }
        assert_eq!(vertices[2].normal, authored);
    }

    #[test]
    fn degenerate_uvs_leave_zero_tangents() {
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z(), Vector2::zeros()),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        for v in &vertices {
            assert_eq!(v.tangent, Vector3::zeros());
        }
    }
}
