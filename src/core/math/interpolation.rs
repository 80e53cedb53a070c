use nalgebra::{Point2, Vector2, Vector3};

const EPSILON: f32 = 1e-6;

/// 2D cross product (z component of the 3D cross of two in-plane vectors).
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Barycentric weight evaluator for one screen-space triangle.
///
/// The edge vectors and the inverse signed double area are computed once at
/// construction; evaluating a pixel then costs three 2D crosses. Because the
/// normalization keeps the area's sign, the weights of an interior point are
/// all positive for either winding.
pub struct BarycentricSolver {
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    e0: Vector2<f32>,
    e1: Vector2<f32>,
    e2: Vector2<f32>,
    inv_total_area: f32,
}

impl BarycentricSolver {
    /// Returns `None` if the triangle is degenerate (area near zero); such
    /// triangles contribute no pixels.
    pub fn new(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> Option<Self> {
        let e0 = v1 - v0;
        let e1 = v2 - v1;
        let e2 = v0 - v2;

        let total_area_x2 = cross_2d(e0, -e2);
        if total_area_x2.abs() < EPSILON {
            return None;
        }

        Some(Self {
            v0,
            v1,
            v2,
            e0,
            e1,
            e2,
            inv_total_area: 1.0 / total_area_x2,
        })
    }

    /// Weights (w0, w1, w2) of `p`: each is the cross of an edge against the
    /// vector from that edge's start vertex to `p`, normalized by the signed
    /// double area.
    #[inline]
    pub fn weights(&self, p: Point2<f32>) -> Vector3<f32> {
        let w0 = cross_2d(self.e1, p - self.v1) * self.inv_total_area;
        let w1 = cross_2d(self.e2, p - self.v2) * self.inv_total_area;
        let w2 = cross_2d(self.e0, p - self.v0) * self.inv_total_area;
        Vector3::new(w0, w1, w2)
    }
}

/// Checks whether barycentric weights classify a point as inside.
/// Any negative weight means the point falls outside the triangle.
#[inline(always)]
pub fn is_inside_triangle(weights: Vector3<f32>) -> bool {
    weights.x >= 0.0 && weights.y >= 0.0 && weights.z >= 0.0
}

/// Perspective-correct scalar interpolation: blends the reciprocals of the
/// vertex values with the barycentric weights and inverts the result.
///
/// This is how per-pixel depth is derived from the three NDC depths, and
/// how the attribute correction factor is derived from the three clip-space
/// w values. A plain barycentric blend of the values themselves would be
/// linear in screen space and therefore wrong under projection.
#[inline]
pub fn interpolate_reciprocal(weights: Vector3<f32>, a: f32, b: f32, c: f32) -> f32 {
    1.0 / (weights.x / a + weights.y / b + weights.z / c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_one_inside() {
        let solver = BarycentricSolver::new(
            Point2::new(10.0, 10.0),
            Point2::new(90.0, 15.0),
            Point2::new(40.0, 80.0),
        )
        .unwrap();

        let w = solver.weights(Point2::new(45.0, 35.0));
        assert!(is_inside_triangle(w));
        assert_relative_eq!(w.x + w.y + w.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn vertex_weights_are_unit() {
        let v0 = Point2::new(0.0, 0.0);
        let solver =
            BarycentricSolver::new(v0, Point2::new(10.0, 0.0), Point2::new(0.0, 10.0)).unwrap();

        let w = solver.weights(v0);
        assert_relative_eq!(w.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(w.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(w.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn outside_point_has_negative_weight() {
        let solver = BarycentricSolver::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        )
        .unwrap();
        assert!(!is_inside_triangle(solver.weights(Point2::new(20.0, 20.0))));
    }

    #[test]
    fn winding_does_not_change_classification() {
        let v0 = Point2::new(0.0, 0.0);
        let v1 = Point2::new(10.0, 0.0);
        let v2 = Point2::new(0.0, 10.0);
        let p = Point2::new(2.0, 2.0);

        // Same triangle with reversed winding: the signed-area normalization
        // keeps interior weights positive either way.
        let ccw = BarycentricSolver::new(v0, v1, v2).unwrap();
        let cw = BarycentricSolver::new(v0, v2, v1).unwrap();
        assert!(is_inside_triangle(ccw.weights(p)));
        assert!(is_inside_triangle(cw.weights(p)));
    }

    #[test]
    fn degenerate_triangle_yields_no_solver() {
        let collinear = BarycentricSolver::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 10.0),
        );
        assert!(collinear.is_none());
    }

    #[test]
    fn reciprocal_interpolation_matches_view_space_lerp() {
        // Screen-space midpoint of an edge with non-uniform w. The view-space
        // parameter of that midpoint is w0 / (w0 + w1), so the correct UV is
        // lerp(uv0, uv1, w0 / (w0 + w1)).
        let (w0, w1) = (1.0_f32, 3.0_f32);
        let (uv0, uv1) = (0.0_f32, 1.0_f32);

        let weights = Vector3::new(0.5, 0.5, 0.0);
        // Attribute pattern: sum(attr_i / w_i * weight_i) * depth_w
        let depth_w = 1.0 / (weights.x / w0 + weights.y / w1);
        let interpolated = (uv0 / w0 * weights.x + uv1 / w1 * weights.y) * depth_w;

        let t_view = w0 / (w0 + w1);
        let expected = uv0 + (uv1 - uv0) * t_view;
        assert_relative_eq!(interpolated, expected, epsilon = 1e-5);
    }

    #[test]
    fn uniform_w_reduces_to_linear_blend() {
        let weights = Vector3::new(0.25, 0.35, 0.4);
        let depth = interpolate_reciprocal(weights, 2.0, 2.0, 2.0);
        assert_relative_eq!(depth, 2.0, epsilon = 1e-5);
    }
}
