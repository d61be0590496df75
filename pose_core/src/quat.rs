//! Angular distance between raw rotation 4-vectors.
//!
//! Rotations are carried as unconstrained 4-vectors during regression; a
//! vector and its negation encode the same physical rotation (double
//! cover). The distance here normalizes both inputs, takes the absolute
//! dot product, and converts `2 * acos(|dot|)` to degrees, so antipodal
//! vectors measure as zero apart.

/// Smallest rotation-vector norm accepted by the normalization.
///
/// Norms below this are clamped up before dividing, so a degenerate
/// (near-zero) rotation vector yields a finite, meaningless angle instead
/// of NaN. Data collaborators are expected never to emit zero rotations;
/// the clamp keeps the metric total rather than making it fallible.
pub const MIN_ROTATION_NORM: f32 = 1e-8;

fn norm(v: &[f32; 4]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2] + v[3] * v[3]).sqrt()
}

/// Angular distance in degrees between two rotation 4-vectors.
///
/// Both inputs are normalized per-vector (norms clamped to
/// [`MIN_ROTATION_NORM`]); the absolute dot product is clamped into the
/// arccos domain before conversion. Identical and antipodal vectors give
/// 0 degrees, orthogonal unit vectors give 180.
pub fn angular_distance_deg(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let na = norm(a).max(MIN_ROTATION_NORM);
    let nb = norm(b).max(MIN_ROTATION_NORM);

    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]) / (na * nb);
    let dot = dot.abs().clamp(0.0, 1.0);

    2.0 * dot.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_zero_error() {
        let q = [0.5, 0.5, 0.5, 0.5];
        assert!(angular_distance_deg(&q, &q).abs() < 1e-3);
    }

    #[test]
    fn test_antipodal_vectors_zero_error() {
        let q = [0.0, 0.0, 0.0, 1.0];
        let neg = [0.0, 0.0, 0.0, -1.0];
        assert!(angular_distance_deg(&q, &neg).abs() < 1e-3);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = [1.0, 0.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0, 0.0];
        assert!((angular_distance_deg(&a, &b) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_unnormalized_inputs_match_normalized() {
        let a = [1.0, 0.0, 0.0, 0.0];
        let scaled = [7.5, 0.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0, 0.0];

        let reference = angular_distance_deg(&a, &b);
        let from_scaled = angular_distance_deg(&scaled, &b);
        assert!((reference - from_scaled).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_norm_is_finite() {
        let zero = [0.0; 4];
        let q = [0.0, 0.0, 0.0, 1.0];
        let angle = angular_distance_deg(&zero, &q);
        assert!(angle.is_finite());
    }

    #[test]
    fn test_symmetry() {
        let a = [0.3, -0.2, 0.9, 0.1];
        let b = [-0.1, 0.4, 0.2, 0.8];
        let ab = angular_distance_deg(&a, &b);
        let ba = angular_distance_deg(&b, &a);
        assert!((ab - ba).abs() < 1e-3);
    }
}
