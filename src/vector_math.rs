//! Small vector helpers used by the zoom scene.
use glam::{EulerRot, Quat, Vec3};

/// Orientation of an element leaning by `lean` about X and twisted by `twist`
/// about Y, applied in XYZ order.
#[must_use]
pub fn lean_twist_rotation(lean: f32, twist: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, -lean, twist, 0.0)
}

/// Returns two unit vectors spanning the plane perpendicular to `axis`.
///
/// The tangent is `axis × Y`, falling back to `X` when `axis` is parallel to
/// `Y`; the binormal completes the right-handed frame.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gecko_lab::vector_math::perpendicular_basis;
/// let (tangent, binormal) = perpendicular_basis(Vec3::Y);
/// assert_eq!(tangent, Vec3::X);
/// assert!(binormal.dot(Vec3::Y).abs() < 1e-6);
/// ```
#[must_use]
pub fn perpendicular_basis(axis: Vec3) -> (Vec3, Vec3) {
    let cross = axis.cross(Vec3::Y);
    let tangent = if cross.length_squared() < 1e-6 {
        Vec3::X
    } else {
        cross.normalize()
    };
    let binormal = axis.cross(tangent).try_normalize().unwrap_or(Vec3::Z);
    (tangent, binormal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_lean_points_up() {
        let up = lean_twist_rotation(0.0, 0.3) * Vec3::Y;
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn positive_lean_tilts_towards_negative_z() {
        let up = lean_twist_rotation(0.22, 0.0) * Vec3::Y;
        assert!(up.z < 0.0, "expected -Z lean, got {up:?}");
    }

    #[test]
    fn basis_is_orthonormal() {
        let axis = lean_twist_rotation(0.4, 0.1) * Vec3::Y;
        let (tangent, binormal) = perpendicular_basis(axis);
        assert_relative_eq!(tangent.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(binormal.length(), 1.0, epsilon = 1e-5);
        assert!(tangent.dot(axis).abs() < 1e-5);
        assert!(binormal.dot(axis).abs() < 1e-5);
        assert!(tangent.dot(binormal).abs() < 1e-5);
    }
}
