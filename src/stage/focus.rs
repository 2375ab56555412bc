//! Magnified seta and its spatula fan.

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use crate::constants::{FADE_VISIBILITY_EPSILON, SPATULA_COUNT};
use crate::numeric::count_f32;
use crate::setae::{InstanceTransform, SetaDescriptor};
use crate::vector_math::perpendicular_basis;

/// Half the length of the magnified shaft mesh.
const SHAFT_HALF_LENGTH: f32 = 9.0;
/// Angular extent of the spatula fan.
const FAN_ARC: f32 = 1.8 * PI;
/// Base fan radius before per-plate variation.
const FAN_RADIUS: f32 = 0.28;
/// Amplitude of the per-plate radius variation.
const FAN_RADIUS_RIPPLE: f32 = 0.03;
/// Squash applied along the binormal so the fan reads as an ellipse.
const FAN_ELLIPSE: f32 = 0.6;
/// Lift along the seta axis.
const FAN_LIFT: f32 = 0.01;
/// Share of the fan angle applied as a spin about the seta axis.
const FAN_SPIN: f32 = 0.32;
/// Plate scale.
const SPATULA_SCALE: Vec3 = Vec3::new(0.9, 0.9, 1.0);

/// One plate of the spatula fan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpatulaPose {
    /// Plate transform.
    pub transform: InstanceTransform,
    /// Whether the plate is drawn.
    pub visible: bool,
}

/// Magnified seta shaft plus the fan around its tip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusDetail {
    /// Current tip of the focused seta.
    pub tip: Vec3,
    /// Unit axis of the focused seta.
    pub axis: Vec3,
    /// Magnified shaft transform, centred beyond the tip.
    pub shaft: InstanceTransform,
    /// Fan radius after easing.
    pub radius_scale: f32,
    /// Spatula plates in fan order.
    pub spatulae: [SpatulaPose; SPATULA_COUNT],
}

/// Fan angle of plate `index`, spread evenly over [`FAN_ARC`] and centred on
/// zero.
#[must_use]
pub fn fan_angle(index: usize) -> f32 {
    (count_f32(index) / count_f32(SPATULA_COUNT)).mul_add(FAN_ARC, -FAN_ARC / 2.0)
}

pub(super) fn write_focus_detail(
    seta: Option<&SetaDescriptor>,
    growth: f32,
    detail: f32,
    out: &mut FocusDetail,
) {
    let Some(seta) = seta else {
        *out = FocusDetail::default();
        return;
    };

    let rotation = seta.rotation();
    let axis = rotation * Vec3::Y;
    let tip = seta.tip(growth);
    let (tangent, binormal) = perpendicular_basis(axis);
    let visible = detail > FADE_VISIBILITY_EPSILON;
    let facing = Quat::from_rotation_arc(Vec3::Z, axis);

    out.tip = tip;
    out.axis = axis;
    out.radius_scale = detail;
    out.shaft = InstanceTransform {
        translation: tip + axis * SHAFT_HALF_LENGTH,
        rotation,
        scale: Vec3::ONE,
    };

    for (index, plate) in out.spatulae.iter_mut().enumerate() {
        let angle = fan_angle(index);
        let ripple = (1.3 * count_f32(index)).sin();
        let radius = FAN_RADIUS_RIPPLE.mul_add(ripple, FAN_RADIUS) * detail;
        let translation = tip
            + tangent * (angle.cos() * radius)
            + binormal * (angle.sin() * radius * FAN_ELLIPSE)
            + axis * FAN_LIFT;
        plate.transform = InstanceTransform {
            translation,
            rotation: facing * Quat::from_axis_angle(axis, angle * FAN_SPIN),
            scale: SPATULA_SCALE,
        };
        plate.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn upright() -> SetaDescriptor {
        SetaDescriptor {
            base: Vec3::ZERO,
            rest_length: 10.0,
            lean: 0.0,
            twist: 0.0,
        }
    }

    #[test]
    fn fan_angles_cover_the_arc() {
        assert_relative_eq!(fan_angle(0), -0.9 * PI, epsilon = 1e-5);
        let last = fan_angle(SPATULA_COUNT - 1);
        assert!(last < 0.9 * PI);
        assert!(last > 0.7 * PI);
    }

    #[test]
    fn collapsed_fan_sits_on_the_tip() {
        let mut detail = FocusDetail::default();
        write_focus_detail(Some(&upright()), 1.0, 0.0, &mut detail);
        for plate in &detail.spatulae {
            assert!(!plate.visible);
            let offset = plate.transform.translation - detail.tip;
            assert_relative_eq!(offset.length(), FAN_LIFT, epsilon = 1e-5);
        }
    }

    #[test]
    fn open_fan_lies_in_the_perpendicular_plane() {
        let mut detail = FocusDetail::default();
        write_focus_detail(Some(&upright()), 1.0, 1.0, &mut detail);
        for plate in &detail.spatulae {
            assert!(plate.visible);
            let offset = plate.transform.translation - detail.tip;
            assert_relative_eq!(offset.dot(detail.axis), FAN_LIFT, epsilon = 1e-5);
            let radial = offset - detail.axis * FAN_LIFT;
            assert!(radial.length() <= FAN_RADIUS + FAN_RADIUS_RIPPLE + 1e-5);
        }
    }

    #[test]
    fn shaft_extends_beyond_the_tip() {
        let mut detail = FocusDetail::default();
        write_focus_detail(Some(&upright()), 1.0, 0.5, &mut detail);
        assert_relative_eq!(detail.shaft.translation.y, 10.02 + 9.0, epsilon = 1e-4);
    }

    #[test]
    fn missing_focus_resets_detail() {
        let mut detail = FocusDetail::default();
        write_focus_detail(Some(&upright()), 1.0, 1.0, &mut detail);
        write_focus_detail(None, 1.0, 1.0, &mut detail);
        assert_eq!(detail, FocusDetail::default());
    }
}
