//! Numeric helpers shared by the physics models and the presentation schedule.
//!
//! The easing and interpolation helpers mirror the small set used by the
//! pages: a clamp into the unit interval, a linear remap, `lerp` and the
//! cubic smoothstep. The conversion helpers guard moves between the `f64`
//! physics domain and the `f32` drawing domain.

/// Clamps `value` into `[0, 1]`, mapping `NaN` to zero.
#[must_use]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Clamps `value` into `[0, 1]`, mapping `NaN` to zero.
#[must_use]
pub fn clamp01_f64(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Linearly maps `value` from `[start, end]` onto `[0, 1]` without clamping.
///
/// A degenerate range maps everything to zero.
#[must_use]
pub fn remap(value: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span.abs() <= f32::EPSILON {
        return 0.0;
    }
    (value - start) / span
}

/// Linear interpolation between `from` and `to`.
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}

/// Cubic smoothstep easing `t² (3 - 2t)`.
///
/// # Examples
///
/// ```
/// use gecko_lab::numeric::smoothstep;
/// assert_eq!(smoothstep(0.0), 0.0);
/// assert_eq!(smoothstep(1.0), 1.0);
/// assert!((smoothstep(0.5) - 0.5).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    t * t * 2.0f32.mul_add(-t, 3.0)
}

/// Remaps `value` from `[start, end]`, clamps into the unit interval and
/// applies [`smoothstep`].
#[must_use]
pub fn eased_window(value: f32, start: f32, end: f32) -> f32 {
    smoothstep(clamp01(remap(value, start, end)))
}

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Round the value and convert to `u32`, saturating at the domain bounds.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The rounded value is clamped to the u32 domain before casting."
)]
#[must_use]
pub fn round_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Converts an element count into `f32` for layout arithmetic.
#[expect(
    clippy::cast_precision_loss,
    reason = "Scene element counts stay far below the f32 mantissa limit."
)]
#[must_use]
pub fn count_f32(count: usize) -> f32 {
    count as f32
}

/// Floors a non-negative value to an index; negative and NaN map to zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is floored and clamped to be non-negative before casting."
)]
#[must_use]
pub fn floor_index(value: f32) -> usize {
    if value.is_nan() {
        return 0;
    }
    value.floor().max(0.0) as usize
}
