//! Utility helpers for tests.

pub mod scene;

use glam::Vec3;

/// Assert that two vectors agree component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors in the message if any component differs by more
/// than `epsilon`.
pub fn assert_vec3_close(actual: Vec3, expected: Vec3, epsilon: f32) {
    assert!(
        (actual - expected).abs().max_element() <= epsilon,
        "{actual:?} differs from {expected:?} by more than {epsilon}"
    );
}

/// Assert that `values` never decrease.
///
/// # Panics
/// Panics naming the first index at which the sequence falls.
pub fn assert_non_decreasing(values: &[f32]) {
    for (index, pair) in values.windows(2).enumerate() {
        if let [a, b] = pair {
            assert!(b >= a, "value falls from {a} to {b} at index {}", index + 1);
        }
    }
}
