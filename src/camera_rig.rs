//! Smoothed camera state carried between frames.
//!
//! The rig never snaps to the pose computed by the schedule. Each
//! [`CameraRig::advance`] moves the eye and the look-at point a fixed fraction
//! of the remaining distance towards the requested pose.

use glam::Vec3;

use crate::constants::CAMERA_SMOOTHING_RATE;
use crate::numeric::clamp01;
use crate::schedule::CameraPose;

/// Eye and look-at point eased towards the schedule's camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    rate: f32,
}

impl CameraRig {
    /// Starts the rig at `pose` with the default smoothing rate.
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        Self::with_rate(pose, CAMERA_SMOOTHING_RATE)
    }

    /// Starts the rig at `pose` with an explicit rate in `(0, 1]`.
    ///
    /// Rates outside that range are clamped; zero would freeze the camera, so
    /// it falls back to the default.
    #[must_use]
    pub fn with_rate(pose: CameraPose, rate: f32) -> Self {
        let rate = clamp01(rate);
        Self {
            position: pose.position,
            target: pose.target,
            rate: if rate > 0.0 { rate } else { CAMERA_SMOOTHING_RATE },
        }
    }

    /// Current eye position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Current look-at point.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }

    /// Fraction of the remaining distance covered per step.
    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Moves one step towards `goal` and returns the new pose.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use gecko_lab::camera_rig::CameraRig;
    /// use gecko_lab::schedule::CameraPose;
    ///
    /// let start = CameraPose { position: Vec3::ZERO, target: Vec3::ZERO };
    /// let mut rig = CameraRig::with_rate(start, 0.5);
    /// let goal = CameraPose { position: Vec3::splat(2.0), target: Vec3::Y };
    /// let pose = rig.advance(goal);
    /// assert_eq!(pose.position, Vec3::ONE);
    /// ```
    pub fn advance(&mut self, goal: CameraPose) -> CameraPose {
        self.position = self.position.lerp(goal.position, self.rate);
        self.target = self.target.lerp(goal.target, self.rate);
        self.pose()
    }

    /// Jumps straight to `pose`, discarding the smoothing history.
    pub fn snap(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    /// The rig's current pose.
    #[must_use]
    pub const fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }
}
