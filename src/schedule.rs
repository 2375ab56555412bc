//! Progress schedule of the toe-pad zoom presentation.
//!
//! A single progress value in `[0, 1]` is split by six breakpoints into five
//! contiguous stages. Within a stage the progress is remapped to a local
//! parameter and eased with smoothstep before it drives any interpolation.
//! Camera keyframes sit on the breakpoints so each stage starts exactly where
//! the previous one ended.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::STAGE_BREAKPOINTS;
use crate::numeric::{clamp01, eased_window, lerp, remap, smoothstep};

/// One of the five presentation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Whole toe resting on the substrate.
    Macro,
    /// Lamella ridges fade in.
    Lamellae,
    /// The setae brush grows.
    SetaeGrowth,
    /// One seta is magnified and fans into spatulae.
    FocusedSeta,
    /// Molecules and force links appear.
    Molecular,
}

impl Stage {
    /// Every stage in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Macro,
        Self::Lamellae,
        Self::SetaeGrowth,
        Self::FocusedSeta,
        Self::Molecular,
    ];

    /// Zero-based position in presentation order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Macro => 0,
            Self::Lamellae => 1,
            Self::SetaeGrowth => 2,
            Self::FocusedSeta => 3,
            Self::Molecular => 4,
        }
    }

    /// On-screen caption for the stage.
    #[must_use]
    pub const fn caption(self) -> StageCaption {
        match self {
            Self::Macro => StageCaption {
                label: "Gecko toe on surface",
                title: "Macro view",
                bullet: "Semi-realistic toe resting on a surface.",
            },
            Self::Lamellae => StageCaption {
                label: "Lamellae & texture",
                title: "Micro view",
                bullet: "Lamellae ridges appear; setae prepare to grow.",
            },
            Self::SetaeGrowth => StageCaption {
                label: "Aligned setae field",
                title: "Microscale setae",
                bullet: "Dense aligned setae grow from lamellae (ordered brush).",
            },
            Self::FocusedSeta => StageCaption {
                label: "Focused seta & spatulae",
                title: "Nanoscale tip",
                bullet: "Focused seta expands into spatulae fan for contact demonstration.",
            },
            Self::Molecular => StageCaption {
                label: "Molecular contact (1/r⁶)",
                title: "Molecular",
                bullet: "Molecules appear; force intensity visualized between spatula tips and molecules.",
            },
        }
    }
}

/// Text shown alongside a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCaption {
    /// Short overlay label.
    pub label: &'static str,
    /// Heading in the side panel.
    pub title: &'static str,
    /// One-line explanation.
    pub bullet: &'static str,
}

/// Stage and eased local parameter at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageCursor {
    /// Clamped progress.
    pub progress: f32,
    /// Active stage.
    pub stage: Stage,
    /// Linear position within the stage, in `[0, 1]`.
    pub local: f32,
    /// `local` eased with smoothstep.
    pub eased: f32,
}

/// Camera height and distance at a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Camera height above the pad.
    pub height: f32,
    /// Camera distance along +Z.
    pub distance: f32,
}

/// Camera keyframes on each breakpoint, from the wide toe shot down to the
/// molecular close-up.
pub const CAMERA_KEYFRAMES: [CameraKeyframe; 6] = [
    CameraKeyframe { height: 28.0, distance: 140.0 },
    CameraKeyframe { height: 22.0, distance: 110.0 },
    CameraKeyframe { height: 18.0, distance: 40.0 },
    CameraKeyframe { height: 14.0, distance: 18.0 },
    CameraKeyframe { height: 11.0, distance: 10.0 },
    CameraKeyframe { height: 8.0, distance: 8.0 },
];

/// Desired camera placement for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
}

/// Breakpoints and keyframes driving the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSchedule {
    /// Six increasing breakpoints from `0.0` to `1.0`.
    pub breakpoints: [f32; 6],
    /// Camera keyframe at each breakpoint.
    pub keyframes: [CameraKeyframe; 6],
}

impl Default for StageSchedule {
    fn default() -> Self {
        Self {
            breakpoints: STAGE_BREAKPOINTS,
            keyframes: CAMERA_KEYFRAMES,
        }
    }
}

impl StageSchedule {
    /// Start and end progress of `stage`.
    #[must_use]
    pub const fn bounds(&self, stage: Stage) -> (f32, f32) {
        let [b0, b1, b2, b3, b4, b5] = self.breakpoints;
        match stage {
            Stage::Macro => (b0, b1),
            Stage::Lamellae => (b1, b2),
            Stage::SetaeGrowth => (b2, b3),
            Stage::FocusedSeta => (b3, b4),
            Stage::Molecular => (b4, b5),
        }
    }

    /// Stage containing `progress`; intervals are half-open except the last.
    #[must_use]
    pub fn stage_at(&self, progress: f32) -> Stage {
        let progress = clamp01(progress);
        Stage::ALL
            .into_iter()
            .find(|&stage| progress < self.bounds(stage).1)
            .unwrap_or(Stage::Molecular)
    }

    /// Locates `progress` within the schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::schedule::{Stage, StageSchedule};
    /// let cursor = StageSchedule::default().cursor(0.5);
    /// assert_eq!(cursor.stage, Stage::SetaeGrowth);
    /// assert!((cursor.local - 0.2667).abs() < 1e-3);
    /// assert!((cursor.eased - 0.1754).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn cursor(&self, progress: f32) -> StageCursor {
        let progress = clamp01(progress);
        let stage = self.stage_at(progress);
        let (start, end) = self.bounds(stage);
        let local = clamp01(remap(progress, start, end));
        StageCursor {
            progress,
            stage,
            local,
            eased: smoothstep(local),
        }
    }

    /// Eased progress through `stage`: zero before it starts, one after it
    /// ends.
    #[must_use]
    pub fn window(&self, stage: Stage, progress: f32) -> f32 {
        let (start, end) = self.bounds(stage);
        eased_window(clamp01(progress), start, end)
    }

    /// Eased progress spanning from the start of `first` to the end of `last`.
    #[must_use]
    pub fn span(&self, first: Stage, last: Stage, progress: f32) -> f32 {
        let (start, _) = self.bounds(first);
        let (_, end) = self.bounds(last);
        eased_window(clamp01(progress), start, end)
    }

    /// Camera pose the rig should move towards at `progress`.
    #[must_use]
    pub fn camera_pose(&self, progress: f32) -> CameraPose {
        let cursor = self.cursor(progress);
        let index = cursor.stage.index();
        let from = self.keyframes.get(index).copied().unwrap_or(CAMERA_KEYFRAMES[0]);
        let to = self.keyframes.get(index + 1).copied().unwrap_or(from);
        let height = lerp(from.height, to.height, cursor.eased);
        let distance = lerp(from.distance, to.distance, cursor.eased);
        CameraPose {
            position: Vec3::new(0.0, height, distance),
            target: Vec3::new(0.0, (1.0 - cursor.progress).mul_add(6.0, 8.0), 0.0),
        }
    }

    /// Whether the breakpoints start at 0, end at 1 and strictly increase.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let increasing = self
            .breakpoints
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a < b));
        increasing
            && self.breakpoints.first() == Some(&0.0)
            && self.breakpoints.last() == Some(&1.0)
    }

    /// Whether every camera keyframe is finite.
    #[must_use]
    pub fn keyframes_finite(&self) -> bool {
        self.keyframes
            .iter()
            .all(|key| key.height.is_finite() && key.distance.is_finite())
    }
}

/// Rest position of the toe as it presses into the substrate early on.
#[must_use]
pub fn toe_position(progress: f32) -> Vec3 {
    let compress = clamp01(remap(progress, 0.03, 0.15));
    Vec3::new(-2.0 * compress, 1.5f32.mul_add(-compress, 10.0), -0.6 * compress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Stage::Macro)]
    #[case(0.199, Stage::Macro)]
    #[case(0.2, Stage::Lamellae)]
    #[case(0.42, Stage::SetaeGrowth)]
    #[case(0.5, Stage::SetaeGrowth)]
    #[case(0.72, Stage::FocusedSeta)]
    #[case(0.88, Stage::Molecular)]
    #[case(1.0, Stage::Molecular)]
    #[case::below_range(-0.3, Stage::Macro)]
    #[case::above_range(1.7, Stage::Molecular)]
    fn stage_lookup(#[case] progress: f32, #[case] expected: Stage) {
        assert_eq!(StageSchedule::default().stage_at(progress), expected);
    }

    #[test]
    fn out_of_range_progress_clamps_to_boundary_output() {
        let schedule = StageSchedule::default();
        assert_eq!(schedule.camera_pose(-1.0), schedule.camera_pose(0.0));
        assert_eq!(schedule.camera_pose(2.0), schedule.camera_pose(1.0));
    }

    #[test]
    fn camera_hits_first_and_last_keyframes() {
        let schedule = StageSchedule::default();
        let start = schedule.camera_pose(0.0);
        assert_relative_eq!(start.position.y, 28.0);
        assert_relative_eq!(start.position.z, 140.0);
        assert_relative_eq!(start.target.y, 14.0);
        let end = schedule.camera_pose(1.0);
        assert_relative_eq!(end.position.y, 8.0);
        assert_relative_eq!(end.position.z, 8.0);
        assert_relative_eq!(end.target.y, 8.0);
    }

    #[test]
    fn camera_is_continuous_across_breakpoints() {
        let schedule = StageSchedule::default();
        for &breakpoint in &STAGE_BREAKPOINTS[1..5] {
            let before = schedule.camera_pose(breakpoint - 1e-4);
            let after = schedule.camera_pose(breakpoint + 1e-4);
            let jump = before.position.distance(after.position);
            assert!(jump < 0.05, "camera jumped {jump} at {breakpoint}");
        }
    }

    #[test]
    fn window_is_zero_before_and_one_after() {
        let schedule = StageSchedule::default();
        assert_relative_eq!(schedule.window(Stage::SetaeGrowth, 0.3), 0.0);
        assert_relative_eq!(schedule.window(Stage::SetaeGrowth, 0.8), 1.0);
    }

    #[test]
    fn toe_compresses_then_settles() {
        assert_eq!(toe_position(0.0), Vec3::new(0.0, 10.0, 0.0));
        let pressed = toe_position(0.5);
        assert_relative_eq!(pressed.x, -2.0);
        assert_relative_eq!(pressed.y, 8.5);
        assert_relative_eq!(pressed.z, -0.6);
    }

    #[test]
    fn default_schedule_is_well_formed() {
        assert!(StageSchedule::default().is_well_formed());
        let mut broken = StageSchedule::default();
        broken.breakpoints[2] = 0.1;
        assert!(!broken.is_well_formed());
    }

    #[test]
    fn captions_follow_stage_order() {
        assert_eq!(Stage::SetaeGrowth.caption().label, "Aligned setae field");
        assert_eq!(Stage::ALL.map(Stage::index), [0, 1, 2, 3, 4]);
    }
}
