//! Output bundle produced by [`super::ZoomScene`].

use glam::Vec3;

use super::focus::FocusDetail;
use super::links::ForceLink;
use crate::schedule::{CameraPose, Stage, StageSchedule};
use crate::setae::InstanceTransform;

/// Opacity and visibility of one visual group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fade {
    /// Material opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the group is drawn at all.
    pub visible: bool,
}

impl Fade {
    /// A fade with explicit visibility.
    #[must_use]
    pub const fn new(opacity: f32, visible: bool) -> Self {
        Self { opacity, visible }
    }

    /// A group that stays visible and relies on opacity alone.
    #[must_use]
    pub const fn always(opacity: f32) -> Self {
        Self::new(opacity, true)
    }
}

/// Fades of every staged group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupFades {
    /// Lamella ridges.
    pub lamellae: Fade,
    /// Setae brush.
    pub setae: Fade,
    /// Magnified seta shaft.
    pub detail_shaft: Fade,
    /// Spatula fan.
    pub spatulae: Fade,
    /// Molecule cloud.
    pub molecules: Fade,
    /// Force-link segments.
    pub force_links: Fade,
}

/// Everything the render driver needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutputs {
    /// Clamped progress the bundle was evaluated at.
    pub progress: f32,
    /// Active stage.
    pub stage: Stage,
    /// Eased local parameter of the active stage.
    pub local_t: f32,
    /// Camera pose the rig should approach.
    pub camera: CameraPose,
    /// Toe position.
    pub toe_position: Vec3,
    /// Per-group fades.
    pub fades: GroupFades,
    /// One transform per seta, in field order.
    pub setae: Vec<InstanceTransform>,
    /// Magnified seta and its spatula fan.
    pub focus: FocusDetail,
    /// Force links in link order.
    pub links: Vec<ForceLink>,
}

impl StageOutputs {
    /// An empty bundle with room for `setae` transforms and `links` links.
    #[must_use]
    pub fn with_capacity(setae: usize, links: usize) -> Self {
        let schedule = StageSchedule::default();
        Self {
            progress: 0.0,
            stage: Stage::Macro,
            local_t: 0.0,
            camera: schedule.camera_pose(0.0),
            toe_position: Vec3::ZERO,
            fades: GroupFades::default(),
            setae: Vec::with_capacity(setae),
            focus: FocusDetail::default(),
            links: Vec::with_capacity(links),
        }
    }
}
