//! Per-frame evaluation of the zoom presentation.
//!
//! [`ZoomScene`] owns the immutable scene layout (setae, molecules, focus and
//! link selections) together with the [`StageSchedule`]. Evaluating it at a
//! progress value yields a [`StageOutputs`] bundle: the active stage, the
//! camera pose the rig should approach, per-group fades, every seta
//! transform, the focused-seta detail rig and the molecular force links.
//!
//! Evaluation is pure. [`ZoomScene::compute_stage_into`] overwrites a
//! preallocated bundle so the hot path performs no per-element allocation.

mod focus;
mod links;
mod outputs;

pub use focus::{FocusDetail, SpatulaPose};
pub use links::{link_intensity, ForceLink};
pub use outputs::{Fade, GroupFades, StageOutputs};

use crate::constants::{FADE_VISIBILITY_EPSILON, FORCE_LINK_COUNT};
use crate::schedule::{toe_position, Stage, StageSchedule};
use crate::setae::SceneLayout;

/// Opacity of the fully grown setae material.
const SETAE_MAX_OPACITY: f32 = 0.95;

/// Scene content plus schedule, ready to be evaluated every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomScene {
    layout: SceneLayout,
    schedule: StageSchedule,
    focus_index: usize,
    link_indices: Vec<usize>,
}

impl ZoomScene {
    /// Creates a scene from a generated layout.
    #[must_use]
    pub fn new(layout: SceneLayout, schedule: StageSchedule) -> Self {
        Self::with_link_count(layout, schedule, FORCE_LINK_COUNT)
    }

    /// Creates a scene sampling `link_count` setae for force links.
    #[must_use]
    pub fn with_link_count(layout: SceneLayout, schedule: StageSchedule, link_count: usize) -> Self {
        let focus_index = layout.field.focus_index();
        let link_indices = layout.field.link_indices(link_count);
        Self {
            layout,
            schedule,
            focus_index,
            link_indices,
        }
    }

    /// The static layout.
    #[must_use]
    pub const fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// The stage schedule.
    #[must_use]
    pub const fn schedule(&self) -> &StageSchedule {
        &self.schedule
    }

    /// Index of the magnified seta.
    #[must_use]
    pub const fn focus_index(&self) -> usize {
        self.focus_index
    }

    /// Indices of the setae carrying force links.
    #[must_use]
    pub fn link_indices(&self) -> &[usize] {
        &self.link_indices
    }

    /// An output bundle with buffers sized for this scene.
    #[must_use]
    pub fn allocate_outputs(&self) -> StageOutputs {
        StageOutputs::with_capacity(self.layout.field.len(), self.link_indices.len())
    }

    /// Evaluates the scene at `progress` into a fresh bundle.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::schedule::{Stage, StageSchedule};
    /// use gecko_lab::setae::SceneLayout;
    /// use gecko_lab::stage::ZoomScene;
    ///
    /// let scene = ZoomScene::new(SceneLayout::from_seed(1), StageSchedule::default());
    /// let outputs = scene.compute_stage(0.5);
    /// assert_eq!(outputs.stage, Stage::SetaeGrowth);
    /// assert_eq!(outputs.setae.len(), 432);
    /// ```
    #[must_use]
    pub fn compute_stage(&self, progress: f32) -> StageOutputs {
        let mut outputs = self.allocate_outputs();
        self.compute_stage_into(progress, &mut outputs);
        outputs
    }

    /// Evaluates the scene at `progress`, overwriting `out` in place.
    pub fn compute_stage_into(&self, progress: f32, out: &mut StageOutputs) {
        let schedule = &self.schedule;
        let cursor = schedule.cursor(progress);
        let progress = cursor.progress;

        let lamellae = schedule.window(Stage::Lamellae, progress);
        let growth = schedule.window(Stage::SetaeGrowth, progress);
        let detail = schedule.window(Stage::FocusedSeta, progress);
        let molecular = schedule.window(Stage::Molecular, progress);
        let (focus_start, _) = schedule.bounds(Stage::FocusedSeta);

        out.progress = progress;
        out.stage = cursor.stage;
        out.local_t = cursor.eased;
        out.camera = schedule.camera_pose(progress);
        out.toe_position = toe_position(progress);
        out.fades = GroupFades {
            lamellae: Fade::always(lamellae),
            setae: Fade::always(SETAE_MAX_OPACITY * growth),
            detail_shaft: Fade::new(detail, progress >= focus_start),
            spatulae: Fade::new(detail, detail > FADE_VISIBILITY_EPSILON),
            molecules: Fade::always(molecular),
            force_links: Fade::new(molecular, molecular > FADE_VISIBILITY_EPSILON),
        };

        self.layout.field.write_poses(growth, &mut out.setae);
        focus::write_focus_detail(
            self.layout.field.get(self.focus_index),
            growth,
            detail,
            &mut out.focus,
        );
        links::write_links(
            &self.layout,
            &self.link_indices,
            growth,
            molecular,
            &mut out.links,
        );
    }
}
