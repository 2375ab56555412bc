//! Small hand-built scene layouts for deterministic stage tests.

use gecko_lab::schedule::StageSchedule;
use gecko_lab::setae::{MoleculeCloud, SceneLayout, SetaDescriptor, SetaField};
use gecko_lab::stage::ZoomScene;
use glam::Vec3;

/// An upright seta of `length` rooted at `base`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::scene::upright_seta;
/// let seta = upright_seta(Vec3::ZERO, 4.0);
/// assert!((seta.direction() - Vec3::Y).length() < 1e-6);
/// ```
#[must_use]
pub fn upright_seta(base: Vec3, length: f32) -> SetaDescriptor {
    SetaDescriptor {
        base,
        rest_length: length,
        lean: 0.0,
        twist: 0.0,
    }
}

/// A row of `count` upright setae along X under a single molecule at
/// `molecule`.
#[must_use]
pub fn row_layout(count: usize, length: f32, molecule: Vec3) -> SceneLayout {
    let setae = std::iter::successors(Some(0.0_f32), |x| Some(x + 2.0))
        .take(count)
        .map(|x| upright_seta(Vec3::new(x, 0.0, 0.0), length))
        .collect();
    SceneLayout {
        field: SetaField::from_descriptors(setae),
        molecules: MoleculeCloud::from_positions(vec![molecule]),
    }
}

/// A scene over [`row_layout`] with the default schedule and one link per
/// seta.
#[must_use]
pub fn row_scene(count: usize, length: f32, molecule: Vec3) -> ZoomScene {
    ZoomScene::with_link_count(
        row_layout(count, length, molecule),
        StageSchedule::default(),
        count,
    )
}
