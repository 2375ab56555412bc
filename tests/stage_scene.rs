//! Stage evaluation over a small hand-built scene.

use gecko_lab::stage::ZoomScene;
use glam::Vec3;
use rstest::{fixture, rstest};
use test_utils::scene::row_scene;
use test_utils::{assert_non_decreasing, assert_vec3_close};

const MOLECULE: Vec3 = Vec3::new(4.0, 12.0, 0.0);

#[fixture]
fn scene() -> ZoomScene {
    row_scene(5, 10.0, MOLECULE)
}

#[rstest]
fn setae_grow_monotonically(scene: ZoomScene) {
    let heights: Vec<f32> = (0..=20_u8)
        .map(|step| {
            let frame = scene.compute_stage(f32::from(step) / 20.0);
            frame.setae.first().map_or(0.0, |pose| pose.scale.y)
        })
        .collect();
    assert_non_decreasing(&heights);
    assert!((heights.last().copied().unwrap_or_default() - 10.0).abs() < 1e-5);
}

#[rstest]
fn focus_is_the_middle_seta(scene: ZoomScene) {
    let frame = scene.compute_stage(1.0);
    assert_eq!(scene.focus_index(), 2);
    assert_vec3_close(frame.focus.tip, Vec3::new(4.0, 10.02, 0.0), 1e-4);
    assert_vec3_close(frame.focus.axis, Vec3::Y, 1e-5);
}

#[rstest]
fn links_anchor_on_the_only_molecule(scene: ZoomScene) {
    let frame = scene.compute_stage(1.0);
    assert_eq!(frame.links.len(), 5);
    for link in &frame.links {
        assert_vec3_close(link.anchor, MOLECULE, 1e-6);
        assert!(link.intensity <= 1.2);
    }
    let closest = frame
        .links
        .iter()
        .find(|link| (link.tip.x - 4.0).abs() < 1e-6)
        .map(|link| link.intensity);
    assert_eq!(closest, Some(1.2));
}

#[rstest]
#[case(0.1)]
#[case(0.5)]
#[case(0.8)]
fn links_are_dark_before_the_molecular_stage(scene: ZoomScene, #[case] progress: f32) {
    let frame = scene.compute_stage(progress);
    assert!(frame.links.iter().all(|link| link.intensity == 0.0));
    assert!(!frame.fades.force_links.visible);
}
