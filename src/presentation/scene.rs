//! Entities of the zoom presentation.
//!
//! Spawning is headless: every entity gets a [`Transform`] and its marker
//! components only. Meshes and materials are attached by the render layer.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use glam::{Quat, Vec3};

use super::{
    to_transform, ActiveScene, CameraController, CameraRigState, DetailShaft, SetaInstance,
    SpatulaInstance, StageFrame, ToeRoot,
};
use crate::constants::{LAMELLA_COUNT, SPATULA_COUNT};
use crate::setae::lamella_centre_z;

/// Lobes of the toe as (centre, radius, scale).
pub(super) const TOE_LOBES: [(Vec3, f32, Vec3); 3] = [
    (Vec3::new(-10.0, 6.2, 0.0), 8.0, Vec3::new(0.42, 0.24, 0.8)),
    (Vec3::new(0.0, 5.9, 0.0), 8.0, Vec3::new(0.54, 0.28, 1.02)),
    (Vec3::new(11.0, 6.2, 0.0), 6.5, Vec3::new(0.32, 0.22, 0.7)),
];
/// Radius of the pad disc under the lobes.
pub(super) const PAD_RADIUS: f32 = 32.0;
const PAD_HEIGHT: f32 = 0.72;
const LAMELLA_HEIGHT: f32 = 1.85;
/// Height of the substrate plane.
pub(super) const SUBSTRATE_Y: f32 = -2.0;

/// Piece of the toe model.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub enum ToePart {
    /// Ellipsoidal lobe built from a sphere of this radius.
    Lobe {
        /// Sphere radius before scaling.
        radius: f32,
    },
    /// Flat pad disc.
    Pad,
}

/// Lamella ridge at an index across the pad.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Lamella(pub usize);

/// Molecule at an index of the cloud.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Molecule(pub usize);

/// The wall the toe rests on.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Substrate;

/// Visual group whose opacity follows the stage schedule.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[reflect(Component)]
pub enum FadeGroup {
    /// Lamella ridges.
    Lamellae,
    /// The setae brush.
    Setae,
    /// Magnified shaft of the focused seta.
    DetailShaft,
    /// Spatula fan.
    Spatulae,
    /// Molecule cloud.
    Molecules,
    /// Lines between seta tips and molecules.
    ForceLinks,
}

/// Current opacity of a [`FadeGroup`] member.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct GroupOpacity {
    /// Material alpha in `[0, 1]`.
    pub opacity: f32,
    /// Whether the member is drawn at all.
    pub visible: bool,
}

impl Default for GroupOpacity {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            visible: false,
        }
    }
}

fn faded(group: FadeGroup) -> (FadeGroup, GroupOpacity) {
    (group, GroupOpacity::default())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub(super) fn spawn_scene(
    mut commands: Commands,
    scene: Res<ActiveScene>,
    frame: Res<StageFrame>,
    rig: Res<CameraRigState>,
) {
    let pose = rig.pose();
    commands.spawn((
        CameraController,
        Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y),
        Name::new("PresentationCamera"),
    ));
    commands.spawn((
        Substrate,
        Transform::from_xyz(0.0, SUBSTRATE_Y, 0.0),
        Name::new("Substrate"),
    ));

    commands
        .spawn((
            ToeRoot,
            Transform::from_translation(frame.toe_position),
            Name::new("Toe"),
        ))
        .with_children(|toe| {
            for (centre, radius, scale) in TOE_LOBES {
                toe.spawn((
                    ToePart::Lobe { radius },
                    Transform::from_translation(centre).with_scale(scale),
                ));
            }
            toe.spawn((
                ToePart::Pad,
                Transform::from_xyz(0.0, PAD_HEIGHT, 0.0)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));
        });

    for index in 0..LAMELLA_COUNT {
        commands.spawn((
            Lamella(index),
            faded(FadeGroup::Lamellae),
            Transform::from_xyz(0.0, LAMELLA_HEIGHT, lamella_centre_z(index)),
        ));
    }

    for (index, pose) in frame.setae.iter().enumerate() {
        commands.spawn((SetaInstance(index), faded(FadeGroup::Setae), to_transform(pose)));
    }

    commands.spawn((
        DetailShaft,
        faded(FadeGroup::DetailShaft),
        to_transform(&frame.focus.shaft),
        Name::new("DetailShaft"),
    ));
    for index in 0..SPATULA_COUNT {
        commands.spawn((SpatulaInstance(index), faded(FadeGroup::Spatulae), Transform::IDENTITY));
    }

    let molecules = &scene.layout().molecules;
    for (index, (position, scale)) in molecules
        .positions()
        .iter()
        .zip(molecules.scales())
        .enumerate()
    {
        commands.spawn((
            Molecule(index),
            faded(FadeGroup::Molecules),
            Transform::from_translation(*position).with_scale(Vec3::splat(*scale)),
        ));
    }

    commands.spawn((faded(FadeGroup::ForceLinks), Name::new("ForceLinks")));
    log::debug!(
        "spawned {} setae, {} spatulae and {} molecules",
        frame.setae.len(),
        SPATULA_COUNT,
        molecules.positions().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ZoomPresentationPlugin;

    #[test]
    fn scene_is_spawned_at_startup() {
        let mut app = App::new();
        app.add_plugins(ZoomPresentationPlugin);
        app.update();
        let world = app.world_mut();
        assert_eq!(world.query::<&SetaInstance>().iter(world).count(), 432);
        assert_eq!(world.query::<&SpatulaInstance>().iter(world).count(), SPATULA_COUNT);
        assert_eq!(world.query::<&Lamella>().iter(world).count(), LAMELLA_COUNT);
        assert_eq!(world.query::<&Molecule>().iter(world).count(), 72);
        assert_eq!(world.query::<&ToePart>().iter(world).count(), 4);
    }
}
