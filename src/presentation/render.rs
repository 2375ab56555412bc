//! Meshes, materials, lights and force-link gizmos for the zoom scene.
//!
//! Only installed when the PBR plugin is present, so headless apps built with
//! the `render` feature keep running on bare transforms.

use bevy::pbr::PbrPlugin;
use bevy::prelude::*;

use super::scene::{FadeGroup, GroupOpacity, Lamella, Molecule, Substrate, ToePart, PAD_RADIUS};
use super::{group_fade, CameraController, DetailShaft, PresentationSet, SetaInstance, SpatulaInstance, StageFrame, ToeRoot};
use crate::constants::{LAMELLA_LENGTH, LAMELLA_WIDTH};
use crate::pages::{page_enabled, Page};
use crate::palette::{Rgba, Swatch};

const BACKGROUND: Swatch = Swatch::new(0x0a, 0x0f, 0x14);
const WALL: Swatch = Swatch::new(0x0d, 0x12, 0x14);
const LEATHER: Swatch = Swatch::new(0x23, 0x1b, 0x18);
const PAD: Swatch = Swatch::new(0x16, 0x20, 0x28);
const LAMELLA: Swatch = Swatch::new(0x14, 0x21, 0x28);
const SETA: Swatch = Swatch::new(0xff, 0xbd, 0x59);
const SPATULA: Swatch = Swatch::new(0xff, 0xd6, 0xa8);
const KEY_LIGHT: Swatch = Swatch::new(0xff, 0xd8, 0x9a);

const SETA_RADIUS: f32 = 0.075;
const SHAFT_RADIUS: f32 = 0.11;
const SHAFT_LENGTH: f32 = 18.0;
const MOLECULE_RADIUS: f32 = 0.18;

fn color(swatch: Swatch) -> Color {
    Color::srgb_u8(swatch.r, swatch.g, swatch.b)
}

fn rgba(value: Rgba, opacity: f32) -> Color {
    Color::srgba(value.r, value.g, value.b, value.a * opacity)
}

/// Shared material of each fading group.
#[derive(Resource, Debug, Clone)]
struct GroupMaterials {
    lamellae: Handle<StandardMaterial>,
    setae: Handle<StandardMaterial>,
    detail_shaft: Handle<StandardMaterial>,
    spatulae: Handle<StandardMaterial>,
    molecules: Handle<StandardMaterial>,
}

impl GroupMaterials {
    fn create(materials: &mut Assets<StandardMaterial>) -> Self {
        let mut fading = |swatch: Swatch, emissive: f32, roughness: f32| {
            materials.add(StandardMaterial {
                base_color: color(swatch).with_alpha(0.0),
                emissive: color(swatch).to_linear() * emissive,
                perceptual_roughness: roughness,
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            })
        };
        Self {
            lamellae: fading(LAMELLA, 0.0, 0.9),
            setae: fading(SETA, 0.02, 0.7),
            detail_shaft: fading(SETA, 0.08, 0.5),
            spatulae: fading(SPATULA, 0.12, 0.32),
            molecules: fading(Swatch::new(0xff, 0xff, 0xff), 0.35, 0.18),
        }
    }

    fn get(&self, group: FadeGroup) -> Option<&Handle<StandardMaterial>> {
        match group {
            FadeGroup::Lamellae => Some(&self.lamellae),
            FadeGroup::Setae => Some(&self.setae),
            FadeGroup::DetailShaft => Some(&self.detail_shaft),
            FadeGroup::Spatulae => Some(&self.spatulae),
            FadeGroup::Molecules => Some(&self.molecules),
            FadeGroup::ForceLinks => None,
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn attach_camera(
    mut commands: Commands,
    cameras: Query<Entity, (With<CameraController>, Without<Camera3d>)>,
) {
    for entity in &cameras {
        commands.entity(entity).insert(Camera3d::default());
    }
    commands.spawn((
        DirectionalLight {
            color: color(KEY_LIGHT),
            illuminance: 9_000.0,
            ..default()
        },
        Transform::from_xyz(30.0, 60.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("KeyLight"),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2_500.0,
            ..default()
        },
        Transform::from_xyz(-30.0, 10.0, -40.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("FillLight"),
    ));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
#[expect(
    clippy::too_many_arguments,
    reason = "Each scene element kind is matched by its own query."
)]
fn attach_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    substrates: Query<Entity, With<Substrate>>,
    toe_roots: Query<Entity, With<ToeRoot>>,
    toe_parts: Query<(Entity, &ToePart)>,
    lamellae: Query<Entity, With<Lamella>>,
    setae: Query<Entity, With<SetaInstance>>,
    shafts: Query<Entity, With<DetailShaft>>,
    spatulae: Query<Entity, With<SpatulaInstance>>,
    molecules: Query<Entity, With<Molecule>>,
) {
    let group = GroupMaterials::create(&mut materials);
    let opaque = |materials: &mut Assets<StandardMaterial>, swatch: Swatch, roughness: f32| {
        materials.add(StandardMaterial {
            base_color: color(swatch),
            perceptual_roughness: roughness,
            metallic: 0.02,
            ..default()
        })
    };

    let wall_mesh = meshes.add(Plane3d::default().mesh().size(360.0, 360.0));
    let wall_material = opaque(&mut materials, WALL, 0.95);
    for entity in &substrates {
        commands
            .entity(entity)
            .insert((Mesh3d(wall_mesh.clone()), MeshMaterial3d(wall_material.clone())));
    }

    for entity in &toe_roots {
        commands.entity(entity).insert(Visibility::default());
    }
    let leather = opaque(&mut materials, LEATHER, 0.6);
    let pad_material = opaque(&mut materials, PAD, 0.86);
    for (entity, part) in &toe_parts {
        let parts = match *part {
            ToePart::Lobe { radius } => (
                Mesh3d(meshes.add(Sphere::new(radius))),
                MeshMaterial3d(leather.clone()),
            ),
            ToePart::Pad => (
                Mesh3d(meshes.add(Circle::new(PAD_RADIUS))),
                MeshMaterial3d(pad_material.clone()),
            ),
        };
        commands.entity(entity).insert(parts);
    }

    let fading = [
        (
            lamellae.iter().collect::<Vec<_>>(),
            meshes.add(Cuboid::new(LAMELLA_LENGTH, 1.6, LAMELLA_WIDTH)),
            group.lamellae.clone(),
        ),
        (
            setae.iter().collect(),
            meshes.add(Cylinder::new(SETA_RADIUS, 1.0)),
            group.setae.clone(),
        ),
        (
            shafts.iter().collect(),
            meshes.add(Cylinder::new(SHAFT_RADIUS, SHAFT_LENGTH)),
            group.detail_shaft.clone(),
        ),
        (
            spatulae.iter().collect(),
            meshes.add(Rectangle::new(0.5, 0.22)),
            group.spatulae.clone(),
        ),
        (
            molecules.iter().collect(),
            meshes.add(Sphere::new(MOLECULE_RADIUS)),
            group.molecules.clone(),
        ),
    ];
    for (entities, mesh, material) in fading {
        for entity in entities {
            commands.entity(entity).insert((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Visibility::Hidden,
            ));
        }
    }
    commands.insert_resource(group);
}

/// Mirrors [`GroupOpacity`] onto visibility and the shared group materials.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn sync_fades(
    frame: Res<StageFrame>,
    group: Option<Res<GroupMaterials>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut members: Query<(&GroupOpacity, &mut Visibility), Changed<GroupOpacity>>,
) {
    for (opacity, mut visibility) in &mut members {
        visibility.set_if_neq(if opacity.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
    let Some(group) = group else {
        return;
    };
    for kind in [
        FadeGroup::Lamellae,
        FadeGroup::Setae,
        FadeGroup::DetailShaft,
        FadeGroup::Spatulae,
        FadeGroup::Molecules,
    ] {
        let fade = group_fade(&frame, kind);
        let Some(material) = group.get(kind).and_then(|handle| materials.get_mut(handle)) else {
            continue;
        };
        if (material.base_color.alpha() - fade.opacity).abs() > f32::EPSILON {
            material.base_color.set_alpha(fade.opacity);
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn draw_force_links(frame: Res<StageFrame>, mut gizmos: Gizmos) {
    let fade = frame.fades.force_links;
    if !fade.visible {
        return;
    }
    for link in &frame.links {
        gizmos.line_gradient(
            link.tip,
            link.anchor,
            rgba(link.tip_color, fade.opacity),
            rgba(link.anchor_color, fade.opacity),
        );
    }
}

pub(super) fn build(app: &mut App) {
    if !app.is_plugin_added::<PbrPlugin>() {
        log::debug!("no PBR renderer; zoom scene runs without meshes");
        return;
    }
    app.insert_resource(ClearColor(color(BACKGROUND)));
    app.add_systems(PostStartup, (attach_camera, attach_meshes));
    app.add_systems(
        Update,
        sync_fades
            .after(PresentationSet::Apply)
            .run_if(page_enabled(Page::Setae)),
    );
    if app.is_plugin_added::<bevy::gizmos::GizmoPlugin>() {
        app.add_systems(
            Update,
            draw_force_links
                .after(PresentationSet::Apply)
                .run_if(page_enabled(Page::Setae)),
        );
    }
}
