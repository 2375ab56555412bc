//! Toe-pad zoom presentation plugin.
//!
//! `ZoomPresentationPlugin` owns the camera and scene entities of the setae
//! page. A single [`PresentationProgress`] value, fed by the mouse wheel,
//! the play/stop toggle or [`PresentationInput`] events, is evaluated by
//! [`ZoomScene`] into a [`StageFrame`]; apply systems then copy that frame
//! onto entity transforms and [`GroupOpacity`] components. Only the camera
//! carries state between frames, through the smoothed [`CameraRig`].
//!
//! Mesh and material attachment, lighting and force-link drawing live in
//! the `render` feature; everything else runs headless.

mod scene;

#[cfg(feature = "render")]
mod render;

use bevy::ecs::prelude::On;
use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use log::info;

use crate::camera_rig::CameraRig;
use crate::config::PresentationConfig;
use crate::diagnostics::{DiagnosticsPlugin, LabDiagnostic};
use crate::numeric::clamp01;
use crate::pages::panel::{update_panel, PanelText};
use crate::pages::{page_enabled, LabSettings, Page};
use crate::schedule::Stage;
use crate::setae::{InstanceTransform, SceneLayout};
use crate::stage::{Fade, StageOutputs, ZoomScene};

pub use scene::{FadeGroup, GroupOpacity, Lamella, Molecule, Substrate, ToePart};

/// Pixels of wheel travel treated as one scroll line.
const PIXELS_PER_LINE: f32 = 40.0;

/// Marker component for the presentation camera.
///
/// Exactly one such entity is expected; it is spawned at startup and driven
/// only by the [`CameraRig`].
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct CameraController;

/// Root of the toe lobes and pad.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ToeRoot;

/// Seta at an index of the scene layout.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct SetaInstance(pub usize);

/// Spatula plate at an index of the focus fan.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct SpatulaInstance(pub usize);

/// Magnified shaft of the focused seta.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct DetailShaft;

/// Presentation progress in `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PresentationProgress(f32);

impl PresentationProgress {
    /// Current progress.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Sets the progress, clamped to `[0, 1]`.
    pub fn set(&mut self, progress: f32) {
        self.0 = clamp01(progress);
    }

    /// Moves the progress by `delta`, clamped to `[0, 1]`.
    pub fn advance(&mut self, delta: f32) {
        self.set(self.0 + delta);
    }
}

/// Autoplay state.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Playback {
    /// Whether progress advances with the frame clock.
    pub playing: bool,
}

/// Scroll and autoplay rates.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Progress per second while playing.
    pub autoplay_speed: f32,
    /// Progress per scroll line.
    pub scroll_step: f32,
}

impl From<&PresentationConfig> for PlaybackSettings {
    fn from(config: &PresentationConfig) -> Self {
        Self {
            autoplay_speed: config.autoplay_speed,
            scroll_step: config.scroll_step,
        }
    }
}

/// The evaluated scene layout and schedule.
#[derive(Resource, Debug, Clone, Deref)]
pub struct ActiveScene(pub ZoomScene);

/// Outputs of the latest stage evaluation.
#[derive(Resource, Debug, Clone, Deref)]
pub struct StageFrame(pub StageOutputs);

/// Smoothed camera state.
#[derive(Resource, Debug, Clone, Copy, Deref, DerefMut)]
pub struct CameraRigState(pub CameraRig);

/// Requests a change of progress or playback.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PresentationInput {
    /// Jumps to a progress value.
    SetProgress(f32),
    /// Scrolls by a number of lines; positive moves forward.
    Scroll(f32),
    /// Starts autoplay.
    Play,
    /// Stops autoplay before the next advance.
    Stop,
    /// Flips between play and stop.
    TogglePlayback,
}

/// Ordering of the presentation systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationSet {
    /// Scroll, keys and autoplay.
    Input,
    /// Stage evaluation.
    Evaluate,
    /// Copying the frame onto entities.
    Apply,
}

fn set_playing(playback: &mut Playback, playing: bool) {
    if playback.playing != playing {
        playback.playing = playing;
        info!("presentation {}", if playing { "playing" } else { "stopped" });
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_presentation_input(
    event: On<PresentationInput>,
    settings: Res<PlaybackSettings>,
    mut progress: ResMut<PresentationProgress>,
    mut playback: ResMut<Playback>,
) {
    match *event.event() {
        PresentationInput::SetProgress(value) => progress.set(value),
        PresentationInput::Scroll(lines) => progress.advance(lines * settings.scroll_step),
        PresentationInput::Play => set_playing(&mut playback, true),
        PresentationInput::Stop => set_playing(&mut playback, false),
        PresentationInput::TogglePlayback => {
            let playing = !playback.playing;
            set_playing(&mut playback, playing);
        }
    }
}

/// Wheel travel in lines; scrolling down moves the presentation forward.
#[must_use]
pub fn scroll_lines(delta_y: f32, unit: MouseScrollUnit) -> f32 {
    match unit {
        MouseScrollUnit::Line => -delta_y,
        MouseScrollUnit::Pixel => -delta_y / PIXELS_PER_LINE,
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn read_scroll(
    scroll: Option<Res<AccumulatedMouseScroll>>,
    settings: Res<PlaybackSettings>,
    mut progress: ResMut<PresentationProgress>,
) {
    let Some(scroll) = scroll else {
        return;
    };
    if scroll.delta.y == 0.0 {
        return;
    }
    progress.advance(scroll_lines(scroll.delta.y, scroll.unit) * settings.scroll_step);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn read_playback_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut progress: ResMut<PresentationProgress>,
    mut playback: ResMut<Playback>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let playing = !playback.playing;
        set_playing(&mut playback, playing);
    }
    if keys.just_pressed(KeyCode::Home) {
        progress.set(0.0);
    }
    if keys.just_pressed(KeyCode::End) {
        progress.set(1.0);
    }
}

/// Advances progress while playing and stops at the end.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn autoplay(
    time: Res<Time>,
    settings: Res<PlaybackSettings>,
    mut progress: ResMut<PresentationProgress>,
    mut playback: ResMut<Playback>,
) {
    if !playback.playing {
        return;
    }
    progress.advance(settings.autoplay_speed * time.delta_secs());
    if progress.get() >= 1.0 {
        set_playing(&mut playback, false);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn evaluate_stage(
    progress: Res<PresentationProgress>,
    scene: Res<ActiveScene>,
    mut frame: ResMut<StageFrame>,
    mut panel: ResMut<PanelText>,
) {
    let previous = frame.stage;
    scene.compute_stage_into(progress.get(), &mut frame.0);
    if frame.stage != previous {
        info!("entering stage {}: {}", frame.stage.index() + 1, frame.stage.caption().label);
    }
    update_panel(&mut panel, caption_lines(frame.stage, frame.progress));
}

/// Side-panel text for a stage.
#[must_use]
pub fn caption_lines(stage: Stage, progress: f32) -> Vec<String> {
    let caption = stage.caption();
    vec![
        format!("Stage {} of {}: {}", stage.index() + 1, Stage::ALL.len(), caption.label),
        caption.title.to_owned(),
        caption.bullet.to_owned(),
        format!("Progress {:.0}%", progress * 100.0),
    ]
}

/// Converts a scene transform into a Bevy transform.
#[must_use]
pub fn to_transform(instance: &InstanceTransform) -> Transform {
    Transform {
        translation: instance.translation,
        rotation: instance.rotation,
        scale: instance.scale,
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn drive_camera(
    mut commands: Commands,
    frame: Res<StageFrame>,
    mut rig: ResMut<CameraRigState>,
    mut cameras: Query<&mut Transform, With<CameraController>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        commands.trigger(missing("CameraController"));
        return;
    };
    let pose = rig.advance(frame.camera);
    *transform = Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn apply_setae(frame: Res<StageFrame>, mut setae: Query<(&SetaInstance, &mut Transform)>) {
    for (SetaInstance(index), mut transform) in &mut setae {
        if let Some(pose) = frame.setae.get(*index) {
            *transform = to_transform(pose);
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn apply_focus(
    frame: Res<StageFrame>,
    mut spatulae: Query<(&SpatulaInstance, &mut Transform), Without<DetailShaft>>,
    mut shafts: Query<&mut Transform, With<DetailShaft>>,
) {
    for (SpatulaInstance(index), mut transform) in &mut spatulae {
        if let Some(plate) = frame.focus.spatulae.get(*index) {
            *transform = to_transform(&plate.transform);
        }
    }
    for mut transform in &mut shafts {
        *transform = to_transform(&frame.focus.shaft);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn apply_toe(frame: Res<StageFrame>, mut toes: Query<&mut Transform, With<ToeRoot>>) {
    for mut transform in &mut toes {
        transform.translation = frame.toe_position;
    }
}

/// Fade of `group` in a frame.
#[must_use]
pub const fn group_fade(frame: &StageOutputs, group: FadeGroup) -> Fade {
    let fades = &frame.fades;
    match group {
        FadeGroup::Lamellae => fades.lamellae,
        FadeGroup::Setae => fades.setae,
        FadeGroup::DetailShaft => fades.detail_shaft,
        FadeGroup::Spatulae => fades.spatulae,
        FadeGroup::Molecules => fades.molecules,
        FadeGroup::ForceLinks => fades.force_links,
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn apply_fades(frame: Res<StageFrame>, mut groups: Query<(&FadeGroup, &mut GroupOpacity)>) {
    for (group, mut opacity) in &mut groups {
        let fade = group_fade(&frame, *group);
        let next = GroupOpacity {
            opacity: fade.opacity,
            visible: fade.visible,
        };
        if *opacity != next {
            *opacity = next;
        }
    }
}

fn missing(element: &str) -> LabDiagnostic {
    LabDiagnostic::MissingElement {
        page: Page::Setae,
        element: element.to_owned(),
    }
}

/// Reports scene elements the presentation cannot run without.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn verify_scene(
    mut commands: Commands,
    scene: Res<ActiveScene>,
    cameras: Query<(), With<CameraController>>,
    toes: Query<(), With<ToeRoot>>,
    setae: Query<(), With<SetaInstance>>,
    shafts: Query<(), With<DetailShaft>>,
) {
    let checks = [
        ("CameraController", cameras.iter().count() == 1),
        ("ToeRoot", !toes.is_empty()),
        ("SetaInstance", setae.iter().count() == scene.layout().field.len()),
        ("DetailShaft", !shafts.is_empty()),
    ];
    for (element, present) in checks {
        if !present {
            commands.trigger(missing(element));
        }
    }
}

/// Plugin owning the zoom presentation camera, scene and stage systems.
///
/// Reads [`LabSettings`] when present, otherwise runs on defaults.
///
/// ```ignore
/// use bevy::prelude::*;
/// use gecko_lab::presentation::ZoomPresentationPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ZoomPresentationPlugin)
///     .run();
/// ```
#[derive(Debug)]
pub struct ZoomPresentationPlugin;

impl Plugin for ZoomPresentationPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<ActiveScene>() {
            return;
        }
        app.add_plugins(DiagnosticsPlugin);
        app.init_resource::<LabSettings>();
        let config = app.world().resource::<LabSettings>().presentation;
        let layout = SceneLayout::generate(config.seed, config.molecule_count);
        let scene = ZoomScene::with_link_count(layout, config.schedule, config.link_count);
        let frame = scene.compute_stage(0.0);
        let rig = CameraRig::with_rate(frame.camera, config.smoothing_rate);

        app.register_type::<CameraController>()
            .register_type::<ToeRoot>()
            .register_type::<SetaInstance>()
            .register_type::<SpatulaInstance>()
            .register_type::<DetailShaft>()
            .register_type::<ToePart>()
            .register_type::<FadeGroup>()
            .register_type::<GroupOpacity>();
        app.insert_resource(PlaybackSettings::from(&config))
            .insert_resource(CameraRigState(rig))
            .insert_resource(StageFrame(frame))
            .insert_resource(ActiveScene(scene))
            .init_resource::<PresentationProgress>()
            .init_resource::<Playback>()
            .init_resource::<PanelText>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Time>();

        app.add_observer(apply_presentation_input);
        app.add_systems(Startup, scene::spawn_scene);
        app.add_systems(PostStartup, verify_scene);
        app.configure_sets(
            Update,
            (
                PresentationSet::Input,
                PresentationSet::Evaluate,
                PresentationSet::Apply,
            )
                .chain()
                .run_if(page_enabled(Page::Setae)),
        );
        app.add_systems(
            Update,
            (
                (read_scroll, read_playback_keys, autoplay)
                    .chain()
                    .in_set(PresentationSet::Input),
                evaluate_stage
                    .in_set(PresentationSet::Evaluate)
                    .run_if(resource_changed::<PresentationProgress>),
                drive_camera.in_set(PresentationSet::Apply),
                (apply_setae, apply_focus, apply_toe, apply_fades)
                    .in_set(PresentationSet::Apply)
                    .run_if(resource_changed::<StageFrame>),
            ),
        );

        #[cfg(feature = "render")]
        render::build(app);
    }

    fn is_unique(&self) -> bool {
        false
    }
}
