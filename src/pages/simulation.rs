//! Force calculator page.
//!
//! Keyboard bindings and [`SimulationInput`] events edit
//! [`SimulationControls`]; each captured snapshot is turned into a
//! [`SimulationReadout`] and the wall-and-tape schematic. While the safety
//! factor is below one the schematic keeps redrawing so the tape can slip.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use super::canvas::{report_outcome, PageDriver, SchematicCanvas};
use super::panel::{update_panel, PanelText};
use super::{init_shared, page_enabled, Page, PageSet, Snapshot};
use crate::adhesion::compute_forces;
use crate::controls::{
    simulation_action_for_key, GravityPreset, MassPreset, SimulationAction, SimulationControls,
};
use crate::readout::ForceReadout;
use crate::schematic::{build_tape_frame, SlipState};

/// Requests an edit of the calculator controls.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SimulationInput(pub SimulationAction);

/// Formatted results of the latest calculation.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deref)]
pub struct SimulationReadout(pub ForceReadout);

/// Slip offset of the tape schematic carried between frames.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct TapeSlip(pub SlipState);

fn apply(controls: &mut ResMut<SimulationControls>, action: SimulationAction) {
    if controls.bypass_change_detection().apply(action) {
        controls.set_changed();
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_simulation_input(event: On<SimulationInput>, mut controls: ResMut<SimulationControls>) {
    apply(&mut controls, event.event().0.clone());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn read_simulation_keys(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<SimulationControls>) {
    for key in keys.get_just_pressed() {
        if let Some(action) = simulation_action_for_key(*key, &controls) {
            apply(&mut controls, action);
        }
    }
}

fn panel_lines(controls: &SimulationControls, readout: &ForceReadout) -> Vec<String> {
    let gravity = controls
        .gravity_preset()
        .map_or("Custom", GravityPreset::label);
    let mass = controls
        .mass_preset()
        .map_or("Custom", MassPreset::label);
    vec![
        format!("Mass: {} kg ({mass})", controls.mass_text()),
        format!("Gravity: {gravity}"),
        format!("Weight: {}", readout.weight),
        format!("Adhesion: {}", readout.adhesive),
        format!("Safety factor: {}", readout.safety_factor),
        format!("Pressure: {}", readout.pressure),
        format!("Status: {}", readout.status_label()),
    ]
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn refresh_simulation_readout(
    snapshot: Res<Snapshot>,
    controls: Res<SimulationControls>,
    mut readout: ResMut<SimulationReadout>,
    mut panel: ResMut<PanelText>,
    mut driver: ResMut<PageDriver>,
) {
    let result = compute_forces(snapshot.simulation);
    let next = ForceReadout::new(&result, &snapshot.profile.bands);
    debug!(
        "weight {} adhesion {} safety factor {} ({})",
        next.weight,
        next.adhesive,
        next.safety_factor,
        next.status_label()
    );
    update_panel(&mut panel, panel_lines(&controls, &next));
    readout.0 = next;
    driver.mark_dirty();
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn present_tape(
    mut commands: Commands,
    snapshot: Res<Snapshot>,
    mut slip: ResMut<TapeSlip>,
    mut driver: ResMut<PageDriver>,
    mut canvas: ResMut<SchematicCanvas>,
) {
    let params = snapshot.simulation;
    let profile = snapshot.profile;
    if slip.is_moving() || compute_forces(params).safety_factor < 1.0 {
        driver.mark_dirty();
    }
    let outcome = driver.present(&mut *canvas, |viewport, list| {
        build_tape_frame(list, viewport, &params, &profile, &mut slip.0);
    });
    report_outcome(&mut commands, Page::Simulation, outcome);
}

/// Force calculator page.
#[derive(Debug)]
pub struct AdhesionPagePlugin;

impl Plugin for AdhesionPagePlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<TapeSlip>() {
            return;
        }
        init_shared(app);
        let snapshot = app.world().resource::<Snapshot>().0;
        let initial = ForceReadout::new(
            &compute_forces(snapshot.simulation),
            &snapshot.profile.bands,
        );
        app.insert_resource(SimulationReadout(initial));
        app.init_resource::<TapeSlip>();
        app.add_observer(apply_simulation_input);
        app.add_systems(
            Update,
            (
                read_simulation_keys.in_set(PageSet::Input),
                refresh_simulation_readout
                    .in_set(PageSet::Readout)
                    .run_if(resource_changed::<Snapshot>),
                present_tape
                    .in_set(PageSet::Present)
                    .run_if(page_enabled(Page::Simulation)),
            ),
        );
    }

    fn is_unique(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schematic::{DrawCommand, Viewport};

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(SchematicCanvas::headless(Viewport::new(800.0, 600.0)));
        app.add_plugins(AdhesionPagePlugin);
        app
    }

    #[test]
    fn default_controls_read_as_warning() {
        let mut app = app();
        app.update();
        let readout = app.world().resource::<SimulationReadout>();
        assert_eq!(readout.weight, "78.48 N");
        assert_eq!(readout.status_label(), "WARNING");
    }

    #[test]
    fn input_event_reaches_readout() {
        let mut app = app();
        app.update();
        app.world_mut().trigger(SimulationInput(SimulationAction::SelectMassPreset(
            MassPreset::AdultHuman,
        )));
        app.update();
        let readout = app.world().resource::<SimulationReadout>();
        assert_eq!(readout.weight, "686.70 N");
        assert_eq!(readout.status_label(), "FAIL");
    }

    #[test]
    fn failing_load_keeps_slipping() {
        let mut app = app();
        app.world_mut().trigger(SimulationInput(SimulationAction::SelectMassPreset(
            MassPreset::AdultHuman,
        )));
        for _ in 0..6 {
            app.update();
        }
        assert!(app.world().resource::<TapeSlip>().offset() > 5.0);
        let canvas = app.world().resource::<SchematicCanvas>();
        assert!(canvas.frame().iter().any(|command| matches!(
            command,
            DrawCommand::Text { text, .. } if text == "Slip detected"
        )));
    }

    #[test]
    fn key_press_selects_preset() {
        let mut app = app();
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit1);
        app.update();
        let controls = app.world().resource::<SimulationControls>();
        assert_eq!(controls.mass_preset(), Some(MassPreset::TokayGecko));
    }
}
