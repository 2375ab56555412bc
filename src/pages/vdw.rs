//! Van der Waals page: separation and contact sliders driving the force plot.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use super::canvas::{report_outcome, PageDriver, SchematicCanvas};
use super::panel::{update_panel, PanelText};
use super::{init_shared, page_enabled, LabSettings, Page, PageSet, Snapshot};
use crate::controls::{vdw_action_for_key, VdwAction, VdwControls};
use crate::readout::VdwReadout;
use crate::schematic::{plot, PlotInputs};

/// Requests an edit of the van der Waals controls.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct VdwInput(pub VdwAction);

/// Formatted results of the latest evaluation.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deref)]
pub struct VdwReadoutState(pub VdwReadout);

fn apply(controls: &mut ResMut<VdwControls>, action: VdwAction) {
    if controls.bypass_change_detection().apply(action) {
        controls.set_changed();
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_vdw_input(event: On<VdwInput>, mut controls: ResMut<VdwControls>) {
    apply(&mut controls, event.event().0);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn read_vdw_keys(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<VdwControls>) {
    for action in keys.get_just_pressed().filter_map(|key| vdw_action_for_key(*key)) {
        apply(&mut controls, action);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn refresh_vdw_readout(
    snapshot: Res<Snapshot>,
    settings: Res<LabSettings>,
    mut readout: ResMut<VdwReadoutState>,
    mut panel: ResMut<PanelText>,
    mut driver: ResMut<PageDriver>,
) {
    let result = settings.vdw.evaluate(snapshot.vdw);
    let next = VdwReadout::new(&snapshot.vdw, &result);
    debug!(
        "r = {} nm, contact {}%: relative force {}, index {} ({:?})",
        next.separation, next.contact, next.relative_force, next.adhesion_index, next.regime
    );
    update_panel(
        &mut panel,
        vec![
            format!("Separation: {} nm", next.separation),
            format!("Contact: {}%", next.contact),
            format!("Relative force: {}", next.relative_force),
            format!("Adhesion index: {}", next.adhesion_index),
            format!("Micro-contacts: {}", next.contact_spots),
            next.chip_text().to_owned(),
        ],
    );
    readout.0 = next;
    driver.mark_dirty();
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn present_plot(
    mut commands: Commands,
    snapshot: Res<Snapshot>,
    settings: Res<LabSettings>,
    mut driver: ResMut<PageDriver>,
    mut canvas: ResMut<SchematicCanvas>,
) {
    let inputs = PlotInputs {
        model: settings.vdw,
        params: snapshot.vdw,
        overlay: snapshot.overlay,
    };
    let outcome = driver.present(&mut *canvas, |viewport, list| {
        plot::draw(list, viewport, &inputs);
    });
    report_outcome(&mut commands, Page::Vdw, outcome);
}

/// Van der Waals page.
#[derive(Debug)]
pub struct VdwPagePlugin;

impl Plugin for VdwPagePlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<VdwReadoutState>() {
            return;
        }
        init_shared(app);
        let params = app.world().resource::<Snapshot>().vdw;
        let model = app.world().resource::<LabSettings>().vdw;
        app.insert_resource(VdwReadoutState(VdwReadout::new(
            &params,
            &model.evaluate(params),
        )));
        app.add_observer(apply_vdw_input);
        app.add_systems(
            Update,
            (
                read_vdw_keys.in_set(PageSet::Input),
                refresh_vdw_readout
                    .in_set(PageSet::Readout)
                    .run_if(resource_changed::<Snapshot>),
                present_plot
                    .in_set(PageSet::Present)
                    .run_if(page_enabled(Page::Vdw)),
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
    use crate::vdw::Regime;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(SchematicCanvas::headless(Viewport::new(900.0, 420.0)));
        app.add_plugins(VdwPagePlugin);
        app.update();
        app
    }

    fn has_marker_label(app: &App) -> bool {
        app.world()
            .resource::<SchematicCanvas>()
            .frame()
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { text, .. } if text.starts_with("r=")))
    }

    #[test]
    fn snap_to_zero_gap_reaches_strong_regime() {
        let mut app = app();
        app.world_mut().trigger(VdwInput(VdwAction::SetContact(100.0)));
        app.world_mut().trigger(VdwInput(VdwAction::SnapToZeroGap));
        app.update();
        let readout = app.world().resource::<VdwReadoutState>();
        assert_eq!(readout.separation, "0.30");
        assert_eq!(readout.relative_force, "1.00");
        assert_eq!(readout.regime, Regime::Strong);
    }

    #[test]
    fn overlay_toggle_redraws_without_labels() {
        let mut app = app();
        assert!(has_marker_label(&app));
        app.world_mut().trigger(VdwInput(VdwAction::ToggleOverlay));
        app.update();
        assert!(!has_marker_label(&app));
    }

    #[test]
    fn arrow_keys_nudge_separation() {
        let mut app = app();
        let before = app.world().resource::<VdwControls>().parameters().separation_nm;
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowRight);
        app.update();
        let after = app.world().resource::<VdwControls>().parameters().separation_nm;
        approx::assert_relative_eq!(after - before, 0.01, epsilon = 1e-9);
    }
}
