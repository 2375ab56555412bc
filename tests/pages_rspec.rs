//! Behavioural tests for the schematic pages behind `GeckoLabPlugin`.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/lab_fixture.rs"]
mod lab_fixture;

use bevy::prelude::*;
use gecko_lab::config::{LabConfig, ProfileName};
use gecko_lab::controls::{MassPreset, SimulationAction, VdwAction};
use gecko_lab::diagnostics::LabDiagnostic;
use gecko_lab::pages::{
    GeckoLabPlugin, Page, PanelText, SchematicCanvas, SimulationInput, SimulationReadout,
    VdwInput, VdwReadoutState,
};
use gecko_lab::schematic::{DrawCommand, Viewport};
use gecko_lab::vdw::Regime;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;

#[derive(Debug, Clone)]
struct PageFixture {
    base: lab_fixture::LabAppFixture,
}

impl PageFixture {
    fn bootstrap(config: LabConfig, page: Page) -> Self {
        let mut app = App::new();
        app.insert_resource(SchematicCanvas::headless(Viewport::new(900.0, 520.0)));
        app.add_plugins(GeckoLabPlugin::new(config, page));
        Self {
            base: lab_fixture::LabAppFixture::new(app),
        }
    }

    fn simulate(&self, action: SimulationAction) {
        self.base.with_world(|world| world.trigger(SimulationInput(action)));
    }

    fn presented_frames(&self) -> u64 {
        self.base
            .app_guard()
            .world()
            .resource::<SchematicCanvas>()
            .presented_frames()
    }

    fn has_text(&self, wanted: &str) -> bool {
        self.base
            .app_guard()
            .world()
            .resource::<SchematicCanvas>()
            .frame()
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == wanted))
    }
}

#[test]
fn simulation_page_reports_and_draws() {
    let config = LabConfig::default().with_profile(ProfileName::Tuned);
    let fixture = PageFixture::bootstrap(config, Page::Simulation);

    run_serial(&rspec::given(
        "the force calculator under the tuned profile",
        fixture,
        |scenario: &mut Scenario<PageFixture>| {
            scenario.before_all(|state| state.base.tick());

            scenario.then("the default small dog holds", |state| {
                let readout = state.base.resource::<SimulationReadout>();
                assert_eq!(readout.weight, "78.48 N");
                assert_eq!(readout.adhesive, "108.00 N");
                assert_eq!(readout.safety_factor, "1.38");
                assert_eq!(readout.status_label(), "HOLD");
            });

            scenario.then("the panel lists the status", |state| {
                let panel = state.base.resource::<PanelText>();
                assert!(panel.lines().iter().any(|line| line == "Status: HOLD"));
            });

            scenario.then("a schematic frame is on the canvas", |state| {
                assert!(state.presented_frames() >= 1);
                assert!(state.has_text("Stable hold (+38%)"));
            });

            scenario.when("an adult human hangs from the tape", |ctx| {
                ctx.before_all(|state| {
                    state.simulate(SimulationAction::SelectMassPreset(MassPreset::AdultHuman));
                    state.base.tick_n(4);
                });

                ctx.then("the tape fails and slips", |state| {
                    let readout = state.base.resource::<SimulationReadout>();
                    assert_eq!(readout.status_label(), "FAIL");
                    assert!(state.has_text("Slip detected"));
                });
            });

            scenario.when("the canvas element goes missing", |ctx| {
                ctx.before_all(|state| {
                    state.base.with_world(|world| {
                        world.trigger(LabDiagnostic::MissingElement {
                            page: Page::Simulation,
                            element: "canvas".to_owned(),
                        });
                    });
                    state.base.tick();
                });

                ctx.then("drawing stops but the readout keeps updating", |state| {
                    let frames = state.presented_frames();
                    state.simulate(SimulationAction::SelectMassPreset(MassPreset::TokayGecko));
                    state.base.tick_n(3);
                    assert_eq!(state.presented_frames(), frames);
                    let readout = state.base.resource::<SimulationReadout>();
                    assert_eq!(readout.weight, "1.77 N");
                });

                ctx.then("the diagnostic is recorded once", |state| {
                    assert_eq!(state.base.diagnostics().len(), 1);
                });
            });
        },
    ));
}

#[test]
fn vdw_page_tracks_the_sliders() {
    let fixture = PageFixture::bootstrap(LabConfig::default(), Page::Vdw);

    run_serial(&rspec::given(
        "the van der Waals page",
        fixture,
        |scenario: &mut Scenario<PageFixture>| {
            scenario.before_all(|state| state.base.tick());

            scenario.when("the gap doubles from the reference distance", |ctx| {
                ctx.before_all(|state| {
                    state.base.with_world(|world| {
                        world.trigger(VdwInput(VdwAction::SetSeparation(0.6)));
                        world.trigger(VdwInput(VdwAction::SetContact(100.0)));
                    });
                    state.base.tick();
                });

                ctx.then("the force falls to a sixty-fourth", |state| {
                    let readout = state.base.resource::<VdwReadoutState>();
                    assert_eq!(readout.separation, "0.60");
                    assert_eq!(readout.relative_force, "0.02");
                    assert_eq!(readout.regime, Regime::Weak);
                    assert_eq!(readout.contact_spots, "24 / 24");
                });

                ctx.then("the marker is labelled", |state| {
                    assert!(state.has_text("r=0.60nm"));
                });
            });
        },
    ));
}
