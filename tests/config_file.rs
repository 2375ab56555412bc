//! Configuration files flowing into the running pages.

use std::io::Write;

use bevy::prelude::*;
use gecko_lab::config::LabConfig;
use gecko_lab::controls::VdwAction;
use gecko_lab::pages::{GeckoLabPlugin, Page, SimulationReadout, VdwInput, VdwReadoutState};
use gecko_lab::presentation::{PresentationInput, StageFrame};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap_or_else(|e| panic!("temp file: {e}"));
    file.write_all(text.as_bytes())
        .unwrap_or_else(|e| panic!("write config: {e}"));
    file
}

fn load(text: &str) -> LabConfig {
    let file = write_config(text);
    LabConfig::load(Some(file.path())).unwrap_or_else(|e| panic!("load config: {e}"))
}

#[test]
fn adhesion_section_reaches_the_calculator() {
    let config = load(
        r"
        [adhesion]
        adhesion_stress_kpa = 120.0
        bands = { hold = 1.2, warning = 1.0 }
        ",
    );
    let mut app = App::new();
    app.add_plugins(GeckoLabPlugin::new(config, Page::Simulation));
    app.update();

    let readout = app.world().resource::<SimulationReadout>();
    assert_eq!(readout.adhesive, "108.00 N");
    assert_eq!(readout.status_label(), "HOLD");
}

#[test]
fn presentation_section_sizes_the_force_links() {
    let config = load(
        r"
        [presentation]
        seed = 7
        link_count = 12
        ",
    );
    let mut app = App::new();
    app.add_plugins(GeckoLabPlugin::new(config, Page::Setae));
    app.update();
    app.world_mut().trigger(PresentationInput::SetProgress(1.0));
    app.update();

    let frame = app.world().resource::<StageFrame>();
    assert_eq!(frame.links.len(), 12);
    assert!(frame.links.iter().all(|link| link.intensity <= 1.2));
}

#[test]
fn vdw_section_bounds_the_separation_slider() {
    let config = load(
        r"
        [vdw]
        reference_distance_nm = 0.5
        max_distance_nm = 4.0
        ",
    );
    let mut app = App::new();
    app.add_plugins(GeckoLabPlugin::new(config, Page::Vdw));
    app.update();

    app.world_mut().trigger(VdwInput(VdwAction::SetContact(100.0)));
    app.world_mut().trigger(VdwInput(VdwAction::SnapToZeroGap));
    app.update();
    let readout = app.world().resource::<VdwReadoutState>();
    assert_eq!(readout.separation, "0.50");
    assert_eq!(readout.relative_force, "1.00");

    app.world_mut().trigger(VdwInput(VdwAction::SetSeparation(10.0)));
    app.update();
    assert_eq!(app.world().resource::<VdwReadoutState>().separation, "4.00");
}

#[test]
fn rejected_file_reports_its_path() {
    let file = write_config("[presentation]\nsmoothing_rate = 0.0\n");
    let Err(err) = LabConfig::load(Some(file.path())) else {
        panic!("zero smoothing rate should be rejected");
    };
    assert!(err.to_string().contains("smoothing_rate"));
}
