//! The three lab pages and the plugin that selects one.
//!
//! Each page is a Bevy plugin. The schematic pages share a
//! [`ParameterSnapshot`] captured once per update from the control
//! resources; the zoom presentation lives in [`crate::presentation`].

pub mod canvas;
pub mod panel;
pub mod simulation;
pub mod vdw;

use std::fmt;

use bevy::prelude::*;
use clap::ValueEnum;

use crate::config::LabConfig;
use crate::controls::{ParameterSnapshot, SimulationControls, VdwControls};
use crate::diagnostics::{DiagnosticLog, DiagnosticsPlugin};
use crate::presentation::ZoomPresentationPlugin;

pub use canvas::{PageDriver, SchematicCanvas};
pub use panel::PanelText;
pub use simulation::{AdhesionPagePlugin, SimulationInput, SimulationReadout, TapeSlip};
pub use vdw::{VdwInput, VdwPagePlugin, VdwReadoutState};

/// A lab page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Page {
    /// Force calculator with the tape schematic.
    Simulation,
    /// Van der Waals force plot.
    Vdw,
    /// Toe-pad zoom presentation.
    #[default]
    Setae,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simulation => "simulation",
            Self::Vdw => "vdw",
            Self::Setae => "setae",
        })
    }
}

/// Page shown by this app.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deref)]
pub struct ActivePage(pub Page);

/// Configuration in force.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Deref)]
pub struct LabSettings(pub LabConfig);

/// Control values captured for the current update.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deref)]
pub struct Snapshot(pub ParameterSnapshot);

/// Ordering of the page systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSet {
    /// Keyboard and pointer handling.
    Input,
    /// Snapshot capture.
    Capture,
    /// Readout formatting.
    Readout,
    /// Drawing.
    Present,
}

/// Run condition that is `false` once a diagnostic has disabled `page`.
pub fn page_enabled(page: Page) -> impl FnMut(Option<Res<DiagnosticLog>>) -> bool + Clone {
    move |log: Option<Res<DiagnosticLog>>| log.is_none_or(|log| !log.is_disabled(page))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn capture_snapshot(
    simulation: Res<SimulationControls>,
    vdw: Res<VdwControls>,
    mut snapshot: ResMut<Snapshot>,
) {
    snapshot.0 = ParameterSnapshot::capture(&simulation, &vdw);
}

/// Installs the resources and ordering shared by the schematic pages.
pub(crate) fn init_shared(app: &mut App) {
    if app.world().contains_resource::<Snapshot>() {
        return;
    }
    app.add_plugins(DiagnosticsPlugin);
    app.init_resource::<LabSettings>();
    let LabConfig { adhesion, vdw, .. } = app.world().resource::<LabSettings>().0;
    if !app.world().contains_resource::<SimulationControls>() {
        app.insert_resource(SimulationControls::with_profile(adhesion));
    }
    if !app.world().contains_resource::<VdwControls>() {
        app.insert_resource(VdwControls::for_model(&vdw));
    }
    app.init_resource::<PanelText>();
    app.init_resource::<ButtonInput<KeyCode>>();
    let snapshot = ParameterSnapshot::capture(
        app.world().resource::<SimulationControls>(),
        app.world().resource::<VdwControls>(),
    );
    app.insert_resource(Snapshot(snapshot));
    app.configure_sets(
        Update,
        (
            PageSet::Input,
            PageSet::Capture,
            PageSet::Readout,
            PageSet::Present,
        )
            .chain(),
    );
    app.add_systems(
        Update,
        capture_snapshot.in_set(PageSet::Capture).run_if(
            resource_changed::<SimulationControls>.or(resource_changed::<VdwControls>),
        ),
    );
    canvas::init_canvas(app);
}

/// Builds the app for one page from a configuration.
///
/// ```no_run
/// use bevy::prelude::*;
/// use gecko_lab::config::LabConfig;
/// use gecko_lab::pages::{GeckoLabPlugin, Page};
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(GeckoLabPlugin::new(LabConfig::default(), Page::Vdw))
///     .run();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeckoLabPlugin {
    config: LabConfig,
    page: Page,
}

impl GeckoLabPlugin {
    /// A plugin showing `page` under `config`.
    #[must_use]
    pub const fn new(config: LabConfig, page: Page) -> Self {
        Self { config, page }
    }
}

impl Plugin for GeckoLabPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LabSettings(self.config));
        app.insert_resource(ActivePage(self.page));
        app.add_plugins(DiagnosticsPlugin);
        log::info!("showing the {} page", self.page);
        match self.page {
            Page::Simulation => {
                app.add_plugins(AdhesionPagePlugin);
            }
            Page::Vdw => {
                app.add_plugins(VdwPagePlugin);
            }
            Page::Setae => {
                app.add_plugins(ZoomPresentationPlugin);
            }
        }
        #[cfg(feature = "text")]
        app.add_plugins(panel::ReadoutPanelPlugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Page::Simulation, "simulation")]
    #[case(Page::Vdw, "vdw")]
    #[case(Page::Setae, "setae")]
    fn display_matches_cli_name(#[case] page: Page, #[case] name: &str) {
        assert_eq!(page.to_string(), name);
        assert_eq!(Page::from_str(name, true), Ok(page));
    }

    #[derive(Resource, Default)]
    struct Ticks(u32);

    fn tick(mut ticks: ResMut<Ticks>) {
        ticks.0 += 1;
    }

    #[test]
    fn disabled_page_stops_its_systems() {
        let mut app = App::new();
        app.add_plugins(DiagnosticsPlugin);
        app.init_resource::<Ticks>();
        app.add_systems(Update, tick.run_if(page_enabled(Page::Vdw)));
        app.update();
        app.world_mut()
            .trigger(crate::diagnostics::LabDiagnostic::MissingElement {
                page: Page::Vdw,
                element: "canvas".to_owned(),
            });
        app.update();
        app.update();
        assert_eq!(app.world().resource::<Ticks>().0, 1);
    }
}
