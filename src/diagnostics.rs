//! Runtime diagnostics raised by the lab pages.
//!
//! Faults are triggered as [`LabDiagnostic`] events. An observer logs each
//! distinct diagnostic once and records it in [`DiagnosticLog`], which the
//! pages consult to switch off only the affected feature.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, warn};
use thiserror::Error;

use crate::pages::Page;

/// A fault that disables part of a page.
#[derive(Event, Debug, Clone, PartialEq, Eq, Error)]
pub enum LabDiagnostic {
    /// An entity the page relies on was never spawned or was despawned.
    #[error("{page} page: required element `{element}` is missing")]
    MissingElement {
        /// Affected page.
        page: Page,
        /// Name of the missing element.
        element: String,
    },
    /// The drawing surface could not be used.
    #[error("{page} page: rendering unavailable: {detail}")]
    RenderContextUnavailable {
        /// Affected page.
        page: Page,
        /// Backend detail.
        detail: String,
    },
    /// The configuration file was rejected and defaults are in use.
    #[error("configuration rejected, using defaults: {0}")]
    InvalidConfig(String),
}

impl LabDiagnostic {
    /// Page disabled by this diagnostic, if any.
    #[must_use]
    pub const fn page(&self) -> Option<Page> {
        match self {
            Self::MissingElement { page, .. } | Self::RenderContextUnavailable { page, .. } => {
                Some(*page)
            }
            Self::InvalidConfig(_) => None,
        }
    }
}

/// Every distinct diagnostic reported so far.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticLog {
    entries: Vec<LabDiagnostic>,
}

impl DiagnosticLog {
    /// Records `diagnostic`, returning `false` if it was already known.
    pub fn record(&mut self, diagnostic: &LabDiagnostic) -> bool {
        if self.entries.contains(diagnostic) {
            return false;
        }
        self.entries.push(diagnostic.clone());
        true
    }

    /// Recorded diagnostics, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LabDiagnostic] {
        &self.entries
    }

    /// Whether a diagnostic has switched `page` off.
    #[must_use]
    pub fn is_disabled(&self, page: Page) -> bool {
        self.entries.iter().any(|entry| entry.page() == Some(page))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn report_diagnostic(event: On<LabDiagnostic>, mut log: ResMut<DiagnosticLog>) {
    let diagnostic = event.event();
    if !log.record(diagnostic) {
        return;
    }
    match diagnostic {
        LabDiagnostic::InvalidConfig(_) => warn!("{diagnostic}"),
        LabDiagnostic::MissingElement { .. } | LabDiagnostic::RenderContextUnavailable { .. } => {
            error!("{diagnostic}");
        }
    }
}

/// Installs the diagnostic observer and log.
#[derive(Debug)]
pub struct DiagnosticsPlugin;

impl Plugin for DiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<DiagnosticLog>() {
            return;
        }
        app.init_resource::<DiagnosticLog>();
        app.add_observer(report_diagnostic);
    }

    fn is_unique(&self) -> bool {
        false
    }
}
