#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the gecko adhesion lab.
//!
//! The physics kernels ([`adhesion`], [`vdw`]) and the zoom-presentation
//! maths ([`schedule`], [`setae`], [`stage`]) are plain functions over plain
//! data. The [`pages`] and [`presentation`] modules wrap them as Bevy plugins
//! for the binary and the integration tests.
pub mod adhesion;
pub mod camera_rig;
pub mod config;
pub mod constants;
pub mod controls;
pub mod diagnostics;
pub mod logging;
pub mod numeric;
pub mod pages;
pub mod palette;
pub mod presentation;
pub mod readout;
pub mod schedule;
pub mod schematic;
pub mod setae;
pub mod stage;
pub mod vdw;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use adhesion::{compute_forces, AdhesionProfile, ForceResult, HoldStatus, SimulationParameters};
pub use camera_rig::CameraRig;
pub use config::{ConfigError, LabConfig, ProfileName};
pub use diagnostics::{DiagnosticLog, DiagnosticsPlugin, LabDiagnostic};
pub use logging::init as init_logging;
pub use pages::{GeckoLabPlugin, Page};
pub use presentation::ZoomPresentationPlugin;
pub use schedule::{Stage, StageSchedule};
pub use setae::SceneLayout;
pub use stage::{StageOutputs, ZoomScene};
pub use vdw::{compute_vdw, Regime, VdwModel, VdwParameters, VdwResult};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use gecko_lab::prelude::*;
    //! ```

    pub use crate::compute_forces;
    pub use crate::compute_vdw;
    pub use crate::pages::{AdhesionPagePlugin, VdwPagePlugin};
    pub use crate::AdhesionProfile;
    pub use crate::GeckoLabPlugin;
    pub use crate::LabConfig;
    pub use crate::Page;
    pub use crate::SimulationParameters;
    pub use crate::VdwParameters;
    pub use crate::ZoomPresentationPlugin;
}
