//! Lab configuration loaded from an optional TOML file.
//!
//! Every section falls back to built-in defaults, so an empty file and a
//! missing `--config` flag both yield [`LabConfig::default`].
//!
//! ```toml
//! [adhesion]
//! adhesion_stress_kpa = 120.0
//! bands = { hold = 1.2, warning = 1.0 }
//!
//! [presentation]
//! seed = 7
//! link_count = 24
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adhesion::AdhesionProfile;
use crate::constants::{
    AUTOPLAY_SPEED, CAMERA_SMOOTHING_RATE, DEFAULT_SCENE_SEED, FORCE_LINK_COUNT, MOLECULE_COUNT,
    SCROLL_STEP,
};
use crate::schedule::StageSchedule;
use crate::vdw::VdwModel;

/// Errors raised while loading a [`LabConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Named adhesion profile selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    /// 100 kPa with 1.3/1.0 bands.
    Conservative,
    /// 120 kPa with 1.2/1.0 bands.
    Tuned,
}

impl ProfileName {
    /// The profile this name stands for.
    #[must_use]
    pub fn profile(self) -> AdhesionProfile {
        match self {
            Self::Conservative => AdhesionProfile::conservative(),
            Self::Tuned => AdhesionProfile::tuned(),
        }
    }
}

/// Settings of the zoom presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Breakpoints and camera keyframes.
    pub schedule: StageSchedule,
    /// Seed for setae jitter and molecule placement.
    pub seed: u64,
    /// Camera rig interpolation rate per frame, in `(0, 1]`.
    pub smoothing_rate: f32,
    /// Setae sampled for force links.
    pub link_count: usize,
    /// Molecules scattered above the pad.
    pub molecule_count: usize,
    /// Progress per second while autoplaying.
    pub autoplay_speed: f32,
    /// Progress per scroll line.
    pub scroll_step: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            schedule: StageSchedule::default(),
            seed: DEFAULT_SCENE_SEED,
            smoothing_rate: CAMERA_SMOOTHING_RATE,
            link_count: FORCE_LINK_COUNT,
            molecule_count: MOLECULE_COUNT,
            autoplay_speed: AUTOPLAY_SPEED,
            scroll_step: SCROLL_STEP,
        }
    }
}

/// Complete lab configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Adhesive stress and status bands.
    pub adhesion: AdhesionProfile,
    /// Van der Waals model constants.
    pub vdw: VdwModel,
    /// Zoom presentation settings.
    pub presentation: PresentationConfig,
}

impl LabConfig {
    /// Loads the file at `path`, or returns defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the adhesion section with a named profile.
    #[must_use]
    pub fn with_profile(mut self, name: ProfileName) -> Self {
        self.adhesion = name.profile();
        self
    }

    /// Checks every range constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| Err(ConfigError::Invalid(message.to_owned()));
        let bands = &self.adhesion.bands;
        if !(self.adhesion.adhesion_stress_kpa.is_finite() && self.adhesion.adhesion_stress_kpa > 0.0)
        {
            return invalid("adhesion.adhesion_stress_kpa must be positive");
        }
        if !(bands.warning.is_finite() && bands.hold.is_finite()) || bands.warning > bands.hold {
            return invalid("adhesion.bands.warning must not exceed adhesion.bands.hold");
        }
        let vdw = &self.vdw;
        if !(vdw.reference_distance_nm.is_finite() && vdw.reference_distance_nm > 0.0) {
            return invalid("vdw.reference_distance_nm must be positive");
        }
        if !(vdw.max_distance_nm.is_finite() && vdw.max_distance_nm > vdw.reference_distance_nm) {
            return invalid("vdw.max_distance_nm must exceed vdw.reference_distance_nm");
        }
        if vdw.curve_samples == 0 {
            return invalid("vdw.curve_samples must be at least 1");
        }
        let indices_ordered = vdw.moderate_index > 0.0
            && vdw.moderate_index <= vdw.strong_index
            && vdw.strong_index <= 1.0;
        if !indices_ordered {
            return invalid("vdw indices must satisfy 0 < moderate_index <= strong_index <= 1");
        }
        let presentation = &self.presentation;
        if !presentation.schedule.is_well_formed() {
            return invalid("presentation.schedule.breakpoints must rise strictly from 0 to 1");
        }
        if !presentation.schedule.keyframes_finite() {
            return invalid("presentation.schedule.keyframes must be finite");
        }
        if !(presentation.smoothing_rate > 0.0 && presentation.smoothing_rate <= 1.0) {
            return invalid("presentation.smoothing_rate must lie in (0, 1]");
        }
        if !(presentation.autoplay_speed.is_finite() && presentation.autoplay_speed >= 0.0) {
            return invalid("presentation.autoplay_speed must be non-negative");
        }
        if !(presentation.scroll_step.is_finite() && presentation.scroll_step > 0.0) {
            return invalid("presentation.scroll_step must be positive");
        }
        Ok(())
    }
}
