//! Van der Waals contact model.
//!
//! Relative attraction between a spatula and the substrate falls off with the
//! inverse sixth power of their separation. Forces are normalised so the
//! closest plotted separation (the reference distance) reads `1.0`; the
//! adhesion index further weights that by the fraction of micro-contacts
//! actually touching.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MICRO_CONTACT_DOTS, VDW_CURVE_SAMPLES, VDW_MAX_DISTANCE_NM, VDW_MODERATE_INDEX,
    VDW_REFERENCE_DISTANCE_NM, VDW_SEPARATION_FLOOR_NM, VDW_STRONG_INDEX,
};
use crate::numeric::{clamp01_f64, round_to_u32};
use crate::palette::{Swatch, FAIL_RED, HOLD_GREEN, WARNING_AMBER};

/// Inputs to [`compute_vdw`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VdwParameters {
    /// Gap between spatula and substrate (nm).
    pub separation_nm: f64,
    /// Share of micro-contacts touching the substrate, in `[0, 100]`.
    pub contact_fraction_percent: f64,
}

impl Default for VdwParameters {
    fn default() -> Self {
        Self {
            separation_nm: 0.6,
            contact_fraction_percent: 75.0,
        }
    }
}

/// Qualitative adhesion regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Little usable adhesion.
    Weak,
    /// Near the useful threshold.
    Moderate,
    /// Strong adhesion window.
    Strong,
}

impl Regime {
    /// Short label shown next to the index.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }

    /// Longer description shown in the status chip.
    #[must_use]
    pub const fn chip_text(self) -> &'static str {
        match self {
            Self::Weak => "Low adhesion / likely slip",
            Self::Moderate => "Balanced / near threshold",
            Self::Strong => "High adhesion window",
        }
    }

    /// Chip colour from the shared status palette.
    #[must_use]
    pub const fn swatch(self) -> Swatch {
        match self {
            Self::Weak => FAIL_RED,
            Self::Moderate => WARNING_AMBER,
            Self::Strong => HOLD_GREEN,
        }
    }
}

/// Output of [`compute_vdw`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VdwResult {
    /// `(reference / separation)^6`; `1.0` at the reference distance.
    pub relative_force: f64,
    /// Relative force weighted by contact fraction, clamped into `[0, 1]`.
    pub adhesion_index: f64,
    /// Regime implied by the adhesion index.
    pub regime: Regime,
}

/// Tunable constants of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdwModel {
    /// Separation at which the relative force is `1.0` (nm).
    pub reference_distance_nm: f64,
    /// Right edge of the plotted domain (nm).
    pub max_distance_nm: f64,
    /// Curve segments across the plotted domain.
    pub curve_samples: usize,
    /// Lowest index classified as [`Regime::Strong`].
    pub strong_index: f64,
    /// Lowest index classified as [`Regime::Moderate`].
    pub moderate_index: f64,
}

impl Default for VdwModel {
    fn default() -> Self {
        Self {
            reference_distance_nm: VDW_REFERENCE_DISTANCE_NM,
            max_distance_nm: VDW_MAX_DISTANCE_NM,
            curve_samples: VDW_CURVE_SAMPLES,
            strong_index: VDW_STRONG_INDEX,
            moderate_index: VDW_MODERATE_INDEX,
        }
    }
}

/// One sample of the plotted curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Position across the plotted domain, in `[0, 1]`.
    pub t: f64,
    /// Separation at this sample (nm).
    pub separation_nm: f64,
    /// Relative force at this sample.
    pub relative_force: f64,
}

impl VdwModel {
    /// Relative force at `separation_nm`, flooring the separation at
    /// [`VDW_SEPARATION_FLOOR_NM`] before exponentiation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::vdw::VdwModel;
    /// let model = VdwModel::default();
    /// assert!((model.relative_force(0.3) - 1.0).abs() < 1e-12);
    /// assert!((model.relative_force(0.6) - 1.0 / 64.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn relative_force(&self, separation_nm: f64) -> f64 {
        let separation = if separation_nm.is_finite() {
            separation_nm.max(VDW_SEPARATION_FLOOR_NM)
        } else {
            self.max_distance_nm
        };
        (self.reference_distance_nm / separation).powi(6)
    }

    /// Classifies an adhesion index.
    #[must_use]
    pub fn regime(&self, adhesion_index: f64) -> Regime {
        if adhesion_index >= self.strong_index {
            Regime::Strong
        } else if adhesion_index >= self.moderate_index {
            Regime::Moderate
        } else {
            Regime::Weak
        }
    }

    /// Evaluates the model for a parameter set.
    #[must_use]
    pub fn evaluate(&self, params: VdwParameters) -> VdwResult {
        let relative_force = self.relative_force(params.separation_nm);
        let at_reference = self.relative_force(self.reference_distance_nm);
        let contact = contact_fraction(params.contact_fraction_percent);
        let adhesion_index = clamp01_f64(relative_force / at_reference * contact);
        VdwResult {
            relative_force,
            adhesion_index,
            regime: self.regime(adhesion_index),
        }
    }

    /// Samples the curve at `curve_samples + 1` evenly spaced separations
    /// across `[reference_distance_nm, max_distance_nm]`.
    pub fn curve(&self) -> impl Iterator<Item = CurveSample> + '_ {
        let samples = self.curve_samples.max(1);
        (0..=samples).map(move |i| {
            let t = ratio(i, samples);
            let separation_nm = self.position_to_separation(t);
            CurveSample {
                t,
                separation_nm,
                relative_force: self.relative_force(separation_nm),
            }
        })
    }

    /// Separation at fraction `t` of the plotted domain.
    #[must_use]
    pub fn position_to_separation(&self, t: f64) -> f64 {
        (self.max_distance_nm - self.reference_distance_nm).mul_add(t, self.reference_distance_nm)
    }

    /// Fraction of the plotted domain at which `separation_nm` sits.
    #[must_use]
    pub fn separation_to_position(&self, separation_nm: f64) -> f64 {
        let span = self.max_distance_nm - self.reference_distance_nm;
        if span <= 0.0 {
            return 0.0;
        }
        (separation_nm - self.reference_distance_nm) / span
    }
}

/// Evaluates the default model.
///
/// # Examples
///
/// ```
/// use gecko_lab::vdw::{compute_vdw, Regime, VdwParameters};
/// let result = compute_vdw(VdwParameters { separation_nm: 0.3, contact_fraction_percent: 100.0 });
/// assert_eq!(result.regime, Regime::Strong);
/// ```
#[must_use]
pub fn compute_vdw(params: VdwParameters) -> VdwResult {
    VdwModel::default().evaluate(params)
}

/// Number of lit dots in the micro-contact panel.
#[must_use]
pub fn active_contacts(contact_fraction_percent: f64) -> u32 {
    round_to_u32(contact_fraction(contact_fraction_percent) * f64::from(MICRO_CONTACT_DOTS))
}

fn contact_fraction(percent: f64) -> f64 {
    clamp01_f64(percent / 100.0)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Sample counts are small enough to be exact in f64."
)]
fn ratio(index: usize, total: usize) -> f64 {
    index as f64 / total as f64
}
