//! Adhesion force calculator.
//!
//! Models a strip of gecko-inspired dry adhesive holding a hanging mass on a
//! vertical wall. The adhesive force is the constant adhesive stress acting
//! over the effective contact area (`F = σ·A·η`); the load is the weight of
//! the mass. Their ratio, the safety factor, is classified into three fixed
//! bands.
//!
//! Everything here is a pure function of [`SimulationParameters`]. Inputs are
//! coerced into safe ranges rather than rejected so the calculator never
//! divides by zero or produces `NaN` for UI-driven values.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CM2_TO_M2, CONSERVATIVE_ADHESION_STRESS_KPA, HOLD_THRESHOLD, KPA_TO_PA, MIN_MASS_KG,
    STANDARD_GRAVITY, TUNED_ADHESION_STRESS_KPA, TUNED_HOLD_THRESHOLD, WARNING_THRESHOLD,
};
use crate::palette::{Swatch, FAIL_RED, HOLD_GREEN, WARNING_AMBER};

/// Inputs to the force calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Hanging mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Contact area of the adhesive strip (cm²).
    pub contact_area_cm2: f64,
    /// Adhesive stress of the material (kPa).
    pub adhesion_stress_kpa: f64,
    /// Fraction of the nominal area in real contact, in `[0, 1]`.
    pub efficiency: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mass: 8.0,
            gravity: STANDARD_GRAVITY,
            contact_area_cm2: 10.0,
            adhesion_stress_kpa: CONSERVATIVE_ADHESION_STRESS_KPA,
            efficiency: 0.9,
        }
    }
}

impl SimulationParameters {
    /// Returns a copy with every field coerced into its safe range.
    ///
    /// Mass is floored to [`MIN_MASS_KG`], non-positive gravity or stress fall
    /// back to their defaults, area is floored at zero and efficiency is
    /// clamped into `[0, 1]`. Non-finite values take the same fallbacks.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let positive_or = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let mass = if self.mass.is_finite() {
            self.mass.max(MIN_MASS_KG)
        } else {
            MIN_MASS_KG
        };
        let contact_area_cm2 = if self.contact_area_cm2.is_finite() {
            self.contact_area_cm2.max(0.0)
        } else {
            0.0
        };
        Self {
            mass,
            gravity: positive_or(self.gravity, STANDARD_GRAVITY),
            contact_area_cm2,
            adhesion_stress_kpa: positive_or(
                self.adhesion_stress_kpa,
                CONSERVATIVE_ADHESION_STRESS_KPA,
            ),
            efficiency: crate::numeric::clamp01_f64(self.efficiency),
        }
    }

    /// Contact area in square metres.
    #[must_use]
    pub fn contact_area_m2(&self) -> f64 {
        self.contact_area_cm2 * CM2_TO_M2
    }
}

/// Output of [`compute_forces`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceResult {
    /// Weight of the hanging mass (N).
    pub weight_force: f64,
    /// Adhesive holding force (N).
    pub adhesive_force: f64,
    /// Ratio of adhesive force to weight; `f64::INFINITY` for a weightless load.
    pub safety_factor: f64,
    /// Weight spread over the contact area (Pa), absent for zero area.
    pub pressure_pa: Option<f64>,
}

impl ForceResult {
    /// Classifies the safety factor against `bands`.
    #[must_use]
    pub fn status(&self, bands: &SafetyBands) -> HoldStatus {
        bands.classify(self.safety_factor)
    }
}

/// Computes weight, adhesive force, safety factor and pressure.
///
/// # Examples
///
/// ```
/// use gecko_lab::adhesion::{compute_forces, SimulationParameters};
///
/// let result = compute_forces(SimulationParameters {
///     mass: 70.0,
///     gravity: 9.81,
///     contact_area_cm2: 10.0,
///     adhesion_stress_kpa: 100.0,
///     efficiency: 0.5,
/// });
/// assert!((result.weight_force - 686.7).abs() < 1e-9);
/// assert!((result.adhesive_force - 50.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_forces(params: SimulationParameters) -> ForceResult {
    let params = params.sanitized();
    let area_m2 = params.contact_area_m2();
    let weight_force = params.mass * params.gravity;
    let adhesion_stress_pa = params.adhesion_stress_kpa * KPA_TO_PA;
    let adhesive_force = adhesion_stress_pa * area_m2 * params.efficiency;
    let safety_factor = if weight_force > 0.0 {
        adhesive_force / weight_force
    } else {
        f64::INFINITY
    };
    let pressure_pa = (area_m2 > 0.0).then(|| weight_force / area_m2);
    ForceResult {
        weight_force,
        adhesive_force,
        safety_factor,
        pressure_pa,
    }
}

/// Qualitative outcome of a safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldStatus {
    /// The tape holds with margin.
    Hold,
    /// The tape holds but is near its limit.
    Warning,
    /// The tape slips.
    Fail,
}

impl HoldStatus {
    /// Upper-case label shown in the status readout.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Warning => "WARNING",
            Self::Fail => "FAIL",
        }
    }

    /// Colour from the shared status palette.
    #[must_use]
    pub const fn swatch(self) -> Swatch {
        match self {
            Self::Hold => HOLD_GREEN,
            Self::Warning => WARNING_AMBER,
            Self::Fail => FAIL_RED,
        }
    }
}

/// Safety-factor thresholds separating the three [`HoldStatus`] bands.
///
/// The bands are contiguous: `[hold, ∞)` holds, `[warning, hold)` warns and
/// everything below `warning` (including `NaN`) fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyBands {
    /// Lowest safety factor classified as [`HoldStatus::Hold`].
    pub hold: f64,
    /// Lowest safety factor classified as [`HoldStatus::Warning`].
    pub warning: f64,
}

impl Default for SafetyBands {
    fn default() -> Self {
        Self {
            hold: HOLD_THRESHOLD,
            warning: WARNING_THRESHOLD,
        }
    }
}

impl SafetyBands {
    /// Classifies a safety factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::adhesion::{HoldStatus, SafetyBands};
    /// let bands = SafetyBands::default();
    /// assert_eq!(bands.classify(1.3), HoldStatus::Hold);
    /// assert_eq!(bands.classify(1.0), HoldStatus::Warning);
    /// assert_eq!(bands.classify(0.99), HoldStatus::Fail);
    /// ```
    #[must_use]
    pub fn classify(&self, safety_factor: f64) -> HoldStatus {
        if safety_factor >= self.hold {
            HoldStatus::Hold
        } else if safety_factor >= self.warning {
            HoldStatus::Warning
        } else {
            HoldStatus::Fail
        }
    }
}

/// Named pairing of adhesive stress and safety bands.
///
/// The published calculators disagree on both numbers, so each variant is a
/// profile rather than a hardcoded branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdhesionProfile {
    /// Adhesive stress fed into the calculator (kPa).
    pub adhesion_stress_kpa: f64,
    /// Status thresholds.
    pub bands: SafetyBands,
}

impl Default for AdhesionProfile {
    fn default() -> Self {
        Self::conservative()
    }
}

impl AdhesionProfile {
    /// 100 kPa with 1.3/1.0 bands.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            adhesion_stress_kpa: CONSERVATIVE_ADHESION_STRESS_KPA,
            bands: SafetyBands::default(),
        }
    }

    /// 120 kPa with 1.2/1.0 bands.
    #[must_use]
    pub fn tuned() -> Self {
        Self {
            adhesion_stress_kpa: TUNED_ADHESION_STRESS_KPA,
            bands: SafetyBands {
                hold: TUNED_HOLD_THRESHOLD,
                warning: WARNING_THRESHOLD,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn params(mass: f64, area: f64, stress: f64, efficiency: f64) -> SimulationParameters {
        SimulationParameters {
            mass,
            gravity: STANDARD_GRAVITY,
            contact_area_cm2: area,
            adhesion_stress_kpa: stress,
            efficiency,
        }
    }

    #[rstest]
    #[case::zero_mass(0.0, MIN_MASS_KG)]
    #[case::negative_mass(-4.0, MIN_MASS_KG)]
    #[case::nan_mass(f64::NAN, MIN_MASS_KG)]
    #[case::valid_mass(2.5, 2.5)]
    fn mass_is_floored(#[case] mass: f64, #[case] expected: f64) {
        let sanitized = params(mass, 10.0, 100.0, 0.9).sanitized();
        assert_relative_eq!(sanitized.mass, expected);
    }

    #[test]
    fn efficiency_is_clamped() {
        assert_relative_eq!(params(1.0, 10.0, 100.0, 1.7).sanitized().efficiency, 1.0);
        assert_relative_eq!(params(1.0, 10.0, 100.0, -0.2).sanitized().efficiency, 0.0);
    }

    #[test]
    fn zero_area_has_no_pressure() {
        let result = compute_forces(params(1.0, 0.0, 100.0, 0.9));
        assert_eq!(result.pressure_pa, None);
        assert_relative_eq!(result.adhesive_force, 0.0);
        assert_eq!(result.status(&SafetyBands::default()), HoldStatus::Fail);
    }

    #[test]
    fn pressure_is_weight_over_area() {
        let result = compute_forces(params(10.0, 20.0, 100.0, 0.9));
        let pressure = result.pressure_pa.unwrap_or_default();
        assert_relative_eq!(pressure, 98.1 / 0.002, max_relative = 1e-12);
    }

    #[test]
    fn infinite_safety_factor_holds() {
        assert_eq!(
            SafetyBands::default().classify(f64::INFINITY),
            HoldStatus::Hold
        );
    }

    #[test]
    fn nan_safety_factor_fails() {
        assert_eq!(SafetyBands::default().classify(f64::NAN), HoldStatus::Fail);
    }

    #[rstest]
    #[case::conservative_hold(AdhesionProfile::conservative(), 1.25, HoldStatus::Warning)]
    #[case::tuned_hold(AdhesionProfile::tuned(), 1.25, HoldStatus::Hold)]
    #[case::both_warn(AdhesionProfile::tuned(), 1.0, HoldStatus::Warning)]
    fn profiles_apply_their_own_bands(
        #[case] profile: AdhesionProfile,
        #[case] safety_factor: f64,
        #[case] expected: HoldStatus,
    ) {
        assert_eq!(profile.bands.classify(safety_factor), expected);
    }

    #[test]
    fn status_labels_and_colours() {
        assert_eq!(HoldStatus::Hold.label(), "HOLD");
        assert_eq!(HoldStatus::Fail.swatch().hex(), "#f87171");
    }
}
