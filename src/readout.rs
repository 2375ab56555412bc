//! Text readouts for the calculator and van der Waals pages.

use crate::adhesion::{ForceResult, HoldStatus, SafetyBands};
use crate::constants::{KPA_TO_PA, MICRO_CONTACT_DOTS};
use crate::palette::Swatch;
use crate::vdw::{active_contacts, Regime, VdwParameters, VdwResult};

/// Shown when a value has no meaningful reading.
pub const PLACEHOLDER: &str = "--";

/// Formats a newton value to two decimals.
#[must_use]
pub fn format_newtons(value: f64) -> String {
    format!("{value:.2} N")
}

/// Formats a safety factor, using `∞` for a weightless load.
///
/// # Examples
///
/// ```
/// use gecko_lab::readout::format_safety_factor;
/// assert_eq!(format_safety_factor(1.376), "1.38");
/// assert_eq!(format_safety_factor(f64::INFINITY), "∞");
/// ```
#[must_use]
pub fn format_safety_factor(value: f64) -> String {
    if value.is_infinite() && value.is_sign_positive() {
        "∞".to_owned()
    } else if value.is_nan() {
        PLACEHOLDER.to_owned()
    } else {
        format!("{value:.2}")
    }
}

/// Formats a pressure in pascals as kilopascals.
#[must_use]
pub fn format_pressure(pressure_pa: Option<f64>) -> String {
    pressure_pa.map_or_else(
        || PLACEHOLDER.to_owned(),
        |pa| format!("{:.2} kPa", pa / KPA_TO_PA),
    )
}

/// Display strings for one force calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceReadout {
    /// Weight of the hanging mass.
    pub weight: String,
    /// Adhesive holding force.
    pub adhesive: String,
    /// Safety factor.
    pub safety_factor: String,
    /// Contact pressure.
    pub pressure: String,
    /// Hold classification.
    pub status: HoldStatus,
    /// Colour of the status label.
    pub status_color: Swatch,
}

impl ForceReadout {
    /// Formats `result`, classifying it against `bands`.
    #[must_use]
    pub fn new(result: &ForceResult, bands: &SafetyBands) -> Self {
        let status = result.status(bands);
        Self {
            weight: format_newtons(result.weight_force),
            adhesive: format_newtons(result.adhesive_force),
            safety_factor: format_safety_factor(result.safety_factor),
            pressure: format_pressure(result.pressure_pa),
            status,
            status_color: status.swatch(),
        }
    }

    /// Status label, e.g. `HOLD`.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// Display strings for one van der Waals evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdwReadout {
    /// Separation slider value.
    pub separation: String,
    /// Contact fraction slider value.
    pub contact: String,
    /// Relative force.
    pub relative_force: String,
    /// Adhesion index.
    pub adhesion_index: String,
    /// Lit micro-contacts, e.g. `18 / 24`.
    pub contact_spots: String,
    /// Regime classification.
    pub regime: Regime,
}

impl VdwReadout {
    /// Formats `result` for the inputs that produced it.
    #[must_use]
    pub fn new(params: &VdwParameters, result: &VdwResult) -> Self {
        Self {
            separation: format!("{:.2}", params.separation_nm),
            contact: format!("{:.0}", params.contact_fraction_percent),
            relative_force: format!("{:.2}", result.relative_force),
            adhesion_index: format!("{:.3}", result.adhesion_index),
            contact_spots: format!(
                "{} / {MICRO_CONTACT_DOTS}",
                active_contacts(params.contact_fraction_percent)
            ),
            regime: result.regime,
        }
    }

    /// Status chip text.
    #[must_use]
    pub const fn chip_text(&self) -> &'static str {
        self.regime.chip_text()
    }

    /// Status chip colour.
    #[must_use]
    pub const fn chip_color(&self) -> Swatch {
        self.regime.swatch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adhesion::{compute_forces, SimulationParameters};
    use crate::palette::{FAIL_RED, HOLD_GREEN};
    use crate::vdw::compute_vdw;

    #[test]
    fn default_calculation_reads_hold() {
        let result = compute_forces(SimulationParameters::default());
        let readout = ForceReadout::new(&result, &SafetyBands::default());
        assert_eq!(readout.weight, "78.48 N");
        assert_eq!(readout.adhesive, "90.00 N");
        assert_eq!(readout.safety_factor, "1.15");
        assert_eq!(readout.status_label(), "WARNING");
        assert_eq!(readout.pressure, "78.48 kPa");
    }

    #[test]
    fn heavy_load_reads_fail() {
        let result = compute_forces(SimulationParameters {
            mass: 70.0,
            efficiency: 0.5,
            ..SimulationParameters::default()
        });
        let readout = ForceReadout::new(&result, &SafetyBands::default());
        assert_eq!(readout.weight, "686.70 N");
        assert_eq!(readout.status, HoldStatus::Fail);
        assert_eq!(readout.status_color, FAIL_RED);
    }

    #[test]
    fn missing_pressure_uses_placeholder() {
        assert_eq!(format_pressure(None), PLACEHOLDER);
        assert_eq!(format_safety_factor(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn default_vdw_readout() {
        let params = VdwParameters::default();
        let readout = VdwReadout::new(&params, &compute_vdw(params));
        assert_eq!(readout.separation, "0.60");
        assert_eq!(readout.contact, "75");
        assert_eq!(readout.relative_force, "0.02");
        assert_eq!(readout.adhesion_index, "0.012");
        assert_eq!(readout.contact_spots, "18 / 24");
        assert_eq!(readout.chip_text(), "Low adhesion / likely slip");
    }

    #[test]
    fn contact_at_reference_is_strong() {
        let params = VdwParameters {
            separation_nm: 0.3,
            contact_fraction_percent: 100.0,
        };
        let readout = VdwReadout::new(&params, &compute_vdw(params));
        assert_eq!(readout.relative_force, "1.00");
        assert_eq!(readout.chip_color(), HOLD_GREEN);
    }
}
