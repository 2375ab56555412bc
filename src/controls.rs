//! Control state for the calculator and van der Waals pages.
//!
//! Each page keeps its raw control values in a Bevy resource. Input handlers
//! only ever apply a [`SimulationAction`] or [`VdwAction`]; the physics reads
//! an immutable [`ParameterSnapshot`] captured once per update. Malformed
//! input never surfaces as an error: [`coerce_number`] substitutes a fallback.

use bevy::prelude::*;

use crate::adhesion::{AdhesionProfile, SimulationParameters};
use crate::constants::{MIN_MASS_KG, STANDARD_GRAVITY};
use crate::vdw::{VdwModel, VdwParameters};

/// Contact area slider range (cm²).
pub const AREA_RANGE_CM2: (f64, f64) = (1.0, 100.0);
/// Contact fraction slider range (%).
pub const CONTACT_RANGE_PERCENT: (f64, f64) = (0.0, 100.0);

/// Parses `raw` as a finite number, returning `fallback` otherwise.
///
/// # Examples
///
/// ```
/// use gecko_lab::controls::coerce_number;
/// assert_eq!(coerce_number(" 12.5 ", 1.0), 12.5);
/// assert_eq!(coerce_number("", 8.0), 8.0);
/// assert_eq!(coerce_number("heavy", 8.0), 8.0);
/// assert_eq!(coerce_number("inf", 8.0), 8.0);
/// ```
#[must_use]
pub fn coerce_number(raw: &str, fallback: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

/// Gravity presets offered next to the custom value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum GravityPreset {
    /// 9.81 m/s².
    Earth,
    /// 1.62 m/s².
    Moon,
    /// 3.71 m/s².
    Mars,
    /// 24.79 m/s².
    Jupiter,
}

impl GravityPreset {
    /// Presets in menu order.
    pub const ALL: [Self; 4] = [Self::Earth, Self::Moon, Self::Mars, Self::Jupiter];

    /// Surface gravity (m/s²).
    #[must_use]
    pub const fn acceleration(self) -> f64 {
        match self {
            Self::Earth => STANDARD_GRAVITY,
            Self::Moon => 1.62,
            Self::Mars => 3.71,
            Self::Jupiter => 24.79,
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
        }
    }

    /// The next preset in menu order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Earth => Self::Moon,
            Self::Moon => Self::Mars,
            Self::Mars => Self::Jupiter,
            Self::Jupiter => Self::Earth,
        }
    }
}

/// Mass presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MassPreset {
    /// Tokay gecko, 0.18 kg.
    TokayGecko,
    /// Small dog, 8 kg.
    SmallDog,
    /// Adult human, 70 kg.
    AdultHuman,
}

impl MassPreset {
    /// Presets in button order.
    pub const ALL: [Self; 3] = [Self::TokayGecko, Self::SmallDog, Self::AdultHuman];

    /// Mass (kg).
    #[must_use]
    pub const fn mass_kg(self) -> f64 {
        match self {
            Self::TokayGecko => 0.18,
            Self::SmallDog => 8.0,
            Self::AdultHuman => 70.0,
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TokayGecko => "Tokay gecko",
            Self::SmallDog => "Small dog",
            Self::AdultHuman => "Adult human",
        }
    }
}

/// Edits to the calculator controls.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationAction {
    /// Free-text mass entry; clears the active preset.
    SetMassText(String),
    /// Selects a mass preset.
    SelectMassPreset(MassPreset),
    /// Selects a gravity preset.
    SelectGravity(GravityPreset),
    /// Free-text custom gravity.
    SetCustomGravityText(String),
    /// Moves the contact area slider.
    SetArea(f64),
    /// Moves the efficiency slider.
    SetEfficiency(f64),
    /// Nudges the contact area slider.
    NudgeArea(f64),
    /// Nudges the efficiency slider.
    NudgeEfficiency(f64),
    /// Switches the adhesion profile.
    SelectProfile(AdhesionProfile),
}

/// Raw state of the force calculator controls.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationControls {
    mass_text: String,
    mass: f64,
    gravity: f64,
    gravity_preset: Option<GravityPreset>,
    area_cm2: f64,
    efficiency: f64,
    mass_preset: Option<MassPreset>,
    profile: AdhesionProfile,
}

impl Default for SimulationControls {
    fn default() -> Self {
        Self::with_profile(AdhesionProfile::default())
    }
}

impl SimulationControls {
    /// Default controls using `profile` for stress and bands.
    #[must_use]
    pub fn with_profile(profile: AdhesionProfile) -> Self {
        let defaults = SimulationParameters::default();
        Self {
            mass_text: defaults.mass.to_string(),
            mass: defaults.mass,
            gravity: defaults.gravity,
            gravity_preset: Some(GravityPreset::Earth),
            area_cm2: defaults.contact_area_cm2,
            efficiency: defaults.efficiency,
            mass_preset: Some(MassPreset::SmallDog),
            profile,
        }
    }

    /// Applies `action`, returning whether any value changed.
    pub fn apply(&mut self, action: SimulationAction) -> bool {
        let before = self.clone();
        match action {
            SimulationAction::SetMassText(text) => {
                self.mass = coerce_number(&text, MIN_MASS_KG).max(MIN_MASS_KG);
                self.mass_text = text;
                self.mass_preset = None;
            }
            SimulationAction::SelectMassPreset(preset) => {
                self.mass = preset.mass_kg();
                self.mass_text = self.mass.to_string();
                self.mass_preset = Some(preset);
            }
            SimulationAction::SelectGravity(preset) => {
                self.gravity = preset.acceleration();
                self.gravity_preset = Some(preset);
            }
            SimulationAction::SetCustomGravityText(text) => {
                let value = coerce_number(&text, self.gravity);
                self.gravity = if value > 0.0 { value } else { STANDARD_GRAVITY };
                self.gravity_preset = None;
            }
            SimulationAction::SetArea(area) => self.set_area(area),
            SimulationAction::SetEfficiency(efficiency) => self.set_efficiency(efficiency),
            SimulationAction::NudgeArea(delta) => self.set_area(self.area_cm2 + delta),
            SimulationAction::NudgeEfficiency(delta) => {
                self.set_efficiency(self.efficiency + delta);
            }
            SimulationAction::SelectProfile(profile) => self.profile = profile,
        }
        *self != before
    }

    fn set_area(&mut self, area: f64) {
        if area.is_finite() {
            self.area_cm2 = area.clamp(AREA_RANGE_CM2.0, AREA_RANGE_CM2.1);
        }
    }

    fn set_efficiency(&mut self, efficiency: f64) {
        if efficiency.is_finite() {
            self.efficiency = efficiency.clamp(0.0, 1.0);
        }
    }

    /// Mass text as typed.
    #[must_use]
    pub fn mass_text(&self) -> &str {
        &self.mass_text
    }

    /// Active gravity preset, `None` for a custom value.
    #[must_use]
    pub const fn gravity_preset(&self) -> Option<GravityPreset> {
        self.gravity_preset
    }

    /// Active mass preset, `None` once the mass has been edited by hand.
    #[must_use]
    pub const fn mass_preset(&self) -> Option<MassPreset> {
        self.mass_preset
    }

    /// Active adhesion profile.
    #[must_use]
    pub const fn profile(&self) -> &AdhesionProfile {
        &self.profile
    }

    /// Physics inputs implied by the current controls.
    #[must_use]
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            mass: self.mass,
            gravity: self.gravity,
            contact_area_cm2: self.area_cm2,
            adhesion_stress_kpa: self.profile.adhesion_stress_kpa,
            efficiency: self.efficiency,
        }
    }
}

/// Edits to the van der Waals controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VdwAction {
    /// Moves the separation slider (nm).
    SetSeparation(f64),
    /// Moves the contact fraction slider (%).
    SetContact(f64),
    /// Nudges the separation slider.
    NudgeSeparation(f64),
    /// Nudges the contact fraction slider.
    NudgeContact(f64),
    /// Closes the gap to the reference distance.
    SnapToZeroGap,
    /// Shows or hides the numeric plot labels.
    ToggleOverlay,
}

/// Raw state of the van der Waals controls.
///
/// The separation slider spans the plotted domain of the model it was built
/// for, from the reference distance up to the maximum distance.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct VdwControls {
    separation_nm: f64,
    contact_percent: f64,
    overlay: bool,
    min_separation_nm: f64,
    max_separation_nm: f64,
}

impl Default for VdwControls {
    fn default() -> Self {
        Self::for_model(&VdwModel::default())
    }
}

impl VdwControls {
    /// Controls whose separation slider covers `model`'s plotted domain.
    #[must_use]
    pub fn for_model(model: &VdwModel) -> Self {
        let defaults = VdwParameters::default();
        let min_separation_nm = model.reference_distance_nm;
        let max_separation_nm = model.max_distance_nm.max(min_separation_nm);
        Self {
            separation_nm: defaults
                .separation_nm
                .max(min_separation_nm)
                .min(max_separation_nm),
            contact_percent: defaults.contact_fraction_percent,
            overlay: true,
            min_separation_nm,
            max_separation_nm,
        }
    }

    /// Lower and upper bound of the separation slider (nm).
    #[must_use]
    pub const fn separation_range(&self) -> (f64, f64) {
        (self.min_separation_nm, self.max_separation_nm)
    }

    /// Applies `action`, returning whether any value changed.
    pub fn apply(&mut self, action: VdwAction) -> bool {
        let before = *self;
        match action {
            VdwAction::SetSeparation(value) => self.set_separation(value),
            VdwAction::SetContact(value) => self.set_contact(value),
            VdwAction::NudgeSeparation(delta) => self.set_separation(self.separation_nm + delta),
            VdwAction::NudgeContact(delta) => self.set_contact(self.contact_percent + delta),
            VdwAction::SnapToZeroGap => self.separation_nm = self.min_separation_nm,
            VdwAction::ToggleOverlay => self.overlay = !self.overlay,
        }
        *self != before
    }

    fn set_separation(&mut self, value: f64) {
        if value.is_finite() {
            self.separation_nm = value.max(self.min_separation_nm).min(self.max_separation_nm);
        }
    }

    fn set_contact(&mut self, value: f64) {
        if value.is_finite() {
            self.contact_percent = value.clamp(CONTACT_RANGE_PERCENT.0, CONTACT_RANGE_PERCENT.1);
        }
    }

    /// Whether numeric labels are drawn on the plot.
    #[must_use]
    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    /// Model inputs implied by the current controls.
    #[must_use]
    pub const fn parameters(&self) -> VdwParameters {
        VdwParameters {
            separation_nm: self.separation_nm,
            contact_fraction_percent: self.contact_percent,
        }
    }
}

/// Immutable view of every control, captured once per update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Force calculator inputs.
    pub simulation: SimulationParameters,
    /// Adhesion profile in force for classification.
    pub profile: AdhesionProfile,
    /// Van der Waals inputs.
    pub vdw: VdwParameters,
    /// Whether numeric plot labels are drawn.
    pub overlay: bool,
}

impl ParameterSnapshot {
    /// Captures both control sets.
    #[must_use]
    pub fn capture(simulation: &SimulationControls, vdw: &VdwControls) -> Self {
        Self {
            simulation: simulation.parameters(),
            profile: *simulation.profile(),
            vdw: vdw.parameters(),
            overlay: vdw.overlay(),
        }
    }
}

/// Keyboard binding for the calculator page.
#[must_use]
pub fn simulation_action_for_key(key: KeyCode, current: &SimulationControls) -> Option<SimulationAction> {
    match key {
        KeyCode::Digit1 => Some(SimulationAction::SelectMassPreset(MassPreset::TokayGecko)),
        KeyCode::Digit2 => Some(SimulationAction::SelectMassPreset(MassPreset::SmallDog)),
        KeyCode::Digit3 => Some(SimulationAction::SelectMassPreset(MassPreset::AdultHuman)),
        KeyCode::KeyG => Some(SimulationAction::SelectGravity(
            current
                .gravity_preset()
                .map_or(GravityPreset::Earth, GravityPreset::next),
        )),
        KeyCode::ArrowRight => Some(SimulationAction::NudgeArea(1.0)),
        KeyCode::ArrowLeft => Some(SimulationAction::NudgeArea(-1.0)),
        KeyCode::ArrowUp => Some(SimulationAction::NudgeEfficiency(0.01)),
        KeyCode::ArrowDown => Some(SimulationAction::NudgeEfficiency(-0.01)),
        KeyCode::KeyP => Some(SimulationAction::SelectProfile(
            if *current.profile() == AdhesionProfile::tuned() {
                AdhesionProfile::conservative()
            } else {
                AdhesionProfile::tuned()
            },
        )),
        _ => None,
    }
}

/// Keyboard binding for the van der Waals page.
#[must_use]
pub const fn vdw_action_for_key(key: KeyCode) -> Option<VdwAction> {
    match key {
        KeyCode::ArrowRight => Some(VdwAction::NudgeSeparation(0.01)),
        KeyCode::ArrowLeft => Some(VdwAction::NudgeSeparation(-0.01)),
        KeyCode::ArrowUp => Some(VdwAction::NudgeContact(1.0)),
        KeyCode::ArrowDown => Some(VdwAction::NudgeContact(-1.0)),
        KeyCode::KeyZ => Some(VdwAction::SnapToZeroGap),
        KeyCode::KeyO => Some(VdwAction::ToggleOverlay),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{VDW_MAX_DISTANCE_NM, VDW_REFERENCE_DISTANCE_NM};
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("70", 70.0)]
    #[case("  0.18", 0.18)]
    #[case("", 8.0)]
    #[case("abc", 8.0)]
    #[case("NaN", 8.0)]
    #[case("-inf", 8.0)]
    fn coercion(#[case] raw: &str, #[case] expected: f64) {
        assert_relative_eq!(coerce_number(raw, 8.0), expected);
    }

    #[test]
    fn editing_mass_clears_preset() {
        let mut controls = SimulationControls::default();
        assert_eq!(controls.mass_preset(), Some(MassPreset::SmallDog));
        assert!(controls.apply(SimulationAction::SetMassText("12".to_owned())));
        assert_eq!(controls.mass_preset(), None);
        assert_relative_eq!(controls.parameters().mass, 12.0);
    }

    #[test]
    fn bad_mass_text_floors_to_minimum() {
        let mut controls = SimulationControls::default();
        controls.apply(SimulationAction::SetMassText("oops".to_owned()));
        assert_relative_eq!(controls.parameters().mass, MIN_MASS_KG);
        assert_eq!(controls.mass_text(), "oops");
    }

    #[test]
    fn presets_set_mass_and_gravity() {
        let mut controls = SimulationControls::default();
        controls.apply(SimulationAction::SelectMassPreset(MassPreset::AdultHuman));
        controls.apply(SimulationAction::SelectGravity(GravityPreset::Moon));
        let params = controls.parameters();
        assert_relative_eq!(params.mass, 70.0);
        assert_relative_eq!(params.gravity, 1.62);
        assert_eq!(controls.mass_text(), "70");
    }

    #[test]
    fn custom_gravity_rejects_non_positive() {
        let mut controls = SimulationControls::default();
        controls.apply(SimulationAction::SetCustomGravityText("-3".to_owned()));
        assert_relative_eq!(controls.parameters().gravity, STANDARD_GRAVITY);
        assert_eq!(controls.gravity_preset(), None);
    }

    #[test]
    fn sliders_clamp_to_their_range() {
        let mut controls = SimulationControls::default();
        controls.apply(SimulationAction::SetArea(500.0));
        controls.apply(SimulationAction::NudgeEfficiency(4.0));
        let params = controls.parameters();
        assert_relative_eq!(params.contact_area_cm2, 100.0);
        assert_relative_eq!(params.efficiency, 1.0);
        assert!(!controls.apply(SimulationAction::NudgeArea(1.0)));
    }

    #[test]
    fn snap_to_zero_gap_uses_reference_distance() {
        let mut controls = VdwControls::default();
        assert!(controls.apply(VdwAction::SnapToZeroGap));
        assert_relative_eq!(controls.parameters().separation_nm, VDW_REFERENCE_DISTANCE_NM);
        assert!(!controls.apply(VdwAction::SnapToZeroGap));
    }

    #[test]
    fn separation_stays_in_plotted_domain() {
        let mut controls = VdwControls::default();
        controls.apply(VdwAction::SetSeparation(0.0));
        assert_relative_eq!(controls.parameters().separation_nm, VDW_REFERENCE_DISTANCE_NM);
        controls.apply(VdwAction::NudgeSeparation(10.0));
        assert_relative_eq!(controls.parameters().separation_nm, VDW_MAX_DISTANCE_NM);
    }

    #[test]
    fn separation_follows_a_wider_model() {
        let model = VdwModel {
            reference_distance_nm: 0.5,
            max_distance_nm: 4.0,
            ..VdwModel::default()
        };
        let mut controls = VdwControls::for_model(&model);
        assert_eq!(controls.separation_range(), (0.5, 4.0));

        controls.apply(VdwAction::SnapToZeroGap);
        let at_gap = controls.parameters();
        assert_relative_eq!(at_gap.separation_nm, 0.5);
        assert_relative_eq!(model.evaluate(at_gap).relative_force, 1.0, epsilon = 1e-12);

        controls.apply(VdwAction::SetSeparation(10.0));
        assert_relative_eq!(controls.parameters().separation_nm, 4.0);
        controls.apply(VdwAction::SetSeparation(3.0));
        assert_relative_eq!(controls.parameters().separation_nm, 3.0);
    }

    #[test]
    fn initial_separation_sits_inside_a_narrow_model() {
        let model = VdwModel {
            reference_distance_nm: 0.8,
            max_distance_nm: 1.5,
            ..VdwModel::default()
        };
        let separation = VdwControls::for_model(&model).parameters().separation_nm;
        assert!((0.8..=1.5).contains(&separation), "got {separation}");
    }

    #[test]
    fn overlay_toggles() {
        let mut controls = VdwControls::default();
        let before = controls.overlay();
        controls.apply(VdwAction::ToggleOverlay);
        assert_ne!(controls.overlay(), before);
    }

    #[test]
    fn snapshot_reflects_profile() {
        let mut simulation = SimulationControls::default();
        simulation.apply(SimulationAction::SelectProfile(AdhesionProfile::tuned()));
        let snapshot = ParameterSnapshot::capture(&simulation, &VdwControls::default());
        assert_relative_eq!(snapshot.simulation.adhesion_stress_kpa, 120.0);
        assert_eq!(snapshot.profile, AdhesionProfile::tuned());
    }

    #[rstest]
    #[case(KeyCode::KeyZ, Some(VdwAction::SnapToZeroGap))]
    #[case(KeyCode::KeyO, Some(VdwAction::ToggleOverlay))]
    #[case(KeyCode::Space, None)]
    fn vdw_keys(#[case] key: KeyCode, #[case] expected: Option<VdwAction>) {
        assert_eq!(vdw_action_for_key(key), expected);
    }

    #[test]
    fn gravity_key_cycles_presets() {
        let controls = SimulationControls::default();
        assert_eq!(
            simulation_action_for_key(KeyCode::KeyG, &controls),
            Some(SimulationAction::SelectGravity(GravityPreset::Moon))
        );
    }
}
