//! Physics and presentation constants shared across the lab pages.
//!
//! Values that differ between the published page variants are kept side by
//! side; [`crate::config::LabConfig`] decides which set is active.

/// Standard gravitational acceleration at the Earth's surface (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;
/// Conversion factor from square centimetres to square metres.
pub const CM2_TO_M2: f64 = 1e-4;
/// Conversion factor from kilopascals to pascals.
pub const KPA_TO_PA: f64 = 1000.0;
/// Smallest mass accepted by the force calculator (kg).
pub const MIN_MASS_KG: f64 = 0.01;

/// Adhesive stress used by the conservative calculator variant (kPa).
pub const CONSERVATIVE_ADHESION_STRESS_KPA: f64 = 100.0;
/// Adhesive stress used by the tuned calculator variant (kPa).
pub const TUNED_ADHESION_STRESS_KPA: f64 = 120.0;
/// Safety factor at or above which the tape holds.
pub const HOLD_THRESHOLD: f64 = 1.3;
/// Hold threshold used by the tuned calculator variant.
pub const TUNED_HOLD_THRESHOLD: f64 = 1.2;
/// Safety factor at or above which the tape is near its limit.
pub const WARNING_THRESHOLD: f64 = 1.0;

/// Smallest separation for which the van der Waals curve is plotted (nm).
pub const VDW_REFERENCE_DISTANCE_NM: f64 = 0.3;
/// Largest separation for which the van der Waals curve is plotted (nm).
pub const VDW_MAX_DISTANCE_NM: f64 = 2.0;
/// Separation floor applied before raising to the sixth power (nm).
pub const VDW_SEPARATION_FLOOR_NM: f64 = 0.01;
/// Number of curve segments drawn across the plotted domain.
pub const VDW_CURVE_SAMPLES: usize = 260;
/// Adhesion index at or above which contact counts as strong.
pub const VDW_STRONG_INDEX: f64 = 0.55;
/// Adhesion index at or above which contact counts as moderate.
pub const VDW_MODERATE_INDEX: f64 = 0.25;
/// Micro-contact dots drawn in the contact panel.
pub const MICRO_CONTACT_DOTS: u32 = 24;

/// Progress breakpoints splitting the zoom presentation into five stages.
pub const STAGE_BREAKPOINTS: [f32; 6] = [0.0, 0.2, 0.42, 0.72, 0.88, 1.0];
/// Lamella ridges across the toe pad.
pub const LAMELLA_COUNT: usize = 6;
/// Ridge length along the pad.
pub const LAMELLA_LENGTH: f32 = 70.0;
/// Ridge width across the pad.
pub const LAMELLA_WIDTH: f32 = 8.0;
/// Setae rows along each lamella.
pub const SETAE_PER_LAMELLA_X: usize = 12;
/// Setae columns across each lamella.
pub const SETAE_PER_LAMELLA_Z: usize = 6;
/// Total setae in the field.
pub const SETAE_COUNT: usize = LAMELLA_COUNT * SETAE_PER_LAMELLA_X * SETAE_PER_LAMELLA_Z;
/// Rendered length of a seta before growth starts.
pub const COLLAPSED_SETA_LENGTH: f32 = 0.02;
/// Spatula plates fanned around the focused seta.
pub const SPATULA_COUNT: usize = 18;
/// Opacity below which a fading group is hidden outright.
pub const FADE_VISIBILITY_EPSILON: f32 = 0.02;
/// Molecules scattered above the pad.
pub const MOLECULE_COUNT: usize = 72;
/// Force links drawn between seta tips and molecules.
pub const FORCE_LINK_COUNT: usize = 40;
/// Gain of the inverse-sixth intensity used for force links.
pub const FORCE_LINK_GAIN: f32 = 200_000.0;
/// Upper bound on force-link intensity.
pub const FORCE_LINK_CAP: f32 = 1.2;
/// Per-frame interpolation rate of the camera rig.
pub const CAMERA_SMOOTHING_RATE: f32 = 0.12;
/// Seed for the setae jitter and molecule cloud.
pub const DEFAULT_SCENE_SEED: u64 = 0x6ec0_1ab5;
/// Progress advanced per second while the presentation autoplays.
pub const AUTOPLAY_SPEED: f32 = 0.05;
/// Progress advanced per scroll line.
pub const SCROLL_STEP: f32 = 0.02;
