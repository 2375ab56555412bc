//! Tip-to-molecule force links drawn during the molecular stage.

use glam::Vec3;

use crate::constants::{FORCE_LINK_CAP, FORCE_LINK_GAIN};
use crate::numeric::clamp01;
use crate::palette::Rgba;
use crate::setae::SceneLayout;

/// Colour of a link at zero intensity before the highlight is applied.
const LINK_BASE: [f32; 3] = [1.0, 0.78, 0.45];
/// Guards the inverse-sixth law against a tip sitting on a molecule.
const DISTANCE_FLOOR: f32 = 1e-6;

/// One segment between a seta tip and its nearest molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLink {
    /// Seta tip end.
    pub tip: Vec3,
    /// Nearest molecule end.
    pub anchor: Vec3,
    /// Tip-to-molecule distance.
    pub distance: f32,
    /// Capped inverse-sixth intensity, already scaled by the stage fade.
    pub intensity: f32,
    /// Vertex colour at the tip.
    pub tip_color: Rgba,
    /// Vertex colour at the molecule, half as bright as the tip.
    pub anchor_color: Rgba,
}

/// Intensity of a link spanning `distance`, faded by `molecular`.
///
/// # Examples
///
/// ```
/// use gecko_lab::stage::link_intensity;
/// assert_eq!(link_intensity(0.5, 1.0), 1.2);
/// assert!(link_intensity(20.0, 1.0) < 0.01);
/// assert_eq!(link_intensity(0.5, 0.0), 0.0);
/// ```
#[must_use]
pub fn link_intensity(distance: f32, molecular: f32) -> f32 {
    let r = distance.max(0.0) + DISTANCE_FLOOR;
    let raw = FORCE_LINK_GAIN / r.powi(6);
    raw.clamp(0.0, FORCE_LINK_CAP) * molecular
}

fn link_colors(intensity: f32, molecular: f32) -> (Rgba, Rgba) {
    let [r, g, b] = LINK_BASE;
    let tip = Rgba::new(
        r * clamp01(0.2 + intensity),
        g * clamp01(0.9f32.mul_add(intensity, 0.2)),
        b * clamp01(0.6f32.mul_add(intensity, 0.1)),
        molecular,
    );
    let anchor = Rgba::new(tip.r * 0.5, tip.g * 0.5, tip.b * 0.5, molecular);
    (tip, anchor)
}

pub(super) fn write_links(
    layout: &SceneLayout,
    indices: &[usize],
    growth: f32,
    molecular: f32,
    out: &mut Vec<ForceLink>,
) {
    out.clear();
    out.extend(indices.iter().filter_map(|&index| {
        let tip = layout.field.get(index)?.tip(growth);
        let (anchor, distance) = layout.molecules.nearest(tip)?;
        let intensity = link_intensity(distance, molecular);
        let (tip_color, anchor_color) = link_colors(intensity, molecular);
        Some(ForceLink {
            tip,
            anchor,
            distance,
            intensity,
            tip_color,
            anchor_color,
        })
    }));
}
