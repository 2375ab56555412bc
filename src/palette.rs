//! Colours shared by readouts, schematics and the zoom scene.

use serde::Serialize;

/// An opaque sRGB colour stored as 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Swatch {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Swatch {
    /// Creates a swatch from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style lowercase hex string, e.g. `#4ade80`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to a floating-point colour with the given alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: f32::from(self.r) / 255.0,
            g: f32::from(self.g) / 255.0,
            b: f32::from(self.b) / 255.0,
            a,
        }
    }

    /// Converts to an opaque floating-point colour.
    #[must_use]
    pub fn opaque(self) -> Rgba {
        self.with_alpha(1.0)
    }
}

/// A floating-point sRGB colour with alpha, as handed to draw surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    /// Red channel in `[0, 1]`.
    pub r: f32,
    /// Green channel in `[0, 1]`.
    pub g: f32,
    /// Blue channel in `[0, 1]`.
    pub b: f32,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise interpolation towards `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        use crate::numeric::lerp;
        let t = crate::numeric::clamp01(t);
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }
}

/// Stable hold.
pub const HOLD_GREEN: Swatch = Swatch::new(0x4a, 0xde, 0x80);
/// Near the limit.
pub const WARNING_AMBER: Swatch = Swatch::new(0xfa, 0xcc, 0x15);
/// Slip.
pub const FAIL_RED: Swatch = Swatch::new(0xf8, 0x71, 0x71);
/// Adhesive tape and highlight accents.
pub const TAPE_ORANGE: Swatch = Swatch::new(0xff, 0xbd, 0x59);
/// Rigid wall in the schematics.
pub const WALL_SLATE: Swatch = Swatch::new(0x2d, 0x3d, 0x4f);
/// Van der Waals curve stroke.
pub const CURVE_BLUE: Swatch = Swatch::new(0x78, 0xc1, 0xff);
/// Axis and caption text.
pub const CAPTION_GREY: Swatch = Swatch::new(0xa9, 0xb8, 0xc9);
/// Weight arrow.
pub const WEIGHT_ARROW: Swatch = Swatch::new(0xff, 0x7b, 0x7b);
/// Adhesion arrow.
pub const ADHESION_ARROW: Swatch = Swatch::new(0x65, 0xd4, 0x8f);
/// Mass block fill.
pub const BLOCK_STEEL: Swatch = Swatch::new(0x87, 0xa6, 0xc4);
/// Active micro-contact dot.
pub const CONTACT_ACTIVE: Swatch = Swatch::new(0x71, 0xde, 0x9c);
/// Dim end of the force heat gradient.
pub const HEAT_DIM: Swatch = Swatch::new(0x16, 0x20, 0x28);

/// Maps a normalised intensity onto the dim→blue→orange heat gradient.
#[must_use]
pub fn heat_gradient(intensity: f32) -> Rgba {
    let t = crate::numeric::clamp01(intensity);
    if t < 0.5 {
        HEAT_DIM.opaque().mix(CURVE_BLUE.opaque(), t * 2.0)
    } else {
        CURVE_BLUE.opaque().mix(TAPE_ORANGE.opaque(), (t - 0.5) * 2.0)
    }
}

/// Colour at `t` along evenly spaced `stops`, or `None` for no stops.
#[must_use]
pub fn sample_stops(stops: &[Rgba], t: f32) -> Option<Rgba> {
    let last = stops.len().checked_sub(1)?;
    let scaled = crate::numeric::clamp01(t) * crate::numeric::count_f32(last);
    let lower = crate::numeric::floor_index(scaled).min(last);
    let from = stops.get(lower).copied()?;
    let to = stops.get((lower + 1).min(last)).copied().unwrap_or(from);
    Some(from.mix(to, scaled - crate::numeric::count_f32(lower)))
}
