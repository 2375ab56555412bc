//! Wall-and-tape schematic for the force calculator.
//!
//! A strip of adhesive tape sticks to a rigid wall and carries a hanging
//! block. Tape height tracks the contact area, the contact glow tracks
//! efficiency, block size tracks mass and the two arrows scale with weight
//! and adhesive force. When the safety factor drops below one the tape slides
//! down the wall; [`SlipState`] holds that offset between frames.

use glam::Vec2;

use super::draw::{DrawList, Rect, Viewport};
use crate::adhesion::{ForceResult, HoldStatus, SimulationParameters};
use crate::numeric::{clamp01, clamp01_f64, expect_f32};
use crate::palette::{
    Rgba, Swatch, ADHESION_ARROW, BLOCK_STEEL, FAIL_RED, HOLD_GREEN, TAPE_ORANGE, WALL_SLATE,
    WARNING_AMBER, WEIGHT_ARROW,
};

const GRID_SPACING: f32 = 28.0;
const WALL_INSET: f32 = 20.0;
const WALL_THICKNESS: f32 = 30.0;
const TAPE_WIDTH: f32 = 18.0;
const CHAIN_LENGTH: f32 = 48.0;
const ARROW_FORCE_SCALE: f64 = 280.0;
const BLOCK_SHADE: Swatch = Swatch::new(0x5d, 0x76, 0x90);
const CHAIN_GREY: Swatch = Swatch::new(0xcf, 0xd8, 0xe3);
const LABEL_LIGHT: Swatch = Swatch::new(0xdb, 0xe7, 0xf3);
const BLOCK_TEXT: Swatch = Swatch::new(0xec, 0xf2, 0xf7);

/// Tape offset carried from frame to frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlipState {
    offset: f32,
}

impl SlipState {
    /// Current downward offset of the tape (px).
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Advances one frame.
    ///
    /// While the safety factor is below one the tape slides faster the
    /// further it is from holding; otherwise it springs back. The offset is
    /// clamped into `[0, max_slip]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::schematic::SlipState;
    /// let mut slip = SlipState::default();
    /// assert!((slip.advance(0.5, 100.0) - 2.0).abs() < 1e-5);
    /// assert!((slip.advance(2.0, 100.0) - 1.64).abs() < 1e-5);
    /// ```
    pub fn advance(&mut self, safety_factor: f64, max_slip: f32) -> f32 {
        if safety_factor < 1.0 {
            let fail_amount = expect_f32(clamp01_f64(1.0 - safety_factor));
            self.offset += 2.2f32.mul_add(fail_amount, 0.9);
        } else {
            self.offset *= 0.82;
        }
        self.offset = self.offset.clamp(0.0, max_slip.max(0.0));
        self.offset
    }

    /// Whether the tape currently sits away from its rest position.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.offset > 1e-3
    }
}

/// Status caption under the tape.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    /// Caption text.
    pub text: String,
    /// Caption colour.
    pub color: Swatch,
    /// Extra downward offset applied while slipping.
    pub drop: f32,
}

/// Caption for a classified safety factor.
///
/// # Examples
///
/// ```
/// use gecko_lab::adhesion::HoldStatus;
/// use gecko_lab::schematic::caption;
/// assert_eq!(caption(HoldStatus::Hold, 1.376, 0.0).text, "Stable hold (+38%)");
/// assert_eq!(caption(HoldStatus::Fail, 0.07, 40.0).text, "Slip detected");
/// ```
#[must_use]
pub fn caption(status: HoldStatus, safety_factor: f64, slip_offset: f32) -> Caption {
    match status {
        HoldStatus::Fail => Caption {
            text: "Slip detected".to_owned(),
            color: FAIL_RED,
            drop: (slip_offset * 0.2).min(22.0),
        },
        HoldStatus::Warning => Caption {
            text: "Near limit".to_owned(),
            color: WARNING_AMBER,
            drop: 0.0,
        },
        HoldStatus::Hold => {
            let margin = clamp01_f64(safety_factor - 1.0) * 100.0;
            Caption {
                text: format!("Stable hold (+{margin:.0}%)"),
                color: HOLD_GREEN,
                drop: 0.0,
            }
        }
    }
}

/// Geometry of one schematic frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeLayout {
    /// Wall face x.
    pub wall_x: f32,
    /// Tape strip.
    pub tape: Rect,
    /// Contact glow between wall and tape.
    pub glow: Rect,
    /// Glow alpha from efficiency.
    pub glow_alpha: f32,
    /// Chain from tape to block.
    pub chain: (Vec2, Vec2),
    /// Hanging block.
    pub block: Rect,
    /// Weight arrow, tail to head.
    pub weight_arrow: (Vec2, Vec2),
    /// Adhesion arrow, tail to head.
    pub adhesion_arrow: (Vec2, Vec2),
    /// Block label.
    pub mass_label: String,
    /// Status caption.
    pub caption: Caption,
}

/// Tape height for a contact area.
#[must_use]
pub fn tape_height(contact_area_cm2: f64) -> f32 {
    let area_norm = expect_f32(clamp01_f64((contact_area_cm2 - 1.0) / 99.0));
    120.0f32.mul_add(area_norm, 58.0)
}

/// Resting top edge of the tape.
#[must_use]
pub fn tape_top(viewport: Viewport) -> f32 {
    viewport.height * 0.28
}

/// Largest slip offset that keeps the block on screen.
#[must_use]
pub fn max_slip(viewport: Viewport, tape_height: f32) -> f32 {
    (viewport.height - tape_top(viewport) - tape_height - 130.0).max(16.0)
}

fn arrow_length(force: f64, span: f32) -> f32 {
    let scale = expect_f32((force / ARROW_FORCE_SCALE).clamp(0.15, 1.0));
    span.mul_add(scale, 34.0)
}

/// Lays out the schematic.
#[must_use]
pub fn layout(
    viewport: Viewport,
    params: &SimulationParameters,
    result: &ForceResult,
    status: HoldStatus,
    slip_offset: f32,
) -> TapeLayout {
    let params = params.sanitized();
    let wall_x = viewport.width * 0.18;
    let height = tape_height(params.contact_area_cm2);
    let top = tape_top(viewport) + slip_offset;
    let tape_x = wall_x + 2.0;
    let tape = Rect::new(tape_x, top, TAPE_WIDTH, height);
    let glow = Rect::new(wall_x - 4.0, top, 4.0, height);

    let link = Vec2::new(tape.right(), tape.bottom());
    let chain_end = link + Vec2::Y * CHAIN_LENGTH;
    let mass_norm = expect_f32(clamp01_f64((params.mass - 0.18) / (70.0 - 0.18)));
    let block_size = 62.0f32.mul_add(mass_norm, 40.0);
    let block = Rect::new(
        link.x - block_size / 2.0,
        chain_end.y,
        block_size,
        block_size,
    );

    let weight_tail = Vec2::new(link.x + block_size * 0.45, chain_end.y + block_size * 0.45);
    let weight_head = weight_tail + Vec2::Y * arrow_length(result.weight_force, 80.0);
    let adhesion_tail = Vec2::new(tape.right() + 36.0, top + height * 0.5);
    let adhesion_head = adhesion_tail - Vec2::X * arrow_length(result.adhesive_force, 70.0);

    TapeLayout {
        wall_x,
        tape,
        glow,
        glow_alpha: glow_alpha(params.efficiency),
        chain: (link, chain_end),
        block,
        weight_arrow: (weight_tail, weight_head),
        adhesion_arrow: (adhesion_tail, adhesion_head),
        mass_label: format!("{:.2} kg", params.mass),
        caption: caption(status, result.safety_factor, slip_offset),
    }
}

/// Appends the schematic for `layout` to `list`.
pub fn draw(list: &mut DrawList, viewport: Viewport, layout: &TapeLayout) {
    draw_grid(list, viewport);

    let wall = Rect::new(
        layout.wall_x - WALL_THICKNESS,
        WALL_INSET,
        WALL_THICKNESS,
        viewport.height - 2.0 * WALL_INSET,
    );
    list.fill_rect(wall, WALL_SLATE.opaque());
    list.line(
        Vec2::new(layout.wall_x, WALL_INSET),
        Vec2::new(layout.wall_x, viewport.height - WALL_INSET),
        Rgba::new(1.0, 1.0, 1.0, 0.18),
        2.0,
    );

    list.fill_rect(layout.tape, TAPE_ORANGE.opaque());
    list.fill_rect(layout.glow, TAPE_ORANGE.with_alpha(layout.glow_alpha));

    list.line(layout.chain.0, layout.chain.1, CHAIN_GREY.opaque(), 3.0);
    list.gradient_rect(layout.block, vec![BLOCK_STEEL.opaque(), BLOCK_SHADE.opaque()]);
    list.stroke_rect(layout.block, Rgba::new(0.0, 0.0, 0.0, 0.28));
    list.text(
        Vec2::new(
            layout.block.origin.x + 7.0,
            layout.block.centre().y + 4.0,
        ),
        layout.mass_label.clone(),
        BLOCK_TEXT.opaque(),
        12.0,
    );

    list.arrow(
        layout.weight_arrow.0,
        layout.weight_arrow.1,
        WEIGHT_ARROW.opaque(),
        "Weight",
    );
    list.arrow(
        layout.adhesion_arrow.0,
        layout.adhesion_arrow.1,
        ADHESION_ARROW.opaque(),
        "Adhesion",
    );

    let label = LABEL_LIGHT.opaque();
    list.text(Vec2::new(layout.wall_x - 82.0, 18.0), "Rigid surface", label, 13.0);
    list.text(
        Vec2::new(layout.tape.origin.x + 24.0, layout.tape.origin.y + 16.0),
        "Gecko tape",
        label,
        13.0,
    );
    list.text(
        Vec2::new(
            layout.tape.origin.x + 26.0,
            layout.tape.bottom() + 22.0 + layout.caption.drop,
        ),
        layout.caption.text.clone(),
        layout.caption.color.opaque(),
        13.0,
    );
}

fn draw_grid(list: &mut DrawList, viewport: Viewport) {
    let color = Rgba::new(1.0, 1.0, 1.0, 0.03);
    let mut x = 0.0;
    while x <= viewport.width {
        list.line(Vec2::new(x, 0.0), Vec2::new(x, viewport.height), color, 1.0);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= viewport.height {
        list.line(Vec2::new(0.0, y), Vec2::new(viewport.width, y), color, 1.0);
        y += GRID_SPACING;
    }
}

/// Alpha of the contact glow for an efficiency.
#[must_use]
pub fn glow_alpha(efficiency: f64) -> f32 {
    0.5f32.mul_add(clamp01(expect_f32(efficiency)), 0.15)
}
