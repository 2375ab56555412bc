//! 2D schematics for the calculator and van der Waals pages.
//!
//! Each schematic is a pure function from page state and viewport to a
//! [`DrawList`]. The [`SchematicDriver`] owns redraw policy and failure
//! reporting; backends implement [`DrawSurface`].

pub mod draw;
pub mod plot;
pub mod tape;

pub use draw::{
    DrawCommand, DrawList, DrawSurface, PresentOutcome, RecordingSurface, Rect, SchematicDriver,
    SurfaceError, Viewport, FALLBACK_MESSAGE,
};
pub use plot::{PlotArea, PlotInputs};
pub use tape::{caption, Caption, SlipState, TapeLayout};

use crate::adhesion::{compute_forces, AdhesionProfile, SimulationParameters};

/// Builds one tape schematic frame, advancing `slip` by one step.
pub fn build_tape_frame(
    list: &mut DrawList,
    viewport: Viewport,
    params: &SimulationParameters,
    profile: &AdhesionProfile,
    slip: &mut SlipState,
) {
    let result = compute_forces(*params);
    let status = result.status(&profile.bands);
    let height = tape::tape_height(params.sanitized().contact_area_cm2);
    let offset = slip.advance(result.safety_factor, tape::max_slip(viewport, height));
    let layout = tape::layout(viewport, params, &result, status, offset);
    tape::draw(list, viewport, &layout);
}
