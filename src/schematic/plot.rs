//! Force-versus-distance plot and micro-contact panel.

use glam::Vec2;

use super::draw::{DrawList, Rect, Viewport};
use crate::constants::MICRO_CONTACT_DOTS;
use crate::numeric::expect_f32;
use crate::palette::{
    heat_gradient, Rgba, Swatch, CAPTION_GREY, CONTACT_ACTIVE, CURVE_BLUE, HEAT_DIM, TAPE_ORANGE,
};
use crate::vdw::{active_contacts, VdwModel, VdwParameters};

const PANEL_WIDTH: f32 = 250.0;
const PANEL_HEIGHT: f32 = 150.0;
const PANEL_MARGIN: f32 = 18.0;
const DOT_COLUMNS: u32 = 6;
const HEAT_CELLS: u16 = 40;
const SURFACE_GREY: Swatch = Swatch::new(0x3d, 0x51, 0x68);
const MARKER_LABEL: Swatch = Swatch::new(0xff, 0xdb, 0x9b);
const PANEL_LABEL: Swatch = Swatch::new(0xd9, 0xe8, 0xf8);

/// Plot area inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    /// Left edge of the axes.
    pub left: f32,
    /// Right edge of the axes.
    pub right: f32,
    /// Top of the value range.
    pub top: f32,
    /// The x axis.
    pub bottom: f32,
}

impl PlotArea {
    /// Plot area leaving room for the contact panel on the right.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            left: 54.0,
            right: viewport.width - 290.0,
            top: 30.0,
            bottom: viewport.height - 36.0,
        }
    }

    /// Maps a domain fraction and a relative force onto the plot.
    #[must_use]
    pub fn project(&self, t: f64, relative_force: f64) -> Vec2 {
        let x = (self.right - self.left).mul_add(expect_f32(t), self.left);
        let y = self.bottom - expect_f32(relative_force.min(1.0)) * (self.bottom - self.top);
        Vec2::new(x, y)
    }
}

/// Inputs of one plot frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotInputs {
    /// Model constants.
    pub model: VdwModel,
    /// Current slider values.
    pub params: VdwParameters,
    /// Whether numeric labels are shown.
    pub overlay: bool,
}

/// Points of the sampled curve in plot coordinates.
#[must_use]
pub fn curve_points(area: &PlotArea, model: &VdwModel) -> Vec<Vec2> {
    model
        .curve()
        .map(|sample| area.project(sample.t, sample.relative_force))
        .collect()
}

/// Marker position for the current separation.
#[must_use]
pub fn marker(area: &PlotArea, model: &VdwModel, separation_nm: f64) -> Vec2 {
    area.project(
        model.separation_to_position(separation_nm),
        model.relative_force(separation_nm),
    )
}

/// Centre of micro-contact dot `index` within a panel at `origin`.
#[must_use]
pub fn dot_centre(origin: Vec2, index: u32) -> Vec2 {
    let row = index / DOT_COLUMNS;
    let col = index % DOT_COLUMNS;
    origin + Vec2::new(70.0 + 26.0 * u32_f32(col), 34.0 + 24.0 * u32_f32(row))
}

/// Appends the plot frame to `list`.
pub fn draw(list: &mut DrawList, viewport: Viewport, inputs: &PlotInputs) {
    let area = PlotArea::for_viewport(viewport);
    draw_axes(list, viewport, &area);
    draw_heat_strip(list, &area, inputs);
    list.polyline(curve_points(&area, &inputs.model), CURVE_BLUE.opaque(), 2.6);
    draw_marker(list, &area, inputs);
    draw_contact_panel(list, viewport, inputs.params.contact_fraction_percent);
}

fn draw_axes(list: &mut DrawList, viewport: Viewport, area: &PlotArea) {
    let axis = Rgba::new(1.0, 1.0, 1.0, 0.16);
    list.line(
        Vec2::new(area.left, area.top),
        Vec2::new(area.left, area.bottom),
        axis,
        1.4,
    );
    list.line(
        Vec2::new(area.left, area.bottom),
        Vec2::new(area.right, area.bottom),
        axis,
        1.4,
    );
    let guide = Rgba::new(1.0, 1.0, 1.0, 0.07);
    for i in 1..=4u8 {
        let y = (area.bottom - area.top).mul_add(f32::from(i) / 5.0, area.top);
        list.line(Vec2::new(area.left, y), Vec2::new(area.right, y), guide, 1.0);
    }
    let caption = CAPTION_GREY.opaque();
    list.text(Vec2::new(16.0, area.top + 8.0), "Relative force", caption, 12.0);
    list.text(
        Vec2::new(area.right - 95.0, viewport.height - 12.0),
        "Distance r (nm)",
        caption,
        12.0,
    );
}

/// Strip under the x axis coloured by the adhesion index along the domain.
fn draw_heat_strip(list: &mut DrawList, area: &PlotArea, inputs: &PlotInputs) {
    let width = (area.right - area.left) / f32::from(HEAT_CELLS);
    for cell in 0..HEAT_CELLS {
        let t = (f64::from(cell) + 0.5) / f64::from(HEAT_CELLS);
        let separation_nm = inputs.model.position_to_separation(t);
        let index = inputs
            .model
            .evaluate(VdwParameters {
                separation_nm,
                contact_fraction_percent: inputs.params.contact_fraction_percent,
            })
            .adhesion_index;
        let rect = Rect::new(
            width.mul_add(f32::from(cell), area.left),
            area.bottom + 4.0,
            width,
            6.0,
        );
        list.fill_rect(rect, heat_gradient(expect_f32(index)));
    }
}

fn draw_marker(list: &mut DrawList, area: &PlotArea, inputs: &PlotInputs) {
    let point = marker(area, &inputs.model, inputs.params.separation_nm);
    list.circle(point, 6.0, TAPE_ORANGE.opaque());
    list.dashed_line(
        point,
        Vec2::new(point.x, area.bottom),
        TAPE_ORANGE.with_alpha(0.45),
        1.2,
    );
    if inputs.overlay {
        list.text(
            point + Vec2::new(8.0, -10.0),
            format!("r={:.2}nm", inputs.params.separation_nm),
            MARKER_LABEL.opaque(),
            12.0,
        );
    }
}

fn draw_contact_panel(list: &mut DrawList, viewport: Viewport, contact_percent: f64) {
    let origin = Vec2::new(viewport.width - PANEL_WIDTH - PANEL_MARGIN, PANEL_MARGIN);
    let panel = Rect::new(origin.x, origin.y, PANEL_WIDTH, PANEL_HEIGHT);
    list.fill_rect(panel, Rgba::new(0.0, 0.0, 0.0, 0.2));
    list.stroke_rect(panel, Rgba::new(1.0, 1.0, 1.0, 0.1));
    list.fill_rect(
        Rect::new(origin.x + 22.0, origin.y + 20.0, 16.0, 110.0),
        SURFACE_GREY.opaque(),
    );
    list.fill_rect(
        Rect::new(origin.x + 38.0, origin.y + 45.0, 24.0, 60.0),
        TAPE_ORANGE.opaque(),
    );

    let active = active_contacts(contact_percent);
    for index in 0..MICRO_CONTACT_DOTS {
        let (radius, color) = if index < active {
            (4.2, CONTACT_ACTIVE.opaque())
        } else {
            (3.4, Rgba::new(0.667, 0.714, 0.769, 0.35))
        };
        list.circle(dot_centre(origin, index), radius, color);
    }
    list.text(
        origin + Vec2::new(95.0, 132.0),
        "Micro-contacts",
        PANEL_LABEL.opaque(),
        12.0,
    );

    let legend = Rect::new(origin.x + 22.0, panel.bottom() + 14.0, PANEL_WIDTH - 44.0, 8.0);
    list.gradient_rect(
        legend,
        vec![HEAT_DIM.opaque(), CURVE_BLUE.opaque(), TAPE_ORANGE.opaque()],
    );
    let caption = CAPTION_GREY.opaque();
    list.text(Vec2::new(legend.origin.x, legend.bottom() + 14.0), "weak", caption, 11.0);
    list.text(
        Vec2::new(legend.right() - 40.0, legend.bottom() + 14.0),
        "strong",
        caption,
        11.0,
    );
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Dot grid indices are tiny and exact in f32."
)]
fn u32_f32(value: u32) -> f32 {
    value as f32
}
