//! Backend-neutral 2D draw list and the driver that presents it.
//!
//! Schematics describe a frame as a flat list of [`DrawCommand`]s in viewport
//! pixels (origin top-left, y down). A [`DrawSurface`] turns the list into
//! pixels; [`SchematicDriver`] decides when a frame has to be rebuilt and how
//! to degrade when the surface cannot draw.

use glam::Vec2;
use thiserror::Error;

use crate::palette::Rgba;

/// Message drawn in place of a schematic that could never be presented.
pub const FALLBACK_MESSAGE: &str = "Rendering is unavailable on this display.";

/// Smallest edge, in pixels, worth drawing into.
const MIN_DRAWABLE_EDGE: f32 = 2.0;

/// Drawable area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the viewport is large enough to draw into.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width >= MIN_DRAWABLE_EDGE && self.height >= MIN_DRAWABLE_EDGE
    }
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Centre point.
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }
}

/// One primitive of a schematic frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill colour.
        color: Rgba,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Outline.
        rect: Rect,
        /// Stroke colour.
        color: Rgba,
    },
    /// Rectangle filled with a left-to-right gradient through `stops`.
    GradientRect {
        /// Area to fill.
        rect: Rect,
        /// Evenly spaced colour stops.
        stops: Vec<Rgba>,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke colour.
        color: Rgba,
        /// Stroke width.
        width: f32,
        /// Whether the segment is dashed.
        dashed: bool,
    },
    /// Connected segments.
    Polyline {
        /// Vertices in order.
        points: Vec<Vec2>,
        /// Stroke colour.
        color: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// Filled disc.
    Circle {
        /// Centre.
        centre: Vec2,
        /// Radius.
        radius: f32,
        /// Fill colour.
        color: Rgba,
    },
    /// Segment with an arrow head at `to` and a label beside it.
    Arrow {
        /// Tail.
        from: Vec2,
        /// Head.
        to: Vec2,
        /// Stroke and head colour.
        color: Rgba,
        /// Label drawn next to the head.
        label: String,
    },
    /// Text anchored at its baseline-left corner.
    Text {
        /// Anchor point.
        position: Vec2,
        /// Content.
        text: String,
        /// Text colour.
        color: Rgba,
        /// Font size in pixels.
        size: f32,
    },
}

/// Reusable list of draw commands making up one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Recorded commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every command, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Appends a raw command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Appends a filled rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    /// Appends a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.push(DrawCommand::StrokeRect { rect, color });
    }

    /// Appends a gradient-filled rectangle.
    pub fn gradient_rect(&mut self, rect: Rect, stops: Vec<Rgba>) {
        self.push(DrawCommand::GradientRect { rect, stops });
    }

    /// Appends a solid segment.
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
            dashed: false,
        });
    }

    /// Appends a dashed segment.
    pub fn dashed_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
            dashed: true,
        });
    }

    /// Appends a polyline.
    pub fn polyline(&mut self, points: Vec<Vec2>, color: Rgba, width: f32) {
        self.push(DrawCommand::Polyline {
            points,
            color,
            width,
        });
    }

    /// Appends a filled disc.
    pub fn circle(&mut self, centre: Vec2, radius: f32, color: Rgba) {
        self.push(DrawCommand::Circle {
            centre,
            radius,
            color,
        });
    }

    /// Appends a labelled arrow.
    pub fn arrow(&mut self, from: Vec2, to: Vec2, color: Rgba, label: impl Into<String>) {
        self.push(DrawCommand::Arrow {
            from,
            to,
            color,
            label: label.into(),
        });
    }

    /// Appends a text run.
    pub fn text(&mut self, position: Vec2, text: impl Into<String>, color: Rgba, size: f32) {
        self.push(DrawCommand::Text {
            position,
            text: text.into(),
            color,
            size,
        });
    }
}

/// Failure to present a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No drawing context exists for the surface.
    #[error("no drawing context is available")]
    ContextUnavailable,
    /// The backend rejected the frame.
    #[error("frame rejected by the drawing backend: {0}")]
    Rejected(String),
}

/// A backend able to draw a [`DrawList`].
pub trait DrawSurface {
    /// Current drawable area, or `None` when no context exists.
    fn viewport(&self) -> Option<Viewport>;

    /// Whether a presented frame stays on screen until replaced.
    ///
    /// Immediate-mode backends return `false` and are fed the last good frame
    /// again on every tick.
    fn is_retained(&self) -> bool {
        true
    }

    /// Draws `commands` as one frame.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] when the backend cannot draw.
    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError>;

    /// Replaces the schematic with a short textual message.
    fn show_fallback(&mut self, message: &str);
}

/// What [`SchematicDriver::present`] did this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentOutcome {
    /// A rebuilt frame was presented.
    Presented,
    /// The last good frame was presented again.
    Replayed,
    /// Nothing needed drawing, or the viewport is too small.
    Skipped,
    /// The surface failed. The error is carried only the first time so it
    /// can be reported once.
    Failed(Option<SurfaceError>),
}

/// Redraw policy wrapped around a [`DrawSurface`].
///
/// The driver rebuilds a frame only when marked dirty or when the viewport
/// changes size. On failure it keeps whatever was last drawn successfully,
/// or shows [`FALLBACK_MESSAGE`] if nothing ever was.
#[derive(Debug, Clone, Default)]
pub struct SchematicDriver {
    viewport: Option<Viewport>,
    dirty: bool,
    reported: bool,
    has_presented: bool,
    scratch: DrawList,
    last_good: DrawList,
}

impl SchematicDriver {
    /// A driver that draws on its first tick.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Requests a rebuild on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a rebuild is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last viewport observed.
    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Last frame presented successfully.
    #[must_use]
    pub const fn last_frame(&self) -> &DrawList {
        &self.last_good
    }

    /// Records `viewport`, marking the driver dirty when the size changed.
    ///
    /// Returns whether the size changed.
    pub fn observe_viewport(&mut self, viewport: Viewport) -> bool {
        let changed = self.viewport != Some(viewport);
        if changed {
            self.viewport = Some(viewport);
            self.dirty = true;
        }
        changed
    }

    /// Runs one tick against `surface`, calling `build` when a new frame is
    /// needed.
    pub fn present<S, F>(&mut self, surface: &mut S, build: F) -> PresentOutcome
    where
        S: DrawSurface + ?Sized,
        F: FnOnce(Viewport, &mut DrawList),
    {
        let Some(viewport) = surface.viewport() else {
            return self.fail(surface, SurfaceError::ContextUnavailable);
        };
        self.observe_viewport(viewport);
        if !viewport.is_drawable() {
            return PresentOutcome::Skipped;
        }

        if self.dirty {
            self.scratch.clear();
            build(viewport, &mut self.scratch);
            self.dirty = false;
            return match surface.present(self.scratch.commands()) {
                Ok(()) => {
                    std::mem::swap(&mut self.scratch, &mut self.last_good);
                    self.has_presented = true;
                    PresentOutcome::Presented
                }
                Err(err) => self.fail(surface, err),
            };
        }

        if surface.is_retained() || !self.has_presented {
            return PresentOutcome::Skipped;
        }
        match surface.present(self.last_good.commands()) {
            Ok(()) => PresentOutcome::Replayed,
            Err(err) => self.fail(surface, err),
        }
    }

    fn fail<S>(&mut self, surface: &mut S, err: SurfaceError) -> PresentOutcome
    where
        S: DrawSurface + ?Sized,
    {
        if !self.has_presented {
            surface.show_fallback(FALLBACK_MESSAGE);
        }
        if self.reported {
            PresentOutcome::Failed(None)
        } else {
            self.reported = true;
            PresentOutcome::Failed(Some(err))
        }
    }
}

/// Surface that keeps every presented frame in memory.
///
/// Used headless and in tests; it never fails unless given no viewport.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Option<Viewport>,
    frames: Vec<Vec<DrawCommand>>,
    fallback: Option<String>,
}

impl RecordingSurface {
    /// A surface of the given size.
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            frames: Vec::new(),
            fallback: None,
        }
    }

    /// A surface without a drawing context.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            viewport: None,
            frames: Vec::new(),
            fallback: None,
        }
    }

    /// Resizes the surface.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Every presented frame, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// The most recent frame.
    #[must_use]
    pub fn latest(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Fallback message, if one was shown.
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        self.frames.push(commands.to_vec());
        Ok(())
    }

    fn show_fallback(&mut self, message: &str) {
        self.fallback = Some(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CURVE_BLUE;

    fn one_line(_: Viewport, list: &mut DrawList) {
        list.line(Vec2::ZERO, Vec2::ONE, CURVE_BLUE.opaque(), 1.0);
    }

    #[test]
    fn first_tick_presents_then_skips() {
        let mut surface = RecordingSurface::new(Viewport::new(640.0, 480.0));
        let mut driver = SchematicDriver::new();
        assert_eq!(driver.present(&mut surface, one_line), PresentOutcome::Presented);
        assert_eq!(driver.present(&mut surface, one_line), PresentOutcome::Skipped);
        assert_eq!(surface.frames().len(), 1);
    }

    #[test]
    fn resize_forces_redraw() {
        let mut surface = RecordingSurface::new(Viewport::new(640.0, 480.0));
        let mut driver = SchematicDriver::new();
        driver.present(&mut surface, one_line);
        surface.resize(Viewport::new(800.0, 600.0));
        assert_eq!(driver.present(&mut surface, one_line), PresentOutcome::Presented);
        assert_eq!(driver.viewport(), Some(Viewport::new(800.0, 600.0)));
    }

    #[test]
    fn tiny_viewport_is_skipped() {
        let mut surface = RecordingSurface::new(Viewport::new(1.0, 300.0));
        let mut driver = SchematicDriver::new();
        assert_eq!(driver.present(&mut surface, one_line), PresentOutcome::Skipped);
        assert!(surface.frames().is_empty());
        assert!(driver.is_dirty());
    }

    #[test]
    fn missing_context_is_reported_once_with_fallback() {
        let mut surface = RecordingSurface::unavailable();
        let mut driver = SchematicDriver::new();
        assert_eq!(
            driver.present(&mut surface, one_line),
            PresentOutcome::Failed(Some(SurfaceError::ContextUnavailable))
        );
        assert_eq!(driver.present(&mut surface, one_line), PresentOutcome::Failed(None));
        assert_eq!(surface.fallback(), Some(FALLBACK_MESSAGE));
    }

    #[test]
    fn identical_inputs_produce_identical_frames() {
        let mut surface = RecordingSurface::new(Viewport::new(640.0, 480.0));
        let mut driver = SchematicDriver::new();
        driver.present(&mut surface, one_line);
        driver.mark_dirty();
        driver.present(&mut surface, one_line);
        let frames = surface.frames();
        assert_eq!(frames.first(), frames.last());
        assert_eq!(driver.last_frame().len(), 1);
    }
}
