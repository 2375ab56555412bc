//! Bevy-side home of the 2D schematics.
//!
//! [`SchematicCanvas`] is the [`DrawSurface`] the page systems present into.
//! Headless apps give it a fixed viewport; with the `render` feature the
//! canvas follows the primary window and its frame is replayed through
//! gizmos every tick.

use bevy::prelude::*;

use crate::diagnostics::LabDiagnostic;
use crate::pages::Page;
use crate::schematic::{
    DrawCommand, DrawSurface, PresentOutcome, SchematicDriver, SurfaceError, Viewport,
};

/// Drawing surface shared by the schematic pages.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SchematicCanvas {
    viewport: Option<Viewport>,
    frame: Vec<DrawCommand>,
    fallback: Option<String>,
    presented: u64,
}

impl SchematicCanvas {
    /// A canvas of fixed size.
    #[must_use]
    pub const fn headless(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            frame: Vec::new(),
            fallback: None,
            presented: 0,
        }
    }

    /// A canvas with no drawing context until a viewport is assigned.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            viewport: None,
            frame: Vec::new(),
            fallback: None,
            presented: 0,
        }
    }

    /// Assigns or removes the drawing context.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    /// Commands of the frame currently on screen.
    #[must_use]
    pub fn frame(&self) -> &[DrawCommand] {
        &self.frame
    }

    /// Fallback message shown instead of a frame, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Frames presented so far, replays included.
    #[must_use]
    pub const fn presented_frames(&self) -> u64 {
        self.presented
    }
}

impl DrawSurface for SchematicCanvas {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn is_retained(&self) -> bool {
        false
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        self.frame.clear();
        self.frame.extend_from_slice(commands);
        self.fallback = None;
        self.presented += 1;
        Ok(())
    }

    fn show_fallback(&mut self, message: &str) {
        self.frame.clear();
        self.fallback = Some(message.to_owned());
    }
}

/// Redraw policy of the active schematic page.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct PageDriver(pub SchematicDriver);

impl Default for PageDriver {
    fn default() -> Self {
        Self(SchematicDriver::new())
    }
}

/// Raises a diagnostic the first time `outcome` carries a surface error.
pub fn report_outcome(commands: &mut Commands, page: Page, outcome: PresentOutcome) {
    if let PresentOutcome::Failed(Some(err)) = outcome {
        commands.trigger(LabDiagnostic::RenderContextUnavailable {
            page,
            detail: err.to_string(),
        });
    }
}

/// Installs the canvas resources shared by the schematic pages.
///
/// Without a window the canvas stays headless at a fixed size.
pub(crate) fn init_canvas(app: &mut App) {
    #[cfg(feature = "render")]
    let windowed = app.is_plugin_added::<bevy::window::WindowPlugin>();
    #[cfg(not(feature = "render"))]
    let windowed = false;

    if !app.world().contains_resource::<SchematicCanvas>() {
        app.insert_resource(if windowed {
            SchematicCanvas::detached()
        } else {
            SchematicCanvas::headless(Viewport::new(960.0, 540.0))
        });
    }
    app.init_resource::<PageDriver>();

    #[cfg(feature = "render")]
    if windowed && app.is_plugin_added::<bevy::gizmos::GizmoPlugin>() {
        app.add_systems(PreUpdate, gizmo_canvas::follow_primary_window);
        app.add_systems(Startup, gizmo_canvas::spawn_canvas_camera);
        app.add_systems(PostUpdate, gizmo_canvas::draw_canvas);
    }
}

#[cfg(feature = "render")]
mod gizmo_canvas {
    //! Replays the canvas frame as gizmo lines under an orthographic camera
    //! mapping one world unit to one logical pixel.

    use bevy::math::Isometry3d;
    use bevy::prelude::*;
    use bevy::window::PrimaryWindow;

    use super::SchematicCanvas;
    use crate::palette::{sample_stops, Rgba};
    use crate::schematic::{DrawCommand, Rect, Viewport};

    const DASH: f32 = 6.0;
    const GAP: f32 = 4.0;
    const ARROW_HEAD: f32 = 9.0;

    #[derive(Component, Debug)]
    pub(super) struct CanvasCamera;

    pub(super) fn spawn_canvas_camera(mut commands: Commands) {
        commands.spawn((
            Camera3d::default(),
            Projection::from(OrthographicProjection::default_3d()),
            Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
            CanvasCamera,
            Name::new("SchematicCamera"),
        ));
    }

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy systems require parameters by value, not by reference."
    )]
    pub(super) fn follow_primary_window(
        windows: Query<&Window, With<PrimaryWindow>>,
        mut canvas: ResMut<SchematicCanvas>,
    ) {
        let viewport = windows
            .single()
            .ok()
            .map(|window| Viewport::new(window.width(), window.height()));
        if canvas.viewport != viewport {
            canvas.set_viewport(viewport);
        }
    }

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy systems require parameters by value, not by reference."
    )]
    pub(super) fn draw_canvas(canvas: Res<SchematicCanvas>, mut gizmos: Gizmos) {
        let Some(viewport) = canvas.viewport else {
            return;
        };
        let world = |p: Vec2| Vec3::new(p.x - viewport.width / 2.0, viewport.height / 2.0 - p.y, 0.0);
        for command in canvas.frame() {
            match command {
                DrawCommand::FillRect { rect, color } => {
                    fill(&mut gizmos, rect, |_| *color, &world);
                }
                DrawCommand::GradientRect { rect, stops } => {
                    let width = rect.size.x.max(f32::EPSILON);
                    fill_columns(&mut gizmos, rect, &world, |x| {
                        sample_stops(stops, x / width).unwrap_or(Rgba::new(0.0, 0.0, 0.0, 0.0))
                    });
                }
                DrawCommand::StrokeRect { rect, color } => {
                    let corners = [
                        rect.origin,
                        Vec2::new(rect.right(), rect.origin.y),
                        Vec2::new(rect.right(), rect.bottom()),
                        Vec2::new(rect.origin.x, rect.bottom()),
                        rect.origin,
                    ];
                    gizmos.linestrip(corners.map(world), to_color(*color));
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    dashed,
                    ..
                } => {
                    if *dashed {
                        dashed_line(&mut gizmos, world(*from), world(*to), to_color(*color));
                    } else {
                        gizmos.line(world(*from), world(*to), to_color(*color));
                    }
                }
                DrawCommand::Polyline { points, color, .. } => {
                    gizmos.linestrip(points.iter().copied().map(world), to_color(*color));
                }
                DrawCommand::Circle {
                    centre,
                    radius,
                    color,
                } => {
                    let color = to_color(*color);
                    let mut r = *radius;
                    while r > 0.0 {
                        gizmos.circle(Isometry3d::from_translation(world(*centre)), r, color);
                        r -= 1.0;
                    }
                }
                DrawCommand::Arrow {
                    from, to, color, ..
                } => {
                    gizmos
                        .arrow(world(*from), world(*to), to_color(*color))
                        .with_tip_length(ARROW_HEAD);
                }
                // Labels are laid out as UI text when the `text` feature is on.
                DrawCommand::Text { .. } => {}
            }
        }
    }

    fn fill(
        gizmos: &mut Gizmos,
        rect: &Rect,
        color: impl Fn(f32) -> Rgba,
        world: &impl Fn(Vec2) -> Vec3,
    ) {
        let mut y = 0.0;
        while y < rect.size.y {
            let row = rect.origin.y + y;
            gizmos.line(
                world(Vec2::new(rect.origin.x, row)),
                world(Vec2::new(rect.right(), row)),
                to_color(color(y)),
            );
            y += 1.0;
        }
    }

    fn fill_columns(
        gizmos: &mut Gizmos,
        rect: &Rect,
        world: &impl Fn(Vec2) -> Vec3,
        color: impl Fn(f32) -> Rgba,
    ) {
        let mut x = 0.0;
        while x < rect.size.x {
            let column = rect.origin.x + x;
            gizmos.line(
                world(Vec2::new(column, rect.origin.y)),
                world(Vec2::new(column, rect.bottom())),
                to_color(color(x)),
            );
            x += 1.0;
        }
    }

    fn dashed_line(gizmos: &mut Gizmos, from: Vec3, to: Vec3, color: Color) {
        let length = from.distance(to);
        let Some(direction) = (to - from).try_normalize() else {
            return;
        };
        let mut start = 0.0;
        while start < length {
            let end = (start + DASH).min(length);
            gizmos.line(from + direction * start, from + direction * end, color);
            start = end + GAP;
        }
    }

    fn to_color(color: Rgba) -> Color {
        Color::srgba(color.r, color.g, color.b, color.a)
    }
}
