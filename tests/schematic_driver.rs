//! Redraw policy of `SchematicDriver` against a mocked drawing backend.

use gecko_lab::palette::TAPE_ORANGE;
use gecko_lab::schematic::{
    DrawCommand, DrawList, DrawSurface, PresentOutcome, SchematicDriver, SurfaceError, Viewport,
    FALLBACK_MESSAGE,
};
use glam::Vec2;
use mockall::{mock, Sequence};

mock! {
    Surface {}

    impl DrawSurface for Surface {
        fn viewport(&self) -> Option<Viewport>;
        fn is_retained(&self) -> bool;
        fn present(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError>;
        fn show_fallback(&mut self, message: &str);
    }
}

fn dot(viewport: Viewport, list: &mut DrawList) {
    list.circle(Vec2::new(viewport.width / 2.0, viewport.height / 2.0), 10.0, TAPE_ORANGE.opaque());
}

#[test]
fn immediate_mode_surface_gets_the_last_frame_every_tick() {
    let mut surface = MockSurface::new();
    surface
        .expect_viewport()
        .return_const(Some(Viewport::new(640.0, 360.0)));
    surface.expect_is_retained().return_const(false);
    surface
        .expect_present()
        .withf(|commands| commands.len() == 1)
        .times(3)
        .returning(|_| Ok(()));
    surface.expect_show_fallback().never();

    let mut driver = SchematicDriver::new();
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Presented);
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Replayed);
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Replayed);
}

#[test]
fn failure_after_success_keeps_the_last_frame() {
    let mut surface = MockSurface::new();
    let mut seq = Sequence::new();
    surface
        .expect_viewport()
        .return_const(Some(Viewport::new(640.0, 360.0)));
    surface.expect_is_retained().return_const(true);
    surface
        .expect_present()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    surface
        .expect_present()
        .times(2)
        .in_sequence(&mut seq)
        .returning(|_| Err(SurfaceError::Rejected("device lost".to_owned())));
    surface.expect_show_fallback().never();

    let mut driver = SchematicDriver::new();
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Presented);
    driver.mark_dirty();
    assert_eq!(
        driver.present(&mut surface, dot),
        PresentOutcome::Failed(Some(SurfaceError::Rejected("device lost".to_owned())))
    );
    driver.mark_dirty();
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Failed(None));
    assert_eq!(driver.last_frame().len(), 1);
}

#[test]
fn missing_context_shows_the_fallback_message() {
    let mut surface = MockSurface::new();
    surface.expect_viewport().return_const(None);
    surface.expect_present().never();
    surface
        .expect_show_fallback()
        .withf(|message| message == FALLBACK_MESSAGE)
        .times(2)
        .return_const(());

    let mut driver = SchematicDriver::new();
    assert!(matches!(
        driver.present(&mut surface, dot),
        PresentOutcome::Failed(Some(SurfaceError::ContextUnavailable))
    ));
    assert_eq!(driver.present(&mut surface, dot), PresentOutcome::Failed(None));
}
