//! Shared fixture for behavioural tests that tick a headless lab app.
//!
//! The fixture owns the `App` behind a mutex so rspec closures can share it,
//! and finishes plugins exactly once before the first tick.

use std::sync::MutexGuard;

use bevy::prelude::*;
use gecko_lab::diagnostics::LabDiagnostic;

use crate::thread_safe_app::{lock_app, share, LabAppCell, SharedLabApp};

#[derive(Resource, Debug, Default)]
struct PluginsFinalized;

/// Base fixture wrapping an already-configured headless `App`.
#[derive(Debug, Clone)]
pub struct LabAppFixture {
    app: SharedLabApp,
}

impl LabAppFixture {
    /// Wraps a configured lab `app` for sharing across rspec examples.
    #[must_use]
    pub fn new(app: App) -> Self {
        Self {
            app: share(app),
        }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, LabAppCell> {
        lock_app(&self.app)
    }

    /// Advances the application by a single tick.
    pub fn tick(&self) {
        let mut app = self.app_guard();
        if app.world().get_resource::<PluginsFinalized>().is_none() {
            app.finish();
            app.cleanup();
            app.insert_resource(PluginsFinalized);
        }
        app.update();
    }

    /// Advances the application by `count` ticks.
    pub fn tick_n(&self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Runs `edit` against the world, then flushes queued commands.
    pub fn with_world(&self, edit: impl FnOnce(&mut World)) {
        let mut app = self.app_guard();
        edit(app.world_mut());
        app.world_mut().flush();
    }

    /// Copies a resource out of the world.
    pub fn resource<R: Resource + Clone>(&self) -> R {
        self.app_guard().world().resource::<R>().clone()
    }

    /// Counts entities carrying component `C`.
    pub fn count<C: Component>(&self) -> usize {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query = world.query_filtered::<(), With<C>>();
        query.iter(world).count()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> Vec<LabDiagnostic> {
        self.app_guard()
            .world()
            .get_resource::<gecko_lab::diagnostics::DiagnosticLog>()
            .map(|log| log.entries().to_vec())
            .unwrap_or_default()
    }
}
