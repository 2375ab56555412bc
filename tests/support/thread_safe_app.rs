//! Lab `App` cell that rspec fixtures can clone across examples.
//!
//! `LabAppFixture` hands the same headless lab app to every `given/when/then`
//! closure of a page or presentation suite. rspec demands `Send + Sync`
//! fixtures, which a Bevy `App` is not, so the app lives in a mutex-guarded
//! cell and suites run through `run_serial`.

use bevy::prelude::App;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Headless lab app reachable only through [`SharedLabApp`]'s mutex.
#[derive(Debug)]
pub struct LabAppCell(pub App);

impl Deref for LabAppCell {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LabAppCell {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: the lab suites run serially and only touch the app while holding
// the mutex in `SharedLabApp`.
unsafe impl Send for LabAppCell {}
unsafe impl Sync for LabAppCell {}

/// Handle cloned into every example of a lab suite.
pub type SharedLabApp = Arc<Mutex<LabAppCell>>;

/// Moves a configured lab app behind a shared mutex.
pub fn share(app: App) -> SharedLabApp {
    Arc::new(Mutex::new(LabAppCell(app)))
}

/// Locks the lab app. A panicking example poisons the mutex; later examples
/// still need the app to report their own failures, so poison is ignored.
pub fn lock_app(app: &SharedLabApp) -> MutexGuard<'_, LabAppCell> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}
