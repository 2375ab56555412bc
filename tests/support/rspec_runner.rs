//! Serial runner for the lab's rspec suites.

use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs a page or presentation suite one example at a time.
///
/// Each example ticks the shared lab app and then asserts on its
/// resources, so examples must not interleave. The first failing example
/// aborts the suite, because later examples would read the app state that
/// the failed example left behind.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("lab suite configuration failed: {e}"));
    let logger = Arc::new(Logger::new(std::io::stdout()));
    Runner::new(config, vec![logger]).run(suite);
}
