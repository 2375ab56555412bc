//! Process-wide logger setup.
//!
//! Bevy's own `LogPlugin` is disabled by the binary; all crates log through
//! the `log` facade into `env_logger`. `RUST_LOG` overrides the default
//! filter.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter for a verbosity flag.
#[must_use]
pub const fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger.
///
/// Only the first call takes effect; later calls, such as from several
/// tests in one binary, are ignored.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(level_for(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();
    if builder.try_init().is_err() {
        log::trace!("logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, LevelFilter::Debug)]
    #[case(false, LevelFilter::Info)]
    fn verbosity_selects_level(#[case] verbose: bool, #[case] expected: LevelFilter) {
        assert_eq!(level_for(verbose), expected);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
    }
}
