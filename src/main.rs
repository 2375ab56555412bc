//! Gecko lab binary: parses flags, loads configuration and runs one page.

use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use gecko_lab::{init_logging, GeckoLabPlugin, LabConfig, LabDiagnostic, Page, ProfileName};

/// Gecko adhesion lab: force calculator, van der Waals plot and toe-pad zoom
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Page to show
    #[arg(long, value_enum, default_value_t = Page::Setae)]
    page: Page,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Adhesion profile overriding the configuration file
    #[arg(long, value_enum)]
    profile: Option<ProfileName>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (config, rejected) = match LabConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (LabConfig::default(), Some(err)),
    };
    let config = match args.profile {
        Some(profile) => config.with_profile(profile),
        None => config,
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_plugins(GeckoLabPlugin::new(config, args.page));
    if let Some(err) = rejected {
        app.world_mut()
            .trigger(LabDiagnostic::InvalidConfig(err.to_string()));
    }
    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow::anyhow!("lab exited with code {code}")),
    }
}
