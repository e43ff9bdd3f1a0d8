use std::io;

use clap::Parser;
use tracing::debug;

use tax_cli::cli::Cli;
use tax_cli::settings::Settings;
use tax_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    settings.apply(cli.overrides());

    logging::init_logging(settings.log_level.as_deref(), settings.log_file.as_deref())?;
    debug!(config = ?cli.config, ?settings, "settings resolved");

    let mut stdout = io::stdout().lock();
    app::run(&cli.command, &settings, &mut stdout)
}
