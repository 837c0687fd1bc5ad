mod app;
mod cli;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use shinkai_core::config::AppConfig;

async fn run(cli: cli::Cli, config: &AppConfig) -> Result<(), app::CliError> {
    let mut app = app::App::open(config, cli.db)?;
    let mut stdout = std::io::stdout().lock();
    app.run(cli.command, &mut stdout).await
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let _log_guard = logging::init(&config.logging.level, cli.verbose);
    if let Some(e) = config_err {
        tracing::warn!("falling back to default config: {e}");
        eprintln!("warning: {e}; using default settings");
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(cli, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
