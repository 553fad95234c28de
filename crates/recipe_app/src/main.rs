mod app;
mod cli;
mod config;
mod effects;
mod render;

use clap::Parser;
use engine_logging::engine_error;

fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse();

    let config = match config::AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(|key| std::env::var(key).ok()),
        Err(err) => {
            eprintln!("{err}");
            return std::process::ExitCode::FAILURE;
        }
    };
    let config = cli.apply_overrides(config);

    engine_logging::initialize(
        config.log_destination.into(),
        cli.log_level(),
        &config.log_file,
    );

    match app::run(&cli.command, &config) {
        Ok(app::Outcome::Success) => std::process::ExitCode::SUCCESS,
        Ok(app::Outcome::Unavailable) => std::process::ExitCode::from(2),
        Err(err) => {
            engine_error!("{:#}", err);
            eprintln!("error: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
