//! NewsFeel - Chromium with a pre-configured Adblock Plus
//!
//! Main entry point for the NewsFeel CLI.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsfeel_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

mod cli;
mod cmd_scrape;
mod cmd_setup;

use cli::{Cli, Commands};

const PROJECT_CONFIG: &str = "config/newsfeel.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref(), dirs::config_dir());
    let config = ConfigLoader::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    init_tracing(&config.logging)?;
    debug!("Using configuration {}", config_path.display());

    check_config(&config)?;

    match cli.command {
        Commands::Setup { profile, extension } => cmd_setup::run(&config, profile, extension).await,
        command => cmd_scrape::run(&config, cli.headless, command).await,
    }
}

/// Pick the configuration file: an explicit path wins, then the project file,
/// then `newsfeel/newsfeel.toml` under the user config directory.
fn resolve_config_path(explicit: Option<&Path>, user_config_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let project = PathBuf::from(PROJECT_CONFIG);
    if project.exists() {
        return project;
    }
    match user_config_dir {
        Some(dir) => dir.join("newsfeel").join("newsfeel.toml"),
        None => project,
    }
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        warn!("Config: {}", warning);
    }
    if let Some(err) = result.into_error() {
        return Err(err.into());
    }
    Ok(())
}

/// Initialize tracing with console output on stderr and, when a log
/// directory is configured, a daily rolling file.
///
/// Stdout carries scrape output only.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let file_layer = match &logging.dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("newsfeel")
                .filename_suffix("log")
                .max_log_files(30)
                .build(log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keeps the writer alive for the program duration
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_wins() {
        let path = resolve_config_path(
            Some(Path::new("/etc/newsfeel.toml")),
            Some(PathBuf::from("/home/user/.config")),
        );
        assert_eq!(path, PathBuf::from("/etc/newsfeel.toml"));
    }

    #[test]
    fn test_user_config_dir_fallback() {
        let user_dir = tempfile::tempdir().unwrap();
        let path = resolve_config_path(None, Some(user_dir.path().to_path_buf()));

        if Path::new(PROJECT_CONFIG).exists() {
            assert_eq!(path, PathBuf::from(PROJECT_CONFIG));
        } else {
            assert_eq!(path, user_dir.path().join("newsfeel").join("newsfeel.toml"));
        }
    }

    #[test]
    fn test_check_config_rejects_invalid() {
        let mut config = Config::default();
        config.browser.debug_port = 0;
        assert!(check_config(&config).is_err());
    }

    #[test]
    fn test_check_config_accepts_defaults() {
        assert!(check_config(&Config::default()).is_ok());
    }
}
