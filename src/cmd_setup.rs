//! `newsfeel setup`: bootstrap the browser and keep it open.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use newsfeel_browser::bootstrap;
use newsfeel_config::{Config, ConfigLoader};

pub(crate) async fn run(
    config: &Config,
    profile: Option<PathBuf>,
    extension: Option<PathBuf>,
) -> anyhow::Result<()> {
    let profile = profile
        .map(|p| expand(&p))
        .unwrap_or_else(|| config.browser.profile_dir.clone());
    let extension = extension
        .map(|p| expand(&p))
        .unwrap_or_else(|| config.browser.extension_dir.clone());

    let mut session = bootstrap::launch_with_defaults(&profile, &extension, config)
        .await
        .context("Browser setup failed")?;

    info!("Browser ready with profile {}, press Ctrl+C to close", profile.display());
    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    session.close().await?;
    Ok(())
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()))
}
