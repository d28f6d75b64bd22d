//! First-run bootstrap: make sure a profile exists, then launch with the
//! extension and configure it.

use std::path::PathBuf;

use newsfeel_config::{Config, FilterListConfig};
use tracing::{info, warn};

use crate::error::{BrowserError, PageError};
use crate::session::BrowserSession;
use crate::settings::SettingsPage;
use crate::wait::poll_until;

/// Create the session's profile directory by briefly running Chromium on it.
///
/// A no-op when the directory already exists. The probe browser is closed
/// whether or not the launch succeeded.
pub async fn ensure_profile_exists(session: &mut BrowserSession) -> Result<(), BrowserError> {
    if session.profile_path().exists() {
        return Ok(());
    }

    info!(
        "Profile {} missing, starting Chromium once to create it",
        session.profile_path().display()
    );
    let launched = session.launch(false, false, true).await;

    if launched.is_ok() {
        let profile = session.profile_path().to_path_buf();
        let timing = &session.config().timing;
        let interval = session.config().extension.poll_interval();
        let created = poll_until(timing.profile_wait(), interval, move || {
            let profile = profile.clone();
            async move { profile.exists().then_some(()) }
        })
        .await;
        if created.is_none() {
            warn!(
                "Profile {} still missing after {:?}",
                session.profile_path().display(),
                timing.profile_wait()
            );
        }
    }

    let closed = session.close().await;
    launched?;
    closed
}

/// Apply the standard extension settings and subscribe to `filter_lists`.
pub async fn configure_extension(
    settings: &mut SettingsPage,
    filter_lists: &[FilterListConfig],
) -> Result<(), PageError> {
    settings.disable_acceptable_ads().await?;
    settings.enable_all_anti_tracking_options().await?;
    settings.go_to_advanced_tab().await?;

    for list in filter_lists {
        if settings.add_filter_list(&list.selector, &list.url).await? {
            info!("Added filter list {}", list.name);
        }
    }

    settings.update_all_filter_lists().await?;
    info!("Adblock Plus configured");
    Ok(())
}

/// Launch a headful browser with Adblock Plus set up and return it running.
pub async fn launch_with_defaults(
    profile_path: impl Into<PathBuf>,
    extension_path: impl Into<PathBuf>,
    config: &Config,
) -> Result<BrowserSession, BrowserError> {
    let extension_path = extension_path.into();
    if !extension_path.is_dir() {
        return Err(BrowserError::DirectoryNotFound(extension_path));
    }

    let mut session = BrowserSession::with_paths(profile_path, extension_path, config);
    ensure_profile_exists(&mut session).await?;

    session.launch(false, true, true).await?;
    let mut settings = session.get_extension_settings_page().await?;
    configure_extension(&mut settings, &config.filter_lists).await?;

    Ok(session)
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
