//! Browser session: the Chromium process, its CDP connection and page opening.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use newsfeel_config::Config;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::cdp::{fetch_version, CdpClient, TargetInfo};
use crate::error::BrowserError;
use crate::launcher::{find_chrome, LaunchArgs, LaunchOptions};
use crate::page::{BrowserPage, CdpDriver, PageDriver};
use crate::settings::SettingsPage;
use crate::stealth::STEALTH_SCRIPT;
use crate::wait::poll_until;

/// Target type Chromium reports for an MV2 extension's background page.
const BACKGROUND_PAGE: &str = "background_page";

const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// A running browser owned by the session.
struct LiveBrowser {
    client: CdpClient,
    process: Child,
    args: LaunchArgs,
    /// Throwaway user-data dir, removed with the browser.
    scratch_profile: Option<PathBuf>,
}

impl Drop for LiveBrowser {
    fn drop(&mut self) {
        if let Some(dir) = self.scratch_profile.take() {
            remove_scratch_profile(&dir);
        }
    }
}

/// Owns at most one Chromium process and the CDP connection to it.
///
/// The process is killed when the session is dropped.
pub struct BrowserSession {
    config: Config,
    profile_path: PathBuf,
    extension_path: PathBuf,
    live: Option<LiveBrowser>,
}

impl BrowserSession {
    /// Session using the profile and extension directories from `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_paths(
            config.browser.profile_dir.clone(),
            config.browser.extension_dir.clone(),
            config,
        )
    }

    pub fn with_paths(
        profile_path: impl Into<PathBuf>,
        extension_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            config: config.clone(),
            profile_path: profile_path.into(),
            extension_path: extension_path.into(),
            live: None,
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    pub fn extension_path(&self) -> &Path {
        &self.extension_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_launched(&self) -> bool {
        self.live.is_some()
    }

    /// Arguments of the running browser.
    pub fn launch_args(&self) -> Option<&LaunchArgs> {
        self.live.as_ref().map(|live| &live.args)
    }

    /// Start Chromium and connect to it.
    ///
    /// Without `include_profile` the browser gets a fresh throwaway profile.
    /// A browser already running under this session is closed first.
    pub async fn launch(
        &mut self,
        headless: bool,
        include_extension: bool,
        include_profile: bool,
    ) -> Result<(), BrowserError> {
        if self.live.is_some() {
            info!("Closing running browser before relaunch");
            self.close().await?;
        }

        let chrome = self
            .config
            .browser
            .chrome_path
            .clone()
            .or_else(find_chrome)
            .ok_or(BrowserError::ChromeNotFound)?;

        let endpoint = self.config.browser.endpoint();
        if let Ok(version) = fetch_version(&endpoint).await {
            return Err(BrowserError::LaunchFailed(format!(
                "debugging port {} is already in use by {}",
                self.config.browser.debug_port, version.browser
            )));
        }

        let scratch_profile = if include_profile {
            None
        } else {
            let dir = std::env::temp_dir().join(format!("newsfeel-{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir)?;
            Some(dir)
        };
        let profile_dir = scratch_profile
            .as_deref()
            .unwrap_or(self.profile_path.as_path());

        let options = LaunchOptions {
            headless,
            include_extension,
            include_profile,
        };
        let args = LaunchArgs::build(
            options,
            self.config.browser.debug_port,
            &self.extension_path,
            profile_dir,
        );

        info!(
            "Launching {} with profile at {}",
            chrome.display(),
            profile_dir.display()
        );
        debug!("Launch arguments: {:?}", args.as_slice());

        let spawned = Command::new(&chrome)
            .args(args.as_slice())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();
        let mut process = match spawned {
            Ok(process) => process,
            Err(e) => {
                if let Some(dir) = &scratch_profile {
                    remove_scratch_profile(dir);
                }
                return Err(BrowserError::LaunchFailed(format!(
                    "{}: {}",
                    chrome.display(),
                    e
                )));
            }
        };
        info!("Chrome launched with PID: {:?}", process.id());

        // From here on the scratch profile goes away with `live`.
        let client = match self.connect_when_ready(&endpoint, &mut process).await {
            Ok(client) => client,
            Err(e) => {
                if let Err(kill_err) = process.kill().await {
                    warn!("Failed to kill Chrome: {}", kill_err);
                }
                if let Some(dir) = &scratch_profile {
                    remove_scratch_profile(dir);
                }
                return Err(e);
            }
        };

        info!("Connected to Chrome at {}", endpoint);
        self.live = Some(LiveBrowser {
            client,
            process,
            args,
            scratch_profile,
        });
        Ok(())
    }

    async fn connect_when_ready(
        &self,
        endpoint: &str,
        process: &mut Child,
    ) -> Result<CdpClient, BrowserError> {
        let timeout = self.config.browser.launch_timeout();
        let interval = self.config.extension.poll_interval();

        let ready = poll_until(timeout, interval, move || async move {
            fetch_version(endpoint).await.ok()
        })
        .await;

        if ready.is_none() {
            if let Some(status) = process.try_wait()? {
                return Err(BrowserError::LaunchFailed(format!(
                    "Chrome exited early with {}",
                    status
                )));
            }
            return Err(BrowserError::LaunchFailed(format!(
                "debugging endpoint {} not ready within {:?}",
                endpoint, timeout
            )));
        }

        Ok(CdpClient::connect(endpoint).await?)
    }

    /// Close the browser. A no-op when nothing is running.
    pub async fn close(&mut self) -> Result<(), BrowserError> {
        let Some(mut live) = self.live.take() else {
            return Ok(());
        };

        if let Err(e) = live.client.call("Browser.close", None).await {
            debug!("Browser.close: {}", e);
        }
        if tokio::time::timeout(CLOSE_GRACE, live.process.wait())
            .await
            .is_err()
        {
            warn!("Chrome did not exit within {:?}, killing it", CLOSE_GRACE);
            if let Err(e) = live.process.kill().await {
                warn!("Failed to kill Chrome: {}", e);
            }
        }

        info!("Browser closed");
        Ok(())
    }

    fn client(&self) -> Result<&CdpClient, BrowserError> {
        self.live
            .as_ref()
            .map(|live| &live.client)
            .ok_or(BrowserError::NotLaunched)
    }

    /// Open a new tab on `url` and wait for it to load and go quiet.
    pub async fn goto(&self, url: &str) -> Result<CdpDriver, BrowserError> {
        let client = self.client()?;
        let session = client.new_page().await?;
        session.add_script_on_new_document(STEALTH_SCRIPT).await?;

        let driver = CdpDriver::new(session, &self.config.timing);
        driver.navigate(url).await?;
        debug!("Opened {}", url);
        Ok(driver)
    }

    /// [`goto`](Self::goto), wrapped for extraction.
    pub async fn get_page_for(&self, url: &str) -> Result<BrowserPage, BrowserError> {
        let driver = self.goto(url).await?;
        Ok(BrowserPage::new(Arc::new(driver))
            .with_selector_timeout(self.config.timing.selector_timeout()))
    }

    /// Open the Adblock Plus options page.
    ///
    /// Waits for the extension's background page to register, up to the
    /// configured discovery timeout.
    pub async fn get_extension_settings_page(&self) -> Result<SettingsPage, BrowserError> {
        let client = self.client()?;
        let extension = &self.config.extension;
        let title = extension.background_title.as_str();

        let target = poll_until(
            extension.discovery_timeout(),
            extension.poll_interval(),
            move || async move {
                match client.get_targets().await {
                    Ok(targets) => find_background_target(&targets, title).cloned(),
                    Err(e) => {
                        debug!("Target.getTargets: {}", e);
                        None
                    }
                }
            },
        )
        .await
        .ok_or(BrowserError::ExtensionNotLoaded)?;

        let host = extension_host(&target.url).ok_or(BrowserError::ExtensionNotLoaded)?;
        let url = format!("chrome-extension://{}/{}", host, extension.settings_path);
        info!("Opening extension settings at {}", url);

        let page = self.get_page_for(&url).await?;
        Ok(SettingsPage::new(page, self.config.timing.update_settle()))
    }
}

/// The extension background page among `targets`.
pub(crate) fn find_background_target<'a>(
    targets: &'a [TargetInfo],
    title: &str,
) -> Option<&'a TargetInfo> {
    targets
        .iter()
        .find(|t| t.target_type == BACKGROUND_PAGE && t.title == title)
}

/// Extension id from a `chrome-extension://<id>/...` URL.
pub fn extension_host(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    if url.scheme() != "chrome-extension" {
        return None;
    }
    url.host_str().map(str::to_string)
}

fn remove_scratch_profile(dir: &Path) {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!("Removed scratch profile {}", dir.display()),
        Err(e) => warn!("Failed to remove scratch profile {}: {}", dir.display(), e),
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
