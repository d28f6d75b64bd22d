//! # NewsFeel Browser
//!
//! Drives a desktop Chromium over the Chrome DevTools Protocol.
//!
//! - [`cdp`]: WebSocket CDP client and per-target page sessions.
//! - [`BrowserPage`]: text, attribute, markup and link extraction over a
//!   [`PageDriver`].
//! - [`SettingsPage`]: the Adblock Plus options page automator.
//! - [`BrowserSession`]: owns the Chromium process and its CDP connection.
//! - [`bootstrap`]: the canned first-run sequence.
//!
//! ```rust,ignore
//! let config = ConfigLoader::load_or_default(Path::new("config/newsfeel.toml"))?;
//! let mut session = BrowserSession::new(&config);
//! session.launch(true, false, false).await?;
//! let page = session.get_page_for("https://example.com").await?;
//! let text = page.extract_text("body", &["nav", "footer"]).await?;
//! ```

pub mod bootstrap;
pub mod cdp;
mod error;
pub mod extract;
mod launcher;
mod page;
mod session;
mod settings;
pub mod stealth;
mod wait;

pub use error::{BrowserError, PageError};
pub use launcher::{find_chrome, LaunchArgs, LaunchOptions};
pub use page::{AttributeValues, BindingCallback, BrowserPage, CdpDriver, ElementHandle, PageDriver};
pub use session::{extension_host, BrowserSession};
pub use settings::{selectors, SettingsPage};
