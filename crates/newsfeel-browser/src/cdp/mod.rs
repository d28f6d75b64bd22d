//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chromium over WebSocket and speaks the CDP JSON-RPC protocol.
//! Each attached target gets a [`PageSession`] with its own event pump.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::{fetch_version, CdpClient};
pub use error::CdpError;
pub use protocol::*;
pub use session::{BindingFn, ElementSnapshot, NetworkIdle, NetworkTracker, PageSession};
