//! Page and session errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::cdp::CdpError;

/// Errors raised while working with a single page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Error on page {url} - No elements found for selector: {selector}")]
    NoElementFound { url: String, selector: String },

    #[error("Error on page {url} - Function already exported: \"{name}\"")]
    FunctionAlreadyExposed { url: String, name: String },

    #[error("Wrong value! Expected one of ['true', 'false'], got: {0}")]
    InvalidCheckboxValue(String),

    #[error("Invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error(transparent)]
    Driver(CdpError),
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Timeout(msg) => PageError::Timeout(msg),
            other => PageError::Driver(other),
        }
    }
}

/// Errors raised by the browser session and bootstrap.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Browser not launched. Run `launch` first.")]
    NotLaunched,

    #[error("AdblockPlus was not loaded!")]
    ExtensionNotLoaded,

    #[error("Could not find directory: \"{}\"!", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Chrome not found. Install Chromium or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
