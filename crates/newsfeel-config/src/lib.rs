//! # NewsFeel Config
//!
//! Configuration for the NewsFeel browser: where Chromium and the Adblock Plus
//! build live, how long the automation waits for things, and which filter
//! lists get subscribed during setup.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
