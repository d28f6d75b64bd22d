//! Configuration validation.

use std::fmt;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the collected errors into a single [`ConfigError`].
    pub fn into_error(self) -> Option<ConfigError> {
        let first = self.errors.into_iter().next()?;
        Some(ConfigError::InvalidValue {
            field: first.path,
            message: first.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

const MAX_SETTLE_MS: u64 = 60_000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_extension(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_filter_lists(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new("browser.debug_port", "Port cannot be 0"));
        }

        if config.browser.launch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms must be greater than 0",
            ));
        }

        if let Some(ref chrome) = config.browser.chrome_path {
            if !chrome.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chromium executable does not exist: {:?}", chrome),
                ));
            }
        }
    }

    fn validate_extension(config: &Config, result: &mut ValidationResult) {
        if config.extension.background_title.is_empty() {
            result.add_error(ValidationError::new(
                "extension.background_title",
                "Background page title cannot be empty",
            ));
        }

        if config.extension.settings_path.is_empty() {
            result.add_error(ValidationError::new(
                "extension.settings_path",
                "Settings page path cannot be empty",
            ));
        }

        if config.extension.discovery_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "extension.discovery_timeout_ms",
                "discovery_timeout_ms must be greater than 0",
            ));
        }

        if config.extension.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "extension.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;
        for (field, value) in [
            ("timing.navigation_timeout_ms", timing.navigation_timeout_ms),
            ("timing.selector_timeout_ms", timing.selector_timeout_ms),
            ("timing.network_idle_ms", timing.network_idle_ms),
            ("timing.profile_wait_ms", timing.profile_wait_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(field, "Timeout must be greater than 0"));
            }
        }

        if timing.update_settle_ms > MAX_SETTLE_MS {
            result.add_warning(ValidationWarning::new(
                "timing.update_settle_ms",
                "update_settle_ms is very high (>60s), setup will be slow",
            ));
        }
    }

    fn validate_filter_lists(config: &Config, result: &mut ValidationResult) {
        if config.filter_lists.is_empty() {
            result.add_warning(ValidationWarning::new(
                "filter_lists",
                "No filter lists configured, setup will only reset the extension",
            ));
        }

        for (i, list) in config.filter_lists.iter().enumerate() {
            let path = format!("filter_lists[{}]", i);

            if list.name.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.name", path),
                    "Filter list name cannot be empty",
                ));
            }

            if list.selector.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.selector", path),
                    "Filter list selector cannot be empty",
                ));
            }

            if !list.url.starts_with("http://") && !list.url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    format!("{}.url", path),
                    "url must start with http:// or https://",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
