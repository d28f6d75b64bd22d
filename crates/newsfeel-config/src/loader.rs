//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when the file
    /// does not exist. Any other read or parse failure is still an error.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default().with_expanded_paths());
        }
        Self::load(path)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config.with_expanded_paths())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.newsfeel`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    pub(crate) fn expand_path_buf(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(Self::expand_path(s)),
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.debug_port, 9222);
        assert_eq!(config.filter_lists.len(), 3);
    }

    #[test]
    fn test_load_browser_section() {
        let content = r#"
            [browser]
            debug_port = 9333
            profile_dir = "/tmp/newsfeel-profile"
            extension_dir = "/opt/abp-3.12"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert_eq!(config.browser.profile_dir, PathBuf::from("/tmp/newsfeel-profile"));
        assert_eq!(config.browser.extension_dir, PathBuf::from("/opt/abp-3.12"));
    }

    #[test]
    fn test_load_filter_lists_replace_defaults() {
        let content = r#"
            [[filter_lists]]
            name = "Custom"
            selector = 'li[aria-label="Custom"]'
            url = "https://example.com/custom.txt"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.filter_lists.len(), 1);
        assert_eq!(config.filter_lists[0].name, "Custom");
        assert_eq!(config.filter_lists[0].selector, r#"li[aria-label="Custom"]"#);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timing]").unwrap();
        writeln!(file, "update_settle_ms = 100").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.timing.update_settle_ms, 100);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/newsfeel.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/newsfeel.toml")).unwrap();
        assert_eq!(config.extension.settings_path, "desktop-options.html");
    }

    #[test]
    fn test_load_invalid_toml() {
        let content = "invalid = [unclosed";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("NEWSFEEL_TEST_CONFIG_VAR", "test_value");
        }
        let content = "value = \"${NEWSFEEL_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("test_value"));
        unsafe {
            std::env::remove_var("NEWSFEEL_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_NEWSFEEL_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/chrome-profile");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/chrome-profile"));
    }

    #[test]
    fn test_profile_dir_tilde_is_expanded() {
        let content = r#"
            [browser]
            profile_dir = "~/newsfeel-profile"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.browser.profile_dir.starts_with("~"));
        assert!(config.browser.profile_dir.ends_with("newsfeel-profile"));
    }
}
