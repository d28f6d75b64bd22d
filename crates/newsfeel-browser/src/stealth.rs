//! Automation fingerprint patching.
//!
//! Injected into every page the session opens, before any document script.

/// Hides `navigator.webdriver` and fills in what headful Chrome normally
/// exposes to page script.
pub const STEALTH_SCRIPT: &str = r#"
(() => {
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true,
    });

    if (!window.chrome) {
        window.chrome = {};
    }
    if (!window.chrome.runtime) {
        window.chrome.runtime = {
            connect: function() {},
            sendMessage: function() {},
        };
    }

    const originalQuery = window.navigator.permissions && window.navigator.permissions.query;
    if (originalQuery) {
        window.navigator.permissions.query = (parameters) =>
            parameters.name === 'notifications'
                ? Promise.resolve({ state: Notification.permission })
                : originalQuery.call(window.navigator.permissions, parameters);
    }

    if (navigator.plugins.length === 0) {
        Object.defineProperty(navigator, 'plugins', {
            get: () => [1, 2, 3, 4, 5],
            configurable: true,
        });
    }

    if (!navigator.languages || navigator.languages.length === 0) {
        Object.defineProperty(navigator, 'languages', {
            get: () => ['en-US', 'en'],
            configurable: true,
        });
    }
})();
"#;

/// Launch flag that keeps Blink from advertising automation.
pub const AUTOMATION_CONTROLLED_FLAG: &str = "--disable-blink-features=AutomationControlled";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_patches_webdriver() {
        assert!(STEALTH_SCRIPT.contains("'webdriver'"));
        assert!(STEALTH_SCRIPT.trim_start().starts_with("(() =>"));
        assert!(STEALTH_SCRIPT.trim_end().ends_with("})();"));
    }
}
