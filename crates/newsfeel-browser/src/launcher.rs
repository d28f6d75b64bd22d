//! Chromium discovery and launch arguments.

use std::path::{Path, PathBuf};

use crate::stealth::AUTOMATION_CONTROLLED_FLAG;

/// Which optional parts a launch includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    pub headless: bool,
    pub include_extension: bool,
    pub include_profile: bool,
}

/// Ordered Chromium command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs(Vec<String>);

impl LaunchArgs {
    /// Compute the argument list.
    ///
    /// `profile_dir` is used as the user-data dir as given; callers pass a
    /// throwaway directory when the launch excludes the configured profile.
    pub fn build(
        options: LaunchOptions,
        debug_port: u16,
        extension_dir: &Path,
        profile_dir: &Path,
    ) -> Self {
        let mut args = vec![
            format!("--remote-debugging-port={}", debug_port),
            "--no-sandbox".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-sync".to_string(),
            AUTOMATION_CONTROLLED_FLAG.to_string(),
        ];

        if options.headless {
            args.push("--headless=new".to_string());
        }

        if options.include_extension {
            args.push(format!(
                "--disable-extensions-except={}",
                extension_dir.display()
            ));
            args.push(format!("--load-extension={}", extension_dir.display()));
        }

        args.push(format!("--user-data-dir={}", profile_dir.display()));

        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, arg: &str) -> bool {
        self.0.iter().any(|a| a == arg)
    }
}

/// Find a Chromium-family executable in the usual install locations.
pub fn find_chrome() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    let paths: &[&str] = &[
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    ];

    #[cfg(target_os = "linux")]
    let paths: &[&str] = &[
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
    ];

    #[cfg(target_os = "windows")]
    let paths: &[&str] = &[
        r"C:\Program Files\Chromium\Application\chrome.exe",
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let paths: &[&str] = &[];

    paths.iter().map(PathBuf::from).find(|p| p.exists())
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
