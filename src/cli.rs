//! CLI definitions for NewsFeel.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// NewsFeel CLI.
#[derive(Parser)]
#[command(name = "newsfeel")]
#[command(about = "Chromium with a pre-configured Adblock Plus, plus page scraping")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: config/newsfeel.toml, then the user config dir)
    #[arg(short, long, global = true, env = "NEWSFEEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run Chromium without a window (scrape commands only)
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the profile if needed, configure Adblock Plus and keep the
    /// browser open until Ctrl+C
    Setup {
        /// Chromium profile directory
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Unpacked Adblock Plus directory
        #[arg(long)]
        extension: Option<PathBuf>,
    },

    /// Print the visible text of an element
    Text {
        #[command(flatten)]
        target: Target,

        /// Selector whose matches are left out (repeatable)
        #[arg(long = "ignore", value_name = "SELECTOR")]
        ignore: Vec<String>,

        /// Use every match instead of the first
        #[arg(long)]
        all: bool,

        /// Separator between matches with --all
        #[arg(long, default_value = "\n")]
        separator: String,
    },

    /// Print the outgoing links of an element
    Links {
        #[command(flatten)]
        target: Target,

        /// Raw href to drop (repeatable)
        #[arg(long = "ignore", value_name = "HREF")]
        ignore: Vec<String>,

        /// Print a JSON array instead of one link per line
        #[arg(long)]
        json: bool,
    },

    /// Print the markup of an element
    Html {
        #[command(flatten)]
        target: Target,
    },
}

/// Page and element a scrape command works on.
#[derive(Args, Debug, Clone)]
pub(crate) struct Target {
    /// Page URL
    pub url: String,

    /// CSS selector
    pub selector: String,

    /// Browse with the configured profile and Adblock Plus loaded
    #[arg(long)]
    pub with_profile: bool,
}
