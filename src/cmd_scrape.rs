//! `newsfeel text|links|html`: open one page and print what was extracted.

use anyhow::bail;
use tracing::debug;

use newsfeel_browser::{BrowserPage, BrowserSession};
use newsfeel_config::Config;

use crate::cli::{Commands, Target};

pub(crate) async fn run(config: &Config, headless: bool, command: Commands) -> anyhow::Result<()> {
    let target = match &command {
        Commands::Text { target, .. } | Commands::Links { target, .. } | Commands::Html { target } => {
            target.clone()
        }
        Commands::Setup { .. } => bail!("setup is not a scrape command"),
    };

    let mut session = BrowserSession::new(config);
    session
        .launch(headless, target.with_profile, target.with_profile)
        .await?;

    let output = scrape(&session, &target, command).await;
    session.close().await?;

    println!("{}", output?);
    Ok(())
}

async fn scrape(session: &BrowserSession, target: &Target, command: Commands) -> anyhow::Result<String> {
    let page = session.get_page_for(&target.url).await?;
    debug!("Scraping {} on {}", target.selector, target.url);

    let output = extract(&page, &target.selector, command).await;
    page.close().await?;
    output
}

async fn extract(page: &BrowserPage, selector: &str, command: Commands) -> anyhow::Result<String> {
    let output = match command {
        Commands::Text {
            ignore,
            all,
            separator,
            ..
        } => {
            let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
            if all {
                page.extract_text_multiple(selector, &ignore, &separator).await?
            } else {
                page.extract_text(selector, &ignore).await?
            }
        }
        Commands::Links { ignore, json, .. } => {
            let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
            let links = page.extract_links(selector, &ignore).await?;
            if json {
                serde_json::to_string_pretty(&links)?
            } else {
                links.join("\n")
            }
        }
        Commands::Html { .. } => page.extract_html(selector).await?,
        Commands::Setup { .. } => bail!("setup is not a scrape command"),
    };
    Ok(output)
}
