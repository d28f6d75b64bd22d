//! Integration tests against a real Chromium.
//!
//! Ignored by default. Run with:
//! cargo test -p newsfeel-browser --test integration_test -- --ignored --nocapture

use std::io::Write;

use newsfeel_browser::{find_chrome, AttributeValues, BrowserError, BrowserSession, PageError};
use newsfeel_config::Config;

/// Config on a port that will not clash with a desktop browser.
fn test_config() -> Config {
    let mut config = Config::default();
    config.browser.debug_port = 9333;
    config.extension.discovery_timeout_ms = 1_000;
    config
}

fn fixture_page() -> (tempfile::NamedTempFile, String) {
    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    write!(
        file,
        r##"<html><body>
            <div id="story"><h1>Headline</h1><p>First   paragraph.</p><aside class="ad">Buy!</aside></div>
            <table><tr data-id="7"><td class="price" data-v="42">42 <span class="unit">kg</span></td></tr></table>
            <nav><a href="link.net">a</a><a href="/test">b</a><a href="#test">c</a></nav>
            <iframe src="about:blank"></iframe>
        </body></html>"##
    )
    .unwrap();
    let url = url::Url::from_file_path(file.path()).unwrap().to_string();
    (file, url)
}

#[tokio::test]
#[ignore]
async fn test_chrome_detection() {
    let chrome_path = find_chrome();
    assert!(chrome_path.is_some(), "Chromium should be installed on the system");
    println!("Found Chromium at: {}", chrome_path.unwrap().display());
}

#[tokio::test]
#[ignore]
async fn test_extract_from_local_page() {
    let (_file, url) = fixture_page();
    let mut session = BrowserSession::new(&test_config());
    session.launch(true, false, false).await.unwrap();

    let page = session.get_page_for(&url).await.unwrap();
    assert_eq!(
        page.extract_text("#story", &[".ad"]).await.unwrap(),
        "Headline First paragraph."
    );
    assert_eq!(
        page.extract_text("td.price", &["table .unit"]).await.unwrap(),
        "42"
    );
    assert_eq!(
        page.extract_attributes("td.price", &["class", "data-v"]).await.unwrap(),
        AttributeValues::Many(vec!["price".to_string(), "42".to_string()])
    );
    assert_eq!(
        page.extract_attributes("tr", &["data-id"]).await.unwrap(),
        AttributeValues::Single("7".to_string())
    );
    assert_eq!(
        page.extract_links("nav", &["link.net"]).await.unwrap(),
        vec!["/test".to_string(), format!("{}#test", url)]
    );
    assert!(matches!(
        page.extract_html("#missing").await,
        Err(PageError::NoElementFound { .. })
    ));
    assert_eq!(page.remove_all_iframes().await.unwrap(), 1);

    page.expose_function("onItem", |_| {}, true).await.unwrap();
    assert!(matches!(
        page.expose_function("onItem", |_| {}, false).await,
        Err(PageError::FunctionAlreadyExposed { .. })
    ));

    page.close().await.unwrap();
    session.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_extension_not_loaded() {
    let mut session = BrowserSession::new(&test_config());
    session.launch(true, false, false).await.unwrap();

    let result = session.get_extension_settings_page().await;
    assert!(matches!(result, Err(BrowserError::ExtensionNotLoaded)));

    session.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_relaunch_replaces_browser() {
    let profile = tempfile::tempdir().unwrap();
    let mut session = BrowserSession::with_paths(profile.path(), "/tmp/ext", &test_config());

    session.launch(true, false, true).await.unwrap();
    let expected = format!("--user-data-dir={}", profile.path().display());
    assert!(session.launch_args().unwrap().contains(&expected));

    session.launch(true, false, false).await.unwrap();
    assert!(!session.launch_args().unwrap().contains(&expected));

    session.close().await.unwrap();
    assert!(!session.is_launched());
}
