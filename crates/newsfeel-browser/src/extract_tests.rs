use super::*;

#[test]
fn test_collapse_separators() {
    assert_eq!(
        collapse_separators("  Lorep   \n ipsum \t   dolor sit      amet   \n\n"),
        "Lorep ipsum dolor sit amet"
    );
}

#[test]
fn test_collapse_separators_idempotent() {
    for input in ["  a \n\n b\t", "", "   ", "single", "x\u{a0}\u{a0}y"] {
        let once = collapse_separators(input);
        assert_eq!(collapse_separators(&once), once);
    }
}

#[test]
fn test_collapse_separators_single_newline() {
    assert_eq!(collapse_separators("a\nb\tc"), "a b c");
}

#[test]
fn test_visible_text_inline_markup() {
    let html = "<p>Hello <b>bold</b>world</p>";
    assert_eq!(visible_text(html), "Hello boldworld");
}

#[test]
fn test_visible_text_block_boundaries() {
    let html = "<div><h1>Title</h1><p>First</p><p>Second<br>line</p></div>";
    assert_eq!(visible_text(html), "Title First Second line");
}

#[test]
fn test_visible_text_skips_invisible() {
    let html = r#"<article>Body<script>var x = 1;</script><style>p{}</style><span hidden>secret</span> end</article>"#;
    assert_eq!(visible_text(html), "Body end");
}


#[test]
fn test_visible_text_body_element() {
    let html = "<body><h1>News</h1><p>Story  text</p></body>";
    assert_eq!(visible_text(html), "News Story text");
}

#[test]
fn test_visible_text_table_cell() {
    assert_eq!(visible_text("<td> 42 <i>kg</i></td>"), "42 kg");
}

#[test]
fn test_visible_text_table_row() {
    assert_eq!(visible_text("<tr><td>Price</td><td>42</td></tr>"), "Price 42");
}

#[test]
fn test_parse_selectors_invalid() {
    let result = parse_selectors(&["div", "p[["]);
    match result {
        Err(PageError::InvalidSelector { selector, .. }) => assert_eq!(selector, "p[["),
        other => panic!("unexpected: {:?}", other),
    }
}

fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_attribute_values_single() {
    let attributes = attrs(&[("href", "/x"), ("title", "X")]);
    assert_eq!(
        attribute_values(&attributes, &["href", "data-missing"]),
        AttributeValues::Single("/x".to_string())
    );
}

#[test]
fn test_attribute_values_many_in_request_order() {
    let attributes = attrs(&[("src", "a.png"), ("alt", "A"), ("width", "10")]);
    let values = attribute_values(&attributes, &["width", "src"]);
    assert_eq!(
        values,
        AttributeValues::Many(vec!["10".to_string(), "a.png".to_string()])
    );
    assert!(values.as_single().is_none());
}

#[test]
fn test_attribute_values_none_present() {
    let values = attribute_values(&[], &["id"]);
    assert_eq!(values, AttributeValues::Many(vec![]));
    assert!(values.into_vec().is_empty());
}

#[test]
fn test_parse_element_keeps_table_parts() {
    for (html, tag) in [
        (r#"<td class="price" data-v="42">42</td>"#, "td"),
        (r#"<tr data-id="7"><td>x</td></tr>"#, "tr"),
        (r#"<tbody id="rows"><tr><td>x</td></tr></tbody>"#, "tbody"),
        (r#"<caption id="c">Prices</caption>"#, "caption"),
    ] {
        let doc = parse_element(html);
        let root = element_root(&doc, html);
        assert_eq!(root.value().name(), tag);
        assert!(root.value().attrs().next().is_some(), "{} lost its attributes", tag);
    }
}

#[test]
fn test_anchor_hrefs_document_order() {
    let html = r##"<nav><a href="link.net">a</a><a>no href</a><p><a href="/test">b</a></p><a href="#test">c</a></nav>"##;
    assert_eq!(anchor_hrefs(html), vec!["link.net", "/test", "#test"]);
}

#[test]
fn test_anchor_hrefs_excludes_the_element_itself() {
    assert!(anchor_hrefs(r#"<a href="/self"><span>icon</span></a>"#).is_empty());

    let html = r#"<div class="card"><a href="/story">Story</a></div>"#;
    assert_eq!(anchor_hrefs(html), vec!["/story"]);
}

#[test]
fn test_anchor_hrefs_in_table_row() {
    let html = r#"<tr><td><a href="/a">a</a></td><td><a href="/b">b</a></td></tr>"#;
    assert_eq!(anchor_hrefs(html), vec!["/a", "/b"]);
}

#[test]
fn test_normalize_links() {
    let hrefs = vec!["link.net".to_string(), "/test".to_string(), "#test".to_string()];
    let links = normalize_links(hrefs, &["link.net"], "https://news.example.com:8443/a/b?q=1");
    assert_eq!(
        links,
        vec![
            "https://news.example.com:8443/test",
            "https://news.example.com:8443/a/b?q=1#test",
        ]
    );
}

#[test]
fn test_normalize_links_ignore_matches_raw_href() {
    let hrefs = vec!["/test".to_string(), "/keep".to_string()];
    let links = normalize_links(hrefs, &["/test"], "https://example.com/");
    assert_eq!(links, vec!["https://example.com/keep"]);
}

#[test]
fn test_normalize_links_opaque_origin() {
    let hrefs = vec!["/test".to_string(), "#top".to_string()];
    let links = normalize_links(hrefs, &[], "file:///tmp/page.html");
    assert_eq!(links, vec!["/test", "file:///tmp/page.html#top"]);
}

#[test]
fn test_normalize_links_protocol_relative() {
    let hrefs = vec!["//cdn.example.org/x.js".to_string()];
    let links = normalize_links(hrefs, &[], "https://example.com/page");
    assert_eq!(links, vec!["https://cdn.example.org/x.js"]);
}

#[test]
fn test_origin_of() {
    assert_eq!(
        origin_of("https://example.com/path?x=1").as_deref(),
        Some("https://example.com")
    );
    assert_eq!(
        origin_of("http://localhost:8080/").as_deref(),
        Some("http://localhost:8080")
    );
    assert_eq!(origin_of("about:blank"), None);
    assert_eq!(origin_of("file:///tmp/a.html"), None);
    assert_eq!(origin_of("not a url"), None);
}

#[test]
fn test_leading_tag() {
    assert_eq!(leading_tag("  <DIV class=x>").as_deref(), Some("div"));
    assert_eq!(leading_tag("<my-widget>").as_deref(), Some("my-widget"));
    assert_eq!(leading_tag("text"), None);
}
