//! Every node kind serializes, with and without its optional attributes.

use crate::common::*;
use adf_babel::formats::html::{render_to_html, HtmlOptions};
use adf_babel::{
    parse_tree_json, tree_to_markdown, tree_to_render, MarkdownOptions, MediaMap, Node,
    DEFAULT_EXPAND_TITLE, DEFAULT_MEDIA_PLACEHOLDER,
};

fn full_kitchensink() -> Node {
    parse_tree_json(
        r##"{
  "type": "doc",
  "attrs": { "version": 1 },
  "content": [
    { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "All kinds" }] },
    { "type": "paragraph", "content": [
      { "type": "text", "text": "Hi " },
      { "type": "mention", "attrs": { "id": "u1", "text": "@Ann" } },
      { "type": "text", "text": " " },
      { "type": "emoji", "attrs": { "shortName": ":tada:", "text": "🎉" } },
      { "type": "hardBreak" },
      { "type": "inlineCard", "attrs": { "url": "https://example.com/browse/PROJ-1" } },
      { "type": "text", "text": " red", "marks": [{ "type": "textColor", "attrs": { "color": "#ff5630" } }] },
      { "type": "text", "text": " bg", "marks": [{ "type": "backgroundColor", "attrs": { "color": "#ffe380" } }] },
      { "type": "text", "text": " u", "marks": [{ "type": "underline" }] }
    ] },
    { "type": "bulletList", "content": [
      { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "b" }] }] }
    ] },
    { "type": "orderedList", "attrs": { "order": 1 }, "content": [
      { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "o" }] }] }
    ] },
    { "type": "codeBlock", "attrs": { "language": "js" }, "content": [{ "type": "text", "text": "x < 1" }] },
    { "type": "blockquote", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "q" }] }] },
    { "type": "rule" },
    { "type": "table", "content": [
      { "type": "tableRow", "content": [
        { "type": "tableHeader", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "H" }] }] }
      ] },
      { "type": "tableRow", "content": [
        { "type": "tableCell", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "C" }] }] }
      ] }
    ] },
    { "type": "panel", "attrs": { "panelType": "success" }, "content": [
      { "type": "paragraph", "content": [{ "type": "text", "text": "done" }] }
    ] },
    { "type": "expand", "attrs": { "title": "More" }, "content": [
      { "type": "paragraph", "content": [{ "type": "text", "text": "hidden" }] }
    ] },
    { "type": "mediaSingle", "attrs": { "layout": "center" }, "content": [
      { "type": "media", "attrs": { "id": "m1", "type": "file", "alt": "diagram" } }
    ] }
  ]
}"##,
    )
    .expect("kitchensink should decode")
}

#[test]
fn test_every_kind_serializes_to_markdown() {
    let md = tree_to_markdown(&full_kitchensink()).unwrap();

    assert!(md.starts_with("# All kinds"));
    assert!(md.contains("Hi @Ann 🎉\n[https://example.com/browse/PROJ-1]"));
    assert!(md.contains("- b"));
    assert!(md.contains("1. o"));
    assert!(md.contains("```js\nx < 1\n```"));
    assert!(md.contains("> **SUCCESS:** done"));
    assert!(md.contains("<summary>More</summary>"));
    assert!(md.ends_with("[Media]"));
}

#[test]
fn test_every_kind_renders() {
    let media = MediaMap::from([("m1".to_string(), "https://cdn.example/m1.png".to_string())]);
    let output = tree_to_render(&full_kitchensink(), &media).unwrap();

    assert!(output.unresolved_media.is_empty());
    for fragment in [
        "<h1>All kinds</h1>",
        r#"<span class="adf-mention" data-mention-id="u1">@Ann</span>"#,
        r#"<span class="adf-emoji" title=":tada:">🎉</span>"#,
        "<br>",
        r#"<span style="color: #ff5630"> red</span>"#,
        r#"<span style="background-color: #ffe380"> bg</span>"#,
        "<u> u</u>",
        "<ul><li><p>b</p></li></ul>",
        "<ol><li><p>o</p></li></ol>",
        r#"<code class="language-js">x &lt; 1</code>"#,
        "<blockquote><p>q</p></blockquote>",
        "<hr>",
        "<thead><tr><th><p>H</p></th></tr></thead>",
        "<tbody><tr><td><p>C</p></td></tr></tbody>",
        r#"class="adf-panel adf-panel-success""#,
        r#"<summary>More</summary><p>hidden</p>"#,
        r#"<img class="adf-media" src="https://cdn.example/m1.png" alt="diagram">"#,
    ] {
        assert!(
            output.html.contains(fragment),
            "missing {fragment:?} in {}",
            output.html
        );
    }
}

#[test]
fn test_sparse_attributes_never_fail() {
    let tree = parse_tree_json(SPARSE_KITCHENSINK).expect("sparse kitchensink should decode");

    let md = tree_to_markdown(&tree).unwrap();
    assert!(md.contains("> **INFO:**"));
    assert!(md.contains("@unknown"));
    assert!(md.contains("kept"));

    let output = tree_to_render(&tree, &MediaMap::new()).unwrap();
    assert!(output.html.contains("adf-panel-info"));
    assert!(output.html.contains("<h1></h1>"));
    assert!(output.html.contains("kept"));
    // Media without an id falls back to the placeholder but has nothing to report.
    assert!(output.unresolved_media.is_empty());

    let standalone = render_to_html(&tree, &MediaMap::new(), &HtmlOptions::standalone());
    assert!(standalone.is_ok());
}

#[test]
fn test_every_block_kind_alone() {
    let blocks = vec![
        p("x"),
        Node::heading(0, vec![]),
        bullets(vec![]),
        ordered(vec![li(vec![])]),
        Node::code_block(None, ""),
        Node::Blockquote { content: vec![] },
        Node::Rule,
        Node::HardBreak,
        table(vec![]),
        table(vec![row(vec![])]),
        Node::Panel {
            panel_type: String::new(),
            content: vec![],
        },
        Node::Expand {
            title: Some(String::new()),
            content: vec![],
        },
        Node::MediaSingle { content: vec![] },
        Node::Media { id: None, alt: None },
        Node::Mention {
            id: None,
            text: String::new(),
        },
        Node::Emoji {
            short_name: String::new(),
            text: None,
        },
        Node::InlineCard { url: String::new() },
        Node::text(""),
        Node::Unknown {
            kind: "mystery".to_string(),
            attrs: None,
            text: None,
            content: vec![],
        },
    ];

    for block in blocks {
        let tree = doc(vec![block.clone()]);
        assert!(tree_to_markdown(&tree).is_ok(), "markdown failed on {block:?}");
        assert!(
            tree_to_render(&tree, &MediaMap::new()).is_ok(),
            "render failed on {block:?}"
        );
    }
}

#[test]
fn test_degraded_output_shares_defaults_across_formats() {
    assert_eq!(
        MarkdownOptions::default().media_placeholder,
        HtmlOptions::default().media_placeholder
    );
    assert_eq!(HtmlOptions::default().media_placeholder, DEFAULT_MEDIA_PLACEHOLDER);

    let tree = doc(vec![
        Node::Expand {
            title: None,
            content: vec![p("hidden")],
        },
        media_single("gone"),
    ]);
    let summary = format!("<summary>{DEFAULT_EXPAND_TITLE}</summary>");

    let md = tree_to_markdown(&tree).unwrap();
    assert!(md.contains(&summary));
    assert!(md.ends_with(DEFAULT_MEDIA_PLACEHOLDER));

    let html = tree_to_render(&tree, &MediaMap::new()).unwrap().html;
    assert!(html.contains(&summary));
    assert!(html.contains(&format!(">{DEFAULT_MEDIA_PLACEHOLDER}</span>")));
}
