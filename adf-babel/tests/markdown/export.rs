//! Export tests for Markdown format (tree → Markdown)

use crate::common::*;
use adf_babel::formats::markdown::serializer::serialize_to_markdown_with_options;
use adf_babel::{tree_to_markdown, ConvertError, Mark, MarkdownOptions, Node, SubSupType};
use insta::assert_snapshot;

fn md(tree: &Node) -> String {
    tree_to_markdown(tree).expect("tree should serialize")
}

#[test]
fn test_blocks_are_separated_by_blank_lines() {
    let tree = doc(vec![
        Node::heading(2, vec![Node::text("Title")]),
        p("First."),
        p("Second."),
    ]);
    assert_snapshot!(md(&tree), @r"
## Title

First.

Second.
");
}

#[test]
fn test_heading_level_is_clamped() {
    let tree = doc(vec![Node::heading(8, vec![Node::text("Deep")])]);
    assert_eq!(md(&tree), "###### Deep");
}

#[test]
fn test_inline_marks() {
    let tree = doc(vec![Node::paragraph(vec![
        Node::text("plain "),
        marked("bold", vec![Mark::Strong]),
        Node::text(" "),
        marked("em", vec![Mark::Em]),
        Node::text(" "),
        marked("gone", vec![Mark::Strike]),
        Node::text(" "),
        marked("code", vec![Mark::Code]),
        Node::text(" "),
        marked("under", vec![Mark::Underline]),
        Node::text(" x"),
        marked("2", vec![Mark::SubSup(SubSupType::Sup)]),
        Node::text(" H"),
        marked("2", vec![Mark::SubSup(SubSupType::Sub)]),
        Node::text("O"),
    ])]);
    assert_snapshot!(
        md(&tree),
        @"plain **bold** *em* ~~gone~~ `code` <u>under</u> x<sup>2</sup> H<sub>2</sub>O"
    );
}

#[test]
fn test_link_wraps_styled_label() {
    let tree = doc(vec![Node::paragraph(vec![marked(
        "docs",
        vec![Mark::link("https://example.com"), Mark::Strong],
    )])]);
    assert_eq!(md(&tree), "[**docs**](https://example.com)");
}

#[test]
fn test_code_is_innermost() {
    let tree = doc(vec![Node::paragraph(vec![marked(
        "x",
        vec![Mark::Strong, Mark::Code],
    )])]);
    assert_eq!(md(&tree), "**`x`**");
}

#[test]
fn test_combined_strong_em() {
    let tree = doc(vec![Node::paragraph(vec![marked(
        "both",
        vec![Mark::Strong, Mark::Em],
    )])]);
    assert_eq!(md(&tree), "***both***");
}

#[test]
fn test_whitespace_stays_outside_delimiters() {
    let tree = doc(vec![Node::paragraph(vec![
        marked("bold ", vec![Mark::Strong]),
        Node::text("tail"),
    ])]);
    assert_eq!(md(&tree), "**bold** tail");
}

#[test]
fn test_colour_and_unknown_marks_pass_through() {
    let tree = doc(vec![Node::paragraph(vec![
        marked(
            "red",
            vec![Mark::TextColor {
                color: "#ff0000".to_string(),
            }],
        ),
        marked(
            " note",
            vec![Mark::Unknown {
                kind: "annotation".to_string(),
                attrs: None,
            }],
        ),
    ])]);
    assert_eq!(md(&tree), "red note");
}

#[test]
fn test_nested_lists_indent_two_spaces_per_level() {
    let tree = doc(vec![bullets(vec![
        li(vec![
            p("one"),
            ordered(vec![
                li(vec![p("a")]),
                li(vec![p("b"), bullets(vec![li(vec![p("deep")])])]),
            ]),
        ]),
        li(vec![p("two")]),
    ])]);
    assert_snapshot!(md(&tree), @r"
- one
  1. a
  2. b
    - deep
- two
");
}

#[test]
fn test_list_item_with_several_paragraphs() {
    let tree = doc(vec![ordered(vec![li(vec![p("first"), p("second")])])]);
    assert_eq!(md(&tree), "1. first\n  second");
}

#[test]
fn test_code_block() {
    let tree = doc(vec![Node::code_block(
        Some("rust".to_string()),
        "fn main() {\n    println!(\"hi\");\n}",
    )]);
    assert_snapshot!(md(&tree), @r#"
```rust
fn main() {
    println!("hi");
}
```
"#);
}

#[test]
fn test_code_block_without_language() {
    let tree = doc(vec![Node::code_block(None, "plain")]);
    assert_eq!(md(&tree), "```\nplain\n```");
}

#[test]
fn test_blockquote_prefixes_every_line() {
    let tree = doc(vec![Node::Blockquote {
        content: vec![p("a"), p("b")],
    }]);
    assert_eq!(md(&tree), "> a\n> \n> b");
}

#[test]
fn test_rule_and_hard_break() {
    let tree = doc(vec![
        Node::paragraph(vec![Node::text("a"), Node::HardBreak, Node::text("b")]),
        Node::Rule,
        p("c"),
    ]);
    assert_eq!(md(&tree), "a\nb\n\n---\n\nc");
}

#[test]
fn test_panel_degrades_to_labelled_quote() {
    let tree = doc(vec![Node::Panel {
        panel_type: "warning".to_string(),
        content: vec![p("Careful")],
    }]);
    assert_eq!(md(&tree), "> **WARNING:** Careful");
}

#[test]
fn test_expand_uses_details() {
    let tree = doc(vec![Node::Expand {
        title: Some("More <info>".to_string()),
        content: vec![p("Hidden")],
    }]);
    assert_snapshot!(md(&tree), @r"
<details>
<summary>More &lt;info&gt;</summary>

Hidden

</details>
");
}

#[test]
fn test_expand_without_title() {
    let tree = doc(vec![Node::Expand {
        title: None,
        content: vec![p("Hidden")],
    }]);
    assert!(md(&tree).starts_with("<details>\n<summary>Details</summary>"));
}

#[test]
fn test_media_placeholder() {
    let tree = doc(vec![media_single("abc"), Node::Media { id: None, alt: None }]);
    assert_eq!(md(&tree), "[Media]\n\n[Media]");

    let options = MarkdownOptions {
        media_placeholder: "(attachment)".to_string(),
        ..MarkdownOptions::default()
    };
    assert_eq!(
        serialize_to_markdown_with_options(&tree, &options).unwrap(),
        "(attachment)\n\n(attachment)"
    );
}

#[test]
fn test_badges_degrade_to_text() {
    let tree = doc(vec![Node::paragraph(vec![
        Node::Mention {
            id: Some("u1".to_string()),
            text: "@Ann".to_string(),
        },
        Node::text(" "),
        Node::Emoji {
            short_name: ":smile:".to_string(),
            text: Some("😄".to_string()),
        },
        Node::text(" "),
        Node::Emoji {
            short_name: ":custom:".to_string(),
            text: None,
        },
        Node::text(" "),
        Node::InlineCard {
            url: "https://x.example/a".to_string(),
        },
    ])]);
    assert_eq!(
        md(&tree),
        "@Ann 😄 :custom: [https://x.example/a](https://x.example/a)"
    );
}

#[test]
fn test_unknown_nodes_render_their_children() {
    let tree = doc(vec![Node::Unknown {
        kind: "decisionList".to_string(),
        attrs: None,
        text: None,
        content: vec![p("one"), p("two")],
    }]);
    assert_eq!(md(&tree), "one\n\ntwo");
}

#[test]
fn test_non_doc_root_is_rejected() {
    let err = tree_to_markdown(&p("loose")).unwrap_err();
    assert_eq!(
        err,
        ConvertError::InvalidRoot {
            found: "paragraph".to_string()
        }
    );
}
