//! JSON wire format tests

use crate::common::*;
use adf_babel::formats::AdfFormat;
use adf_babel::{parse_tree_json, tree_to_json, ConvertError, Format, Mark, Node, SubSupType};
use serde_json::{json, Value};

#[test]
fn test_decode_issue_comment() {
    let source = json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [
                    { "type": "text", "text": "Hi " },
                    { "type": "mention", "attrs": { "id": "557058:abc", "text": "@Ann" } },
                    { "type": "text", "text": ", see " },
                    {
                        "type": "text",
                        "text": "this",
                        "marks": [
                            { "type": "link", "attrs": { "href": "https://example.com" } },
                            { "type": "strong" }
                        ]
                    },
                    { "type": "text", "text": " x" },
                    { "type": "text", "text": "2", "marks": [{ "type": "subsup", "attrs": { "type": "sub" } }] }
                ]
            },
            {
                "type": "panel",
                "attrs": { "panelType": "error" },
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "Broken" }] }]
            }
        ]
    })
    .to_string();

    let tree = parse_tree_json(&source).unwrap();
    assert_eq!(
        tree,
        doc(vec![
            Node::paragraph(vec![
                Node::text("Hi "),
                Node::Mention {
                    id: Some("557058:abc".to_string()),
                    text: "@Ann".to_string(),
                },
                Node::text(", see "),
                marked(
                    "this",
                    vec![Mark::link("https://example.com"), Mark::Strong]
                ),
                Node::text(" x"),
                marked("2", vec![Mark::SubSup(SubSupType::Sub)]),
            ]),
            Node::Panel {
                panel_type: "error".to_string(),
                content: vec![p("Broken")],
            },
        ])
    );
}

#[test]
fn test_encode_matches_wire_shape() {
    let tree = doc(vec![
        Node::heading(2, vec![marked("T", vec![Mark::Em])]),
        media_single("file-1"),
    ]);
    let value: Value = serde_json::from_str(&tree_to_json(&tree).unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "doc",
            "attrs": { "version": 1 },
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 2 },
                    "content": [{ "type": "text", "text": "T", "marks": [{ "type": "em" }] }]
                },
                {
                    "type": "mediaSingle",
                    "content": [{ "type": "media", "attrs": { "type": "file", "id": "file-1" } }]
                }
            ]
        })
    );
}

#[test]
fn test_missing_attributes_are_defaulted() {
    let tree = parse_tree_json(
        r#"{"type":"doc","content":[{"type":"heading"},{"type":"panel"},{"type":"codeBlock"}]}"#,
    )
    .unwrap();
    assert_eq!(
        tree,
        doc(vec![
            Node::heading(1, vec![]),
            Node::Panel {
                panel_type: "info".to_string(),
                content: vec![],
            },
            Node::code_block(None, ""),
        ])
    );
}

#[test]
fn test_unknown_kinds_survive_a_round_trip() {
    let source = json!({
        "type": "doc",
        "attrs": { "version": 1 },
        "content": [{
            "type": "taskList",
            "attrs": { "localId": "t1" },
            "content": [{
                "type": "paragraph",
                "content": [{
                    "type": "text",
                    "text": "todo",
                    "marks": [{ "type": "annotation", "attrs": { "id": "a1" } }]
                }]
            }]
        }]
    });

    let tree = parse_tree_json(&source.to_string()).unwrap();
    let Node::Doc { content } = &tree else {
        panic!("expected doc");
    };
    assert_eq!(content[0].kind(), "taskList");

    let value: Value = serde_json::from_str(&tree_to_json(&tree).unwrap()).unwrap();
    assert_eq!(value, source);
}

#[test]
fn test_malformed_input_is_rejected() {
    for source in ["", "not json", "[1, 2]", r#"{"content": []}"#] {
        let err = parse_tree_json(source).unwrap_err();
        assert!(
            matches!(err, ConvertError::InvalidInput(_)),
            "{source:?} gave {err:?}"
        );
    }
}

#[test]
fn test_adf_format_capabilities() {
    assert_eq!(AdfFormat.name(), "adf");
    assert!(AdfFormat.supports_parsing());
    assert!(AdfFormat.supports_serialization());
}
