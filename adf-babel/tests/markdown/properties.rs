//! Property tests: parsing is total and its output always serializes.

use adf_babel::{markdown_to_tree, parse_tree_json, tree_to_json, tree_to_markdown, tree_to_render};
use adf_babel::{MediaMap, Node};
use proptest::prelude::*;

/// Markdown-flavoured fragments, so the generator hits real constructs
/// rather than plain text most of the time.
fn markdownish() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("# ".to_string()),
        Just("- ".to_string()),
        Just("1. ".to_string()),
        Just("> ".to_string()),
        Just("**".to_string()),
        Just("*".to_string()),
        Just("~~".to_string()),
        Just("`".to_string()),
        Just("```".to_string()),
        Just("| a | b |\n| --- | --- |\n".to_string()),
        Just("[x](https://e.com)".to_string()),
        Just("<b>".to_string()),
        Just("\n".to_string()),
        Just("  ".to_string()),
        "[a-z ]{1,8}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

fn assert_total(source: &str) {
    let tree = markdown_to_tree(source);
    let Node::Doc { content } = &tree else {
        panic!("root must be a doc, got {tree:?}");
    };
    assert!(!content.is_empty());

    tree_to_markdown(&tree).unwrap();
    tree_to_render(&tree, &MediaMap::new()).unwrap();

    let json = tree_to_json(&tree).unwrap();
    assert_eq!(parse_tree_json(&json).unwrap(), tree);
}

proptest! {
    #[test]
    fn parsing_arbitrary_text_is_total(source in "\\PC{0,200}") {
        assert_total(&source);
    }

    #[test]
    fn parsing_markdownish_text_is_total(source in markdownish()) {
        assert_total(&source);
    }
}
