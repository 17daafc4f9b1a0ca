//! Table tests for Markdown format (both directions)

use crate::common::*;
use adf_babel::{markdown_to_tree, tree_to_markdown, Node};
use insta::assert_snapshot;

fn cell_count(line: &str) -> usize {
    // Leading and trailing pipes delimit n cells with n + 1 unescaped pipes.
    line.replace("\\|", "").matches('|').count() - 1
}

#[test]
fn test_header_row_gets_separator() {
    let tree = doc(vec![table(vec![
        row(vec![th("Name"), th("Role")]),
        row(vec![td("Ann"), td("Dev")]),
    ])]);
    assert_snapshot!(tree_to_markdown(&tree).unwrap(), @r"
| Name | Role |
| --- | --- |
| Ann | Dev |
");
}

#[test]
fn test_no_header_means_no_separator() {
    let tree = doc(vec![table(vec![
        row(vec![td("a"), td("b")]),
        row(vec![td("c"), td("d")]),
    ])]);
    let md = tree_to_markdown(&tree).unwrap();
    assert_eq!(md, "| a | b |\n| c | d |");
    assert!(!md.contains("---"));
}

#[test]
fn test_header_outside_first_row_is_ignored() {
    let tree = doc(vec![table(vec![
        row(vec![td("a")]),
        row(vec![th("late header")]),
    ])]);
    assert!(!tree_to_markdown(&tree).unwrap().contains("---"));
}

#[test]
fn test_short_rows_are_padded() {
    let tree = doc(vec![table(vec![
        row(vec![th("A"), th("B"), th("C")]),
        row(vec![td("1")]),
    ])]);
    let md = tree_to_markdown(&tree).unwrap();
    let lines: Vec<&str> = md.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "| 1 |  |  |");
    for line in &lines {
        assert_eq!(cell_count(line), 3, "row {line:?}");
    }
}

#[test]
fn test_padding_without_header() {
    let tree = doc(vec![table(vec![
        row(vec![td("1")]),
        row(vec![td("2"), td("3"), td("4"), td("5")]),
    ])]);
    let md = tree_to_markdown(&tree).unwrap();
    let counts: Vec<usize> = md.lines().map(cell_count).collect();
    assert_eq!(counts, vec![4, 4]);
}

#[test]
fn test_cell_content_is_flattened() {
    let tree = doc(vec![table(vec![row(vec![Node::TableCell {
        content: vec![p("first"), p("a|b")],
    }])])]);
    assert_eq!(tree_to_markdown(&tree).unwrap(), "| first a\\|b |");
}

#[test]
fn test_import_table() {
    let tree = markdown_to_tree("| A | B |\n| --- | --- |\n| 1 | 2 |\n");
    assert_eq!(
        tree,
        doc(vec![table(vec![
            row(vec![th("A"), th("B")]),
            row(vec![td("1"), td("2")]),
        ])])
    );
}
