//! The mark-wrapping combinator shared by the Markdown and HTML serializers.
//!
//! A text run carries a set of marks; each serializer supplies a pure
//! `(content, mark) -> content` wrap and the marks are folded onto the base
//! content innermost-first. The fold order is the order the marks are listed
//! in, except that `code` always wraps first and `link` always wraps last:
//! code spans cannot contain other markup and a link must enclose its styled
//! label.

use crate::adf::Mark;

fn nesting_rank(mark: &Mark) -> u8 {
    match mark {
        Mark::Code => 0,
        Mark::Link { .. } => 2,
        _ => 1,
    }
}

/// Marks in the order they are applied, innermost first.
pub fn nesting_order(marks: &[Mark]) -> Vec<&Mark> {
    let mut ordered: Vec<&Mark> = marks.iter().collect();
    // Stable: marks of equal rank keep their listed order.
    ordered.sort_by_key(|mark| nesting_rank(mark));
    ordered
}

/// Fold `marks` onto `base` with `wrap`, innermost first.
pub fn apply_marks<T, F>(base: T, marks: &[Mark], mut wrap: F) -> T
where
    F: FnMut(T, &Mark) -> T,
{
    nesting_order(marks)
        .into_iter()
        .fold(base, |content, mark| wrap(content, mark))
}
