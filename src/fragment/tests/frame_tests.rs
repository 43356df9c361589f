//! Tests for fragment construction and line fragmentation helpers.

use crate::{
    fragment::{Fragment, fragment_lines},
    kind::PayloadKind,
};

#[test]
fn fragment_constructors_tag_the_expected_kind() {
    assert_eq!(Fragment::text("a").kind(), PayloadKind::Text);
    assert_eq!(Fragment::binary(vec![1]).kind(), PayloadKind::Binary);
    assert_eq!(Fragment::pong(vec![2]).kind(), PayloadKind::Pong);
}

#[test]
fn pong_fragments_are_always_terminal() {
    assert!(Fragment::pong(vec![9]).is_final());
}

#[test]
fn fin_marks_a_fragment_terminal() {
    let fragment = Fragment::text("tail").fin();
    assert!(fragment.is_final());
    assert_eq!(fragment.payload(), b"tail");
}

#[test]
fn fragment_lines_appends_newlines_and_empty_terminal() {
    let fragments = fragment_lines(["Benjamin Franklin", "Quote A"]);

    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].payload(), b"Benjamin Franklin\n");
    assert!(!fragments[0].is_final());
    assert_eq!(fragments[1].payload(), b"Quote A\n");
    assert!(!fragments[1].is_final());
    assert!(fragments[2].payload().is_empty());
    assert!(fragments[2].is_final());
}

#[test]
fn fragment_lines_of_nothing_yields_only_the_terminal_marker() {
    let fragments = fragment_lines(Vec::<&str>::new());
    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].is_final());
    assert!(fragments[0].payload().is_empty());
}
