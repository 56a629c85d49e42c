//! `if` / `otherwise if` / `otherwise` chains.

use carmen::{codes, parse_source, Stmt, StmtKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// (condition, branch count, has else) of a conditional.
fn shape(stmt: &Stmt) -> (String, usize, bool) {
    match &stmt.kind {
        StmtKind::Conditional {
            condition,
            else_ifs,
            else_body,
            ..
        } => (condition.pretty(), else_ifs.len(), else_body.is_some()),
        other => panic!("expected a conditional, got {:?}", other),
    }
}

#[rstest]
#[case::braces(
    "if $x is greater than 1 then { print 1 . } otherwise if $x is equal to 1 then { print 2 . } otherwise { print 3 . }"
)]
#[case::sentences(
    "if $x is greater than 1 then print 1 . otherwise if $x is equal to 1 then print 2 . otherwise print 3 ."
)]
#[case::mixed(
    "if $x is greater than 1 then { print 1 . } otherwise if $x is equal to 1 then print 2 . otherwise { print 3 . }"
)]
fn full_chain_is_one_statement(#[case] source: &str) {
    let output = parse_source(source, "chain.carmen");
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 1);
    assert_eq!(shape(&output.nodes[0]), ("(> $x 1)".to_string(), 1, true));
}

#[test]
fn chain_without_otherwise_ends_at_the_next_statement() {
    let output = parse_source("if $x then print 1 . print 2 .", "chain.carmen");
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(shape(&output.nodes[0]), ("$x".to_string(), 0, false));
    assert_eq!(output.nodes[1].type_name(), "Print");
}

#[test]
fn inner_chain_stays_inside_its_block() {
    let output = parse_source(
        "if $a then { if $b then print 1 . otherwise print 2 . } otherwise print 3 .",
        "chain.carmen",
    );
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 1);

    let StmtKind::Conditional {
        body, else_body, ..
    } = &output.nodes[0].kind
    else {
        panic!("expected a conditional");
    };
    assert_eq!(shape(&body[0]), ("$b".to_string(), 0, true));
    assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn branches_keep_their_positions() {
    let output = parse_source(
        "if $x then print 1 .\notherwise if $y then print 2 .",
        "chain.carmen",
    );
    let StmtKind::Conditional { else_ifs, .. } = &output.nodes[0].kind else {
        panic!("expected a conditional");
    };
    assert_eq!(else_ifs[0].position.line, 2);
    assert_eq!(else_ifs[0].condition.pretty(), "$y");
}

#[rstest]
#[case::dangling_otherwise("otherwise print 1 .")]
#[case::dangling_otherwise_if("otherwise if $x then print 1 .")]
#[case::missing_then("if $x print 1 .")]
#[case::otherwise_not_last("if $x then { } otherwise { } otherwise if $y then { }")]
#[case::bad_condition("if then print 1 .")]
fn malformed_chains(#[case] source: &str) {
    let output = parse_source(source, "chain.carmen");
    assert!(output.nodes.is_empty(), "{:?}", output.nodes);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::MALFORMED_CHAIN);
}

#[test]
fn errors_inside_a_branch_are_recovered_in_that_branch() {
    let output = parse_source("if $x then { frobnicate . print 1 . }", "chain.carmen");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::UNRECOGNIZED);

    let StmtKind::Conditional { body, .. } = &output.nodes[0].kind else {
        panic!("expected a conditional");
    };
    assert_eq!(body.len(), 1);
}
