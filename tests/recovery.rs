//! Error isolation, block structure and parse-wide options.

use carmen::parser::{split_block, Segment};
use carmen::parser::ParseContext;
use carmen::{
    codes, condense, parse, parse_source, tokenize, LogLevel, ParseObserver, ParseOptions, Parser,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn one_bad_statement_does_not_hide_the_others() {
    let output = parse_source("print 1 . set $x equal to . print 2 .", "r.carmen");
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].function, "parse_assignment");
}

#[test]
fn errors_are_isolated_per_block_level() {
    let output = parse_source(
        "define entry point as { print 1 . frobnicate . print 2 . } print 3 .",
        "r.carmen",
    );
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::UNRECOGNIZED);
}

#[rstest]
#[case::empty("")]
#[case::only_terminators(". . .")]
#[case::only_comments("# nothing to see\n")]
fn nothing_to_parse(#[case] source: &str) {
    let output = parse_source(source, "r.carmen");
    assert!(output.nodes.is_empty());
    assert!(output.is_clean());
}

#[test]
fn empty_token_array() {
    let output = parse(&[]);
    assert!(output.nodes.is_empty());
    assert!(output.errors.is_empty());
}

#[rstest]
#[case::stray_closer("print 1 . }", 1)]
#[case::unclosed("while $x do { print 1 .", 0)]
#[case::unclosed_fin("execute the following ; print 1 .", 0)]
#[case::closer_between_statements("print 1 . } print 2 . print 3 .", 3)]
#[case::closer_inside_a_statement("print 1 . print 2 } print 3 .", 2)]
#[case::unclosed_after_statements("print 1 . while $x do { print 2 . print 3 .", 1)]
fn unbalanced_blocks(#[case] source: &str, #[case] surviving: usize) {
    let output = parse_source(source, "r.carmen");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::BLOCK_STRUCTURE);
    assert_eq!(output.nodes.len(), surviving);
}

#[test]
fn stray_closer_keeps_the_statements_around_it() {
    let output = parse_source("print 1 . } print 2 . print 3 .", "r.carmen");
    let kinds: Vec<&str> = output.nodes.iter().map(|n| n.type_name()).collect();
    assert_eq!(kinds, vec!["Print", "Print", "Print"]);
    assert_eq!(output.errors[0].tokens.len(), 1);
    assert_eq!(output.errors[0].tokens[0].text, "}");
}

#[test]
fn unclosed_block_keeps_the_statements_before_it() {
    let output = parse_source("print 1 . while $x do { print 2 . print 3 .", "r.carmen");
    assert_eq!(output.nodes.len(), 1);
    assert_eq!(output.nodes[0].type_name(), "Print");
    assert_eq!(output.errors[0].tokens[0].text, "while");
}

#[test]
fn every_stray_closer_is_reported() {
    let output = parse_source("} print 1 . fin print 2 .", "r.carmen");
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(output.errors.len(), 2);
    assert!(output.errors.iter().all(|e| e.code == codes::BLOCK_STRUCTURE));
}

#[test]
fn segments_mark_broken_structure() {
    let tokens = condense(&tokenize("print 1 . } print 2 .", "seg.carmen").unwrap()).unwrap();
    let options = ParseOptions::default();
    let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
    let mut ctx = ParseContext::new(&options, &observers);

    let segments = split_block(&mut ctx, &tokens);
    let broken: Vec<bool> = segments.iter().map(Segment::is_broken).collect();
    assert_eq!(broken, vec![false, true, false]);
    assert_eq!(segments[1].tokens()[0].text, "}");
}

#[test]
fn missing_final_terminator_is_a_warning_by_default() {
    let output = parse_source("print 1 . print 2", "r.carmen");
    assert!(output.is_clean());
    assert_eq!(output.nodes.len(), 2);
    assert!(output
        .logs
        .iter()
        .any(|entry| entry.level == LogLevel::Warning && entry.message.contains("closing `.`")));
}

#[test]
fn missing_final_terminator_can_be_an_error() {
    let parser = Parser::new(ParseOptions::default().with_require_terminators(true));
    let output = parser.parse_source("print 1 . print 2");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::BLOCK_STRUCTURE);
    assert_eq!(output.nodes.len(), 1);
}

#[test]
fn nesting_limit_is_enforced() {
    let parser = Parser::new(ParseOptions::default().with_max_nesting_depth(4));
    let output = parser.parse_source("print ( ( ( ( ( 1 ) ) ) ) ) .");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::NESTING_LIMIT);

    let roomy = Parser::default().parse_source("print ( ( ( ( ( 1 ) ) ) ) ) .");
    assert!(roomy.is_clean());
}

#[test]
fn condenser_errors_abort_the_parse() {
    let output = parse_source("print 1 . print five point five point five .", "r.carmen");
    assert!(output.nodes.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, codes::INVALID_LITERAL);
}

#[test]
fn do_loop_condition_stays_with_its_block() {
    let tokens = condense(
        &tokenize(
            "do { set $x equal to 1 . } while $x is less than 10 . print $x .",
            "do.carmen",
        )
        .unwrap(),
    )
    .unwrap();
    let options = ParseOptions::default();
    let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
    let mut ctx = ParseContext::new(&options, &observers);

    let segments = split_block(&mut ctx, &tokens);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].tokens().last().map(|t| t.text.as_str()), Some("."));
    assert_eq!(segments[1].tokens()[0].text, "print");
}

#[test]
fn do_block_without_a_condition_ends_at_its_brace() {
    let tokens = condense(&tokenize("do { set $x equal to 1 . } print $x .", "do.carmen").unwrap())
        .unwrap();
    let options = ParseOptions::default();
    let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
    let mut ctx = ParseContext::new(&options, &observers);

    let segments = split_block(&mut ctx, &tokens);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].tokens().last().map(|t| t.text.as_str()), Some("}"));
}

#[test]
fn while_after_a_plain_block_starts_a_new_statement() {
    let output = parse_source(
        "{ print 1 . } while $x do { print 2 . }",
        "r.carmen",
    );
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(output.nodes[1].type_name(), "While");
}

#[test]
fn options_load_from_json() {
    let options = ParseOptions::from_json(r#"{ "max_nesting_depth": 3, "source_name": "cfg" }"#).unwrap();
    let output = Parser::new(options).parse_source("print ( ( ( 1 ) ) ) .");
    assert_eq!(output.errors[0].code, codes::NESTING_LIMIT);
    assert_eq!(&*output.errors[0].tokens[0].position.source, "cfg");
}
