//! Statement cascade tests.

use carmen::ast::Param;
use carmen::{codes, parse_source, ExprKind, LogLevel, ParseOptions, Parser, Stmt, StmtKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn one(source: &str) -> Stmt {
    let output = parse_source(source, "stmt.carmen");
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 1, "{:?}", output.nodes);
    output.nodes.into_iter().next().unwrap()
}

fn names(params: &[Param]) -> Vec<&str> {
    params.iter().map(|p| p.name.as_str()).collect()
}

#[rstest]
#[case("let $x be 5 .", "Declaration")]
#[case("set $x equal to 5 .", "Assignment")]
#[case("set item 1 of $list equal to 3 .", "Assignment")]
#[case("increment $x .", "Increment")]
#[case("decrement $x by 2 .", "Decrement")]
#[case("swap $a and $b .", "Swap")]
#[case("add 4 to $list .", "ListAdd")]
#[case("remove 4 from $list .", "ListRemove")]
#[case("print \"hi\" .", "Print")]
#[case("display $x .", "Print")]
#[case("read into $name .", "ReadInto")]
#[case("import \"math\" .", "Import")]
#[case("return .", "Return")]
#[case("return $x .", "Return")]
#[case("break .", "Break")]
#[case("continue .", "Continue")]
#[case("exit .", "Exit")]
#[case("throw \"oops\" .", "Throw")]
#[case("raise \"oops\" .", "Throw")]
#[case("assert $x is at least 1 .", "Assert")]
#[case("call $greet .", "Expression")]
#[case("execute the following ; print 1 . fin", "Block")]
#[case("{ print 1 . }", "Block")]
fn each_statement_form_is_recognised(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(one(source).type_name(), expected);
}

#[test]
fn declaration_and_assignment_parts() {
    let StmtKind::Declaration { name, value } = one("let $total be the sum of 2 and 3 .").kind else {
        panic!("expected declaration");
    };
    assert_eq!(name, "$total");
    assert_eq!(value.pretty(), "(+ 2 3)");

    let StmtKind::Assignment { target, value } = one("set item 1 of $list equal to 3 .").kind else {
        panic!("expected assignment");
    };
    assert!(matches!(target.kind, ExprKind::Index { .. }));
    assert_eq!(value.pretty(), "3");
}

#[test]
fn increments_default_to_no_amount() {
    let StmtKind::Increment { name, amount } = one("increment $count .").kind else {
        panic!("expected increment");
    };
    assert_eq!(name, "$count");
    assert!(amount.is_none());

    let StmtKind::Decrement { amount, .. } = one("decrement $count by 2 .").kind else {
        panic!("expected decrement");
    };
    assert_eq!(amount.map(|a| a.pretty()), Some("2".to_string()));
}

#[test]
fn loops() {
    let StmtKind::While { condition, body } =
        one("while $x is less than 10 do { increment $x . } .").kind
    else {
        panic!("expected while");
    };
    assert_eq!(condition.pretty(), "(< $x 10)");
    assert_eq!(body.len(), 1);

    assert_eq!(one("until $done do { set $done equal to true . }").type_name(), "Until");

    let StmtKind::ForEach {
        variable,
        iterable,
        body,
    } = one("for each $item in $list do { print $item . }").kind
    else {
        panic!("expected for each");
    };
    assert_eq!(variable, "$item");
    assert_eq!(iterable.pretty(), "$list");
    assert_eq!(body.len(), 1);

    let StmtKind::ForRange { from, to, step, .. } =
        one("for $i from 1 to 10 by 2 do { print $i . }").kind
    else {
        panic!("expected for range");
    };
    assert_eq!(
        (from.pretty(), to.pretty(), step.map(|s| s.pretty())),
        ("1".to_string(), "10".to_string(), Some("2".to_string()))
    );

    let StmtKind::Repeat { count, body } = one("repeat 3 times { print \"hi\" . }").kind else {
        panic!("expected repeat");
    };
    assert_eq!(count.pretty(), "3");
    assert_eq!(body.len(), 1);
}

#[test]
fn loop_bodies_may_be_a_single_sentence() {
    let StmtKind::Repeat { body, .. } = one("repeat 2 times print 1 .").kind else {
        panic!("expected repeat");
    };
    assert_eq!(body.len(), 1);
}

#[rstest]
#[case("do { increment $x . } while $x is less than 3 .", "DoWhile")]
#[case("do { increment $x . } until $x is at least 3 .", "DoUntil")]
fn do_loops_keep_their_trailing_condition(#[case] source: &str, #[case] expected: &str) {
    let output = parse_source(&format!("{} print $x .", source), "do.carmen");
    assert!(output.is_clean(), "{:?}", output.errors);
    assert_eq!(output.nodes.len(), 2);
    assert_eq!(output.nodes[0].type_name(), expected);
    assert_eq!(output.nodes[1].type_name(), "Print");
}

#[test]
fn try_catch_finally() {
    let StmtKind::TryCatch {
        body,
        error_name,
        handler,
        finally,
    } = one("try { throw \"x\" . } catch $e { print $e . } finally { print \"done\" . }").kind
    else {
        panic!("expected try");
    };
    assert_eq!(body.len(), 1);
    assert_eq!(error_name.as_deref(), Some("$e"));
    assert_eq!(handler.len(), 1);
    assert_eq!(finally.map(|f| f.len()), Some(1));

    let StmtKind::TryCatch {
        error_name, finally, ..
    } = one("try { print 1 . } catch { print 2 . }").kind
    else {
        panic!("expected try");
    };
    assert!(error_name.is_none());
    assert!(finally.is_none());
}

#[test]
fn definitions() {
    let StmtKind::FunctionDefinition { name, params, body } =
        one("define function $add with $a , $b as { return the sum of $a and $b . }").kind
    else {
        panic!("expected function");
    };
    assert_eq!(name, "$add");
    assert_eq!(names(&params), vec!["$a", "$b"]);
    assert_eq!(body.len(), 1);

    let StmtKind::FunctionDefinition { params, .. } =
        one("define function $hello as { print \"hello\" . }").kind
    else {
        panic!("expected function");
    };
    assert!(params.is_empty());

    let StmtKind::StructureDefinition { name, fields } =
        one("define structure $Point with $x , $y .").kind
    else {
        panic!("expected structure");
    };
    assert_eq!(name, "$Point");
    assert_eq!(names(&fields), vec!["$x", "$y"]);

    let StmtKind::EntryPoint { body } = one("define entry point as { print 1 . print 2 . }").kind else {
        panic!("expected entry point");
    };
    assert_eq!(body.len(), 2);
}

#[rstest]
#[case("set 5 equal to 3 .", codes::INVALID_PART)]
#[case("let x be 3 .", codes::INVALID_PART)]
#[case("let $x be .", codes::MISSING_PART)]
#[case("set $x equal to .", codes::MISSING_PART)]
#[case("set $x equal to banana .", codes::INVALID_PART)]
#[case("break now .", codes::UNRECOGNIZED)]
#[case("import math .", codes::INVALID_PART)]
#[case("define function $f $a as { }", codes::MISSING_PART)]
#[case("try { } catch $e print 1 .", codes::MISSING_PART)]
#[case("while $x do .", codes::MISSING_PART)]
fn committed_statements_fail_hard(#[case] source: &str, #[case] code: &str) {
    let output = parse_source(source, "bad.carmen");
    assert!(output.nodes.is_empty(), "{:?}", output.nodes);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, code);
}

#[test]
fn discarded_values_are_logged() {
    let output = parse_source("$x plus 1 .", "warn.carmen");
    assert!(output.is_clean());
    assert!(output
        .logs
        .iter()
        .any(|entry| entry.level == LogLevel::Warning && entry.message.contains("never used")));

    let quiet = Parser::new(ParseOptions::default().with_warn_on_discarded_values(false))
        .parse_source("$x plus 1 .");
    assert!(!quiet.logs.iter().any(|entry| entry.level == LogLevel::Warning));
}

#[test]
fn calls_are_not_reported_as_discarded() {
    let output = parse_source("call $greet with \"ada\" .", "call.carmen");
    assert!(!output.logs.iter().any(|entry| entry.level == LogLevel::Warning));
}

#[test]
fn programs_serialise_to_json() {
    let output = parse_source("print 1 .", "json.carmen");
    let json = carmen::ast::to_json(&output.nodes).unwrap();
    assert!(json.contains("\"Print\""));
}
