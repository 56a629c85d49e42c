//! Expression cascade tests.
//!
//! Each case is parsed as the value of a `print` statement and compared in
//! prefix form, so binding strength is visible in the parentheses.

use carmen::{codes, parse_source, Stmt, StmtKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn expr(source: &str) -> String {
    let output = parse_source(&format!("print {} .", source), "expr.carmen");
    assert!(output.is_clean(), "{:?}", output.errors);
    match &output.nodes[..] {
        [Stmt {
            kind: StmtKind::Print(value),
            ..
        }] => value.pretty(),
        other => panic!("expected one print statement, got {:?}", other),
    }
}

fn error_code(source: &str) -> (&'static str, &'static str) {
    let output = parse_source(&format!("print {} .", source), "expr.carmen");
    assert_eq!(output.errors.len(), 1, "{:?}", output.nodes);
    (output.errors[0].code, output.errors[0].function)
}

#[rstest]
#[case("1 plus 2 multiplied by 3", "(+ 1 (* 2 3))")]
#[case("1 minus 2 minus 3", "(- (- 1 2) 3)")]
#[case("2 to the power of 3 to the power of 2", "(^ 2 (^ 3 2))")]
#[case("( 1 plus 2 ) multiplied by 3", "(* (+ 1 2) 3)")]
#[case("10 divided by 4 modulo 3", "(% (/ 10 4) 3)")]
#[case("the sum of 1 and 2", "(+ 1 2)")]
#[case("the product of $a plus 1 and 2", "(* (+ $a 1) 2)")]
#[case("negative $x", "(neg $x)")]
#[case("the absolute value of negative 3", "(abs -3)")]
#[case("the square root of 16", "(sqrt 16)")]
#[case("negative $x plus 1", "(+ (neg $x) 1)")]
#[case("the length of $a plus 1", "(+ (len $a) 1)")]
#[case("the $x plus 1", "(+ $x 1)")]
#[case("call $f with 1 plus 2", "(+ (call $f 1) 2)")]
#[case("call $f with ( 1 plus 2 )", "(call $f (+ 1 2))")]
fn arithmetic(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("$a is greater than 3 and $b is null", "(and (> $a 3) (null? $b))")]
#[case("not $a or $b", "(or (not $a) $b)")]
#[case("not $a is equal to $b", "(not (== $a $b))")]
#[case("$a is at least 1 and $a is at most 9", "(and (>= $a 1) (<= $a 9))")]
#[case("$a is not equal to $b", "(!= $a $b)")]
#[case("$x is not null", "(not-null? $x)")]
#[case("$list contains 3", "(contains $list 3)")]
#[case("$x is a number", "(is-a $x number)")]
#[case("true or false", "(or true false)")]
fn logic_and_tests(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("$a bitwise and $b", "(& $a $b)")]
#[case("$a bitwise or $b bitwise xor $c", "(| $a (xor $b $c))")]
#[case("$a shifted left by 2", "(<< $a 2)")]
#[case("bitwise not $a", "(~ $a)")]
#[case("\"a\" concatenated with \"b\"", "(++ \"a\" \"b\")")]
fn bitwise_and_text(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("a list of 1 , 2 , 3", "[1 2 3]")]
#[case("an empty list", "[]")]
#[case("item 2 of $list", "(item 2 $list)")]
#[case("the third item of $list", "(item 3 $list)")]
#[case("slice $list from 1 to 2", "(slice $list 1 2)")]
#[case("the length of $list", "(len $list)")]
#[case("call $f with 1 , 2", "(call $f 1 2)")]
#[case("call $f", "(call $f)")]
#[case("cast $x as a text", "(cast $x text)")]
fn collections_and_calls(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("if $x then 1 otherwise 2", "(if $x 1 2)")]
#[case("if $x then 1 otherwise if $y then 2 otherwise 3", "(if $x 1 (if $y 2 3))")]
#[case(
    "match $x with 1 gives \"one\" , otherwise gives \"many\"",
    "(match $x (1 \"one\") (otherwise \"many\"))"
)]
fn conditional_values(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("42", "42")]
#[case("2.5", "2.5")]
#[case("one hundred and twenty three", "123")]
#[case("two point five", "2.5")]
#[case("negative five", "-5")]
#[case("third", "3")]
#[case("\"hi\\n\"", "\"hi\\n\"")]
#[case("'x'", "'x'")]
#[case("nothing", "null")]
#[case("yes", "true")]
fn literals(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expr(source), expected);
}

#[rstest]
#[case("the sum of 1 and", codes::MISSING_PART, "parse_sum_of")]
#[case("item of $list", codes::MISSING_PART, "parse_index")]
#[case("cast $x as a colour", codes::INVALID_PART, "parse_cast")]
#[case("call greet", codes::INVALID_PART, "parse_call")]
#[case("match $x with 1 gives 2 , otherwise gives 3 , 4 gives 5", codes::INVALID_PART, "parse_match")]
fn committed_productions_fail_hard(
    #[case] source: &str,
    #[case] code: &'static str,
    #[case] function: &'static str,
) {
    assert_eq!(error_code(source), (code, function));
}

#[test]
fn words_nothing_accepts_are_a_soft_miss() {
    // `print` commits, so the soft miss surfaces as an invalid value.
    let (code, function) = error_code("banana split");
    assert_eq!(code, codes::INVALID_PART);
    assert_eq!(function, "parse_print");
}

#[test]
fn positions_point_at_the_first_token() {
    let output = parse_source("print\n  $a plus 1 .", "pos.carmen");
    let StmtKind::Print(value) = &output.nodes[0].kind else {
        panic!("expected print");
    };
    assert_eq!((value.position.line, value.position.column), (2, 3));
    assert_eq!(&*value.position.source, "pos.carmen");
}

/// `$a0 plus $a1 plus … plus TAIL`
fn long_sum(operands: usize, tail: &str) -> String {
    let mut parts: Vec<String> = (0..operands).map(|i| format!("$a{}", i)).collect();
    parts.push(tail.to_string());
    parts.join(" plus ")
}

#[test]
fn long_operator_chains_parse_in_polynomial_time() {
    let pretty = expr(&long_sum(40, "the sum of $x and $y"));
    assert!(pretty.contains("(+ (+ $a0 $a1) $a2)"), "{}", pretty);
    assert!(pretty.ends_with("$a39) (+ $x $y))"), "{}", pretty);
    assert_eq!(pretty.matches("(+").count(), 41);
}

#[test]
fn long_operator_chains_with_a_bad_operand_still_finish() {
    let (code, function) = error_code(&long_sum(40, "oops"));
    assert_eq!(code, codes::INVALID_PART);
    assert_eq!(function, "parse_print");
}
