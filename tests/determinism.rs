//! No two productions accept the same slice.
//!
//! Every rule of both cascades is run on its own against each slice, and
//! exactly one of them may accept it.

use carmen::parser::{Grammar, ParseContext};
use carmen::{condense, tokenize, ParseObserver, ParseOptions, Token};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn tokens(source: &str) -> Vec<Token> {
    condense(&tokenize(source, "corpus.carmen").unwrap()).unwrap()
}

fn accepting_expression_rules(source: &str) -> Vec<&'static str> {
    let tokens = tokens(source);
    let grammar = Grammar::shared();
    let options = ParseOptions::default();
    let observers: Vec<Box<dyn ParseObserver>> = Vec::new();

    grammar
        .expression_rules()
        .iter()
        .filter(|rule| {
            let mut ctx = ParseContext::new(&options, &observers);
            matches!((rule.try_parse)(grammar, &mut ctx, &tokens), Ok(Some(_)))
        })
        .map(|rule| rule.name)
        .collect()
}

fn accepting_statement_rules(source: &str) -> Vec<&'static str> {
    let tokens = tokens(source);
    let grammar = Grammar::shared();
    let options = ParseOptions::default();
    let observers: Vec<Box<dyn ParseObserver>> = Vec::new();

    grammar
        .statement_rules()
        .iter()
        .filter(|rule| {
            let mut ctx = ParseContext::new(&options, &observers);
            matches!((rule.try_parse)(grammar, &mut ctx, &tokens), Ok(Some(_)))
        })
        .map(|rule| rule.name)
        .collect()
}

#[rstest]
#[case("1 plus 2 multiplied by 3", "additive")]
#[case("1 minus 2 minus 3", "additive")]
#[case("2 to the power of 3 to the power of 2", "power")]
#[case("( 1 plus 2 ) multiplied by 3", "multiplicative")]
#[case("10 divided by 4 modulo 3", "multiplicative")]
#[case("the sum of 1 and 2", "sum of")]
#[case("the product of $a plus 1 and 2", "product of")]
#[case("negative $x", "negate")]
#[case("negative $x plus 1", "additive")]
#[case("the absolute value of negative 3", "absolute value")]
#[case("the square root of 16", "square root")]
#[case("the length of $list", "length")]
#[case("the length of $a plus 1", "additive")]
#[case("$a is greater than 3 and $b is null", "and")]
#[case("not $a or $b", "or")]
#[case("not $a is equal to $b", "not")]
#[case("$a is at least 1 and $a is at most 9", "and")]
#[case("$a is not equal to $b", "comparison")]
#[case("$x is not null", "null check")]
#[case("$list contains 3", "contains")]
#[case("$x is a number", "type check")]
#[case("true or false", "or")]
#[case("$a bitwise and $b", "bitwise and")]
#[case("$a bitwise or $b bitwise xor $c", "bitwise or")]
#[case("$a shifted left by 2", "shift")]
#[case("bitwise not $a", "bitwise not")]
#[case("\"a\" concatenated with \"b\"", "concatenation")]
#[case("a list of 1 , 2 , 3", "list literal")]
#[case("an empty list", "list literal")]
#[case("item 2 of $list", "index")]
#[case("the third item of $list", "article")]
#[case("the $x plus 1", "additive")]
#[case("slice $list from 1 to 2", "slice")]
#[case("call $f with 1 , 2", "call")]
#[case("call $f with 1 plus 2", "additive")]
#[case("call $f", "call")]
#[case("cast $x as a text", "cast")]
#[case("if $x then 1 otherwise 2", "ternary")]
#[case("if $x then 1 otherwise if $y then 2 otherwise 3", "ternary")]
#[case("match $x with 1 gives \"one\" , otherwise gives \"many\"", "match")]
#[case("42", "number")]
#[case("one hundred and twenty three", "number")]
#[case("third", "ordinal")]
#[case("\"hi\"", "text")]
#[case("nothing", "boolean or null")]
#[case("$total", "identifier")]
fn exactly_one_expression_production_accepts(#[case] source: &str, #[case] rule: &str) {
    assert_eq!(accepting_expression_rules(source), vec![rule]);
}

#[rstest]
#[case("let $x be 5 .", "declaration")]
#[case("set $x equal to 5 .", "assignment")]
#[case("set item 1 of $list equal to 3 .", "assignment")]
#[case("increment $x .", "increment")]
#[case("swap $a and $b .", "swap")]
#[case("add 4 to $list .", "list add")]
#[case("remove 4 from $list .", "list remove")]
#[case("print $x plus 1 .", "print")]
#[case("read into $name .", "read")]
#[case("import \"math\" .", "import")]
#[case("return $x .", "return")]
#[case("break .", "break")]
#[case("throw \"oops\" .", "throw")]
#[case("assert $x is at least 1 .", "assert")]
#[case("call $greet with \"ada\" .", "expression")]
#[case("{ print 1 . }", "block")]
#[case("while $x is less than 10 do { increment $x . }", "while")]
#[case("repeat 3 times { print 1 . }", "repeat")]
#[case("for each $item in $list do { print $item . }", "for each")]
#[case("define function $add with $a , $b as { return the sum of $a and $b . }", "function definition")]
fn exactly_one_statement_production_accepts(#[case] source: &str, #[case] rule: &str) {
    assert_eq!(accepting_statement_rules(source), vec![rule]);
}
