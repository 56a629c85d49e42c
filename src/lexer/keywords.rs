/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Defines every grammar keyword of the Carmen language and the
 *            resolver that maps raw token text onto them.
 *
 * License:
 * This file is part of the Carmen programming language project.
 *
 * Carmen is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The **grammar role** of a token.
///
/// Carmen reuses ordinary English words as grammar particles, so a token's
/// keyword is what the parser matches on, never its raw text. Identifiers
/// and literals resolve to `Keyword::Unknown`.
///
/// The enumeration contains three groups:
/// - punctuation and single-word particles produced by [`resolve`]
/// - numeric-word classes (`NumberWord`, scale words, `Ordinal`)
/// - compound particles that only the token condenser produces
///   (`OtherwiseIf`, `IsNotNull`, `EqualTo`, ...)
///
/// # Depth
/// Exactly four keywords are structural: `BlockStart` and `OpenParen` open
/// a nested region, `BlockEnd` and `CloseParen` close one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /* ----------------------------- */
    /* PUNCTUATION                   */
    /* ----------------------------- */
    EndOfStatement,
    Comma,
    Semicolon,
    Colon,
    OpenParen,
    CloseParen,
    BlockStart,
    BlockEnd,

    /* ----------------------------- */
    /* ARTICLES                      */
    /* ----------------------------- */
    The,
    A,
    An,

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */
    If,
    Then,
    Otherwise,
    While,
    Until,
    Do,
    For,
    Each,
    In,
    From,
    To,
    By,
    Repeat,
    Times,
    Try,
    Catch,
    Finally,
    Fin,
    Execute,
    Following,

    /* ----------------------------- */
    /* STATEMENT WORDS               */
    /* ----------------------------- */
    Set,
    Equal,
    Let,
    Be,
    Print,
    Display,
    Return,
    Break,
    Continue,
    Exit,
    Throw,
    Raise,
    Assert,
    Import,
    Add,
    Remove,
    Swap,
    Read,
    Into,
    Increment,
    Decrement,
    Define,
    Function,
    Structure,
    Entry,
    Point,
    As,
    With,
    Call,
    Cast,

    /* ----------------------------- */
    /* EXPRESSION WORDS              */
    /* ----------------------------- */
    Plus,
    Minus,
    Multiplied,
    Divided,
    Modulo,
    Power,
    Of,
    Sum,
    Difference,
    Product,
    Quotient,
    Remainder,
    Negative,
    Not,
    And,
    Or,
    Is,
    Greater,
    Less,
    Than,
    At,
    Least,
    Most,
    Null,
    True,
    False,
    Contains,
    Concatenated,
    Bitwise,
    Xor,
    Shifted,
    Left,
    Right,
    Length,
    Absolute,
    Value,
    Square,
    Root,
    Slice,
    Item,
    Element,
    List,
    Empty,
    Match,
    Gives,

    /* ----------------------------- */
    /* TYPE NAMES                    */
    /* ----------------------------- */
    NumberType,
    TextType,
    BooleanType,
    CharacterType,

    /* ----------------------------- */
    /* NUMERIC WORDS                 */
    /* ----------------------------- */
    NumberWord,
    Hundred,
    Thousand,
    Million,
    Billion,
    Ordinal,
    NumericLiteral,

    /* ----------------------------- */
    /* COMPOUND PARTICLES            */
    /* ----------------------------- */
    OtherwiseIf,
    EqualTo,
    IsEqualTo,
    IsNotEqualTo,
    IsGreaterThan,
    IsLessThan,
    IsAtLeast,
    IsAtMost,
    IsNull,
    IsNotNull,
    IsA,
    AsA,
    DividedBy,
    MultipliedBy,
    ToThePowerOf,
    ShiftedLeftBy,
    ShiftedRightBy,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    ConcatenatedWith,
    SumOf,
    DifferenceOf,
    ProductOf,
    QuotientOf,
    RemainderOf,
    LengthOf,
    AbsoluteValueOf,
    SquareRootOf,
    ListOf,
    EmptyList,
    ForEach,
    DefineFunction,
    DefineStructure,
    DefineEntryPoint,
    ReadInto,

    /// Identifiers, literals and any word without a grammar role.
    Unknown,
}

impl Keyword {
    /// Returns `true` for `BlockStart` and `OpenParen`.
    pub fn is_opener(self) -> bool {
        matches!(self, Keyword::BlockStart | Keyword::OpenParen)
    }

    /// Returns `true` for `BlockEnd` and `CloseParen`.
    pub fn is_closer(self) -> bool {
        matches!(self, Keyword::BlockEnd | Keyword::CloseParen)
    }

    /// Words that take part in a spelled-out number.
    pub fn is_number_part(self) -> bool {
        matches!(
            self,
            Keyword::NumberWord
                | Keyword::Hundred
                | Keyword::Thousand
                | Keyword::Million
                | Keyword::Billion
        )
    }

    /// Articles are noise words the expression grammar may skip.
    pub fn is_article(self) -> bool {
        matches!(self, Keyword::The | Keyword::A | Keyword::An)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Resolves raw token text to its **grammar keyword**.
///
/// This is a total, pure mapping. The text is trimmed, folded to plain
/// lower-case Latin letters (`Éxécute` and `execute` resolve identically)
/// and then looked up. Anything without a grammar role resolves to
/// `Keyword::Unknown`.
///
/// # Numeric words
/// - `zero` .. `ninety` → `Keyword::NumberWord`
/// - `hundred`, `thousand`, `million`, `billion` → scale keywords
/// - `first` .. `hundredth` → `Keyword::Ordinal`
///
/// # Carmen Examples
/// ```text
/// "Otherwise" -> Otherwise
/// "twenty"    -> NumberWord
/// "third"     -> Ordinal
/// "$total"    -> Unknown
/// ```
pub fn resolve(raw_text: &str) -> Keyword {
    let folded = fold(raw_text);

    if number_word_value(&folded).is_some() {
        return Keyword::NumberWord;
    }
    if ordinal_value(&folded).is_some() {
        return Keyword::Ordinal;
    }

    match folded.as_str() {
        "." => Keyword::EndOfStatement,
        "," => Keyword::Comma,
        ";" => Keyword::Semicolon,
        ":" => Keyword::Colon,
        "(" => Keyword::OpenParen,
        ")" => Keyword::CloseParen,
        "{" => Keyword::BlockStart,
        "}" => Keyword::BlockEnd,

        "the" => Keyword::The,
        "a" => Keyword::A,
        "an" => Keyword::An,

        "if" => Keyword::If,
        "then" => Keyword::Then,
        "otherwise" | "else" => Keyword::Otherwise,
        "while" => Keyword::While,
        "until" => Keyword::Until,
        "do" => Keyword::Do,
        "for" => Keyword::For,
        "each" => Keyword::Each,
        "in" => Keyword::In,
        "from" => Keyword::From,
        "to" => Keyword::To,
        "by" => Keyword::By,
        "repeat" => Keyword::Repeat,
        "times" => Keyword::Times,
        "try" => Keyword::Try,
        "catch" => Keyword::Catch,
        "finally" => Keyword::Finally,
        "fin" => Keyword::Fin,
        "execute" => Keyword::Execute,
        "following" => Keyword::Following,

        "set" => Keyword::Set,
        "equal" => Keyword::Equal,
        "let" => Keyword::Let,
        "be" => Keyword::Be,
        "print" => Keyword::Print,
        "display" => Keyword::Display,
        "return" => Keyword::Return,
        "break" => Keyword::Break,
        "continue" => Keyword::Continue,
        "exit" => Keyword::Exit,
        "throw" => Keyword::Throw,
        "raise" => Keyword::Raise,
        "assert" => Keyword::Assert,
        "import" => Keyword::Import,
        "add" => Keyword::Add,
        "remove" => Keyword::Remove,
        "swap" => Keyword::Swap,
        "read" => Keyword::Read,
        "into" => Keyword::Into,
        "increment" => Keyword::Increment,
        "decrement" => Keyword::Decrement,
        "define" => Keyword::Define,
        "function" => Keyword::Function,
        "structure" => Keyword::Structure,
        "entry" => Keyword::Entry,
        "point" => Keyword::Point,
        "as" => Keyword::As,
        "with" => Keyword::With,
        "call" => Keyword::Call,
        "cast" => Keyword::Cast,

        "plus" => Keyword::Plus,
        "minus" => Keyword::Minus,
        "multiplied" => Keyword::Multiplied,
        "divided" => Keyword::Divided,
        "modulo" | "mod" => Keyword::Modulo,
        "power" => Keyword::Power,
        "of" => Keyword::Of,
        "sum" => Keyword::Sum,
        "difference" => Keyword::Difference,
        "product" => Keyword::Product,
        "quotient" => Keyword::Quotient,
        "remainder" => Keyword::Remainder,
        "negative" => Keyword::Negative,
        "not" => Keyword::Not,
        "and" => Keyword::And,
        "or" => Keyword::Or,
        "is" => Keyword::Is,
        "greater" => Keyword::Greater,
        "less" => Keyword::Less,
        "than" => Keyword::Than,
        "at" => Keyword::At,
        "least" => Keyword::Least,
        "most" => Keyword::Most,
        "null" | "nothing" => Keyword::Null,
        "true" | "yes" => Keyword::True,
        "false" | "no" => Keyword::False,
        "contains" => Keyword::Contains,
        "concatenated" => Keyword::Concatenated,
        "bitwise" => Keyword::Bitwise,
        "xor" => Keyword::Xor,
        "shifted" => Keyword::Shifted,
        "left" => Keyword::Left,
        "right" => Keyword::Right,
        "length" => Keyword::Length,
        "absolute" => Keyword::Absolute,
        "value" => Keyword::Value,
        "square" => Keyword::Square,
        "root" => Keyword::Root,
        "slice" => Keyword::Slice,
        "item" => Keyword::Item,
        "element" => Keyword::Element,
        "list" => Keyword::List,
        "empty" => Keyword::Empty,
        "match" => Keyword::Match,
        "gives" => Keyword::Gives,

        "number" => Keyword::NumberType,
        "text" | "string" => Keyword::TextType,
        "boolean" => Keyword::BooleanType,
        "character" => Keyword::CharacterType,

        "hundred" => Keyword::Hundred,
        "thousand" => Keyword::Thousand,
        "million" => Keyword::Million,
        "billion" => Keyword::Billion,

        _ => Keyword::Unknown,
    }
}

/// Value of a cardinal number word (`zero` .. `ninety`).
///
/// Expects text that has already been folded by the resolver; callers
/// holding raw token text should go through [`fold`] first.
pub fn number_word_value(word: &str) -> Option<u32> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

/// Multiplier of a scale word (`hundred`, `thousand`, ...).
pub fn scale_value(word: &str) -> Option<u64> {
    match word {
        "hundred" => Some(100),
        "thousand" => Some(1_000),
        "million" => Some(1_000_000),
        "billion" => Some(1_000_000_000),
        _ => None,
    }
}

/// Value of an ordinal word (`first` = 1, `third` = 3, `hundredth` = 100).
pub fn ordinal_value(word: &str) -> Option<u32> {
    let value = match word {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        "fifth" => 5,
        "sixth" => 6,
        "seventh" => 7,
        "eighth" => 8,
        "ninth" => 9,
        "tenth" => 10,
        "eleventh" => 11,
        "twelfth" => 12,
        "thirteenth" => 13,
        "fourteenth" => 14,
        "fifteenth" => 15,
        "sixteenth" => 16,
        "seventeenth" => 17,
        "eighteenth" => 18,
        "nineteenth" => 19,
        "twentieth" => 20,
        "thirtieth" => 30,
        "fortieth" => 40,
        "fiftieth" => 50,
        "sixtieth" => 60,
        "seventieth" => 70,
        "eightieth" => 80,
        "ninetieth" => 90,
        "hundredth" => 100,
        _ => return None,
    };
    Some(value)
}

/// Trims, lower-cases and strips diacritics so that alternate spellings
/// of the same word resolve to one keyword.
pub fn fold(raw_text: &str) -> String {
    let mut out = String::with_capacity(raw_text.len());

    for ch in raw_text.trim().chars().flat_map(char::to_lowercase) {
        match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'æ' => out.push_str("ae"),
            'ç' | 'ć' | 'č' => out.push('c'),
            'ď' | 'đ' => out.push('d'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => out.push('i'),
            'ł' => out.push('l'),
            'ñ' | 'ń' | 'ň' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => out.push('o'),
            'œ' => out.push_str("oe"),
            'ř' => out.push('r'),
            'ś' | 'š' | 'ş' => out.push('s'),
            'ß' => out.push_str("ss"),
            'ť' | 'ţ' => out.push('t'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ź' | 'ż' | 'ž' => out.push('z'),
            other => out.push(other),
        }
    }

    out
}

/// The literal shape of a piece of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralShape {
    Number,
    String,
    Character,
    Boolean,
    Null,
    Identifier,
    Other,
}

static NUMBER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("number pattern"));
static STRING_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(\\.|[^"\\])*"$"#).expect("string pattern"));
static CHARACTER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'(\\.|[^'\\])'$").expect("character pattern"));
static IDENTIFIER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Classifies the **literal shape** of raw token text.
///
/// Used by the lexer to assign token kinds and by the literal productions
/// to double-check what they are about to convert.
pub fn classify(text: &str) -> LiteralShape {
    if NUMBER_SHAPE.is_match(text) {
        return LiteralShape::Number;
    }
    if STRING_SHAPE.is_match(text) {
        return LiteralShape::String;
    }
    if CHARACTER_SHAPE.is_match(text) {
        return LiteralShape::Character;
    }
    if IDENTIFIER_SHAPE.is_match(text) {
        return LiteralShape::Identifier;
    }

    match resolve(text) {
        Keyword::True | Keyword::False => LiteralShape::Boolean,
        Keyword::Null => LiteralShape::Null,
        _ => LiteralShape::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_ignores_case_and_whitespace() {
        assert_eq!(resolve("  Otherwise "), Keyword::Otherwise);
        assert_eq!(resolve("SET"), Keyword::Set);
    }

    #[test]
    fn resolution_is_diacritic_stable() {
        assert_eq!(resolve("éxécute"), Keyword::Execute);
        assert_eq!(resolve("Pöint"), Keyword::Point);
        assert_eq!(fold("Straße"), "strasse");
    }

    #[test]
    fn numeric_words_resolve_to_number_classes() {
        assert_eq!(resolve("twenty"), Keyword::NumberWord);
        assert_eq!(resolve("hundred"), Keyword::Hundred);
        assert_eq!(resolve("third"), Keyword::Ordinal);
        assert_eq!(ordinal_value("twelfth"), Some(12));
        assert_eq!(number_word_value("ninety"), Some(90));
    }

    #[test]
    fn unknown_text_is_never_an_error() {
        assert_eq!(resolve("$total"), Keyword::Unknown);
        assert_eq!(resolve(""), Keyword::Unknown);
        assert_eq!(resolve("flibbertigibbet"), Keyword::Unknown);
    }

    #[test]
    fn literal_shapes() {
        assert_eq!(classify("42"), LiteralShape::Number);
        assert_eq!(classify("-3.25"), LiteralShape::Number);
        assert_eq!(classify("\"hi \\\"there\\\"\""), LiteralShape::String);
        assert_eq!(classify("'x'"), LiteralShape::Character);
        assert_eq!(classify("'\\n'"), LiteralShape::Character);
        assert_eq!(classify("$count_2"), LiteralShape::Identifier);
        assert_eq!(classify("Yes"), LiteralShape::Boolean);
        assert_eq!(classify("nothing"), LiteralShape::Null);
        assert_eq!(classify("banana"), LiteralShape::Other);
    }
}
