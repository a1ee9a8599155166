//! Textual grammar and raw syntax tree
//!
//! ```text
//! program    := expression*
//! expression := string | integer | name | call
//! call       := "(" expression+ ")"
//! ```
//!
//! A bare token is an integer when it is entirely `-?[0-9]+`, otherwise a
//! name; names may contain any character except whitespace, parentheses
//! and double quotes. Strings use JSON syntax and stay escaped here.

use std::fmt::Write as _;

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, char, none_of},
    combinator::{cut, map, recognize},
    error::ErrorKind,
    multi::many0,
    sequence::pair,
    IResult,
};

use crate::error::ParseError;

/// A raw syntax node, before conversion to entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syntax {
    /// Integer token text
    Integer(String),

    /// String token text, quotes and escapes included
    String(String),

    /// Identifier text
    Name(String),

    /// Parenthesized group with at least one child
    Call(Vec<Syntax>),
}

/// A parsed source text: its top-level expressions in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Top-level expressions
    pub expressions: Vec<Syntax>,
}

impl Syntax {
    /// Grammar rule that produced this node.
    pub fn rule(&self) -> &'static str {
        match self {
            Syntax::Integer(_) => "integer",
            Syntax::String(_) => "string",
            Syntax::Name(_) => "name",
            Syntax::Call(_) => "call",
        }
    }

    /// Indented dump of the node and its children.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Syntax::Integer(token) | Syntax::String(token) | Syntax::Name(token) => {
                let _ = writeln!(out, "{}{}\t{}", indent, self.rule(), token);
            }
            Syntax::Call(children) => {
                let _ = writeln!(out, "{}call", indent);
                for child in children {
                    child.write_pretty(out, depth + 1);
                }
            }
        }
    }
}

impl Program {
    /// Indented dump of the whole tree, rooted at `start`.
    pub fn pretty(&self) -> String {
        let mut out = String::from("start\n");
        for expression in &self.expressions {
            expression.write_pretty(&mut out, 1);
        }
        out
    }
}

/// Deepest call nesting the parser accepts.
///
/// Parsing, conversion and reduction all recurse once per level, so
/// deeper input is rejected here instead of exhausting the stack later.
pub const MAX_NESTING: usize = 256;

/// Parse `source` into a [`Program`].
///
/// # Errors
///
/// `ParseError::Syntax` with the byte offset where the offending construct
/// starts: an unmatched `)`, an unclosed `(`, an empty call, an
/// unterminated string or nesting deeper than [`MAX_NESTING`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut expressions = Vec::new();
    let mut rest = source;

    loop {
        let (next, _) = ws(rest).map_err(|err| syntax_error(source, err))?;
        if next.is_empty() {
            break;
        }
        if next.starts_with(')') {
            return Err(ParseError::Syntax {
                offset: source.len() - next.len(),
                message: "unmatched `)`".to_string(),
            });
        }

        let (after, expr) = expression(next, 0).map_err(|err| syntax_error(source, err))?;
        expressions.push(expr);
        rest = after;
    }

    Ok(Program { expressions })
}

fn syntax_error(source: &str, err: nom::Err<GrammarError<'_>>) -> ParseError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Syntax {
            offset: source.len() - e.input.len(),
            message: e.message.to_string(),
        },
        nom::Err::Incomplete(_) => ParseError::Syntax {
            offset: source.len(),
            message: "incomplete input".to_string(),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Grammar Errors
// ═══════════════════════════════════════════════════════════════════════

/// Where a rule gave up and why.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GrammarError<'a> {
    input: &'a str,
    message: &'static str,
}

impl<'a> nom::error::ParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self {
            input,
            message: "unexpected input",
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type GrammarResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;

/// Unrecoverable failure pinned to `input`.
fn fail<'a, O>(input: &'a str, message: &'static str) -> GrammarResult<'a, O> {
    Err(nom::Err::Failure(GrammarError { input, message }))
}

// ═══════════════════════════════════════════════════════════════════════
// Grammar Rules
// ═══════════════════════════════════════════════════════════════════════

/// Separator between items; the same notion of whitespace that ends a name.
fn ws(input: &str) -> GrammarResult<'_, &str> {
    take_while(char::is_whitespace)(input)
}

fn expression(input: &str, depth: usize) -> GrammarResult<'_, Syntax> {
    match input.chars().next() {
        Some('"') => string(input),
        Some('(') => call(input, depth + 1),
        _ => atom(input),
    }
}

fn string(input: &str) -> GrammarResult<'_, Syntax> {
    let (body, _) = char::<_, GrammarError<'_>>('"')(input)?;
    let (rest, _) = many0(string_char)(body)?;

    match char::<_, GrammarError<'_>>('"')(rest) {
        Ok((after, _)) => {
            let token = &input[..input.len() - after.len()];
            Ok((after, Syntax::String(token.to_string())))
        }
        Err(_) => fail(input, "unterminated string literal"),
    }
}

fn string_char(input: &str) -> GrammarResult<'_, &str> {
    alt((
        recognize(pair(char('\\'), anychar)),
        recognize(none_of("\\\"")),
    ))(input)
}

fn call(input: &str, depth: usize) -> GrammarResult<'_, Syntax> {
    if depth > MAX_NESTING {
        return fail(input, "calls nested too deeply");
    }

    let (mut rest, _) = char::<_, GrammarError<'_>>('(')(input)?;
    let mut children = Vec::new();

    loop {
        let (next, _) = ws(rest)?;
        if next.is_empty() {
            return fail(input, "unclosed `(`");
        }
        if let Some(after) = next.strip_prefix(')') {
            if children.is_empty() {
                return fail(input, "empty call `()`");
            }
            return Ok((after, Syntax::Call(children)));
        }

        let (after, child) = cut(|i| expression(i, depth))(next)?;
        children.push(child);
        rest = after;
    }
}

fn atom(input: &str) -> GrammarResult<'_, Syntax> {
    map(take_while1(is_name_char), |token: &str| {
        if is_integer_token(token) {
            Syntax::Integer(token.to_string())
        } else {
            Syntax::Name(token.to_string())
        }
    })(input)
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '"'
}

fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Syntax {
        Syntax::Name(s.to_string())
    }

    fn int(s: &str) -> Syntax {
        Syntax::Integer(s.to_string())
    }

    #[test]
    fn test_integer_or_name() {
        assert!(is_integer_token("42"));
        assert!(is_integer_token("-3"));
        assert!(!is_integer_token("-"));
        assert!(!is_integer_token("12abc"));
        assert!(!is_integer_token("x^2+y^2"));
    }

    #[test]
    fn test_parse_atoms() {
        let program = parse("  42 -7 foo + ").unwrap();
        assert_eq!(
            program.expressions,
            vec![int("42"), int("-7"), name("foo"), name("+")]
        );
    }

    #[test]
    fn test_parse_nested_call() {
        let program = parse("(x^2+y^2 (- 2 5)\n\t7)").unwrap();
        assert_eq!(
            program.expressions,
            vec![Syntax::Call(vec![
                name("x^2+y^2"),
                Syntax::Call(vec![name("-"), int("2"), int("5")]),
                int("7"),
            ])]
        );
    }

    #[test]
    fn test_parse_string_keeps_escapes() {
        let program = parse(r#"("a \"quoted\" word" "x\ny")"#).unwrap();
        assert_eq!(
            program.expressions,
            vec![Syntax::Call(vec![
                Syntax::String(r#""a \"quoted\" word""#.to_string()),
                Syntax::String(r#""x\ny""#.to_string()),
            ])]
        );
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(parse("").unwrap(), Program::default());
        assert_eq!(parse(" \n ").unwrap(), Program::default());
    }

    #[test]
    fn test_parse_errors_report_offset() {
        assert_eq!(
            parse("1 )").unwrap_err(),
            ParseError::Syntax {
                offset: 2,
                message: "unmatched `)`".to_string()
            }
        );
        assert_eq!(
            parse("x (+ 1 2").unwrap_err(),
            ParseError::Syntax {
                offset: 2,
                message: "unclosed `(`".to_string()
            }
        );
        assert_eq!(
            parse("(f ())").unwrap_err(),
            ParseError::Syntax {
                offset: 3,
                message: "empty call `()`".to_string()
            }
        );
        assert_eq!(
            parse(r#"x "abc"#).unwrap_err(),
            ParseError::Syntax {
                offset: 2,
                message: "unterminated string literal".to_string()
            }
        );
    }

    #[test]
    fn test_innermost_failure_wins() {
        assert_eq!(
            parse(r#"(+ 1 "abc"#).unwrap_err(),
            ParseError::Syntax {
                offset: 5,
                message: "unterminated string literal".to_string()
            }
        );
        assert_eq!(
            parse("(+ (* 2 3) (- 4").unwrap_err(),
            ParseError::Syntax {
                offset: 11,
                message: "unclosed `(`".to_string()
            }
        );
    }

    #[test]
    fn test_any_unicode_whitespace_separates() {
        let expected = vec![Syntax::Call(vec![name("+"), int("1"), int("2")])];
        for sep in ["\u{0c}", "\u{0b}", "\u{a0}", "\u{2003}", "\u{85}"] {
            let source = format!("{sep}(+{sep}1{sep}2{sep}){sep}");
            assert_eq!(parse(&source).unwrap().expressions, expected, "separator {:?}", sep);
        }
        assert_eq!(
            parse("1\u{a0}2").unwrap().expressions,
            vec![int("1"), int("2")]
        );
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "(f ".repeat(depth), ")".repeat(depth));

        assert!(parse(&nested(MAX_NESTING)).is_ok());
        assert_eq!(
            parse(&nested(MAX_NESTING + 1)).unwrap_err(),
            ParseError::Syntax {
                offset: MAX_NESTING * 3,
                message: "calls nested too deeply".to_string()
            }
        );
        // Far beyond the limit still fails cleanly instead of overflowing
        assert!(parse(&nested(100_000)).is_err());
    }

    #[test]
    fn test_pretty_tree() {
        let program = parse("(+ 1 \"a\")").unwrap();
        assert_eq!(
            program.pretty(),
            "start\n  call\n    name\t+\n    integer\t1\n    string\t\"a\"\n"
        );
    }
}
