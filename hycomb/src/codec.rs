//! Prefix token-stream codec.
//!
//! Role
//! - [`parse`] reads whitespace-separated tokens in Polish notation: each keyword token names a
//!   symbol, and exactly `arity` complete terms follow it. `VAR` instead reads one raw name
//!   token. The grammar needs no lookahead or backtracking.
//! - [`print`] is the inverse traversal, joining tokens with single spaces.
//!
//! Two stages:
//! 1) Tokenisation with chumsky, classifying each whitespace-delimited word as a keyword
//!    (`^[A-Z]+$`), a local name (`^[a-z][a-z0-9]*$`) or a dotted global name (`foo.bar`).
//! 2) Arity-driven reading of the token stream into a [`Term`].
//!
//! Round trip: `parse(&print(t)) == t` for every well-formed term, and `print(&parse(s)) == s`
//! for every single-space-separated accepted string.
//!
//! ```
//! use hycomb::codec::{parse, print};
//!
//! let src = "LETREC VAR i LAMBDA VAR x VAR x APP VAR i VAR i";
//! assert_eq!(print(&parse(src).unwrap()), src);
//! assert!(parse("APP VAR x").unwrap_err().is_unexpected_end());
//! ```
use chumsky::prelude::*;
use log::trace;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, CompilerResult};
use crate::pattern::{Pattern, RuleTable, rule, var as pvar};
use crate::symbol::{self, ASSERT, DEFINE, ParseRule, VAR};
use crate::term::{
    Term,
    func::{assert, define, var},
};

pub type Spanned<T> = (T, SimpleSpan);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Token {
    /// Upper-case word: a symbol head.
    Keyword(String),
    /// Bound-variable style name such as `x` or `a2`.
    Local(String),
    /// Dotted qualified name such as `nat.succ`.
    Global(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(s) | Token::Local(s) | Token::Global(s) => f.write_str(s),
        }
    }
}

// ---------------- Lexer ----------------

fn is_keyword(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_local(s: &str) -> bool {
    let mut bytes = s.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_lowercase())
        && bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn is_global(s: &str) -> bool {
    let segment = |seg: &str| {
        let mut bytes = seg.bytes();
        bytes
            .next()
            .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
            && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
    };
    s.contains('.') && s.split('.').all(segment)
}

/// Whether `s` is acceptable as a variable name (local or global).
pub fn is_name_token(s: &str) -> bool {
    is_local(s) || is_global(s)
}

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Spanned<Token>>, extra::Err<Rich<'a, char>>> {
    let word = any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| -> Result<Token, Rich<char>> {
            if is_keyword(s) {
                Ok(Token::Keyword(s.to_string()))
            } else if is_local(s) {
                Ok(Token::Local(s.to_string()))
            } else if is_global(s) {
                Ok(Token::Global(s.to_string()))
            } else {
                Err(Rich::custom(
                    span,
                    format!(
                        "invalid token '{s}': expected a keyword (FOO), a local name (x, a2) or a global name (foo.bar)"
                    ),
                ))
            }
        });

    word.map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect()
        .then_ignore(end())
}

fn tokenize(src: &str) -> CompilerResult<Vec<Spanned<Token>>> {
    let (tokens, errs) = lexer().parse(src).into_output_errors();
    if !errs.is_empty() {
        return Err(CompilerError::Lex(
            errs.into_iter()
                .map(|e| format!("lexing error: {e}"))
                .collect(),
        ));
    }
    tokens.ok_or_else(|| CompilerError::Lex(vec!["lexing produced no output".to_string()]))
}

// ---------------- Reader ----------------

struct Reader<'t> {
    tokens: &'t [Spanned<Token>],
    pos: usize,
}

impl<'t> Reader<'t> {
    /// Next token, or an end-of-input error counting this one plus `pending` terms still owed.
    fn next(&mut self, pending: usize) -> CompilerResult<&'t Spanned<Token>> {
        let tok = self
            .tokens
            .get(self.pos)
            .ok_or(CompilerError::UnexpectedEnd {
                expected: pending + 1,
            })?;
        self.pos += 1;
        Ok(tok)
    }

    /// Read one complete term. `pending` counts sibling and ancestor terms still to be read
    /// after this one.
    fn term(&mut self, pending: usize) -> CompilerResult<Term> {
        let (tok, span) = self.next(pending)?;
        let unrecognized = || CompilerError::UnrecognizedToken {
            token: tok.to_string(),
            position: span.start,
        };
        let Token::Keyword(head) = tok else {
            return Err(unrecognized());
        };
        let symbol = symbol::symbols().get(head).ok_or_else(unrecognized)?;

        match symbol.parse_rule {
            ParseRule::Name => match self.next(pending)? {
                (Token::Local(name) | Token::Global(name), _) => Ok(var(name.as_str())),
                (Token::Keyword(k), span) => Err(CompilerError::InvalidVariable(format!(
                    "expected a name after {VAR} at position {}, found keyword `{k}`",
                    span.start
                ))),
            },
            ParseRule::Children if symbol.arity == 0 => Ok(Term::Symbol(symbol.name)),
            ParseRule::Children => {
                let args = (0..symbol.arity)
                    .map(|i| self.term(pending + symbol.arity - 1 - i))
                    .collect::<CompilerResult<Vec<_>>>()?;
                Ok(Term::with_args(symbol.name, args))
            }
        }
    }
}

/// Parse one complete term from a whitespace-separated token stream.
///
/// Errors: [`CompilerError::Lex`] for malformed words, [`CompilerError::UnrecognizedToken`]
/// for an undeclared head, [`CompilerError::UnexpectedEnd`] when input stops early and
/// [`CompilerError::TrailingTokens`] when input continues past the term.
pub fn parse(src: &str) -> CompilerResult<Term> {
    let tokens = tokenize(src)?;
    let mut reader = Reader {
        tokens: &tokens,
        pos: 0,
    };
    let term = reader.term(0)?;
    if let Some((tok, span)) = tokens.get(reader.pos) {
        return Err(CompilerError::TrailingTokens {
            token: tok.to_string(),
            position: span.start,
        });
    }
    trace!("parsed {} tokens", tokens.len());
    Ok(term)
}

/// Serialize a term as its prefix token stream.
pub fn print(term: &Term) -> String {
    term.to_string()
}

// ---------------- Lines ----------------

/// One line of source as exchanged with external tools: a definition when `name` is present,
/// otherwise an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub name: Option<String>,
    pub code: String,
}

impl Line {
    pub fn assertion(code: impl Into<String>) -> Self {
        Self {
            name: None,
            code: code.into(),
        }
    }

    pub fn definition(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            code: code.into(),
        }
    }
}

/// `DEFINE VAR name <code>` for a named line, `ASSERT <code>` otherwise.
pub fn parse_line(line: &Line) -> CompilerResult<Term> {
    let body = parse(&line.code)?;
    match &line.name {
        Some(name) if is_name_token(name) => Ok(define(var(name.as_str()), body)),
        Some(name) => Err(CompilerError::InvalidVariable(format!(
            "`{name}` is not a valid definition name"
        ))),
        None => Ok(assert(body)),
    }
}

static PRINT_LINE: Lazy<RuleTable<(), Line>> = Lazy::new(|| {
    RuleTable::build(
        "print_line",
        vec![
            rule(
                Pattern::node(DEFINE, [Pattern::node(VAR, [pvar("name")]), pvar("body")]),
                |b, _| Ok(Some(Line::definition(&**b.name("name"), print(&b["body"])))),
            ),
            rule(Pattern::node(ASSERT, [pvar("body")]), |b, _| {
                Ok(Some(Line::assertion(print(&b["body"]))))
            }),
        ],
    )
});

/// Inverse of [`parse_line`]. Any term that is not a `DEFINE` or `ASSERT` is an unmatched
/// expression.
pub fn print_line(term: &Term) -> CompilerResult<Line> {
    PRINT_LINE.apply(term, &mut ())
}
