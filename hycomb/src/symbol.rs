//! Registry of every construct of both calculi, with its arity.
//!
//! Role
//! - Fix the closed set of heads a [`Term`](crate::term::Term) may use, and how many children
//!   each carries. The parser, the smart constructors and the rule tables all consult it.
//! - The standard table is built once on first use and is read-only afterwards.
//!
//! Example
//! ```
//! use hycomb::symbol::{self, SymbolTable, ParseRule};
//!
//! assert_eq!(symbol::symbols().arity("LETREC"), Some(3));
//!
//! let mut table = SymbolTable::new();
//! table.declare("FOO", 1, ParseRule::Children).unwrap();
//! assert!(table.declare("FOO", 1, ParseRule::Children).unwrap_err().is_duplicate_symbol());
//! ```
use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::error::{CompilerError, CompilerResult};

pub const TOP: &str = "TOP";
pub const BOT: &str = "BOT";
pub const I: &str = "I";
pub const K: &str = "K";
pub const B: &str = "B";
pub const C: &str = "C";
pub const CI: &str = "CI";
pub const CB: &str = "CB";
pub const W: &str = "W";
pub const S: &str = "S";
pub const Y: &str = "Y";
pub const U: &str = "U";
pub const V: &str = "V";
pub const P: &str = "P";
pub const A: &str = "A";
pub const J: &str = "J";
pub const R: &str = "R";
pub const QLESS: &str = "QLESS";
pub const QNLESS: &str = "QNLESS";
pub const QEQUAL: &str = "QEQUAL";
pub const HOLE: &str = "HOLE";
pub const NIL: &str = "NIL";
pub const PAREN: &str = "PAREN";
pub const QUOTE: &str = "QUOTE";
pub const CURSOR: &str = "CURSOR";
pub const ASSERT: &str = "ASSERT";
pub const VAR: &str = "VAR";
pub const APP: &str = "APP";
pub const COMP: &str = "COMP";
pub const JOIN: &str = "JOIN";
pub const RAND: &str = "RAND";
pub const LAMBDA: &str = "LAMBDA";
pub const DEFINE: &str = "DEFINE";
pub const STACK: &str = "STACK";
pub const LETREC: &str = "LETREC";
pub const LESS: &str = "LESS";
pub const NLESS: &str = "NLESS";
pub const EQUAL: &str = "EQUAL";

/// How the parser reads the children of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRule {
    /// Read `arity` complete sub-terms.
    Children,
    /// Read the next raw token as a variable name payload (used by `VAR`).
    Name,
}

/// A declared construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    pub arity: usize,
    pub parse_rule: ParseRule,
}

/// Write-once registry of symbols.
///
/// There is no removal or redefinition: a name can be declared exactly once.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<&'static str, Symbol>,
    order: Vec<&'static str>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with the given arity. Fails with [`CompilerError::DuplicateSymbol`] if
    /// the name is already present.
    pub fn declare(
        &mut self,
        name: &'static str,
        arity: usize,
        parse_rule: ParseRule,
    ) -> CompilerResult<()> {
        if self.symbols.contains_key(name) {
            return Err(CompilerError::DuplicateSymbol(name.to_string()));
        }
        self.symbols.insert(
            name,
            Symbol {
                name,
                arity,
                parse_rule,
            },
        );
        self.order.push(name);
        Ok(())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    #[inline]
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.arity)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.order.iter().map(|name| &self.symbols[name])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Map from symbol name to arity, as consumed by tree editors.
    pub fn arities(&self) -> HashMap<&'static str, usize> {
        self.iter().map(|s| (s.name, s.arity)).collect()
    }
}

/// Declarations of the standard vocabulary, in declaration order.
const STANDARD: &[(&str, usize, ParseRule)] = &[
    (TOP, 0, ParseRule::Children),
    (BOT, 0, ParseRule::Children),
    (I, 0, ParseRule::Children),
    (K, 0, ParseRule::Children),
    (B, 0, ParseRule::Children),
    (C, 0, ParseRule::Children),
    (CI, 0, ParseRule::Children),
    (CB, 0, ParseRule::Children),
    (W, 0, ParseRule::Children),
    (S, 0, ParseRule::Children),
    (Y, 0, ParseRule::Children),
    (U, 0, ParseRule::Children),
    (V, 0, ParseRule::Children),
    (P, 0, ParseRule::Children),
    (A, 0, ParseRule::Children),
    (J, 0, ParseRule::Children),
    (R, 0, ParseRule::Children),
    (QLESS, 0, ParseRule::Children),
    (QNLESS, 0, ParseRule::Children),
    (QEQUAL, 0, ParseRule::Children),
    (HOLE, 0, ParseRule::Children),
    (NIL, 0, ParseRule::Children),
    (PAREN, 1, ParseRule::Children),
    (QUOTE, 1, ParseRule::Children),
    (CURSOR, 1, ParseRule::Children),
    (ASSERT, 1, ParseRule::Children),
    (VAR, 1, ParseRule::Name),
    (APP, 2, ParseRule::Children),
    (COMP, 2, ParseRule::Children),
    (JOIN, 2, ParseRule::Children),
    (RAND, 2, ParseRule::Children),
    (LAMBDA, 2, ParseRule::Children),
    (DEFINE, 2, ParseRule::Children),
    (STACK, 2, ParseRule::Children),
    (LETREC, 3, ParseRule::Children),
    (LESS, 2, ParseRule::Children),
    (NLESS, 2, ParseRule::Children),
    (EQUAL, 2, ParseRule::Children),
];

static SYMBOLS: Lazy<SymbolTable> = Lazy::new(|| {
    let mut table = SymbolTable::new();
    for &(name, arity, parse_rule) in STANDARD {
        if let Err(e) = table.declare(name, arity, parse_rule) {
            panic!("invalid standard symbol table: {e}");
        }
    }
    debug!("symbol table initialized with {} symbols", table.len());
    table
});

/// The process-wide standard symbol table.
#[inline]
pub fn symbols() -> &'static SymbolTable {
    &SYMBOLS
}

/// Heads that make up the combinator calculus: every zero-arity symbol except the spine
/// terminator, plus the structural constructors shared with the lambda calculus.
pub fn combinator_vocabulary() -> Vec<&'static str> {
    symbols()
        .iter()
        .filter(|s| s.arity == 0 && s.name != NIL)
        .map(|s| s.name)
        .chain([APP, COMP, JOIN, RAND, QUOTE, VAR])
        .collect()
}

/// Heads that make up the lambda calculus.
pub fn lambda_vocabulary() -> Vec<&'static str> {
    vec![
        HOLE, TOP, BOT, I, VAR, APP, COMP, LAMBDA, LETREC, JOIN, RAND, QUOTE, QLESS, QNLESS,
        QEQUAL, LESS, NLESS, EQUAL, ASSERT, DEFINE, CURSOR,
    ]
}
