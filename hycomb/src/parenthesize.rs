//! Grouping for human-readable rendering.
//!
//! [`parenthesize`] wraps sub-terms in `PAREN` wherever an infix renderer needs explicit
//! grouping. Precedence, loosest first:
//!
//! `LAMBDA`/`LETREC` < `JOIN` < `APP` < `COMP` < atoms.
//!
//! `RAND`, `QUOTE` and the comparisons carry their own brackets and count as atoms. `CURSOR`
//! is transparent at every level. An existing `PAREN` is kept and its contents regrouped.
//! Binder positions only accept `VAR`, `QUOTE` and `CURSOR` patterns. `DEFINE` and `ASSERT`
//! are only accepted at the top level, and spines (`STACK`) nowhere.
//!
//! ```
//! use hycomb::parenthesize::parenthesize;
//! use hycomb::term::func::{app, join, paren, var};
//!
//! let t = app(var("f"), join(var("x"), var("y")));
//! assert_eq!(
//!     parenthesize(&t).unwrap(),
//!     app(var("f"), paren(join(var("x"), var("y")))),
//! );
//! ```
use once_cell::sync::Lazy;

use crate::error::CompilerResult;
use crate::pattern::{Pattern, RuleTable, rule, var, var_if};
use crate::symbol::{
    APP, ASSERT, COMP, CURSOR, DEFINE, EQUAL, JOIN, LAMBDA, LESS, LETREC, NLESS, PAREN, QUOTE,
    RAND,
};
use crate::term::{
    Term,
    func::{app, assert, comp, cursor, define, equal, join, lambda, less, letrec, nless, paren, quote, rand},
};

type Table = Lazy<RuleTable<(), Term>>;

/// Heads handled by one of the precedence levels below atoms.
fn is_operator(t: &Term) -> bool {
    matches!(t.head(), Some(APP | COMP | JOIN | LAMBDA | LETREC))
}

fn unary(head: &'static str) -> Pattern {
    Pattern::node(head, [var("x")])
}

fn binary(head: &'static str) -> Pattern {
    Pattern::node(head, [var("x"), var("y")])
}

static PATTERN: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_pattern",
        vec![
            rule(var_if("v", Term::is_var), |b, _| Ok(Some(b["v"].clone()))),
            rule(unary(QUOTE), |b, _| Ok(Some(quote(pattern(&b["x"])?)))),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(pattern(&b["x"])?)))),
        ],
    )
});

static ATOM: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_atom",
        vec![
            rule(var_if("atom", Term::is_symbol), |b, _| {
                Ok(Some(b["atom"].clone()))
            }),
            rule(var_if("v", Term::is_var), |b, _| Ok(Some(b["v"].clone()))),
            rule(binary(RAND), |b, _| {
                Ok(Some(rand(inline(&b["x"])?, inline(&b["y"])?)))
            }),
            rule(unary(QUOTE), |b, _| Ok(Some(quote(inline(&b["x"])?)))),
            rule(binary(LESS), |b, _| {
                Ok(Some(less(join_level(&b["x"])?, join_level(&b["y"])?)))
            }),
            rule(binary(NLESS), |b, _| {
                Ok(Some(nless(join_level(&b["x"])?, join_level(&b["y"])?)))
            }),
            rule(binary(EQUAL), |b, _| {
                Ok(Some(equal(join_level(&b["x"])?, join_level(&b["y"])?)))
            }),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(atom(&b["x"])?)))),
            rule(unary(PAREN), |b, _| Ok(Some(paren(inline(&b["x"])?)))),
            rule(var_if("x", is_operator), |b, _| {
                Ok(Some(paren(inline(&b["x"])?)))
            }),
        ],
    )
});

static COMP_LEVEL: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_comp",
        vec![
            rule(binary(COMP), |b, _| {
                Ok(Some(comp(comp_level(&b["x"])?, comp_level(&b["y"])?)))
            }),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(comp_level(&b["x"])?)))),
            rule(var("x"), |b, _| atom(&b["x"]).map(Some)),
        ],
    )
});

static APP_LEVEL: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_app",
        vec![
            rule(binary(APP), |b, _| {
                Ok(Some(app(app_level(&b["x"])?, atom(&b["y"])?)))
            }),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(app_level(&b["x"])?)))),
            rule(var("x"), |b, _| comp_level(&b["x"]).map(Some)),
        ],
    )
});

static JOIN_LEVEL: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_join",
        vec![
            rule(binary(JOIN), |b, _| {
                Ok(Some(join(join_level(&b["x"])?, join_level(&b["y"])?)))
            }),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(join_level(&b["x"])?)))),
            rule(var("x"), |b, _| app_level(&b["x"]).map(Some)),
        ],
    )
});

static INLINE: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize_inline",
        vec![
            rule(binary(LAMBDA), |b, _| {
                Ok(Some(lambda(pattern(&b["x"])?, inline(&b["y"])?)))
            }),
            rule(
                Pattern::node(LETREC, [var("x"), var("y"), var("z")]),
                |b, _| {
                    let x = pattern(&b["x"])?;
                    let y = join_level(&b["y"])?;
                    let z = inline(&b["z"])?;
                    Ok(Some(letrec(x, y, z)))
                },
            ),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(inline(&b["x"])?)))),
            rule(var("x"), |b, _| join_level(&b["x"]).map(Some)),
        ],
    )
});

static TOP_LEVEL: Table = Lazy::new(|| {
    RuleTable::build(
        "parenthesize",
        vec![
            rule(binary(DEFINE), |b, _| {
                Ok(Some(define(atom(&b["x"])?, join_level(&b["y"])?)))
            }),
            rule(unary(ASSERT), |b, _| Ok(Some(assert(join_level(&b["x"])?)))),
            rule(unary(CURSOR), |b, _| Ok(Some(cursor(parenthesize(&b["x"])?)))),
            rule(var("x"), |b, _| inline(&b["x"]).map(Some)),
        ],
    )
});

fn pattern(t: &Term) -> CompilerResult<Term> {
    PATTERN.apply(t, &mut ())
}

fn atom(t: &Term) -> CompilerResult<Term> {
    ATOM.apply(t, &mut ())
}

fn comp_level(t: &Term) -> CompilerResult<Term> {
    COMP_LEVEL.apply(t, &mut ())
}

fn app_level(t: &Term) -> CompilerResult<Term> {
    APP_LEVEL.apply(t, &mut ())
}

fn join_level(t: &Term) -> CompilerResult<Term> {
    JOIN_LEVEL.apply(t, &mut ())
}

fn inline(t: &Term) -> CompilerResult<Term> {
    INLINE.apply(t, &mut ())
}

/// Insert `PAREN` nodes so that an infix rendering of `term` groups as the tree does.
///
/// Fails with an unmatched expression when a binder is not a `VAR`, `QUOTE` or `CURSOR`
/// pattern, when `DEFINE` or `ASSERT` appear below the top level, or on a spine.
pub fn parenthesize(term: &Term) -> CompilerResult<Term> {
    TOP_LEVEL.apply(term, &mut ())
}
