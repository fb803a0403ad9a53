//! Application spines.
//!
//! A left-nested application `APP(APP(f, x), y)` seen as its head and argument list:
//! `STACK(f, STACK(x, STACK(y, NIL)))`. Spines are ordinary terms, so rule tables match on them
//! directly.
//!
//! ```
//! use hycomb::spine::{from_stack, stack_all, to_stack};
//! use hycomb::term::{defs::{NIL, S}, func::{app_all, var}};
//!
//! let t = app_all(S, [var("x"), var("y")]);
//! let s = to_stack(&t).unwrap();
//! assert_eq!(s, stack_all([S, var("x"), var("y")], NIL));
//! assert_eq!(from_stack(&s).unwrap(), t);
//! ```
use std::mem;

use once_cell::sync::Lazy;

use crate::error::CompilerResult;
use crate::pattern::{Bindings, Pattern, RuleTable, rule, var};
use crate::symbol::{APP, STACK};
use crate::term::{
    Term,
    defs::NIL,
    func::{app, stack},
};

/// Right-fold `items` onto `tail` as `STACK` cells.
pub fn stack_all<T>(items: T, tail: Term) -> Term
where
    T: IntoIterator<Item = Term>,
    T::IntoIter: DoubleEndedIterator,
{
    items
        .into_iter()
        .rev()
        .fold(tail, |tail, item| stack(item, tail))
}

/// Pattern counterpart of [`stack_all`].
pub fn stack_pattern(items: impl IntoIterator<Item = Pattern>, tail: Pattern) -> Pattern {
    let items: Vec<Pattern> = items.into_iter().collect();
    items
        .into_iter()
        .rev()
        .fold(tail, |tail, item| Pattern::node(STACK, [item, tail]))
}

static TO_STACK: Lazy<RuleTable<Term, Term>> = Lazy::new(|| {
    RuleTable::build(
        "to_stack",
        vec![
            rule(Pattern::node(APP, [var("x"), var("y")]), unfold_app),
            rule(var("x"), push_head),
        ],
    )
});

fn unfold_app(b: Bindings, tail: &mut Term) -> CompilerResult<Option<Term>> {
    *tail = stack(b["y"].clone(), mem::replace(tail, NIL));
    TO_STACK.apply(&b["x"], tail).map(Some)
}

fn push_head(b: Bindings, tail: &mut Term) -> CompilerResult<Option<Term>> {
    Ok(Some(stack(b["x"].clone(), mem::replace(tail, NIL))))
}

/// Unfold an application chain into a `NIL`-terminated spine. A term that is not an application
/// becomes a one-element spine.
pub fn to_stack(term: &Term) -> CompilerResult<Term> {
    to_stack_onto(term, Vec::new(), NIL)
}

/// Unfold `head`'s application chain on top of `args` followed by an existing spine `tail`.
///
/// `to_stack_onto(x, [y, z], tail)` is the spine of `x y z` continued by `tail`.
pub fn to_stack_onto(head: &Term, args: Vec<Term>, tail: Term) -> CompilerResult<Term> {
    let mut tail = stack_all(args, tail);
    TO_STACK.apply(head, &mut tail)
}

static FROM_STACK: Lazy<RuleTable<(), Term>> = Lazy::new(|| {
    RuleTable::build(
        "from_stack",
        vec![
            rule(
                stack_pattern([var("x"), var("y")], var("tail")),
                |b, _| {
                    let folded = stack(app(b["x"].clone(), b["y"].clone()), b["tail"].clone());
                    FROM_STACK.apply(&folded, &mut ()).map(Some)
                },
            ),
            rule(stack_pattern([var("x")], NIL.into()), |b, _| {
                Ok(Some(b["x"].clone()))
            }),
        ],
    )
});

/// Fold a spine back into nested applications. Fails with an unmatched expression on anything
/// that is not a non-empty `NIL`-terminated spine.
pub fn from_stack(spine: &Term) -> CompilerResult<Term> {
    FROM_STACK.apply(spine, &mut ())
}
