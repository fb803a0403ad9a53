//! Combinator code to lambda terms.
//!
//! Role
//! - Inverse of [`compile`](crate::compile::compile): every combinator is read off its
//!   application spine together with the arguments it is given.
//! - Missing arguments become fresh `LAMBDA` binders. A supplied argument that the expansion
//!   would use twice is shared through a `LETREC` binding unless it already is a bare variable.
//! - Derived combinators (`CI`, `CB`, `U`, `V`, `P`) are expanded through [`definition`] first.
//!
//! [`decompile`] simplifies its result, so the output is in affine beta-eta normal form with
//! canonical bound names.
//!
//! ```
//! use hycomb::decompile::decompile;
//! use hycomb::term::{defs::S, func::{app, app_all, lambda, var}};
//!
//! let (a, x, y) = (var("a"), var("x"), var("y"));
//! assert_eq!(
//!     decompile(&app_all(S, [x.clone(), y.clone()])).unwrap(),
//!     lambda(a.clone(), app_all(x, [a.clone(), app(y, a)])),
//! );
//! ```
use log::debug;
use once_cell::sync::Lazy;

use crate::error::{CompilerError, CompilerResult};
use crate::fresh::FreshNames;
use crate::normalize::simplify;
use crate::pattern::{Bindings, Pattern, RuleTable, rule, var, var_if};
use crate::spine::{from_stack, stack_pattern, to_stack, to_stack_onto};
use crate::symbol::{self, COMP, QUOTE, STACK};
use crate::term::{
    Term,
    defs::{B, BOT, C, HOLE, I, J, K, NIL, QEQUAL, QLESS, QNLESS, R, S, TOP, W, Y},
    func::{app, app_all, comp, comp_all, equal, join, lambda, less, letrec, nless, quote, rand, stack},
};

fn u() -> Term {
    comp(
        Y,
        comp_all(app(S, B), [app(J, app_all(C, [B, I])), app(C, B)]),
    )
}

fn v() -> Term {
    comp(u(), app(J, I))
}

fn p() -> Term {
    comp(app(B, v()), J)
}

/// Defining expansion of a derived combinator, or `None` for a primitive one.
///
/// `A` is declared but has no definition yet and is rejected as not implemented.
pub fn definition(name: &str) -> CompilerResult<Option<Term>> {
    Ok(Some(match name {
        symbol::CI => app(C, I),
        symbol::CB => app(C, B),
        symbol::U => u(),
        symbol::V => v(),
        symbol::P => p(),
        symbol::A => {
            return Err(CompilerError::NotImplemented(
                "the A combinator has no definition".to_string(),
            ));
        }
        _ => return Ok(None),
    }))
}

fn is_derived(t: &Term) -> bool {
    matches!(
        t,
        Term::Symbol(symbol::CI | symbol::CB | symbol::U | symbol::V | symbol::P | symbol::A)
    )
}

fn is_comparison(t: &Term) -> bool {
    *t == QLESS || *t == QNLESS || *t == QEQUAL
}

/// Lambda-side constructor for a quoted comparison combinator.
fn comparison(head: &Term) -> fn(Term, Term) -> Term {
    match head {
        h if *h == QNLESS => nless,
        h if *h == QEQUAL => equal,
        _ => less,
    }
}

// ---------------- Rule helpers ----------------

fn dec(term: &Term, fresh: &mut FreshNames) -> CompilerResult<Term> {
    DECOMPILE_STACK.apply(&to_stack(term)?, fresh)
}

fn dec_stack(spine: &Term, fresh: &mut FreshNames) -> CompilerResult<Term> {
    DECOMPILE_STACK.apply(spine, fresh)
}

fn dec_tail(tail: &Term, fresh: &mut FreshNames) -> CompilerResult<Term> {
    DECOMPILE_TAIL.apply(tail, fresh)
}

/// Decompile `head` applied to `args` and the rest of the spine.
fn dec_onto(
    head: &Term,
    args: Vec<Term>,
    tail: Term,
    fresh: &mut FreshNames,
) -> CompilerResult<Term> {
    dec_stack(&to_stack_onto(head, args, tail)?, fresh)
}

/// `head` applied to the decompiled `tail`.
fn with_tail(head: Term, tail: &Term, fresh: &mut FreshNames) -> CompilerResult<Term> {
    from_stack(&stack(head, dec_tail(tail, fresh)?))
}

/// Take up to `N` decompiled arguments from `tail`, inventing a fresh lambda binder for each
/// missing one, and apply the result of `build` to whatever the spine has left.
fn ensure<const N: usize>(
    tail: &Term,
    fresh: &mut FreshNames,
    build: impl FnOnce([Term; N], &mut FreshNames) -> Term,
) -> CompilerResult<Term> {
    let mut binders = Vec::new();
    let mut args: [Term; N] = std::array::from_fn(|_| NIL);
    let mut rest = tail.clone();
    for slot in args.iter_mut() {
        let next = match &rest {
            Term::Node(STACK, cell) => {
                *slot = dec(&cell[0], fresh)?;
                cell[1].clone()
            }
            _ => {
                *slot = fresh.fresh();
                binders.push(slot.clone());
                continue;
            }
        };
        rest = next;
    }
    let body = build(args, fresh);
    let head = binders
        .into_iter()
        .rev()
        .fold(body, |body, binder| lambda(binder, body));
    with_tail(head, &rest, fresh)
}

fn s(items: impl IntoIterator<Item = Pattern>, tail: Pattern) -> Pattern {
    stack_pattern(items, tail)
}

fn nil() -> Pattern {
    NIL.into()
}

type Handler = fn(Bindings, &mut FreshNames) -> CompilerResult<Option<Term>>;

// ---------------- Combinators ----------------

fn i_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let x = fresh.fresh();
    Ok(Some(lambda(x.clone(), x)))
}

fn k_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let x = fresh.fresh();
    let y = fresh.fresh();
    Ok(Some(lambda(x.clone(), lambda(y, x))))
}

fn k_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    Ok(Some(lambda(y, tx)))
}

fn b_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let [x, y, z] = [fresh.fresh(), fresh.fresh(), fresh.fresh()];
    let body = app(x.clone(), app(y.clone(), z.clone()));
    Ok(Some(lambda(x, lambda(y, lambda(z, body)))))
}

fn b_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let z = fresh.fresh();
    let xyz = dec_onto(&b["x"], vec![app(y.clone(), z.clone())], NIL, fresh)?;
    Ok(Some(lambda(y, lambda(z, xyz))))
}

fn b_two(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let z = fresh.fresh();
    let xyz = dec_onto(&b["x"], vec![app(b["y"].clone(), z.clone())], NIL, fresh)?;
    Ok(Some(lambda(z, xyz)))
}

fn c_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let [x, y, z] = [fresh.fresh(), fresh.fresh(), fresh.fresh()];
    let body = app_all(x.clone(), [z.clone(), y.clone()]);
    Ok(Some(lambda(x, lambda(y, lambda(z, body)))))
}

fn c_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let z = fresh.fresh();
    let xzy = dec_onto(&b["x"], vec![z.clone(), y.clone()], NIL, fresh)?;
    Ok(Some(lambda(y, lambda(z, xzy))))
}

fn c_two(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let z = fresh.fresh();
    let xzy = dec_onto(&b["x"], vec![z.clone(), b["y"].clone()], NIL, fresh)?;
    Ok(Some(lambda(z, xzy)))
}

fn w_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let x = fresh.fresh();
    let y = fresh.fresh();
    Ok(Some(lambda(
        x.clone(),
        lambda(y.clone(), app_all(x, [y.clone(), y])),
    )))
}

fn w_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    Ok(Some(lambda(y.clone(), app_all(tx, [y.clone(), y]))))
}

fn w_var(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = &b["y"];
    let head = dec(&app_all(b["x"].clone(), [y.clone(), y.clone()]), fresh)?;
    with_tail(head, &b["tail"], fresh).map(Some)
}

fn w_shared(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let ty = dec(&b["y"], fresh)?;
    let body = dec(&app_all(b["x"].clone(), [y.clone(), y.clone()]), fresh)?;
    with_tail(letrec(y, ty, body), &b["tail"], fresh).map(Some)
}

fn s_bare(_: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let [x, y, z] = [fresh.fresh(), fresh.fresh(), fresh.fresh()];
    let body = app_all(x.clone(), [z.clone(), app(y.clone(), z.clone())]);
    Ok(Some(lambda(x, lambda(y, lambda(z, body)))))
}

fn s_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let y = fresh.fresh();
    let z = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    let body = app_all(tx, [z.clone(), app(y.clone(), z.clone())]);
    Ok(Some(lambda(y, lambda(z, body))))
}

fn s_two(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let z = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    let ty = dec(&b["y"], fresh)?;
    let body = app_all(tx, [z.clone(), app(ty, z.clone())]);
    Ok(Some(lambda(z, body)))
}

fn s_var(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let z = &b["z"];
    let expanded = app_all(b["x"].clone(), [z.clone(), app(b["y"].clone(), z.clone())]);
    let head = dec(&expanded, fresh)?;
    with_tail(head, &b["tail"], fresh).map(Some)
}

fn s_shared(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let z = fresh.fresh();
    let tz = dec(&b["z"], fresh)?;
    let expanded = app_all(b["x"].clone(), [z.clone(), app(b["y"].clone(), z.clone())]);
    let body = dec(&expanded, fresh)?;
    with_tail(letrec(z, tz, body), &b["tail"], fresh).map(Some)
}

fn y_any(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    ensure::<1>(&b["tail"], fresh, |[x], fresh| {
        let y = fresh.fresh();
        let z = fresh.fresh();
        letrec(y.clone(), lambda(z.clone(), app(x, app(y.clone(), z))), y)
    })
    .map(Some)
}

fn binary(
    b: &Bindings,
    fresh: &mut FreshNames,
    make: fn(Term, Term) -> Term,
) -> CompilerResult<Option<Term>> {
    ensure::<2>(&b["tail"], fresh, |[x, y], _| make(x, y)).map(Some)
}

// ---------------- Quoted comparisons ----------------

fn q_bare(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let make = comparison(&b["q"]);
    let x = fresh.fresh();
    let y = fresh.fresh();
    Ok(Some(lambda(
        quote(x.clone()),
        lambda(quote(y.clone()), make(x, y)),
    )))
}

fn q_quoted(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let make = comparison(&b["q"]);
    let y = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    Ok(Some(lambda(quote(y.clone()), make(tx, y))))
}

fn q_one(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let make = comparison(&b["q"]);
    let x = fresh.fresh();
    let y = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    Ok(Some(letrec(
        quote(x.clone()),
        tx,
        lambda(quote(y.clone()), make(x, y)),
    )))
}

fn q_both_quoted(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let make = comparison(&b["q"]);
    let tx = dec(&b["x"], fresh)?;
    let ty = dec(&b["y"], fresh)?;
    with_tail(make(tx, ty), &b["tail"], fresh).map(Some)
}

fn q_two(b: Bindings, fresh: &mut FreshNames) -> CompilerResult<Option<Term>> {
    let make = comparison(&b["q"]);
    let x = fresh.fresh();
    let y = fresh.fresh();
    let tx = dec(&b["x"], fresh)?;
    let ty = dec(&b["y"], fresh)?;
    let head = letrec(quote(x.clone()), tx, letrec(quote(y.clone()), ty, make(x, y)));
    with_tail(head, &b["tail"], fresh).map(Some)
}

// ---------------- Tables ----------------

static DECOMPILE_STACK: Lazy<RuleTable<FreshNames, Term>> = Lazy::new(|| {
    let x = || var("x");
    let y = || var("y");
    let z = || var("z");
    let tail = || var("tail");
    let q = || var_if("q", is_comparison);
    let quoted = |name| Pattern::node(QUOTE, [var(name)]);

    let rules: Vec<(Pattern, Handler)> = vec![
        rule(s([Pattern::node(COMP, [x(), y()])], tail()), |b, fresh| {
            dec_onto(&B, vec![b["x"].clone(), b["y"].clone()], b["tail"].clone(), fresh)
                .map(Some)
        }),
        rule(s([Pattern::from(HOLE)], tail()), |b, fresh| {
            with_tail(HOLE, &b["tail"], fresh).map(Some)
        }),
        rule(s([Pattern::from(TOP)], tail()), |_, _| Ok(Some(TOP))),
        rule(s([Pattern::from(BOT)], tail()), |_, _| Ok(Some(BOT))),
        // I
        rule(s([Pattern::from(I)], nil()), i_bare),
        rule(s([I.into(), x()], tail()), |b, fresh| {
            dec_onto(&b["x"], Vec::new(), b["tail"].clone(), fresh).map(Some)
        }),
        // K
        rule(s([Pattern::from(K)], nil()), k_bare),
        rule(s([K.into(), x()], nil()), k_one),
        rule(s([K.into(), x(), y()], tail()), |b, fresh| {
            dec_onto(&b["x"], Vec::new(), b["tail"].clone(), fresh).map(Some)
        }),
        // B
        rule(s([Pattern::from(B)], nil()), b_bare),
        rule(s([B.into(), x()], nil()), b_one),
        rule(s([B.into(), x(), y()], nil()), b_two),
        rule(s([B.into(), x(), y(), z()], tail()), |b, fresh| {
            let yz = app(b["y"].clone(), b["z"].clone());
            dec_onto(&b["x"], vec![yz], b["tail"].clone(), fresh).map(Some)
        }),
        // C
        rule(s([Pattern::from(C)], nil()), c_bare),
        rule(s([C.into(), x()], nil()), c_one),
        rule(s([C.into(), x(), y()], nil()), c_two),
        rule(s([C.into(), x(), y(), z()], tail()), |b, fresh| {
            let args = vec![b["z"].clone(), b["y"].clone()];
            dec_onto(&b["x"], args, b["tail"].clone(), fresh).map(Some)
        }),
        // W
        rule(s([Pattern::from(W)], nil()), w_bare),
        rule(s([W.into(), x()], nil()), w_one),
        rule(s([W.into(), x(), var_if("y", Term::is_var)], tail()), w_var),
        rule(s([W.into(), x(), y()], tail()), w_shared),
        // S
        rule(s([Pattern::from(S)], nil()), s_bare),
        rule(s([S.into(), x()], nil()), s_one),
        rule(s([S.into(), x(), y()], nil()), s_two),
        rule(s([S.into(), x(), y(), var_if("z", Term::is_var)], tail()), s_var),
        rule(s([S.into(), x(), y(), z()], tail()), s_shared),
        // Y, J, R
        rule(s([Pattern::from(Y)], tail()), y_any),
        rule(s([Pattern::from(J)], tail()), |b, fresh| binary(&b, fresh, join)),
        rule(s([Pattern::from(R)], tail()), |b, fresh| binary(&b, fresh, rand)),
        // QLESS, QNLESS, QEQUAL
        rule(s([q()], nil()), q_bare),
        rule(s([q(), quoted("x")], nil()), q_quoted),
        rule(s([q(), x()], nil()), q_one),
        rule(s([q(), quoted("x"), quoted("y")], tail()), q_both_quoted),
        rule(s([q(), x(), y()], tail()), q_two),
        // Variables, derived combinators, other nodes
        rule(s([var_if("v", Term::is_var)], tail()), |b, fresh| {
            with_tail(b["v"].clone(), &b["tail"], fresh).map(Some)
        }),
        rule(s([var_if("atom", is_derived)], tail()), |b, fresh| {
            let Some(name) = b["atom"].head() else {
                return Ok(None);
            };
            match definition(name)? {
                Some(def) => dec_onto(&def, Vec::new(), b["tail"].clone(), fresh).map(Some),
                None => Ok(None),
            }
        }),
        rule(s([var_if("node", Term::is_node)], tail()), |b, fresh| {
            let head = b["node"].try_map_args(|a| dec(a, fresh))?;
            with_tail(head, &b["tail"], fresh).map(Some)
        }),
    ];
    RuleTable::build("decompile_stack", rules)
});

static DECOMPILE_TAIL: Lazy<RuleTable<FreshNames, Term>> = Lazy::new(|| {
    RuleTable::build(
        "decompile_tail",
        vec![
            rule(NIL.into(), |_, _| Ok(Some(NIL))),
            rule(Pattern::node(STACK, [var("x"), var("y")]), |b, fresh| {
                let tx = dec(&b["x"], fresh)?;
                let ty = dec_tail(&b["y"], fresh)?;
                Ok(Some(stack(tx, ty)))
            }),
        ],
    )
});

/// Decompile combinator code without simplifying, drawing binder names from `fresh`.
pub fn decompile_with(code: &Term, fresh: &mut FreshNames) -> CompilerResult<Term> {
    dec(code, fresh)
}

/// Translate combinator code to a simplified lambda term.
///
/// Fresh binder names never collide with a name already used by `code`.
pub fn decompile(code: &Term) -> CompilerResult<Term> {
    debug!("decompile: {code}");
    let mut fresh = FreshNames::avoiding(code.names());
    simplify(&dec(code, &mut fresh)?)
}
