//! Bracket abstraction: lambda terms to combinator code.
//!
//! Role
//! - [`try_abstract`] removes one variable from a combinator-only body, or reports that the
//!   variable does not occur.
//! - [`compile_lambda`] and [`compile_letrec`] eliminate a single binder.
//! - [`compile`] rewrites every `LAMBDA`/`LETREC` of a term bottom-up, leaving all other nodes
//!   in place.
//!
//! Example
//! ```
//! use hycomb::compile::compile;
//! use hycomb::term::{defs::B, func::{app, lambda, var}};
//!
//! // \x \y \z. x (y z)
//! let (x, y, z) = (var("x"), var("y"), var("z"));
//! let t = lambda(x.clone(), lambda(y.clone(), lambda(z.clone(), app(x, app(y, z)))));
//! assert_eq!(compile(&t).unwrap(), B);
//! ```
use log::debug;
use once_cell::sync::Lazy;
use strum::EnumIs;

use crate::error::{CompilerError, CompilerResult};
use crate::normalize::count_occurrences;
use crate::pattern::{Bindings, Pattern, RuleTable, rule, var, var_if};
use crate::symbol::{APP, COMP, EQUAL, JOIN, LAMBDA, LESS, LETREC, NLESS, QUOTE, RAND, VAR};
use crate::term::{
    Name, Term,
    defs::{B, C, CB, I, J, K, R, S, W, Y},
    func::{app, app_all, comp, join, rand},
};

/// Outcome of abstracting a variable out of a term.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum Abstraction {
    /// Combinator code `f` such that `f v` behaves like the abstracted body.
    Found(Term),
    /// The variable does not occur in the body.
    NotFound,
}

impl Abstraction {
    pub fn found(self) -> Option<Term> {
        match self {
            Abstraction::Found(t) => Some(t),
            Abstraction::NotFound => None,
        }
    }
}

use Abstraction::{Found, NotFound};

fn abs(term: &Term, target: &mut Name) -> CompilerResult<Abstraction> {
    TRY_ABSTRACT.apply(term, target)
}

/// Abstract both sides of a binary node.
fn abs_pair(b: &Bindings, target: &mut Name) -> CompilerResult<(Abstraction, Abstraction)> {
    Ok((abs(&b["x"], target)?, abs(&b["y"], target)?))
}

/// Abstraction of `target` from a node with no combinator rule.
fn unsupported(term: &Term, target: &Name) -> CompilerResult<Option<Abstraction>> {
    if count_occurrences(target, term) == 0 {
        Ok(Some(NotFound))
    } else {
        Err(CompilerError::NotImplemented(format!(
            "abstraction of `{target}` from `{term}`"
        )))
    }
}

static TRY_ABSTRACT: Lazy<RuleTable<Name, Abstraction>> = Lazy::new(|| {
    let bin = |head| Pattern::node(head, [var("x"), var("y")]);
    RuleTable::build(
        "try_abstract",
        vec![
            rule(Pattern::node(VAR, [var("name")]), |b, target: &mut Name| {
                Ok(Some(if b.name("name") == target {
                    Found(I)
                } else {
                    NotFound
                }))
            }),
            rule(
                Pattern::node(APP, [var("x"), var_if("v", Term::is_var)]),
                |b, target: &mut Name| {
                    let is_target = b["v"].is_var_named(target);
                    Ok(Some(match (abs(&b["x"], target)?, is_target) {
                        (NotFound, false) => NotFound,
                        (NotFound, true) => Found(b["x"].clone()),
                        (Found(tx), false) => Found(app_all(C, [tx, b["v"].clone()])),
                        (Found(tx), true) => Found(app(W, tx)),
                    }))
                },
            ),
            rule(bin(APP), |b, target: &mut Name| {
                Ok(Some(match abs_pair(&b, target)? {
                    (NotFound, NotFound) => NotFound,
                    (NotFound, Found(ty)) => Found(comp(b["x"].clone(), ty)),
                    (Found(tx), NotFound) => Found(app_all(C, [tx, b["y"].clone()])),
                    (Found(tx), Found(ty)) => Found(app_all(S, [tx, ty])),
                }))
            }),
            rule(bin(COMP), |b, target: &mut Name| {
                Ok(Some(match abs_pair(&b, target)? {
                    (NotFound, NotFound) => NotFound,
                    (NotFound, Found(ty)) => {
                        if b["y"].is_var_named(target) {
                            Found(app(B, b["x"].clone()))
                        } else {
                            Found(comp(app(B, b["x"].clone()), ty))
                        }
                    }
                    (Found(tx), NotFound) => Found(comp(app(CB, b["y"].clone()), tx)),
                    (Found(tx), Found(ty)) => Found(app_all(S, [app(B, tx), ty])),
                }))
            }),
            rule(bin(JOIN), |b, target: &mut Name| {
                Ok(Some(match abs_pair(&b, target)? {
                    (NotFound, NotFound) => NotFound,
                    // J x already is \v. JOIN(x, v); skip composing with I.
                    (NotFound, Found(ty)) if ty == I => Found(app(J, b["x"].clone())),
                    (NotFound, Found(ty)) => Found(comp(app(J, b["x"].clone()), ty)),
                    (Found(tx), NotFound) => Found(comp(app(J, b["y"].clone()), tx)),
                    (Found(tx), Found(ty)) => Found(join(tx, ty)),
                }))
            }),
            rule(bin(RAND), |b, target: &mut Name| {
                Ok(Some(match abs_pair(&b, target)? {
                    (NotFound, NotFound) => NotFound,
                    (NotFound, Found(ty)) => Found(comp(app(R, b["x"].clone()), ty)),
                    (Found(tx), NotFound) => Found(comp(app(R, b["y"].clone()), tx)),
                    (Found(tx), Found(ty)) => Found(rand(tx, ty)),
                }))
            }),
            rule(var_if("term", |t| t.head() == Some(QUOTE)), |b, target: &mut Name| {
                unsupported(&b["term"], target)
            }),
            rule(
                var_if("term", |t| {
                    matches!(t.head(), Some(LESS) | Some(NLESS) | Some(EQUAL))
                }),
                |b, target: &mut Name| unsupported(&b["term"], target),
            ),
            rule(var("term"), |b, target: &mut Name| unsupported(&b["term"], target)),
        ],
    )
});

/// Eliminate `var` from the combinator-only term `body`.
///
/// Returns [`Abstraction::NotFound`] when `var` does not occur in `body`. Abstraction from
/// `QUOTE`, `LESS`, `NLESS`, `EQUAL` (and any other head without a rule) fails with
/// [`CompilerError::NotImplemented`] when `var` occurs there.
pub fn try_abstract(body: &Term, var: &str) -> CompilerResult<Abstraction> {
    abs(body, &mut Name::from(var))
}

/// Compile `\var. body`, where `body` is already combinator code: the abstraction of `var`,
/// or `K body` when `var` is unused.
pub fn compile_lambda(var: &str, body: &Term) -> CompilerResult<Term> {
    Ok(match try_abstract(body, var)? {
        Found(t) => t,
        NotFound => app(K, body.clone()),
    })
}

/// Compile `letrec var = def in body`, where `def` and `body` are already combinator code.
///
/// A dead binding leaves `body`; a non-recursive one applies the abstracted body to `def`;
/// a recursive one ties the knot with `Y`.
pub fn compile_letrec(var: &str, def: &Term, body: &Term) -> CompilerResult<Term> {
    let Found(body_abs) = try_abstract(body, var)? else {
        return Ok(body.clone());
    };
    Ok(match try_abstract(def, var)? {
        NotFound => app(body_abs, def.clone()),
        Found(def_abs) => app(body_abs, app(Y, def_abs)),
    })
}

static COMPILE: Lazy<RuleTable<(), Term>> = Lazy::new(|| {
    let var_binder = || Pattern::node(VAR, [var("name")]);
    RuleTable::build(
        "compile",
        vec![
            rule(var_if("term", Term::is_var), |b, _| Ok(Some(b["term"].clone()))),
            rule(Pattern::node(LAMBDA, [var_binder(), var("x")]), |b, _| {
                compile_lambda(b.name("name"), &compile_term(&b["x"])?).map(Some)
            }),
            rule(
                Pattern::node(LETREC, [var_binder(), var("x"), var("y")]),
                |b, _| {
                    let def = compile_term(&b["x"])?;
                    let body = compile_term(&b["y"])?;
                    compile_letrec(b.name("name"), &def, &body).map(Some)
                },
            ),
            rule(
                var_if("term", |t| matches!(t.head(), Some(LAMBDA) | Some(LETREC))),
                |b, _| {
                    Err(CompilerError::NotImplemented(format!(
                        "compiling a binder that is not a bare variable: `{}`",
                        b["term"]
                    )))
                },
            ),
            rule(var("term"), |b, _| b["term"].try_map_args(compile_term).map(Some)),
        ],
    )
});

fn compile_term(term: &Term) -> CompilerResult<Term> {
    COMPILE.apply(term, &mut ())
}

/// Translate a lambda term to combinator code.
pub fn compile(term: &Term) -> CompilerResult<Term> {
    debug!("compile: {term}");
    compile_term(term)
}
