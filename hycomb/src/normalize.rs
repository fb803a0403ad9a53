//! Affine beta, eta and alpha normalization of lambda terms.
//!
//! Role
//! - [`normalize_affine_beta_eta`] runs a head-first state machine over application spines.
//!   Beta reduction only substitutes an argument whose parameter is used at most once, or an
//!   argument that is already a bare variable; a parameter used twice or more leaves the
//!   redex applied, so no argument is ever duplicated.
//! - [`normalize_alpha`] renames every binder, in encounter order, to the fresh-name sequence.
//! - [`simplify`] is the composition of the two.
//!
//! Reduction only rewrites the spine head and, recursively, the spine arguments. Children of
//! an irreducible head (the body of a stuck lambda, the sides of a join) are left as they are.
//! `LETREC` heads are never reduced.
//!
//! ```
//! use hycomb::normalize::simplify;
//! use hycomb::term::func::{app, lambda, var};
//!
//! let dup = lambda(var("x"), app(var("x"), var("x")));
//! assert_eq!(simplify(&app(dup.clone(), var("y"))).unwrap(), app(var("y"), var("y")));
//! assert_eq!(simplify(&dup).unwrap(), lambda(var("a"), app(var("a"), var("a"))));
//! ```
use log::trace;
use once_cell::sync::Lazy;

use crate::error::{CompilerError, CompilerResult};
use crate::fresh::FreshNames;
use crate::pattern::{Bindings, Pattern, RuleTable, rule, var, var_if};
use crate::spine::{from_stack, stack_pattern, to_stack, to_stack_onto};
use crate::symbol::{APP, JOIN, LAMBDA, LETREC, STACK, VAR};
use crate::term::{
    Name, Term,
    defs::{BOT, NIL, TOP},
    func::{lambda, letrec, stack, var as tvar},
};

// ---------------- Occurrences ----------------

fn binds(binder: &Term, name: &str) -> bool {
    binder.names().iter().any(|n| &**n == name)
}

/// Number of free occurrences of `name` in `term`.
///
/// A `LAMBDA` or `LETREC` whose binder pattern mentions `name` shadows it in its whole scope.
pub fn count_occurrences(name: &str, term: &Term) -> usize {
    match term {
        Term::Node(VAR, args) => usize::from(args[0].as_name().is_some_and(|n| &**n == name)),
        Term::Node(LAMBDA | LETREC, args) if binds(&args[0], name) => 0,
        Term::Node(_, args) => args.iter().map(|a| count_occurrences(name, a)).sum(),
        _ => 0,
    }
}

/// Replace free occurrences of `VAR name` in `body` by `def`.
///
/// Substitution stops at binders that shadow `name`. A binder that would capture a free
/// variable of `def` is first renamed to a name used neither in the binding term nor in `def`.
pub fn substitute(name: &str, def: &Term, body: &Term) -> Term {
    match body {
        Term::Node(VAR, _) if body.is_var_named(name) => def.clone(),
        Term::Node(LAMBDA | LETREC, args) => {
            if count_occurrences(name, body) == 0 {
                return body.clone();
            }
            let free = def.free_names();
            let captured: Vec<Name> = args[0]
                .names()
                .into_iter()
                .filter(|n| free.contains(n))
                .collect();
            let body = if captured.is_empty() {
                body.clone()
            } else {
                rename_binders(body, &captured, def)
            };
            body.map_args(|a| substitute(name, def, a))
        }
        _ => body.map_args(|a| substitute(name, def, a)),
    }
}

/// Rename the `captured` names bound by the `LAMBDA`/`LETREC` node `binding`, in its pattern
/// and its scope, to names occurring in neither `binding` nor `def`.
fn rename_binders(binding: &Term, captured: &[Name], def: &Term) -> Term {
    let mut fresh = FreshNames::avoiding(binding.names().into_iter().chain(def.names()));
    captured.iter().fold(binding.clone(), |binding, old| {
        let new = fresh.fresh();
        // The binder pattern holds no binders, so substitution renames its leaves too.
        binding.map_args(|a| substitute(old, &new, a))
    })
}

// ---------------- Beta / eta ----------------

fn lambda_pattern(name: &'static str, body: Pattern) -> Pattern {
    Pattern::node(LAMBDA, [Pattern::node(VAR, [var(name)]), body])
}

static NORMALIZE_STACK: Lazy<RuleTable<(), Term>> = Lazy::new(|| {
    let join = |lhs: Pattern, rhs: Pattern| Pattern::node(JOIN, [lhs, rhs]);
    RuleTable::build(
        "normalize_stack",
        vec![
            rule(stack_pattern([Pattern::from(TOP)], var("tail")), |_, _| Ok(Some(TOP))),
            rule(stack_pattern([Pattern::from(BOT)], var("tail")), |_, _| Ok(Some(BOT))),
            rule(
                stack_pattern([join(TOP.into(), var("x"))], var("tail")),
                |_, _| Ok(Some(TOP)),
            ),
            rule(
                stack_pattern([join(var("x"), TOP.into())], var("tail")),
                |_, _| Ok(Some(TOP)),
            ),
            rule(
                stack_pattern([join(BOT.into(), var("x"))], var("tail")),
                continue_with_x,
            ),
            rule(
                stack_pattern([join(var("x"), BOT.into())], var("tail")),
                continue_with_x,
            ),
            rule(
                stack_pattern(
                    [lambda_pattern(
                        "name",
                        Pattern::node(APP, [var("x"), Pattern::node(VAR, [var("name2")])]),
                    )],
                    var("tail"),
                ),
                eta,
            ),
            rule(
                stack_pattern(
                    [
                        lambda_pattern("name", var("x")),
                        Pattern::node(VAR, [var("name2")]),
                    ],
                    var("tail"),
                ),
                beta_var,
            ),
            rule(
                stack_pattern([lambda_pattern("name", var("x")), var("y")], var("tail")),
                beta_affine,
            ),
            rule(
                stack_pattern([var_if("x", |t| t.head() == Some(LETREC))], var("tail")),
                |b, _| {
                    trace!("normalize_stack: LETREC left unreduced: {}", b["x"]);
                    stuck(b["x"].clone(), &b["tail"]).map(Some)
                },
            ),
            rule(stack_pattern([var("x")], var("tail")), |b, _| {
                stuck(b["x"].clone(), &b["tail"]).map(Some)
            }),
        ],
    )
});

static NORMALIZE_TAIL: Lazy<RuleTable<(), Term>> = Lazy::new(|| {
    RuleTable::build(
        "normalize_tail",
        vec![
            rule(NIL.into(), |_, _| Ok(Some(NIL))),
            rule(Pattern::node(STACK, [var("x"), var("y")]), |b, _| {
                let tx = normalize(&b["x"])?;
                let ty = normalize_tail(&b["y"])?;
                Ok(Some(stack(tx, ty)))
            }),
        ],
    )
});

fn normalize(term: &Term) -> CompilerResult<Term> {
    NORMALIZE_STACK.apply(&to_stack(term)?, &mut ())
}

fn normalize_tail(tail: &Term) -> CompilerResult<Term> {
    NORMALIZE_TAIL.apply(tail, &mut ())
}

/// Continue reducing `head` applied to the spine `tail`.
fn resume(head: &Term, tail: &Term) -> CompilerResult<Term> {
    NORMALIZE_STACK.apply(&to_stack_onto(head, Vec::new(), tail.clone())?, &mut ())
}

/// Keep `head` in place and normalize its arguments.
fn stuck(head: Term, tail: &Term) -> CompilerResult<Term> {
    from_stack(&stack(head, normalize_tail(tail)?))
}

fn continue_with_x(b: Bindings, _: &mut ()) -> CompilerResult<Option<Term>> {
    resume(&b["x"], &b["tail"]).map(Some)
}

fn eta(b: Bindings, _: &mut ()) -> CompilerResult<Option<Term>> {
    let name = b.name("name");
    if name != b.name("name2") || count_occurrences(name, &b["x"]) != 0 {
        return Ok(None);
    }
    resume(&b["x"], &b["tail"]).map(Some)
}

fn beta_var(b: Bindings, _: &mut ()) -> CompilerResult<Option<Term>> {
    let head = substitute(b.name("name"), &tvar(b.name("name2").clone()), &b["x"]);
    resume(&head, &b["tail"]).map(Some)
}

fn beta_affine(b: Bindings, _: &mut ()) -> CompilerResult<Option<Term>> {
    let name = b.name("name");
    let body = &b["x"];
    match count_occurrences(name, body) {
        0 => resume(body, &b["tail"]).map(Some),
        1 => resume(&substitute(name, &b["y"], body), &b["tail"]).map(Some),
        _ => {
            // The argument may normalize to a variable, which is then free to duplicate.
            let arg = normalize(&b["y"])?;
            if arg.is_var() {
                return resume(&substitute(name, &arg, body), &b["tail"]).map(Some);
            }
            let head = lambda(tvar(name.clone()), body.clone());
            let tail = stack(arg, normalize_tail(&b["tail"])?);
            from_stack(&stack(head, tail)).map(Some)
        }
    }
}

/// Head-first affine beta-eta reduction, with the lattice rules for `TOP`, `BOT` and `JOIN`.
pub fn normalize_affine_beta_eta(term: &Term) -> CompilerResult<Term> {
    normalize(term)
}

// ---------------- Alpha ----------------

/// Renaming state: the binders in scope (innermost last) and the name supply.
struct Renaming {
    scope: Vec<(Name, Name)>,
    binder_start: usize,
    fresh: FreshNames,
}

impl Renaming {
    fn lookup(&self, name: &Name) -> Option<&Name> {
        self.scope
            .iter()
            .rev()
            .find(|(from, _)| from == name)
            .map(|(_, to)| to)
    }

    /// Run `f` in a new binder scope, restoring the outer scope afterwards.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> CompilerResult<T>) -> CompilerResult<T> {
        let depth = self.scope.len();
        let outer_start = self.binder_start;
        self.binder_start = depth;
        let result = f(self);
        self.scope.truncate(depth);
        self.binder_start = outer_start;
        result
    }
}

static RENAME_PATTERN: Lazy<RuleTable<Renaming, Term>> = Lazy::new(|| {
    RuleTable::build(
        "rename_pattern",
        vec![
            rule(
                Pattern::node(VAR, [var("name")]),
                |b, ctx: &mut Renaming| {
                    let name = b.name("name");
                    if ctx.scope[ctx.binder_start..]
                        .iter()
                        .any(|(from, _)| from == name)
                    {
                        return Err(CompilerError::InvalidVariable(format!(
                            "`{name}` is bound twice by one binder pattern"
                        )));
                    }
                    let renamed = ctx.fresh.next_name();
                    ctx.scope.push((name.clone(), renamed.clone()));
                    Ok(Some(tvar(renamed)))
                },
            ),
            rule(var_if("node", Term::is_node), |b, ctx| {
                b["node"]
                    .try_map_args(|a| RENAME_PATTERN.apply(a, ctx))
                    .map(Some)
            }),
            rule(var("atom"), |b, _| Ok(Some(b["atom"].clone()))),
        ],
    )
});

static RENAME_TERM: Lazy<RuleTable<Renaming, Term>> = Lazy::new(|| {
    RuleTable::build(
        "rename_term",
        vec![
            rule(
                Pattern::node(VAR, [var("name")]),
                |b, ctx: &mut Renaming| {
                    let name = b.name("name");
                    Ok(Some(tvar(ctx.lookup(name).unwrap_or(name).clone())))
                },
            ),
            rule(
                Pattern::node(LAMBDA, [var("x"), var("y")]),
                |b, ctx: &mut Renaming| {
                    ctx.scoped(|ctx| {
                        let x = RENAME_PATTERN.apply(&b["x"], ctx)?;
                        let y = RENAME_TERM.apply(&b["y"], ctx)?;
                        Ok(Some(lambda(x, y)))
                    })
                },
            ),
            rule(
                Pattern::node(LETREC, [var("x"), var("y"), var("z")]),
                |b, ctx: &mut Renaming| {
                    ctx.scoped(|ctx| {
                        let x = RENAME_PATTERN.apply(&b["x"], ctx)?;
                        let y = RENAME_TERM.apply(&b["y"], ctx)?;
                        let z = RENAME_TERM.apply(&b["z"], ctx)?;
                        Ok(Some(letrec(x, y, z)))
                    })
                },
            ),
            rule(var_if("node", Term::is_node), |b, ctx| {
                b["node"]
                    .try_map_args(|a| RENAME_TERM.apply(a, ctx))
                    .map(Some)
            }),
            rule(var("atom"), |b, _| Ok(Some(b["atom"].clone()))),
        ],
    )
});

/// Rename bound variables, in binder-encounter order, to `a, b, c, ...`, skipping names that
/// occur free in `term`.
///
/// Binder patterns may be compound (`QUOTE VAR x`); all of their `VAR` leaves are renamed.
/// A name bound twice by the same pattern is an [`CompilerError::InvalidVariable`].
pub fn normalize_alpha(term: &Term) -> CompilerResult<Term> {
    let mut renaming = Renaming {
        scope: Vec::new(),
        binder_start: 0,
        fresh: FreshNames::avoiding(term.free_names()),
    };
    RENAME_TERM.apply(term, &mut renaming)
}

/// `normalize_alpha(normalize_affine_beta_eta(term))`.
pub fn simplify(term: &Term) -> CompilerResult<Term> {
    normalize_alpha(&normalize_affine_beta_eta(term)?)
}
