//! Free-function builders for positive-arity symbols.
//!
//! Each builder has a fixed Rust arity matching the declared arity of its symbol, so terms
//! built here are well-formed by construction.
use super::{Name, Term};
use crate::symbol;

/// `VAR name`.
pub fn var(name: impl Into<Name>) -> Term {
    Term::node_unchecked(symbol::VAR, [Term::Name(name.into())])
}

pub fn app(func: Term, arg: Term) -> Term {
    Term::node_unchecked(symbol::APP, [func, arg])
}

/// Left-nested application: `app_all(w, [x, y, z]) = APP(APP(APP(w, x), y), z)`.
pub fn app_all(head: Term, args: impl IntoIterator<Item = Term>) -> Term {
    args.into_iter().fold(head, app)
}

pub fn comp(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::COMP, [lhs, rhs])
}

/// Left-nested composition: `comp_all(x, [y, z]) = COMP(COMP(x, y), z)`.
pub fn comp_all(head: Term, rest: impl IntoIterator<Item = Term>) -> Term {
    rest.into_iter().fold(head, comp)
}

pub fn join(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::JOIN, [lhs, rhs])
}

pub fn rand(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::RAND, [lhs, rhs])
}

pub fn quote(inner: Term) -> Term {
    Term::node_unchecked(symbol::QUOTE, [inner])
}

pub fn lambda(binder: Term, body: Term) -> Term {
    Term::node_unchecked(symbol::LAMBDA, [binder, body])
}

pub fn letrec(binder: Term, def: Term, body: Term) -> Term {
    Term::node_unchecked(symbol::LETREC, [binder, def, body])
}

pub fn less(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::LESS, [lhs, rhs])
}

pub fn nless(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::NLESS, [lhs, rhs])
}

pub fn equal(lhs: Term, rhs: Term) -> Term {
    Term::node_unchecked(symbol::EQUAL, [lhs, rhs])
}

pub fn assert(inner: Term) -> Term {
    Term::node_unchecked(symbol::ASSERT, [inner])
}

pub fn define(name: Term, body: Term) -> Term {
    Term::node_unchecked(symbol::DEFINE, [name, body])
}

pub fn cursor(inner: Term) -> Term {
    Term::node_unchecked(symbol::CURSOR, [inner])
}

pub fn paren(inner: Term) -> Term {
    Term::node_unchecked(symbol::PAREN, [inner])
}

/// One cons cell of an application spine.
pub fn stack(head: Term, tail: Term) -> Term {
    Term::node_unchecked(symbol::STACK, [head, tail])
}
