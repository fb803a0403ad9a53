//! Zero-arity symbols of both calculi as ready-made terms.
use super::Term;
use crate::symbol;

/// Lattice top: absorbs joins and applications.
pub const TOP: Term = Term::Symbol(symbol::TOP);
/// Lattice bottom: identity for joins, absorbs applications.
pub const BOT: Term = Term::Symbol(symbol::BOT);
pub const I: Term = Term::Symbol(symbol::I);
pub const K: Term = Term::Symbol(symbol::K);
pub const B: Term = Term::Symbol(symbol::B);
pub const C: Term = Term::Symbol(symbol::C);
pub const CI: Term = Term::Symbol(symbol::CI);
pub const CB: Term = Term::Symbol(symbol::CB);
pub const W: Term = Term::Symbol(symbol::W);
pub const S: Term = Term::Symbol(symbol::S);
pub const Y: Term = Term::Symbol(symbol::Y);
pub const U: Term = Term::Symbol(symbol::U);
pub const V: Term = Term::Symbol(symbol::V);
pub const P: Term = Term::Symbol(symbol::P);
pub const A: Term = Term::Symbol(symbol::A);
pub const J: Term = Term::Symbol(symbol::J);
pub const R: Term = Term::Symbol(symbol::R);
pub const QLESS: Term = Term::Symbol(symbol::QLESS);
pub const QNLESS: Term = Term::Symbol(symbol::QNLESS);
pub const QEQUAL: Term = Term::Symbol(symbol::QEQUAL);
pub const HOLE: Term = Term::Symbol(symbol::HOLE);
/// Terminator of an application spine.
pub const NIL: Term = Term::Symbol(symbol::NIL);
