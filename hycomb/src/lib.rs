//! Hycomb: a compiler between a lambda calculus with joins and a combinator calculus.
//!
//! Both calculi share one immutable term representation whose heads are declared, with fixed
//! arities, in a single symbol table. Every rewrite of the crate (the codec aside) is written as
//! an ordered table of `(pattern, handler)` rules over that representation.
//!
//! Pipeline
//!  - [`codec`] reads and writes the flat prefix token encoding (`APP VAR f VAR x`).
//!  - [`compile`] eliminates lambda binders by bracket abstraction.
//!  - [`decompile`] expands combinators back into lambda terms over fresh names, and
//!    [`normalize::simplify`] cleans up the result (affine beta, eta, join lattice, alpha).
//!  - [`load`] and [`dump`] chain these for callers that only deal in token strings.
//!
//! Example
//! ```
//! use hycomb::{dump, load};
//! use hycomb::prelude::*;
//!
//! // S x y = \a. x a (y a)
//! let term = load("APP APP S VAR x VAR y").unwrap();
//! let a = var("a");
//! assert_eq!(
//!     term,
//!     lambda(a.clone(), app_all(var("x"), [a.clone(), app(var("y"), a)])),
//! );
//! assert_eq!(dump(&term).unwrap(), "APP APP S VAR x VAR y");
//! ```

/// Sampling weights over the combinator vocabulary, stored as TOML.
pub mod basis;
/// Prefix token-stream parser and printer.
pub mod codec;
/// Bracket abstraction.
pub mod compile;
/// Combinator code back to lambda terms.
pub mod decompile;
/// Error type shared by the whole crate.
pub mod error;
/// Fresh variable names.
pub mod fresh;
/// Affine beta-eta and alpha normalization.
pub mod normalize;
/// Grouping for infix renderers.
pub mod parenthesize;
/// Rule tables and unification.
pub mod pattern;
/// Application spines.
pub mod spine;
/// Declared symbols and their arities.
pub mod symbol;
/// Terms and builders.
pub mod term;

use log::debug;

pub use crate::codec::Line;
pub use crate::error::{CompilerError, CompilerResult};
pub use crate::term::Term;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Term` with its constants and free-function builders
    //! - The codec and the compiler entry points
    pub use crate::codec::{Line, parse, parse_line, print, print_line};
    pub use crate::compile::compile;
    pub use crate::decompile::decompile;
    pub use crate::error::{CompilerError, CompilerResult};
    pub use crate::normalize::simplify;
    pub use crate::term::{Term, defs::*, func::*};
    pub use crate::{dump, dump_line, load, load_line};
}

/// Parse combinator code and decompile it to a simplified lambda term.
pub fn load(code: &str) -> CompilerResult<Term> {
    debug!("load: {code}");
    decompile::decompile(&codec::parse(code)?)
}

/// [`load`] for a whole line, keeping its `DEFINE`/`ASSERT` wrapper.
pub fn load_line(line: &Line) -> CompilerResult<Term> {
    debug!("load_line: {line:?}");
    decompile::decompile(&codec::parse_line(line)?)
}

/// Compile a lambda term and print the resulting combinator code.
pub fn dump(term: &Term) -> CompilerResult<String> {
    debug!("dump: {term}");
    Ok(codec::print(&compile::compile(term)?))
}

/// [`dump`] for a `DEFINE` or `ASSERT` term.
pub fn dump_line(term: &Term) -> CompilerResult<Line> {
    debug!("dump_line: {term}");
    codec::print_line(&compile::compile(term)?)
}
