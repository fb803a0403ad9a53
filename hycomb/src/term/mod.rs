//! Terms of both calculi.
//!
//! Role
//! - A single immutable tree type shared by the lambda and the combinator vocabularies.
//!   Builders in [`defs`] and [`func`] let you create terms ergonomically.
//! - Sub-terms live behind [`Arc`], so cloning is cheap and rewrites share structure with their
//!   input.
//!
//! Well-formedness
//! - Every head is a declared symbol and carries exactly its declared arity. Checked
//!   constructors ([`Term::node`], [`Term::symbol`]) validate against the symbol table; the
//!   typed builders are correct by construction.
//! - A variable name payload ([`Term::Name`]) only ever appears as the single child of `VAR`.
//!
//! Example
//! ```
//! use hycomb::term::{Term, defs::I, func::{app, var}};
//!
//! let t = app(I, var("x"));
//! assert_eq!(t.to_string(), "APP I VAR x");
//! assert_eq!(Term::node("APP", vec![I, var("x")]).unwrap(), t);
//! ```
pub mod defs;
pub mod func;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use either::Either;

use crate::error::{CompilerError, CompilerResult};
use crate::symbol::{self, LAMBDA, LETREC, VAR};

/// Variable name payload.
pub type Name = Arc<str>;

/// Immutable term, compared structurally.
///
/// Variants can be matched on but not built outside this crate; use the checked constructors
/// or the builders, which keep every term well formed.
///
/// ```compile_fail
/// use hycomb::term::Term;
///
/// let bogus = Term::Symbol("FOO");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A zero-arity symbol such as `I` or `TOP`.
    #[non_exhaustive]
    Symbol(&'static str),
    /// The name carried by a `VAR` node.
    #[non_exhaustive]
    Name(Name),
    /// A positive-arity symbol applied to exactly `arity` children.
    #[non_exhaustive]
    Node(&'static str, Arc<[Term]>),
}

impl Term {
    /// Checked constructor for a zero-arity symbol.
    pub fn symbol(name: &str) -> CompilerResult<Term> {
        let symbol = symbol::symbols()
            .get(name)
            .ok_or_else(|| CompilerError::UnrecognizedToken {
                token: name.to_string(),
                position: 0,
            })?;
        if symbol.arity != 0 {
            return Err(CompilerError::ArityMismatch {
                symbol: name.to_string(),
                expected: symbol.arity,
                found: 0,
            });
        }
        Ok(Term::Symbol(symbol.name))
    }

    /// A bare name payload, to be wrapped in `VAR` through [`Term::node`].
    pub fn name(name: impl Into<Name>) -> Term {
        Term::Name(name.into())
    }

    /// Checked constructor for any symbol, validating the argument count against the symbol
    /// table and the placement of variable names.
    pub fn node(head: &str, args: Vec<Term>) -> CompilerResult<Term> {
        let symbol = symbol::symbols()
            .get(head)
            .ok_or_else(|| CompilerError::UnrecognizedToken {
                token: head.to_string(),
                position: 0,
            })?;
        if symbol.arity != args.len() {
            return Err(CompilerError::ArityMismatch {
                symbol: head.to_string(),
                expected: symbol.arity,
                found: args.len(),
            });
        }
        if symbol.arity == 0 {
            return Ok(Term::Symbol(symbol.name));
        }
        if symbol.name == VAR {
            if !args[0].is_name() {
                return Err(CompilerError::InvalidVariable(format!(
                    "VAR expects a name payload, got `{}`",
                    args[0]
                )));
            }
        } else if let Some(name) = args.iter().find(|a| a.is_name()) {
            return Err(CompilerError::InvalidVariable(format!(
                "name `{name}` must be wrapped in VAR, found under {head}"
            )));
        }
        Ok(Term::Node(symbol.name, args.into()))
    }

    #[inline]
    pub(crate) fn node_unchecked<const N: usize>(head: &'static str, args: [Term; N]) -> Term {
        debug_assert_eq!(symbol::symbols().arity(head), Some(N), "arity of {head}");
        Term::Node(head, Arc::new(args))
    }

    /// Rebuild a node with the same head and new children.
    #[inline]
    pub(crate) fn with_args(head: &'static str, args: Vec<Term>) -> Term {
        debug_assert_eq!(symbol::symbols().arity(head), Some(args.len()));
        Term::Node(head, args.into())
    }

    /// The head symbol, or `None` for a name payload.
    pub fn head(&self) -> Option<&'static str> {
        match self {
            Term::Symbol(s) | Term::Node(s, _) => Some(*s),
            Term::Name(_) => None,
        }
    }

    /// Children of a node; empty for atoms.
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Node(_, args) => args,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Term::Name(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Term::Symbol(_))
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        matches!(self, Term::Node(..))
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Term::Name(name) => Some(name),
            _ => None,
        }
    }

    /// If this is `VAR name`, return `name`.
    pub fn var_name(&self) -> Option<&Name> {
        match self {
            Term::Node(VAR, args) => args[0].as_name(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_var(&self) -> bool {
        self.var_name().is_some()
    }

    /// Whether this term is `VAR name` for the given name.
    pub fn is_var_named(&self, name: &str) -> bool {
        self.var_name().is_some_and(|n| &**n == name)
    }

    /// Every variable name occurring anywhere in the term, bound or free.
    pub fn names(&self) -> BTreeSet<Name> {
        let mut out = BTreeSet::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names(&self, out: &mut BTreeSet<Name>) {
        match self {
            Term::Name(name) => {
                out.insert(name.clone());
            }
            Term::Symbol(_) => {}
            Term::Node(_, args) => args.iter().for_each(|a| a.collect_names(out)),
        }
    }

    /// Names occurring free in the term.
    ///
    /// `LAMBDA(pattern, body)` binds the `VAR` leaves of `pattern` in `body`;
    /// `LETREC(pattern, def, body)` binds them in both `def` and `body`.
    pub fn free_names(&self) -> BTreeSet<Name> {
        let mut out = BTreeSet::new();
        self.collect_free(&mut Vec::new(), &mut out);
        out
    }

    fn collect_free(&self, bound: &mut Vec<Name>, out: &mut BTreeSet<Name>) {
        match self {
            Term::Node(VAR, args) => {
                if let Some(name) = args[0].as_name() {
                    if !bound.contains(name) {
                        out.insert(name.clone());
                    }
                }
            }
            Term::Node(LAMBDA | LETREC, args) => {
                let depth = bound.len();
                bound.extend(args[0].names());
                args[1..].iter().for_each(|a| a.collect_free(bound, out));
                bound.truncate(depth);
            }
            Term::Node(_, args) => args.iter().for_each(|a| a.collect_free(bound, out)),
            _ => {}
        }
    }

    /// Rebuild a node with every child replaced by `f(child)`. Atoms are returned unchanged.
    pub fn map_args(&self, f: impl FnMut(&Term) -> Term) -> Term {
        match self {
            Term::Node(head, args) => Term::Node(*head, args.iter().map(f).collect()),
            _ => self.clone(),
        }
    }

    /// Fallible [`Term::map_args`].
    pub fn try_map_args<E>(
        &self,
        mut f: impl FnMut(&Term) -> Result<Term, E>,
    ) -> Result<Term, E> {
        match self {
            Term::Node(head, args) => Ok(Term::Node(
                *head,
                args.iter().map(&mut f).collect::<Result<Arc<[Term]>, E>>()?,
            )),
            _ => Ok(self.clone()),
        }
    }

    /// Number of nodes and atoms in the term (variable payloads excluded).
    pub fn size(&self) -> usize {
        match self {
            Term::Symbol(_) => 1,
            Term::Name(_) => 0,
            Term::Node(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }
}

/// Bottom-up fold over a term.
///
/// `VAR` nodes are reported with their name payload (`Either::Left`), every other head with the
/// folded results of its children (`Either::Right`, empty for zero-arity symbols).
///
/// ```
/// use hycomb::term::{fold, defs::K, func::{app, var}};
///
/// let depth = fold(&app(K, var("x")), &mut |_, args| {
///     args.right().map_or(0, |c: Vec<usize>| 1 + c.into_iter().max().unwrap_or(0))
/// });
/// assert_eq!(depth, 2);
/// ```
pub fn fold<R, F>(term: &Term, f: &mut F) -> R
where
    F: FnMut(&'static str, Either<&Name, Vec<R>>) -> R,
{
    if let Some(name) = term.var_name() {
        return f(VAR, Either::Left(name));
    }
    match term {
        Term::Symbol(s) => f(*s, Either::Right(Vec::new())),
        Term::Node(head, args) => {
            let folded = args.iter().map(|a| fold(a, f)).collect();
            f(*head, Either::Right(folded))
        }
        // Names only occur under VAR, which is handled above.
        Term::Name(name) => f(VAR, Either::Left(name)),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Symbol(s) => f.write_str(s),
            Term::Name(name) => f.write_str(name),
            Term::Node(head, args) => {
                f.write_str(head)?;
                for arg in args.iter() {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({self})")
    }
}
