//! Structural pattern matching and ordered rule dispatch.
//!
//! Role
//! - [`unify`] matches a [`Pattern`] against a [`Term`], producing fresh [`Bindings`].
//! - [`RuleTable`] is an ordered list of `(pattern, handler)` rules. Every rewrite in this crate
//!   (spines, normalization, abstraction, decompilation, parenthesization) is one or more rule
//!   tables.
//!
//! Soft guards
//! - A handler returns `Ok(Some(result))` to commit, or `Ok(None)` to decline: matching then
//!   resumes with the next rule as if this one had not unified. Errors propagate immediately.
//!
//! Validation
//! - Patterns are checked once when the table is built: variables must be linear (no name bound
//!   twice) and every node pattern must use a declared head with its declared arity.
//!
//! Example
//! ```
//! use hycomb::pattern::{Pattern, RuleTable, rule, var};
//! use hycomb::symbol::APP;
//! use hycomb::term::{defs::{I, K}, func::{app, var as tvar}};
//!
//! let table: RuleTable<(), &'static str> = RuleTable::new(
//!     "example",
//!     vec![
//!         rule(Pattern::node(APP, [I.into(), var("x")]), |_, _| Ok(Some("identity"))),
//!         rule(Pattern::node(APP, [var("f"), var("x")]), |_, _| Ok(Some("application"))),
//!         rule(var("x"), |_, _| Ok(Some("other"))),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(table.apply(&app(I, tvar("y")), &mut ()).unwrap(), "identity");
//! assert_eq!(table.apply(&app(K, tvar("y")), &mut ()).unwrap(), "application");
//! assert_eq!(table.apply(&K, &mut ()).unwrap(), "other");
//! ```
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use log::trace;
use smallvec::SmallVec;

use crate::error::{CompilerError, CompilerResult};
use crate::symbol;
use crate::term::{Name, Term};

/// Predicate restricting what a pattern variable may bind.
pub type Constraint = fn(&Term) -> bool;

/// A named hole in a pattern.
#[derive(Clone)]
pub struct PatternVar {
    pub name: &'static str,
    pub constraint: Option<Constraint>,
}

impl fmt::Debug for PatternVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constraint {
            Some(_) => write!(f, "Variable({}, constrained)", self.name),
            None => write!(f, "Variable({})", self.name),
        }
    }
}

/// A term shape with [`PatternVar`] holes.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches a term equal to this one.
    Literal(Term),
    /// Matches any term satisfying the constraint, and binds it.
    Var(PatternVar),
    /// Matches a node with this head whose children match positionally.
    Node(&'static str, Vec<Pattern>),
}

/// Unconstrained pattern variable.
pub fn var(name: &'static str) -> Pattern {
    Pattern::Var(PatternVar {
        name,
        constraint: None,
    })
}

/// Pattern variable that only binds terms satisfying `constraint`.
pub fn var_if(name: &'static str, constraint: Constraint) -> Pattern {
    Pattern::Var(PatternVar {
        name,
        constraint: Some(constraint),
    })
}

impl Pattern {
    pub fn node(head: &'static str, children: impl IntoIterator<Item = Pattern>) -> Pattern {
        Pattern::Node(head, children.into_iter().collect())
    }

    /// Whether no variable name is bound at two positions.
    pub fn is_linear(&self) -> bool {
        self.check_linear(&mut HashSet::new()).is_ok()
    }

    fn check_linear(&self, seen: &mut HashSet<&'static str>) -> Result<(), &'static str> {
        match self {
            Pattern::Var(v) => {
                if seen.insert(v.name) {
                    Ok(())
                } else {
                    Err(v.name)
                }
            }
            Pattern::Literal(_) => Ok(()),
            Pattern::Node(_, children) => children.iter().try_for_each(|c| c.check_linear(seen)),
        }
    }

    fn check_arity(&self) -> Result<(), String> {
        match self {
            Pattern::Node(head, children) => {
                match symbol::symbols().arity(head) {
                    None => return Err(format!("undeclared head `{head}`")),
                    Some(arity) if arity != children.len() || arity == 0 => {
                        return Err(format!(
                            "head `{head}` has arity {arity} but pattern gives {} children",
                            children.len()
                        ));
                    }
                    Some(_) => {}
                }
                children.iter().try_for_each(Pattern::check_arity)
            }
            _ => Ok(()),
        }
    }

    /// Validate linearity and head arities, as done when building a [`RuleTable`].
    pub fn validate(&self, table: &'static str) -> CompilerResult<()> {
        if let Err(name) = self.check_linear(&mut HashSet::new()) {
            return Err(CompilerError::MalformedPattern {
                table,
                reason: format!("variable `{name}` is bound more than once in {self:?}"),
            });
        }
        self.check_arity()
            .map_err(|reason| CompilerError::MalformedPattern { table, reason })
    }
}

impl From<Term> for Pattern {
    fn from(term: Term) -> Self {
        Pattern::Literal(term)
    }
}

/// Result of a successful unification: pattern variable name to bound term.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: SmallVec<[(&'static str, Term); 4]>,
}

impl Bindings {
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, term)| term)
    }

    /// The variable name bound under `VAR(key)`-shaped patterns.
    ///
    /// # Panics
    /// If `key` is unbound or bound to something other than a name payload.
    pub fn name(&self, key: &str) -> &Name {
        match self.get(key).and_then(Term::as_name) {
            Some(name) => name,
            None => panic!("pattern variable `{key}` is not bound to a name"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Term)> {
        self.entries.iter().map(|(n, t)| (*n, t))
    }
}

impl Index<&str> for Bindings {
    type Output = Term;

    /// # Panics
    /// If `name` is not bound.
    fn index(&self, name: &str) -> &Term {
        match self.get(name) {
            Some(term) => term,
            None => panic!("pattern variable `{name}` is not bound"),
        }
    }
}

fn unify_into(pattern: &Pattern, term: &Term, bindings: &mut Bindings) -> bool {
    match pattern {
        Pattern::Var(v) => {
            if v.constraint.is_none_or(|c| c(term)) {
                bindings.entries.push((v.name, term.clone()));
                true
            } else {
                false
            }
        }
        Pattern::Literal(literal) => literal == term,
        Pattern::Node(head, children) => match term {
            Term::Node(term_head, args) if term_head == head && args.len() == children.len() => {
                children
                    .iter()
                    .zip(args.iter())
                    .all(|(p, t)| unify_into(p, t, bindings))
            }
            _ => false,
        },
    }
}

/// Unify `pattern` against `term`.
///
/// Atoms match by equality, variables match any term meeting their constraint, and nodes match
/// nodes of the same head by unifying children positionally. A failed match yields `None`; no
/// partial bindings escape. A non-linear pattern never matches.
pub fn unify(pattern: &Pattern, term: &Term) -> Option<Bindings> {
    if !pattern.is_linear() {
        trace!("unify: non-linear pattern {pattern:?}");
        return None;
    }
    let mut bindings = Bindings::default();
    unify_into(pattern, term, &mut bindings).then_some(bindings)
}

/// Rule handler: receives the bindings and the caller's context. `Ok(None)` declines.
pub type Handler<C, R> = fn(Bindings, &mut C) -> CompilerResult<Option<R>>;

/// Pair a pattern with its handler, coercing the handler to a plain function pointer.
#[inline]
pub fn rule<C: ?Sized, R>(pattern: Pattern, handler: Handler<C, R>) -> (Pattern, Handler<C, R>) {
    (pattern, handler)
}

/// Ordered `(pattern, handler)` rules, validated at construction.
pub struct RuleTable<C: ?Sized, R> {
    name: &'static str,
    rules: Vec<(Pattern, Handler<C, R>)>,
}

impl<C: ?Sized, R> RuleTable<C, R> {
    /// Build a table, rejecting non-linear or ill-formed patterns before any input is seen.
    pub fn new(name: &'static str, rules: Vec<(Pattern, Handler<C, R>)>) -> CompilerResult<Self> {
        if rules.is_empty() {
            return Err(CompilerError::MalformedPattern {
                table: name,
                reason: "rule table has no rules".to_string(),
            });
        }
        for (pattern, _) in &rules {
            pattern.validate(name)?;
        }
        Ok(Self { name, rules })
    }

    /// Like [`RuleTable::new`], for tables held in statics: a malformed table is a programming
    /// error and aborts on first use.
    pub fn build(name: &'static str, rules: Vec<(Pattern, Handler<C, R>)>) -> Self {
        match Self::new(name, rules) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try rules in order; the first handler to commit wins.
    ///
    /// Fails with [`CompilerError::UnmatchedExpression`] when every rule either does not unify
    /// or declines.
    pub fn apply(&self, term: &Term, ctx: &mut C) -> CompilerResult<R> {
        for (line, (pattern, handler)) in self.rules.iter().enumerate() {
            let mut bindings = Bindings::default();
            if !unify_into(pattern, term, &mut bindings) {
                continue;
            }
            match handler(bindings, ctx)? {
                Some(result) => return Ok(result),
                None => trace!("{}: rule {line} declined, falling through", self.name),
            }
        }
        Err(CompilerError::UnmatchedExpression {
            table: self.name,
            term: term.to_string(),
        })
    }
}
