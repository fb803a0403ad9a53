//! Fresh variable names.
//!
//! Names are drawn from the sequence `a, b, ..., z, a2, b2, ..., z2, a3, ...`. A generator is a
//! plain value: every top-level operation that mints names owns its own [`FreshNames`], so
//! concurrent calls never share a counter.
use std::collections::BTreeSet;

use crate::term::{Name, Term, func::var};

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Generator for the `i`-th candidate name, without any avoidance.
pub fn enumerate(i: usize) -> Name {
    let letter = ALPHABET[i % ALPHABET.len()] as char;
    let round = i / ALPHABET.len();
    if round == 0 {
        letter.to_string().into()
    } else {
        format!("{letter}{}", round + 1).into()
    }
}

/// Sequential name generator that skips names already in use.
#[derive(Debug, Clone, Default)]
pub struct FreshNames {
    next: usize,
    avoid: BTreeSet<Name>,
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator that never yields any of `avoid`.
    pub fn avoiding(avoid: impl IntoIterator<Item = Name>) -> Self {
        Self {
            next: 0,
            avoid: avoid.into_iter().collect(),
        }
    }

    /// Restart the sequence at `a`, keeping the avoid set.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Add `name` to the avoid set.
    pub fn reserve(&mut self, name: Name) {
        self.avoid.insert(name);
    }

    /// The next name of the sequence not in the avoid set.
    pub fn next_name(&mut self) -> Name {
        loop {
            let name = enumerate(self.next);
            self.next += 1;
            if !self.avoid.contains(&name) {
                return name;
            }
        }
    }

    /// The next name, wrapped as `VAR name`.
    pub fn fresh(&mut self) -> Term {
        var(self.next_name())
    }
}

impl Iterator for FreshNames {
    type Item = Name;

    fn next(&mut self) -> Option<Name> {
        Some(self.next_name())
    }
}
