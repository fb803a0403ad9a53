//! Sampling weights over the combinator vocabulary.
//!
//! A basis assigns a probability to each symbol, grouped by arity class. Samplers of random
//! combinator code read it; this crate only loads, validates and stores it.
//!
//! File layout (TOML):
//! ```toml
//! [NULLARY]
//! I = 0.5
//! K = 0.5
//!
//! [BINARY]
//! APP = 1.0
//! ```
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::{CompilerError, CompilerResult};
use crate::symbol;

/// Environment variable overriding [`Basis::default_path`].
pub const ENV_BASIS_PATH: &str = "HYCOMB_BASIS_PATH";

/// Tolerance on the sum of the weights of one arity class.
pub const SUM_TOLERANCE: f64 = 1e-8;

/// Symbols grouped by number of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ArityClass {
    Nullary,
    Unary,
    Binary,
    Ternary,
}

impl ArityClass {
    pub fn arity(self) -> usize {
        match self {
            ArityClass::Nullary => 0,
            ArityClass::Unary => 1,
            ArityClass::Binary => 2,
            ArityClass::Ternary => 3,
        }
    }
}

/// Per-class probability tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct Basis {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nullary: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unary: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub binary: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ternary: BTreeMap<String, f64>,
}

impl Default for Basis {
    fn default() -> Self {
        let table = |entries: &[(&str, f64)]| {
            entries
                .iter()
                .map(|&(name, weight)| (name.to_string(), weight))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            nullary: table(&[
                (symbol::TOP, 0.05),
                (symbol::BOT, 0.05),
                (symbol::I, 0.10),
                (symbol::K, 0.15),
                (symbol::B, 0.15),
                (symbol::C, 0.15),
                (symbol::W, 0.05),
                (symbol::S, 0.15),
                (symbol::Y, 0.05),
                (symbol::J, 0.05),
                (symbol::R, 0.05),
            ]),
            unary: table(&[(symbol::QUOTE, 1.0)]),
            binary: table(&[
                (symbol::APP, 0.6),
                (symbol::COMP, 0.2),
                (symbol::JOIN, 0.1),
                (symbol::RAND, 0.1),
            ]),
            ternary: BTreeMap::new(),
        }
    }
}

impl Basis {
    /// Weights of one arity class.
    pub fn class(&self, class: ArityClass) -> &BTreeMap<String, f64> {
        match class {
            ArityClass::Nullary => &self.nullary,
            ArityClass::Unary => &self.unary,
            ArityClass::Binary => &self.binary,
            ArityClass::Ternary => &self.ternary,
        }
    }

    pub fn class_mut(&mut self, class: ArityClass) -> &mut BTreeMap<String, f64> {
        match class {
            ArityClass::Nullary => &mut self.nullary,
            ArityClass::Unary => &mut self.unary,
            ArityClass::Binary => &mut self.binary,
            ArityClass::Ternary => &mut self.ternary,
        }
    }

    /// Check that every symbol is declared with the arity of its class, that weights are finite
    /// and non-negative, and that every non-empty class sums to one.
    pub fn validate(&self) -> CompilerResult<()> {
        for class in ArityClass::iter() {
            let weights = self.class(class);
            for (name, &weight) in weights {
                match symbol::symbols().arity(name) {
                    None => {
                        return Err(CompilerError::InvalidBasis(format!(
                            "{class}: unknown symbol `{name}`"
                        )));
                    }
                    Some(arity) if arity != class.arity() => {
                        return Err(CompilerError::InvalidBasis(format!(
                            "{class}: `{name}` has arity {arity}"
                        )));
                    }
                    Some(_) => {}
                }
                if !weight.is_finite() || weight < 0.0 {
                    return Err(CompilerError::InvalidBasis(format!(
                        "{class}: weight of `{name}` is {weight}"
                    )));
                }
            }
            if weights.is_empty() {
                continue;
            }
            let total: f64 = weights.values().sum();
            if (total - 1.0).abs() > SUM_TOLERANCE {
                return Err(CompilerError::InvalidBasis(format!(
                    "{class}: weights sum to {total}, expected 1"
                )));
            }
        }
        Ok(())
    }

    /// Rescale every non-empty class so that it sums to one.
    ///
    /// A class whose weights sum to zero is left unchanged.
    pub fn normalize(&mut self) {
        for class in ArityClass::iter() {
            let weights = self.class_mut(class);
            let total: f64 = weights.values().sum();
            if total > 0.0 {
                weights.values_mut().for_each(|w| *w /= total);
            }
        }
    }

    /// Get the default path to the basis file.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(ENV_BASIS_PATH) {
            return path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("hycomb");
        path.push("basis.toml");
        path
    }

    /// Parse and validate a basis from TOML text.
    pub fn from_toml_str(src: &str) -> CompilerResult<Self> {
        let basis: Basis = toml::from_str(src).map_err(|e| CompilerError::BasisParse {
            source: e,
            file: "<string>".to_string(),
        })?;
        basis.validate()?;
        Ok(basis)
    }

    /// Load and validate a basis from a TOML file.
    pub fn load_from_toml(path: &Path) -> CompilerResult<Self> {
        debug!("loading basis from {}", path.display());
        let toml_str = std::fs::read_to_string(path)?;
        let basis: Basis = toml::from_str(&toml_str).map_err(|e| CompilerError::BasisParse {
            source: e,
            file: path.display().to_string(),
        })?;
        basis.validate()?;
        Ok(basis)
    }

    pub fn to_toml_string(&self) -> CompilerResult<String> {
        toml::to_string(self).map_err(|e| CompilerError::BasisSerialize {
            path: "<string>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Save the basis to a TOML file, creating parent directories as needed.
    pub fn save_to_toml(&self, path: &Path) -> CompilerResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| CompilerError::BasisSerialize {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!("saving basis to {}", path.display());
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
