use strum::EnumIs;
use thiserror::Error;

/// Errors raised while building, parsing, rewriting or translating terms.
///
/// None of these are recovered locally: the operation that raised one is abandoned and the
/// error is handed back to the caller together with the offending token or term.
#[derive(Debug, EnumIs, Error)]
pub enum CompilerError {
    /// The token stream contains a head token that is not declared in the symbol table.
    #[error("Unrecognized token `{token}` at position {position}.")]
    UnrecognizedToken { token: String, position: usize },

    /// A symbol was declared twice.
    #[error("Duplicate symbol `{0}`: every symbol must be declared exactly once.")]
    DuplicateSymbol(String),

    /// A symbol constructor was invoked with the wrong number of arguments.
    #[error("`{symbol}(...)` called with wrong number of arguments: expected {expected}, found {found}.")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// A rule table was built from an invalid pattern.
    #[error("Bad pattern in rule table `{table}`: {reason}")]
    MalformedPattern { table: &'static str, reason: String },

    /// No rule of a rule table unifies with the input.
    #[error("Unmatched expression in rule table `{table}`:\n  {term}")]
    UnmatchedExpression { table: &'static str, term: String },

    /// A case of the compiler or decompiler that is intentionally left unhandled.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The lexer rejected the input.
    #[error("Failed to tokenize input: {}", .0.join("; "))]
    Lex(Vec<String>),

    /// The token stream ended before a complete term was read.
    #[error("Unexpected end of input: expected {expected} more token(s).")]
    UnexpectedEnd { expected: usize },

    /// Tokens remain after a complete term was read.
    #[error("Trailing tokens after a complete term, starting with `{token}` at position {position}.")]
    TrailingTokens { token: String, position: usize },

    /// A `VAR` payload that is not a name, or a name outside of `VAR`.
    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse basis file '{file}': {source}")]
    BasisParse {
        source: toml::de::Error,
        file: String,
    },

    #[error("Invalid basis: {0}")]
    InvalidBasis(String),

    #[error("Failed to serialize basis for `{path}`: {reason}")]
    BasisSerialize { path: String, reason: String },
}

pub type CompilerResult<T> = Result<T, CompilerError>;
