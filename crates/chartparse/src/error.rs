//! Error types for grammar construction and parsing.
//!
//! Both families are fatal for the operation that raises them: a grammar
//! that fails any check never comes into existence, and a parse that hits an
//! unknown terminal returns no partial chart. An input that simply has no
//! whole-input derivation is *not* an error; it yields an empty forest.
//!
//! With the `diagnostics` feature enabled, errors additionally derive
//! `miette::Diagnostic` for rich reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Errors raised while reading a grammar definition.
///
/// All of these are detected eagerly during construction, before any parse
/// can run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    /// A production line that does not match `LHS -> sym1 .. symN`.
    #[error("can't understand production '{line}'")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(grammar::malformed_production))
    )]
    MalformedProduction { line: String },

    /// A production with nothing after the separator.
    #[error("right hand side missing in '{line}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_rhs)))]
    EmptyRhs { line: String },

    /// The exact same (left-hand side, right-hand side) pair twice.
    #[error("production '{production}' is declared more than once")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(grammar::duplicate_production))
    )]
    DuplicateProduction { production: String },

    /// A definition without a single production.
    #[error("there must be at least one production")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty)))]
    EmptyGrammar,

    /// Extended notation: a token that does not fit the production syntax.
    #[error("unexpected {found} at line {line}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::unexpected_token)))]
    UnexpectedToken { found: String, line: usize },

    /// Extended notation: a terminal literal without a closing quote.
    #[error("unterminated terminal literal at line {line}")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(grammar::unterminated_literal))
    )]
    UnterminatedLiteral { line: usize },

    /// Extended notation: an escape other than `\\` or `\"` inside a literal.
    #[error("invalid escape '\\{escape}' at line {line}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_escape)))]
    InvalidEscape { escape: char, line: usize },

    /// Extended notation: the empty terminal literal `""`.
    #[error("empty terminal literal at line {line}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_literal)))]
    EmptyLiteral { line: usize },
}

/// Errors raised by the chart parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    /// An input token that no singleton production can produce.
    ///
    /// Detected by the validation pre-pass before any chart state is built.
    #[error("unknown terminal '{terminal}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::unknown_terminal)))]
    UnknownTerminal { terminal: String },
}
