//! Error types for expression parsing and problem construction.
//!
//! Answer checking never surfaces these to the player: an answer that fails to
//! parse is simply wrong. They exist so callers can log *why* it was wrong.

use thiserror::Error;

/// Errors raised while parsing or manipulating a symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// A character that is not part of the expression grammar.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A token in a position where it cannot appear.
    #[error("unexpected {0}")]
    UnexpectedToken(String),

    /// The input ended in the middle of an expression.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A numeric literal that cannot be represented exactly.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// A symbol other than the polynomial variable.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A construct that does not reduce to a polynomial (e.g. `1/x`).
    #[error("not a polynomial: {0}")]
    NotPolynomial(String),

    /// A product or power of sums left unmultiplied, e.g. `(x+1)*(x-1)`.
    #[error("not expanded: {0}")]
    NotExpanded(String),

    /// Division by a constant zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A coefficient or exponent outgrew the supported range.
    #[error("arithmetic overflow")]
    Overflow,
}

impl ExprError {
    /// Returns `true` if the input itself was malformed, as opposed to being
    /// well-formed but outside what the checker can represent.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ExprError::UnexpectedChar(_)
                | ExprError::UnexpectedToken(_)
                | ExprError::UnexpectedEnd
                | ExprError::InvalidNumber(_)
        )
    }
}

/// Errors raised while building a problem from sampled parameters.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// A data set too small for the requested statistic.
    #[error("sample needs at least {needed} values, got {got}")]
    SampleTooSmall { needed: usize, got: usize },

    /// A linear equation whose leading coefficient is zero.
    #[error("equation has no unique solution")]
    NoUniqueSolution,

    /// Building the expected expression failed.
    #[error(transparent)]
    Expr(#[from] ExprError),
}
