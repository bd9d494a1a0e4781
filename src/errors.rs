//! Error types for the terrain-analyzer crate.
//!
//! This module defines the failure modes of the two pipeline boundaries:
//!
//! - `ParseError`: the formula string is not a valid expression over `x` and `y`
//! - `EvalError`: a numerically invalid result (NaN, infinity) at the query
//!   point or somewhere on the sampling grid
//! - `AnalysisError`: the single error surfaced by [`analyze`](crate::analyze),
//!   wrapping exactly one of the two kinds above
//!
//! Each error type implements the standard Error trait and renders a message
//! suitable for direct display to an end user.

use evalexpr::{DefaultNumericTypes, EvalexprError};
use thiserror::Error;

/// Errors raised while compiling a formula string into a symbolic expression.
///
/// Everything here is detected before any numeric work happens: syntax errors
/// come from the expression parser, the remaining variants from validating the
/// parsed tree against the two-variable grammar.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The formula contained nothing but whitespace
    #[error("formula is empty")]
    EmptyFormula,
    /// The parser could not make sense of the input at all
    #[error("could not parse formula: {0}")]
    Syntax(#[from] EvalexprError<DefaultNumericTypes>),
    /// A function name outside the supported set was called
    #[error("unknown function `{0}` (supported: sin, cos, tan, exp, log, ln, sqrt, abs)")]
    UnknownFunction(String),
    /// An identifier other than the two surface variables was referenced
    #[error("unknown variable `{0}` (a terrain formula may only use x and y)")]
    UnknownVariable(String),
    /// The expression used an operator with no mathematical meaning here
    #[error("unsupported construct in formula: {0}")]
    UnsupportedOperator(String),
    /// A literal that is not a plain number (e.g. a string or boolean)
    #[error("expected a numeric constant, found {0}")]
    NonNumericConstant(String),
    /// Nesting beyond the depth limit, kept as a cost bound for untrusted input
    #[error("formula is nested too deeply (limit is {0} levels)")]
    TooDeep(usize),
}

/// Errors raised when a compiled surface produces a non-finite value.
///
/// The pipeline never hands a NaN or infinity to the caller; evaluation of the
/// query point and of the sampling grid both fail loudly instead.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The quantity is undefined or unbounded at the query point
    #[error("{quantity} is not a finite number at ({x}, {y}); the formula leaves its domain there")]
    NonFinitePoint {
        quantity: &'static str,
        x: f64,
        y: f64,
    },
    /// At least one sampling-grid cell evaluated to NaN or infinity
    #[error("{quantity} is not finite everywhere on the sampling grid (first bad cell at ({x}, {y}))")]
    NonFiniteGrid {
        quantity: &'static str,
        x: f64,
        y: f64,
    },
    /// Caller-supplied coordinate grids disagree in shape
    #[error("coordinate grids have mismatched shapes: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },
}

/// The single error returned by the analysis boundary.
///
/// A query either yields a complete [`AnalysisBundle`](crate::AnalysisBundle)
/// or exactly one of these; partial results are never observable.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The formula never compiled
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The formula compiled but could not be evaluated numerically
    #[error(transparent)]
    Eval(#[from] EvalError),
}
