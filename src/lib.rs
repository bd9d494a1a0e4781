//! Symbolic-to-numeric analysis of two-variable terrain formulas.
//!
//! This crate implements the function pipeline behind a terrain analyzer:
//! it parses a textual formula over `x` and `y` into a symbolic expression,
//! differentiates it exactly with respect to each variable, and compiles the
//! expression and both partial derivatives into fast numeric evaluators that
//! work on single points and on dense sampling grids alike. It builds on the
//! [evalexpr](https://github.com/ISibboI/evalexpr) crate for parsing and on
//! [ndarray](https://github.com/rust-ndarray/ndarray) for grid output.
//!
//! # Features
//!
//! - Validated parsing of two-variable mathematical expressions
//! - Exact symbolic differentiation (no finite differences)
//! - One compiled stack program per expression, evaluated in scalar mode or
//!   row-parallel grid mode with constant broadcast
//! - A single-error analysis boundary: every query returns a complete bundle
//!   or one descriptive error, never partial results
//!
//! # Example
//!
//! ```rust
//! use terrain_analyzer::analyze;
//!
//! // Analyze a mountain-pass surface at the point (1, 1)
//! let bundle = analyze("x^2 - y^2 + 50", 1.0, 1.0).unwrap();
//!
//! assert_eq!(bundle.z0, 50.0);
//! assert_eq!(bundle.gradient(), (2.0, -2.0)); // [∂f/∂x, ∂f/∂y]
//! assert_eq!(bundle.grid.z.dim(), (100, 100));
//!
//! // Malformed input is one error, not a crash
//! assert!(terrain_analyzer::analyze("x +* y", 0.0, 0.0).is_err());
//! ```

pub use analysis::{
    analyze, analyze_with_domain, AnalysisBundle, ElevationGrid, SlopePolicy, TerrainClass,
};
pub use domain::SamplingDomain;
pub use errors::{AnalysisError, EvalError, ParseError};
pub use surface::Surface;

pub mod prelude {
    pub use crate::analysis::{analyze, analyze_with_domain, AnalysisBundle, SlopePolicy};
    pub use crate::domain::SamplingDomain;
    pub use crate::evaluator::Evaluator;
    pub use crate::expr::{Axis, Expr};
    pub use crate::parser::compile;
    pub use crate::surface::Surface;
}

/// The analysis boundary: bundles, derived quantities, classification
pub mod analysis;
/// Sampling domains and coordinate grids
pub mod domain;
/// Error types for the two pipeline boundaries
pub mod errors;
/// Compiled numeric evaluators (scalar and grid mode)
pub mod evaluator;
/// Symbolic expression trees and differentiation
pub mod expr;
/// Formula parsing and validation
pub mod parser;
/// Flat stack programs and the peephole optimiser
pub mod program;
/// Compiled terrain surfaces
pub mod surface;
