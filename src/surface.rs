//! Compiled terrain surfaces with symbolic differentiation.
//!
//! This module provides the core `Surface` type: one parsed terrain formula
//! together with its two symbolic partial derivatives and the three compiled
//! evaluators derived from them. Everything is computed up front on
//! construction, so a surface can answer any number of point and grid
//! queries without repeating symbolic work.
//!
//! # Example
//!
//! ```
//! use terrain_analyzer::Surface;
//!
//! let surface = Surface::new("x^2 - y^2 + 50").unwrap();
//!
//! let z = surface.elevation_at(1.0, 1.0).unwrap(); // 50.0
//! let (fx, fy) = surface.gradient_at(1.0, 1.0).unwrap(); // (2.0, -2.0)
//! assert_eq!(z, 50.0);
//! assert_eq!((fx, fy), (2.0, -2.0));
//! ```

use colored::Colorize;

use crate::errors::{EvalError, ParseError};
use crate::evaluator::Evaluator;
use crate::expr::{Axis, Expr};
use crate::parser::compile;

/// A terrain formula compiled for repeated evaluation.
///
/// Holds the original formula text, the simplified expression tree, both
/// first-order partial derivative trees, and a compiled evaluator for each of
/// the three. The derivative trees are produced by exact symbolic
/// differentiation; the surface owns all of them and hands out evaluators by
/// reference.
#[derive(Clone)]
pub struct Surface {
    formula: String,
    expr: Box<Expr>,
    dx: Box<Expr>,
    dy: Box<Expr>,
    elevation: Evaluator,
    slope_x: Evaluator,
    slope_y: Evaluator,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{\n")?;
        writeln!(f, "    {}: {}\n", "Formula".cyan(), self.formula)?;
        writeln!(f, "    {}: {}\n", "Expression".cyan(), self.expr)?;
        writeln!(f, "    {}: {}\n", "d/dx".cyan(), self.dx)?;
        writeln!(f, "    {}: {}\n", "d/dy".cyan(), self.dy)?;
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl Surface {
    /// Compiles a formula string into a surface.
    ///
    /// This runs the whole symbolic half of the pipeline: parse and validate
    /// the formula, simplify it, differentiate it with respect to each axis,
    /// and compile the three resulting trees into evaluators.
    ///
    /// # Arguments
    /// * `formula` - A two-variable terrain formula, e.g. `"100 - x^2 - y^2"`
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the formula is not a valid expression over
    /// `x` and `y` and the supported function set. Numeric problems (division
    /// by zero, domain errors) are not detected here; they surface when a
    /// point or grid is actually evaluated.
    pub fn new(formula: &str) -> Result<Self, ParseError> {
        let expr = compile(formula)?.simplify();
        let dx = expr.derivative(Axis::X).simplify();
        let dy = expr.derivative(Axis::Y).simplify();

        let elevation = Evaluator::new(&expr, "elevation");
        let slope_x = Evaluator::new(&dx, "slope in x");
        let slope_y = Evaluator::new(&dy, "slope in y");

        Ok(Self {
            formula: formula.to_string(),
            expr,
            dx,
            dy,
            elevation,
            slope_x,
            slope_y,
        })
    }

    /// The formula text the surface was compiled from.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The simplified expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The symbolic partial derivative with respect to an axis.
    pub fn derivative(&self, axis: Axis) -> &Expr {
        match axis {
            Axis::X => &self.dx,
            Axis::Y => &self.dy,
        }
    }

    /// Display rendering of the expression.
    pub fn render(&self) -> String {
        self.expr.to_string()
    }

    /// Display rendering of ∂f/∂x.
    pub fn render_dx(&self) -> String {
        self.dx.to_string()
    }

    /// Display rendering of ∂f/∂y.
    pub fn render_dy(&self) -> String {
        self.dy.to_string()
    }

    /// The compiled elevation evaluator.
    pub fn elevation(&self) -> &Evaluator {
        &self.elevation
    }

    /// The compiled ∂f/∂x evaluator.
    pub fn slope_x(&self) -> &Evaluator {
        &self.slope_x
    }

    /// The compiled ∂f/∂y evaluator.
    pub fn slope_y(&self) -> &Evaluator {
        &self.slope_y
    }

    /// Elevation at a point, rejecting non-finite results.
    pub fn elevation_at(&self, x: f64, y: f64) -> Result<f64, EvalError> {
        self.elevation.eval_checked(x, y)
    }

    /// Both partial derivatives at a point, rejecting non-finite results.
    pub fn gradient_at(&self, x: f64, y: f64) -> Result<(f64, f64), EvalError> {
        Ok((
            self.slope_x.eval_checked(x, y)?,
            self.slope_y.eval_checked(x, y)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dome_preset() {
        // f = 100 - x^2 - y^2: fx = -2x, fy = -2y
        let surface = Surface::new("100 - x^2 - y^2").unwrap();

        for &(x, y) in &[(0.0, 0.0), (1.0, 2.0), (-3.5, 0.25)] {
            assert!((surface.slope_x().eval(x, y) - (-2.0 * x)).abs() < 1e-12);
            assert!((surface.slope_y().eval(x, y) - (-2.0 * y)).abs() < 1e-12);
        }

        assert_eq!(surface.elevation_at(0.0, 0.0).unwrap(), 100.0);
        assert_eq!(surface.elevation_at(1.0, 1.0).unwrap(), 98.0);
    }

    #[test]
    fn test_saddle_preset() {
        // f = x^2 - y^2 + 50 at (1, 1)
        let surface = Surface::new("x^2 - y^2 + 50").unwrap();

        assert_eq!(surface.elevation_at(1.0, 1.0).unwrap(), 50.0);
        let (fx, fy) = surface.gradient_at(1.0, 1.0).unwrap();
        assert_eq!(fx, 2.0);
        assert_eq!(fy, -2.0);
        assert!(((fx * fx + fy * fy).sqrt() - 8.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_variable_surface_has_zero_partial() {
        let surface = Surface::new("x^2").unwrap();
        assert!(surface.slope_y().is_constant());
        assert_eq!(surface.slope_y().eval(3.0, 4.0), 0.0);
        assert_eq!(surface.render_dy(), "0");
    }

    #[test]
    fn test_rendered_derivatives_are_readable() {
        let surface = Surface::new("x^2 - y^2 + 50").unwrap();
        assert_eq!(surface.render_dx(), "(2 * x)");
        assert_eq!(surface.render_dy(), "-((2 * y))");
    }

    #[test]
    fn test_invalid_formula() {
        assert!(Surface::new("2*x + )").is_err());
        assert!(Surface::new("").is_err());
    }

    #[test]
    fn test_gradient_error_leaves_no_partial_result() {
        // sqrt'(x) = 1/(2 sqrt x) is infinite at x = 0
        let surface = Surface::new("sqrt(x)").unwrap();
        assert!(surface.elevation_at(0.0, 0.0).is_ok());
        assert!(surface.gradient_at(0.0, 0.0).is_err());
    }

    #[test]
    fn test_surface_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Surface>();
        assert_send_sync::<Evaluator>();
    }

    #[test]
    fn test_debug_formatting() {
        let surface = Surface::new("2*x + y^2").unwrap();
        let output = format!("{surface:?}");
        assert!(output.contains("Formula"));
        assert!(output.contains("2*x + y^2"));
    }
}
