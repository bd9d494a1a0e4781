//! Numeric evaluators compiled from symbolic expressions.
//!
//! An [`Evaluator`] wraps the optimized stack program of one expression and
//! runs it in two modes from the same compiled form:
//!
//! - **scalar mode**: one coordinate pair in, one value out
//! - **grid mode**: a whole sampling domain in, an `ndarray` elevation grid
//!   out, rows evaluated in parallel
//!
//! Expressions that depend on neither axis are detected at compile time and
//! broadcast across the requested grid shape rather than collapsed to a bare
//! scalar. Non-finite results (division by zero, log of a negative number,
//! overflow) are rejected at this boundary in both modes; callers never see a
//! NaN or infinity inside a success value.

use itertools::Itertools;
use ndarray::{Array2, Zip};
use rayon::prelude::*;

use crate::domain::SamplingDomain;
use crate::errors::EvalError;
use crate::expr::Expr;
use crate::program::{optimize, Program};

/// A compiled numeric evaluator for one expression.
///
/// Evaluators are cheap to clone, hold no mutable state, and are `Send +
/// Sync`, so independent queries may run them from multiple threads without
/// coordination.
#[derive(Debug, Clone)]
pub struct Evaluator {
    program: Program,
    quantity: &'static str,
}

impl Evaluator {
    /// Compiles an expression into an evaluator.
    ///
    /// `quantity` names what the expression computes ("elevation", "slope in
    /// x", ...) and is only used to label evaluation errors.
    pub fn new(expr: &Expr, quantity: &'static str) -> Self {
        Self {
            program: optimize(expr.lower()),
            quantity,
        }
    }

    /// Evaluates at a single point without checking the result.
    ///
    /// The value may be non-finite for points outside the formula's domain;
    /// use [`eval_checked`](Self::eval_checked) at result boundaries.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.program.run(x, y)
    }

    /// Evaluates at a single point, rejecting non-finite results.
    pub fn eval_checked(&self, x: f64, y: f64) -> Result<f64, EvalError> {
        let value = self.program.run(x, y);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinitePoint {
                quantity: self.quantity,
                x,
                y,
            })
        }
    }

    /// Evaluates over every cell of a sampling domain.
    ///
    /// Returns an array of the domain's shape. A constant expression is
    /// broadcast across the full shape. If any cell is non-finite the whole
    /// evaluation fails, reporting the first offending coordinates.
    pub fn eval_grid(&self, domain: &SamplingDomain) -> Result<Array2<f64>, EvalError> {
        let (rows, cols) = domain.shape();

        if let Some(c) = self.program.constant {
            if !c.is_finite() {
                return Err(EvalError::NonFiniteGrid {
                    quantity: self.quantity,
                    x: domain.x_range.0,
                    y: domain.y_range.0,
                });
            }
            return Ok(Array2::from_elem((rows, cols), c));
        }

        let xs = domain.x_axis();
        let ys = domain.y_axis();
        let mut z = Array2::zeros((rows, cols));
        {
            let xs = xs
                .as_slice()
                .expect("linspace arrays are contiguous");
            let flat = z
                .as_slice_mut()
                .expect("freshly allocated grids are contiguous");
            flat.par_chunks_mut(cols).enumerate().for_each(|(j, row)| {
                let yj = ys[j];
                for (i, cell) in row.iter_mut().enumerate() {
                    *cell = self.program.run(xs[i], yj);
                }
            });
        }

        if let Some((index, _)) = z.iter().find_position(|v| !v.is_finite()) {
            return Err(EvalError::NonFiniteGrid {
                quantity: self.quantity,
                x: xs[index % cols],
                y: ys[index / cols],
            });
        }
        Ok(z)
    }

    /// Evaluates over caller-supplied coordinate grids of equal shape.
    ///
    /// The result always matches the shape of the input coordinates, also
    /// for constant expressions.
    pub fn eval_arrays(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
    ) -> Result<Array2<f64>, EvalError> {
        if x.dim() != y.dim() {
            return Err(EvalError::ShapeMismatch {
                lhs: x.shape().to_vec(),
                rhs: y.shape().to_vec(),
            });
        }

        let z = if let Some(c) = self.program.constant {
            Array2::from_elem(x.dim(), c)
        } else {
            let mut z = Array2::zeros(x.dim());
            Zip::from(&mut z)
                .and(x)
                .and(y)
                .for_each(|cell, &xv, &yv| *cell = self.program.run(xv, yv));
            z
        };

        for ((j, i), value) in z.indexed_iter() {
            if !value.is_finite() {
                return Err(EvalError::NonFiniteGrid {
                    quantity: self.quantity,
                    x: x[[j, i]],
                    y: y[[j, i]],
                });
            }
        }
        Ok(z)
    }

    /// True if the expression depends on neither axis.
    pub fn is_constant(&self) -> bool {
        self.program.constant.is_some()
    }

    /// The compiled stack program.
    pub fn program(&self) -> &Program {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::compile;

    fn evaluator(formula: &str) -> Evaluator {
        Evaluator::new(&compile(formula).unwrap(), "elevation")
    }

    #[test]
    fn test_scalar_matches_direct_computation() {
        let eval = evaluator("2*x + y^2");
        assert_eq!(eval.eval(1.0, 2.0), 6.0);
        assert_eq!(eval.eval_checked(1.0, 2.0).unwrap(), 6.0);

        let eval = evaluator("sin(x) * cos(y)");
        let (x, y) = (0.7, -1.3);
        assert_eq!(eval.eval(x, y), x.sin() * y.cos());
    }

    #[test]
    fn test_scalar_rejects_domain_error() {
        let eval = evaluator("log(x)");
        assert!(eval.eval_checked(2.0, 0.0).is_ok());
        assert!(matches!(
            eval.eval_checked(-1.0, 0.0),
            Err(EvalError::NonFinitePoint { x, .. }) if x == -1.0
        ));
    }

    #[test]
    fn test_scalar_rejects_division_by_zero() {
        let eval = evaluator("1 / x");
        assert!(eval.eval_checked(0.0, 0.0).is_err());
    }

    #[test]
    fn test_grid_matches_scalar_pointwise() {
        let eval = evaluator("x^2 - y^2 + 50");
        let domain = SamplingDomain {
            x_range: (-2.0, 2.0),
            y_range: (-1.0, 1.0),
            resolution: (5, 3),
        };
        let z = eval.eval_grid(&domain).unwrap();
        let (xg, yg) = domain.meshgrid();

        assert_eq!(z.dim(), domain.shape());
        for ((j, i), &value) in z.indexed_iter() {
            assert_eq!(value, eval.eval(xg[[j, i]], yg[[j, i]]));
        }
    }

    #[test]
    fn test_constant_broadcasts_to_grid_shape() {
        let eval = evaluator("10");
        assert!(eval.is_constant());

        let domain = SamplingDomain::default();
        let z = eval.eval_grid(&domain).unwrap();
        assert_eq!(z.dim(), (100, 100));
        assert!(z.iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_single_variable_formula_broadcasts_across_other_axis() {
        // constant along y, but still a full 2-D grid
        let eval = evaluator("x^2");
        let domain = SamplingDomain {
            x_range: (-1.0, 1.0),
            y_range: (-1.0, 1.0),
            resolution: (3, 4),
        };
        let z = eval.eval_grid(&domain).unwrap();
        assert_eq!(z.dim(), (4, 3));
        for j in 0..4 {
            assert_eq!(z[[j, 0]], 1.0);
            assert_eq!(z[[j, 1]], 0.0);
            assert_eq!(z[[j, 2]], 1.0);
        }
    }

    #[test]
    fn test_grid_rejects_partial_domain_error() {
        // log is only defined on the right half of this domain
        let eval = evaluator("log(x)");
        let domain = SamplingDomain {
            x_range: (-6.0, 6.0),
            y_range: (-6.0, 6.0),
            resolution: (10, 10),
        };
        assert!(matches!(
            eval.eval_grid(&domain),
            Err(EvalError::NonFiniteGrid { .. })
        ));
    }

    #[test]
    fn test_eval_arrays_shape_check() {
        let eval = evaluator("x + y");
        let a = Array2::zeros((2, 3));
        let b = Array2::zeros((3, 2));
        assert!(matches!(
            eval.eval_arrays(&a, &b),
            Err(EvalError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_eval_arrays_constant_keeps_input_shape() {
        let eval = evaluator("10");
        let (xg, yg) = SamplingDomain::around(0.0, 0.0, 1.0, 7).meshgrid();
        let z = eval.eval_arrays(&xg, &yg).unwrap();
        assert_eq!(z.dim(), (7, 7));
        assert!(z.iter().all(|&v| v == 10.0));
    }
}
