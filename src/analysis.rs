//! The analysis boundary: one formula and one query point in, one complete
//! bundle or one error out.
//!
//! [`analyze`] runs the whole pipeline (compile, differentiate, evaluate the
//! query point, sample the elevation grid, render the display strings) and
//! only then hands anything to the caller. A failure at any stage aborts the
//! query with a single [`AnalysisError`]; the caller can never observe an
//! elevation without its slopes or a grid from a formula that failed.
//!
//! The bundle also carries the derived quantities the interaction layer is
//! built on: the gradient vector and its magnitude, the tangent-plane
//! approximation, the drainage (steepest descent) direction, and the
//! steepness classification against a configurable [`SlopePolicy`].

use ndarray::Array2;

use crate::domain::SamplingDomain;
use crate::errors::AnalysisError;
use crate::surface::Surface;

/// Elevation samples together with their coordinate grids.
///
/// All three arrays share one shape; cell `(j, i)` of `z` is the elevation at
/// `(x[[j, i]], y[[j, i]])`. This is the form plotting layers consume
/// directly.
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    /// x coordinate of every sample cell
    pub x: Array2<f64>,
    /// y coordinate of every sample cell
    pub y: Array2<f64>,
    /// Elevation at every sample cell
    pub z: Array2<f64>,
}

/// Thresholds for classifying terrain steepness at a point.
///
/// The two source conventions for "too steep to build on" disagree (2.0 for
/// the highway presets, 0.10 for conservative drainage work), so the
/// threshold is a parameter rather than a constant. The critical-point
/// threshold is the gradient magnitude below which a point counts as a
/// candidate peak, valley, or saddle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopePolicy {
    /// Gradient magnitudes below this classify as a critical point
    pub critical_gradient: f64,
    /// Largest per-axis slope still considered buildable
    pub max_construction_slope: f64,
}

impl Default for SlopePolicy {
    fn default() -> Self {
        Self {
            critical_gradient: 0.1,
            max_construction_slope: 2.0,
        }
    }
}

/// Steepness classification of the terrain at the query point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainClass {
    /// The gradient is numerically zero: a peak, valley, or saddle candidate
    CriticalPoint,
    /// The terrain slopes; `buildable` reports whether both per-axis slopes
    /// stay within the construction threshold
    Sloped { buildable: bool },
}

/// Everything one terrain query produces.
///
/// Constructed fresh per `(formula, point)` query and never mutated; the
/// derived-quantity methods are pure functions of the stored scalars.
#[derive(Debug, Clone)]
pub struct AnalysisBundle {
    /// Query point
    pub x0: f64,
    /// Query point
    pub y0: f64,
    /// Elevation at the query point
    pub z0: f64,
    /// ∂f/∂x at the query point
    pub fx0: f64,
    /// ∂f/∂y at the query point
    pub fy0: f64,
    /// Rendered expression
    pub expression: String,
    /// Rendered ∂f/∂x
    pub dx_expression: String,
    /// Rendered ∂f/∂y
    pub dy_expression: String,
    /// Elevation samples over the sampling domain
    pub grid: ElevationGrid,
}

impl AnalysisBundle {
    /// The gradient vector at the query point.
    pub fn gradient(&self) -> (f64, f64) {
        (self.fx0, self.fy0)
    }

    /// Magnitude of the gradient vector.
    pub fn gradient_magnitude(&self) -> f64 {
        (self.fx0 * self.fx0 + self.fy0 * self.fy0).sqrt()
    }

    /// Unit vector of steepest descent, the direction water drains.
    ///
    /// `None` at an exact critical point, where no direction exists.
    pub fn descent_direction(&self) -> Option<(f64, f64)> {
        let magnitude = self.gradient_magnitude();
        if magnitude == 0.0 {
            return None;
        }
        Some((-self.fx0 / magnitude, -self.fy0 / magnitude))
    }

    /// First-order Taylor approximation of the surface at `(x, y)`.
    ///
    /// z ≈ z0 + fx0·(x − x0) + fy0·(y − y0); only locally valid.
    pub fn tangent_elevation(&self, x: f64, y: f64) -> f64 {
        self.z0 + self.fx0 * (x - self.x0) + self.fy0 * (y - self.y0)
    }

    /// The tangent plane sampled over a domain.
    pub fn tangent_plane(&self, domain: &SamplingDomain) -> ElevationGrid {
        let (x, y) = domain.meshgrid();
        let mut z = Array2::zeros(domain.shape());
        for ((j, i), cell) in z.indexed_iter_mut() {
            *cell = self.tangent_elevation(x[[j, i]], y[[j, i]]);
        }
        ElevationGrid { x, y, z }
    }

    /// The construction overlay: the tangent plane over a 10 x 10 patch of
    /// half-width 1.5 around the query point.
    pub fn tangent_patch(&self) -> ElevationGrid {
        self.tangent_plane(&SamplingDomain::around(self.x0, self.y0, 1.5, 10))
    }

    /// Classifies the query point against a steepness policy.
    pub fn classify(&self, policy: &SlopePolicy) -> TerrainClass {
        if self.gradient_magnitude() < policy.critical_gradient {
            TerrainClass::CriticalPoint
        } else {
            TerrainClass::Sloped {
                buildable: self.fx0.abs() <= policy.max_construction_slope
                    && self.fy0.abs() <= policy.max_construction_slope,
            }
        }
    }
}

/// Analyzes a formula at a query point over the default sampling domain.
///
/// # Example
/// ```
/// use terrain_analyzer::analyze;
///
/// let bundle = analyze("x^2 - y^2 + 50", 1.0, 1.0).unwrap();
/// assert_eq!(bundle.z0, 50.0);
/// assert_eq!(bundle.gradient(), (2.0, -2.0));
/// ```
pub fn analyze(formula: &str, x0: f64, y0: f64) -> Result<AnalysisBundle, AnalysisError> {
    analyze_with_domain(formula, x0, y0, &SamplingDomain::default())
}

/// Analyzes a formula at a query point over a caller-chosen sampling domain.
///
/// Runs the full pipeline in order: compile and differentiate the formula,
/// evaluate elevation and both slopes at the query point, sample the
/// elevation grid, and render the display strings. Each step must succeed
/// completely before the next runs; on any failure the single error is
/// returned and no numeric outputs escape.
pub fn analyze_with_domain(
    formula: &str,
    x0: f64,
    y0: f64,
    domain: &SamplingDomain,
) -> Result<AnalysisBundle, AnalysisError> {
    let surface = Surface::new(formula)?;

    let z0 = surface.elevation_at(x0, y0)?;
    let (fx0, fy0) = surface.gradient_at(x0, y0)?;

    let (x, y) = domain.meshgrid();
    let z = surface.elevation().eval_grid(domain)?;

    Ok(AnalysisBundle {
        x0,
        y0,
        z0,
        fx0,
        fy0,
        expression: surface.render(),
        dx_expression: surface.render_dx(),
        dy_expression: surface.render_dy(),
        grid: ElevationGrid { x, y, z },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnalysisError;

    fn small_domain() -> SamplingDomain {
        SamplingDomain {
            x_range: (-6.0, 6.0),
            y_range: (-6.0, 6.0),
            resolution: (12, 12),
        }
    }

    #[test]
    fn test_saddle_bundle_values() {
        let bundle = analyze_with_domain("x^2 - y^2 + 50", 1.0, 1.0, &small_domain()).unwrap();

        assert_eq!(bundle.z0, 50.0);
        assert_eq!(bundle.fx0, 2.0);
        assert_eq!(bundle.fy0, -2.0);
        assert!((bundle.gradient_magnitude() - 8.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(bundle.grid.z.dim(), (12, 12));
    }

    #[test]
    fn test_dome_derivatives_everywhere() {
        for &(x0, y0) in &[(0.5, -0.5), (2.0, 3.0), (-4.0, 1.0)] {
            let bundle =
                analyze_with_domain("100 - x^2 - y^2", x0, y0, &small_domain()).unwrap();
            assert!((bundle.fx0 - (-2.0 * x0)).abs() < 1e-12);
            assert!((bundle.fy0 - (-2.0 * y0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_formula_grid_broadcast() {
        let bundle = analyze_with_domain("10", 0.0, 0.0, &small_domain()).unwrap();
        assert_eq!(bundle.z0, 10.0);
        assert_eq!(bundle.fx0, 0.0);
        assert_eq!(bundle.fy0, 0.0);
        assert_eq!(bundle.grid.z.dim(), (12, 12));
        assert!(bundle.grid.z.iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_parse_failure_yields_no_bundle() {
        assert!(matches!(
            analyze("x +* y", 0.0, 0.0),
            Err(AnalysisError::Parse(_))
        ));
    }

    #[test]
    fn test_domain_failure_at_query_point() {
        assert!(matches!(
            analyze_with_domain("log(x)", -1.0, 0.0, &small_domain()),
            Err(AnalysisError::Eval(_))
        ));
    }

    #[test]
    fn test_domain_failure_on_grid_only() {
        // fine at the query point, undefined on the left half of the grid
        assert!(matches!(
            analyze_with_domain("log(x)", 2.0, 0.0, &small_domain()),
            Err(AnalysisError::Eval(_))
        ));
    }

    #[test]
    fn test_idempotence() {
        let a = analyze_with_domain("sin(x) * cos(y) + x^2", 1.25, -0.75, &small_domain())
            .unwrap();
        let b = analyze_with_domain("sin(x) * cos(y) + x^2", 1.25, -0.75, &small_domain())
            .unwrap();

        assert_eq!(a.z0.to_bits(), b.z0.to_bits());
        assert_eq!(a.fx0.to_bits(), b.fx0.to_bits());
        assert_eq!(a.fy0.to_bits(), b.fy0.to_bits());
        assert_eq!(a.expression, b.expression);
        assert_eq!(a.dx_expression, b.dx_expression);
        assert_eq!(a.dy_expression, b.dy_expression);
    }

    #[test]
    fn test_classification_thresholds() {
        let policy = SlopePolicy::default();

        // gradient (0, 0): critical point
        let flat = analyze_with_domain("10", 0.0, 0.0, &small_domain()).unwrap();
        assert_eq!(flat.classify(&policy), TerrainClass::CriticalPoint);

        // dome summit: gradient magnitude 0 < 0.1
        let summit =
            analyze_with_domain("100 - x^2 - y^2", 0.0, 0.0, &small_domain()).unwrap();
        assert_eq!(summit.classify(&policy), TerrainClass::CriticalPoint);

        // magnitude just below the threshold
        let near = analyze_with_domain("100 - x^2 - y^2", 0.04, 0.0, &small_domain()).unwrap();
        assert!(near.gradient_magnitude() < 0.1);
        assert_eq!(near.classify(&policy), TerrainClass::CriticalPoint);

        // gentle but definite slope: not critical, buildable
        let gentle = analyze_with_domain("100 - x^2 - y^2", 0.5, 0.0, &small_domain()).unwrap();
        assert_eq!(
            gentle.classify(&policy),
            TerrainClass::Sloped { buildable: true }
        );

        // steep flank: |fx| = 8 > 2.0
        let steep = analyze_with_domain("100 - x^2 - y^2", 4.0, 0.0, &small_domain()).unwrap();
        assert_eq!(
            steep.classify(&policy),
            TerrainClass::Sloped { buildable: false }
        );

        // the conservative drainage policy flags the gentle slope too
        let strict = SlopePolicy {
            critical_gradient: 0.1,
            max_construction_slope: 0.10,
        };
        assert_eq!(
            gentle.classify(&strict),
            TerrainClass::Sloped { buildable: false }
        );
    }

    #[test]
    fn test_tangent_plane() {
        let bundle = analyze_with_domain("x^2 - y^2 + 50", 1.0, 1.0, &small_domain()).unwrap();

        // exact at the query point
        assert_eq!(bundle.tangent_elevation(1.0, 1.0), bundle.z0);

        // first-order in the displacement: f(1.1, 1) = 51.21 - 1 = 50.21,
        // tangent gives 50 + 2*0.1 = 50.2
        let approx = bundle.tangent_elevation(1.1, 1.0);
        assert!((approx - 50.2).abs() < 1e-12);

        let patch = bundle.tangent_patch();
        assert_eq!(patch.z.dim(), (10, 10));
        assert_eq!(patch.x[[0, 0]], -0.5);
        assert_eq!(patch.y[[0, 0]], -0.5);
    }

    #[test]
    fn test_descent_direction_opposes_gradient() {
        let bundle = analyze_with_domain("x^2 - y^2 + 50", 1.0, 1.0, &small_domain()).unwrap();
        let (dx, dy) = bundle.descent_direction().unwrap();
        assert!(dx < 0.0); // gradient points up-slope in +x
        assert!(dy > 0.0);
        assert!(((dx * dx + dy * dy).sqrt() - 1.0).abs() < 1e-12);

        let flat = analyze_with_domain("10", 0.0, 0.0, &small_domain()).unwrap();
        assert_eq!(flat.descent_direction(), None);
    }
}
