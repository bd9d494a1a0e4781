//! The rectangular sampling domain surfaces are rendered over.
//!
//! Visualization consumers sample the terrain over a fixed region around the
//! origin, independent of the query point. The default matches the original
//! survey tooling: both axes spanning [-6, 6] at 100 x 100 samples.

use ndarray::{Array1, Array2};

/// A rectangular sampling region with a fixed resolution per axis.
///
/// `resolution` is (columns, rows): the number of samples along x and along
/// y. Grids produced from a domain follow the meshgrid convention the
/// plotting layers expect: x varies along columns, y along rows, so every
/// produced array has shape `(rows, columns)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDomain {
    /// Inclusive range of the x axis
    pub x_range: (f64, f64),
    /// Inclusive range of the y axis
    pub y_range: (f64, f64),
    /// Samples along (x, y)
    pub resolution: (usize, usize),
}

impl Default for SamplingDomain {
    fn default() -> Self {
        Self {
            x_range: (-6.0, 6.0),
            y_range: (-6.0, 6.0),
            resolution: (100, 100),
        }
    }
}

impl SamplingDomain {
    /// A square domain centered on a point, used for local patches such as
    /// the tangent-plane overlay.
    pub fn around(x0: f64, y0: f64, half_width: f64, samples: usize) -> Self {
        Self {
            x_range: (x0 - half_width, x0 + half_width),
            y_range: (y0 - half_width, y0 + half_width),
            resolution: (samples, samples),
        }
    }

    /// The sample positions along the x axis.
    pub fn x_axis(&self) -> Array1<f64> {
        Array1::linspace(self.x_range.0, self.x_range.1, self.resolution.0)
    }

    /// The sample positions along the y axis.
    pub fn y_axis(&self) -> Array1<f64> {
        Array1::linspace(self.y_range.0, self.y_range.1, self.resolution.1)
    }

    /// The grid shape as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.resolution.1, self.resolution.0)
    }

    /// Coordinate grids for every sample cell.
    ///
    /// Returns `(x, y)` arrays of the domain's shape; cell `(j, i)` holds the
    /// coordinates of the sample in row j, column i.
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        let xs = self.x_axis();
        let ys = self.y_axis();
        let shape = self.shape();

        let x = Array2::from_shape_fn(shape, |(_, i)| xs[i]);
        let y = Array2::from_shape_fn(shape, |(j, _)| ys[j]);
        (x, y)
    }
}
