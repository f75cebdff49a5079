//! Row reshaping and the plotting loop.

mod plot;
mod reshape;

pub use plot::{plot_grid, PlotOptions};
pub use reshape::{check_factors, reshape_row, Order, ParseOrderError};

use ndarray::Array2;

/// Sample matrix, one flattened image per row.
pub type Matrix = Array2<f32>;

/// A single row reshaped to `d1 x d2`.
pub type Grid = Array2<f32>;
