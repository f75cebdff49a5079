//! Shape validation and row-to-grid reshaping.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1, ShapeBuilder};

use crate::error::{Error, Result};

use super::Grid;

/// Order in which a flat row is unpacked into a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Fill across each grid row before moving down (`C` order).
    #[default]
    RowMajor,
    /// Fill down each grid column before moving right (`F` order).
    ColumnMajor,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowMajor => f.write_str("C"),
            Self::ColumnMajor => f.write_str("F"),
        }
    }
}

/// Error returned when an order name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order {0:?}, expected one of: c, row-major, f, column-major")]
pub struct ParseOrderError(String);

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "row" | "row-major" => Ok(Self::RowMajor),
            "f" | "col" | "column" | "column-major" => Ok(Self::ColumnMajor),
            _ => Err(ParseOrderError(s.to_string())),
        }
    }
}

/// Check that `d1 * d2` equals the row length `d`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when the product differs from `d` or
/// overflows.
pub fn check_factors(d1: usize, d2: usize, d: usize) -> Result<()> {
    match d1.checked_mul(d2) {
        Some(product) if product == d => Ok(()),
        _ => Err(Error::ShapeMismatch { d1, d2, d }),
    }
}

/// Reshape one flat row into a `d1 x d2` grid.
///
/// Row-major order places flat index `i * d2 + j` at cell `(i, j)`;
/// column-major order places `j * d1 + i` there.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `d1 * d2` differs from the row length.
pub fn reshape_row(row: ArrayView1<'_, f32>, d1: usize, d2: usize, order: Order) -> Result<Grid> {
    check_factors(d1, d2, row.len())?;

    let shape = (d1, d2).set_f(order == Order::ColumnMajor);

    // Length was checked above.
    let grid = Array2::from_shape_vec(shape, row.to_vec()).map_err(|_| Error::ShapeMismatch {
        d1,
        d2,
        d: row.len(),
    })?;

    Ok(grid.as_standard_layout().into_owned())
}
