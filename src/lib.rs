//! # gridplot
//!
//! Render the rows of a sample matrix as grayscale images.
//!
//! Each row of an `N x D` matrix is reshaped into a `d1 x d2` grid
//! (`d1 * d2 == D`) in row-major or column-major order and handed to an
//! [`ImageSink`]. Sinks decide where the pixels go: memory, one PNG per row,
//! or a single tiled sheet.
//!
//! ## Example
//!
//! ```no_run
//! use gridplot::{plot_grid, PlotOptions, PngSink, RenderOptions};
//! use ndarray::array;
//!
//! # fn main() -> gridplot::Result<()> {
//! let x = array![[1.0_f32, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
//! let mut sink = PngSink::new("plots", RenderOptions::default())?;
//!
//! plot_grid(x.view(), 2, 2, &PlotOptions::titled("digits"), &mut sink)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod grid;
pub mod image;
pub mod matrix;
pub mod sink;

pub use error::{Error, Result};
pub use grid::{plot_grid, Order, PlotOptions};
pub use image::{RenderOptions, ValueRange};
pub use matrix::load_matrix;
pub use sink::{Frame, ImageSink, MemorySink, MontageSink, PngSink};
