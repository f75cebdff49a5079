//! Render every row of a sample matrix through an image sink.

use ndarray::ArrayView2;

use crate::error::Result;
use crate::sink::{Frame, ImageSink};

use super::reshape::{check_factors, reshape_row, Order};

/// Options for [`plot_grid`].
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Label attached to every rendered image. Empty for none.
    pub title: String,

    /// How each flat row is unpacked into its grid.
    pub order: Order,
}

impl PlotOptions {
    /// Options with the given title and row-major order.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Reshape each row of `x` into a `d1 x d2` grid and render it to `sink`.
///
/// Rows are rendered in index order, one frame per row, and `sink.finish()`
/// is called once after the last row. Returns the number of frames rendered.
///
/// # Errors
///
/// Returns [`crate::Error::ShapeMismatch`] if `d1 * d2` differs from the
/// column count of `x`; the sink is not touched in that case. Any error from
/// the sink aborts the loop and is returned as is.
pub fn plot_grid<S: ImageSink + ?Sized>(
    x: ArrayView2<'_, f32>,
    d1: usize,
    d2: usize,
    options: &PlotOptions,
    sink: &mut S,
) -> Result<usize> {
    let (n, d) = x.dim();
    check_factors(d1, d2, d)?;

    tracing::info!(
        "Plotting {n} rows as {d1}x{d2} grids (order {})",
        options.order
    );

    for (index, row) in x.rows().into_iter().enumerate() {
        let grid = reshape_row(row, d1, d2, options.order)?;
        tracing::debug!("Rendering row {index}");

        sink.render(&Frame {
            index,
            title: &options.title,
            grid: grid.view(),
        })?;
    }

    sink.finish()?;

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sink::MemorySink;
    use ndarray::{array, Array2};

    #[test]
    fn test_renders_each_row_in_order() {
        let x = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
        let mut sink = MemorySink::new();

        let count = plot_grid(x.view(), 2, 2, &PlotOptions::default(), &mut sink).unwrap();

        assert_eq!(count, 2);
        let images = sink.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].index, 0);
        assert_eq!(images[0].grid, array![[1.0_f32, 2.0], [3.0, 4.0]]);
        assert_eq!(images[1].index, 1);
        assert_eq!(images[1].grid, array![[5.0_f32, 6.0], [7.0, 8.0]]);
    }

    #[test]
    fn test_shape_mismatch_before_rendering() {
        let x = array![[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]];
        let mut sink = MemorySink::new();

        let err = plot_grid(x.view(), 2, 4, &PlotOptions::default(), &mut sink).unwrap_err();

        assert!(matches!(err, Error::ShapeMismatch { d1: 2, d2: 4, d: 6 }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_shape_mismatch_regardless_of_row_count() {
        for n in [0, 1, 5] {
            let x = Array2::<f32>::zeros((n, 9));
            let mut sink = MemorySink::new();
            assert!(plot_grid(x.view(), 2, 4, &PlotOptions::default(), &mut sink).is_err());
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn test_empty_matrix() {
        let x = Array2::<f32>::zeros((0, 6));
        let mut sink = MemorySink::new();

        let count = plot_grid(x.view(), 2, 3, &PlotOptions::default(), &mut sink).unwrap();

        assert_eq!(count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_row_index_matches_source_row() {
        let x = Array2::from_shape_fn((7, 4), |(i, _)| i as f32);
        let mut sink = MemorySink::new();

        plot_grid(x.view(), 1, 4, &PlotOptions::default(), &mut sink).unwrap();

        for (i, image) in sink.images().iter().enumerate() {
            assert_eq!(image.index, i);
            assert!(image.grid.iter().all(|&v| v == i as f32));
        }
    }

    #[test]
    fn test_order_changes_pixels() {
        let x = array![[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]];

        let mut c = MemorySink::new();
        plot_grid(x.view(), 2, 3, &PlotOptions::default(), &mut c).unwrap();

        let options = PlotOptions {
            order: Order::ColumnMajor,
            ..PlotOptions::default()
        };
        let mut f = MemorySink::new();
        plot_grid(x.view(), 2, 3, &options, &mut f).unwrap();

        assert_ne!(c.images()[0].grid, f.images()[0].grid);
        assert_eq!(f.images()[0].grid, array![[1.0_f32, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_title_reaches_every_frame() {
        let x = Array2::<f32>::zeros((3, 4));
        let mut sink = MemorySink::new();

        plot_grid(x.view(), 2, 2, &PlotOptions::titled("digits"), &mut sink).unwrap();

        assert!(sink.images().iter().all(|image| image.title == "digits"));
    }

    #[test]
    fn test_sink_error_aborts() {
        struct FailAt(usize, usize);

        impl ImageSink for FailAt {
            fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
                if frame.index == self.0 {
                    return Err(Error::InvalidParameter {
                        name: "frame".to_string(),
                        reason: "rejected".to_string(),
                    });
                }
                self.1 += 1;
                Ok(())
            }
        }

        let x = Array2::<f32>::zeros((4, 4));
        let mut sink = FailAt(2, 0);

        assert!(plot_grid(x.view(), 2, 2, &PlotOptions::default(), &mut sink).is_err());
        assert_eq!(sink.1, 2);
    }
}
