//! All frames of a plot tiled into a single sheet.

use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, Luma};

use crate::error::{Error, Result};
use crate::image::{render_gray, RenderOptions};

use super::{Frame, ImageSink};

/// Gutter between tiles, in pixels.
const TILE_GAP: u32 = 2;

/// Sheet background.
const BACKGROUND: Luma<u8> = Luma([255]);

/// Sink that collects frames and writes them as one tiled PNG on `finish`.
///
/// Tiles are laid out row by row, `ceil(sqrt(n))` per row.
#[derive(Debug)]
pub struct MontageSink {
    path: PathBuf,
    options: RenderOptions,
    tiles: Vec<GrayImage>,
}

impl MontageSink {
    /// Create a sink writing the sheet to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn new<P: AsRef<Path>>(path: P, options: RenderOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            options,
            tiles: Vec::new(),
        })
    }

    /// Output path of the sheet.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames waiting for `finish`.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tiles.len()
    }

    /// Tile the pending frames into one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet would not fit in `u32` pixels.
    fn compose(&self) -> Result<GrayImage> {
        let count = self.tiles.len();
        let columns = grid_columns(count);
        let rows = count.div_ceil(columns);

        let tile_width = self.tiles.iter().map(GrayImage::width).max().unwrap_or(0);
        let tile_height = self.tiles.iter().map(GrayImage::height).max().unwrap_or(0);

        let extent = |cells: usize, tile: u32| -> Option<u32> {
            let cells = u32::try_from(cells).ok()?;
            cells
                .checked_mul(tile.checked_add(TILE_GAP)?)?
                .checked_add(TILE_GAP)
        };
        let (Some(width), Some(height)) = (extent(columns, tile_width), extent(rows, tile_height))
        else {
            return Err(Error::UnsupportedDimensions {
                width: columns,
                height: rows,
                reason: "montage too large".to_string(),
            });
        };

        let mut sheet = GrayImage::from_pixel(width, height, BACKGROUND);
        for (i, tile) in self.tiles.iter().enumerate() {
            let x = TILE_GAP + (i % columns) as u32 * (tile_width + TILE_GAP);
            let y = TILE_GAP + (i / columns) as u32 * (tile_height + TILE_GAP);
            imageops::replace(&mut sheet, tile, i64::from(x), i64::from(y));
        }

        Ok(sheet)
    }
}

impl ImageSink for MontageSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.tiles.push(render_gray(frame.grid, &self.options)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.tiles.is_empty() {
            tracing::debug!("No frames, skipping montage {}", self.path.display());
            return Ok(());
        }

        let sheet = self.compose()?;
        sheet.save(&self.path).map_err(|source| Error::ImageSave {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            "Wrote montage of {} frames to {}",
            self.tiles.len(),
            self.path.display()
        );
        self.tiles.clear();
        Ok(())
    }
}

/// Columns of a near-square layout for `count` tiles.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn grid_columns(count: usize) -> usize {
    let mut columns = (count as f64).sqrt() as usize;
    while columns * columns < count {
        columns += 1;
    }
    columns.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{plot_grid, PlotOptions};
    use ndarray::Array2;

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(2), 2);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(10), 4);
    }

    #[test]
    fn test_writes_single_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        let options = RenderOptions {
            scale: 2,
            ..RenderOptions::default()
        };
        let mut sink = MontageSink::new(&path, options).unwrap();
        let x = Array2::from_shape_fn((5, 6), |(i, j)| (i * 6 + j) as f32);

        let count = plot_grid(x.view(), 2, 3, &PlotOptions::default(), &mut sink).unwrap();

        assert_eq!(count, 5);
        assert_eq!(sink.pending(), 0);

        // 5 tiles of 6x4 pixels in 3 columns and 2 rows.
        let sheet = image::open(&path).unwrap().to_luma8();
        assert_eq!(sheet.dimensions(), (3 * 8 + 2, 2 * 6 + 2));
        assert_eq!(sheet.get_pixel(0, 0)[0], 255);
        assert_eq!(sheet.get_pixel(TILE_GAP, TILE_GAP)[0], 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_plot_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        let mut sink = MontageSink::new(&path, RenderOptions::default()).unwrap();
        let x = Array2::<f32>::zeros((0, 4));

        plot_grid(x.view(), 2, 2, &PlotOptions::default(), &mut sink).unwrap();

        assert!(!path.exists());
    }
}
