//! Grid to grayscale image conversion.

use image::{GrayImage, ImageBuffer, Luma};
use ndarray::ArrayView2;

use crate::error::{Error, Result};

use super::{DEFAULT_SCALE, GRAY_LEVELS};

/// Value window mapped onto the black-to-white colormap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ValueRange {
    /// Stretch each image between its own finite minimum and maximum.
    #[default]
    Auto,
    /// Clamp every image to a fixed window.
    Fixed { vmin: f32, vmax: f32 },
}

/// Options controlling how a grid becomes pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Side of the square pixel block drawn for each grid cell.
    pub scale: u32,

    /// Value window for the colormap.
    pub range: ValueRange,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            range: ValueRange::Auto,
        }
    }
}

impl RenderOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` is zero or a fixed range is empty or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(Error::InvalidParameter {
                name: "scale".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if let ValueRange::Fixed { vmin, vmax } = self.range {
            if !vmin.is_finite() || !vmax.is_finite() {
                return Err(Error::InvalidParameter {
                    name: "range".to_string(),
                    reason: "vmin and vmax must be finite".to_string(),
                });
            }
            if vmin >= vmax {
                return Err(Error::InvalidParameter {
                    name: "range".to_string(),
                    reason: format!("vmin ({vmin}) must be less than vmax ({vmax})"),
                });
            }
        }

        Ok(())
    }
}

/// Render a grid as an 8-bit grayscale image.
///
/// Cell `(i, j)` becomes the `scale x scale` block whose top-left pixel is
/// `(j * scale, i * scale)`, so the image is `d2 * scale` wide and
/// `d1 * scale` tall. Low values are black and high values white.
///
/// # Errors
///
/// Returns an error if the grid is empty or the scaled size does not fit in
/// `u32`.
pub fn render_gray(grid: ArrayView2<'_, f32>, options: &RenderOptions) -> Result<GrayImage> {
    let (height, width) = grid.dim();

    if height == 0 || width == 0 {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: "image must have at least one pixel".to_string(),
        });
    }

    let scaled = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(options.scale))
    };
    let (Some(out_width), Some(out_height)) = (scaled(width), scaled(height)) else {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: format!("too large at scale {}", options.scale),
        });
    };

    let (lo, hi) = match options.range {
        ValueRange::Auto => finite_bounds(grid),
        ValueRange::Fixed { vmin, vmax } => (vmin, vmax),
    };

    // Nearest neighbour: every output pixel samples exactly one cell.
    let scale = options.scale;
    let img = ImageBuffer::from_fn(out_width, out_height, |x, y| {
        let value = grid[[(y / scale) as usize, (x / scale) as usize]];
        Luma([gray_level(value, lo, hi)])
    });

    Ok(img)
}

/// Finite minimum and maximum of a grid, `(NaN, NaN)` when there are none.
fn finite_bounds(grid: ArrayView2<'_, f32>) -> (f32, f32) {
    grid.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f32::NAN, f32::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Map a value to a gray level in `[0, 255]`.
///
/// Non-finite values and degenerate windows render black.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::neg_cmp_op_on_partial_ord
)]
fn gray_level(value: f32, lo: f32, hi: f32) -> u8 {
    if !value.is_finite() || !(hi > lo) {
        return 0;
    }

    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    // Safe: t in [0, 1], so the product is in [0, 256] before the cap.
    ((t * GRAY_LEVELS as f32) as u32).min(GRAY_LEVELS - 1) as u8
}
