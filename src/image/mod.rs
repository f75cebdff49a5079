//! Grayscale rendering of grids.

mod render;

pub use render::{render_gray, RenderOptions, ValueRange};

/// Default pixel block size for each grid cell.
pub const DEFAULT_SCALE: u32 = 8;

/// Number of gray levels in the colormap.
pub const GRAY_LEVELS: u32 = 256;
