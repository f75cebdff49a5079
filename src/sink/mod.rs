//! Destinations for rendered grids.
//!
//! [`plot_grid`](crate::plot_grid) never draws on its own: it hands each
//! reshaped row to an [`ImageSink`] as a [`Frame`]. A sink may keep the grid
//! in memory, encode it to a file, or collect it into a larger sheet.

mod montage;
mod png;

pub use montage::MontageSink;
pub use png::PngSink;

use ndarray::ArrayView2;

use crate::error::Result;
use crate::grid::Grid;

/// One reshaped row on its way to a sink.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Row index in the source matrix.
    pub index: usize,

    /// Caller supplied title, possibly empty.
    pub title: &'a str,

    /// The `d1 x d2` grid for this row.
    pub grid: ArrayView2<'a, f32>,
}

impl Frame<'_> {
    /// Human readable label: `"<title> #<index>"`, or `"#<index>"` without a title.
    #[must_use]
    pub fn label(&self) -> String {
        if self.title.is_empty() {
            format!("#{}", self.index)
        } else {
            format!("{} #{}", self.title, self.index)
        }
    }
}

/// A surface that rendered grids are sent to.
pub trait ImageSink {
    /// Render a single frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be rendered or stored.
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Called once after the last frame of a plot.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered output cannot be written.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ImageSink + ?Sized> ImageSink for &mut S {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        (**self).render(frame)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// An owned copy of a rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub index: usize,
    pub title: String,
    pub grid: Grid,
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    images: Vec<RenderedImage>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames received so far, in arrival order.
    #[must_use]
    pub fn images(&self) -> &[RenderedImage] {
        &self.images
    }

    #[must_use]
    pub fn into_images(self) -> Vec<RenderedImage> {
        self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSink for MemorySink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.images.push(RenderedImage {
            index: frame.index,
            title: frame.title.to_string(),
            grid: frame.grid.to_owned(),
        });
        Ok(())
    }
}

/// File name stem derived from a title: lowercase `[a-z0-9_-]`, `grid` if empty.
pub(crate) fn file_stem(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect();
    let slug = slug.trim_matches('_');

    if slug.is_empty() {
        "grid".to_string()
    } else {
        slug.to_string()
    }
}
