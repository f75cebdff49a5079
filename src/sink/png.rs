//! One PNG file per frame.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image::{render_gray, RenderOptions};

use super::{file_stem, Frame, ImageSink};

/// Sink that writes each frame to `<dir>/<stem>_<index>.png`.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    options: RenderOptions,
    written: Vec<PathBuf>,
}

impl PngSink {
    /// Create a sink writing into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the directory cannot be
    /// created.
    pub fn new<P: AsRef<Path>>(dir: P, options: RenderOptions) -> Result<Self> {
        options.validate()?;

        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| Error::OutputDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            dir,
            options,
            written: Vec::new(),
        })
    }

    /// Path a frame is written to.
    #[must_use]
    pub fn path_for(&self, frame: &Frame<'_>) -> PathBuf {
        self.dir
            .join(format!("{}_{:04}.png", file_stem(frame.title), frame.index))
    }

    /// Files written so far, in order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ImageSink for PngSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let path = self.path_for(frame);

        // The buffer lives only for this frame.
        let img = render_gray(frame.grid, &self.options)?;
        img.save(&path).map_err(|source| Error::ImageSave {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {} to {}", frame.label(), path.display());
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{plot_grid, PlotOptions};
    use ndarray::{array, Array2};

    #[test]
    fn test_writes_one_file_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path(), RenderOptions::default()).unwrap();
        let x = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];

        plot_grid(x.view(), 2, 2, &PlotOptions::titled("Digits"), &mut sink).unwrap();

        assert_eq!(
            sink.written(),
            &[
                dir.path().join("digits_0000.png"),
                dir.path().join("digits_0001.png"),
            ]
        );
        for path in sink.written() {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_written_image_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            scale: 4,
            ..RenderOptions::default()
        };
        let mut sink = PngSink::new(dir.path(), options).unwrap();
        let x = Array2::from_shape_fn((1, 6), |(_, j)| j as f32);

        plot_grid(x.view(), 2, 3, &PlotOptions::default(), &mut sink).unwrap();

        let img = image::open(&sink.written()[0]).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(11, 7)[0], 255);
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        PngSink::new(&nested, RenderOptions::default()).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_rejects_invalid_options() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            scale: 0,
            ..RenderOptions::default()
        };
        assert!(matches!(
            PngSink::new(dir.path(), options),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_output_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(
            PngSink::new(&file, RenderOptions::default()),
            Err(Error::OutputDir { .. })
        ));
    }

    #[test]
    fn test_shape_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path(), RenderOptions::default()).unwrap();
        let x = Array2::<f32>::zeros((1, 6));

        assert!(plot_grid(x.view(), 2, 4, &PlotOptions::default(), &mut sink).is_err());
        assert!(sink.written().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
