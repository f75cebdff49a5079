//! Loading sample matrices from disk.

use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array2;
use ndarray_npy::read_npy;

use crate::error::{Error, Result};
use crate::grid::Matrix;

/// Load a 2-D matrix, picking the format from the file extension.
///
/// * `npy` - NumPy array of `f32` or `f64`.
/// * `tsv` - tab separated values, no header.
/// * anything else - comma separated values, no header.
///
/// An empty text file yields a `0 x 0` matrix.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a rectangular
/// numeric matrix.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_lowercase();

    let matrix = match extension.as_str() {
        "npy" => load_npy(path)?,
        "tsv" => load_delimited(path, b'\t')?,
        _ => load_delimited(path, b',')?,
    };

    tracing::info!(
        "Loaded {}x{} matrix from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(matrix)
}

/// Read an `.npy` file holding `f32` or `f64` values.
#[allow(clippy::cast_possible_truncation)]
fn load_npy(path: &Path) -> Result<Matrix> {
    match read_npy::<_, Array2<f32>>(path) {
        Ok(matrix) => Ok(matrix),
        Err(first) => {
            tracing::debug!("Not an f32 array ({first}), trying f64");
            read_npy::<_, Array2<f64>>(path)
                .map(|matrix| matrix.mapv(|v| v as f32))
                .map_err(|_| Error::Npy {
                    path: path.to_path_buf(),
                    source: first,
                })
        }
    }
}

/// Read headerless delimited text into a rectangular matrix.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Matrix> {
    let csv_error = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut values = Vec::new();
    let mut columns = None;
    let mut rows = 0;

    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(i + 1, |p| p.line() as usize);

        let expected = *columns.get_or_insert(record.len());
        if record.len() != expected {
            return Err(Error::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected,
                actual: record.len(),
            });
        }

        for (column, field) in record.iter().enumerate() {
            let value = field.parse::<f32>().map_err(|_| Error::ParseValue {
                path: path.to_path_buf(),
                line,
                column: column + 1,
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    let columns = columns.unwrap_or(0);
    Array2::from_shape_vec((rows, columns), values).map_err(|_| Error::RaggedRow {
        path: path.to_path_buf(),
        line: rows,
        expected: columns,
        actual: 0,
    })
}
