// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::PersistenceError;
use nalgebra::DMatrix;
use num_complex::Complex;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Writes one `row col value` line per element, row-major
pub fn write_real_matrix(
    path: impl AsRef<Path>,
    matrix: &DMatrix<f64>,
) -> Result<(), PersistenceError> {
    let mut file = BufWriter::new(File::create(path)?);
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            writeln!(file, "{} {} {:e}", row, col, matrix[(row, col)])?;
        }
    }
    file.flush()?;
    Ok(())
}

/// Writes one `row col re im` line per element, row-major
pub fn write_complex_matrix(
    path: impl AsRef<Path>,
    matrix: &DMatrix<Complex<f64>>,
) -> Result<(), PersistenceError> {
    let mut file = BufWriter::new(File::create(path)?);
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            let value = matrix[(row, col)];
            writeln!(file, "{} {} {:e} {:e}", row, col, value.re, value.im)?;
        }
    }
    file.flush()?;
    Ok(())
}

/// Writes paired `x y` columns
pub fn write_columns(
    path: impl AsRef<Path>,
    x: &[f64],
    y: &[f64],
) -> Result<(), PersistenceError> {
    let mut file = BufWriter::new(File::create(path)?);
    for (x, y) in x.iter().zip(y) {
        writeln!(file, "{:e} {:e}", x, y)?;
    }
    file.flush()?;
    Ok(())
}
