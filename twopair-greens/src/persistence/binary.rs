// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Matrix files are laid out as
//!
//! ```text
//! b"TPGM" | element tag: u8 | rows: u64 LE | cols: u64 LE | elements, row-major, LE
//! ```
//!
//! Real elements are a single `f64`, complex elements an `(re, im)` pair of `f64`.

use crate::error::PersistenceError;
use nalgebra::{DMatrix, Scalar};
use num_complex::Complex;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

const MAGIC: &[u8; 4] = b"TPGM";

/// A matrix element which can be written to and read from the binary store
pub trait BinaryElement: Scalar + Copy {
    /// Identifies the element type in the file header
    const TAG: u8;
    /// Bytes occupied by one element
    const WIDTH: usize;
    fn write_le(&self, buffer: &mut Vec<u8>);
    fn read_le(bytes: &[u8]) -> Self;
}

fn f64_from_le(bytes: &[u8]) -> f64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    f64::from_le_bytes(word)
}

impl BinaryElement for f64 {
    const TAG: u8 = 0;
    const WIDTH: usize = 8;

    fn write_le(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        f64_from_le(bytes)
    }
}

impl BinaryElement for Complex<f64> {
    const TAG: u8 = 1;
    const WIDTH: usize = 16;

    fn write_le(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.re.to_le_bytes());
        buffer.extend_from_slice(&self.im.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        Complex::new(f64_from_le(&bytes[..8]), f64_from_le(&bytes[8..16]))
    }
}

/// Write `matrix` to `path`, replacing any existing file
pub fn save_matrix<T: BinaryElement>(
    path: impl AsRef<Path>,
    matrix: &DMatrix<T>,
) -> Result<(), PersistenceError> {
    let mut buffer = Vec::with_capacity(21 + matrix.len() * T::WIDTH);
    buffer.extend_from_slice(MAGIC);
    buffer.push(T::TAG);
    buffer.extend_from_slice(&(matrix.nrows() as u64).to_le_bytes());
    buffer.extend_from_slice(&(matrix.ncols() as u64).to_le_bytes());
    for row in matrix.row_iter() {
        for element in row.iter() {
            element.write_le(&mut buffer);
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&buffer)?;
    writer.flush()?;
    Ok(())
}

/// Read a matrix written by `save_matrix`. The element type must match the stored one.
pub fn load_matrix<T: BinaryElement>(path: impl AsRef<Path>) -> Result<DMatrix<T>, PersistenceError> {
    let path = path.as_ref();
    let corrupt = |reason: &str| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    if bytes.len() < 21 || &bytes[..4] != MAGIC {
        return Err(corrupt("missing header"));
    }
    if bytes[4] != T::TAG {
        return Err(corrupt("element type does not match"));
    }
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[5..13]);
    let rows = u64::from_le_bytes(word) as usize;
    word.copy_from_slice(&bytes[13..21]);
    let cols = u64::from_le_bytes(word) as usize;

    let body = &bytes[21..];
    if Some(body.len()) != rows.checked_mul(cols).and_then(|n| n.checked_mul(T::WIDTH)) {
        return Err(corrupt("length does not match the stored dimensions"));
    }
    let elements: Vec<T> = body.chunks_exact(T::WIDTH).map(T::read_le).collect();
    Ok(DMatrix::from_row_slice(rows, cols, &elements))
}
