// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Post-processing
//!
//! Observables derived from two-particle Green's functions

use miette::Diagnostic;
use nalgebra::DMatrix;
use num_complex::Complex;
use twopair_lattice::Basis;

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum PostProcessorError {
    #[error("expected a square Green's function matrix, found {rows}x{cols}")]
    InconsistentDimensions { rows: usize, cols: usize },
    #[error("the initial state {0} lies outside the Green's function matrix")]
    InitialOutOfRange(Basis),
}

/// The local density of state `-Im(G) / π`
pub fn density_of_state(greens_function: Complex<f64>) -> f64 {
    -greens_function.im / std::f64::consts::PI
}

/// A single-realisation estimate of the two-particle localization length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalizationPoint {
    /// `|n - m|`, the distance travelled by the pair
    pub distance: usize,
    /// `-|n - m| / ln|G(m, m + a)|`
    pub length: f64,
}

/// Follows the decay of the Green's function of a pair `(n, n + a)` as the pair is translated
/// rigidly to `(m, m + a)`.
///
/// `greens_function` is the symmetric matrix produced by `all_greens_functions`, indexed by the
/// two sites of the final state. Points are ordered by `m` and `m = n` is skipped.
pub fn localization_length(
    greens_function: &DMatrix<Complex<f64>>,
    initial: &Basis,
) -> Result<Vec<LocalizationPoint>, PostProcessorError> {
    let (rows, cols) = greens_function.shape();
    if rows != cols {
        return Err(PostProcessorError::InconsistentDimensions { rows, cols });
    }
    if initial[1] >= rows {
        return Err(PostProcessorError::InitialOutOfRange(*initial));
    }
    let n = initial[0];
    let separation = initial.separation();

    Ok((0..rows - separation)
        .filter(|&m| m != n)
        .map(|m| {
            let distance = if m > n { m - n } else { n - m };
            let magnitude = greens_function[(m, m + separation)].norm();
            LocalizationPoint {
                distance,
                length: -(distance as f64) / magnitude.ln(),
            }
        })
        .collect())
}
