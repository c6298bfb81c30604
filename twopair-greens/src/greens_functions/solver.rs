// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::utilities::matrices::{is_finite, relative_residual};
use nalgebra::DMatrix;
use num_complex::Complex;
use serde::Deserialize;

/// Dense factorisation used for the block solves
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Column-pivoted QR, falling back to `FullPivLu` when its solution is rejected
    ColPivQr,
    /// Fully pivoted LU only
    FullPivLu,
}

impl Default for SolverMethod {
    fn default() -> Self {
        SolverMethod::ColPivQr
    }
}

/// Solves the square systems `AX = B` met in the recursion.
///
/// A solution is accepted only when it is finite and its relative residual is below
/// `residual_tolerance`. A `None` return marks the block as singular for practical purposes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenseSolver {
    method: SolverMethod,
    residual_tolerance: f64,
}

impl Default for DenseSolver {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            residual_tolerance: 1e-8,
        }
    }
}

impl DenseSolver {
    pub fn new(method: SolverMethod, residual_tolerance: f64) -> Self {
        Self {
            method,
            residual_tolerance,
        }
    }

    pub fn method(&self) -> SolverMethod {
        self.method
    }

    pub fn residual_tolerance(&self) -> f64 {
        self.residual_tolerance
    }

    pub fn solve(
        &self,
        lhs: &DMatrix<Complex<f64>>,
        rhs: &DMatrix<Complex<f64>>,
    ) -> Option<DMatrix<Complex<f64>>> {
        if !lhs.is_square() || lhs.nrows() != rhs.nrows() {
            return None;
        }
        if lhs.nrows() == 0 || rhs.ncols() == 0 {
            return Some(DMatrix::zeros(lhs.ncols(), rhs.ncols()));
        }
        match self.method {
            SolverMethod::ColPivQr => self
                .accept(lhs, rhs, lhs.clone().col_piv_qr().solve(rhs))
                .or_else(|| {
                    tracing::debug!("QR solution rejected, retrying with full pivoting");
                    self.full_piv_lu(lhs, rhs)
                }),
            SolverMethod::FullPivLu => self.full_piv_lu(lhs, rhs),
        }
    }

    fn full_piv_lu(
        &self,
        lhs: &DMatrix<Complex<f64>>,
        rhs: &DMatrix<Complex<f64>>,
    ) -> Option<DMatrix<Complex<f64>>> {
        self.accept(lhs, rhs, lhs.clone().full_piv_lu().solve(rhs))
    }

    fn accept(
        &self,
        lhs: &DMatrix<Complex<f64>>,
        rhs: &DMatrix<Complex<f64>>,
        candidate: Option<DMatrix<Complex<f64>>>,
    ) -> Option<DMatrix<Complex<f64>>> {
        candidate.filter(|solution| {
            is_finite(solution) && relative_residual(lhs, solution, rhs) <= self.residual_tolerance
        })
    }
}

#[cfg(test)]
mod test {
    use super::{DenseSolver, SolverMethod};
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;
    use num_complex::Complex;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_system(size: usize, columns: usize) -> (DMatrix<Complex<f64>>, DMatrix<Complex<f64>>) {
        let mut rng = StdRng::seed_from_u64(7);
        let mut lhs = DMatrix::from_fn(size, size, |_, _| {
            Complex::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
        });
        for i in 0..size {
            lhs[(i, i)] += Complex::new(size as f64, 0.);
        }
        let rhs = DMatrix::from_fn(size, columns, |_, _| Complex::new(rng.gen::<f64>(), 0.));
        (lhs, rhs)
    }

    #[test]
    fn both_methods_solve_a_well_conditioned_system() {
        let (lhs, rhs) = random_system(12, 3);
        for method in [SolverMethod::ColPivQr, SolverMethod::FullPivLu] {
            let solver = DenseSolver::new(method, 1e-10);
            let solution = solver.solve(&lhs, &rhs).unwrap();
            let product = &lhs * &solution;
            for (a, b) in product.iter().zip(rhs.iter()) {
                assert_relative_eq!(a.re, b.re, epsilon = 1e-10);
                assert_relative_eq!(a.im, b.im, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn singular_systems_are_reported() {
        let lhs = DMatrix::from_diagonal_element(3, 3, Complex::new(1., 0.))
            - DMatrix::from_fn(3, 3, |i, j| {
                if i == 2 && j == 2 {
                    Complex::new(1., 0.)
                } else {
                    Complex::new(0., 0.)
                }
            });
        let rhs = DMatrix::from_fn(3, 1, |i, _| Complex::new(i as f64, 0.));
        assert!(DenseSolver::default().solve(&lhs, &rhs).is_none());
    }

    #[test]
    fn empty_right_hand_sides_give_empty_solutions() {
        let (lhs, _) = random_system(4, 1);
        let rhs = DMatrix::zeros(4, 0);
        let solution = DenseSolver::default().solve(&lhs, &rhs).unwrap();
        assert_eq!(solution.shape(), (4, 0));
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let (lhs, _) = random_system(4, 1);
        let rhs = DMatrix::zeros(3, 1);
        assert!(DenseSolver::default().solve(&lhs, &rhs).is_none());
    }
}
