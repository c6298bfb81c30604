// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Formation of the block operators of the recursion.
//!
//! A block is labelled by its first sector `K` and holds the states of sectors `K..K + d`, in
//! sector order. The operators are recomputed for every energy and never stored.

use super::RecursionContext;
use nalgebra::DMatrix;
use num_complex::Complex;
use twopair_lattice::Basis;

impl<'a> RecursionContext<'a> {
    /// The states of the block beginning at `start`, in storage order
    pub(crate) fn block_members(&self, start: usize) -> impl Iterator<Item = &'a Basis> + 'a {
        let sectors = self.sectors();
        (start..start + self.max_distance()).flat_map(move |sector| sectors.members(sector).iter())
    }

    pub(crate) fn block_size(&self, start: usize) -> usize {
        self.sectors().block_size(start, self.max_distance())
    }

    /// States reached from `pair` by moving one particle at most `max_distance` sites, staying
    /// on its own side of the partner
    pub(crate) fn neighbours(&self, pair: &'a Basis) -> impl Iterator<Item = Basis> + 'a {
        let range = self.max_distance();
        let x_max = self.lattice().x_max();
        let [first, second] = pair.sites();
        let lower = (first.saturating_sub(range)..second.min(first + range + 1))
            .filter(move |&target| target != first)
            .map(move |target| (target, second));
        let upper = ((second.saturating_sub(range)).max(first + 1)..=(second + range).min(x_max))
            .filter(move |&target| target != second)
            .map(move |target| (first, target));
        lower
            .chain(upper)
            .filter_map(|(n1, n2)| Basis::new(n1, n2).ok())
    }

    /// Elements of the two-particle Hamiltonian between the block at `row_start` and the block
    /// at `col_start`.
    pub(crate) fn hamiltonian_block(&self, row_start: usize, col_start: usize) -> DMatrix<f64> {
        let width = self.max_distance();
        let sectors = self.sectors();
        let interaction = self.interaction();
        let mut block = DMatrix::zeros(self.block_size(row_start), self.block_size(col_start));
        for (col, pair) in self.block_members(col_start).enumerate() {
            if row_start == col_start {
                block[(col, col)] = interaction.local_energy(pair);
            }
            for neighbour in self.neighbours(pair) {
                if let Some(row) = sectors.offset_in_block(row_start, width, &neighbour) {
                    block[(row, col)] = interaction.hop(pair, &neighbour);
                }
            }
        }
        block
    }

    /// `W_K = z I - H_{K,K}`
    pub fn block_w(&self, start: usize, energy: Complex<f64>) -> DMatrix<Complex<f64>> {
        let local = self.hamiltonian_block(start, start).map(Complex::from);
        DMatrix::from_diagonal_element(local.nrows(), local.ncols(), energy) - local
    }

    /// `Alpha_K = H_{K,K-d}`, with no columns for the first block
    pub fn block_alpha(&self, start: usize) -> DMatrix<Complex<f64>> {
        match start.checked_sub(self.max_distance()) {
            Some(left) if left > 0 => self.hamiltonian_block(start, left).map(Complex::from),
            _ => DMatrix::zeros(self.block_size(start), 0),
        }
    }

    /// `Beta_K = H_{K,K+d}`, with no columns past the last sector
    pub fn block_beta(&self, start: usize) -> DMatrix<Complex<f64>> {
        self.hamiltonian_block(start, start + self.max_distance())
            .map(Complex::from)
    }
}
