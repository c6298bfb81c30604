// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::greens_functions::{RecursionContext, RecursionError};
use nalgebra::DMatrix;
use num_complex::Complex;
use twopair_lattice::{Basis, LatticeError};

/// The two-particle Hamiltonian over all states, indexed by `SectorTable::global_index`
pub fn two_particle_hamiltonian(context: &RecursionContext) -> DMatrix<f64> {
    let sectors = context.sectors();
    let interaction = context.interaction();
    let size = sectors.number_of_pairs();
    let mut hamiltonian = DMatrix::zeros(size, size);
    for (col, pair) in sectors.pairs().enumerate() {
        hamiltonian[(col, col)] = interaction.local_energy(pair);
        for neighbour in context.neighbours(pair) {
            if let Some(row) = sectors.global_index(&neighbour) {
                hamiltonian[(row, col)] = interaction.hop(pair, &neighbour);
            }
        }
    }
    hamiltonian
}

/// The full resolvent `(z - H)^{-1}`
pub fn resolvent(
    context: &RecursionContext,
    energy: Complex<f64>,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let hamiltonian = two_particle_hamiltonian(context).map(Complex::from);
    let size = hamiltonian.nrows();
    let identity = DMatrix::identity(size, size);
    context
        .solver()
        .solve(&(&identity * energy - hamiltonian), &identity)
        .ok_or(RecursionError::SingularResolvent)
}

/// A single element `<final|(z - H)^{-1}|initial>` of the resolvent
pub fn greens_function_element(
    context: &RecursionContext,
    final_state: &Basis,
    initial: &Basis,
    energy: Complex<f64>,
) -> Result<Complex<f64>, RecursionError> {
    let index = |pair: &Basis| {
        context
            .sectors()
            .global_index(pair)
            .ok_or(LatticeError::PairOffLattice {
                pair: *pair,
                x_max: context.lattice().x_max(),
            })
    };
    let row = index(final_state)?;
    let col = index(initial)?;
    Ok(resolvent(context, energy)?[(row, col)])
}
