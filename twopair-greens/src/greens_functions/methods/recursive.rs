// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! This module provides the recursive elimination of the block tridiagonal system
//!
//! W_K V_K = Alpha_K V_{K-d} + Beta_K V_{K+d} + C δ(K, K_center)
//!
//! Rather than inverting `z - H` over the whole two-particle space, which scales as the cube of
//! the number of states, the blocks are eliminated one at a time from each lattice edge:
//! - The right sweep finds `A_K` with `V_K = A_K V_{K-d}`, starting from the last block where
//!   `V_{K+d}` vanishes and working down to the block right of the center
//! - The left sweep finds `ATilde_K` with `V_K = ATilde_K V_{K+d}`, starting from the first block
//!   and working up to the block left of the center
//! - The center solve folds both into a single dense system for `V_{K_center}`
//!
//! Amplitudes of any other block follow by back-substitution through the recorded transfer
//! matrices.

use crate::greens_functions::{
    CacheKey, Direction, RecursionContext, RecursionData, RecursionError, TransferCache,
};
use nalgebra::DMatrix;
use num_complex::Complex;

/// Runs the right sweep and returns `A_{K_right_stop}`.
///
/// At the last block `V_{K+d} = 0`, so `W_K A_K = Alpha_K`. Each subsequent block inwards solves
/// `(W_K - Beta_K A_{K+d}) A_K = Alpha_K`. If a cache is given every `A_K` is stored in it.
/// When the center is the last block the returned matrix has no rows.
#[tracing::instrument(name = "Right sweep", level = "debug", skip_all)]
pub fn from_right_to_center(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    mut cache: Option<&mut (dyn TransferCache + '_)>,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let stop = match data.right_stop() {
        Some(stop) => stop,
        None => return Ok(DMatrix::zeros(0, data.center_size())),
    };
    let max_distance = data.max_distance();
    let solver = context.solver();

    let mut sector = data.right_start();
    tracing::trace!("Right sweep initialised at sector {}", sector);
    let mut transfer = solver
        .solve(&context.block_w(sector, energy), &context.block_alpha(sector))
        .ok_or(RecursionError::Singular {
            sector,
            direction: Direction::Right,
        })?;
    record(&mut cache, Direction::Right, sector, &transfer)?;

    while sector > stop {
        sector -= max_distance;
        tracing::trace!("Right sweep at sector {}", sector);
        let lhs = context.block_w(sector, energy) - context.block_beta(sector) * &transfer;
        transfer = solver
            .solve(&lhs, &context.block_alpha(sector))
            .ok_or(RecursionError::Singular {
                sector,
                direction: Direction::Right,
            })?;
        record(&mut cache, Direction::Right, sector, &transfer)?;
    }
    Ok(transfer)
}

/// Runs the left sweep and returns `ATilde_{K_left_stop}`.
///
/// At the first block `V_{K-d} = 0`, so `W_K ATilde_K = Beta_K`. Each subsequent block inwards
/// solves `(W_K - Alpha_K ATilde_{K-d}) ATilde_K = Beta_K`. When the center is the first block the
/// returned matrix has no rows.
#[tracing::instrument(name = "Left sweep", level = "debug", skip_all)]
pub fn from_left_to_center(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    mut cache: Option<&mut (dyn TransferCache + '_)>,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let stop = match data.left_stop() {
        Some(stop) => stop,
        None => return Ok(DMatrix::zeros(0, data.center_size())),
    };
    let max_distance = data.max_distance();
    let solver = context.solver();

    let mut sector = data.left_start();
    tracing::trace!("Left sweep initialised at sector {}", sector);
    let mut transfer = solver
        .solve(&context.block_w(sector, energy), &context.block_beta(sector))
        .ok_or(RecursionError::Singular {
            sector,
            direction: Direction::Left,
        })?;
    record(&mut cache, Direction::Left, sector, &transfer)?;

    while sector < stop {
        sector += max_distance;
        tracing::trace!("Left sweep at sector {}", sector);
        let lhs = context.block_w(sector, energy) - context.block_alpha(sector) * &transfer;
        transfer = solver
            .solve(&lhs, &context.block_beta(sector))
            .ok_or(RecursionError::Singular {
                sector,
                direction: Direction::Left,
            })?;
        record(&mut cache, Direction::Left, sector, &transfer)?;
    }
    Ok(transfer)
}

fn record(
    cache: &mut Option<&mut (dyn TransferCache + '_)>,
    direction: Direction,
    sector: usize,
    transfer: &DMatrix<Complex<f64>>,
) -> Result<(), RecursionError> {
    if let Some(cache) = cache.as_deref_mut() {
        cache.store(CacheKey::Transfer { direction, sector }, transfer)?;
    }
    Ok(())
}

/// Solves `(W - Alpha ATilde_{K_left_stop} - Beta A_{K_right_stop}) V = C` for the amplitudes of
/// the center block, where `C` is the unit source at the initial state.
///
/// The result is a single column. Its entry at `index_for_nonzero` is the diagonal Green's
/// function, the others the Green's functions to the remaining states of the block.
pub fn solve_center(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    left: &DMatrix<Complex<f64>>,
    right: &DMatrix<Complex<f64>>,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let center = data.center();
    let mut lhs = context.block_w(center, energy);
    if data.left_stop().is_some() {
        lhs -= context.block_alpha(center) * left;
    }
    if data.right_stop().is_some() {
        lhs -= context.block_beta(center) * right;
    }
    let mut source = DMatrix::zeros(data.center_size(), 1);
    source[(data.index_for_nonzero(), 0)] = Complex::new(1., 0.);

    context
        .solver()
        .solve(&lhs, &source)
        .ok_or(RecursionError::SingularCenter { sector: center })
}

/// Both sweeps followed by the center solve
pub fn center_amplitudes(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    mut cache: Option<&mut (dyn TransferCache + '_)>,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let left = from_left_to_center(context, data, energy, cache.as_deref_mut())?;
    let right = from_right_to_center(context, data, energy, cache.as_deref_mut())?;
    solve_center(context, data, energy, &left, &right)
}

/// The diagonal Green's function `<initial|(z - H)^{-1}|initial>`
pub fn diagonal_greens_function(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
) -> Result<Complex<f64>, RecursionError> {
    let amplitudes = center_amplitudes(context, data, energy, None)?;
    Ok(amplitudes[(data.index_for_nonzero(), 0)])
}

/// Carries the center amplitudes out to the block beginning at `target`.
///
/// Blocks right of the center use the stored `A_K`, blocks to the left the stored `ATilde_K`.
pub fn propagate(
    data: &RecursionData,
    center: &DMatrix<Complex<f64>>,
    target: usize,
    cache: &dyn TransferCache,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let max_distance = data.max_distance();
    let mut amplitudes = center.clone();
    if target > data.center() {
        let mut sector = data.center() + max_distance;
        while sector <= target {
            amplitudes = load_transfer(cache, Direction::Right, sector)? * amplitudes;
            sector += max_distance;
        }
    } else if target < data.center() {
        let mut sector = data.center();
        while sector > target {
            sector -= max_distance;
            amplitudes = load_transfer(cache, Direction::Left, sector)? * amplitudes;
        }
    }
    Ok(amplitudes)
}

fn load_transfer(
    cache: &dyn TransferCache,
    direction: Direction,
    sector: usize,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    cache
        .load(CacheKey::Transfer { direction, sector })?
        .ok_or(RecursionError::MissingTransfer { direction, sector })
}

#[cfg(test)]
mod test {
    use super::{
        center_amplitudes, diagonal_greens_function, from_left_to_center, from_right_to_center,
        propagate,
    };
    use crate::greens_functions::{
        fixture::Fixture, methods::dense::resolvent, CacheKey, Direction, InMemoryCache,
        RecursionData, RecursionError, TransferCache,
    };
    use crate::interaction::InteractionData;
    use approx::assert_relative_eq;
    use num_complex::Complex;
    use twopair_lattice::Basis;

    #[test]
    fn a_two_site_chain_is_a_scalar_resolvent() {
        let fixture = Fixture::new(
            1,
            InteractionData {
                onsite_energy: 0.25,
                hopping: 1.,
                dynamic: 0.8,
                random_onsite: false,
                random_hopping: false,
                random_dynamic: false,
                max_distance: 1,
                seed: 0,
            },
        );
        let context = fixture.context();
        let initial = Basis::new(0, 1).unwrap();
        let data = RecursionData::new(&context, &initial).unwrap();
        // E_local = e(0) + e(1) + d(0, 1)
        let local_energy = 0.25 + 0.25 + 0.8;
        for energy in [
            Complex::new(-1., 0.01),
            Complex::new(0.3, 0.1),
            Complex::new(2.5, 1e-3),
        ] {
            let gf = diagonal_greens_function(&context, &data, energy).unwrap();
            let expected = Complex::new(1., 0.) / (energy - local_energy);
            assert_relative_eq!(gf.re, expected.re, max_relative = 1e-12);
            assert_relative_eq!(gf.im, expected.im, max_relative = 1e-12);
        }
    }

    #[test]
    fn center_amplitudes_match_the_dense_resolvent() {
        let energy = Complex::new(0.4, 0.05);
        for max_distance in 1..=3 {
            let fixture = Fixture::disordered(7, max_distance, 17);
            let context = fixture.context();
            let reference = resolvent(&context, energy).unwrap();
            for initial in fixture.lattice.pairs() {
                let data = RecursionData::new(&context, &initial).unwrap();
                let amplitudes = center_amplitudes(&context, &data, energy, None).unwrap();
                let col = fixture.sectors.global_index(&initial).unwrap();
                for (offset, pair) in context.block_members(data.center()).enumerate() {
                    let row = fixture.sectors.global_index(pair).unwrap();
                    let expected = reference[(row, col)];
                    assert_relative_eq!(amplitudes[(offset, 0)].re, expected.re, epsilon = 1e-9);
                    assert_relative_eq!(amplitudes[(offset, 0)].im, expected.im, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn back_substitution_reaches_every_block() {
        let energy = Complex::new(-0.2, 0.05);
        for max_distance in 1..=3 {
            let fixture = Fixture::disordered(6, max_distance, 29);
            let context = fixture.context();
            let reference = resolvent(&context, energy).unwrap();
            let initial = Basis::new(2, 4).unwrap();
            let data = RecursionData::new(&context, &initial).unwrap();
            let mut cache = InMemoryCache::new();
            let center = center_amplitudes(&context, &data, energy, Some(&mut cache)).unwrap();
            let col = fixture.sectors.global_index(&initial).unwrap();

            let mut block = 1;
            while block <= fixture.sectors.max_sector() {
                let amplitudes = propagate(&data, &center, block, &cache).unwrap();
                for (offset, pair) in context.block_members(block).enumerate() {
                    let row = fixture.sectors.global_index(pair).unwrap();
                    let expected = reference[(row, col)];
                    assert_relative_eq!(amplitudes[(offset, 0)].re, expected.re, epsilon = 1e-9);
                    assert_relative_eq!(amplitudes[(offset, 0)].im, expected.im, epsilon = 1e-9);
                }
                block += max_distance;
            }
        }
    }

    #[test]
    fn sweeps_record_every_transfer_matrix() {
        let fixture = Fixture::disordered(9, 3, 1);
        let context = fixture.context();
        let data = RecursionData::new(&context, &Basis::new(4, 5).unwrap()).unwrap();
        let energy = Complex::new(0.1, 0.02);
        let mut cache = InMemoryCache::new();

        let right = from_right_to_center(&context, &data, energy, Some(&mut cache)).unwrap();
        let left = from_left_to_center(&context, &data, energy, Some(&mut cache)).unwrap();
        // A_K for K = 16, 13, 10 and ATilde_K for K = 1, 4
        assert_eq!(cache.len(), 5);
        let stored_right = cache
            .load(CacheKey::Transfer {
                direction: Direction::Right,
                sector: 10,
            })
            .unwrap()
            .unwrap();
        assert_eq!(stored_right, right);
        assert_eq!(right.shape(), (context.block_size(10), data.center_size()));
        assert_eq!(left.shape(), (context.block_size(4), data.center_size()));
    }

    #[test]
    fn back_substitution_without_transfers_fails() {
        let fixture = Fixture::disordered(6, 2, 1);
        let context = fixture.context();
        let data = RecursionData::new(&context, &Basis::new(1, 2).unwrap()).unwrap();
        let energy = Complex::new(0.1, 0.02);
        let center = center_amplitudes(&context, &data, energy, None).unwrap();
        let result = propagate(&data, &center, 7, &InMemoryCache::new());
        assert!(matches!(
            result,
            Err(RecursionError::MissingTransfer {
                direction: Direction::Right,
                sector: 5
            })
        ));
    }
}
