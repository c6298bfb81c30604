// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Methods for aggregated Green's functions
//!
//! Each method evaluates an observable at every energy of an `EnergySpace`. Failures fall into
//! two classes: problems with the query itself, such as an initial state off the lattice, fail
//! the whole call through the outer `Result`, while a numerical failure at one energy is
//! reported in that energy's slot and the batch carries on.

use super::recursive::{center_amplitudes, diagonal_greens_function, propagate};
use crate::greens_functions::{
    CacheKey, Direction, RecursionContext, RecursionData, RecursionError, TransferCache,
};
use crate::postprocessor;
use crate::spectral::EnergySpace;
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressIterator, ProgressStyle};
use nalgebra::DMatrix;
use num_complex::Complex;
use twopair_lattice::{Basis, LatticeError};

fn progress_bar(length: usize, message: &'static str) -> ProgressBar {
    let term = Term::stdout();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let pb = ProgressBar::with_draw_target(length as u64, ProgressDrawTarget::term(term, 60));
    pb.set_style(spinner_style);
    pb.set_message(message);
    pb
}

fn report<T>(result: Result<T, RecursionError>, energy: &Complex<f64>) -> Result<T, RecursionError> {
    if let Err(e) = &result {
        tracing::warn!("Calculation failed at energy {}: {}", energy, e);
    }
    result
}

/// The local density of state of `initial` at every energy
#[tracing::instrument(name = "Density of state", level = "info", skip(context, energies))]
pub fn density_of_state(
    context: &RecursionContext,
    initial: &Basis,
    energies: &EnergySpace,
) -> Result<Vec<Result<f64, RecursionError>>, RecursionError> {
    let data = RecursionData::new(context, initial)?;
    Ok(energies
        .points()
        .progress_with(progress_bar(energies.number_of_points(), "Density of state"))
        .map(|energy| {
            tracing::info!("Solving at energy {}", energy);
            report(
                diagonal_greens_function(context, &data, *energy)
                    .map(postprocessor::density_of_state),
                energy,
            )
        })
        .collect())
}

/// The local density of state of every pair, one symmetric matrix per energy indexed by the two
/// sites of the pair.
///
/// Pairs with a site-index sum within `edge_margin` of either end of the sector range are left at
/// zero, as is the diagonal. A pair whose calculation fails is written as `NaN`.
#[tracing::instrument(name = "Density of state, all pairs", level = "info", skip(context, energies))]
pub fn density_of_state_all(
    context: &RecursionContext,
    energies: &EnergySpace,
    edge_margin: usize,
) -> Result<Vec<DMatrix<f64>>, RecursionError> {
    let lattice = context.lattice();
    let max_sector = context.sectors().max_sector();
    let sites = lattice.number_of_sites();
    let mut densities = vec![DMatrix::zeros(sites, sites); energies.number_of_points()];

    let included: Vec<Basis> = lattice
        .pairs()
        .filter(|pair| pair.sum() > edge_margin && pair.sum() + edge_margin < max_sector)
        .collect();
    tracing::info!(
        "{} of {} pairs lie outside the edge band",
        included.len(),
        context.sectors().number_of_pairs()
    );

    for pair in included
        .iter()
        .progress_with(progress_bar(included.len(), "Density of state"))
    {
        let data = RecursionData::new(context, pair)?;
        for (density, energy) in densities.iter_mut().zip(energies.points()) {
            let value = report(diagonal_greens_function(context, &data, *energy), energy)
                .map_or(f64::NAN, postprocessor::density_of_state);
            density[(pair[0], pair[1])] = value;
            density[(pair[1], pair[0])] = value;
        }
    }
    Ok(densities)
}

/// The Green's function `<final|(z - H)^{-1}|initial>` at every energy.
///
/// When the final state lies outside the center block only the transfer matrices of the sweep on
/// its side are recorded in `cache`, which is cleared before each energy.
#[tracing::instrument(name = "Green's function", level = "info", skip(context, energies, cache))]
pub fn greens_function(
    context: &RecursionContext,
    final_state: &Basis,
    initial: &Basis,
    energies: &EnergySpace,
    cache: &mut dyn TransferCache,
) -> Result<Vec<Result<Complex<f64>, RecursionError>>, RecursionError> {
    let data = RecursionData::new(context, initial)?;
    context.lattice().validate(final_state)?;
    let target = data.block_containing(final_state.sum());
    let row = context
        .sectors()
        .offset_in_block(target, data.max_distance(), final_state)
        .ok_or(LatticeError::PairOffLattice {
            pair: *final_state,
            x_max: context.lattice().x_max(),
        })?;

    Ok(energies
        .points()
        .progress_with(progress_bar(energies.number_of_points(), "Green's function"))
        .map(|energy| {
            report(
                greens_function_at(context, &data, *energy, target, row, &mut *cache),
                energy,
            )
        })
        .collect())
}

fn greens_function_at(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    target: usize,
    row: usize,
    cache: &mut dyn TransferCache,
) -> Result<Complex<f64>, RecursionError> {
    tracing::info!("Solving at energy {}", energy);
    cache.clear()?;
    let center = if target == data.center() {
        center_amplitudes(context, data, energy, None)?
    } else {
        center_amplitudes(context, data, energy, Some(&mut *cache))?
    };
    let amplitudes = propagate(data, &center, target, &*cache)?;
    Ok(amplitudes[(row, 0)])
}

/// Every element `<final|(z - H)^{-1}|initial>` for a fixed initial state, one matrix per energy
/// indexed by the two sites of the final state. The diagonal, which is not a state, is zero.
///
/// The amplitudes of every block are written to `cache` under `CacheKey::Amplitude` alongside
/// the transfer matrices, and are left there after the call.
#[tracing::instrument(name = "All Green's functions", level = "info", skip(context, energies, cache))]
pub fn all_greens_functions(
    context: &RecursionContext,
    initial: &Basis,
    energies: &EnergySpace,
    cache: &mut dyn TransferCache,
) -> Result<Vec<Result<DMatrix<Complex<f64>>, RecursionError>>, RecursionError> {
    let data = RecursionData::new(context, initial)?;
    Ok(energies
        .points()
        .progress_with(progress_bar(energies.number_of_points(), "Green's functions"))
        .map(|energy| {
            report(
                all_greens_functions_at(context, &data, *energy, &mut *cache),
                energy,
            )
        })
        .collect())
}

fn all_greens_functions_at(
    context: &RecursionContext,
    data: &RecursionData,
    energy: Complex<f64>,
    cache: &mut dyn TransferCache,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    tracing::info!("Solving at energy {}", energy);
    cache.clear()?;
    let max_distance = data.max_distance();
    let center = center_amplitudes(context, data, energy, Some(&mut *cache))?;
    cache.store(CacheKey::Amplitude { sector: data.center() }, &center)?;

    // Outwards from the center, one block at a time
    if let Some(stop) = data.right_stop() {
        let mut amplitudes = center.clone();
        let mut sector = stop;
        while sector <= data.right_start() {
            amplitudes = propagate_one(data, &amplitudes, sector, &*cache)?;
            cache.store(CacheKey::Amplitude { sector }, &amplitudes)?;
            sector += max_distance;
        }
    }
    if let Some(stop) = data.left_stop() {
        let mut amplitudes = center;
        let mut sector = stop;
        loop {
            amplitudes = propagate_one(data, &amplitudes, sector, &*cache)?;
            cache.store(CacheKey::Amplitude { sector }, &amplitudes)?;
            if sector == data.left_start() {
                break;
            }
            sector -= max_distance;
        }
    }

    let sectors = context.sectors();
    let sites = context.lattice().number_of_sites();
    let mut greens_function = DMatrix::zeros(sites, sites);
    let mut current: Option<(usize, DMatrix<Complex<f64>>)> = None;
    for pair in sectors.pairs() {
        let block = data.block_containing(pair.sum());
        if current.as_ref().map(|(sector, _)| *sector) != Some(block) {
            let amplitudes = cache
                .load(CacheKey::Amplitude { sector: block })?
                .ok_or(RecursionError::MissingAmplitude { sector: block })?;
            current = Some((block, amplitudes));
        }
        if let Some((_, amplitudes)) = &current {
            let row = sectors
                .offset_in_block(block, max_distance, pair)
                .ok_or(LatticeError::PairOffLattice {
                    pair: *pair,
                    x_max: context.lattice().x_max(),
                })?;
            greens_function[(pair[0], pair[1])] = amplitudes[(row, 0)];
            greens_function[(pair[1], pair[0])] = amplitudes[(row, 0)];
        }
    }
    Ok(greens_function)
}

/// Steps amplitudes from the neighbouring block nearer the center into the block at `sector`
fn propagate_one(
    data: &RecursionData,
    amplitudes: &DMatrix<Complex<f64>>,
    sector: usize,
    cache: &dyn TransferCache,
) -> Result<DMatrix<Complex<f64>>, RecursionError> {
    let direction = if sector > data.center() {
        Direction::Right
    } else {
        Direction::Left
    };
    let transfer = cache
        .load(CacheKey::Transfer { direction, sector })?
        .ok_or(RecursionError::MissingTransfer { direction, sector })?;
    Ok(transfer * amplitudes)
}
