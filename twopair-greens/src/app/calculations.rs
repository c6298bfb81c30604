// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Calculations
//!
//! Delegated functions from `App` which run one calculation on a structure and write the results
//! to the output directory
//!

use super::{
    configuration::CacheKind, error::AppError, Calculation, Configuration, Structure,
};
use crate::{
    greens_functions::{
        methods::aggregate, DiskCache, InMemoryCache, RecursionContext,
        RecursionContextBuilder, TransferCache,
    },
    interaction::InteractionBuilder,
    persistence::{write_columns, write_complex_matrix, write_real_matrix},
    postprocessor::localization_length,
    spectral::EnergySpace,
};
use nalgebra::DMatrix;
use num_complex::Complex;
use std::path::Path;
use twopair_lattice::SectorTable;

pub(crate) fn run_calculation(
    calculation: Calculation,
    config: &Configuration,
    structure: &Structure,
) -> Result<(), AppError> {
    let lattice = structure.lattice()?;
    let sectors = SectorTable::build(&lattice)?;
    let interaction = InteractionBuilder::default()
        .with_lattice(&lattice)
        .with_interaction_data(&structure.interaction)
        .build()?;
    let context = RecursionContextBuilder::default()
        .with_lattice(&lattice)
        .with_sectors(&sectors)
        .with_interaction(&interaction)
        .with_solver(config.solver.dense_solver())
        .build()?;
    let energies = structure.energy_space()?;
    let output = config.output.directory.as_path();
    std::fs::create_dir_all(output)?;

    tracing::info!(
        "{} sites, {} two-particle states, interaction range {}",
        lattice.number_of_sites(),
        sectors.number_of_pairs(),
        context.max_distance()
    );

    match calculation {
        Calculation::DensityOfState => density_of_state(&context, structure, &energies, output),
        Calculation::DensityOfStateAll => {
            let densities = aggregate::density_of_state_all(
                &context,
                &energies,
                config.density_of_state.edge_margin,
            )?;
            for (index, density) in densities.iter().enumerate() {
                write_real_matrix(output.join(format!("dos_{}.txt", index)), density)?;
            }
            Ok(())
        }
        Calculation::GreensFunction => {
            let mut cache = build_cache(config)?;
            let values = aggregate::greens_function(
                &context,
                &structure.final_state()?,
                &structure.initial()?,
                &energies,
                cache.as_mut(),
            )?;
            // One row per energy
            let values = DMatrix::from_iterator(
                values.len(),
                1,
                values
                    .into_iter()
                    .map(|value| value.unwrap_or_else(|_| Complex::new(f64::NAN, f64::NAN))),
            );
            write_complex_matrix(output.join("gf.txt"), &values)?;
            cache.clear()?;
            Ok(())
        }
        Calculation::AllGreensFunctions => {
            let mut cache = build_cache(config)?;
            let matrices = aggregate::all_greens_functions(
                &context,
                &structure.initial()?,
                &energies,
                cache.as_mut(),
            )?;
            for (index, matrix) in matrices.into_iter().enumerate() {
                if let Ok(matrix) = matrix {
                    write_complex_matrix(output.join(format!("gf_{}.txt", index)), &matrix)?;
                }
            }
            cache.clear()?;
            Ok(())
        }
        Calculation::LocalizationLength => {
            let mut cache = build_cache(config)?;
            let initial = structure.localization_initial()?;
            tracing::info!("Localization scan from {}", initial);
            let matrices =
                aggregate::all_greens_functions(&context, &initial, &energies, cache.as_mut())?;
            for (index, matrix) in matrices.into_iter().enumerate() {
                if let Ok(matrix) = matrix {
                    let points = localization_length(&matrix, &initial)?;
                    let distances: Vec<f64> =
                        points.iter().map(|point| point.distance as f64).collect();
                    let lengths: Vec<f64> = points.iter().map(|point| point.length).collect();
                    write_columns(
                        output.join(format!("localization_{}.txt", index)),
                        &distances,
                        &lengths,
                    )?;
                }
            }
            cache.clear()?;
            Ok(())
        }
    }
}

fn density_of_state(
    context: &RecursionContext,
    structure: &Structure,
    energies: &EnergySpace,
    output: &Path,
) -> Result<(), AppError> {
    let densities = aggregate::density_of_state(context, &structure.initial()?, energies)?;
    let failures = densities.iter().filter(|density| density.is_err()).count();
    if failures > 0 {
        tracing::warn!("{} of {} energies failed", failures, densities.len());
    }
    let densities: Vec<f64> = densities
        .into_iter()
        .map(|density| density.unwrap_or(f64::NAN))
        .collect();
    write_columns(output.join("dos.txt"), &energies.real_parts(), &densities)?;
    Ok(())
}

fn build_cache(config: &Configuration) -> Result<Box<dyn TransferCache>, AppError> {
    Ok(match config.cache.kind {
        CacheKind::Memory => Box::new(InMemoryCache::new()),
        CacheKind::Disk => {
            tracing::info!("Caching transfer matrices in {:?}", config.cache.directory);
            Box::new(DiskCache::new(&config.cache.directory)?)
        }
    })
}
