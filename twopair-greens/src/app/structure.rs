// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The structure file describing a single calculation
//!
//! ```toml
//! [lattice]
//! dimension = "d1"
//! x_max = 40
//!
//! [interaction]
//! onsite_energy = 1.0
//! hopping = 1.0
//! dynamic = 1.0
//! random_onsite = true
//! max_distance = 2
//! seed = 3
//!
//! [spectral]
//! minimum_energy = -2.0
//! maximum_energy = 2.0
//! number_of_points = 41
//! broadening = 1e-3
//!
//! [sites]
//! initial = [19, 20]
//! ```

use super::error::AppError;
use crate::interaction::InteractionData;
use crate::spectral::{EnergySpace, EnergySpaceBuilder, SpectralError};
use color_eyre::eyre::eyre;
use config::{Config, File};
use num_complex::Complex;
use serde::Deserialize;
use std::path::PathBuf;
use twopair_lattice::{Basis, Dimensionality, LatticeError, LatticeShape};

#[derive(Debug, Deserialize)]
pub(crate) struct Structure {
    pub(crate) lattice: LatticeSection,
    pub(crate) interaction: InteractionData,
    pub(crate) spectral: SpectralSection,
    pub(crate) sites: SitesSection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatticeSection {
    #[serde(default = "one_dimensional")]
    pub(crate) dimension: Dimensionality,
    pub(crate) x_max: usize,
}

fn one_dimensional() -> Dimensionality {
    Dimensionality::D1
}

/// Either an explicit list of `[re, im]` energies or a uniform grid
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SpectralSection {
    Explicit {
        energies: Vec<[f64; 2]>,
    },
    Grid {
        minimum_energy: f64,
        maximum_energy: f64,
        number_of_points: usize,
        broadening: f64,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct SitesSection {
    pub(crate) initial: [usize; 2],
    #[serde(rename = "final")]
    pub(crate) final_state: Option<[usize; 2]>,
    /// Separation `a` of the pair `(x_max / 2, x_max / 2 + a)` used for the localization scan
    pub(crate) separation: Option<usize>,
}

impl Structure {
    pub(crate) fn build(path: PathBuf) -> color_eyre::Result<Self> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        s.try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize structure: {:?}", e))
    }

    pub(crate) fn lattice(&self) -> Result<LatticeShape, LatticeError> {
        LatticeShape::new(self.lattice.dimension, self.lattice.x_max)
    }

    pub(crate) fn energy_space(&self) -> Result<EnergySpace, SpectralError> {
        match &self.spectral {
            SpectralSection::Explicit { energies } => EnergySpace::from_points(
                energies
                    .iter()
                    .map(|[re, im]| Complex::new(*re, *im))
                    .collect(),
            ),
            SpectralSection::Grid {
                minimum_energy,
                maximum_energy,
                number_of_points,
                broadening,
            } => EnergySpaceBuilder::new()
                .with_number_of_points(*number_of_points)
                .with_broadening(*broadening)
                .with_energy_range(*minimum_energy..*maximum_energy)
                .build(),
        }
    }

    pub(crate) fn initial(&self) -> Result<Basis, LatticeError> {
        Basis::try_from(self.sites.initial)
    }

    pub(crate) fn final_state(&self) -> Result<Basis, AppError> {
        let sites = self
            .sites
            .final_state
            .ok_or(AppError::MissingSites("final"))?;
        Ok(Basis::try_from(sites)?)
    }

    /// The initial state of a localization scan: `(x_max / 2, x_max / 2 + a)` when a separation
    /// is given, the initial state otherwise
    pub(crate) fn localization_initial(&self) -> Result<Basis, LatticeError> {
        match self.sites.separation {
            Some(separation) => {
                let n = self.lattice.x_max / 2;
                Basis::new(n, n + separation)
            }
            None => self.initial(),
        }
    }
}
