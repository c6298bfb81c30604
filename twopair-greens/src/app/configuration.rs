// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::greens_functions::{DenseSolver, SolverMethod};
use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

/// Global numerical and output settings, shared by every structure
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Configuration {
    pub(crate) solver: SolverConfiguration,
    pub(crate) cache: CacheConfiguration,
    pub(crate) output: OutputConfiguration,
    pub(crate) density_of_state: DensityOfStateConfiguration,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct SolverConfiguration {
    pub(crate) method: SolverMethod,
    pub(crate) residual_tolerance: f64,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        let solver = DenseSolver::default();
        Self {
            method: solver.method(),
            residual_tolerance: solver.residual_tolerance(),
        }
    }
}

impl SolverConfiguration {
    pub(crate) fn dense_solver(&self) -> DenseSolver {
        DenseSolver::new(self.method, self.residual_tolerance)
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CacheKind {
    Memory,
    Disk,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct CacheConfiguration {
    pub(crate) kind: CacheKind,
    /// Where a disk cache writes its matrices
    pub(crate) directory: PathBuf,
}

impl Default for CacheConfiguration {
    fn default() -> Self {
        Self {
            kind: CacheKind::Memory,
            directory: PathBuf::from("../results/cache"),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct OutputConfiguration {
    pub(crate) directory: PathBuf,
}

impl Default for OutputConfiguration {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("../results"),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct DensityOfStateConfiguration {
    /// Pairs whose site-index sum is within this many sectors of either edge are skipped
    pub(crate) edge_margin: usize,
}

impl Default for DensityOfStateConfiguration {
    fn default() -> Self {
        Self { edge_margin: 10 }
    }
}

impl Configuration {
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the simulation which we use in the general case
            .add_source(File::with_name("../.config/default").required(false))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!("../.config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}
