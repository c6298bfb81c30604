// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

/// This module governs the high-level implementation of the simulation
mod calculations;
mod configuration;
mod error;
mod structure;
mod telemetry;

pub(crate) use configuration::Configuration;
pub(crate) use structure::Structure;

use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long)]
    calculation: Calculation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Info,
    Debug,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum Calculation {
    /// Local density of state of the initial pair over the energy grid
    DensityOfState,
    /// Local density of state of every pair away from the lattice edges
    DensityOfStateAll,
    /// Green's function between the initial and final pairs
    GreensFunction,
    /// Green's function from the initial pair to every pair
    AllGreensFunctions,
    /// Decay of the Green's function of a rigidly translated pair
    LocalizationLength,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    let config = Configuration::build()?;
    std::fs::create_dir_all(&config.output.directory)?;
    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &config.output.directory);
    telemetry::init_subscriber(subscriber)?;

    tracing::info!("calculation: {:?}", cli.calculation);
    tracing::info!("path: {:?}", cli.file_path);

    let path = cli
        .file_path
        .ok_or(eyre!("A structure file needs to be passed."))?;
    let structure = Structure::build(path)?;

    calculations::run_calculation(cli.calculation, &config, &structure)?;
    Ok(())
}
