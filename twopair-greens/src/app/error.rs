// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub(crate) enum AppError {
    #[error(transparent)]
    #[diagnostic(code(twopair::io_error))]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(code(twopair::config_error))]
    ConfigError(#[from] config::ConfigError),
    #[error("the structure file has no `{0}` entry in its [sites] section")]
    MissingSites(&'static str),
    #[error(transparent)]
    Lattice(#[from] twopair_lattice::LatticeError),
    #[error(transparent)]
    Interaction(#[from] crate::interaction::InteractionError),
    #[error(transparent)]
    Spectral(#[from] crate::spectral::SpectralError),
    #[error(transparent)]
    Recursion(#[from] crate::greens_functions::RecursionError),
    #[error(transparent)]
    Persistence(#[from] crate::error::PersistenceError),
    #[error(transparent)]
    PostProcessor(#[from] crate::postprocessor::PostProcessorError),
}
