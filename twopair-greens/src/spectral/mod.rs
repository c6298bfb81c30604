// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Spectral
//!
//! The complex energies at which Green's functions are evaluated. Every point carries a small
//! positive imaginary part, so the resolvent is the retarded one.

mod energy;

pub use energy::{EnergySpace, EnergySpaceBuilder};

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq)]
pub enum SpectralError {
    #[error("an energy grid needs at least one point")]
    Empty,
    #[error("the energy range {start}..{end} is not ordered")]
    UnorderedRange { start: f64, end: f64 },
    #[error("the broadening must be positive and finite, got {0}")]
    InvalidBroadening(f64),
}
