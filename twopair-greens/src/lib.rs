// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Twopair-greens computes two-particle Green's functions of disordered chains
//!
//! # Overview
//! Two particles hop on a one-dimensional tight-binding lattice with disordered on-site energies,
//! hopping amplitudes and pair interactions, all decaying as the cube of the distance and cut off
//! beyond a maximum range. The resolvent `(z - H)^{-1}` of the two-particle Hamiltonian gives the
//! local density of state and, through the decay of its off-diagonal elements, the two-particle
//! localization length.
//!
//! The number of two-particle states grows as the square of the chain length, so the resolvent is
//! never formed directly. States are grouped into sectors of constant site-index sum, in which the
//! Hamiltonian is block tridiagonal, and the required elements are found by eliminating blocks
//! from both ends of the chain towards the block holding the initial state.
//!
//! # Usage
//! Twopair-greens is intended to be run from the command line. To run the software first define
//! a structure in a `.toml` file:
//!
//! ```toml
//! [lattice]
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
//!
//! and pass it with the calculation to run, for example `--calculation density-of-state`.

#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Error handling
mod error;

/// Greens function methods
pub mod greens_functions;

/// Site couplings of the two-particle Hamiltonian
pub mod interaction;

/// Binary and text storage of matrices
pub mod persistence;

/// Computes quantities of interest from Greens functions, such as the density of state
pub mod postprocessor;

/// Discrete energy spaces
pub mod spectral;

/// Helper functions and traits
mod utilities;

pub use error::PersistenceError;
