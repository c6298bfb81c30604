// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Green's Functions
//!
//! Two-particle Green's functions of a chain, found by recursive block elimination.
//!
//! The two-particle states are grouped into sectors of constant site-index sum. Hops of at most
//! `max_distance` sites only couple sectors whose sums differ by at most `max_distance`, so
//! grouping `max_distance` consecutive sectors into a block leaves `(z - H) G = 1` block
//! tridiagonal:
//!
//! W_K V_K = Alpha_K V_{K-d} + Beta_K V_{K+d} + C δ(K, K_center)
//!
//! The system is eliminated from both lattice edges towards the block holding the initial state,
//! leaving a single dense solve for the amplitudes of the center block. Amplitudes anywhere else
//! follow by multiplying through the transfer matrices recorded on the way in.

mod blocks;
mod cache;
mod context;
#[cfg(test)]
pub(crate) mod fixture;
/// Orchestration and solution methods
pub mod methods;
mod setup;
mod solver;

pub use cache::{CacheKey, DiskCache, InMemoryCache, TransferCache};
pub use context::{RecursionContext, RecursionContextBuilder};
pub use setup::RecursionData;
pub use solver::{DenseSolver, SolverMethod};

use crate::error::PersistenceError;
use miette::Diagnostic;
use twopair_lattice::LatticeError;

/// The side of the center block a sweep starts from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for the recursive solution
pub enum RecursionError {
    #[error("{0}")]
    Lattice(#[from] LatticeError),
    #[error("inconsistent configuration: the lattice has {lattice} sites, the sector table {table} and the interaction {interaction}")]
    Inconsistent {
        lattice: usize,
        table: usize,
        interaction: usize,
    },
    #[error("block boundary at sector {sector} is not aligned to blocks of {max_distance} sectors")]
    Misaligned { sector: usize, max_distance: usize },
    #[error("the {direction} sweep is singular at sector {sector}")]
    Singular { sector: usize, direction: Direction },
    #[error("the center block at sector {sector} is singular")]
    SingularCenter { sector: usize },
    #[error("the full resolvent is singular")]
    SingularResolvent,
    #[error("no {direction} transfer matrix is stored for sector {sector}")]
    MissingTransfer { direction: Direction, sector: usize },
    #[error("no amplitudes are stored for sector {sector}")]
    MissingAmplitude { sector: usize },
    #[error("transfer cache failure: {0}")]
    Io(#[from] PersistenceError),
}
