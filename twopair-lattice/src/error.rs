// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{Basis, Dimensionality};
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
/// Errors raised while constructing lattices, basis states and their index tables
pub enum LatticeError {
    #[error("a two-site state needs two distinct sites, both were {0}")]
    CoincidentSites(usize),
    #[error("sites must be ordered with n1 < n2, found ({0}, {1})")]
    UnorderedPair(usize, usize),
    #[error("the pair {pair} is not on a lattice with maximum site index {x_max}")]
    PairOffLattice { pair: Basis, x_max: usize },
    #[error("a lattice needs at least two sites, found maximum site index {0}")]
    TooSmall(usize),
    #[error("{0} lattices are not implemented")]
    UnsupportedDimensionality(Dimensionality),
}
