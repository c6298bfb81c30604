// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Lattice geometry for the two-particle Green's function engine.
//!
//! A lattice is described by a `LatticeShape`, a two-particle occupation state by a `Basis`
//! and the partition of all states into sectors of constant site-index sum by a `SectorTable`.

mod basis;
mod error;
mod generate;
mod shape;

pub use basis::*;
pub use error::*;
pub use generate::*;
pub use shape::*;
