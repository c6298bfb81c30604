// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{Basis, LatticeError};
use serde::{Deserialize, Serialize};

/// The spatial dimensionality of a lattice
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    D1,
    D2,
    D3,
}

impl Dimensionality {
    /// Return the dimensionality as a `usize`, 1D->1, 2D->2, ...
    pub fn as_usize(&self) -> usize {
        match self {
            Dimensionality::D1 => 1,
            Dimensionality::D2 => 2,
            Dimensionality::D3 => 3,
        }
    }
}

impl std::fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D", self.as_usize())
    }
}

/// The extent of a lattice. Sites are indexed `0..=x_max` along the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatticeShape {
    dimensionality: Dimensionality,
    x_max: usize,
}

impl LatticeShape {
    pub fn new(dimensionality: Dimensionality, x_max: usize) -> Result<Self, LatticeError> {
        if x_max == 0 {
            return Err(LatticeError::TooSmall(x_max));
        }
        Ok(Self {
            dimensionality,
            x_max,
        })
    }

    /// A chain with sites `0..=x_max`
    pub fn one_dimensional(x_max: usize) -> Result<Self, LatticeError> {
        Self::new(Dimensionality::D1, x_max)
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    pub fn x_max(&self) -> usize {
        self.x_max
    }

    pub fn number_of_sites(&self) -> usize {
        self.x_max + 1
    }

    /// The largest sector index reachable by a pair of distinct sites, `(x_max - 1) + x_max`
    pub fn max_sector(&self) -> usize {
        2 * self.x_max - 1
    }

    pub fn contains(&self, site: usize) -> bool {
        site <= self.x_max
    }

    pub fn contains_pair(&self, pair: &Basis) -> bool {
        self.contains(pair[1])
    }

    /// Checks that `pair` lies on the lattice
    pub fn validate(&self, pair: &Basis) -> Result<(), LatticeError> {
        if self.contains_pair(pair) {
            Ok(())
        } else {
            Err(LatticeError::PairOffLattice {
                pair: *pair,
                x_max: self.x_max,
            })
        }
    }

    /// Iterates over every two-site state, ordered by the first then the second site
    pub fn pairs(&self) -> impl Iterator<Item = Basis> + '_ {
        (0..self.x_max).flat_map(move |n1| {
            ((n1 + 1)..=self.x_max).map(move |n2| Basis::from_ordered_unchecked(n1, n2))
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Dimensionality, LatticeShape};
    use crate::LatticeError;

    #[test]
    fn a_single_site_is_not_a_lattice() {
        assert_eq!(
            LatticeShape::one_dimensional(0),
            Err(LatticeError::TooSmall(0))
        );
    }

    #[test]
    fn the_largest_sector_pairs_the_two_rightmost_sites() {
        let lattice = LatticeShape::one_dimensional(9).unwrap();
        assert_eq!(lattice.max_sector(), 17);
        let last = lattice.pairs().last().unwrap();
        assert_eq!(last.sum(), lattice.max_sector());
    }

    #[test]
    fn pairs_enumerate_every_distinct_pair_once() {
        let lattice = LatticeShape::one_dimensional(6).unwrap();
        let pairs: Vec<_> = lattice.pairs().collect();
        assert_eq!(pairs.len(), 7 * 6 / 2);
        assert!(pairs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dimensionality_displays_as_a_short_label() {
        assert_eq!(Dimensionality::D2.to_string(), "2D");
    }
}
