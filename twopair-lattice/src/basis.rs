// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::LatticeError;

/// A two-particle occupation state: the particles sit on sites `n1 < n2`.
///
/// The particles are indistinguishable, so the state is stored in its ordered form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Basis([usize; 2]);

impl Basis {
    /// Build a state from sites which must already be ordered
    pub fn new(n1: usize, n2: usize) -> Result<Self, LatticeError> {
        match n1.cmp(&n2) {
            std::cmp::Ordering::Less => Ok(Self([n1, n2])),
            std::cmp::Ordering::Equal => Err(LatticeError::CoincidentSites(n1)),
            std::cmp::Ordering::Greater => Err(LatticeError::UnorderedPair(n1, n2)),
        }
    }

    /// Build a state from two distinct sites in either order
    pub fn from_unordered(a: usize, b: usize) -> Result<Self, LatticeError> {
        Self::new(a.min(b), a.max(b))
    }

    pub(crate) fn from_ordered_unchecked(n1: usize, n2: usize) -> Self {
        debug_assert!(n1 < n2);
        Self([n1, n2])
    }

    /// The sector index of the state
    pub fn sum(&self) -> usize {
        self.0[0] + self.0[1]
    }

    pub fn sites(&self) -> [usize; 2] {
        self.0
    }

    pub fn separation(&self) -> usize {
        self.0[1] - self.0[0]
    }

    /// If `self` and `other` differ by moving one particle without it passing its partner,
    /// returns the site it leaves and the site it arrives on.
    ///
    /// Only the first or only the second site may change. States sharing no site, both sites,
    /// or a site held in the opposite slot are not connected by a single hop.
    pub fn hopping_sites(&self, other: &Basis) -> Option<(usize, usize)> {
        if self == other {
            return None;
        }
        if self.0[0] == other.0[0] {
            Some((self.0[1], other.0[1]))
        } else if self.0[1] == other.0[1] {
            Some((self.0[0], other.0[0]))
        } else {
            None
        }
    }
}

impl std::ops::Index<usize> for Basis {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl TryFrom<[usize; 2]> for Basis {
    type Error = LatticeError;

    fn try_from(sites: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(sites[0], sites[1])
    }
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}
