// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{Basis, Dimensionality, LatticeError, LatticeShape};
use nalgebra::DMatrix;

/// Partition of the two-particle states into sectors of constant site-index sum.
///
/// Sector `K` holds every pair `(n1, n2)` with `n1 + n2 = K`, ordered by ascending `n1`. On a
/// chain with sites `0..=x_max` the populated sectors are `1..=2 x_max - 1`, all others are empty.
/// The table is immutable once built and must be rebuilt for a lattice of different extent.
#[derive(Clone, Debug)]
pub struct SectorTable {
    x_max: usize,
    /// Offset of the pair `(n1, n2)` within its sector, stored symmetrically
    offsets: DMatrix<Option<usize>>,
    members: Vec<Vec<Basis>>,
    /// Global index of the first state of each sector when the sectors are concatenated
    starts: Vec<usize>,
}

impl SectorTable {
    pub fn build(lattice: &LatticeShape) -> Result<Self, LatticeError> {
        match lattice.dimensionality() {
            Dimensionality::D1 => Ok(Self::build_one_dimensional(lattice)),
            other => Err(LatticeError::UnsupportedDimensionality(other)),
        }
    }

    fn build_one_dimensional(lattice: &LatticeShape) -> Self {
        let number_of_sites = lattice.number_of_sites();
        let mut members = vec![Vec::new(); lattice.max_sector() + 1];
        for pair in lattice.pairs() {
            members[pair.sum()].push(pair);
        }

        let mut offsets = DMatrix::from_element(number_of_sites, number_of_sites, None);
        for sector in members.iter() {
            for (offset, pair) in sector.iter().enumerate() {
                offsets[(pair[0], pair[1])] = Some(offset);
                offsets[(pair[1], pair[0])] = Some(offset);
            }
        }

        let mut starts = Vec::with_capacity(members.len() + 1);
        starts.push(0);
        for sector in members.iter() {
            starts.push(starts.last().copied().unwrap_or_default() + sector.len());
        }

        Self {
            x_max: lattice.x_max(),
            offsets,
            members,
            starts,
        }
    }

    pub fn x_max(&self) -> usize {
        self.x_max
    }

    pub fn max_sector(&self) -> usize {
        self.members.len() - 1
    }

    /// The number of states in `sector`, zero outside the populated range
    pub fn size(&self, sector: usize) -> usize {
        self.members.get(sector).map_or(0, Vec::len)
    }

    /// The states in `sector` in their storage order
    pub fn members(&self, sector: usize) -> &[Basis] {
        self.members.get(sector).map_or(&[][..], |members| members.as_slice())
    }

    /// Position of `pair` within its sector, `None` if the pair is not on the lattice
    pub fn offset(&self, pair: &Basis) -> Option<usize> {
        self.offsets.get((pair[0], pair[1])).copied().flatten()
    }

    /// The total number of two-particle states
    pub fn number_of_pairs(&self) -> usize {
        self.starts.last().copied().unwrap_or_default()
    }

    /// Position of `pair` when all sectors are concatenated in ascending order
    pub fn global_index(&self, pair: &Basis) -> Option<usize> {
        let offset = self.offset(pair)?;
        Some(self.starts[pair.sum()] + offset)
    }

    /// The number of states in the `width` sectors beginning at `start`
    pub fn block_size(&self, start: usize, width: usize) -> usize {
        (start..start + width).map(|sector| self.size(sector)).sum()
    }

    /// Position of `pair` within the block of `width` sectors beginning at `start`
    pub fn offset_in_block(&self, start: usize, width: usize, pair: &Basis) -> Option<usize> {
        let sector = pair.sum();
        if sector < start || sector >= start + width {
            return None;
        }
        Some(self.block_size(start, sector - start) + self.offset(pair)?)
    }

    /// Iterates over all states, sector by sector
    pub fn pairs(&self) -> impl Iterator<Item = &Basis> {
        self.members.iter().flatten()
    }
}

#[cfg(test)]
mod test {
    use super::SectorTable;
    use crate::{Basis, Dimensionality, LatticeError, LatticeShape};
    use proptest::prelude::*;

    #[test]
    fn sectors_are_ordered_by_the_first_site() {
        let lattice = LatticeShape::one_dimensional(6).unwrap();
        let table = SectorTable::build(&lattice).unwrap();
        let expected = [(0, 5), (1, 4), (2, 3)]
            .map(|(n1, n2)| Basis::new(n1, n2).unwrap())
            .to_vec();
        assert_eq!(table.members(5), expected.as_slice());
        assert_eq!(table.offset(&Basis::new(2, 3).unwrap()), Some(2));
    }

    #[test]
    fn sectors_outside_the_lattice_are_empty() {
        let lattice = LatticeShape::one_dimensional(4).unwrap();
        let table = SectorTable::build(&lattice).unwrap();
        assert_eq!(table.max_sector(), 7);
        assert_eq!(table.size(0), 0);
        assert_eq!(table.size(8), 0);
        assert_eq!(table.size(100), 0);
        assert!(table.members(9).is_empty());
        assert_eq!(table.offset(&Basis::new(3, 5).unwrap()), None);
    }

    #[test]
    fn block_offsets_accumulate_preceding_sectors() {
        let lattice = LatticeShape::one_dimensional(9).unwrap();
        let table = SectorTable::build(&lattice).unwrap();
        // Sectors 7, 8 and 9 hold 4, 4 and 5 states
        assert_eq!(table.block_size(7, 3), 13);
        let pair = Basis::new(4, 5).unwrap();
        assert_eq!(table.offset_in_block(7, 3, &pair), Some(12));
        assert_eq!(table.offset_in_block(10, 3, &pair), None);
    }

    #[test]
    fn only_chains_are_supported() {
        let lattice = LatticeShape::new(Dimensionality::D2, 4).unwrap();
        assert_eq!(
            SectorTable::build(&lattice).unwrap_err(),
            LatticeError::UnsupportedDimensionality(Dimensionality::D2)
        );
    }

    proptest! {
        #[test]
        fn every_pair_is_found_at_its_recorded_offset(x_max in 1_usize..40) {
            let lattice = LatticeShape::one_dimensional(x_max).unwrap();
            let table = SectorTable::build(&lattice).unwrap();
            prop_assert_eq!(table.number_of_pairs(), (x_max + 1) * x_max / 2);
            for (global, pair) in table.pairs().enumerate() {
                let offset = table.offset(pair).unwrap();
                prop_assert_eq!(&table.members(pair.sum())[offset], pair);
                prop_assert_eq!(table.global_index(pair), Some(global));
            }
        }

        #[test]
        fn sector_sizes_sum_to_the_number_of_pairs(x_max in 1_usize..40) {
            let lattice = LatticeShape::one_dimensional(x_max).unwrap();
            let table = SectorTable::build(&lattice).unwrap();
            let total: usize = (0..=table.max_sector() + 1).map(|k| table.size(k)).sum();
            prop_assert_eq!(total, table.number_of_pairs());
            prop_assert!((1..=table.max_sector()).all(|k| table.size(k) > 0));
        }
    }
}
