// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{RecursionContext, RecursionError};
use twopair_lattice::{Basis, LatticeError};

/// The block boundaries of a recursion seeded at one initial state.
///
/// Blocks begin at sectors `1, 1 + d, 1 + 2d, ...`. The left sweep runs from the block at sector 1
/// up to `left_stop`, the right sweep from the last block down to `right_stop`, and the two meet
/// at `center`, the block holding the initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecursionData {
    initial: Basis,
    max_distance: usize,
    center: usize,
    left_start: usize,
    /// `None` when the center block is the first block
    left_stop: Option<usize>,
    right_start: usize,
    /// `None` when the center block is the last block
    right_stop: Option<usize>,
    center_size: usize,
    index_for_nonzero: usize,
}

/// First sector of the block holding `sector`
pub(crate) fn block_start(sector: usize, max_distance: usize) -> usize {
    1 + (sector.max(1) - 1) / max_distance * max_distance
}

impl RecursionData {
    #[tracing::instrument(name = "Recursion setup", level = "debug", skip(context))]
    pub fn new(context: &RecursionContext, initial: &Basis) -> Result<Self, RecursionError> {
        context.lattice().validate(initial)?;
        let sectors = context.sectors();
        let max_distance = context.max_distance();
        let max_sector = sectors.max_sector();

        let left_start = 1;
        let center = block_start(initial.sum(), max_distance);
        let right_start = block_start(max_sector, max_distance);
        for sector in [center, right_start] {
            if (sector - left_start) % max_distance != 0 {
                return Err(RecursionError::Misaligned {
                    sector,
                    max_distance,
                });
            }
        }
        if right_start < center || (right_start - center) % max_distance != 0 {
            return Err(RecursionError::Misaligned {
                sector: right_start,
                max_distance,
            });
        }

        let left_stop = (center > left_start).then(|| center - max_distance);
        let right_stop = Some(center + max_distance).filter(|&stop| stop <= max_sector);
        let center_size = sectors.block_size(center, max_distance);
        let index_for_nonzero = sectors
            .offset_in_block(center, max_distance, initial)
            .ok_or(LatticeError::PairOffLattice {
                pair: *initial,
                x_max: context.lattice().x_max(),
            })?;

        tracing::trace!(
            "Center block {} of size {}, sweeps stop at {:?} and {:?}",
            center,
            center_size,
            left_stop,
            right_stop
        );
        Ok(Self {
            initial: *initial,
            max_distance,
            center,
            left_start,
            left_stop,
            right_start,
            right_stop,
            center_size,
            index_for_nonzero,
        })
    }

    pub fn initial(&self) -> &Basis {
        &self.initial
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn left_start(&self) -> usize {
        self.left_start
    }

    pub fn left_stop(&self) -> Option<usize> {
        self.left_stop
    }

    pub fn right_start(&self) -> usize {
        self.right_start
    }

    pub fn right_stop(&self) -> Option<usize> {
        self.right_stop
    }

    pub fn center_size(&self) -> usize {
        self.center_size
    }

    /// Position of the initial state within the center block
    pub fn index_for_nonzero(&self) -> usize {
        self.index_for_nonzero
    }

    /// First sector of the block holding `sector`
    pub fn block_containing(&self, sector: usize) -> usize {
        block_start(sector, self.max_distance)
    }
}
