// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Owned lattice, sector table and interaction for tests

use super::{RecursionContext, RecursionContextBuilder};
use crate::interaction::{Interaction, InteractionBuilder, InteractionData};
use twopair_lattice::{LatticeShape, SectorTable};

pub(crate) struct Fixture {
    pub(crate) lattice: LatticeShape,
    pub(crate) sectors: SectorTable,
    pub(crate) interaction: Interaction,
}

impl Fixture {
    /// A chain with disordered couplings of every kind
    pub(crate) fn disordered(x_max: usize, max_distance: usize, seed: u64) -> Self {
        Self::new(
            x_max,
            InteractionData {
                onsite_energy: 0.3,
                hopping: 1.,
                dynamic: 0.7,
                random_onsite: true,
                random_hopping: true,
                random_dynamic: true,
                max_distance,
                seed,
            },
        )
    }

    pub(crate) fn new(x_max: usize, data: InteractionData) -> Self {
        let lattice = LatticeShape::one_dimensional(x_max).unwrap();
        let sectors = SectorTable::build(&lattice).unwrap();
        let interaction = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data)
            .build()
            .unwrap();
        Self {
            lattice,
            sectors,
            interaction,
        }
    }

    pub(crate) fn context(&self) -> RecursionContext<'_> {
        RecursionContextBuilder::default()
            .with_lattice(&self.lattice)
            .with_sectors(&self.sectors)
            .with_interaction(&self.interaction)
            .build()
            .unwrap()
    }
}
