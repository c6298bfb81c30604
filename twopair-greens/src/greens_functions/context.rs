// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{DenseSolver, RecursionError};
use crate::interaction::Interaction;
use twopair_lattice::{LatticeShape, SectorTable};

/// Everything a recursive calculation reads but never writes.
///
/// A context is built once per lattice and interaction and shared by every query against them.
/// When the lattice extent or the interaction range changes the sector table, and therefore the
/// context, has to be rebuilt.
#[derive(Clone, Copy, Debug)]
pub struct RecursionContext<'a> {
    lattice: &'a LatticeShape,
    sectors: &'a SectorTable,
    interaction: &'a Interaction,
    solver: DenseSolver,
}

impl<'a> RecursionContext<'a> {
    pub fn lattice(&self) -> &'a LatticeShape {
        self.lattice
    }

    pub fn sectors(&self) -> &'a SectorTable {
        self.sectors
    }

    pub fn interaction(&self) -> &'a Interaction {
        self.interaction
    }

    pub fn solver(&self) -> &DenseSolver {
        &self.solver
    }

    /// The number of sectors grouped into each block of the recursion
    pub fn max_distance(&self) -> usize {
        self.interaction.max_distance()
    }
}

pub struct RecursionContextBuilder<RefLattice, RefSectors, RefInteraction> {
    lattice: RefLattice,
    sectors: RefSectors,
    interaction: RefInteraction,
    solver: DenseSolver,
}

impl Default for RecursionContextBuilder<(), (), ()> {
    fn default() -> Self {
        Self {
            lattice: (),
            sectors: (),
            interaction: (),
            solver: DenseSolver::default(),
        }
    }
}

impl<RefLattice, RefSectors, RefInteraction>
    RecursionContextBuilder<RefLattice, RefSectors, RefInteraction>
{
    pub fn with_lattice<Lattice>(
        self,
        lattice: &Lattice,
    ) -> RecursionContextBuilder<&Lattice, RefSectors, RefInteraction> {
        RecursionContextBuilder {
            lattice,
            sectors: self.sectors,
            interaction: self.interaction,
            solver: self.solver,
        }
    }

    pub fn with_sectors<Sectors>(
        self,
        sectors: &Sectors,
    ) -> RecursionContextBuilder<RefLattice, &Sectors, RefInteraction> {
        RecursionContextBuilder {
            lattice: self.lattice,
            sectors,
            interaction: self.interaction,
            solver: self.solver,
        }
    }

    pub fn with_interaction<Interaction>(
        self,
        interaction: &Interaction,
    ) -> RecursionContextBuilder<RefLattice, RefSectors, &Interaction> {
        RecursionContextBuilder {
            lattice: self.lattice,
            sectors: self.sectors,
            interaction,
            solver: self.solver,
        }
    }

    pub fn with_solver(self, solver: DenseSolver) -> Self {
        RecursionContextBuilder {
            solver,
            ..self
        }
    }
}

impl<'a> RecursionContextBuilder<&'a LatticeShape, &'a SectorTable, &'a Interaction> {
    /// Checks the three parts describe the same chain
    pub fn build(self) -> Result<RecursionContext<'a>, RecursionError> {
        let lattice = self.lattice.number_of_sites();
        let table = self.sectors.x_max() + 1;
        let interaction = self.interaction.number_of_sites();
        if table != lattice || interaction != lattice {
            return Err(RecursionError::Inconsistent {
                lattice,
                table,
                interaction,
            });
        }
        Ok(RecursionContext {
            lattice: self.lattice,
            sectors: self.sectors,
            interaction: self.interaction,
            solver: self.solver,
        })
    }
}
