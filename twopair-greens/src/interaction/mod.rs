// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Interaction module
//!
//! Creates the site couplings entering the two-particle Hamiltonian:
//!
//! - `hopping`: the amplitude `t(i, j)` for a particle to move from site `i` to site `j`
//! - `dynamic`: the pair interaction `d(i, j)` felt when the two particles sit on `i` and `j`
//! - `onsite`: the energy `e(i)` of a particle on site `i`
//!
//! Couplings between sites `incr` apart decay as `1 / incr^3` and vanish beyond `max_distance`.
//! Disordered couplings scale the decaying envelope by a uniform draw from a seeded generator,
//! so a fixed seed always reproduces the same interaction.
//!
//! An `Interaction` is constructed through the `InteractionBuilder` from a lattice and an
//! `InteractionData` record as
//!
//! ```ignore
//! InteractionBuilder::default()
//!     .with_lattice(&lattice)
//!     .with_interaction_data(&data)
//!     .build()?;
//! ```

use miette::Diagnostic;
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use twopair_lattice::{Basis, Dimensionality, LatticeShape};

/// Strengths, disorder flags and range of the couplings. Carries no lattice geometry.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InteractionData {
    /// On-site energy, or its upper bound when `random_onsite` is set
    pub onsite_energy: f64,
    /// Nearest neighbour hopping strength
    pub hopping: f64,
    /// Nearest neighbour dynamic interaction strength
    pub dynamic: f64,
    #[serde(default)]
    pub random_onsite: bool,
    #[serde(default)]
    pub random_hopping: bool,
    #[serde(default)]
    pub random_dynamic: bool,
    /// Separation beyond which hopping and dynamic couplings are zero
    pub max_distance: usize,
    #[serde(default)]
    pub seed: u64,
}

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum InteractionError {
    #[error("interactions on {0} lattices are not implemented")]
    UnsupportedDimensionality(Dimensionality),
    #[error("the interaction range must be at least one site")]
    InvalidRange,
}

/// The coupling matrices, tagged by the lattice dimensionality they were built for
#[derive(Clone, Debug, PartialEq)]
enum Couplings {
    OneDimensional {
        hopping: DMatrix<f64>,
        dynamic: DMatrix<f64>,
        onsite: DVector<f64>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    couplings: Couplings,
    max_distance: usize,
    seed: u64,
}

impl Interaction {
    /// Amplitude connecting two states which differ by the position of one particle
    pub fn hop(&self, initial: &Basis, target: &Basis) -> f64 {
        match &self.couplings {
            Couplings::OneDimensional { hopping, .. } => initial
                .hopping_sites(target)
                .map_or(0., |(from, to)| hopping[(from, to)]),
        }
    }

    /// The pair interaction between the two particles of `pair`
    pub fn dynamic(&self, pair: &Basis) -> f64 {
        match &self.couplings {
            Couplings::OneDimensional { dynamic, .. } => dynamic[(pair[0], pair[1])],
        }
    }

    /// The summed on-site energy of the two particles of `pair`
    pub fn onsite_energy(&self, pair: &Basis) -> f64 {
        match &self.couplings {
            Couplings::OneDimensional { onsite, .. } => onsite[pair[0]] + onsite[pair[1]],
        }
    }

    /// The diagonal element of the two-particle Hamiltonian for `pair`
    pub fn local_energy(&self, pair: &Basis) -> f64 {
        self.onsite_energy(pair) + self.dynamic(pair)
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn number_of_sites(&self) -> usize {
        match &self.couplings {
            Couplings::OneDimensional { onsite, .. } => onsite.len(),
        }
    }

    pub fn hopping_matrix(&self) -> &DMatrix<f64> {
        match &self.couplings {
            Couplings::OneDimensional { hopping, .. } => hopping,
        }
    }

    pub fn dynamic_matrix(&self) -> &DMatrix<f64> {
        match &self.couplings {
            Couplings::OneDimensional { dynamic, .. } => dynamic,
        }
    }

    pub fn onsite_vector(&self) -> &DVector<f64> {
        match &self.couplings {
            Couplings::OneDimensional { onsite, .. } => onsite,
        }
    }
}

/// Builder for an `Interaction` from a reference to a `LatticeShape` and an `InteractionData`
pub struct InteractionBuilder<RefLattice, RefData> {
    lattice: RefLattice,
    data: RefData,
}

impl Default for InteractionBuilder<(), ()> {
    fn default() -> Self {
        Self {
            lattice: (),
            data: (),
        }
    }
}

impl<RefLattice, RefData> InteractionBuilder<RefLattice, RefData> {
    /// Attach the lattice
    pub fn with_lattice<Lattice>(self, lattice: &Lattice) -> InteractionBuilder<&Lattice, RefData> {
        InteractionBuilder {
            lattice,
            data: self.data,
        }
    }

    /// Attach the coupling strengths and disorder flags
    pub fn with_interaction_data<Data>(
        self,
        data: &Data,
    ) -> InteractionBuilder<RefLattice, &Data> {
        InteractionBuilder {
            lattice: self.lattice,
            data,
        }
    }
}

impl<'a> InteractionBuilder<&'a LatticeShape, &'a InteractionData> {
    #[tracing::instrument(name = "Interaction Builder", level = "info", skip(self))]
    pub fn build(self) -> Result<Interaction, InteractionError> {
        let data = self.data;
        if data.max_distance == 0 {
            return Err(InteractionError::InvalidRange);
        }
        match self.lattice.dimensionality() {
            Dimensionality::D1 => {
                // A single generator feeds hopping, then dynamic, then on-site draws
                let mut rng = StdRng::seed_from_u64(data.seed);
                let sites = self.lattice.number_of_sites();
                tracing::trace!("Filling couplings for {} sites", sites);
                let hopping = decaying_matrix(
                    sites,
                    data.hopping,
                    data.max_distance,
                    data.random_hopping,
                    &mut rng,
                );
                let dynamic = decaying_matrix(
                    sites,
                    data.dynamic,
                    data.max_distance,
                    data.random_dynamic,
                    &mut rng,
                );
                let onsite = onsite_vector(sites, data.onsite_energy, data.random_onsite, &mut rng);
                Ok(Interaction {
                    couplings: Couplings::OneDimensional {
                        hopping,
                        dynamic,
                        onsite,
                    },
                    max_distance: data.max_distance,
                    seed: data.seed,
                })
            }
            other => Err(InteractionError::UnsupportedDimensionality(other)),
        }
    }
}

/// A symmetric matrix with entries `scale * u / incr^3` for sites `incr <= max_distance` apart,
/// where `u` is a uniform draw in `[0, 1)` if `random` is set and one otherwise.
fn decaying_matrix(
    sites: usize,
    scale: f64,
    max_distance: usize,
    random: bool,
    rng: &mut StdRng,
) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(sites, sites);
    for i in 0..sites {
        for incr in (1..=max_distance).take_while(|incr| i + incr < sites) {
            let amplitude = if random { scale * rng.gen::<f64>() } else { scale };
            let value = amplitude / (incr as f64).powi(3);
            matrix[(i, i + incr)] = value;
            matrix[(i + incr, i)] = value;
        }
    }
    matrix
}

fn onsite_vector(sites: usize, scale: f64, random: bool, rng: &mut StdRng) -> DVector<f64> {
    DVector::from_fn(sites, |_, _| {
        if random {
            scale * rng.gen::<f64>()
        } else {
            scale
        }
    })
}

#[cfg(test)]
mod test {
    use super::{InteractionBuilder, InteractionData, InteractionError};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use twopair_lattice::{Basis, Dimensionality, LatticeShape};

    fn data(max_distance: usize, random: bool, seed: u64) -> InteractionData {
        InteractionData {
            onsite_energy: 0.5,
            hopping: 1.,
            dynamic: 2.,
            random_onsite: random,
            random_hopping: random,
            random_dynamic: random,
            max_distance,
            seed,
        }
    }

    #[test]
    fn constant_couplings_decay_with_the_cube_of_the_separation() {
        let lattice = LatticeShape::one_dimensional(7).unwrap();
        let interaction = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data(3, false, 0))
            .build()
            .unwrap();
        let t = interaction.hopping_matrix();
        assert_relative_eq!(t[(2, 3)], 1.);
        assert_relative_eq!(t[(2, 4)], 1. / 8.);
        assert_relative_eq!(t[(5, 2)], 1. / 27.);
        assert_eq!(t[(1, 5)], 0.);
        assert_eq!(t[(4, 4)], 0.);
        assert_relative_eq!(interaction.dynamic_matrix()[(0, 2)], 2. / 8.);
        assert!(interaction.onsite_vector().iter().all(|&e| e == 0.5));
    }

    #[test]
    fn pair_accessors_read_the_coupling_matrices() {
        let lattice = LatticeShape::one_dimensional(5).unwrap();
        let interaction = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data(2, false, 0))
            .build()
            .unwrap();
        let pair = Basis::new(1, 2).unwrap();
        assert_relative_eq!(interaction.onsite_energy(&pair), 1.);
        assert_relative_eq!(interaction.dynamic(&pair), 2.);
        assert_relative_eq!(interaction.local_energy(&pair), 3.);
        // The particle on 2 moves to 3
        assert_relative_eq!(interaction.hop(&pair, &Basis::new(1, 3).unwrap()), 1.);
        // The particle on 1 moves to 0
        assert_relative_eq!(interaction.hop(&pair, &Basis::new(0, 2).unwrap()), 1.);
        // Carrying the particle on 1 past its partner to 3 is not a hop
        assert_eq!(interaction.hop(&pair, &Basis::new(2, 3).unwrap()), 0.);
        assert_eq!(interaction.hop(&pair, &Basis::new(1, 5).unwrap()), 0.);
        assert_eq!(interaction.hop(&pair, &Basis::new(3, 4).unwrap()), 0.);
    }

    #[test]
    fn random_couplings_are_reproducible_from_the_seed() {
        let lattice = LatticeShape::one_dimensional(12).unwrap();
        let build = |seed| {
            InteractionBuilder::default()
                .with_lattice(&lattice)
                .with_interaction_data(&data(2, true, seed))
                .build()
                .unwrap()
        };
        assert_eq!(build(17), build(17));
        assert_eq!(build(17).seed(), 17);
        assert_ne!(build(17).hopping_matrix(), build(18).hopping_matrix());
    }

    #[test]
    fn disordered_hops_move_one_particle_within_its_slot() {
        let lattice = LatticeShape::one_dimensional(6).unwrap();
        let interaction = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data(2, true, 1))
            .build()
            .unwrap();
        let t = interaction.hopping_matrix();
        let pair = Basis::new(1, 2).unwrap();
        assert_eq!(interaction.hop(&pair, &Basis::new(1, 3).unwrap()), t[(2, 3)]);
        assert_eq!(interaction.hop(&pair, &Basis::new(0, 2).unwrap()), t[(1, 0)]);
        assert_eq!(interaction.hop(&pair, &Basis::new(2, 3).unwrap()), 0.);
        assert_eq!(interaction.hop(&Basis::new(2, 3).unwrap(), &pair), 0.);
    }

    #[test]
    fn higher_dimensional_lattices_are_rejected() {
        let lattice = LatticeShape::new(Dimensionality::D3, 4).unwrap();
        let result = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data(1, false, 0))
            .build();
        assert_eq!(
            result.unwrap_err(),
            InteractionError::UnsupportedDimensionality(Dimensionality::D3)
        );
    }

    #[test]
    fn a_zero_range_is_rejected() {
        let lattice = LatticeShape::one_dimensional(4).unwrap();
        let result = InteractionBuilder::default()
            .with_lattice(&lattice)
            .with_interaction_data(&data(0, false, 0))
            .build();
        assert_eq!(result.unwrap_err(), InteractionError::InvalidRange);
    }

    proptest! {
        #[test]
        fn couplings_are_symmetric_bounded_and_short_ranged(
            x_max in 1_usize..20,
            max_distance in 1_usize..6,
            scale in 0.1_f64..10.,
            random in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let lattice = LatticeShape::one_dimensional(x_max).unwrap();
            let mut input = data(max_distance, random, seed);
            input.hopping = scale;
            input.dynamic = scale;
            let interaction = InteractionBuilder::default()
                .with_lattice(&lattice)
                .with_interaction_data(&input)
                .build()
                .unwrap();
            for matrix in [interaction.hopping_matrix(), interaction.dynamic_matrix()] {
                prop_assert_eq!(matrix, &matrix.transpose());
                for i in 0..matrix.nrows() {
                    for j in 0..matrix.ncols() {
                        let value = matrix[(i, j)];
                        let incr = i.abs_diff(j);
                        if incr == 0 || incr > max_distance {
                            prop_assert_eq!(value, 0.);
                            continue;
                        }
                        let envelope = scale / (incr as f64).powi(3);
                        prop_assert!(value >= 0.);
                        prop_assert!(value <= envelope * (1. + 1e-12));
                        if !random {
                            prop_assert!((value - envelope).abs() <= 1e-12 * envelope);
                        }
                    }
                }
            }
        }
    }
}
