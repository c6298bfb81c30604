// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::SpectralError;
use num_complex::Complex;
use std::ops::Range;

pub struct EnergySpaceBuilder<EnergyRange> {
    number_of_points: usize,
    energy_range: EnergyRange,
    broadening: f64,
}

impl EnergySpaceBuilder<()> {
    pub fn new() -> Self {
        Self {
            number_of_points: 0,
            energy_range: (),
            broadening: 0.,
        }
    }
}

impl Default for EnergySpaceBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<EnergyRange> EnergySpaceBuilder<EnergyRange> {
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        EnergySpaceBuilder {
            number_of_points,
            energy_range: self.energy_range,
            broadening: self.broadening,
        }
    }

    /// The imaginary part shared by every energy in the grid
    pub fn with_broadening(self, broadening: f64) -> Self {
        EnergySpaceBuilder {
            number_of_points: self.number_of_points,
            energy_range: self.energy_range,
            broadening,
        }
    }

    pub fn with_energy_range(self, energy_range: Range<f64>) -> EnergySpaceBuilder<Range<f64>> {
        EnergySpaceBuilder {
            number_of_points: self.number_of_points,
            energy_range,
            broadening: self.broadening,
        }
    }
}

impl EnergySpaceBuilder<Range<f64>> {
    /// Lays `number_of_points` energies uniformly over the range, both endpoints included
    pub fn build(self) -> Result<EnergySpace, SpectralError> {
        let Range { start, end } = self.energy_range;
        if self.number_of_points == 0 {
            return Err(SpectralError::Empty);
        }
        if !(start <= end) || (start == end && self.number_of_points > 1) {
            return Err(SpectralError::UnorderedRange { start, end });
        }
        if !(self.broadening > 0.) || !self.broadening.is_finite() {
            return Err(SpectralError::InvalidBroadening(self.broadening));
        }
        let step = if self.number_of_points > 1 {
            (end - start) / (self.number_of_points - 1) as f64
        } else {
            0.
        };
        let points = (0..self.number_of_points)
            .map(|index| Complex::new(start + step * index as f64, self.broadening))
            .collect();
        Ok(EnergySpace { points })
    }
}

/// An ordered list of complex energies
#[derive(Clone, Debug, PartialEq)]
pub struct EnergySpace {
    points: Vec<Complex<f64>>,
}

impl EnergySpace {
    /// Wraps an explicit list of energies, which may have any imaginary part
    pub fn from_points(points: Vec<Complex<f64>>) -> Result<Self, SpectralError> {
        if points.is_empty() {
            return Err(SpectralError::Empty);
        }
        Ok(Self { points })
    }

    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> impl Iterator<Item = &Complex<f64>> + '_ {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.points
    }

    pub fn energy_at(&self, index: usize) -> Complex<f64> {
        self.points[index]
    }

    /// The real parts, for labelling spectra
    pub fn real_parts(&self) -> Vec<f64> {
        self.points.iter().map(|z| z.re).collect()
    }
}

#[cfg(test)]
mod test {
    use super::{EnergySpace, EnergySpaceBuilder};
    use crate::spectral::SpectralError;
    use approx::assert_relative_eq;
    use num_complex::Complex;

    #[test]
    fn uniform_grids_include_both_endpoints() {
        let space = EnergySpaceBuilder::new()
            .with_number_of_points(5)
            .with_broadening(1e-3)
            .with_energy_range(-1.0..1.0)
            .build()
            .unwrap();
        assert_eq!(space.number_of_points(), 5);
        assert_relative_eq!(space.energy_at(0).re, -1.0);
        assert_relative_eq!(space.energy_at(2).re, 0.0);
        assert_relative_eq!(space.energy_at(4).re, 1.0);
        assert!(space.points().all(|z| z.im == 1e-3));
    }

    #[test]
    fn a_single_point_sits_at_the_start_of_the_range() {
        let space = EnergySpaceBuilder::new()
            .with_number_of_points(1)
            .with_broadening(0.1)
            .with_energy_range(0.5..0.5)
            .build()
            .unwrap();
        assert_eq!(space.as_slice(), &[Complex::new(0.5, 0.1)]);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        let empty = EnergySpaceBuilder::new()
            .with_broadening(0.1)
            .with_energy_range(0.0..1.0)
            .build();
        assert_eq!(empty.unwrap_err(), SpectralError::Empty);

        let reversed = EnergySpaceBuilder::new()
            .with_number_of_points(3)
            .with_broadening(0.1)
            .with_energy_range(1.0..0.0)
            .build();
        assert!(matches!(reversed, Err(SpectralError::UnorderedRange { .. })));

        let real_axis = EnergySpaceBuilder::new()
            .with_number_of_points(3)
            .with_energy_range(0.0..1.0)
            .build();
        assert_eq!(real_axis.unwrap_err(), SpectralError::InvalidBroadening(0.));
    }

    #[test]
    fn explicit_lists_must_not_be_empty() {
        assert_eq!(EnergySpace::from_points(vec![]).unwrap_err(), SpectralError::Empty);
        let space = EnergySpace::from_points(vec![Complex::new(0.1, 0.2)]).unwrap();
        assert_eq!(space.real_parts(), vec![0.1]);
    }
}
