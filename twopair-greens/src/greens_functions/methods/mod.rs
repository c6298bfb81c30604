// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Green's Function Methods
//!
//! This module contains algorithms to calculate the two-particle Green's function, either by
//! recursive elimination or by direct inversion of the full resolvent

/// Aggregate methods: evaluate observables over every energy in a spectral grid
pub mod aggregate;

/// Dense methods: invert `z - H` over the whole two-particle space. Only practical for small
/// chains, where it serves as a reference for the recursion
pub mod dense;

/// Recursive methods: the edge-to-center sweeps, the center solve and back-substitution
pub mod recursive;
