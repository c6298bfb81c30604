// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Persistence
//!
//! Binary storage of dense matrices, used for cached transfer matrices and sector amplitudes,
//! and plain text dumps of the final observables.

mod binary;
mod text;

pub use binary::{load_matrix, save_matrix, BinaryElement};
pub use text::{write_columns, write_complex_matrix, write_real_matrix};
