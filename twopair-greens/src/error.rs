// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use miette::Diagnostic;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for matrix persistence
pub enum PersistenceError {
    #[error("IO Failure: {0}")]
    IO(#[from] std::io::Error),
    #[error("{path} is not a valid matrix file: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}
