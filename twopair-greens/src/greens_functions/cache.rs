// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Storage for the transfer matrices and block amplitudes used in back-substitution.
//!
//! The recursion only needs the matrices at the two blocks adjacent to the center. Everything
//! else is kept so amplitudes away from the center can be recovered afterwards, which is a trade
//! of memory (or disk) against recomputation.

use super::Direction;
use crate::error::PersistenceError;
use crate::persistence::{load_matrix, save_matrix};
use nalgebra::DMatrix;
use num_complex::Complex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `A_K` from the right sweep or `ATilde_K` from the left sweep
    Transfer { direction: Direction, sector: usize },
    /// The amplitudes `V_K` of the block beginning at `sector`
    Amplitude { sector: usize },
}

impl CacheKey {
    pub fn file_name(&self) -> String {
        match self {
            CacheKey::Transfer {
                direction: Direction::Right,
                sector,
            } => format!("A{}.bin", sector),
            CacheKey::Transfer {
                direction: Direction::Left,
                sector,
            } => format!("ATilde{}.bin", sector),
            CacheKey::Amplitude { sector } => format!("V{}.bin", sector),
        }
    }
}

/// A key-value store for dense complex matrices
pub trait TransferCache {
    fn store(
        &mut self,
        key: CacheKey,
        matrix: &DMatrix<Complex<f64>>,
    ) -> Result<(), PersistenceError>;
    /// Returns `None` if nothing was stored under `key`
    fn load(&self, key: CacheKey) -> Result<Option<DMatrix<Complex<f64>>>, PersistenceError>;
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryCache {
    matrices: HashMap<CacheKey, DMatrix<Complex<f64>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

impl TransferCache for InMemoryCache {
    fn store(
        &mut self,
        key: CacheKey,
        matrix: &DMatrix<Complex<f64>>,
    ) -> Result<(), PersistenceError> {
        self.matrices.insert(key, matrix.clone());
        Ok(())
    }

    fn load(&self, key: CacheKey) -> Result<Option<DMatrix<Complex<f64>>>, PersistenceError> {
        Ok(self.matrices.get(&key).cloned())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.matrices.clear();
        Ok(())
    }
}

/// Stores each matrix as a binary file named after its key
#[derive(Debug)]
pub struct DiskCache {
    directory: PathBuf,
    written: HashSet<PathBuf>,
}

impl DiskCache {
    /// Creates `directory` if it does not exist
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            written: HashSet::new(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: CacheKey) -> PathBuf {
        self.directory.join(key.file_name())
    }
}

impl TransferCache for DiskCache {
    fn store(
        &mut self,
        key: CacheKey,
        matrix: &DMatrix<Complex<f64>>,
    ) -> Result<(), PersistenceError> {
        let path = self.path(key);
        save_matrix(&path, matrix)?;
        self.written.insert(path);
        Ok(())
    }

    fn load(&self, key: CacheKey) -> Result<Option<DMatrix<Complex<f64>>>, PersistenceError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        load_matrix(&path).map(Some)
    }

    /// Removes the files this cache wrote, leaving the directory in place
    fn clear(&mut self) -> Result<(), PersistenceError> {
        for path in self.written.drain() {
            match std::fs::remove_file(&path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }
}
