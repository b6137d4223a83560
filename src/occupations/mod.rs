//! Occupation vectors of excited state configurations. A configuration is expanded into
//! one full length vector per spin channel, with a 1 for every occupied orbital.
pub use cis::*;
pub use rasci::*;

mod cis;
mod rasci;

use serde::Serialize;

/// Alpha and beta occupation vectors of equal length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupationPair {
    pub alpha: Vec<u8>,
    pub beta: Vec<u8>,
}

impl OccupationPair {
    pub fn n_alpha(&self) -> usize {
        self.alpha.iter().map(|x| *x as usize).sum()
    }

    pub fn n_beta(&self) -> usize {
        self.beta.iter().map(|x| *x as usize).sum()
    }

    pub fn n_electrons(&self) -> usize {
        self.n_alpha() + self.n_beta()
    }
}
