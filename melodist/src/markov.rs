// First-order Markov chain over absolute pitches.
//
// Learned once from a seed melody: every adjacent pair (a, b) appends b to
// the successor list of a. Lists keep duplicates, so frequency is encoded
// by repetition rather than by a probability table, and a uniform draw from
// the list reproduces the observed transition frequencies.
//
// The model is immutable after `build`. Both walkers (melody.rs,
// accompaniment.rs) only read it through `query` and `keys`.

use crate::error::{GenError, Result};
use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Successor lists keyed by predecessor pitch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionModel {
    successors: BTreeMap<Pitch, Vec<Pitch>>,
}

impl TransitionModel {
    /// Learn the chain from a seed melody. Needs at least two notes, since a
    /// single note yields no transition and the walkers would have nothing
    /// to start from.
    pub fn build(seed: &[Pitch]) -> Result<Self> {
        if seed.len() < 2 {
            return Err(GenError::EmptyModel { notes: seed.len() });
        }
        let mut successors: BTreeMap<Pitch, Vec<Pitch>> = BTreeMap::new();
        for pair in seed.windows(2) {
            successors.entry(pair[0]).or_default().push(pair[1]);
        }
        log::debug!(
            "learned {} transitions over {} predecessor pitches",
            seed.len() - 1,
            successors.len()
        );
        Ok(TransitionModel { successors })
    }

    /// Observed successors of `pitch`, in seed order. Empty if the pitch
    /// never appeared as a predecessor.
    pub fn query(&self, pitch: Pitch) -> &[Pitch] {
        self.successors.get(&pitch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every pitch observed as a predecessor, ascending.
    pub fn keys(&self) -> Vec<Pitch> {
        self.successors.keys().copied().collect()
    }

    /// Total number of recorded transitions (seed length minus one).
    pub fn observation_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    /// Write the chain as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
