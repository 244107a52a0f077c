// Error taxonomy for the generator.
//
// Every variant is fatal to a run: the pipeline never retries and never
// writes partial output. The one non-error degenerate case, querying a
// pitch the model never saw as a predecessor, is handled in markov.rs by
// returning an empty successor slice.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which random walk ran out of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Melody,
    Accompaniment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Melody => write!(f, "melody"),
            Stage::Accompaniment => write!(f, "accompaniment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GenError {
    #[error("seed melody has {notes} note(s); at least 2 are needed to learn any transition")]
    EmptyModel { notes: usize },

    #[error("{stage} generation found no valid candidate at step {step} (pitch {pitch})")]
    EmptyCandidatePool { stage: Stage, step: usize, pitch: i32 },

    #[error("failed to load seed from {}: {reason}", path.display())]
    SourceLoad { path: PathBuf, reason: String },

    #[error("fold range ({low}, {high}) must be wider than an octave")]
    InvalidRange { low: i32, high: i32 },

    #[error("cannot split {notes} melody note(s) into {parts} window(s)")]
    InvalidWindowing { notes: usize, parts: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{what} {value} does not fit in a MIDI event")]
    OutOfMidiRange { what: &'static str, value: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
