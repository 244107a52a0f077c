// Pitch representation and octave folding.
//
// Pitches are plain MIDI note numbers held in an `i32` so that intermediate
// arithmetic (chord offsets, interval differences, folding of arbitrary
// input) never wraps. A `FoldRange` is an open interval `(low, high)`; any
// pitch is moved into it by whole octaves. The melody and accompaniment use
// two different registers, see `FoldRange::MELODY` and
// `FoldRange::ACCOMPANIMENT`.

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};

/// A MIDI note number. Values outside 0-127 are legal in the core and only
/// rejected at the file boundary (midi.rs).
pub type Pitch = i32;

/// Semitones per octave.
pub const OCTAVE: Pitch = 12;

/// Open interval `(low, high)` that pitches are folded into by octaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldRange {
    pub low: Pitch,
    pub high: Pitch,
}

impl FoldRange {
    /// Piano octaves 3-5.
    pub const MELODY: FoldRange = FoldRange { low: 47, high: 84 };
    /// Piano octaves 1-3.
    pub const ACCOMPANIMENT: FoldRange = FoldRange { low: 23, high: 60 };

    /// Reject ranges too narrow to hold every pitch class, which would
    /// leave some pitches with no octave inside the range.
    pub fn check(&self) -> Result<()> {
        if i64::from(self.high) - i64::from(self.low) <= i64::from(OCTAVE) {
            return Err(GenError::InvalidRange {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// Strictly inside the range.
    pub fn contains(&self, pitch: Pitch) -> bool {
        self.low < pitch && pitch < self.high
    }

    /// Transpose `pitch` by whole octaves until it lies strictly inside the
    /// range. Equivalent to stepping down an octave while `pitch >= high`
    /// and then up while `pitch <= low`, but constant time.
    pub fn fold(&self, pitch: Pitch) -> Pitch {
        let (low, high, octave) = (
            i64::from(self.low),
            i64::from(self.high),
            i64::from(OCTAVE),
        );
        let mut p = i64::from(pitch);
        if p >= high {
            p -= ((p - high) / octave + 1) * octave;
        }
        if p <= low {
            p += ((low - p) / octave + 1) * octave;
        }
        // In range, so it fits back into the range's own type.
        p as Pitch
    }
}

/// Free-function form of [`FoldRange::fold`].
pub fn fold(pitch: Pitch, low_exclusive: Pitch, high_exclusive: Pitch) -> Pitch {
    FoldRange {
        low: low_exclusive,
        high: high_exclusive,
    }
    .fold(pitch)
}
