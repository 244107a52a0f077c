// Scale quality and triad shapes.
//
// Each accompaniment pitch becomes a root-position triad: root, third and
// fifth stacked above it. Only the third depends on the scale (major third
// for MAJOR, minor third for MINOR); the fifth is always a perfect fifth.
//
// The third and fifth are not folded back into the accompaniment register,
// so a root near the top of the register yields chord tones above it. That
// is accepted; the MIDI writer only rejects pitches outside 0-127.

use crate::error::GenError;
use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semitones from root to fifth.
pub const FIFTH: Pitch = 7;

/// Scale quality driving the triad shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Root, major third (+4), perfect fifth (+7).
    #[default]
    #[serde(alias = "MAJOR", alias = "Major")]
    Major,
    /// Root, minor third (+3), perfect fifth (+7).
    #[serde(alias = "MINOR", alias = "Minor")]
    Minor,
}

impl Scale {
    pub fn third_offset(self) -> Pitch {
        match self {
            Scale::Major => 4,
            Scale::Minor => 3,
        }
    }

    /// The triad built on `root` in this scale.
    pub fn triad(self, root: Pitch) -> Triad {
        Triad {
            root,
            third: root + self.third_offset(),
            fifth: root + FIFTH,
        }
    }
}

impl FromStr for Scale {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Scale::Major),
            "minor" => Ok(Scale::Minor),
            _ => Err(GenError::InvalidConfig(format!(
                "unknown scale '{s}' (expected major or minor)"
            ))),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Major => write!(f, "MAJOR"),
            Scale::Minor => write!(f, "MINOR"),
        }
    }
}

/// Three pitches sounded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triad {
    pub root: Pitch,
    pub third: Pitch,
    pub fifth: Pitch,
}

impl Triad {
    /// Root, third, fifth, in that order.
    pub fn pitches(&self) -> [Pitch; 3] {
        [self.root, self.third, self.fifth]
    }
}

/// Expand `pitch` into its triad for `scale`.
pub fn expand(pitch: Pitch, scale: Scale) -> Triad {
    scale.triad(pitch)
}
