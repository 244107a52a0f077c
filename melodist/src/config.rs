// Generation parameters.
//
// `GenConfig` holds every tunable of a run: scale quality, melody length,
// window count, both registers, the tick unit and the output velocity. It
// can be loaded from a JSON file where any field may be omitted (missing
// fields take their defaults), and the CLI overrides individual fields on
// top of that. `validate` runs once before generation starts so that bad
// parameters surface before any random draw is made.

use crate::accompaniment::DEFAULT_PARTS;
use crate::chord::Scale;
use crate::error::{GenError, Result};
use crate::pitch::FoldRange;
use crate::render::DEFAULT_UNIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Triad quality for the accompaniment.
    pub scale: Scale,
    /// Number of melody notes to generate.
    pub melody_length: usize,
    /// Number of accompaniment windows, one chord each.
    pub parts: usize,
    /// Register the melody (and the seed) is folded into.
    pub melody_range: FoldRange,
    /// Register chord roots are folded into.
    pub accompaniment_range: FoldRange,
    /// Ticks between melody onsets.
    pub unit_time: u32,
    /// Velocity of every written note.
    pub velocity: u8,
    /// Track of the seed file holding the melody.
    pub seed_track: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            scale: Scale::Major,
            melody_length: 64,
            parts: DEFAULT_PARTS,
            melody_range: FoldRange::MELODY,
            accompaniment_range: FoldRange::ACCOMPANIMENT,
            unit_time: DEFAULT_UNIT,
            velocity: 127,
            seed_track: 1,
        }
    }
}

impl GenConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: GenConfig = serde_json::from_str(&data)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.melody_range.check()?;
        self.accompaniment_range.check()?;
        if self.parts == 0 {
            return Err(GenError::InvalidConfig("parts must be at least 1".into()));
        }
        if self.melody_length < self.parts {
            return Err(GenError::InvalidWindowing {
                notes: self.melody_length,
                parts: self.parts,
            });
        }
        if self.unit_time == 0 {
            return Err(GenError::InvalidConfig("unit_time must be positive".into()));
        }
        // A NoteOn with velocity 0 is a release, so 0 would write silence.
        if !(1..=127).contains(&self.velocity) {
            return Err(GenError::InvalidConfig(format!(
                "velocity {} is outside 1-127",
                self.velocity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenConfig::default();
        assert_eq!(config.scale, Scale::Major);
        assert_eq!(config.melody_length, 64);
        assert_eq!(config.parts, 16);
        assert_eq!(config.melody_range, FoldRange { low: 47, high: 84 });
        assert_eq!(config.accompaniment_range, FoldRange { low: 23, high: 60 });
        assert_eq!(config.unit_time, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GenConfig =
            serde_json::from_str(r#"{"scale": "minor", "parts": 8}"#).unwrap();
        assert_eq!(config.scale, Scale::Minor);
        assert_eq!(config.parts, 8);
        assert_eq!(config.melody_length, 64);
        assert_eq!(config.melody_range, FoldRange::MELODY);
    }

    #[test]
    fn test_validation_failures() {
        let narrow = GenConfig {
            melody_range: FoldRange { low: 60, high: 70 },
            ..Default::default()
        };
        assert!(matches!(narrow.validate(), Err(GenError::InvalidRange { .. })));

        let no_parts = GenConfig {
            parts: 0,
            ..Default::default()
        };
        assert!(no_parts.validate().is_err());

        let short = GenConfig {
            melody_length: 10,
            ..Default::default()
        };
        assert!(matches!(
            short.validate(),
            Err(GenError::InvalidWindowing { notes: 10, parts: 16 })
        ));

        let loud = GenConfig {
            velocity: 200,
            ..Default::default()
        };
        assert!(loud.validate().is_err());
    }

    #[test]
    fn test_silent_velocity_rejected() {
        let silent = GenConfig {
            velocity: 0,
            ..Default::default()
        };
        assert!(matches!(silent.validate(), Err(GenError::InvalidConfig(_))));
        let quiet = GenConfig {
            velocity: 1,
            ..Default::default()
        };
        assert!(quiet.validate().is_ok());
    }

    #[test]
    fn test_upper_case_scale_in_json() {
        let config: GenConfig = serde_json::from_str(r#"{"scale": "MINOR"}"#).unwrap();
        assert_eq!(config.scale, Scale::Minor);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("melodist_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"melody_length": 32, "unit_time": 240}"#).unwrap();
        let config = GenConfig::load(&path).unwrap();
        assert_eq!(config.melody_length, 32);
        assert_eq!(config.unit_time, 240);
        std::fs::remove_file(&path).ok();
    }
}
