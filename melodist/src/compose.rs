// End-to-end generation pipeline.
//
// seed pitches -> folded into the melody register -> transition model ->
// melody walk -> melody events + total duration -> accompaniment walk ->
// triads -> accompaniment events. Each stage consumes the previous stage's
// output; nothing is shared between runs.
//
// The chord length is the melody duration divided evenly between the
// windows, so both tracks end together (up to integer truncation).

use crate::accompaniment::AccompanimentWalker;
use crate::chord::Triad;
use crate::config::GenConfig;
use crate::error::{GenError, Result};
use crate::markov::TransitionModel;
use crate::melody::MelodyWalker;
use crate::midi::{events_to_track, write_smf};
use crate::pitch::Pitch;
use crate::random::Draw;
use crate::render::{NoteEvent, render_chords, render_melody, total_duration};
use std::path::Path;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Composition {
    pub model: TransitionModel,
    pub melody: Vec<Pitch>,
    /// Chord roots, one per window.
    pub accompaniment: Vec<Pitch>,
    pub triads: Vec<Triad>,
    pub melody_events: Vec<NoteEvent>,
    pub accompaniment_events: Vec<NoteEvent>,
    /// Total melody length in ticks.
    pub melody_duration: u64,
    /// Length of each chord in ticks.
    pub chord_duration: u32,
}

/// Run the whole generator on a seed melody.
pub fn compose<R: Draw + ?Sized>(
    seed: &[Pitch],
    config: &GenConfig,
    rng: &mut R,
) -> Result<Composition> {
    config.validate()?;

    let folded: Vec<Pitch> = seed.iter().map(|&p| config.melody_range.fold(p)).collect();
    let model = TransitionModel::build(&folded)?;
    log::debug!(
        "model: {} predecessor pitch(es), {} transition(s)",
        model.keys().len(),
        model.observation_count()
    );

    let melody = MelodyWalker::new(&model, config.melody_range, &mut *rng)
        .generate(config.melody_length)?;
    let melody_events = render_melody(&melody, config.unit_time);
    let melody_duration = total_duration(&melody_events);

    let chord_duration = u32::try_from(melody_duration / config.parts as u64).map_err(|_| {
        GenError::OutOfMidiRange {
            what: "chord duration",
            value: i64::try_from(melody_duration).unwrap_or(i64::MAX),
        }
    })?;

    let accompaniment =
        AccompanimentWalker::new(&model, config.accompaniment_range, config.parts, &mut *rng)
            .generate(&melody)?;
    let triads: Vec<Triad> = accompaniment
        .iter()
        .map(|&root| config.scale.triad(root))
        .collect();
    let accompaniment_events = render_chords(&triads, chord_duration);
    log::debug!(
        "generated {} melody note(s) and {} {} chord(s) of {chord_duration} ticks",
        melody.len(),
        triads.len(),
        config.scale
    );

    Ok(Composition {
        model,
        melody,
        accompaniment,
        triads,
        melody_events,
        accompaniment_events,
        melody_duration,
        chord_duration,
    })
}

impl Composition {
    /// Write the melody alone to `melody_path`, and the melody plus the
    /// accompaniment as a second track to `combined_path`.
    pub fn write(&self, config: &GenConfig, melody_path: &Path, combined_path: &Path) -> Result<()> {
        let melody_track = events_to_track("Melody", &self.melody_events, 0, config.velocity)?;
        let accompaniment_track = events_to_track(
            "Accompaniment",
            &self.accompaniment_events,
            0,
            config.velocity,
        )?;
        write_smf(melody_path, vec![melody_track.clone()])?;
        write_smf(combined_path, vec![melody_track, accompaniment_track])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Scale;
    use crate::pitch::FoldRange;
    use crate::render::NoteKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Ascending and descending C major scale: every pitch has neighbours a
    /// tone or two away, so no window can come up empty.
    fn scale_seed() -> Vec<Pitch> {
        let up = [60, 62, 64, 65, 67, 69, 71, 72, 74, 76, 77, 79];
        let mut seed: Vec<Pitch> = up.to_vec();
        seed.extend(up.iter().rev().skip(1));
        seed.extend(up.iter().skip(1).step_by(2));
        seed.extend(up.iter().rev().step_by(2));
        seed
    }

    #[test]
    fn test_compose_shapes() {
        let config = GenConfig::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let piece = compose(&scale_seed(), &config, &mut rng).unwrap();

        assert_eq!(piece.melody.len(), 64);
        assert_eq!(piece.melody_events.len(), 64);
        assert_eq!(piece.melody_duration, 64 * 500);
        assert_eq!(piece.chord_duration, 2000);
        assert_eq!(piece.accompaniment.len(), 16);
        assert_eq!(piece.accompaniment_events.len(), 16 * 6);
        assert_eq!(total_duration(&piece.accompaniment_events), piece.melody_duration);
        assert!(piece.melody.iter().all(|&p| FoldRange::MELODY.contains(p)));
        assert!(
            piece
                .accompaniment
                .iter()
                .all(|&p| FoldRange::ACCOMPANIMENT.contains(p))
        );
        assert!(
            piece
                .melody_events
                .iter()
                .all(|e| e.kind == NoteKind::Onset && e.delta == 500)
        );
    }

    #[test]
    fn test_minor_scale_triads() {
        let config = GenConfig {
            scale: Scale::Minor,
            melody_length: 16,
            parts: 4,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let piece = compose(&scale_seed(), &config, &mut rng).unwrap();
        assert_eq!(piece.triads.len(), 4);
        for (triad, &root) in piece.triads.iter().zip(&piece.accompaniment) {
            assert_eq!(triad.pitches(), [root, root + 3, root + 7]);
        }
        assert_eq!(piece.chord_duration, 16 * 500 / 4);
    }

    #[test]
    fn test_seed_is_folded_before_learning() {
        let config = GenConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let low_seed: Vec<Pitch> = scale_seed().iter().map(|p| p - 36).collect();
        let piece = compose(&low_seed, &config, &mut rng).unwrap();
        assert!(piece.model.keys().iter().all(|&p| FoldRange::MELODY.contains(p)));
    }

    #[test]
    fn test_errors_surface_before_generation() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            compose(&[60], &GenConfig::default(), &mut rng),
            Err(GenError::EmptyModel { notes: 1 })
        ));
        let bad = GenConfig {
            parts: 0,
            ..Default::default()
        };
        assert!(matches!(
            compose(&scale_seed(), &bad, &mut rng),
            Err(GenError::InvalidConfig(_))
        ));
    }
}
