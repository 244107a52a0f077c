// Accompaniment generation: one chord root per window of the melody.
//
// The melody is cut into `parts` windows by index arithmetic. For each
// window the candidate roots are the model's successors of the window's
// first note followed by the successors of its last note, duplicates kept.
// Candidates more than a two-octave leap (24 semitones or more) away from
// either boundary note are discarded, one survivor is drawn uniformly, and
// it is folded down into the accompaniment register. chord.rs turns each
// root into a triad.
//
// A window whose filtered pool is empty is a fatal error. Sparse seeds can
// trigger it; widening the filter would silently change the harmonic logic.

use crate::error::{GenError, Result, Stage};
use crate::markov::TransitionModel;
use crate::pitch::{FoldRange, Pitch};
use crate::random::Draw;

/// Candidates must stay strictly closer than this to both window ends.
pub const MAX_DISTANCE: Pitch = 24;

/// Default number of windows (and chords).
pub const DEFAULT_PARTS: usize = 16;

/// Index bounds `(start, end)` of window `i` out of `parts` over `notes`
/// melody notes. The end is inclusive. Requires `notes >= parts > 0`; when
/// `parts` does not divide `notes` the trailing notes belong to no window.
pub fn window_bounds(notes: usize, parts: usize, i: usize) -> (usize, usize) {
    let start = notes * i / parts;
    (start, start + (notes / parts - 1))
}

pub struct AccompanimentWalker<'a, R: Draw + ?Sized> {
    model: &'a TransitionModel,
    range: FoldRange,
    parts: usize,
    rng: &'a mut R,
}

impl<'a, R: Draw + ?Sized> AccompanimentWalker<'a, R> {
    pub fn new(
        model: &'a TransitionModel,
        range: FoldRange,
        parts: usize,
        rng: &'a mut R,
    ) -> Self {
        AccompanimentWalker {
            model,
            range,
            parts,
            rng,
        }
    }

    /// One root per window, `parts` in total.
    pub fn generate(&mut self, melody: &[Pitch]) -> Result<Vec<Pitch>> {
        let notes = melody.len();
        if self.parts == 0 || notes < self.parts {
            return Err(GenError::InvalidWindowing {
                notes,
                parts: self.parts,
            });
        }

        let model = self.model;
        let mut roots = Vec::with_capacity(self.parts);
        for window in 0..self.parts {
            let (start, end) = window_bounds(notes, self.parts, window);
            let (start_note, end_note) = (melody[start], melody[end]);

            let pool: Vec<Pitch> = model
                .query(start_note)
                .iter()
                .chain(model.query(end_note))
                .copied()
                .filter(|&c| {
                    (c - start_note).abs() < MAX_DISTANCE && (c - end_note).abs() < MAX_DISTANCE
                })
                .collect();
            log::debug!(
                "window {window} [{start}..={end}] {start_note}->{end_note}: {} candidate(s)",
                pool.len()
            );

            if pool.is_empty() {
                return Err(GenError::EmptyCandidatePool {
                    stage: Stage::Accompaniment,
                    step: window,
                    pitch: start_note,
                });
            }
            roots.push(self.range.fold(*self.rng.choose(&pool)));
        }
        Ok(roots)
    }
}
