// Melody generation: a constrained random walk over the transition model.
//
// Starting from a random predecessor pitch, each step draws a successor of
// the current pitch, folds it into the melody register and keeps it only if
// the leap from the current pitch is between MIN_LEAP and MAX_LEAP
// semitones. That rules out repeated notes and semitone wobbles on one side
// and unsingable leaps of more than two octaves on the other.
//
// Rather than redrawing until a candidate passes, the pool is filtered first
// and one survivor is drawn uniformly. The distribution is the same as
// rejection sampling but the walk cannot spin forever on a pool with no
// acceptable member.

use crate::error::{GenError, Result, Stage};
use crate::markov::TransitionModel;
use crate::pitch::{FoldRange, Pitch};
use crate::random::Draw;

/// Smallest accepted interval between consecutive melody notes.
pub const MIN_LEAP: Pitch = 2;
/// Largest accepted interval between consecutive melody notes.
pub const MAX_LEAP: Pitch = 24;

/// Whether moving from `from` to `to` is an acceptable melodic step.
pub fn is_acceptable_leap(from: Pitch, to: Pitch) -> bool {
    (MIN_LEAP..=MAX_LEAP).contains(&(to - from).abs())
}

pub struct MelodyWalker<'a, R: Draw + ?Sized> {
    model: &'a TransitionModel,
    range: FoldRange,
    rng: &'a mut R,
}

impl<'a, R: Draw + ?Sized> MelodyWalker<'a, R> {
    pub fn new(model: &'a TransitionModel, range: FoldRange, rng: &'a mut R) -> Self {
        MelodyWalker { model, range, rng }
    }

    /// Generate `length` pitches, each inside the walker's fold range.
    ///
    /// When no successor of the current pitch gives an acceptable leap, the
    /// walk widens the pool to every pitch the model knows (the same pool it
    /// uses for pitches without successors). Only if that also fails does it
    /// give up with `EmptyCandidatePool`.
    pub fn generate(&mut self, length: usize) -> Result<Vec<Pitch>> {
        let model = self.model;
        let keys = model.keys();
        if keys.is_empty() {
            return Err(GenError::EmptyModel { notes: 0 });
        }

        let mut melody = Vec::with_capacity(length);
        if length == 0 {
            return Ok(melody);
        }

        let mut current = self.range.fold(*self.rng.choose(&keys));
        melody.push(current);

        for step in 1..length {
            let successors = model.query(current);
            let next = if successors.is_empty() {
                self.pick_leap(current, &keys)
            } else {
                self.pick_leap(current, successors).or_else(|| {
                    log::debug!("no acceptable successor of {current} at step {step}, widening pool");
                    self.pick_leap(current, &keys)
                })
            };
            current = next.ok_or(GenError::EmptyCandidatePool {
                stage: Stage::Melody,
                step,
                pitch: current,
            })?;
            melody.push(current);
        }

        Ok(melody)
    }

    /// Fold every candidate, keep acceptable leaps from `current`, draw one.
    fn pick_leap(&mut self, current: Pitch, pool: &[Pitch]) -> Option<Pitch> {
        let valid: Vec<Pitch> = pool
            .iter()
            .map(|&p| self.range.fold(p))
            .filter(|&p| is_acceptable_leap(current, p))
            .collect();
        if valid.is_empty() {
            return None;
        }
        Some(*self.rng.choose(&valid))
    }
}
