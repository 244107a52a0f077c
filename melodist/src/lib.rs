// Melodist: Markov-chain melody and accompaniment generator
//
// Learns a first-order Markov chain over pitches from a seed melody, walks it
// to produce a new melody under interval and register constraints, then
// picks one chord root per window of that melody and renders both as MIDI
// tracks.
//
// Architecture:
// - pitch.rs: Pitch type and octave folding into a register (FoldRange)
// - markov.rs: TransitionModel, successor lists learned from the seed
// - random.rs: Draw trait, the injected randomness source
// - melody.rs: MelodyWalker, constrained random walk producing the melody
// - chord.rs: Scale quality and triad expansion
// - accompaniment.rs: AccompanimentWalker, one chord root per melody window
// - render.rs: NoteEvent sequences and durations
// - midi.rs: Standard MIDI File input (seed) and output (tracks)
// - config.rs: GenConfig, every tunable of a run
// - compose.rs: the pipeline tying the stages together
// - error.rs: GenError
//
// Given a seeded random source the whole pipeline is reproducible.

pub mod accompaniment;
pub mod chord;
pub mod compose;
pub mod config;
pub mod error;
pub mod markov;
pub mod melody;
pub mod midi;
pub mod pitch;
pub mod random;
pub mod render;

pub use compose::{Composition, compose};
pub use config::GenConfig;
pub use error::{GenError, Result};
