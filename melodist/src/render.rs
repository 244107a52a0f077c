// Turning pitch sequences into timed note events.
//
// Delta times are relative to the previous event in the same track, in MIDI
// ticks. Two shapes are produced:
// - Melody: one onset per pitch, each `unit` ticks after the previous one.
//   No releases are emitted; a note rings until the next onset takes over,
//   which is how the seed files are written as well.
// - Accompaniment: each triad is three simultaneous onsets followed by three
//   simultaneous releases `unit_duration` ticks later.

use crate::chord::Triad;
use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};

/// Default ticks between melody onsets.
pub const DEFAULT_UNIT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    Onset,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub kind: NoteKind,
    /// Ticks since the previous event.
    pub delta: u32,
}

impl NoteEvent {
    pub fn onset(pitch: Pitch, delta: u32) -> Self {
        NoteEvent {
            pitch,
            kind: NoteKind::Onset,
            delta,
        }
    }

    pub fn release(pitch: Pitch, delta: u32) -> Self {
        NoteEvent {
            pitch,
            kind: NoteKind::Release,
            delta,
        }
    }
}

/// One onset per pitch, `unit` ticks apart.
pub fn render_melody(pitches: &[Pitch], unit: u32) -> Vec<NoteEvent> {
    pitches.iter().map(|&p| NoteEvent::onset(p, unit)).collect()
}

/// Block chords: all three tones start together and stop together after
/// `unit_duration` ticks.
pub fn render_chords(triads: &[Triad], unit_duration: u32) -> Vec<NoteEvent> {
    let mut events = Vec::with_capacity(triads.len() * 6);
    for triad in triads {
        let [root, third, fifth] = triad.pitches();
        events.push(NoteEvent::onset(root, 0));
        events.push(NoteEvent::onset(third, 0));
        events.push(NoteEvent::onset(fifth, 0));
        events.push(NoteEvent::release(root, unit_duration));
        events.push(NoteEvent::release(third, 0));
        events.push(NoteEvent::release(fifth, 0));
    }
    events
}

/// Sum of all delta times.
pub fn total_duration(events: &[NoteEvent]) -> u64 {
    events.iter().map(|e| u64::from(e.delta)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{Scale, expand};

    #[test]
    fn test_render_melody() {
        let events = render_melody(&[60, 62, 64], 500);
        assert_eq!(
            events,
            vec![
                NoteEvent::onset(60, 500),
                NoteEvent::onset(62, 500),
                NoteEvent::onset(64, 500),
            ]
        );
        assert_eq!(total_duration(&events), 1500);
    }

    #[test]
    fn test_render_chords() {
        let triads = [expand(48, Scale::Major), expand(45, Scale::Minor)];
        let events = render_chords(&triads, 2000);
        assert_eq!(events.len(), 12);
        assert_eq!(
            &events[..6],
            &[
                NoteEvent::onset(48, 0),
                NoteEvent::onset(52, 0),
                NoteEvent::onset(55, 0),
                NoteEvent::release(48, 2000),
                NoteEvent::release(52, 0),
                NoteEvent::release(55, 0),
            ]
        );
        assert_eq!(events[7].pitch, 48);
        assert_eq!(total_duration(&events), 4000);
    }

    #[test]
    fn test_empty_sequences() {
        assert!(render_melody(&[], 500).is_empty());
        assert!(render_chords(&[], 500).is_empty());
        assert_eq!(total_duration(&[]), 0);
    }
}
