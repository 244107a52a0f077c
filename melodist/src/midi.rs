// Standard MIDI File boundary.
//
// Reading: only the onset pitches of one track of the seed file are used,
// in file order. A NoteOn with velocity 0 is a release by MIDI convention
// and is skipped.
//
// Writing: note events from render.rs become one MIDI track each. Output is
// SMF Format 1 with 480 ticks per quarter note; deltas are written as-is,
// so the event delta unit is the MIDI tick.
//
// Uses the `midly` crate for both directions.

use crate::error::{GenError, Result};
use crate::pitch::Pitch;
use crate::render::{NoteEvent, NoteKind};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Largest delta a track event can carry (28-bit variable-length quantity).
const MAX_DELTA: u32 = (1 << 28) - 1;

/// Read the onset pitches of `track` from the MIDI file at `path`.
pub fn load_seed(path: &Path, track: usize) -> Result<Vec<Pitch>> {
    let load_error = |reason: String| GenError::SourceLoad {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
    let smf = Smf::parse(&bytes).map_err(|e| load_error(e.to_string()))?;
    let events = smf.tracks.get(track).ok_or_else(|| {
        load_error(format!(
            "track {track} requested but the file has {} track(s)",
            smf.tracks.len()
        ))
    })?;

    let pitches: Vec<Pitch> = events
        .iter()
        .filter_map(|event| match &event.kind {
            TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } if vel.as_int() > 0 => Some(Pitch::from(key.as_int())),
            _ => None,
        })
        .collect();
    log::debug!(
        "loaded {} onset(s) from track {track} of {}",
        pitches.len(),
        path.display()
    );
    Ok(pitches)
}

fn midi_key(pitch: Pitch) -> Result<u7> {
    match u8::try_from(pitch) {
        Ok(key) if key <= 127 => Ok(u7::new(key)),
        _ => Err(GenError::OutOfMidiRange {
            what: "pitch",
            value: i64::from(pitch),
        }),
    }
}

fn midi_delta(delta: u32) -> Result<u28> {
    if delta > MAX_DELTA {
        return Err(GenError::OutOfMidiRange {
            what: "delta time",
            value: i64::from(delta),
        });
    }
    Ok(u28::new(delta))
}

/// Convert note events into a named MIDI track ending in EndOfTrack.
pub fn events_to_track(
    name: &'static str,
    events: &[NoteEvent],
    channel: u8,
    velocity: u8,
) -> Result<Track<'static>> {
    if channel > 15 {
        return Err(GenError::OutOfMidiRange {
            what: "channel",
            value: i64::from(channel),
        });
    }
    if velocity > 127 {
        return Err(GenError::OutOfMidiRange {
            what: "velocity",
            value: i64::from(velocity),
        });
    }
    let channel = u4::new(channel);
    let vel = u7::new(velocity);

    let mut track: Track<'static> = Vec::with_capacity(events.len() + 2);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
    });
    for event in events {
        let key = midi_key(event.pitch)?;
        let message = match event.kind {
            NoteKind::Onset => MidiMessage::NoteOn { key, vel },
            NoteKind::Release => MidiMessage::NoteOff { key, vel },
        };
        track.push(TrackEvent {
            delta: midi_delta(event.delta)?,
            kind: TrackEventKind::Midi { channel, message },
        });
    }
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    Ok(track)
}

/// Wrap tracks in a Format 1 file.
pub fn tracks_to_smf(tracks: Vec<Track<'static>>) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    smf.tracks = tracks;
    smf
}

/// Write tracks to a MIDI file.
pub fn write_smf(path: &Path, tracks: Vec<Track<'static>>) -> Result<()> {
    let smf = tracks_to_smf(tracks);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(path, &buf)?;
    log::debug!("wrote {} track(s) to {}", smf.tracks.len(), path.display());
    Ok(())
}
