//! Pitch shifting of a single sequence.

use log::debug;

use crate::error::RangeError;
use crate::sequence::{Note, Sequence};

/// Lowest note a transform may produce.
pub const NOTE_MIN: u8 = 1;
/// Highest note a transform may produce.
pub const NOTE_MAX: u8 = 125;
/// Reference used by equalize when none is given.
pub const DEFAULT_REFERENCE: u8 = 60;

/// Shift every sounding note of `seq` by `semitones`.
///
/// The whole sequence is checked before anything is shifted: moving up, the
/// highest note may not pass `NOTE_MAX`; otherwise the lowest note may not
/// drop below `NOTE_MIN`. Rests stay where they are. A sequence of rests only
/// comes back unchanged.
pub fn transpose(seq: &Sequence, semitones: i32) -> Result<Sequence, RangeError> {
    if semitones > 0 {
        if let Some(high) = seq.highest() {
            if i32::from(high).saturating_add(semitones) > i32::from(NOTE_MAX) {
                return Err(RangeError::Upper { note: high, semitones, limit: NOTE_MAX });
            }
        }
    } else if let Some(low) = seq.lowest() {
        if i32::from(low).saturating_add(semitones) < i32::from(NOTE_MIN) {
            return Err(RangeError::Lower { note: low, semitones, limit: NOTE_MIN });
        }
    }

    let notes = seq
        .notes()
        .iter()
        .map(|note| match *note {
            // range checked above, the cast cannot truncate
            Note::Value(v) => Note::Value((i32::from(v) + semitones) as u8),
            Note::Rest => Note::Rest,
        })
        .collect::<Vec<_>>();
    Ok(Sequence::new(notes))
}

/// Shift `seq` so its first sounding note lands on `reference`.
pub fn equalize(seq: &Sequence, reference: u8) -> Result<Sequence, RangeError> {
    let anchor = seq.first_note().ok_or(RangeError::NoAnchor)?;
    let semitones = i32::from(reference) - i32::from(anchor);
    debug!("equalize: anchor {} -> reference {} ({:+} semitones)", anchor, reference, semitones);
    transpose(seq, semitones)
}
