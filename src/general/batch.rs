//! Applies a pitch transform to the selected slots of a bank.

use log::{debug, info};

use crate::error::{BatchError, RangeError, SelectionError};
use crate::general::transpose::{equalize, transpose};
use crate::sequence::{PatternBank, Sequence, BANK_SIZE};

/// What to do with each selected sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shift by a fixed amount. Any out-of-range sequence aborts the batch.
    Transpose { semitones: i32 },
    /// Move each first note onto `reference`. Out-of-range sequences are skipped.
    Equalize { reference: u8 },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Transpose { .. } => "Transpose",
            Mode::Equalize { .. } => "Equalize",
        }
    }
}

/// Set of pattern slots (1..=8) a batch works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection([bool; BANK_SIZE]);

impl Selection {
    pub fn all() -> Self {
        Self([true; BANK_SIZE])
    }

    /// Builds a selection from user input. Every index must be in 1..=8 and
    /// may appear only once.
    pub fn from_indices(indices: &[i64]) -> Result<Self, SelectionError> {
        if indices.is_empty() {
            return Err(SelectionError::Empty);
        }
        let mut slots = [false; BANK_SIZE];
        for &index in indices {
            let slot = match usize::try_from(index) {
                Ok(i) if (1..=BANK_SIZE).contains(&i) => i - 1,
                _ => return Err(SelectionError::OutOfRange(index)),
            };
            if slots[slot] {
                return Err(SelectionError::Duplicate(index as u8));
            }
            slots[slot] = true;
        }
        Ok(Self(slots))
    }

    pub fn contains(&self, index: u8) -> bool {
        usize::from(index)
            .checked_sub(1)
            .and_then(|slot| self.0.get(slot))
            .copied()
            .unwrap_or(false)
    }

    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        (1u8..).zip(self.0.iter()).filter(|(_, on)| **on).map(|(i, _)| i)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

/// Result of a batch that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub bank: PatternBank,
    /// Slots whose notes differ from the input.
    pub changed: Vec<u8>,
    /// Slots left untouched in equalize mode, with the reason.
    pub skipped: Vec<(u8, RangeError)>,
}

/// Run `mode` over every selected sequence of `bank`.
///
/// Unselected sequences are copied as they are. In transpose mode the first
/// range violation is returned and no bank is produced; in equalize mode the
/// offending sequence is kept unchanged and listed in `skipped`.
pub fn apply(bank: &PatternBank, mode: Mode, selection: &Selection) -> Result<BatchOutcome, BatchError> {
    let mut changed = Vec::new();
    let mut skipped = Vec::new();
    let mut slots: [Sequence; BANK_SIZE] = Default::default();

    for ((index, seq), slot) in bank.iter().zip(slots.iter_mut()) {
        if !selection.contains(index) {
            *slot = seq.clone();
            continue;
        }

        let result = match mode {
            Mode::Transpose { semitones } => transpose(seq, semitones),
            Mode::Equalize { reference } => equalize(seq, reference),
        };

        *slot = match (mode, result) {
            (_, Ok(new_seq)) => {
                debug!("sequence {}: {} -> {}", index, seq, new_seq);
                if new_seq != *seq {
                    changed.push(index);
                }
                new_seq
            }
            (Mode::Transpose { .. }, Err(source)) => {
                return Err(BatchError { index, source });
            }
            (Mode::Equalize { .. }, Err(err)) => {
                info!("sequence {} unchanged: {}", index, err);
                skipped.push((index, err));
                seq.clone()
            }
        };
    }

    Ok(BatchOutcome { bank: PatternBank::new(slots), changed, skipped })
}
