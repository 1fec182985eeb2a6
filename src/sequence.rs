use std::fmt;

/// Number of pattern slots on the device.
pub const BANK_SIZE: usize = 8;

/// Literal used for a rest step in `.mbseq` files.
pub const REST_MARKER: &str = "x";

/// One step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    Value(u8),
    Rest,
}

impl Note {
    pub fn value(self) -> Option<u8> {
        match self {
            Note::Value(v) => Some(v),
            Note::Rest => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::Value(v) => write!(f, "{}", v),
            Note::Rest => f.write_str(REST_MARKER),
        }
    }
}

/// Ordered steps of one pattern slot. The length is whatever the file holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence(Vec<Note>);

impl Sequence {
    pub fn new(notes: Vec<Note>) -> Self {
        Self(notes)
    }

    pub fn notes(&self) -> &[Note] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().filter_map(|n| n.value())
    }

    /// First sounding note, the anchor for equalizing.
    pub fn first_note(&self) -> Option<u8> {
        self.values().next()
    }

    pub fn highest(&self) -> Option<u8> {
        self.values().max()
    }

    pub fn lowest(&self) -> Option<u8> {
        self.values().min()
    }
}

impl From<Vec<Note>> for Sequence {
    fn from(notes: Vec<Note>) -> Self {
        Self(notes)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

/// The eight sequences of one `.mbseq` file, addressed 1..=8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternBank([Sequence; BANK_SIZE]);

impl PatternBank {
    pub fn new(sequences: [Sequence; BANK_SIZE]) -> Self {
        Self(sequences)
    }

    /// Sequence in slot `index` (1-based).
    pub fn get(&self, index: u8) -> Option<&Sequence> {
        let slot = usize::from(index).checked_sub(1)?;
        self.0.get(slot)
    }

    /// Iterates `(index, sequence)` pairs in slot order, starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Sequence)> {
        (1u8..).zip(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(notes: &[Option<u8>]) -> Sequence {
        notes
            .iter()
            .map(|n| n.map_or(Note::Rest, Note::Value))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn extremes_skip_rests() {
        let s = seq(&[None, Some(64), None, Some(40), Some(72), None]);
        assert_eq!(s.first_note(), Some(64));
        assert_eq!(s.highest(), Some(72));
        assert_eq!(s.lowest(), Some(40));
    }

    #[test]
    fn all_rests_have_no_extremes() {
        let s = seq(&[None, None]);
        assert_eq!(s.first_note(), None);
        assert_eq!(s.highest(), None);
        assert_eq!(s.lowest(), None);
    }

    #[test]
    fn display_uses_rest_marker() {
        let s = seq(&[Some(60), Some(62), None, Some(64)]);
        assert_eq!(s.to_string(), "60 62 x 64");
    }

    #[test]
    fn bank_is_one_indexed() {
        let mut slots: [Sequence; BANK_SIZE] = Default::default();
        slots[2] = seq(&[Some(1)]);
        let bank = PatternBank::new(slots);
        assert_eq!(bank.get(3), Some(&seq(&[Some(1)])));
        assert_eq!(bank.get(0), None);
        assert_eq!(bank.get(9), None);
        assert_eq!(bank.iter().map(|(i, _)| i).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
    }
}
