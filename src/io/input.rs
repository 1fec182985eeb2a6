use std::fs;
use std::num::IntErrorKind;
use std::path::Path;

use log::debug;

use crate::error::{Error, ParseError};
use crate::sequence::{Note, PatternBank, Sequence, BANK_SIZE};

/// Parse the text of an `.mbseq` file into a bank.
///
/// Each line reads `<index>:<token> <token> ...`. The index prefix is dropped,
/// slots follow line order. Integer tokens become notes, anything else (the
/// device writes `x`) becomes a rest. Lines may end in CR, LF or CRLF.
pub fn parse_bank(text: &str) -> Result<PatternBank, ParseError> {
    let lines = split_lines(text);
    if lines.len() != BANK_SIZE {
        return Err(ParseError::SequenceCount { found: lines.len() });
    }

    let mut slots: [Sequence; BANK_SIZE] = Default::default();
    for (i, (line, slot)) in lines.iter().zip(slots.iter_mut()).enumerate() {
        *slot = parse_line(line, i + 1)?;
    }
    Ok(PatternBank::new(slots))
}

// The final terminator does not open another line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn parse_line(raw: &str, line: usize) -> Result<Sequence, ParseError> {
    let raw = raw.trim_end_matches(['\r', '\n']);
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyLine { line });
    }

    let (_, body) = raw.split_once(':').ok_or(ParseError::MissingSeparator { line })?;
    let notes = body
        .split_whitespace()
        .map(|token| parse_token(token, line))
        .collect::<Result<Vec<_>, _>>()?;
    if notes.is_empty() {
        return Err(ParseError::NoSteps { line });
    }
    Ok(Sequence::new(notes))
}

fn parse_token(token: &str, line: usize) -> Result<Note, ParseError> {
    match token.parse::<i64>() {
        Ok(value) => u8::try_from(value)
            .ok()
            .filter(|v| *v <= 127)
            .map(Note::Value)
            .ok_or(ParseError::NoteOutOfRange { line, value: token.to_string() }),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(ParseError::NoteOutOfRange { line, value: token.to_string() })
        }
        Err(_) => Ok(Note::Rest),
    }
}

/// Read and parse a whole file. The handle is closed before parsing starts.
pub fn read_bank(path: &Path) -> Result<PatternBank, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    debug!("read {} bytes from {}", text.len(), path.display());
    parse_bank(&text).map_err(|source| Error::Parse { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1:60 62 x 64\r\n\
                          2:40 45 50\r\n\
                          3:120 122 124\r\n\
                          4:x x x x\r\n\
                          5:48\r\n\
                          6:1 125\r\n\
                          7:x 70 72\r\n\
                          8:60 60 60 60 60 60 60 60\r\n";

    #[test]
    fn parses_device_file() {
        let bank = parse_bank(SAMPLE).unwrap();
        let first = bank.get(1).unwrap();
        assert_eq!(first.notes(), &[Note::Value(60), Note::Value(62), Note::Rest, Note::Value(64)]);
        assert_eq!(bank.get(4).unwrap().notes(), &[Note::Rest; 4]);
        assert_eq!(bank.get(8).unwrap().len(), 8);
    }

    #[test]
    fn tolerates_bare_line_feeds_and_missing_final_newline() {
        let lf = SAMPLE.replace("\r\n", "\n");
        let trimmed = lf.trim_end();
        assert_eq!(parse_bank(&lf).unwrap(), parse_bank(SAMPLE).unwrap());
        assert_eq!(parse_bank(trimmed).unwrap(), parse_bank(SAMPLE).unwrap());
    }

    #[test]
    fn tolerates_bare_carriage_returns() {
        let cr = SAMPLE.replace("\r\n", "\r");
        assert_eq!(parse_bank(&cr).unwrap(), parse_bank(SAMPLE).unwrap());
        let mixed = SAMPLE.replacen("\r\n", "\r", 3).replacen("\r\n", "\n", 2);
        assert_eq!(parse_bank(&mixed).unwrap(), parse_bank(SAMPLE).unwrap());
    }

    #[test]
    fn non_numeric_tokens_are_rests() {
        let seq = parse_line("3:x 12 - foo", 3).unwrap();
        assert_eq!(seq.notes(), &[Note::Rest, Note::Value(12), Note::Rest, Note::Rest]);
    }

    #[test]
    fn index_prefix_is_not_checked() {
        let seq = parse_line("5:1 2", 1).unwrap();
        assert_eq!(seq.notes(), &[Note::Value(1), Note::Value(2)]);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_line("", 2), Err(ParseError::EmptyLine { line: 2 }));
        assert_eq!(parse_line("  \r", 2), Err(ParseError::EmptyLine { line: 2 }));
        assert_eq!(parse_line("60 62 64", 4), Err(ParseError::MissingSeparator { line: 4 }));
        assert_eq!(parse_line("6:", 6), Err(ParseError::NoSteps { line: 6 }));
        assert_eq!(parse_line("1:60 128", 1), Err(ParseError::NoteOutOfRange { line: 1, value: "128".to_string() }));
        assert_eq!(parse_line("1:-3", 1), Err(ParseError::NoteOutOfRange { line: 1, value: "-3".to_string() }));
    }

    #[test]
    fn integers_too_big_for_any_width_are_out_of_range() {
        assert_eq!(
            parse_line("1:60 99999999999999999999 64", 1),
            Err(ParseError::NoteOutOfRange { line: 1, value: "99999999999999999999".to_string() })
        );
        assert_eq!(
            parse_line("2:-99999999999999999999", 2),
            Err(ParseError::NoteOutOfRange { line: 2, value: "-99999999999999999999".to_string() })
        );
    }

    #[test]
    fn needs_exactly_eight_lines() {
        let seven: String = SAMPLE.lines().take(7).map(|l| format!("{}\n", l)).collect();
        assert_eq!(parse_bank(&seven), Err(ParseError::SequenceCount { found: 7 }));
        let nine = format!("{}9:1\r\n", SAMPLE);
        assert_eq!(parse_bank(&nine), Err(ParseError::SequenceCount { found: 9 }));
    }

    #[test]
    fn blank_line_inside_file_is_reported() {
        let text = SAMPLE.replacen("5:48", "", 1);
        assert_eq!(parse_bank(&text), Err(ParseError::EmptyLine { line: 5 }));
    }
}
