use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::RangeError;
use crate::general::batch::{BatchOutcome, Mode};

// 0 = auto, 1 = always, 2 = never
static COLOR_CHOICE: AtomicU8 = AtomicU8::new(0);

pub fn set_color_choice(choice: ColorChoice) {
    let raw = match choice {
        ColorChoice::Always | ColorChoice::AlwaysAnsi => 1,
        ColorChoice::Never => 2,
        ColorChoice::Auto => 0,
    };
    COLOR_CHOICE.store(raw, Ordering::SeqCst);
}

fn color_choice() -> ColorChoice {
    match COLOR_CHOICE.load(Ordering::SeqCst) {
        1 => ColorChoice::Always,
        2 => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn write_colored<W: WriteColor>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

/// Per-sequence notices for an equalize run, then the completion line.
pub fn write_outcome<W: WriteColor>(out: &mut W, mode: Mode, outcome: &BatchOutcome) -> io::Result<()> {
    for (index, err) in &outcome.skipped {
        write_skipped(out, *index, err)?;
    }
    write_colored(out, Color::Green, &format!("{} complete.", mode.name()))
}

fn write_skipped<W: WriteColor>(out: &mut W, index: u8, err: &RangeError) -> io::Result<()> {
    write_colored(out, Color::Yellow, &format!("Sequence {} unchanged:", index))?;
    writeln!(out, "{}", err)
}

pub fn print_outcome(mode: Mode, outcome: &BatchOutcome) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = write_outcome(&mut stdout, mode, outcome);
}

pub fn print_error(err: &dyn std::error::Error) {
    let mut stderr = StandardStream::stderr(color_choice());
    let _ = write_colored(&mut stderr, Color::Red, &format!("Error: {}", err));
}

pub fn print_usage(usage: &str) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = write_colored(&mut stdout, Color::Blue, usage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::PatternBank;
    use termcolor::Buffer;

    #[test]
    fn reports_skipped_sequences_before_completion() {
        let outcome = BatchOutcome {
            bank: PatternBank::default(),
            changed: vec![1],
            skipped: vec![(4, RangeError::NoAnchor)],
        };
        let mut buf = Buffer::no_color();
        write_outcome(&mut buf, Mode::Equalize { reference: 60 }, &outcome).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(
            text,
            "Sequence 4 unchanged:\nSequence holds only rests, there is no note to equalize against\nEqualize complete.\n"
        );
    }

    #[test]
    fn transpose_completion_line() {
        let outcome = BatchOutcome { bank: PatternBank::default(), changed: vec![], skipped: vec![] };
        let mut buf = Buffer::no_color();
        write_outcome(&mut buf, Mode::Transpose { semitones: 2 }, &outcome).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), "Transpose complete.\n");
    }
}
