//! Transpose and equalize the sequences stored in MicroBrute `.mbseq` files.

pub mod args;
pub mod config;
pub mod error;
pub mod general;
pub mod io;
pub mod sequence;

use log::info;

pub use error::{Error, Result};
pub use general::batch::{apply, BatchOutcome, Mode, Selection};
pub use sequence::{Note, PatternBank, Sequence};

/// Read `params.source`, transform the selected sequences and write the
/// result to `params.output`. Nothing is written when parsing or a
/// transpose-mode batch fails.
pub fn run(params: &args::Params) -> Result<BatchOutcome> {
    let bank = io::input::read_bank(&params.source)?;
    let outcome = apply(&bank, params.mode, &params.selection)?;
    io::output::write_bank(&params.output, &outcome.bank)?;
    info!(
        "{} of {} sequence(s) changed, written to {}",
        outcome.changed.len(),
        params.selection.indices().count(),
        params.output.display()
    );
    Ok(outcome)
}
