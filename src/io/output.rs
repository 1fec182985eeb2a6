use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::sequence::PatternBank;

/// Line ending the MicroBrute Connection software writes.
pub const LINE_ENDING: &str = "\r\n";

/// Render a bank in the `.mbseq` line format, slots 1 to 8.
pub fn serialize_bank(bank: &PatternBank) -> String {
    let mut out = String::new();
    for (index, seq) in bank.iter() {
        // writing into a String cannot fail
        let _ = write!(out, "{}:{}{}", index, seq, LINE_ENDING);
    }
    out
}

/// Write a bank to `path`. The text is rendered completely before the file is
/// opened, so writing over the source file is safe.
pub fn write_bank(path: &Path, bank: &PatternBank) -> Result<(), Error> {
    let text = serialize_bank(bank);
    fs::write(path, &text).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
