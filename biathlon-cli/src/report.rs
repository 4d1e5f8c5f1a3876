//! Report file output
//!
//! Writes the output log and the result table as plain text, one entry per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write each line followed by a newline, replacing any existing file
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    log::info!("Writing {} lines to {:?}", lines.len(), path);

    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()
}
