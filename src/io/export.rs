//! CSV export of the cabinet consumer breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::loads::ConsumerLine;

/// Column header for the consumer breakdown.
const HEADER: &str = "consumer,n_ph_kw,current_a,n_ph_kv_kw,n_ph_kv_tg_kvar,n_ph_square";

/// Exports the breakdown to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(names: &[String], lines: &[ConsumerLine], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(names, lines, buf)
}

/// Writes one row per consumer line to any writer.
///
/// Lines without a matching entry in `names` are labelled by position.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(names: &[String], lines: &[ConsumerLine], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (i, line) in lines.iter().enumerate() {
        let name = names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("#{}", i + 1));
        wtr.write_record(&[
            name,
            format!("{:.2}", line.rated),
            format!("{:.2}", line.current),
            format!("{:.2}", line.used),
            format!("{:.2}", line.reactive),
            format!("{:.2}", line.square),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
