//! Report rendering: plain rows, a pretty table, or a CSV file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL;
use engine_logging::engine_info;
use harvester_core::{Mode, Table};
use harvester_engine::{AtomicFileWriter, PersistError};

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    /// Bordered table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to save report: {0}")]
    Persist(#[from] PersistError),
}

/// Send a report to the selected sink. Returns the file path when one was written.
pub fn control_output(
    table: &Table,
    mode: Mode,
    output: Option<OutputKind>,
    results_dir: &Path,
) -> Result<Option<PathBuf>, EmitError> {
    let stdout = io::stdout();
    match output {
        Some(OutputKind::Pretty) => pretty_output(table, &mut stdout.lock())?,
        Some(OutputKind::File) => {
            let path = file_output(table, mode, results_dir, Local::now())?;
            return Ok(Some(path));
        }
        None => default_output(table, &mut stdout.lock())?,
    }
    Ok(None)
}

pub fn default_output(table: &Table, out: &mut impl Write) -> io::Result<()> {
    for row in table.rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

pub fn pretty_output(table: &Table, out: &mut impl Write) -> io::Result<()> {
    let mut pretty = comfy_table::Table::new();
    pretty
        .load_preset(ASCII_FULL)
        .set_header(table.header())
        .add_rows(table.body());
    writeln!(out, "{pretty}")
}

/// Write `{mode}_{timestamp}.csv` into `results_dir`, creating it if needed.
pub fn file_output(
    table: &Table,
    mode: Mode,
    results_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, EmitError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in table.rows() {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;

    let file_name = format!("{}_{}.csv", mode, now.format(DATETIME_FORMAT));
    let path = AtomicFileWriter::new(results_dir.to_path_buf()).write(&file_name, bytes)?;
    engine_info!("Results saved: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{default_output, file_output, pretty_output};
    use chrono::{Local, TimeZone};
    use harvester_core::{Mode, Report, Table};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Table {
        let mut report = Report::with_header(["Status", "Count"]);
        report.push(["Final".into(), "2".into()]);
        report.push(["Total".into(), "2".into()]);
        report.into()
    }

    #[test]
    fn default_output_prints_space_separated_rows() {
        let mut out = Vec::new();
        default_output(&sample(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Status Count\nFinal 2\nTotal 2\n");
    }

    #[test]
    fn pretty_output_renders_header_and_cells() {
        let mut out = Vec::new();
        pretty_output(&sample(), &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Status"));
        assert!(rendered.contains("Final"));
        assert!(rendered.contains("Total"));
    }

    #[test]
    fn file_output_writes_quoted_csv_named_after_mode_and_time() {
        let temp = TempDir::new().unwrap();
        let results = temp.path().join("results");
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        let path = file_output(&sample(), Mode::Pep, &results, now).unwrap();
        assert_eq!(path, results.join("pep_2024-03-09_14-05-07.csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\"Status\",\"Count\"\n\"Final\",\"2\"\n\"Total\",\"2\"\n"
        );
    }
}
