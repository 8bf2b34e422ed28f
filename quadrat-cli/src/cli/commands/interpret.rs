use super::super::settings::Settings;
use anyhow::Result;
use clap::Args;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use quadrat_core::{InterpretedRecord, IssueCode, QuadratError, VerbatimRecord};
use quadrat_interpret::OccurrenceInterpreter;
use quadrat_lookup::{geocoder_from_config, name_matcher_from_config, CanonicalNameParser};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Records handed to the thread pool per progress step
const BATCH_SIZE: usize = 256;

#[derive(Args)]
pub struct InterpretArgs {
    /// Verbatim records, one JSON object per line
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write interpreted records (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn io_error(path: &Path, e: std::io::Error) -> QuadratError {
    QuadratError::Io(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}

/// Read JSON lines, skipping blank lines
pub fn read_records(path: &Path) -> Result<Vec<VerbatimRecord>, QuadratError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut records = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: VerbatimRecord = serde_json::from_str(&line).map_err(|e| {
            QuadratError::Parse(format!("{}:{}: {}", path.display(), index + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Append one record as a JSON line. Failures of the underlying writer
/// surface as IO errors, anything else as serialization errors.
pub fn write_record<W: Write>(writer: &mut W, record: &InterpretedRecord) -> Result<(), QuadratError> {
    serde_json::to_writer(&mut *writer, record).map_err(|e| {
        if e.is_io() {
            QuadratError::Io(e.into())
        } else {
            QuadratError::from(e)
        }
    })?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn run(args: InterpretArgs, settings: &Settings, verbose: u8) -> Result<()> {
    let records = read_records(&args.input)?;
    info!("Read {} records from {}", records.len(), args.input.display());

    let config = &settings.config;
    let geocoder =
        geocoder_from_config(config).map_err(|e| QuadratError::Configuration(e.to_string()))?;
    let matcher =
        name_matcher_from_config(config).map_err(|e| QuadratError::Configuration(e.to_string()))?;
    let interpreter = OccurrenceInterpreter::new(
        config,
        Arc::new(geocoder),
        Arc::new(matcher),
        Arc::new(CanonicalNameParser::new()),
    );

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| io_error(path, e))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    // The bar shares the terminal with stdout output, so only show it for files
    let progress = if args.no_progress || args.output.is_none() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(records.len() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} records")
            .map_err(|e| anyhow::anyhow!("Invalid progress template: {}", e))?
            .progress_chars("##-"),
    );

    let mut tally: BTreeMap<IssueCode, usize> = BTreeMap::new();
    let mut flagged = 0usize;

    for batch in records.chunks(BATCH_SIZE) {
        for record in interpreter.interpret_all(batch) {
            if !record.issues.is_empty() {
                flagged += 1;
            }
            for issue in &record.issues {
                *tally.entry(*issue).or_default() += 1;
            }
            write_record(&mut writer, &record)?;
        }
        progress.inc(batch.len() as u64);
    }
    writer.flush().map_err(QuadratError::from)?;
    progress.finish_and_clear();

    eprintln!(
        "{} Interpreted {} records, {} with issues",
        "✓".green(),
        records.len(),
        flagged
    );
    if verbose > 0 {
        for (issue, count) in &tally {
            eprintln!("  {:<36} {}", issue.as_str(), count);
        }
    }
    Ok(())
}
