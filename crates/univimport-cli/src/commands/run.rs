//! Run command - convert a manifest into the import files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use univimport_core::models::OUTPUT_HEADERS;
use univimport_core::output::render_csv;
use univimport_core::pipeline::write_files;
use univimport_core::{Assignment, Customer, ImportRequest, OutputRow, Pipeline};

use super::config::load_config;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Customer class: mb (header search) or ng (fixed columns)
    #[arg(short = 'k', long)]
    customer: Customer,

    /// Manifest workbook (default: configured file of the customer)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Article catalog workbook
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// CSV output file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Spreadsheet output file
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Storage location for every row
    #[arg(short = 'l', long)]
    storage_location: Option<String>,

    /// Free-text annotation for every row
    #[arg(short, long)]
    annotation: Option<String>,

    /// Storage location and annotation for selected rows, e.g. `--assign "1-5, 8" A-01 Verkaufsware`
    #[arg(long, num_args = 3, value_names = ["ROWS", "STORAGE", "TEXT"])]
    assign: Vec<String>,

    /// Extra line above the table in the spreadsheet
    #[arg(short, long)]
    banner: Option<String>,

    /// Print the finished table instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Output format for --dry-run
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text table
    Table,
    /// JSON output
    Json,
    /// CSV output (without byte-order mark)
    Csv,
}

impl RunArgs {
    fn request(&self) -> anyhow::Result<ImportRequest> {
        let mut request = ImportRequest::new(self.customer);
        request.input = self.input.clone();
        request.catalog = self.catalog.clone();
        request.csv_path = self.csv.clone();
        request.xlsx_path = self.xlsx.clone();
        request.banner = self.banner.clone();

        if self.storage_location.is_some() || self.annotation.is_some() {
            request.assignments.push(Assignment::all(
                self.storage_location.clone(),
                self.annotation.clone(),
            ));
        }

        for chunk in self.assign.chunks(3) {
            let [rows, storage, text] = chunk else {
                anyhow::bail!("--assign expects ROWS STORAGE TEXT");
            };
            request.assignments.push(Assignment::for_ranges(
                rows,
                Some(storage.clone()),
                Some(text.clone()),
            )?);
        }

        Ok(request)
    }
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = Pipeline::new(config);
    let request = args.request()?;

    info!(
        "Importing {} manifest {}",
        request.customer,
        pipeline.input_path(&request).display()
    );

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading manifest...");
    let prepared = pipeline.prepare(&request)?;
    pb.inc(1);

    pb.set_message("Assembling rows...");
    let rows = pipeline.assemble(&prepared, &request.assignments);
    pb.inc(1);

    if !prepared.unresolved_articles.is_empty() {
        pb.suspend(|| {
            eprintln!(
                "{} {} article ids not found in catalog: {}",
                style("⚠").yellow(),
                prepared.unresolved_articles.len(),
                prepared.unresolved_articles.join(", ")
            );
        });
    }

    if args.dry_run {
        pb.finish_and_clear();
        println!("{}", format_rows(&rows, args.format)?);
        debug!("Total processing time: {:?}", start.elapsed());
        return Ok(());
    }

    pb.set_message("Rendering files...");
    let files = pipeline.render(&rows, request.banner.as_deref())?;
    pb.inc(1);

    pb.set_message("Writing files...");
    let (csv_path, xlsx_path) = pipeline.output_paths(&request);
    write_files(&files, &csv_path, &xlsx_path)?;
    pb.finish_with_message("Done");

    println!(
        "{} {} rows from {} manifest lines",
        style("✓").green(),
        rows.len(),
        prepared.source_rows
    );
    println!("{} CSV written to {}", style("✓").green(), csv_path.display());
    println!(
        "{} Spreadsheet written to {}",
        style("✓").green(),
        xlsx_path.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_rows(rows: &[OutputRow], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => {
            let bytes = render_csv(rows)?;
            let text = String::from_utf8(bytes)?;
            Ok(text.trim_start_matches('\u{feff}').trim_end().to_string())
        }
    }
}

fn format_table(rows: &[OutputRow]) -> String {
    let records: Vec<[String; 12]> = rows.iter().map(OutputRow::to_record).collect();

    let mut widths: Vec<usize> = OUTPUT_HEADERS.iter().map(|h| h.chars().count()).collect();
    for record in &records {
        for (width, value) in widths.iter_mut().zip(record) {
            *width = (*width).max(value.chars().count());
        }
    }

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = Vec::with_capacity(records.len() + 1);
    output.push(line(OUTPUT_HEADERS.to_vec()));
    for record in &records {
        output.push(line(record.iter().map(String::as_str).collect()));
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> OutputRow {
        OutputRow {
            sequence: 1,
            article_id: "MB 000123".to_string(),
            description: "Widget".to_string(),
            unit_id: 55,
            batch: "7001".to_string(),
            quantity: 10,
            unit: "UMK".to_string(),
            load_carrier: "Euro".to_string(),
            expiry: "20.09.2024".to_string(),
            weight: "1000,0".to_string(),
            storage_location: String::new(),
            annotation: String::new(),
        }
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let table = format_table(&[row()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Nr.  Artikel-Nr."));
        assert!(lines[1].starts_with("1    MB 000123"));
    }

    #[test]
    fn test_format_csv_has_no_bom() {
        let text = format_rows(&[row()], OutputFormat::Csv).unwrap();
        assert!(text.starts_with("Nr.;"));
        assert!(text.ends_with("1000,0;;"));
    }
}
