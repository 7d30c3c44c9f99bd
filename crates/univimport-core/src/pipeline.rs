//! End-to-end import: manifest workbook in, import files out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;
use crate::catalog::{load_catalog, ArticleCatalog};
use crate::error::{ImportError, Result};
use crate::models::{AggregatedRecord, Cell, Customer, ImportConfig, OutputRow};
use crate::normalize::RecordNormalizer;
use crate::output::{render_csv, render_xlsx, Assignment, OutputAssembler, SheetLayout};
use crate::table::{extractor_for, retain_valid_rows};
use crate::workbook::read_first_sheet;

/// Number of unresolved article ids quoted in the warning.
const MISSING_SAMPLE: usize = 10;

/// Everything a run needs besides the configuration.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub customer: Customer,
    /// Manifest workbook, defaults to the configured file of the customer.
    pub input: Option<PathBuf>,
    /// Catalog workbook, defaults to the configured catalog.
    pub catalog: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub xlsx_path: Option<PathBuf>,
    /// Applied in order; later assignments override earlier ones.
    pub assignments: Vec<Assignment>,
    pub banner: Option<String>,
}

impl ImportRequest {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            input: None,
            catalog: None,
            csv_path: None,
            xlsx_path: None,
            assignments: Vec::new(),
            banner: None,
        }
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    pub fn with_outputs(mut self, csv: impl Into<PathBuf>, xlsx: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(csv.into());
        self.xlsx_path = Some(xlsx.into());
        self
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }
}

/// Aggregated records of one manifest, before operator values are applied.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedImport {
    pub customer: Customer,
    /// Rows bound by the table extractor, before id filtering.
    pub source_rows: usize,
    /// Rows that passed the article id filter.
    pub valid_rows: usize,
    pub records: Vec<AggregatedRecord>,
    /// Article ids without catalog entry, in first-seen order.
    pub unresolved_articles: Vec<String>,
}

/// Both import files, rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedFiles {
    pub csv: Vec<u8>,
    pub xlsx: Vec<u8>,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub customer: Customer,
    pub source_rows: usize,
    pub rows: Vec<OutputRow>,
    pub unresolved_articles: Vec<String>,
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
}

/// The import pipeline, configured once and run per manifest.
pub struct Pipeline {
    config: ImportConfig,
    normalizer: RecordNormalizer,
}

impl Pipeline {
    pub fn new(config: ImportConfig) -> Self {
        let normalizer = RecordNormalizer::new(config.mapping.load_carriers.clone());
        Self { config, normalizer }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Manifest workbook used for `request`.
    pub fn input_path<'a>(&'a self, request: &'a ImportRequest) -> &'a Path {
        request
            .input
            .as_deref()
            .unwrap_or_else(|| self.config.input_file(request.customer))
    }

    /// Catalog workbook used for `request`.
    pub fn catalog_path<'a>(&'a self, request: &'a ImportRequest) -> &'a Path {
        request
            .catalog
            .as_deref()
            .unwrap_or(self.config.input.catalog_file.as_path())
    }

    /// CSV and spreadsheet destinations used for `request`.
    pub fn output_paths(&self, request: &ImportRequest) -> (PathBuf, PathBuf) {
        let output = &self.config.output;
        (
            request.csv_path.clone().unwrap_or_else(|| output.csv_path.clone()),
            request.xlsx_path.clone().unwrap_or_else(|| output.xlsx_path.clone()),
        )
    }

    /// Extract, filter, describe and aggregate an in-memory manifest grid.
    ///
    /// `catalog` replaces every description when given; ids it does not
    /// know get an empty description and are reported.
    pub fn process_grid(
        &self,
        grid: &[Vec<Cell>],
        customer: Customer,
        catalog: Option<&ArticleCatalog>,
    ) -> Result<PreparedImport> {
        let extractor = extractor_for(customer);
        let rows = extractor.extract(grid)?;
        let source_rows = rows.len();

        let mut rows = retain_valid_rows(rows, extractor.allows_decimal_ids());
        let valid_rows = rows.len();

        let unresolved_articles = match catalog {
            Some(catalog) => catalog.fill_descriptions(&mut rows),
            None => Vec::new(),
        };
        if !unresolved_articles.is_empty() {
            let sample = &unresolved_articles[..unresolved_articles.len().min(MISSING_SAMPLE)];
            warn!(
                "{} article ids have no catalog entry, e.g. {}",
                unresolved_articles.len(),
                sample.join(", ")
            );
        }

        let records = self.normalizer.normalize_all(rows);
        let records = Aggregator::new()
            .with_article_padding(customer.pads_article_id())
            .aggregate(records);

        info!(
            "{}: {} rows, {} with valid article id, {} logistics units",
            customer,
            source_rows,
            valid_rows,
            records.len()
        );

        Ok(PreparedImport {
            customer,
            source_rows,
            valid_rows,
            records,
            unresolved_articles,
        })
    }

    /// Read the manifest (and the catalog where the customer needs one) and
    /// aggregate it.
    pub fn prepare(&self, request: &ImportRequest) -> Result<PreparedImport> {
        let input = self.input_path(request);
        if !input.exists() {
            return Err(ImportError::InputNotFound(input.to_path_buf()));
        }

        info!("Reading manifest {}", input.display());
        let sheet = read_first_sheet(input)?;
        debug!("Using sheet '{}' ({} rows)", sheet.name, sheet.rows.len());

        let catalog = match request.customer.catalog_filter() {
            Some(filter) => Some(load_catalog(self.catalog_path(request), Some(filter))?),
            None => None,
        };

        self.process_grid(&sheet.rows, request.customer, catalog.as_ref())
    }

    /// Final output rows with operator assignments applied.
    pub fn assemble(&self, prepared: &PreparedImport, assignments: &[Assignment]) -> Vec<OutputRow> {
        OutputAssembler::new(prepared.customer).assemble(&prepared.records, assignments)
    }

    /// Render both import files without touching the filesystem.
    pub fn render(&self, rows: &[OutputRow], banner: Option<&str>) -> Result<RenderedFiles> {
        let layout = SheetLayout::from_config(&self.config.output, banner.map(str::to_string));

        Ok(RenderedFiles {
            csv: render_csv(rows)?,
            xlsx: render_xlsx(rows, &layout)?,
        })
    }

    /// Run the whole import and write both files.
    ///
    /// Nothing is written unless every stage, including rendering of both
    /// files, succeeded.
    pub fn run(&self, request: &ImportRequest) -> Result<ImportReport> {
        let prepared = self.prepare(request)?;
        let rows = self.assemble(&prepared, &request.assignments);
        let files = self.render(&rows, request.banner.as_deref())?;

        let (csv_path, xlsx_path) = self.output_paths(request);
        write_files(&files, &csv_path, &xlsx_path)?;

        Ok(ImportReport {
            customer: prepared.customer,
            source_rows: prepared.source_rows,
            rows,
            unresolved_articles: prepared.unresolved_articles,
            csv_path,
            xlsx_path,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

/// Write rendered files to their destinations.
pub fn write_files(files: &RenderedFiles, csv_path: &Path, xlsx_path: &Path) -> Result<()> {
    fs::write(csv_path, &files.csv)?;
    info!("CSV written to {}", csv_path.display());

    fs::write(xlsx_path, &files.xlsx)?;
    info!("Spreadsheet written to {}", xlsx_path.display());

    Ok(())
}
