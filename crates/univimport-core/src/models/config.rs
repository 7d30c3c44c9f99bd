//! Configuration structures for the import pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::customer::Customer;

/// Main configuration for the univimport pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Input file locations.
    pub input: InputConfig,

    /// Output file locations and layout.
    pub output: OutputConfig,

    /// Value remapping tables.
    pub mapping: MappingConfig,
}

/// Input workbook locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Manifest of the standard (header-search) customer.
    pub standard_file: PathBuf,

    /// Manifest of the positional customer.
    pub positional_file: PathBuf,

    /// Article master catalog.
    pub catalog_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            standard_file: PathBuf::from("Mappe1.xlsx"),
            positional_file: PathBuf::from("NG.xlsx"),
            catalog_file: PathBuf::from("artikel.xlsx"),
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Semicolon-separated import file.
    pub csv_path: PathBuf,

    /// Printable spreadsheet copy.
    pub xlsx_path: PathBuf,

    /// Sheet name of the spreadsheet copy.
    pub sheet_name: String,

    /// Upper bound for auto-sized column widths.
    pub max_column_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("import.csv"),
            xlsx_path: PathBuf::from("import.xlsx"),
            sheet_name: "Ruecktour".to_string(),
            max_column_width: 25,
        }
    }
}

/// A single load-carrier rule: lower-case substring and resulting label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCarrierRule {
    pub needle: String,
    pub label: String,
}

impl LoadCarrierRule {
    pub fn new(needle: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            label: label.into(),
        }
    }
}

/// Value remapping tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Ordered load-carrier rules, first containment match wins.
    pub load_carriers: Vec<LoadCarrierRule>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            load_carriers: vec![
                LoadCarrierRule::new("euro", "Euro"),
                LoadCarrierRule::new("h1", "H1"),
                LoadCarrierRule::new("industrie", "Industrie"),
            ],
        }
    }
}

impl ImportConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Manifest workbook for a customer.
    pub fn input_file(&self, customer: Customer) -> &std::path::Path {
        match customer {
            Customer::Mb => &self.input.standard_file,
            Customer::Ng => &self.input.positional_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.input_file(Customer::Mb), std::path::Path::new("Mappe1.xlsx"));
        assert_eq!(config.input_file(Customer::Ng), std::path::Path::new("NG.xlsx"));
        assert_eq!(config.output.sheet_name, "Ruecktour");
        assert_eq!(config.mapping.load_carriers.len(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ImportConfig =
            serde_json::from_str(r#"{"output": {"csv_path": "out/x.csv"}}"#).unwrap();

        assert_eq!(config.output.csv_path, PathBuf::from("out/x.csv"));
        assert_eq!(config.output.max_column_width, 25);
        assert_eq!(config.input.catalog_file, PathBuf::from("artikel.xlsx"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ImportConfig::default();
        config.output.sheet_name = "Export".to_string();
        config.save(&path).unwrap();

        let loaded = ImportConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.sheet_name, "Export");
    }
}
