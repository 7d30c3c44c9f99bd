//! Customer classes and the business layout each one implies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the manifest table of a customer is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Leading junk rows, then a header row with the required labels.
    HeaderSearch,
    /// No header, fixed column offsets.
    Positional,
}

/// Customer class selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Customer {
    /// Standard customer (header-search input).
    Mb,
    /// NG customer (positional input, catalog descriptions).
    Ng,
}

impl Customer {
    pub fn input_mode(self) -> InputMode {
        match self {
            Customer::Mb => InputMode::HeaderSearch,
            Customer::Ng => InputMode::Positional,
        }
    }

    /// Prefix prepended to every article id in the output.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Customer::Mb => "MB ",
            Customer::Ng => "NG ",
        }
    }

    /// Catalog rows are restricted to this customer marker.
    pub fn catalog_filter(self) -> Option<&'static str> {
        match self {
            Customer::Mb => None,
            Customer::Ng => Some("NG"),
        }
    }

    /// Whether article ids may carry a decimal fraction (`10030004.112`).
    pub fn allows_decimal_ids(self) -> bool {
        matches!(self, Customer::Ng)
    }

    /// Whether article ids are zero-padded to six digits after aggregation.
    pub fn pads_article_id(self) -> bool {
        matches!(self, Customer::Mb)
    }

    pub fn label(self) -> &'static str {
        match self {
            Customer::Mb => "MB",
            Customer::Ng => "NG",
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Customer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mb" | "standard" | "1" => Ok(Customer::Mb),
            "ng" | "2" => Ok(Customer::Ng),
            other => Err(format!("unknown customer '{}' (expected mb or ng)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_customer() {
        assert_eq!("MB".parse::<Customer>(), Ok(Customer::Mb));
        assert_eq!("standard".parse::<Customer>(), Ok(Customer::Mb));
        assert_eq!(" ng ".parse::<Customer>(), Ok(Customer::Ng));
        assert!("xx".parse::<Customer>().is_err());
    }

    #[test]
    fn test_customer_rules() {
        assert_eq!(Customer::Mb.input_mode(), InputMode::HeaderSearch);
        assert_eq!(Customer::Ng.input_mode(), InputMode::Positional);
        assert_eq!(Customer::Ng.id_prefix(), "NG ");
        assert_eq!(Customer::Ng.catalog_filter(), Some("NG"));
        assert!(Customer::Mb.catalog_filter().is_none());
        assert!(Customer::Mb.pads_article_id());
        assert!(!Customer::Mb.allows_decimal_ids());
    }
}
