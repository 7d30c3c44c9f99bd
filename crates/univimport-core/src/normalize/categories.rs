//! Categorical remapping of load carriers and units.

use crate::models::config::LoadCarrierRule;
use crate::models::Cell;

/// Unit label that the logistics system knows under [`CONTAINER_LABEL`].
pub const CONTAINER_UNIT: &str = "container";

/// Relabeled container unit.
pub const CONTAINER_LABEL: &str = "UMK";

/// Map a load-carrier description to its canonical label.
///
/// The lower-cased text is tested against the rules in order; the first
/// rule whose needle it contains wins. Non-text cells map to empty.
pub fn map_load_carrier(cell: &Cell, rules: &[LoadCarrierRule]) -> String {
    let Cell::Text(text) = cell else {
        return String::new();
    };

    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| lowered.contains(&rule.needle))
        .map(|rule| rule.label.clone())
        .unwrap_or_default()
}

/// Relabel the container unit; every other value passes through.
pub fn normalize_unit(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) if s.trim().eq_ignore_ascii_case(CONTAINER_UNIT) => {
            Some(CONTAINER_LABEL.to_string())
        }
        other => Some(other.text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::MappingConfig;

    #[test]
    fn test_map_load_carrier() {
        let rules = MappingConfig::default().load_carriers;

        assert_eq!(map_load_carrier(&Cell::from("Euro-Pool"), &rules), "Euro");
        assert_eq!(map_load_carrier(&Cell::from("EURO Palette"), &rules), "Euro");
        assert_eq!(map_load_carrier(&Cell::from("H1 Kunststoff"), &rules), "H1");
        assert_eq!(map_load_carrier(&Cell::from("Industriepalette"), &rules), "Industrie");
        assert_eq!(map_load_carrier(&Cell::from("Gitterbox"), &rules), "");
        assert_eq!(map_load_carrier(&Cell::Int(1), &rules), "");
        assert_eq!(map_load_carrier(&Cell::Empty, &rules), "");
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = vec![
            LoadCarrierRule::new("h1", "H1"),
            LoadCarrierRule::new("euro", "Euro"),
        ];
        assert_eq!(map_load_carrier(&Cell::from("Euro H1"), &rules), "H1");
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit(&Cell::from("Container")), Some("UMK".to_string()));
        assert_eq!(normalize_unit(&Cell::from(" CONTAINER ")), Some("UMK".to_string()));
        assert_eq!(normalize_unit(&Cell::from("Karton")), Some("Karton".to_string()));
        assert_eq!(normalize_unit(&Cell::from("Containerware")), Some("Containerware".to_string()));
        assert_eq!(normalize_unit(&Cell::Int(5)), Some("5".to_string()));
        assert_eq!(normalize_unit(&Cell::Empty), None);
    }
}
