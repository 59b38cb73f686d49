use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the selectable models.
pub static MODELS_CSV: &str = include_str!("../../fixtures/models.csv");

/// Embedded CSV data for the U.S. states with station layers.
pub static STATES_CSV: &str = include_str!("../../fixtures/states.csv");

/// A model offered for evaluation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Object-store directory and model id, e.g. "NWM_v2.1"
    pub id: String,
    /// Display name, e.g. "National Water Model v2.1"
    pub name: String,
}

/// A U.S. state with a gauge station layer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StateEntry {
    /// Two-letter code, e.g. "AL"
    pub code: String,
    pub name: String,
}

/// Parse a two-column `ID,NAME` CSV into (id, name) pairs.
fn parse_pairs(csv_object: &str) -> Result<Vec<(String, String)>, csv::Error> {
    let mut pairs = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(csv_object.as_bytes());
    for row in rdr.records() {
        let record = row?;
        let id = record.get(0).unwrap_or("").trim();
        let name = record.get(1).unwrap_or("").trim();
        if id.is_empty() {
            continue;
        }
        pairs.push((id.to_string(), name.to_string()));
    }
    Ok(pairs)
}

impl ModelEntry {
    /// Parse a CSV string of models.
    ///
    /// Expected CSV columns: id, name
    pub fn parse_model_csv(csv_object: &str) -> Result<Vec<ModelEntry>, csv::Error> {
        Ok(parse_pairs(csv_object)?
            .into_iter()
            .map(|(id, name)| ModelEntry { id, name })
            .collect())
    }

    /// All models from the embedded catalog.
    pub fn catalog() -> Result<Vec<ModelEntry>, csv::Error> {
        ModelEntry::parse_model_csv(MODELS_CSV)
    }
}

impl StateEntry {
    /// Parse a CSV string of states.
    ///
    /// Expected CSV columns: code, name
    pub fn parse_state_csv(csv_object: &str) -> Result<Vec<StateEntry>, csv::Error> {
        Ok(parse_pairs(csv_object)?
            .into_iter()
            .map(|(code, name)| StateEntry { code, name })
            .collect())
    }

    /// All states from the embedded catalog.
    pub fn catalog() -> Result<Vec<StateEntry>, csv::Error> {
        StateEntry::parse_state_csv(STATES_CSV)
    }

    /// Look up a state by its two-letter code, case-insensitively.
    pub fn find(code: &str) -> Option<StateEntry> {
        StateEntry::catalog()
            .ok()?
            .into_iter()
            .find(|s| s.code.eq_ignore_ascii_case(code.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::{DEFAULT_MODEL, DEFAULT_STATE};

    #[test]
    fn test_model_catalog() {
        let models = ModelEntry::catalog().unwrap();
        assert_eq!(models.len(), 6);
        assert_eq!(models[0].id, DEFAULT_MODEL);
        assert_eq!(models[0].name, "National Water Model v2.1");
        assert!(models.iter().any(|m| m.id == "XGBoost"));
    }

    #[test]
    fn test_state_catalog() {
        let states = StateEntry::catalog().unwrap();
        assert_eq!(states.len(), 50);
        assert!(StateEntry::find(DEFAULT_STATE).is_some());
        assert_eq!(StateEntry::find("wv").unwrap().name, "West Virginia");
        assert!(StateEntry::find("DC").is_none());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let models = ModelEntry::parse_model_csv("ID,NAME\nCNN,NWM CNN extension\n,\n").unwrap();
        assert_eq!(models.len(), 1);
    }
}
