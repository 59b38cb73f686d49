use crate::error::{EvalError, Result};
use cses_utils::request::non_empty;
use serde_json::{Map, Value};
use std::fmt;

/// Model used when the request's own selection cannot be evaluated.
pub const DEFAULT_MODEL: &str = "NWM_v2.1";

/// State whose stations are mapped when the request's own state cannot be loaded.
pub const DEFAULT_STATE: &str = "AL";

/// Identifier of a hydrologic model, e.g. `NWM_v2.1` or `LSTM`.
///
/// The identifier doubles as the top-level directory of the model's
/// output in the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    /// Parse a raw (possibly list-wrapped) request value.
    pub fn parse(raw: &str) -> Result<Self> {
        non_empty(Some(raw))
            .map(|id| ModelId(id.to_string()))
            .ok_or_else(|| EvalError::InvalidInput("model id is empty".to_string()))
    }

    /// The fixed fallback model.
    pub fn default_model() -> Self {
        ModelId(DEFAULT_MODEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three characters, used to name the model's flow column.
    pub fn prefix(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(3)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }

    /// Name of the flow column in this model's CSV files, e.g. `NWM_flow`.
    pub fn flow_column(&self) -> String {
        format!("{}_flow", self.prefix())
    }

    /// Human-readable label: `NWM_v2.1` becomes `NWM v2.1`.
    pub fn label(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A gauge station feature as clicked on the map.
///
/// Station, segment and state identify where the data lives. Model and
/// dates are whatever the station layer stamped onto the feature; they
/// stay raw here and are only parsed on the primary evaluation path, so
/// that a missing or garbled value can still fall back to the default
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeFeature {
    /// USGS station id, e.g. "02342500"
    pub station_id: String,
    /// Linked NHD segment id in the model network
    pub segment_id: String,
    /// Two-letter state code
    pub state: String,
    pub model_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn property_string(props: &Map<String, Value>, name: &str) -> Option<String> {
    match props.get(name)? {
        Value::String(s) => non_empty(Some(s.as_str())).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl GaugeFeature {
    /// Read a feature from its GeoJSON properties.
    ///
    /// Expected keys: `id`, `NHD_id`, `state`, and optionally `model_id`,
    /// `startdate`, `enddate`.
    pub fn from_properties(props: &Map<String, Value>) -> Result<GaugeFeature> {
        let required = |name: &str| {
            property_string(props, name).ok_or_else(|| {
                EvalError::InvalidInput(format!("feature property '{}' is missing", name))
            })
        };
        Ok(GaugeFeature {
            station_id: required("id")?,
            segment_id: required("NHD_id")?,
            state: required("state")?,
            model_id: property_string(props, "model_id"),
            start_date: property_string(props, "startdate"),
            end_date: property_string(props, "enddate"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_prefix_and_column() {
        let model = ModelId::parse("NWM_v3.0").unwrap();
        assert_eq!(model.prefix(), "NWM");
        assert_eq!(model.flow_column(), "NWM_flow");
        let lstm = ModelId::parse("[LSTM]").unwrap();
        assert_eq!(lstm.as_str(), "LSTM");
        assert_eq!(lstm.flow_column(), "LST_flow");
        let short = ModelId::parse("AB").unwrap();
        assert_eq!(short.prefix(), "AB");
    }

    #[test]
    fn test_default_model_label() {
        assert_eq!(ModelId::default_model().label(), "NWM v2.1");
        assert_eq!(ModelId::default_model().to_string(), "NWM_v2.1");
    }

    #[test]
    fn test_empty_model_is_invalid_input() {
        assert!(matches!(ModelId::parse("  "), Err(EvalError::InvalidInput(_))));
        assert!(matches!(ModelId::parse("[]"), Err(EvalError::InvalidInput(_))));
    }

    #[test]
    fn test_from_properties() {
        let props = json!({
            "id": "02342500",
            "NHD_id": 2044281,
            "state": "AL",
            "model_id": "NWM_v2.1",
            "startdate": "2019-01-01",
            "enddate": "2019-06-11"
        });
        let feature = GaugeFeature::from_properties(props.as_object().unwrap()).unwrap();
        assert_eq!(feature.station_id, "02342500");
        assert_eq!(feature.segment_id, "2044281");
        assert_eq!(feature.state, "AL");
        assert_eq!(feature.model_id.as_deref(), Some("NWM_v2.1"));
        assert_eq!(feature.end_date.as_deref(), Some("2019-06-11"));
    }

    #[test]
    fn test_from_properties_without_request_stamp() {
        let props = json!({ "id": "02342500", "NHD_id": "2044281", "state": "AL" });
        let feature = GaugeFeature::from_properties(props.as_object().unwrap()).unwrap();
        assert_eq!(feature.model_id, None);
        assert_eq!(feature.start_date, None);
    }

    #[test]
    fn test_from_properties_missing_station() {
        let props = json!({ "NHD_id": "2044281", "state": "AL" });
        let err = GaugeFeature::from_properties(props.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidInput(_)));
    }
}
