//! Gauge station layer for a state.
//!
//! The layer is the state's StreamStats GeoJSON with every feature
//! stamped with the request's model and ISO dates, so that clicking a
//! feature later carries everything the evaluation needs. When the request
//! cannot be honored the default state's layer is returned unstamped.

use crate::plot::PlotData;
use crate::pipeline::Evaluator;
use cses_core::catalog::StateEntry;
use cses_core::date_window::DateWindow;
use cses_core::gauge::{GaugeFeature, ModelId, DEFAULT_STATE};
use cses_core::locator::stations_key;
use cses_core::store::ObjectStore;
use cses_core::{EvalError, Result};
use cses_utils::dates::format_date;
use cses_utils::request::non_empty;
use log::{info, warn};
use serde_json::{json, Map, Value};

/// Name of the layer whose features can be plotted.
pub const STATIONS_LAYER_NAME: &str = "USGS Stations";

/// Raw query values as submitted by the map form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRequest {
    pub state_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub model_id: Option<String>,
}

/// Map extent, `[min_x, min_y, max_x, max_y]` in degrees.
pub type Extent = [f64; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct StationLayer {
    pub state: String,
    pub extent: Extent,
    /// Whether request values were stamped onto the features
    pub stamped: bool,
    pub geojson: Value,
}

/// Bounding box of every coordinate pair in a feature collection.
pub fn total_bounds(collection: &Value) -> Option<Extent> {
    fn visit(coords: &Value, bounds: &mut Option<Extent>) {
        let Some(items) = coords.as_array() else {
            return;
        };
        match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
            (Some(x), Some(y)) => {
                let b = bounds.get_or_insert([x, y, x, y]);
                b[0] = b[0].min(x);
                b[1] = b[1].min(y);
                b[2] = b[2].max(x);
                b[3] = b[3].max(y);
            }
            _ => items.iter().for_each(|item| visit(item, bounds)),
        }
    }

    let mut bounds = None;
    for feature in collection.get("features")?.as_array()? {
        if let Some(coords) = feature.get("geometry").and_then(|g| g.get("coordinates")) {
            visit(coords, &mut bounds);
        }
    }
    bounds
}

fn parse_collection(key: &str, body: &[u8]) -> Result<(Value, Extent)> {
    let malformed = |reason: String| EvalError::MalformedData {
        key: key.to_string(),
        reason,
    };
    let collection: Value =
        serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;
    let extent = total_bounds(&collection)
        .ok_or_else(|| malformed("no feature coordinates".to_string()))?;
    Ok((collection, extent))
}

fn stamp_features(collection: &mut Value, window: &DateWindow, model: &ModelId) {
    let Some(features) = collection.get_mut("features").and_then(Value::as_array_mut) else {
        return;
    };
    for feature in features {
        let Some(object) = feature.as_object_mut() else {
            continue;
        };
        let properties = object
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(props) = properties.as_object_mut() {
            props.insert("startdate".to_string(), json!(format_date(&window.start)));
            props.insert("enddate".to_string(), json!(format_date(&window.end)));
            props.insert("model_id".to_string(), json!(model.as_str()));
        }
    }
}

impl<S: ObjectStore> Evaluator<S> {
    async fn fetch_layer(&self, state: &str) -> Result<(Value, Extent)> {
        let key = stations_key(state);
        let body = self.store().get(&key).await?;
        parse_collection(&key, &body)
    }

    async fn requested_layer(&self, request: &LayerRequest) -> Result<StationLayer> {
        let raw_state = non_empty(request.state_id.as_deref())
            .ok_or_else(|| EvalError::InvalidInput("state id is missing".to_string()))?;
        let state = StateEntry::find(raw_state)
            .ok_or_else(|| EvalError::InvalidInput(format!("unknown state '{}'", raw_state)))?
            .code;
        let window = DateWindow::parse(request.start_date.as_deref(), request.end_date.as_deref())?;
        let model = ModelId::parse(request.model_id.as_deref().unwrap_or(""))?;

        let (mut geojson, extent) = self.fetch_layer(&state).await?;
        stamp_features(&mut geojson, &window, &model);
        if let Some(object) = geojson.as_object_mut() {
            object.insert(
                "crs".to_string(),
                json!({ "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } }),
            );
        }
        Ok(StationLayer {
            state,
            extent,
            stamped: true,
            geojson,
        })
    }

    /// Build the station layer for a request, or the default state's layer.
    pub async fn station_layer(&self, request: &LayerRequest) -> Result<StationLayer> {
        match self.requested_layer(request).await {
            Ok(layer) => {
                info!("Loaded station layer for {}", layer.state);
                Ok(layer)
            }
            Err(e) => {
                warn!("{}; mapping default state {}", e, DEFAULT_STATE);
                let (geojson, extent) = self.fetch_layer(DEFAULT_STATE).await?;
                Ok(StationLayer {
                    state: DEFAULT_STATE.to_string(),
                    extent,
                    stamped: false,
                    geojson,
                })
            }
        }
    }

    /// Plot data for a clicked feature. Only station features plot.
    pub async fn plot_for_layer_feature(
        &self,
        layer_name: &str,
        properties: &Map<String, Value>,
    ) -> Result<Option<PlotData>> {
        if layer_name != STATIONS_LAYER_NAME {
            return Ok(None);
        }
        let feature = GaugeFeature::from_properties(properties)?;
        let evaluation = self.evaluate(&feature).await?;
        Ok(Some(PlotData::from_evaluation(&evaluation)))
    }
}
