//! Shared fixtures for the evaluation tests.

use chrono::NaiveDate;
use cses_core::date_window::DateWindow;
use cses_core::gauge::{GaugeFeature, ModelId};
use cses_core::locator::{modeled_key, observed_key, stations_key};
use cses_core::store::MemoryStore;
use serde_json::json;

pub const STATION: &str = "02342500";
pub const SEGMENT: &str = "2044281";
pub const STATE: &str = "AL";

/// Model whose output matches the observations exactly.
pub const EVALUATED_MODEL: &str = "LSTM";

fn fixture_days() -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 3, 31).unwrap();
    DateWindow::new(start, end).days().collect()
}

fn observed_flow(i: usize) -> f64 {
    100.0 + 2.0 * i as f64
}

fn observed_csv() -> String {
    let mut csv = String::from(",Datetime,USGS_flow,USGS_id\n");
    for (i, day) in fixture_days().iter().enumerate() {
        csv.push_str(&format!("{},{},{},{}\n", i, day, observed_flow(i), STATION));
    }
    // a repeated reading for the first day, dropped by de-duplication
    csv.push_str(&format!("91,2020-01-01,999.0,{}\n", STATION));
    csv
}

fn modeled_csv(model: &ModelId, scale: f64) -> String {
    let mut csv = format!(",NHD_id,Datetime,{}\n", model.flow_column());
    for (i, day) in fixture_days().iter().enumerate() {
        csv.push_str(&format!("{},{},{} 00:00:00,{}\n", i, SEGMENT, day, observed_flow(i) * scale));
    }
    // model output beyond the observed record
    csv.push_str(&format!("91,{},2020-04-01 00:00:00,1.0\n", SEGMENT));
    csv
}

fn stations_geojson(state: &str, lon: f64) -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [lon, 31.5] },
                "properties": { "id": STATION, "NHD_id": SEGMENT, "state": state }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [lon + 1.5, 33.0] },
                "properties": { "id": "02369800", "NHD_id": "2045000", "state": state }
            }
        ]
    })
    .to_string()
}

/// A store with one Alabama gauge, the default model and `LSTM`.
pub fn fixture_store() -> MemoryStore {
    let default_model = ModelId::default_model();
    let evaluated = ModelId::parse(EVALUATED_MODEL).unwrap();
    MemoryStore::new()
        .with(observed_key(STATE, STATION), observed_csv())
        .with(modeled_key(&default_model, STATE, SEGMENT), modeled_csv(&default_model, 1.1))
        .with(modeled_key(&evaluated, STATE, SEGMENT), modeled_csv(&evaluated, 1.0))
        .with(stations_key(STATE), stations_geojson(STATE, -88.0))
        .with(stations_key("GA"), stations_geojson("GA", -84.0))
}

pub fn feature(model: &str, start: &str, end: &str) -> GaugeFeature {
    GaugeFeature {
        station_id: STATION.to_string(),
        segment_id: SEGMENT.to_string(),
        state: STATE.to_string(),
        model_id: Some(model.to_string()),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
    }
}
