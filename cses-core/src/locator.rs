//! Object-store key layout.
//!
//! The store is organized by source, then by a per-state container named
//! after the HDF5 file the CSVs were exported from:
//!
//! - observed: `NWIS/NWIS_sites_{state}.h5/NWIS_{station}.csv`
//! - modeled: `{model}/NHD_segments_{state}.h5/{model}_{segment}.csv`
//! - station layer: `GeoJSON/StreamStats_{state}_4326.geojson`
//!
//! Keys are built without checking that they exist; a missing object
//! surfaces as `NotFound` when it is fetched.

use crate::gauge::{GaugeFeature, ModelId};

/// Column holding observed flow in the NWIS CSV files.
pub const OBSERVED_FLOW_COLUMN: &str = "USGS_flow";

/// Key of the observed (USGS NWIS) series for a station.
pub fn observed_key(state: &str, station_id: &str) -> String {
    format!("NWIS/NWIS_sites_{}.h5/NWIS_{}.csv", state, station_id)
}

/// Key of a model's series for an NHD segment.
pub fn modeled_key(model: &ModelId, state: &str, segment_id: &str) -> String {
    format!(
        "{model}/NHD_segments_{}.h5/{model}_{}.csv",
        state,
        segment_id,
        model = model.as_str()
    )
}

/// Key of a state's gauge station GeoJSON layer.
pub fn stations_key(state: &str) -> String {
    format!("GeoJSON/StreamStats_{}_4326.geojson", state)
}

/// The pair of keys needed to evaluate one gauge under one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesKeys {
    pub observed: String,
    pub modeled: String,
}

impl SeriesKeys {
    pub fn locate(feature: &GaugeFeature, model: &ModelId) -> SeriesKeys {
        SeriesKeys {
            observed: observed_key(&feature.state, &feature.station_id),
            modeled: modeled_key(model, &feature.state, &feature.segment_id),
        }
    }
}
