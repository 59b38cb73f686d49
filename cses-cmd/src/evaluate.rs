//! Evaluate, station layer and catalog listing commands.

use crate::store::StoreArgs;
use cses_core::catalog::{ModelEntry, StateEntry};
use cses_core::gauge::GaugeFeature;
use cses_core::store::ObjectStore;
use cses_eval::pipeline::{Evaluation, Evaluator, FallbackPolicy, Mode};
use cses_eval::plot::PlotData;
use cses_eval::stations::{LayerRequest, StationLayer};
use log::info;

/// A gauge and the request values to score it with.
#[derive(Debug, Clone)]
pub struct GaugeRequest {
    pub state: String,
    pub station: String,
    pub segment: String,
    pub model: String,
    pub start: String,
    pub end: String,
}

impl GaugeRequest {
    /// The clicked-feature form of this request.
    pub fn feature(&self) -> GaugeFeature {
        GaugeFeature {
            station_id: self.station.clone(),
            segment_id: self.segment.clone(),
            state: self.state.clone(),
            model_id: Some(self.model.clone()),
            start_date: Some(self.start.clone()),
            end_date: Some(self.end.clone()),
        }
    }
}

fn emit(body: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            info!("Wrote {}", path);
        }
        None => println!("{}", body),
    }
    Ok(())
}

/// Score one gauge and return the evaluation behind the plot.
pub async fn evaluate_gauge<S: ObjectStore>(
    store: S,
    policy: FallbackPolicy,
    request: &GaugeRequest,
) -> anyhow::Result<Evaluation> {
    let evaluator = Evaluator::new(store).with_policy(policy);
    Ok(evaluator.evaluate(&request.feature()).await?)
}

/// Score one gauge and write its plot JSON.
pub async fn run_evaluate(
    request: &GaugeRequest,
    output: Option<&str>,
    store: &StoreArgs,
) -> anyhow::Result<()> {
    let evaluation = evaluate_gauge(store.open()?, store.policy(), request).await?;
    let metrics = &evaluation.metrics;
    if evaluation.mode == Mode::Default {
        info!(
            "{} could not be evaluated; showing default configuration",
            request.model
        );
    }
    info!(
        "R2 {} | RMSE {} cfs | MaxError {} cfs | MAPE {}% | KGE {}",
        metrics.r2, metrics.rmse, metrics.max_error, metrics.mape, metrics.kge.kge
    );
    emit(&PlotData::from_evaluation(&evaluation).to_json()?, output)
}

pub async fn station_layer<S: ObjectStore>(
    store: S,
    request: &LayerRequest,
) -> anyhow::Result<StationLayer> {
    Ok(Evaluator::new(store).station_layer(request).await?)
}

/// Build a state's station layer and write its GeoJSON.
pub async fn run_stations(
    request: &LayerRequest,
    output: Option<&str>,
    store: &StoreArgs,
) -> anyhow::Result<()> {
    let layer = station_layer(store.open()?, request).await?;
    let [min_x, min_y, max_x, max_y] = layer.extent;
    info!(
        "Stations for {} within [{}, {}, {}, {}]",
        layer.state, min_x, min_y, max_x, max_y
    );
    emit(&serde_json::to_string_pretty(&layer.geojson)?, output)
}

/// Print the model and state catalogs.
pub fn run_list_catalogs() -> anyhow::Result<()> {
    println!("Models:");
    for model in ModelEntry::catalog()? {
        println!("  {:<10} {}", model.id, model.name);
    }
    println!("States:");
    for state in StateEntry::catalog()? {
        println!("  {}  {}", state.code, state.name);
    }
    Ok(())
}
