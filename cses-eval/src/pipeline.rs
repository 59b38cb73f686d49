//! One evaluation run per clicked gauge, with a single fallback.
//!
//! A run is parameterized by a model and a window policy. The primary run
//! uses the request's model and date window; if it fails with an error the
//! [`FallbackPolicy`] accepts, one default run follows with the default
//! model and the first 45 joined rows. Results are never mixed between
//! the two runs and the default run's error is returned as-is.

use cses_core::align::{align, AlignedPair, WindowPolicy, DEFAULT_ROW_LIMIT};
use cses_core::date_window::DateWindow;
use cses_core::gauge::{GaugeFeature, ModelId};
use cses_core::locator::{SeriesKeys, OBSERVED_FLOW_COLUMN};
use cses_core::metrics::MetricsResult;
use cses_core::series::TimeSeries;
use cses_core::store::ObjectStore;
use cses_core::{ErrorKind, EvalError, Result};
use log::{info, warn};

/// Which configuration produced an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The request's own model and date window
    Primary,
    /// The default model and a fixed number of leading rows
    Default,
}

/// Which primary-run failures switch to the default configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Every failure falls back.
    #[default]
    AnyFailure,
    /// Only unusable request inputs and missing objects fall back;
    /// alignment, metric and retrieval failures are returned.
    InputOrMissing,
}

impl FallbackPolicy {
    pub fn accepts(&self, err: &EvalError) -> bool {
        match self {
            FallbackPolicy::AnyFailure => true,
            FallbackPolicy::InputOrMissing => {
                matches!(err.kind(), ErrorKind::Input | ErrorKind::NotFound)
            }
        }
    }
}

/// Arguments of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: Mode,
    pub model: ModelId,
    pub window: WindowPolicy,
}

impl RunConfig {
    /// The request's configuration, read from the feature's stamped values.
    pub fn primary(feature: &GaugeFeature) -> Result<RunConfig> {
        let model = ModelId::parse(feature.model_id.as_deref().unwrap_or(""))?;
        let window = DateWindow::parse(feature.start_date.as_deref(), feature.end_date.as_deref())?;
        Ok(RunConfig {
            mode: Mode::Primary,
            model,
            window: WindowPolicy::Slice(window),
        })
    }

    pub fn default_configuration() -> RunConfig {
        RunConfig {
            mode: Mode::Default,
            model: ModelId::default_model(),
            window: WindowPolicy::Truncate(DEFAULT_ROW_LIMIT),
        }
    }
}

/// Aligned flows and scores for one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub mode: Mode,
    pub model: ModelId,
    pub station_id: String,
    pub aligned: AlignedPair,
    pub metrics: MetricsResult,
}

/// Runs evaluations against an injected object store.
pub struct Evaluator<S> {
    store: S,
    policy: FallbackPolicy,
}

impl<S: ObjectStore> Evaluator<S> {
    pub fn new(store: S) -> Evaluator<S> {
        Evaluator {
            store,
            policy: FallbackPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Evaluator<S> {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluate a gauge, falling back to the default configuration once.
    pub async fn evaluate(&self, feature: &GaugeFeature) -> Result<Evaluation> {
        let primary = match RunConfig::primary(feature) {
            Ok(config) => self.run(feature, &config).await,
            Err(e) => Err(e),
        };
        match primary {
            Ok(evaluation) => Ok(evaluation),
            Err(e) if self.policy.accepts(&e) => {
                warn!(
                    "Site {}: {}; using default configuration",
                    feature.station_id, e
                );
                self.run(feature, &RunConfig::default_configuration()).await
            }
            Err(e) => Err(e),
        }
    }

    /// Locate, load, align and score under one configuration.
    pub async fn run(&self, feature: &GaugeFeature, config: &RunConfig) -> Result<Evaluation> {
        let keys = SeriesKeys::locate(feature, &config.model);
        info!(
            "Evaluating {} at site {} ({:?})",
            config.model, feature.station_id, config.mode
        );

        let body = self.store.get(&keys.observed).await?;
        let observed = TimeSeries::from_csv(&keys.observed, &body, OBSERVED_FLOW_COLUMN)?;
        let body = self.store.get(&keys.modeled).await?;
        let modeled = TimeSeries::from_csv(&keys.modeled, &body, &config.model.flow_column())?;

        let aligned = align(observed, modeled, config.window)?;
        let metrics = MetricsResult::compute(&aligned.observed(), &aligned.modeled())?;
        info!(
            "Site {}: {} days, RMSE {} cfs, KGE {}",
            feature.station_id,
            aligned.len(),
            metrics.rmse,
            metrics.kge.kge
        );
        Ok(Evaluation {
            mode: config.mode,
            model: config.model.clone(),
            station_id: feature.station_id.clone(),
            aligned,
            metrics,
        })
    }
}
