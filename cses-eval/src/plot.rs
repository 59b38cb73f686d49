use crate::pipeline::{Evaluation, Mode};
use cses_utils::dates::format_date;
use serde::{Deserialize, Serialize};

pub const OBSERVED_SERIES_NAME: &str = "USGS Observed";
pub const DEFAULT_CONFIGURATION: &str = "Default Configuration";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Streamflow (cfs)";

const LINE_WIDTH: u32 = 2;
const OBSERVED_COLOR: &str = "blue";
const MODELED_COLOR: &str = "red";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: u32,
    pub color: String,
}

/// One named line of the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub mode: String,
    /// ISO dates
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            xaxis: Axis {
                title: X_AXIS_TITLE.to_string(),
            },
            yaxis: Axis {
                title: Y_AXIS_TITLE.to_string(),
            },
        }
    }
}

/// Title, observed and modeled lines, and axis labels for one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub title: String,
    pub series: Vec<LineSeries>,
    pub layout: Layout,
}

fn line(name: String, x: Vec<String>, y: Vec<f64>, color: &str) -> LineSeries {
    LineSeries {
        name,
        mode: "lines".to_string(),
        x,
        y,
        line: LineStyle {
            width: LINE_WIDTH,
            color: color.to_string(),
        },
    }
}

impl PlotData {
    pub fn from_evaluation(evaluation: &Evaluation) -> PlotData {
        let metrics = &evaluation.metrics;
        let (heading, modeled_name) = match evaluation.mode {
            Mode::Primary => (
                format!("{} and Observed", evaluation.model),
                format!("{} Modeled", evaluation.model),
            ),
            Mode::Default => (
                format!("{}: {} and Observed", DEFAULT_CONFIGURATION, evaluation.model),
                format!("{}: {} Modeled", DEFAULT_CONFIGURATION, evaluation.model.label()),
            ),
        };
        let title = format!(
            "{} Streamflow at USGS site: {} <br> RMSE: {} cfs <br> KGE: {} <br> MaxError: {} cfs",
            heading, evaluation.station_id, metrics.rmse, metrics.kge.kge, metrics.max_error
        );

        let x: Vec<String> = evaluation.aligned.points.iter().map(|p| format_date(&p.date)).collect();
        PlotData {
            title,
            series: vec![
                line(
                    OBSERVED_SERIES_NAME.to_string(),
                    x.clone(),
                    evaluation.aligned.observed(),
                    OBSERVED_COLOR,
                ),
                line(modeled_name, x, evaluation.aligned.modeled(), MODELED_COLOR),
            ],
            layout: Layout::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
