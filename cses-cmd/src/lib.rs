//! Command implementations for the CSES CLI.
//!
//! Provides subcommands for scoring a model at one gauge, building a
//! state's station layer, and listing the model and state catalogs.

use clap::Subcommand;
use cses_utils::dates::{PICKER_INITIAL_END, PICKER_INITIAL_START};

pub mod evaluate;
pub mod store;

use store::StoreArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Score a model's streamflow against observations at one USGS gauge
    Evaluate {
        /// Two-letter state code of the gauge
        #[arg(short = 's', long)]
        state: String,

        /// USGS station id, e.g. 02342500
        #[arg(long)]
        station: String,

        /// NHD segment id linked to the station
        #[arg(long)]
        segment: String,

        /// Model id, e.g. NWM_v2.1 or LSTM
        #[arg(short = 'm', long, default_value = cses_core::gauge::DEFAULT_MODEL)]
        model: String,

        /// First day of the window (mm-dd-yyyy)
        #[arg(long, default_value = PICKER_INITIAL_START)]
        start: String,

        /// Last day of the window (mm-dd-yyyy)
        #[arg(long, default_value = PICKER_INITIAL_END)]
        end: String,

        /// Write plot JSON here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Build the station layer GeoJSON for a state
    Stations {
        /// Two-letter state code
        #[arg(short = 's', long)]
        state: String,

        /// Model id stamped onto every station
        #[arg(short = 'm', long, default_value = cses_core::gauge::DEFAULT_MODEL)]
        model: String,

        /// First day of the window (mm-dd-yyyy)
        #[arg(long, default_value = PICKER_INITIAL_START)]
        start: String,

        /// Last day of the window (mm-dd-yyyy)
        #[arg(long, default_value = PICKER_INITIAL_END)]
        end: String,

        /// Write GeoJSON here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// List the selectable models and states
    Models,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Evaluate {
            state,
            station,
            segment,
            model,
            start,
            end,
            output,
            store,
        } => {
            let request = evaluate::GaugeRequest {
                state,
                station,
                segment,
                model,
                start,
                end,
            };
            evaluate::run_evaluate(&request, output.as_deref(), &store).await
        }
        Command::Stations {
            state,
            model,
            start,
            end,
            output,
            store,
        } => {
            let request = cses_eval::stations::LayerRequest {
                state_id: Some(state),
                start_date: Some(start),
                end_date: Some(end),
                model_id: Some(model),
            };
            evaluate::run_stations(&request, output.as_deref(), &store).await
        }
        Command::Models => evaluate::run_list_catalogs(),
    }
}
