//! Core types and data wrangling for streamflow model evaluation.
//!
//! Observed (USGS NWIS) and modeled (National Water Model and its
//! machine-learning extensions) daily flows are read from an object
//! store, aligned on date, and scored with the usual hydrologic skill
//! metrics.

pub mod align;
pub mod catalog;
pub mod date_window;
pub mod error;
pub mod gauge;
pub mod locator;
pub mod metrics;
pub mod series;
pub mod store;

pub use error::{ErrorKind, EvalError, Result};
