//! Evaluation of modeled streamflow against USGS observations.

pub mod pipeline;
pub mod plot;
pub mod stations;

#[cfg(test)]
mod test_support;
