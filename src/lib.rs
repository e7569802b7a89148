//! Normalizes time series held in one of three frame layouts into a single canonical list of
//! metric references.
//!
//! - [`MultiFrameSeries`]: one frame per metric, each a time field and a value field.
//! - [`WideFrameSeries`]: one frame with a shared time field and one value field per metric.
//! - [`LongSeries`]: one frame of rows, each carrying a timestamp, values and label values.
//!
//! All three implement [`SeriesCollectionReader`], so consumers read them the same way.

pub mod common;
pub mod config;
pub mod data;
mod error;
pub mod series;

#[cfg(test)]
mod tests;

pub use common::types::Timestamp;
pub use common::{Label, Labels};
pub use config::SeriesSettings;
pub use data::{Field, FieldType, FieldValues, Frame, FrameMeta, FrameType};
pub use error::{SeriesError, SeriesResult};
pub use series::{
    LongSeries, MetricRef, MetricRefs, MultiFrameSeries, SeriesCollection, SeriesCollectionReader,
    WideFrameSeries,
};
