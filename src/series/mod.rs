use std::borrow::Cow;
use std::fmt::Display;

use ahash::HashSet;
use tracing::{debug, trace};

use crate::common::Labels;
use crate::data::{Field, FieldType, Frame, FrameType};
use crate::error::{SeriesError, SeriesResult};

mod long;
mod multi;
mod wide;

pub use long::*;
pub use multi::*;
pub use wide::*;

/// A (time field, value field) pair identifying one logical series.
///
/// Multi and wide collections lend out the fields they own; long collections build new fields
/// from the grouped rows, so both halves are `Cow`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRef<'a> {
    pub time: Cow<'a, Field>,
    pub value: Cow<'a, Field>,
}

impl<'a> MetricRef<'a> {
    pub fn borrowed(time: &'a Field, value: &'a Field) -> Self {
        Self {
            time: Cow::Borrowed(time),
            value: Cow::Borrowed(value),
        }
    }

    pub fn owned(time: Field, value: Field) -> Self {
        Self {
            time: Cow::Owned(time),
            value: Cow::Owned(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.value.name
    }

    pub fn labels(&self) -> &Labels {
        &self.value.labels
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_owned(self) -> MetricRef<'static> {
        MetricRef {
            time: Cow::Owned(self.time.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl Display for MetricRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value.display_name())
    }
}

/// Result of reading a series collection: the canonical refs plus any fields that were not
/// recognized as time, value or label fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricRefs<'a> {
    pub refs: Vec<MetricRef<'a>>,
    pub extra_fields: Vec<&'a Field>,
}

impl<'a> MetricRefs<'a> {
    pub fn new(refs: Vec<MetricRef<'a>>, extra_fields: Vec<&'a Field>) -> Self {
        Self { refs, extra_fields }
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn has_extra_fields(&self) -> bool {
        !self.extra_fields.is_empty()
    }
}

/// Uniform read access to a time series collection, independent of its layout.
pub trait SeriesCollectionReader {
    /// Returns one ref per logical series in canonical order, plus the fields that could not be
    /// classified. Reading never mutates the collection, so repeated calls return equal results.
    fn get_metric_refs(&self) -> SeriesResult<MetricRefs<'_>>;
}

/// Any of the three layouts, chosen by the frames' format marker.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesCollection {
    Multi(MultiFrameSeries),
    Wide(WideFrameSeries),
    Long(LongSeries),
}

impl SeriesCollection {
    /// Wraps producer-built frames, dispatching on the first frame's type marker.
    /// Wide and long layouts must consist of a single frame.
    pub fn from_frames(frames: Vec<Frame>) -> SeriesResult<Self> {
        let Some(first) = frames.first() else {
            return Err(SeriesError::UnrecognizedFormat(
                "no frames to detect a layout from".to_string(),
            ));
        };
        let Some(frame_type) = first.frame_type() else {
            return Err(SeriesError::UnrecognizedFormat(
                "frame has no type marker".to_string(),
            ));
        };
        if frame_type != FrameType::TimeSeriesMulti && frames.len() != 1 {
            return Err(SeriesError::UnrecognizedFormat(format!(
                "{} layout expects a single frame, got {}",
                frame_type,
                frames.len()
            )));
        }
        let res = match frame_type {
            FrameType::TimeSeriesMulti => SeriesCollection::Multi(MultiFrameSeries::from_frames(frames)),
            FrameType::TimeSeriesWide => {
                SeriesCollection::Wide(WideFrameSeries::from_frame(frames.into_iter().next().unwrap_or_default()))
            }
            FrameType::TimeSeriesLong => {
                SeriesCollection::Long(LongSeries::from_frame(frames.into_iter().next().unwrap_or_default()))
            }
        };
        Ok(res)
    }

    pub fn frame_type(&self) -> FrameType {
        match self {
            SeriesCollection::Multi(_) => FrameType::TimeSeriesMulti,
            SeriesCollection::Wide(_) => FrameType::TimeSeriesWide,
            SeriesCollection::Long(_) => FrameType::TimeSeriesLong,
        }
    }

    pub fn into_frames(self) -> Vec<Frame> {
        match self {
            SeriesCollection::Multi(s) => s.into_frames(),
            SeriesCollection::Wide(s) => vec![s.into_frame()],
            SeriesCollection::Long(s) => vec![s.into_frame()],
        }
    }
}

impl SeriesCollectionReader for SeriesCollection {
    fn get_metric_refs(&self) -> SeriesResult<MetricRefs<'_>> {
        match self {
            SeriesCollection::Multi(s) => s.get_metric_refs(),
            SeriesCollection::Wide(s) => s.get_metric_refs(),
            SeriesCollection::Long(s) => s.get_metric_refs(),
        }
    }
}

/// A frame's fields sorted into the roles a reader understands.
#[derive(Debug, Default)]
pub(crate) struct FieldClasses<'a> {
    pub time: Option<&'a Field>,
    pub values: Vec<&'a Field>,
    pub labels: Vec<&'a Field>,
    pub extra: Vec<&'a Field>,
}

/// The first time field is the time field, numeric fields are values, and string fields are
/// labels when `with_labels` is set. Everything else, including further time fields, is extra.
pub(crate) fn classify_fields(frame: &Frame, with_labels: bool) -> FieldClasses<'_> {
    let mut res = FieldClasses::default();
    for field in frame.fields.iter() {
        let field_type = field.field_type();
        if field_type.is_time() && res.time.is_none() {
            res.time = Some(field);
        } else if field_type.is_numeric() {
            res.values.push(field);
        } else if with_labels && field_type.is_string() {
            res.labels.push(field);
        } else {
            res.extra.push(field);
        }
    }
    res
}

pub(crate) fn ensure_aligned(time: &Field, fields: &[&Field]) -> SeriesResult<()> {
    for field in fields {
        if !field.is_aligned_with(time) {
            return Err(SeriesError::length_mismatch(&field.name, time.len(), field.len()));
        }
    }
    Ok(())
}

pub(crate) fn ensure_numeric(name: &str, field_type: FieldType) -> SeriesResult<()> {
    if field_type.is_numeric() {
        return Ok(());
    }
    Err(SeriesError::InvalidValueType {
        name: name.to_string(),
        field_type,
    })
}

/// Fails with `DuplicateMetric` on the first ref whose (name, labels) was already seen.
pub(crate) fn ensure_unique_identities(refs: &[MetricRef<'_>]) -> SeriesResult<()> {
    let mut seen: HashSet<(&str, &Labels)> = HashSet::default();
    for r in refs {
        if !seen.insert(r.value.identity()) {
            return Err(SeriesError::DuplicateMetric(r.value.display_name()));
        }
    }
    Ok(())
}

pub(crate) fn log_read_result(frame_type: FrameType, res: &MetricRefs<'_>) {
    debug!(
        "read {} collection: {} metric refs, {} extra fields",
        frame_type,
        res.refs.len(),
        res.extra_fields.len()
    );
    for field in res.extra_fields.iter() {
        trace!("{}: extra field \"{}\" ({})", frame_type, field.name, field.field_type());
    }
}
