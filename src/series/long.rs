use ahash::HashMap;
use smallvec::SmallVec;

use super::{
    classify_fields, ensure_aligned, ensure_unique_identities, log_read_result, MetricRef,
    MetricRefs, SeriesCollectionReader,
};
use crate::common::types::Timestamp;
use crate::common::Labels;
use crate::config::SeriesSettings;
use crate::data::{Field, Frame, FrameType};
use crate::error::{SeriesError, SeriesResult};

/// A single frame where each row is one observation: a timestamp, one or more values, and the
/// label values the observation belongs to. Several series are interleaved by row.
#[derive(Debug, Clone, PartialEq)]
pub struct LongSeries {
    frame: Frame,
}

impl Default for LongSeries {
    fn default() -> Self {
        Self::new()
    }
}

/// Label values of one row, in label field declaration order. `None` is a null label value.
type GroupKey<'a> = SmallVec<[Option<&'a str>; 4]>;

/// Rows sharing one label combination, in row order.
#[derive(Debug)]
struct RowGroup {
    labels: Labels,
    rows: Vec<usize>,
}

impl LongSeries {
    pub fn new() -> Self {
        Self::with_settings(SeriesSettings::default())
    }

    pub fn with_settings(settings: SeriesSettings) -> Self {
        Self {
            frame: Frame::new(settings.frame_name, vec![]).with_type(FrameType::TimeSeriesLong),
        }
    }

    /// Wraps a frame built elsewhere. Layout is validated when the collection is read.
    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn into_frame(self) -> Frame {
        self.frame
    }

    /// Sets the time field, placing it first. Fails if one is present, if the name is taken,
    /// or if it is not aligned with the existing fields.
    pub fn set_time<N: Into<String>>(&mut self, name: N, values: Vec<Timestamp>) -> SeriesResult<()> {
        let name = name.into();
        if let Some(time) = self.frame.fields.iter().find(|f| f.field_type().is_time()) {
            return Err(SeriesError::TimeAlreadySet(time.name.clone()));
        }
        if self.frame.fields.iter().any(|f| f.name == name) {
            return Err(SeriesError::DuplicateTimeName(name));
        }
        if let Some(first) = self.frame.fields.first() {
            if first.len() != values.len() {
                return Err(SeriesError::length_mismatch(&name, first.len(), values.len()));
            }
        }
        self.frame.fields.insert(0, Field::time(name, values));
        Ok(())
    }

    /// Appends a value, label or any other field. It must be aligned with the existing fields.
    pub fn push_field(&mut self, field: Field) -> SeriesResult<()> {
        self.frame.push_field(field)
    }
}

/// Splits rows 0..len into groups keyed by their label values. Groups are returned in order of
/// first appearance.
fn group_rows(len: usize, label_fields: &[&Field]) -> Vec<RowGroup> {
    let mut groups: Vec<RowGroup> = vec![];
    let mut index: HashMap<GroupKey, usize> = HashMap::default();
    for row in 0..len {
        let key: GroupKey = label_fields
            .iter()
            .map(|field| field.values.str_at(row))
            .collect();
        let next = groups.len();
        let group_idx = *index.entry(key).or_insert_with_key(|key| {
            let labels = label_fields
                .iter()
                .zip(key.iter())
                .filter_map(|(field, value)| value.map(|v| (field.name.as_str(), v)))
                .collect();
            groups.push(RowGroup {
                labels,
                rows: vec![],
            });
            next
        });
        groups[group_idx].rows.push(row);
    }
    groups
}

impl SeriesCollectionReader for LongSeries {
    fn get_metric_refs(&self) -> SeriesResult<MetricRefs<'_>> {
        if !self.frame.is_type(FrameType::TimeSeriesLong) {
            return Err(SeriesError::UnrecognizedFormat(format!(
                "frame is not marked {}",
                FrameType::TimeSeriesLong
            )));
        }
        if self.frame.fields.is_empty() {
            return Ok(MetricRefs::default());
        }

        let classes = classify_fields(&self.frame, true);
        let Some(time) = classes.time else {
            return Err(SeriesError::MissingTimeField(
                "long frame has no time field".to_string(),
            ));
        };
        if classes.values.is_empty() {
            return Err(SeriesError::MissingValueField(
                "long frame has no numeric field".to_string(),
            ));
        }
        ensure_aligned(time, &classes.values)?;
        ensure_aligned(time, &classes.labels)?;

        let groups = group_rows(time.len(), &classes.labels);
        let mut refs = Vec::with_capacity(groups.len() * classes.values.len());
        for value in classes.values.iter() {
            for group in groups.iter() {
                let time_field = Field {
                    name: time.name.clone(),
                    labels: time.labels.clone(),
                    values: time.values.take(&group.rows),
                };
                // labels already on the value field are kept; row labels win on conflict
                let mut labels = value.labels.clone();
                for (name, v) in group.labels.iter() {
                    labels.insert(name, v);
                }
                let value_field = Field {
                    name: value.name.clone(),
                    labels,
                    values: value.values.take(&group.rows),
                };
                if time_field.len() != value_field.len() {
                    return Err(SeriesError::InconsistentGrouping {
                        metric: value_field.display_name(),
                        times: time_field.len(),
                        values: value_field.len(),
                    });
                }
                refs.push(MetricRef::owned(time_field, value_field));
            }
        }
        ensure_unique_identities(&refs)?;

        let res = MetricRefs::new(refs, classes.extra);
        log_read_result(FrameType::TimeSeriesLong, &res);
        Ok(res)
    }
}
