use tracing::debug;

use super::{
    classify_fields, ensure_aligned, ensure_numeric, ensure_unique_identities, log_read_result,
    MetricRef, MetricRefs, SeriesCollectionReader,
};
use crate::common::types::Timestamp;
use crate::common::Labels;
use crate::config::SeriesSettings;
use crate::data::{Field, FieldValues, Frame, FrameType};
use crate::error::{SeriesError, SeriesResult};

/// One frame per metric, each holding a time field followed by a value field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiFrameSeries {
    frames: Vec<Frame>,
    settings: SeriesSettings,
}

impl MultiFrameSeries {
    pub fn new() -> Self {
        Self::with_settings(SeriesSettings::default())
    }

    pub fn with_settings(settings: SeriesSettings) -> Self {
        Self {
            frames: vec![],
            settings,
        }
    }

    /// Wraps frames built elsewhere. Layout is validated when the collection is read.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            settings: SeriesSettings::default(),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains_metric(&self, name: &str, labels: &Labels) -> bool {
        self.frames
            .iter()
            .flat_map(|frame| frame.fields.iter())
            .any(|field| field.field_type().is_numeric() && field.has_identity(name, labels))
    }

    /// Adds a metric as a new frame with its own time field. Nothing is added on error.
    pub fn add_metric<N, V>(
        &mut self,
        name: N,
        labels: Labels,
        time: Vec<Timestamp>,
        values: V,
    ) -> SeriesResult<()>
    where
        N: Into<String>,
        V: Into<FieldValues>,
    {
        let value_field = Field::new(name, labels, values);
        ensure_numeric(&value_field.name, value_field.field_type())?;
        if time.len() != value_field.len() {
            debug!(
                "multi: rejected {}: {} values for {} timestamps",
                value_field.display_name(),
                value_field.len(),
                time.len()
            );
            return Err(SeriesError::length_mismatch(
                &value_field.name,
                time.len(),
                value_field.len(),
            ));
        }
        if self.contains_metric(&value_field.name, &value_field.labels) {
            debug!("multi: rejected duplicate metric {}", value_field.display_name());
            return Err(SeriesError::DuplicateMetric(value_field.display_name()));
        }
        let time_field = Field::time(self.settings.time_field_name.clone(), time);
        let frame = Frame::new(self.settings.frame_name.clone(), vec![time_field, value_field])
            .with_type(FrameType::TimeSeriesMulti);
        self.frames.push(frame);
        Ok(())
    }
}

impl SeriesCollectionReader for MultiFrameSeries {
    fn get_metric_refs(&self) -> SeriesResult<MetricRefs<'_>> {
        let mut res = MetricRefs::new(Vec::with_capacity(self.frames.len()), vec![]);
        for (i, frame) in self.frames.iter().enumerate() {
            if !frame.is_type(FrameType::TimeSeriesMulti) {
                return Err(SeriesError::UnrecognizedFormat(format!(
                    "frame {} is not marked {}",
                    i,
                    FrameType::TimeSeriesMulti
                )));
            }
            if frame.fields.is_empty() {
                continue;
            }
            let classes = classify_fields(frame, false);
            let Some(time) = classes.time else {
                return Err(SeriesError::MissingTimeField(format!("frame {} has no time field", i)));
            };
            if classes.values.is_empty() {
                return Err(SeriesError::MissingValueField(format!(
                    "frame {} has no value field",
                    i
                )));
            }
            ensure_aligned(time, &classes.values)?;
            res.refs
                .extend(classes.values.into_iter().map(|value| MetricRef::borrowed(time, value)));
            res.extra_fields.extend(classes.extra);
        }
        ensure_unique_identities(&res.refs)?;
        log_read_result(FrameType::TimeSeriesMulti, &res);
        Ok(res)
    }
}
