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

/// A single frame holding one shared time field followed by one value field per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct WideFrameSeries {
    frame: Frame,
}

impl Default for WideFrameSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl WideFrameSeries {
    pub fn new() -> Self {
        Self::with_settings(SeriesSettings::default())
    }

    pub fn with_settings(settings: SeriesSettings) -> Self {
        Self {
            frame: Frame::new(settings.frame_name, vec![]).with_type(FrameType::TimeSeriesWide),
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

    pub fn time_field(&self) -> Option<&Field> {
        self.frame.fields.iter().find(|f| f.field_type().is_time())
    }

    fn value_fields(&self) -> impl Iterator<Item = &Field> {
        self.frame.fields.iter().filter(|f| f.field_type().is_numeric())
    }

    pub fn contains_metric(&self, name: &str, labels: &Labels) -> bool {
        self.value_fields().any(|f| f.has_identity(name, labels))
    }

    /// Sets the shared time field. It becomes the first field of the frame.
    pub fn set_time<N: Into<String>>(&mut self, name: N, values: Vec<Timestamp>) -> SeriesResult<()> {
        let name = name.into();
        if let Some(time) = self.time_field() {
            debug!("wide: time field \"{}\" already set", time.name);
            return Err(SeriesError::TimeAlreadySet(time.name.clone()));
        }
        if self.frame.fields.iter().any(|f| f.name == name) {
            debug!("wide: time field name \"{}\" is taken by a value field", name);
            return Err(SeriesError::DuplicateTimeName(name));
        }
        if let Some(value) = self.value_fields().find(|f| f.len() != values.len()) {
            return Err(SeriesError::length_mismatch(&name, value.len(), values.len()));
        }
        self.frame.fields.insert(0, Field::time(name, values));
        Ok(())
    }

    /// Adds a value field aligned with the time field. Nothing is added on error.
    pub fn add_metric<N, V>(&mut self, name: N, labels: Labels, values: V) -> SeriesResult<()>
    where
        N: Into<String>,
        V: Into<FieldValues>,
    {
        let field = Field::new(name, labels, values);
        ensure_numeric(&field.name, field.field_type())?;

        let time = self.time_field();
        if let Some(time) = time {
            if time.name == field.name {
                debug!("wide: metric \"{}\" collides with the time field", field.name);
                return Err(SeriesError::TimeFieldNameCollision(field.name));
            }
        }
        // before set_time, new fields must still line up with the ones already added
        if let Some(reference) = time.or_else(|| self.value_fields().next()) {
            if !reference.is_aligned_with(&field) {
                debug!(
                    "wide: rejected {}: {} values, expected {}",
                    field.display_name(),
                    field.len(),
                    reference.len()
                );
                return Err(SeriesError::length_mismatch(&field.name, reference.len(), field.len()));
            }
        }
        if self.contains_metric(&field.name, &field.labels) {
            debug!("wide: rejected duplicate metric {}", field.display_name());
            return Err(SeriesError::DuplicateMetric(field.display_name()));
        }
        self.frame.fields.push(field);
        Ok(())
    }
}

impl SeriesCollectionReader for WideFrameSeries {
    fn get_metric_refs(&self) -> SeriesResult<MetricRefs<'_>> {
        if !self.frame.is_type(FrameType::TimeSeriesWide) {
            return Err(SeriesError::UnrecognizedFormat(format!(
                "frame is not marked {}",
                FrameType::TimeSeriesWide
            )));
        }
        let classes = classify_fields(&self.frame, false);
        let mut res = MetricRefs::new(Vec::with_capacity(classes.values.len()), classes.extra);
        if classes.values.is_empty() {
            log_read_result(FrameType::TimeSeriesWide, &res);
            return Ok(res);
        }
        let Some(time) = classes.time else {
            return Err(SeriesError::MissingTimeField(format!(
                "{} value fields without a time field",
                classes.values.len()
            )));
        };
        ensure_aligned(time, &classes.values)?;
        res.refs
            .extend(classes.values.into_iter().map(|value| MetricRef::borrowed(time, value)));
        ensure_unique_identities(&res.refs)?;
        log_read_result(FrameType::TimeSeriesWide, &res);
        Ok(res)
    }
}
