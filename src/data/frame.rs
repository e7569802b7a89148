use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::values::FieldType;
use crate::error::{SeriesError, SeriesResult};

/// Marks which time series layout a frame holds.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// One time field and one value field per frame, one frame per metric.
    TimeSeriesMulti,
    /// One shared time field followed by one value field per metric.
    TimeSeriesWide,
    /// Time, value and label fields, with series interleaved by row.
    TimeSeriesLong,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::TimeSeriesMulti => "timeseries-multi",
            FrameType::TimeSeriesWide => "timeseries-wide",
            FrameType::TimeSeriesLong => "timeseries-long",
        }
    }
}

impl Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FrameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.eq_ignore_ascii_case("timeseries-multi") => Ok(FrameType::TimeSeriesMulti),
            s if s.eq_ignore_ascii_case("timeseries-wide") => Ok(FrameType::TimeSeriesWide),
            s if s.eq_ignore_ascii_case("timeseries-long") => Ok(FrameType::TimeSeriesLong),
            _ => Err(format!("invalid frame type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMeta {
    #[serde(rename = "type")]
    pub frame_type: FrameType,
}

impl FrameMeta {
    pub fn new(frame_type: FrameType) -> Self {
        Self { frame_type }
    }
}

/// An ordered collection of fields, optionally tagged with a layout marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FrameMeta>,
}

impl Frame {
    /// Creates a frame without checking that the fields are aligned.
    pub fn new<N: Into<String>>(name: N, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            meta: None,
        }
    }

    pub fn with_type(mut self, frame_type: FrameType) -> Self {
        self.set_meta(FrameMeta::new(frame_type));
        self
    }

    pub fn set_meta(&mut self, meta: FrameMeta) {
        self.meta = Some(meta);
    }

    pub fn frame_type(&self) -> Option<FrameType> {
        self.meta.as_ref().map(|m| m.frame_type)
    }

    pub fn is_type(&self, frame_type: FrameType) -> bool {
        self.frame_type() == Some(frame_type)
    }

    /// Number of rows, taken from the first field.
    pub fn row_len(&self) -> usize {
        self.fields.first().map_or(0, |f| f.len())
    }

    /// Appends a field, failing if it is not aligned with the fields already present.
    pub fn push_field(&mut self, field: Field) -> SeriesResult<()> {
        if let Some(first) = self.fields.first() {
            if !first.is_aligned_with(&field) {
                return Err(SeriesError::length_mismatch(&field.name, first.len(), field.len()));
            }
        }
        self.fields.push(field);
        Ok(())
    }

    /// Indices of the fields whose type is one of `types`, in field order.
    pub fn type_indices(&self, types: &[FieldType]) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| types.contains(&f.field_type()))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Labels;

    #[test]
    fn push_field_checks_alignment() {
        let mut frame = Frame::new("", vec![]);
        frame.push_field(Field::time("time", vec![1, 2])).unwrap();
        frame
            .push_field(Field::new("v", Labels::new(), vec![1.0, 2.0]))
            .unwrap();
        let err = frame
            .push_field(Field::new("w", Labels::new(), vec![1.0]))
            .unwrap_err();
        assert_eq!(err, SeriesError::length_mismatch("w", 2, 1));
        assert_eq!(frame.fields.len(), 2);
        assert_eq!(frame.row_len(), 2);
    }

    #[test]
    fn type_indices_preserve_field_order() {
        let frame = Frame::new(
            "",
            vec![
                Field::new("host", Labels::new(), vec!["a"]),
                Field::time("time", vec![1]),
                Field::new("v", Labels::new(), vec![1_i64]),
                Field::new("w", Labels::new(), vec![1.0]),
            ],
        );
        assert_eq!(frame.type_indices(&FieldType::NUMERIC_TYPES), vec![2, 3]);
        assert_eq!(frame.type_indices(&FieldType::TIME_TYPES), vec![1]);
        assert_eq!(frame.type_indices(&FieldType::STRING_TYPES), vec![0]);
    }

    #[test]
    fn frame_type_marker() {
        let frame = Frame::default().with_type(FrameType::TimeSeriesLong);
        assert!(frame.is_type(FrameType::TimeSeriesLong));
        assert!(!frame.is_type(FrameType::TimeSeriesWide));
        assert!(!Frame::default().is_type(FrameType::TimeSeriesLong));
        assert_eq!("TimeSeries-Wide".parse::<FrameType>(), Ok(FrameType::TimeSeriesWide));
        assert!("table".parse::<FrameType>().is_err());
    }
}
