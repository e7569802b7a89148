use thiserror::Error;

use crate::data::FieldType;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
/// Enum for the validation failures raised while building or reading series collections.
pub enum SeriesError {
    #[error("Length mismatch. Field \"{name}\" has {actual} values, expected {expected}.")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate metric. {0} already exists in the collection.")]
    DuplicateMetric(String),

    #[error("Time field already set. Existing time field is \"{0}\".")]
    TimeAlreadySet(String),

    #[error("Missing time field. {0}")]
    MissingTimeField(String),

    #[error("Missing value field. {0}")]
    MissingValueField(String),

    #[error("Time field name \"{0}\" collides with an existing value field.")]
    DuplicateTimeName(String),

    #[error("Metric name \"{0}\" collides with the time field name.")]
    TimeFieldNameCollision(String),

    #[error("Unrecognized format. {0}")]
    UnrecognizedFormat(String),

    #[error("Inconsistent grouping for {metric}: {times} timestamps, {values} values.")]
    InconsistentGrouping {
        metric: String,
        times: usize,
        values: usize,
    },

    #[error("Invalid value type for \"{name}\". Expected a numeric field, got {field_type}.")]
    InvalidValueType {
        name: String,
        field_type: FieldType,
    },
}

pub type SeriesResult<T> = Result<T, SeriesError>;

impl SeriesError {
    pub(crate) fn length_mismatch(name: &str, expected: usize, actual: usize) -> Self {
        SeriesError::LengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        }
    }
}
