use serde::{Deserialize, Serialize};

use super::values::{FieldType, FieldValues};
use crate::common::types::Timestamp;
use crate::common::{format_metric_name, Labels};

/// A named, ordered, typed column of values with an optional label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    pub values: FieldValues,
}

impl Field {
    pub fn new<N: Into<String>, V: Into<FieldValues>>(name: N, labels: Labels, values: V) -> Self {
        Self {
            name: name.into(),
            labels,
            values: values.into(),
        }
    }

    /// Creates a time field from millisecond timestamps.
    pub fn time<N: Into<String>>(name: N, timestamps: Vec<Timestamp>) -> Self {
        Self::new(name, Labels::new(), FieldValues::Time(timestamps))
    }

    pub fn field_type(&self) -> FieldType {
        self.values.field_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Two fields are aligned if they hold the same number of values.
    pub fn is_aligned_with(&self, other: &Field) -> bool {
        self.len() == other.len()
    }

    /// The series identity of a value field.
    pub fn identity(&self) -> (&str, &Labels) {
        (&self.name, &self.labels)
    }

    pub fn has_identity(&self, name: &str, labels: &Labels) -> bool {
        self.name == name && &self.labels == labels
    }

    /// e.g. `os.cpu{host="a"}`
    pub fn display_name(&self) -> String {
        format_metric_name(&self.name, &self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_includes_labels() {
        let a = Field::new("os.cpu", Labels::from_pairs([("host", "a")]), vec![1.0]);
        assert!(a.has_identity("os.cpu", &Labels::from_pairs([("host", "a")])));
        assert!(!a.has_identity("os.cpu", &Labels::from_pairs([("host", "b")])));
        assert!(!a.has_identity("os.mem", &Labels::from_pairs([("host", "a")])));
        assert_eq!(a.display_name(), r#"os.cpu{host="a"}"#);
    }

    #[test]
    fn alignment() {
        let time = Field::time("time", vec![1, 2]);
        let values = Field::new("v", Labels::new(), vec![1.0, 2.0]);
        let short = Field::new("v", Labels::new(), vec![1_i64]);
        assert!(time.is_aligned_with(&values));
        assert!(!time.is_aligned_with(&short));
        assert_eq!(short.field_type(), FieldType::Int64);
    }
}
