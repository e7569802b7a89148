use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::common::types::Timestamp;
use crate::common::timestamp_from_datetime;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Time,
    NullableTime,
    Float64,
    NullableFloat64,
    Int64,
    NullableInt64,
    String,
    NullableString,
    Bool,
}

impl FieldType {
    pub const TIME_TYPES: [FieldType; 2] = [FieldType::Time, FieldType::NullableTime];

    pub const NUMERIC_TYPES: [FieldType; 4] = [
        FieldType::Float64,
        FieldType::NullableFloat64,
        FieldType::Int64,
        FieldType::NullableInt64,
    ];

    pub const STRING_TYPES: [FieldType; 2] = [FieldType::String, FieldType::NullableString];

    pub fn is_time(&self) -> bool {
        Self::TIME_TYPES.contains(self)
    }

    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC_TYPES.contains(self)
    }

    pub fn is_string(&self) -> bool {
        Self::STRING_TYPES.contains(self)
    }

    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            FieldType::NullableTime
                | FieldType::NullableFloat64
                | FieldType::NullableInt64
                | FieldType::NullableString
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Time => "time",
            FieldType::NullableTime => "nullable time",
            FieldType::Float64 => "float64",
            FieldType::NullableFloat64 => "nullable float64",
            FieldType::Int64 => "int64",
            FieldType::NullableInt64 => "nullable int64",
            FieldType::String => "string",
            FieldType::NullableString => "nullable string",
            FieldType::Bool => "bool",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed, ordered column storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum FieldValues {
    Time(Vec<Timestamp>),
    NullableTime(Vec<Option<Timestamp>>),
    Float64(Vec<f64>),
    NullableFloat64(Vec<Option<f64>>),
    Int64(Vec<i64>),
    NullableInt64(Vec<Option<i64>>),
    String(Vec<String>),
    NullableString(Vec<Option<String>>),
    Bool(Vec<bool>),
}

macro_rules! for_each_variant {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            FieldValues::Time($v) => $body,
            FieldValues::NullableTime($v) => $body,
            FieldValues::Float64($v) => $body,
            FieldValues::NullableFloat64($v) => $body,
            FieldValues::Int64($v) => $body,
            FieldValues::NullableInt64($v) => $body,
            FieldValues::String($v) => $body,
            FieldValues::NullableString($v) => $body,
            FieldValues::Bool($v) => $body,
        }
    };
}

macro_rules! map_variant {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            FieldValues::Time($v) => FieldValues::Time($body),
            FieldValues::NullableTime($v) => FieldValues::NullableTime($body),
            FieldValues::Float64($v) => FieldValues::Float64($body),
            FieldValues::NullableFloat64($v) => FieldValues::NullableFloat64($body),
            FieldValues::Int64($v) => FieldValues::Int64($body),
            FieldValues::NullableInt64($v) => FieldValues::NullableInt64($body),
            FieldValues::String($v) => FieldValues::String($body),
            FieldValues::NullableString($v) => FieldValues::NullableString($body),
            FieldValues::Bool($v) => FieldValues::Bool($body),
        }
    };
}

impl FieldValues {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValues::Time(_) => FieldType::Time,
            FieldValues::NullableTime(_) => FieldType::NullableTime,
            FieldValues::Float64(_) => FieldType::Float64,
            FieldValues::NullableFloat64(_) => FieldType::NullableFloat64,
            FieldValues::Int64(_) => FieldType::Int64,
            FieldValues::NullableInt64(_) => FieldType::NullableInt64,
            FieldValues::String(_) => FieldType::String,
            FieldValues::NullableString(_) => FieldType::NullableString,
            FieldValues::Bool(_) => FieldType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        for_each_variant!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an empty column of the given type.
    pub fn empty(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Time => FieldValues::Time(vec![]),
            FieldType::NullableTime => FieldValues::NullableTime(vec![]),
            FieldType::Float64 => FieldValues::Float64(vec![]),
            FieldType::NullableFloat64 => FieldValues::NullableFloat64(vec![]),
            FieldType::Int64 => FieldValues::Int64(vec![]),
            FieldType::NullableInt64 => FieldValues::NullableInt64(vec![]),
            FieldType::String => FieldValues::String(vec![]),
            FieldType::NullableString => FieldValues::NullableString(vec![]),
            FieldType::Bool => FieldValues::Bool(vec![]),
        }
    }

    /// Gathers the rows at `indices`, in the order given, into a new column of the same type.
    /// Panics if an index is out of bounds; callers pass indices of an aligned field.
    pub fn take(&self, indices: &[usize]) -> Self {
        map_variant!(self, v => indices.iter().map(|&i| v[i].clone()).collect())
    }

    /// Returns the string at `idx` for string columns. Nulls and other types yield `None`.
    pub fn str_at(&self, idx: usize) -> Option<&str> {
        match self {
            FieldValues::String(v) => v.get(idx).map(|s| s.as_str()),
            FieldValues::NullableString(v) => v.get(idx).and_then(|s| s.as_deref()),
            _ => None,
        }
    }

    /// Returns the timestamp at `idx` for time columns.
    pub fn time_at(&self, idx: usize) -> Option<Timestamp> {
        match self {
            FieldValues::Time(v) => v.get(idx).copied(),
            FieldValues::NullableTime(v) => v.get(idx).copied().flatten(),
            _ => None,
        }
    }

    /// Returns the value at `idx` as f64 for numeric columns.
    pub fn f64_at(&self, idx: usize) -> Option<f64> {
        match self {
            FieldValues::Float64(v) => v.get(idx).copied(),
            FieldValues::NullableFloat64(v) => v.get(idx).copied().flatten(),
            FieldValues::Int64(v) => v.get(idx).map(|x| *x as f64),
            FieldValues::NullableInt64(v) => v.get(idx).copied().flatten().map(|x| x as f64),
            _ => None,
        }
    }
}

macro_rules! field_values_from_impl {
    ($($t:ty => $variant:ident),* $(,)?) => ($(
        impl From<Vec<$t>> for FieldValues {
            fn from(v: Vec<$t>) -> Self {
                FieldValues::$variant(v)
            }
        }
    )*)
}

// Vec<i64> maps to Int64; time columns are built with `FieldValues::Time` or from datetimes.
field_values_from_impl! {
    f64 => Float64,
    Option<f64> => NullableFloat64,
    i64 => Int64,
    Option<i64> => NullableInt64,
    String => String,
    Option<String> => NullableString,
    bool => Bool,
}

impl From<Vec<&str>> for FieldValues {
    fn from(v: Vec<&str>) -> Self {
        FieldValues::String(v.into_iter().map(|s| s.to_string()).collect())
    }
}

impl<Tz: TimeZone> From<Vec<DateTime<Tz>>> for FieldValues {
    fn from(v: Vec<DateTime<Tz>>) -> Self {
        FieldValues::Time(v.iter().map(timestamp_from_datetime).collect())
    }
}

impl<Tz: TimeZone> From<Vec<Option<DateTime<Tz>>>> for FieldValues {
    fn from(v: Vec<Option<DateTime<Tz>>>) -> Self {
        FieldValues::NullableTime(
            v.iter()
                .map(|dt| dt.as_ref().map(timestamp_from_datetime))
                .collect(),
        )
    }
}
