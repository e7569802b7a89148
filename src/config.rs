use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_FIELD_NAME: &str = "time";

pub const TIME_FIELD_NAME_ENV: &str = "METRIC_FRAMES_TIME_FIELD_NAME";
pub const FRAME_NAME_ENV: &str = "METRIC_FRAMES_FRAME_NAME";

/// Settings applied by the series builders. Each collection holds its own copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSettings {
    /// Name of the time field created for each metric by `MultiFrameSeries::add_metric`.
    pub time_field_name: String,
    /// Name given to frames created by the builders.
    pub frame_name: String,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            time_field_name: DEFAULT_TIME_FIELD_NAME.to_string(),
            frame_name: String::new(),
        }
    }
}

impl SeriesSettings {
    /// Defaults overridden by `METRIC_FRAMES_TIME_FIELD_NAME` and `METRIC_FRAMES_FRAME_NAME`.
    pub fn from_env() -> Self {
        let mut res = Self::default();
        if let Some(name) = get_setting_from_env::<String>(TIME_FIELD_NAME_ENV) {
            if !name.is_empty() {
                res.time_field_name = name;
            }
        }
        if let Some(name) = get_setting_from_env::<String>(FRAME_NAME_ENV) {
            res.frame_name = name;
        }
        res
    }

    pub fn with_time_field_name<S: Into<String>>(mut self, name: S) -> Self {
        self.time_field_name = name.into();
        self
    }

    pub fn with_frame_name<S: Into<String>>(mut self, name: S) -> Self {
        self.frame_name = name.into();
        self
    }
}

fn get_setting_from_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
}
