use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use enquote::enquote;
use serde::{Deserialize, Serialize};

/// Label is a key/value pair of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Labels is a set of name/value pairs kept sorted by name, so two sets holding the
/// same pairs compare and hash equal regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates labels from pairs of strings. A repeated name keeps the last value.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the value for the label with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    /// Returns true if the label with the given name is present.
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets the name/value pair, returning the previous value if any.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn to_vec(&self) -> Vec<Label> {
        self.iter().map(|(n, v)| Label::new(n, v)).collect()
    }
}

impl From<Vec<Label>> for Labels {
    fn from(labels: Vec<Label>) -> Self {
        Self(labels.into_iter().map(|l| (l.name, l.value)).collect())
    }
}

impl From<BTreeMap<String, String>> for Labels {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Labels {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Appends labels in Prometheus form, e.g. `{host="a",region="us-east"}`.
/// Nothing is written for an empty set.
pub(crate) fn write_labels_into(buf: &mut String, labels: &Labels) {
    if labels.is_empty() {
        return;
    }
    buf.push('{');
    for (i, (name, value)) in labels.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        buf.push_str(name);
        buf.push('=');
        // avoid allocation if possible
        if value.contains('"') || value.contains('\\') {
            buf.push_str(&enquote('"', value));
        } else {
            buf.push('"');
            buf.push_str(value);
            buf.push('"');
        }
    }
    buf.push('}');
}

/// Formats a metric name with its labels, e.g. `os.cpu{host="a"}`.
pub fn format_metric_name(name: &str, labels: &Labels) -> String {
    let size_hint = name.len()
        + labels
            .iter()
            .map(|(n, v)| n.len() + v.len() + 4)
            .sum::<usize>();
    let mut full_name = String::with_capacity(size_hint);
    full_name.push_str(name);
    write_labels_into(&mut full_name, labels);
    full_name
}

impl Display for Labels {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::new();
        write_labels_into(&mut buf, self);
        if buf.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{}", buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_sorted_by_name() {
        let a = Labels::from_pairs([("job", "api"), ("host", "a")]);
        let b = Labels::from_pairs([("host", "a"), ("job", "api")]);
        assert_eq!(a, b);
        assert_eq!(a.names().collect::<Vec<_>>(), vec!["host", "job"]);
    }

    #[test]
    fn get_and_has() {
        let labels = Labels::from_pairs([("host", "a")]);
        assert_eq!(labels.get("host"), Some("a"));
        assert_eq!(labels.get("job"), None);
        assert!(labels.has("host"));
        assert!(!labels.has(""));
    }

    #[test]
    fn display_prometheus_form() {
        let labels = Labels::from_pairs([("region", "us-east"), ("host", "a")]);
        assert_eq!(labels.to_string(), r#"{host="a",region="us-east"}"#);
        assert_eq!(Labels::new().to_string(), "{}");
    }

    #[test]
    fn format_metric_name_quotes_values() {
        let labels = Labels::from_pairs([("path", r#"say "hi""#)]);
        assert_eq!(
            format_metric_name("http_requests", &labels),
            r#"http_requests{path="say \"hi\""}"#
        );
        assert_eq!(format_metric_name("os.cpu", &Labels::new()), "os.cpu");
    }

    #[test]
    fn from_label_vec() {
        let labels: Labels = vec![Label::new("b", "2"), Label::new("a", "1")].into();
        assert_eq!(labels.to_vec(), vec![Label::new("a", "1"), Label::new("b", "2")]);
    }
}
