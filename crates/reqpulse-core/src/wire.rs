//! Line-protocol wire encoding for the metrics collector.
//!
//! One measurement per line: `<name>[,<tag>=<value>,...] value=<value>\n`.
//! Collectors choke on `:`, `_`, and `|` inside names, tag keys/values, and
//! string fields (https://github.com/influxdata/telegraf/issues/3508), so
//! every string component is escaped to `-` before encoding. Numeric values
//! are stringified verbatim.

use std::fmt::Write;
use std::time::Duration;

/// A metric field or tag value. Only the `Text` variant passes through
/// escaping on encode.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    fn write_escaped(&self, out: &mut String) {
        match self {
            MetricValue::Int(v) => {
                let _ = write!(out, "{v}");
            }
            MetricValue::Float(v) => {
                let _ = write!(out, "{v}");
            }
            MetricValue::Text(s) => out.push_str(&escape(s)),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Replace the reserved wire characters `:`, `_`, `|` with `-`.
pub fn escape(s: &str) -> String {
    s.replace([':', '_', '|'], "-")
}

/// Encode one measurement line.
///
/// Tag order is preserved as given. Total over its input domain: every
/// combination of name, value, and tags renders to a line.
pub fn encode_line(name: &str, value: &MetricValue, tags: &[(&str, MetricValue)]) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(&escape(name));
    for (key, tag_value) in tags {
        out.push(',');
        out.push_str(&escape(key));
        out.push('=');
        tag_value.write_escaped(&mut out);
    }
    out.push_str(" value=");
    value.write_escaped(&mut out);
    out.push('\n');
    out
}

/// Integer-millisecond rendering used for duration metrics. Rounds to
/// nearest rather than truncating.
pub fn duration_ms(d: Duration) -> i64 {
    (d.as_secs_f64() * 1000.0).round() as i64
}
