//! Wire encoding vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqpulse_core::wire::{duration_ms, encode_line, escape, MetricValue};
use std::time::Duration;

#[test]
fn bare_value_no_tags() {
    let line = encode_line("cpu_load", &MetricValue::Int(42), &[]);
    assert_eq!(line, "cpu-load value=42\n");
}

#[test]
fn reserved_chars_escaped_in_every_string_component() {
    let line = encode_line(
        "req:time",
        &MetricValue::Int(10),
        &[("host_name", MetricValue::Text("a|b".into()))],
    );
    assert_eq!(line, "req-time,host-name=a-b value=10\n");
}

#[test]
fn string_field_value_escaped() {
    let line = encode_line("link", &MetricValue::Text("up|down".into()), &[]);
    assert_eq!(line, "link value=up-down\n");
}

#[test]
fn numeric_tag_values_pass_through_unescaped() {
    let line = encode_line(
        "retries",
        &MetricValue::Int(1),
        &[("attempt", MetricValue::Int(2))],
    );
    assert_eq!(line, "retries,attempt=2 value=1\n");
}

#[test]
fn float_values_render_plainly() {
    let line = encode_line("load", &MetricValue::Float(0.5), &[]);
    assert_eq!(line, "load value=0.5\n");
}

#[test]
fn tag_order_is_preserved() {
    let line = encode_line(
        "m",
        &MetricValue::Int(0),
        &[
            ("b", MetricValue::Text("2".into())),
            ("a", MetricValue::Text("1".into())),
        ],
    );
    assert_eq!(line, "m,b=2,a=1 value=0\n");
}

#[test]
fn no_reserved_chars_survive_anywhere() {
    let line = encode_line(
        "a:b_c|d",
        &MetricValue::Text(":_|".into()),
        &[
            ("k_1", MetricValue::Text("v|1".into())),
            ("x:y", MetricValue::Text("z_w".into())),
        ],
    );
    assert!(!line.contains(':'));
    assert!(!line.contains('_'));
    assert!(!line.contains('|'));
}

#[test]
fn escape_replaces_each_reserved_char() {
    assert_eq!(escape("a:b_c|d"), "a-b-c-d");
    assert_eq!(escape("clean"), "clean");
}

#[test]
fn duration_ms_rounds_to_nearest() {
    assert_eq!(duration_ms(Duration::from_micros(1_500)), 2);
    assert_eq!(duration_ms(Duration::from_micros(400)), 0);
    assert_eq!(duration_ms(Duration::from_millis(250)), 250);
}
