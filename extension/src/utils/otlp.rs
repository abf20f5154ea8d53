//! OTLP utility functions
//!
//! Converts OTLP attribute values into flat record values, preserving their
//! native types.

use std::collections::BTreeMap;

use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use opentelemetry_proto::tonic::metrics::v1::ResourceMetrics;

use crate::domain::metrics::{FlatRecord, FlatValue};

/// Convert AnyValue to a flat value (preserves native types)
pub fn any_value_to_flat(value: &AnyValue) -> FlatValue {
    match &value.value {
        Some(any_value::Value::StringValue(s)) => FlatValue::Str(s.clone()),
        Some(any_value::Value::BoolValue(b)) => FlatValue::Bool(*b),
        Some(any_value::Value::IntValue(i)) => FlatValue::Int(*i),
        Some(any_value::Value::DoubleValue(d)) => FlatValue::Double(*d),
        Some(any_value::Value::ArrayValue(arr)) => {
            FlatValue::Array(arr.values.iter().map(any_value_to_flat).collect())
        }
        Some(any_value::Value::KvlistValue(kvlist)) => {
            FlatValue::Map(key_values_to_map(&kvlist.values))
        }
        Some(any_value::Value::BytesValue(b)) => FlatValue::Bytes(b.clone()),
        None => FlatValue::Null,
    }
}

/// Convert a KeyValue list into a sorted map; later duplicates win
pub fn key_values_to_map(attrs: &[KeyValue]) -> BTreeMap<String, FlatValue> {
    attrs
        .iter()
        .map(|kv| {
            let value = kv
                .value
                .as_ref()
                .map(any_value_to_flat)
                .unwrap_or(FlatValue::Null);
            (kv.key.clone(), value)
        })
        .collect()
}

/// Seed a flat record with the resource attributes of `resource_metrics`
pub fn resource_attributes_record(resource_metrics: &ResourceMetrics) -> FlatRecord {
    resource_metrics
        .resource
        .as_ref()
        .map(|r| key_values_to_map(&r.attributes).into_iter().collect())
        .unwrap_or_default()
}
