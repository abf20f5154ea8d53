//! Resource flattening
//!
//! Collapses one OTLP `ResourceMetrics` into a single flat record: resource
//! attributes, the latest value of every gauge and sum, and a `timestamp`.
//!
//! Selection walks data points in storage order and accepts any point that is
//! not older than the latest one accepted so far for the same metric. Ties
//! therefore go to the point seen last, and a late, older point never replaces
//! a newer one.

use chrono::{DateTime, Utc};
use opentelemetry_proto::tonic::metrics::v1::{
    Metric, NumberDataPoint, ResourceMetrics, metric::Data, number_data_point,
};

use super::value::{FlatRecord, FlatValue};
use crate::core::constants::TIMESTAMP_KEY;
use crate::utils::clock::{SharedClock, system_clock};
use crate::utils::otlp::resource_attributes_record;
use crate::utils::time::{datetime_to_millis, nanos_to_datetime};

/// Flattens resources into flat records
#[derive(Clone)]
pub struct Flattener {
    clock: SharedClock,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(system_clock())
    }
}

impl std::fmt::Debug for Flattener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flattener").finish_non_exhaustive()
    }
}

impl Flattener {
    /// Create a flattener reading fallback timestamps from `clock`
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Flatten a single resource into one record
    pub fn flatten(&self, resource_metrics: &ResourceMetrics) -> FlatRecord {
        let mut record = resource_attributes_record(resource_metrics);
        let mut max_seen = DateTime::UNIX_EPOCH;

        for scope_metrics in &resource_metrics.scope_metrics {
            for metric in &scope_metrics.metrics {
                if let Some(latest) = merge_latest(&mut record, metric)
                    && latest > max_seen
                {
                    max_seen = latest;
                }
            }
        }

        let timestamp = if datetime_to_millis(max_seen) == 0 {
            self.clock.now()
        } else {
            max_seen
        };

        if !record.contains_key(TIMESTAMP_KEY) {
            record.insert(TIMESTAMP_KEY, FlatValue::Int(datetime_to_millis(timestamp)));
        }

        tracing::trace!(
            fields = record.len(),
            timestamp = %timestamp,
            "Flattened resource"
        );

        record
    }
}

/// Data points of a gauge or sum; other metric types have none to offer
fn number_data_points(metric: &Metric) -> &[NumberDataPoint] {
    match metric.data {
        Some(Data::Gauge(ref g)) => g.data_points.as_slice(),
        Some(Data::Sum(ref s)) => s.data_points.as_slice(),
        Some(Data::Histogram(_))
        | Some(Data::ExponentialHistogram(_))
        | Some(Data::Summary(_))
        | None => &[],
    }
}

/// Write the latest value of `metric` into `record`.
///
/// Returns the latest timestamp among accepted data points, or `None` when the
/// metric has no data points to consider.
fn merge_latest(record: &mut FlatRecord, metric: &Metric) -> Option<DateTime<Utc>> {
    let data_points = number_data_points(metric);
    if data_points.is_empty() {
        return None;
    }

    let mut latest = DateTime::UNIX_EPOCH;
    for dp in data_points {
        let ts = nanos_to_datetime(dp.time_unix_nano);
        if ts < latest {
            continue;
        }
        latest = ts;

        match dp.value {
            Some(number_data_point::Value::AsInt(i)) => {
                record.insert(metric.name.as_str(), FlatValue::Int(i));
            }
            Some(number_data_point::Value::AsDouble(d)) => {
                record.insert(metric.name.as_str(), FlatValue::Double(d));
            }
            None => {}
        }
    }

    Some(latest)
}
