//! Batch marshaling into JSON Lines

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;

use super::error::{EncodingError, MarshalError};
use super::flatten::Flattener;
use crate::core::constants::LINE_SEPARATOR;

/// Flatten every resource of `request` and join the JSON records with `\n`.
///
/// A resource whose record cannot be encoded is left out (together with its
/// separator) and the remaining resources are still processed. If any were
/// left out, the error carries the bytes that were produced and the last
/// encoding failure.
pub fn marshal_batch(
    flattener: &Flattener,
    request: &ExportMetricsServiceRequest,
) -> Result<Vec<u8>, MarshalError> {
    let total = request.resource_metrics.len();
    let mut out = Vec::new();
    let mut failed = 0;
    let mut last_error = None;

    for (index, resource_metrics) in request.resource_metrics.iter().enumerate() {
        let record = flattener.flatten(resource_metrics);
        match record.to_json() {
            Ok(data) => {
                if !out.is_empty() {
                    out.push(LINE_SEPARATOR);
                }
                out.extend_from_slice(&data);
            }
            Err(source) => {
                tracing::warn!(index, error = %source, "Skipping resource that failed to encode");
                failed += 1;
                last_error = Some(EncodingError { index, source });
            }
        }
    }

    tracing::debug!(
        resources = total,
        failed,
        bytes = out.len(),
        "Marshaled metrics batch"
    );

    match last_error {
        None => Ok(out),
        Some(last) => Err(MarshalError {
            partial: out,
            failed,
            total,
            last,
        }),
    }
}
