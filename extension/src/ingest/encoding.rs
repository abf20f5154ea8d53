//! OTLP payload decoding
//!
//! Supports both protobuf and JSON encodings of an OTLP metrics export
//! request, as defined by the OpenTelemetry Protocol specification.

use std::path::Path;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use prost::Message;
use thiserror::Error;

/// Requested payload format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Guess from the file extension or the payload itself
    #[default]
    Auto,
    Protobuf,
    Json,
}

/// Concrete payload encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtlpEncoding {
    Protobuf,
    Json,
}

impl OtlpEncoding {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            OtlpEncoding::Protobuf => "protobuf",
            OtlpEncoding::Json => "json",
        }
    }

    /// Guess the encoding from a file extension.
    /// Returns `None` when the path has no recognised extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" | "jsonl" => Some(OtlpEncoding::Json),
            "pb" | "proto" | "protobuf" | "bin" => Some(OtlpEncoding::Protobuf),
            _ => None,
        }
    }

    /// Guess the encoding from the payload: JSON objects start with `{`
    pub fn sniff(payload: &[u8]) -> Self {
        match payload.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => OtlpEncoding::Json,
            _ => OtlpEncoding::Protobuf,
        }
    }
}

impl InputFormat {
    /// Pick the concrete encoding for a payload read from `path`
    pub fn resolve(self, path: Option<&Path>, payload: &[u8]) -> OtlpEncoding {
        match self {
            InputFormat::Protobuf => OtlpEncoding::Protobuf,
            InputFormat::Json => OtlpEncoding::Json,
            InputFormat::Auto => path
                .and_then(OtlpEncoding::from_path)
                .unwrap_or_else(|| OtlpEncoding::sniff(payload)),
        }
    }
}

/// Error returned when decoding fails
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an OTLP metrics export request
pub fn decode_request(
    payload: &[u8],
    encoding: OtlpEncoding,
) -> Result<ExportMetricsServiceRequest, DecodeError> {
    let request = match encoding {
        OtlpEncoding::Protobuf => ExportMetricsServiceRequest::decode(payload)?,
        OtlpEncoding::Json => serde_json::from_slice(payload)?,
    };
    Ok(request)
}
