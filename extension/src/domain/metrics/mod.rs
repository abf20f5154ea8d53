//! Metrics flattening
//!
//! Turns OTLP metrics into JSON Lines, one flat record per resource.
//! Only gauges and sums contribute values.

mod error;
mod flatten;
mod format;
mod marshal;
mod value;

pub use error::{EncodingError, MarshalError};
pub use flatten::Flattener;
pub use marshal::marshal_batch;
pub use value::{FlatRecord, FlatValue};
