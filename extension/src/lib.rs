//! Flattens OTLP metrics into JSON Lines records for Athena.
//!
//! Every resource of a metrics batch becomes one JSON object holding the
//! resource attributes, the latest value of each gauge and sum, and a
//! `timestamp` in epoch milliseconds.

pub mod app;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod utils;
