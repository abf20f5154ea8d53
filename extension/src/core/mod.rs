//! Host-facing surface: CLI, configuration and the extension contract

pub mod cli;
pub mod config;
pub mod constants;
pub mod extension;

pub use cli::CliConfig;
pub use config::{ConfigError, ExtensionConfig};
pub use extension::{
    Extension, ExtensionError, ExtensionFactory, JsonMetricsExtension, MetricsMarshaler,
    Stability,
};
