//! Host component contract
//!
//! The host pipeline creates the extension through [`ExtensionFactory`],
//! calls [`Extension::start`] once, hands batches to
//! [`MetricsMarshaler::marshal_metrics`] and finally calls
//! [`Extension::shutdown`].

use std::fmt;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use thiserror::Error;

use super::config::{ConfigError, ExtensionConfig};
use super::constants::COMPONENT_TYPE;
use crate::domain::metrics::{Flattener, MarshalError, marshal_batch};
use crate::utils::clock::{SharedClock, system_clock};

/// Extension lifecycle errors
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Lifecycle hooks required by the host
pub trait Extension: Send + Sync {
    fn start(&self) -> Result<(), ExtensionError>;
    fn shutdown(&self) -> Result<(), ExtensionError>;
}

/// Encodes metrics batches into bytes
pub trait MetricsMarshaler: Extension {
    fn marshal_metrics(&self, request: &ExportMetricsServiceRequest)
    -> Result<Vec<u8>, MarshalError>;
}

/// Maturity level reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Development,
    Alpha,
    Beta,
    Stable,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Development => "development",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::Stable => "stable",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates [`JsonMetricsExtension`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionFactory;

impl ExtensionFactory {
    pub fn component_type(&self) -> &'static str {
        COMPONENT_TYPE
    }

    pub fn stability(&self) -> Stability {
        Stability::Development
    }

    pub fn create_default_config(&self) -> ExtensionConfig {
        ExtensionConfig::default()
    }

    /// Validate `config` and build an extension using the wall clock
    pub fn create_extension(
        &self,
        config: ExtensionConfig,
    ) -> Result<JsonMetricsExtension, ExtensionError> {
        config.validate()?;
        Ok(JsonMetricsExtension::new(config))
    }
}

/// Metrics marshaler producing one flat JSON object per resource
#[derive(Debug, Clone)]
pub struct JsonMetricsExtension {
    config: ExtensionConfig,
    flattener: Flattener,
}

impl JsonMetricsExtension {
    pub fn new(config: ExtensionConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Build with a substitute clock for the fallback timestamp
    pub fn with_clock(config: ExtensionConfig, clock: SharedClock) -> Self {
        Self {
            config,
            flattener: Flattener::new(clock),
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn flattener(&self) -> &Flattener {
        &self.flattener
    }
}

impl Extension for JsonMetricsExtension {
    fn start(&self) -> Result<(), ExtensionError> {
        tracing::debug!(component = COMPONENT_TYPE, "Extension started");
        Ok(())
    }

    fn shutdown(&self) -> Result<(), ExtensionError> {
        tracing::debug!(component = COMPONENT_TYPE, "Extension shut down");
        Ok(())
    }
}

impl MetricsMarshaler for JsonMetricsExtension {
    fn marshal_metrics(
        &self,
        request: &ExportMetricsServiceRequest,
    ) -> Result<Vec<u8>, MarshalError> {
        marshal_batch(&self.flattener, request)
    }
}
