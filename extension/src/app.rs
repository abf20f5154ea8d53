//! Core application

use anyhow::{Context, Result};

use crate::core::cli::{self, CliConfig};
use crate::core::config::ExtensionConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::extension::{Extension, ExtensionFactory, JsonMetricsExtension, MetricsMarshaler};
use crate::ingest::{decode_request, is_stdio, read_input, write_output};

pub struct CoreApp {
    pub config: CliConfig,
    pub extension: JsonMetricsExtension,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        tracing::trace!(config = ?cli_config, "Parsed command line");

        Self::init(cli_config)?.execute()
    }

    /// Load the extension config and create the extension
    pub fn init(config: CliConfig) -> Result<Self> {
        let factory = ExtensionFactory;
        let ext_config = match config.config {
            Some(ref path) => ExtensionConfig::load_from_file(path)?,
            None => factory.create_default_config(),
        };
        let extension = factory
            .create_extension(ext_config)
            .context("Failed to create extension")?;

        tracing::debug!(
            component = factory.component_type(),
            stability = %factory.stability(),
            "Extension created"
        );

        Ok(Self { config, extension })
    }

    /// Start the extension, encode the input once and shut it down again
    pub fn execute(&self) -> Result<()> {
        self.extension.start()?;
        let result = self.encode_input();
        self.extension.shutdown()?;
        result
    }

    fn encode_input(&self) -> Result<()> {
        let payload = read_input(&self.config.input)?;
        let path = (!is_stdio(&self.config.input)).then_some(self.config.input.as_path());
        let encoding = self.config.format.resolve(path, &payload);

        let request = decode_request(&payload, encoding)
            .with_context(|| format!("Failed to decode {} payload", encoding.as_str()))?;
        tracing::debug!(
            encoding = encoding.as_str(),
            resources = request.resource_metrics.len(),
            "Decoded metrics payload"
        );

        match self.extension.marshal_metrics(&request) {
            Ok(bytes) => write_output(&self.config.output, &bytes),
            Err(e) => {
                // Keep what did encode, then report the failure
                write_output(&self.config.output, e.partial())?;
                tracing::error!(error = %e, "Some resources were not written");
                Err(e.into())
            }
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
    use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
    use opentelemetry_proto::tonic::metrics::v1::{
        Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics, metric::Data,
        number_data_point,
    };
    use opentelemetry_proto::tonic::resource::v1::Resource;
    use prost::Message;

    use super::*;
    use crate::ingest::InputFormat;

    const EXPECTED: &str = r#"{"aws.ecs.task.id":"4b8146f69b564bebadf89b47b904325b","ecs.task.cpu.utilized":9.833394491064633,"ecs.task.memory.utilized":22,"timestamp":1734959017836}"#;

    fn task(task_id: &str, cpu: f64) -> ResourceMetrics {
        let point = |value| NumberDataPoint {
            time_unix_nano: 1_734_959_017_836_172_421,
            value: Some(value),
            ..Default::default()
        };
        ResourceMetrics {
            resource: Some(Resource {
                attributes: vec![KeyValue {
                    key: "aws.ecs.task.id".to_string(),
                    value: Some(AnyValue {
                        value: Some(any_value::Value::StringValue(task_id.to_string())),
                    }),
                }],
                ..Default::default()
            }),
            scope_metrics: vec![ScopeMetrics {
                metrics: vec![
                    Metric {
                        name: "ecs.task.memory.utilized".to_string(),
                        data: Some(Data::Gauge(Gauge {
                            data_points: vec![point(number_data_point::Value::AsInt(22))],
                        })),
                        ..Default::default()
                    },
                    Metric {
                        name: "ecs.task.cpu.utilized".to_string(),
                        data: Some(Data::Gauge(Gauge {
                            data_points: vec![point(number_data_point::Value::AsDouble(cpu))],
                        })),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn cli_config(input: PathBuf, output: PathBuf, format: InputFormat) -> CliConfig {
        CliConfig {
            input,
            output,
            format,
            config: None,
        }
    }

    #[test]
    fn test_encode_protobuf_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.pb");
        let output = dir.path().join("out.jsonl");
        let request = ExportMetricsServiceRequest {
            resource_metrics: vec![task("4b8146f69b564bebadf89b47b904325b", 9.833394491064633)],
        };
        fs::write(&input, request.encode_to_vec()).unwrap();

        let app = CoreApp::init(cli_config(input, output.clone(), InputFormat::Auto)).unwrap();
        app.execute().unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    }

    #[test]
    fn test_encode_json_file_matches_protobuf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.json");
        let output = dir.path().join("out.jsonl");
        let request = ExportMetricsServiceRequest {
            resource_metrics: vec![task("4b8146f69b564bebadf89b47b904325b", 9.833394491064633)],
        };
        fs::write(&input, serde_json::to_vec(&request).unwrap()).unwrap();

        let app = CoreApp::init(cli_config(input, output.clone(), InputFormat::Auto)).unwrap();
        app.execute().unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    }

    #[test]
    fn test_encode_writes_partial_output_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.bin");
        let output = dir.path().join("out.jsonl");
        let request = ExportMetricsServiceRequest {
            resource_metrics: vec![
                task("broken", f64::NAN),
                task("4b8146f69b564bebadf89b47b904325b", 9.833394491064633),
            ],
        };
        fs::write(&input, request.encode_to_vec()).unwrap();

        let app = CoreApp::init(cli_config(input, output.clone(), InputFormat::Protobuf)).unwrap();
        let err = app.execute().unwrap_err();

        assert!(err.to_string().contains("1 of 2 resources"));
        assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.json");
        fs::write(&input, "{ definitely not otlp").unwrap();

        let app = CoreApp::init(cli_config(
            input,
            dir.path().join("out.jsonl"),
            InputFormat::Auto,
        ))
        .unwrap();
        let err = app.execute().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to decode json payload"));
    }

    #[test]
    fn test_init_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("ext.json");
        fs::write(&config_path, r#"{ "future_option": 1 }"#).unwrap();

        let mut config = cli_config(
            dir.path().join("in.pb"),
            dir.path().join("out.jsonl"),
            InputFormat::Auto,
        );
        config.config = Some(config_path);

        let app = CoreApp::init(config).unwrap();
        assert_eq!(app.extension.config().unknown_fields(), vec!["future_option"]);
    }

    #[test]
    fn test_init_with_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = cli_config(
            dir.path().join("in.pb"),
            dir.path().join("out.jsonl"),
            InputFormat::Auto,
        );
        config.config = Some(dir.path().join("missing.json"));

        assert!(CoreApp::init(config).is_err());
    }
}
