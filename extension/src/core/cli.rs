use clap::Parser;

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_FORMAT, ENV_INPUT, ENV_OUTPUT, STDIO_PATH};
use crate::ingest::InputFormat;

#[derive(Parser, Debug)]
#[command(name = "athena-encode")]
#[command(version, about = "Flatten OTLP metrics into JSON Lines", long_about = None)]
pub struct Cli {
    /// OTLP metrics export payload to read ("-" for stdin)
    #[arg(long, short = 'i', env = ENV_INPUT, default_value = STDIO_PATH)]
    pub input: PathBuf,

    /// Where to write JSON Lines ("-" for stdout)
    #[arg(long, short = 'o', env = ENV_OUTPUT, default_value = STDIO_PATH)]
    pub output: PathBuf,

    /// Input payload format (auto, protobuf or json)
    #[arg(long, short = 'f', env = ENV_FORMAT, default_value = "auto", value_parser = parse_input_format)]
    pub format: InputFormat,

    /// Path to extension config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

/// Parse input format from CLI/env string
fn parse_input_format(s: &str) -> Result<InputFormat, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(InputFormat::Auto),
        "protobuf" | "proto" | "pb" => Ok(InputFormat::Protobuf),
        "json" => Ok(InputFormat::Json),
        _ => Err(format!(
            "Invalid input format '{}'. Valid options: auto, protobuf, json",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: InputFormat,
    pub config: Option<PathBuf>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
            format: cli.format,
            config: cli.config,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
