// =============================================================================
// Component Identity
// =============================================================================

/// Component type name registered with the host pipeline
pub const COMPONENT_TYPE: &str = "athenametricsencoding";

/// Binary name (for log filters and help output)
pub const APP_NAME_LOWER: &str = "athena_metrics_encoding";

// =============================================================================
// Output Format
// =============================================================================

/// Record key holding the epoch-millisecond timestamp
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Separator between JSON records
pub const LINE_SEPARATOR: u8 = b'\n';

/// Path argument meaning stdin/stdout
pub const STDIO_PATH: &str = "-";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ATHENA_ENCODE_LOG";

/// Environment variable for the extension config file path
pub const ENV_CONFIG: &str = "ATHENA_ENCODE_CONFIG";

/// Environment variable for the input path
pub const ENV_INPUT: &str = "ATHENA_ENCODE_INPUT";

/// Environment variable for the output path
pub const ENV_OUTPUT: &str = "ATHENA_ENCODE_OUTPUT";

/// Environment variable for the input payload format
pub const ENV_FORMAT: &str = "ATHENA_ENCODE_FORMAT";
