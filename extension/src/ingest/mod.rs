//! Input handling for the command-line host

mod encoding;
mod source;

pub use encoding::{DecodeError, InputFormat, OtlpEncoding, decode_request};
pub use source::{is_stdio, read_input, write_output};
