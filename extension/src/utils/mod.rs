pub mod clock;
pub mod otlp;
pub mod time;
