//! Reading payloads and writing records for the command-line host

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::constants::STDIO_PATH;

/// Returns true when `path` designates stdin/stdout
#[inline]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Read the whole payload from a file or stdin
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Failed to read payload from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read payload: {}", path.display()))
}

/// Write encoded records to a file or stdout
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|_| stdout.flush())
            .context("Failed to write records to stdout")?;
        return Ok(());
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write records: {}", path.display()))
}
