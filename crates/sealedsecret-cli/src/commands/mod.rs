//! CLI command implementations.

pub mod inspect;
pub mod label;
pub mod seal;

use anyhow::{Context, Result};
use std::io::Read;

/// Read all of stdin as text.
pub(crate) fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}
