//! `voyager query`: print the built-in introspection query.

use anyhow::{Context, Result};
use std::io::Write;
use voyager_introspect::INTROSPECTION_QUERY;

pub fn run() -> Result<()> {
    let mut handle = std::io::stdout().lock();
    writeln!(handle, "{}", INTROSPECTION_QUERY.trim()).context("Failed to write to stdout")
}
