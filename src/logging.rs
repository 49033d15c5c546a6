//! Log setup for the binary
//!
//! The terminal UI owns stdout/stderr, so logs only go to a file. Without a
//! file everything is dropped. `RUST_LOG` overrides the default `info` level.

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}
