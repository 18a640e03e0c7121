//! Log setup for the terminal front end.
//!
//! The TUI owns stdout and stderr, so records go to a file instead. The filter
//! defaults to `info` and can be changed with `RUST_LOG`.
//!
//! `RUST_LOG` is a diagnostics-only override. It is not part of the app's
//! configuration, which reads no environment variables.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Route `log` records to `path`, appending to any existing file.
pub fn init(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()?;
    Ok(())
}
