//! JSON history files.
//!
//! A history file is one JSON object mapping run names to arrays of rpm
//! samples, in run order:
//!
//! ```json
//! {
//!   "simple_motor": [4.0, 7.6, 10.84],
//!   "pid_motor": [112.56, 98.1, 89.2]
//! }
//! ```
//!
//! `serde_json` is built with `float_roundtrip`, so every `f64` reloads
//! bit-for-bit. Non-finite samples are rejected on save since JSON has no
//! representation for them.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rotorsim_core::error::RecordError;
use rotorsim_core::history::RunHistories;
use tracing::{debug, info};

/// File name used when no output path is configured.
pub const DEFAULT_HISTORY_PATH: &str = "rpm_history.json";

// ---------------------------------------------------------------------------
// RecordingConfig
// ---------------------------------------------------------------------------

/// Where and how histories are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordingConfig {
    /// Output file path.
    pub output_path: PathBuf,
    /// Indent the JSON for reading by hand.
    pub pretty: bool,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            pretty: true,
        }
    }
}

impl RecordingConfig {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write `histories` to the configured path, replacing any existing file.
    pub fn save(&self, histories: &RunHistories) -> Result<(), RecordError> {
        check_finite(histories)?;
        let mut writer = BufWriter::new(File::create(&self.output_path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, histories)?;
        } else {
            serde_json::to_writer(&mut writer, histories)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!(
            path = %self.output_path.display(),
            runs = histories.len(),
            "history saved"
        );
        Ok(())
    }
}

fn check_finite(histories: &RunHistories) -> Result<(), RecordError> {
    for (run, history) in histories.iter() {
        if let Some((index, value)) = history.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RecordError::NonFiniteSample {
                run: run.to_owned(),
                index,
                value,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Write `histories` as pretty-printed JSON to `path`.
pub fn save_history(histories: &RunHistories, path: impl AsRef<Path>) -> Result<(), RecordError> {
    RecordingConfig::new(path.as_ref()).save(histories)
}

/// Read a history file written by [`save_history`]. Run order is preserved.
pub fn load_history(path: impl AsRef<Path>) -> Result<RunHistories, RecordError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let histories: RunHistories = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), runs = histories.len(), "history loaded");
    Ok(histories)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
