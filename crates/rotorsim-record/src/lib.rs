//! `rotorsim-record` — history persistence for rotorsim runs.
//!
//! Writes the name-keyed rpm histories produced by a scenario to a single
//! JSON file and reads them back.
//!
//! # Example
//!
//! ```no_run
//! use rotorsim_core::history::{History, RunHistories};
//! use rotorsim_record::prelude::*;
//!
//! let histories: RunHistories =
//!     std::iter::once(("simple_motor".to_owned(), History::from(vec![4.0, 7.6]))).collect();
//! save_history(&histories, DEFAULT_HISTORY_PATH)?;
//! let reloaded = load_history(DEFAULT_HISTORY_PATH)?;
//! assert_eq!(reloaded, histories);
//! # Ok::<(), rotorsim_core::error::RecordError>(())
//! ```

pub mod recorder;

pub use recorder::{DEFAULT_HISTORY_PATH, RecordingConfig, load_history, save_history};

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::recorder::{DEFAULT_HISTORY_PATH, RecordingConfig, load_history, save_history};
}
