// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for engine runs.
//!
//! Only run-fatal conditions surface here. Per-item failures (geometry
//! extraction, snap misses, resolution misses) degrade the affected record
//! and are reported through logging, never through this type.

use std::path::PathBuf;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal run failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The update input document could not be opened or parsed.
    #[error("update input not readable: {path}: {reason}")]
    InputUnreadable { path: PathBuf, reason: String },

    /// The model cannot open write transactions; the update run never
    /// starts.
    #[error("model does not support write transactions")]
    TransactionsUnavailable,

    /// An error was raised while the write transaction was open. All
    /// mutations of the run have been rolled back.
    #[error("transaction aborted and rolled back: {reason}")]
    TransactionAborted { reason: String },

    /// The export snapshot (or another mandatory document) could not be
    /// written.
    #[error(transparent)]
    Document(#[from] strax_model::Error),
}
