// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for provider operations.

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors reported by a structural model provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A referenced element does not exist (or no longer exists).
    #[error("element not found: {0}")]
    ElementNotFound(i64),

    /// A stable unique id did not resolve to a live element.
    #[error("unique id not found: {0}")]
    UniqueIdNotFound(String),

    /// The provider cannot open write transactions at all.
    #[error("model does not support write transactions")]
    TransactionsUnsupported,

    /// A transaction is already open; nested transactions are not allowed.
    #[error("a transaction is already open: {0}")]
    TransactionAlreadyOpen(String),

    /// Commit, rollback or a mutation was attempted with no open transaction.
    #[error("no open transaction")]
    NoOpenTransaction,

    /// The rich type-change path is not available for this instance; the
    /// caller may fall back to direct symbol assignment.
    #[error("type change path unavailable for instance {0}")]
    ChangeTypeUnavailable(i64),

    /// A type change was attempted and rejected by the host.
    #[error("type change failed for instance {instance}: {reason}")]
    ChangeTypeFailed { instance: i64, reason: String },

    /// Save, save-as or synchronize-with-central failed.
    #[error("persistence failed: {0}")]
    Persistence(String),
}
