//! Synchronizer error types.

use thiserror::Error;

/// Errors that can occur while running a comparison.
///
/// Mismatch classifications are not errors; they are ordinary round
/// results routed to the arbitration layer. Only conditions that make the
/// run unable to continue end up here.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The decision source ended before producing a decision.
    #[error("decision source closed before a decision was made")]
    DecisionSourceClosed,

    /// I/O failed while reading or writing arbitration prompts.
    #[error("arbitration I/O error: {0}")]
    Io(#[from] std::io::Error),
}
