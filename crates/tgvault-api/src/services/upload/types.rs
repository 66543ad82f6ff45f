//! Types used by the upload routing service

use tgvault_core::UploadedFile;

/// Outcome of one routed upload request.
///
/// Exhaustion (every pool empty or every attempt failed) is a legal outcome
/// the caller must be able to tell apart from an error, so it is a variant
/// here rather than an `AppError`.
#[derive(Debug)]
pub enum UploadOutcome {
    /// A backend accepted the file and the record was persisted.
    Stored(UploadedFile),
    /// No backend produced a result; nothing was persisted.
    Exhausted,
}
