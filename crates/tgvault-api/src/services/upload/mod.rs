//! Upload routing service
//!
//! Orchestrates one upload request end-to-end: pick a handle from the bot
//! pool, fall back to the client pool, persist the record for the first
//! success.

mod service;
mod traits;
mod types;

pub use service::UploadRouter;
pub use traits::UploadLog;
pub use types::UploadOutcome;
