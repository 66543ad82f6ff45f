//! Domain models

mod upload;

pub use upload::{UploadResponse, UploadedFile};
