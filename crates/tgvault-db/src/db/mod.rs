//! Database repositories for the data access layer

pub mod uploads;

pub use uploads::UploadRepository;
