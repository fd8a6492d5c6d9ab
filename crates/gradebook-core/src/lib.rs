//! gradebook-core — student record store, file codec, and report queries.
//!
//! This crate owns the data model, the flat-file format, and every
//! operation the CLI exposes. Rendering reports lives in `gradebook-report`.

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod statistics;
pub mod storage;
pub mod store;

pub use config::{load_config_from, GradebookConfig, OutputFormat};
pub use error::{RegistryError, RegistryResult};
pub use model::{CourseRecord, CourseRow, Mark, Student};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{EditOutcome, RecordStore};
