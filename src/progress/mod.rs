//! Quiz progress tracking

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{ProgressStore, PROGRESS_NAMESPACE};
