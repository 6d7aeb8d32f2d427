//! Content registry for Belajar Seru
//!
//! This module provides:
//! - Discovery of topics laid out as `<grade>/<subject>/<topic-id>/`
//! - The sorted topic catalog with flashcard and quiz set descriptors
//! - On-demand loading of flashcard and quiz sets

pub mod models;
pub mod registry;

pub use models::*;
pub use registry::ContentRegistry;
