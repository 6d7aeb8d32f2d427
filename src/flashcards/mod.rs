//! Flashcard study for Belajar Seru
//!
//! This module provides:
//! - The flashcard data model as stored in content files
//! - The active-recall study loop that requeues missed cards

pub mod models;
pub mod session;

pub use models::*;
pub use session::{FlashcardSession, PositionSource, RandomPositions};
