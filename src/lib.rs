//! Belajar Seru: flashcards and quizzes for children's learning materials
//!
//! Content lives in a `<grade>/<subject>/<topic-id>/` tree of JSON files and
//! is indexed by [`content::ContentRegistry`]. Study happens through the
//! [`flashcards::FlashcardSession`] and [`quiz::QuizFlow`] state machines,
//! and quiz results are kept by [`progress::ProgressStore`].

pub mod config;
pub mod content;
pub mod flashcards;
pub mod progress;
pub mod quiz;
pub mod storage;
