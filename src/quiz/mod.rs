//! Multiple-choice quizzes
//!
//! Answers are collected first and scored at the end; the answer key with
//! explanations becomes available only after the attempt is finished.

pub mod flow;
pub mod models;

pub use flow::QuizFlow;
pub use models::*;
