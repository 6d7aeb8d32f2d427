//! Data models for flashcard study

use serde::{Deserialize, Serialize};

/// A flashcard with question (front) and answer (back)
///
/// Stored on disk as `{"q": "...", "a": "..."}`. Cards carry no identity
/// beyond their position in the list they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Status of a study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyState {
    /// Cards remain in the working queue
    Studying,
    /// Every card has been answered correctly (or dropped off the end)
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_uses_short_field_names() {
        let card: Flashcard = serde_json::from_str(r#"{"q": "2 + 2", "a": "4"}"#).unwrap();
        assert_eq!(card, Flashcard::new("2 + 2", "4"));

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["q"], "2 + 2");
        assert_eq!(json["a"], "4");
    }
}
