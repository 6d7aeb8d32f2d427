//! Data models for multiple-choice quizzes

use serde::{Deserialize, Serialize};

/// One multiple-choice question
///
/// Stored on disk as `{"id", "q", "options", "answer", "explain"?}` where
/// `answer` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub id: String,
    #[serde(rename = "q")]
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer: usize,
    #[serde(rename = "explain", default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Mcq {
    /// At least two options and an answer that points at one of them
    pub fn is_valid(&self) -> bool {
        self.options.len() >= 2 && self.answer < self.options.len()
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

/// Letter label for an option: 0 -> 'A', 1 -> 'B', ...
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map(char::from)
        .unwrap_or('?')
}

/// Phase of a quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizPhase {
    /// Collecting answers, no feedback shown
    Answering,
    /// Score shown, answer key hidden
    Finished,
    /// Score and full answer key shown
    Reviewing,
}

/// How an option is presented in the answer key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionMark {
    /// The correct option
    Correct,
    /// Chosen by the player but wrong
    WrongChoice,
    Plain,
}

/// One question of the answer key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem<'a> {
    pub number: usize,
    pub question: &'a Mcq,
    pub chosen: Option<usize>,
    pub marks: Vec<OptionMark>,
}

impl ReviewItem<'_> {
    pub fn is_correct(&self) -> bool {
        self.chosen.map_or(false, |c| self.question.is_correct(c))
    }
}

/// Outcome of a finished attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub score: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_from_content_json() {
        let q: Mcq = serde_json::from_str(
            r#"{"id": "q1", "q": "Ibu kota Indonesia?", "options": ["Jakarta", "Bandung"], "answer": 0, "explain": "Jakarta"}"#,
        )
        .unwrap();

        assert_eq!(q.question, "Ibu kota Indonesia?");
        assert_eq!(q.explanation.as_deref(), Some("Jakarta"));
        assert!(q.is_valid());
        assert!(q.is_correct(0));
    }

    #[test]
    fn test_mcq_validity() {
        let mut q = Mcq {
            id: "q".to_string(),
            question: "?".to_string(),
            options: vec!["a".to_string()],
            answer: 0,
            explanation: None,
        };
        assert!(!q.is_valid());

        q.options.push("b".to_string());
        q.answer = 2;
        assert!(!q.is_valid());
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
        assert_eq!(option_label(25), 'Z');
        assert_eq!(option_label(26), '?');
        assert_eq!(option_label(1000), '?');
    }
}
