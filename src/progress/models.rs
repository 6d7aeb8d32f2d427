use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best and last result for one quiz set of one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProgress {
    pub best_score: usize,
    pub last_score: usize,
    pub attempts: u32,
    /// True iff the last attempt got every question right
    pub completed: bool,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,
}

impl QuizProgress {
    /// Fold a new attempt into the previous record (if any)
    pub fn next_attempt(
        previous: Option<&QuizProgress>,
        score: usize,
        total: usize,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            best_score: previous.map_or(0, |p| p.best_score).max(score),
            last_score: score,
            attempts: previous.map_or(0, |p| p.attempts).saturating_add(1),
            completed: score == total,
            total,
            last_played: Some(played_at),
        }
    }
}

/// Composite key of a quiz record inside the progress blob
pub fn quiz_key(topic_key: &str, set_id: &str) -> String {
    format!("quiz:{}:{}", topic_key, set_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_count_saturates() {
        let previous: QuizProgress = serde_json::from_str(
            r#"{"bestScore": 3, "lastScore": 3, "attempts": 4294967295, "completed": false, "total": 5}"#,
        )
        .unwrap();

        let next = QuizProgress::next_attempt(Some(&previous), 5, 5, Utc::now());
        assert_eq!(next.attempts, u32::MAX);
        assert_eq!(next.best_score, 5);
        assert!(next.completed);
    }

    #[test]
    fn test_quiz_key() {
        assert_eq!(quiz_key("2/matematika/bab-1", "set-1"), "quiz:2/matematika/bab-1:set-1");
    }
}
