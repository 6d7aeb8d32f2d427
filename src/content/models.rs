//! Catalog models for discovered content

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Set id under which a topic's single `flashcards.json` is exposed
pub const LEGACY_SET_ID: &str = "default";

/// One named set of flashcards or quiz questions within a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDescriptor {
    pub set_id: String,
    pub title: String,
}

impl SetDescriptor {
    pub fn new(set_id: impl Into<String>) -> Self {
        let set_id = set_id.into();
        let title = humanize(&set_id);
        Self { set_id, title }
    }
}

/// A (grade, subject, topic) unit of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMeta {
    pub grade: String,
    pub subject: String,
    pub topic_id: String,
    pub title: String,
    /// The topic's single `flashcards.json`, if it has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flashcards_path: Option<PathBuf>,
    #[serde(default)]
    pub flashcard_sets: Vec<SetDescriptor>,
    #[serde(default)]
    pub quiz_sets: Vec<SetDescriptor>,
}

impl TopicMeta {
    /// `grade/subject/topicId`, the key progress is recorded under
    pub fn key(&self) -> String {
        topic_key(&self.grade, &self.subject, &self.topic_id)
    }

    pub fn has_flashcards(&self) -> bool {
        !self.flashcard_sets.is_empty()
    }

    pub fn has_quizzes(&self) -> bool {
        !self.quiz_sets.is_empty()
    }
}

/// Optional `meta.json` next to a topic's content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicMetaFile {
    #[serde(default)]
    pub title: Option<String>,
}

pub fn topic_key(grade: &str, subject: &str, topic_id: &str) -> String {
    format!("{}/{}/{}", grade, subject, topic_id)
}

/// Display form of an identifier: `bab-1` -> `BAB 1`
pub fn humanize(id: &str) -> String {
    // All hyphens, not only the first: `set-2-lanjutan` -> `SET 2 LANJUTAN`
    id.replace('-', " ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("bab-1"), "BAB 1");
        assert_eq!(humanize("set-2-lanjutan"), "SET 2 LANJUTAN");
        assert_eq!(humanize("pecahan"), "PECAHAN");
    }

    #[test]
    fn test_topic_key() {
        let topic = TopicMeta {
            grade: "2".to_string(),
            subject: "bahasa-indonesia".to_string(),
            topic_id: "bab-1".to_string(),
            title: "BAB 1".to_string(),
            flashcards_path: None,
            flashcard_sets: Vec::new(),
            quiz_sets: vec![SetDescriptor::new("set-1")],
        };

        assert_eq!(topic.key(), "2/bahasa-indonesia/bab-1");
        assert!(!topic.has_flashcards());
        assert!(topic.has_quizzes());
        assert_eq!(topic.quiz_sets[0].title, "SET 1");
    }
}
