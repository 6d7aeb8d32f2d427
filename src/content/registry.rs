//! Content discovery and loading
//!
//! Directory structure under the content root:
//! ```text
//! <grade>/<subject>/<topic-id>/
//! ├── meta.json            # Optional { "title": "..." }
//! ├── flashcards.json      # Legacy single flashcard set
//! ├── flashcards/
//! │   └── {set-id}.json    # Named flashcard sets
//! └── mcq/
//!     └── {set-id}.json    # Named quiz sets
//! ```
//!
//! Scanning only indexes paths and topic titles. Card and question files
//! are read when a set is loaded. Anything missing or unreadable resolves
//! to `None`, never to an error.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use super::models::*;
use crate::flashcards::Flashcard;
use crate::quiz::Mcq;

const LEGACY_FLASHCARDS_FILE: &str = "flashcards.json";
const META_FILE: &str = "meta.json";
const FLASHCARD_SETS_DIR: &str = "flashcards";
const QUIZ_SETS_DIR: &str = "mcq";

/// Files discovered for one topic
#[derive(Debug, Default)]
struct TopicFiles {
    legacy_flashcards: Option<PathBuf>,
    flashcard_sets: BTreeMap<String, PathBuf>,
    quiz_sets: BTreeMap<String, PathBuf>,
    meta: Option<PathBuf>,
}

/// Catalog of every topic found under a content root
pub struct ContentRegistry {
    topics: Vec<TopicMeta>,
    files: HashMap<String, TopicFiles>,
}

impl ContentRegistry {
    /// Index the content tree under `root`
    pub fn scan(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut files: BTreeMap<(String, String, String), TopicFiles> = BTreeMap::new();

        if !root.is_dir() {
            log::warn!("Content directory {:?} does not exist", root);
        } else {
            // Hidden directories are pruned at every level, so nothing
            // under `.trash/` or similar is ever indexed
            for entry in WalkDir::new(&root)
                .max_depth(5)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::warn!("Skipping unreadable content entry: {}", e);
                        continue;
                    }
                };
                if entry.depth() < 4 || !entry.file_type().is_file() {
                    continue;
                }
                if let Ok(relative) = entry.path().strip_prefix(&root) {
                    index_file(&mut files, relative, entry.path());
                }
            }
        }

        let topics: Vec<TopicMeta> = files
            .iter()
            .map(|((grade, subject, topic_id), topic_files)| {
                build_topic(grade, subject, topic_id, topic_files)
            })
            .collect();

        let files = files
            .into_iter()
            .map(|((grade, subject, topic_id), topic_files)| {
                (topic_key(&grade, &subject, &topic_id), topic_files)
            })
            .collect();

        log::info!("Indexed {} topics from {:?}", topics.len(), root);

        Self { topics, files }
    }

    /// All topics, sorted by (grade, subject, topic id)
    pub fn list_topics(&self) -> &[TopicMeta] {
        &self.topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Look a topic up by its `grade/subject/topicId` key
    pub fn find_topic(&self, key: &str) -> Option<&TopicMeta> {
        self.topics.iter().find(|t| t.key() == key)
    }

    /// Distinct grades in catalog order
    pub fn grades(&self) -> Vec<&str> {
        let mut grades: Vec<&str> = self.topics.iter().map(|t| t.grade.as_str()).collect();
        grades.dedup();
        grades
    }

    /// Distinct subjects taught in `grade`
    pub fn subjects(&self, grade: &str) -> Vec<&str> {
        let mut subjects: Vec<&str> = self
            .topics
            .iter()
            .filter(|t| t.grade == grade)
            .map(|t| t.subject.as_str())
            .collect();
        subjects.dedup();
        subjects
    }

    pub fn topics_in(&self, grade: &str, subject: &str) -> Vec<&TopicMeta> {
        self.topics
            .iter()
            .filter(|t| t.grade == grade && t.subject == subject)
            .collect()
    }

    /// Load a flashcard set
    ///
    /// Without a set id the first set is used, falling back to the legacy
    /// `flashcards.json` when the topic has no named sets.
    pub fn load_flashcards(
        &self,
        topic: &TopicMeta,
        set_id: Option<&str>,
    ) -> Option<Vec<Flashcard>> {
        let files = self.files.get(&topic.key())?;

        let path = match set_id {
            Some(id) => match files.flashcard_sets.get(id) {
                Some(path) => path,
                None if id == LEGACY_SET_ID && files.flashcard_sets.is_empty() => {
                    files.legacy_flashcards.as_ref()?
                }
                None => return None,
            },
            None => files
                .flashcard_sets
                .values()
                .next()
                .or(files.legacy_flashcards.as_ref())?,
        };

        read_json(path)
    }

    /// Load the quiz set with exactly this id
    pub fn load_mcq(&self, topic: &TopicMeta, set_id: &str) -> Option<Vec<Mcq>> {
        let files = self.files.get(&topic.key())?;
        let path = files.quiz_sets.get(set_id)?;
        let questions: Vec<Mcq> = read_json(path)?;

        let total = questions.len();
        let valid: Vec<Mcq> = questions.into_iter().filter(Mcq::is_valid).collect();
        if valid.len() != total {
            log::warn!(
                "Dropped {} invalid questions from {:?}",
                total - valid.len(),
                path
            );
        }
        Some(valid)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with('.'))
}

/// File stem of a `.json` file, or `None` for anything else
fn json_stem(name: &str) -> Option<&str> {
    name.strip_suffix(".json").filter(|stem| !stem.is_empty())
}

fn index_file(
    files: &mut BTreeMap<(String, String, String), TopicFiles>,
    relative: &Path,
    full: &Path,
) {
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    let Some(parts) = parts else {
        log::warn!("Skipping non UTF-8 content path {:?}", full);
        return;
    };

    let (grade, subject, topic_id, rest) = match parts.as_slice() {
        [grade, subject, topic_id, rest @ ..] => (*grade, *subject, *topic_id, rest),
        _ => return,
    };

    let topic = || {
        (
            grade.to_string(),
            subject.to_string(),
            topic_id.to_string(),
        )
    };

    match rest {
        [LEGACY_FLASHCARDS_FILE] => {
            files.entry(topic()).or_default().legacy_flashcards = Some(full.to_path_buf());
        }
        [META_FILE] => {
            files.entry(topic()).or_default().meta = Some(full.to_path_buf());
        }
        [FLASHCARD_SETS_DIR, name] => {
            if let Some(set_id) = json_stem(name) {
                files
                    .entry(topic())
                    .or_default()
                    .flashcard_sets
                    .insert(set_id.to_string(), full.to_path_buf());
            }
        }
        [QUIZ_SETS_DIR, name] => {
            if let Some(set_id) = json_stem(name) {
                files
                    .entry(topic())
                    .or_default()
                    .quiz_sets
                    .insert(set_id.to_string(), full.to_path_buf());
            }
        }
        _ => {}
    }
}

fn build_topic(grade: &str, subject: &str, topic_id: &str, files: &TopicFiles) -> TopicMeta {
    let title = files
        .meta
        .as_ref()
        .and_then(|path| read_json::<TopicMetaFile>(path))
        .and_then(|meta| meta.title)
        .unwrap_or_else(|| humanize(topic_id));

    let mut flashcard_sets: Vec<SetDescriptor> =
        files.flashcard_sets.keys().map(SetDescriptor::new).collect();
    if flashcard_sets.is_empty() && files.legacy_flashcards.is_some() {
        flashcard_sets.push(SetDescriptor::new(LEGACY_SET_ID));
    }

    TopicMeta {
        grade: grade.to_string(),
        subject: subject.to_string(),
        topic_id: topic_id.to_string(),
        title,
        flashcards_path: files.legacy_flashcards.clone(),
        flashcard_sets,
        quiz_sets: files.quiz_sets.keys().map(SetDescriptor::new).collect(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to parse {:?}: {}", path, e);
            None
        }
    }
}
