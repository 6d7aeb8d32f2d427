use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use belajar_lib::config::AppConfig;
use belajar_lib::content::{ContentRegistry, SetDescriptor, TopicMeta};
use belajar_lib::progress::{ProgressStore, QuizProgress};
use belajar_lib::storage::FileStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub registry: ContentRegistry,
    pub progress: ProgressStore<FileStorage>,
}

impl App {
    /// Load config, apply flag overrides and index the content tree
    pub fn new(
        config_path: Option<&Path>,
        content_dir: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = AppConfig::load(config_path).context("Failed to load config")?;
        if let Some(dir) = content_dir {
            config.content_dir = dir;
        }
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let data_dir = config
            .resolved_data_dir()
            .context("Failed to get data directory")?;

        let registry = ContentRegistry::scan(config.content_dir.clone());
        let progress = ProgressStore::new(FileStorage::new(data_dir));

        Ok(Self {
            config,
            registry,
            progress,
        })
    }

    /// Find a topic by key or title (case-insensitive prefix match)
    pub fn find_topic(&self, query: &str) -> Result<&TopicMeta> {
        let topics = self.registry.list_topics();
        if topics.is_empty() {
            bail!(
                "No content found in {}",
                self.config.content_dir.display()
            );
        }

        let query_lower = query.to_lowercase();
        let key_of = |t: &TopicMeta| t.key().to_lowercase();

        // Exact match first
        if let Some(topic) = topics
            .iter()
            .find(|t| key_of(t) == query_lower || t.title.to_lowercase() == query_lower)
        {
            return Ok(topic);
        }

        // Prefix match
        let matches: Vec<&TopicMeta> = topics
            .iter()
            .filter(|t| {
                key_of(t).starts_with(&query_lower)
                    || t.title.to_lowercase().starts_with(&query_lower)
            })
            .collect();

        match matches.len() {
            0 => bail!(
                "No topic matching '{}'. Available topics:\n{}",
                query,
                topic_lines(topics.iter())
            ),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous topic '{}'. Matches:\n{}",
                query,
                topic_lines(matches.iter().copied())
            ),
        }
    }

    /// Pick a set by id, or the first one when no id is given
    pub fn pick_set<'a>(
        sets: &'a [SetDescriptor],
        set_id: Option<&str>,
        kind: &str,
    ) -> Result<&'a SetDescriptor> {
        match set_id {
            Some(id) => sets.iter().find(|s| s.set_id == id).with_context(|| {
                format!(
                    "No {} set '{}'. Available: {}",
                    kind,
                    id,
                    sets.iter().map(|s| s.set_id.as_str()).collect::<Vec<_>>().join(", ")
                )
            }),
            None => sets.first().with_context(|| format!("This topic has no {} sets", kind)),
        }
    }

    pub fn quiz_progress(&self, topic: &TopicMeta, set_id: &str) -> Option<QuizProgress> {
        self.progress.get(&topic.key(), set_id)
    }
}

fn topic_lines<'a>(topics: impl Iterator<Item = &'a TopicMeta>) -> String {
    topics
        .map(|t| format!("  - {} ({})", t.key(), t.title))
        .collect::<Vec<_>>()
        .join("\n")
}
