use anyhow::Result;

use belajar_lib::content::{ContentRegistry, TopicMeta};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    grade: Option<&str>,
    subject: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let registry = &app.registry;
    let topics = select_topics(registry, grade, subject);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = topics.iter().map(|t| {
                let quiz_sets: Vec<serde_json::Value> = t.quiz_sets.iter().map(|s| {
                    serde_json::json!({
                        "setId": s.set_id,
                        "title": s.title,
                        "progress": app.quiz_progress(t, &s.set_id),
                    })
                }).collect();
                serde_json::json!({
                    "key": t.key(),
                    "grade": t.grade,
                    "subject": t.subject,
                    "topicId": t.topic_id,
                    "title": t.title,
                    "flashcardSets": t.flashcard_sets,
                    "quizSets": quiz_sets,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if registry.is_empty() {
                println!("No topics found in {}.", app.config.content_dir.display());
                return Ok(());
            }
            if topics.is_empty() {
                println!("No topics match the given grade and subject.");
                return Ok(());
            }

            let mut last_heading = None;
            for topic in &topics {
                let heading = (topic.grade.as_str(), topic.subject.as_str());
                if last_heading != Some(heading) {
                    if last_heading.is_some() {
                        println!();
                    }
                    let text = format!(
                        "Grade {} \u{2022} {}",
                        topic.grade,
                        belajar_lib::content::humanize(&topic.subject)
                    );
                    println!("{}", terminal::paint(&text, Color::BOLD, use_color));
                    last_heading = Some(heading);
                }

                println!(
                    "  {} {}",
                    topic.title,
                    terminal::paint(&format!("[{}]", topic.key()), Color::DIM, use_color)
                );

                if topic.flashcard_sets.is_empty() && topic.quiz_sets.is_empty() {
                    println!("    (no content for this topic)");
                }
                if !topic.flashcard_sets.is_empty() {
                    let ids: Vec<&str> =
                        topic.flashcard_sets.iter().map(|s| s.set_id.as_str()).collect();
                    println!("    flashcards: {}", ids.join(", "));
                }
                for set in &topic.quiz_sets {
                    let progress = app.quiz_progress(topic, &set.set_id);
                    println!(
                        "    quiz {}: {}",
                        set.set_id,
                        terminal::progress_badge(progress.as_ref(), use_color)
                    );
                }
            }
        }
    }

    Ok(())
}

/// Topics under the optional grade and subject filters, in catalog order
fn select_topics<'a>(
    registry: &'a ContentRegistry,
    grade: Option<&str>,
    subject: Option<&str>,
) -> Vec<&'a TopicMeta> {
    let mut topics = Vec::new();
    for g in registry.grades() {
        if grade.map_or(false, |wanted| wanted != g) {
            continue;
        }
        for s in registry.subjects(g) {
            if subject.map_or(false, |wanted| wanted != s) {
                continue;
            }
            topics.extend(registry.topics_in(g, s));
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_registry() -> (ContentRegistry, TempDir) {
        let temp = TempDir::new().unwrap();
        for topic in ["1/ipa/bab-1", "2/ipa/bab-1", "2/matematika/bab-1", "2/matematika/bab-2"] {
            let dir = temp.path().join(topic);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("flashcards.json"), r#"[{"q": "?", "a": "!"}]"#).unwrap();
        }
        (ContentRegistry::scan(temp.path()), temp)
    }

    fn keys(topics: &[&TopicMeta]) -> Vec<String> {
        topics.iter().map(|t| t.key()).collect()
    }

    #[test]
    fn test_select_topics_filters() {
        let (registry, _temp) = create_test_registry();

        assert_eq!(select_topics(&registry, None, None).len(), 4);
        assert_eq!(
            keys(&select_topics(&registry, Some("2"), None)),
            vec!["2/ipa/bab-1", "2/matematika/bab-1", "2/matematika/bab-2"]
        );
        assert_eq!(
            keys(&select_topics(&registry, None, Some("ipa"))),
            vec!["1/ipa/bab-1", "2/ipa/bab-1"]
        );
        assert_eq!(
            keys(&select_topics(&registry, Some("2"), Some("matematika"))),
            vec!["2/matematika/bab-1", "2/matematika/bab-2"]
        );
        assert!(select_topics(&registry, Some("9"), None).is_empty());
    }
}
