use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    topic_query: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut records = app.progress.all();

    if let Some(query) = topic_query {
        let topic = app.find_topic(query)?;
        let prefix = format!("quiz:{}:", topic.key());
        records.retain(|key, _| key.starts_with(&prefix));
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No quiz attempts recorded yet.");
                return Ok(());
            }

            let key_width = records.keys().map(|k| k.len()).max().unwrap_or(5).min(60).max(5);
            for (key, record) in &records {
                let played = record
                    .last_played
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "{:<kw$} {:<32} last {}/{}  {}",
                    key,
                    terminal::progress_badge(Some(record), use_color),
                    record.last_score,
                    record.total,
                    played,
                    kw = key_width,
                );
            }
        }
    }

    Ok(())
}
