use std::io::{BufRead, Write};

use anyhow::Result;

use belajar_lib::progress::QuizProgress;
use belajar_lib::quiz::{QuizFlow, QuizPhase, QuizScore};

use super::read_command;
use crate::app::App;
use crate::render::terminal::{self, Color};

pub fn run<R: BufRead, W: Write>(
    app: &mut App,
    topic_query: &str,
    set_id: Option<&str>,
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    let topic = app.find_topic(topic_query)?.clone();
    if topic.quiz_sets.is_empty() {
        writeln!(out, "No quiz for {}.", topic.title)?;
        return Ok(());
    }

    let set = App::pick_set(&topic.quiz_sets, set_id, "quiz")?.clone();
    let questions = app.registry.load_mcq(&topic, &set.set_id).unwrap_or_default();
    if questions.is_empty() {
        writeln!(out, "No questions in {} / {}.", topic.title, set.title)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        terminal::paint(&format!("{} \u{2022} {}", topic.title, set.title), Color::BOLD, use_color)
    )?;
    if let Some(previous) = app.quiz_progress(&topic, &set.set_id) {
        writeln!(out, "Previously: {}", terminal::progress_badge(Some(&previous), use_color))?;
    }

    let topic_key = topic.key();
    let mut flow = QuizFlow::new(questions);
    play(&mut flow, input, out, use_color, |score| {
        app.progress.record(&topic_key, &set.set_id, score.score, score.total)
    })
}

/// Drive a quiz from line commands; `on_finish` records each finished attempt
pub fn play<R, W, F>(
    flow: &mut QuizFlow,
    input: &mut R,
    out: &mut W,
    use_color: bool,
    mut on_finish: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&QuizScore) -> Option<QuizProgress>,
{
    loop {
        writeln!(out)?;
        match flow.phase() {
            QuizPhase::Answering => {
                let Some(question) = flow.current() else {
                    return Ok(());
                };
                for line in terminal::render_question(
                    question,
                    flow.index(),
                    flow.len(),
                    flow.current_answer(),
                    use_color,
                ) {
                    writeln!(out, "{}", line)?;
                }
                if !flow.all_answered() {
                    writeln!(
                        out,
                        "{}",
                        terminal::paint(
                            &format!(
                                "Answer every question to finish ({} left).",
                                flow.unanswered_count()
                            ),
                            Color::GRAY,
                            use_color
                        )
                    )?;
                }
                writeln!(
                    out,
                    "[a-{}] choose  [<] prev  [>] next  [!] finish  [quit]",
                    last_option_letter(flow)
                )?;

                let Some(command) = read_command(input, out)? else {
                    return Ok(());
                };
                match command.as_str() {
                    "" => {}
                    "quit" => return Ok(()),
                    "<" => {
                        flow.prev();
                    }
                    ">" => {
                        flow.next();
                    }
                    "!" => match flow.finish() {
                        Some(score) => {
                            writeln!(out, "{}", terminal::render_score(&score, use_color))?;
                            if let Some(progress) = on_finish(&score) {
                                writeln!(
                                    out,
                                    "Progress: {}",
                                    terminal::progress_badge(Some(&progress), use_color)
                                )?;
                            }
                        }
                        None => writeln!(out, "Not every question is answered yet.")?,
                    },
                    other => match parse_option(other) {
                        Some(option) if flow.choose(option) => {
                            // Move on after answering, like turning a page
                            flow.next();
                        }
                        _ => writeln!(out, "Unknown command '{}'", other)?,
                    },
                }
            }
            QuizPhase::Finished => {
                writeln!(out, "{}", terminal::render_score(&flow.score(), use_color))?;
                writeln!(out, "[k] answer key  [r] restart  [q] quit")?;
                match read_command(input, out)?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some("k") => {
                        flow.show_answer_key();
                    }
                    Some("r") => flow.restart(),
                    Some(other) => writeln!(out, "Unknown command '{}'", other)?,
                }
            }
            QuizPhase::Reviewing => {
                if let Some(items) = flow.review() {
                    for item in &items {
                        for line in terminal::render_review_item(item, use_color) {
                            writeln!(out, "{}", line)?;
                        }
                        writeln!(out)?;
                    }
                }
                writeln!(out, "{}", terminal::render_score(&flow.score(), use_color))?;
                writeln!(out, "[b] back  [r] restart  [q] quit")?;
                match read_command(input, out)?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some("b") => {
                        flow.hide_answer_key();
                    }
                    Some("r") => flow.restart(),
                    Some(other) => writeln!(out, "Unknown command '{}'", other)?,
                }
            }
        }
    }
}

/// `a` -> 0, `b` -> 1, ...
fn parse_option(command: &str) -> Option<usize> {
    let mut chars = command.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some((c as u8 - b'a') as usize),
        _ => None,
    }
}

fn last_option_letter(flow: &QuizFlow) -> char {
    let count = flow.current().map_or(1, |q| q.options.len()).max(1);
    belajar_lib::quiz::option_label(count - 1).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use belajar_lib::quiz::Mcq;

    fn flow() -> QuizFlow {
        let question = |id: &str, answer: usize| Mcq {
            id: id.to_string(),
            question: format!("Question {}", id),
            options: vec!["satu".into(), "dua".into(), "tiga".into()],
            answer,
            explanation: Some(format!("Because {}", id)),
        };
        QuizFlow::new(vec![question("1", 0), question("2", 2)])
    }

    fn drive(flow: &mut QuizFlow, input: &str) -> (String, Vec<QuizScore>) {
        let mut out = Vec::new();
        let mut finished = Vec::new();
        play(flow, &mut input.as_bytes(), &mut out, false, |score| {
            finished.push(*score);
            None
        })
        .unwrap();
        (String::from_utf8(out).unwrap(), finished)
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("a"), Some(0));
        assert_eq!(parse_option("c"), Some(2));
        assert_eq!(parse_option("ab"), None);
        assert_eq!(parse_option("!"), None);
    }

    #[test]
    fn test_finish_is_refused_until_answered() {
        let mut f = flow();
        let (output, finished) = drive(&mut f, "a\n!\nquit\n");

        assert!(output.contains("Not every question is answered yet."));
        assert!(finished.is_empty());
        assert_eq!(f.phase(), QuizPhase::Answering);
    }

    #[test]
    fn test_full_attempt_with_answer_key() {
        let mut f = flow();
        let (output, finished) = drive(&mut f, "a\nb\n!\nk\nq\n");

        assert_eq!(finished, vec![QuizScore { score: 1, total: 2 }]);
        assert!(output.contains("Score: 1 / 2"));
        assert!(output.contains("A. satu  (correct)"));
        assert!(output.contains("B. dua  (your answer)"));
        assert!(output.contains("Explanation: Because 2"));
        assert_eq!(f.phase(), QuizPhase::Reviewing);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut f = flow();
        let (_, finished) = drive(&mut f, "a\nc\n!\nr\na\nc\n!\nq\n");

        assert_eq!(finished.len(), 2);
        assert!(finished.iter().all(QuizScore::is_perfect));
    }
}
