use belajar_lib::progress::QuizProgress;
use belajar_lib::quiz::{option_label, Mcq, OptionMark, QuizScore, ReviewItem};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Option lines while answering: the chosen one is marked with `>`
pub fn render_question(
    question: &Mcq,
    index: usize,
    total: usize,
    chosen: Option<usize>,
    use_color: bool,
) -> Vec<String> {
    let mut lines = vec![
        paint(&format!("Question {} / {}", index + 1, total), Color::BOLD, use_color),
        question.question.clone(),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let line = format!("{} {}. {}", marker(chosen == Some(i)), option_label(i), option);
        if chosen == Some(i) {
            lines.push(paint(&line, Color::BLUE, use_color));
        } else {
            lines.push(line);
        }
    }

    lines
}

/// Answer key for one question: correct option green, wrong choice red
pub fn render_review_item(item: &ReviewItem<'_>, use_color: bool) -> Vec<String> {
    let mut lines = vec![
        paint(&format!("Question {}", item.number), Color::BOLD, use_color),
        item.question.question.clone(),
    ];

    for (i, (option, mark)) in item.question.options.iter().zip(&item.marks).enumerate() {
        let line = format!("{} {}. {}", marker(item.chosen == Some(i)), option_label(i), option);
        lines.push(match mark {
            OptionMark::Correct => paint(&format!("{}  (correct)", line), Color::GREEN, use_color),
            OptionMark::WrongChoice => {
                paint(&format!("{}  (your answer)", line), Color::RED, use_color)
            }
            OptionMark::Plain => line,
        });
    }

    if let Some(ref explanation) = item.question.explanation {
        lines.push(paint(&format!("Explanation: {}", explanation), Color::DIM, use_color));
    }

    lines
}

pub fn render_score(score: &QuizScore, use_color: bool) -> String {
    let text = format!("Score: {} / {}", score.score, score.total);
    let color = if score.is_perfect() { Color::GREEN } else { Color::YELLOW };
    paint(&text, color, use_color)
}

/// Short progress badge for a quiz set, e.g. `best 4/5, 2 attempts`
pub fn progress_badge(progress: Option<&QuizProgress>, use_color: bool) -> String {
    match progress {
        None => paint("not attempted", Color::GRAY, use_color),
        Some(p) => {
            let attempts = if p.attempts == 1 {
                "1 attempt".to_string()
            } else {
                format!("{} attempts", p.attempts)
            };
            let text = format!("best {}/{}, {}", p.best_score, p.total, attempts);
            if p.completed {
                paint(&format!("{} \u{2713}", text), Color::GREEN, use_color)
            } else {
                text
            }
        }
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        ">"
    } else {
        " "
    }
}
