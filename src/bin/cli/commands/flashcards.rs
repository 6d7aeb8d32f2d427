use std::io::{BufRead, Write};

use anyhow::Result;

use belajar_lib::flashcards::{FlashcardSession, PositionSource};

use super::read_command;
use crate::app::App;
use crate::render::terminal::{self, Color};

pub fn run<R: BufRead, W: Write>(
    app: &App,
    topic_query: &str,
    set_id: Option<&str>,
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    let topic = app.find_topic(topic_query)?;
    if topic.flashcard_sets.is_empty() {
        writeln!(out, "No flashcards for {}.", topic.title)?;
        return Ok(());
    }

    let set = App::pick_set(&topic.flashcard_sets, set_id, "flashcard")?;
    let cards = app
        .registry
        .load_flashcards(topic, Some(&set.set_id))
        .unwrap_or_default();
    if cards.is_empty() {
        writeln!(out, "No flashcards in {} / {}.", topic.title, set.title)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        terminal::paint(&format!("{} \u{2022} {}", topic.title, set.title), Color::BOLD, use_color)
    )?;
    let mut session = FlashcardSession::new(cards);
    study(&mut session, input, out, use_color)
}

/// Drive a session from line commands until finished-and-quit or EOF
pub fn study<P: PositionSource, R: BufRead, W: Write>(
    session: &mut FlashcardSession<P>,
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    loop {
        let Some(card) = session.current() else {
            writeln!(out, "{}", terminal::paint("Finished!", Color::GREEN, use_color))?;
            writeln!(out, "[r] study again  [q] quit")?;
            match read_command(input, out)?.as_deref() {
                None | Some("q") => return Ok(()),
                Some("r") => session.reset(),
                Some(_) => {}
            }
            continue;
        };

        writeln!(out)?;
        writeln!(
            out,
            "{}",
            terminal::paint(
                &format!("Card {} of {}", session.position(), session.len()),
                Color::DIM,
                use_color
            )
        )?;
        writeln!(out, "Q: {}", card.question)?;
        if session.answer_shown() {
            writeln!(out, "A: {}", card.answer)?;
        } else {
            writeln!(
                out,
                "{}",
                terminal::paint("(Enter to show the answer)", Color::GRAY, use_color)
            )?;
        }
        writeln!(out, "[y] correct  [n] again later  [r] reset  [q] quit")?;

        match read_command(input, out)?.as_deref() {
            None | Some("q") => return Ok(()),
            Some("") => session.toggle_answer(),
            Some("y") => {
                session.mark_correct();
            }
            Some("n") => {
                session.mark_incorrect();
            }
            Some("r") => session.reset(),
            Some(other) => writeln!(out, "Unknown command '{}'", other)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belajar_lib::flashcards::{Flashcard, RandomPositions};

    fn session(n: usize) -> FlashcardSession<RandomPositions> {
        let cards = (0..n)
            .map(|i| Flashcard::new(format!("q{}", i), format!("a{}", i)))
            .collect();
        FlashcardSession::with_positions(cards, RandomPositions::seeded(7))
    }

    fn drive(session: &mut FlashcardSession<RandomPositions>, input: &str) -> String {
        let mut out = Vec::new();
        study(session, &mut input.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_reveal_then_mark_correct() {
        let mut s = session(2);
        let output = drive(&mut s, "\ny\ny\nq\n");

        assert!(output.contains("Card 1 of 2"));
        assert!(output.contains("A: a0"));
        assert!(output.contains("Finished!"));
        assert!(s.is_finished());
    }

    #[test]
    fn test_eof_stops_studying() {
        let mut s = session(3);
        let output = drive(&mut s, "y\n");

        assert!(output.contains("Card 2 of 3"));
        assert!(!s.is_finished());
    }
}
