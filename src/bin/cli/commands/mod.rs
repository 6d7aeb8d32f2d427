pub mod flashcards;
pub mod progress;
pub mod quiz;
pub mod topics;

use std::io::{BufRead, Write};

use anyhow::Result;

/// Prompt and read one trimmed, lowercased command line; `None` on EOF
pub fn read_command<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
