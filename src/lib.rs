pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod interaction;
pub mod render;
pub mod reveal;

use std::io::{self, BufRead, Write};

use game::{GameSession, Phase};

pub const WON_MESSAGE: &str = "Good job! You marked all the mines!";
pub const LOST_MESSAGE: &str = "Stomped on a mine! Game Over";

/// Plays `session` to the end, reading moves from `input` and drawing to
/// `output`. Returns the final phase, which is still unfinished when the input
/// runs out first.
pub fn game_loop<R: BufRead, W: Write>(session: &mut GameSession, input: &mut R, output: &mut W, clear: bool) -> io::Result<Phase> {
    let side = session.board().size.side();
    let mut message: Option<String> = None;
    while !session.is_finished() {
        if clear {
            write!(output, "{}", render::CLEAR_SCREEN)?;
        }
        write!(output, "{}", session)?;
        if let Some(text) = message.take() {
            writeln!(output, "{}", text)?;
        }
        let action = match interaction::prompt_action(input, output, side)? {
            Some(action) => action,
            None => {
                writeln!(output)?;
                return Ok(session.phase())
            }
        };
        if let Err(err) = session.apply(action) {
            message = Some(err.to_string());
        }
    }

    if clear {
        write!(output, "{}", render::CLEAR_SCREEN)?;
    }
    write!(output, "{}", session)?;
    match session.phase() {
        Phase::Won => writeln!(output, "{}", WON_MESSAGE)?,
        Phase::Lost => writeln!(output, "{}", LOST_MESSAGE)?,
        _ => {}
    }
    Ok(session.phase())
}
