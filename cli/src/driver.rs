use std::io::{BufRead, Write};

use anyhow::Result;
use cellsweep_core::{Session, SessionState};

use crate::command::{Command, CommandError, HELP};
use crate::render::{end_message, render_board};

/// Runs the read-apply-draw loop until the session ends, the player quits or input closes.
pub(crate) fn play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
    cell_size: u32,
) -> Result<SessionState> {
    write!(out, "{}", render_board(session))?;
    writeln!(out, "type `h` for help")?;

    let mut lines = input.lines();
    while !session.is_finished() {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            log::debug!("Input closed");
            break;
        };
        let line = line?;

        let action = match Command::parse(&line, cell_size) {
            Ok(Command::Act(action)) => action,
            Ok(Command::Help) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Ok(Command::Quit) => break,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                writeln!(out, "error: {}", err)?;
                continue;
            }
        };

        log::debug!("Applying {:?}", action);
        match session.apply(action) {
            Ok(_) => write!(out, "{}", render_board(session))?,
            Err(err) => writeln!(out, "error: {}", err)?,
        }
    }

    if let Some(message) = end_message(session.state()) {
        writeln!(out, "{}", message)?;
    }
    Ok(session.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsweep_core::Board;
    use std::io::Cursor;

    fn run(mines: &[(u16, u16)], script: &str) -> (SessionState, String) {
        let mut session = Session::new(Board::from_mine_coords(2, 2, mines).unwrap());
        let mut out = Vec::new();
        let state = play(&mut session, Cursor::new(script), &mut out, 20).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn plays_to_a_win() {
        let (state, out) = run(&[(1, 0)], "r 0 0\nr 0 1\nr 1 1\nf 1 0\n");
        assert_eq!(state, SessionState::Won);
        assert!(out.ends_with("Yay! You Win\n"));
    }

    #[test]
    fn click_on_mine_loses() {
        let (state, out) = run(&[(1, 0)], "click 1 21\n");
        assert_eq!(state, SessionState::Lost);
        assert!(out.contains("0  # #\n1  X #\n"));
        assert!(out.ends_with("Kaboom! You Lose\n"));
    }

    #[test]
    fn errors_do_not_end_the_loop() {
        let (state, out) = run(&[(1, 0)], "dig\nr 9 9\n\nq\n");
        assert_eq!(state, SessionState::Playing);
        assert!(out.contains("error: Unknown command \"dig\""));
        assert!(out.contains("error: Coordinates (9, 9) are outside the board"));
    }

    #[test]
    fn stops_when_input_closes() {
        let (state, out) = run(&[(1, 0)], "h\n");
        assert_eq!(state, SessionState::Playing);
        assert!(out.contains("commands:"));
    }

    #[test]
    fn ignores_lines_after_the_game_ends() {
        let (state, out) = run(&[(0, 0)], "r 0 0\nr 1 1\n");
        assert_eq!(state, SessionState::Lost);
        assert_eq!(out.matches("> ").count(), 1);
    }
}
