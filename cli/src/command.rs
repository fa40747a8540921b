use cellsweep_core::{Action, Coord, PointerButton};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  r ROW COL            reveal a cell
  f ROW COL            flag or unflag a cell
  click X Y [right]    click at pixel X,Y (left button unless `right`)
  h                    show this help
  q                    quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Act(Action),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected {expected} arguments, got {got}")]
    Arity { expected: &'static str, got: usize },
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Unknown button {0:?}, use `left` or `right`")]
    UnknownButton(String),
    #[error("Click at ({0}, {1}) does not map to any cell")]
    OffGrid(u32, u32),
}

impl Command {
    /// Parses one input line, mapping clicks with cells of `cell_size` pixels.
    pub(crate) fn parse(line: &str, cell_size: u32) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Self::Act(Action::Reveal(parse_coords(&args)?))),
            "f" | "flag" => Ok(Self::Act(Action::Flag(parse_coords(&args)?))),
            "c" | "click" => parse_click(&args, cell_size),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

fn parse_coords(args: &[&str]) -> Result<(Coord, Coord), CommandError> {
    match args {
        [row, col] => Ok((parse_number(row)?, parse_number(col)?)),
        _ => Err(CommandError::Arity {
            expected: "2",
            got: args.len(),
        }),
    }
}

fn parse_click(args: &[&str], cell_size: u32) -> Result<Command, CommandError> {
    let (x, y, button) = match args {
        [x, y] => (x, y, PointerButton::Primary),
        [x, y, button] => (x, y, parse_button(button)?),
        _ => {
            return Err(CommandError::Arity {
                expected: "2 or 3",
                got: args.len(),
            });
        }
    };
    let (x, y) = (parse_number(x)?, parse_number(y)?);

    Action::from_pointer(button, x, y, cell_size)
        .map(Command::Act)
        .ok_or(CommandError::OffGrid(x, y))
}

fn parse_button(word: &str) -> Result<PointerButton, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "left" | "l" => Ok(PointerButton::Primary),
        "right" | "r" => Ok(PointerButton::Secondary),
        _ => Err(CommandError::UnknownButton(word.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}
