use std::fmt::Write;

use cellsweep_core::{CellView, Coord2, Session, SessionState};

/// What a single cell looks like on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Glyph {
    Hidden,
    Revealed(u8),
    Flagged,
    TriggeredMine,
    Mine,
    Misflagged,
}

impl Glyph {
    pub(crate) fn at(session: &Session, coords: Coord2, cell: CellView) -> Self {
        match session.state() {
            SessionState::Lost => Self::finished(session, coords, cell),
            SessionState::Playing | SessionState::Won => Self::active(cell),
        }
    }

    fn active(cell: CellView) -> Self {
        if cell.flagged {
            Self::Flagged
        } else if cell.revealed {
            Self::Revealed(cell.bomb_count)
        } else {
            Self::Hidden
        }
    }

    fn finished(session: &Session, coords: Coord2, cell: CellView) -> Self {
        if session.triggered_mine() == Some(coords) {
            return Self::TriggeredMine;
        }

        match (cell.is_mine, cell.flagged) {
            (true, true) => Self::Flagged,
            (true, false) => Self::Mine,
            (false, true) => Self::Misflagged,
            (false, false) => Self::active(cell),
        }
    }

    pub(crate) const fn as_char(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Revealed(0) => '.',
            Self::Revealed(count) => (b'0' + count) as char,
            Self::Flagged => 'F',
            Self::TriggeredMine => 'X',
            Self::Mine => '*',
            Self::Misflagged => '!',
        }
    }
}

pub(crate) const fn end_message(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Playing => None,
        SessionState::Won => Some("Yay! You Win"),
        SessionState::Lost => Some("Kaboom! You Lose"),
    }
}

fn digits(mut value: usize) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

/// Draws the board as a text grid with row and column labels.
pub(crate) fn render_board(session: &Session) -> String {
    let board = session.board();
    let (rows, cols) = (usize::from(board.height()), usize::from(board.width()));
    let row_w = digits(rows.saturating_sub(1));
    let col_w = digits(cols.saturating_sub(1));

    let mut out = String::new();
    let _ = write!(out, "{:row_w$} ", "");
    for col in 0..cols {
        let _ = write!(out, " {:>col_w$}", col);
    }
    out.push('\n');

    for (coords, cell) in board.iter_cells() {
        let (row, col) = coords;
        if col == 0 {
            let _ = write!(out, "{:>row_w$} ", row);
        }
        let glyph = Glyph::at(session, coords, cell).as_char();
        let _ = write!(out, " {:>col_w$}", glyph);
        if usize::from(col) + 1 == cols {
            out.push('\n');
        }
    }

    let _ = writeln!(out, "mines left: {}", board.mines_left());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsweep_core::Board;

    fn session(width: u16, height: u16, mines: &[Coord2]) -> Session {
        Session::new(Board::from_mine_coords(width, height, mines).unwrap())
    }

    #[test]
    fn renders_hidden_board_with_labels() {
        let session = session(3, 2, &[(0, 0)]);
        assert_eq!(
            render_board(&session),
            "   0 1 2\n0  # # #\n1  # # #\nmines left: 1\n"
        );
    }

    #[test]
    fn renders_counts_and_flags() {
        let mut session = session(3, 2, &[(0, 0)]);
        session.reveal((0, 2)).unwrap();
        session.flag((0, 0)).unwrap();
        assert_eq!(
            render_board(&session),
            "   0 1 2\n0  F 1 .\n1  # 1 .\nmines left: 0\n"
        );
    }

    #[test]
    fn loss_shows_mines_and_misflags() {
        let mut session = session(3, 1, &[(0, 0), (0, 2)]);
        session.flag((0, 1)).unwrap();
        session.reveal((0, 2)).unwrap();

        let glyphs: String = session
            .board()
            .iter_cells()
            .map(|(coords, cell)| Glyph::at(&session, coords, cell).as_char())
            .collect();
        assert_eq!(glyphs, "*!X");
        assert_eq!(end_message(session.state()), Some("Kaboom! You Lose"));
    }

    #[test]
    fn wide_boards_pad_columns() {
        let session = session(11, 1, &[]);
        let header = render_board(&session).lines().next().unwrap().to_string();
        assert_eq!(header, "    0  1  2  3  4  5  6  7  8  9 10");
    }

    #[test]
    fn digit_widths() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(299), 3);
    }
}
