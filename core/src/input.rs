//! Translation from pointer events to board actions.

use crate::*;

/// Side length of a drawn cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left button, reveals.
    Primary,
    /// Usually the right button, flags.
    Secondary,
}

/// Maps a pixel position to the `(row, col)` of the cell drawn under it.
///
/// Returns `None` for a zero cell size or positions past the coordinate range. Whether
/// the cell is actually on the board is for the board to decide.
pub fn cell_at_pixel(x: u32, y: u32, cell_size: u32) -> Option<Coord2> {
    if cell_size == 0 {
        return None;
    }
    let row = Coord::try_from(y / cell_size).ok()?;
    let col = Coord::try_from(x / cell_size).ok()?;
    Some((row, col))
}

impl Action {
    pub fn from_pointer(button: PointerButton, x: u32, y: u32, cell_size: u32) -> Option<Self> {
        let coords = cell_at_pixel(x, y, cell_size)?;
        Some(match button {
            PointerButton::Primary => Self::Reveal(coords),
            PointerButton::Secondary => Self::Flag(coords),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_divide_into_cells() {
        assert_eq!(cell_at_pixel(1, 1, DEFAULT_CELL_SIZE), Some((0, 0)));
        assert_eq!(cell_at_pixel(0, 21, DEFAULT_CELL_SIZE), Some((1, 0)));
        assert_eq!(cell_at_pixel(59, 39, DEFAULT_CELL_SIZE), Some((1, 2)));
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(cell_at_pixel(5, 5, 0), None);
        assert_eq!(cell_at_pixel(u32::MAX, 0, 1), None);
    }

    #[test]
    fn buttons_pick_the_action() {
        assert_eq!(
            Action::from_pointer(PointerButton::Primary, 1, 1, DEFAULT_CELL_SIZE),
            Some(Action::Reveal((0, 0)))
        );
        assert_eq!(
            Action::from_pointer(PointerButton::Secondary, 0, 21, DEFAULT_CELL_SIZE),
            Some(Action::Flag((1, 0)))
        );
    }

    #[test]
    fn click_drives_session() {
        let board = Board::from_mine_coords(2, 2, &[(1, 0)]).unwrap();
        let mut session = Session::new(board);

        let action =
            Action::from_pointer(PointerButton::Primary, 1, 1, DEFAULT_CELL_SIZE).unwrap();
        session.apply(action).unwrap();
        assert!(session.board().cell_at((0, 0)).unwrap().revealed);

        let action =
            Action::from_pointer(PointerButton::Primary, 0, 21, DEFAULT_CELL_SIZE).unwrap();
        assert_eq!(session.apply(action), Ok(SessionState::Lost));
    }
}
