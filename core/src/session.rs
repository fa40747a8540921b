use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl SessionState {
    /// Indicates the session has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One of the two mutations a player can ask for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    Flag(Coord2),
}

impl Action {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Reveal(coords) | Self::Flag(coords) => coords,
        }
    }
}

/// Drives a [`Board`] through one game, from the first move to a win or a loss.
///
/// The board is a plain state container; this is where terminality is enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    board: Board,
    state: SessionState,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: SessionState::Playing,
            triggered_mine: None,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Board::from_config(config).map(Self::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine that ended the session, only set on a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn apply(&mut self, action: Action) -> Result<SessionState> {
        match action {
            Action::Reveal(coords) => self.reveal(coords),
            Action::Flag(coords) => self.flag(coords),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<SessionState> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        match self.board.reveal_at(coords)? {
            RevealOutcome::HitMine => {
                self.triggered_mine = Some(coords);
                self.end(SessionState::Lost);
            }
            RevealOutcome::Revealed(_) | RevealOutcome::NoChange => self.check_won(),
        }
        Ok(self.state)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<SessionState> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        self.board.flag_at(coords)?;
        self.check_won();
        Ok(self.state)
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_won(&mut self) {
        if self.board.is_finished() {
            self.end(SessionState::Won);
        }
    }

    fn end(&mut self, state: SessionState) {
        log::debug!(
            "Session ended: {:?}, {} cells revealed, {} flags",
            state,
            self.board.revealed_count(),
            self.board.flagged_count()
        );
        self.state = state;
    }
}
