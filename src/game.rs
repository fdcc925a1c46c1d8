use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::board::Board;
use super::board::CellStatus;
use super::board::Point;
use super::config::{validate_side, GameConfig};
use super::error::{ActionError, ConfigError, Result};
use super::reveal::flood_reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Won,
    Lost
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(*self, Phase::Won | Phase::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal(Point),
    ToggleFlag(Point)
}

impl Action {
    pub fn point(&self) -> Point {
        match *self {
            Action::Reveal(point) | Action::ToggleFlag(point) => point
        }
    }
}

/// What an accepted action did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of cells that became visible.
    Revealed(usize),
    HitMine,
    Flagged,
    Unflagged
}

/// One game from the first move to a win or a loss.
///
/// Mines are laid on the first reveal, so until then the phase is
/// `NotStarted` and the field holds none. Flags can be planted before that.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    mine_count: usize,
    flags_remaining: usize,
    phase: Phase,
    rng: StdRng
}

impl GameSession {
    pub fn new(config: &GameConfig, rng: StdRng) -> GameSession {
        GameSession{
            board: Board::new(config.side()),
            mine_count: config.mines(),
            flags_remaining: config.mines(),
            phase: Phase::NotStarted,
            rng
        }
    }

    /// A session whose mines are already down at `mines`, skipping random
    /// placement. It starts `InProgress`. Repeated points count once, and the
    /// resulting count has to pass the same checks as [`GameConfig::new`].
    ///
    /// # Panics
    /// If a mine lies outside the field.
    pub fn with_mines(side: usize, mines: &[Point]) -> std::result::Result<GameSession, ConfigError> {
        let side = validate_side(side)?;
        let mut board = Board::new(side);
        for mine in mines {
            board.set_mine(mine);
        }
        let config = GameConfig::new(side, board.mine_count())?;
        Ok(GameSession{
            board,
            mine_count: config.mines(),
            flags_remaining: config.mines(),
            phase: Phase::InProgress,
            rng: StdRng::seed_from_u64(0)
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn flags_remaining(&self) -> usize {
        self.flags_remaining
    }

    pub fn flagged_count(&self) -> usize {
        self.board.count_status(CellStatus::Flagged)
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        let result = match action {
            Action::Reveal(point) => self.reveal(&point),
            Action::ToggleFlag(point) => self.toggle_flag(&point)
        };
        match &result {
            Ok(outcome) => trace!(?action, ?outcome, phase = ?self.phase, "action accepted"),
            Err(err) => debug!(?action, %err, "action rejected")
        }
        result
    }

    /// Reveals the cell at `point`, laying the mines first if this is the
    /// opening move. Revealing a mine loses the game on the spot.
    ///
    /// # Panics
    /// If `point` is outside the field.
    pub fn reveal(&mut self, point: &Point) -> Result<Outcome> {
        self.check_not_finished()?;
        match self.board.get(point).status {
            CellStatus::Revealed => return Err(ActionError::AlreadyRevealed),
            CellStatus::Flagged => return Err(ActionError::CellFlagged),
            CellStatus::Hidden => {}
        }

        if self.phase == Phase::NotStarted {
            self.board.place_mines(self.mine_count, &mut self.rng);
            self.transition(Phase::InProgress);
        }

        if self.board.is_mine(point) {
            self.transition(Phase::Lost);
            return Ok(Outcome::HitMine)
        }

        let revealed = flood_reveal(&mut self.board, *point);
        self.finish_if_complete();
        Ok(Outcome::Revealed(revealed))
    }

    /// Plants a flag on a hidden cell or lifts the one already there. Each flag
    /// planted uses up one of the `mine_count` available.
    ///
    /// # Panics
    /// If `point` is outside the field.
    pub fn toggle_flag(&mut self, point: &Point) -> Result<Outcome> {
        self.check_not_finished()?;
        let outcome = match self.board.get(point).status {
            CellStatus::Revealed => return Err(ActionError::AlreadyRevealed),
            CellStatus::Flagged => {
                self.board.set_status(point, CellStatus::Hidden);
                self.flags_remaining += 1;
                Outcome::Unflagged
            }
            CellStatus::Hidden => {
                if self.flags_remaining == 0 {
                    return Err(ActionError::OutOfFlags)
                }
                self.board.set_status(point, CellStatus::Flagged);
                self.flags_remaining -= 1;
                Outcome::Flagged
            }
        };
        self.finish_if_complete();
        Ok(outcome)
    }

    /// True when the flags sit on exactly the mines: all of them flagged and
    /// nothing else.
    pub fn all_mines_flagged(&self) -> bool {
        let flagged = self.flagged_count();
        self.board.count_flagged_mines() == self.mine_count && flagged == self.mine_count
    }

    fn finish_if_complete(&mut self) {
        if self.phase == Phase::InProgress && self.all_mines_flagged() {
            self.transition(Phase::Won);
        }
    }

    fn transition(&mut self, phase: Phase) {
        if self.phase.is_finished() || self.phase == phase {
            return
        }
        info!(from = ?self.phase, to = ?phase, "phase changed");
        self.phase = phase;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
use proptest::prelude::*;
