use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds of stagger per cell of distance between a flood-revealed cell and the clicked cell.
pub const REVEAL_STAGGER_SECS: f64 = 0.04;

/// Seconds of stagger per cell of distance between an exploding cell and the triggered mine.
pub const EXPLOSION_STAGGER_SECS: f64 = 0.02;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What happened to a cell, for the presentation layer to animate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Revealed,
    /// `offset` is the cell's position relative to the triggered mine; `strength` is `2.0` at the blast site and
    /// falls off as `1 / distance`.
    Exploded { offset: Offset2, strength: f64 },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEvent {
    pub coords: Coord2,
    pub kind: EventKind,
    /// Suggested animation delay in seconds, never negative.
    pub delay: f64,
}

/// Everything a primary click changed, in the order it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealResult {
    pub outcome: RevealOutcome,
    pub state: EngineState,
    pub events: Vec<RevealEvent>,
}

impl RevealResult {
    fn no_change(state: EngineState) -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            state,
            events: Vec::new(),
        }
    }
}

/// Per-game revealed/flagged overlay on top of an immutable [`Minefield`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    minefield: Minefield,
    board: Array2<EngineCell>,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl RevealEngine {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            board: Array2::default(size.to_nd_index()),
            revealed_safe_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, EngineState::Won)
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.state, EngineState::Lost)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_revealed())
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_flagged())
    }

    /// Reveals a cell: a flood fill on a safe cell, the end of the game on a mine.
    pub fn primary_click(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.minefield.validate_coords(coords)?;

        let hidden = matches!(self.board[coords.to_nd_index()], EngineCell::Hidden);
        if self.state.is_finished() || !hidden {
            return Ok(RevealResult::no_change(self.state));
        }

        if self.minefield.has_mine(coords) {
            return Ok(self.explode(coords));
        }

        let events = self.flood_reveal(coords);
        let outcome = if self.revealed_safe_count == self.minefield.safe_cell_count() {
            log::debug!("All safe cells revealed, game won");
            self.state = EngineState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };

        Ok(RevealResult {
            outcome,
            state: self.state,
            events,
        })
    }

    /// Toggles the flag on a hidden cell; revealed cells and finished games are left alone.
    pub fn secondary_click(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            EngineCell::Hidden => {
                *cell = EngineCell::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Flagged
            }
            EngineCell::Flagged => {
                *cell = EngineCell::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Unflagged
            }
            EngineCell::Revealed => MarkOutcome::NoChange,
        })
    }

    /// Reveals `origin` and, through zero-count cells, everything connected to it.
    ///
    /// Visits cells in the same order as a recursive depth-first walk over row-major neighbors: the stack holds
    /// neighbors in reverse, and the revealed overlay doubles as the visited set, checked on pop.
    fn flood_reveal(&mut self, origin: Coord2) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        let mut to_visit = vec![origin];

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.board[coords.to_nd_index()];
            if cell.is_revealed() {
                continue;
            }
            if cell.is_flagged() {
                self.flagged_count -= 1;
            }
            *cell = EngineCell::Revealed;
            self.revealed_safe_count += 1;

            events.push(RevealEvent {
                coords,
                kind: EventKind::Revealed,
                delay: REVEAL_STAGGER_SECS * distance(origin, coords),
            });

            let count = self.minefield.neighbor_count(coords);
            log::trace!("Flood revealed cell at {:?}, mine count: {}", coords, count);
            if count > 0 {
                continue;
            }

            to_visit.extend(
                self.minefield
                    .iter_neighbors(coords)
                    .rev()
                    .filter(|&pos| !self.board[pos.to_nd_index()].is_revealed()),
            );
        }

        log::debug!("Revealed {} cells from {:?}", events.len(), origin);
        events
    }

    /// Ends the game from the mine at `origin`; every cell is revealed and gets an explosion event.
    fn explode(&mut self, origin: Coord2) -> RevealResult {
        log::debug!("Mine hit at {:?}, game lost", origin);
        self.triggered_mine = Some(origin);
        self.state = EngineState::Lost;
        self.flagged_count = 0;

        let events = iter_row_major(self.size())
            .map(|coords| {
                self.board[coords.to_nd_index()] = EngineCell::Revealed;
                let dist = distance(origin, coords);
                let strength = if dist < 0.1 { 2.0 } else { 1.0 / dist };
                RevealEvent {
                    coords,
                    kind: EventKind::Exploded {
                        offset: offset(origin, coords),
                        strength,
                    },
                    delay: EXPLOSION_STAGGER_SECS * dist,
                }
            })
            .collect();

        RevealResult {
            outcome: RevealOutcome::HitMine,
            state: self.state,
            events,
        }
    }
}
