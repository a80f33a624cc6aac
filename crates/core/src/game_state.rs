//! Game state module - the engine aggregate and every rule transition
//!
//! This module ties together the board, piece tables, randomizer and scoring.
//! The engine is passive: it owns no clock. A host calls [`GameState::tick`]
//! on its own cadence and calls the action operations in response to input.
//! Illegal moves are ordinary `false` results, never errors.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::{EntropyRng, PieceQueue, RandomSource};
use crate::scoring::{
    get_drop_interval_ms, hard_drop_points, level_for_lines, line_clear_points, soft_drop_points,
};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A piece of `kind` at the spawn anchor, rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION_X,
            y: SPAWN_POSITION_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four blocks
    pub fn blocks(&self) -> [Point; 4] {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }
}

/// Absolute blocks of a piece: table offsets plus the anchor
pub fn get_piece_blocks(piece: &Tetromino) -> [Point; 4] {
    piece.blocks()
}

/// What happened on the most recent lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub kind: Option<PieceKind>,
    pub lines_cleared: u32,
    /// Line clear points awarded by this lock (drop bonuses excluded)
    pub points: u32,
    /// The piece locked with a block above the board
    pub block_out: bool,
}

/// Complete game state
///
/// `R` feeds the bag randomizer. Real games use [`EntropyRng`]; tests and
/// benches pass a seeded or scripted source through [`GameState::with_rng`].
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = EntropyRng> {
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    best_score: u32,
    level: u32,
    lines: u32,
    last_cleared_lines: u32,
    status: GameStatus,
    last_lock: Option<LockEvent>,
    rng: R,
}

impl GameState<EntropyRng> {
    /// Create a fresh game fed by OS entropy
    pub fn new(best_score: u32) -> Self {
        Self::with_rng(best_score, EntropyRng::new())
    }
}

impl Default for GameState<EntropyRng> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a fresh game: empty board, one bag queued, first piece spawned.
    pub fn with_rng(best_score: u32, rng: R) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            queue: PieceQueue::default(),
            hold: None,
            can_hold: true,
            score: 0,
            best_score,
            level: 1,
            lines: 0,
            last_cleared_lines: 0,
            status: GameStatus::Idle,
            last_lock: None,
            rng,
        };
        state.reset(best_score);
        state
    }

    /// Replace the whole aggregate with a fresh game, keeping the random source.
    pub fn reset(&mut self, best_score: u32) {
        self.board.clear();
        self.active = None;
        self.queue = PieceQueue::new(&mut self.rng);
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.best_score = best_score;
        self.level = 1;
        self.lines = 0;
        self.last_cleared_lines = 0;
        self.status = GameStatus::Idle;
        self.last_lock = None;
        self.spawn_next_piece();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for position setup (tests, puzzles, benches)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Install an arbitrary active piece (position setup)
    pub fn set_active(&mut self, piece: Option<Tetromino>) {
        self.active = piece;
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// Replace the upcoming queue (position setup)
    pub fn set_queue(&mut self, queue: PieceQueue) {
        self.queue = queue;
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Lines cleared by the most recent lock
    pub fn last_cleared_lines(&self) -> u32 {
        self.last_cleared_lines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Status is host-driven except for the automatic switch to `Over`
    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level as i32)
    }

    fn fits(&self, piece: &Tetromino) -> bool {
        self.board.fits(&piece.blocks())
    }

    /// Pop the next kind from the queue and install it at the spawn anchor.
    ///
    /// The queue is topped up with whole bags first. A colliding piece is
    /// still installed, but the call returns false and hold stays as it was.
    pub fn spawn_next_piece(&mut self) -> bool {
        self.queue.ensure(QUEUE_MIN_LENGTH, &mut self.rng);
        let Some(kind) = self.queue.pop() else {
            return false;
        };

        let piece = Tetromino::spawn(kind);
        let fits = self.fits(&piece);
        self.active = Some(piece);
        if fits {
            self.can_hold = true;
        }
        fits
    }

    /// Stash the active piece, or swap it with the held one.
    ///
    /// Holding is then disabled until the next lock, whichever path ran. A
    /// replacement that cannot be placed ends the game.
    pub fn hold_piece(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let current = active.kind;
        self.can_hold = false;

        if let Some(held) = self.hold {
            let replacement = Tetromino::spawn(held);
            if !self.fits(&replacement) {
                self.status = GameStatus::Over;
                self.active = None;
                return false;
            }
            self.hold = Some(current);
            self.active = Some(replacement);
            return true;
        }

        self.hold = Some(current);
        let spawned = self.spawn_next_piece();
        self.can_hold = false;
        if !spawned {
            self.active = None;
            self.status = GameStatus::Over;
        }
        spawned
    }

    /// Translate the active piece; commits only if every block is placeable.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.shifted(dx, dy);
        if self.fits(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Rotate the active piece, taking the first kick that fits.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            direction,
            |x, y| board.is_open(x, y),
        );

        match result {
            Some((rotation, (kx, ky))) => {
                self.active = Some(Tetromino {
                    rotation,
                    ..active.shifted(kx, ky)
                });
                true
            }
            None => false,
        }
    }

    /// One row down, awarding the soft drop bonus on success
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score = self.score.saturating_add(soft_drop_points(1));
        }
        moved
    }

    /// Drop until blocked, award the per-row bonus, then lock unconditionally.
    ///
    /// Returns the distance travelled (0 with no active piece).
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let mut distance = 0u32;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.score = self.score.saturating_add(hard_drop_points(distance));
        self.lock_active();
        distance
    }

    /// Gravity step: one row down, or lock when blocked.
    ///
    /// Returns false with no active piece or when the lock blocked out.
    pub fn tick(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_active()
    }

    /// Commit the active piece, clear lines, score, then spawn.
    /// Returns false when the piece locked above the board.
    fn lock_active(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let block_out = self.board.lock(&piece.blocks(), piece.kind);
        let cleared = self.board.clear_full_rows().len() as u32;
        self.last_cleared_lines = cleared;

        let mut points = 0;
        if cleared > 0 {
            points = line_clear_points(cleared as usize, self.level);
            self.score = self.score.saturating_add(points);
            self.lines += cleared;
            self.level = level_for_lines(self.lines);
        }
        if self.score > self.best_score {
            self.best_score = self.score;
        }

        self.last_lock = Some(LockEvent {
            kind: Some(piece.kind),
            lines_cleared: cleared,
            points,
            block_out,
        });

        if block_out {
            self.status = GameStatus::Over;
            self.active = None;
            return false;
        }

        if !self.spawn_next_piece() {
            self.status = GameStatus::Over;
            self.active = None;
        }
        true
    }

    /// Where the active piece would land, if there is one
    pub fn ghost_piece(&self) -> Option<Tetromino> {
        let mut ghost = self.active?;
        loop {
            let next = ghost.shifted(0, 1);
            if !self.fits(&next) {
                return Some(ghost);
            }
            ghost = next;
        }
    }

    /// Blocks of the landing preview; empty with no active piece
    pub fn ghost_blocks(&self) -> ArrayVec<Point, 4> {
        self.ghost_piece()
            .map(|ghost| ghost.blocks().into_iter().collect())
            .unwrap_or_default()
    }
}
