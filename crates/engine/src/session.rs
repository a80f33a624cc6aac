//! Session driver - owns one game and everything a host layers on top of it
//!
//! The core [`GameState`] has no clock and no notion of settings. A
//! [`GameSession`] adds the lifecycle (idle, running, paused, over), gates
//! actions by status and by the player's settings, and turns elapsed frame
//! time into gravity ticks with an accumulator:
//!
//! - the accumulator grows by each `advance(elapsed_ms)` while running
//! - once it reaches the current level's interval it resets and one tick fires
//! - soft drop, hard drop and hold reset it, so gravity restarts after them
//!
//! Things worth recording (locks, pauses, game over) are queued as
//! [`SessionEvent`]s for the host to drain.

use std::vec::Drain;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::core::{EntropyRng, GameState, RandomSource};
use crate::event_log::SessionEvent;
use crate::settings::Settings;
use crate::types::{GameAction, GameStatus, PieceKind, Point, RotationDirection, PREVIEW_LENGTH};

/// Score panel numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub lines: u32,
    pub last_cleared_lines: u32,
}

pub struct GameSession<R: RandomSource = EntropyRng> {
    state: GameState<R>,
    settings: Settings,
    /// Best score known to the host (persisted value, raised by play)
    best_score: u32,
    best_score_update: Option<u32>,
    accumulator_ms: u32,
    over_reported: bool,
    events: Vec<SessionEvent>,
}

impl GameSession<EntropyRng> {
    pub fn new(settings: Settings, best_score: u32) -> Self {
        Self::with_rng(settings, best_score, EntropyRng::new())
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn with_rng(settings: Settings, best_score: u32, rng: R) -> Self {
        Self {
            state: GameState::with_rng(best_score, rng),
            settings,
            best_score,
            best_score_update: None,
            accumulator_ms: 0,
            over_reported: false,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Direct engine access for position setup
    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn accumulator_ms(&self) -> u32 {
        self.accumulator_ms
    }

    /// Fresh game, running immediately
    pub fn start(&mut self) {
        let best = self.state.best_score();
        self.state.reset(best);
        self.state.set_status(GameStatus::Running);
        self.accumulator_ms = 0;
        self.over_reported = false;
        self.events.push(SessionEvent::GameStarted { best_score: best });
    }

    pub fn pause(&mut self) -> bool {
        if self.state.status() != GameStatus::Running {
            return false;
        }
        self.state.set_status(GameStatus::Paused);
        self.events.push(SessionEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.status() != GameStatus::Paused {
            return false;
        }
        self.state.set_status(GameStatus::Running);
        self.events.push(SessionEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.status() {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => false,
        }
    }

    /// Fresh game back at Idle, keeping the higher of both best scores
    pub fn reset(&mut self) {
        let best = self.state.best_score().max(self.best_score);
        self.state.reset(best);
        self.state.set_status(GameStatus::Idle);
        self.accumulator_ms = 0;
        self.over_reported = false;
    }

    /// Dispatch one player action. Returns whether it changed anything.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => return self.pause(),
            GameAction::Resume => return self.resume(),
            _ => {}
        }

        if self.state.status() != GameStatus::Running {
            return false;
        }

        let acted = match action {
            GameAction::MoveLeft => self.state.try_move(-1, 0),
            GameAction::MoveRight => self.state.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.state.soft_drop();
                self.accumulator_ms = 0;
                moved
            }
            GameAction::HardDrop => {
                if self.settings.hard_drop_enabled {
                    self.state.hard_drop();
                    self.accumulator_ms = 0;
                    true
                } else {
                    self.events.push(SessionEvent::ActionIgnored { action });
                    false
                }
            }
            GameAction::RotateCw => self.state.try_rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.state.try_rotate(RotationDirection::CounterClockwise),
            GameAction::Rotate180 => self.state.try_rotate(RotationDirection::Half),
            GameAction::Hold => {
                let held = self.state.hold_piece();
                self.accumulator_ms = 0;
                held
            }
            GameAction::Pause | GameAction::Resume => false,
        };

        self.after_step();
        acted
    }

    /// Feed elapsed frame time. Returns true when a gravity tick fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.state.status() != GameStatus::Running {
            return false;
        }

        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        if self.accumulator_ms < self.state.drop_interval_ms() {
            return false;
        }

        self.accumulator_ms = 0;
        self.state.tick();
        self.after_step();
        true
    }

    fn after_step(&mut self) {
        let mut block_out = false;
        if let Some(lock) = self.state.take_last_lock() {
            block_out = lock.block_out;
            self.events.push(SessionEvent::PieceLocked {
                piece: lock.kind,
                lines_cleared: lock.lines_cleared,
                points: lock.points,
                score: self.state.score(),
                level: self.state.level(),
            });
        }

        let best = self.state.best_score();
        if best > self.best_score {
            self.best_score = best;
            self.best_score_update = Some(best);
        }

        if self.state.status() == GameStatus::Over && !self.over_reported {
            self.over_reported = true;
            self.events.push(SessionEvent::GameOver {
                block_out,
                stats: self.statistics(),
            });
        }
    }

    /// Landing preview, empty when the ghost setting is off
    pub fn ghost_blocks(&self) -> ArrayVec<Point, 4> {
        if !self.settings.ghost_piece_enabled {
            return ArrayVec::new();
        }
        self.state.ghost_blocks()
    }

    /// Next pieces in draw order
    pub fn queue_preview(&self) -> ArrayVec<PieceKind, PREVIEW_LENGTH> {
        self.state.queue().preview(PREVIEW_LENGTH).collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            score: self.state.score(),
            best_score: self.best_score,
            level: self.state.level(),
            lines: self.state.lines(),
            last_cleared_lines: self.state.last_cleared_lines(),
        }
    }

    /// A new best score, reported once per increase
    pub fn take_best_score_update(&mut self) -> Option<u32> {
        self.best_score_update.take()
    }

    pub fn drain_events(&mut self) -> Drain<'_, SessionEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;

    fn session() -> GameSession<ScriptedRng> {
        GameSession::with_rng(Settings::default(), 0, ScriptedRng::zeros())
    }

    #[test]
    fn starts_idle_and_ignores_play() {
        let mut s = session();
        assert_eq!(s.status(), GameStatus::Idle);
        let before = s.state().active();
        assert!(!s.handle_action(GameAction::MoveLeft));
        assert!(!s.handle_action(GameAction::HardDrop));
        assert_eq!(s.state().active(), before);
        assert!(!s.advance(5_000));
    }

    #[test]
    fn pause_and_resume_only_from_matching_status() {
        let mut s = session();
        assert!(!s.pause());
        assert!(!s.resume());

        s.start();
        assert!(!s.resume());
        assert!(s.handle_action(GameAction::Pause));
        assert_eq!(s.status(), GameStatus::Paused);
        assert!(!s.handle_action(GameAction::MoveLeft));
        assert!(s.handle_action(GameAction::Resume));
        assert_eq!(s.status(), GameStatus::Running);

        assert!(s.toggle_pause());
        assert_eq!(s.status(), GameStatus::Paused);
        assert!(s.toggle_pause());
        assert_eq!(s.status(), GameStatus::Running);
    }

    #[test]
    fn accumulator_fires_at_interval() {
        let mut s = session();
        s.start();
        let y = s.state().active().unwrap().y;

        assert!(!s.advance(999));
        assert_eq!(s.accumulator_ms(), 999);
        assert!(s.advance(1));
        assert_eq!(s.accumulator_ms(), 0);
        assert_eq!(s.state().active().unwrap().y, y + 1);
    }

    #[test]
    fn soft_drop_resets_accumulator() {
        let mut s = session();
        s.start();
        s.advance(500);
        assert!(s.handle_action(GameAction::SoftDrop));
        assert_eq!(s.accumulator_ms(), 0);
        assert!(!s.advance(600));
    }

    #[test]
    fn paused_session_does_not_accumulate() {
        let mut s = session();
        s.start();
        s.pause();
        assert!(!s.advance(10_000));
        assert_eq!(s.accumulator_ms(), 0);
    }

    #[test]
    fn disabled_hard_drop_is_ignored() {
        let mut s = session();
        s.settings_mut().hard_drop_enabled = false;
        s.start();
        s.drain_events().count();

        assert!(!s.handle_action(GameAction::HardDrop));
        assert_eq!(s.state().board().filled_count(), 0);
        let events: Vec<_> = s.drain_events().collect();
        assert_eq!(
            events,
            vec![SessionEvent::ActionIgnored {
                action: GameAction::HardDrop
            }]
        );
    }

    #[test]
    fn hard_drop_reports_lock_and_best() {
        let mut s = session();
        s.start();
        s.advance(400);
        assert!(s.handle_action(GameAction::HardDrop));
        assert_eq!(s.accumulator_ms(), 0);
        assert_eq!(s.take_best_score_update(), Some(40));
        assert_eq!(s.take_best_score_update(), None);
        assert_eq!(s.statistics().best_score, 40);

        let events: Vec<_> = s.drain_events().collect();
        assert_eq!(events[0], SessionEvent::GameStarted { best_score: 0 });
        assert!(matches!(
            events[1],
            SessionEvent::PieceLocked {
                piece: Some(PieceKind::O),
                score: 40,
                ..
            }
        ));
    }

    #[test]
    fn ghost_follows_setting() {
        let mut s = session();
        assert_eq!(s.ghost_blocks().len(), 4);
        s.settings_mut().toggle_ghost_piece();
        assert!(s.ghost_blocks().is_empty());
    }

    #[test]
    fn queue_preview_shows_five() {
        let s = session();
        let preview = s.queue_preview();
        assert_eq!(
            preview.as_slice(),
            &[
                PieceKind::T,
                PieceKind::S,
                PieceKind::Z,
                PieceKind::J,
                PieceKind::L
            ]
        );
    }

    #[test]
    fn reset_keeps_best_and_goes_idle() {
        let mut s = GameSession::with_rng(Settings::default(), 100, ScriptedRng::zeros());
        s.start();
        s.handle_action(GameAction::HardDrop);
        s.reset();
        assert_eq!(s.status(), GameStatus::Idle);
        assert_eq!(s.state().score(), 0);
        assert_eq!(s.state().best_score(), 100);
        assert_eq!(s.statistics().best_score, 100);
    }

    #[test]
    fn block_out_reports_game_over_once() {
        let mut s = session();
        s.start();
        s.state_mut().board_mut().set(4, 0, Some(PieceKind::Z));
        s.state_mut().board_mut().set(5, 0, Some(PieceKind::Z));

        assert!(s.advance(1000));
        assert_eq!(s.status(), GameStatus::Over);
        assert!(!s.advance(1000));
        assert!(!s.handle_action(GameAction::MoveLeft));

        let overs: Vec<_> = s
            .drain_events()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert!(matches!(overs[0], SessionEvent::GameOver { block_out: true, .. }));
    }

    #[test]
    fn start_after_game_over_begins_fresh() {
        let mut s = session();
        s.start();
        s.state_mut().set_status(GameStatus::Over);
        s.start();
        assert_eq!(s.status(), GameStatus::Running);
        assert_eq!(s.state().board().filled_count(), 0);
    }
}
