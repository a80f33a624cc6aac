//! Blockfall terminal runner (default binary).
//!
//! Reads `Config` from the environment, restores the best score and settings
//! from the data directory, then drives a `GameSession` from crossterm input
//! and a framebuffer renderer until the player quits.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::EntropyRng;
use blockfall::engine::{Config, EventLog, GameSession, Storage};
use blockfall::input::{
    build_control_bindings, setting_toggle, should_quit, ControlAction, KeyMap, SettingToggle,
};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameStatus;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = Config::from_env();
    let storage = Storage::new(&config.data_dir);
    let settings = storage.load_settings();
    let best_score = storage.load_best_score();

    let rng = match config.seed {
        Some(seed) => EntropyRng::seeded(seed),
        None => EntropyRng::new(),
    };
    let mut session = GameSession::with_rng(settings, best_score, rng);

    let mut log = match &config.log_path {
        Some(path) => EventLog::open(path).unwrap_or_else(|e| {
            eprintln!("[Blockfall] event log disabled: {e:#}");
            EventLog::disabled()
        }),
        None => EventLog::disabled(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut notices = Vec::new();
    let result = run(&mut term, &mut session, &storage, &mut log, &mut notices);

    // Always try to restore terminal state.
    let _ = term.exit();

    for notice in &notices {
        eprintln!("[Blockfall] {notice}");
    }
    let stats = session.statistics();
    eprintln!(
        "[Blockfall] score {} (best {}), level {}, {} lines",
        stats.score, stats.best_score, stats.level, stats.lines
    );
    if log.is_enabled() {
        eprintln!("[Blockfall] {} events logged", log.written());
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    storage: &Storage,
    log: &mut EventLog,
    notices: &mut Vec<String>,
) -> Result<()> {
    let mut keys = KeyMap::with_swap(session.settings().jk_rotation_reversed);
    let mut view = GameView::default();
    view.set_controls(&build_control_bindings(session.settings().jk_rotation_reversed));

    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&*session, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if let Some(toggle) = setting_toggle(key) {
                        let settings = session.settings_mut();
                        match toggle {
                            SettingToggle::GhostPiece => settings.toggle_ghost_piece(),
                            SettingToggle::HardDrop => settings.toggle_hard_drop(),
                            SettingToggle::JkRotation => {
                                settings.toggle_jk_rotation();
                                let swap = settings.jk_rotation_reversed;
                                keys = KeyMap::with_swap(swap);
                                view.set_controls(&build_control_bindings(swap));
                            }
                        }
                        if let Err(e) = storage.save_settings(session.settings()) {
                            notices.push(format!("settings not saved: {e:#}"));
                        }
                    } else if let Some(action) = keys.handle_key_event(key) {
                        match action {
                            ControlAction::Start => {
                                if matches!(session.status(), GameStatus::Idle | GameStatus::Over) {
                                    session.start();
                                }
                            }
                            ControlAction::TogglePause => {
                                session.toggle_pause();
                            }
                            ControlAction::Game(action) => {
                                session.handle_action(action);
                            }
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            session.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        for event in session.drain_events() {
            log.record(&event);
        }
        if let Some(best) = session.take_best_score_update() {
            if let Err(e) = storage.save_best_score(best) {
                notices.push(format!("best score not saved: {e:#}"));
            }
        }
    }
}
