//! Terminal runner (default binary).
//!
//! Renders a snapshot, waits for input until the next ~16ms frame deadline,
//! then advances the game clock. High scores are saved as soon as they are
//! beaten; a game over shows a banner until any key is pressed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::{GameConfig, GameSnapshot, GameState, UniformPieces};
use blockfall::input::{handle_key_event, is_press, should_quit};
use blockfall::logging;
use blockfall::store::{HighScoreStore, JsonFileStore};
use blockfall::term::{Banner, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameEvent, FRAME_MS};

const SEED_ENV: &str = "BLOCKFALL_SEED";

fn main() -> Result<()> {
    logging::init_from_env()?;

    // Everything that can fail on bad configuration runs before the
    // terminal switches to the alternate screen.
    let config = GameConfig::from_env()?;
    let source = match seed_from_env()? {
        Some(seed) => UniformPieces::seeded(seed),
        None => UniformPieces::from_entropy(),
    };
    let store = JsonFileStore::from_env();
    let game = GameState::new(config, source)?.with_high_score(store.load());
    log::info!(
        "starting {}x{} game, high score {}",
        config.width,
        config.height,
        game.high_score()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, &store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_env() -> Result<Option<u64>> {
    let Ok(raw) = std::env::var(SEED_ENV) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let seed = raw
        .parse()
        .with_context(|| format!("{SEED_ENV}={raw:?} is not a valid u64"))?;
    Ok(Some(seed))
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameState,
    store: &impl HighScoreStore,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut banner: Option<Banner> = None;

    let start = Instant::now();
    let frame_duration = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_frame = start;

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_banner(&snap, banner.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    // The key that dismisses the banner does nothing else.
                    if banner.take().is_none() {
                        if let Some(action) = handle_key_event(key) {
                            game.apply_action(action);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Frame.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if banner.is_some() {
                game.resync_clock(now_ms);
            } else {
                game.frame(now_ms);
            }
        }

        for event in game.drain_events() {
            match event {
                GameEvent::NewHighScore(score) => {
                    if let Err(err) = store.save(score) {
                        log::warn!("could not save high score {score}: {err:#}");
                    }
                }
                GameEvent::GameOver { final_score } => {
                    banner = Some(Banner::GameOver { final_score });
                }
                GameEvent::Locked { .. } | GameEvent::Restarted => {}
            }
        }
    }
}
