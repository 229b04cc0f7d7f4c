//! Terminal runner (default binary).
//!
//! Fixed-timestep loop: poll crossterm input until the next tick, feed key
//! presses and DAS/ARR repeats to the engine, advance gravity, then render a
//! snapshot through the diffing terminal renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{info, warn};

use blockfall::config::{init_logging, DriverConfig};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, held_key, should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    // Before raw mode, so a bad log path reports on a normal terminal.
    init_logging(&config)?;
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("failed to restore terminal: {err:#}");
    }
    result
}

struct Driver {
    game: GameState,
    input: InputHandler,
}

impl Driver {
    fn apply(&mut self, action: GameAction) {
        if action == GameAction::Restart {
            self.input.reset();
        }
        self.game.apply_action(action);
    }

    fn on_key_press(&mut self, key: KeyEvent) {
        // Movement keys go through DAS/ARR; everything else maps directly.
        if held_key(key.code).is_some() {
            if let Some(action) = self.input.handle_key_press(key.code) {
                self.apply(action);
            }
        } else if let Some(action) = handle_key_event(key) {
            self.apply(action);
        }
    }

    fn on_tick(&mut self, tick_ms: u32) {
        for action in self.input.update(tick_ms) {
            self.apply(action);
        }
        self.game.tick(tick_ms);

        if let Some(event) = self.game.take_last_event() {
            if event.game_over {
                self.input.reset();
            }
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &DriverConfig) -> Result<()> {
    let mut driver = Driver {
        game: config.new_game(),
        input: InputHandler::new(),
    };
    driver.game.start();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        driver.game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!(
                                "quit: score={} level={} lines={}",
                                driver.game.score(),
                                driver.game.level(),
                                driver.game.lines()
                            );
                            return Ok(());
                        }
                        driver.on_key_press(key);
                    }
                    // Terminal auto-repeat is ignored; DAS/ARR produces repeats.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => driver.input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            driver.on_tick(config.tick_ms);
        }
    }
}
