//! DAS/ARR input handler for terminal environments.
//!
//! A held movement key fires once on press, then repeats after the DAS delay
//! at the ARR rate. Terminals that never report key releases are handled with
//! a timeout: a key not seen again within it counts as released.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{held_key, HeldKey};
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Most repeats emitted by a single `update`.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

pub type RepeatedActions = ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE>;

// A short timeout keeps a single tap from turning into a held key when the
// terminal has no release events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Delay-then-repeat timer for one held key.
#[derive(Debug, Clone, Copy)]
struct AutoRepeat {
    delay_ms: u32,
    rate_ms: u32,
    held_ms: u32,
    pending_ms: u32,
}

impl AutoRepeat {
    fn new(delay_ms: u32, rate_ms: u32) -> Self {
        Self {
            delay_ms,
            rate_ms: rate_ms.max(1),
            held_ms: 0,
            pending_ms: 0,
        }
    }

    fn restart(&mut self) {
        self.held_ms = 0;
        self.pending_ms = 0;
    }

    /// Advance by `elapsed_ms` and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.delay_ms {
            return 0;
        }

        // Only time past the delay counts toward repeats.
        self.pending_ms += if before < self.delay_ms {
            self.held_ms - self.delay_ms
        } else {
            elapsed_ms
        };

        let due = self.pending_ms / self.rate_ms;
        self.pending_ms -= due * self.rate_ms;
        due
    }
}

/// Tracks held movement keys and turns them into repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Held horizontal key (`Left` or `Right`)
    horizontal: Option<HeldKey>,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: AutoRepeat,
    down_repeat: AutoRepeat,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    /// Custom horizontal DAS delay and ARR rate. Soft drop keeps its own timing.
    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: AutoRepeat::new(das_delay, arr_rate),
            down_repeat: AutoRepeat::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, key: HeldKey) -> bool {
        match key {
            HeldKey::Down => self.down_held,
            HeldKey::Left | HeldKey::Right => self.horizontal == Some(key),
        }
    }

    /// Register a press. Returns the immediate action for a newly held key;
    /// repeats of an already held key are left to `update`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let key = held_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            HeldKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.restart();
            }
            HeldKey::Left | HeldKey::Right => {
                if self.horizontal == Some(key) {
                    return None;
                }
                // The newest direction wins.
                self.horizontal = Some(key);
                self.horizontal_repeat.restart();
            }
        }

        Some(key.action())
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match held_key(code) {
            Some(HeldKey::Down) => self.release_down(),
            Some(key) if self.horizontal == Some(key) => self.release_horizontal(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.restart();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.restart();
    }

    /// Advance the repeat timers and collect the actions that became due.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatedActions {
        let mut actions = RepeatedActions::new();

        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            if self.horizontal.is_some() {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        if let Some(key) = self.horizontal {
            for _ in 0..self.horizontal_repeat.advance(elapsed_ms) {
                let _ = actions.try_push(key.action());
            }
        }

        if self.down_held {
            for _ in 0..self.down_repeat.advance(elapsed_ms) {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
