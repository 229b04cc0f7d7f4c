//! Game state module - the board engine
//!
//! Ties together the board, pieces, piece randomizer and scoring. It owns the
//! current and next piece, applies gravity on `tick`, validates every move and
//! rotation against the board, and runs the lock cycle (lock, clear, score,
//! spawn, game-over check).
//!
//! Moves and rotations are copy-test-commit: a candidate piece is built as a
//! value, validated, and only then assigned back to the live piece.

use log::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{Tetromino, SPAWN_POSITION};
use crate::rng::{time_seed, PieceQueue, Randomizer};
use crate::scoring::{calculate_level, fall_interval_ms, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Option<Tetromino>,
    next: Option<Tetromino>,
    piece_queue: PieceQueue,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    fall_timer_ms: u32,
    fall_interval_ms: u32,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Create a new game seeded from the system clock.
    ///
    /// The session is empty until [`GameState::start`] spawns the first pieces.
    pub fn new() -> Self {
        Self::with_seed(time_seed())
    }

    /// Create a new game with a fixed RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self::with_randomizer(seed, Randomizer::Uniform)
    }

    /// Create a new game with a fixed RNG seed and piece randomizer
    pub fn with_randomizer(seed: u32, randomizer: Randomizer) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            piece_queue: PieceQueue::with_randomizer(seed, randomizer),
            last_event: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            fall_timer_ms: 0,
            fall_interval_ms: fall_interval_ms(START_LEVEL),
            paused: false,
            game_over: false,
        }
    }

    /// Reset, then spawn twice: the first spawn only fills `next`, the
    /// second promotes it to `current` and draws a new `next`.
    pub fn start(&mut self) {
        self.reset();
        self.spawn_next_piece();
        self.spawn_next_piece();
        info!(
            "game started (randomizer={:?}, rng_state={})",
            self.piece_queue.randomizer(),
            self.piece_queue.rng_state()
        );
    }

    /// Clear the board and all progress. Both pieces are dropped; call
    /// [`GameState::start`] (or spawn twice) to play again.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = None;
        self.last_event = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.fall_timer_ms = 0;
        self.fall_interval_ms = fall_interval_ms(self.level);
        self.paused = false;
        self.game_over = false;
        info!("game reset");
    }

    /// Flip the pause flag. Returns the new state.
    ///
    /// Ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return self.paused;
        }
        self.paused = !self.paused;
        debug!("paused={}", self.paused);
        self.paused
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True once the first piece is in play and until the game ends.
    pub fn started(&self) -> bool {
        self.current.is_some() && !self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current gravity interval in milliseconds
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Time accumulated toward the next gravity step
    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Check a candidate placement against walls, floor and locked cells.
    ///
    /// Cells above the top edge are allowed. Does not mutate anything.
    pub fn is_valid_position(&self, piece: &Tetromino) -> bool {
        self.board.can_place(&piece.cells())
    }

    /// Discrete gameplay actions are ignored while paused or after game over.
    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Move the current piece if the result is a valid placement.
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let Some(candidate) = current.checked_moved(dx, dy) else {
            return false;
        };
        if self.is_valid_position(&candidate) {
            self.current = Some(candidate);
            return true;
        }

        false
    }

    /// Try to move the current piece; returns whether it moved
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.shift(dx, dy)
    }

    /// Try to rotate the current piece clockwise; returns whether it rotated
    ///
    /// No wall kicks: a rotation that collides is simply rejected.
    pub fn try_rotate(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let candidate = current.rotated();
        if self.is_valid_position(&candidate) {
            self.current = Some(candidate);
            return true;
        }

        false
    }

    /// Move the current piece down one row. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drop the current piece as far as it goes and lock it.
    ///
    /// Returns true if a lock cycle ran.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_input() || self.current.is_none() {
            return false;
        }

        while self.shift(0, 1) {}
        self.lock_piece();
        true
    }

    /// Promote `next` to `current` at the spawn anchor and draw a new `next`.
    ///
    /// Sets the game-over flag (and returns false) when the promoted piece
    /// does not fit.
    pub fn spawn_next_piece(&mut self) -> bool {
        self.current = self.next.take().map(|mut piece| {
            let (x, y) = SPAWN_POSITION;
            piece.set_position(x, y);
            piece
        });
        self.next = Some(Tetromino::spawn(self.piece_queue.draw()));

        let Some(current) = self.current else {
            return true;
        };
        trace!("spawned {:?}", current.kind);

        if !self.is_valid_position(&current) {
            self.game_over = true;
            info!(
                "game over: score={} level={} lines={}",
                self.score, self.level, self.lines
            );
            return false;
        }

        true
    }

    /// Lock the current piece onto the board, clear lines, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let written = self.board.lock_cells(&piece.cells(), piece.kind);
        let (lines_cleared, points) = self.clear_lines();
        debug!(
            "locked {:?} at ({}, {}): {} cells, {} lines, +{} points",
            piece.kind, piece.x, piece.y, written, lines_cleared, points
        );

        self.spawn_next_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            points,
            level: self.level,
            game_over: self.game_over,
        });
    }

    /// Clear full rows and apply score and level. Returns (lines, points).
    fn clear_lines(&mut self) -> (u32, u32) {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return (0, 0);
        }

        // Scored at the level in effect before these lines count.
        let points = line_clear_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.update_level();

        (cleared as u32, points)
    }

    fn update_level(&mut self) {
        let level = calculate_level(self.lines);
        if level != self.level {
            self.level = level;
            self.fall_interval_ms = fall_interval_ms(level);
            info!(
                "level {} reached, fall interval {}ms",
                level, self.fall_interval_ms
            );
        }
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let mut ghost = self.current?;
        loop {
            let below = ghost.moved(0, 1);
            if !self.is_valid_position(&below) {
                break;
            }
            ghost = below;
        }
        Some(ghost.y)
    }

    /// Main game tick - advance the fall timer and apply gravity
    ///
    /// At most one row step (or one lock cycle) happens per call, however
    /// large `elapsed_ms` is. Returns true if the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over || self.current.is_none() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }
        self.fall_timer_ms = 0;

        if !self.shift(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = self.current.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::with_seed(seed);
        state.start();
        state
    }

    /// Fill row `y` with locked cells, leaving column `gap` empty.
    fn fill_row_except(state: &mut GameState, y: i8, gap: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            if x != gap {
                state.board_mut().set(x, y, Some(PieceKind::T));
            }
        }
    }

    /// A vertical I piece whose cells sit in column 5, rows `top..top + 4`.
    fn vertical_i(top: i8) -> Tetromino {
        Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 3,
            y: top,
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_seed(12345);

        assert!(!state.game_over);
        assert!(!state.paused);
        assert!(!state.started());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.fall_interval_ms, 1000);
        assert!(state.current.is_none());
        assert!(state.next.is_none());
    }

    #[test]
    fn test_start_fills_current_and_next() {
        let state = started(12345);

        let current = state.current.unwrap();
        assert_eq!((current.x, current.y), SPAWN_POSITION);
        assert_eq!(current.rotation, Rotation::North);
        assert!(state.next.is_some());
        assert!(state.is_valid_position(&current));
    }

    #[test]
    fn test_spawn_promotes_next() {
        let mut state = started(12345);
        let next_kind = state.next.unwrap().kind;

        assert!(state.spawn_next_piece());
        assert_eq!(state.current.unwrap().kind, next_kind);
        assert!(state.next.is_some());
    }

    #[test]
    fn test_first_spawn_only_fills_next() {
        let mut state = GameState::with_seed(3);
        assert!(state.spawn_next_piece());
        assert!(state.current.is_none());
        assert!(state.next.is_some());
    }

    #[test]
    fn test_try_move() {
        let mut state = started(12345);
        let before = state.current.unwrap();

        assert!(state.try_move(1, 0));
        assert_eq!(state.current.unwrap().x, before.x + 1);
        assert!(state.try_move(-1, 0));
        assert_eq!(state.current.unwrap().x, before.x);
    }

    #[test]
    fn test_try_move_rejects_walls_and_keeps_state() {
        let mut state = started(12345);

        // Walk into the left wall.
        while state.try_move(-1, 0) {}
        let at_wall = state.current.unwrap();
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.current.unwrap(), at_wall);
        assert!(at_wall.cells().iter().any(|&(x, _)| x == 0));
    }

    #[test]
    fn test_try_move_rejects_offsets_past_i8_range() {
        let mut state = started(12345);
        let before = state.current.unwrap();

        for (dx, dy) in [(i8::MAX, 0), (0, i8::MIN), (i8::MIN, 0), (0, i8::MAX)] {
            assert!(!state.try_move(dx, dy), "moved by ({dx}, {dy})");
            assert_eq!(state.current.unwrap(), before);
        }

        // Anchor already at the edge of the range.
        let mut edge = before;
        edge.set_position(i8::MAX - 1, 0);
        assert!(!state.is_valid_position(&edge));
        state.current = Some(edge);
        assert!(!state.try_move(1, 0));
        assert!(!state.try_move(2, 0));
        assert_eq!(state.current.unwrap(), edge);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = started(12345);
        state.current = Some(vertical_i(0));
        state.board_mut().set(5, 4, Some(PieceKind::O));

        assert!(!state.try_move(0, 1));
        assert_eq!(state.current.unwrap().y, 0);
    }

    #[test]
    fn test_rotation_rejected_when_blocked() {
        let mut state = started(12345);
        // Horizontal I in row 10; rotating to East needs column 6, rows 9..=12.
        state.current = Some(Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 4,
            y: 9,
        });
        state.board_mut().set(6, 12, Some(PieceKind::Z));

        assert!(!state.try_rotate());
        assert_eq!(state.current.unwrap().rotation, Rotation::North);

        state.board_mut().set(6, 12, None);
        assert!(state.try_rotate());
        assert_eq!(state.current.unwrap().rotation, Rotation::East);
    }

    #[test]
    fn test_rotating_o_piece_keeps_cells() {
        let mut state = started(12345);
        state.current = Some(Tetromino::spawn(PieceKind::O));
        let before = state.current.unwrap().cells();

        assert!(state.try_rotate());
        assert_eq!(state.current.unwrap().cells(), before);
        assert_eq!(state.current.unwrap().rotation, Rotation::East);
    }

    #[test]
    fn test_is_valid_position_is_pure() {
        let mut state = started(12345);
        fill_row_except(&mut state, 19, 5);
        let board_before = state.board.clone();
        let piece = vertical_i(16);

        let first = state.is_valid_position(&piece);
        for _ in 0..10 {
            assert_eq!(state.is_valid_position(&piece), first);
        }
        assert_eq!(state.board, board_before);
        assert_eq!(piece, vertical_i(16));
    }

    #[test]
    fn test_hard_drop_clears_single_line() {
        let mut state = started(12345);
        fill_row_except(&mut state, 19, 5);
        state.current = Some(vertical_i(0));

        assert!(state.hard_drop());

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        // The three cells above the cleared row shift down into rows 17..=19.
        for y in 17..20 {
            assert_eq!(state.board.get(5, y), Some(Some(PieceKind::I)));
        }
        for x in (0..10).filter(|&x| x != 5) {
            assert_eq!(state.board.get(x, 19), Some(None));
        }

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.points, 100);
        assert!(!ev.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_four_lines_score_800_times_level() {
        let mut state = started(12345);
        state.lines = 20;
        state.level = 3;
        for y in 16..20 {
            fill_row_except(&mut state, y, 5);
        }
        state.current = Some(vertical_i(0));

        assert!(state.hard_drop());
        assert_eq!(state.lines, 24);
        assert_eq!(state.score, 800 * 3);
        assert_eq!(state.board.cells().iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn test_lock_without_lines_scores_nothing() {
        let mut state = started(12345);
        state.current = Some(Tetromino::spawn(PieceKind::O));

        assert!(state.hard_drop());
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(5, 18), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_level_progression_updates_interval() {
        let mut state = started(12345);
        state.lines = 9;
        fill_row_except(&mut state, 19, 5);
        state.current = Some(vertical_i(0));

        assert!(state.hard_drop());
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.fall_interval_ms, 900);
        // Scored at the level in effect before the clear.
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = started(12345);
        let y0 = state.current.unwrap().y;

        assert!(!state.tick(999));
        assert_eq!(state.current.unwrap().y, y0);

        assert!(state.tick(1));
        assert_eq!(state.current.unwrap().y, y0 + 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_steps_once_per_crossing() {
        let mut state = started(12345);
        let y0 = state.current.unwrap().y;

        assert!(state.tick(5_000));
        assert_eq!(state.current.unwrap().y, y0 + 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_locks_resting_piece() {
        let mut state = started(12345);
        fill_row_except(&mut state, 19, 5);
        state.current = Some(vertical_i(16));

        assert!(state.tick(1000));
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.current.unwrap().y, SPAWN_POSITION.1);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut state = GameState::with_seed(1);
        assert!(!state.tick(10_000));
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_pause_stops_ticks_and_actions() {
        let mut state = started(12345);
        let before = state.current.unwrap();

        assert!(state.apply_action(GameAction::Pause));
        assert!(state.paused);
        assert!(!state.tick(10_000));
        assert!(!state.try_move(1, 0));
        assert!(!state.try_rotate());
        assert!(!state.hard_drop());
        assert_eq!(state.current.unwrap(), before);
        assert_eq!(state.fall_timer_ms, 0);

        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.paused);
        assert!(state.try_move(1, 0));
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let mut state = started(12345);
        for x in 3..8 {
            state.board_mut().set(x, 0, Some(PieceKind::Z));
        }
        state.current = Some(Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        });

        assert!(state.hard_drop());
        assert!(state.game_over);
        assert!(state.take_last_event().unwrap().game_over);

        // Terminal: ticks and actions do nothing.
        let board = state.board.clone();
        assert!(!state.tick(10_000));
        assert!(!state.hard_drop());
        assert!(!state.try_move(0, 1));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.paused);
        assert_eq!(state.board, board);

        assert!(!state.started());
        assert!(state.current().is_some());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = started(12345);
        state.game_over = true;
        state.score = 1234;
        state.board_mut().set(0, 19, Some(PieceKind::L));

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert!(state.current.is_some());
        assert!(state.next.is_some());
        assert_eq!(state.board.get(0, 19), Some(None));
    }

    #[test]
    fn test_reset_discards_pieces() {
        let mut state = started(12345);
        state.level = 4;
        state.fall_interval_ms = 700;
        state.fall_timer_ms = 300;
        state.paused = true;

        state.reset();
        assert!(state.current.is_none());
        assert!(state.next.is_none());
        assert_eq!(state.level, 1);
        assert_eq!(state.fall_interval_ms, 1000);
        assert_eq!(state.fall_timer_ms, 0);
        assert!(!state.paused);
    }

    #[test]
    fn test_soft_drop_does_not_lock() {
        let mut state = started(12345);
        state.current = Some(vertical_i(16));

        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.current.unwrap(), vertical_i(16));
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_ghost_y() {
        let mut state = started(12345);
        state.current = Some(vertical_i(0));
        assert_eq!(state.ghost_y(), Some(16));

        state.board_mut().set(5, 10, Some(PieceKind::S));
        assert_eq!(state.ghost_y(), Some(6));
        // Ghost lookup never moves the live piece.
        assert_eq!(state.current.unwrap().y, 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(12345);
        state.board_mut().set(2, 19, Some(PieceKind::J));
        state.toggle_pause();

        let snap = state.snapshot();
        assert_eq!(snap.board[19][2], PieceKind::J.color());
        assert_eq!(snap.current.map(|p| p.kind), state.current.map(|p| p.kind));
        assert_eq!(snap.next.map(|p| p.kind), state.next.map(|p| p.kind));
        assert_eq!(snap.current.unwrap().cells, state.current.unwrap().cells());
        assert_eq!(snap.level, 1);
        assert!(snap.paused);
        assert!(!snap.playable());
    }

    #[test]
    fn test_drops_without_full_rows_until_top_out() {
        let mut state = started(2024);
        let mut ended_at = None;

        for i in 0..200 {
            state.hard_drop();
            assert_eq!(state.score, 0);
            assert_eq!(state.lines, 0);
            if state.game_over && ended_at.is_none() {
                ended_at = Some(i);
            }
        }

        // Spawns only ever touch columns 4..=7, so no row can fill.
        assert!(state.game_over);
        assert!(ended_at.unwrap() < 200);
    }
}
