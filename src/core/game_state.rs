//! Frame-level game state machine
//!
//! One `tick` call is one NES frame. All rule ordering lives here: the
//! autoplayer steps first, then latched rotations, then DAS movement,
//! then gravity and locking. Discrete lifecycle events (`start`,
//! `toggle_pause`, `restart`) fire between frames and never from inside
//! a tick.

use log::{debug, info};

use crate::ai::{HeuristicPolicy, HeuristicWeights, MovePolicy, Placement};
use crate::core::board::Board;
use crate::core::input::{das_shift, InputState};
use crate::core::pieces::{try_rotate, Tetromino};
use crate::core::rng::next_piece;
use crate::core::scoring::{gravity_frames, level_for, score_delta, soft_drop_frames};
use crate::core::snapshot::GameSnapshot;
use crate::store::{keys, ScoreStore};
use crate::types::{GameStatus, PieceKind, AI_STEP_FRAMES};

pub struct GameState {
    board: Board,
    current: Tetromino,
    next: PieceKind,
    show_next: bool,
    status: GameStatus,
    score: u32,
    lines: u32,
    level: u32,
    start_level: u32,
    high_score: u32,
    seed: u8,
    frame_count: u64,
    gravity_counter: u32,
    soft_drop_cells: u32,
    autoplay: bool,
    ai_target: Option<Placement>,
    policy: Box<dyn MovePolicy>,
    store: Box<dyn ScoreStore>,
}

impl GameState {
    /// A fresh session at `start_level`. The previously saved high score
    /// is loaded; progress is not (see [`resume`](Self::resume)).
    pub fn new(seed: u8, start_level: u32, store: Box<dyn ScoreStore>) -> Self {
        let (current_kind, seed) = next_piece(None, seed);
        let (next, seed) = next_piece(Some(current_kind), seed);
        let high_score = store
            .get_int(keys::HIGH_SCORE)
            .unwrap_or(0)
            .try_into()
            .unwrap_or(0);
        Self {
            board: Board::new(),
            current: Tetromino::spawn(current_kind),
            next,
            show_next: true,
            status: GameStatus::Idle,
            score: 0,
            lines: 0,
            level: start_level,
            start_level,
            high_score,
            seed,
            frame_count: 0,
            gravity_counter: 0,
            soft_drop_cells: 0,
            autoplay: false,
            ai_target: None,
            policy: Box::new(HeuristicPolicy::new(HeuristicWeights::tuned(), true)),
            store,
        }
    }

    /// A session that picks up where the last one left off: saved score,
    /// level and line count are restored and the saved level becomes the
    /// effective start level.
    pub fn resume(seed: u8, store: Box<dyn ScoreStore>) -> Self {
        let mut state = Self::new(seed, 0, store);
        state.load_progress();
        state
    }

    pub fn set_policy(&mut self, policy: Box<dyn MovePolicy>) {
        self.policy = policy;
        self.ai_target = None;
    }

    fn load_progress(&mut self) {
        let get = |store: &dyn ScoreStore, key| {
            store.get_int(key).unwrap_or(0).try_into().unwrap_or(0u32)
        };
        self.score = get(self.store.as_ref(), keys::LAST_SCORE);
        self.lines = get(self.store.as_ref(), keys::LAST_LINES);
        self.level = get(self.store.as_ref(), keys::LAST_LEVEL);
        self.start_level = self.level;
    }

    /// Begin a fresh game from Idle or GameOver. The high score carries
    /// over; everything else resets.
    pub fn start(&mut self) {
        if self.status == GameStatus::Playing || self.status == GameStatus::Paused {
            return;
        }
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = self.start_level;
        self.frame_count = 0;
        self.gravity_counter = 0;
        self.soft_drop_cells = 0;
        self.ai_target = None;
        let (current_kind, seed) = next_piece(None, self.seed);
        let (next, seed) = next_piece(Some(current_kind), seed);
        self.current = Tetromino::spawn(current_kind);
        self.next = next;
        self.seed = seed;
        self.status = GameStatus::Playing;
        info!("game started at level {}", self.level);
    }

    /// Back to Idle with saved progress restored, like a console reset.
    pub fn restart(&mut self) {
        self.board.clear();
        self.frame_count = 0;
        self.gravity_counter = 0;
        self.soft_drop_cells = 0;
        self.ai_target = None;
        self.load_progress();
        let (current_kind, seed) = next_piece(None, self.seed);
        let (next, seed) = next_piece(Some(current_kind), seed);
        self.current = Tetromino::spawn(current_kind);
        self.next = next;
        self.seed = seed;
        self.status = GameStatus::Idle;
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
    }

    pub fn toggle_preview(&mut self) {
        self.show_next = !self.show_next;
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.autoplay != enabled {
            self.autoplay = enabled;
            self.ai_target = None;
        }
    }

    /// Advance one frame. Runs while Playing, or while Idle with the
    /// autoplayer on (attract mode); Paused and GameOver frames are
    /// no-ops.
    pub fn tick(&mut self, input: &mut InputState) {
        let attract = self.status == GameStatus::Idle && self.autoplay;
        if self.status != GameStatus::Playing && !attract {
            return;
        }
        self.frame_count += 1;

        if self.autoplay && self.frame_count % AI_STEP_FRAMES == 0 {
            self.step_autoplay(input);
        }

        input.advance_frames();

        if input.take_rotate_ccw() {
            if let Some(rotated) = try_rotate(&self.board, &self.current, false) {
                self.current = rotated;
            }
        }
        if input.take_rotate_cw() {
            if let Some(rotated) = try_rotate(&self.board, &self.current, true) {
                self.current = rotated;
            }
        }

        let dx = das_shift(input, &self.board, &self.current);
        if dx != 0 {
            self.current.x += dx;
        }

        let threshold = if input.down {
            soft_drop_frames(self.level)
        } else {
            gravity_frames(self.level)
        };
        self.gravity_counter += 1;
        if self.gravity_counter >= threshold {
            self.gravity_counter = 0;
            let shape = self.current.shape();
            if self.board.collides(&shape, self.current.x, self.current.y + 1) {
                self.lock_current();
            } else {
                self.current.y += 1;
                if input.down {
                    self.soft_drop_cells += 1;
                }
            }
        }
    }

    /// One autoplayer action: pick a target if there is none, otherwise
    /// rotate or shift one step toward it, and hold soft drop once the
    /// piece is lined up.
    fn step_autoplay(&mut self, input: &mut InputState) {
        if self.ai_target.is_none() {
            self.ai_target =
                self.policy
                    .find_best_move(&self.board, self.current.kind, Some(self.next));
        }
        let Some(target) = self.ai_target else {
            // No legal placement left; let gravity finish the game.
            input.release_down();
            return;
        };

        if self.current.rotation != target.rotation {
            if let Some(rotated) = try_rotate(&self.board, &self.current, true) {
                self.current = rotated;
            }
        } else if self.current.x < target.x {
            if !self
                .board
                .collides(&self.current.shape(), self.current.x + 1, self.current.y)
            {
                self.current.x += 1;
            }
        } else if self.current.x > target.x {
            if !self
                .board
                .collides(&self.current.shape(), self.current.x - 1, self.current.y)
            {
                self.current.x -= 1;
            }
        }

        let aligned =
            self.current.x == target.x && self.current.rotation == target.rotation;
        if aligned {
            input.press_down();
        } else {
            input.release_down();
        }
    }

    fn lock_current(&mut self) {
        let shape = self.current.shape();
        self.board
            .lock(&shape, self.current.x, self.current.y, self.current.kind);

        let rows = self.board.completed_rows();
        let cleared = rows.len();
        if cleared > 0 {
            self.board.clear_rows(&rows);
        }

        let level_before = self.level;
        self.score += score_delta(cleared, self.level, self.soft_drop_cells);
        self.lines += cleared as u32;
        self.level = level_for(self.start_level, self.lines);
        self.high_score = self.high_score.max(self.score);
        self.soft_drop_cells = 0;

        if cleared > 0 {
            debug!(
                "cleared {cleared} line(s): score {} lines {} level {}",
                self.score, self.lines, self.level
            );
        }
        if self.level > level_before {
            info!("level up: {} -> {}", level_before, self.level);
        }

        self.persist_progress();
        self.spawn_next();
    }

    fn persist_progress(&mut self) {
        self.store.set_int(keys::LAST_SCORE, self.score as i64);
        self.store.set_int(keys::LAST_LEVEL, self.level as i64);
        self.store.set_int(keys::LAST_LINES, self.lines as i64);
        let cumulative = self.store.get_int(keys::CUMULATIVE_HIGH_SCORE).unwrap_or(0);
        if (self.score as i64) > cumulative {
            self.store
                .set_int(keys::CUMULATIVE_HIGH_SCORE, self.score as i64);
        }
    }

    fn spawn_next(&mut self) {
        let piece = Tetromino::spawn(self.next);
        if self.board.collides(&piece.shape(), piece.x, piece.y) {
            self.status = GameStatus::GameOver;
            self.store.set_int(keys::HIGH_SCORE, self.high_score as i64);
            info!(
                "game over: score {} lines {} level {}",
                self.score, self.lines, self.level
            );
            return;
        }
        let (kind, seed) = next_piece(Some(self.next), self.seed);
        self.current = piece;
        self.next = kind;
        self.seed = seed;
        self.gravity_counter = 0;
        self.ai_target = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let shape = self.current.shape();
        GameSnapshot {
            board: self.board.to_grid(),
            active: Some(self.current.into()),
            ghost_y: Some(self.board.ghost_y(&shape, self.current.x, self.current.y)),
            next: self.next,
            show_next: self.show_next,
            status: self.status,
            score: self.score,
            lines: self.lines,
            level: self.level,
            high_score: self.high_score,
            autoplay: self.autoplay,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Tetromino {
        self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
