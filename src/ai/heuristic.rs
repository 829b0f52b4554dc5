//! Brute-force heuristic placement policy
//!
//! Enumerates every rotation and column, hard-drops a copy of the piece,
//! clears any completed lines, and scores the resulting board with a
//! weighted feature sum. Optionally blends in a one-piece lookahead with
//! the known next piece. Ties are broken by enumeration order: rotation
//! ascending, then column ascending, first maximum wins, which keeps the
//! policy fully deterministic.

use crate::ai::features::BoardFeatures;
use crate::ai::{MovePolicy, Placement};
use crate::core::pieces::get_shape;
use crate::core::Board;
use crate::types::{PieceKind, Rotation, BOARD_WIDTH, SPAWN_Y, VISIBLE_HEIGHT};

/// Blend factors for the lookahead and the sentinel for a next board
/// with no legal placement at all.
const CURRENT_WEIGHT: f64 = 0.7;
const CONTINUATION_WEIGHT: f64 = 0.3;
const CONTINUATION_TOP_N: usize = 3;
const DEAD_END_PENALTY: f64 = -1.0e5;

/// Stack height above which the danger penalty starts to bite.
const DANGER_HEIGHT: u32 = (VISIBLE_HEIGHT - 4) as u32;

/// Linear feature weights. Signs are baked into the values: penalties
/// are negative, rewards positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub lines: f64,
    pub tetris_bonus: f64,
    pub aggregate_height: f64,
    pub holes: f64,
    pub covered_holes: f64,
    pub bumpiness: f64,
    pub height_variance: f64,
    pub row_transitions: f64,
    pub col_transitions: f64,
    /// Applied to the squared depth of the deepest well.
    pub well_depth_sq: f64,
    pub tetris_ready: f64,
    /// Applied to the squared excess of the stack above the danger height.
    pub danger: f64,
}

impl HeuristicWeights {
    /// The original four-feature tuning: clear lines, stay low, avoid
    /// holes, keep the surface even.
    pub fn basic() -> Self {
        Self {
            lines: 100.0,
            tetris_bonus: 0.0,
            aggregate_height: -0.5,
            holes: -35.0,
            covered_holes: 0.0,
            bumpiness: -0.2,
            height_variance: 0.0,
            row_transitions: 0.0,
            col_transitions: 0.0,
            well_depth_sq: 0.0,
            tetris_ready: 0.0,
            danger: 0.0,
        }
    }

    /// Full feature set tuned for tetris farming: it keeps one deep well
    /// open, banks pieces flat and cashes out four lines at a time.
    pub fn tuned() -> Self {
        Self {
            lines: 120.0,
            tetris_bonus: 460.0,
            aggregate_height: -1.8,
            holes: -42.0,
            covered_holes: -18.0,
            bumpiness: -2.4,
            height_variance: -1.1,
            row_transitions: -3.2,
            col_transitions: -4.6,
            well_depth_sq: 1.6,
            tetris_ready: 60.0,
            danger: -25.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeuristicPolicy {
    weights: HeuristicWeights,
    lookahead: bool,
}

impl HeuristicPolicy {
    pub fn new(weights: HeuristicWeights, lookahead: bool) -> Self {
        Self { weights, lookahead }
    }

    /// Score a post-lock, post-clear board.
    fn board_score(&self, board: &Board, cleared: usize) -> f64 {
        let w = &self.weights;
        let f = BoardFeatures::measure(board);

        let mut score = w.lines * cleared as f64;
        if cleared == 4 {
            score += w.tetris_bonus;
        }
        score += w.aggregate_height * f.aggregate_height as f64;
        score += w.holes * f.holes as f64;
        score += w.covered_holes * f.covered_holes as f64;
        score += w.bumpiness * f.bumpiness as f64;
        score += w.height_variance * f.height_variance;
        score += w.row_transitions * f.row_transitions as f64;
        score += w.col_transitions * f.col_transitions as f64;
        score += w.well_depth_sq * (f.well_depth * f.well_depth) as f64;
        if f.tetris_ready {
            score += w.tetris_ready;
        }
        let excess = f.max_height.saturating_sub(DANGER_HEIGHT);
        score += w.danger * (excess * excess) as f64;
        score
    }

    /// Best single-placement score for `kind` on `board`, or the dead-end
    /// penalty when nothing fits.
    fn continuation_score(&self, board: &Board, kind: PieceKind) -> f64 {
        let mut scores = Vec::new();
        for_each_placement(board, kind, |_, after, cleared| {
            scores.push(self.board_score(&after, cleared));
        });
        if scores.is_empty() {
            return DEAD_END_PENALTY;
        }
        scores.sort_by(|a, b| b.total_cmp(a));
        let top = &scores[..scores.len().min(CONTINUATION_TOP_N)];
        top.iter().sum::<f64>() / top.len() as f64
    }
}

impl MovePolicy for HeuristicPolicy {
    fn find_best_move(
        &self,
        board: &Board,
        kind: PieceKind,
        next: Option<PieceKind>,
    ) -> Option<Placement> {
        let mut best: Option<(Placement, f64)> = None;
        for_each_placement(board, kind, |placement, after, cleared| {
            let mut score = self.board_score(&after, cleared);
            if self.lookahead {
                if let Some(next_kind) = next {
                    score = CURRENT_WEIGHT * score
                        + CONTINUATION_WEIGHT * self.continuation_score(&after, next_kind);
                }
            }
            // Strictly-greater keeps the first maximum.
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((placement, score));
            }
        });
        best.map(|(placement, _)| placement)
    }
}

/// Drop `kind` at every legal (rotation, column) pair, invoking `f` with
/// the placement and the post-clear board. Columns run from -2 so box
/// offsets can reach the left wall; illegal spots are skipped by the
/// collision test.
fn for_each_placement(
    board: &Board,
    kind: PieceKind,
    mut f: impl FnMut(Placement, Board, usize),
) {
    for rotation in Rotation::ALL {
        let shape = get_shape(kind, rotation);
        for x in -2..BOARD_WIDTH as i8 {
            if board.collides(&shape, x, SPAWN_Y) {
                continue;
            }
            let y = board.ghost_y(&shape, x, SPAWN_Y);
            let mut after = board.clone();
            after.lock(&shape, x, y, kind);
            let rows = after.completed_rows();
            let cleared = rows.len();
            if cleared > 0 {
                after.clear_rows(&rows);
            }
            f(Placement { x, rotation }, after, cleared);
        }
    }
}
