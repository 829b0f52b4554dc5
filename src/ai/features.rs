//! Board surface measurements used by the heuristic scorer

use crate::core::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// One full scan of a board. All counts include the hidden spawn rows;
/// heights are measured from the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardFeatures {
    pub heights: [u32; BOARD_WIDTH],
    pub aggregate_height: u32,
    pub max_height: u32,
    /// Empty cells with at least one filled cell above them in the column.
    pub holes: u32,
    /// Holes buried under two or more filled cells.
    pub covered_holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
    pub height_variance: f64,
    /// Filled/empty alternations scanning each non-empty row, walls
    /// counted filled. Rows with no content are skipped so the metric
    /// stays local to the stack.
    pub row_transitions: u32,
    /// Filled/empty alternations scanning each column, floor counted filled.
    pub col_transitions: u32,
    /// Depth of the deepest single-column well.
    pub well_depth: u32,
    /// Hole-free surface with a well at least four deep.
    pub tetris_ready: bool,
}

impl BoardFeatures {
    pub fn measure(board: &Board) -> Self {
        let mut heights = [0u32; BOARD_WIDTH];
        let mut holes = 0u32;
        let mut covered_holes = 0u32;
        let mut col_transitions = 0u32;

        for x in 0..BOARD_WIDTH {
            let mut filled_above = 0u32;
            let mut prev_filled = false;
            for y in 0..BOARD_HEIGHT {
                let filled = board.is_occupied(x as i8, y as i8);
                if filled {
                    if filled_above == 0 {
                        heights[x] = (BOARD_HEIGHT - y) as u32;
                    }
                    filled_above += 1;
                } else if filled_above > 0 {
                    holes += 1;
                    if filled_above >= 2 {
                        covered_holes += 1;
                    }
                }
                if y > 0 && filled != prev_filled {
                    col_transitions += 1;
                }
                prev_filled = filled;
            }
            // The floor counts as filled.
            if !prev_filled {
                col_transitions += 1;
            }
        }

        let mut row_transitions = 0u32;
        for y in 0..BOARD_HEIGHT {
            let occupied =
                (0..BOARD_WIDTH).any(|x| board.is_occupied(x as i8, y as i8));
            if !occupied {
                continue;
            }
            let mut prev_filled = true; // left wall
            for x in 0..BOARD_WIDTH {
                let filled = board.is_occupied(x as i8, y as i8);
                if filled != prev_filled {
                    row_transitions += 1;
                }
                prev_filled = filled;
            }
            if !prev_filled {
                row_transitions += 1; // right wall
            }
        }

        let aggregate_height: u32 = heights.iter().sum();
        let max_height = heights.iter().copied().max().unwrap_or(0);

        let mut bumpiness = 0u32;
        for x in 0..BOARD_WIDTH - 1 {
            bumpiness += heights[x].abs_diff(heights[x + 1]);
        }

        let mean = aggregate_height as f64 / BOARD_WIDTH as f64;
        let height_variance = heights
            .iter()
            .map(|&h| {
                let d = h as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / BOARD_WIDTH as f64;

        let mut well_depth = 0u32;
        for x in 0..BOARD_WIDTH {
            let left = if x == 0 { u32::MAX } else { heights[x - 1] };
            let right = if x == BOARD_WIDTH - 1 {
                u32::MAX
            } else {
                heights[x + 1]
            };
            let rim = left.min(right);
            if rim > heights[x] {
                well_depth = well_depth.max(rim - heights[x]);
            }
        }

        let tetris_ready = holes == 0 && well_depth >= 4;

        Self {
            heights,
            aggregate_height,
            max_height,
            holes,
            covered_holes,
            bumpiness,
            height_variance,
            row_transitions,
            col_transitions,
            well_depth,
            tetris_ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn board_from_heights(heights: &[u32; BOARD_WIDTH]) -> Board {
        let mut board = Board::new();
        for (x, &h) in heights.iter().enumerate() {
            for dy in 0..h {
                let y = (BOARD_HEIGHT as u32 - 1 - dy) as i8;
                board.set(x as i8, y, Some(PieceKind::J));
            }
        }
        board
    }

    #[test]
    fn empty_board_is_all_zeroes() {
        let f = BoardFeatures::measure(&Board::new());
        assert_eq!(f.aggregate_height, 0);
        assert_eq!(f.holes, 0);
        assert_eq!(f.bumpiness, 0);
        assert_eq!(f.row_transitions, 0);
        // Each empty column transitions once at the floor.
        assert_eq!(f.col_transitions, BOARD_WIDTH as u32);
        assert_eq!(f.well_depth, 0);
        assert!(!f.tetris_ready);
    }

    #[test]
    fn heights_and_bumpiness_follow_the_surface() {
        let f = BoardFeatures::measure(&board_from_heights(&[3, 1, 0, 0, 0, 0, 0, 0, 0, 2]));
        assert_eq!(f.heights[0], 3);
        assert_eq!(f.heights[1], 1);
        assert_eq!(f.heights[9], 2);
        assert_eq!(f.aggregate_height, 6);
        assert_eq!(f.max_height, 3);
        assert_eq!(f.bumpiness, 2 + 1 + 2);
    }

    #[test]
    fn holes_count_empties_under_fill() {
        let mut board = Board::new();
        let bottom = (BOARD_HEIGHT - 1) as i8;
        // Column 0: filled, hole, filled => one hole covered by two cells.
        board.set(0, bottom, Some(PieceKind::I));
        board.set(0, bottom - 2, Some(PieceKind::I));
        board.set(0, bottom - 3, Some(PieceKind::I));
        let f = BoardFeatures::measure(&board);
        assert_eq!(f.holes, 1);
        assert_eq!(f.covered_holes, 1);

        // Column 1: one cell roof over a hole => hole but not covered.
        board.set(1, bottom - 1, Some(PieceKind::I));
        let f = BoardFeatures::measure(&board);
        assert_eq!(f.holes, 2);
        assert_eq!(f.covered_holes, 1);
    }

    #[test]
    fn deep_edge_well_is_detected() {
        // Flat height 4 everywhere except an empty rightmost column.
        let f = BoardFeatures::measure(&board_from_heights(&[4, 4, 4, 4, 4, 4, 4, 4, 4, 0]));
        assert_eq!(f.well_depth, 4);
        assert!(f.tetris_ready);

        let f = BoardFeatures::measure(&board_from_heights(&[3, 3, 3, 3, 3, 3, 3, 3, 3, 0]));
        assert_eq!(f.well_depth, 3);
        assert!(!f.tetris_ready);
    }

    #[test]
    fn hole_disqualifies_tetris_ready() {
        let mut board = board_from_heights(&[4, 4, 4, 4, 4, 4, 4, 4, 4, 0]);
        board.set(0, (BOARD_HEIGHT - 1) as i8, None);
        let f = BoardFeatures::measure(&board);
        assert!(f.holes > 0);
        assert!(!f.tetris_ready);
    }

    #[test]
    fn empty_rows_contribute_no_row_transitions() {
        let mut board = Board::new();
        let bottom = (BOARD_HEIGHT - 1) as i8;
        board.set(4, bottom, Some(PieceKind::T));
        let f = BoardFeatures::measure(&board);
        // Only the bottom row counts: wall|empty x4|filled|empty x5|wall.
        assert_eq!(f.row_transitions, 4);

        // Raising the stack must not change what the empty rows add.
        board.set(4, bottom - 1, Some(PieceKind::T));
        let f = BoardFeatures::measure(&board);
        assert_eq!(f.row_transitions, 8);
    }

    #[test]
    fn transitions_on_a_checkered_row() {
        let mut board = Board::new();
        let bottom = (BOARD_HEIGHT - 1) as i8;
        for x in (0..BOARD_WIDTH as i8).step_by(2) {
            board.set(x, bottom, Some(PieceKind::S));
        }
        let f = BoardFeatures::measure(&board);
        // filled/empty alternating across 10 columns, right wall filled:
        // transitions after columns 0..9 plus the final empty->wall edge.
        assert_eq!(f.row_transitions, 10);
    }
}
