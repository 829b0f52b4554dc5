//! Core types and constants shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions. The top two rows are the hidden spawn area; only the
/// bottom 20 rows are rendered.
pub const BOARD_WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
pub const HIDDEN_ROWS: usize = 2;
pub const BOARD_HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_ROWS;

/// Spawn position of the 4x4 piece bounding box.
pub const SPAWN_X: i8 = ((BOARD_WIDTH - 4) / 2) as i8;
pub const SPAWN_Y: i8 = 0;

/// NTSC NES frame rate.
pub const FRAME_RATE: f64 = 60.098;

/// DAS timing (frames): initial charge delay, then repeat cadence.
pub const DAS_DELAY: u32 = 16;
pub const DAS_REPEAT: u32 = 6;

/// The autoplayer acts every this many frames.
pub const AI_STEP_FRAMES: u64 = 15;

/// Line clear scoring base values, multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points banked per soft-dropped cell.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Tetromino piece kinds, in sequencer index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Sequencer identity in [0, 6].
    pub fn index(self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Inverse of [`index`](Self::index). Callers must pass a value in
    /// [0, 6]; anything else is a programmer error.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[index as usize]
    }

    /// Value written into exported board grids (0 = empty).
    pub fn cell_value(self) -> u8 {
        self.index() + 1
    }

    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// Rotation states (North = spawn orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Game lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
