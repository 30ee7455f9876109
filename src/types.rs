use once_cell::sync::Lazy;
use thiserror::Error;

/// Code of an empty square.
pub const EMPTY: i8 = 0;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_case(c: char) -> Color {
        if c.is_uppercase() {
            Color::White
        } else if c.is_lowercase() {
            Color::Black
        } else {
            panic!("Color char must be either upper or lowercase.")
        }
    }

    /// Sign of this side's piece codes: positive for white, negative for black.
    pub fn sign(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Which side owns a piece code, `None` for an empty square.
    pub fn from_code(code: i8) -> Option<Color> {
        if code > 0 {
            Some(Color::White)
        } else if code < 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Rank a pawn of this color starts on.
    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank delta of one forward pawn step.
    pub fn pawn_step(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PieceType {
    Pawn,
    Bishop,
    Knight,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> PieceType {
        match c.to_lowercase().next().unwrap() {
            'p' => PieceType::Pawn,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            other => panic!("Unrecognized piece type {other}."),
        }
    }

    /// Magnitude of this piece's board code.
    pub fn code(&self) -> i8 {
        match self {
            Self::Pawn => 1,
            Self::Bishop => 2,
            Self::Knight => 3,
            Self::Rook => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }

    /// Piece type of a signed board code, `None` for empty or out of range.
    pub fn from_code(code: i8) -> Option<PieceType> {
        match code.abs() {
            1 => Some(Self::Pawn),
            2 => Some(Self::Bishop),
            3 => Some(Self::Knight),
            4 => Some(Self::Rook),
            5 => Some(Self::Queen),
            6 => Some(Self::King),
            _ => None,
        }
    }

    /// Is the piece a sliding piece (one which can move multiple squares in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Bishop => "bishop",
            Self::Knight => "knight",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// Signed board code of a piece: type magnitude times the owner's sign.
pub fn piece_code(color: Color, piece_type: PieceType) -> i8 {
    piece_type.code() * color.sign()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    file: u8, // col, 0 is the a-file
    rank: u8, // row, 0 is white's back rank
}

impl Square {
    /// A square from 0-indexed coordinates, `None` if either is off the board.
    #[inline(always)]
    pub fn new(file: i16, rank: i16) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn from_algebraic(s: &str) -> Square {
        if s.len() != 2 {
            panic!("Algebraic notation must be of length 2.")
        }

        let mut char_iter = s.chars();
        let file_char = char_iter.next().unwrap();
        let rank_char = char_iter.next().unwrap();

        let file = file_char as i16 - 'a' as i16;
        let rank = rank_char as i16 - '1' as i16;

        Square::new(file, rank).unwrap_or_else(|| panic!("Square {s} is outside the board."))
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (self.file + b'a') as char,
            (self.rank + b'1') as char
        )
    }

    #[inline(always)]
    pub fn file(&self) -> u8 {
        self.file
    }

    #[inline(always)]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Index into a 64-entry per-square table.
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    /// The square displaced by `(d_file, d_rank)`, `None` if that leaves the board.
    #[inline(always)]
    pub fn offset(&self, d_file: i8, d_rank: i8) -> Option<Square> {
        Square::new(
            self.file as i16 + d_file as i16,
            self.rank as i16 + d_rank as i16,
        )
    }

    pub fn file_delta(&self, other: &Square) -> u8 {
        self.file.abs_diff(other.file)
    }

    pub fn rank_delta(&self, other: &Square) -> u8 {
        self.rank.abs_diff(other.rank)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// Unit direction vectors as `(d_file, d_rank)` pairs. These tables are the
/// single source of directions for both move generation and attack detection.
pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Precomputed on-board target squares for the two fixed-offset piece types.
pub struct StepTables {
    pub knight: [Vec<Square>; 64],
    pub king: [Vec<Square>; 64],
}

impl StepTables {
    fn build() -> Self {
        const NONE: Vec<Square> = Vec::new();
        let mut knight = [NONE; 64];
        let mut king = [NONE; 64];
        for rank in 0..8 {
            for file in 0..8 {
                let sq = Square::new(file, rank).unwrap();
                knight[sq.index()] = KNIGHT_JUMPS
                    .iter()
                    .filter_map(|&(df, dr)| sq.offset(df, dr))
                    .collect();
                king[sq.index()] = KING_STEPS
                    .iter()
                    .filter_map(|&(df, dr)| sq.offset(df, dr))
                    .collect();
            }
        }
        StepTables { knight, king }
    }
}

pub static STEP_TABLES: Lazy<StepTables> = Lazy::new(StepTables::build);

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MateError {
    /// The side under test has no king on the board.
    #[error("no {} king on the board", .0.to_human())]
    KingNotFound(Color),
}
