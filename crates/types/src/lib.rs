//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, timer runtime).
//!
//! # Board Geometry
//!
//! The board is a 12x24 grid that carries its own border:
//!
//! - **Columns 0 and 11**: walls
//! - **Row 23**: floor
//! - **Columns 1-10, rows 0-22**: playable interior
//! - **Rows 0-3**: spawn zone above the visible well (pieces spawn at (4, 0))
//!
//! Rows inside the spawn zone are never compacted. Row 2 is the spawn
//! reference row: once anything is left there after a commit, the game is over.
//!
//! # Examples
//!
//! ```
//! use tetromino_stacking_types::{Intent, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(2), Some(PieceKind::I));
//! assert_eq!(PieceKind::I.index(), 2);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Intent::from_str("rotateCcw"), Some(Intent::RotateCcw));
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 24);
//! ```

/// Board width in cells, walls included
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells, floor included
pub const BOARD_HEIGHT: u8 = 24;

/// Number of playable columns between the walls
pub const INTERIOR_WIDTH: u8 = BOARD_WIDTH - 2;

/// Rows at the top of the board reserved for spawning (not part of the well)
pub const SPAWN_ZONE_ROWS: u8 = 4;

/// Highest row index the compaction pass may copy from. Rows above it are
/// never shifted.
pub const COMPACTION_BOUNDARY: u8 = SPAWN_ZONE_ROWS;

/// Row checked after every commit; it must be completely empty to keep playing.
pub const SPAWN_REFERENCE_ROW: u8 = 2;

/// Origin of the 4x4 bounding box of a freshly spawned piece
pub const SPAWN_ORIGIN: (i8, i8) = (4, 0);

/// Number of upcoming pieces shown in the preview queue
pub const QUEUE_LEN: usize = 3;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// Default fall interval in milliseconds
pub const DEFAULT_TICK_MS: u32 = 500;

/// Step used by the input layer when the player speeds up or slows down the fall
pub const TICK_STEP_MS: u32 = 50;

/// Fastest fall interval reachable from the keyboard
pub const MIN_TICK_MS: u32 = 50;

/// The seven tetromino piece kinds, in catalog order.
///
/// The discriminant is the piece "type" used by the shape table and the
/// colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    L,
    I,
    J,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::O,
        PieceKind::L,
        PieceKind::I,
        PieceKind::J,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog index in `[0, 7)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by catalog index
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_stacking_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Palette colour used in multi-colour mode
    pub fn color(self) -> Color {
        Color::PALETTE[self.index()]
    }
}

/// Orientation of a piece in 90° steps.
///
/// The cycle goes North → East → South → West → North, clockwise.
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

    /// Orientation index in `[0, 4)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Orientation from any integer, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_stacking_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°, i.e. three clockwise steps)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_stacking_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Apply a rotation direction
    pub fn rotate(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// State of a single board cell.
///
/// `Wall` and `Floor` are border sentinels placed at construction time and
/// never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Floor,
    Occupied(PieceKind),
}

impl CellState {
    pub fn is_empty(self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, CellState::Wall | CellState::Floor)
    }

    /// Piece kind stored in an occupied cell
    pub fn piece(self) -> Option<PieceKind> {
        match self {
            CellState::Occupied(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Colours available to the render adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Cyan,
    Orange,
    Yellow,
    Violet,
}

impl Color {
    /// Palette indexed by piece kind
    pub const PALETTE: [Color; PIECE_KIND_COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Orange,
        Color::Yellow,
        Color::Violet,
    ];

    /// Parse a palette colour name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_stacking_types::Color;
    ///
    /// assert_eq!(Color::from_str("Cyan"), Some(Color::Cyan));
    /// assert_eq!(Color::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "cyan" => Some(Color::Cyan),
            "orange" => Some(Color::Orange),
            "yellow" => Some(Color::Yellow),
            "violet" => Some(Color::Violet),
            _ => None,
        }
    }
}

/// How pieces are coloured on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Each piece kind gets its own palette colour
    #[default]
    Multi,
    /// Every piece is painted with the same colour
    Single(Color),
}

impl ColorMode {
    /// Resolve the display colour of a piece kind
    pub fn resolve(self, kind: PieceKind) -> Color {
        match self {
            ColorMode::Multi => kind.color(),
            ColorMode::Single(color) => color,
        }
    }

    /// Switch between multi-colour and single-colour, keeping `main` for the latter
    pub fn toggled(self, main: Color) -> Self {
        match self {
            ColorMode::Multi => ColorMode::Single(main),
            ColorMode::Single(_) => ColorMode::Multi,
        }
    }
}

/// Player intents delivered by the input source.
///
/// Each intent maps 1:1 to a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Shift the falling piece one column left
    MoveLeft,
    /// Shift the falling piece one column right
    MoveRight,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Let the piece fall one row right away (same as a timer tick)
    Drop,
    /// Pause or resume
    TogglePause,
    /// Start a new session
    Restart,
    /// Change the fall interval (milliseconds)
    SetTickInterval(u32),
}

impl Intent {
    /// Parse a parameterless intent from its camelCase name (case-insensitive)
    ///
    /// `SetTickInterval` carries a value and is not parsed here.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "drop" => Some(Intent::Drop),
            "togglepause" | "pause" => Some(Intent::TogglePause),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::Drop => "drop",
            Intent::TogglePause => "togglePause",
            Intent::Restart => "restart",
            Intent::SetTickInterval(_) => "setTickInterval",
        }
    }
}

/// Identifier of a periodic timer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Session configuration, read at init and whenever options are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub tick_interval_ms: u32,
    pub color_mode: ColorMode,
    /// Colour used when switching to single-colour mode
    pub main_color: Color,
    /// RNG seed; `None` means seed from entropy
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Read configuration from environment variables.
    ///
    /// - `STACKING_TICK_MS`: fall interval in ms (positive integer)
    /// - `STACKING_COLOR_MODE`: `multi` or `single`
    /// - `STACKING_MAIN_COLOR`: palette colour for single-colour mode
    /// - `STACKING_SEED`: fixed RNG seed
    ///
    /// Missing or invalid values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup (used by `from_env`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_interval_ms = lookup("STACKING_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.tick_interval_ms);

        let main_color = lookup("STACKING_MAIN_COLOR")
            .and_then(|s| Color::from_str(&s))
            .unwrap_or(defaults.main_color);

        let color_mode = match lookup("STACKING_COLOR_MODE")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            Some("single") => ColorMode::Single(main_color),
            _ => ColorMode::Multi,
        };

        let seed = lookup("STACKING_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            tick_interval_ms,
            color_mode,
            main_color,
            seed,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_MS,
            color_mode: ColorMode::Multi,
            main_color: Color::Cyan,
            seed: None,
        }
    }
}
