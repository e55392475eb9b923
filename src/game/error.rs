//! Simulation Errors
//!
//! Structural invariant violations and level loading failures.
//! Blocked movement and blocked jumps are ordinary state changes and
//! never surface here.

use thiserror::Error;

/// Rejected unit mutation.
///
/// Returned by validated constructors and setters; the unit is left
/// untouched when one of these comes back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Max health must be strictly positive.
    #[error("max health must be positive, got {0}")]
    NonPositiveMaxHealth(i32),
    /// Current movement speed below zero.
    #[error("movement speed must not be negative")]
    NegativeMovementSpeed,
    /// Default movement speed below zero.
    #[error("default movement speed must not be negative")]
    NegativeDefaultMovementSpeed,
    /// Current jump speed below zero.
    #[error("jump speed must not be negative")]
    NegativeJumpSpeed,
    /// Default jump speed below zero.
    #[error("default jump speed must not be negative")]
    NegativeDefaultJumpSpeed,
    /// Ranged damage below zero.
    #[error("ranged damage must not be negative, got {0}")]
    NegativeDamage(i32),
}

/// Level layout or level source failure.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Layout has no rows.
    #[error("level {0:?} has no rows")]
    Empty(String),
    /// Row length differs from the first row.
    #[error("row {row} is {found} glyphs wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Glyph outside the layout alphabet.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
    /// No `P` in the layout.
    #[error("level {0:?} has no player spawn")]
    MissingPlayerSpawn(String),
    /// More than one `P` in the layout.
    #[error("level {0:?} has more than one player spawn")]
    DuplicatePlayerSpawn(String),
    /// Tile size must be strictly positive.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),
    /// Level extent does not fit the fixed-point position range.
    #[error("level {name:?} is too large: {width_cells}x{height_cells} cells of {tile_size}")]
    TooLarge {
        name: String,
        width_cells: usize,
        height_cells: usize,
        tile_size: i32,
    },
    /// Source has no level under this name.
    #[error("level not found: {0}")]
    NotFound(String),
    /// Reading a level file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Level file is not a valid layout document.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Environment override that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Value is not a number of the expected type.
    #[error("{key}: cannot parse {value:?}")]
    Parse { key: &'static str, value: String },
    /// Value parsed but is outside the accepted range.
    #[error("{key}: {value} is out of range")]
    OutOfRange { key: &'static str, value: i64 },
}

/// World construction failure.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Level could not be loaded or parsed.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// A spawned unit had invalid stats.
    #[error("invalid unit stats: {0}")]
    Unit(#[from] UnitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UnitError::NonPositiveMaxHealth(0).to_string(),
            "max health must be positive, got 0"
        );
        assert_eq!(
            LevelError::NotFound("castle".into()).to_string(),
            "level not found: castle"
        );
        let err = ConfigError::OutOfRange { key: "PLATFORMER_GRAVITY", value: -1 };
        assert_eq!(err.to_string(), "PLATFORMER_GRAVITY: -1 is out of range");

        let err: WorldError = UnitError::NegativeDamage(-1).into();
        assert_eq!(err.to_string(), "invalid unit stats: ranged damage must not be negative, got -1");
    }
}
