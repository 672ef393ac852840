//! Error types for simulation setup

/// Setup-time failures. The simulation itself never fails once constructed.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Arena dimension is zero, negative or not finite
    #[error("Invalid arena {name}: {value}")]
    InvalidArena { name: &'static str, value: f32 },

    /// Arena cannot hold the boss and the player
    #[error("Arena {width}x{height} is too small (need at least {min_width}x{min_height})")]
    ArenaTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },

    /// Time scale is zero, negative or not finite
    #[error("Invalid time scale: {0}")]
    InvalidTimeScale(f32),

    /// Boss configured without any lives
    #[error("Boss needs at least one life")]
    NoBossLives,

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, ConfigError>;
