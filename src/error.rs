use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("granularity must be positive, got {0}")]
    InvalidGranularity(i32),

    #[error("link {link}: invalid angle limit [{min}, {max}]")]
    InvalidLimits { link: usize, min: i32, max: i32 },

    #[error("{kind} {index}: {reason}")]
    InvalidCircle {
        kind: &'static str,
        index: usize,
        reason: &'static str,
    },

    #[error("link {link}: {reason}")]
    InvalidLink { link: usize, reason: &'static str },

    #[error("link {link}: angle {angle} outside [{min}, {max}]")]
    AngleOutOfRange {
        link: usize,
        angle: i32,
        min: i32,
        max: i32,
    },

    #[error("expected {expected} angles, got {got}")]
    AngleCount { expected: usize, got: usize },

    #[error("maze format error: {0}")]
    MazeFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
