use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutOfBoundsPoint {
    // position in the input slice
    pub index: usize,
    pub point: Point,
}

impl fmt::Display for OutOfBoundsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point #{} at ({}, {})", self.index, self.point.x, self.point.y)
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Degenerate extent {0:?}: width and height must be finite and positive")]
    DegenerateExtent(Rect),

    #[error("{0} lies outside the extent")]
    OutOfBounds(OutOfBoundsPoint),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_depth {got} exceeds the limit of {limit}")]
    InvalidMaxDepth { got: u32, limit: u32 },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Encode failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Decode failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Trailing bytes after record data: {0}")]
    TrailingBytes(usize),
}
