use common::shapes::EntityId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    InvalidPointBounds {
        min_points: usize,
        max_points: usize,
    },
    InvalidWorldBounds {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    InvalidBuffer {
        buffer: f32,
    },
    InvalidBufferDivisor {
        divisor: f32,
    },
    OutOfBounds {
        id: EntityId,
        x: f32,
        y: f32,
    },
    NoRegionAvailable {
        id: EntityId,
    },
    InvariantViolation {
        region: u32,
        reason: &'static str,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl QuadtreeError {
    /// Construction parameters were rejected; the index was never built.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuadtreeError::InvalidPointBounds { .. }
                | QuadtreeError::InvalidWorldBounds { .. }
                | QuadtreeError::InvalidBuffer { .. }
                | QuadtreeError::InvalidBufferDivisor { .. }
        )
    }
}

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidPointBounds {
                min_points,
                max_points,
            } => {
                write!(
                    f,
                    "min_points must be less than max_points (min_points: {}, max_points: {})",
                    min_points, max_points
                )
            }
            QuadtreeError::InvalidWorldBounds {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                write!(
                    f,
                    "world bounds must be finite with positive width and height (min_x: {}, min_y: {}, max_x: {}, max_y: {})",
                    min_x, min_y, max_x, max_y
                )
            }
            QuadtreeError::InvalidBuffer { buffer } => {
                write!(
                    f,
                    "buffer must be finite and non-negative (buffer: {})",
                    buffer
                )
            }
            QuadtreeError::InvalidBufferDivisor { divisor } => {
                write!(
                    f,
                    "buffer divisor must be finite and positive (divisor: {})",
                    divisor
                )
            }
            QuadtreeError::OutOfBounds { id, x, y } => {
                write!(
                    f,
                    "entity {} at ({}, {}) is outside the world bounds",
                    id, x, y
                )
            }
            QuadtreeError::NoRegionAvailable { id } => {
                write!(f, "no live leaf region available for entity {}", id)
            }
            QuadtreeError::InvariantViolation { region, reason } => {
                write!(f, "invariant violated at region {}: {}", region, reason)
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
