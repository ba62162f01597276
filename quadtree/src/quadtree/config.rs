use super::*;

#[derive(Debug, Clone)]
pub struct Config {
    /// Elastic margin of the root region. Children inherit
    /// `buffer / buffer_divisor` on every split.
    pub buffer: f32,
    pub min_points: usize,
    pub max_points: usize,
    pub buffer_divisor: f32,
    /// Leaves at this depth are never split, even above `max_points`.
    pub max_depth: u32,
    /// Arena slots reserved up front.
    pub region_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            buffer: 0.0,
            min_points: 8,
            max_points: 16,
            buffer_divisor: 4.0,
            max_depth: 16,
            region_capacity: 256,
        }
    }
}

impl Config {
    /// `min_points` and `max_points` too close together can make splits and
    /// merges chase each other; keep a comfortable gap between them.
    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.min_points >= self.max_points {
            return Err(QuadtreeError::InvalidPointBounds {
                min_points: self.min_points,
                max_points: self.max_points,
            });
        }
        if !(self.buffer.is_finite() && self.buffer >= 0.0) {
            return Err(QuadtreeError::InvalidBuffer {
                buffer: self.buffer,
            });
        }
        if !(self.buffer_divisor.is_finite() && self.buffer_divisor > 0.0) {
            return Err(QuadtreeError::InvalidBufferDivisor {
                divisor: self.buffer_divisor,
            });
        }
        Ok(())
    }
}
