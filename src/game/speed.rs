//! Saturating speed ramp applied each time food is eaten.

use serde::{Deserialize, Serialize};

/// Monotonic, clamped ramp: `base` to `max` in steps of `gain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    /// Starting speed in cells per second
    pub base: f64,
    /// Added per food eaten
    pub gain: f64,
    /// Upper clamp
    pub max: f64,
}

impl SpeedRamp {
    pub fn new(base: f64, gain: f64, max: f64) -> Self {
        Self { base, gain, max }
    }

    /// Speed after eating one more food at `current`
    pub fn next(&self, current: f64) -> f64 {
        (current + self.gain).clamp(self.base, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_increases_by_gain() {
        let ramp = SpeedRamp::new(6.0, 0.1, 12.0);
        let next = ramp.next(6.0);
        assert!((next - 6.1).abs() < 1e-9);
    }

    #[test]
    fn test_ramp_saturates_at_max() {
        let ramp = SpeedRamp::new(6.0, 0.1, 12.0);
        let mut speed = ramp.base;
        for _ in 0..1000 {
            speed = ramp.next(speed);
        }
        assert_eq!(speed, 12.0);
    }

    #[test]
    fn test_zero_gain_stays_at_base() {
        let ramp = SpeedRamp::new(4.0, 0.0, 8.0);
        assert_eq!(ramp.next(4.0), 4.0);
    }
}
