//! Aim oscillator
//!
//! The bow swings like a pendulum between two fixed bounds, reflecting when
//! it reaches either one.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Aim speed for a round: a linear ramp capped at `MAX_AIM_SPEED`
pub fn aim_speed_for_round(round: u32) -> f32 {
    let ramp = BASE_AIM_SPEED + round.saturating_sub(1) as f32 * AIM_SPEED_PER_ROUND;
    ramp.min(MAX_AIM_SPEED)
}

/// Bow aim state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Current angle (radians, clockwise from straight up)
    pub angle: f32,
    /// Radians per tick
    pub speed: f32,
    /// +1.0 swinging right, -1.0 swinging left
    pub direction: f32,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            angle: 0.0,
            speed: BASE_AIM_SPEED,
            direction: 1.0,
        }
    }
}

impl Aim {
    /// Advance one tick, clamping and reversing at the bounds
    pub fn advance(&mut self) {
        self.angle += self.speed * self.direction;

        if self.angle >= AIM_RANGE {
            self.angle = AIM_RANGE;
            self.direction = -1.0;
        } else if self.angle <= -AIM_RANGE {
            self.angle = -AIM_RANGE;
            self.direction = 1.0;
        }
    }

    /// Pick up the speed for a new round (angle and direction carry over)
    pub fn set_round(&mut self, round: u32) {
        self.speed = aim_speed_for_round(round);
    }
}
