//! Ring scoring
//!
//! Rings are nested and listed outer to inner. A shot counts for a ring when
//! it lands within the ring radius plus `RING_FORGIVENESS`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the five scoring zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    /// Index into the ring table (0 = outer, 4 = bullseye)
    pub index: usize,
}

impl Ring {
    pub const BULLSEYE: Ring = Ring { index: RING_RADII.len() - 1 };

    pub fn radius(&self) -> f32 {
        RING_RADII[self.index]
    }

    pub fn points(&self) -> u32 {
        RING_POINTS[self.index]
    }

    pub fn label(&self) -> &'static str {
        RING_LABELS[self.index]
    }

    pub fn is_bullseye(&self) -> bool {
        *self == Self::BULLSEYE
    }
}

/// Result of scoring a finished flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Hit(Ring),
    Miss,
}

impl ShotOutcome {
    pub fn points(&self) -> u32 {
        match self {
            ShotOutcome::Hit(ring) => ring.points(),
            ShotOutcome::Miss => 0,
        }
    }
}

/// Score a shot that ended `distance` away from the target center.
///
/// Walks the rings widest first and stops at the first ring that no longer
/// contains the shot; the last ring that did contain it wins.
pub fn evaluate_hit(distance: f32) -> ShotOutcome {
    let mut outcome = ShotOutcome::Miss;

    for (index, radius) in RING_RADII.iter().enumerate() {
        if distance <= radius + RING_FORGIVENESS {
            outcome = ShotOutcome::Hit(Ring { index });
        } else {
            break;
        }
    }

    outcome
}
