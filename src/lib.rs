//! Bullseye Range - a casual archery mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (aim, projectile, scoring, rounds)
//! - `renderer`: WebGPU rendering of the range from a vertex list
//! - `ui`: Pure HUD projection of the game state
//! - `platform`: Browser/native platform abstraction
//! - `best_score`: Persisted best score
//! - `settings`: Player preferences

pub mod best_score;
#[cfg(target_arch = "wasm32")]
pub mod feedback;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use best_score::BestScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas limits
    pub const MAX_CANVAS_WIDTH: f64 = 800.0;
    pub const MAX_CANVAS_HEIGHT: f64 = 600.0;
    /// Fraction of the window height the canvas may take
    pub const CANVAS_HEIGHT_FRACTION: f64 = 0.6;

    /// Bow sits this far above the bottom edge
    pub const BOW_BOTTOM_OFFSET: f32 = 50.0;

    /// Arrow shaft length (pixels)
    pub const ARROW_LENGTH: f32 = 40.0;
    /// Downward acceleration applied to vy each tick
    pub const GRAVITY: f32 = 0.3;
    /// Launch power at zero distance
    pub const BASE_POWER: f32 = 15.0;
    /// Distance units per extra unit of launch power
    pub const POWER_DISTANCE_DIVISOR: f32 = 50.0;
    /// Arrow may travel this far past the field edge before the shot ends
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

    /// Target face radius
    pub const TARGET_RADIUS: f32 = 90.0;
    /// Extra reach around the face that ends a flight
    pub const TARGET_CONTACT_MARGIN: f32 = 10.0;
    /// Ring radii, outer to inner
    pub const RING_RADII: [f32; 5] = [90.0, 70.0, 50.0, 30.0, 12.0];
    /// Points per ring, same order as `RING_RADII`
    pub const RING_POINTS: [u32; 5] = [10, 25, 50, 100, 200];
    /// Labels per ring, same order as `RING_RADII`
    pub const RING_LABELS: [&str; 5] = ["Outer Ring", "Ring 4", "Ring 3", "Ring 2", "BULLSEYE!"];
    /// Forgiveness added to every ring radius when scoring
    pub const RING_FORGIVENESS: f32 = 5.0;

    /// Target distance for round 1, and growth per round
    pub const BASE_TARGET_DISTANCE: f32 = 250.0;
    pub const TARGET_DISTANCE_PER_ROUND: f32 = 50.0;
    /// First round with a moving target
    pub const MOVING_TARGET_ROUND: u32 = 5;
    pub const BASE_TARGET_SPEED: f32 = 0.5;
    pub const TARGET_SPEED_PER_ROUND: f32 = 0.1;
    /// Target turns around this far from either side of the field
    pub const TARGET_EDGE_MARGIN: f32 = 80.0;

    /// Aim swings between -AIM_RANGE and +AIM_RANGE (radians)
    pub const AIM_RANGE: f32 = std::f32::consts::FRAC_PI_3;
    pub const BASE_AIM_SPEED: f32 = 0.01;
    pub const AIM_SPEED_PER_ROUND: f32 = 0.002;
    pub const MAX_AIM_SPEED: f32 = 0.08;

    /// Misses allowed before the game ends
    pub const MAX_MISSES: u32 = 5;

    /// Delay between a resolved shot and the next one (1.5 s)
    pub const ROUND_DELAY_TICKS: u64 = 90;
    /// How long a result message stays up (1.5 s)
    pub const RESULT_DISPLAY_TICKS: u64 = 90;

    /// Vibration pulses (ms)
    pub const RELEASE_VIBRATION_MS: u32 = 50;
    pub const HIT_VIBRATION_MS: u32 = 100;

    /// Length of the dashed aim guide
    pub const AIM_GUIDE_LENGTH: f32 = 200.0;
}

/// Unit vector for an angle measured clockwise from straight up (screen coords, y down)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Angle (clockwise from straight up) of a screen-space direction
#[inline]
pub fn heading_angle(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y)
}
