//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, timers counted in ticks
//! - No rendering or platform dependencies

pub mod aim;
pub mod projectile;
pub mod scoring;
pub mod state;
pub mod tick;

pub use aim::{Aim, aim_speed_for_round};
pub use projectile::{FlightEnd, flight_end, launch_power};
pub use scoring::{Ring, ShotOutcome, evaluate_hit};
pub use state::{
    Arrow, Bow, Field, GameEvent, GamePhase, GameState, ResultKind, ResultMessage, Target,
};
pub use tick::{TickInput, advance_round, tick};
