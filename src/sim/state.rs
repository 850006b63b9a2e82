//! Game state and core simulation types
//!
//! Everything the loop driver owns lives in [`GameState`]; the tick function
//! mutates it and the presentation layer only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aim::Aim;
use super::scoring::{Ring, ShotOutcome};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first start
    Start,
    /// Aiming; a shot may be released
    Playing,
    /// Arrow in flight, or a resolved shot waiting for the next round
    Shooting,
    /// Out of misses
    GameOver,
}

impl GamePhase {
    /// Phases in which the aim, target and arrow are simulated
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Shooting)
    }
}

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The bow: a pivot for aiming and drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bow {
    pub pos: Vec2,
}

impl Bow {
    /// Bow position for a field: centered, near the bottom edge
    pub fn for_field(field: &Field) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height - BOW_BOTTOM_OFFSET),
        }
    }
}

/// The arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Aim angle at release
    pub angle: f32,
    pub flying: bool,
    pub length: f32,
    pub gravity: f32,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            flying: false,
            length: ARROW_LENGTH,
            gravity: GRAVITY,
        }
    }
}

impl Arrow {
    /// Put the arrow back on the string
    pub fn nock(&mut self, bow: &Bow) {
        self.flying = false;
        self.pos = bow.pos;
    }
}

/// The target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    /// Distance from the bow; grows every round
    pub distance: f32,
    pub radius: f32,
    /// Horizontal pixels per tick (0 = stationary)
    pub move_speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub move_direction: f32,
    /// Ring radii, outer to inner
    pub rings: [f32; 5],
}

impl Target {
    /// Target distance for a round
    pub fn distance_for_round(round: u32) -> f32 {
        BASE_TARGET_DISTANCE + round.saturating_sub(1) as f32 * TARGET_DISTANCE_PER_ROUND
    }

    /// Horizontal speed for a round; stationary before `MOVING_TARGET_ROUND`
    pub fn speed_for_round(round: u32) -> f32 {
        if round >= MOVING_TARGET_ROUND {
            BASE_TARGET_SPEED + (round - MOVING_TARGET_ROUND) as f32 * TARGET_SPEED_PER_ROUND
        } else {
            0.0
        }
    }

    /// A fresh target for the start of a session
    pub fn for_round(round: u32, field: &Field) -> Self {
        let mut target = Self {
            pos: Vec2::ZERO,
            distance: 0.0,
            radius: TARGET_RADIUS,
            move_speed: 0.0,
            move_direction: 1.0,
            rings: RING_RADII,
        };
        target.place(round, field);
        target
    }

    /// Re-center and re-tune for a round (direction carries over)
    pub fn place(&mut self, round: u32, field: &Field) {
        self.distance = Self::distance_for_round(round);
        self.pos = field.center() - Vec2::new(0.0, self.distance / 2.0);
        self.move_speed = Self::speed_for_round(round);
    }

    /// Slide sideways, turning around near the field edges
    pub fn drift(&mut self, field: &Field) {
        if self.move_speed <= 0.0 {
            return;
        }
        self.pos.x += self.move_speed * self.move_direction;

        if self.pos.x > field.width - TARGET_EDGE_MARGIN {
            self.move_direction = -1.0;
        }
        if self.pos.x < TARGET_EDGE_MARGIN {
            self.move_direction = 1.0;
        }
    }
}

/// Color class of a result message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Bullseye,
    Hit,
    Miss,
}

/// Transient result text shown after a shot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub text: String,
    pub kind: ResultKind,
    /// Tick at which the message disappears
    pub expires_at: u64,
}

impl ResultMessage {
    pub fn for_outcome(outcome: ShotOutcome, now: u64) -> Self {
        let (text, kind) = match outcome {
            ShotOutcome::Hit(ring) => (
                format!("{}\n+{}", ring.label(), ring.points()),
                if ring.is_bullseye() {
                    ResultKind::Bullseye
                } else {
                    ResultKind::Hit
                },
            ),
            ShotOutcome::Miss => ("MISS!".to_string(), ResultKind::Miss),
        };
        Self {
            text,
            kind,
            expires_at: now + RESULT_DISPLAY_TICKS,
        }
    }
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new session began
    SessionStarted,
    /// Arrow left the bow
    ShotReleased { angle: f32, power: f32 },
    /// Arrow scored
    TargetHit { ring: Ring, points: u32, distance: f32 },
    /// Arrow scored nothing
    Missed { misses: u32, distance: f32 },
    /// Shooting is enabled again
    RoundReady { round: u32 },
    /// Out of misses
    GameOver { score: u32, round: u32, best: u32, new_best: bool },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Current round (1-based)
    pub round: u32,
    pub misses: u32,
    /// Best score known to this session (seeded from storage)
    pub best_score: u32,
    /// Simulation tick counter; the session clock
    pub time_ticks: u64,
    pub field: Field,
    pub bow: Bow,
    pub arrow: Arrow,
    pub target: Target,
    pub aim: Aim,
    /// Message currently on display
    pub result: Option<ResultMessage>,
    /// Tick at which shooting is re-enabled after a resolved shot
    pub round_ready_at: Option<u64>,
}

impl GameState {
    /// Create a game waiting on the start screen
    pub fn new(field: Field, best_score: u32) -> Self {
        let mut state = Self {
            phase: GamePhase::Start,
            score: 0,
            round: 1,
            misses: 0,
            best_score,
            time_ticks: 0,
            field,
            bow: Bow::for_field(&field),
            arrow: Arrow::default(),
            target: Target::for_round(1, &field),
            aim: Aim::default(),
            result: None,
            round_ready_at: None,
        };
        state.reset();
        state
    }

    /// Restore every per-session value to its initial state
    pub fn reset(&mut self) {
        self.score = 0;
        self.round = 1;
        self.misses = 0;
        self.aim = Aim::default();
        self.bow = Bow::for_field(&self.field);
        self.arrow = Arrow::default();
        self.arrow.nock(&self.bow);
        self.target = Target::for_round(self.round, &self.field);
        self.result = None;
        self.round_ready_at = None;
    }

    /// Reset and begin playing
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
    }

    /// Track a resized drawing surface. Positions are left as they are.
    pub fn set_field(&mut self, width: f32, height: f32) {
        self.field = Field::new(width, height);
    }

    /// Whether the player may release an arrow right now
    pub fn can_shoot(&self) -> bool {
        self.phase == GamePhase::Playing && !self.arrow.flying
    }

    /// Whether the bow is aiming (arrow on the string)
    pub fn is_aiming(&self) -> bool {
        !self.arrow.flying
    }

    /// Message still on display at the current tick
    pub fn visible_result(&self) -> Option<&ResultMessage> {
        self.result
            .as_ref()
            .filter(|msg| self.time_ticks < msg.expires_at)
    }
}
