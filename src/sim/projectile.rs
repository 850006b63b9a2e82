//! Arrow flight
//!
//! Constant-gravity parabolic motion in screen space (y grows downward), one
//! integration step per tick. No drag, no wind.

use glam::Vec2;

use super::state::{Arrow, Field, Target};
use crate::consts::*;
use crate::heading_vector;

/// Why a flight ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightEnd {
    /// Arrow came within contact range of the target face
    ReachedTarget { distance: f32 },
    /// Arrow left the field by more than the margin
    OutOfBounds { distance: f32 },
}

impl FlightEnd {
    /// Distance from the arrow to the target center when the flight ended
    pub fn distance(&self) -> f32 {
        match *self {
            FlightEnd::ReachedTarget { distance } | FlightEnd::OutOfBounds { distance } => distance,
        }
    }
}

/// Launch speed for a target at `distance`: farther targets get faster arrows
#[inline]
pub fn launch_power(distance: f32) -> f32 {
    BASE_POWER + distance / POWER_DISTANCE_DIVISOR
}

/// Fire the arrow from `origin` along `angle`
pub fn release(arrow: &mut Arrow, origin: Vec2, angle: f32, target_distance: f32) {
    let power = launch_power(target_distance);
    arrow.pos = origin;
    arrow.angle = angle;
    arrow.vel = heading_vector(angle) * power;
    arrow.flying = true;
}

/// Integrate one tick: position moves by the current velocity, then gravity acts
pub fn step(arrow: &mut Arrow) {
    arrow.pos += arrow.vel;
    arrow.vel.y += arrow.gravity;
}

/// True once the point is more than the margin outside the field
pub fn out_of_bounds(pos: Vec2, field: &Field) -> bool {
    pos.x < -OUT_OF_BOUNDS_MARGIN
        || pos.x > field.width + OUT_OF_BOUNDS_MARGIN
        || pos.y < -OUT_OF_BOUNDS_MARGIN
        || pos.y > field.height + OUT_OF_BOUNDS_MARGIN
}

/// Check whether the current flight is over
pub fn flight_end(arrow: &Arrow, target: &Target, field: &Field) -> Option<FlightEnd> {
    let distance = arrow.pos.distance(target.pos);

    if distance < target.radius + TARGET_CONTACT_MARGIN {
        Some(FlightEnd::ReachedTarget { distance })
    } else if out_of_bounds(arrow.pos, field) {
        Some(FlightEnd::OutOfBounds { distance })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(600.0, 600.0)
    }

    #[test]
    fn test_launch_power() {
        assert_eq!(launch_power(250.0), 20.0);
        assert_eq!(launch_power(450.0), 24.0);
    }

    #[test]
    fn test_release_straight_up() {
        let mut arrow = Arrow::default();
        release(&mut arrow, Vec2::new(300.0, 550.0), 0.0, 250.0);
        assert!(arrow.flying);
        assert_eq!(arrow.pos, Vec2::new(300.0, 550.0));
        assert!(arrow.vel.x.abs() < 1e-6);
        assert!((arrow.vel.y + 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_step_moves_before_gravity() {
        let mut arrow = Arrow {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(2.0, -10.0),
            flying: true,
            ..Default::default()
        };
        step(&mut arrow);
        assert_eq!(arrow.pos, Vec2::new(102.0, 90.0));
        assert!((arrow.vel.y - (-9.7)).abs() < 1e-5);
        assert_eq!(arrow.vel.x, 2.0);
    }

    #[test]
    fn test_flight_end_at_target() {
        let target = Target::for_round(1, &field());
        let arrow = Arrow {
            pos: target.pos + Vec2::new(0.0, 99.0),
            flying: true,
            ..Default::default()
        };
        assert!(matches!(
            flight_end(&arrow, &target, &field()),
            Some(FlightEnd::ReachedTarget { .. })
        ));

        // Exactly radius + margin does not count as contact
        let arrow = Arrow {
            pos: target.pos + Vec2::new(100.0, 0.0),
            flying: true,
            ..Default::default()
        };
        assert_eq!(flight_end(&arrow, &target, &field()), None);
    }

    #[test]
    fn test_flight_end_out_of_bounds() {
        let target = Target::for_round(1, &field());
        for pos in [
            Vec2::new(-50.5, 300.0),
            Vec2::new(650.5, 300.0),
            Vec2::new(10.0, -50.5),
            Vec2::new(10.0, 650.5),
        ] {
            let arrow = Arrow {
                pos,
                flying: true,
                ..Default::default()
            };
            assert!(
                matches!(
                    flight_end(&arrow, &target, &field()),
                    Some(FlightEnd::OutOfBounds { .. })
                ),
                "{pos:?}"
            );
        }

        let arrow = Arrow {
            pos: Vec2::new(-50.0, 300.0),
            flying: true,
            ..Default::default()
        };
        assert_eq!(flight_end(&arrow, &target, &field()), None);
    }

    proptest! {
        #[test]
        fn prop_release_velocity(angle in -AIM_RANGE..AIM_RANGE, distance in 250.0f32..3000.0) {
            let mut arrow = Arrow::default();
            release(&mut arrow, Vec2::new(300.0, 550.0), angle, distance);
            let power = 15.0 + distance / 50.0;
            prop_assert!((arrow.vel.x - angle.sin() * power).abs() < 1e-3);
            prop_assert!((arrow.vel.y + angle.cos() * power).abs() < 1e-3);
            prop_assert_eq!(arrow.angle, angle);
        }

        #[test]
        fn prop_gravity_is_constant(angle in -AIM_RANGE..AIM_RANGE, ticks in 1usize..120) {
            let mut arrow = Arrow::default();
            release(&mut arrow, Vec2::new(300.0, 550.0), angle, 250.0);
            for _ in 0..ticks {
                let before = arrow;
                step(&mut arrow);
                prop_assert!(arrow.vel.y > before.vel.y);
                prop_assert!((arrow.vel.y - before.vel.y - GRAVITY).abs() < 1e-4);
                prop_assert_eq!(arrow.pos, before.pos + before.vel);
            }
        }
    }
}
