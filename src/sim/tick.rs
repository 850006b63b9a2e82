//! Fixed timestep simulation tick
//!
//! Core game loop that advances the range by one frame and resolves shots.

use super::projectile::{self, FlightEnd};
use super::scoring::{ShotOutcome, evaluate_hit};
use super::state::{GameEvent, GamePhase, GameState, ResultMessage};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Shoot button, click or tap on the range
    pub shoot: bool,
    /// Start button on the title screen
    pub start: bool,
    /// Restart button on the game-over screen
    pub restart: bool,
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;

    if input.start || input.restart {
        state.start();
        events.push(GameEvent::SessionStarted);
    } else if input.shoot {
        match state.phase {
            GamePhase::Start => {
                state.start();
                events.push(GameEvent::SessionStarted);
            }
            _ if state.can_shoot() => events.push(shoot(state)),
            _ => {}
        }
    }

    if !state.phase.is_active() {
        return events;
    }

    // Post-shot delay
    if let Some(ready_at) = state.round_ready_at {
        if state.time_ticks >= ready_at {
            state.round_ready_at = None;
            state.phase = GamePhase::Playing;
            events.push(GameEvent::RoundReady { round: state.round });
        }
    }

    if !state.arrow.flying {
        state.aim.advance();
    }

    state.target.drift(&state.field);

    if state.arrow.flying {
        projectile::step(&mut state.arrow);
        if let Some(end) = projectile::flight_end(&state.arrow, &state.target, &state.field) {
            resolve_shot(state, end, &mut events);
        }
    }

    events
}

/// Release the arrow at the current aim angle
fn shoot(state: &mut GameState) -> GameEvent {
    state.phase = GamePhase::Shooting;
    let angle = state.aim.angle;
    projectile::release(&mut state.arrow, state.bow.pos, angle, state.target.distance);

    let power = projectile::launch_power(state.target.distance);
    log::debug!("Arrow released at {:.3} rad, power {:.1}", angle, power);
    GameEvent::ShotReleased { angle, power }
}

/// Score a finished flight. Runs once per flight: the arrow is grounded first.
fn resolve_shot(state: &mut GameState, end: FlightEnd, events: &mut Vec<GameEvent>) {
    state.arrow.nock(&state.bow);

    let distance = end.distance();
    let outcome = evaluate_hit(distance);
    state.result = Some(ResultMessage::for_outcome(outcome, state.time_ticks));

    match outcome {
        ShotOutcome::Hit(ring) => {
            let points = ring.points();
            state.score += points;
            log::info!(
                "Round {}: {} (+{}) at {:.1}px, score {}",
                state.round,
                ring.label(),
                points,
                distance,
                state.score
            );
            events.push(GameEvent::TargetHit {
                ring,
                points,
                distance,
            });
            advance_round(state);
        }
        ShotOutcome::Miss => {
            state.misses += 1;
            log::info!(
                "Round {}: miss at {:.1}px ({}/{})",
                state.round,
                distance,
                state.misses,
                MAX_MISSES
            );
            events.push(GameEvent::Missed {
                misses: state.misses,
                distance,
            });
            if state.misses >= MAX_MISSES {
                events.push(game_over(state));
            } else {
                advance_round(state);
            }
        }
    }
}

/// Move to the next round and schedule the return to `Playing`
pub fn advance_round(state: &mut GameState) {
    state.round += 1;
    state.arrow.nock(&state.bow);
    state.aim.set_round(state.round);
    state.target.place(state.round, &state.field);
    state.round_ready_at = Some(state.time_ticks + ROUND_DELAY_TICKS);
}

fn game_over(state: &mut GameState) -> GameEvent {
    state.phase = GamePhase::GameOver;
    state.round_ready_at = None;

    let new_best = state.score > state.best_score;
    if new_best {
        state.best_score = state.score;
    }
    log::info!(
        "Game over: score {} in {} rounds (best {}{})",
        state.score,
        state.round,
        state.best_score,
        if new_best { ", new best" } else { "" }
    );

    GameEvent::GameOver {
        score: state.score,
        round: state.round,
        best: state.best_score,
        new_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aim::aim_speed_for_round;
    use crate::sim::state::{Field, ResultKind};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Field::new(600.0, 600.0), 0);
        state.start();
        state
    }

    fn shoot_input() -> TickInput {
        TickInput {
            shoot: true,
            ..Default::default()
        }
    }

    /// Put a motionless arrow in flight `offset` from the target center
    fn place_arrow(state: &mut GameState, offset: Vec2) {
        state.phase = GamePhase::Shooting;
        state.arrow.flying = true;
        state.arrow.pos = state.target.pos + offset;
        state.arrow.vel = Vec2::ZERO;
    }

    /// Force a miss and wait out the post-shot delay (unless the game ended)
    fn miss_once(state: &mut GameState) -> Vec<GameEvent> {
        place_arrow(state, Vec2::new(-2000.0, 0.0));
        let events = tick(state, &TickInput::default());
        if state.phase != GamePhase::GameOver {
            for _ in 0..ROUND_DELAY_TICKS {
                tick(state, &TickInput::default());
            }
            assert_eq!(state.phase, GamePhase::Playing);
        }
        events
    }

    #[test]
    fn test_shoot_on_start_screen_starts_game() {
        let mut state = GameState::new(Field::new(600.0, 600.0), 0);
        let events = tick(&mut state, &shoot_input());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events, vec![GameEvent::SessionStarted]);
        assert!(!state.arrow.flying);
    }

    #[test]
    fn test_start_screen_is_frozen() {
        let mut state = GameState::new(Field::new(600.0, 600.0), 0);
        let aim = state.aim;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.aim, aim);
        assert_eq!(state.phase, GamePhase::Start);
    }

    #[test]
    fn test_aim_swings_while_playing() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default());
        assert!((state.aim.angle - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_release_enters_shooting() {
        let mut state = playing_state();
        let events = tick(&mut state, &shoot_input());
        assert_eq!(state.phase, GamePhase::Shooting);
        assert!(state.arrow.flying);
        assert_eq!(
            events,
            vec![GameEvent::ShotReleased {
                angle: 0.0,
                power: 20.0
            }]
        );
        // The release tick also integrates once
        assert!((state.arrow.pos.y - 530.0).abs() < 1e-4);

        // Shooting again mid-flight is ignored
        let events = tick(&mut state, &shoot_input());
        assert!(events.is_empty());
    }

    #[test]
    fn test_straight_shot_lands_in_outer_ring() {
        let mut state = playing_state();
        let mut events = tick(&mut state, &shoot_input());
        let mut ticks = 1;
        while state.arrow.flying {
            events = tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 100, "arrow never landed");
        }
        assert_eq!(ticks, 16);
        match events.as_slice() {
            [GameEvent::TargetHit { ring, points, distance }] => {
                assert_eq!(ring.index, 0);
                assert_eq!(*points, 10);
                assert!((distance - 91.0).abs() < 0.01);
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_bullseye_scores_and_advances() {
        let mut state = playing_state();
        place_arrow(&mut state, Vec2::new(0.0, 10.0));
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 200);
        assert_eq!(state.round, 2);
        assert_eq!(state.misses, 0);
        assert!(!state.arrow.flying);
        assert_eq!(state.arrow.pos, state.bow.pos);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::TargetHit { points: 200, .. }]
        ));
        let msg = state.visible_result().expect("result shown");
        assert_eq!(msg.kind, ResultKind::Bullseye);
        assert_eq!(msg.text, "BULLSEYE!\n+200");
    }

    #[test]
    fn test_round_delay() {
        let mut state = playing_state();
        place_arrow(&mut state, Vec2::new(0.0, 40.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 50);
        assert_eq!(state.phase, GamePhase::Shooting);

        for _ in 0..ROUND_DELAY_TICKS - 1 {
            let events = tick(&mut state, &shoot_input());
            assert!(events.is_empty());
            assert_eq!(state.phase, GamePhase::Shooting);
            assert!(!state.arrow.flying);
        }

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::RoundReady { round: 2 }]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.can_shoot());
        // The result message expires together with the delay
        assert!(state.visible_result().is_none());
    }

    #[test]
    fn test_round_difficulty_applied() {
        let mut state = playing_state();
        for round in 2..=6 {
            place_arrow(&mut state, Vec2::new(0.0, 80.0));
            tick(&mut state, &TickInput::default());
            assert_eq!(state.round, round);
            assert_eq!(state.target.distance, 250.0 + (round - 1) as f32 * 50.0);
            assert!((state.aim.speed - aim_speed_for_round(round)).abs() < 1e-7);
        }
        assert_eq!(state.target.distance, 500.0);
        assert!((state.target.move_speed - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_fifth_miss_ends_game() {
        let mut state = playing_state();
        for expected in 1..MAX_MISSES {
            let events = miss_once(&mut state);
            assert_eq!(state.misses, expected);
            assert_ne!(state.phase, GamePhase::GameOver);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        }

        let events = miss_once(&mut state);
        assert_eq!(state.misses, MAX_MISSES);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.round, 5);
        assert!(state.round_ready_at.is_none());
        assert!(matches!(
            events.as_slice(),
            [
                GameEvent::Missed { misses: 5, .. },
                GameEvent::GameOver { score: 0, round: 5, best: 0, new_best: false }
            ]
        ));

        // Nothing moves after game over, shooting does nothing
        let aim = state.aim;
        let events = tick(&mut state, &shoot_input());
        assert!(events.is_empty());
        assert_eq!(state.aim, aim);
        assert_eq!(state.misses, MAX_MISSES);
    }

    #[test]
    fn test_game_over_updates_best_only_when_beaten() {
        let mut state = GameState::new(Field::new(600.0, 600.0), 100);
        state.start();
        place_arrow(&mut state, Vec2::ZERO);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 200);

        let mut last = Vec::new();
        while state.phase != GamePhase::GameOver {
            last = miss_once(&mut state);
        }
        assert!(last.contains(&GameEvent::GameOver {
            score: 200,
            round: 6,
            best: 200,
            new_best: true
        }));
        assert_eq!(state.best_score, 200);

        // A worse second game leaves the best alone
        tick(&mut state, &TickInput { restart: true, ..Default::default() });
        while state.phase != GamePhase::GameOver {
            last = miss_once(&mut state);
        }
        assert!(last.contains(&GameEvent::GameOver {
            score: 0,
            round: 5,
            best: 200,
            new_best: false
        }));
    }

    #[test]
    fn test_restart_matches_first_start() {
        let mut fresh = GameState::new(Field::new(600.0, 600.0), 0);
        tick(&mut fresh, &TickInput { start: true, ..Default::default() });

        let mut state = playing_state();
        place_arrow(&mut state, Vec2::ZERO);
        tick(&mut state, &TickInput::default());
        while state.phase != GamePhase::GameOver {
            miss_once(&mut state);
        }
        let events = tick(&mut state, &TickInput { restart: true, ..Default::default() });
        assert_eq!(events, vec![GameEvent::SessionStarted]);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, fresh.score);
        assert_eq!(state.round, fresh.round);
        assert_eq!(state.misses, fresh.misses);
        assert_eq!(state.aim, fresh.aim);
        assert_eq!(state.arrow, fresh.arrow);
        assert_eq!(state.target, fresh.target);
        assert!(state.result.is_none());
        assert!(state.round_ready_at.is_none());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();

        for i in 0..600 {
            let input = TickInput {
                shoot: i % 37 == 0,
                ..Default::default()
            };
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.round, state2.round);
        assert_eq!(state1.aim, state2.aim);
    }

    proptest! {
        #[test]
        fn prop_session_invariants(shots in proptest::collection::vec(any::<bool>(), 1..1500)) {
            let mut state = playing_state();
            for shoot in shots {
                let (score, round) = (state.score, state.round);
                let events = tick(&mut state, &TickInput { shoot, ..Default::default() });

                prop_assert!(state.score >= score);
                prop_assert!(state.round >= round);
                prop_assert!(state.misses <= MAX_MISSES);
                prop_assert!(state.aim.angle.abs() <= AIM_RANGE);
                if state.phase != GamePhase::GameOver {
                    prop_assert!(state.misses < MAX_MISSES);
                }
                if state.arrow.flying {
                    prop_assert_eq!(state.phase, GamePhase::Shooting);
                }
                let resolved = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::TargetHit { .. } | GameEvent::Missed { .. }))
                    .count();
                prop_assert!(resolved <= 1);
            }
        }
    }
}
