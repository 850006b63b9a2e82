//! Scene building
//!
//! Pure projection of a [`GameState`] into a triangle list in canvas pixel
//! space. Nothing here mutates the game.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::shapes;
use super::vertex::{Vertex, colors, hex};
use crate::consts::AIM_GUIDE_LENGTH;
use crate::sim::{GamePhase, GameState};
use crate::{Settings, heading_angle, heading_vector};

const CIRCLE_SEGMENTS: u32 = 64;
const GROUND_HEIGHT: f32 = 20.0;
const GRASS_HEIGHT: f32 = 5.0;
const RING_OUTLINE_WIDTH: f32 = 2.0;
const STAND_WIDTH: f32 = 10.0;
const BOW_RADIUS: f32 = 30.0;
const BOW_THICKNESS: f32 = 6.0;

/// Build the full frame for the current state
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    backdrop(&mut out, state);

    if matches!(state.phase, GamePhase::Start | GamePhase::GameOver) {
        return out;
    }

    target(&mut out, state);
    bow(&mut out, state);
    arrow(&mut out, state);

    if settings.aim_guide && state.is_aiming() && state.phase == GamePhase::Playing {
        aim_guide(&mut out, state);
    }

    out
}

/// Sky gradient and ground strip
fn backdrop(out: &mut Vec<Vertex>, state: &GameState) {
    let (w, h) = (state.field.width, state.field.height);

    shapes::vertical_gradient(
        out,
        0.0,
        0.0,
        w,
        h,
        hex(colors::SKY_TOP, 1.0),
        hex(colors::SKY_BOTTOM, 1.0),
    );
    shapes::rect(out, 0.0, h - GROUND_HEIGHT, w, GROUND_HEIGHT, hex(colors::DIRT, 1.0));
    shapes::rect(out, 0.0, h - GROUND_HEIGHT, w, GRASS_HEIGHT, hex(colors::GRASS, 1.0));
}

/// Rings widest first so each smaller ring lands on top, then the stand post
fn target(out: &mut Vec<Vertex>, state: &GameState) {
    let target = &state.target;
    let outline = hex(colors::RING_OUTLINE, 1.0);
    let half = RING_OUTLINE_WIDTH / 2.0;

    for (radius, color) in target.rings.iter().zip(colors::RINGS) {
        shapes::circle(out, target.pos, *radius, hex(color, 1.0), CIRCLE_SEGMENTS);
        shapes::ring(out, target.pos, radius - half, radius + half, outline, CIRCLE_SEGMENTS);
    }

    shapes::rect(
        out,
        target.pos.x - STAND_WIDTH / 2.0,
        target.pos.y,
        STAND_WIDTH,
        state.field.height - target.pos.y,
        hex(colors::STAND, 1.0),
    );
}

/// Bow limb (lower arc of the pivot circle) and string, turned by the aim angle
fn bow(out: &mut Vec<Vertex>, state: &GameState) {
    let first = out.len();
    let half = BOW_THICKNESS / 2.0;

    shapes::arc_band(
        out,
        Vec2::ZERO,
        BOW_RADIUS - half,
        BOW_RADIUS + half,
        PI / 6.0,
        PI - PI / 6.0,
        hex(colors::BOW_WOOD, 1.0),
        24,
    );
    shapes::line(
        out,
        Vec2::new(25.0, -15.0),
        Vec2::new(25.0, 15.0),
        2.0,
        hex(colors::BOW_STRING, 1.0),
    );

    shapes::place(out, first, state.bow.pos, state.aim.angle);
}

/// Arrow along its velocity while flying, along the aim while nocked
fn arrow(out: &mut Vec<Vertex>, state: &GameState) {
    let arrow = &state.arrow;
    let (origin, angle) = if arrow.flying {
        (arrow.pos, heading_angle(arrow.vel))
    } else {
        (state.bow.pos, state.aim.angle)
    };

    let first = out.len();
    let len = arrow.length;

    shapes::line(out, Vec2::ZERO, Vec2::new(0.0, -len), 4.0, hex(colors::SHAFT, 1.0));
    shapes::triangle(
        out,
        Vec2::new(0.0, -len),
        Vec2::new(-5.0, -len + 10.0),
        Vec2::new(5.0, -len + 10.0),
        hex(colors::ARROW_HEAD, 1.0),
    );
    shapes::rect(out, -3.0, 0.0, 6.0, 8.0, hex(colors::FLETCHING, 1.0));

    shapes::place(out, first, origin, normalize(angle));
}

/// Dashed trajectory hint straight out of the bow
fn aim_guide(out: &mut Vec<Vertex>, state: &GameState) {
    let from = state.bow.pos;
    let to = from + heading_vector(state.aim.angle) * AIM_GUIDE_LENGTH;
    shapes::dashed_line(
        out,
        from,
        to,
        2.0,
        5.0,
        5.0,
        hex(colors::AIM_GUIDE, colors::AIM_GUIDE_ALPHA),
    );
}

fn normalize(angle: f32) -> f32 {
    if angle.is_finite() { angle % TAU } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Field, TickInput, tick};

    fn state() -> GameState {
        GameState::new(Field::new(600.0, 600.0), 0)
    }

    fn guide_color() -> [f32; 4] {
        hex(colors::AIM_GUIDE, colors::AIM_GUIDE_ALPHA)
    }

    fn has_color(scene: &[Vertex], color: [f32; 4]) -> bool {
        scene.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_start_screen_draws_backdrop_only() {
        let scene = build_scene(&state(), &Settings::default());
        // Sky + dirt + grass
        assert_eq!(scene.len(), 18);
        assert!(!has_color(&scene, hex(colors::STAND, 1.0)));
    }

    #[test]
    fn test_game_over_draws_backdrop_only() {
        let mut state = state();
        state.start();
        state.phase = GamePhase::GameOver;
        assert_eq!(build_scene(&state, &Settings::default()).len(), 18);
    }

    #[test]
    fn test_playing_draws_range_and_guide() {
        let mut state = state();
        state.start();
        let scene = build_scene(&state, &Settings::default());
        assert!(scene.len() > 18);
        assert!(has_color(&scene, hex(colors::STAND, 1.0)));
        assert!(has_color(&scene, hex(colors::RINGS[4], 1.0)));
        assert!(has_color(&scene, hex(colors::ARROW_HEAD, 1.0)));
        assert!(has_color(&scene, guide_color()));
    }

    #[test]
    fn test_guide_hidden_in_flight_and_when_disabled() {
        let mut state = state();
        state.start();

        let settings = Settings {
            aim_guide: false,
            ..Default::default()
        };
        assert!(!has_color(&build_scene(&state, &settings), guide_color()));

        tick(&mut state, &TickInput { shoot: true, ..Default::default() });
        assert!(state.arrow.flying);
        assert!(!has_color(&build_scene(&state, &Settings::default()), guide_color()));
    }

    #[test]
    fn test_bullseye_drawn_last_among_rings() {
        let mut state = state();
        state.start();
        let scene = build_scene(&state, &Settings::default());
        let gold = hex(colors::RINGS[4], 1.0);
        let white = hex(colors::RINGS[0], 1.0);
        let last_white = scene.iter().rposition(|v| v.color == white).unwrap();
        let first_gold = scene.iter().position(|v| v.color == gold).unwrap();
        assert!(first_gold > last_white);
    }

    #[test]
    fn test_flying_arrow_drawn_at_arrow_position() {
        let mut state = state();
        state.start();
        for _ in 0..5 {
            tick(&mut state, &TickInput { shoot: true, ..Default::default() });
        }
        assert!(state.arrow.flying);
        let scene = build_scene(&state, &Settings::default());
        let head = hex(colors::ARROW_HEAD, 1.0);
        let head_vertices: Vec<_> = scene.iter().filter(|v| v.color == head).collect();
        assert_eq!(head_vertices.len(), 3);
        assert!(head_vertices
            .iter()
            .all(|v| Vec2::from(v.position).distance(state.arrow.pos) <= state.arrow.length + 1e-3));
    }
}
