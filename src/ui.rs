//! HUD projection
//!
//! Turns the game state into the values shown in the page's status fields.
//! The browser driver copies a [`HudView`] into the DOM after every frame.

use crate::consts::MAX_MISSES;
use crate::sim::{GamePhase, GameState, ResultKind};

pub const SHOOT_LABEL: &str = "TAP TO SHOOT";
pub const FLYING_LABEL: &str = "FLYING...";

/// CSS color for a result message
pub fn result_color(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Bullseye => "#FFD700",
        ResultKind::Hit => "#4ade80",
        ResultKind::Miss => "#ff6b6b",
    }
}

/// Result text currently on display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub text: String,
    pub color: &'static str,
}

/// Final numbers for the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryView {
    pub score: u32,
    pub round: u32,
    pub best: u32,
}

/// Everything the status display needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score: String,
    pub round: String,
    pub misses: String,
    pub max_misses: String,
    pub result: Option<ResultView>,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub show_start_screen: bool,
    /// Present only on the game-over screen
    pub summary: Option<SummaryView>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let result = state.visible_result().map(|msg| ResultView {
            text: msg.text.clone(),
            color: result_color(msg.kind),
        });

        // The button only re-arms once the post-shot delay is over
        let waiting = state.phase == GamePhase::Shooting;

        let summary = (state.phase == GamePhase::GameOver).then_some(SummaryView {
            score: state.score,
            round: state.round,
            best: state.best_score,
        });

        Self {
            score: state.score.to_string(),
            round: state.round.to_string(),
            misses: state.misses.to_string(),
            max_misses: MAX_MISSES.to_string(),
            result,
            button_label: if waiting { FLYING_LABEL } else { SHOOT_LABEL },
            button_enabled: !waiting,
            show_start_screen: state.phase == GamePhase::Start,
            summary,
        }
    }
}
