//! Player feedback: haptics and sound cues
//!
//! Vibration goes through `navigator.vibrate`, sounds are procedurally
//! generated with the Web Audio API. Both are best effort; a browser without
//! either simply stays quiet.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;
use crate::consts::{HIT_VIBRATION_MS, RELEASE_VIBRATION_MS};
use crate::platform;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Bowstring twang
    Release,
    /// Arrow thuds into a ring
    Hit,
    /// Arrow finds the gold
    Bullseye,
    /// Arrow sails past
    Miss,
    /// Out of misses
    GameOver,
}

/// Feedback manager for the game
pub struct Feedback {
    ctx: Option<AudioContext>,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound disabled");
        }
        Self { ctx }
    }

    /// React to the events of one tick
    pub fn on_event(&self, event: &GameEvent, settings: &Settings) {
        match event {
            GameEvent::ShotReleased { .. } => {
                self.vibrate(RELEASE_VIBRATION_MS, settings);
                self.play(Cue::Release, settings);
            }
            GameEvent::TargetHit { ring, .. } => {
                self.vibrate(HIT_VIBRATION_MS, settings);
                let cue = if ring.is_bullseye() { Cue::Bullseye } else { Cue::Hit };
                self.play(cue, settings);
            }
            GameEvent::Missed { .. } => self.play(Cue::Miss, settings),
            GameEvent::GameOver { .. } => self.play(Cue::GameOver, settings),
            GameEvent::SessionStarted | GameEvent::RoundReady { .. } => {}
        }
    }

    fn vibrate(&self, duration_ms: u32, settings: &Settings) {
        if settings.haptics {
            platform::vibrate(duration_ms);
        }
    }

    /// Play a sound cue
    pub fn play(&self, cue: Cue, settings: &Settings) {
        let vol = settings.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Release => self.sweep(ctx, vol * 0.4, OscillatorType::Triangle, 220.0, 110.0, 0.12),
            Cue::Hit => self.sweep(ctx, vol * 0.6, OscillatorType::Sine, 180.0, 70.0, 0.15),
            Cue::Bullseye => {
                for (i, freq) in [523.25, 659.25, 783.99].into_iter().enumerate() {
                    self.note(ctx, vol * 0.35, freq, i as f64 * 0.08, 0.2);
                }
            }
            Cue::Miss => self.sweep(ctx, vol * 0.3, OscillatorType::Sawtooth, 300.0, 120.0, 0.25),
            Cue::GameOver => {
                for (i, freq) in [392.0, 311.13, 261.63].into_iter().enumerate() {
                    self.note(ctx, vol * 0.3, freq, i as f64 * 0.18, 0.3);
                }
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Pitch sweep with a fast decay
    fn sweep(
        &self,
        ctx: &AudioContext,
        vol: f32,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        duration: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }

    /// Single sine note starting `delay` seconds from now
    fn note(&self, ctx: &AudioContext, vol: f32, freq: f32, delay: f64, duration: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }
}
