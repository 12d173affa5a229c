//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The manager is built by the host and handed the simulation's signals;
//! nothing in `sim` knows it exists.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{GameEvent, SignalSink};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Tap opened
    PourStart,
    /// Tap closed
    PourStop,
    /// Released inside the perfect band
    Perfect,
    /// Glass dumped
    BadPour,
    /// Glass overflowed
    Spill,
    /// Spill penalty over
    Unlock,
}

impl SoundEffect {
    /// Sound for a simulation signal
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::PourStarted { .. } => SoundEffect::PourStart,
            GameEvent::PourStopped { .. } => SoundEffect::PourStop,
            GameEvent::Perfect { .. } => SoundEffect::Perfect,
            GameEvent::BadPour { .. } => SoundEffect::BadPour,
            GameEvent::Spill { .. } => SoundEffect::Spill,
            GameEvent::LockReleased { .. } => SoundEffect::Unlock,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volumes and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PourStart => self.play_pour_start(ctx, vol),
            SoundEffect::PourStop => self.play_pour_stop(ctx, vol),
            SoundEffect::Perfect => self.play_perfect(ctx, vol),
            SoundEffect::BadPour => self.play_bad_pour(ctx, vol),
            SoundEffect::Spill => self.play_spill(ctx, vol),
            SoundEffect::Unlock => self.play_unlock(ctx, vol),
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

    /// Pour start - tap valve opening, low gurgle rising
    fn play_pour_start(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Valve clunk
        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        // Gurgle
        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.2, t + 0.05)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency().set_value_at_time(240.0, t + 0.06).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.12).ok();
            osc.frequency().set_value_at_time(280.0, t + 0.18).ok();
            osc.frequency().set_value_at_time(230.0, t + 0.24).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }

    /// Pour stop - short valve click
    fn play_pour_stop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Perfect - bright ding with shimmer
    fn play_perfect(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1320.0, 1980.0, 2640.0].iter().enumerate() {
            let delay = i as f64 * 0.02;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.7).ok();
            }
        }
    }

    /// Bad pour - glass dumped, sad descending blip
    fn play_bad_pour(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 300.0].iter().enumerate() {
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Spill - splashy crackle and a low slosh
    fn play_spill(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Splash: frequency jumps read as noise
        if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency().set_value_at_time(2400.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(600.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.07).ok();
            osc.frequency().set_value_at_time(400.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.14).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.2).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.32).ok();
        }

        // Slosh
        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }
    }

    /// Unlock - soft ping
    fn play_unlock(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }
}

impl SignalSink for AudioManager {
    fn signal(&mut self, event: GameEvent) {
        self.play(SoundEffect::for_event(&event));
    }
}
