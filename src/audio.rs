//! Audio cues using the Web Audio API
//!
//! Procedurally generated blips - no sound files to load.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::driver::{AudioSink, SinkError, SoundCue};

/// Web Audio backed sound player
pub struct WebAudio {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Flip mute, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio muted: {}", self.muted);
        self.muted
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), SinkError> {
        let osc = ctx.create_oscillator().map_err(audio_err)?;
        let gain = ctx.create_gain().map_err(audio_err)?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).map_err(audio_err)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(audio_err)?;

        Ok((osc, gain))
    }

    /// Jump - quick upward chirp
    fn play_jump(ctx: &AudioContext, vol: f32) -> Result<(), SinkError> {
        let (osc, gain) = Self::create_osc(ctx, 250.0, OscillatorType::Square)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).map_err(audio_err)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .map_err(audio_err)?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.12)
            .map_err(audio_err)?;

        osc.start().map_err(audio_err)?;
        osc.stop_with_when(t + 0.18).map_err(audio_err)
    }

    /// Speed up - two rising notes
    fn play_speed_up(ctx: &AudioContext, vol: f32) -> Result<(), SinkError> {
        for (i, freq) in [600.0, 900.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + i as f64 * 0.08;
            gain.gain().set_value_at_time(vol * 0.2, t).map_err(audio_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .map_err(audio_err)?;
            osc.start_with_when(t).map_err(audio_err)?;
            osc.stop_with_when(t + 0.15).map_err(audio_err)?;
        }
        Ok(())
    }

    /// Game over - descending
    fn play_game_over(ctx: &AudioContext, vol: f32) -> Result<(), SinkError> {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + i as f64 * 0.2;
            gain.gain().set_value_at_time(vol * 0.3, t).map_err(audio_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .map_err(audio_err)?;
            osc.start_with_when(t).map_err(audio_err)?;
            osc.stop_with_when(t + 0.4).map_err(audio_err)?;
        }
        Ok(())
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: SoundCue) -> Result<(), SinkError> {
        if self.muted || self.volume <= 0.0 {
            return Ok(());
        }
        let ctx = self.ctx.as_ref().ok_or(SinkError::Unavailable)?;

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Jump => Self::play_jump(ctx, self.volume),
            SoundCue::SpeedUp => Self::play_speed_up(ctx, self.volume),
            SoundCue::GameOver => Self::play_game_over(ctx, self.volume),
        }
    }
}

fn audio_err(e: JsValue) -> SinkError {
    SinkError::Audio(format!("{:?}", e))
}
