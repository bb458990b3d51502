//! Web Audio sound effects
//!
//! Every effect is a short list of synthesized tones, so there are no sound
//! files to fetch or fail on.

use web_sys::{AudioContext, OscillatorType};

use crate::frontend::AudioSink;
use crate::sim::SoundEffect;

/// One oscillator note with an exponential fade-out
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Pitch to glide to over the note, if any
    glide_to: Option<f32>,
    /// Seconds after the effect starts
    offset: f64,
    length: f64,
    /// Peak gain before master volume
    level: f32,
    wave: OscillatorType,
}

impl Tone {
    const fn note(freq: f32, offset: f64, length: f64, level: f32, wave: OscillatorType) -> Self {
        Self {
            freq,
            glide_to: None,
            offset,
            length,
            level,
            wave,
        }
    }

    const fn glide(mut self, to: f32) -> Self {
        self.glide_to = Some(to);
        self
    }
}

/// Evenly spaced notes of the same shape
fn arpeggio(freqs: &[f32], spacing: f64, length: f64, level: f32, wave: OscillatorType) -> Vec<Tone> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| Tone::note(freq, i as f64 * spacing, length, level, wave))
        .collect()
}

fn tones_for(effect: SoundEffect) -> Vec<Tone> {
    use OscillatorType::{Sine, Square, Triangle};
    match effect {
        // Quick upward blip
        SoundEffect::Hop => vec![Tone::note(300.0, 0.0, 0.06, 0.15, Square).glide(600.0)],
        // Low thud plus a short metallic clang
        SoundEffect::Bonk => vec![
            Tone::note(160.0, 0.0, 0.25, 0.6, Sine).glide(50.0),
            Tone::note(900.0, 0.0, 0.08, 0.12, Square).glide(600.0),
        ],
        SoundEffect::GoalReached => {
            arpeggio(&[400.0, 500.0, 600.0, 800.0], 0.1, 0.4, 0.3, Triangle)
        }
        SoundEffect::GameOver => arpeggio(&[400.0, 350.0, 300.0, 200.0], 0.2, 0.3, 0.3, Sine),
        SoundEffect::PowerUp => {
            arpeggio(&[600.0, 800.0, 1000.0, 1200.0], 0.06, 0.15, 0.25, Sine)
        }
    }
}

/// Plays sound effects through a shared `AudioContext`
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Not available outside secure contexts
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("AudioContext unavailable, playing without sound");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Browsers keep the context suspended until a user gesture
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Flip mute; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn play_effect(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let start = ctx.current_time();
        for tone in tones_for(effect) {
            if self.play_tone(ctx, start, tone).is_none() {
                log::debug!("Dropped a {:?} tone", effect);
            }
        }
    }

    fn play_tone(&self, ctx: &AudioContext, start: f64, tone: Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(tone.wave);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = start + tone.offset;
        let end = t + tone.length;

        let freq = osc.frequency();
        freq.set_value_at_time(tone.freq, t).ok()?;
        if let Some(to) = tone.glide_to {
            freq.exponential_ramp_to_value_at_time(to, end).ok()?;
        }

        let envelope = gain.gain();
        envelope.set_value_at_time(tone.level * self.volume, t).ok()?;
        envelope.exponential_ramp_to_value_at_time(0.01, end).ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.05).ok()?;
        Some(())
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        self.play_effect(effect);
    }
}
