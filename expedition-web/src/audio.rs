//! Sound effects synthesized with the Web Audio API.

use std::cell::RefCell;

use expedition_game::{AudioCue, AudioNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator blip, relative to the moment the cue fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub wave: Wave,
    pub offset_secs: f64,
    pub duration_secs: f64,
}

const fn tone(frequency: f32, wave: Wave, offset_secs: f64, duration_secs: f64) -> Tone {
    Tone {
        frequency,
        wave,
        offset_secs,
        duration_secs,
    }
}

/// The tones that make up `cue`.
#[must_use]
pub fn tones(cue: AudioCue) -> Vec<Tone> {
    match cue {
        // A die click, then four footsteps.
        AudioCue::Move => vec![
            tone(600.0, Wave::Square, 0.0, 0.05),
            tone(110.0, Wave::Triangle, 0.0, 0.2),
            tone(125.0, Wave::Triangle, 0.15, 0.2),
            tone(115.0, Wave::Triangle, 0.3, 0.2),
            tone(130.0, Wave::Triangle, 0.45, 0.2),
        ],
        AudioCue::Success => [440.0, 554.0, 659.0]
            .into_iter()
            .enumerate()
            .map(|(i, f)| tone(f, Wave::Sine, step(i, 0.1), 0.3))
            .collect(),
        AudioCue::Failure => [200.0, 150.0, 100.0]
            .into_iter()
            .enumerate()
            .map(|(i, f)| tone(f, Wave::Sawtooth, step(i, 0.15), 0.4))
            .collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn step(index: usize, spacing: f64) -> f64 {
    index as f64 * spacing
}

/// Plays cues through a lazily created `AudioContext`. Browsers refuse to
/// start audio before the first user gesture; those cues are dropped.
#[derive(Default)]
pub struct WebAudioNotifier {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    context: RefCell<Option<web_sys::AudioContext>>,
}

impl WebAudioNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_arch = "wasm32")]
impl WebAudioNotifier {
    fn play(&self, cue: AudioCue) -> Result<(), wasm_bindgen::JsValue> {
        use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};

        let mut slot = self.context.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioContext::new()?);
        }
        let Some(ctx) = slot.as_ref() else {
            return Ok(());
        };
        let now = ctx.current_time();
        for t in tones(cue) {
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.set_type(match t.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            let start = now + t.offset_secs;
            let stop = start + t.duration_secs;
            osc.frequency().set_value_at_time(t.frequency, start)?;
            gain.gain().set_value_at_time(0.1, start)?;
            gain.gain().exponential_ramp_to_value_at_time(0.0001, stop)?;
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            AudioScheduledSourceNode::start_with_when(&osc, start)?;
            AudioScheduledSourceNode::stop_with_when(&osc, stop)?;
        }
        Ok(())
    }
}

impl AudioNotifier for WebAudioNotifier {
    fn notify(&self, cue: AudioCue) {
        #[cfg(target_arch = "wasm32")]
        if let Err(err) = self.play(cue) {
            log::warn!(
                "audio cue {cue:?} skipped: {}",
                crate::dom::js_error_message(&err)
            );
        }
        #[cfg(not(target_arch = "wasm32"))]
        log::trace!("audio cue {cue:?}");
    }
}
