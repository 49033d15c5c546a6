//! Generated tones through the default output device

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

use super::{Audio, Effect, Sound};

/// Base frequency and length of each effect
fn tone(effect: Effect) -> (f32, f32) {
    match effect {
        Effect::Grow => (660.0, 0.08),
        Effect::Ouch => (110.0, 0.35),
    }
}

#[derive(Default)]
struct Voice {
    frequency: f32,
    phase: f32,
    remaining: usize,
}

/// Square-wave synthesizer feeding one shared voice
pub struct Synth {
    voice: Arc<Mutex<Voice>>,
    sample_rate: f32,
    _stream: cpal::Stream,
}

impl Synth {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No audio output device"))?;
        let supported = device
            .default_output_config()
            .context("Failed to query output config")?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(anyhow!(
                "Unsupported sample format {:?}",
                supported.sample_format()
            ));
        }

        let config: cpal::StreamConfig = supported.into();
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0 as f32;
        let voice = Arc::new(Mutex::new(Voice::default()));

        let shared = Arc::clone(&voice);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    let Ok(mut voice) = shared.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        let sample = if voice.remaining > 0 {
                            voice.remaining -= 1;
                            voice.phase = (voice.phase + voice.frequency / sample_rate) % 1.0;
                            if (voice.phase * TAU).sin() >= 0.0 {
                                0.15
                            } else {
                                -0.15
                            }
                        } else {
                            0.0
                        };
                        frame.fill(sample);
                    }
                },
                |err| tracing::warn!(%err, "audio stream error"),
                None,
            )
            .context("Failed to build output stream")?;
        stream.play().context("Failed to start output stream")?;

        Ok(Self {
            voice,
            sample_rate,
            _stream: stream,
        })
    }
}

struct SynthSound {
    effect: Effect,
    pitch: f32,
    sample_rate: f32,
    voice: Arc<Mutex<Voice>>,
}

impl Sound for SynthSound {
    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn play(&mut self) {
        let (frequency, seconds) = tone(self.effect);
        if let Ok(mut voice) = self.voice.lock() {
            voice.frequency = frequency * self.pitch;
            voice.remaining = (seconds * self.sample_rate) as usize;
        }
    }
}

impl Drop for SynthSound {
    fn drop(&mut self) {
        tracing::debug!(effect = ?self.effect, "released sound");
    }
}

impl Audio for Synth {
    fn load(&mut self, effect: Effect) -> Box<dyn Sound> {
        Box::new(SynthSound {
            effect,
            pitch: 1.0,
            sample_rate: self.sample_rate,
            voice: Arc::clone(&self.voice),
        })
    }
}
