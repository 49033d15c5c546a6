//! Sound effects
//!
//! The player asks an [`Audio`] backend for its effects once, at construction,
//! and owns the returned handles until it is dropped. Backends never fail to
//! hand out a handle: a sound that cannot be produced plays as silence.

use std::io::Write;

#[cfg(feature = "synth")]
pub mod synth;

#[cfg(feature = "synth")]
pub use synth::Synth;

/// The effects the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Played when an apple is eaten
    Grow,
    /// Played when the snake dies
    Ouch,
}

/// A loaded sound; released when dropped
pub trait Sound {
    /// Playback speed multiplier, 1.0 is the original pitch
    fn set_pitch(&mut self, pitch: f32);

    fn play(&mut self);
}

/// Something that can load sounds
pub trait Audio {
    fn load(&mut self, effect: Effect) -> Box<dyn Sound>;
}

/// Backend that never makes a sound
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

struct SilentSound;

impl Sound for SilentSound {
    fn set_pitch(&mut self, _pitch: f32) {}

    fn play(&mut self) {}
}

impl Audio for Silent {
    fn load(&mut self, _effect: Effect) -> Box<dyn Sound> {
        Box::new(SilentSound)
    }
}

/// Rings the terminal bell on death; everything else is silent
#[derive(Debug, Default, Clone, Copy)]
pub struct Bell;

struct BellSound;

impl Sound for BellSound {
    fn set_pitch(&mut self, _pitch: f32) {}

    fn play(&mut self) {
        let mut stderr = std::io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            tracing::warn!(?err, "failed to ring terminal bell");
        }
    }
}

impl Audio for Bell {
    fn load(&mut self, effect: Effect) -> Box<dyn Sound> {
        match effect {
            Effect::Ouch => Box::new(BellSound),
            Effect::Grow => Box::new(SilentSound),
        }
    }
}
