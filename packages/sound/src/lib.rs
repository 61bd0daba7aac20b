//! Positional audio on top of the system output device.
//!
//! `Sound` is a decoded clip and `SoundPlayer` plays clips flat. For
//! positional playback, `SoundSpace` holds one listener pose and any number
//! of emitters and forwards every derived position straight to the
//! backend's spatial sinks. No mixing or DSP happens in this crate.

#[macro_use]
extern crate tracing;

pub mod clip;
pub mod spatial;
pub mod settings;

pub use crate::{
    clip::{
        Sound,
        SoundPlayer,
    },
    spatial::{
        Listener,
        EmitterId,
        SoundSpace,
    },
    settings::SoundSettings,
};
