//! Listener pose and positional emitters.

use crate::{
    clip::Sound,
    settings::SoundSettings,
};
use std::fmt::{self, Formatter, Debug};
use rodio::{
    OutputStream,
    OutputStreamHandle,
    SpatialSink,
};
use slab::Slab;
use vek::*;
use anyhow::*;


/// Pose of the listening head.
///
/// Plain state with no backend coupling. A `SoundSpace` owns one and
/// forwards the derived ear positions to its sinks; it also works
/// standalone wherever "where are the ears" math is needed.
#[derive(Debug, Clone)]
pub struct Listener {
    pub position: Vec3<f32>,
    pub velocity: Vec3<f32>,
    pub forward: Vec3<f32>,
    pub up: Vec3<f32>,
}

impl Listener {
    /// Listener at the origin at rest, facing -z with +y up.
    pub fn new() -> Self {
        Listener {
            position: Vec3::zero(),
            velocity: Vec3::zero(),
            forward: -Vec3::unit_z(),
            up: Vec3::unit_y(),
        }
    }

    /// Left and right ear positions, `spacing` apart, centered on
    /// `position` along the ear axis.
    pub fn ear_positions(&self, spacing: f32) -> [Vec3<f32>; 2] {
        let half = self.ear_axis() * (spacing / 2.0);
        [self.position - half, self.position + half]
    }

    /// Unit vector from the left ear toward the right ear,
    /// `forward` × `up` normalized.
    ///
    /// Forward and up need not be unit length. If they fail to span a
    /// plane (either zero, or parallel) the axis falls back to +x.
    fn ear_axis(&self) -> Vec3<f32> {
        let axis = self.forward.cross(self.up);
        let magnitude = axis.magnitude();
        if magnitude > 1e-6 {
            axis / magnitude
        } else {
            Vec3::unit_x()
        }
    }

    /// Integrate position by velocity over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl Default for Listener {
    fn default() -> Self {
        Listener::new()
    }
}


/// Key of an emitter within a `SoundSpace`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EmitterId(pub usize);

struct Emitter {
    sink: SpatialSink,
    position: Vec3<f32>,
    velocity: Vec3<f32>,
}

/// Positional audio space: one listener, any number of emitters, one
/// output stream.
///
/// The backend's spatial sinks do the actual positioning. This wrapper
/// just stores poses and forwards the derived positions, emitter position
/// plus both ear positions, to every sink whenever a pose changes.
pub struct SoundSpace {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    listener: Listener,
    ear_spacing: f32,
    master_volume: f32,
    emitters: Slab<Emitter>,
}

impl SoundSpace {
    /// Open the default output device with default settings.
    pub fn new() -> Result<Self> {
        Self::with_settings(&SoundSettings::default())
    }

    /// Open the default output device, applying `settings`.
    pub fn with_settings(settings: &SoundSettings) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(SoundSpace {
            _stream: stream,
            stream_handle,
            listener: Listener::new(),
            ear_spacing: settings.ear_spacing,
            master_volume: settings.master_volume,
            emitters: Slab::new(),
        })
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Create an emitter at rest at `at`, returning the id that now keys
    /// it. Ids of removed emitters may be reused.
    pub fn add_emitter(&mut self, at: Vec3<f32>) -> Result<EmitterId> {
        let [left, right] = self.listener.ear_positions(self.ear_spacing);
        let sink = SpatialSink::try_new(
            &self.stream_handle,
            at.into_array(),
            left.into_array(),
            right.into_array(),
        )?;
        sink.set_volume(self.master_volume);
        let id = EmitterId(self.emitters.insert(Emitter {
            sink,
            position: at,
            velocity: Vec3::zero(),
        }));
        debug!(id = id.0, "added sound emitter");
        Ok(id)
    }

    /// Remove an emitter, cutting off whatever it was playing. Returns
    /// whether `id` named a live emitter.
    pub fn remove_emitter(&mut self, id: EmitterId) -> bool {
        let emitter = self.emitters.try_remove(id.0);
        if emitter.is_some() {
            debug!(id = id.0, "removed sound emitter");
        }
        emitter.is_some()
    }

    /// Queue a clip on an emitter, after whatever it is already playing.
    /// Playing on a dead id is logged and dropped.
    pub fn play(&self, id: EmitterId, sound: &Sound) {
        match self.emitters.get(id.0) {
            Some(emitter) => emitter.sink.append(sound.0.clone()),
            None => warn!(id = id.0, "play on dead sound emitter"),
        }
    }

    pub fn set_emitter_position(&mut self, id: EmitterId, position: Vec3<f32>) {
        if let Some(emitter) = self.emitters.get_mut(id.0) {
            emitter.position = position;
            emitter.sink.set_emitter_position(position.into_array());
        }
    }

    /// Set the velocity an emitter's position extrapolates by in `tick`.
    pub fn set_emitter_velocity(&mut self, id: EmitterId, velocity: Vec3<f32>) {
        if let Some(emitter) = self.emitters.get_mut(id.0) {
            emitter.velocity = velocity;
        }
    }

    pub fn set_listener_position(&mut self, position: Vec3<f32>) {
        self.listener.position = position;
        self.forward_ears();
    }

    pub fn set_listener_velocity(&mut self, velocity: Vec3<f32>) {
        self.listener.velocity = velocity;
    }

    pub fn set_listener_orientation(&mut self, forward: Vec3<f32>, up: Vec3<f32>) {
        self.listener.forward = forward;
        self.listener.up = up;
        self.forward_ears();
    }

    /// Advance the listener and every emitter by their velocities over
    /// `dt` seconds and re-forward the moved positions to the sinks.
    ///
    /// The backend takes no velocity input, so this extrapolation between
    /// explicit position updates is how velocity is heard.
    pub fn tick(&mut self, dt: f32) {
        self.listener.advance(dt);
        let [left, right] = self.listener.ear_positions(self.ear_spacing);
        for (_, emitter) in self.emitters.iter_mut() {
            emitter.position += emitter.velocity * dt;
            emitter.sink.set_emitter_position(emitter.position.into_array());
            emitter.sink.set_left_ear_position(left.into_array());
            emitter.sink.set_right_ear_position(right.into_array());
        }
    }

    /// Scale the volume of every emitter, current and future.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume;
        for (_, emitter) in self.emitters.iter() {
            emitter.sink.set_volume(volume);
        }
    }

    fn forward_ears(&self) {
        let [left, right] = self.listener.ear_positions(self.ear_spacing);
        for (_, emitter) in self.emitters.iter() {
            emitter.sink.set_left_ear_position(left.into_array());
            emitter.sink.set_right_ear_position(right.into_array());
        }
    }
}

impl Debug for SoundSpace {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("SoundSpace(..)")
    }
}


#[test]
fn default_listener_ears_straddle_x() {
    let listener = Listener::new();
    let [left, right] = listener.ear_positions(0.2);
    assert!((left - Vec3::new(-0.1, 0.0, 0.0)).magnitude() < 1e-6);
    assert!((right - Vec3::new(0.1, 0.0, 0.0)).magnitude() < 1e-6);
}

#[test]
fn ears_follow_orientation() {
    let mut listener = Listener::new();
    // face +x; the right ear swings to +z
    listener.forward = Vec3::unit_x();
    let [left, right] = listener.ear_positions(2.0);
    assert!((left - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
    assert!((right - Vec3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);

    // non-unit forward and up still give a unit ear axis
    listener.forward = Vec3::new(-3.0, 0.0, 0.0);
    listener.up = Vec3::new(0.0, 2.0, 0.0);
    let [left, right] = listener.ear_positions(2.0);
    assert!((left - Vec3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
    assert!((right - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
}

#[test]
fn degenerate_orientation_falls_back_to_x() {
    let mut listener = Listener::new();
    listener.forward = Vec3::unit_y();
    listener.up = Vec3::unit_y();
    let [left, right] = listener.ear_positions(2.0);
    assert_eq!(left, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(right, Vec3::new(1.0, 0.0, 0.0));

    listener.forward = Vec3::zero();
    listener.up = Vec3::zero();
    let [left, right] = listener.ear_positions(2.0);
    assert_eq!(left, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(right, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn ears_centered_on_position() {
    let mut listener = Listener::new();
    listener.position = Vec3::new(10.0, -4.0, 5.5);
    let [left, right] = listener.ear_positions(0.5);
    assert_eq!((left + right) / 2.0, listener.position);
    assert!(((right - left).magnitude() - 0.5).abs() < 1e-6);
}

#[test]
fn advance_integrates_velocity() {
    let mut listener = Listener::new();
    listener.position = Vec3::new(1.0, 2.0, 3.0);
    listener.velocity = Vec3::new(0.5, 0.0, -2.0);
    listener.advance(2.0);
    assert_eq!(listener.position, Vec3::new(2.0, 2.0, -1.0));
    listener.advance(0.0);
    assert_eq!(listener.position, Vec3::new(2.0, 2.0, -1.0));
}
