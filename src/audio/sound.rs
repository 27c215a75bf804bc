use std::collections::BTreeMap;
use std::fmt;

use crate::audio::properties::SoundProperties;
use crate::audio::{AudioContext, world_to_audio};
use crate::backend::{AudioSink, SoundBufferId, SoundParams, SourceId, SourceStatus};
use crate::foundation::core::Point;

/// Fire-and-forget sound effect player.
///
/// Effects are registered up front as a decoded buffer plus playback
/// properties under a caller-chosen id (typically an enum). Each `play` spawns
/// an independent source on the [`AudioSink`]; live handles are retained so
/// everything can be paused or stopped at once, and stopped sources are pruned
/// before each play.
pub struct SoundPlayer<Id> {
    effects: BTreeMap<Id, (SoundBufferId, SoundProperties)>,
    live: Vec<SourceId>,
    global_volume: f32,
}

impl<Id: Ord + fmt::Debug> Default for SoundPlayer<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord + fmt::Debug> SoundPlayer<Id> {
    /// Player with no registered effects and full global volume.
    pub fn new() -> Self {
        Self {
            effects: BTreeMap::new(),
            live: Vec::new(),
            global_volume: 100.0,
        }
    }

    /// Register a decoded buffer under `id`.
    pub fn register(&mut self, id: Id, buffer: SoundBufferId, properties: SoundProperties) {
        self.effects.insert(id, (buffer, properties));
    }

    /// Global volume in `[0, 100]`, multiplied into every effect's own.
    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Set the global volume, clamped to `[0, 100]`.
    pub fn set_global_volume(&mut self, volume: f32) {
        self.global_volume = volume.clamp(0.0, 100.0);
    }

    /// Play `id` at the listener position (effectively non-spatialized).
    ///
    /// # Panics
    ///
    /// Panics when no effect is registered under `id`.
    pub fn play(&mut self, sink: &mut dyn AudioSink, ctx: &AudioContext, id: &Id) -> SourceId {
        self.play_at(sink, id, ctx.listener_position())
    }

    /// Play `id` from a world position.
    ///
    /// # Panics
    ///
    /// Panics when no effect is registered under `id`.
    pub fn play_at(&mut self, sink: &mut dyn AudioSink, id: &Id, position: Point) -> SourceId {
        self.prune_stopped(sink);

        let (buffer, properties) = self
            .effects
            .get(id)
            .unwrap_or_else(|| panic!("no sound effect registered under id {id:?}"));

        let params = SoundParams {
            volume: self.global_volume * properties.volume() / 100.0,
            pitch: properties.pitch(),
            attenuation: properties.attenuation(),
            min_distance: properties.min_distance_3d(),
            relative_to_listener: properties.is_relative_to_listener(),
            position: world_to_audio(position),
            looped: false,
        };

        let source = sink.play(*buffer, &params);
        self.live.push(source);
        source
    }

    /// Pause or resume every live effect.
    pub fn pause_sounds(&mut self, sink: &mut dyn AudioSink, paused: bool) {
        for source in &self.live {
            sink.set_paused(*source, paused);
        }
    }

    /// Stop and drop every live effect.
    pub fn stop_sounds(&mut self, sink: &mut dyn AudioSink) {
        for source in &self.live {
            sink.stop(*source);
        }
        self.prune_stopped(sink);
    }

    /// Number of retained source handles (including ones not yet pruned).
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn prune_stopped(&mut self, sink: &dyn AudioSink) {
        self.live
            .retain(|source| sink.status(*source) != SourceStatus::Stopped);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/sound.rs"]
mod tests;
