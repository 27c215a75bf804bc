use std::collections::BTreeMap;
use std::fmt;

use crate::audio::properties::SoundProperties;
use crate::audio::{AudioContext, world_to_audio};
use crate::backend::{MusicSink, SoundParams, SourceStatus};
use crate::foundation::core::Point;

/// Streamed music player: one track at a time.
///
/// Tracks are registered as a source path plus playback properties; playing
/// opens the stream on the [`MusicSink`], replacing whatever was playing. An
/// unopenable source is recoverable and leaves the player silent.
pub struct MusicPlayer<Id> {
    tracks: BTreeMap<Id, (String, SoundProperties)>,
    global_volume: f32,
}

impl<Id: Ord + fmt::Debug> Default for MusicPlayer<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord + fmt::Debug> MusicPlayer<Id> {
    /// Player with no registered tracks and full global volume.
    pub fn new() -> Self {
        Self {
            tracks: BTreeMap::new(),
            global_volume: 100.0,
        }
    }

    /// Register a track source under `id`.
    pub fn register_track(&mut self, id: Id, source: impl Into<String>, properties: SoundProperties) {
        self.tracks.insert(id, (source.into(), properties));
    }

    /// Global volume in `[0, 100]`, multiplied into every track's own.
    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Set the global volume, clamped to `[0, 100]`.
    pub fn set_global_volume(&mut self, volume: f32) {
        self.global_volume = volume.clamp(0.0, 100.0);
    }

    /// Play `id` with its source at the listener position.
    ///
    /// # Panics
    ///
    /// Panics when no track is registered under `id`.
    pub fn play(&mut self, sink: &mut dyn MusicSink, ctx: &AudioContext, id: &Id, looped: bool) {
        self.play_at(sink, id, ctx.listener_position(), looped);
    }

    /// Play `id` with its source at a world position.
    ///
    /// A sink that fails to open the source logs a warning and stays silent.
    ///
    /// # Panics
    ///
    /// Panics when no track is registered under `id`.
    pub fn play_at(&mut self, sink: &mut dyn MusicSink, id: &Id, position: Point, looped: bool) {
        let (source, properties) = self
            .tracks
            .get(id)
            .unwrap_or_else(|| panic!("no music track registered under id {id:?}"));

        let params = SoundParams {
            volume: self.global_volume * properties.volume() / 100.0,
            pitch: properties.pitch(),
            attenuation: properties.attenuation(),
            min_distance: properties.min_distance_3d(),
            relative_to_listener: properties.is_relative_to_listener(),
            position: world_to_audio(position),
            looped,
        };

        if let Err(err) = sink.play(source, &params) {
            tracing::warn!(%err, source = %source, "failed to open music track");
        }
    }

    /// Pause or resume the current track.
    pub fn pause(&mut self, sink: &mut dyn MusicSink, paused: bool) {
        sink.set_paused(paused);
    }

    /// Stop the current track.
    pub fn stop(&mut self, sink: &mut dyn MusicSink) {
        sink.stop();
    }

    /// Move the current track's source, in world coordinates.
    pub fn update_track_position(&mut self, sink: &mut dyn MusicSink, position: Point) {
        sink.set_position(world_to_audio(position));
    }

    /// Whether the current track has finished or been stopped.
    pub fn is_track_over(&self, sink: &dyn MusicSink) -> bool {
        sink.status() == SourceStatus::Stopped
    }

    /// Whether the current track is paused.
    pub fn is_track_paused(&self, sink: &dyn MusicSink) -> bool {
        sink.status() == SourceStatus::Paused
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/music.rs"]
mod tests;
