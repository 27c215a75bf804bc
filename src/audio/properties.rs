use crate::audio::LISTENER_Z;

/// Per-sound playback properties.
///
/// Volume lives in `[0, 100]`; the minimum 2D distance may not be zero
/// ("inside the listener's head") and is coerced to 1. Both are enforced by
/// the setters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SoundProperties {
    volume: f32,
    attenuation: f32,
    pitch: f32,
    min_distance_2d: f32,
    relative_to_listener: bool,
}

impl Default for SoundProperties {
    fn default() -> Self {
        Self {
            volume: 100.0,
            attenuation: 1.0,
            pitch: 1.0,
            min_distance_2d: 1.0,
            relative_to_listener: false,
        }
    }
}

impl SoundProperties {
    /// Properties with every field explicit; out-of-range values are coerced.
    pub fn new(
        volume: f32,
        attenuation: f32,
        pitch: f32,
        min_distance_2d: f32,
        relative_to_listener: bool,
    ) -> Self {
        let mut properties = Self {
            attenuation,
            pitch,
            relative_to_listener,
            ..Self::default()
        };
        properties.set_volume(volume);
        properties.set_min_distance_2d(min_distance_2d);
        properties
    }

    /// Volume in `[0, 100]`.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to `[0, 100]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 100.0);
    }

    /// Distance attenuation factor; 0 disables attenuation.
    pub fn attenuation(&self) -> f32 {
        self.attenuation
    }

    /// Set the attenuation factor.
    pub fn set_attenuation(&mut self, attenuation: f32) {
        self.attenuation = attenuation;
    }

    /// Pitch multiplier (also affects playback speed).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch multiplier.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Minimum 2D distance at which the sound plays at full volume.
    pub fn min_distance_2d(&self) -> f32 {
        self.min_distance_2d
    }

    /// Set the minimum 2D distance; zero is coerced to 1.
    pub fn set_min_distance_2d(&mut self, min_distance_2d: f32) {
        self.min_distance_2d = if min_distance_2d == 0.0 {
            1.0
        } else {
            min_distance_2d
        };
    }

    /// Minimum distance in audio space, accounting for the listener sitting
    /// [`LISTENER_Z`] above the scene plane.
    pub fn min_distance_3d(&self) -> f32 {
        self.min_distance_2d.hypot(LISTENER_Z)
    }

    /// Whether the source position is relative to the listener.
    pub fn is_relative_to_listener(&self) -> bool {
        self.relative_to_listener
    }

    /// Make the source position relative to the listener (non-spatialized or
    /// listener-attached sounds).
    pub fn set_relative_to_listener(&mut self, relative: bool) {
        self.relative_to_listener = relative;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/properties.rs"]
mod tests;
