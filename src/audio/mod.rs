//! Positional audio players over the backend's sink capabilities.
//!
//! World space is y-down while audio space is y-up, so every position crosses
//! through [`world_to_audio`]. The listener hovers a fixed [`LISTENER_Z`]
//! above the scene plane, which is why minimum distances are given in 2D and
//! derived to 3D.

pub mod music;
pub mod properties;
pub mod sound;

pub use music::MusicPlayer;
pub use properties::SoundProperties;
pub use sound::SoundPlayer;

use crate::backend::AudioSink;
use crate::foundation::core::Point;

/// Height of the listener above the scene plane, in world units.
pub const LISTENER_Z: f32 = 300.0;

/// Map a y-down world position onto the y-up audio plane.
pub(crate) fn world_to_audio(position: Point) -> [f32; 3] {
    [position.x as f32, -position.y as f32, 0.0]
}

/// Explicit owner of the audio listener state.
///
/// The backend's listener is process-wide; routing every move through one
/// context keeps a single writer and lets players read the position back
/// without asking the backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioContext {
    listener: Point,
}

impl AudioContext {
    /// Context with the listener at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the listener, in world coordinates.
    pub fn set_listener_position(&mut self, sink: &mut dyn AudioSink, position: Point) {
        self.listener = position;
        let [x, y, _] = world_to_audio(position);
        sink.set_listener([x, y, LISTENER_Z]);
    }

    /// The listener position, in world coordinates.
    pub fn listener_position(&self) -> Point {
        self.listener
    }
}
