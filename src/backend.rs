//! Capability traits for the external multimedia backend.
//!
//! The library never creates windows, decodes assets, or talks to an audio
//! device itself. Everything platform-facing is expressed as a small trait the
//! host implements: draw a primitive, measure text, poll an input event, play a
//! buffered sound. Handles ([`TextureId`], [`FontId`], [`SoundBufferId`]) are
//! opaque tokens minted by the host's asset pipeline.

use crate::event::Event;
use crate::foundation::core::{Affine, Color, Point, Rect};
use crate::foundation::error::EmberResult;

/// Opaque handle to a texture owned by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextureId(pub u64);

/// Opaque handle to a font owned by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontId(pub u64);

/// Opaque handle to a decoded sound buffer owned by the audio backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SoundBufferId(pub u64);

/// Opaque handle to a playing audio source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// A texture handle bundled with its pixel dimensions.
///
/// Nodes need the dimensions to derive texture rectangles; the pixel data stays
/// on the backend side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureRef {
    /// Backend texture handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Primitive interpretation of a vertex slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Individual points.
    Points,
    /// Pairs of vertices forming line segments.
    Lines,
    /// Triples of vertices forming triangles.
    Triangles,
    /// Quadruples of vertices forming quads, wound clockwise.
    Quads,
}

/// A single vertex handed to the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Position in the node's local space.
    pub position: Point,
    /// Texture coordinates in pixels of the bound texture.
    pub tex_coords: Point,
    /// Vertex color, modulated with the texture.
    pub color: Color,
}

impl Vertex {
    /// Untextured white vertex at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            tex_coords: Point::ZERO,
            color: Color::WHITE,
        }
    }
}

/// Transform and texture state accumulated down the scene tree.
#[derive(Clone, Copy, Debug)]
pub struct RenderStates {
    /// World transform applied to vertex positions.
    pub transform: Affine,
    /// Texture bound for the draw call, if any.
    pub texture: Option<TextureId>,
}

impl Default for RenderStates {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            texture: None,
        }
    }
}

impl RenderStates {
    /// Return a copy with `local` composed onto the current transform.
    pub fn transformed(self, local: Affine) -> Self {
        Self {
            transform: self.transform * local,
            ..self
        }
    }
}

/// Shaping input for text drawing and measurement.
#[derive(Clone, Copy, Debug)]
pub struct TextSpec<'a> {
    /// The string to shape.
    pub string: &'a str,
    /// Font to shape with; `None` lets the backend pick its default face.
    pub font: Option<FontId>,
    /// Character size in pixels.
    pub size_px: f64,
}

/// Something that can be drawn into: a window or an offscreen surface.
pub trait RenderTarget {
    /// Fill the whole target with `color`.
    fn clear(&mut self, color: Color);

    /// Draw a vertex slice interpreted as `primitive`.
    fn draw_vertices(&mut self, primitive: Primitive, vertices: &[Vertex], states: &RenderStates);

    /// Draw shaped text.
    fn draw_text(&mut self, spec: &TextSpec<'_>, color: Color, states: &RenderStates);
}

/// Text measurement, needed by text nodes and the textbox caret.
pub trait TextMetrics {
    /// Local-space bounding rectangle of the shaped string.
    fn text_bounds(&self, spec: &TextSpec<'_>) -> Rect;

    /// Local-space position of the glyph at `index` (byte index clamped to the
    /// string length; the string length itself yields the caret position past
    /// the last glyph).
    fn char_position(&self, spec: &TextSpec<'_>, index: usize) -> Point;
}

/// Text metrics stub reporting empty bounds.
///
/// Useful for headless tests and tools that traverse a scene without a real
/// rendering backend attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMetrics;

impl TextMetrics for NullMetrics {
    fn text_bounds(&self, _spec: &TextSpec<'_>) -> Rect {
        Rect::ZERO
    }

    fn char_position(&self, _spec: &TextSpec<'_>, _index: usize) -> Point {
        Point::ZERO
    }
}

/// The host window: event source, render target, and text measurer in one.
pub trait Window: RenderTarget + TextMetrics {
    /// Non-blocking poll of the platform event queue.
    fn poll_event(&mut self) -> Option<Event>;

    /// Current framebuffer size in pixels.
    fn size(&self) -> (u32, u32);

    /// Map a pixel-space position to world coordinates under the current view.
    fn map_pixel_to_world(&self, pixel: Point) -> Point;

    /// Current pointer position in pixel space.
    fn pointer_position(&self) -> Point;

    /// `false` once the window has been closed.
    fn is_open(&self) -> bool;

    /// Close the window; `is_open` reports `false` afterwards.
    fn close(&mut self);

    /// Present the drawn frame.
    fn present(&mut self);

    /// Current pointer position mapped to world coordinates.
    fn pointer_world(&self) -> Point {
        self.map_pixel_to_world(self.pointer_position())
    }
}

/// Playback parameters forwarded to the audio backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundParams {
    /// Effective volume in `[0, 100]`.
    pub volume: f32,
    /// Pitch multiplier (also affects playback speed).
    pub pitch: f32,
    /// Distance attenuation factor.
    pub attenuation: f32,
    /// Distance at which the source still plays at full volume.
    pub min_distance: f32,
    /// Whether the source position is relative to the listener.
    pub relative_to_listener: bool,
    /// Source position in audio space (y up, z toward the listener).
    pub position: [f32; 3],
    /// Whether playback loops.
    pub looped: bool,
}

/// Playback state of an audio source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceStatus {
    /// Actively producing samples.
    Playing,
    /// Paused, position retained.
    Paused,
    /// Finished or stopped.
    Stopped,
}

/// Buffered sound playback capability ("play a buffered sound").
pub trait AudioSink {
    /// Move the listener in audio space.
    fn set_listener(&mut self, position: [f32; 3]);

    /// Start playing a decoded buffer; returns a handle to the live source.
    fn play(&mut self, buffer: SoundBufferId, params: &SoundParams) -> SourceId;

    /// Pause or resume a live source.
    fn set_paused(&mut self, source: SourceId, paused: bool);

    /// Stop a live source; its handle reports [`SourceStatus::Stopped`] afterwards.
    fn stop(&mut self, source: SourceId);

    /// Playback state of a source. Unknown handles report `Stopped`.
    fn status(&self, source: SourceId) -> SourceStatus;
}

/// Streamed music playback capability (one track at a time).
pub trait MusicSink {
    /// Open and start streaming a track from `source`.
    ///
    /// Errors are recoverable: a failed open leaves the sink silent.
    fn play(&mut self, source: &str, params: &SoundParams) -> EmberResult<()>;

    /// Pause or resume the current track.
    fn set_paused(&mut self, paused: bool);

    /// Stop the current track.
    fn stop(&mut self);

    /// Move the current track's source position in audio space.
    fn set_position(&mut self, position: [f32; 3]);

    /// Playback state of the current track.
    fn status(&self) -> SourceStatus;
}
