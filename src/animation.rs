//! Frame animation: sprite-sheet frame data, a description scanner, and the
//! [`Animator`] that drives a quad node's texture rect and pivot.

use std::time::Duration;

use crate::foundation::core::{Point, Rect};

/// One animation frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Sub-rectangle of the sprite sheet, in pixels.
    pub texture_rect: Rect,
    /// Pivot point normalized to the frame extents.
    pub origin: Point,
    /// Display duration of this frame.
    pub duration: Duration,
}

/// A finalized frame sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationData {
    /// Frames in playback order, loopback mirror included.
    pub frames: Vec<Frame>,
    /// Duration of one full playback pass, split evenly across frames.
    pub total_duration: Duration,
    /// Whether playback wraps around to the first frame.
    pub repeat: bool,
    /// Whether the sequence plays back mirrored after reaching its end.
    pub loopback: bool,
}

impl AnimationData {
    /// Build frame data by scanning a sprite-sheet description text.
    ///
    /// The description lists frames under conventional names
    /// `<frame_prefix><index>.png` with indices starting at 1; each entry
    /// carries a frame rectangle (`x`, `y`, `w`, `h`) and a normalized
    /// `pivot` (`x`, `y`). The scan stops at the first index with no entry.
    ///
    /// A malformed or empty description is recoverable: it logs a warning and
    /// yields zero frames.
    pub fn from_description(
        description: &str,
        frame_prefix: &str,
        total_duration: Duration,
        repeat: bool,
        loopback: bool,
    ) -> Self {
        let mut data = Self {
            frames: Vec::new(),
            total_duration,
            repeat,
            loopback,
        };

        for index in 1.. {
            let needle = format!("{frame_prefix}{index}.png");
            let Some(at) = description.find(&needle) else {
                break;
            };

            let Some(frame) = scan_frame(&description[at + needle.len()..]) else {
                tracing::warn!(entry = %needle, "malformed frame entry, discarding animation");
                data.frames.clear();
                return data;
            };
            data.frames.push(frame);
        }

        if data.frames.is_empty() {
            tracing::warn!(prefix = %frame_prefix, "no frames found in description");
            return data;
        }

        data.finalize();
        data
    }

    /// Mirror frames for loopback playback and split the total duration
    /// evenly. `from_description` calls this; hand-built frame lists need it
    /// once before use.
    pub fn finalize(&mut self) {
        if self.frames.is_empty() {
            return;
        }

        // Mirror everything but the final frame so the turnaround frame is
        // not shown twice.
        if self.loopback {
            for i in (0..self.frames.len() - 1).rev() {
                self.frames.push(self.frames[i]);
            }
        }

        let per_frame =
            Duration::from_secs_f64(self.total_duration.as_secs_f64() / self.frames.len() as f64);
        for frame in &mut self.frames {
            frame.duration = per_frame;
        }
    }
}

/// Parse the rect and pivot following a frame's filename entry.
fn scan_frame(entry: &str) -> Option<Frame> {
    let mut cursor = skip_past(entry, "{")?;
    let x = next_value(&mut cursor)?;
    let y = next_value(&mut cursor)?;
    let w = next_value(&mut cursor)?;
    let h = next_value(&mut cursor)?;

    let mut cursor = skip_past(cursor, "pivot")?;
    cursor = skip_past(cursor, "{")?;
    let px = next_value(&mut cursor)?;
    let py = next_value(&mut cursor)?;

    Some(Frame {
        texture_rect: Rect::new(x, y, x + w, y + h),
        origin: Point::new(px, py),
        duration: Duration::ZERO,
    })
}

fn skip_past<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.find(marker).map(|at| &text[at + marker.len()..])
}

/// Read the next `"key": value` pair's value, delimited by `,` or `}`.
fn next_value(cursor: &mut &str) -> Option<f64> {
    let rest = skip_past(cursor, ":")?;
    let end = rest.find([',', '}'])?;
    let value = rest[..end].trim().parse().ok()?;
    *cursor = &rest[end + 1..];
    Some(value)
}

/// Plays an [`AnimationData`] sequence over time.
///
/// Attach to a quad node via
/// [`QuadNode::set_animator`](crate::scene::QuadNode::set_animator); each
/// frame tick resizes the quad to the frame rect and moves the pivot origin.
#[derive(Clone, Debug)]
pub struct Animator {
    data: AnimationData,
    current: usize,
    elapsed: Duration,
    ongoing: bool,
    pending_apply: bool,
}

impl Animator {
    /// Animator over a finalized frame sequence, initially stopped.
    pub fn new(data: AnimationData) -> Self {
        Self {
            data,
            current: 0,
            elapsed: Duration::ZERO,
            ongoing: false,
            pending_apply: true,
        }
    }

    /// Resume playback from the current frame.
    pub fn start(&mut self) {
        self.ongoing = true;
    }

    /// Pause playback, keeping the current frame.
    pub fn stop(&mut self) {
        self.ongoing = false;
    }

    /// Rewind to the first frame and start playing.
    pub fn restart(&mut self) {
        self.current = 0;
        self.elapsed = Duration::ZERO;
        self.ongoing = true;
        self.pending_apply = true;
    }

    /// Whether playback is running.
    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    /// The frame currently displayed, if any.
    pub fn current_frame(&self) -> Option<Frame> {
        self.data.frames.get(self.current).copied()
    }

    /// Advance playback by `dt`, returning the frame to apply when it
    /// changes. A finished non-repeating sequence stops itself.
    pub fn advance(&mut self, dt: Duration) -> Option<Frame> {
        if !self.ongoing || self.data.frames.is_empty() {
            return None;
        }
        if self.pending_apply {
            self.pending_apply = false;
            return Some(self.data.frames[self.current]);
        }

        self.elapsed += dt;
        if self.elapsed < self.data.frames[self.current].duration {
            return None;
        }
        self.elapsed = Duration::ZERO;

        if self.current + 1 < self.data.frames.len() {
            self.current += 1;
        } else if self.data.repeat {
            self.current = 0;
        } else {
            self.ongoing = false;
            return None;
        }

        Some(self.data.frames[self.current])
    }
}

#[cfg(test)]
#[path = "../tests/unit/animation.rs"]
mod tests;
