use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Decomposed 2D transform carried by every scene node.
///
/// The affine is composed as translate, then rotate, then scale, each relative
/// to `origin` in local space. The origin acts as both the rotation/scale pivot
/// and the anchor that `translate` places in parent space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Position of the origin in parent space.
    pub translate: Vec2,
    /// Rotation around the origin, in degrees clockwise.
    pub rotation_deg: f64,
    /// Scale factors around the origin.
    pub scale: Vec2,
    /// Local-space pivot point.
    pub origin: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: Vec2::new(1.0, 1.0),
            origin: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Pure translation.
    pub fn from_translate(translate: Vec2) -> Self {
        Self {
            translate,
            ..Self::default()
        }
    }

    /// Compose the decomposed parts into a local-to-parent affine.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-self.origin)
    }
}

bitflags::bitflags! {
    /// Automatic origin / alignment placement flags.
    ///
    /// An empty set means "center on both axes". The axis flags can be paired
    /// freely, e.g. `CENTER_X | TOP` places the anchor at the top middle point.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OriginFlags: u16 {
        /// Horizontal middle.
        const CENTER_X = 1 << 0;
        /// Vertical middle.
        const CENTER_Y = 1 << 1;
        /// Left edge.
        const LEFT = 1 << 2;
        /// Right edge.
        const RIGHT = 1 << 3;
        /// Top edge.
        const TOP = 1 << 4;
        /// Bottom edge.
        const BOTTOM = 1 << 5;
    }
}

impl Default for OriginFlags {
    fn default() -> Self {
        OriginFlags::LEFT | OriginFlags::TOP
    }
}

/// Resolve origin flags against local bounds into a pivot point.
pub(crate) fn origin_for(bounds: Rect, flags: OriginFlags) -> Point {
    if flags.is_empty() {
        return Point::new(bounds.x0 + bounds.width() / 2.0, bounds.y0 + bounds.height() / 2.0);
    }

    let mut origin = Point::new(bounds.x0, bounds.y0);
    if flags.contains(OriginFlags::CENTER_X) {
        origin.x = bounds.x0 + bounds.width() / 2.0;
    } else if flags.contains(OriginFlags::RIGHT) {
        origin.x = bounds.x1;
    }

    if flags.contains(OriginFlags::CENTER_Y) {
        origin.y = bounds.y0 + bounds.height() / 2.0;
    } else if flags.contains(OriginFlags::BOTTOM) {
        origin.y = bounds.y1;
    }

    origin
}

/// Resolve alignment flags against a target rectangle into a position, keeping
/// `padding` away from the edges named by the flags.
pub(crate) fn alignment_position(target: Rect, flags: OriginFlags, padding: f64) -> Point {
    if flags.is_empty() {
        return Point::new(target.x0 + target.width() / 2.0, target.y0 + target.height() / 2.0);
    }

    let mut pos = Point::new(target.x0 + padding, target.y0 + padding);
    if flags.contains(OriginFlags::CENTER_X) {
        pos.x = target.x0 + target.width() / 2.0;
    } else if flags.contains(OriginFlags::RIGHT) {
        pos.x = target.x1 - padding;
    }

    if flags.contains(OriginFlags::CENTER_Y) {
        pos.y = target.y0 + target.height() / 2.0;
    } else if flags.contains(OriginFlags::BOTTOM) {
        pos.y = target.y1 - padding;
    }

    pos
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;
