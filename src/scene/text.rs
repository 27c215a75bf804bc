use crate::backend::{FontId, RenderStates, RenderTarget, TextSpec};
use crate::foundation::core::{Affine, Color, Rect, Vec2};
use crate::scene::node::SceneCtx;

/// Drop-shadow configuration for a [`TextNode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    /// Shadow offset in local space.
    pub offset: Vec2,
    /// Shadow color.
    pub color: Color,
}

/// Text node with an optional drop shadow.
///
/// Bounds are measured through the backend's text metrics during update and
/// cached, so `local_bounds` stays cheap and usable between frames.
pub struct TextNode {
    string: String,
    font: Option<FontId>,
    size_px: f64,
    color: Color,
    shadow: Option<TextShadow>,
    bounds: Rect,
}

impl TextNode {
    /// Text in the backend's default face.
    pub fn new(string: impl Into<String>, size_px: f64) -> Self {
        Self {
            string: string.into(),
            font: None,
            size_px,
            color: Color::WHITE,
            shadow: None,
            bounds: Rect::ZERO,
        }
    }

    /// Text in a specific font.
    pub fn with_font(string: impl Into<String>, font: FontId, size_px: f64) -> Self {
        Self {
            font: Some(font),
            ..Self::new(string, size_px)
        }
    }

    /// The displayed string.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Replace the displayed string; bounds refresh on the next update.
    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
    }

    /// Character size in pixels.
    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    /// Change the character size; bounds refresh on the next update.
    pub fn set_size_px(&mut self, size_px: f64) {
        self.size_px = size_px;
    }

    /// Set the fill color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Enable or replace the drop shadow.
    pub fn set_shadow(&mut self, shadow: Option<TextShadow>) {
        self.shadow = shadow;
    }

    /// Shaping input for measurement and drawing.
    pub fn spec(&self) -> TextSpec<'_> {
        TextSpec {
            string: &self.string,
            font: self.font,
            size_px: self.size_px,
        }
    }

    /// Cached bounds from the last update.
    pub fn local_bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn update(&mut self, ctx: &SceneCtx<'_>) {
        self.bounds = ctx.metrics.text_bounds(&self.spec());
    }

    pub(crate) fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        if let Some(shadow) = self.shadow {
            let shadow_states = states.transformed(Affine::translate(shadow.offset));
            target.draw_text(&self.spec(), shadow.color, &shadow_states);
        }
        target.draw_text(&self.spec(), self.color, states);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/text.rs"]
mod tests;
