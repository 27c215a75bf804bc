use std::time::Duration;

use crate::backend::{TextMetrics, TextSpec};
use crate::event::{Event, Key};
use crate::foundation::core::{Color, Point, Rect, Vec2};
use crate::gui::button::{Button, ButtonState, TEXT_CHILD};
use crate::scene::node::{Node, NodeKind, SceneCtx};
use crate::scene::quad::QuadNode;
use crate::scene::text::TextNode;
use crate::scene::transform::OriginFlags;

const CARET_CHILD: usize = TEXT_CHILD + 1;
const CARET_BLINK: Duration = Duration::from_millis(500);

// Entry stops this far short of the right edge; a newline needs this much
// headroom below the current text block.
const ENTRY_MARGIN: f64 = 20.0;
const LINE_MARGIN: f64 = 5.0;

struct Cooldown {
    original: Duration,
    current: Duration,
}

impl Cooldown {
    fn new(original: Duration) -> Self {
        Self {
            original,
            current: original,
        }
    }

    fn reset(&mut self) {
        self.current = self.original;
    }

    /// Count down by `dt`; `true` once per elapse, then rearm.
    fn tick(&mut self, dt: Duration) -> bool {
        self.current = self.current.saturating_sub(dt);
        if self.current.is_zero() {
            self.reset();
            true
        } else {
            false
        }
    }
}

/// GUI text input box, layered on [`Button`].
///
/// The button state machine decides focus: text entry and the blinking caret
/// are live while the box is `Clicked`. Printable ASCII is appended subject to
/// a width guard (falling back to a new line while height allows), backspace
/// deletes, and Enter raises a consume-on-read confirmation flag.
pub struct Textbox {
    button: Button,
    caret_timer: Cooldown,
    action_confirmed: bool,
}

impl Textbox {
    /// Build a textbox node of the given size.
    pub fn node(size: Vec2) -> Node {
        let (mut button, mut children) = Button::parts(size);

        let mut caret = QuadNode::with_size(Vec2::new(2.0, 30.0));
        caret.set_fill_color(Color::BLACK);
        let mut caret = Node::quad(caret);
        caret.transform_mut().translate = size / 2.0;
        children.push(caret);

        button.set_text_active(&mut children, true);

        let textbox = Self {
            button,
            caret_timer: Cooldown::new(CARET_BLINK),
            action_confirmed: false,
        };
        Node::with_children(NodeKind::Textbox(textbox), children)
    }

    /// The underlying button capability.
    pub fn button(&self) -> &Button {
        &self.button
    }

    pub(crate) fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }

    /// Consume-on-read: whether Enter was pressed while the box had focus
    /// since the last call.
    pub fn was_action_confirmed(&mut self) -> bool {
        std::mem::take(&mut self.action_confirmed)
    }

    pub(crate) fn local_bounds(&self, children: &[Node]) -> Rect {
        self.button.local_bounds(children)
    }

    pub(crate) fn update(&mut self, dt: Duration, ctx: &SceneCtx<'_>, children: &mut [Node]) {
        self.button.update(ctx, children);

        if self.button.state() == ButtonState::Clicked && self.caret_timer.tick(dt) {
            let caret = caret_quad(children);
            let color = caret.vertices()[0].color;
            let alpha = if color.a == 0 { 255 } else { 0 };
            caret.set_fill_color(color.with_alpha(alpha));
        }

        self.correct_caret(ctx.metrics, children);
    }

    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        ctx: &SceneCtx<'_>,
        children: &mut [Node],
    ) {
        let prev = self.button.state();
        self.button.handle_event(event, ctx, children);

        // Hide the caret the moment focus is lost.
        if prev == ButtonState::Clicked && self.button.state() != prev {
            self.caret_timer.reset();
            let caret = caret_quad(children);
            let color = caret.vertices()[0].color;
            caret.set_fill_color(color.with_alpha(0));
        }

        if self.button.state() != ButtonState::Clicked {
            return;
        }

        match *event {
            Event::TextEntered { ch } if (' '..='\u{7f}').contains(&ch) => {
                self.enter_char(ch, ctx.metrics, children);
            }
            Event::KeyPressed {
                key: Key::Backspace,
            } => {
                let text = text_node(children);
                if !text.string().is_empty() {
                    let mut s = text.string().to_owned();
                    s.pop();
                    text.set_string(s);
                    self.reset_caret_visible(children);
                }
            }
            Event::KeyPressed { key: Key::Enter } => {
                self.action_confirmed = true;
            }
            _ => {}
        }
    }

    /// Append `ch`, wrapping to a new line when the current one is full and
    /// dropping the character when the box is full.
    fn enter_char(&mut self, ch: char, metrics: &dyn TextMetrics, children: &mut [Node]) {
        let bounds = self.local_bounds(children);
        let text = text_node(children);
        let size_px = text.size_px();

        let char_pos = next_char_position(text, metrics, ch);
        let mut s = text.string().to_owned();

        if char_pos.x + ENTRY_MARGIN < bounds.width() {
            s.push(ch);
            text.set_string(s);
        } else {
            // Measured live, not from the cached bounds: a burst of input
            // between two updates must see its own growth.
            let text_bounds = metrics.text_bounds(&text.spec());
            if text_bounds.height() + size_px + LINE_MARGIN < bounds.height() {
                s.push('\n');
                s.push(ch);
                text.set_string(s);
            }
        }

        self.reset_caret_visible(children);
    }

    /// Rearm the blink timer with the caret shown.
    fn reset_caret_visible(&mut self, children: &mut [Node]) {
        self.caret_timer.reset();
        let caret = caret_quad(children);
        let color = caret.vertices()[0].color;
        caret.set_fill_color(color.with_alpha(255));
    }

    /// Keep the caret sized to the character height and parked after the last
    /// glyph (or at the text anchor while empty).
    fn correct_caret(&self, metrics: &dyn TextMetrics, children: &mut [Node]) {
        let text = &children[TEXT_CHILD];
        let Some(text_node) = text.as_text() else {
            return;
        };
        let size_px = text_node.size_px();
        let text_translate = text.transform().translate;
        let text_bounds = text_node.local_bounds();

        let position = if text_node.string().is_empty() {
            text_translate.to_point()
        } else {
            let spec = text_node.spec();
            let end = metrics.char_position(&spec, spec.string.len());
            let local = text.transform().affine() * end;
            Point::new(local.x + 1.5, local.y + text_bounds.y0 - 1.0)
        };

        let caret_node = &mut children[CARET_CHILD];
        caret_node.transform_mut().translate = position.to_vec2();
        if let Some(caret) = caret_node.as_quad_mut() {
            let width = caret.size().x;
            caret.modify_size(Vec2::new(width, size_px));
        }
    }
}

fn text_node(children: &mut [Node]) -> &mut TextNode {
    children[TEXT_CHILD]
        .as_text_mut()
        .expect("textbox text child is a text node")
}

fn caret_quad(children: &mut [Node]) -> &mut QuadNode {
    children[CARET_CHILD]
        .as_quad_mut()
        .expect("textbox caret child is a quad")
}

/// Where the caret would land after appending `ch`, in the widget's space.
fn next_char_position(text: &TextNode, metrics: &dyn TextMetrics, ch: char) -> Point {
    let mut candidate = text.string().to_owned();
    candidate.push(ch);
    let spec = TextSpec {
        string: &candidate,
        ..text.spec()
    };
    metrics.char_position(&spec, candidate.len())
}

/// Split borrow of a textbox capability and its children, handed out by
/// [`Node::textbox_mut`].
pub struct TextboxHandle<'a> {
    textbox: &'a mut Textbox,
    children: &'a mut [Node],
}

impl<'a> TextboxHandle<'a> {
    pub(crate) fn new(textbox: &'a mut Textbox, children: &'a mut [Node]) -> Self {
        Self { textbox, children }
    }

    /// The current interaction state.
    pub fn state(&self) -> ButtonState {
        self.textbox.button.state()
    }

    /// Consume-on-read Enter confirmation.
    pub fn was_action_confirmed(&mut self) -> bool {
        self.textbox.was_action_confirmed()
    }

    /// The entered text.
    pub fn text(&self) -> &str {
        self.children[TEXT_CHILD]
            .as_text()
            .map_or("", |t| t.string())
    }

    /// Replace the entered text.
    pub fn set_text(&mut self, string: impl Into<String>) {
        if let Some(text) = self.children[TEXT_CHILD].as_text_mut() {
            text.set_string(string);
        }
    }

    /// Set the caret color (the blink keeps the channels, toggling alpha).
    pub fn set_caret_color(&mut self, color: Color) {
        caret_quad(self.children).set_fill_color(color);
    }

    /// Align the text child inside the box.
    pub fn align_text(&mut self, flags: OriginFlags, padding: f64) {
        self.textbox.button.align_text(self.children, flags, padding);
    }

    /// Enable or disable the box.
    pub fn activate(&mut self, flag: bool) {
        self.textbox.button.activate(self.children, flag);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gui/textbox.rs"]
mod tests;
