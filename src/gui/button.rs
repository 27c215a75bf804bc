use crate::event::{Event, MouseButton};
use crate::foundation::core::{Affine, Color, Rect, Vec2};
use crate::scene::node::{ActivationTarget, Node, NodeKind, SceneCtx};
use crate::scene::quad::QuadNode;
use crate::scene::text::TextNode;
use crate::scene::transform::OriginFlags;

/// The visual and interaction states of a [`Button`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Enabled, pointer elsewhere.
    Idle,
    /// Ignores pointer input.
    Disabled,
    /// Selected by a completed press-release inside the bounds.
    Clicked,
    /// Pointer inside the bounds, no button held.
    HoveredOver,
    /// Pressed inside the bounds, not yet released.
    HeldDown,
}

impl ButtonState {
    const ALL: [ButtonState; 5] = [
        Self::Idle,
        Self::Disabled,
        Self::Clicked,
        Self::HoveredOver,
        Self::HeldDown,
    ];

    fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Disabled => 1,
            Self::Clicked => 2,
            Self::HoveredOver => 3,
            Self::HeldDown => 4,
        }
    }
}

// Fixed child layout built by `Button::parts`; extra children may follow.
pub(crate) const TEXT_CHILD: usize = 5;

/// GUI button capability.
///
/// A button node carries one visual quad child per [`ButtonState`] plus a
/// centered text child; exactly the quad of the current state has its
/// activation flags on, so the generic traversal draws the right visual with
/// no special casing. Pointer transitions follow the usual press/release state
/// machine; a press and release both inside the bounds yields `Clicked`.
pub struct Button {
    current: ButtonState,
    text_active: bool,
}

impl Button {
    /// Button capability plus its fixed children (five visuals, one text).
    pub(crate) fn parts(size: Vec2) -> (Self, Vec<Node>) {
        let mut children: Vec<Node> = ButtonState::ALL
            .iter()
            .map(|_| Node::quad(QuadNode::with_size(size)))
            .collect();
        children.push(Node::text(TextNode::new("", 30.0)));

        let mut button = Self {
            current: ButtonState::Idle,
            text_active: false,
        };
        button.activate_current_state(&mut children);
        button.set_text_active(&mut children, false);
        (button, children)
    }

    /// Build a button node of the given size.
    pub fn node(size: Vec2) -> Node {
        let (button, children) = Self::parts(size);
        Node::with_children(NodeKind::Button(button), children)
    }

    /// The current interaction state.
    pub fn state(&self) -> ButtonState {
        self.current
    }

    /// Enable (to `Idle`) or disable the button.
    pub(crate) fn activate(&mut self, children: &mut [Node], flag: bool) {
        if self.current == ButtonState::Disabled && flag {
            self.current = ButtonState::Idle;
            self.activate_current_state(children);
        } else if self.current != ButtonState::Disabled && !flag {
            self.current = ButtonState::Disabled;
            self.activate_current_state(children);
        }
    }

    /// Whether the text child participates in traversal.
    pub fn is_text_active(&self) -> bool {
        self.text_active
    }

    pub(crate) fn set_text_active(&mut self, children: &mut [Node], flag: bool) {
        self.text_active = flag;
        let text = &mut children[TEXT_CHILD];
        text.activate_updating(ActivationTarget::All, flag);
        text.activate_drawing(ActivationTarget::All, flag);
        if flag {
            self.align_text(children, OriginFlags::empty(), 0.0);
        }
    }

    /// Position the text child inside the current visual's bounds.
    pub(crate) fn align_text(&self, children: &mut [Node], flags: OriginFlags, padding: f64) {
        let bounds = self.local_bounds(children);
        let text = &mut children[TEXT_CHILD];
        text.set_origin_flags(flags);
        text.set_relative_alignment(bounds, flags, padding);
    }

    /// Bounds of the current state's visual, in the button's local space.
    pub(crate) fn local_bounds(&self, children: &[Node]) -> Rect {
        let visual = &children[self.current.index()];
        visual.global_bounds(Affine::IDENTITY)
    }

    fn is_hovered_over(&self, ctx: &SceneCtx<'_>, children: &[Node]) -> bool {
        ctx.world
            .transform_rect_bbox(self.local_bounds(children))
            .contains(ctx.pointer_world)
    }

    fn set_state(&mut self, state: ButtonState, children: &mut [Node]) {
        self.current = state;
        self.activate_current_state(children);
    }

    /// Flip activation flags so only the current state's visual participates.
    fn activate_current_state(&mut self, children: &mut [Node]) {
        for state in ButtonState::ALL {
            let flag = state == self.current;
            let visual = &mut children[state.index()];
            visual.activate_event_handling(ActivationTarget::All, flag);
            visual.activate_updating(ActivationTarget::All, flag);
            visual.activate_drawing(ActivationTarget::All, flag);
        }
        if self.text_active {
            self.align_text(children, OriginFlags::empty(), 0.0);
        }
    }

    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        ctx: &SceneCtx<'_>,
        children: &mut [Node],
    ) {
        if self.current == ButtonState::Disabled {
            return;
        }

        match *event {
            Event::MouseButtonPressed {
                button: MouseButton::Left,
                ..
            } if self.current == ButtonState::HoveredOver => {
                self.set_state(ButtonState::HeldDown, children);
            }
            Event::MouseButtonReleased {
                button: MouseButton::Left,
                ..
            } if matches!(self.current, ButtonState::HeldDown | ButtonState::Clicked) => {
                let next = if self.is_hovered_over(ctx, children) {
                    ButtonState::Clicked
                } else {
                    ButtonState::Idle
                };
                self.set_state(next, children);
            }
            _ => {}
        }
    }

    pub(crate) fn update(&mut self, ctx: &SceneCtx<'_>, children: &mut [Node]) {
        if self.current == ButtonState::Disabled {
            return;
        }

        if self.current == ButtonState::Idle && self.is_hovered_over(ctx, children) {
            self.set_state(ButtonState::HoveredOver, children);
        } else if self.current == ButtonState::HoveredOver && !self.is_hovered_over(ctx, children)
        {
            self.set_state(ButtonState::Idle, children);
        }
    }
}

/// Split borrow of a button capability and its children, handed out by
/// [`Node::button_mut`]. Widget operations that re-flag or re-align children
/// go through here.
pub struct ButtonHandle<'a> {
    button: &'a mut Button,
    children: &'a mut [Node],
}

impl<'a> ButtonHandle<'a> {
    pub(crate) fn new(button: &'a mut Button, children: &'a mut [Node]) -> Self {
        Self { button, children }
    }

    /// The current interaction state.
    pub fn state(&self) -> ButtonState {
        self.button.state()
    }

    /// Enable (to `Idle`) or disable the button.
    pub fn activate(&mut self, flag: bool) {
        self.button.activate(self.children, flag);
    }

    /// Show or hide the text child.
    pub fn activate_text(&mut self, flag: bool) {
        self.button.set_text_active(self.children, flag);
    }

    /// Whether the text child is shown.
    pub fn is_text_active(&self) -> bool {
        self.button.is_text_active()
    }

    /// Set the label, activating the text child if needed.
    pub fn set_text(&mut self, string: impl Into<String>) {
        if !self.button.is_text_active() {
            self.button.set_text_active(self.children, true);
        }
        if let Some(text) = self.children[TEXT_CHILD].as_text_mut() {
            text.set_string(string);
        }
    }

    /// The label text node, if the text child is active.
    pub fn text(&self) -> Option<&TextNode> {
        self.button
            .is_text_active()
            .then(|| self.children[TEXT_CHILD].as_text())
            .flatten()
    }

    /// Mutable access to the label text node.
    pub fn text_mut(&mut self) -> Option<&mut TextNode> {
        self.button
            .is_text_active()
            .then(|| self.children[TEXT_CHILD].as_text_mut())
            .flatten()
    }

    /// Re-align the text child inside the button with the given flags.
    pub fn align_text(&mut self, flags: OriginFlags, padding: f64) {
        self.button.align_text(self.children, flags, padding);
    }

    /// The visual quad shown for `state`, for styling.
    pub fn visual_mut(&mut self, state: ButtonState) -> &mut QuadNode {
        self.children[state.index()]
            .as_quad_mut()
            .expect("button visual children are quads")
    }

    /// Convenience: fill every visual with one color.
    pub fn set_fill_color(&mut self, color: Color) {
        for state in ButtonState::ALL {
            self.visual_mut(state).set_fill_color(color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gui/button.rs"]
mod tests;
