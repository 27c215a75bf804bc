use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::backend::{RenderStates, RenderTarget, TextMetrics};
use crate::event::Event;
use crate::foundation::core::{Affine, Point, Rect};
use crate::gui::{Button, ButtonHandle, Textbox, TextboxHandle};
use crate::scene::particles::ParticleSystem;
use crate::scene::quad::QuadNode;
use crate::scene::text::TextNode;
use crate::scene::transform::{OriginFlags, Transform2D, alignment_position, origin_for};

/// Selects which activation flags an `activate_*` call touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationTarget {
    /// Only the node's own hook.
    Current,
    /// Only the recursion into children.
    Children,
    /// Both.
    All,
}

/// Process-unique scene node identity.
///
/// Used for identity (not value) equality in [`Node::detach_child`] and for
/// parent back-references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Read-only context threaded through event/update traversals.
///
/// `world` is the transform accumulated from the root down to (and including)
/// the node whose hook receives the context.
#[derive(Clone, Copy)]
pub struct SceneCtx<'a> {
    /// Pointer position in world coordinates.
    pub pointer_world: Point,
    /// Text measurement capability of the backend.
    pub metrics: &'a dyn TextMetrics,
    /// Accumulated world transform.
    pub world: Affine,
}

impl<'a> SceneCtx<'a> {
    /// Root context for a traversal starting at a tree's root node.
    pub fn new(pointer_world: Point, metrics: &'a dyn TextMetrics) -> Self {
        Self {
            pointer_world,
            metrics,
            world: Affine::IDENTITY,
        }
    }

    fn descend(&self, local: Affine) -> Self {
        Self {
            world: self.world * local,
            ..*self
        }
    }
}

/// User-defined node capability, the open-ended arm of [`NodeKind`].
///
/// All hooks default to no-ops; implement only what the node kind needs.
pub trait NodeBehavior {
    /// React to an input event.
    fn on_event(&mut self, _event: &Event, _ctx: &SceneCtx<'_>, _children: &mut [Node]) {}

    /// Advance by `dt`. `transform` is the owning node's transform.
    fn on_update(
        &mut self,
        _dt: Duration,
        _ctx: &SceneCtx<'_>,
        _children: &mut [Node],
        _transform: &mut Transform2D,
    ) {
    }

    /// Render the node itself (children are drawn by the traversal).
    fn on_draw(&self, _target: &mut dyn RenderTarget, _states: &RenderStates) {}

    /// Local-space bounds, used for origin flags and hit testing.
    fn local_bounds(&self) -> Rect {
        Rect::ZERO
    }

    /// Removal policy; `true` asks the parent to excise this node on its next
    /// update sweep. Defaults to never.
    fn marked_for_removal(&self) -> bool {
        false
    }
}

/// The capability set of a node, dispatched by the generic traversal.
pub enum NodeKind {
    /// Pure grouping/transform node; renders nothing.
    Group,
    /// Textured quad.
    Quad(QuadNode),
    /// Text with optional drop shadow.
    Text(TextNode),
    /// Particle emitter.
    Particles(ParticleSystem),
    /// GUI button.
    Button(Button),
    /// GUI text input box.
    Textbox(Textbox),
    /// User-defined behavior.
    Custom(Box<dyn NodeBehavior>),
}

impl NodeKind {
    fn handle_event(&mut self, event: &Event, ctx: &SceneCtx<'_>, children: &mut [Node]) {
        match self {
            Self::Group | Self::Quad(_) | Self::Text(_) | Self::Particles(_) => {}
            Self::Button(button) => button.handle_event(event, ctx, children),
            Self::Textbox(textbox) => textbox.handle_event(event, ctx, children),
            Self::Custom(behavior) => behavior.on_event(event, ctx, children),
        }
    }

    fn update(
        &mut self,
        dt: Duration,
        ctx: &SceneCtx<'_>,
        children: &mut [Node],
        transform: &mut Transform2D,
    ) {
        match self {
            Self::Group => {}
            Self::Quad(quad) => quad.update(dt, transform),
            Self::Text(text) => text.update(ctx),
            Self::Particles(particles) => particles.update(dt),
            Self::Button(button) => button.update(ctx, children),
            Self::Textbox(textbox) => textbox.update(dt, ctx, children),
            Self::Custom(behavior) => behavior.on_update(dt, ctx, children, transform),
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        match self {
            Self::Group | Self::Button(_) | Self::Textbox(_) => {}
            Self::Quad(quad) => quad.draw(target, states),
            Self::Text(text) => text.draw(target, states),
            Self::Particles(particles) => particles.draw(target, states),
            Self::Custom(behavior) => behavior.on_draw(target, states),
        }
    }

    fn local_bounds(&self, children: &[Node]) -> Rect {
        match self {
            Self::Group => Rect::ZERO,
            Self::Quad(quad) => quad.local_bounds(),
            Self::Text(text) => text.local_bounds(),
            Self::Particles(_) => Rect::ZERO,
            Self::Button(button) => button.local_bounds(children),
            Self::Textbox(textbox) => textbox.local_bounds(children),
            Self::Custom(behavior) => behavior.local_bounds(),
        }
    }

    fn marked_for_removal(&self) -> bool {
        match self {
            Self::Custom(behavior) => behavior.marked_for_removal(),
            _ => false,
        }
    }
}

/// A unit of the scene graph.
///
/// A node owns its children, carries a 2D transform and six independent
/// activation flags gating the three traversal kinds for itself and for the
/// recursion into its children. Everything is active by default.
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    transform: Transform2D,
    origin_flags: OriginFlags,
    kind: NodeKind,
    children: Vec<Node>,
    removal_marked: bool,

    event_handling_current: bool,
    event_handling_children: bool,
    updating_current: bool,
    updating_children: bool,
    drawing_current: bool,
    drawing_children: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self::group()
    }
}

impl Node {
    /// Build a node of the given kind with no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::next(),
            parent: None,
            transform: Transform2D::default(),
            origin_flags: OriginFlags::default(),
            kind,
            children: Vec::new(),
            removal_marked: false,
            event_handling_current: true,
            event_handling_children: true,
            updating_current: true,
            updating_children: true,
            drawing_current: true,
            drawing_children: true,
        }
    }

    /// Build a node with pre-attached children (parent references are set).
    pub(crate) fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        let mut node = Self::new(kind);
        for child in children {
            node.attach_child(child);
        }
        node
    }

    /// Plain grouping node.
    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// Quad node.
    pub fn quad(quad: QuadNode) -> Self {
        Self::new(NodeKind::Quad(quad))
    }

    /// Text node.
    pub fn text(text: TextNode) -> Self {
        Self::new(NodeKind::Text(text))
    }

    /// Particle system node.
    pub fn particles(particles: ParticleSystem) -> Self {
        Self::new(NodeKind::Particles(particles))
    }

    /// Node with a user-defined behavior.
    pub fn custom(behavior: impl NodeBehavior + 'static) -> Self {
        Self::new(NodeKind::Custom(Box::new(behavior)))
    }

    /// This node's identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Identity of the owning parent, `None` for a root or detached node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's capability kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable access to the node's capability kind.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// The node's local transform.
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Mutable access to the node's local transform.
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }

    /// Direct children in attach order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Find a direct child by identity.
    pub fn child(&self, id: NodeId) -> Option<&Node> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Find a direct child by identity, mutably.
    pub fn child_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Transfer ownership of `child` into this node's child sequence,
    /// appending it at the end and setting its parent back-reference.
    pub fn attach_child(&mut self, mut child: Node) -> NodeId {
        child.parent = Some(self.id);
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Detach the direct child with identity `id`, clearing its parent
    /// back-reference and returning ownership to the caller.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a direct child; detaching a non-child is a
    /// programming error, not a recoverable condition.
    pub fn detach_child(&mut self, id: NodeId) -> Node {
        let index = self
            .children
            .iter()
            .position(|c| c.id == id)
            .unwrap_or_else(|| panic!("detach_child: {id:?} is not a direct child"));

        let mut child = self.children.remove(index);
        child.parent = None;
        child
    }

    /// Mark this node for removal; its parent excises it on the next update
    /// sweep, destroying it and its subtree.
    pub fn mark_for_removal(&mut self) {
        self.removal_marked = true;
    }

    /// Whether this node asks to be removed from the scene.
    pub fn is_marked_for_removal(&self) -> bool {
        self.removal_marked || self.kind.marked_for_removal()
    }

    /// (De)activate event handling for this node, its children, or both.
    pub fn activate_event_handling(&mut self, target: ActivationTarget, flag: bool) {
        match target {
            ActivationTarget::Current => self.event_handling_current = flag,
            ActivationTarget::Children => self.event_handling_children = flag,
            ActivationTarget::All => {
                self.event_handling_current = flag;
                self.event_handling_children = flag;
            }
        }
    }

    /// (De)activate updating for this node, its children, or both.
    pub fn activate_updating(&mut self, target: ActivationTarget, flag: bool) {
        match target {
            ActivationTarget::Current => self.updating_current = flag,
            ActivationTarget::Children => self.updating_children = flag,
            ActivationTarget::All => {
                self.updating_current = flag;
                self.updating_children = flag;
            }
        }
    }

    /// (De)activate drawing for this node, its children, or both.
    pub fn activate_drawing(&mut self, target: ActivationTarget, flag: bool) {
        match target {
            ActivationTarget::Current => self.drawing_current = flag,
            ActivationTarget::Children => self.drawing_children = flag,
            ActivationTarget::All => {
                self.drawing_current = flag;
                self.drawing_children = flag;
            }
        }
    }

    /// Whether event handling is active for the given target (`All` requires
    /// both flags).
    pub fn event_handling_active(&self, target: ActivationTarget) -> bool {
        match target {
            ActivationTarget::Current => self.event_handling_current,
            ActivationTarget::Children => self.event_handling_children,
            ActivationTarget::All => self.event_handling_current && self.event_handling_children,
        }
    }

    /// Whether updating is active for the given target.
    pub fn updating_active(&self, target: ActivationTarget) -> bool {
        match target {
            ActivationTarget::Current => self.updating_current,
            ActivationTarget::Children => self.updating_children,
            ActivationTarget::All => self.updating_current && self.updating_children,
        }
    }

    /// Whether drawing is active for the given target.
    pub fn drawing_active(&self, target: ActivationTarget) -> bool {
        match target {
            ActivationTarget::Current => self.drawing_current,
            ActivationTarget::Children => self.drawing_children,
            ActivationTarget::All => self.drawing_current && self.drawing_children,
        }
    }

    /// Send an event to this node and, in attach order, to every child.
    pub fn handle_event(&mut self, event: &Event, ctx: &SceneCtx<'_>) {
        let ctx = ctx.descend(self.transform.affine());

        if self.event_handling_current {
            let Self { kind, children, .. } = self;
            kind.handle_event(event, &ctx, children);
        }
        if self.event_handling_children {
            for child in &mut self.children {
                child.handle_event(event, &ctx);
            }
        }
    }

    /// Advance this node and its children by `dt`.
    ///
    /// Children marked for removal are excised (and destroyed) before the
    /// node's own hook runs, so a removed child never sees this pass.
    pub fn update(&mut self, dt: Duration, ctx: &SceneCtx<'_>) {
        self.children.retain(|child| !child.is_marked_for_removal());

        let ctx = ctx.descend(self.transform.affine());

        if self.updating_current {
            let Self {
                kind,
                children,
                transform,
                ..
            } = self;
            kind.update(dt, &ctx, children, transform);
        }
        if self.updating_children {
            for child in &mut self.children {
                child.update(dt, &ctx);
            }
        }
    }

    /// Draw this node and its children, composing transforms down the tree.
    pub fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        let states = states.transformed(self.transform.affine());

        if self.drawing_current {
            self.kind.draw(target, &states);
        }
        if self.drawing_children {
            for child in &self.children {
                child.draw(target, &states);
            }
        }
    }

    /// Local-space bounds as reported by the node's kind.
    pub fn local_bounds(&self) -> Rect {
        self.kind.local_bounds(&self.children)
    }

    /// Axis-aligned bounding box of the local bounds under `world` composed
    /// with this node's own transform.
    pub fn global_bounds(&self, world: Affine) -> Rect {
        (world * self.transform.affine()).transform_rect_bbox(self.local_bounds())
    }

    /// Place the transform origin automatically from the local bounds.
    pub fn set_origin_flags(&mut self, flags: OriginFlags) {
        self.transform.origin = origin_for(self.local_bounds(), flags).to_vec2();
        self.origin_flags = flags;
    }

    /// Currently applied origin flags.
    pub fn origin_flags(&self) -> OriginFlags {
        self.origin_flags
    }

    /// Recompute the origin from the current flags, after bounds changed.
    pub fn correct_origin(&mut self) {
        self.set_origin_flags(self.origin_flags);
    }

    /// Position this node inside `target` (the aligning node's local bounds,
    /// typically the parent's) according to `flags`, `padding` away from the
    /// edges the flags name.
    pub fn set_relative_alignment(&mut self, target: Rect, flags: OriginFlags, padding: f64) {
        self.transform.translate = alignment_position(target, flags, padding).to_vec2();
    }

    /// Borrow button capability and children together, for widget operations
    /// that re-flag visual children. Works for buttons and textboxes.
    pub fn button_mut(&mut self) -> Option<ButtonHandle<'_>> {
        let Self { kind, children, .. } = self;
        match kind {
            NodeKind::Button(button) => Some(ButtonHandle::new(button, children)),
            NodeKind::Textbox(textbox) => Some(ButtonHandle::new(textbox.button_mut(), children)),
            _ => None,
        }
    }

    /// Borrow textbox capability and children together.
    pub fn textbox_mut(&mut self) -> Option<TextboxHandle<'_>> {
        let Self { kind, children, .. } = self;
        match kind {
            NodeKind::Textbox(textbox) => Some(TextboxHandle::new(textbox, children)),
            _ => None,
        }
    }

    /// Quad capability of this node, if it is one.
    pub fn as_quad(&self) -> Option<&QuadNode> {
        match &self.kind {
            NodeKind::Quad(quad) => Some(quad),
            _ => None,
        }
    }

    /// Mutable quad capability of this node, if it is one.
    pub fn as_quad_mut(&mut self) -> Option<&mut QuadNode> {
        match &mut self.kind {
            NodeKind::Quad(quad) => Some(quad),
            _ => None,
        }
    }

    /// Text capability of this node, if it is one.
    pub fn as_text(&self) -> Option<&TextNode> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable text capability of this node, if it is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextNode> {
        match &mut self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable particle-system capability of this node, if it is one.
    pub fn as_particles_mut(&mut self) -> Option<&mut ParticleSystem> {
        match &mut self.kind {
            NodeKind::Particles(particles) => Some(particles),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
