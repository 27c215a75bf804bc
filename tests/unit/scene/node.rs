use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::backend::{NullMetrics, Primitive, TextSpec, Vertex};
use crate::foundation::core::{Color, Vec2};

type Log = Rc<RefCell<Vec<String>>>;

/// Behavior that records which hooks ran on it.
struct Probe {
    name: &'static str,
    log: Log,
}

impl Probe {
    fn node(name: &'static str, log: &Log) -> Node {
        Node::custom(Probe {
            name,
            log: Rc::clone(log),
        })
    }
}

impl NodeBehavior for Probe {
    fn on_event(&mut self, _event: &Event, _ctx: &SceneCtx<'_>, _children: &mut [Node]) {
        self.log.borrow_mut().push(format!("event:{}", self.name));
    }

    fn on_update(
        &mut self,
        _dt: Duration,
        _ctx: &SceneCtx<'_>,
        _children: &mut [Node],
        _transform: &mut Transform2D,
    ) {
        self.log.borrow_mut().push(format!("update:{}", self.name));
    }

    fn on_draw(&self, _target: &mut dyn RenderTarget, _states: &RenderStates) {
        self.log.borrow_mut().push(format!("draw:{}", self.name));
    }
}

/// Behavior that captures the world transform it updates under.
struct WorldProbe {
    seen: Rc<RefCell<Option<Affine>>>,
}

impl NodeBehavior for WorldProbe {
    fn on_update(
        &mut self,
        _dt: Duration,
        _ctx: &SceneCtx<'_>,
        _children: &mut [Node],
        _transform: &mut Transform2D,
    ) {
    }

    fn on_event(&mut self, _event: &Event, ctx: &SceneCtx<'_>, _children: &mut [Node]) {
        *self.seen.borrow_mut() = Some(ctx.world);
    }
}

struct NoopTarget;

impl RenderTarget for NoopTarget {
    fn clear(&mut self, _color: Color) {}
    fn draw_vertices(&mut self, _: Primitive, _: &[Vertex], _: &RenderStates) {}
    fn draw_text(&mut self, _: &TextSpec<'_>, _: Color, _: &RenderStates) {}
}

fn ctx() -> SceneCtx<'static> {
    SceneCtx::new(Point::ZERO, &NullMetrics)
}

const DT: Duration = Duration::from_millis(16);

#[test]
fn attach_sets_and_detach_clears_the_parent() {
    let mut parent = Node::group();
    let mut child = Node::group();
    child.activate_drawing(ActivationTarget::Current, false);
    let child_id = child.id();

    assert_eq!(child.parent(), None);
    parent.attach_child(child);
    assert_eq!(parent.child(child_id).unwrap().parent(), Some(parent.id()));

    let detached = parent.detach_child(child_id);
    assert_eq!(detached.parent(), None);
    // Detaching does not touch the node's own state.
    assert!(!detached.drawing_active(ActivationTarget::Current));
    assert!(detached.drawing_active(ActivationTarget::Children));
    assert!(parent.children().is_empty());
}

#[test]
#[should_panic(expected = "not a direct child")]
fn detaching_a_non_child_panics() {
    let mut parent = Node::group();
    let stranger = Node::group();
    parent.detach_child(stranger.id());
}

#[test]
fn node_ids_are_unique() {
    assert_ne!(Node::group().id(), Node::group().id());
}

#[test]
fn activation_targets_are_independent() {
    let mut node = Node::group();

    node.activate_updating(ActivationTarget::Current, false);
    assert!(!node.updating_active(ActivationTarget::Current));
    assert!(node.updating_active(ActivationTarget::Children));
    assert!(!node.updating_active(ActivationTarget::All));

    // The other two flag groups are untouched.
    assert!(node.event_handling_active(ActivationTarget::All));
    assert!(node.drawing_active(ActivationTarget::All));

    node.activate_updating(ActivationTarget::All, true);
    assert!(node.updating_active(ActivationTarget::All));
}

#[test]
fn deactivated_current_skips_own_hook_but_not_children() {
    let log: Log = Log::default();
    let mut root = Probe::node("root", &log);
    root.attach_child(Probe::node("child", &log));

    root.activate_updating(ActivationTarget::Current, false);
    root.update(DT, &ctx());

    assert_eq!(*log.borrow(), vec!["update:child"]);
}

#[test]
fn deactivated_children_skips_recursion_but_not_own_hook() {
    let log: Log = Log::default();
    let mut root = Probe::node("root", &log);
    root.attach_child(Probe::node("child", &log));

    root.activate_event_handling(ActivationTarget::Children, false);
    root.handle_event(&Event::FocusGained, &ctx());

    assert_eq!(*log.borrow(), vec!["event:root"]);
}

#[test]
fn draw_walks_bottom_to_top_in_attach_order() {
    let log: Log = Log::default();
    let mut root = Probe::node("root", &log);
    let mut a = Probe::node("a", &log);
    a.attach_child(Probe::node("a1", &log));
    root.attach_child(a);
    root.attach_child(Probe::node("b", &log));

    root.draw(&mut NoopTarget, &RenderStates::default());

    assert_eq!(*log.borrow(), vec!["draw:root", "draw:a", "draw:a1", "draw:b"]);
}

#[test]
fn marked_children_are_swept_before_the_update_pass() {
    let log: Log = Log::default();
    let mut root = Probe::node("root", &log);
    let doomed = root.attach_child(Probe::node("doomed", &log));
    root.attach_child(Probe::node("kept", &log));

    root.child_mut(doomed).unwrap().mark_for_removal();
    root.update(DT, &ctx());

    // The marked child is destroyed without seeing this pass.
    assert_eq!(*log.borrow(), vec!["update:root", "update:kept"]);
    assert_eq!(root.children().len(), 1);
    assert!(root.child(doomed).is_none());
}

#[test]
fn nodes_are_never_removed_by_default() {
    let log: Log = Log::default();
    let mut root = Node::group();
    root.attach_child(Probe::node("child", &log));

    for _ in 0..3 {
        root.update(DT, &ctx());
    }
    assert_eq!(root.children().len(), 1);
}

#[test]
fn world_transform_accumulates_down_the_tree() {
    let seen = Rc::new(RefCell::new(None));
    let mut leaf = Node::custom(WorldProbe { seen: Rc::clone(&seen) });
    leaf.transform_mut().translate = Vec2::new(1.0, 2.0);

    let mut root = Node::group();
    root.transform_mut().translate = Vec2::new(10.0, 5.0);
    root.attach_child(leaf);

    root.handle_event(&Event::FocusGained, &ctx());

    let world = seen.borrow().unwrap();
    assert_eq!(world.translation(), Vec2::new(11.0, 7.0));
}

#[test]
fn global_bounds_compose_world_and_local_transforms() {
    let mut node = Node::quad(QuadNode::with_size(Vec2::new(10.0, 10.0)));
    node.transform_mut().translate = Vec2::new(5.0, 5.0);

    let bounds = node.global_bounds(Affine::IDENTITY);
    assert_eq!(bounds, Rect::new(5.0, 5.0, 15.0, 15.0));

    let shifted = node.global_bounds(Affine::translate(Vec2::new(100.0, 0.0)));
    assert_eq!(shifted, Rect::new(105.0, 5.0, 115.0, 15.0));
}

#[test]
fn origin_flags_place_the_pivot_from_local_bounds() {
    let mut node = Node::quad(QuadNode::with_size(Vec2::new(10.0, 20.0)));

    node.set_origin_flags(OriginFlags::empty());
    assert_eq!(node.transform().origin, Vec2::new(5.0, 10.0));

    node.set_origin_flags(OriginFlags::RIGHT | OriginFlags::BOTTOM);
    assert_eq!(node.transform().origin, Vec2::new(10.0, 20.0));
}

#[test]
fn relative_alignment_positions_inside_a_target() {
    let mut node = Node::quad(QuadNode::with_size(Vec2::new(10.0, 10.0)));
    node.set_relative_alignment(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        OriginFlags::RIGHT | OriginFlags::TOP,
        4.0,
    );
    assert_eq!(node.transform().translate, Vec2::new(96.0, 4.0));
}

#[test]
fn widget_handles_are_kind_gated() {
    let mut group = Node::group();
    assert!(group.button_mut().is_none());
    assert!(group.textbox_mut().is_none());
}
