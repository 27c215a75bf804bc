use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::backend::{Primitive, RenderStates, RenderTarget, TextMetrics, TextSpec, Vertex};
use crate::foundation::core::{Color, Point, Rect};

type Log = Rc<RefCell<Vec<String>>>;

struct FakeWindow {
    open: bool,
}

impl FakeWindow {
    fn new() -> Self {
        Self { open: true }
    }
}

impl RenderTarget for FakeWindow {
    fn clear(&mut self, _: Color) {}
    fn draw_vertices(&mut self, _: Primitive, _: &[Vertex], _: &RenderStates) {}
    fn draw_text(&mut self, _: &TextSpec<'_>, _: Color, _: &RenderStates) {}
}

impl TextMetrics for FakeWindow {
    fn text_bounds(&self, _: &TextSpec<'_>) -> Rect {
        Rect::ZERO
    }

    fn char_position(&self, _: &TextSpec<'_>, _: usize) -> Point {
        Point::ZERO
    }
}

impl Window for FakeWindow {
    fn poll_event(&mut self) -> Option<Event> {
        None
    }

    fn size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn map_pixel_to_world(&self, pixel: Point) -> Point {
        pixel
    }

    fn pointer_position(&self) -> Point {
        Point::ZERO
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn present(&mut self) {}
}

/// Scriptable state: logs every hook, optionally enqueues one stack command
/// on its first update, and propagates (or not) per configuration.
struct TestState {
    name: &'static str,
    log: Log,
    propagate: bool,
    on_first_update: Option<PendingChange>,
}

impl State for TestState {
    fn handle_event(&mut self, _event: &Event, _ctx: &mut StateCtx<'_>) -> bool {
        self.log.borrow_mut().push(format!("event:{}", self.name));
        self.propagate
    }

    fn update(&mut self, _dt: Duration, ctx: &mut StateCtx<'_>) -> bool {
        self.log.borrow_mut().push(format!("update:{}", self.name));
        if let Some(change) = self.on_first_update.take() {
            match change {
                PendingChange::Push(id) => ctx.requests.push_state(id),
                PendingChange::Pop => ctx.requests.pop_state(),
                PendingChange::Remove(id) => ctx.requests.remove_state(id),
                PendingChange::Clear => ctx.requests.clear_states(),
            }
        }
        self.propagate
    }

    fn draw(&mut self, _window: &mut dyn Window) {
        self.log.borrow_mut().push(format!("draw:{}", self.name));
    }
}

const A: StateId = StateId("a");
const B: StateId = StateId("b");

const DT: Duration = Duration::from_millis(16);

fn register(stack: &mut StateStack, id: StateId, name: &'static str, log: &Log, propagate: bool) {
    let log = Rc::clone(log);
    stack.register_state(id, move || TestState {
        name,
        log: Rc::clone(&log),
        propagate,
        on_first_update: None,
    });
}

fn flush(stack: &mut StateStack, window: &mut FakeWindow) {
    stack.update(DT, window);
}

#[test]
fn pushes_apply_only_when_a_pass_flushes() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);

    stack.push_state(A);
    assert!(stack.is_empty());

    flush(&mut stack, &mut window);
    assert_eq!(stack.len(), 1);
    assert!(stack.get_state(A).is_some());
}

#[test]
fn pending_changes_apply_in_request_order() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);
    register(&mut stack, B, "b", &log, true);

    // Net effect of Push(A), Push(B), Pop is exactly A.
    stack.push_state(A);
    stack.push_state(B);
    stack.pop_state();
    flush(&mut stack, &mut window);

    assert_eq!(stack.len(), 1);
    assert!(stack.get_state(A).is_some());
    assert!(stack.get_state(B).is_none());
}

#[test]
#[should_panic(expected = "no state registered")]
fn pushing_an_unregistered_id_panics_at_flush() {
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    stack.push_state(StateId("nowhere"));
    flush(&mut stack, &mut window);
}

#[test]
fn events_stop_at_the_first_non_propagating_state() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);
    register(&mut stack, B, "b", &log, false);

    stack.push_state(A);
    stack.push_state(B);
    flush(&mut stack, &mut window);
    log.borrow_mut().clear();

    stack.handle_event(&Event::FocusGained, &mut window);
    assert_eq!(*log.borrow(), vec!["event:b"]);
}

#[test]
fn propagating_states_pass_updates_top_down() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);
    register(&mut stack, B, "b", &log, true);

    stack.push_state(A);
    stack.push_state(B);
    flush(&mut stack, &mut window);
    log.borrow_mut().clear();

    stack.update(DT, &mut window);
    assert_eq!(*log.borrow(), vec!["update:b", "update:a"]);
}

#[test]
fn draw_walks_bottom_to_top() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);
    register(&mut stack, B, "b", &log, true);

    stack.push_state(A);
    stack.push_state(B);
    flush(&mut stack, &mut window);
    log.borrow_mut().clear();

    stack.draw(&mut window);
    assert_eq!(*log.borrow(), vec!["draw:a", "draw:b"]);
}

#[test]
fn removing_an_absent_id_is_a_no_op() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);

    stack.push_state(A);
    stack.remove_state(B);
    flush(&mut stack, &mut window);

    assert_eq!(stack.len(), 1);
}

#[test]
fn remove_targets_the_first_matching_state() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);
    register(&mut stack, B, "b", &log, true);

    stack.push_state(A);
    stack.push_state(B);
    stack.push_state(A);
    flush(&mut stack, &mut window);

    stack.remove_state(A);
    flush(&mut stack, &mut window);

    assert_eq!(stack.len(), 2);
    // The bottom A goes, the top one survives.
    assert!(stack.get_state(A).is_some());
    assert!(stack.get_state(B).is_some());
}

#[test]
fn clear_empties_the_stack() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, A, "a", &log, true);

    stack.push_state(A);
    flush(&mut stack, &mut window);
    stack.clear_states();
    flush(&mut stack, &mut window);

    assert!(stack.is_empty());
}

#[test]
fn requests_made_during_a_pass_apply_after_it() {
    let log = Log::default();
    let mut window = FakeWindow::new();
    let mut stack = StateStack::new();
    register(&mut stack, B, "b", &log, true);

    // A state that pushes B on its first update.
    let factory_log = Rc::clone(&log);
    stack.register_state(A, move || TestState {
        name: "a",
        log: Rc::clone(&factory_log),
        propagate: true,
        on_first_update: Some(PendingChange::Push(B)),
    });

    stack.push_state(A);
    flush(&mut stack, &mut window);
    log.borrow_mut().clear();

    // The pass where A requests the push does not visit B.
    stack.update(DT, &mut window);
    assert_eq!(*log.borrow(), vec!["update:a"]);
    assert_eq!(stack.len(), 2);

    // The next pass does, top-down.
    log.borrow_mut().clear();
    stack.update(DT, &mut window);
    assert_eq!(*log.borrow(), vec!["update:b", "update:a"]);
}
