use std::cell::RefCell;

use super::*;
use crate::backend::{NullMetrics, Primitive, TextMetrics, Vertex};
use crate::foundation::core::Point;

/// Metrics reporting a fixed bounds rect for any string.
struct FixedMetrics(Rect);

impl TextMetrics for FixedMetrics {
    fn text_bounds(&self, _spec: &TextSpec<'_>) -> Rect {
        self.0
    }

    fn char_position(&self, _spec: &TextSpec<'_>, _index: usize) -> Point {
        Point::ZERO
    }
}

/// Target recording text draw calls as (string, color, world translation).
#[derive(Default)]
struct TextRecorder {
    calls: RefCell<Vec<(String, Color, Vec2)>>,
}

impl RenderTarget for TextRecorder {
    fn clear(&mut self, _color: Color) {}

    fn draw_vertices(&mut self, _: Primitive, _: &[Vertex], _: &RenderStates) {}

    fn draw_text(&mut self, spec: &TextSpec<'_>, color: Color, states: &RenderStates) {
        self.calls.borrow_mut().push((
            spec.string.to_owned(),
            color,
            states.transform.translation(),
        ));
    }
}

fn ctx_with<'a>(metrics: &'a dyn TextMetrics) -> SceneCtx<'a> {
    SceneCtx::new(Point::ZERO, metrics)
}

#[test]
fn bounds_are_measured_on_update_and_cached() {
    let mut text = TextNode::new("hello", 24.0);
    assert_eq!(text.local_bounds(), Rect::ZERO);

    let metrics = FixedMetrics(Rect::new(0.0, 4.0, 60.0, 28.0));
    text.update(&ctx_with(&metrics));
    assert_eq!(text.local_bounds(), Rect::new(0.0, 4.0, 60.0, 28.0));

    // Cached value survives without further measurement.
    assert_eq!(text.local_bounds(), Rect::new(0.0, 4.0, 60.0, 28.0));
}

#[test]
fn set_string_refreshes_bounds_on_next_update() {
    let mut text = TextNode::new("hi", 24.0);
    text.update(&ctx_with(&NullMetrics));
    text.set_string("much longer string");
    assert_eq!(text.string(), "much longer string");
    assert_eq!(text.local_bounds(), Rect::ZERO);
}

#[test]
fn shadow_draws_first_with_its_offset() {
    let mut text = TextNode::new("shadowed", 24.0);
    text.set_color(Color::WHITE);
    text.set_shadow(Some(TextShadow {
        offset: Vec2::new(2.0, 3.0),
        color: Color::BLACK,
    }));

    let mut target = TextRecorder::default();
    text.draw(&mut target, &RenderStates::default());

    let calls = target.calls.into_inner();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, Color::BLACK);
    assert_eq!(calls[0].2, Vec2::new(2.0, 3.0));
    assert_eq!(calls[1].1, Color::WHITE);
    assert_eq!(calls[1].2, Vec2::ZERO);
}

#[test]
fn plain_text_draws_once() {
    let mut target = TextRecorder::default();
    TextNode::new("plain", 12.0).draw(&mut target, &RenderStates::default());
    assert_eq!(target.calls.into_inner().len(), 1);
}
