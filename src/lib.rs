//! ember2d is a small support library for 2D games: a scene graph with
//! activation-flag gated traversal, GUI widgets, particles, frame animation,
//! a deferred-mutation state stack, and positional audio players.
//!
//! Everything platform-facing lives behind the capability traits in
//! [`backend`]; the library itself never opens windows, decodes assets, or
//! talks to an audio device.
//!
//! A minimal application registers its states and runs the driver:
//!
//! ```no_run
//! use ember2d::app::Application;
//! use ember2d::state::StateId;
//! # use ember2d::backend::*;
//! # use ember2d::event::Event;
//! # use ember2d::{Color, Point, Rect};
//! # struct MyWindow;
//! # impl RenderTarget for MyWindow {
//! #     fn clear(&mut self, _: Color) {}
//! #     fn draw_vertices(&mut self, _: Primitive, _: &[Vertex], _: &RenderStates) {}
//! #     fn draw_text(&mut self, _: &TextSpec<'_>, _: Color, _: &RenderStates) {}
//! # }
//! # impl TextMetrics for MyWindow {
//! #     fn text_bounds(&self, _: &TextSpec<'_>) -> Rect { Rect::ZERO }
//! #     fn char_position(&self, _: &TextSpec<'_>, _: usize) -> Point { Point::ZERO }
//! # }
//! # impl Window for MyWindow {
//! #     fn poll_event(&mut self) -> Option<Event> { None }
//! #     fn size(&self) -> (u32, u32) { (0, 0) }
//! #     fn map_pixel_to_world(&self, p: Point) -> Point { p }
//! #     fn pointer_position(&self) -> Point { Point::ZERO }
//! #     fn is_open(&self) -> bool { false }
//! #     fn close(&mut self) {}
//! #     fn present(&mut self) {}
//! # }
//! # struct MenuState;
//! # impl ember2d::state::State for MenuState {
//! #     fn handle_event(&mut self, _: &Event, _: &mut ember2d::state::StateCtx<'_>) -> bool { true }
//! #     fn update(&mut self, _: std::time::Duration, _: &mut ember2d::state::StateCtx<'_>) -> bool { true }
//! #     fn draw(&mut self, _: &mut dyn Window) {}
//! # }
//!
//! const MENU: StateId = StateId("menu");
//!
//! let mut app = Application::new(MyWindow);
//! app.stack_mut().register_state(MENU, || MenuState);
//! app.stack_mut().push_state(MENU);
//! app.run();
//! ```

#![forbid(unsafe_code)]

pub mod animation;
pub mod app;
pub mod audio;
pub mod backend;
pub mod event;
mod foundation;
pub mod gui;
pub mod resource;
pub mod scene;
pub mod state;

pub use foundation::core::{Affine, Color, Point, Rect, Vec2};
pub use foundation::error::{EmberError, EmberResult};
