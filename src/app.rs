//! The application driver: fixed-timestep loop around a [`StateStack`].

use std::time::{Duration, Instant};

use crate::backend::Window;
use crate::event::Event;
use crate::foundation::core::Color;
use crate::state::StateStack;

const DEFAULT_FPS: u32 = 60;

/// Owns the window and the state stack and runs the main loop.
///
/// Updates run on a fixed timestep (decoupled from render rate): frame time
/// is accumulated and consumed in whole steps, with events re-polled before
/// each step so input never lags a catch-up burst. An optional frame-rate
/// limiter sleeps off leftover frame budget after presenting.
pub struct Application<W: Window> {
    window: W,
    stack: StateStack,
    time_per_frame: Duration,
    frame_limit: Option<Duration>,
    current_fps: u32,
    clear_color: Color,
}

impl<W: Window> Application<W> {
    /// Wrap a host window, with a 60 Hz timestep and limiter.
    pub fn new(window: W) -> Self {
        Self {
            window,
            stack: StateStack::new(),
            time_per_frame: Duration::from_secs(1) / DEFAULT_FPS,
            frame_limit: Some(Duration::from_secs(1) / DEFAULT_FPS),
            current_fps: DEFAULT_FPS,
            clear_color: Color::BLACK,
        }
    }

    /// The state stack, for registering and seeding states before `run`.
    pub fn stack_mut(&mut self) -> &mut StateStack {
        &mut self.stack
    }

    /// The host window.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Frames rendered during the last full second.
    pub fn fps(&self) -> u32 {
        self.current_fps
    }

    /// Set the frame color the render pass clears with.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// The configured clear color.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Retune both the fixed update timestep and the frame limiter to `cap`
    /// frames per second.
    ///
    /// # Panics
    ///
    /// Panics when `cap` is zero.
    pub fn set_fps_cap(&mut self, cap: u32) {
        assert!(cap > 0, "fps cap must be positive");
        self.time_per_frame = Duration::from_secs(1) / cap;
        self.frame_limit = Some(self.time_per_frame);
    }

    /// Run until the window closes (which happens as soon as the state stack
    /// empties).
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) {
        let mut clock = Instant::now();
        let mut lag = Duration::ZERO;
        let mut fps_window = Duration::ZERO;
        let mut frames: u32 = 0;

        while self.window.is_open() {
            self.process_events();

            let now = Instant::now();
            let elapsed = now - clock;
            clock = now;

            // Rolling one-second FPS windows.
            fps_window += elapsed;
            if fps_window >= Duration::from_secs(1) {
                fps_window = Duration::ZERO;
                self.current_fps = frames;
                frames = 0;
            } else {
                frames += 1;
            }

            lag += elapsed;
            while lag > self.time_per_frame {
                lag -= self.time_per_frame;
                self.process_events();
                self.update();
            }

            self.render();

            if let Some(limit) = self.frame_limit {
                std::thread::sleep(limit.saturating_sub(clock.elapsed()));
            }
        }
    }

    /// Drain the event queue into the stack.
    ///
    /// A close request clears the stack before the event is dispatched, so
    /// the clear applies in the same pass; an empty stack closes the window.
    pub(crate) fn process_events(&mut self) {
        while let Some(event) = self.window.poll_event() {
            if event == Event::CloseRequested {
                self.stack.clear_states();
            }
            self.stack.handle_event(&event, &mut self.window);
            if self.stack.is_empty() {
                self.window.close();
            }
        }
    }

    pub(crate) fn update(&mut self) {
        self.stack.update(self.time_per_frame, &mut self.window);
    }

    pub(crate) fn render(&mut self) {
        self.window.clear(self.clear_color);
        self.stack.draw(&mut self.window);
        self.window.present();
    }
}
