use std::time::Duration;

use crate::backend::Window;
use crate::event::Event;
use crate::state::stack::StackRequests;

/// Identifier tying a state kind to its registered factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub &'static str);

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// What a state sees during event and update passes.
///
/// Stack mutations go through `requests`, which can only enqueue commands;
/// they apply after the pass finishes. A state can therefore never re-enter
/// stack traversal from inside a pass.
pub struct StateCtx<'a> {
    /// The host window and its capabilities.
    pub window: &'a mut dyn Window,
    /// Deferred stack mutation queue.
    pub requests: &'a mut StackRequests,
}

/// One screen of the application (menu, gameplay, pause overlay).
///
/// States live on the [`StateStack`](crate::state::StateStack) and are built
/// by their registered factory when a push request is applied.
pub trait State {
    /// React to an input event. Return `false` to stop the event from
    /// propagating to the states below.
    fn handle_event(&mut self, event: &Event, ctx: &mut StateCtx<'_>) -> bool;

    /// Advance by `dt`. Return `false` to stop the update pass from reaching
    /// the states below (a pause screen freezing gameplay under it).
    fn update(&mut self, dt: Duration, ctx: &mut StateCtx<'_>) -> bool;

    /// Draw this state. The stack draws bottom-to-top, so overlays paint over
    /// what is underneath.
    fn draw(&mut self, window: &mut dyn Window);
}
