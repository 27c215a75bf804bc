use std::collections::BTreeMap;
use std::time::Duration;

use smallvec::SmallVec;

use crate::backend::Window;
use crate::event::Event;
use crate::state::state::{State, StateCtx, StateId};

/// A deferred stack mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingChange {
    /// Construct the registered state and push it on top.
    Push(StateId),
    /// Remove the topmost state.
    Pop,
    /// Remove the first (bottom-most) state with this id; absent ids are a
    /// no-op.
    Remove(StateId),
    /// Remove every state.
    Clear,
}

/// FIFO queue of stack commands, the only mutation channel states get.
#[derive(Debug, Default)]
pub struct StackRequests {
    pending: SmallVec<[PendingChange; 4]>,
}

impl StackRequests {
    /// Enqueue a push of the state registered under `id`.
    pub fn push_state(&mut self, id: StateId) {
        self.pending.push(PendingChange::Push(id));
    }

    /// Enqueue a pop of the topmost state.
    pub fn pop_state(&mut self) {
        self.pending.push(PendingChange::Pop);
    }

    /// Enqueue removal of the first state with `id`.
    pub fn remove_state(&mut self, id: StateId) {
        self.pending.push(PendingChange::Remove(id));
    }

    /// Enqueue removal of every state.
    pub fn clear_states(&mut self) {
        self.pending.push(PendingChange::Clear);
    }
}

type Factory = Box<dyn Fn() -> Box<dyn State>>;

/// Stack of application states with deferred, FIFO-applied mutation.
///
/// Event and update passes walk top-down and stop as soon as a state returns
/// `false`; drawing walks bottom-up. Mutations requested during a pass apply
/// in request order once the pass is over, so the stack never changes under
/// an iterating traversal.
#[derive(Default)]
pub struct StateStack {
    stack: Vec<(StateId, Box<dyn State>)>,
    requests: StackRequests,
    factories: BTreeMap<StateId, Factory>,
}

impl StateStack {
    /// Empty stack with no registered states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory that builds the state pushed under `id`.
    pub fn register_state<S, F>(&mut self, id: StateId, factory: F)
    where
        S: State + 'static,
        F: Fn() -> S + 'static,
    {
        self.factories.insert(id, Box::new(move || Box::new(factory())));
    }

    /// Enqueue a push; applied after the current pass (or on the next one).
    pub fn push_state(&mut self, id: StateId) {
        self.requests.push_state(id);
    }

    /// Enqueue a pop of the topmost state.
    pub fn pop_state(&mut self) {
        self.requests.pop_state();
    }

    /// Enqueue removal of the first state with `id`.
    pub fn remove_state(&mut self, id: StateId) {
        self.requests.remove_state(id);
    }

    /// Enqueue removal of every state.
    pub fn clear_states(&mut self) {
        self.requests.clear_states();
    }

    /// Number of live states.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no state is live.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The topmost live state with `id`, if any.
    pub fn get_state(&self, id: StateId) -> Option<&dyn State> {
        self.stack
            .iter()
            .rev()
            .find(|(state_id, _)| *state_id == id)
            .map(|(_, state)| state.as_ref())
    }

    /// Send an event top-down, stopping at the first state that returns
    /// `false`, then apply the pending changes.
    pub fn handle_event(&mut self, event: &Event, window: &mut dyn Window) {
        let Self {
            stack, requests, ..
        } = self;
        for (_, state) in stack.iter_mut().rev() {
            let mut ctx = StateCtx {
                window: &mut *window,
                requests,
            };
            if !state.handle_event(event, &mut ctx) {
                break;
            }
        }

        self.apply_pending_changes();
    }

    /// Update top-down, stopping at the first state that returns `false`,
    /// then apply the pending changes.
    pub fn update(&mut self, dt: Duration, window: &mut dyn Window) {
        let Self {
            stack, requests, ..
        } = self;
        for (_, state) in stack.iter_mut().rev() {
            let mut ctx = StateCtx {
                window: &mut *window,
                requests,
            };
            if !state.update(dt, &mut ctx) {
                break;
            }
        }

        self.apply_pending_changes();
    }

    /// Draw every state bottom-to-top.
    pub fn draw(&mut self, window: &mut dyn Window) {
        for (_, state) in &mut self.stack {
            state.draw(window);
        }
    }

    /// Apply queued commands in request order.
    ///
    /// # Panics
    ///
    /// Panics when a push names an id with no registered factory.
    fn apply_pending_changes(&mut self) {
        for change in std::mem::take(&mut self.requests.pending) {
            tracing::debug!(?change, depth = self.stack.len(), "applying stack change");
            match change {
                PendingChange::Push(id) => {
                    let factory = self
                        .factories
                        .get(&id)
                        .unwrap_or_else(|| panic!("no state registered under id `{id}`"));
                    self.stack.push((id, factory()));
                }
                PendingChange::Pop => {
                    self.stack.pop();
                }
                PendingChange::Remove(id) => {
                    if let Some(pos) = self.stack.iter().position(|(state_id, _)| *state_id == id) {
                        self.stack.remove(pos);
                    }
                }
                PendingChange::Clear => self.stack.clear(),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/stack.rs"]
mod tests;
