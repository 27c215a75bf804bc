//! Application states and the deferred-mutation state stack.

pub mod stack;
#[allow(clippy::module_inception)]
pub mod state;

pub use stack::{PendingChange, StackRequests, StateStack};
pub use state::{State, StateCtx, StateId};
