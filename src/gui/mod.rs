//! GUI widgets layered on the scene graph.

pub mod button;
pub mod textbox;

pub use button::{Button, ButtonHandle, ButtonState};
pub use textbox::{Textbox, TextboxHandle};
