use crate::foundation::core::Point;

/// Mouse buttons reported by the windowing backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// Keyboard keys the library reacts to.
///
/// Printable input arrives through [`Event::TextEntered`] instead; this enum only
/// covers the control keys widgets care about, with an escape hatch for backends
/// that want to forward everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Tabulator.
    Tab,
    /// Space bar.
    Space,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Backend-specific scancode not covered above.
    Other(u32),
}

/// A polled input or window event.
///
/// Pointer positions are reported in pixel space; use
/// [`Window::map_pixel_to_world`](crate::backend::Window::map_pixel_to_world) to
/// obtain world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The user asked to close the window.
    CloseRequested,
    /// The window framebuffer was resized.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The window gained input focus.
    FocusGained,
    /// The window lost input focus.
    FocusLost,
    /// A key went down.
    KeyPressed {
        /// The pressed key.
        key: Key,
    },
    /// A key went up.
    KeyReleased {
        /// The released key.
        key: Key,
    },
    /// A unicode character was produced by the keyboard layout.
    TextEntered {
        /// The entered character.
        ch: char,
    },
    /// The pointer moved.
    PointerMoved {
        /// Pointer position in pixel space.
        position: Point,
    },
    /// A mouse button went down.
    MouseButtonPressed {
        /// The pressed button.
        button: MouseButton,
        /// Pointer position in pixel space.
        position: Point,
    },
    /// A mouse button went up.
    MouseButtonReleased {
        /// The released button.
        button: MouseButton,
        /// Pointer position in pixel space.
        position: Point,
    },
}
