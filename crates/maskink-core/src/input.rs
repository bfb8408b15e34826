//! Input event types delivered by the host.
//!
//! The host owns the actual window/event-loop plumbing and forwards events
//! here in its own screen coordinates. Listeners should live exactly as long
//! as the editor they feed; there is no ambient global state to leak.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left mouse button, pen tip or touch contact.
    Primary,
    /// Middle mouse button. Always pans, modifier or not.
    Middle,
}

/// Modifier keys state, as reported alongside key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in host screen coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: PointerButton },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the element or capture was lost mid-gesture.
    /// Handled as an implicit up: never leaves a gesture dangling.
    Leave,
}

/// Wheel event in host screen coordinates. Positive `delta_y` scrolls down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point,
    pub delta_y: f64,
}

/// Keys the editor reacts to. Hosts drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Pan modifier: hold to pan with the primary button.
    Space,
    /// Undo with Ctrl, redo with Ctrl+Shift.
    Z,
    /// Redo with Ctrl.
    Y,
    /// Cancel the in-progress gesture.
    Escape,
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed { key: Key, modifiers: Modifiers },
    Released { key: Key },
}
