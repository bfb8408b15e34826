//! MaskInk Core Library
//!
//! State and orchestration for the interactive raster mask editor: the
//! viewport transform, the pointer/keyboard gesture state machine, snapshot
//! undo history, and the `MaskEditor` facade that hosts talk to.

pub mod editor;
pub mod error;
pub mod gesture;
pub mod history;
pub mod input;
pub mod viewport;

pub use editor::MaskEditor;
pub use error::{EditorError, EditorResult};
pub use gesture::{GestureController, GestureState};
pub use history::HistoryStack;
pub use input::{Key, KeyEvent, Modifiers, PointerButton, PointerEvent, WheelEvent};
pub use viewport::Viewport;

pub use maskink_raster::{
    decode_source, BrushConfig, BrushMode, BrushShape, MaskBitmap, SourceImage,
};
