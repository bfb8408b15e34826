//! The mask editor facade.
//!
//! The single entry point for hosts: load an image, forward raw input
//! events, configure the brush, undo/redo/clear, export the mask. Everything
//! else in the surrounding application (upload, remote edit APIs, libraries,
//! autosave) stays outside and receives the exported mask as an opaque
//! buffer.

use crate::error::{EditorError, EditorResult};
use crate::gesture::{GestureController, GestureState, GestureTarget};
use crate::history::HistoryStack;
use crate::input::{KeyEvent, PointerEvent, WheelEvent};
use crate::viewport::Viewport;
use kurbo::Size;
use maskink_raster::{encode_png, BrushConfig, MaskBitmap, SourceImage, DEFAULT_TINT};
use peniko::Color;
use uuid::Uuid;

/// Per-image editing state, created on `load` and replaced wholesale by the
/// next `load`.
#[derive(Debug, Clone)]
struct Session {
    source: SourceImage,
    mask: MaskBitmap,
    history: HistoryStack,
}

/// Owns the mask bitmap, viewport, brush, gesture state and history for one
/// editing session. Exactly one editor instance mutates these; hosts must
/// serialize access (e.g. disable input while an export is in flight).
#[derive(Debug)]
pub struct MaskEditor {
    id: Uuid,
    viewport: Viewport,
    gesture: GestureController,
    brush: BrushConfig,
    tint: Color,
    container: Size,
    session: Option<Session>,
}

impl Default for MaskEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskEditor {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            viewport: Viewport::new(),
            gesture: GestureController::new(),
            brush: BrushConfig::default(),
            tint: DEFAULT_TINT,
            container: Size::new(800.0, 600.0),
            session: None,
        }
    }

    /// Session identifier, for host bookkeeping and log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Load a source image, replacing any previous session.
    ///
    /// Fails with `InvalidImage` on zero dimensions or a pixel buffer that
    /// does not match them; a failed load leaves the previous session fully
    /// intact. On success the mask is blank, the viewport is fitted to the
    /// container, and history is reset to a single blank snapshot.
    pub fn load(&mut self, image: SourceImage) -> EditorResult<()> {
        if image.width() == 0 || image.height() == 0 || !image.buffer_consistent() {
            return Err(EditorError::InvalidImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let mask = MaskBitmap::blank(image.width(), image.height());
        self.viewport.fit(
            self.container,
            Size::new(image.width() as f64, image.height() as f64),
        );
        self.gesture.reset();
        log::info!(
            "editor {}: loaded image {}x{}",
            self.id,
            image.width(),
            image.height()
        );
        self.session = Some(Session {
            history: HistoryStack::new(mask.clone()),
            mask,
            source: image,
        });
        Ok(())
    }

    /// Whether a source image is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Update the host container size; refits the viewport when loaded.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
        if let Some(session) = &self.session {
            self.viewport.fit(
                size,
                Size::new(session.source.width() as f64, session.source.height() as f64),
            );
        }
    }

    /// Replace the brush configuration. Validated here so the rasterizer can
    /// trust its inputs; an active stroke keeps the snapshot it started with.
    pub fn set_brush(&mut self, config: BrushConfig) -> EditorResult<()> {
        if !(config.size_px > 0.0) || !config.size_px.is_finite() {
            return Err(EditorError::InvalidBrushConfig(format!(
                "size_px must be positive, got {}",
                config.size_px
            )));
        }
        if !(config.opacity > 0.0 && config.opacity <= 1.0) {
            return Err(EditorError::InvalidBrushConfig(format!(
                "opacity must be in (0, 1], got {}",
                config.opacity
            )));
        }
        self.brush = config;
        Ok(())
    }

    /// Current brush configuration.
    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// Set the mask highlight color. Affects subsequent strokes only.
    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    /// Forward a pointer event. Ignored until an image is loaded.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(session) = &mut self.session else { return };
        let mut target = GestureTarget {
            viewport: &mut self.viewport,
            mask: &mut session.mask,
            history: &mut session.history,
            brush: &self.brush,
            tint: self.tint,
        };
        self.gesture.on_pointer(event, &mut target);
    }

    /// Forward a wheel event (anchored zoom). Ignored until loaded.
    pub fn handle_wheel(&mut self, event: WheelEvent) {
        if self.session.is_none() {
            return;
        }
        self.gesture.on_wheel(event, &mut self.viewport);
    }

    /// Forward a keyboard event. Ignored until loaded.
    pub fn handle_key(&mut self, event: KeyEvent) {
        let Some(session) = &mut self.session else { return };
        let mut target = GestureTarget {
            viewport: &mut self.viewport,
            mask: &mut session.mask,
            history: &mut session.history,
            brush: &self.brush,
            tint: self.tint,
        };
        self.gesture.on_key(event, &mut target);
    }

    /// Blank the mask in place and commit a snapshot. Clearing an already
    /// blank mask still records an action, by design.
    pub fn clear(&mut self) -> EditorResult<()> {
        let session = self.session.as_mut().ok_or(EditorError::NotLoaded)?;
        session.mask.clear_in_place();
        session.history.push(&session.mask);
        log::debug!("editor {}: mask cleared", self.id);
        Ok(())
    }

    /// Step back one committed gesture. A no-op at the bottom of the stack
    /// or before load.
    pub fn undo(&mut self) {
        if let Some(session) = &mut self.session {
            if let Some(snapshot) = session.history.undo() {
                session.mask.copy_from(snapshot);
            }
        }
    }

    /// Step forward one undone gesture. A no-op at the top of the stack or
    /// before load.
    pub fn redo(&mut self) {
        if let Some(session) = &mut self.session {
            if let Some(snapshot) = session.history.redo() {
                session.mask.copy_from(snapshot);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_redo())
    }

    /// Export the mask as PNG bytes at the source image's native pixel
    /// dimensions, independent of the current zoom/pan.
    pub fn export_mask(&self) -> EditorResult<Vec<u8>> {
        let session = self.session.as_ref().ok_or(EditorError::NotLoaded)?;
        let bytes = encode_png(&session.mask)?;
        log::info!("editor {}: exported mask ({} bytes)", self.id, bytes.len());
        Ok(bytes)
    }

    /// Discard in-progress (uncommitted) edits: abort any active gesture and
    /// roll the mask back to the last committed snapshot. Never fails.
    pub fn cancel(&mut self) {
        if let Some(session) = &mut self.session {
            let mut target = GestureTarget {
                viewport: &mut self.viewport,
                mask: &mut session.mask,
                history: &mut session.history,
                brush: &self.brush,
                tint: self.tint,
            };
            self.gesture.cancel(&mut target);
        }
    }

    /// Viewport state, for host rendering.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current gesture state, for host cursor feedback.
    pub fn gesture_state(&self) -> &GestureState {
        self.gesture.state()
    }

    /// The live mask bitmap, when loaded.
    pub fn mask(&self) -> Option<&MaskBitmap> {
        self.session.as_ref().map(|s| &s.mask)
    }

    /// The loaded source image.
    pub fn source(&self) -> Option<&SourceImage> {
        self.session.as_ref().map(|s| &s.source)
    }
}
