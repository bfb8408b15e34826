//! Pointer/wheel/keyboard gesture state machine.
//!
//! Exactly one gesture is active at a time. The state is a tagged variant so
//! "drawing and panning simultaneously" is unrepresentable; wheel zoom is
//! orthogonal and never changes gesture state.

use crate::history::HistoryStack;
use crate::input::{Key, KeyEvent, PointerButton, PointerEvent, WheelEvent};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use maskink_raster::{paint_segment, BrushConfig, MaskBitmap};
use peniko::Color;

/// Wheel zoom step per event, matching common scroll-to-zoom feel.
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Current gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    /// Panning the viewport; anchor is the last pointer position in screen
    /// space.
    Panning { last_screen: Point },
    /// Painting a stroke. Holds the last point in image space and an
    /// immutable snapshot of the brush taken at pointer down: reconfiguring
    /// the brush mid-stroke affects the next stroke only.
    Drawing { last_image: Point, brush: BrushConfig },
}

/// Mutable editor state a gesture operates on. Borrowed per event from the
/// owning editor, which keeps exclusive ownership of the bitmap and history.
pub struct GestureTarget<'a> {
    pub viewport: &'a mut Viewport,
    pub mask: &'a mut MaskBitmap,
    pub history: &'a mut HistoryStack,
    pub brush: &'a BrushConfig,
    pub tint: Color,
}

/// Consumes host input events and drives the viewport, the rasterizer and
/// the history stack. Snapshots are committed once per completed gesture.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    /// Space held: primary-button drags pan instead of draw.
    pan_key_held: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            pan_key_held: false,
        }
    }

    /// Current gesture state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// True while a pan or draw gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Whether the pan modifier is currently held (hosts use this for the
    /// grab cursor).
    pub fn pan_key_held(&self) -> bool {
        self.pan_key_held
    }

    /// Reset to idle, e.g. when the editor loads a new image. Uncommitted
    /// stroke pixels are the caller's concern.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Process a pointer event against the live editor state.
    pub fn on_pointer(&mut self, event: PointerEvent, target: &mut GestureTarget<'_>) {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button, target),
            PointerEvent::Move { position } => self.pointer_move(position, target),
            // Leaving the element (or losing capture) mid-gesture is an
            // implicit up: commit and return to idle rather than dangle.
            PointerEvent::Up { .. } | PointerEvent::Leave => self.pointer_up(target),
        }
    }

    /// Anchored zoom in any state. Scrolling up (negative delta) zooms in.
    /// An in-progress stroke keeps its already-rasterized pixels; only
    /// subsequent segments use the new scale for their width.
    pub fn on_wheel(&self, event: WheelEvent, viewport: &mut Viewport) {
        if event.delta_y == 0.0 {
            return;
        }
        let factor = if event.delta_y < 0.0 { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
        viewport.zoom_at(event.position, factor);
    }

    /// Process a keyboard event: pan modifier, undo/redo shortcuts, cancel.
    pub fn on_key(&mut self, event: KeyEvent, target: &mut GestureTarget<'_>) {
        match event {
            KeyEvent::Pressed { key: Key::Space, .. } => {
                // An active stroke takes precedence: the modifier only arms
                // panning for the next pointer down.
                self.pan_key_held = true;
            }
            KeyEvent::Released { key: Key::Space } => {
                self.pan_key_held = false;
                // Abandon an in-progress pan without starting a stroke.
                if matches!(self.state, GestureState::Panning { .. }) {
                    self.state = GestureState::Idle;
                }
            }
            KeyEvent::Pressed { key: Key::Z, modifiers } if modifiers.command() => {
                // Shortcuts are ignored while a gesture is active.
                if matches!(self.state, GestureState::Idle) {
                    if modifiers.shift {
                        restore(target.history.redo(), target.mask);
                    } else {
                        restore(target.history.undo(), target.mask);
                    }
                }
            }
            KeyEvent::Pressed { key: Key::Y, modifiers } if modifiers.command() => {
                if matches!(self.state, GestureState::Idle) {
                    restore(target.history.redo(), target.mask);
                }
            }
            KeyEvent::Pressed { key: Key::Escape, .. } => self.cancel(target),
            _ => {}
        }
    }

    /// Abort the active gesture. A drawing stroke's uncommitted pixels are
    /// rolled back to the last committed snapshot; a pan is simply dropped.
    pub fn cancel(&mut self, target: &mut GestureTarget<'_>) {
        if matches!(self.state, GestureState::Drawing { .. }) {
            target.mask.copy_from(target.history.current());
            log::debug!("stroke cancelled, mask restored to last snapshot");
        }
        self.state = GestureState::Idle;
    }

    fn pointer_down(&mut self, position: Point, button: PointerButton, target: &mut GestureTarget<'_>) {
        // Re-entrant downs while a gesture is active are ignored, not queued.
        if self.is_active() {
            return;
        }
        let pans = self.pan_key_held || button == PointerButton::Middle;
        if pans {
            self.state = GestureState::Panning { last_screen: position };
            return;
        }

        // Snapshot the brush for the whole stroke and paint the initial dot:
        // a tap must leave a mark.
        let brush = *target.brush;
        let image_point = target.viewport.to_image(position);
        paint_segment(
            target.mask,
            image_point,
            image_point,
            &brush,
            target.viewport.scale,
            target.tint,
        );
        self.state = GestureState::Drawing { last_image: image_point, brush };
    }

    fn pointer_move(&mut self, position: Point, target: &mut GestureTarget<'_>) {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Panning { last_screen } => {
                let delta = Vec2::new(position.x - last_screen.x, position.y - last_screen.y);
                target.viewport.pan(delta);
                *last_screen = position;
            }
            GestureState::Drawing { last_image, brush } => {
                let image_point = target.viewport.to_image(position);
                paint_segment(
                    target.mask,
                    *last_image,
                    image_point,
                    brush,
                    target.viewport.scale,
                    target.tint,
                );
                *last_image = image_point;
            }
        }
    }

    fn pointer_up(&mut self, target: &mut GestureTarget<'_>) {
        if matches!(self.state, GestureState::Drawing { .. }) {
            target.history.push(target.mask);
            log::debug!("stroke committed, history depth {}", target.history.len());
        }
        self.state = GestureState::Idle;
    }
}

/// Copy a history entry into the live mask, never aliasing it.
fn restore(entry: Option<&MaskBitmap>, mask: &mut MaskBitmap) {
    if let Some(snapshot) = entry {
        mask.copy_from(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use maskink_raster::DEFAULT_TINT;

    struct Rig {
        viewport: Viewport,
        mask: MaskBitmap,
        history: HistoryStack,
        brush: BrushConfig,
        controller: GestureController,
    }

    impl Rig {
        fn new() -> Self {
            let mask = MaskBitmap::blank(400, 400);
            Self {
                viewport: Viewport::new(),
                history: HistoryStack::new(mask.clone()),
                mask,
                brush: BrushConfig::default(),
                controller: GestureController::new(),
            }
        }

        fn pointer(&mut self, event: PointerEvent) {
            let mut target = GestureTarget {
                viewport: &mut self.viewport,
                mask: &mut self.mask,
                history: &mut self.history,
                brush: &self.brush,
                tint: DEFAULT_TINT,
            };
            self.controller.on_pointer(event, &mut target);
        }

        fn key(&mut self, event: KeyEvent) {
            let mut target = GestureTarget {
                viewport: &mut self.viewport,
                mask: &mut self.mask,
                history: &mut self.history,
                brush: &self.brush,
                tint: DEFAULT_TINT,
            };
            self.controller.on_key(event, &mut target);
        }

        fn press(&mut self, x: f64, y: f64) {
            self.pointer(PointerEvent::Down {
                position: Point::new(x, y),
                button: PointerButton::Primary,
            });
        }

        fn release(&mut self, x: f64, y: f64) {
            self.pointer(PointerEvent::Up { position: Point::new(x, y) });
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers { ctrl: true, ..Default::default() }
    }

    #[test]
    fn test_tap_draws_dot_and_commits_once() {
        let mut rig = Rig::new();
        assert_eq!(rig.history.len(), 1);

        rig.press(100.0, 100.0);
        assert!(matches!(rig.controller.state(), GestureState::Drawing { .. }));
        // Dot lands at image point (100, 100) at identity transform.
        assert!(rig.mask.alpha(100, 100) > 0);
        // Not committed until the gesture ends.
        assert_eq!(rig.history.len(), 1);

        rig.release(100.0, 100.0);
        assert!(matches!(rig.controller.state(), GestureState::Idle));
        assert_eq!(rig.history.len(), 2);
    }

    #[test]
    fn test_reentrant_down_is_ignored() {
        let mut rig = Rig::new();
        rig.press(50.0, 50.0);
        rig.press(300.0, 300.0);
        // The second down neither painted nor changed the anchor.
        assert_eq!(rig.mask.alpha(300, 300), 0);
        rig.release(50.0, 50.0);
        assert_eq!(rig.history.len(), 2);
    }

    #[test]
    fn test_space_drag_pans_instead_of_drawing() {
        let mut rig = Rig::new();
        rig.key(KeyEvent::Pressed { key: Key::Space, modifiers: Modifiers::default() });
        rig.press(100.0, 100.0);
        assert!(matches!(rig.controller.state(), GestureState::Panning { .. }));

        rig.pointer(PointerEvent::Move { position: Point::new(130.0, 80.0) });
        assert!((rig.viewport.offset.x - 30.0).abs() < 1e-9);
        assert!((rig.viewport.offset.y + 20.0).abs() < 1e-9);

        rig.release(130.0, 80.0);
        // Panning never paints or commits.
        assert!(rig.mask.is_blank());
        assert_eq!(rig.history.len(), 1);
    }

    #[test]
    fn test_middle_button_always_pans() {
        let mut rig = Rig::new();
        rig.pointer(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: PointerButton::Middle,
        });
        assert!(matches!(rig.controller.state(), GestureState::Panning { .. }));
    }

    #[test]
    fn test_space_release_abandons_pan() {
        let mut rig = Rig::new();
        rig.key(KeyEvent::Pressed { key: Key::Space, modifiers: Modifiers::default() });
        rig.press(100.0, 100.0);
        rig.key(KeyEvent::Released { key: Key::Space });
        assert!(matches!(rig.controller.state(), GestureState::Idle));
        // A following move neither pans nor draws.
        rig.pointer(PointerEvent::Move { position: Point::new(200.0, 200.0) });
        assert_eq!(rig.viewport.offset, Vec2::ZERO);
        assert!(rig.mask.is_blank());
    }

    #[test]
    fn test_space_mid_stroke_does_not_interrupt() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        rig.key(KeyEvent::Pressed { key: Key::Space, modifiers: Modifiers::default() });
        // Still drawing: a move keeps painting, the viewport stays put.
        rig.pointer(PointerEvent::Move { position: Point::new(150.0, 100.0) });
        assert!(matches!(rig.controller.state(), GestureState::Drawing { .. }));
        assert!(rig.mask.alpha(150, 100) > 0);
        assert_eq!(rig.viewport.offset, Vec2::ZERO);
    }

    #[test]
    fn test_leave_mid_stroke_commits() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        rig.pointer(PointerEvent::Leave);
        assert!(matches!(rig.controller.state(), GestureState::Idle));
        assert_eq!(rig.history.len(), 2);
    }

    #[test]
    fn test_undo_shortcut_ignored_while_drawing() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        rig.release(100.0, 100.0);
        assert_eq!(rig.history.len(), 2);

        rig.press(200.0, 200.0);
        rig.key(KeyEvent::Pressed { key: Key::Z, modifiers: ctrl() });
        // Ignored: the stroke's pixels are intact and history unmoved.
        assert!(rig.mask.alpha(200, 200) > 0);
        assert!(rig.history.can_undo());
        rig.release(200.0, 200.0);
        assert_eq!(rig.history.len(), 3);
    }

    #[test]
    fn test_undo_redo_shortcuts_when_idle() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        rig.release(100.0, 100.0);
        let painted = rig.mask.clone();

        rig.key(KeyEvent::Pressed { key: Key::Z, modifiers: ctrl() });
        assert!(rig.mask.is_blank());

        // Ctrl+Shift+Z redoes.
        let ctrl_shift = Modifiers { ctrl: true, shift: true, ..Default::default() };
        rig.key(KeyEvent::Pressed { key: Key::Z, modifiers: ctrl_shift });
        assert_eq!(rig.mask, painted);

        // Ctrl+Y also redoes (after another undo).
        rig.key(KeyEvent::Pressed { key: Key::Z, modifiers: ctrl() });
        rig.key(KeyEvent::Pressed { key: Key::Y, modifiers: ctrl() });
        assert_eq!(rig.mask, painted);
    }

    #[test]
    fn test_escape_rolls_back_uncommitted_stroke() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        rig.pointer(PointerEvent::Move { position: Point::new(180.0, 100.0) });
        assert!(!rig.mask.is_blank());

        rig.key(KeyEvent::Pressed { key: Key::Escape, modifiers: Modifiers::default() });
        assert!(matches!(rig.controller.state(), GestureState::Idle));
        assert!(rig.mask.is_blank());
        assert_eq!(rig.history.len(), 1);
    }

    #[test]
    fn test_brush_snapshot_survives_reconfig_mid_stroke() {
        let mut rig = Rig::new();
        rig.brush.size_px = 10.0;
        rig.press(100.0, 100.0);
        // Host changes the brush mid-stroke; the active stroke keeps its own.
        rig.brush.size_px = 200.0;
        rig.pointer(PointerEvent::Move { position: Point::new(120.0, 100.0) });
        // A 200px brush would easily reach 40px above the line; a 10px one not.
        assert_eq!(rig.mask.alpha(110, 60), 0);
        assert!(rig.mask.alpha(110, 100) > 0);
    }

    #[test]
    fn test_wheel_zoom_does_not_change_gesture_state() {
        let mut rig = Rig::new();
        rig.press(100.0, 100.0);
        let event = WheelEvent { position: Point::new(100.0, 100.0), delta_y: -40.0 };
        rig.controller.on_wheel(event, &mut rig.viewport);
        assert!(matches!(rig.controller.state(), GestureState::Drawing { .. }));
        assert!(rig.viewport.scale > 1.0);
    }
}
