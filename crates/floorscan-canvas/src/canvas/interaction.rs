//! Pointer, wheel and keyboard dispatch.
//!
//! The current [`InteractionMode`] decides what a primary-button press does.
//! The wheel always zooms toward the cursor and a middle-button drag always
//! pans, whatever the mode. Only one gesture is active at a time; a press
//! while a gesture is running is ignored.

use floorscan_core::Point;

use super::{Canvas, Gesture, InteractionMode, InteractionOutcome, Key, PointerButton};

impl Canvas {
    /// Handles a pointer press at screen point `(sx, sy)`.
    pub fn pointer_down(&mut self, sx: f64, sy: f64, button: PointerButton) -> InteractionOutcome {
        if !self.has_image() || !self.gesture.is_idle() || !(sx.is_finite() && sy.is_finite()) {
            return InteractionOutcome::Ignored;
        }

        match (button, self.mode) {
            (PointerButton::Middle, _) | (PointerButton::Primary, InteractionMode::Pan) => {
                self.begin_pan(sx, sy);
                InteractionOutcome::PanStarted
            }
            (PointerButton::Primary, InteractionMode::Select) => self.press_select(sx, sy),
            (PointerButton::Primary, InteractionMode::Calibrate) => self.place_calibration_point(sx, sy),
            (PointerButton::Secondary, _) => InteractionOutcome::Ignored,
        }
    }

    /// Handles pointer motion.
    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        if !(sx.is_finite() && sy.is_finite()) {
            return InteractionOutcome::Ignored;
        }
        match self.gesture {
            Gesture::Idle => InteractionOutcome::Ignored,
            Gesture::Dragging {
                id,
                offset_x,
                offset_y,
            } => {
                let p = self.screen_to_image(sx, sy);
                let center = Point::new(p.x + offset_x, p.y + offset_y);
                if self.move_element(id, center.x, center.y) {
                    InteractionOutcome::Moved { id, center }
                } else {
                    InteractionOutcome::Ignored
                }
            }
            Gesture::Panning {
                grab_x,
                grab_y,
                start_pan_x,
                start_pan_y,
            } => {
                let pan_x = start_pan_x + (sx - grab_x);
                let pan_y = start_pan_y + (sy - grab_y);
                match self.set_pan(pan_x, pan_y) {
                    Ok(()) => InteractionOutcome::Panned { pan_x, pan_y },
                    Err(_) => InteractionOutcome::Ignored,
                }
            }
        }
    }

    /// Handles a pointer release. Any active gesture ends.
    pub fn pointer_up(&mut self, _sx: f64, _sy: f64, _button: PointerButton) -> InteractionOutcome {
        self.end_gesture();
        InteractionOutcome::Ignored
    }

    /// Handles a wheel notch at `(sx, sy)`. Negative `delta_y` zooms in.
    pub fn wheel(&mut self, delta_y: f64, sx: f64, sy: f64) -> InteractionOutcome {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return InteractionOutcome::Ignored;
        }
        let step = self.settings().wheel_zoom_step;
        let target = if delta_y < 0.0 {
            self.zoom() * step
        } else {
            self.zoom() / step
        };
        match self.apply_zoom(target, sx, sy) {
            Ok(zoom) => {
                self.rebase_pan(sx, sy);
                InteractionOutcome::Zoomed { zoom }
            }
            Err(_) => InteractionOutcome::Ignored,
        }
    }

    /// Handles a key press.
    ///
    /// Delete/Backspace delete the selection and `R` rotates it; both are
    /// ignored while a text field has focus. Escape clears the selection
    /// and cancels calibration but leaves an active drag alone.
    pub fn key_down(&mut self, key: Key) -> InteractionOutcome {
        match key {
            Key::Escape => {
                if self.mode == InteractionMode::Calibrate {
                    self.deselect();
                    self.calibration.reset();
                    self.mode = InteractionMode::Select;
                    self.render();
                    InteractionOutcome::CalibrationCancelled
                } else if self.deselect() {
                    InteractionOutcome::Selected(None)
                } else {
                    InteractionOutcome::Ignored
                }
            }
            _ if self.text_input_focused => InteractionOutcome::Ignored,
            Key::Delete | Key::Backspace => match self.delete_selected() {
                Some(id) => InteractionOutcome::Deleted(id),
                None => InteractionOutcome::Ignored,
            },
            Key::Char('r') | Key::Char('R') => match self.rotate_selected() {
                Some((id, rotation_deg)) => InteractionOutcome::Rotated { id, rotation_deg },
                None => InteractionOutcome::Ignored,
            },
            Key::Char(_) => InteractionOutcome::Ignored,
        }
    }

    pub(crate) fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
    }

    fn begin_pan(&mut self, sx: f64, sy: f64) {
        self.gesture = Gesture::Panning {
            grab_x: sx,
            grab_y: sy,
            start_pan_x: self.viewport.pan_x(),
            start_pan_y: self.viewport.pan_y(),
        };
    }

    /// Re-anchors a running pan at the current pointer and pan, so later
    /// moves continue from the zoomed view.
    fn rebase_pan(&mut self, sx: f64, sy: f64) {
        if let Gesture::Panning { .. } = self.gesture {
            self.begin_pan(sx, sy);
        }
    }

    fn press_select(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        let p = self.screen_to_image(sx, sy);
        match self.find_element_at_image(&p) {
            Some(id) => {
                self.select(id);
                let center = self
                    .element(id)
                    .map(|el| el.center())
                    .unwrap_or(p);
                self.gesture = Gesture::Dragging {
                    id,
                    offset_x: center.x - p.x,
                    offset_y: center.y - p.y,
                };
                InteractionOutcome::Selected(Some(id))
            }
            None => {
                self.deselect();
                self.begin_pan(sx, sy);
                InteractionOutcome::Selected(None)
            }
        }
    }

    fn place_calibration_point(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        let p = self.screen_to_image(sx, sy);
        let outcome = match self.calibration.place(p) {
            None => InteractionOutcome::CalibrationPoint(p),
            Some(pixels) => {
                tracing::debug!("Calibration line measured {:.2} px", pixels);
                self.mode = InteractionMode::Select;
                self.hooks.calibrated(pixels);
                InteractionOutcome::CalibrationMeasured { pixels }
            }
        };
        self.render();
        outcome
    }
}
