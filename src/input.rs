use std::collections::HashSet;

use log::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::motion::MoveDirection;
use crate::traits::{Button, Controller};

/// Adapter that bridges winit events to the Controller seam.
///
/// Cursor deltas come from absolute positions: the previous position is an
/// explicit field seeded by the first event, so a window gaining focus with
/// the cursor far from center does not produce a spurious jump.
#[derive(Debug, Default)]
pub struct WinitInput {
    pressed: HashSet<Button>,
    previous_cursor: Option<(f64, f64)>,
    /// Most recently pressed movement key; only ever one commanded
    /// direction at a time.
    commanded: Option<MoveDirection>,
    exit_requested: bool,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit keyboard event and update held-key state.
    pub fn process_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(keycode) = event.physical_key else {
            return;
        };
        let Some(button) = Self::keycode_to_button(keycode) else {
            return;
        };

        match event.state {
            ElementState::Pressed => self.press(button),
            ElementState::Released => self.release(button),
        }
    }

    /// Convert an absolute cursor position into a delta against the
    /// previously seen position. The first event seeds the baseline and
    /// yields a zero delta.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> (f32, f32) {
        let delta = match self.previous_cursor {
            Some((px, py)) => ((x - px) as f32, (y - py) as f32),
            None => (0.0, 0.0),
        };
        self.previous_cursor = Some((x, y));
        trace!("cursor ({x:.1}, {y:.1}) delta ({}, {})", delta.0, delta.1);
        delta
    }

    /// Last-commanded movement direction, set on key press.
    pub fn commanded_direction(&self) -> Option<MoveDirection> {
        self.commanded
    }

    /// Whether the user asked to quit; polled once per frame.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn press(&mut self, button: Button) {
        if self.pressed.insert(button) {
            if let Some(direction) = MoveDirection::from_button(button) {
                self.commanded = Some(direction);
            }
            if button == Button::Escape {
                self.exit_requested = true;
            }
        }
    }

    fn release(&mut self, button: Button) {
        self.pressed.remove(&button);
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitInput {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}
