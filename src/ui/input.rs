//! Per-frame input snapshot
//!
//! `InputState` is plain data so the editor controller can be driven from
//! tests; `InputState::poll` fills it from macroquad once per frame.

use macroquad::prelude::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, is_mouse_button_released,
    mouse_position, KeyCode, MouseButton,
};

/// Modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub shift: bool,
    /// Control, or Command on macOS
    pub ctrl: bool,
}

/// Mouse button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
}

/// Letter keys the editor binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    S,
    L,
    O,
    G,
    E,
}

impl EditorKey {
    pub const ALL: [EditorKey; 5] = [EditorKey::S, EditorKey::L, EditorKey::O, EditorKey::G, EditorKey::E];

    fn key_code(self) -> KeyCode {
        match self {
            EditorKey::S => KeyCode::S,
            EditorKey::L => KeyCode::L,
            EditorKey::O => KeyCode::O,
            EditorKey::G => KeyCode::G,
            EditorKey::E => KeyCode::E,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Mouse position in window pixels
    pub mouse_x: i32,
    pub mouse_y: i32,
    /// Buttons currently held
    pub buttons: MouseButtons,
    /// Edges seen this frame
    pub left_pressed: bool,
    pub left_released: bool,
    pub right_pressed: bool,
    pub right_released: bool,
    pub modifiers: ModifierKeys,
    /// Held: Left arrow or A
    pub scroll_left: bool,
    /// Held: Right arrow or D
    pub scroll_right: bool,
    /// Keys that went down this frame
    pub pressed: Vec<EditorKey>,
}

impl InputState {
    /// Snapshot macroquad's input for the current frame
    pub fn poll() -> Self {
        let (mx, my) = mouse_position();
        let ctrl = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);

        Self {
            mouse_x: mx.floor() as i32,
            mouse_y: my.floor() as i32,
            buttons: MouseButtons {
                left: is_mouse_button_down(MouseButton::Left),
                right: is_mouse_button_down(MouseButton::Right),
            },
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            right_released: is_mouse_button_released(MouseButton::Right),
            modifiers: ModifierKeys { shift, ctrl },
            scroll_left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            scroll_right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            pressed: EditorKey::ALL
                .into_iter()
                .filter(|k| is_key_pressed(k.key_code()))
                .collect(),
        }
    }

    pub fn mouse_pos(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn key_pressed(&self, key: EditorKey) -> bool {
        self.pressed.contains(&key)
    }
}
