use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes
    /// deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Conservative behavior: on focus loss, clear the "down" set.
                    // Avoids a stuck drag when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
            }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => {
                        let inserted = self.buttons_down.insert(*button);
                        if inserted {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        let removed = self.buttons_down.remove(button);
                        if removed {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn any_button_down(&self) -> bool {
        !self.buttons_down.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(btn: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: btn,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    fn release(btn: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: btn,
            state: MouseButtonState::Released,
            x,
            y,
        })
    }

    // ── button transitions ────────────────────────────────────────────────

    #[test]
    fn press_records_state_and_frame_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 10.0, 20.0));

        assert!(state.button_down(MouseButton::Left));
        assert!(state.any_button_down());
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn release_clears_state_and_records_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        frame.clear();
        state.apply_event(&mut frame, release(MouseButton::Left, 5.0, 5.0));

        assert!(!state.button_down(MouseButton::Left));
        assert!(!state.any_button_down());
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert!(frame.buttons_pressed.is_empty());
    }

    #[test]
    fn repeated_press_is_not_a_new_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        frame.clear();
        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));

        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.is_empty());
    }

    // ── pointer position ──────────────────────────────────────────────────

    #[test]
    fn move_then_leave_clears_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { x: 100.0, y: 50.0 }),
        );
        assert_eq!(state.pointer_pos, Some((100.0, 50.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_drops_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.any_button_down());
        assert!(!state.focused);
    }
}
