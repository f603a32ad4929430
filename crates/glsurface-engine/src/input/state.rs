use super::frame::InputFrame;
use super::types::{
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
    TouchPhase,
};

/// Pointer and touch tracking for a single window.
///
/// Events pass through [`InputState::apply_event`] on their way into the
/// frame's event list, so button events can carry the last known pointer
/// position and touch input reaches the app as pointer input.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Finger currently driving the pointer. Other fingers are ignored.
    pub active_touch: Option<u64>,
}

impl InputState {
    /// Updates the tracked state and records `ev` (or what it folds into) in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Touch(touch) => {
                if let Some(folded) = self.fold_touch(touch) {
                    self.apply_event(frame, folded);
                }
                return;
            }

            InputEvent::Focused(false) => self.active_touch = None,

            InputEvent::PointerMoved(PointerMoveEvent { x, y })
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Focused(true) | InputEvent::Key { .. } => {}
        }

        frame.push_event(ev);
    }

    /// Maps the primary finger onto left-button pointer events.
    fn fold_touch(&mut self, touch: TouchEvent) -> Option<InputEvent> {
        let TouchEvent { id, phase, x, y } = touch;

        match phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(id);
                Some(InputEvent::PointerButton(PointerButtonEvent {
                    button: MouseButton::Left,
                    state: MouseButtonState::Pressed,
                    x,
                    y,
                }))
            }
            TouchPhase::Moved if self.active_touch == Some(id) => {
                Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(id) => {
                self.active_touch = None;
                Some(InputEvent::PointerButton(PointerButtonEvent {
                    button: MouseButton::Left,
                    state: MouseButtonState::Released,
                    x,
                    y,
                }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch(TouchEvent { id, phase, x, y })
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    #[test]
    fn pointer_events_track_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));

        state.apply_event(&mut frame, left(MouseButtonState::Pressed, 1.0, 2.0));
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
        assert_eq!(frame.events.len(), 3);
    }

    #[test]
    fn touch_folds_into_pointer_events() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, touch(7, TouchPhase::Started, 10.0, 20.0));
        state.apply_event(&mut frame, touch(7, TouchPhase::Moved, 15.0, 25.0));
        state.apply_event(&mut frame, touch(7, TouchPhase::Ended, 15.0, 25.0));

        assert_eq!(
            frame.events,
            vec![
                left(MouseButtonState::Pressed, 10.0, 20.0),
                InputEvent::PointerMoved(PointerMoveEvent { x: 15.0, y: 25.0 }),
                left(MouseButtonState::Released, 15.0, 25.0),
            ]
        );
        assert_eq!(state.active_touch, None);
        assert_eq!(state.pointer_pos, Some((15.0, 25.0)));
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, touch(1, TouchPhase::Started, 0.0, 0.0));
        state.apply_event(&mut frame, touch(2, TouchPhase::Started, 50.0, 50.0));
        state.apply_event(&mut frame, touch(2, TouchPhase::Moved, 60.0, 60.0));
        state.apply_event(&mut frame, touch(2, TouchPhase::Ended, 60.0, 60.0));

        assert_eq!(frame.events.len(), 1);
        assert_eq!(state.active_touch, Some(1));
    }

    #[test]
    fn cancelled_touch_releases_the_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, touch(4, TouchPhase::Started, 0.0, 0.0));
        state.apply_event(&mut frame, touch(4, TouchPhase::Cancelled, 5.0, 5.0));

        assert_eq!(frame.events.last(), Some(&left(MouseButtonState::Released, 5.0, 5.0)));
        assert_eq!(state.active_touch, None);
    }

    #[test]
    fn focus_loss_forgets_active_touch() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, touch(3, TouchPhase::Started, 0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert_eq!(state.active_touch, None);

        // A new finger can take over after refocus.
        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, touch(9, TouchPhase::Started, 1.0, 1.0));
        assert_eq!(state.active_touch, Some(9));
    }

    #[test]
    fn frame_clear_drops_events() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, left(MouseButtonState::Pressed, 0.0, 0.0));
        frame.clear();
        assert!(frame.events.is_empty());
    }
}
