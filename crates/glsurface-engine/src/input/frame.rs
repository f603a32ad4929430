use super::types::InputEvent;

/// Input events collected since the last frame.
///
/// Touch input appears as the pointer events `InputState` folded it into.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
