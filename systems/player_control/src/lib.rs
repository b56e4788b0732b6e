#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player control system that turns held buttons into movement commands.

use castle_run_core::{Command, HorizontalIntent};

/// Logical buttons observed by an adapter during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Whether the move-left button is held.
    pub left: bool,
    /// Whether the move-right button is held.
    pub right: bool,
    /// Whether the jump button is held.
    pub jump: bool,
}

/// Pure system that emits horizontal intent and jump commands.
///
/// Holding left and right together cancels out. A jump is requested only on
/// the frame the jump button goes down; keeping it held does not re-trigger a
/// jump after landing and presses are never buffered.
#[derive(Debug, Default)]
pub struct PlayerControl {
    jump_held: bool,
}

impl PlayerControl {
    /// Creates a control system that assumes every button starts released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the frame's button state and emits the matching commands.
    pub fn handle(&mut self, input: ControlInput, out: &mut Vec<Command>) {
        out.push(Command::SetHorizontalIntent {
            intent: HorizontalIntent::from_buttons(input.left, input.right),
        });

        if input.jump && !self.jump_held {
            out.push(Command::Jump);
        }
        self.jump_held = input.jump;
    }
}
