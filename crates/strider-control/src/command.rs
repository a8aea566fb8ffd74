//! Operator velocity command.
//!
//! [`CommandState`] holds the 3-component velocity command shared between
//! the control loop and an asynchronous input source. Key events resolve
//! through a closed binding table to (axis, increment) pairs; unmapped keys
//! have no effect.

use std::sync::Mutex;

// ---------------------------------------------------------------------------
// CommandAxis
// ---------------------------------------------------------------------------

/// One component of the velocity command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAxis {
    /// Forward velocity (body x).
    Forward,
    /// Lateral velocity (body y).
    Lateral,
    /// Yaw rate.
    Yaw,
}

impl CommandAxis {
    const fn index(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Lateral => 1,
            Self::Yaw => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// CommandState
// ---------------------------------------------------------------------------

/// Shared operator command: (forward, lateral, yaw rate), each clamped to
/// [-1, 1] after every increment.
///
/// The mutex guards against torn multi-component reads; a listener write
/// racing the loop's once-per-step read is acceptable, since the command is
/// a continuous operator control, not a correctness-critical value.
#[derive(Debug, Default)]
pub struct CommandState {
    values: Mutex<[f32; 3]>,
}

impl CommandState {
    /// Create a zeroed command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a bounded increment along one axis.
    pub fn adjust(&self, axis: CommandAxis, delta: f32) {
        let mut values = self.values.lock().expect("command lock poisoned");
        let slot = &mut values[axis.index()];
        *slot = (*slot + delta).clamp(-1.0, 1.0);
    }

    /// Snapshot of the current command.
    #[must_use]
    pub fn get(&self) -> [f32; 3] {
        *self.values.lock().expect("command lock poisoned")
    }
}

// ---------------------------------------------------------------------------
// CommandBindings
// ---------------------------------------------------------------------------

/// One key-to-increment binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandBinding {
    /// Key identifier delivered by the input source.
    pub key: char,
    /// Axis the key adjusts.
    pub axis: CommandAxis,
    /// Signed increment applied per key press.
    pub delta: f32,
}

/// Closed lookup table from key identifiers to command increments.
///
/// Exactly the mapped keys have an effect; everything else resolves to
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBindings {
    bindings: Vec<CommandBinding>,
}

/// Increment applied per key press.
pub const COMMAND_STEP: f32 = 0.2;

impl CommandBindings {
    /// Numpad layout: 8/2 forward ±, 4/6 lateral ∓/±, 7/9 yaw ∓/±.
    ///
    /// The yaw pair is inverted relative to forward/lateral; the trained
    /// control scheme expects exactly this mapping.
    #[must_use]
    pub fn numpad() -> Self {
        Self {
            bindings: vec![
                CommandBinding {
                    key: '8',
                    axis: CommandAxis::Forward,
                    delta: COMMAND_STEP,
                },
                CommandBinding {
                    key: '2',
                    axis: CommandAxis::Forward,
                    delta: -COMMAND_STEP,
                },
                CommandBinding {
                    key: '4',
                    axis: CommandAxis::Lateral,
                    delta: -COMMAND_STEP,
                },
                CommandBinding {
                    key: '6',
                    axis: CommandAxis::Lateral,
                    delta: COMMAND_STEP,
                },
                CommandBinding {
                    key: '7',
                    axis: CommandAxis::Yaw,
                    delta: -COMMAND_STEP,
                },
                CommandBinding {
                    key: '9',
                    axis: CommandAxis::Yaw,
                    delta: COMMAND_STEP,
                },
            ],
        }
    }

    /// Look up the increment for a key, if it is mapped.
    #[must_use]
    pub fn resolve(&self, key: char) -> Option<(CommandAxis, f32)> {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| (b.axis, b.delta))
    }

    /// Resolve `key` and apply it to `state`. Returns whether the key was
    /// mapped.
    pub fn apply(&self, state: &CommandState, key: char) -> bool {
        match self.resolve(key) {
            Some((axis, delta)) => {
                state.adjust(axis, delta);
                true
            }
            None => false,
        }
    }

    /// All bindings, for display.
    pub fn bindings(&self) -> &[CommandBinding] {
        &self.bindings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
