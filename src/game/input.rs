//! Input Snapshots
//!
//! The host polls its devices once per frame and hands the simulation a
//! read-only snapshot of packed button flags.

use serde::{Serialize, Deserialize};

/// Button state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Packed flags:
    /// - Bit 0: exit requested
    /// - Bit 1: debug display toggle held
    /// - Bit 2: move left held
    /// - Bit 3: move right held
    /// - Bit 4: jump held
    /// - Bit 5: ranged attack held
    /// - Bit 6: beam attack held
    /// - Bit 7: reserved
    pub flags: u8,
}

impl InputSnapshot {
    /// Exit flag bit
    pub const EXIT: u8 = 0x01;
    /// Debug display flag bit
    pub const DEBUG: u8 = 0x02;
    /// Move left flag bit
    pub const LEFT: u8 = 0x04;
    /// Move right flag bit
    pub const RIGHT: u8 = 0x08;
    /// Jump flag bit
    pub const JUMP: u8 = 0x10;
    /// Ranged attack flag bit
    pub const ATTACK: u8 = 0x20;
    /// Beam attack flag bit
    pub const BEAM: u8 = 0x40;
    /// No flag bits
    pub const NONE: u8 = 0x00;

    /// No buttons held.
    pub const IDLE: Self = Self { flags: 0 };

    /// Snapshot with exactly these flags set.
    #[inline]
    pub const fn with(flags: u8) -> Self {
        Self { flags }
    }

    #[inline]
    pub fn held(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Held now but not in `previous`.
    #[inline]
    pub fn pressed_since(&self, previous: &InputSnapshot, flag: u8) -> bool {
        self.held(flag) && !previous.held(flag)
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.held(Self::EXIT)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, held: bool) {
        if held {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

/// Input collaborator polled once per frame.
pub trait InputSource {
    fn poll(&mut self, frame: u64) -> InputSnapshot;
}

/// Pre-recorded inputs, idle once the script runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self { frames }
    }

    /// Build a script from `(held flags, frame count)` segments.
    pub fn from_segments(segments: &[(u8, usize)]) -> Self {
        let frames = segments
            .iter()
            .flat_map(|&(flags, count)| std::iter::repeat(InputSnapshot::with(flags)).take(count))
            .collect();
        Self { frames }
    }

    pub fn frames(&self) -> &[InputSnapshot] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> InputSnapshot {
        usize::try_from(frame)
            .ok()
            .and_then(|i| self.frames.get(i))
            .copied()
            .unwrap_or(InputSnapshot::IDLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut input = InputSnapshot::IDLE;
        assert!(input.is_idle());

        input.set(InputSnapshot::JUMP, true);
        input.set(InputSnapshot::LEFT, true);
        assert!(input.held(InputSnapshot::JUMP));
        assert!(input.held(InputSnapshot::LEFT));
        assert!(!input.exit_requested());

        input.set(InputSnapshot::JUMP, false);
        assert!(!input.held(InputSnapshot::JUMP));
        assert_eq!(input.flags, InputSnapshot::LEFT);
    }

    #[test]
    fn test_rising_edge() {
        let up = InputSnapshot::IDLE;
        let down = InputSnapshot::with(InputSnapshot::DEBUG);
        assert!(down.pressed_since(&up, InputSnapshot::DEBUG));
        assert!(!down.pressed_since(&down, InputSnapshot::DEBUG));
        assert!(!up.pressed_since(&down, InputSnapshot::DEBUG));
    }

    #[test]
    fn test_scripted_input() {
        let mut script = ScriptedInput::from_segments(&[
            (InputSnapshot::RIGHT, 2),
            (InputSnapshot::RIGHT | InputSnapshot::JUMP, 1),
        ]);
        assert_eq!(script.len(), 3);
        assert_eq!(script.poll(0), InputSnapshot::with(InputSnapshot::RIGHT));
        assert_eq!(script.poll(2).flags, InputSnapshot::RIGHT | InputSnapshot::JUMP);
        assert_eq!(script.poll(3), InputSnapshot::IDLE);
        assert_eq!(script.poll(u64::MAX), InputSnapshot::IDLE);
    }

    #[test]
    fn test_scripted_idle_segment() {
        let mut script = ScriptedInput::from_segments(&[
            (InputSnapshot::NONE, 2),
            (InputSnapshot::EXIT, 1),
        ]);
        assert_eq!(script.poll(0), InputSnapshot::IDLE);
        assert!(script.poll(1).is_idle());
        assert!(script.poll(2).exit_requested());
    }
}
