//! Messages delivered to the application: input events, change
//! notifications and timer ticks.

use std::time::Instant;

use crate::app::TimerId;
use crate::geom::Point;
use crate::observe::Topic;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// A printable character.
    Char(char),
}

/// Modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const META: Self = Self(1 << 3);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A pointer action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary button pressed.
    Main,
    Auxiliary,
    Secondary,
    WheelUp,
    WheelDown,
    Release,
    /// Pointer moved without a button change.
    Move,
}

/// A message processed by [`Model::update`](crate::app::Model::update).
#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        modifiers: ModMask,
        time: Instant,
    },
    Mouse {
        action: MouseAction,
        pos: Point,
        modifiers: ModMask,
        time: Instant,
    },
    /// The screen was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// A [`Subject`](crate::observe::Subject) changed. Carries no payload:
    /// observers re-read the full state.
    Changed { topic: Topic },
    /// A recurring timer registered through
    /// [`Effect::Every`](crate::app::Effect::Every) fired.
    Tick { timer: TimerId, time: Instant },
    /// Sent once when the application starts.
    Init,
    Quit,
}

impl Msg {
    /// A key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::key_mod(key, ModMask::NONE)
    }

    pub fn key_mod(key: Key, modifiers: ModMask) -> Self {
        Self::KeyDown {
            key,
            modifiers,
            time: Instant::now(),
        }
    }

    /// A mouse event without modifiers.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    pub fn changed(topic: Topic) -> Self {
        Self::Changed { topic }
    }

    pub fn tick(timer: TimerId) -> Self {
        Self::Tick {
            timer,
            time: Instant::now(),
        }
    }
}
