//! Raw input vocabulary for the menu engine.
//!
//! The host (the plugin's window/input layer) translates whatever it receives
//! from the OS or the pad driver into these types before calling into a page.
//! Printable text arrives separately as `char`s via `key_down`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
    }
}

/// Non-printable keys the engine routes. Printable characters go through
/// `key_down(char)` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VirtualKey {
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Gamepad buttons in the plugin's fixed layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PadButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    A,
    B,
    X,
    Y,
    Start,
    Back,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
}

impl PadButton {
    /// The keyboard key this button stands in for during menu navigation.
    /// Face/shoulder buttons with no navigation meaning return `None` and are
    /// swallowed (or captured by an open key-binding control).
    pub fn to_vkey(self) -> Option<VirtualKey> {
        match self {
            PadButton::DpadUp => Some(VirtualKey::Up),
            PadButton::DpadDown => Some(VirtualKey::Down),
            PadButton::DpadLeft => Some(VirtualKey::Left),
            PadButton::DpadRight => Some(VirtualKey::Right),
            PadButton::A => Some(VirtualKey::Enter),
            PadButton::B => Some(VirtualKey::Escape),
            PadButton::Y => Some(VirtualKey::Delete),
            PadButton::Back => Some(VirtualKey::Space),
            _ => None,
        }
    }
}

/// A captured key-binding value: either a keyboard key or a pad button.
/// The `Display`/`FromStr` pair is the stable form hosts persist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundInput {
    Key(VirtualKey),
    Pad(PadButton),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBindingError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("unknown pad button name: {0:?}")]
    UnknownPadButton(String),
    #[error("empty binding name")]
    Empty,
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualKey::Enter => write!(f, "Enter"),
            VirtualKey::Tab => write!(f, "Tab"),
            VirtualKey::Backspace => write!(f, "Backspace"),
            VirtualKey::Delete => write!(f, "Delete"),
            VirtualKey::Escape => write!(f, "Escape"),
            VirtualKey::Space => write!(f, "Space"),
            VirtualKey::Left => write!(f, "Left"),
            VirtualKey::Right => write!(f, "Right"),
            VirtualKey::Up => write!(f, "Up"),
            VirtualKey::Down => write!(f, "Down"),
            VirtualKey::Home => write!(f, "Home"),
            VirtualKey::End => write!(f, "End"),
            VirtualKey::PageUp => write!(f, "PageUp"),
            VirtualKey::PageDown => write!(f, "PageDown"),
            VirtualKey::F(n) => write!(f, "F{n}"),
        }
    }
}

impl FromStr for VirtualKey {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(num) = s.strip_prefix('F')
            && let Ok(n) = num.parse::<u8>()
            && (1..=12).contains(&n)
        {
            return Ok(VirtualKey::F(n));
        }
        match s {
            "Enter" => Ok(VirtualKey::Enter),
            "Tab" => Ok(VirtualKey::Tab),
            "Backspace" => Ok(VirtualKey::Backspace),
            "Delete" => Ok(VirtualKey::Delete),
            "Escape" => Ok(VirtualKey::Escape),
            "Space" => Ok(VirtualKey::Space),
            "Left" => Ok(VirtualKey::Left),
            "Right" => Ok(VirtualKey::Right),
            "Up" => Ok(VirtualKey::Up),
            "Down" => Ok(VirtualKey::Down),
            "Home" => Ok(VirtualKey::Home),
            "End" => Ok(VirtualKey::End),
            "PageUp" => Ok(VirtualKey::PageUp),
            "PageDown" => Ok(VirtualKey::PageDown),
            "" => Err(ParseBindingError::Empty),
            other => Err(ParseBindingError::UnknownKey(other.to_string())),
        }
    }
}

impl fmt::Display for PadButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PadButton::DpadUp => "DpadUp",
            PadButton::DpadDown => "DpadDown",
            PadButton::DpadLeft => "DpadLeft",
            PadButton::DpadRight => "DpadRight",
            PadButton::A => "A",
            PadButton::B => "B",
            PadButton::X => "X",
            PadButton::Y => "Y",
            PadButton::Start => "Start",
            PadButton::Back => "Back",
            PadButton::L1 => "L1",
            PadButton::R1 => "R1",
            PadButton::L2 => "L2",
            PadButton::R2 => "R2",
            PadButton::L3 => "L3",
            PadButton::R3 => "R3",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PadButton {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DpadUp" => Ok(PadButton::DpadUp),
            "DpadDown" => Ok(PadButton::DpadDown),
            "DpadLeft" => Ok(PadButton::DpadLeft),
            "DpadRight" => Ok(PadButton::DpadRight),
            "A" => Ok(PadButton::A),
            "B" => Ok(PadButton::B),
            "X" => Ok(PadButton::X),
            "Y" => Ok(PadButton::Y),
            "Start" => Ok(PadButton::Start),
            "Back" => Ok(PadButton::Back),
            "L1" => Ok(PadButton::L1),
            "R1" => Ok(PadButton::R1),
            "L2" => Ok(PadButton::L2),
            "R2" => Ok(PadButton::R2),
            "L3" => Ok(PadButton::L3),
            "R3" => Ok(PadButton::R3),
            "" => Err(ParseBindingError::Empty),
            other => Err(ParseBindingError::UnknownPadButton(other.to_string())),
        }
    }
}

impl fmt::Display for BoundInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundInput::Key(k) => write!(f, "{k}"),
            BoundInput::Pad(b) => write!(f, "Pad:{b}"),
        }
    }
}

impl FromStr for BoundInput {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseBindingError::Empty);
        }
        if let Some(pad) = s.strip_prefix("Pad:") {
            return pad.parse::<PadButton>().map(BoundInput::Pad);
        }
        s.parse::<VirtualKey>().map(BoundInput::Key)
    }
}
