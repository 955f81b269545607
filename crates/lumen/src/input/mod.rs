//! Keyboard input
//!
//! Window backends translate their native key identifiers into [`KeyCode`];
//! the window session reports key presses by [`KeyCode::name`].

use std::fmt;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Digit keys on the main row, 0 through 9
    Digit(u8),
    /// Function keys, F1 through F25
    Function(u8),
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Either shift key
    Shift,
    /// Either control key
    Control,
    /// Either alt key
    Alt,
    /// Key with no symbolic mapping
    Unknown,
}

impl KeyCode {
    /// Symbolic, human-readable key name
    pub fn name(self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Function(index) => format!("F{index}"),
            Self::Space => "Space".to_string(),
            Self::Enter => "Return".to_string(),
            Self::Escape => "Escape".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Up => "Up".to_string(),
            Self::Down => "Down".to_string(),
            Self::Left => "Left".to_string(),
            Self::Right => "Right".to_string(),
            Self::Shift => "Shift".to_string(),
            Self::Control => "Ctrl".to_string(),
            Self::Alt => "Alt".to_string(),
            Self::Unknown => "Unknown".to_string(),
            letter => format!("{letter:?}"),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::A.name(), "A");
        assert_eq!(KeyCode::Z.name(), "Z");
        assert_eq!(KeyCode::Digit(7).name(), "7");
        assert_eq!(KeyCode::Function(12).name(), "F12");
        assert_eq!(KeyCode::Enter.name(), "Return");
        assert_eq!(KeyCode::Escape.to_string(), "Escape");
    }
}
