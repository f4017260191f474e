//! Rohe Eingabe-Events, wie sie ein Host an die Engine liefert.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physische Taste. Namen folgen der Schreibweise der Tastenkonfiguration (`"BACK_SLASH"`, `"NUMPAD_3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    /// Ziffer der Hauptreihe (0–9)
    Digit(u8),
    /// Ziffer des Nummernblocks (0–9)
    NumpadDigit(u8),
    /// Buchstabe `A`–`Z` (immer Großbuchstabe)
    Letter(char),
    /// Funktionstaste F1–F24
    Function(u8),
    Minus,
    NumpadMinus,
    Period,
    NumpadPeriod,
    BackSpace,
    Delete,
    Return,
    NumpadEnter,
    Space,
    Escape,
    Tab,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    LeftBracket,
    RightBracket,
    BackSlash,
    Slash,
    Comma,
    SemiColon,
    Quote,
    AccentGrave,
    Pause,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
}

const DIGIT_NAMES: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

const NAMED_KEYS: [(&str, KeyCode); 29] = [
    ("MINUS", KeyCode::Minus),
    ("NUMPAD_MINUS", KeyCode::NumpadMinus),
    ("PERIOD", KeyCode::Period),
    ("NUMPAD_PERIOD", KeyCode::NumpadPeriod),
    ("BACK_SPACE", KeyCode::BackSpace),
    ("DEL", KeyCode::Delete),
    ("RET", KeyCode::Return),
    ("NUMPAD_ENTER", KeyCode::NumpadEnter),
    ("SPACE", KeyCode::Space),
    ("ESC", KeyCode::Escape),
    ("TAB", KeyCode::Tab),
    ("UP_ARROW", KeyCode::UpArrow),
    ("DOWN_ARROW", KeyCode::DownArrow),
    ("LEFT_ARROW", KeyCode::LeftArrow),
    ("RIGHT_ARROW", KeyCode::RightArrow),
    ("LEFT_BRACKET", KeyCode::LeftBracket),
    ("RIGHT_BRACKET", KeyCode::RightBracket),
    ("BACK_SLASH", KeyCode::BackSlash),
    ("SLASH", KeyCode::Slash),
    ("COMMA", KeyCode::Comma),
    ("SEMI_COLON", KeyCode::SemiColon),
    ("QUOTE", KeyCode::Quote),
    ("ACCENT_GRAVE", KeyCode::AccentGrave),
    ("PAUSE", KeyCode::Pause),
    ("INSERT", KeyCode::Insert),
    ("HOME", KeyCode::Home),
    ("END", KeyCode::End),
    ("PAGE_UP", KeyCode::PageUp),
    ("PAGE_DOWN", KeyCode::PageDown),
];

impl KeyCode {
    /// Buchstaben-Taste; Kleinbuchstaben werden normalisiert.
    pub fn letter(c: char) -> Self {
        KeyCode::Letter(c.to_ascii_uppercase())
    }

    /// Zeichen, das die Taste in eine Zahleneingabe einbringt.
    pub fn numeric_char(self) -> Option<char> {
        match self {
            KeyCode::Digit(d) | KeyCode::NumpadDigit(d) if d <= 9 => {
                char::from_digit(u32::from(d), 10)
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Digit(d) => match DIGIT_NAMES.get(usize::from(*d)) {
                Some(name) => f.write_str(name),
                None => write!(f, "DIGIT_{d}"),
            },
            KeyCode::NumpadDigit(d) => write!(f, "NUMPAD_{d}"),
            KeyCode::Letter(c) => write!(f, "{c}"),
            KeyCode::Function(n) => write!(f, "F{n}"),
            other => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(_, key)| key == other)
                    .map(|(name, _)| *name)
                    .unwrap_or("UNKNOWN");
                f.write_str(name)
            }
        }
    }
}

/// Fehler beim Parsen eines Tastennamens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unbekannter Tastenname: '{0}'")]
pub struct UnknownKeyName(pub String);

impl FromStr for KeyCode {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();

        if let Some(index) = DIGIT_NAMES.iter().position(|d| *d == name) {
            return Ok(KeyCode::Digit(index as u8));
        }
        if let Some(rest) = name.strip_prefix("NUMPAD_") {
            if let Ok(d) = rest.parse::<u8>() {
                if d <= 9 {
                    return Ok(KeyCode::NumpadDigit(d));
                }
            }
        }
        if let Some((_, key)) = NAMED_KEYS.iter().find(|(n, _)| *n == name) {
            return Ok(*key);
        }
        if let Some(rest) = name.strip_prefix('F') {
            if let Ok(n) = rest.parse::<u8>() {
                if (1..=24).contains(&n) {
                    return Ok(KeyCode::Function(n));
                }
            }
        }
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Ok(KeyCode::Letter(c));
            }
        }
        Err(UnknownKeyName(s.to_string()))
    }
}

impl TryFrom<String> for KeyCode {
    type Error = UnknownKeyName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        key.to_string()
    }
}

/// Maustaste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Übergang einer Taste oder Maustaste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Press,
    Release,
}

/// Art des rohen Events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEventKind {
    /// Tastatur
    Key { key: KeyCode, transition: Transition },
    /// Maustaste
    Button {
        button: MouseButton,
        transition: Transition,
    },
    /// Mausrad nach oben
    WheelUp,
    /// Mausrad nach unten
    WheelDown,
    /// Mausbewegung seit dem letzten Event (Pixel)
    MouseMove { delta: Vec2 },
    /// 3D-Maus (Navigation)
    Ndof,
}

/// Ein rohes Event inkl. gehaltener Modifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInputEvent {
    /// Event-Art
    pub kind: RawEventKind,
    /// Ctrl gehalten
    pub ctrl: bool,
    /// Alt gehalten
    pub alt: bool,
    /// Shift gehalten
    pub shift: bool,
}

impl RawInputEvent {
    /// Event ohne Modifier.
    pub fn new(kind: RawEventKind) -> Self {
        Self {
            kind,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    /// Tastendruck.
    pub fn key_press(key: KeyCode) -> Self {
        Self::new(RawEventKind::Key {
            key,
            transition: Transition::Press,
        })
    }

    /// Tasten-Loslassen.
    pub fn key_release(key: KeyCode) -> Self {
        Self::new(RawEventKind::Key {
            key,
            transition: Transition::Release,
        })
    }

    /// Maustaste gedrückt.
    pub fn button_press(button: MouseButton) -> Self {
        Self::new(RawEventKind::Button {
            button,
            transition: Transition::Press,
        })
    }

    /// Maustaste losgelassen.
    pub fn button_release(button: MouseButton) -> Self {
        Self::new(RawEventKind::Button {
            button,
            transition: Transition::Release,
        })
    }

    /// Horizontale Mausbewegung.
    pub fn mouse_move(dx: f32) -> Self {
        Self::new(RawEventKind::MouseMove {
            delta: Vec2::new(dx, 0.0),
        })
    }

    /// Setzt die gehaltenen Modifier.
    pub fn with_modifiers(mut self, ctrl: bool, alt: bool, shift: bool) -> Self {
        self.ctrl = ctrl;
        self.alt = alt;
        self.shift = shift;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        let keys = [
            KeyCode::Digit(0),
            KeyCode::Digit(9),
            KeyCode::NumpadDigit(4),
            KeyCode::Letter('X'),
            KeyCode::Function(12),
            KeyCode::BackSlash,
            KeyCode::NumpadEnter,
            KeyCode::PageDown,
        ];
        for key in keys {
            let name = key.to_string();
            assert_eq!(name.parse::<KeyCode>(), Ok(key), "Name: {name}");
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_for_letters() {
        assert_eq!("x".parse::<KeyCode>(), Ok(KeyCode::Letter('X')));
        assert_eq!("back_slash".parse::<KeyCode>(), Ok(KeyCode::BackSlash));
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        assert!("F25".parse::<KeyCode>().is_err());
        assert!("NUMPAD_10".parse::<KeyCode>().is_err());
        assert!("HYPER".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_numeric_char() {
        assert_eq!(KeyCode::Digit(7).numeric_char(), Some('7'));
        assert_eq!(KeyCode::NumpadDigit(0).numeric_char(), Some('0'));
        assert_eq!(KeyCode::Letter('A').numeric_char(), None);
    }
}
