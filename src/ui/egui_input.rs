//! Übersetzung von `egui::Event`s in rohe Engine-Events.
//!
//! egui unterscheidet keinen Nummernblock; Ziffern kommen immer als
//! Hauptreihen-Ziffern an.

use crate::core::{KeyCode, MouseButton, RawEventKind, RawInputEvent, Transition};
use glam::Vec2;

/// Merkt sich die letzte Zeigerposition, um Bewegungen als Delta zu liefern.
#[derive(Debug, Default)]
pub struct EguiInputTranslator {
    last_pointer: Option<egui::Pos2>,
}

impl EguiInputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Übersetzt alle Events des aktuellen Frames.
    pub fn collect(&mut self, ui: &egui::Ui) -> Vec<RawInputEvent> {
        let (events, modifiers) = ui.input(|i| (i.events.clone(), i.modifiers));
        events
            .iter()
            .filter_map(|event| self.translate(event, modifiers))
            .collect()
    }

    /// Übersetzt ein Event. `modifiers` gilt für Events ohne eigene Modifier.
    pub fn translate(
        &mut self,
        event: &egui::Event,
        modifiers: egui::Modifiers,
    ) -> Option<RawInputEvent> {
        match event {
            egui::Event::Key {
                key,
                pressed,
                modifiers,
                ..
            } => {
                let key = map_key(*key)?;
                let kind = RawEventKind::Key {
                    key,
                    transition: transition(*pressed),
                };
                Some(with_modifiers(kind, *modifiers))
            }
            egui::Event::PointerButton {
                button,
                pressed,
                modifiers,
                ..
            } => {
                let button = match button {
                    egui::PointerButton::Primary => MouseButton::Left,
                    egui::PointerButton::Secondary => MouseButton::Right,
                    egui::PointerButton::Middle => MouseButton::Middle,
                    _ => return None,
                };
                let kind = RawEventKind::Button {
                    button,
                    transition: transition(*pressed),
                };
                Some(with_modifiers(kind, *modifiers))
            }
            egui::Event::PointerMoved(pos) => {
                let previous = self.last_pointer.replace(*pos)?;
                let delta = *pos - previous;
                if delta == egui::Vec2::ZERO {
                    return None;
                }
                let kind = RawEventKind::MouseMove {
                    delta: Vec2::new(delta.x, delta.y),
                };
                Some(with_modifiers(kind, modifiers))
            }
            egui::Event::PointerGone => {
                self.last_pointer = None;
                None
            }
            egui::Event::MouseWheel {
                delta, modifiers, ..
            } => {
                let kind = if delta.y > 0.0 {
                    RawEventKind::WheelUp
                } else if delta.y < 0.0 {
                    RawEventKind::WheelDown
                } else {
                    return None;
                };
                Some(with_modifiers(kind, *modifiers))
            }
            _ => None,
        }
    }
}

fn transition(pressed: bool) -> Transition {
    if pressed {
        Transition::Press
    } else {
        Transition::Release
    }
}

fn with_modifiers(kind: RawEventKind, modifiers: egui::Modifiers) -> RawInputEvent {
    RawInputEvent::new(kind).with_modifiers(
        modifiers.ctrl || modifiers.command,
        modifiers.alt,
        modifiers.shift,
    )
}

/// Ordnet eine egui-Taste einem `KeyCode` zu (`None` = nicht unterstützt).
fn map_key(key: egui::Key) -> Option<KeyCode> {
    use egui::Key;
    let mapped = match key {
        Key::Num0 => KeyCode::Digit(0),
        Key::Num1 => KeyCode::Digit(1),
        Key::Num2 => KeyCode::Digit(2),
        Key::Num3 => KeyCode::Digit(3),
        Key::Num4 => KeyCode::Digit(4),
        Key::Num5 => KeyCode::Digit(5),
        Key::Num6 => KeyCode::Digit(6),
        Key::Num7 => KeyCode::Digit(7),
        Key::Num8 => KeyCode::Digit(8),
        Key::Num9 => KeyCode::Digit(9),
        Key::Minus => KeyCode::Minus,
        Key::Period => KeyCode::Period,
        Key::Backspace => KeyCode::BackSpace,
        Key::Delete => KeyCode::Delete,
        Key::Enter => KeyCode::Return,
        Key::Space => KeyCode::Space,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::ArrowUp => KeyCode::UpArrow,
        Key::ArrowDown => KeyCode::DownArrow,
        Key::ArrowLeft => KeyCode::LeftArrow,
        Key::ArrowRight => KeyCode::RightArrow,
        Key::OpenBracket => KeyCode::LeftBracket,
        Key::CloseBracket => KeyCode::RightBracket,
        Key::Backslash => KeyCode::BackSlash,
        Key::Slash => KeyCode::Slash,
        Key::Comma => KeyCode::Comma,
        Key::Semicolon => KeyCode::SemiColon,
        Key::Backtick => KeyCode::AccentGrave,
        Key::Insert => KeyCode::Insert,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::PageUp => KeyCode::PageUp,
        Key::PageDown => KeyCode::PageDown,
        // Buchstaben und F-Tasten über ihren Namen ("A", "F5")
        other => return other.name().parse().ok(),
    };
    Some(mapped)
}
