//! Übersetzt rohe Events in `(InputIntent, ModifierContext)`.
//!
//! Die Klassifizierung ist eine reine Funktion des Events und der beim
//! Erstellen übergebenen Tastentabellen; sie liest keinen Session-Zustand.

use super::events::InputIntent;
use crate::core::{
    KeyCode, ModifierContext, MouseButton, RawEventKind, RawInputEvent, ToolConfig, Transition,
};
use crate::shared::KeyBindings;

/// Tastentabellen einer Session.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    keys: KeyBindings,
    flag_keys: Vec<(KeyCode, String)>,
    mode_keys: Vec<(KeyCode, String)>,
}

impl EventClassifier {
    /// Erstellt den Klassifizierer aus Engine-Tasten und Tool-Tasten.
    pub fn new(keys: &KeyBindings, config: &ToolConfig) -> Self {
        Self {
            keys: keys.clone(),
            flag_keys: config
                .flag_keys()
                .map(|(k, name)| (k, name.to_string()))
                .collect(),
            mode_keys: config
                .mode_keys()
                .map(|(k, name)| (k, name.to_string()))
                .collect(),
        }
    }

    /// Klassifiziert ein Event. Die erste passende Regel gewinnt.
    pub fn classify(&self, event: &RawInputEvent) -> (InputIntent, ModifierContext) {
        let context = ModifierContext::from_flags(event.ctrl, event.alt, event.shift);
        (self.intent_for(event), context)
    }

    fn intent_for(&self, event: &RawInputEvent) -> InputIntent {
        match event.kind {
            // Navigation gehört immer dem Host
            RawEventKind::Ndof => InputIntent::PassThrough,
            RawEventKind::Button {
                button: MouseButton::Middle,
                ..
            } => InputIntent::PassThrough,
            RawEventKind::Button { .. } if event.alt => InputIntent::PassThrough,

            RawEventKind::Button {
                button: MouseButton::Left,
                transition: Transition::Release,
            } => InputIntent::Confirm,
            RawEventKind::Button {
                button: MouseButton::Right,
                transition: Transition::Release,
            } => InputIntent::Cancel,
            RawEventKind::Button { .. } => InputIntent::PassThrough,

            RawEventKind::WheelUp => InputIntent::StepUp,
            RawEventKind::WheelDown => InputIntent::StepDown,

            RawEventKind::MouseMove { delta } => InputIntent::MouseDelta(f64::from(delta.x)),

            RawEventKind::Key {
                key,
                transition: Transition::Press,
            } => self.key_intent(key),
            RawEventKind::Key { .. } => InputIntent::PassThrough,
        }
    }

    fn key_intent(&self, key: KeyCode) -> InputIntent {
        if key == self.keys.pause {
            return InputIntent::TogglePassthrough;
        }
        if key == self.keys.pin {
            return InputIntent::TogglePin;
        }

        match key {
            KeyCode::Space | KeyCode::Return | KeyCode::NumpadEnter => return InputIntent::Confirm,
            KeyCode::Escape => return InputIntent::Cancel,
            KeyCode::Minus | KeyCode::NumpadMinus => return InputIntent::Negate,
            KeyCode::Period | KeyCode::NumpadPeriod => return InputIntent::Decimal,
            KeyCode::BackSpace => return InputIntent::Backspace,
            _ => {}
        }
        if let Some(c) = key.numeric_char() {
            return InputIntent::Digit(c);
        }

        if matches!(key, KeyCode::UpArrow | KeyCode::RightArrow)
            || self.keys.step_up_aliases.contains(&key)
        {
            return InputIntent::StepUp;
        }
        if matches!(key, KeyCode::DownArrow | KeyCode::LeftArrow)
            || self.keys.step_down_aliases.contains(&key)
        {
            return InputIntent::StepDown;
        }

        if key == self.keys.reset {
            return InputIntent::ResetParameter;
        }
        if let Some((_, name)) = self.flag_keys.iter().find(|(k, _)| *k == key) {
            return InputIntent::ToggleFlag(name.clone());
        }
        if let Some((_, name)) = self.mode_keys.iter().find(|(k, _)| *k == key) {
            return InputIntent::CycleMode(name.clone());
        }

        log::debug!("Taste {} nicht belegt, wird durchgereicht", key);
        InputIntent::PassThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FlagSpec, Lane, ModeSpec};

    fn classifier() -> EventClassifier {
        let config = ToolConfig::new("test")
            .flag(FlagSpec::new("clamp", true).key(KeyCode::letter('c')))
            .mode(ModeSpec::new("axis", &["X", "Y", "Z"]).key(KeyCode::letter('a')));
        let mut keys = KeyBindings::default();
        keys.step_up_aliases.push(KeyCode::PageUp);
        EventClassifier::new(&keys, &config)
    }

    fn intent(event: RawInputEvent) -> InputIntent {
        classifier().classify(&event).0
    }

    #[test]
    fn test_confirm_and_cancel() {
        assert_eq!(
            intent(RawInputEvent::button_release(MouseButton::Left)),
            InputIntent::Confirm
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::Return)),
            InputIntent::Confirm
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::NumpadEnter)),
            InputIntent::Confirm
        );
        assert_eq!(
            intent(RawInputEvent::button_release(MouseButton::Right)),
            InputIntent::Cancel
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::Escape)),
            InputIntent::Cancel
        );
        // Drücken bestätigt nicht
        assert_eq!(
            intent(RawInputEvent::button_press(MouseButton::Left)),
            InputIntent::PassThrough
        );
    }

    #[test]
    fn test_navigation_passes_through() {
        assert_eq!(
            intent(RawInputEvent::button_press(MouseButton::Middle)),
            InputIntent::PassThrough
        );
        assert_eq!(
            intent(RawInputEvent::new(RawEventKind::Ndof)),
            InputIntent::PassThrough
        );
        let alt_click =
            RawInputEvent::button_release(MouseButton::Left).with_modifiers(false, true, false);
        assert_eq!(intent(alt_click), InputIntent::PassThrough);
    }

    #[test]
    fn test_numeric_keys() {
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::Digit(3))),
            InputIntent::Digit('3')
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::NumpadDigit(0))),
            InputIntent::Digit('0')
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::NumpadMinus)),
            InputIntent::Negate
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::Period)),
            InputIntent::Decimal
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::BackSpace)),
            InputIntent::Backspace
        );
        // Loslassen ist bedeutungslos
        assert_eq!(
            intent(RawInputEvent::key_release(KeyCode::Digit(3))),
            InputIntent::PassThrough
        );
    }

    #[test]
    fn test_steps_and_aliases() {
        assert_eq!(intent(RawInputEvent::new(RawEventKind::WheelUp)), InputIntent::StepUp);
        assert_eq!(
            intent(RawInputEvent::new(RawEventKind::WheelDown)),
            InputIntent::StepDown
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::LeftArrow)),
            InputIntent::StepDown
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::PageUp)),
            InputIntent::StepUp
        );
    }

    #[test]
    fn test_engine_and_tool_keys() {
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::letter('x'))),
            InputIntent::ResetParameter
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::BackSlash)),
            InputIntent::TogglePassthrough
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::letter('p'))),
            InputIntent::TogglePin
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::letter('c'))),
            InputIntent::ToggleFlag("clamp".into())
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::letter('a'))),
            InputIntent::CycleMode("axis".into())
        );
        assert_eq!(
            intent(RawInputEvent::key_press(KeyCode::letter('q'))),
            InputIntent::PassThrough
        );
    }

    #[test]
    fn test_mouse_move_and_context() {
        let event = RawInputEvent::mouse_move(12.0).with_modifiers(true, false, true);
        let (intent, context) = classifier().classify(&event);
        assert_eq!(intent, InputIntent::MouseDelta(12.0));
        assert_eq!(context.lane(), Lane::CtrlShift);
        assert!(context.is_fine());
    }

    #[test]
    fn test_classification_is_pure() {
        let c = classifier();
        let event = RawInputEvent::key_press(KeyCode::Digit(5)).with_modifiers(false, true, false);
        assert_eq!(c.classify(&event), c.classify(&event));
    }
}
