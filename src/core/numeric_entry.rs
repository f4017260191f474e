//! Inkrementeller Zahlen-Parser für getippte Parameterwerte.
//!
//! Jeder Tastendruck erzeugt einen neuen `NumericEntryState`; der Zustand
//! selbst ist ein reiner Wert ohne Seiteneffekte. Maus-Drag und Stufen-Tasten
//! übernehmen erst wieder, wenn die Eingabe leer ist (`has_value == false`).

/// Eine Taste, die den Eingabepuffer verändert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    /// Ziffer `0`–`9`
    Digit(char),
    /// Dezimalpunkt
    Decimal,
    /// Minuszeichen
    Negate,
    /// Letztes Zeichen entfernen
    Backspace,
}

impl EntryKey {
    /// Zeichen, das an den Puffer angehängt wird (`None` für Backspace).
    fn as_char(self) -> Option<char> {
        match self {
            EntryKey::Digit(c) if c.is_ascii_digit() => Some(c),
            EntryKey::Digit(_) => None,
            EntryKey::Decimal => Some('.'),
            EntryKey::Negate => Some('-'),
            EntryKey::Backspace => None,
        }
    }
}

/// Zustand einer laufenden Zahleneingabe.
///
/// Invariante: `raw.is_none() == value.is_none()` gilt für den kanonischen
/// Leerzustand; während einer unvollständigen Eingabe (`"-"`, `"1."`) ist
/// `valid == false` und `value` behält den letzten gültigen Wert.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericEntryState {
    valid: bool,
    value: Option<f64>,
    raw: Option<String>,
}

impl Default for NumericEntryState {
    fn default() -> Self {
        Self::empty()
    }
}

impl NumericEntryState {
    /// Kanonischer Leerzustand `{true, None, None}`.
    pub fn empty() -> Self {
        Self {
            valid: true,
            value: None,
            raw: None,
        }
    }

    /// Ob der Puffer ein vollständiges Literal enthält (oder leer ist).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Zuletzt gültig geparster Wert.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Getippter Rohtext.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Ob der Puffer leer ist.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }
}

/// Verarbeitet eine Taste und liefert den Folgezustand.
pub fn update(state: &NumericEntryState, key: EntryKey) -> NumericEntryState {
    let mut raw = state.raw.clone().unwrap_or_default();

    match key.as_char() {
        Some(c) => raw.push(c),
        None if key == EntryKey::Backspace => {
            raw.pop();
        }
        None => return state.clone(),
    }

    if raw.is_empty() {
        return reset();
    }

    match parse_literal(&raw) {
        Some(parsed) => NumericEntryState {
            valid: true,
            value: Some(parsed),
            raw: Some(raw),
        },
        None => NumericEntryState {
            valid: false,
            value: state.value,
            raw: Some(raw),
        },
    }
}

/// Kanonischer Leerzustand.
pub fn reset() -> NumericEntryState {
    NumericEntryState::empty()
}

/// Nachkommastellen eines vorbelegten Eingabetexts.
const SEED_DECIMALS: i32 = 6;

/// Eingabe, die bereits `value` enthält (z.B. beim Fortsetzen gesperrte Parameter).
///
/// Der Wert wird auf `SEED_DECIMALS` Stellen gerundet, damit Umrechnungsreste
/// wie `29.999999999999996` nicht im Text landen.
pub fn seeded(value: f64) -> NumericEntryState {
    if !value.is_finite() {
        return reset();
    }
    let factor = 10f64.powi(SEED_DECIMALS);
    let rounded = (value * factor).round() / factor;
    // -0 würde als "-0" erscheinen
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    NumericEntryState {
        valid: true,
        value: Some(rounded),
        raw: Some(rounded.to_string()),
    }
}

/// Ob eine Eingabe läuft. Nicht mit `materialize` verwechseln.
pub fn has_value(state: &NumericEntryState) -> bool {
    state.value.is_some()
}

/// Liefert einen nutzbaren Wert: `clamp(value * scale, min, max)` oder `default`.
pub fn materialize(state: &NumericEntryState, scale: f64, default: f64, min: f64, max: f64) -> f64 {
    match state.value {
        Some(value) => (value * scale).clamp(min, max),
        None => default,
    }
}

/// Parst ein Literal aus Ziffern, `.` und `-`.
///
/// Ein abschließender Punkt gilt als unvollständig, auch wenn Rust ihn akzeptieren würde.
fn parse_literal(raw: &str) -> Option<f64> {
    if raw.ends_with('.') {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn feed(state: NumericEntryState, text: &str) -> NumericEntryState {
        text.chars().fold(state, |s, c| {
            let key = match c {
                '.' => EntryKey::Decimal,
                '-' => EntryKey::Negate,
                d => EntryKey::Digit(d),
            };
            update(&s, key)
        })
    }

    #[test]
    fn test_reset_is_canonical_empty() {
        let state = reset();
        assert!(state.is_valid());
        assert_eq!(state.value(), None);
        assert_eq!(state.raw(), None);
        assert_eq!(state, NumericEntryState::empty());
    }

    #[test]
    fn test_digits_accumulate() {
        let state = feed(reset(), "25");
        assert_eq!(state.raw(), Some("25"));
        assert_eq!(state.value(), Some(25.0));
        assert!(state.is_valid());
    }

    #[test]
    fn test_trailing_decimal_is_pending_and_keeps_value() {
        let state = feed(reset(), "1");
        let pending = update(&state, EntryKey::Decimal);
        assert!(!pending.is_valid());
        assert_eq!(pending.raw(), Some("1."));
        assert_eq!(pending.value(), Some(1.0));
    }

    #[test]
    fn test_leading_minus_is_pending_without_value() {
        let state = update(&reset(), EntryKey::Negate);
        assert!(!state.is_valid());
        assert_eq!(state.raw(), Some("-"));
        assert_eq!(state.value(), None);
    }

    #[test]
    fn test_leading_decimal_is_pending() {
        let state = update(&reset(), EntryKey::Decimal);
        assert!(!state.is_valid());
        assert_eq!(state.raw(), Some("."));
        assert_eq!(state.value(), None);

        let state = update(&state, EntryKey::Digit('5'));
        assert!(state.is_valid());
        assert_relative_eq!(state.value().unwrap(), 0.5);
    }

    #[test]
    fn test_negative_literal() {
        let state = feed(reset(), "-12.5");
        assert!(state.is_valid());
        assert_relative_eq!(state.value().unwrap(), -12.5);
    }

    #[test]
    fn test_double_minus_keeps_last_good_value() {
        let state = feed(reset(), "-3");
        let state = update(&state, EntryKey::Negate);
        assert!(!state.is_valid());
        assert_eq!(state.raw(), Some("-3-"));
        assert_eq!(state.value(), Some(-3.0));
    }

    #[test]
    fn test_backspace_beyond_length_converges_to_empty() {
        let mut state = feed(reset(), "4.2");
        for _ in 0..10 {
            state = update(&state, EntryKey::Backspace);
        }
        assert_eq!(state, NumericEntryState::empty());
    }

    #[test]
    fn test_backspace_on_single_char_clears() {
        let state = feed(reset(), "7");
        let state = update(&state, EntryKey::Backspace);
        assert_eq!(state, reset());
    }

    #[test]
    fn test_backspace_restores_valid_prefix() {
        let state = feed(reset(), "2.5");
        let state = update(&state, EntryKey::Backspace);
        assert_eq!(state.raw(), Some("2."));
        assert!(!state.is_valid());
        assert_eq!(state.value(), Some(2.5));

        let state = update(&state, EntryKey::Backspace);
        assert_eq!(state.raw(), Some("2"));
        assert!(state.is_valid());
        assert_eq!(state.value(), Some(2.0));
    }

    #[test]
    fn test_round_trip_of_short_literals() {
        for v in [0.0, 1.0, 2.5, 10.25, 123.456, -0.75, 99999.9, 0.001234] {
            let state = feed(reset(), &v.to_string());
            assert!(state.is_valid(), "{v} sollte gültig sein");
            assert_relative_eq!(state.value().unwrap(), v, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_materialize_scales_and_clamps() {
        let state = feed(reset(), "250");
        assert_relative_eq!(materialize(&state, 0.01, 0.0, 0.0, 10.0), 2.5);
        assert_relative_eq!(materialize(&state, 1.0, 0.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_materialize_uses_default_without_value() {
        assert_relative_eq!(materialize(&reset(), 1.0, 3.0, 0.0, 10.0), 3.0);
        let pending = update(&reset(), EntryKey::Negate);
        assert_relative_eq!(materialize(&pending, 1.0, 3.0, 0.0, 10.0), 3.0);
    }

    #[test]
    fn test_seeded_entry_continues_typing() {
        let state = seeded(1.5);
        assert!(has_value(&state));
        assert_eq!(state.raw(), Some("1.5"));
        let state = update(&state, EntryKey::Digit('2'));
        assert_relative_eq!(state.value().unwrap(), 1.52);
        assert_eq!(seeded(f64::NAN), reset());
    }

    #[test]
    fn test_seeded_text_drops_conversion_noise() {
        let state = seeded(29.999999999999996);
        assert_eq!(state.raw(), Some("30"));
        assert_eq!(state.value(), Some(30.0));
        assert_eq!(seeded(6.999999999999999).raw(), Some("7"));
        assert_eq!(seeded(-1e-9).raw(), Some("0"));
    }

    #[test]
    fn test_has_value_distinguishes_pending_minus() {
        assert!(!has_value(&reset()));
        assert!(!has_value(&update(&reset(), EntryKey::Negate)));
        assert!(has_value(&feed(reset(), "1.")));
    }
}
