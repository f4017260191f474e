//! Klassifizierte Eingabe-Intents einer Editier-Session.

use serde::Serialize;

/// Ein Intent ist die Bedeutung eines rohen Events, ohne Mutationslogik.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InputIntent {
    /// Ziffer für die Zahleneingabe
    Digit(char),
    /// Dezimalpunkt
    Decimal,
    /// Minuszeichen
    Negate,
    /// Letztes Zeichen der Eingabe entfernen
    Backspace,
    /// Aktiven Parameter um eine Stufe erhöhen
    StepUp,
    /// Aktiven Parameter um eine Stufe verringern
    StepDown,
    /// Schalter umschalten
    ToggleFlag(String),
    /// Modus weiterschalten
    CycleMode(String),
    /// Session bestätigen
    Confirm,
    /// Session abbrechen
    Cancel,
    /// Event an den Host durchreichen
    PassThrough,
    /// Horizontale Mausbewegung in Pixeln
    MouseDelta(f64),
    /// Aktiven Parameter zurücksetzen
    ResetParameter,
    /// Durchreichung an den Host umschalten (Pause)
    TogglePassthrough,
    /// Anzeige fixieren
    TogglePin,
}

impl InputIntent {
    /// Ob der Intent die Session beendet.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InputIntent::Confirm | InputIntent::Cancel)
    }
}
