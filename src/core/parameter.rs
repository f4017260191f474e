//! Ein einzelner editierbarer Parameter mit Snapshot für den Rollback.

use super::numeric_entry::{self, EntryKey, NumericEntryState};

/// Wertetyp eines Parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Kontinuierlicher Wert
    Float,
    /// Ganzzahliger Wert (z.B. Segmente); Eingaben werden abgeschnitten
    Integer,
}

/// Statische Beschreibung eines Parameters (vom Tool geliefert).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Eindeutiger Name
    pub name: String,
    /// Anzeigename
    pub label: String,
    /// Standardwert für neue Bindungen und die Reset-Taste
    pub default: f64,
    /// Grobe Schrittweite
    pub step: f64,
    /// Feine Schrittweite (Shift); `None` = `step * fine_step_factor`
    pub fine_step: Option<f64>,
    /// Untere Grenze
    pub min: f64,
    /// Obere Grenze
    pub max: f64,
    /// Faktor zwischen getippter Zahl und gespeichertem Wert
    pub scale: f64,
    /// Multiplikator für Maus-Drag
    pub drag_sensitivity: f64,
    /// Wertetyp
    pub kind: ValueKind,
}

impl ParameterSpec {
    /// Float-Parameter mit Schrittweite 1 und unbegrenztem Wertebereich.
    pub fn new(name: &str, default: f64) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            default,
            step: 1.0,
            fine_step: None,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            scale: 1.0,
            drag_sensitivity: 1.0,
            kind: ValueKind::Float,
        }
    }

    /// Ganzzahliger Parameter.
    pub fn integer(name: &str, default: i64) -> Self {
        Self {
            kind: ValueKind::Integer,
            ..Self::new(name, default as f64)
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn fine_step(mut self, fine_step: f64) -> Self {
        self.fine_step = Some(fine_step);
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn drag_sensitivity(mut self, sensitivity: f64) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Ob `value` innerhalb der Grenzen liegt.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Laufzeit-Zustand eines Parameters.
///
/// Invariante: `min <= value <= max` nach jeder Mutation.
#[derive(Debug, Clone)]
pub struct Parameter {
    spec: ParameterSpec,
    value: f64,
    previous_value: f64,
    entry: NumericEntryState,
    /// Wert vor Beginn der aktuellen Zahleneingabe
    entry_origin: f64,
    /// Aufsummierte Maus-Strecke für ganzzahlige Drag-Schritte
    drag_travel: f64,
}

impl Parameter {
    /// Erstellt den Parameter mit `value` als Start- und Snapshot-Wert.
    pub fn new(spec: ParameterSpec, value: f64) -> Self {
        let value = clamp_to(&spec, value);
        Self {
            spec,
            value,
            previous_value: value,
            entry: NumericEntryState::empty(),
            entry_origin: value,
            drag_travel: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    /// Aktueller (Live-)Wert.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Rollback-Ziel.
    pub fn previous_value(&self) -> f64 {
        self.previous_value
    }

    /// Laufende Zahleneingabe.
    pub fn entry(&self) -> &NumericEntryState {
        &self.entry
    }

    /// Ob gerade ein getippter Wert die Kontrolle hat.
    pub fn has_entry(&self) -> bool {
        numeric_entry::has_value(&self.entry)
    }

    /// Ob der Rohtext-Puffer nicht leer ist (auch bei `"-"`).
    pub fn has_pending_text(&self) -> bool {
        !self.entry.is_empty()
    }

    /// Schrittweite abhängig von der Feinstufe.
    ///
    /// Ganzzahlige Parameter gehen immer um mindestens einen ganzen Schritt.
    pub fn step_size(&self, fine: bool, fine_step_factor: f64) -> f64 {
        let size = if fine {
            self.spec
                .fine_step
                .unwrap_or(self.spec.step * fine_step_factor)
        } else {
            self.spec.step
        };
        match self.spec.kind {
            ValueKind::Float => size,
            ValueKind::Integer => size.round().max(1.0),
        }
    }

    /// Setzt den Wert (geklemmt, bei Integer abgeschnitten). Gibt `true` bei Änderung zurück.
    pub fn set_value(&mut self, value: f64) -> bool {
        let value = clamp_to(&self.spec, self.normalize(value));
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Verarbeitet eine Eingabetaste und übernimmt den materialisierten Wert.
    pub fn apply_entry_key(&mut self, key: EntryKey) -> bool {
        if self.entry.is_empty() {
            self.entry_origin = self.value;
        }
        self.entry = numeric_entry::update(&self.entry, key);
        let materialized = numeric_entry::materialize(
            &self.entry,
            self.spec.scale,
            self.entry_origin,
            self.spec.min,
            self.spec.max,
        );
        self.set_value(materialized);
        true
    }

    /// Einen Schritt in `direction` (+1/−1). Unterdrückt während einer Eingabe.
    pub fn step(&mut self, direction: f64, fine: bool, fine_step_factor: f64) -> bool {
        if self.has_entry() {
            return false;
        }
        let delta = self.step_size(fine, fine_step_factor) * direction;
        self.set_value(self.value + delta)
    }

    /// Kontinuierlicher Drag für Float-Parameter. Unterdrückt während einer Eingabe.
    pub fn drag(&mut self, amount: f64) -> bool {
        if self.has_entry() {
            return false;
        }
        self.set_value(self.value + amount * self.spec.drag_sensitivity)
    }

    /// Drag für Integer-Parameter: je `pixels_per_step` Pixel ein ganzer Schritt.
    ///
    /// Die Strecke wird bei Richtungswechsel verworfen.
    pub fn drag_steps(&mut self, dx: f64, pixels_per_step: f64) -> bool {
        if self.has_entry() || pixels_per_step <= 0.0 {
            return false;
        }
        if self.drag_travel != 0.0 && self.drag_travel.signum() != dx.signum() {
            self.drag_travel = 0.0;
        }
        self.drag_travel += dx;

        let steps = (self.drag_travel / pixels_per_step).trunc();
        if steps == 0.0 {
            return false;
        }
        self.drag_travel -= steps * pixels_per_step;
        self.set_value(self.value + steps)
    }

    /// Sperrt den Parameter mit seinem aktuellen Wert als Eingabe.
    ///
    /// Stufen und Drag greifen erst wieder nach Reset oder Backspace.
    pub fn lock_entry(&mut self) {
        let typed = if self.spec.scale != 0.0 {
            self.value / self.spec.scale
        } else {
            self.value
        };
        self.entry = numeric_entry::seeded(typed);
        self.entry_origin = self.value;
        self.drag_travel = 0.0;
    }

    /// Verwirft die Eingabe, ohne den Wert anzufassen.
    pub fn clear_entry(&mut self) {
        self.entry = numeric_entry::reset();
        self.drag_travel = 0.0;
    }

    /// Eingabe verwerfen und Standardwert setzen.
    pub fn reset_to_default(&mut self) -> bool {
        self.clear_entry();
        self.set_value(self.spec.default)
    }

    /// Rollback: Snapshot-Wert zurückkopieren, Eingabe verwerfen.
    pub fn restore_previous(&mut self) {
        self.clear_entry();
        self.value = self.previous_value;
    }

    /// Aktuellen Wert als neuen Snapshot übernehmen.
    pub fn accept_baseline(&mut self) {
        self.previous_value = self.value;
    }

    fn normalize(&self, value: f64) -> f64 {
        match self.spec.kind {
            ValueKind::Float => value,
            ValueKind::Integer => value.trunc(),
        }
    }
}

fn clamp_to(spec: &ParameterSpec, value: f64) -> f64 {
    if value.is_nan() {
        return spec.default.clamp(spec.min, spec.max);
    }
    value.clamp(spec.min, spec.max)
}
