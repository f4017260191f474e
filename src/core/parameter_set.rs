//! Geordnete Parameter-Sammlung mit Lane-Zuordnung, Modi und Schaltern.

use super::input::KeyCode;
use super::modifiers::{Lane, ModifierContext};
use super::parameter::Parameter;
use indexmap::IndexMap;

// ── Modi ────────────────────────────────────────────────────────────

/// Statische Beschreibung einer zyklischen Auswahl (z.B. Deform-Methode).
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSpec {
    /// Eindeutiger Name
    pub name: String,
    /// Anzeigename
    pub label: String,
    /// Optionen in Zyklus-Reihenfolge
    pub options: Vec<String>,
    /// Startindex für neue Bindungen
    pub default_index: usize,
    /// Taste, die den Modus weiterschaltet
    pub key: Option<KeyCode>,
}

impl ModeSpec {
    pub fn new(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            default_index: 0,
            key: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }

    pub fn default_index(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }
}

/// Laufzeit-Zustand eines Modus.
#[derive(Debug, Clone)]
pub struct Mode {
    spec: ModeSpec,
    current_index: usize,
    previous_index: usize,
}

impl Mode {
    /// Erstellt den Modus; ein ungültiger Index fällt auf 0 zurück.
    pub fn new(spec: ModeSpec, index: usize) -> Self {
        let index = if index < spec.options.len() { index } else { 0 };
        Self {
            spec,
            current_index: index,
            previous_index: index,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &ModeSpec {
        &self.spec
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn previous_index(&self) -> usize {
        self.previous_index
    }

    /// Aktuell gewählte Option.
    pub fn current(&self) -> &str {
        self.spec
            .options
            .get(self.current_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Schaltet zyklisch weiter (+1 modulo Anzahl Optionen).
    pub fn cycle(&mut self) {
        let len = self.spec.options.len();
        if len > 0 {
            self.current_index = (self.current_index + 1) % len;
        }
    }
}

// ── Schalter ────────────────────────────────────────────────────────

/// Statische Beschreibung eines booleschen Schalters (z.B. "Harden Normals").
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: String,
    pub label: String,
    pub default: bool,
    pub key: Option<KeyCode>,
}

impl FlagSpec {
    pub fn new(name: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            default,
            key: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }
}

/// Laufzeit-Zustand eines Schalters.
#[derive(Debug, Clone)]
pub struct Flag {
    spec: FlagSpec,
    value: bool,
    previous: bool,
}

impl Flag {
    pub fn new(spec: FlagSpec, value: bool) -> Self {
        Self {
            spec,
            value,
            previous: value,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &FlagSpec {
        &self.spec
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}

// ── Lane-Tabelle ────────────────────────────────────────────────────

/// Einschränkung einer Lane-Zuordnung auf bestimmte Optionen eines Modus.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeCondition {
    pub mode: String,
    pub options: Vec<String>,
}

/// Zuordnung Lane → Parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneBinding {
    pub lane: Lane,
    pub parameter: String,
    pub condition: Option<ModeCondition>,
}

impl LaneBinding {
    pub fn new(lane: Lane, parameter: &str) -> Self {
        Self {
            lane,
            parameter: parameter.to_string(),
            condition: None,
        }
    }

    /// Gilt nur, wenn `mode` auf einer der `options` steht.
    pub fn when(mut self, mode: &str, options: &[&str]) -> Self {
        self.condition = Some(ModeCondition {
            mode: mode.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        });
        self
    }
}

// ── ParameterSet ────────────────────────────────────────────────────

/// Parameter, Modi und Schalter einer Session.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    parameters: IndexMap<String, Parameter>,
    modes: IndexMap<String, Mode>,
    flags: IndexMap<String, Flag>,
    lanes: Vec<LaneBinding>,
    mode_defaults: IndexMap<String, IndexMap<String, f64>>,
}

impl ParameterSet {
    /// Erstellt ein leeres Set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_parameter(&mut self, parameter: Parameter) {
        self.parameters
            .insert(parameter.name().to_string(), parameter);
    }

    pub fn insert_mode(&mut self, mode: Mode) {
        self.modes.insert(mode.name().to_string(), mode);
    }

    pub fn insert_flag(&mut self, flag: Flag) {
        self.flags.insert(flag.name().to_string(), flag);
    }

    pub fn set_lanes(&mut self, lanes: Vec<LaneBinding>) {
        self.lanes = lanes;
    }

    /// Setzt die Modus-abhängigen Standardwerte (`Modus → Parameter → Wert`).
    pub fn set_mode_defaults(&mut self, defaults: IndexMap<String, IndexMap<String, f64>>) {
        self.mode_defaults = defaults;
    }

    // ── Abfragen ─────────────────────────────────────────────

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.get_mut(name)
    }

    /// Aktueller Wert eines Parameters.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).map(Parameter::value)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn mode(&self, name: &str) -> Option<&Mode> {
        self.modes.get(name)
    }

    /// Aktuelle Option eines Modus.
    pub fn mode_option(&self, name: &str) -> Option<&str> {
        self.modes.get(name).map(Mode::current)
    }

    pub fn modes(&self) -> impl Iterator<Item = &Mode> {
        self.modes.values()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).map(Flag::value)
    }

    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Name des Parameters, den der Kontext gerade anspricht.
    ///
    /// Eine Shift-Lane ohne eigene Zuordnung fällt auf die Lane ohne Shift zurück.
    pub fn active_parameter_name(&self, context: ModifierContext) -> Option<&str> {
        self.lookup_lane(context.lane()).or_else(|| {
            if context.lane() != context.base_lane() {
                self.lookup_lane(context.base_lane())
            } else {
                None
            }
        })
    }

    /// Parameter, den der Kontext gerade anspricht (`None` = Lane ohne Zuordnung).
    pub fn active_parameter(&self, context: ModifierContext) -> Option<&Parameter> {
        self.active_parameter_name(context)
            .and_then(|name| self.parameters.get(name))
    }

    pub fn active_parameter_mut(&mut self, context: ModifierContext) -> Option<&mut Parameter> {
        let name = self.active_parameter_name(context)?.to_string();
        self.parameters.get_mut(&name)
    }

    /// Lanes, die aktuell auf `parameter` zeigen.
    pub fn lanes_for(&self, parameter: &str) -> Vec<Lane> {
        self.lanes
            .iter()
            .filter(|b| b.parameter == parameter && self.condition_holds(b))
            .map(|b| b.lane)
            .collect()
    }

    fn lookup_lane(&self, lane: Lane) -> Option<&str> {
        self.lanes
            .iter()
            .filter(|b| b.lane == lane && self.condition_holds(b))
            .map(|b| b.parameter.as_str())
            .find(|name| self.parameters.contains_key(*name))
    }

    fn condition_holds(&self, binding: &LaneBinding) -> bool {
        match &binding.condition {
            None => true,
            Some(condition) => self
                .modes
                .get(&condition.mode)
                .is_some_and(|mode| condition.options.iter().any(|o| o == mode.current())),
        }
    }

    // ── Mutationen ───────────────────────────────────────────

    /// Schaltet einen Modus weiter und setzt abhängige Parameter zurück.
    ///
    /// Abhängig sind Parameter mit Modus-Standardwert (Wert + Eingabe werden
    /// zurückgesetzt) und Parameter, deren Lane an diesen Modus gebunden ist
    /// (nur die Eingabe). Gibt `false` zurück, wenn der Modus unbekannt ist.
    pub fn cycle_mode(&mut self, name: &str) -> bool {
        let Some(mode) = self.modes.get_mut(name) else {
            return false;
        };
        mode.cycle();

        let bound: Vec<String> = self
            .lanes
            .iter()
            .filter(|b| b.condition.as_ref().is_some_and(|c| c.mode == name))
            .map(|b| b.parameter.clone())
            .collect();
        for parameter in bound {
            if let Some(p) = self.parameters.get_mut(&parameter) {
                p.clear_entry();
            }
        }

        if let Some(defaults) = self.mode_defaults.get(name) {
            for (parameter, default) in defaults {
                if let Some(p) = self.parameters.get_mut(parameter) {
                    p.clear_entry();
                    p.set_value(*default);
                }
            }
        }
        true
    }

    /// Sperrt alle Parameter mit ihren aktuellen Werten als Eingabe.
    pub fn lock_entries(&mut self) {
        for p in self.parameters.values_mut() {
            p.lock_entry();
        }
    }

    /// Invertiert einen Schalter. Gibt `false` zurück, wenn er unbekannt ist.
    pub fn toggle_flag(&mut self, name: &str) -> bool {
        match self.flags.get_mut(name) {
            Some(flag) => {
                flag.value = !flag.value;
                true
            }
            None => false,
        }
    }

    /// Rollback: alle Werte, Modi und Schalter auf ihren Snapshot.
    pub fn restore_baseline(&mut self) {
        for p in self.parameters.values_mut() {
            p.restore_previous();
        }
        for mode in self.modes.values_mut() {
            mode.current_index = mode.previous_index;
        }
        for flag in self.flags.values_mut() {
            flag.value = flag.previous;
        }
    }

    /// Übernimmt den aktuellen Zustand als neuen Snapshot.
    pub fn accept_baseline(&mut self) {
        for p in self.parameters.values_mut() {
            p.accept_baseline();
        }
        for mode in self.modes.values_mut() {
            mode.previous_index = mode.current_index;
        }
        for flag in self.flags.values_mut() {
            flag.previous = flag.value;
        }
    }

    /// Ob der aktuelle Zustand dem Snapshot entspricht.
    pub fn is_at_baseline(&self) -> bool {
        self.parameters
            .values()
            .all(|p| p.value() == p.previous_value())
            && self
                .modes
                .values()
                .all(|m| m.current_index == m.previous_index)
            && self.flags.values().all(|f| f.value == f.previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parameter::ParameterSpec;
    use approx::assert_relative_eq;

    fn deform_set() -> ParameterSet {
        let mut set = ParameterSet::new();
        set.insert_parameter(Parameter::new(
            ParameterSpec::new("angle", 0.0).step(10.0),
            45.0,
        ));
        set.insert_parameter(Parameter::new(
            ParameterSpec::new("factor", 0.0).step(0.1),
            0.3,
        ));
        set.insert_parameter(Parameter::new(ParameterSpec::new("limit", 1.0), 1.0));
        set.insert_mode(Mode::new(
            ModeSpec::new("method", &["TWIST", "BEND", "TAPER", "STRETCH"]),
            0,
        ));
        set.insert_flag(Flag::new(FlagSpec::new("lock_x", false), false));
        set.set_lanes(vec![
            LaneBinding::new(Lane::None, "angle").when("method", &["TWIST", "BEND"]),
            LaneBinding::new(Lane::None, "factor").when("method", &["TAPER", "STRETCH"]),
            LaneBinding::new(Lane::Alt, "limit"),
        ]);
        let mut defaults = IndexMap::new();
        defaults.insert(
            "method".to_string(),
            IndexMap::from([("angle".to_string(), 0.0), ("factor".to_string(), 0.0)]),
        );
        set.set_mode_defaults(defaults);
        set
    }

    #[test]
    fn test_lane_lookup_and_unmapped_lane() {
        let set = deform_set();
        let none = ModifierContext::from_flags(false, false, false);
        assert_eq!(set.active_parameter_name(none), Some("angle"));
        let alt = ModifierContext::from_flags(false, true, false);
        assert_eq!(set.active_parameter_name(alt), Some("limit"));
        let ctrl = ModifierContext::from_flags(true, false, false);
        assert!(set.active_parameter(ctrl).is_none());
    }

    #[test]
    fn test_shift_lane_falls_back_to_base_lane() {
        let set = deform_set();
        let alt_shift = ModifierContext::from_flags(false, true, true);
        assert_eq!(set.active_parameter_name(alt_shift), Some("limit"));
        let shift = ModifierContext::from_flags(false, false, true);
        assert_eq!(set.active_parameter_name(shift), Some("angle"));
    }

    #[test]
    fn test_conditional_lane_follows_mode() {
        let mut set = deform_set();
        let none = ModifierContext::default();
        set.cycle_mode("method");
        assert_eq!(set.active_parameter_name(none), Some("angle"));
        set.cycle_mode("method");
        assert_eq!(set.mode_option("method"), Some("TAPER"));
        assert_eq!(set.active_parameter_name(none), Some("factor"));
    }

    #[test]
    fn test_mode_cycle_wraps() {
        let mut set = deform_set();
        for _ in 0..4 {
            assert!(set.cycle_mode("method"));
        }
        assert_eq!(set.mode("method").unwrap().current_index(), 0);
        assert!(!set.cycle_mode("unknown"));
    }

    #[test]
    fn test_mode_switch_resets_dependents() {
        let mut set = deform_set();
        let none = ModifierContext::default();
        let angle = set.active_parameter_mut(none).unwrap();
        angle.apply_entry_key(crate::core::numeric_entry::EntryKey::Digit('9'));
        assert!(angle.has_entry());

        set.cycle_mode("method");
        let angle = set.parameter("angle").unwrap();
        assert!(!angle.has_pending_text());
        assert_relative_eq!(angle.value(), 0.0);
        assert_relative_eq!(set.value("factor").unwrap(), 0.0);
        // Nicht abhängiger Parameter bleibt
        assert_relative_eq!(set.value("limit").unwrap(), 1.0);
    }

    #[test]
    fn test_switching_lane_keeps_entry() {
        let mut set = deform_set();
        let none = ModifierContext::default();
        let alt = ModifierContext::from_flags(false, true, false);
        set.active_parameter_mut(none)
            .unwrap()
            .apply_entry_key(crate::core::numeric_entry::EntryKey::Digit('7'));
        set.active_parameter_mut(alt).unwrap().set_value(3.0);
        assert_eq!(set.parameter("angle").unwrap().entry().raw(), Some("7"));
    }

    #[test]
    fn test_restore_and_accept_baseline() {
        let mut set = deform_set();
        set.parameter_mut("limit").unwrap().set_value(8.0);
        set.cycle_mode("method");
        set.toggle_flag("lock_x");
        assert!(!set.is_at_baseline());

        set.restore_baseline();
        assert!(set.is_at_baseline());
        assert_relative_eq!(set.value("angle").unwrap(), 45.0);
        assert_relative_eq!(set.value("factor").unwrap(), 0.3);
        assert_eq!(set.mode_option("method"), Some("TWIST"));
        assert_eq!(set.flag("lock_x"), Some(false));

        set.toggle_flag("lock_x");
        set.accept_baseline();
        set.restore_baseline();
        assert_eq!(set.flag("lock_x"), Some(true));
    }
}
