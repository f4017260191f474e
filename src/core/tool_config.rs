//! Statische Tool-Beschreibung und Aufbau eines `ParameterSet` daraus.

use super::input::KeyCode;
use super::parameter::{Parameter, ParameterSpec};
use super::parameter_set::{Flag, FlagSpec, LaneBinding, Mode, ModeSpec, ParameterSet};
use indexmap::IndexMap;

/// Alles, was ein Tool statisch über seine Parameter weiß.
#[derive(Debug, Clone, Default)]
pub struct ToolConfig {
    /// Tool-Name (für Logs und Fehlermeldungen)
    pub name: String,
    /// Parameter in Anzeige-Reihenfolge
    pub parameters: Vec<ParameterSpec>,
    /// Zyklische Auswahlen
    pub modes: Vec<ModeSpec>,
    /// Boolesche Schalter
    pub flags: Vec<FlagSpec>,
    /// Lane-Tabelle
    pub lanes: Vec<LaneBinding>,
    /// Standardwerte, die beim Modus-Wechsel gesetzt werden
    pub mode_defaults: IndexMap<String, IndexMap<String, f64>>,
}

impl ToolConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn mode(mut self, spec: ModeSpec) -> Self {
        self.modes.push(spec);
        self
    }

    pub fn flag(mut self, spec: FlagSpec) -> Self {
        self.flags.push(spec);
        self
    }

    pub fn lane(mut self, binding: LaneBinding) -> Self {
        self.lanes.push(binding);
        self
    }

    /// Beim Wechsel von `mode` wird `parameter` auf `value` gesetzt.
    pub fn mode_default(mut self, mode: &str, parameter: &str, value: f64) -> Self {
        self.mode_defaults
            .entry(mode.to_string())
            .or_default()
            .insert(parameter.to_string(), value);
        self
    }

    /// Taste → Schalter-Name.
    pub fn flag_keys(&self) -> impl Iterator<Item = (KeyCode, &str)> {
        self.flags
            .iter()
            .filter_map(|f| f.key.map(|k| (k, f.name.as_str())))
    }

    /// Taste → Modus-Name.
    pub fn mode_keys(&self) -> impl Iterator<Item = (KeyCode, &str)> {
        self.modes
            .iter()
            .filter_map(|m| m.key.map(|k| (k, m.name.as_str())))
    }

    /// Baut ein frisches Set mit Standardwerten.
    pub fn build_defaults(&self) -> ParameterSet {
        let mut set = ParameterSet::new();
        for spec in &self.parameters {
            set.insert_parameter(Parameter::new(spec.clone(), spec.default));
        }
        for spec in &self.modes {
            set.insert_mode(Mode::new(spec.clone(), spec.default_index));
        }
        for spec in &self.flags {
            set.insert_flag(Flag::new(spec.clone(), spec.default));
        }
        set.set_lanes(self.lanes.clone());
        set.set_mode_defaults(self.mode_defaults.clone());
        set
    }

    /// Baut ein Set aus den Werten einer bestehenden Bindung.
    ///
    /// Fehlt ein Wert oder liegt er außerhalb des gültigen Bereichs, wird der
    /// Grund als Text zurückgegeben; es wird nicht stillschweigend geklemmt.
    pub fn build_from_values(&self, values: &BindingValues) -> Result<ParameterSet, String> {
        let mut set = ParameterSet::new();
        for spec in &self.parameters {
            let value = values
                .parameters
                .get(&spec.name)
                .copied()
                .ok_or_else(|| format!("Wert für '{}' fehlt", spec.name))?;
            if !value.is_finite() || !spec.contains(value) {
                return Err(format!(
                    "Wert {value} für '{}' liegt außerhalb [{}, {}]",
                    spec.name, spec.min, spec.max
                ));
            }
            set.insert_parameter(Parameter::new(spec.clone(), value));
        }
        for spec in &self.modes {
            let option = values
                .modes
                .get(&spec.name)
                .ok_or_else(|| format!("Modus '{}' fehlt", spec.name))?;
            let index = spec
                .options
                .iter()
                .position(|o| o == option)
                .ok_or_else(|| format!("Unbekannte Option '{option}' für '{}'", spec.name))?;
            set.insert_mode(Mode::new(spec.clone(), index));
        }
        for spec in &self.flags {
            let value = values
                .flags
                .get(&spec.name)
                .copied()
                .ok_or_else(|| format!("Schalter '{}' fehlt", spec.name))?;
            set.insert_flag(Flag::new(spec.clone(), value));
        }
        set.set_lanes(self.lanes.clone());
        set.set_mode_defaults(self.mode_defaults.clone());
        Ok(set)
    }
}

/// Werte, die ein Adapter aus einer bestehenden Bindung liest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingValues {
    pub parameters: IndexMap<String, f64>,
    pub modes: IndexMap<String, String>,
    pub flags: IndexMap<String, bool>,
}

impl BindingValues {
    /// Schnappschuss des aktuellen Zustands eines Sets.
    pub fn from_set(set: &ParameterSet) -> Self {
        Self {
            parameters: set
                .parameters()
                .map(|p| (p.name().to_string(), p.value()))
                .collect(),
            modes: set
                .modes()
                .map(|m| (m.name().to_string(), m.current().to_string()))
                .collect(),
            flags: set
                .flags()
                .map(|f| (f.name().to_string(), f.value()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modifiers::Lane;
    use approx::assert_relative_eq;

    fn config() -> ToolConfig {
        ToolConfig::new("test")
            .parameter(ParameterSpec::new("width", 0.1).bounds(0.0, f64::INFINITY))
            .parameter(ParameterSpec::integer("segments", 1).bounds(1.0, 100.0))
            .mode(ModeSpec::new("axis", &["X", "Y", "Z"]).key(KeyCode::letter('a')))
            .flag(FlagSpec::new("clamp", true).key(KeyCode::letter('c')))
            .lane(LaneBinding::new(Lane::None, "width"))
    }

    #[test]
    fn test_build_defaults() {
        let set = config().build_defaults();
        assert_relative_eq!(set.value("width").unwrap(), 0.1);
        assert_relative_eq!(set.value("segments").unwrap(), 1.0);
        assert_eq!(set.mode_option("axis"), Some("X"));
        assert_eq!(set.flag("clamp"), Some(true));
    }

    #[test]
    fn test_build_from_values_adopts_existing() {
        let config = config();
        let mut values = BindingValues::from_set(&config.build_defaults());
        values.parameters.insert("segments".into(), 4.0);
        values.modes.insert("axis".into(), "Z".into());
        let set = config.build_from_values(&values).unwrap();
        assert_relative_eq!(set.value("segments").unwrap(), 4.0);
        assert_eq!(set.mode_option("axis"), Some("Z"));
        assert!(set.is_at_baseline());
    }

    #[test]
    fn test_build_from_values_rejects_out_of_range() {
        let config = config();
        let mut values = BindingValues::from_set(&config.build_defaults());
        values.parameters.insert("segments".into(), 0.0);
        assert!(config.build_from_values(&values).is_err());

        values.parameters.shift_remove("segments");
        assert!(config.build_from_values(&values).is_err());
    }

    #[test]
    fn test_build_from_values_rejects_missing_flag() {
        let config = config();
        let mut values = BindingValues::from_set(&config.build_defaults());
        assert!(config.build_from_values(&values).is_ok());

        values.flags.shift_remove("clamp");
        let err = config.build_from_values(&values).unwrap_err();
        assert!(err.contains("clamp"), "{err}");
    }

    #[test]
    fn test_key_tables() {
        let config = config();
        let flags: Vec<_> = config.flag_keys().collect();
        assert_eq!(flags, vec![(KeyCode::Letter('C'), "clamp")]);
        let modes: Vec<_> = config.mode_keys().collect();
        assert_eq!(modes, vec![(KeyCode::Letter('A'), "axis")]);
    }
}
