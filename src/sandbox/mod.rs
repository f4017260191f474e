//! In-Memory-Szene als Host für die Referenz-Tools.
//!
//! Objekte tragen einen Modifier-Stapel; jeder Modifier ist ein benannter
//! Satz von Properties mit optionalen Grenzen. Verletzte Grenzen liefern
//! Fehler, womit sich abgelehnte Werte des Hosts nachstellen lassen.

use indexmap::IndexMap;
use thiserror::Error;

/// Art eines Szene-Objekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Light,
    Empty,
}

/// Wert einer Modifier-Property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Enum(String),
}

/// Fehler bei Zugriffen auf die Szene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("Objekt '{0}' existiert nicht")]
    UnknownObject(String),
    #[error("Modifier '{modifier}' existiert nicht auf '{object}'")]
    UnknownModifier { object: String, modifier: String },
    #[error("Property '{property}' = {value} außerhalb [{min}, {max}]")]
    OutOfRange {
        property: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Property '{0}' fehlt oder hat einen anderen Typ")]
    PropertyMismatch(String),
}

/// Verweis auf einen Modifier eines Objekts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModifierRef {
    pub object: String,
    pub modifier: String,
}

/// Ein Modifier auf dem Stapel.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub name: String,
    pub kind: String,
    properties: IndexMap<String, PropertyValue>,
    limits: IndexMap<String, (f64, f64)>,
}

impl Modifier {
    fn new(name: String, kind: &str) -> Self {
        Self {
            name,
            kind: kind.to_string(),
            properties: IndexMap::new(),
            limits: IndexMap::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.properties.get(key)? {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.properties.get(key)? {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.properties.get(key)? {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn enum_value(&self, key: &str) -> Option<&str> {
        match self.properties.get(key)? {
            PropertyValue::Enum(v) => Some(v),
            _ => None,
        }
    }

    /// Setzt eine Property unter Beachtung ihrer Grenzen.
    pub fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), SceneError> {
        let numeric = match &value {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f64),
            _ => None,
        };
        if let (Some(v), Some((min, max))) = (numeric, self.limits.get(key)) {
            if v < *min || v > *max {
                return Err(SceneError::OutOfRange {
                    property: key.to_string(),
                    value: v,
                    min: *min,
                    max: *max,
                });
            }
        }
        self.properties.insert(key.to_string(), value);
        Ok(())
    }

    /// Entfernt eine Property (z.B. für unvollständige Alt-Bestände).
    pub fn unset(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(key)
    }

    /// Grenzen, die der Host bei `set` durchsetzt.
    pub fn set_limit(&mut self, key: &str, min: f64, max: f64) {
        self.limits.insert(key.to_string(), (min, max));
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// Ein Objekt der Szene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub selected: bool,
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    pub fn modifier_mut(&mut self, name: &str) -> Option<&mut Modifier> {
        self.modifiers.iter_mut().find(|m| m.name == name)
    }

    /// Oberster (zuletzt hinzugefügter) Modifier einer Art.
    pub fn last_modifier_of_kind(&self, kind: &str) -> Option<&Modifier> {
        self.modifiers.iter().rev().find(|m| m.kind == kind)
    }

    pub fn has_modifier_of_kind(&self, kind: &str) -> bool {
        self.modifiers.iter().any(|m| m.kind == kind)
    }
}

/// Container für alle Objekte.
#[derive(Debug, Clone, Default)]
pub struct SandboxScene {
    objects: IndexMap<String, SceneObject>,
    /// Grenzen, die jeder neue Modifier einer Art erbt
    kind_limits: IndexMap<String, IndexMap<String, (f64, f64)>>,
}

impl SandboxScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt ein Objekt hinzu (ersetzt ein gleichnamiges).
    pub fn add_object(&mut self, name: &str, kind: ObjectKind) {
        self.objects.insert(
            name.to_string(),
            SceneObject {
                name: name.to_string(),
                kind,
                selected: false,
                modifiers: Vec::new(),
            },
        );
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(name)
    }

    /// Selektiert genau die genannten Objekte.
    pub fn select_only(&mut self, names: &[&str]) {
        for object in self.objects.values_mut() {
            object.selected = names.contains(&object.name.as_str());
        }
    }

    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values().filter(|o| o.selected)
    }

    /// Das einzige selektierte Objekt, falls genau eines selektiert ist.
    pub fn single_selected(&self) -> Option<&SceneObject> {
        let mut selected = self.selected_objects();
        match (selected.next(), selected.next()) {
            (Some(object), None) => Some(object),
            _ => None,
        }
    }

    /// Legt einen Modifier mit eindeutigem Namen (`Bevel`, `Bevel.001`, ...) an.
    pub fn add_modifier(
        &mut self,
        object: &str,
        kind: &str,
        base_name: &str,
    ) -> Result<ModifierRef, SceneError> {
        let target = self
            .objects
            .get_mut(object)
            .ok_or_else(|| SceneError::UnknownObject(object.to_string()))?;

        let mut name = base_name.to_string();
        let mut counter = 0;
        while target.modifier(&name).is_some() {
            counter += 1;
            name = format!("{base_name}.{counter:03}");
        }
        let mut modifier = Modifier::new(name.clone(), kind);
        if let Some(limits) = self.kind_limits.get(kind) {
            modifier.limits = limits.clone();
        }
        target.modifiers.push(modifier);
        Ok(ModifierRef {
            object: object.to_string(),
            modifier: name,
        })
    }

    /// Grenze für alle künftig angelegten Modifier einer Art.
    pub fn set_kind_limit(&mut self, kind: &str, key: &str, min: f64, max: f64) {
        self.kind_limits
            .entry(kind.to_string())
            .or_default()
            .insert(key.to_string(), (min, max));
    }

    pub fn remove_modifier(&mut self, reference: &ModifierRef) -> Result<Modifier, SceneError> {
        let target = self
            .objects
            .get_mut(&reference.object)
            .ok_or_else(|| SceneError::UnknownObject(reference.object.clone()))?;
        let index = target
            .modifiers
            .iter()
            .position(|m| m.name == reference.modifier)
            .ok_or_else(|| unknown_modifier(reference))?;
        Ok(target.modifiers.remove(index))
    }

    pub fn modifier(&self, reference: &ModifierRef) -> Result<&Modifier, SceneError> {
        self.objects
            .get(&reference.object)
            .ok_or_else(|| SceneError::UnknownObject(reference.object.clone()))?
            .modifier(&reference.modifier)
            .ok_or_else(|| unknown_modifier(reference))
    }

    pub fn modifier_mut(&mut self, reference: &ModifierRef) -> Result<&mut Modifier, SceneError> {
        self.objects
            .get_mut(&reference.object)
            .ok_or_else(|| SceneError::UnknownObject(reference.object.clone()))?
            .modifier_mut(&reference.modifier)
            .ok_or_else(|| unknown_modifier(reference))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

fn unknown_modifier(reference: &ModifierRef) -> SceneError {
    SceneError::UnknownModifier {
        object: reference.object.clone(),
        modifier: reference.modifier.clone(),
    }
}
