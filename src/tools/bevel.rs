//! Bevel-Tool: Breite, Segmente, Profil und Winkel eines Bevel-Modifiers.
//!
//! Lanes: ohne Modifier → Breite, Alt → Segmente, Ctrl → Profil,
//! Ctrl+Alt → Winkel. Beim Bestätigen wird ein Weld-Modifier ergänzt.

use crate::core::{FlagSpec, KeyCode, Lane, LaneBinding, Parameter, ParameterSet, ParameterSpec};
use crate::app::{BindingValues, ToolAdapter, ToolConfig};
use crate::sandbox::{ModifierRef, ObjectKind, PropertyValue, SandboxScene};
use anyhow::Context as _;

/// Modifier-Art des Bevels.
pub const BEVEL_KIND: &str = "BEVEL";
/// Modifier-Art des nachgelagerten Weld.
pub const WELD_KIND: &str = "WELD";

/// Bevel auf dem einzigen selektierten Mesh.
pub struct BevelTool {
    config: ToolConfig,
}

impl Default for BevelTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BevelTool {
    pub fn new() -> Self {
        let config = ToolConfig::new("Bevel")
            .parameter(
                ParameterSpec::new("width", 0.0)
                    .label("Breite")
                    .step(0.1)
                    .bounds(0.0, f64::INFINITY),
            )
            .parameter(
                ParameterSpec::integer("segments", 1)
                    .label("Segmente")
                    .step(2.0)
                    .fine_step(1.0)
                    .bounds(1.0, 1000.0),
            )
            .parameter(
                ParameterSpec::new("profile", 0.5)
                    .label("Profil")
                    .step(0.1)
                    .fine_step(0.01)
                    .bounds(0.0, 1.0)
                    .scale(0.1),
            )
            .parameter(
                ParameterSpec::new("angle", 30.0)
                    .label("Winkel")
                    .step(15.0)
                    .fine_step(1.0)
                    .bounds(0.0, 180.0)
                    .drag_sensitivity(100.0),
            )
            .flag(
                FlagSpec::new("harden_normals", false)
                    .label("Harden Normals")
                    .key(KeyCode::letter('h')),
            )
            .flag(
                FlagSpec::new("clamp_overlap", false)
                    .label("Clamp Overlap")
                    .key(KeyCode::letter('c')),
            )
            .flag(
                FlagSpec::new("loop_slide", false)
                    .label("Loop Slide")
                    .key(KeyCode::letter('s')),
            )
            .lane(LaneBinding::new(Lane::None, "width"))
            .lane(LaneBinding::new(Lane::Alt, "segments"))
            .lane(LaneBinding::new(Lane::Ctrl, "profile"))
            .lane(LaneBinding::new(Lane::CtrlAlt, "angle"));
        Self { config }
    }
}

impl BevelTool {
    /// Feste Einstellungen plus erste Werte auf einen frischen Modifier.
    fn initialize(
        &self,
        scene: &mut SandboxScene,
        reference: &ModifierRef,
        parameters: &ParameterSet,
    ) -> anyhow::Result<()> {
        let modifier = scene.modifier_mut(reference)?;
        modifier.set("offset_type", PropertyValue::Enum("WIDTH".into()))?;
        modifier.set("miter_outer", PropertyValue::Enum("MITER_ARC".into()))?;
        self.apply(scene, reference, parameters)
    }
}

impl ToolAdapter for BevelTool {
    type Host = SandboxScene;
    type Binding = ModifierRef;

    fn config(&self) -> &ToolConfig {
        &self.config
    }

    fn precondition(&self, scene: &SandboxScene) -> bool {
        scene
            .single_selected()
            .is_some_and(|o| o.kind == ObjectKind::Mesh)
    }

    fn find_existing_binding(&self, scene: &SandboxScene) -> Option<ModifierRef> {
        let object = scene.single_selected()?;
        let modifier = object.last_modifier_of_kind(BEVEL_KIND)?;
        Some(ModifierRef {
            object: object.name.clone(),
            modifier: modifier.name.clone(),
        })
    }

    fn create_binding(
        &self,
        scene: &mut SandboxScene,
        parameters: &ParameterSet,
    ) -> anyhow::Result<ModifierRef> {
        let object = scene
            .single_selected()
            .map(|o| o.name.clone())
            .context("kein Mesh selektiert")?;
        let reference = scene.add_modifier(&object, BEVEL_KIND, "Bevel")?;
        if let Err(e) = self.initialize(scene, &reference, parameters) {
            // Halb angelegten Modifier nicht auf dem Stapel lassen
            scene.remove_modifier(&reference)?;
            return Err(e.context("Bevel konnte nicht initialisiert werden"));
        }
        Ok(reference)
    }

    fn read_current(
        &self,
        scene: &SandboxScene,
        binding: &ModifierRef,
    ) -> anyhow::Result<BindingValues> {
        let modifier = scene.modifier(binding)?;
        let mut values = BindingValues::default();
        for key in ["width", "segments", "profile"] {
            let value = modifier
                .float(key)
                .with_context(|| format!("Property '{key}' fehlt"))?;
            values.parameters.insert(key.to_string(), value);
        }
        let angle = modifier
            .float("angle_limit")
            .context("Property 'angle_limit' fehlt")?;
        values
            .parameters
            .insert("angle".to_string(), angle.to_degrees());
        for flag in ["harden_normals", "clamp_overlap", "loop_slide"] {
            let value = modifier
                .bool(flag)
                .with_context(|| format!("Property '{flag}' fehlt"))?;
            values.flags.insert(flag.to_string(), value);
        }
        Ok(values)
    }

    fn apply(
        &self,
        scene: &mut SandboxScene,
        binding: &ModifierRef,
        parameters: &ParameterSet,
    ) -> anyhow::Result<()> {
        let modifier = scene.modifier_mut(binding)?;
        let value = |name: &str| parameters.value(name).unwrap_or_default();
        modifier.set("width", PropertyValue::Float(value("width")))?;
        modifier.set("segments", PropertyValue::Int(value("segments") as i64))?;
        modifier.set("profile", PropertyValue::Float(value("profile")))?;
        modifier.set(
            "angle_limit",
            PropertyValue::Float(value("angle").to_radians()),
        )?;
        for flag in ["harden_normals", "clamp_overlap", "loop_slide"] {
            let on = parameters.flag(flag).unwrap_or(false);
            modifier.set(flag, PropertyValue::Bool(on))?;
        }
        Ok(())
    }

    fn finalize(
        &self,
        scene: &mut SandboxScene,
        binding: &ModifierRef,
        _parameters: &ParameterSet,
    ) -> anyhow::Result<()> {
        let has_weld = scene
            .object(&binding.object)
            .is_some_and(|o| o.has_modifier_of_kind(WELD_KIND));
        if has_weld {
            return Ok(());
        }
        let weld = scene.add_modifier(&binding.object, WELD_KIND, "Weld")?;
        let modifier = scene.modifier_mut(&weld)?;
        modifier.set("merge_threshold", PropertyValue::Float(0.00001))?;
        modifier.set("mode", PropertyValue::Enum("CONNECTED".into()))?;
        log::debug!("Weld-Modifier '{}' ergänzt", weld.modifier);
        Ok(())
    }

    fn destroy(&self, scene: &mut SandboxScene, binding: ModifierRef) -> anyhow::Result<()> {
        scene.remove_modifier(&binding)?;
        Ok(())
    }

    fn format_value(&self, parameter: &Parameter) -> String {
        match parameter.name() {
            "segments" => format!("{}", parameter.value() as i64),
            "angle" => format!("{:.0}°", parameter.value()),
            "width" => format!("{:.3} m", parameter.value()),
            _ => format!("{:.2}", parameter.value()),
        }
    }
}
