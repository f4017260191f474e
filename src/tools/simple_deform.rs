//! Simple-Deform-Tool: Methode und Achse als Modi, Winkel oder Faktor als Wert.
//!
//! Twist und Bend sind winkelbasiert, Taper und Stretch faktorbasiert; die
//! unmodifizierte Lane zeigt je nach Methode auf `angle` oder `factor`.

use crate::app::{BindingValues, ToolAdapter, ToolConfig};
use crate::core::{KeyCode, Lane, LaneBinding, ModeSpec, Parameter, ParameterSet, ParameterSpec};
use crate::sandbox::{ModifierRef, ObjectKind, PropertyValue, SandboxScene};
use anyhow::Context as _;

pub const SIMPLE_DEFORM_KIND: &str = "SIMPLE_DEFORM";

const METHODS: [&str; 4] = ["TWIST", "BEND", "TAPER", "STRETCH"];
const ANGULAR_METHODS: [&str; 2] = ["TWIST", "BEND"];
const AXES: [&str; 3] = ["X", "Y", "Z"];

pub struct SimpleDeformTool {
    config: ToolConfig,
}

impl Default for SimpleDeformTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleDeformTool {
    pub fn new() -> Self {
        let config = ToolConfig::new("Simple Deform")
            .parameter(
                ParameterSpec::new("angle", 0.0)
                    .label("Winkel")
                    .step(10.0)
                    .fine_step(1.0)
                    .bounds(-360.0, 360.0)
                    .drag_sensitivity(100.0),
            )
            .parameter(
                ParameterSpec::new("factor", 0.0)
                    .label("Faktor")
                    .step(0.1)
                    .fine_step(0.01),
            )
            .mode(
                ModeSpec::new("method", &METHODS)
                    .label("Methode")
                    .key(KeyCode::letter('m')),
            )
            .mode(ModeSpec::new("axis", &AXES).label("Achse").key(KeyCode::letter('a')))
            .lane(LaneBinding::new(Lane::None, "angle").when("method", &ANGULAR_METHODS))
            .lane(LaneBinding::new(Lane::None, "factor").when("method", &["TAPER", "STRETCH"]))
            .mode_default("method", "angle", 0.0)
            .mode_default("method", "factor", 0.0);
        Self { config }
    }
}

impl ToolAdapter for SimpleDeformTool {
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
        let modifier = object.last_modifier_of_kind(SIMPLE_DEFORM_KIND)?;
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
        let reference = scene.add_modifier(&object, SIMPLE_DEFORM_KIND, "SimpleDeform")?;
        if let Err(e) = self.apply(scene, &reference, parameters) {
            scene.remove_modifier(&reference)?;
            return Err(e.context("Simple Deform konnte nicht initialisiert werden"));
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
        let angle = modifier.float("angle").context("Property 'angle' fehlt")?;
        let factor = modifier.float("factor").context("Property 'factor' fehlt")?;
        values.parameters.insert("angle".into(), angle.to_degrees());
        values.parameters.insert("factor".into(), factor);
        for (mode, key) in [("method", "deform_method"), ("axis", "deform_axis")] {
            let option = modifier
                .enum_value(key)
                .with_context(|| format!("Property '{key}' fehlt"))?;
            values.modes.insert(mode.into(), option.to_string());
        }
        Ok(values)
    }

    /// Schreibt Winkel und Faktor immer beide, auch wenn die Methode nur
    /// einen davon nutzt. Ein Rollback stellt so beide wieder her.
    fn apply(
        &self,
        scene: &mut SandboxScene,
        binding: &ModifierRef,
        parameters: &ParameterSet,
    ) -> anyhow::Result<()> {
        let modifier = scene.modifier_mut(binding)?;
        let method = parameters.mode_option("method").unwrap_or(METHODS[0]);
        let axis = parameters.mode_option("axis").unwrap_or(AXES[0]);
        let angle = parameters.value("angle").unwrap_or_default();
        let factor = parameters.value("factor").unwrap_or_default();
        modifier.set("deform_method", PropertyValue::Enum(method.to_string()))?;
        modifier.set("deform_axis", PropertyValue::Enum(axis.to_string()))?;
        modifier.set("angle", PropertyValue::Float(angle.to_radians()))?;
        modifier.set("factor", PropertyValue::Float(factor))?;
        Ok(())
    }

    fn destroy(&self, scene: &mut SandboxScene, binding: ModifierRef) -> anyhow::Result<()> {
        scene.remove_modifier(&binding)?;
        Ok(())
    }

    fn format_value(&self, parameter: &Parameter) -> String {
        match parameter.name() {
            "angle" => format!("{:.2}°", parameter.value()),
            _ => format!("{:.3}", parameter.value()),
        }
    }
}
