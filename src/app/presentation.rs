//! Read-only Projektion einer Session für eine Overlay-Darstellung.
//!
//! Die Darstellung liest ausschließlich diesen Snapshot und verändert nie
//! den Session-Zustand.

use super::session::SessionState;
use crate::core::{Lane, ModifierContext, Parameter, ParameterSet};
use serde::Serialize;

/// Geliehene Sicht auf den Session-Zustand, aus der ein Snapshot entsteht.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub tool: &'a str,
    pub parameters: &'a ParameterSet,
    pub context: ModifierContext,
    pub state: SessionState,
    pub resumed: bool,
    pub paused: bool,
    pub pinned: bool,
}

/// Kopfzeile des Overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderState {
    /// Durchreichung an den Host aktiv
    pub paused: bool,
    /// Bestehende Bindung wurde fortgesetzt
    pub recalled: bool,
    /// Anzeige fixiert
    pub pinned: bool,
}

/// Eine Zeile pro Parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub name: String,
    pub label: String,
    pub value: f64,
    /// Formatierter Wert
    pub display: String,
    /// Tasten-Hinweis, z.B. `"Ctrl"`
    pub step_hint: String,
    pub active: bool,
    /// Feinstufe aktiv (nur für die aktive Zeile)
    pub fine: bool,
    pub raw_entry: Option<String>,
    pub entry_valid: bool,
    /// Aktiver Parameter mit laufender Zahleneingabe
    pub manual_override: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeRow {
    pub name: String,
    pub label: String,
    pub current: String,
    pub options: Vec<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagRow {
    pub name: String,
    pub label: String,
    pub value: bool,
    pub key: Option<String>,
}

/// Alles, was ein Overlay pro Frame anzeigen darf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationSnapshot {
    pub tool: String,
    pub state: SessionState,
    pub header: HeaderState,
    pub lane: Lane,
    pub active_parameter: Option<String>,
    pub parameters: Vec<ParameterRow>,
    pub modes: Vec<ModeRow>,
    pub flags: Vec<FlagRow>,
}

impl PresentationSnapshot {
    /// Baut den Snapshot; `format` liefert den Anzeigetext eines Werts.
    pub fn build(view: &SessionView<'_>, format: impl Fn(&Parameter) -> String) -> Self {
        let params = view.parameters;
        let active = params
            .active_parameter_name(view.context)
            .map(str::to_string);
        let fine = view.context.is_fine();

        let parameters = params
            .parameters()
            .map(|p| {
                let is_active = active.as_deref() == Some(p.name());
                ParameterRow {
                    name: p.name().to_string(),
                    label: p.label().to_string(),
                    value: p.value(),
                    display: format(p),
                    step_hint: step_hint(&params.lanes_for(p.name())),
                    active: is_active,
                    fine: is_active && fine,
                    raw_entry: p.entry().raw().map(str::to_string),
                    entry_valid: p.entry().is_valid(),
                    manual_override: is_active && p.has_pending_text(),
                }
            })
            .collect();

        let modes = params
            .modes()
            .map(|m| ModeRow {
                name: m.name().to_string(),
                label: m.spec().label.clone(),
                current: m.current().to_string(),
                options: m.spec().options.clone(),
                key: m.spec().key.map(|k| k.to_string()),
            })
            .collect();

        let flags = params
            .flags()
            .map(|f| FlagRow {
                name: f.name().to_string(),
                label: f.spec().label.clone(),
                value: f.value(),
                key: f.spec().key.map(|k| k.to_string()),
            })
            .collect();

        Self {
            tool: view.tool.to_string(),
            state: view.state,
            header: HeaderState {
                paused: view.paused,
                recalled: view.resumed,
                pinned: view.pinned,
            },
            lane: view.context.lane(),
            active_parameter: active,
            parameters,
            modes,
            flags,
        }
    }

    /// Zeile des aktiven Parameters.
    pub fn active_row(&self) -> Option<&ParameterRow> {
        self.parameters.iter().find(|r| r.active)
    }

    /// Export als formatiertes JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn step_hint(lanes: &[Lane]) -> String {
    lanes
        .iter()
        .map(|lane| match lane {
            Lane::None => "Maus",
            other => other.label(),
        })
        .collect::<Vec<_>>()
        .join(" / ")
}
