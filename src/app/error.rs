//! Fehlertypen der Editier-Engine.

use thiserror::Error;

/// Fehlerquelle aus einem Tool-Adapter.
pub type AdapterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Phase, in der ein Adapter-Aufruf fehlgeschlagen ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStage {
    Apply,
    Finalize,
    Destroy,
}

impl std::fmt::Display for ApplyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ApplyStage::Apply => "apply",
            ApplyStage::Finalize => "finalize",
            ApplyStage::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// Fehler, die eine Session an den Aufrufer meldet.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Das Tool kann auf dem aktuellen Host-Zustand nicht starten
    #[error("{tool}: Voraussetzung nicht erfüllt")]
    PreconditionFailed { tool: String },

    /// Eine bestehende Bindung liefert unbrauchbare Werte
    #[error("{tool}: ungültiger Zustand der Bindung: {reason}")]
    InvalidTargetState { tool: String, reason: String },

    /// Der Adapter konnte keine Bindung anlegen
    #[error("{tool}: Bindung konnte nicht erstellt werden")]
    BindingCreationFailed {
        tool: String,
        #[source]
        source: AdapterError,
    },

    /// Der Host hat das Anwenden der Werte abgelehnt
    #[error("{tool}: {stage} fehlgeschlagen")]
    ApplyFailure {
        tool: String,
        stage: ApplyStage,
        #[source]
        source: AdapterError,
    },

    /// Operation auf einer bereits beendeten Session
    #[error("Session ist nicht aktiv (Zustand: {state})")]
    NotActive { state: String },
}

impl EngineError {
    pub(crate) fn apply(tool: &str, stage: ApplyStage, error: anyhow::Error) -> Self {
        EngineError::ApplyFailure {
            tool: tool.to_string(),
            stage,
            source: error.into(),
        }
    }

    pub(crate) fn creation(tool: &str, error: anyhow::Error) -> Self {
        EngineError::BindingCreationFailed {
            tool: tool.to_string(),
            source: error.into(),
        }
    }
}
