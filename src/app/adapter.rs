//! Vertrag zwischen der Engine und einem konkreten Tool.
//!
//! Ein Tool entscheidet nur, *welches* externe Objekt ein Parameter
//! beschreibt. Transaktion, Eingabe und Rollback übernimmt die `Session`.

use super::presentation::{PresentationSnapshot, SessionView};
use crate::core::{Parameter, ParameterSet, ValueKind};

pub use crate::core::{BindingValues, ToolConfig};

/// Schnittstelle, die jedes Tool implementiert.
pub trait ToolAdapter {
    /// Host-Zustand, auf dem das Tool arbeitet (Szene, Dokument, ...)
    type Host;
    /// Verweis auf das externe Ziel einer Bearbeitung
    type Binding: Clone + std::fmt::Debug;

    /// Statische Beschreibung der Parameter, Modi, Schalter und Lanes.
    fn config(&self) -> &ToolConfig;

    /// Ob das Tool auf dem aktuellen Host-Zustand starten darf.
    fn precondition(&self, host: &Self::Host) -> bool;

    /// Sucht eine früher bestätigte Bindung, die fortgesetzt werden kann.
    fn find_existing_binding(&self, host: &Self::Host) -> Option<Self::Binding>;

    /// Legt ein neues externes Ziel mit den Standardwerten an.
    fn create_binding(
        &self,
        host: &mut Self::Host,
        parameters: &ParameterSet,
    ) -> anyhow::Result<Self::Binding>;

    /// Liest die aktuellen Werte einer bestehenden Bindung.
    fn read_current(
        &self,
        host: &Self::Host,
        binding: &Self::Binding,
    ) -> anyhow::Result<BindingValues>;

    /// Überträgt die aktuellen Werte auf das externe Ziel. Muss idempotent sein.
    fn apply(
        &self,
        host: &mut Self::Host,
        binding: &Self::Binding,
        parameters: &ParameterSet,
    ) -> anyhow::Result<()>;

    /// Nacharbeiten beim Bestätigen.
    fn finalize(
        &self,
        _host: &mut Self::Host,
        _binding: &Self::Binding,
        _parameters: &ParameterSet,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Entfernt eine neu angelegte Bindung (nur beim Rollback).
    fn destroy(&self, host: &mut Self::Host, binding: Self::Binding) -> anyhow::Result<()>;

    /// Anzeigetext eines Parameterwerts.
    fn format_value(&self, parameter: &Parameter) -> String {
        match parameter.spec().kind {
            ValueKind::Integer => format!("{}", parameter.value() as i64),
            ValueKind::Float => format!("{:.3}", parameter.value()),
        }
    }

    /// Read-only Projektion der Session für die Darstellung.
    fn presentation_snapshot(&self, view: &SessionView<'_>) -> PresentationSnapshot {
        PresentationSnapshot::build(view, |p| self.format_value(p))
    }
}
