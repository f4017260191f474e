//! Referenz-Tools auf Basis der Sandbox-Szene.
//!
//! Jedes Tool implementiert `ToolAdapter` und beschreibt nur, welche
//! Modifier-Properties seine Parameter abbilden.

/// Bevel-Modifier mit Weld-Nacharbeit.
pub mod bevel;
/// Simple-Deform-Modifier mit Methoden- und Achsen-Modus.
pub mod simple_deform;

pub use bevel::BevelTool;
pub use simple_deform::SimpleDeformTool;
