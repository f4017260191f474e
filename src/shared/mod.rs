//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Engine-Konfiguration, die `app` und `ui` gemeinsam nutzen.

pub mod options;

pub use options::{EngineOptions, KeyBindings, ResetBehaviour};
pub use options::{FINE_STEP_FACTOR, MOUSE_VALUE_SCALAR, MOUSE_VALUE_STEPS};
