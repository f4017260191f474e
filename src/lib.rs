//! Modal Param Editor Library.
//! Engine für interaktive, transaktionale Parameter-Bearbeitung modaler Tools.

pub mod app;
pub mod core;
pub mod sandbox;
pub mod shared;
pub mod tools;
pub mod ui;

pub use app::{
    BindingValues, EngineError, EventClassifier, HandleOutcome, InputIntent, PresentationSnapshot,
    Session, SessionState, ToolAdapter, ToolConfig,
};
pub use core::{
    KeyCode, Lane, ModifierContext, MouseButton, NumericEntryState, Parameter, ParameterSet,
    ParameterSpec, RawEventKind, RawInputEvent,
};
pub use shared::{EngineOptions, KeyBindings, ResetBehaviour};
