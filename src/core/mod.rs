//! Core-Domänentypen: Zahleneingabe, Modifier-Lanes, Parameter und Tool-Beschreibung.

pub mod input;
pub mod modifiers;
pub mod numeric_entry;
pub mod parameter;
pub mod parameter_set;
pub mod tool_config;

pub use input::{KeyCode, MouseButton, RawEventKind, RawInputEvent, Transition, UnknownKeyName};
pub use modifiers::{Lane, ModifierContext};
pub use numeric_entry::{EntryKey, NumericEntryState};
pub use parameter::{Parameter, ParameterSpec, ValueKind};
pub use parameter_set::{
    Flag, FlagSpec, LaneBinding, Mode, ModeCondition, ModeSpec, ParameterSet,
};
pub use tool_config::{BindingValues, ToolConfig};
