//! UI-Anbindung: Übersetzung von egui-Events für egui-basierte Hosts.

pub mod egui_input;

pub use egui_input::EguiInputTranslator;
