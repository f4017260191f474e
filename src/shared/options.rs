//! Zentrale Konfiguration der Editier-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::KeyCode;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Maus ────────────────────────────────────────────────────────────

/// Wertänderung pro Pixel Mausbewegung (vor Parameter-Sensitivität).
pub const MOUSE_VALUE_SCALAR: f64 = 0.0025;
/// Pixel Mausbewegung pro Schritt bei ganzzahligen Parametern.
pub const MOUSE_VALUE_STEPS: f64 = 10.0;

// ── Stufen ──────────────────────────────────────────────────────────

/// Faktor für Feinstufen (Shift), wenn ein Parameter keine eigene Feinstufe hat.
pub const FINE_STEP_FACTOR: f64 = 0.1;

// ── Reset ───────────────────────────────────────────────────────────

/// Verhalten der Reset-Taste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetBehaviour {
    /// Aktiven Parameter auf seinen Standardwert setzen
    #[default]
    Reset,
    /// Nur die laufende Zahleneingabe verwerfen
    Unlock,
}

// ── Tasten ──────────────────────────────────────────────────────────

/// Konfigurierbare Tasten der Engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Setzt den aktiven Parameter zurück
    pub reset: KeyCode,
    /// Schaltet die Durchreichung an den Host um
    pub pause: KeyCode,
    /// Fixiert die Anzeige (nur Darstellung)
    pub pin: KeyCode,
    /// Zusätzliche Tasten für "Schritt hoch"
    pub step_up_aliases: Vec<KeyCode>,
    /// Zusätzliche Tasten für "Schritt runter"
    pub step_down_aliases: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            reset: KeyCode::Letter('X'),
            pause: KeyCode::BackSlash,
            pin: KeyCode::Letter('P'),
            step_up_aliases: Vec::new(),
            step_down_aliases: Vec::new(),
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `modal_param_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Mausbewegung verändert den aktiven Parameter
    #[serde(default = "default_enable_mouse_values")]
    pub enable_mouse_values: bool,
    /// Wertänderung pro Pixel
    #[serde(default = "default_mouse_value_scalar")]
    pub mouse_value_scalar: f64,
    /// Pixel pro Schritt bei ganzzahligen Parametern
    #[serde(default = "default_mouse_value_steps")]
    pub mouse_value_steps: f64,
    /// Feinstufen-Faktor
    #[serde(default = "default_fine_step_factor")]
    pub fine_step_factor: f64,
    /// Verhalten der Reset-Taste
    #[serde(default)]
    pub reset_behaviour: ResetBehaviour,
    /// Fortgesetzte Parameter starten gesperrt (als getippte Eingabe)
    #[serde(default)]
    pub lock_parameters_on_recall: bool,
    /// Tastenbelegung
    #[serde(default)]
    pub keys: KeyBindings,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enable_mouse_values: true,
            mouse_value_scalar: MOUSE_VALUE_SCALAR,
            mouse_value_steps: MOUSE_VALUE_STEPS,
            fine_step_factor: FINE_STEP_FACTOR,
            reset_behaviour: ResetBehaviour::default(),
            lock_parameters_on_recall: false,
            keys: KeyBindings::default(),
        }
    }
}

fn default_enable_mouse_values() -> bool {
    true
}

fn default_mouse_value_scalar() -> f64 {
    MOUSE_VALUE_SCALAR
}

fn default_mouse_value_steps() -> f64 {
    MOUSE_VALUE_STEPS
}

fn default_fine_step_factor() -> f64 {
    FINE_STEP_FACTOR
}

/// Dateiname der Optionen neben der Binary.
const CONFIG_FILE_NAME: &str = "modal_param_editor.toml";

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei.
    ///
    /// Fehlt die Datei, gelten still die Standardwerte; eine fehlerhafte
    /// Datei wird gemeldet und ebenfalls durch Standardwerte ersetzt.
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            log::info!("{} fehlt, Engine läuft mit Standardwerten", path.display());
            return Self::default();
        }
        Self::read(path).unwrap_or_else(|e| {
            log::warn!("{:#}; Engine läuft mit Standardwerten", e);
            Self::default()
        })
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("{} nicht lesbar", path.display()))?;
        let options = toml::from_str(&content)
            .with_context(|| format!("{} ist kein gültiges Optionen-TOML", path.display()))?;
        log::info!("Engine-Optionen aus {} übernommen", path.display());
        Ok(options)
    }

    /// Schreibt die Optionen als TOML, z.B. als Vorlage zum Anpassen der Tasten.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("{} nicht schreibbar", path.display()))?;
        log::debug!("Engine-Optionen nach {} geschrieben", path.display());
        Ok(())
    }

    /// Pfad der Optionen-Datei: Verzeichnis der Binary, sonst Arbeitsverzeichnis.
    pub fn config_path() -> PathBuf {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(CONFIG_FILE_NAME)
    }

    /// Pixel pro Ganzzahl-Schritt; nie kleiner als 1.
    pub fn pixels_per_step(&self) -> f64 {
        self.mouse_value_steps.max(1.0)
    }
}
