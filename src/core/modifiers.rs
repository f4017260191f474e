//! Modifier-Lanes: welche Kombination aus Ctrl/Alt/Shift gerade gehalten wird.

use serde::Serialize;

/// Genau eine Lane ist pro Event aktiv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Lane {
    /// Keine Modifier
    None,
    /// Nur Ctrl
    Ctrl,
    /// Ctrl + Shift
    CtrlShift,
    /// Nur Alt
    Alt,
    /// Alt + Shift
    AltShift,
    /// Ctrl + Alt
    CtrlAlt,
    /// Ctrl + Alt + Shift
    CtrlAltShift,
    /// Nur Shift
    ShiftOnly,
}

impl Lane {
    /// Alle Lanes in fester Reihenfolge.
    pub const ALL: [Lane; 8] = [
        Lane::None,
        Lane::Ctrl,
        Lane::CtrlShift,
        Lane::Alt,
        Lane::AltShift,
        Lane::CtrlAlt,
        Lane::CtrlAltShift,
        Lane::ShiftOnly,
    ];

    /// Leitet die Lane rein aus den drei Modifier-Flags ab.
    pub fn from_flags(ctrl: bool, alt: bool, shift: bool) -> Self {
        match (ctrl, alt, shift) {
            (false, false, false) => Lane::None,
            (true, false, false) => Lane::Ctrl,
            (true, false, true) => Lane::CtrlShift,
            (false, true, false) => Lane::Alt,
            (false, true, true) => Lane::AltShift,
            (true, true, false) => Lane::CtrlAlt,
            (true, true, true) => Lane::CtrlAltShift,
            (false, false, true) => Lane::ShiftOnly,
        }
    }

    /// Ob Shift Teil dieser Lane ist.
    pub fn has_shift(self) -> bool {
        matches!(
            self,
            Lane::CtrlShift | Lane::AltShift | Lane::CtrlAltShift | Lane::ShiftOnly
        )
    }

    /// Lane ohne Shift (Shift wirkt nur als Feinstufen-Modifier).
    pub fn without_shift(self) -> Self {
        match self {
            Lane::CtrlShift => Lane::Ctrl,
            Lane::AltShift => Lane::Alt,
            Lane::CtrlAltShift => Lane::CtrlAlt,
            Lane::ShiftOnly => Lane::None,
            other => other,
        }
    }

    /// Kurzbezeichnung für Tastenhinweise.
    pub fn label(self) -> &'static str {
        match self {
            Lane::None => "",
            Lane::Ctrl => "Ctrl",
            Lane::CtrlShift => "Ctrl + Shift",
            Lane::Alt => "Alt",
            Lane::AltShift => "Alt + Shift",
            Lane::CtrlAlt => "Ctrl + Alt",
            Lane::CtrlAltShift => "Ctrl + Alt + Shift",
            Lane::ShiftOnly => "Shift",
        }
    }
}

/// Unveränderlicher Modifier-Kontext eines einzelnen Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModifierContext {
    lane: Lane,
}

impl Default for ModifierContext {
    fn default() -> Self {
        Self { lane: Lane::None }
    }
}

impl ModifierContext {
    /// Erstellt den Kontext aus den rohen Modifier-Flags.
    pub fn from_flags(ctrl: bool, alt: bool, shift: bool) -> Self {
        Self {
            lane: Lane::from_flags(ctrl, alt, shift),
        }
    }

    /// Kontext für eine explizite Lane.
    pub fn from_lane(lane: Lane) -> Self {
        Self { lane }
    }

    /// Aktive Lane.
    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Lane ohne Shift-Anteil.
    pub fn base_lane(&self) -> Lane {
        self.lane.without_shift()
    }

    /// Feinstufe aktiv (Shift gehalten).
    pub fn is_fine(&self) -> bool {
        self.lane.has_shift()
    }
}
