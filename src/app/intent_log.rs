//! Begrenztes Log der verarbeiteten, zustandsändernden Intents.

use super::events::InputIntent;
use crate::core::Lane;

/// Ein geloggter Intent mit der Lane, unter der er verarbeitet wurde.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentRecord {
    pub intent: InputIntent,
    pub lane: Lane,
}

/// Speichert verarbeitete Intents in Reihenfolge.
#[derive(Debug, Default)]
pub struct IntentLog {
    entries: Vec<IntentRecord>,
}

impl IntentLog {
    const MAX_ENTRIES: usize = 1000;

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen Intent hinzu.
    /// Begrenzt auf MAX_ENTRIES, die ältere Hälfte wird verworfen.
    pub fn record(&mut self, intent: InputIntent, lane: Lane) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(IntentRecord { intent, lane });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IntentRecord] {
        &self.entries
    }

    /// Zuletzt geloggter Intent.
    pub fn last(&self) -> Option<&IntentRecord> {
        self.entries.last()
    }
}
