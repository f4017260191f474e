//! Transaktionale Editier-Session: Eingabe → Parameter → `apply` → Commit/Rollback.

use super::adapter::ToolAdapter;
use super::classifier::EventClassifier;
use super::error::{ApplyStage, EngineError};
use super::events::InputIntent;
use super::intent_log::IntentLog;
use super::presentation::{PresentationSnapshot, SessionView};
use crate::core::{
    EntryKey, ModifierContext, Parameter, ParameterSet, RawInputEvent, ValueKind,
};
use crate::shared::{EngineOptions, ResetBehaviour};
use serde::Serialize;

/// Lebenszyklus einer Session. `Committed` und `RolledBack` sind terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Initializing,
    Active,
    Committed,
    RolledBack,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Committed | SessionState::RolledBack)
    }
}

/// Ergebnis von `Session::handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Event verarbeitet, Session läuft weiter
    Continue,
    /// Event gehört dem Host
    PassThrough,
    /// Bestätigt und abgeschlossen
    Finished,
    /// Abgebrochen und zurückgerollt
    Cancelled,
}

/// Eine laufende Bearbeitung. Besitzt die Bindung exklusiv bis Commit oder Rollback.
pub struct Session<A: ToolAdapter> {
    adapter: A,
    parameters: ParameterSet,
    binding: Option<A::Binding>,
    resumed: bool,
    dirty: bool,
    state: SessionState,
    paused: bool,
    pinned: bool,
    context: ModifierContext,
    classifier: EventClassifier,
    options: EngineOptions,
    log: IntentLog,
}

impl<A: ToolAdapter> Session<A> {
    /// Startet eine Session: bestehende Bindung fortsetzen oder neu anlegen.
    ///
    /// Eine fortgesetzte Bindung mit unbrauchbaren Werten wird verworfen und
    /// stattdessen eine neue angelegt.
    pub fn start(
        adapter: A,
        host: &mut A::Host,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        let tool = adapter.config().name.clone();
        if !adapter.precondition(host) {
            return Err(EngineError::PreconditionFailed { tool });
        }

        let resumed = adapter.find_existing_binding(host).and_then(|binding| {
            match resume_parameters(&adapter, host, &binding) {
                Ok(parameters) => Some((parameters, binding)),
                Err(e) => {
                    log::warn!("{}, starte mit neuer Bindung", e);
                    None
                }
            }
        });

        let (parameters, binding, is_resumed) = match resumed {
            Some((mut parameters, binding)) => {
                log::info!("{}: bestehende Bindung {:?} fortgesetzt", tool, binding);
                if options.lock_parameters_on_recall {
                    parameters.lock_entries();
                }
                (parameters, binding, true)
            }
            None => {
                let parameters = adapter.config().build_defaults();
                let binding = adapter
                    .create_binding(host, &parameters)
                    .map_err(|e| EngineError::creation(&tool, e))?;
                log::info!("{}: neue Bindung {:?} angelegt", tool, binding);
                (parameters, binding, false)
            }
        };

        let classifier = EventClassifier::new(&options.keys, adapter.config());
        let mut session = Self {
            adapter,
            parameters,
            binding: Some(binding),
            resumed: is_resumed,
            dirty: false,
            state: SessionState::Initializing,
            paused: false,
            pinned: false,
            context: ModifierContext::default(),
            classifier,
            options,
            log: IntentLog::new(),
        };
        session.state = SessionState::Active;
        Ok(session)
    }

    // ── Abfragen ─────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Ob eine bestehende Bindung fortgesetzt wurde.
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Bindung, solange die Session aktiv ist.
    pub fn binding(&self) -> Option<&A::Binding> {
        self.binding.as_ref()
    }

    pub fn intent_log(&self) -> &IntentLog {
        &self.log
    }

    /// Modifier-Kontext des zuletzt verarbeiteten Events.
    pub fn context(&self) -> ModifierContext {
        self.context
    }

    /// Parameter, den der zuletzt gesehene Modifier-Kontext anspricht.
    pub fn active_parameter(&self) -> Option<&Parameter> {
        self.parameters.active_parameter(self.context)
    }

    /// Read-only Projektion für die Darstellung.
    pub fn presentation(&self) -> PresentationSnapshot {
        let view = SessionView {
            tool: &self.adapter.config().name,
            parameters: &self.parameters,
            context: self.context,
            state: self.state,
            resumed: self.resumed,
            paused: self.paused,
            pinned: self.pinned,
        };
        self.adapter.presentation_snapshot(&view)
    }

    // ── Event-Verarbeitung ───────────────────────────────────

    /// Klassifiziert und verarbeitet ein rohes Host-Event.
    pub fn handle(
        &mut self,
        host: &mut A::Host,
        event: &RawInputEvent,
    ) -> Result<HandleOutcome, EngineError> {
        self.ensure_active()?;
        let (intent, context) = self.classifier.classify(event);
        self.handle_intent(host, intent, context)
    }

    /// Verarbeitet einen bereits klassifizierten Intent.
    ///
    /// Nach jeder Mutation wird `apply` genau einmal aufgerufen. Schlägt es
    /// fehl, wird die Session implizit zurückgerollt.
    pub fn handle_intent(
        &mut self,
        host: &mut A::Host,
        intent: InputIntent,
        context: ModifierContext,
    ) -> Result<HandleOutcome, EngineError> {
        self.ensure_active()?;

        if self.paused && intent != InputIntent::TogglePassthrough {
            return Ok(HandleOutcome::PassThrough);
        }
        self.context = context;

        let changed = match &intent {
            InputIntent::PassThrough => return Ok(HandleOutcome::PassThrough),
            InputIntent::Confirm => {
                self.commit(host)?;
                return Ok(HandleOutcome::Finished);
            }
            InputIntent::Cancel => {
                self.rollback(host)?;
                return Ok(HandleOutcome::Cancelled);
            }
            InputIntent::TogglePassthrough => {
                self.paused = !self.paused;
                log::info!(
                    "Durchreichung an den Host {}",
                    if self.paused { "aktiv" } else { "beendet" }
                );
                self.log.record(intent.clone(), context.lane());
                return Ok(HandleOutcome::Continue);
            }
            InputIntent::TogglePin => {
                self.pinned = !self.pinned;
                self.log.record(intent.clone(), context.lane());
                return Ok(HandleOutcome::Continue);
            }
            InputIntent::Digit(c) => self.entry_key(context, EntryKey::Digit(*c)),
            InputIntent::Decimal => self.entry_key(context, EntryKey::Decimal),
            InputIntent::Negate => self.entry_key(context, EntryKey::Negate),
            InputIntent::Backspace => self.entry_key(context, EntryKey::Backspace),
            InputIntent::StepUp => self.step(context, 1.0),
            InputIntent::StepDown => self.step(context, -1.0),
            InputIntent::MouseDelta(dx) => self.drag(context, *dx),
            InputIntent::ResetParameter => self.reset_active(context),
            InputIntent::ToggleFlag(name) => self.parameters.toggle_flag(name),
            InputIntent::CycleMode(name) => self.parameters.cycle_mode(name),
        };

        if changed {
            self.dirty = true;
            self.log.record(intent, context.lane());
        }
        self.flush(host)?;
        Ok(HandleOutcome::Continue)
    }

    fn entry_key(&mut self, context: ModifierContext, key: EntryKey) -> bool {
        match self.parameters.active_parameter_mut(context) {
            Some(p) => p.apply_entry_key(key),
            None => {
                log::debug!("Lane {:?} ohne Parameter, Eingabe ignoriert", context.lane());
                false
            }
        }
    }

    fn step(&mut self, context: ModifierContext, direction: f64) -> bool {
        let factor = self.options.fine_step_factor;
        match self.parameters.active_parameter_mut(context) {
            Some(p) if p.has_entry() => {
                log::debug!("Schritt auf '{}' unterdrückt: Eingabe läuft", p.name());
                false
            }
            Some(p) => p.step(direction, context.is_fine(), factor),
            None => {
                log::debug!("Lane {:?} ohne Parameter, Schritt ignoriert", context.lane());
                false
            }
        }
    }

    fn drag(&mut self, context: ModifierContext, dx: f64) -> bool {
        if !self.options.enable_mouse_values || dx == 0.0 {
            return false;
        }
        let options = &self.options;
        let Some(p) = self.parameters.active_parameter_mut(context) else {
            return false;
        };
        match p.spec().kind {
            ValueKind::Integer => p.drag_steps(dx, options.pixels_per_step()),
            ValueKind::Float => {
                let mut amount = dx * options.mouse_value_scalar;
                if context.is_fine() {
                    amount *= options.fine_step_factor;
                }
                p.drag(amount)
            }
        }
    }

    fn reset_active(&mut self, context: ModifierContext) -> bool {
        let behaviour = self.options.reset_behaviour;
        let Some(p) = self.parameters.active_parameter_mut(context) else {
            return false;
        };
        match behaviour {
            ResetBehaviour::Unlock if p.has_pending_text() => {
                p.clear_entry();
                true
            }
            _ => {
                let had_entry = p.has_pending_text();
                p.reset_to_default() || had_entry
            }
        }
    }

    /// Überträgt ausstehende Änderungen genau einmal.
    fn flush(&mut self, host: &mut A::Host) -> Result<(), EngineError> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        let Some(binding) = self.binding.as_ref() else {
            return Ok(());
        };
        if let Err(e) = self.adapter.apply(host, binding, &self.parameters) {
            let tool = self.adapter.config().name.clone();
            log::warn!("{}: apply fehlgeschlagen, Rollback: {:#}", tool, e);
            if let Err(rollback_error) = self.rollback_inner(host) {
                log::error!("{}: Rollback nach Fehler unvollständig: {}", tool, rollback_error);
            }
            return Err(EngineError::apply(&tool, ApplyStage::Apply, e));
        }
        Ok(())
    }

    // ── Transaktion ──────────────────────────────────────────

    /// Bestätigt die Bearbeitung und gibt die Bindung frei.
    pub fn commit(&mut self, host: &mut A::Host) -> Result<(), EngineError> {
        self.ensure_active()?;
        self.flush(host)?;

        let tool = self.adapter.config().name.clone();
        if let Some(binding) = self.binding.as_ref() {
            if let Err(e) = self.adapter.finalize(host, binding, &self.parameters) {
                log::warn!("{}: finalize fehlgeschlagen, Rollback: {:#}", tool, e);
                if let Err(rollback_error) = self.rollback_inner(host) {
                    log::error!("{}: Rollback nach Fehler unvollständig: {}", tool, rollback_error);
                }
                return Err(EngineError::apply(&tool, ApplyStage::Finalize, e));
            }
        }

        self.binding = None;
        self.state = SessionState::Committed;
        log::info!("{}: bestätigt ({} Intents)", tool, self.log.len());
        Ok(())
    }

    /// Verwirft die Bearbeitung.
    ///
    /// Alle Werte gehen auf ihren Snapshot zurück und werden einmal angewendet.
    /// Eine neu angelegte Bindung wird danach entfernt, eine fortgesetzte
    /// bleibt unverändert.
    pub fn rollback(&mut self, host: &mut A::Host) -> Result<(), EngineError> {
        self.ensure_active()?;
        self.rollback_inner(host)
    }

    fn rollback_inner(&mut self, host: &mut A::Host) -> Result<(), EngineError> {
        let tool = self.adapter.config().name.clone();
        self.parameters.restore_baseline();
        self.dirty = false;
        self.state = SessionState::RolledBack;

        let Some(binding) = self.binding.take() else {
            return Ok(());
        };

        let mut failure = None;
        if let Err(e) = self.adapter.apply(host, &binding, &self.parameters) {
            log::error!("{}: apply beim Rollback fehlgeschlagen: {:#}", tool, e);
            failure = Some(EngineError::apply(&tool, ApplyStage::Apply, e));
        }
        if !self.resumed {
            if let Err(e) = self.adapter.destroy(host, binding) {
                log::error!("{}: Bindung konnte nicht entfernt werden: {:#}", tool, e);
                failure.get_or_insert(EngineError::apply(&tool, ApplyStage::Destroy, e));
            }
        }

        log::info!(
            "{}: zurückgerollt ({})",
            tool,
            if self.resumed {
                "Bindung unverändert"
            } else {
                "Bindung entfernt"
            }
        );
        failure.map_or(Ok(()), Err)
    }

    /// Übernimmt den aktuellen Zustand als neuen Rollback-Snapshot.
    pub fn accept_baseline(&mut self) -> Result<(), EngineError> {
        self.ensure_active()?;
        self.parameters.accept_baseline();
        log::debug!("{}: aktueller Zustand als Snapshot übernommen", self.adapter.config().name);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.state == SessionState::Active {
            Ok(())
        } else {
            Err(EngineError::NotActive {
                state: format!("{:?}", self.state),
            })
        }
    }
}

impl<A: ToolAdapter> Drop for Session<A> {
    fn drop(&mut self) {
        if self.state == SessionState::Active {
            log::warn!(
                "{}: Session verworfen, ohne bestätigt oder abgebrochen zu werden",
                self.adapter.config().name
            );
        }
    }
}

/// Liest die Werte einer bestehenden Bindung und baut daraus das Set.
fn resume_parameters<A: ToolAdapter>(
    adapter: &A,
    host: &A::Host,
    binding: &A::Binding,
) -> Result<ParameterSet, EngineError> {
    let config = adapter.config();
    let invalid = |reason: String| EngineError::InvalidTargetState {
        tool: config.name.clone(),
        reason,
    };
    let values = adapter
        .read_current(host, binding)
        .map_err(|e| invalid(format!("{:#}", e)))?;
    config.build_from_values(&values).map_err(invalid)
}
