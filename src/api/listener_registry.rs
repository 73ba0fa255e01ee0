use tracing::{trace, warn};

use crate::core::SelectionResult;
use crate::error::{SliderError, SliderResult};
use crate::extensions::{
    ListenerContext, SelectionListener, SliderCommand, SliderCommands, SliderEvent,
};

use super::SliderEngine;

/// Upper bound on follow-up rounds a chain of listener commands may trigger.
const MAX_COMMAND_ROUNDS: usize = 16;

impl SliderEngine {
    /// Registers a listener under its unique id.
    pub fn register_listener(&mut self, listener: Box<dyn SelectionListener>) -> SliderResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(SliderError::InvalidConfig(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.listeners.contains_key(&listener_id) {
            return Err(SliderError::InvalidConfig(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.insert(listener_id, listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        self.listeners.shift_remove(listener_id).is_some()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners.contains_key(listener_id)
    }

    pub(super) fn listener_context(&self) -> ListenerContext {
        ListenerContext {
            topology: self.selection.topology(),
            axis: self.selection.axis(),
            display_unit: self.display_unit,
            dragging: self.drag.map(|session| session.handle),
            focused: self.focus.focused(),
        }
    }

    pub(super) fn emit_change(&mut self, result: SelectionResult) {
        trace!(?result, listeners = self.listeners.len(), "emit selection");
        let context = self.listener_context();
        let mut commands = SliderCommands::default();
        for listener in self.listeners.values_mut() {
            listener.on_change(result, context, &mut commands);
        }
        for command in commands.drain() {
            self.pending_commands.push(command);
        }
        self.drain_commands();
    }

    pub(super) fn emit_event(&mut self, event: SliderEvent) {
        let context = self.listener_context();
        for listener in self.listeners.values_mut() {
            listener.on_event(event, context);
        }
    }

    /// Runs queued listener commands once the emission that queued them is
    /// over. Nested emissions only enqueue; the outermost call drains.
    fn drain_commands(&mut self) {
        if self.draining_commands {
            return;
        }
        self.draining_commands = true;
        let mut rounds = 0;
        loop {
            let batch = self.pending_commands.drain();
            if batch.is_empty() {
                break;
            }
            rounds += 1;
            if rounds > MAX_COMMAND_ROUNDS {
                warn!(
                    dropped = batch.len(),
                    "dropping listener commands after too many follow-up rounds"
                );
                break;
            }
            for command in batch {
                self.apply_command(command);
            }
        }
        self.draining_commands = false;
    }

    fn apply_command(&mut self, command: SliderCommand) {
        match command {
            SliderCommand::SetDateTime { instant, handle } => {
                self.set_date_time(instant, handle);
            }
            SliderCommand::FocusHandle { handle } => {
                self.focus_handle(handle);
            }
        }
    }
}
