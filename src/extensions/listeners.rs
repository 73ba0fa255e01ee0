use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DisplayUnit, HandleId, SelectionResult, SelectionTopology, TimeAxis};
use crate::interaction::FocusTarget;

/// Read-only state passed along with every listener callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListenerContext {
    pub topology: SelectionTopology,
    pub axis: TimeAxis,
    pub display_unit: DisplayUnit,
    pub dragging: Option<HandleId>,
    pub focused: Option<FocusTarget>,
}

/// Coarse lifecycle events besides selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderEvent {
    DragStarted { handle: HandleId },
    DragEnded { handle: HandleId },
    DragCanceled { handle: HandleId },
    FocusChanged { target: Option<FocusTarget> },
    Scrolled { scroll_left_px: f64 },
    ScalesRegenerated { count: usize },
    Reconfigured,
}

/// Imperative call queued by a listener during an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderCommand {
    SetDateTime {
        instant: DateTime<Utc>,
        handle: Option<HandleId>,
    },
    FocusHandle {
        handle: HandleId,
    },
}

/// Queue handed to listeners. Commands run after the current emission has
/// finished, each as its own commit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliderCommands {
    queued: Vec<SliderCommand>,
}

impl SliderCommands {
    pub fn set_date_time(&mut self, instant: DateTime<Utc>, handle: Option<HandleId>) {
        self.queued
            .push(SliderCommand::SetDateTime { instant, handle });
    }

    pub fn focus_handle(&mut self, handle: HandleId) {
        self.queued.push(SliderCommand::FocusHandle { handle });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub(crate) fn push(&mut self, command: SliderCommand) {
        self.queued.push(command);
    }

    pub(crate) fn drain(&mut self) -> Vec<SliderCommand> {
        std::mem::take(&mut self.queued)
    }
}

/// Receiver of committed selections.
///
/// `on_change` fires exactly once per commit. Listeners must not assume they
/// can reach the engine directly; they push follow-up calls into `commands`.
pub trait SelectionListener {
    fn id(&self) -> &str;

    fn on_change(
        &mut self,
        result: SelectionResult,
        context: ListenerContext,
        commands: &mut SliderCommands,
    );

    fn on_event(&mut self, _event: SliderEvent, _context: ListenerContext) {}
}

/// Adapts a closure into a [`SelectionListener`].
pub struct FnListener<F> {
    id: String,
    callback: F,
}

impl<F> FnListener<F>
where
    F: FnMut(SelectionResult, &mut SliderCommands),
{
    pub fn new(id: impl Into<String>, callback: F) -> Self {
        Self {
            id: id.into(),
            callback,
        }
    }
}

impl<F> std::fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnListener").field("id", &self.id).finish()
    }
}

impl<F> SelectionListener for FnListener<F>
where
    F: FnMut(SelectionResult, &mut SliderCommands),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn on_change(
        &mut self,
        result: SelectionResult,
        _context: ListenerContext,
        commands: &mut SliderCommands,
    ) {
        (self.callback)(result, commands);
    }
}
