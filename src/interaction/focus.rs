use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HandleId, SelectionTopology};

/// Element of the slider that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    Handle(HandleId),
    DisplayUnitControl,
}

/// Keyboard focus bookkeeping for one slider instance.
///
/// Tab order is Start, End, Point, then the display-unit control, skipping
/// anything the topology does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusManager {
    topology: SelectionTopology,
    display_unit_control: bool,
    focused: Option<FocusTarget>,
}

impl FocusManager {
    #[must_use]
    pub fn new(topology: SelectionTopology, display_unit_control: bool) -> Self {
        Self {
            topology,
            display_unit_control,
            focused: None,
        }
    }

    #[must_use]
    pub fn tab_order(&self) -> SmallVec<[FocusTarget; 4]> {
        let mut order: SmallVec<[FocusTarget; 4]> = self
            .topology
            .handles()
            .iter()
            .copied()
            .map(FocusTarget::Handle)
            .collect();
        if self.display_unit_control {
            order.push(FocusTarget::DisplayUnitControl);
        }
        order
    }

    #[must_use]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    #[must_use]
    pub fn focused_handle(&self) -> Option<HandleId> {
        match self.focused {
            Some(FocusTarget::Handle(handle)) => Some(handle),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(&self, target: FocusTarget) -> bool {
        self.tab_order().contains(&target)
    }

    /// Moves focus onto `target`. Returns `false` and leaves focus untouched
    /// when the target does not exist here.
    pub fn focus_in(&mut self, target: FocusTarget) -> bool {
        if !self.contains(target) {
            return false;
        }
        self.focused = Some(target);
        true
    }

    /// Returns the target that lost focus, if any.
    pub fn focus_out(&mut self) -> Option<FocusTarget> {
        self.focused.take()
    }

    /// Tab. Entering from outside lands on the first target; tabbing past the
    /// last one releases focus and returns `None`.
    pub fn focus_next(&mut self) -> Option<FocusTarget> {
        let order = self.tab_order();
        let next = match self.focused {
            None => order.first().copied(),
            Some(current) => order
                .iter()
                .position(|target| *target == current)
                .and_then(|index| order.get(index + 1).copied()),
        };
        self.focused = next;
        next
    }

    /// Shift+Tab, the mirror of [`FocusManager::focus_next`].
    pub fn focus_previous(&mut self) -> Option<FocusTarget> {
        let order = self.tab_order();
        let previous = match self.focused {
            None => order.last().copied(),
            Some(current) => order
                .iter()
                .position(|target| *target == current)
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| order.get(index).copied()),
        };
        self.focused = previous;
        previous
    }

    /// Drops focus that no longer points at an existing target.
    pub fn reconfigure(&mut self, topology: SelectionTopology, display_unit_control: bool) {
        self.topology = topology;
        self.display_unit_control = display_unit_control;
        if let Some(target) = self.focused {
            if !self.contains(target) {
                self.focused = None;
            }
        }
    }
}
