use tracing::trace;

use crate::core::position_mapper::{PERCENT_MAX, PERCENT_MIN};
use crate::core::{DisplayUnit, HandleId, percent_from_instant};
use crate::interaction::{FocusTarget, KeyCommand, SliderKey};

use super::SliderEngine;

impl SliderEngine {
    /// Handles a key press on the slider. Returns `true` when the key was
    /// consumed; `false` lets the host apply its default (e.g. Tab leaving
    /// the slider).
    pub fn key_down(&mut self, key: SliderKey) -> bool {
        let command = KeyCommand::from(key);
        trace!(?key, ?command, "key down");
        match command {
            KeyCommand::FocusNext => {
                let target = self.focus.focus_next();
                self.sync_focus();
                target.is_some()
            }
            KeyCommand::FocusPrevious => {
                let target = self.focus.focus_previous();
                self.sync_focus();
                target.is_some()
            }
            _ => match self.focus.focused() {
                Some(FocusTarget::Handle(handle)) => self.step_handle(handle, command),
                Some(FocusTarget::DisplayUnitControl) => self.step_display_unit(command),
                None => false,
            },
        }
    }

    /// One keypress moves the handle and commits, as a single cycle.
    fn step_handle(&mut self, handle: HandleId, command: KeyCommand) -> bool {
        if self.drag.is_some() {
            return true;
        }
        let Some(current) = self.selection.instant_of(handle) else {
            return false;
        };
        let axis = self.selection.axis();
        let overflow_edge = |count: i32| if count < 0 { PERCENT_MIN } else { PERCENT_MAX };
        let target_percent = match command {
            KeyCommand::Step(count) => current
                .checked_add_signed(axis.granularity().step() * count)
                .map_or(overflow_edge(count), |next| percent_from_instant(next, axis)),
            KeyCommand::Page(count) => self
                .display_unit
                .add(current, count)
                .map_or(overflow_edge(count), |next| percent_from_instant(next, axis)),
            KeyCommand::ToStart => PERCENT_MIN,
            KeyCommand::ToEnd => PERCENT_MAX,
            KeyCommand::FocusNext | KeyCommand::FocusPrevious => return false,
        };

        if self.selection.propose_move(handle, target_percent).is_none() {
            return false;
        }
        self.commit();
        self.reveal_handle(handle);
        true
    }

    /// Arrow keys on the display-unit control cycle Day, Month, Year.
    fn step_display_unit(&mut self, command: KeyCommand) -> bool {
        const ORDER: [DisplayUnit; 3] = [DisplayUnit::Day, DisplayUnit::Month, DisplayUnit::Year];
        let index = ORDER
            .iter()
            .position(|unit| *unit == self.display_unit)
            .unwrap_or(1);
        let next = match command {
            KeyCommand::Step(count) | KeyCommand::Page(count) => {
                (index as i32 + count).clamp(0, ORDER.len() as i32 - 1) as usize
            }
            KeyCommand::ToStart => 0,
            KeyCommand::ToEnd => ORDER.len() - 1,
            KeyCommand::FocusNext | KeyCommand::FocusPrevious => return false,
        };
        self.set_display_unit(ORDER[next]);
        true
    }
}
