pub mod auto_scroll;
pub mod focus;
pub mod keyboard;

pub use auto_scroll::{AutoScrollBehavior, AutoScrollController, ScrollDirection, ScrollViewport};
pub use focus::{FocusManager, FocusTarget};
pub use keyboard::{KeyCommand, SliderKey};

use serde::{Deserialize, Serialize};

use crate::core::HandleId;
use crate::core::position_mapper::PERCENT_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// One pointer sample in client (page) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub kind: PointerKind,
    pub client_x: f64,
}

impl PointerInput {
    #[must_use]
    pub fn mouse(client_x: f64) -> Self {
        Self {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            client_x,
        }
    }

    #[must_use]
    pub fn touch(pointer_id: u64, client_x: f64) -> Self {
        Self {
            pointer_id,
            kind: PointerKind::Touch,
            client_x,
        }
    }
}

/// What a gesture started on. Hosts that hit-test themselves pass this in;
/// others can ask the engine via `SliderEngine::hit_test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    Handle(HandleId),
    Track,
}

/// Horizontal placement of the track in client coordinates, measured with the
/// viewport scrolled fully left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub left_px: f64,
    pub width_px: f64,
}

impl TrackGeometry {
    #[must_use]
    pub fn new(left_px: f64, width_px: f64) -> Self {
        Self { left_px, width_px }
    }

    /// Percent under `client_x`, unclamped.
    ///
    /// `scroll_offset_px` is how far scrolling has displaced the track from
    /// `left_px`: negative once the viewport scrolls right.
    #[must_use]
    pub fn pointer_percent(self, client_x: f64, scroll_offset_px: f64) -> f64 {
        (client_x - self.left_px - scroll_offset_px) / self.width_px * PERCENT_MAX
    }

    #[must_use]
    pub fn percent_to_px(self, percent: f64) -> f64 {
        percent / PERCENT_MAX * self.width_px
    }
}

/// State of one in-flight handle drag.
///
/// The handle follows the pointer by the distance travelled since the grab,
/// so grabbing a handle off-centre does not make it jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub handle: HandleId,
    pub pointer_id: u64,
    pub pointer_origin_percent: f64,
    pub handle_origin_percent: f64,
    pub last_committed_percent: f64,
    pub last_pointer_percent: f64,
    /// Last pointer x in client pixels. Re-mapped when the track scrolls
    /// under a stationary pointer.
    pub last_client_x: f64,
}

impl DragSession {
    #[must_use]
    pub fn new(
        handle: HandleId,
        pointer_id: u64,
        client_x: f64,
        pointer_percent: f64,
        handle_percent: f64,
    ) -> Self {
        Self {
            handle,
            pointer_id,
            pointer_origin_percent: pointer_percent,
            handle_origin_percent: handle_percent,
            last_committed_percent: handle_percent,
            last_pointer_percent: pointer_percent,
            last_client_x: client_x,
        }
    }

    /// Candidate handle percent for the pointer now at `client_x`, which maps
    /// to `pointer_percent` under the current scroll.
    pub fn track(&mut self, client_x: f64, pointer_percent: f64) -> f64 {
        self.last_client_x = client_x;
        self.last_pointer_percent = pointer_percent;
        self.handle_origin_percent + (pointer_percent - self.pointer_origin_percent)
    }

    /// Restarts relative tracking from a handle position changed outside the
    /// gesture.
    pub fn rebase(&mut self, handle_percent: f64) {
        self.pointer_origin_percent = self.last_pointer_percent;
        self.handle_origin_percent = handle_percent;
    }

    #[must_use]
    pub fn direction(self) -> Option<ScrollDirection> {
        let travelled = self.last_pointer_percent - self.pointer_origin_percent;
        if travelled > 0.0 {
            Some(ScrollDirection::Forward)
        } else if travelled < 0.0 {
            Some(ScrollDirection::Backward)
        } else {
            None
        }
    }
}

/// A press on the bare track that may still turn out to be a click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPress {
    pub pointer_id: u64,
    pub client_x: f64,
    pub exceeded_slop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Idle,
    TrackPressed,
    Dragging(HandleId),
}

#[cfg(test)]
mod tests {
    use super::{DragSession, TrackGeometry};
    use crate::core::HandleId;
    use crate::interaction::ScrollDirection;

    #[test]
    fn pointer_percent_accounts_for_scroll_displacement() {
        let track = TrackGeometry::new(100.0, 2_000.0);
        assert_eq!(track.pointer_percent(600.0, 0.0), 25.0);
        assert_eq!(track.pointer_percent(600.0, -500.0), 50.0);
    }

    #[test]
    fn session_tracks_relative_motion_and_rebases() {
        let mut session = DragSession::new(HandleId::Start, 7, 420.0, 42.0, 40.0);
        assert_eq!(session.track(500.0, 50.0), 48.0);
        assert_eq!(session.direction(), Some(ScrollDirection::Forward));
        assert_eq!(session.last_client_x, 500.0);

        session.rebase(10.0);
        assert_eq!(session.track(450.0, 45.0), 5.0);
        assert_eq!(session.direction(), Some(ScrollDirection::Backward));
    }
}
