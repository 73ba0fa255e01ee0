use serde::{Deserialize, Serialize};

/// Tuning for drag-time edge scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollBehavior {
    /// Distance from a viewport edge at which a dragged handle starts scrolling.
    pub edge_threshold_px: f64,
    /// Scroll distance applied per animation frame while inside the edge zone.
    pub step_px: f64,
}

impl Default for AutoScrollBehavior {
    fn default() -> Self {
        Self {
            edge_threshold_px: 24.0,
            step_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Backward,
    Forward,
}

/// Scrollable window over the track. `content_width_px` is the track width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollViewport {
    pub content_width_px: f64,
    pub viewport_width_px: f64,
    pub scroll_left_px: f64,
}

impl ScrollViewport {
    #[must_use]
    pub fn max_scroll_left(self) -> f64 {
        (self.content_width_px - self.viewport_width_px).max(0.0)
    }

    #[must_use]
    pub fn is_visible(self, x_px: f64) -> bool {
        x_px >= self.scroll_left_px && x_px <= self.scroll_left_px + self.viewport_width_px
    }
}

/// Keeps the active handle inside the visible part of a scrollable track.
///
/// Frame work is coalesced: any number of `request_frame` calls between two
/// animation frames lead to a single measurement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollController {
    behavior: AutoScrollBehavior,
    viewport: ScrollViewport,
    frame_requested: bool,
}

impl AutoScrollController {
    #[must_use]
    pub fn new(behavior: AutoScrollBehavior, content_width_px: f64, viewport_width_px: f64) -> Self {
        Self {
            behavior,
            viewport: ScrollViewport {
                content_width_px,
                viewport_width_px,
                scroll_left_px: 0.0,
            },
            frame_requested: false,
        }
    }

    #[must_use]
    pub fn behavior(&self) -> AutoScrollBehavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: AutoScrollBehavior) {
        self.behavior = behavior;
    }

    #[must_use]
    pub fn viewport(&self) -> ScrollViewport {
        self.viewport
    }

    /// Horizontal displacement of the track caused by scrolling.
    #[must_use]
    pub fn scroll_offset_px(&self) -> f64 {
        -self.viewport.scroll_left_px
    }

    pub fn resize(&mut self, content_width_px: f64, viewport_width_px: f64) {
        self.viewport.content_width_px = content_width_px;
        self.viewport.viewport_width_px = viewport_width_px;
        self.viewport.scroll_left_px = self
            .viewport
            .scroll_left_px
            .clamp(0.0, self.viewport.max_scroll_left());
    }

    /// Records a scroll position reported by the host (user scrolled).
    pub fn sync_scroll_left(&mut self, scroll_left_px: f64) {
        if scroll_left_px.is_finite() {
            self.viewport.scroll_left_px = scroll_left_px.clamp(0.0, self.viewport.max_scroll_left());
        }
    }

    /// Centres `x_px` when it lies outside the visible window. Centring is
    /// clamped, which leaves the handle edge-aligned near either end.
    ///
    /// Returns the new scroll offset when it changed.
    pub fn reveal(&mut self, x_px: f64) -> Option<f64> {
        if self.viewport.is_visible(x_px) {
            return None;
        }
        let centred = x_px - self.viewport.viewport_width_px / 2.0;
        self.scroll_to(centred)
    }

    /// Advances the scroll one step in `direction` when `x_px` is within the
    /// edge zone on that side.
    pub fn edge_step(&mut self, x_px: f64, direction: ScrollDirection) -> Option<f64> {
        if !self.in_edge_zone(x_px, direction) {
            return None;
        }
        let left = self.viewport.scroll_left_px;
        match direction {
            ScrollDirection::Forward => self.scroll_to(left + self.behavior.step_px),
            ScrollDirection::Backward => self.scroll_to(left - self.behavior.step_px),
        }
    }

    /// Whether `x_px` sits within the edge threshold on the `direction` side.
    #[must_use]
    pub fn in_edge_zone(&self, x_px: f64, direction: ScrollDirection) -> bool {
        let threshold = self.behavior.edge_threshold_px;
        let left = self.viewport.scroll_left_px;
        let right = left + self.viewport.viewport_width_px;
        match direction {
            ScrollDirection::Forward => x_px >= right - threshold,
            ScrollDirection::Backward => x_px <= left + threshold,
        }
    }

    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Consumes the pending frame request.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    fn scroll_to(&mut self, scroll_left_px: f64) -> Option<f64> {
        let clamped = scroll_left_px.clamp(0.0, self.viewport.max_scroll_left());
        if (clamped - self.viewport.scroll_left_px).abs() <= f64::EPSILON {
            return None;
        }
        self.viewport.scroll_left_px = clamped;
        Some(clamped)
    }
}
