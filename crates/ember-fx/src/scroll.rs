//! Scroll-driven page state: progress bar width, back-to-top and sticky header.

use ember_core::ScrollConfig;

/// Raw scroll measurements from the host document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top (px).
    pub offset: f64,
    /// Full document height (px).
    pub scroll_height: f64,
    /// Viewport height (px).
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Scrolled fraction as a percentage in `[0, 100]`; 0 when the page
    /// cannot scroll.
    pub fn progress_percent(&self) -> f64 {
        let range = self.scroll_height - self.client_height;
        if range <= 0.0 {
            return 0.0;
        }
        (self.offset / range * 100.0).clamp(0.0, 100.0)
    }
}

/// Derived visual state for one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollView {
    pub progress_percent: f64,
    pub show_back_to_top: bool,
    pub header_scrolled: bool,
}

impl ScrollView {
    pub fn compute(metrics: &ScrollMetrics, config: &ScrollConfig) -> Self {
        Self {
            progress_percent: metrics.progress_percent(),
            show_back_to_top: metrics.offset > config.back_to_top_after,
            header_scrolled: metrics.offset > config.header_scrolled_after,
        }
    }

    /// CSS width for the progress bar.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress_percent)
    }
}

/// Coalesces bursts of scroll events into one update per display refresh.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
    frame: Option<i32>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should schedule an update; `false`
    /// when one is already queued for the next frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Remember the id of the frame scheduled after a successful [`request`].
    ///
    /// [`request`]: FrameGate::request
    pub fn scheduled(&mut self, frame: i32) {
        self.frame = Some(frame);
    }

    /// Mark the queued update as done.
    pub fn release(&mut self) {
        self.pending = false;
        self.frame = None;
    }

    /// Drop the queued update, returning the frame id to cancel.
    pub fn cancel(&mut self) -> Option<i32> {
        self.pending = false;
        self.frame.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
