//! Horizontal camera that eases toward the boulder.

/// Fraction of the remaining distance the camera covers on every step.
pub(crate) const DEFAULT_SMOOTHING: f64 = 0.08;

/// Horizontal scroll state of the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Camera {
    offset_x: f64,
    smoothing: f64,
}

impl Camera {
    /// Creates a camera that already frames `focus_x` in the middle of the screen.
    pub(crate) fn centered_on(focus_x: f64, screen_width: f64, smoothing: f64) -> Self {
        Self {
            offset_x: target_offset(focus_x, screen_width),
            smoothing,
        }
    }

    /// World x drawn at the left edge of the screen.
    pub(crate) const fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Moves the camera one smoothing step toward centring `focus_x`.
    pub(crate) fn follow(&mut self, focus_x: f64, screen_width: f64) {
        let target = target_offset(focus_x, screen_width);
        self.offset_x += (target - self.offset_x) * self.smoothing;
    }
}

fn target_offset(focus_x: f64, screen_width: f64) -> f64 {
    focus_x - screen_width / 2.0
}
