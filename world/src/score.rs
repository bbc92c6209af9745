//! High-water mark of the distance pushed during a run.

/// Monotonic distance record measured from the run origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Score {
    origin_x: f64,
    max_x_reached: f64,
    current: u64,
}

impl Score {
    /// Starts a fresh record at the run origin.
    pub(crate) const fn new(origin_x: f64) -> Self {
        Self {
            origin_x,
            max_x_reached: origin_x,
            current: 0,
        }
    }

    /// Furthest world x the boulder has reached.
    pub(crate) const fn max_x_reached(&self) -> f64 {
        self.max_x_reached
    }

    /// Whole units travelled past the origin.
    pub(crate) const fn current(&self) -> u64 {
        self.current
    }

    /// Folds a new boulder position into the record.
    pub(crate) fn record(&mut self, x: f64) {
        if x > self.max_x_reached {
            self.max_x_reached = x;
            // Float to int casts saturate, so runaway distances pin at u64::MAX.
            self.current = (x - self.origin_x).max(0.0) as u64;
        }
    }
}
