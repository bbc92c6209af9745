#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic push cadence system that enforces alternating key presses.
//!
//! The boulder only receives an impulse when the player alternates between
//! the two push symbols and leaves at least the configured interval between
//! presses. Repeating the same symbol never pushes, and it also restarts the
//! interval so a burst of repeats cannot bank time for the next alternation.

use std::time::Duration;

use sisyphus_core::{Command, Event, GamePhase, PushKey, PushPress};

const PUSH_FORCE: f64 = 0.16;
const MIN_PUSH_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration parameters required to construct the push cadence system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    push_force: f64,
    min_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PUSH_FORCE, MIN_PUSH_INTERVAL)
    }
}

impl Config {
    /// Creates a new configuration using the provided impulse and debounce interval.
    #[must_use]
    pub const fn new(push_force: f64, min_interval: Duration) -> Self {
        Self {
            push_force,
            min_interval,
        }
    }

    /// Velocity added to the boulder by every accepted push.
    #[must_use]
    pub const fn push_force(&self) -> f64 {
        self.push_force
    }

    /// Minimum time that must separate presses for an alternation to count.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Alternating-key bookkeeping for the current run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputTracker {
    last_push_key: Option<PushKey>,
    last_push_at: Duration,
    last_key_at: Duration,
}

impl InputTracker {
    /// Symbol of the most recent accepted push.
    #[must_use]
    pub const fn last_push_key(&self) -> Option<PushKey> {
        self.last_push_key
    }

    /// Time of the most recent accepted push.
    #[must_use]
    pub const fn last_push_at(&self) -> Duration {
        self.last_push_at
    }

    /// Time of the most recent push key press, accepted or not.
    #[must_use]
    pub const fn last_key_at(&self) -> Duration {
        self.last_key_at
    }

    fn record_push(&mut self, press: PushPress) {
        self.last_push_key = Some(press.key);
        self.last_push_at = press.at;
        self.last_key_at = press.at;
    }
}

/// Pure system that converts push key presses into impulse commands.
#[derive(Debug, Default)]
pub struct PushCadence {
    config: Config,
    tracker: InputTracker,
}

impl PushCadence {
    /// Creates a new push cadence system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tracker: InputTracker::default(),
        }
    }

    /// Current alternating-key bookkeeping.
    #[must_use]
    pub const fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    /// Consumes world events and the frame's push presses to emit push commands.
    ///
    /// [`Event::GameReset`] clears the tracker before any press is examined.
    /// While `phase` is [`GamePhase::ReadyToPlay`] the first press always pushes
    /// and starts the run; every later press in the batch is judged by the
    /// alternating rule used during [`GamePhase::Playing`]. Presses in any other
    /// phase are ignored.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        presses: &[PushPress],
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::GameReset { .. }))
        {
            self.tracker = InputTracker::default();
        }

        let mut phase = phase;
        for press in presses {
            match phase {
                GamePhase::ReadyToPlay => {
                    self.tracker.record_push(*press);
                    out.push(self.push_command(press.key));
                    phase = GamePhase::Playing;
                }
                GamePhase::Playing => {
                    if self.accepts(*press) {
                        self.tracker.record_push(*press);
                        out.push(self.push_command(press.key));
                    } else {
                        self.tracker.last_key_at = press.at;
                    }
                }
                GamePhase::StartScreen | GamePhase::GameOver => {}
            }
        }
    }

    fn accepts(&self, press: PushPress) -> bool {
        let alternates = self.tracker.last_push_key != Some(press.key);
        let elapsed = press.at.saturating_sub(self.tracker.last_key_at);
        alternates && elapsed > self.config.min_interval
    }

    fn push_command(&self, key: PushKey) -> Command {
        Command::ApplyPush {
            key,
            impulse: self.config.push_force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_tuned_constants() {
        let config = Config::default();

        assert_eq!(config.push_force(), 0.16);
        assert_eq!(config.min_interval(), Duration::from_millis(50));
    }

    #[test]
    fn tracker_starts_empty() {
        let cadence = PushCadence::default();

        assert_eq!(cadence.tracker().last_push_key(), None);
        assert_eq!(cadence.tracker().last_push_at(), Duration::ZERO);
        assert_eq!(cadence.tracker().last_key_at(), Duration::ZERO);
    }
}
