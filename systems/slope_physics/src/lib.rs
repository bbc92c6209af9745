#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic slope physics system that integrates the boulder each tick.
//!
//! Velocity is measured along the hill surface. Every tick gravity pulls the
//! boulder back down the slope, friction bleeds off a fixed fraction of the
//! remaining velocity, and the result is projected onto the horizontal axis.

use sisyphus_core::{BoulderState, Command, Event, GamePhase, HillProfile, INITIAL_BOULDER_X};
use thiserror::Error;

const BASE_GRAVITY: f64 = 0.15;
const GRAVITY_ANGLE_GAIN: f64 = 0.20;
const FRICTION: f64 = 0.985;
const STALL_VELOCITY: f64 = 0.01;
const STALL_MARGIN: f64 = 5.0;

/// Errors reported when constructing an invalid physics configuration.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Friction must strictly shrink velocity without flipping its sign.
    #[error("friction must lie in (0, 1) (received {friction})")]
    FrictionOutOfRange {
        /// Rejected friction coefficient.
        friction: f64,
    },
    /// A stall threshold of zero or less would never end a run.
    #[error("stall velocity must be positive (received {stall_velocity})")]
    NonPositiveStallVelocity {
        /// Rejected stall threshold.
        stall_velocity: f64,
    },
    /// The distance a boulder must travel before it can stall cannot be negative.
    #[error("stall margin must not be negative (received {stall_margin})")]
    NegativeStallMargin {
        /// Rejected margin.
        stall_margin: f64,
    },
}

/// Tuning constants for the slope physics system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    base_gravity: f64,
    gravity_angle_gain: f64,
    friction: f64,
    stall_velocity: f64,
    stall_margin: f64,
    origin_x: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_gravity: BASE_GRAVITY,
            gravity_angle_gain: GRAVITY_ANGLE_GAIN,
            friction: FRICTION,
            stall_velocity: STALL_VELOCITY,
            stall_margin: STALL_MARGIN,
            origin_x: INITIAL_BOULDER_X,
        }
    }
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// Returns an error when the friction coefficient is outside `(0, 1)`, the
    /// stall velocity is not positive, or the stall margin is negative.
    pub fn new(
        base_gravity: f64,
        gravity_angle_gain: f64,
        friction: f64,
        stall_velocity: f64,
        stall_margin: f64,
        origin_x: f64,
    ) -> Result<Self, ConfigError> {
        if !(friction > 0.0 && friction < 1.0) {
            return Err(ConfigError::FrictionOutOfRange { friction });
        }
        if !(stall_velocity > 0.0) {
            return Err(ConfigError::NonPositiveStallVelocity { stall_velocity });
        }
        if !(stall_margin >= 0.0) {
            return Err(ConfigError::NegativeStallMargin { stall_margin });
        }

        Ok(Self {
            base_gravity,
            gravity_angle_gain,
            friction,
            stall_velocity,
            stall_margin,
            origin_x,
        })
    }

    /// Fraction of velocity retained after each tick.
    #[must_use]
    pub const fn friction(&self) -> f64 {
        self.friction
    }

    /// World position where runs begin.
    #[must_use]
    pub const fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Gravity component pulling the boulder down a slope of `angle` radians.
    ///
    /// Steeper slopes also raise the effective gravity magnitude.
    #[must_use]
    pub fn gravity_along_slope(&self, angle: f64) -> f64 {
        let sin = angle.sin();
        let effective_gravity = self.base_gravity + sin.abs() * self.gravity_angle_gain;
        effective_gravity * sin
    }

    /// Applies one tick of friction to `velocity`.
    #[must_use]
    pub fn apply_friction(&self, velocity: f64) -> f64 {
        velocity * self.friction
    }

    /// Reports whether a boulder that advanced past the margin has run out of momentum.
    ///
    /// A boulder that never cleared `origin_x + stall_margin` does not stall,
    /// even when it rolls back behind the start.
    #[must_use]
    pub fn is_stalled(&self, boulder: BoulderState) -> bool {
        boulder.velocity < self.stall_velocity && boulder.x > self.origin_x + self.stall_margin
    }
}

/// Advances `boulder` by a single tick on `hill`.
#[must_use]
pub fn integrate(boulder: BoulderState, hill: &HillProfile, config: &Config) -> BoulderState {
    let angle = hill.angle(boulder.x);
    let velocity = config.apply_friction(boulder.velocity - config.gravity_along_slope(angle));
    BoulderState {
        x: boulder.x + velocity * angle.cos(),
        velocity,
    }
}

/// Pure system that integrates the boulder and detects stalled runs.
#[derive(Debug, Default)]
pub struct SlopePhysics {
    config: Config,
}

impl SlopePhysics {
    /// Creates a new physics system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration driving the integration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes world events and the current boulder snapshot to emit movement commands.
    ///
    /// Each [`Event::TimeAdvanced`] observed while `phase` is
    /// [`GamePhase::Playing`] integrates one tick. The final state is emitted as
    /// a single [`Command::AdvanceBoulder`], followed by [`Command::EndRun`] as
    /// soon as the boulder stalls.
    pub fn handle(
        &self,
        events: &[Event],
        phase: GamePhase,
        boulder: BoulderState,
        hill: &HillProfile,
        out: &mut Vec<Command>,
    ) {
        if phase != GamePhase::Playing {
            return;
        }

        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();
        if ticks == 0 {
            return;
        }

        let mut state = boulder;
        let mut stalled = false;
        for _ in 0..ticks {
            state = integrate(state, hill, &self.config);
            if self.config.is_stalled(state) {
                stalled = true;
                break;
            }
        }

        out.push(Command::AdvanceBoulder {
            x: state.x,
            velocity: state.velocity,
        });
        if stalled {
            out.push(Command::EndRun);
        }
    }
}
