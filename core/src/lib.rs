#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sisyphus engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod hill;

use std::time::Duration;

pub use hill::{HillProfile, ANGLE_PROBE_STEP, HILL_EXPONENT, MAX_SLOPE_ANGLE_DEGREES};

/// Title shown by the window and the start screen.
pub const WINDOW_TITLE: &str = "The Trial of Sisyphus";

/// Width of the drawing surface in world units (pixels).
pub const SCREEN_WIDTH: f64 = 800.0;

/// Height of the drawing surface in world units (pixels).
pub const SCREEN_HEIGHT: f64 = 600.0;

/// Number of simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Horizontal world position where every run starts.
pub const INITIAL_BOULDER_X: f64 = 150.0;

/// Radius of the boulder.
pub const BOULDER_RADIUS: f64 = 80.0;

/// Width of the pushing character's body.
pub const PUSHER_WIDTH: f64 = 20.0;

/// Height of the pushing character's body.
pub const PUSHER_HEIGHT: f64 = 50.0;

/// Phases of the game's finite state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Title screen with the story and controls.
    #[default]
    StartScreen,
    /// Waiting for the first push to begin the run.
    ReadyToPlay,
    /// The boulder is being simulated.
    Playing,
    /// The boulder stalled; the run is over.
    GameOver,
}

impl GamePhase {
    /// Human readable name used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StartScreen => "start screen",
            Self::ReadyToPlay => "ready to play",
            Self::Playing => "playing",
            Self::GameOver => "game over",
        }
    }
}

/// The two input symbols that push the boulder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PushKey {
    /// First push symbol, bound to `Z` by the windowed adapter.
    A,
    /// Second push symbol, bound to `X` by the windowed adapter.
    B,
}

/// A single push key press stamped with the time it was observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushPress {
    /// Symbol that was pressed.
    pub key: PushKey,
    /// Time since the adapter started when the press was observed.
    pub at: Duration,
}

impl PushPress {
    /// Creates a new press descriptor.
    #[must_use]
    pub const fn new(key: PushKey, at: Duration) -> Self {
        Self { key, at }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by one tick of the provided duration.
    Tick {
        /// Duration of simulated time covered by the tick.
        dt: Duration,
    },
    /// Confirms the current screen: starts from the title or restarts after a run.
    Confirm,
    /// Adds a push impulse to the boulder's velocity along the slope.
    ApplyPush {
        /// Symbol responsible for the push.
        key: PushKey,
        /// Velocity added to the boulder.
        impulse: f64,
    },
    /// Replaces the boulder's integrated state after a physics step.
    AdvanceBoulder {
        /// New horizontal world position.
        x: f64,
        /// New velocity along the slope.
        velocity: f64,
    },
    /// Ends the current run because the boulder stalled.
    EndRun,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a game phase transition.
    PhaseChanged {
        /// Phase that was active before the command.
        from: GamePhase,
        /// Phase that became active.
        to: GamePhase,
    },
    /// Confirms that a push impulse reached the boulder.
    PushApplied {
        /// Symbol responsible for the push.
        key: PushKey,
        /// Boulder velocity after the impulse.
        velocity: f64,
    },
    /// Confirms that the boulder moved along the hill.
    BoulderAdvanced {
        /// Horizontal world position after the move.
        x: f64,
        /// Velocity along the slope after the move.
        velocity: f64,
    },
    /// Reports the final distance of a run that just ended.
    RunEnded {
        /// Furthest distance reached during the run.
        score: u64,
    },
    /// Announces that all run state was recreated.
    GameReset {
        /// Seed used to scatter the background layers.
        layout_seed: u64,
    },
}

/// Integrated boulder state. The vertical position is always derived from the hill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoulderState {
    /// Horizontal world position of the boulder's contact point.
    pub x: f64,
    /// Signed velocity along the slope; positive values move uphill.
    pub velocity: f64,
}

impl BoulderState {
    /// Creates a boulder resting at the provided position.
    #[must_use]
    pub const fn at_rest(x: f64) -> Self {
        Self { x, velocity: 0.0 }
    }

    /// Vertical world position of the boulder on the provided hill.
    #[must_use]
    pub fn y(&self, hill: &HillProfile) -> f64 {
        hill.height(self.x)
    }
}

/// Placement of the pushing character relative to the boulder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PusherPose {
    /// Horizontal world position of the character's feet.
    pub x: f64,
    /// Vertical world position of the character's feet.
    pub y: f64,
    /// Rotation matching the hill angle, in radians.
    pub angle: f64,
}

impl PusherPose {
    /// Distance between the boulder's contact point and the character.
    pub const OFFSET: f64 = BOULDER_RADIUS + PUSHER_WIDTH * 0.3;

    /// Places the character behind and below a boulder resting at `boulder_x`.
    #[must_use]
    pub fn behind(boulder_x: f64, hill: &HillProfile) -> Self {
        let angle = hill.angle(boulder_x);
        let boulder_y = hill.height(boulder_x);
        Self {
            x: boulder_x - Self::OFFSET * angle.cos(),
            y: boulder_y + Self::OFFSET * angle.sin(),
            angle,
        }
    }
}

/// Opaque RGB shade used for background layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shade {
    red: u8,
    green: u8,
    blue: u8,
}

impl Shade {
    /// Creates a new shade from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the shade.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the shade.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the shade.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Depth band a background element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerDepth {
    /// Furthest layer, lags the camera the most.
    Far,
    /// Middle layer.
    Mid,
    /// Nearest layer, follows the camera almost fully.
    Near,
}

/// Shape drawn for a background element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Spike rising from the hill line.
    Stalagmite,
    /// Spike hanging from the top of the screen.
    Stalactite,
}

/// Decorative background shape with a fixed world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundElement {
    depth: LayerDepth,
    kind: ElementKind,
    initial_x: f64,
    base_y: f64,
    width: f64,
    height: f64,
    parallax: f64,
    shade: Shade,
}

impl BackgroundElement {
    /// Creates a new background element.
    #[must_use]
    #[allow(clippy::too_many_arguments)] // Every element channel is spelled out explicitly.
    pub const fn new(
        depth: LayerDepth,
        kind: ElementKind,
        initial_x: f64,
        base_y: f64,
        width: f64,
        height: f64,
        parallax: f64,
        shade: Shade,
    ) -> Self {
        Self {
            depth,
            kind,
            initial_x,
            base_y,
            width,
            height,
            parallax,
            shade,
        }
    }

    /// Layer the element was generated for.
    #[must_use]
    pub const fn depth(&self) -> LayerDepth {
        self.depth
    }

    /// Shape of the element.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// World position chosen at generation time.
    #[must_use]
    pub const fn initial_x(&self) -> f64 {
        self.initial_x
    }

    /// Vertical anchor for stalagmites (hill height plus jitter).
    #[must_use]
    pub const fn base_y(&self) -> f64 {
        self.base_y
    }

    /// Base width of the spike.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Length of the spike.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Fraction of camera motion the element follows.
    #[must_use]
    pub const fn parallax(&self) -> f64 {
        self.parallax
    }

    /// Fill shade of the element.
    #[must_use]
    pub const fn shade(&self) -> Shade {
        self.shade
    }

    /// Screen-space horizontal centre of the element for the given camera offset.
    #[must_use]
    pub fn screen_x(&self, camera_offset: f64) -> f64 {
        self.initial_x + camera_offset * self.parallax - camera_offset
    }

    /// Reports whether the element overlaps a surface `screen_width` wide.
    #[must_use]
    pub fn is_visible(&self, camera_offset: f64, screen_width: f64) -> bool {
        let screen_x = self.screen_x(camera_offset);
        -self.width < screen_x && screen_x < screen_width + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(initial_x: f64, width: f64, parallax: f64) -> BackgroundElement {
        BackgroundElement::new(
            LayerDepth::Mid,
            ElementKind::Stalagmite,
            initial_x,
            400.0,
            width,
            100.0,
            parallax,
            Shade::from_rgb(40, 40, 40),
        )
    }

    #[test]
    fn screen_x_lags_camera_by_parallax_factor() {
        let element = element(500.0, 30.0, 0.75);

        assert_eq!(element.screen_x(0.0), 500.0);
        assert!((element.screen_x(400.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn full_parallax_pins_element_to_screen() {
        let element = element(120.0, 30.0, 1.0);

        assert_eq!(element.screen_x(-250.0), 120.0);
        assert_eq!(element.screen_x(9_000.0), 120.0);
    }

    #[test]
    fn visibility_uses_exclusive_width_margins() {
        let element = element(-30.0, 30.0, 0.5);
        assert!(!element.is_visible(0.0, SCREEN_WIDTH));

        let element = element_at_screen(-29.0);
        assert!(element.is_visible(0.0, SCREEN_WIDTH));

        let element = element_at_screen(SCREEN_WIDTH + 30.0);
        assert!(!element.is_visible(0.0, SCREEN_WIDTH));
    }

    fn element_at_screen(x: f64) -> BackgroundElement {
        element(x, 30.0, 0.5)
    }

    #[test]
    fn pusher_sits_behind_boulder_on_flat_ground() {
        let hill = HillProfile::new(480.0, 0.0);
        let pose = PusherPose::behind(INITIAL_BOULDER_X, &hill);

        assert!((pose.x - (INITIAL_BOULDER_X - PusherPose::OFFSET)).abs() < 1e-9);
        assert!((pose.y - 480.0).abs() < 1e-9);
        assert_eq!(pose.angle, 0.0);
    }

    #[test]
    fn pusher_drops_below_boulder_on_uphill_slope() {
        let hill = HillProfile::default();
        let pose = PusherPose::behind(600.0, &hill);
        let boulder_y = hill.height(600.0);

        assert!(pose.angle > 0.0);
        assert!(pose.x < 600.0);
        assert!(pose.y > boulder_y, "screen y grows downward");
    }

    #[test]
    fn boulder_height_is_derived_from_hill() {
        let hill = HillProfile::default();
        let boulder = BoulderState::at_rest(275.0);

        assert_eq!(boulder.y(&hill), hill.height(275.0));
        assert_eq!(boulder.velocity, 0.0);
    }
}
