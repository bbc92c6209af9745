#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Trial of Sisyphus.
//!
//! The world owns the game phase, the boulder and its pusher, the camera,
//! the distance record, and the generated background. It mutates only through
//! [`apply`] and reports every observable change as an [`Event`].

mod camera;
mod score;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sisyphus_core::{
    BoulderState, Command, Event, GamePhase, HillProfile, PusherPose, INITIAL_BOULDER_X,
    SCREEN_WIDTH,
};
use sisyphus_system_parallax::{BackgroundLayer, Parallax};

use camera::{Camera, DEFAULT_SMOOTHING};
use score::Score;

const DEFAULT_WORLD_SEED: u64 = 0x5159_7068_7573_2021;

/// Parameters used to construct a [`World`].
#[derive(Clone, Debug)]
pub struct Config {
    seed: u64,
    hill: HillProfile,
    background: sisyphus_system_parallax::Config,
    camera_smoothing: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORLD_SEED,
            HillProfile::default(),
            sisyphus_system_parallax::Config::default(),
            DEFAULT_SMOOTHING,
        )
    }
}

impl Config {
    /// Creates a new world configuration.
    ///
    /// `camera_smoothing` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(
        seed: u64,
        hill: HillProfile,
        background: sisyphus_system_parallax::Config,
        camera_smoothing: f64,
    ) -> Self {
        Self {
            seed,
            hill,
            background,
            camera_smoothing: camera_smoothing.clamp(0.0, 1.0),
        }
    }

    /// Creates the default configuration seeded with `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Seed feeding the layout generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Hill the boulder is pushed up.
    #[must_use]
    pub const fn hill(&self) -> &HillProfile {
        &self.hill
    }

    /// Fraction of the remaining distance the camera covers per boulder step.
    #[must_use]
    pub const fn camera_smoothing(&self) -> f64 {
        self.camera_smoothing
    }
}

/// Represents the authoritative game state.
#[derive(Debug)]
pub struct World {
    phase: GamePhase,
    hill: HillProfile,
    boulder: BoulderState,
    pusher: PusherPose,
    camera: Camera,
    camera_smoothing: f64,
    score: Score,
    parallax: Parallax,
    layout_rng: ChaCha8Rng,
    layout_seed: u64,
    background: Vec<BackgroundLayer>,
    tick_index: u64,
}

impl World {
    /// Creates a world on the start screen with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Creates a world on the start screen using the provided configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let Config {
            seed,
            hill,
            background,
            camera_smoothing,
        } = config;

        let mut world = Self {
            phase: GamePhase::StartScreen,
            boulder: BoulderState::at_rest(INITIAL_BOULDER_X),
            pusher: PusherPose::behind(INITIAL_BOULDER_X, &hill),
            camera: Camera::centered_on(INITIAL_BOULDER_X, SCREEN_WIDTH, camera_smoothing),
            camera_smoothing,
            score: Score::new(INITIAL_BOULDER_X),
            parallax: Parallax::new(background),
            layout_rng: ChaCha8Rng::seed_from_u64(seed),
            layout_seed: 0,
            background: Vec::new(),
            tick_index: 0,
            hill,
        };
        let _ = world.reset();
        world
    }

    fn reset(&mut self) -> u64 {
        self.phase = GamePhase::StartScreen;
        self.boulder = BoulderState::at_rest(INITIAL_BOULDER_X);
        self.pusher = PusherPose::behind(INITIAL_BOULDER_X, &self.hill);
        self.camera = Camera::centered_on(INITIAL_BOULDER_X, SCREEN_WIDTH, self.camera_smoothing);
        self.score = Score::new(INITIAL_BOULDER_X);
        self.layout_seed = self.layout_rng.gen();
        self.background =
            self.parallax
                .generate(self.layout_seed, &self.hill, INITIAL_BOULDER_X, SCREEN_WIDTH);
        self.layout_seed
    }

    fn transition(&mut self, to: GamePhase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        self.phase = to;
        out_events.push(Event::PhaseChanged { from, to });
    }

    fn move_boulder(&mut self, boulder: BoulderState) {
        self.boulder = boulder;
        self.pusher = PusherPose::behind(boulder.x, &self.hill);
        self.score.record(boulder.x);
        self.camera.follow(boulder.x, SCREEN_WIDTH);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that do not fit the current phase are ignored and emit nothing.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::Confirm => match world.phase {
            GamePhase::StartScreen => world.transition(GamePhase::ReadyToPlay, out_events),
            GamePhase::GameOver => {
                let layout_seed = world.reset();
                out_events.push(Event::GameReset { layout_seed });
                out_events.push(Event::PhaseChanged {
                    from: GamePhase::GameOver,
                    to: GamePhase::StartScreen,
                });
            }
            GamePhase::ReadyToPlay | GamePhase::Playing => {}
        },
        Command::ApplyPush { key, impulse } => {
            match world.phase {
                GamePhase::ReadyToPlay => world.transition(GamePhase::Playing, out_events),
                GamePhase::Playing => {}
                GamePhase::StartScreen | GamePhase::GameOver => return,
            }
            world.boulder.velocity += impulse;
            out_events.push(Event::PushApplied {
                key,
                velocity: world.boulder.velocity,
            });
        }
        Command::AdvanceBoulder { x, velocity } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            world.move_boulder(BoulderState { x, velocity });
            out_events.push(Event::BoulderAdvanced { x, velocity });
        }
        Command::EndRun => {
            if world.phase != GamePhase::Playing {
                return;
            }
            world.transition(GamePhase::GameOver, out_events);
            out_events.push(Event::RunEnded {
                score: world.score.current(),
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use sisyphus_core::{BackgroundElement, BoulderState, GamePhase, HillProfile, PusherPose};
    use sisyphus_system_parallax::BackgroundLayer;

    use super::World;

    /// Current phase of the game state machine.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Provides read-only access to the hill profile.
    #[must_use]
    pub fn hill(world: &World) -> &HillProfile {
        &world.hill
    }

    /// Integrated boulder state.
    #[must_use]
    pub fn boulder(world: &World) -> BoulderState {
        world.boulder
    }

    /// Boulder contact point as `(x, y)` world coordinates.
    #[must_use]
    pub fn boulder_position(world: &World) -> (f64, f64) {
        (world.boulder.x, world.boulder.y(&world.hill))
    }

    /// Placement of the pushing character.
    #[must_use]
    pub fn pusher(world: &World) -> PusherPose {
        world.pusher
    }

    /// World x drawn at the left edge of the screen.
    #[must_use]
    pub fn camera_offset(world: &World) -> f64 {
        world.camera.offset_x()
    }

    /// Whole units the boulder has travelled past the start during this run.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score.current()
    }

    /// Furthest world x the boulder has reached during this run.
    #[must_use]
    pub fn max_x_reached(world: &World) -> f64 {
        world.score.max_x_reached()
    }

    /// Background layers ordered far to near.
    #[must_use]
    pub fn background(world: &World) -> &[BackgroundLayer] {
        &world.background
    }

    /// Every background element, far layers first.
    pub fn background_elements(world: &World) -> impl Iterator<Item = &BackgroundElement> {
        world
            .background
            .iter()
            .flat_map(|layer| layer.elements().iter())
    }

    /// Seed that generated the current background.
    #[must_use]
    pub fn layout_seed(world: &World) -> u64 {
        world.layout_seed
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
