//! Frame driver that turns adapter input into world commands.
//!
//! Wall-clock frame time is accumulated and spent in fixed simulation ticks so
//! the boulder behaves the same at any frame rate.

use std::time::Duration;

use sisyphus_core::{Command, Event, TICKS_PER_SECOND};
use sisyphus_rendering::{FrameInput, Scene};
use sisyphus_system_push_cadence::PushCadence;
use sisyphus_system_slope_physics::SlopePhysics;
use sisyphus_world::{self as world, query, World};

/// Simulated time covered by one tick.
pub(crate) const TICK: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Upper bound on ticks run for a single rendered frame.
pub(crate) const MAX_SUBSTEPS: u32 = 8;

/// Longest frame delta fed into the accumulator.
pub(crate) const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Owns the world and every stateful system.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    push_cadence: PushCadence,
    physics: SlopePhysics,
    accumulator: Duration,
}

impl Simulation {
    /// Creates a simulation whose backgrounds derive from `seed`.
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            world: World::from_config(world::Config::with_seed(seed)),
            push_cadence: PushCadence::default(),
            physics: SlopePhysics::default(),
            accumulator: Duration::ZERO,
        }
    }

    /// Advances the game by one rendered frame and returns the number of ticks run.
    ///
    /// Confirmation is handled first, then push presses in arrival order, then
    /// as many fixed ticks as the accumulated time allows. Any backlog beyond
    /// [`MAX_SUBSTEPS`] ticks is dropped.
    ///
    /// Pushes are judged against the phase the frame started in, so a push
    /// sharing a frame with the confirm that leaves the start screen is ignored.
    pub(crate) fn advance(&mut self, dt: Duration, input: &FrameInput) -> u32 {
        let frame_phase = query::phase(&self.world);
        if input.confirm {
            self.execute(vec![Command::Confirm]);
        }

        if !input.pushes.is_empty() {
            let mut commands = Vec::new();
            self.push_cadence
                .handle(&[], frame_phase, &input.pushes, &mut commands);
            self.execute(commands);
        }

        self.accumulator += dt.min(MAX_FRAME_DELTA);
        let mut substeps = 0;
        while self.accumulator >= TICK && substeps < MAX_SUBSTEPS {
            self.execute(vec![Command::Tick { dt: TICK }]);
            self.accumulator -= TICK;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(TICK);
        }

        substeps
    }

    /// Copies the current world state into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.phase = query::phase(&self.world);
        scene.hill = *query::hill(&self.world);
        scene.camera_offset = query::camera_offset(&self.world);
        scene.boulder = query::boulder(&self.world);
        scene.pusher = query::pusher(&self.world);
        scene.score = query::score(&self.world);
        scene.background.clear();
        scene
            .background
            .extend(query::background_elements(&self.world).copied());
    }

    /// Read-only access to the world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    fn execute(&mut self, initial: Vec<Command>) {
        let mut commands = initial;
        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            log_events(&events);

            self.physics.handle(
                &events,
                query::phase(&self.world),
                query::boulder(&self.world),
                query::hill(&self.world),
                &mut commands,
            );
            self.push_cadence
                .handle(&events, query::phase(&self.world), &[], &mut commands);
        }
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::PhaseChanged { from, to } => {
                log::info!("phase changed: {} -> {}", from.label(), to.label());
            }
            Event::PushApplied { key, velocity } => {
                log::debug!("push {key:?} accepted, velocity now {velocity:.3}");
            }
            Event::RunEnded { score } => log::info!("the boulder stopped at distance {score}"),
            Event::GameReset { layout_seed } => {
                log::info!("new day, layout seed {layout_seed:#018x}");
            }
            Event::TimeAdvanced { .. } | Event::BoulderAdvanced { .. } => {}
        }
    }
}
