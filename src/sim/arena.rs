use super::{
    ArenaConfig, AudioSink, CameraFollower, CameraRig, CameraTransform, CarConfig, ControlIntent,
    HudFrame, Notification, RaceConfig, RaceEvent, RaceProgressTracker, RaceState, SpawnPose,
    TrackConfig, TrackLayout, Vehicle,
};
use crate::{
    ConfigError,
    physics::{BodyHandle, BodyKind, ContactEvent, ContactListener, PhysicsWorld},
};
use std::time::Duration;

/// What one frame produced, for the renderer and the HUD
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub hud: HudFrame,
    /// Messages raised during this frame's sub-steps, oldest first
    pub notifications: Vec<Notification>,
    pub camera: CameraTransform,
    /// Physics sub-steps actually run
    pub sub_steps: u32,
}

/// Routes the chassis' contacts into the race tracker while the world steps
struct Objects<'a> {
    chassis: BodyHandle,
    tracker: &'a RaceProgressTracker,
    race_state: &'a mut RaceState,
    audio: &'a mut dyn AudioSink,
    notifications: &'a mut Vec<Notification>,
}

impl ContactListener for Objects<'_> {
    fn on_contact(&mut self, event: ContactEvent) {
        if event.body != self.chassis {
            return;
        }

        let other_is_static = event.other_kind == BodyKind::Static;
        for race_event in
            self.tracker
                .on_contact(self.race_state, event.other, other_is_static, event.time)
        {
            match race_event {
                RaceEvent::Notification(notification) => self.notifications.push(notification),
                RaceEvent::Audio(cue) => self.audio.play_cue(cue),
            }
        }
    }
}

pub struct Arena {
    config: ArenaConfig,
    world: PhysicsWorld,
    track: TrackLayout,
    pub car: Vehicle,
    tracker: RaceProgressTracker,
    race_state: RaceState,
    camera: CameraFollower,
    accumulator: f32,
    tick_count: u64,
}

impl Arena {
    pub fn new(
        config: ArenaConfig,
        race_config: RaceConfig,
        car_config: CarConfig,
        track_config: TrackConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        race_config.validate()?;

        let mut world = PhysicsWorld::new(config.gravity);
        let track = TrackLayout::build(&mut world, &track_config)?;
        let car = Vehicle::new(&mut world, &car_config, track.spawn())?;
        let tracker = RaceProgressTracker::new(track.triggers(), &race_config);

        log::info!(
            "arena ready: {} bodies, {} laps, {} Hz physics with up to {} sub-steps",
            world.bodies().len(),
            race_config.total_laps,
            (1.0 / config.fixed_time_step).round(),
            config.max_sub_steps,
        );

        Ok(Self {
            config,
            race_state: RaceState::new(world.elapsed()),
            world,
            track,
            car,
            tracker,
            camera: CameraFollower::default(),
            accumulator: 0.0,
            tick_count: 0,
        })
    }

    /// Default track, car and rules
    pub fn new_default() -> Result<Self, ConfigError> {
        Self::new(
            ArenaConfig::DEFAULT,
            RaceConfig::DEFAULT,
            CarConfig::DEFAULT,
            TrackConfig::DEFAULT,
        )
    }

    /// Advance by one rendered frame of `frame_delta` seconds.
    ///
    /// Physics runs in fixed sub-steps; any frame time beyond `max_sub_steps` of them is dropped.
    pub fn tick(
        &mut self,
        frame_delta: f32,
        intent: ControlIntent,
        rig: &CameraRig,
        audio: &mut dyn AudioSink,
    ) -> TickReport {
        let controls = RaceProgressTracker::gate_controls(&self.race_state, intent);
        self.car.apply_controls(controls);

        if self.race_state.finished {
            audio.pause_engine_loop();
        } else if intent.has_throttle() {
            audio.play_engine_loop();
        }

        let time_step = self.config.fixed_time_step;
        self.accumulator += frame_delta.max(0.0);

        let mut notifications = Vec::new();
        let mut sub_steps = 0;
        while self.accumulator >= time_step && sub_steps < self.config.max_sub_steps {
            self.car.pre_tick_update(&mut self.world, time_step);

            let was_finished = self.race_state.finished;
            let mut objects = Objects {
                chassis: self.car.chassis_handle(),
                tracker: &self.tracker,
                race_state: &mut self.race_state,
                audio: &mut *audio,
                notifications: &mut notifications,
            };
            self.world.step(time_step, &mut objects);

            // the rest of this frame's sub-steps run without throttle or steering
            if self.race_state.finished && !was_finished {
                self.car.apply_controls(ControlIntent::NEUTRAL);
            }

            self.car.post_tick_update(&self.world);
            self.accumulator -= time_step;
            sub_steps += 1;
        }
        self.accumulator %= time_step;

        if self.race_state.finished {
            audio.pause_engine_loop();
        }

        self.car.sync_visual_state(&self.world);
        let camera = self
            .camera
            .update(self.car.position(), self.car.heading(), rig);

        self.tick_count += 1;

        TickReport {
            hud: self.hud_frame(),
            notifications,
            camera,
            sub_steps,
        }
    }

    /// Run exactly `sub_steps` fixed steps with the same intent, ignoring wall-clock time
    pub fn step(
        &mut self,
        sub_steps: u32,
        intent: ControlIntent,
        audio: &mut dyn AudioSink,
    ) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for _ in 0..sub_steps {
            self.accumulator = 0.0;
            let report = self.tick(
                self.config.fixed_time_step,
                intent,
                &CameraRig::DEFAULT,
                audio,
            );
            notifications.extend(report.notifications);
        }

        notifications
    }

    /// Move the car to `spawn`, or to the track's start when `None`. Race progress is kept.
    pub fn respawn_car(&mut self, spawn: Option<SpawnPose>) {
        let spawn = spawn.unwrap_or_else(|| self.track.spawn());
        self.car.respawn(&mut self.world, spawn);
    }

    #[must_use]
    pub fn hud_frame(&self) -> HudFrame {
        HudFrame {
            speed: self.car.speed(),
            lap_count: self.race_state.lap_count,
            total_laps: self.tracker.total_laps(),
            elapsed_seconds: self.race_state.elapsed(self.world.elapsed()).as_secs_f32(),
        }
    }

    #[must_use]
    pub const fn race_state(&self) -> &RaceState {
        &self.race_state
    }

    #[must_use]
    pub const fn tracker(&self) -> &RaceProgressTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn track(&self) -> &TrackLayout {
        &self.track
    }

    #[must_use]
    pub const fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Simulated time since the arena was built
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.world.elapsed()
    }

    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
