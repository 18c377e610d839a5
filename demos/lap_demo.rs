use glam::Vec3A;
use racesim::{
    Arena, ConfigError, InputSource, KeyboardInput, RecordingAudio, Settings, Vehicle,
};

const FRAME: f32 = 1.0 / 60.0;
const MAX_SECONDS: f32 = 300.0;
const CRUISE_SPEED: f32 = 6.0;
const ARRIVE_RADIUS: f32 = 4.0;
const STEER_DEADBAND: f32 = 0.05;

/// Clear of the island, then clockwise around the loop through the checkpoint and finish
const START: Vec3A = Vec3A::new(-35.0, 0.0, 35.0);
const LOOP: [Vec3A; 4] = [
    Vec3A::new(-35.0, 0.0, -44.0),
    Vec3A::new(35.0, 0.0, -44.0),
    Vec3A::new(35.0, 0.0, 44.0),
    Vec3A::new(-35.0, 0.0, 44.0),
];

/// Presses and releases keys like a driver would, aiming at one waypoint at a time
struct Autopilot {
    target: Vec3A,
    next: usize,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            target: START,
            next: 0,
        }
    }

    fn press(keys: &mut KeyboardInput, key: &str, held: bool) {
        if held {
            keys.key_down(key);
        } else {
            keys.key_up(key);
        }
    }

    fn drive(&mut self, car: &Vehicle, keys: &mut KeyboardInput) {
        let flat = Vec3A::new(1.0, 0.0, 1.0);
        let pos = car.position() * flat;

        if pos.distance(self.target) < ARRIVE_RADIUS {
            self.target = LOOP[self.next];
            self.next = (self.next + 1) % LOOP.len();
        }

        let forward = (car.forward_dir() * flat).normalize_or_zero();
        let to_target = (self.target - pos).normalize_or_zero();
        let side = forward.cross(to_target).y;
        let behind = forward.dot(to_target) < 0.0;

        Self::press(keys, "w", car.speed() < CRUISE_SPEED);
        Self::press(keys, "a", side > STEER_DEADBAND || (behind && side >= 0.0));
        Self::press(keys, "d", side < -STEER_DEADBAND || (behind && side < 0.0));
    }
}

fn main() -> Result<(), ConfigError> {
    racesim::init_logging();

    let settings = Settings::default();
    let mut arena = Arena::new_default()?;
    let mut audio = RecordingAudio::default();
    let mut keys = KeyboardInput::new();
    let mut pilot = Autopilot::new();

    let frames = (MAX_SECONDS / FRAME) as u32;
    for frame in 0..frames {
        pilot.drive(&arena.car, &mut keys);

        let rig = settings.camera.rig()?;
        let report = arena.tick(FRAME, keys.controls(), &rig, &mut audio);

        for notification in &report.notifications {
            println!(
                "[{:>6.2}s] {} ({} ms, {})",
                report.hud.elapsed_seconds,
                notification.text,
                notification.duration_ms,
                notification.color
            );
        }

        if frame % 600 == 0 {
            println!(
                "{} | {} | {} | car at {:.1} | camera at {:.1}",
                report.hud.time_label(),
                report.hud.lap_label(),
                report.hud.speed_label(),
                arena.car.position(),
                report.camera.position,
            );
        }

        if arena.race_state().finished {
            break;
        }
    }

    let hud = arena.hud_frame();
    println!(
        "\nfinished: {}\n{}\n{}\nwall impacts: {}",
        arena.race_state().finished,
        hud.lap_label(),
        hud.time_label(),
        audio.impacts
    );

    Ok(())
}
