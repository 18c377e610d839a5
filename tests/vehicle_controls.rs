use glam::Vec3A;
use proptest::prelude::*;
use racesim::{
    CarConfig, ControlIntent, SpawnPose, Vehicle, compute_drive,
    physics::PhysicsWorld,
};

const DT: f32 = 1.0 / 60.0;

fn flat_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::default();
    world.add_static_plane(Vec3A::ZERO, Vec3A::Y);
    world
}

fn spawn_on(world: &mut PhysicsWorld) -> Vehicle {
    let spawn = SpawnPose {
        position: Vec3A::new(0.0, 4.0, 0.0),
        yaw: 0.0,
    };
    Vehicle::new(world, &CarConfig::DEFAULT, spawn).unwrap()
}

fn run(world: &mut PhysicsWorld, car: &mut Vehicle, intent: ControlIntent, steps: usize) {
    for _ in 0..steps {
        car.apply_controls(intent);
        car.pre_tick_update(world, DT);
        world.step(DT, &mut ());
        car.sync_visual_state(world);
    }
}

fn intent_strategy() -> impl Strategy<Value = ControlIntent> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(forward, backward, left, right)| ControlIntent {
            forward,
            backward,
            left,
            right,
        },
    )
}

#[test]
fn forward_from_rest() {
    let drive = compute_drive(ControlIntent::FORWARD, 0.0, &CarConfig::DEFAULT);
    let expected = [-280.0, -280.0, -420.0, -420.0];
    for (force, want) in drive.engine_forces.into_iter().zip(expected) {
        assert!((force - want).abs() < 1e-3, "{:?}", drive.engine_forces);
    }
    assert_eq!(drive.steering, 0.0);
}

#[test]
fn settles_then_drives_forward() {
    let mut world = flat_world();
    let mut car = spawn_on(&mut world);

    run(&mut world, &mut car, ControlIntent::NEUTRAL, 180);
    assert!(car.wheel_contacts().iter().all(|&c| c));
    assert!((car.position().y - 1.22).abs() < 0.1, "{}", car.position());
    let rest = car.position();

    run(&mut world, &mut car, ControlIntent::FORWARD, 120);
    let moved = car.position() - rest;
    assert!(moved.z < -2.0, "{moved}");
    assert!(moved.x.abs() < 0.5, "{moved}");
    assert!(car.forward_dir().dot(Vec3A::NEG_Z) > 0.99);
    assert!(car.speed() > 1.0);

    for (i, &(force, steering)) in car.wheel_inputs().iter().enumerate() {
        assert_eq!(force, car.last_drive().engine_forces[i]);
        assert_eq!(steering, 0.0);
    }
}

#[test]
fn steering_left_turns_left() {
    let mut world = flat_world();
    let mut car = spawn_on(&mut world);
    run(&mut world, &mut car, ControlIntent::NEUTRAL, 120);

    let forward_left = ControlIntent {
        forward: true,
        left: true,
        ..ControlIntent::NEUTRAL
    };
    run(&mut world, &mut car, forward_left, 90);

    // facing -Z, the car's left is -X
    assert!(car.position().x < -0.5, "{}", car.position());
    let inputs = car.wheel_inputs();
    assert!(inputs[0].1 > 0.0 && inputs[0].1 == inputs[1].1);
    assert_eq!(inputs[2].1, 0.0);
    assert_eq!(inputs[3].1, 0.0);
}

#[test]
fn visual_wheels_match_physics() {
    let mut world = flat_world();
    let mut car = spawn_on(&mut world);
    run(&mut world, &mut car, ControlIntent::FORWARD, 90);

    let visual = car.visual();
    assert_eq!(visual.chassis.position, car.position());
    assert_eq!(visual.chassis.rotation, car.orientation());
    for (i, pose) in visual.wheels.iter().enumerate() {
        assert_eq!(*pose, car.wheel_world_transform(i));
    }

    // wheels sit below the chassis, on their own poses
    assert!(visual.wheels.iter().all(|w| w.position.y < car.position().y));
}

#[test]
fn heading_points_along_travel() {
    let mut world = flat_world();
    let car = spawn_on(&mut world);

    let heading_forward = car.heading() * Vec3A::NEG_Z;
    assert!(heading_forward.abs_diff_eq(car.forward_dir(), 1e-5));
    assert!((car.heading() * Vec3A::Y).abs_diff_eq(Vec3A::Y, 1e-5));
}

#[test]
fn invalid_config_is_rejected() {
    let mut world = flat_world();
    let config = CarConfig {
        mass: -1.0,
        ..CarConfig::DEFAULT
    };
    let spawn = SpawnPose {
        position: Vec3A::ZERO,
        yaw: 0.0,
    };

    assert!(Vehicle::new(&mut world, &config, spawn).is_err());
    assert!(world.bodies().len() == 1);
}

proptest! {
    #[test]
    fn steering_fades_with_speed(a in 0.0f32..100.0, b in 0.0f32..100.0) {
        let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
        let left = ControlIntent { left: true, ..ControlIntent::NEUTRAL };
        let config = CarConfig::DEFAULT;

        let slow_steer = compute_drive(left, slow, &config).steering;
        let fast_steer = compute_drive(left, fast, &config).steering;

        prop_assert!(fast_steer <= slow_steer + 1e-6);
        for steer in [slow_steer, fast_steer] {
            prop_assert!(steer >= 0.4 * config.max_steer - 1e-6);
            prop_assert!(steer <= config.max_steer + 1e-6);
        }
    }

    #[test]
    fn drive_split_and_overrides(intent in intent_strategy(), speed in 0.0f32..50.0) {
        let config = CarConfig::DEFAULT;
        let drive = compute_drive(intent, speed, &config);

        let expected_force = if intent.backward {
            0.5 * config.max_force
        } else if intent.forward {
            -0.7 * config.max_force
        } else {
            0.0
        };
        // 0.4 + 0.4 + 0.6 + 0.6: every wheel gets its axle's share of the full force
        prop_assert!((drive.engine_forces[0] - 0.4 * expected_force).abs() < 1e-2);
        prop_assert!((drive.total_force() - 2.0 * expected_force).abs() < 1e-2);
        prop_assert_eq!(drive.engine_forces[0], drive.engine_forces[1]);
        prop_assert_eq!(drive.engine_forces[2], drive.engine_forces[3]);
        prop_assert!((drive.engine_forces[2] - 1.5 * drive.engine_forces[0]).abs() < 1e-2);

        if intent.left == intent.right {
            prop_assert_eq!(drive.steering, 0.0);
        } else if intent.left {
            prop_assert!(drive.steering > 0.0);
        } else {
            prop_assert!(drive.steering < 0.0);
        }
    }
}
