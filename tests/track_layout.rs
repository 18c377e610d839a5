use glam::Vec3A;
use racesim::{
    ConfigError, TrackConfig, TrackLayout, TriggerKind,
    physics::{BodyKind, PhysicsWorld, Shape},
};

fn build() -> (PhysicsWorld, TrackLayout) {
    let mut world = PhysicsWorld::default();
    let track = TrackLayout::build(&mut world, &TrackConfig::DEFAULT).unwrap();
    (world, track)
}

#[test]
fn body_counts() {
    let (world, track) = build();

    assert_eq!(track.ring_segments().len(), 4);
    assert_eq!(track.walls().len(), 8);
    assert_eq!(track.static_bodies().len(), 13);
    assert_eq!(world.bodies().len(), 15);

    for handle in track.static_bodies() {
        let body = world.body(handle);
        assert_eq!(body.kind, BodyKind::Static);
        assert_eq!(body.inverse_mass, 0.0);
    }
}

#[test]
fn triggers_are_the_only_non_solid_bodies() {
    let (world, track) = build();
    let triggers = track.triggers();

    assert_eq!(triggers.checkpoint.kind, TriggerKind::Checkpoint);
    assert_eq!(triggers.finish_line.kind, TriggerKind::FinishLine);

    let trigger_count = world
        .bodies()
        .iter()
        .filter(|b| b.kind == BodyKind::Trigger)
        .count();
    assert_eq!(trigger_count, 2);
    assert_eq!(world.body(triggers.checkpoint.handle).kind, BodyKind::Trigger);
    assert_eq!(world.body(triggers.finish_line.handle).kind, BodyKind::Trigger);
}

#[test]
fn trigger_placement() {
    let (_, track) = build();
    let triggers = track.triggers();
    let close = |a: Vec3A, b: Vec3A| a.abs_diff_eq(b, 1e-4);

    let checkpoint = triggers.checkpoint.bounds;
    assert!(close(checkpoint.center(), Vec3A::new(0.0, 1.0, 44.0)));
    assert!(close(checkpoint.half_extents(), Vec3A::new(8.0, 2.0, 0.1)));

    let finish = triggers.finish_line.bounds;
    assert!(close(finish.center(), Vec3A::new(0.0, 1.0, -46.0)));
    assert!(close(finish.half_extents(), Vec3A::new(100.0, 2.0, 0.1)));
}

#[test]
fn walls_enclose_track_and_island() {
    let (world, track) = build();
    let walls = track.walls();

    let outer: Vec<_> = walls.iter().take(4).collect();
    let island: Vec<_> = walls.iter().skip(4).collect();

    for wall in &outer {
        let reach = wall.center.x.abs().max(wall.center.z.abs());
        assert_eq!(reach, 50.25);
        assert_eq!(wall.half_extents.max_element(), 50.5);
        assert_eq!(wall.center.y, 1.5);
    }
    for wall in &island {
        let reach = wall.center.x.abs().max(wall.center.z.abs());
        assert_eq!(reach, 20.25);
        assert_eq!(wall.half_extents.max_element(), 20.5);
    }

    for wall in walls {
        let Shape::Cuboid(shape) = world.body(wall.handle).shape else {
            panic!("walls are boxes");
        };
        assert_eq!(shape.get_half_extents(), wall.half_extents);
        assert_eq!(world.body(wall.handle).position, wall.center);
    }
}

#[test]
fn ring_segments_are_ground_planes() {
    let (world, track) = build();

    let origins: Vec<Vec3A> = track
        .ring_segments()
        .iter()
        .map(|&h| world.body(h).position)
        .collect();
    assert!(origins.contains(&Vec3A::new(0.0, 0.0, 46.0)));
    assert!(origins.contains(&Vec3A::new(-46.0, 0.0, 0.0)));

    for &handle in track.ring_segments() {
        let Shape::Plane(plane) = world.body(handle).shape else {
            panic!("ring segments are planes");
        };
        assert_eq!(plane.get_plane_normal(), Vec3A::Y);
    }
}

#[test]
fn spawn_is_clear_of_the_checkpoint() {
    let (_, track) = build();
    let spawn = track.spawn();
    let checkpoint = track.triggers().checkpoint.bounds;

    assert_eq!(spawn.position, Vec3A::new(0.0, 4.0, 41.0));
    // the chassis is 4 long, so its rear sits 2 behind the spawn point
    assert!(spawn.position.z + 2.0 < checkpoint.center().z - checkpoint.half_extents().z);
}

#[test]
fn bad_dimensions_fail_fast() {
    let mut world = PhysicsWorld::default();
    let config = TrackConfig {
        wall_height: 0.0,
        ..TrackConfig::DEFAULT
    };

    assert!(matches!(
        TrackLayout::build(&mut world, &config),
        Err(ConfigError::NonPositive { name: "wall height", .. })
    ));
    assert!(world.bodies().is_empty());
}
