use glam::{Quat, Vec3A};
use racesim::{CameraFollower, CameraMode, CameraRig, consts::camera, math::yaw_quat};
use std::f32::consts::FRAC_PI_2;

fn settle(follower: &mut CameraFollower, pos: Vec3A, heading: Quat, rig: &CameraRig, n: usize) {
    for _ in 0..n {
        follower.update(pos, heading, rig);
    }
}

#[test]
fn starts_above_and_behind_the_spawn() {
    assert_eq!(
        CameraFollower::default().position(),
        Vec3A::new(0.0, 10.0, -15.0)
    );
}

#[test]
fn follow_converges_behind_the_car() {
    let mut follower = CameraFollower::default();
    let car = Vec3A::new(0.0, 1.2, 41.0);
    settle(&mut follower, car, Quat::IDENTITY, &CameraRig::DEFAULT, 300);

    let view = follower.update(car, Quat::IDENTITY, &CameraRig::DEFAULT);
    assert!(view.position.abs_diff_eq(car + camera::FOLLOW_OFFSET, 1e-3));
    assert_eq!(view.target, car);

    let looking = view.rotation * Vec3A::NEG_Z;
    let expected = (car - view.position).normalize();
    assert!(looking.abs_diff_eq(expected, 1e-4));
}

#[test]
fn offset_turns_with_the_heading() {
    let rig = CameraRig::new(CameraMode::Follow, camera::FOLLOW_OFFSET, 1.0).unwrap();
    let mut follower = CameraFollower::default();

    // a quarter turn left makes the car drive towards -X, so "behind" is +X
    let view = follower.update(Vec3A::ZERO, yaw_quat(FRAC_PI_2), &rig);
    assert!(view.position.abs_diff_eq(Vec3A::new(10.0, 5.0, 0.0), 1e-4));
}

#[test]
fn third_person_looks_ahead() {
    let rig = CameraRig::new(CameraMode::ThirdPerson, camera::FOLLOW_OFFSET, 1.0).unwrap();
    let mut follower = CameraFollower::default();

    let car = Vec3A::new(5.0, 1.0, 5.0);
    let view = follower.update(car, Quat::IDENTITY, &rig);

    assert!(view.position.abs_diff_eq(car + Vec3A::new(0.0, 13.0, 25.0), 1e-4));
    assert!(view.target.abs_diff_eq(car + Vec3A::new(0.0, 0.0, -5.0), 1e-5));
}

#[test]
fn easing_depends_on_update_rate() {
    // one update at 30 Hz vs two at 60 Hz over the same wall time: the lerp is per call
    let target = Vec3A::ZERO;
    let start = Vec3A::new(0.0, 5.0, 110.0);

    let mut slow = CameraFollower::new(start);
    settle(&mut slow, target, Quat::IDENTITY, &CameraRig::DEFAULT, 1);

    let mut fast = CameraFollower::new(start);
    settle(&mut fast, target, Quat::IDENTITY, &CameraRig::DEFAULT, 2);

    let goal = camera::FOLLOW_OFFSET;
    let slow_gap = (slow.position() - goal).length();
    let fast_gap = (fast.position() - goal).length();
    assert!((slow_gap - 90.0).abs() < 1e-3);
    assert!((fast_gap - 81.0).abs() < 1e-3);
}
