use glam::{Quat, Vec3A};
use std::f32::consts::FRAC_PI_4;

const ANGULAR_MOTION_THRESHOLD: f32 = FRAC_PI_4;

/// Exponential-map orientation update, clamped so one step never turns more than a quarter pi
#[must_use]
pub fn integrate_orientation(orn: Quat, ang_vel: Vec3A, time_step: f32) -> Quat {
    let mut ang_vel = ang_vel;
    let mut angle = ang_vel.length();

    if angle * time_step > ANGULAR_MOTION_THRESHOLD {
        let clamped = ANGULAR_MOTION_THRESHOLD / time_step;
        ang_vel *= clamped / angle;
        angle = clamped;
    }

    let axis = if angle < 0.001 {
        // Taylor expansion of sin(angle * dt / 2) / angle
        ang_vel * (0.5 * time_step - time_step * time_step * time_step * 0.020833334 * angle * angle)
    } else {
        ang_vel * ((0.5 * angle * time_step).sin() / angle)
    };

    let dorn = Quat::from_xyzw(axis.x, axis.y, axis.z, (angle * time_step * 0.5).cos());
    (dorn * orn).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_about_y() {
        let ang_vel = Vec3A::new(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let mut orn = Quat::IDENTITY;
        for _ in 0..100 {
            orn = integrate_orientation(orn, ang_vel, 0.01);
        }

        let x = orn * Vec3A::X;
        assert!(x.abs_diff_eq(Vec3A::NEG_Z, 1e-3), "{x}");
    }

    #[test]
    fn spin_is_clamped() {
        let orn = integrate_orientation(Quat::IDENTITY, Vec3A::new(1000.0, 0.0, 0.0), 1.0);
        let (_, angle) = orn.to_axis_angle();
        assert!(angle <= FRAC_PI_4 + 1e-4);
    }
}
