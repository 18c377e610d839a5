use super::{SpawnPose, TrackTriggers, TriggerKind, TriggerVolume};
use crate::{
    ConfigError,
    consts::track,
    error::ensure_positive,
    physics::{Aabb, BodyHandle, BoxShape, PhysicsWorld, RigidBodyConstructionInfo, Shape},
};
use arrayvec::ArrayVec;
use glam::Vec3A;

pub const NUM_RING_SEGMENTS: usize = 4;
pub const NUM_WALLS: usize = 8;

/// Dimensions of the rectangular loop, all in metres
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackConfig {
    /// Side length of the square enclosed by the outer walls
    pub outer_size: f32,
    pub track_width: f32,
    /// Side length of the walled island in the middle
    pub inner_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TrackConfig {
    pub const DEFAULT: Self = Self {
        outer_size: track::OUTER_SIZE,
        track_width: track::TRACK_WIDTH,
        inner_size: track::INNER_SIZE,
        wall_height: track::WALL_HEIGHT,
        wall_thickness: track::WALL_THICKNESS,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("outer size", self.outer_size)?;
        ensure_positive("track width", self.track_width)?;
        ensure_positive("inner island size", self.inner_size)?;
        ensure_positive("wall height", self.wall_height)?;
        ensure_positive("wall thickness", self.wall_thickness)?;

        if self.inner_size >= self.outer_size - 2.0 * self.track_width {
            return Err(ConfigError::IslandTooLarge {
                inner: self.inner_size,
                outer: self.outer_size,
            });
        }

        Ok(())
    }

    /// Distance from the centre to the middle of each lane
    #[must_use]
    pub fn lane_center(&self) -> f32 {
        self.outer_size / 2.0 - self.track_width / 2.0
    }

    #[must_use]
    pub fn spawn(&self) -> SpawnPose {
        SpawnPose {
            position: Vec3A::new(0.0, track::SPAWN_HEIGHT, self.lane_center() - track::SPAWN_INSET),
            yaw: 0.0,
        }
    }
}

/// A static wall box, kept for rendering and for tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    pub handle: BodyHandle,
    pub center: Vec3A,
    pub half_extents: Vec3A,
}

/// Static geometry and triggers of the loop, already added to a world
#[derive(Clone, Debug)]
pub struct TrackLayout {
    config: TrackConfig,
    ground: BodyHandle,
    ring_segments: ArrayVec<BodyHandle, NUM_RING_SEGMENTS>,
    walls: ArrayVec<WallSegment, NUM_WALLS>,
    triggers: TrackTriggers,
    spawn: SpawnPose,
}

impl TrackLayout {
    pub fn build(world: &mut PhysicsWorld, config: &TrackConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ground = world.add_static_plane(Vec3A::ZERO, Vec3A::Y);

        let lane = config.lane_center();
        let ring_segments = [
            Vec3A::new(0.0, 0.0, -lane),
            Vec3A::new(0.0, 0.0, lane),
            Vec3A::new(-lane, 0.0, 0.0),
            Vec3A::new(lane, 0.0, 0.0),
        ]
        .into_iter()
        .map(|origin| world.add_static_plane(origin, Vec3A::Y))
        .collect();

        let mut walls = ArrayVec::new();
        for size in [config.outer_size, config.inner_size] {
            for (center, half_extents) in
                Self::wall_ring(size, config.wall_thickness, config.wall_height)
            {
                walls.push(Self::add_wall(world, center, half_extents));
            }
        }

        let checkpoint = Self::add_trigger(
            world,
            TriggerKind::Checkpoint,
            Vec3A::new(
                0.0,
                track::TRIGGER_CENTER_Y,
                lane - track::CHECKPOINT_INSET,
            ),
            Vec3A::new(
                config.track_width,
                track::TRIGGER_HALF_HEIGHT,
                track::TRIGGER_HALF_DEPTH,
            ),
        );
        let finish_line = Self::add_trigger(
            world,
            TriggerKind::FinishLine,
            Vec3A::new(0.0, track::TRIGGER_CENTER_Y, -lane),
            Vec3A::new(
                config.outer_size,
                track::TRIGGER_HALF_HEIGHT,
                track::TRIGGER_HALF_DEPTH,
            ),
        );

        let layout = Self {
            config: *config,
            ground,
            ring_segments,
            walls,
            triggers: TrackTriggers {
                checkpoint,
                finish_line,
            },
            spawn: config.spawn(),
        };

        log::info!(
            "track built: {} ring segments, {} walls, checkpoint at {}, finish at {}",
            layout.ring_segments.len(),
            layout.walls.len(),
            checkpoint.bounds.center(),
            finish_line.bounds.center(),
        );

        Ok(layout)
    }

    /// Centre and half extents of the four walls enclosing a square of side `size`
    fn wall_ring(size: f32, thickness: f32, height: f32) -> [(Vec3A, Vec3A); 4] {
        let offset = size / 2.0 + thickness / 2.0;
        let half_long = size / 2.0 + thickness;
        let half_thick = thickness / 2.0;
        let y = height / 2.0;

        let along_x = Vec3A::new(half_long, y, half_thick);
        let along_z = Vec3A::new(half_thick, y, half_long);

        [
            (Vec3A::new(0.0, y, -offset), along_x),
            (Vec3A::new(0.0, y, offset), along_x),
            (Vec3A::new(-offset, y, 0.0), along_z),
            (Vec3A::new(offset, y, 0.0), along_z),
        ]
    }

    fn add_wall(world: &mut PhysicsWorld, center: Vec3A, half_extents: Vec3A) -> WallSegment {
        let mut info = RigidBodyConstructionInfo::new(0.0, Shape::Cuboid(BoxShape::new(half_extents)));
        info.start_position = center;

        WallSegment {
            handle: world.add_body(info),
            center,
            half_extents,
        }
    }

    fn add_trigger(
        world: &mut PhysicsWorld,
        kind: TriggerKind,
        center: Vec3A,
        half_extents: Vec3A,
    ) -> TriggerVolume {
        let mut info = RigidBodyConstructionInfo::new(0.0, Shape::Cuboid(BoxShape::new(half_extents)));
        info.start_position = center;
        info.is_trigger = true;

        TriggerVolume {
            handle: world.add_body(info),
            kind,
            bounds: Aabb::from_center_half_extents(center, half_extents),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TrackConfig {
        &self.config
    }

    #[must_use]
    pub const fn ground(&self) -> BodyHandle {
        self.ground
    }

    #[must_use]
    pub fn ring_segments(&self) -> &[BodyHandle] {
        &self.ring_segments
    }

    #[must_use]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    #[must_use]
    pub const fn triggers(&self) -> TrackTriggers {
        self.triggers
    }

    /// Every solid static body: ground, ring segments and walls
    #[must_use]
    pub fn static_bodies(&self) -> Vec<BodyHandle> {
        std::iter::once(self.ground)
            .chain(self.ring_segments.iter().copied())
            .chain(self.walls.iter().map(|wall| wall.handle))
            .collect()
    }

    #[must_use]
    pub const fn spawn(&self) -> SpawnPose {
        self.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spawn() {
        let spawn = TrackConfig::DEFAULT.spawn();
        assert_eq!(spawn.position, Vec3A::new(0.0, 4.0, 41.0));
        assert_eq!(spawn.yaw, 0.0);
    }

    #[test]
    fn island_must_leave_room_for_lanes() {
        let config = TrackConfig {
            inner_size: 90.0,
            ..TrackConfig::DEFAULT
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IslandTooLarge {
                inner: 90.0,
                outer: 100.0
            })
        );
    }

    #[test]
    fn outer_walls() {
        let walls = TrackLayout::wall_ring(100.0, 0.5, 3.0);
        assert_eq!(walls[0].0, Vec3A::new(0.0, 1.5, -50.25));
        assert_eq!(walls[0].1, Vec3A::new(50.5, 1.5, 0.25));
        assert_eq!(walls[3].0, Vec3A::new(50.25, 1.5, 0.0));
        assert_eq!(walls[3].1, Vec3A::new(0.25, 1.5, 50.5));
    }
}
