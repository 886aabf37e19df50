use std::f32::consts::TAU;

use crate::layout::WorldPos;

/// Agent position on the ground plane and heading.
///
/// A yaw of zero faces `+z`; positive yaw turns towards `+x`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentPose {
    pub x: f32,
    pub z: f32,
    /// Radians in `[0, 2π)`.
    pub yaw: f32,
}

impl AgentPose {
    pub fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self {
            x,
            z,
            yaw: wrap_angle(yaw),
        }
    }

    /// Canonical pose on a spawn point: zero heading.
    pub fn at_spawn(spawn: WorldPos) -> Self {
        Self::new(spawn.x, spawn.z, 0.0)
    }

    /// Unit heading vector `(x, z)`.
    pub fn forward(&self) -> (f32, f32) {
        (self.yaw.sin(), self.yaw.cos())
    }

    /// Pose after applying `intent` with nothing in the way.
    pub fn advanced(&self, intent: MotionIntent) -> Self {
        match intent {
            MotionIntent::Idle => *self,
            MotionIntent::Forward { distance } => {
                let (dx, dz) = self.forward();
                Self {
                    x: self.x + dx * distance,
                    z: self.z + dz * distance,
                    yaw: self.yaw,
                }
            }
            MotionIntent::Rotate { radians } => Self::new(self.x, self.z, self.yaw + radians),
        }
    }
}

fn wrap_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Motion requested for one simulation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionIntent {
    Idle,
    Forward { distance: f32 },
    /// Negative turns left.
    Rotate { radians: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn forward_follows_heading() {
        let pose = AgentPose::new(1.0, 1.0, FRAC_PI_2);
        let moved = pose.advanced(MotionIntent::Forward { distance: 2.0 });
        assert!((moved.x - 3.0).abs() < 1e-5);
        assert!((moved.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn yaw_wraps_into_range() {
        let pose = AgentPose::default().advanced(MotionIntent::Rotate { radians: -FRAC_PI_2 });
        assert!((pose.yaw - 3.0 * FRAC_PI_2).abs() < 1e-5);

        let pose = AgentPose::new(0.0, 0.0, 5.0 * TAU + 0.5);
        assert!((pose.yaw - 0.5).abs() < 1e-4);
        assert!((0.0..TAU).contains(&AgentPose::new(0.0, 0.0, -1e-9).yaw));
    }
}
