use crate::config::EnvConfig;
use crate::layout::WorldPos;

use super::pose::AgentPose;

/// Fixed-length feature vector handed to the policy each step.
///
/// | index | value                                        |
/// |-------|----------------------------------------------|
/// | 0, 1  | agent `x`, `z` / 5                           |
/// | 2..=4 | key `x`, `z` / 5 and `1`, or zeros once held |
/// | 5, 6  | door `x`, `z` / 5                            |
/// | 7, 8  | `sin(yaw)`, `cos(yaw)`                       |
/// | 9     | zero padding                                 |
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation(pub [f32; EnvConfig::OBSERVATION_SIZE]);

impl Observation {
    pub const LEN: usize = EnvConfig::OBSERVATION_SIZE;

    /// `key` is `None` when the agent holds the key or the key is gone.
    pub fn build(pose: &AgentPose, key: Option<WorldPos>, door: Option<WorldPos>) -> Self {
        let scale = EnvConfig::POSITION_SCALE;
        let mut values = [0.0; Self::LEN];

        values[0] = pose.x / scale;
        values[1] = pose.z / scale;

        if let Some(key) = key {
            values[2] = key.x / scale;
            values[3] = key.z / scale;
            values[4] = 1.0;
        }

        if let Some(door) = door {
            values[5] = door.x / scale;
            values[6] = door.z / scale;
        }

        let (sin, cos) = pose.forward();
        values[7] = sin;
        values[8] = cos;

        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn agent_position(&self) -> (f32, f32) {
        (self.0[0], self.0[1])
    }

    /// Key channel `(x, z, present)`.
    pub fn key_channel(&self) -> (f32, f32, f32) {
        (self.0[2], self.0[3], self.0[4])
    }

    pub fn door_position(&self) -> (f32, f32) {
        (self.0[5], self.0[6])
    }

    pub fn heading(&self) -> (f32, f32) {
        (self.0[7], self.0[8])
    }
}
