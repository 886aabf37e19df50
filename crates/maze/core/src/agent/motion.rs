//! Motion substrate seam.
//!
//! The controller never moves the agent itself: it emits a [`MotionIntent`]
//! and a substrate resolves it against the layout, reporting collision and
//! trigger events back. Engines with real physics implement
//! [`MotionSubstrate`] on their side; [`GridMotion`] is the kinematic
//! substrate used for headless training and tests.
use crate::grid::TilePos;
use crate::layout::MazeLayout;
use crate::props::PropKind;

use super::pose::{AgentPose, MotionIntent};

/// Obstacle categories reported with collision events. Only walls are penalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    Wall,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactPhase {
    /// Contact began this tick.
    Enter,
    /// Contact persisted through this tick.
    Stay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactEvent {
    pub obstacle: ObstacleKind,
    pub phase: ContactPhase,
}

impl ContactEvent {
    pub const fn wall(phase: ContactPhase) -> Self {
        Self {
            obstacle: ObstacleKind::Wall,
            phase,
        }
    }
}

/// Result of resolving one intent.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MotionFeedback {
    pub pose: AgentPose,
    pub contacts: Vec<ContactEvent>,
    pub triggers: Vec<PropKind>,
}

pub trait MotionSubstrate {
    /// Applies `intent` to `pose` and reports what happened during the tick.
    fn resolve(&mut self, layout: &MazeLayout, pose: AgentPose, intent: MotionIntent)
    -> MotionFeedback;

    /// Forgets contact and trigger history. Called when the agent is placed
    /// on the spawn tile of a fresh layout.
    fn reset(&mut self, layout: &MazeLayout, pose: AgentPose);
}

/// Kinematic motion on the logical grid.
///
/// The agent is an axis-aligned square of half-width `half_extent × cell_size`.
/// A forward move whose footprint would overlap a blocked or out-of-grid tile
/// is cancelled and reported as wall contact: `Enter` on the first blocked
/// attempt, `Stay` on every following tick until a forward move succeeds.
/// Triggers fire when the tile under the agent's centre changes onto a prop.
#[derive(Clone, Debug)]
pub struct GridMotion {
    half_extent: f32,
    touching: bool,
    last_tile: Option<TilePos>,
}

impl GridMotion {
    pub const DEFAULT_HALF_EXTENT: f32 = 0.25;

    pub fn new() -> Self {
        Self::with_half_extent(Self::DEFAULT_HALF_EXTENT)
    }

    /// `half_extent` is a fraction of the cell size, clamped to `[0, 0.49]`
    /// so the agent always fits through a one-tile corridor.
    pub fn with_half_extent(half_extent: f32) -> Self {
        let half_extent = if half_extent.is_finite() {
            half_extent.clamp(0.0, 0.49)
        } else {
            Self::DEFAULT_HALF_EXTENT
        };
        Self {
            half_extent,
            touching: false,
            last_tile: None,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    fn fits(&self, layout: &MazeLayout, pose: &AgentPose) -> bool {
        let r = self.half_extent * layout.cell_size();
        [(-r, -r), (-r, r), (r, -r), (r, r)]
            .iter()
            .all(|(dx, dz)| layout.is_walkable(pose.x + dx, pose.z + dz))
    }
}

impl Default for GridMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSubstrate for GridMotion {
    fn resolve(
        &mut self,
        layout: &MazeLayout,
        pose: AgentPose,
        intent: MotionIntent,
    ) -> MotionFeedback {
        let mut contacts = Vec::new();
        let candidate = pose.advanced(intent);

        let pose = match intent {
            MotionIntent::Forward { .. } if !self.fits(layout, &candidate) => {
                let phase = if self.touching {
                    ContactPhase::Stay
                } else {
                    ContactPhase::Enter
                };
                contacts.push(ContactEvent::wall(phase));
                self.touching = true;
                pose
            }
            MotionIntent::Forward { .. } => {
                self.touching = false;
                candidate
            }
            MotionIntent::Idle | MotionIntent::Rotate { .. } => {
                if self.touching {
                    contacts.push(ContactEvent::wall(ContactPhase::Stay));
                }
                candidate
            }
        };

        let mut triggers = Vec::new();
        let tile = layout.tile_of(pose.x, pose.z);
        if self.last_tile != Some(tile) {
            self.last_tile = Some(tile);
            if let Some(prop) = layout.props().trigger_at(tile) {
                triggers.push(prop);
            }
        }

        MotionFeedback {
            pose,
            contacts,
            triggers,
        }
    }

    fn reset(&mut self, layout: &MazeLayout, pose: AgentPose) {
        self.touching = false;
        self.last_tile = Some(layout.tile_of(pose.x, pose.z));
    }
}
