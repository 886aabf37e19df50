//! Agent-side environment logic: actions, pose, observations and the
//! episode state machine.
//!
//! The [`EpisodeController`] is the only component that mutates per-episode
//! counters. Physical motion is delegated to a [`MotionSubstrate`], which
//! turns [`MotionIntent`]s into poses and reports contacts and triggers back.
mod action;
mod controller;
mod motion;
mod observation;
mod pose;

pub use action::{AgentAction, BehaviorMode, HeuristicInput};
pub use controller::{EpisodeController, EpisodePhase, EpisodeState, StepReport, TerminalReason};
pub use motion::{
    ContactEvent, ContactPhase, GridMotion, MotionFeedback, MotionSubstrate, ObstacleKind,
};
pub use observation::Observation;
pub use pose::{AgentPose, MotionIntent};
