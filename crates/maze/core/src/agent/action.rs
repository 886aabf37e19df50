use crate::error::ActionError;

/// Discrete action space. Exactly one action is applied per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    #[default]
    Idle = 0,
    Forward = 1,
    RotateLeft = 2,
    RotateRight = 3,
}

impl AgentAction {
    pub const ALL: [AgentAction; 4] = [
        AgentAction::Idle,
        AgentAction::Forward,
        AgentAction::RotateLeft,
        AgentAction::RotateRight,
    ];

    pub const fn index(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for AgentAction {
    type Error = ActionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AgentAction::Idle),
            1 => Ok(AgentAction::Forward),
            2 => Ok(AgentAction::RotateLeft),
            3 => Ok(AgentAction::RotateRight),
            other => Err(ActionError::Unknown(other)),
        }
    }
}

/// Who decides the action each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BehaviorMode {
    /// Operator input mapped through [`HeuristicInput::to_action`].
    Heuristic,
    /// Actions supplied by the training driver.
    #[default]
    Policy,
}

impl BehaviorMode {
    pub const fn from_heuristic_flag(use_heuristic: bool) -> Self {
        if use_heuristic {
            BehaviorMode::Heuristic
        } else {
            BehaviorMode::Policy
        }
    }
}

bitflags::bitflags! {
    /// Operator controls asserted during a step.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct HeuristicInput: u8 {
        const FORWARD = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

impl HeuristicInput {
    /// Forward wins over left, left over right. Nothing asserted means idle.
    pub fn to_action(self) -> AgentAction {
        if self.contains(Self::FORWARD) {
            AgentAction::Forward
        } else if self.contains(Self::LEFT) {
            AgentAction::RotateLeft
        } else if self.contains(Self::RIGHT) {
            AgentAction::RotateRight
        } else {
            AgentAction::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_values_map_to_actions() {
        for action in AgentAction::ALL {
            assert_eq!(AgentAction::try_from(action.index()), Ok(action));
        }
        assert_eq!(AgentAction::try_from(4), Err(ActionError::Unknown(4)));
        assert_eq!(AgentAction::try_from(-1), Err(ActionError::Unknown(-1)));
    }

    #[test]
    fn heuristic_priority_is_forward_left_right() {
        assert_eq!(HeuristicInput::empty().to_action(), AgentAction::Idle);
        assert_eq!(HeuristicInput::all().to_action(), AgentAction::Forward);
        assert_eq!(
            (HeuristicInput::LEFT | HeuristicInput::RIGHT).to_action(),
            AgentAction::RotateLeft
        );
        assert_eq!(HeuristicInput::RIGHT.to_action(), AgentAction::RotateRight);
    }
}
