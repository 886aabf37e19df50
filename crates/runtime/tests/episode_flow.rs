//! End-to-end episodes through the public runtime API.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use maze_content::SettingKind;
use maze_core::{
    AgentAction, AgentConfig, Direction, EnvConfig, Grid, MazeConfig, TerminalReason, TilePos,
};
use maze_runtime::{
    ControlPanel, IdleProvider, MazeEnv, RandomProvider, RuntimeError, ScriptedProvider,
    StepOutcome,
};

/// One tile per world unit, 0.1 units per forward step, 90° per turn.
fn grid_aligned_env(seed: u64) -> MazeEnv {
    let config = EnvConfig {
        maze: MazeConfig::square(10, 1),
        agent: AgentConfig {
            move_speed: 5.0,
            rotation_speed: 4500.0,
            ..AgentConfig::default()
        },
        ..EnvConfig::default()
    };
    MazeEnv::builder().config(config).seed(seed).build().unwrap()
}

fn shortest_path(grid: &Grid, from: TilePos, to: TilePos) -> Vec<TilePos> {
    let mut parent = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parent.insert(from, from);
    while let Some(tile) = queue.pop_front() {
        if tile == to {
            break;
        }
        for direction in Direction::ALL {
            let next = tile.offset(direction, 1);
            if grid.is_open(next) && !parent.contains_key(&next) {
                parent.insert(next, tile);
                queue.push_back(next);
            }
        }
    }

    let mut path = vec![to];
    let mut tile = to;
    while tile != from {
        tile = parent[&tile];
        path.push(tile);
    }
    path.reverse();
    path
}

/// Turns towards the centre of `target` and walks there. Stops early when
/// the episode ends.
fn drive_to(env: &mut MazeEnv, target: TilePos, outcomes: &mut Vec<StepOutcome>) -> bool {
    for _ in 0..200 {
        let pose = env.pose();
        let dx = target.x as f32 - pose.x;
        let dz = target.y as f32 - pose.z;
        if dx.abs() < 0.05 && dz.abs() < 0.05 {
            return false;
        }

        let desired = if dx.abs() > dz.abs() {
            if dx > 0.0 { FRAC_PI_2 } else { PI + FRAC_PI_2 }
        } else if dz > 0.0 {
            0.0
        } else {
            PI
        };
        let diff = (desired - pose.yaw + PI).rem_euclid(TAU) - PI;
        let action = if diff.abs() < 0.1 {
            AgentAction::Forward
        } else if diff > 0.0 {
            AgentAction::RotateRight
        } else {
            AgentAction::RotateLeft
        };

        let outcome = env.step(action);
        outcomes.push(outcome);
        if outcome.terminal.is_some() {
            return true;
        }
    }
    panic!("agent failed to reach {target}");
}

#[test]
fn agent_collects_key_then_reaches_door() {
    for seed in 0..4 {
        let mut env = grid_aligned_env(seed);
        let layout = env.layout().unwrap().clone();
        let props = *layout.props();
        let key = props.key.unwrap();

        let mut route = shortest_path(layout.grid(), props.spawn, key);
        route.extend(shortest_path(layout.grid(), key, props.door).into_iter().skip(1));

        let mut outcomes = Vec::new();
        let mut finished = false;
        for tile in route.into_iter().skip(1) {
            if drive_to(&mut env, tile, &mut outcomes) {
                finished = true;
                break;
            }
        }
        assert!(finished, "seed {seed}: episode did not end at the door");

        let last = *outcomes.last().unwrap();
        assert_eq!(last.terminal, Some(TerminalReason::KeyThenDoor));
        let expected = 3.0 - 2.0 * last.step_count as f32 / 5000.0;
        assert!(
            (last.cumulative_reward - expected).abs() < 1e-3,
            "seed {seed}: reward {} != {expected}",
            last.cumulative_reward
        );

        // The terminal observation belongs to the finished episode: key held.
        assert_eq!(last.observation.key_channel(), (0.0, 0.0, 0.0));
        // The environment has already moved on.
        assert_eq!(env.state().episode_index, 2);
        assert_eq!(env.observe().key_channel().2, 1.0);
        assert!(env.stats().max_reward() > 2.0);
    }
}

#[test]
fn idle_episodes_end_at_the_step_limit() {
    let config = EnvConfig {
        agent: AgentConfig {
            max_steps: 50,
            ..AgentConfig::default()
        },
        ..EnvConfig::default()
    };
    let mut env = MazeEnv::builder().config(config).seed(8).build().unwrap();

    for expected_episode in 1..=3 {
        let summary = env.run_episode(&mut IdleProvider).unwrap();
        assert_eq!(summary.episode, expected_episode);
        assert_eq!(summary.reason, TerminalReason::StepLimitReached);
        assert_eq!(summary.steps, 50);
        assert!((summary.reward + 2.0).abs() < 1e-4);
    }
    assert_eq!(env.stats().max_reward(), 0.0);
}

#[test]
fn random_policy_always_terminates() {
    let config = EnvConfig {
        agent: AgentConfig {
            max_steps: 400,
            ..AgentConfig::default()
        },
        ..EnvConfig::default()
    };
    let mut env = MazeEnv::builder().config(config).seed(3).build().unwrap();
    let mut provider = RandomProvider::new(3);
    for _ in 0..5 {
        let summary = env.run_episode(&mut provider).unwrap();
        assert!(summary.steps <= 400);
        // Penalties are bounded by the step budget plus wall contact.
        assert!(summary.reward > -2.0 - 0.01 * 400.0 - 0.002 * 0.02 * 400.0 - 1e-3);
    }
}

#[test]
fn exhausted_provider_surfaces_an_error() {
    let mut env = MazeEnv::builder().seed(4).build().unwrap();
    let mut provider = ScriptedProvider::new([AgentAction::Forward; 3]);
    let result = env.run_episode(&mut provider);
    assert!(matches!(result, Err(RuntimeError::ProviderExhausted(_))));
    assert_eq!(env.state().step_count, 3);
}

#[test]
fn control_panel_drives_the_next_maze() {
    let mut env = MazeEnv::builder().seed(6).build().unwrap();
    let mut panel = ControlPanel::default();
    panel.initialize(&mut env);

    panel.apply(&mut env, SettingKind::MapSize, 21);
    panel.apply(&mut env, SettingKind::CellSize, 3);
    panel.apply(&mut env, SettingKind::AgentMaxSteps, 100);
    assert_eq!(env.layout().unwrap().grid().width(), 10);

    let summary = env.run_episode(&mut IdleProvider).unwrap();
    assert_eq!(summary.steps, 100);

    let layout = env.layout().unwrap();
    assert_eq!(layout.grid().width(), 20);
    assert_eq!(layout.cell_size(), 3.0);
    let door = env.maze().door_pos().unwrap();
    let tile = layout.props().door;
    assert_eq!((door.x, door.z), (tile.x as f32 * 3.0, tile.y as f32 * 3.0));
}
