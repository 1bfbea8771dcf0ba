use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::action::Action;
use crate::catalog::GameId;
use crate::engine::Engine;
use crate::env::NesEnv;
use crate::error::Result;

// =============================================================================
// Random Baseline
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineStats {
    pub game: GameId,
    pub episodes: usize,
    pub mean_reward: f64,
    pub max_reward: i64,
    pub mean_frames: f64,
}

/// Plays `episodes` episodes choosing uniformly from the title's legal
/// actions. An episode ends at game over or after `max_steps` steps. Zero
/// episodes yields all-zero stats and leaves the emulator untouched.
pub fn run_random_baseline<E: Engine, R: Rng>(
    env: &mut NesEnv<E>,
    episodes: usize,
    max_steps: u64,
    rng: &mut R,
) -> Result<BaselineStats> {
    let legal: Vec<Action> = env.profile().legal.iter().collect();
    let mut rewards = Vec::with_capacity(episodes);
    let mut total_frames = 0u64;

    for ep in 0..episodes {
        env.reset_game()?;
        let mut total_reward = 0i64;
        let mut steps = 0u64;

        while steps < max_steps && !env.game_over()? {
            let action = legal[rng.random_range(0..legal.len())];
            total_reward += env.act_action(action)?;
            steps += 1;
        }

        info!(
            game = %env.game(),
            episode = ep + 1,
            reward = total_reward,
            steps,
            lives = env.lives(),
            "random episode"
        );
        rewards.push(total_reward);
        total_frames += env.episode_frame_number();
    }

    let mean = |total: f64| if episodes == 0 { 0.0 } else { total / episodes as f64 };
    Ok(BaselineStats {
        game: env.game(),
        episodes,
        mean_reward: mean(rewards.iter().sum::<i64>() as f64),
        max_reward: rewards.iter().copied().max().unwrap_or(0),
        mean_frames: mean(total_frames as f64),
    })
}
