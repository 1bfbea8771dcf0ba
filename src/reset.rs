use tracing::info;

use crate::engine::Engine;
use crate::error::Result;
use crate::profile::GameProfile;
use crate::step::{self, EpisodeState};

/// Power-cycles the console and plays the title's warm-up script so the
/// episode starts in the same in-game state every time.
///
/// Warm-up frames count towards the total frame number but not towards the
/// episode: afterwards the episode score and frame count read zero while
/// `previous_score` holds the post-warm-up reading, so the first reward is a
/// real delta.
pub fn reset<E: Engine>(
    engine: &mut E,
    profile: &GameProfile,
    state: &mut EpisodeState,
) -> Result<()> {
    engine.reset_to_power_on()?;
    state.clear();

    for step in profile.warmup {
        for _ in 0..step.repeat {
            step::act(engine, profile, state, step.action)?;
        }
    }

    state.current_score = 0;
    state.episode_frames = 0;
    state.terminal = false;

    info!(
        game = %profile.id,
        warmup_frames = profile.warmup_frames(),
        start_score = state.previous_score,
        lives = state.lives,
        "reset"
    );
    Ok(())
}
