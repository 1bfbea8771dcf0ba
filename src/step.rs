use tracing::debug;

use crate::action::Action;
use crate::engine::Engine;
use crate::error::Result;
use crate::profile::GameProfile;

/// Per-episode bookkeeping owned by one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeState {
    /// Score accumulated since the episode began.
    pub current_score: i64,
    /// Last raw score formula reading; rewards are deltas against it.
    pub previous_score: i64,
    /// Lives as read before the most recent step.
    pub lives: i64,
    /// Latches once the terminal predicate fires, until the next reset.
    pub terminal: bool,
    pub episode_frames: u64,
    /// Frames since the ROM was loaded, across episodes.
    pub total_frames: u64,
}

impl EpisodeState {
    pub fn clear(&mut self) {
        self.current_score = 0;
        self.previous_score = 0;
        self.episode_frames = 0;
        self.terminal = false;
    }
}

/// Emulates one frame with `action` held on both controller ports and returns
/// the score delta it produced.
///
/// Lives and the terminal flag are sampled from RAM *before* the frame runs,
/// so they trail the score by one frame.
pub fn act<E: Engine>(
    engine: &mut E,
    profile: &GameProfile,
    state: &mut EpisodeState,
    action: Action,
) -> Result<i64> {
    state.lives = profile.lives.evaluate(&*engine)?;
    state.terminal |= profile.terminal.is_over(&*engine)?;

    let buttons = action.buttons();
    engine.step_frame(buttons, buttons)?;
    state.episode_frames += 1;
    state.total_frames += 1;

    let score = profile.score.evaluate(&*engine)?;
    let reward = score - state.previous_score;
    state.previous_score = score;
    state.current_score += reward;

    debug!(
        game = %profile.id,
        %action,
        buttons = buttons.bits(),
        reward,
        score,
        lives = state.lives,
        terminal = state.terminal,
        frame = state.episode_frames,
        "step"
    );
    Ok(reward)
}

/// Re-reads the terminal predicate. Once it has fired the episode stays over
/// until reset, whatever RAM says afterwards.
pub fn game_over<E: Engine>(
    engine: &E,
    profile: &GameProfile,
    state: &mut EpisodeState,
) -> Result<bool> {
    state.terminal |= profile.terminal.is_over(engine)?;
    Ok(state.terminal)
}
