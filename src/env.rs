use std::path::Path;

use tracing::{info, warn};

use crate::action::{self, Action};
use crate::catalog::{self, GameId};
use crate::config::EnvConfig;
use crate::engine::{Engine, NES_SCREEN_WIDTH};
use crate::error::{EnvError, Result};
use crate::profile::{self, GameProfile};
use crate::reset;
use crate::screen;
use crate::step::{self, EpisodeState};

// =============================================================================
// NES Environment
// =============================================================================

/// One agent-facing environment: a resolved title, the engine session it
/// exclusively owns, and the running episode.
pub struct NesEnv<E: Engine> {
    engine: E,
    profile: &'static GameProfile,
    state: EpisodeState,
    config: EnvConfig,
}

#[cfg(feature = "tetanes")]
impl NesEnv<crate::tetanes::TetanesEngine> {
    /// Opens `rom` on a tetanes-core engine.
    pub fn new(rom: impl AsRef<Path>, config: EnvConfig) -> Result<Self> {
        Self::with_engine(rom, config, crate::tetanes::TetanesEngine::new)
    }
}

impl<E: Engine> NesEnv<E> {
    /// Resolves the title from the ROM basename, then asks `open` for an engine
    /// session and loads the ROM into it. `open` is not called for an
    /// unsupported ROM.
    pub fn with_engine<F>(rom: impl AsRef<Path>, config: EnvConfig, open: F) -> Result<Self>
    where
        F: FnOnce(&EnvConfig) -> anyhow::Result<E>,
    {
        let rom = rom.as_ref();
        let game = catalog::identify(rom)?;
        let init_failed = |source: anyhow::Error| EnvError::EngineInit {
            rom: rom.display().to_string(),
            source: source.into(),
        };

        let mut engine = open(&config).map_err(init_failed)?;
        engine.load_rom(rom).map_err(init_failed)?;

        info!(%game, rom = %rom.display(), "environment ready");
        Ok(Self {
            engine,
            profile: profile::profile(game),
            state: EpisodeState::default(),
            config,
        })
    }

    pub fn game(&self) -> GameId {
        self.profile.id
    }

    pub fn profile(&self) -> &'static GameProfile {
        self.profile
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access. Writes made here bypass the episode bookkeeping.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn reset_game(&mut self) -> Result<()> {
        reset::reset(&mut self.engine, self.profile, &mut self.state)
    }

    pub fn game_over(&mut self) -> Result<bool> {
        step::game_over(&self.engine, self.profile, &mut self.state)
    }

    /// Applies one action code for one frame and returns the reward. Stepping
    /// past game over is allowed and keeps pressing buttons on whatever screen
    /// the game shows.
    pub fn act(&mut self, code: i32) -> Result<i64> {
        let action = Action::from_code(code)?;
        self.act_action(action)
    }

    pub fn act_action(&mut self, action: Action) -> Result<i64> {
        step::act(&mut self.engine, self.profile, &mut self.state, action)
    }

    pub fn num_legal_actions(&self) -> usize {
        action::num_legal_actions(self.profile)
    }

    pub fn legal_action_set(&self) -> Vec<i32> {
        action::legal_action_set(self.profile)
    }

    pub fn is_legal(&self, code: i32) -> bool {
        action::is_legal(self.profile, code)
    }

    /// Palette-indexed screen, `screen_width() * screen_height()` bytes.
    pub fn screen(&self) -> Vec<u8> {
        screen::current_frame(&self.engine)
    }

    /// Screen as blue, green, red byte triples.
    pub fn screen_rgb(&self) -> Vec<u8> {
        screen::screen_bgr(&self.engine)
    }

    pub fn to_rgb(&self, raw: &[u8]) -> Vec<u8> {
        screen::to_bgr(raw, |i| self.engine.palette_color(i))
    }

    pub fn screen_width(&self) -> usize {
        NES_SCREEN_WIDTH
    }

    pub fn screen_height(&self) -> usize {
        self.engine.screen_height()
    }

    pub fn current_score(&self) -> i64 {
        self.state.current_score
    }

    /// Lives as of the frame before the last step.
    pub fn lives(&self) -> i64 {
        self.state.lives
    }

    pub fn episode_frame_number(&self) -> u64 {
        self.state.episode_frames
    }

    /// Frames emulated since the ROM was loaded, warm-up included.
    pub fn frame_number(&self) -> u64 {
        self.state.total_frames
    }

    /// Recorded for callers that query it back; stepping does not enforce it.
    pub fn set_max_num_frames(&mut self, frames: u32) {
        self.config.max_num_frames = frames;
    }

    pub fn max_num_frames(&self) -> u32 {
        self.config.max_num_frames
    }

    pub fn min_reward(&self) -> i64 {
        0
    }

    pub fn max_reward(&self) -> i64 {
        0
    }

    // Save states are part of the interface but not implemented. Each call
    // reports that and leaves the emulator untouched.

    pub fn save_state(&mut self) -> Result<()> {
        warn!("save_state is not supported");
        Err(EnvError::Unsupported("save_state"))
    }

    /// Always `false`: there is never a saved state to restore.
    pub fn load_state(&mut self) -> bool {
        warn!("load_state is not supported");
        false
    }

    pub fn snapshot(&self) -> Result<String> {
        warn!("snapshot is not supported");
        Err(EnvError::Unsupported("snapshot"))
    }

    pub fn restore_snapshot(&mut self, _snapshot: &str) -> Result<()> {
        warn!("restore_snapshot is not supported");
        Err(EnvError::Unsupported("restore_snapshot"))
    }
}
