use thiserror::Error;

pub type Result<T, E = EnvError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EnvError {
    /// The ROM basename is not one of the catalogued titles. Raised before any
    /// engine session exists.
    #[error("unsupported game ROM: {rom}")]
    UnsupportedGame { rom: String },

    #[error("invalid action code {0} (translatable codes are 0..=37)")]
    InvalidAction(i32),

    /// Engine session could not be brought up or the ROM failed to load.
    #[error("failed to initialise engine for {rom}")]
    EngineInit {
        rom: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Any failure reported by the engine while stepping, reading memory or
    /// resetting.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}
