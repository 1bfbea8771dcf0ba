pub mod action;
pub mod baseline;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod profile;
pub mod reset;
pub mod screen;
pub mod step;
#[cfg(feature = "tetanes")]
pub mod tetanes;

#[cfg(test)]
mod test_support;

pub use action::{
    ACT_RANDOM, ACT_RESET, ACT_UNDEFINED, Action, Buttons, LegalActionSet, NUM_ACTIONS, translate,
};
pub use baseline::{BaselineStats, run_random_baseline};
pub use catalog::{GameId, identify};
pub use config::EnvConfig;
pub use engine::{Engine, NES_SCREEN_WIDTH, Ram};
pub use env::NesEnv;
pub use error::{EnvError, Result};
pub use profile::{GameProfile, profile};
#[cfg(feature = "tetanes")]
pub use tetanes::TetanesEngine;
