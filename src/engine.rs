use std::path::Path;

use anyhow::Result;

use crate::action::Buttons;

/// NES screen width in pixels. Height depends on the video standard and is
/// reported by the engine.
pub const NES_SCREEN_WIDTH: usize = 256;

/// Byte-addressed read access to emulated CPU memory.
pub trait Ram {
    fn peek(&self, addr: u16) -> Result<u8>;
}

/// The emulation engine as seen from the environment. All calls block until
/// the engine has finished the requested work. An engine session is owned by
/// exactly one environment; implementations need not be reentrant.
pub trait Engine: Ram {
    fn load_rom(&mut self, path: &Path) -> Result<()>;

    /// Latches the two controller states and emulates exactly one frame.
    fn step_frame(&mut self, port_one: Buttons, port_two: Buttons) -> Result<()>;

    /// Palette-indexed frame produced by the last `step_frame`, one byte per
    /// pixel, row-major, `NES_SCREEN_WIDTH * screen_height()` bytes.
    fn frame_buffer(&self) -> &[u8];

    fn reset_to_power_on(&mut self) -> Result<()>;

    fn palette_color(&self, index: u8) -> (u8, u8, u8);

    fn screen_height(&self) -> usize;
}
