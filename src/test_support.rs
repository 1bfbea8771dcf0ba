use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::action::Buttons;
use crate::engine::{Engine, NES_SCREEN_WIDTH, Ram};

/// Scripted stand-in for an emulator: flat 64K RAM, memory writes that land
/// after a given frame, and a record of every controller latch.
pub struct FakeEngine {
    pub ram: Vec<u8>,
    pub height: usize,
    pub frame: Vec<u8>,
    pub frames: u64,
    pub inputs: Vec<(Buttons, Buttons)>,
    pub power_on_resets: u32,
    pub loaded: Option<PathBuf>,
    pub fail_load: bool,
    pub fail_step_at: Option<u64>,
    /// `(frame, addr, value)`: applied once `frames` reaches `frame`.
    pub scheduled: Vec<(u64, u16, u8)>,
    /// Power-on state restored by `reset_to_power_on`.
    pub power_on_ram: Vec<u8>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            ram: vec![0; 0x1_0000],
            height: 240,
            frame: Vec::new(),
            frames: 0,
            inputs: Vec::new(),
            power_on_resets: 0,
            loaded: None,
            fail_load: false,
            fail_step_at: None,
            scheduled: Vec::new(),
            power_on_ram: vec![0; 0x1_0000],
        }
    }
}

impl FakeEngine {
    pub fn with_ram(bytes: &[(u16, u8)]) -> Self {
        let mut engine = Self::default();
        for &(addr, value) in bytes {
            engine.poke(addr, value);
        }
        engine
    }

    pub fn poke(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    /// Write `value` to `addr` once `frame` frames have been emulated.
    pub fn schedule(&mut self, frame: u64, addr: u16, value: u8) {
        self.scheduled.push((frame, addr, value));
    }
}

impl Ram for FakeEngine {
    fn peek(&self, addr: u16) -> Result<u8> {
        Ok(self.ram[addr as usize])
    }
}

impl Engine for FakeEngine {
    fn load_rom(&mut self, path: &Path) -> Result<()> {
        if self.fail_load {
            bail!("bad ROM image: {}", path.display());
        }
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn step_frame(&mut self, port_one: Buttons, port_two: Buttons) -> Result<()> {
        if self.fail_step_at == Some(self.frames) {
            bail!("emulation fault at frame {}", self.frames);
        }
        self.inputs.push((port_one, port_two));
        self.frames += 1;
        let now = self.frames;
        for &(frame, addr, value) in &self.scheduled {
            if frame == now {
                self.ram[addr as usize] = value;
            }
        }
        self.frame = (0..NES_SCREEN_WIDTH * self.height)
            .map(|i| (i as u64 + now) as u8)
            .collect();
        Ok(())
    }

    fn frame_buffer(&self) -> &[u8] {
        &self.frame
    }

    fn reset_to_power_on(&mut self) -> Result<()> {
        self.power_on_resets += 1;
        self.ram.copy_from_slice(&self.power_on_ram);
        Ok(())
    }

    fn palette_color(&self, index: u8) -> (u8, u8, u8) {
        (index, 255 - index, index / 2)
    }

    fn screen_height(&self) -> usize {
        self.height
    }
}
