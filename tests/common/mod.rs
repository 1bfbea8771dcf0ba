#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;
use nes_rl_env::{Buttons, Engine, EnvConfig, NES_SCREEN_WIDTH, NesEnv, Ram};

/// Minimal engine: RAM the test pokes directly and a frame that cycles
/// through the first few palette entries.
pub struct ScriptedEngine {
    pub ram: Vec<u8>,
    pub frames: u64,
    pub last_input: Option<(Buttons, Buttons)>,
    pub resets: u32,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self {
            ram: vec![0; 0x1_0000],
            frames: 0,
            last_input: None,
            resets: 0,
        }
    }
}

impl Ram for ScriptedEngine {
    fn peek(&self, addr: u16) -> Result<u8> {
        Ok(self.ram[addr as usize])
    }
}

impl Engine for ScriptedEngine {
    fn load_rom(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn step_frame(&mut self, port_one: Buttons, port_two: Buttons) -> Result<()> {
        self.frames += 1;
        self.last_input = Some((port_one, port_two));
        Ok(())
    }

    fn frame_buffer(&self) -> &[u8] {
        &[]
    }

    fn reset_to_power_on(&mut self) -> Result<()> {
        self.resets += 1;
        self.ram.fill(0);
        Ok(())
    }

    fn palette_color(&self, index: u8) -> (u8, u8, u8) {
        match index {
            0x16 => (0xB5, 0x31, 0x20),
            _ => (0, 0, 0),
        }
    }

    fn screen_height(&self) -> usize {
        240
    }
}

pub fn open(rom: &str) -> NesEnv<ScriptedEngine> {
    NesEnv::with_engine(rom, EnvConfig::default(), |_| Ok(ScriptedEngine::default()))
        .expect("supported ROM")
}

pub fn screen_len() -> usize {
    NES_SCREEN_WIDTH * 240
}
