use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tetanes_core::input::JoypadBtnState;
use tetanes_core::mem::Read;
use tetanes_core::prelude::*;

use crate::action::Buttons;
use crate::config::EnvConfig;
use crate::engine::{Engine, NES_SCREEN_WIDTH, Ram};

const NTSC_SCREEN_HEIGHT: usize = 240;

const BUTTON_MAP: [(Buttons, JoypadBtnState); 8] = [
    (Buttons::A, JoypadBtnState::A),
    (Buttons::B, JoypadBtnState::B),
    (Buttons::SELECT, JoypadBtnState::SELECT),
    (Buttons::START, JoypadBtnState::START),
    (Buttons::UP, JoypadBtnState::UP),
    (Buttons::DOWN, JoypadBtnState::DOWN),
    (Buttons::LEFT, JoypadBtnState::LEFT),
    (Buttons::RIGHT, JoypadBtnState::RIGHT),
];

/// Drops the emphasis bits the PPU keeps above the 6-bit colour index.
fn index_raw_frame(raw: &[u16], out: &mut Vec<u8>) {
    out.clear();
    out.extend(raw.iter().map(|&p| (p & 0x3F) as u8));
}

/// `Engine` backed by a tetanes-core `ControlDeck`.
pub struct TetanesEngine {
    deck: ControlDeck,
    frame: Vec<u8>,
    height: usize,
    real_time: bool,
    next_frame_deadline: Option<Instant>,
}

impl TetanesEngine {
    pub fn new(config: &EnvConfig) -> Result<Self> {
        let mut deck = ControlDeck::new();
        let headless_mode = if config.mute_audio {
            HeadlessMode::NO_AUDIO
        } else {
            HeadlessMode::empty()
        };
        deck.set_headless_mode(headless_mode);
        Ok(Self {
            deck,
            frame: Vec::new(),
            height: NTSC_SCREEN_HEIGHT,
            real_time: config.real_time,
            next_frame_deadline: None,
        })
    }

    fn set_input(&mut self, player: Player, buttons: Buttons) {
        let joypad = self.deck.joypad_mut(player);
        for (ours, theirs) in BUTTON_MAP {
            joypad.set_button(theirs, buttons.contains(ours));
        }
    }

    fn throttle_frame(&mut self) {
        let frame_duration = Duration::from_nanos(1_000_000_000 / 60);
        let now = Instant::now();
        match self.next_frame_deadline {
            Some(deadline) if deadline > now => {
                std::thread::sleep(deadline - now);
                self.next_frame_deadline = Some(deadline + frame_duration);
            }
            _ => {
                self.next_frame_deadline = Some(now + frame_duration);
            }
        }
    }
}

impl Ram for TetanesEngine {
    fn peek(&self, addr: u16) -> Result<u8> {
        Ok(self.deck.bus().peek(addr))
    }
}

impl Engine for TetanesEngine {
    fn load_rom(&mut self, path: &Path) -> Result<()> {
        self.deck
            .load_rom_path(path)
            .with_context(|| format!("Failed to load ROM: {}", path.display()))?;
        Ok(())
    }

    fn step_frame(&mut self, port_one: Buttons, port_two: Buttons) -> Result<()> {
        self.set_input(Player::One, port_one);
        self.set_input(Player::Two, port_two);
        self.deck.clock_frame()?;

        let raw = self.deck.frame_buffer_raw();
        self.height = (raw.len() / NES_SCREEN_WIDTH).max(1);
        index_raw_frame(raw, &mut self.frame);

        if self.real_time {
            self.throttle_frame();
        }
        Ok(())
    }

    fn frame_buffer(&self) -> &[u8] {
        &self.frame
    }

    fn reset_to_power_on(&mut self) -> Result<()> {
        self.deck.reset(ResetKind::Hard);
        self.next_frame_deadline = None;
        Ok(())
    }

    fn palette_color(&self, index: u8) -> (u8, u8, u8) {
        Ppu::SYSTEM_PALETTE[(index & 0x3F) as usize]
    }

    fn screen_height(&self) -> usize {
        self.height
    }
}
