use anyhow::Result;

use crate::action::{Action, LegalActionSet};
use crate::catalog::GameId;
use crate::engine::Ram;

// =============================================================================
// Memory Decoding
// =============================================================================

/// How a single RAM byte turns into a digit (or digit group) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    Raw,
    BcdHighNibble,
    BcdLowNibble,
    /// Digits stored as tile/character codes: subtract the code of `0`.
    SubtractOffset(i64),
    /// The given byte means "no digit here" and counts as zero.
    SentinelToZero(u8),
    /// `sentinel` counts as zero, anything else has `offset` subtracted.
    OffsetUnlessSentinel { offset: i64, sentinel: u8 },
}

impl Decode {
    pub fn apply(self, byte: u8) -> i64 {
        let value = byte as i64;
        match self {
            Decode::Raw => value,
            Decode::BcdHighNibble => value >> 4,
            Decode::BcdLowNibble => value & 0x0F,
            Decode::SubtractOffset(k) => value - k,
            Decode::SentinelToZero(sentinel) if byte == sentinel => 0,
            Decode::SentinelToZero(_) => value,
            Decode::OffsetUnlessSentinel { sentinel, .. } if byte == sentinel => 0,
            Decode::OffsetUnlessSentinel { offset, .. } => value - offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTerm {
    pub addr: u16,
    pub place: i64,
    pub decode: Decode,
}

const fn term(addr: u16, place: i64, decode: Decode) -> ScoreTerm {
    ScoreTerm {
        addr,
        place,
        decode,
    }
}

/// Sum of decoded terms, optionally rescaled by `mul / div` (truncating) once
/// the whole sum is known. Recomputed from RAM on every query.
#[derive(Debug, Clone, Copy)]
pub struct ScoreFormula {
    pub terms: &'static [ScoreTerm],
    pub scale: Option<(i64, i64)>,
}

impl ScoreFormula {
    pub fn evaluate(&self, ram: &impl Ram) -> Result<i64> {
        let mut total = 0i64;
        for t in self.terms {
            total += t.decode.apply(ram.peek(t.addr)?) * t.place;
        }
        Ok(match self.scale {
            Some((mul, div)) => total * mul / div,
            None => total,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivesFormula {
    Address { addr: u16, decode: Decode },
    /// Title has no lives counter.
    None,
}

impl LivesFormula {
    const fn at(addr: u16) -> Self {
        LivesFormula::Address {
            addr,
            decode: Decode::Raw,
        }
    }

    pub fn evaluate(&self, ram: &impl Ram) -> Result<i64> {
        match *self {
            LivesFormula::Address { addr, decode } => Ok(decode.apply(ram.peek(addr)?)),
            LivesFormula::None => Ok(0),
        }
    }
}

/// Condition on RAM that signals the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Equals(u8),
    NotEquals(u8),
    /// Over when both this address and `other` read `value`.
    BothEqual { other: u16, value: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalFormula {
    pub addr: u16,
    pub predicate: Predicate,
}

impl TerminalFormula {
    const fn equals(addr: u16, value: u8) -> Self {
        TerminalFormula {
            addr,
            predicate: Predicate::Equals(value),
        }
    }

    pub fn is_over(&self, ram: &impl Ram) -> Result<bool> {
        let byte = ram.peek(self.addr)?;
        Ok(match self.predicate {
            Predicate::Equals(v) => byte == v,
            Predicate::NotEquals(v) => byte != v,
            Predicate::BothEqual { other, value } => byte == value && ram.peek(other)? == value,
        })
    }
}

// =============================================================================
// Warm-up Scripts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupStep {
    pub action: Action,
    pub repeat: u32,
}

const fn hold(action: Action, repeat: u32) -> WarmupStep {
    WarmupStep { action, repeat }
}

/// Title screen, then one start burst.
const WARMUP_PLAIN: &[WarmupStep] = &[hold(Action::Noop, 60), hold(Action::Start, 5)];

const WARMUP_LIFEFORCE: &[WarmupStep] = &[
    hold(Action::Noop, 60),
    hold(Action::Start, 5),
    hold(Action::Noop, 100),
];

/// Titles with a mode/player select screen behind the first start press.
const WARMUP_DOUBLE_START: &[WarmupStep] = &[
    hold(Action::Noop, 60),
    hold(Action::Start, 5),
    hold(Action::Noop, 10),
    hold(Action::Start, 10),
    hold(Action::Noop, 10),
    hold(Action::A, 5),
];

const WARMUP_DOUBLE_DRAGON: &[WarmupStep] = &[
    hold(Action::Noop, 60),
    hold(Action::Select, 1),
    hold(Action::Start, 1),
    hold(Action::Select, 1),
    hold(Action::Start, 1),
    hold(Action::Select, 1),
    hold(Action::Start, 1),
    hold(Action::Select, 1),
    hold(Action::Start, 1),
    hold(Action::Select, 1),
    hold(Action::Start, 1),
    hold(Action::Noop, 10),
    hold(Action::Start, 10),
    hold(Action::Noop, 10),
    hold(Action::A, 5),
];

const WARMUP_MACH_RIDER: &[WarmupStep] = &[
    hold(Action::Noop, 60),
    hold(Action::Down, 5),
    hold(Action::Noop, 10),
    hold(Action::Start, 10),
    hold(Action::Noop, 10),
    hold(Action::A, 5),
];

const WARMUP_RAD_RACER: &[WarmupStep] = &[
    hold(Action::Noop, 60),
    hold(Action::Start, 5),
    hold(Action::Noop, 10),
    hold(Action::Start, 5),
    hold(Action::Noop, 10),
    hold(Action::Start, 5),
    hold(Action::Noop, 10),
    hold(Action::A, 5),
];

// =============================================================================
// Legal Action Building Blocks
// =============================================================================

const DIRECTIONS: LegalActionSet = LegalActionSet::of(&[
    Action::Noop,
    Action::Left,
    Action::Right,
    Action::Up,
    Action::Down,
    Action::DownRight,
    Action::DownLeft,
    Action::UpLeft,
    Action::UpRight,
]);

const B_DIRECTIONS: LegalActionSet = LegalActionSet::of(&[
    Action::B,
    Action::BLeft,
    Action::BRight,
    Action::BUp,
    Action::BDown,
    Action::BDownRight,
    Action::BDownLeft,
    Action::BUpRight,
    Action::BUpLeft,
]);

const A_DIRECTIONS: LegalActionSet = LegalActionSet::of(&[
    Action::A,
    Action::ALeft,
    Action::ARight,
    Action::ADown,
    Action::AUp,
    Action::AUpRight,
    Action::AUpLeft,
    Action::ADownRight,
    Action::ADownLeft,
]);

const AB_DIRECTIONS: LegalActionSet = LegalActionSet::of(&[
    Action::AB,
    Action::ABLeft,
    Action::ABRight,
    Action::ABDown,
    Action::ABUp,
    Action::ABDownRight,
    Action::ABDownLeft,
    Action::ABUpRight,
    Action::ABUpLeft,
]);

/// Left/right with either button.
const SIDEWAYS_A_B: LegalActionSet = LegalActionSet::of(&[
    Action::Noop,
    Action::Left,
    Action::Right,
    Action::B,
    Action::BLeft,
    Action::BRight,
    Action::A,
    Action::ALeft,
    Action::ARight,
]);

const EIGHT_WAY_A_B: LegalActionSet = DIRECTIONS.union(B_DIRECTIONS).union(A_DIRECTIONS);

// =============================================================================
// Game Profiles
// =============================================================================

/// Everything the environment needs to know about one title.
#[derive(Debug, Clone, Copy)]
pub struct GameProfile {
    pub id: GameId,
    pub score: ScoreFormula,
    pub lives: LivesFormula,
    pub terminal: TerminalFormula,
    pub legal: LegalActionSet,
    pub warmup: &'static [WarmupStep],
}

impl GameProfile {
    /// Number of frames the warm-up script steps through.
    pub fn warmup_frames(&self) -> u32 {
        self.warmup.iter().map(|s| s.repeat).sum()
    }
}

pub fn profile(game: GameId) -> &'static GameProfile {
    &PROFILES[game.index()]
}

/// Indexed by `GameId`.
pub static PROFILES: [GameProfile; GameId::COUNT] = [
    GameProfile {
        id: GameId::BalloonFight,
        score: ScoreFormula {
            terms: &[
                term(0x0007, 100_000, Decode::Raw),
                term(0x0006, 10_000, Decode::Raw),
                term(0x0005, 1_000, Decode::Raw),
                term(0x0004, 100, Decode::Raw),
                term(0x0003, 10, Decode::Raw),
                term(0x0002, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x0041),
        terminal: TerminalFormula::equals(0x0041, 255),
        legal: SIDEWAYS_A_B,
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::BreakThru,
        score: ScoreFormula {
            terms: &[
                term(0x0091, 100_000, Decode::Raw),
                term(0x0092, 10_000, Decode::Raw),
                term(0x0093, 1_000, Decode::Raw),
                term(0x0094, 100, Decode::Raw),
                term(0x0095, 10, Decode::Raw),
                term(0x0096, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x00B2),
        terminal: TerminalFormula::equals(0x00B2, 0),
        legal: DIRECTIONS
            .union(B_DIRECTIONS)
            .union(LegalActionSet::of(&[Action::A, Action::AUp, Action::ADown])),
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::BumpNJump,
        score: ScoreFormula {
            terms: &[
                term(0x0053, 100_000, Decode::Raw),
                term(0x0052, 10_000, Decode::Raw),
                term(0x0051, 1_000, Decode::Raw),
                term(0x0050, 100, Decode::Raw),
                term(0x004F, 10, Decode::Raw),
                term(0x004E, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x004D),
        terminal: TerminalFormula::equals(0x004D, 0),
        legal: EIGHT_WAY_A_B,
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::Contra,
        // Kill counter nibbles packed two bits apart; each kill is worth 10.
        score: ScoreFormula {
            terms: &[
                term(0x07E5, 640, Decode::Raw),
                term(0x07E4, 160, Decode::Raw),
                term(0x07E3, 40, Decode::Raw),
                term(0x07E2, 10, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x0032),
        terminal: TerminalFormula::equals(0x0038, 1),
        legal: DIRECTIONS
            .union(B_DIRECTIONS)
            .union(LegalActionSet::of(&[Action::A, Action::ALeft, Action::ARight])),
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::DoubleDragon,
        score: ScoreFormula {
            terms: &[
                term(0x0040, 1_600, Decode::Raw),
                term(0x0042, 160, Decode::Raw),
                term(0x0041, 1, Decode::Raw),
            ],
            scale: Some((50, 32)),
        },
        lives: LivesFormula::at(0x0043),
        terminal: TerminalFormula::equals(0x0043, 255),
        legal: DIRECTIONS.union(LegalActionSet::of(&[
            Action::B,
            Action::A,
            Action::AB,
            Action::ABLeft,
            Action::ABRight,
        ])),
        warmup: WARMUP_DOUBLE_DRAGON,
    },
    GameProfile {
        id: GameId::Galaga,
        score: ScoreFormula {
            terms: &[
                term(0x00E0, 1_000_000, Decode::Raw),
                term(0x00E1, 100_000, Decode::Raw),
                term(0x00E2, 10_000, Decode::Raw),
                term(0x00E3, 1_000, Decode::Raw),
                term(0x00E4, 100, Decode::Raw),
                term(0x00E5, 10, Decode::Raw),
                term(0x00E6, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x0485),
        terminal: TerminalFormula::equals(0x0671, 254),
        legal: LegalActionSet::of(&[
            Action::Noop,
            Action::Left,
            Action::Right,
            Action::B,
            Action::BLeft,
            Action::BRight,
        ]),
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::Gradius,
        score: ScoreFormula {
            terms: &[
                term(0x07E6, 100_000, Decode::BcdHighNibble),
                term(0x07E6, 10_000, Decode::BcdLowNibble),
                term(0x07E5, 1_000, Decode::BcdHighNibble),
                term(0x07E5, 100, Decode::BcdLowNibble),
                term(0x07E4, 10, Decode::BcdHighNibble),
                term(0x07E4, 1, Decode::BcdLowNibble),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x0020),
        terminal: TerminalFormula::equals(0x0020, 255),
        legal: EIGHT_WAY_A_B,
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::Gunsmoke,
        // Digits are tile codes starting at 88.
        score: ScoreFormula {
            terms: &[
                term(0x06F2, 100_000, Decode::SubtractOffset(88)),
                term(0x06F4, 10_000, Decode::SubtractOffset(88)),
                term(0x06F6, 1_000, Decode::SubtractOffset(88)),
                term(0x06F8, 100, Decode::SubtractOffset(88)),
                term(0x06FA, 10, Decode::SubtractOffset(88)),
                term(0x06FC, 1, Decode::SubtractOffset(88)),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x007A),
        terminal: TerminalFormula::equals(0x06A1, 49),
        legal: EIGHT_WAY_A_B
            .union(AB_DIRECTIONS)
            .union(LegalActionSet::of(&[Action::Select])),
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::HudsonsAdventureIsland,
        score: ScoreFormula {
            terms: &[
                term(0x069B, 10_000_000, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x069C, 1_000_000, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x069D, 100_000, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x069E, 10_000, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x069F, 1_000, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x06A0, 100, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x06A1, 10, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
                term(0x06A2, 1, Decode::OffsetUnlessSentinel { offset: 245, sentinel: 255 }),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x003F),
        terminal: TerminalFormula {
            addr: 0x0048,
            predicate: Predicate::BothEqual {
                other: 0x003F,
                value: 1,
            },
        },
        legal: SIDEWAYS_A_B,
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::Joust,
        score: ScoreFormula {
            terms: &[
                term(0x00ED, 100_000, Decode::BcdHighNibble),
                term(0x00ED, 10_000, Decode::BcdLowNibble),
                term(0x00EC, 1_000, Decode::BcdHighNibble),
                term(0x00EC, 100, Decode::BcdLowNibble),
                term(0x00EB, 10, Decode::BcdHighNibble),
                term(0x00EB, 1, Decode::BcdLowNibble),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x00E9),
        terminal: TerminalFormula::equals(0x00E4, 1),
        legal: SIDEWAYS_A_B,
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::KungFu,
        score: ScoreFormula {
            terms: &[
                term(0x0531, 100_000_000, Decode::Raw),
                term(0x0532, 10_000, Decode::Raw),
                term(0x0533, 100, Decode::Raw),
                term(0x0534, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x005C),
        terminal: TerminalFormula::equals(0x005C, 0),
        legal: LegalActionSet::of(&[
            Action::Noop,
            Action::Left,
            Action::Right,
            Action::Up,
            Action::Down,
            Action::B,
            Action::A,
        ]),
        warmup: WARMUP_PLAIN,
    },
    GameProfile {
        id: GameId::Lifeforce,
        score: ScoreFormula {
            terms: &[
                term(0x07E6, 100_000, Decode::BcdHighNibble),
                term(0x07E6, 10_000, Decode::BcdLowNibble),
                term(0x07E5, 1_000, Decode::BcdHighNibble),
                term(0x07E5, 100, Decode::BcdLowNibble),
                term(0x07E4, 10, Decode::BcdHighNibble),
                term(0x07E4, 1, Decode::BcdLowNibble),
            ],
            scale: None,
        },
        lives: LivesFormula::at(0x0034),
        terminal: TerminalFormula::equals(0x0034, 0),
        legal: EIGHT_WAY_A_B,
        warmup: WARMUP_LIFEFORCE,
    },
    GameProfile {
        id: GameId::MachRider,
        score: ScoreFormula {
            terms: &[
                term(0x0000, 1_000_000, Decode::Raw),
                term(0x0001, 100_000, Decode::Raw),
                term(0x0002, 10_000, Decode::Raw),
                term(0x0003, 1_000, Decode::Raw),
                term(0x0004, 100, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::None,
        terminal: TerminalFormula::equals(0x0023, 0),
        legal: LegalActionSet::of(&[
            Action::Noop,
            Action::Left,
            Action::Right,
            Action::Up,
            Action::Down,
            Action::B,
            Action::BLeft,
            Action::BRight,
            Action::A,
            Action::ALeft,
            Action::ARight,
        ]),
        warmup: WARMUP_MACH_RIDER,
    },
    GameProfile {
        id: GameId::PunchOut,
        score: ScoreFormula {
            terms: &[
                term(0x03E8, 100_000, Decode::Raw),
                term(0x03E9, 10_000, Decode::Raw),
                term(0x03EA, 1_000, Decode::Raw),
                term(0x03EB, 100, Decode::Raw),
                term(0x03EC, 10, Decode::Raw),
                term(0x03ED, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::None,
        terminal: TerminalFormula::equals(0x0173, 3),
        // Start advances past the between-round screens, so it stands in for Noop.
        legal: LegalActionSet::of(&[
            Action::Left,
            Action::Right,
            Action::Down,
            Action::B,
            Action::BUp,
            Action::A,
            Action::AUp,
            Action::Start,
        ]),
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::RadRacer,
        // Digits are ASCII.
        score: ScoreFormula {
            terms: &[
                term(0x0563, 10_000, Decode::SubtractOffset(48)),
                term(0x0564, 1_000, Decode::SubtractOffset(48)),
                term(0x0565, 100, Decode::SubtractOffset(48)),
                term(0x0566, 10, Decode::SubtractOffset(48)),
                term(0x0567, 1, Decode::SubtractOffset(48)),
            ],
            scale: None,
        },
        lives: LivesFormula::None,
        terminal: TerminalFormula::equals(0x00BA, 115),
        legal: SIDEWAYS_A_B.union(LegalActionSet::of(&[Action::AUp])),
        warmup: WARMUP_RAD_RACER,
    },
    GameProfile {
        id: GameId::Rampage,
        score: ScoreFormula {
            terms: &[
                term(0x0119, 10_000_000, Decode::SentinelToZero(255)),
                term(0x011A, 1_000_000, Decode::SentinelToZero(255)),
                term(0x011B, 100_000, Decode::SentinelToZero(255)),
                term(0x011C, 10_000, Decode::SentinelToZero(255)),
                term(0x011D, 1_000, Decode::SentinelToZero(255)),
                term(0x011E, 100, Decode::SentinelToZero(255)),
                term(0x011F, 10, Decode::SentinelToZero(255)),
                term(0x0120, 1, Decode::SentinelToZero(255)),
            ],
            scale: None,
        },
        lives: LivesFormula::None,
        terminal: TerminalFormula::equals(0x0101, 2),
        legal: LegalActionSet::of(&[
            Action::Noop,
            Action::Left,
            Action::Right,
            Action::Up,
            Action::Down,
            Action::B,
            Action::A,
            Action::ALeft,
            Action::ARight,
            Action::AUp,
            Action::ADown,
        ]),
        warmup: WARMUP_DOUBLE_START,
    },
    GameProfile {
        id: GameId::SpyHunter,
        score: ScoreFormula {
            terms: &[
                term(0x0123, 100_000, Decode::Raw),
                term(0x0124, 10_000, Decode::Raw),
                term(0x0125, 1_000, Decode::Raw),
                term(0x0126, 100, Decode::Raw),
                term(0x0127, 10, Decode::Raw),
                term(0x0128, 1, Decode::Raw),
            ],
            scale: None,
        },
        lives: LivesFormula::None,
        terminal: TerminalFormula::equals(0x00F0, 0),
        legal: DIRECTIONS.union(B_DIRECTIONS),
        warmup: WARMUP_DOUBLE_START,
    },
];
