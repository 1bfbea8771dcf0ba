use std::fmt;

use crate::error::{EnvError, Result};
use crate::profile::GameProfile;

// =============================================================================
// Controller Buttons
// =============================================================================

/// One byte of controller state, one bit per physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const A: Buttons = Buttons(1 << 0);
    pub const B: Buttons = Buttons(1 << 1);
    pub const SELECT: Buttons = Buttons(1 << 2);
    pub const START: Buttons = Buttons(1 << 3);
    pub const UP: Buttons = Buttons(1 << 4);
    pub const DOWN: Buttons = Buttons(1 << 5);
    pub const LEFT: Buttons = Buttons(1 << 6);
    pub const RIGHT: Buttons = Buttons(1 << 7);

    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

// =============================================================================
// Action Space
// =============================================================================

pub const NUM_ACTIONS: usize = 38;

/// Reserved codes. None of them is translatable: the environment is reset with
/// `reset_game`, and random action selection is left to the agent.
pub const ACT_RESET: i32 = 38;
pub const ACT_UNDEFINED: i32 = 39;
pub const ACT_RANDOM: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Noop = 0,
    A = 1,
    B = 2,
    Select = 3,
    Start = 4,
    Up = 5,
    Down = 6,
    Left = 7,
    Right = 8,
    UpLeft = 9,
    UpRight = 10,
    DownLeft = 11,
    DownRight = 12,
    AUp = 13,
    ADown = 14,
    ALeft = 15,
    ARight = 16,
    AUpLeft = 17,
    AUpRight = 18,
    ADownLeft = 19,
    ADownRight = 20,
    BUp = 21,
    BDown = 22,
    BLeft = 23,
    BRight = 24,
    BUpLeft = 25,
    BUpRight = 26,
    BDownLeft = 27,
    BDownRight = 28,
    AB = 29,
    ABUp = 30,
    ABDown = 31,
    ABLeft = 32,
    ABRight = 33,
    ABUpLeft = 34,
    ABUpRight = 35,
    ABDownLeft = 36,
    ABDownRight = 37,
}

/// Controller byte for each action code, indexed by code.
const CONTROLLER_MAP: [u8; NUM_ACTIONS] = [
    0, 1, 2, 4, 8, 16, 32, 64, 128, 80, 144, 96, 160, 17, 33, 65, 129, 81, 145, 97, 161, 18, 34,
    66, 130, 82, 146, 98, 162, 3, 19, 35, 67, 131, 83, 147, 99, 163,
];

impl Action {
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::Noop,
        Action::A,
        Action::B,
        Action::Select,
        Action::Start,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::UpLeft,
        Action::UpRight,
        Action::DownLeft,
        Action::DownRight,
        Action::AUp,
        Action::ADown,
        Action::ALeft,
        Action::ARight,
        Action::AUpLeft,
        Action::AUpRight,
        Action::ADownLeft,
        Action::ADownRight,
        Action::BUp,
        Action::BDown,
        Action::BLeft,
        Action::BRight,
        Action::BUpLeft,
        Action::BUpRight,
        Action::BDownLeft,
        Action::BDownRight,
        Action::AB,
        Action::ABUp,
        Action::ABDown,
        Action::ABLeft,
        Action::ABRight,
        Action::ABUpLeft,
        Action::ABUpRight,
        Action::ABDownLeft,
        Action::ABDownRight,
    ];

    pub fn from_code(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(EnvError::InvalidAction(code))
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn buttons(self) -> Buttons {
        Buttons::from_bits(CONTROLLER_MAP[self as usize])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// Controller byte for an action code.
pub fn translate(code: i32) -> Result<Buttons> {
    Action::from_code(code).map(Action::buttons)
}

// =============================================================================
// Legal Action Sets
// =============================================================================

/// One bit per action code; bit `n` set means code `n` is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalActionSet(u64);

impl LegalActionSet {
    pub const fn of(actions: &[Action]) -> Self {
        let mut mask = 0u64;
        let mut i = 0;
        while i < actions.len() {
            mask |= 1 << actions[i] as u64;
            i += 1;
        }
        LegalActionSet(mask)
    }

    pub const fn union(self, other: LegalActionSet) -> Self {
        LegalActionSet(self.0 | other.0)
    }

    pub const fn mask(self) -> u64 {
        self.0
    }

    pub const fn contains(self, action: Action) -> bool {
        self.0 & (1 << action as u64) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Legal actions in ascending code order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |&a| self.contains(a))
    }

    pub fn codes(self) -> Vec<i32> {
        self.iter().map(Action::code).collect()
    }
}

pub fn is_legal(profile: &GameProfile, code: i32) -> bool {
    Action::from_code(code).is_ok_and(|action| profile.legal.contains(action))
}

pub fn legal_action_set(profile: &GameProfile) -> Vec<i32> {
    profile.legal.codes()
}

pub fn num_legal_actions(profile: &GameProfile) -> usize {
    profile.legal.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GameId;
    use crate::profile::profile;
    use proptest::prelude::*;

    #[test]
    fn documented_controller_bytes() {
        #[rustfmt::skip]
        let expected: [u8; NUM_ACTIONS] = [
            0, 1, 2, 4, 8, 16, 32, 64, 128,
            80, 144, 96, 160,
            17, 33, 65, 129, 81, 145, 97, 161,
            18, 34, 66, 130, 82, 146, 98, 162,
            3, 19, 35, 67, 131, 83, 147, 99, 163,
        ];
        for action in Action::ALL {
            let code = action.code();
            assert_eq!(translate(code).unwrap().bits(), expected[code as usize], "{action}");
        }
        assert_eq!(translate(Action::Select.code()).unwrap(), Buttons::SELECT);
        assert_eq!(translate(Action::Right.code()).unwrap(), Buttons::RIGHT);
    }

    #[test]
    fn combos_are_unions_of_their_buttons() {
        assert_eq!(Action::ABUpLeft.buttons(), Buttons::A | Buttons::B | Buttons::UP | Buttons::LEFT);
        assert_eq!(Action::BDownRight.buttons(), Buttons::B | Buttons::DOWN | Buttons::RIGHT);
        assert!(Action::AUp.buttons().contains(Buttons::A));
    }

    #[test]
    fn reserved_codes_are_not_translatable() {
        for code in [ACT_RESET, ACT_UNDEFINED, ACT_RANDOM, -1, 41, i32::MAX] {
            assert!(matches!(translate(code), Err(EnvError::InvalidAction(c)) if c == code));
        }
    }

    #[test]
    fn codes_match_table_positions() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code() as usize, i);
        }
    }

    #[test]
    fn legal_set_is_ascending_and_counted() {
        let contra = profile(GameId::Contra);
        let codes = legal_action_set(contra);
        assert_eq!(codes.len(), num_legal_actions(contra));
        assert_eq!(codes.len(), 21);
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
        assert!(is_legal(contra, Action::Right.code()));
        assert!(!is_legal(contra, Action::Start.code()));
        assert!(!is_legal(contra, ACT_RANDOM));
    }

    proptest! {
        #[test]
        fn translate_is_pure_and_never_opposes(code in 0i32..NUM_ACTIONS as i32) {
            let first = translate(code).unwrap();
            prop_assert_eq!(first, translate(code).unwrap());
            prop_assert!(!(first.contains(Buttons::UP) && first.contains(Buttons::DOWN)));
            prop_assert!(!(first.contains(Buttons::LEFT) && first.contains(Buttons::RIGHT)));
        }

        #[test]
        fn out_of_range_codes_fail(code in prop_oneof![i32::MIN..0, NUM_ACTIONS as i32..i32::MAX]) {
            prop_assert!(translate(code).is_err());
        }
    }
}
