mod common;

use common::{ScriptedEngine, open, screen_len};
use nes_rl_env::{
    ACT_UNDEFINED, Action, Buttons, EnvConfig, EnvError, GameId, NesEnv, translate,
};

#[test]
fn contra_right_press_reaches_both_ports() {
    let mut env = open("/data/roms/contra.zip");
    assert_eq!(env.game(), GameId::Contra);
    assert_eq!(env.num_legal_actions(), 21);

    env.reset_game().unwrap();
    let reward = env.act(Action::Right.code()).unwrap();
    assert_eq!(reward, 0);
    assert_eq!(env.episode_frame_number(), 1);
    assert_eq!(
        env.engine().last_input,
        Some((Buttons::RIGHT, Buttons::RIGHT))
    );
}

#[test]
fn unsupported_rom_is_rejected() {
    let result = NesEnv::with_engine("unknown.zip", EnvConfig::default(), |_| {
        Ok(ScriptedEngine::default())
    });
    match result {
        Err(EnvError::UnsupportedGame { rom }) => assert!(rom.contains("unknown.zip")),
        _ => panic!("expected unsupported game"),
    }
}

#[test]
fn undefined_code_is_an_error() {
    let mut env = open("joust.zip");
    assert!(matches!(env.act(ACT_UNDEFINED), Err(EnvError::InvalidAction(_))));
    assert!(matches!(env.act(-1), Err(EnvError::InvalidAction(_))));
    assert!(translate(37).is_ok());
}

#[test]
fn rewards_are_score_deltas() {
    let mut env = open("galaga.zip");
    env.reset_game().unwrap();

    env.engine_mut().ram[0x00E4] = 2;
    assert_eq!(env.act_action(Action::B).unwrap(), 200);
    assert_eq!(env.act_action(Action::B).unwrap(), 0);

    env.engine_mut().ram[0x00E3] = 1;
    assert_eq!(env.act_action(Action::Left).unwrap(), 1_000);
    assert_eq!(env.current_score(), 1_200);
}

#[test]
fn game_over_stays_latched_until_reset() {
    let mut env = open("kungfu.zip");
    env.reset_game().unwrap();
    env.engine_mut().ram[0x005C] = 2;
    assert!(!env.game_over().unwrap());

    env.act_action(Action::Noop).unwrap();
    assert_eq!(env.lives(), 2);

    env.engine_mut().ram[0x005C] = 0;
    assert!(env.game_over().unwrap());
    env.engine_mut().ram[0x005C] = 3;
    assert!(env.game_over().unwrap());
    env.act_action(Action::Noop).unwrap();
    assert!(env.game_over().unwrap());

    env.reset_game().unwrap();
    env.engine_mut().ram[0x005C] = 3;
    assert!(!env.game_over().unwrap());
}

#[test]
fn reset_restarts_the_episode_but_not_the_frame_clock() {
    let mut env = open("lifeforce.zip");
    env.reset_game().unwrap();
    let warmup = env.frame_number();
    assert_eq!(warmup, 165);

    for _ in 0..30 {
        env.act_action(Action::Up).unwrap();
    }
    env.reset_game().unwrap();
    assert_eq!(env.episode_frame_number(), 0);
    assert_eq!(env.current_score(), 0);
    assert_eq!(env.frame_number(), 2 * warmup + 30);
    assert_eq!(env.engine().resets, 2);
}

#[test]
fn screen_is_zero_padded_and_bgr() {
    let env = open("rampage.zip");
    let raw = env.screen();
    assert_eq!(raw.len(), screen_len());
    assert!(raw.iter().all(|&b| b == 0));
    assert_eq!(env.screen_rgb().len(), 3 * screen_len());
    assert_eq!(env.to_rgb(&[0x16]), vec![0x20, 0x31, 0xB5]);
}
