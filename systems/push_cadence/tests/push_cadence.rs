use std::time::Duration;

use sisyphus_core::{Command, Event, GamePhase, PushKey, PushPress};
use sisyphus_system_push_cadence::{Config, PushCadence};

fn press(key: PushKey, millis: u64) -> PushPress {
    PushPress::new(key, Duration::from_millis(millis))
}

fn pushes(commands: &[Command]) -> Vec<PushKey> {
    commands
        .iter()
        .map(|command| match command {
            Command::ApplyPush { key, .. } => *key,
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect()
}

fn started_cadence(first: PushKey, millis: u64) -> PushCadence {
    let mut cadence = PushCadence::default();
    let mut commands = Vec::new();
    cadence.handle(&[], GamePhase::ReadyToPlay, &[press(first, millis)], &mut commands);
    assert_eq!(pushes(&commands), vec![first]);
    cadence
}

#[test]
fn first_press_in_ready_phase_pushes_and_seeds_tracker() {
    let mut cadence = PushCadence::default();
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::ReadyToPlay,
        &[press(PushKey::B, 10)],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::ApplyPush {
            key: PushKey::B,
            impulse: 0.16,
        }]
    );
    let tracker = cadence.tracker();
    assert_eq!(tracker.last_push_key(), Some(PushKey::B));
    assert_eq!(tracker.last_push_at(), Duration::from_millis(10));
    assert_eq!(tracker.last_key_at(), Duration::from_millis(10));
}

#[test]
fn alternating_presses_beyond_interval_always_push() {
    let mut cadence = started_cadence(PushKey::A, 0);
    let mut commands = Vec::new();

    let presses = [
        press(PushKey::B, 100),
        press(PushKey::A, 200),
        press(PushKey::B, 300),
        press(PushKey::A, 351),
    ];
    cadence.handle(&[], GamePhase::Playing, &presses, &mut commands);

    assert_eq!(
        pushes(&commands),
        vec![PushKey::B, PushKey::A, PushKey::B, PushKey::A]
    );
    assert_eq!(cadence.tracker().last_push_at(), Duration::from_millis(351));
}

#[test]
fn alternation_exactly_at_interval_is_rejected() {
    let mut cadence = started_cadence(PushKey::A, 0);
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::Playing,
        &[press(PushKey::B, 50)],
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(cadence.tracker().last_push_key(), Some(PushKey::A));
    assert_eq!(cadence.tracker().last_key_at(), Duration::from_millis(50));
}

#[test]
fn same_key_repeats_never_push() {
    let mut cadence = started_cadence(PushKey::A, 0);
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::Playing,
        &[press(PushKey::A, 40), press(PushKey::A, 500)],
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(cadence.tracker().last_push_at(), Duration::ZERO);
    assert_eq!(cadence.tracker().last_key_at(), Duration::from_millis(500));
}

#[test]
fn repeats_restart_the_interval_for_the_next_alternation() {
    let mut cadence = started_cadence(PushKey::A, 0);
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::Playing,
        &[press(PushKey::A, 80), press(PushKey::B, 110)],
        &mut commands,
    );
    assert!(commands.is_empty(), "repeat at 80ms must delay the B press");

    cadence.handle(
        &[],
        GamePhase::Playing,
        &[press(PushKey::B, 161)],
        &mut commands,
    );
    assert_eq!(pushes(&commands), vec![PushKey::B]);
}

#[test]
fn rapid_spam_yields_at_most_one_impulse_per_window() {
    let mut cadence = started_cadence(PushKey::A, 0);
    let mut commands = Vec::new();

    let spam: Vec<PushPress> = (1..=40)
        .map(|index| {
            let key = if index % 2 == 0 { PushKey::A } else { PushKey::B };
            press(key, 100 + index * 10)
        })
        .collect();
    cadence.handle(&[], GamePhase::Playing, &spam, &mut commands);

    assert_eq!(
        pushes(&commands),
        vec![PushKey::B],
        "presses 10ms apart only let the first alternation through"
    );
}

#[test]
fn same_key_spam_within_window_pushes_once() {
    let mut cadence = PushCadence::default();
    let mut commands = Vec::new();

    let spam: Vec<PushPress> = (0..25).map(|index| press(PushKey::A, 1_000 + index * 5)).collect();
    cadence.handle(&[], GamePhase::ReadyToPlay, &spam, &mut commands);

    assert_eq!(pushes(&commands), vec![PushKey::A]);
}

#[test]
fn ready_batch_judges_later_presses_as_playing() {
    let mut cadence = PushCadence::default();
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::ReadyToPlay,
        &[
            press(PushKey::A, 1_000),
            press(PushKey::B, 1_020),
            press(PushKey::B, 1_060),
        ],
        &mut commands,
    );

    assert_eq!(pushes(&commands), vec![PushKey::A]);
}

#[test]
fn presses_outside_active_phases_are_ignored() {
    let mut cadence = PushCadence::default();
    let mut commands = Vec::new();

    for phase in [GamePhase::StartScreen, GamePhase::GameOver] {
        cadence.handle(
            &[],
            phase,
            &[press(PushKey::A, 100), press(PushKey::B, 300)],
            &mut commands,
        );
    }

    assert!(commands.is_empty());
    assert_eq!(cadence.tracker().last_push_key(), None);
}

#[test]
fn game_reset_clears_the_tracker() {
    let mut cadence = started_cadence(PushKey::A, 5_000);
    let mut commands = Vec::new();

    cadence.handle(
        &[Event::GameReset { layout_seed: 7 }],
        GamePhase::StartScreen,
        &[],
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(cadence.tracker().last_push_key(), None);
    assert_eq!(cadence.tracker().last_key_at(), Duration::ZERO);
}

#[test]
fn custom_push_force_is_forwarded() {
    let mut cadence = PushCadence::new(Config::new(0.5, Duration::from_millis(20)));
    let mut commands = Vec::new();

    cadence.handle(
        &[],
        GamePhase::ReadyToPlay,
        &[press(PushKey::A, 0), press(PushKey::B, 21)],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ApplyPush {
                key: PushKey::A,
                impulse: 0.5,
            },
            Command::ApplyPush {
                key: PushKey::B,
                impulse: 0.5,
            },
        ]
    );
}
