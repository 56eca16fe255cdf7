use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rogue_square::compute::{init_state, step};
use rogue_square::config::Tuning;
use rogue_square::entities::{GameState, GameStatus, Level, Upgrade};
use rogue_square::geometry::normalize;
use rogue_square::input::FrameInput;

/// One frame of random held controls plus an aim point and a frame time.
fn frame() -> impl Strategy<Value = (FrameInput, f32)> {
    (
        any::<[bool; 6]>(),
        0.0f32..800.0,
        0.0f32..600.0,
        0.001f32..0.1,
    )
        .prop_map(|(keys, x, y, dt)| {
            let input = FrameInput {
                up: keys[0],
                down: keys[1],
                left: keys[2],
                right: keys[3],
                dash: keys[4],
                fire: keys[5],
                cursor: Vec2::new(x, y),
                ..Default::default()
            };
            (input, dt)
        })
}

proptest! {
    #[test]
    fn normalize_gives_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
        prop_assume!(x != 0.0 || y != 0.0);
        prop_assert!((normalize(Vec2::new(x, y)).length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn run_invariants_hold_every_frame(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..400),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = playing_state();
        let mut last_score = 0;
        let mut last_floor = 1;

        for (input, dt) in &frames {
            let mut input = input.clone();
            // Keep the run going through shop visits
            if state.status == GameStatus::Shop {
                input.upgrade = Some(Upgrade::Damage);
            }
            let prev_status = state.status;
            state = step(&state, &input, *dt, &mut rng);

            prop_assert!(state.score >= last_score);
            prop_assert!(state.floor >= last_floor);
            if state.floor > last_floor {
                prop_assert_eq!(prev_status, GameStatus::Shop);
            }
            prop_assert!((0..=100).contains(&state.player.health));
            if state.player.health == 0 {
                prop_assert_eq!(state.status, GameStatus::GameOver);
            }
            for e in &state.enemies {
                prop_assert!(e.hp > 0.0 && e.hp <= e.max_hp);
            }
            for p in &state.particles {
                prop_assert!(p.lifetime > 0.0);
            }

            last_score = state.score;
            last_floor = state.floor;
            if state.status == GameStatus::GameOver {
                break;
            }
        }
    }
}

fn playing_state() -> GameState {
    GameState {
        status: GameStatus::Playing,
        ..init_state(Tuning::default(), Level::Hard)
    }
}
