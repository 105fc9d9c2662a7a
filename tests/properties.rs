//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use brickfall::GameConfig;
use brickfall::sim::{
    Ball, BallState, Circle, Command, Contact, GameState, Side, resolve_walls, tick,
};

const W: f32 = 640.0;
const H: f32 = 480.0;
const R: f32 = 10.0;

fn commands() -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec((0u8..5).prop_map(Command::from_code), 1..600)
}

/// Mostly launches and moves, so balls actually fly
fn launched_commands() -> impl Strategy<Value = Vec<Command>> {
    commands().prop_map(|mut cmds| {
        cmds.insert(0, Command::Launch);
        cmds
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wall_reflection_preserves_speed(
        x in R..=(W - R),
        y in R..=(H - R),
        vx in -8.0f32..8.0,
        vy in -8.0f32..8.0,
    ) {
        let tentative = Ball {
            body: Circle::new(Vec2::new(x + vx, y + vy), R),
            vel: Vec2::new(vx, vy),
            state: BallState::Free,
        };
        let res = resolve_walls(tentative, W, H);
        let pos = tentative.center();

        let crossed_x = pos.x - R <= 0.0 || pos.x + R >= W;
        let crossed_y = pos.y - R <= 0.0 || pos.y + R >= H;
        prop_assert_eq!(res.ball.vel.x, if crossed_x { -vx } else { vx });
        prop_assert_eq!(res.ball.vel.y, if crossed_y { -vy } else { vy });
        prop_assert_eq!(res.floor_hit, pos.y + R >= H && pos.y - R > 0.0);

        let c = res.ball.center();
        prop_assert!(c.x >= R && c.x <= W - R, "x {} out of bounds", c.x);
        prop_assert!(c.y >= R && c.y <= H - R, "y {} out of bounds", c.y);
    }

    #[test]
    fn side_table_is_consistent(
        x_dist in -20.0f32..20.0,
        y_dist in -20.0f32..20.0,
        vx in -5.0f32..5.0,
        vy in -5.0f32..5.0,
    ) {
        let vel = Vec2::new(vx, vy);
        let side = Side::classify(vel, x_dist, y_dist);
        prop_assert_eq!(side, Side::classify(vel, x_dist, y_dist));
        prop_assert_eq!(side == Side::Corner, x_dist == y_dist);
        if vx < 0.0 {
            prop_assert_ne!(side, Side::Left);
        } else {
            prop_assert_ne!(side, Side::Right);
        }
        if vy < 0.0 {
            prop_assert_ne!(side, Side::Top);
        } else {
            prop_assert_ne!(side, Side::Bottom);
        }
    }

    #[test]
    fn paddle_stays_in_field(seed in any::<u64>(), cmds in commands()) {
        let mut state = GameState::new(GameConfig::default(), seed);
        for cmd in cmds {
            tick(&mut state, cmd);
            prop_assert!(state.paddle.rect.x0 >= 0.0);
            prop_assert!(state.paddle.rect.x1 <= W);
            prop_assert_eq!(state.paddle.rect.width(), 60.0);
        }
    }

    #[test]
    fn blocks_only_shrink(seed in any::<u64>(), cmds in launched_commands()) {
        let mut config = GameConfig::default();
        config.layout.durability_max = 3;
        let mut state = GameState::new(config, seed);

        for cmd in cmds {
            let before = state.blocks.clone();
            let out = tick(&mut state, cmd);
            let after = &state.blocks;

            prop_assert!(after.len() <= before.len());
            match out.contact {
                Some(Contact::Block { index, destroyed: true, .. }) => {
                    prop_assert_eq!(before[index].durability, 1);
                    prop_assert_eq!(after.len() + 1, before.len());
                }
                Some(Contact::Block { index, destroyed: false, .. }) => {
                    prop_assert_eq!(after.len(), before.len());
                    prop_assert_eq!(after[index].rect, before[index].rect);
                    prop_assert_eq!(after[index].durability + 1, before[index].durability);
                }
                _ => {
                    prop_assert_eq!(after, &before);
                }
            }
        }
    }

    #[test]
    fn ball_stays_inside_walls(seed in any::<u64>(), cmds in launched_commands()) {
        let mut state = GameState::new(GameConfig::default(), seed);
        for cmd in cmds {
            tick(&mut state, cmd);
            let c = state.ball.center();
            prop_assert!(c.x >= R && c.x <= W - R, "x {}", c.x);
            prop_assert!(c.y >= R, "y {}", c.y);
        }
    }

    #[test]
    fn episodes_are_reproducible(seed in any::<u64>(), cmds in launched_commands()) {
        let mut a = GameState::new(GameConfig::default(), seed);
        let mut b = GameState::new(GameConfig::default(), seed);
        prop_assert_eq!(&a.blocks, &b.blocks);

        for cmd in cmds {
            let out_a = tick(&mut a, cmd);
            let out_b = tick(&mut b, cmd);
            prop_assert_eq!(out_a, out_b);
            prop_assert_eq!(a.ball, b.ball);
        }
        prop_assert_eq!(&a.blocks, &b.blocks);
        prop_assert_eq!(a.score, b.score);
    }
}
