use std::time::Duration;

use castle_run_core::{
    Command, Direction, EnemyId, Event, HorizontalIntent, LossCause, Outcome, SessionState,
    Tuning,
};
use castle_run_world::{self as world, query, EnemyState, World};

const FRAME: Duration = Duration::from_micros(16_667);

fn ground_world(columns: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureWorld {
            tuning: Tuning::default(),
        },
        &mut events,
    );
    for column in 0..columns {
        world::apply(
            &mut world,
            Command::PlaceTile {
                x: column as f32 * 50.0,
                y: 440.0,
            },
            &mut events,
        );
    }
    world
}

fn run(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn tick(world: &mut World) -> Vec<Event> {
    run(world, [Command::Tick { dt: FRAME }])
}

/// Walks the player right until its left edge reaches `x`.
fn walk_to(world: &mut World, x: f32) {
    let _ = run(
        world,
        [Command::SetHorizontalIntent {
            intent: HorizontalIntent::Right,
        }],
    );
    while query::player(world).rect.x() < x {
        let _ = tick(world);
        assert_eq!(query::session_state(world), SessionState::Running);
    }
    let _ = run(
        world,
        [Command::SetHorizontalIntent {
            intent: HorizontalIntent::Idle,
        }],
    );
}

#[test]
fn jump_from_rest_applies_impulse() {
    let mut world = ground_world(20);
    let start = query::player(&world);
    assert_eq!(start.rect.x(), 50.0);
    assert!(start.grounded);

    let events = run(&mut world, [Command::Jump]);
    assert_eq!(events, vec![Event::PlayerJumped]);
    let airborne = query::player(&world);
    assert_eq!(airborne.velocity_y, -420.0);
    assert!(!airborne.grounded);

    let _ = run(
        &mut world,
        [Command::Tick {
            dt: Duration::from_secs_f64(1.0 / 60.0),
        }],
    );
    let after_tick = query::player(&world);
    assert!(!after_tick.grounded);
    assert!((after_tick.velocity_y - (-420.0 + 900.0 / 60.0)).abs() < 1e-3);
    assert!(after_tick.rect.y() < start.rect.y());
}

#[test]
fn resting_player_stays_put() {
    let mut world = ground_world(20);
    let start = query::player(&world);

    for _ in 0..10 {
        let _ = run(
            &mut world,
            [Command::Tick {
                dt: Duration::from_secs_f64(1.0 / 60.0),
            }],
        );
        let player = query::player(&world);
        assert_eq!(player.rect.x(), start.rect.x());
        assert_eq!(player.rect.y(), start.rect.y());
        assert!(player.grounded);
    }
}

#[test]
fn airborne_step_never_exceeds_velocity_times_dt() {
    for millis in [0_u64, 1, 8, 16, 33, 50, 100] {
        let mut world = World::new();
        let dt = Duration::from_millis(millis);
        let _ = run(&mut world, [Command::Jump]);
        for _ in 0..20 {
            let before = query::player(&world);
            let _ = run(&mut world, [Command::Tick { dt }]);
            if query::session_state(&world).is_over() {
                break;
            }
            let after = query::player(&world);
            let step = (after.rect.y() - before.rect.y()).abs();
            let bound = after.velocity_y.abs() * dt.as_secs_f32();
            assert!(
                step <= bound + 1e-3,
                "dt={millis}ms moved {step} with bound {bound}"
            );
        }
    }
}

/// Jumps in place and, once the player starts descending, spawns an enemy
/// directly underneath it.
fn drop_onto_enemy(world: &mut World) {
    let _ = run(world, [Command::Jump]);
    while query::player(world).velocity_y <= 0.0 {
        let _ = tick(world);
    }
    let x = query::player(world).rect.x();
    let _ = run(
        world,
        [Command::SpawnEnemy {
            x,
            ground_y: 440.0,
            direction: Direction::Right,
        }],
    );
}

#[test]
fn spawned_enemy_on_the_ground_is_grounded_before_any_tick() {
    let mut world = ground_world(20);
    let _ = run(
        &mut world,
        [
            Command::SpawnEnemy {
                x: 600.0,
                ground_y: 440.0,
                direction: Direction::Left,
            },
            Command::SpawnEnemy {
                x: 700.0,
                ground_y: 300.0,
                direction: Direction::Right,
            },
        ],
    );

    let states: Vec<_> = query::enemy_view(&world)
        .into_vec()
        .into_iter()
        .map(|enemy| enemy.state)
        .collect();
    assert_eq!(states, vec![EnemyState::Grounded, EnemyState::Falling]);
    assert_eq!(query::tick_index(&world), 0);
}

#[test]
fn stomping_kills_enemy_and_bounces_player() {
    let mut world = ground_world(20);
    drop_onto_enemy(&mut world);

    let mut stomp = None;
    for _ in 0..120 {
        let events = tick(&mut world);
        if let Some(event) = events
            .iter()
            .find(|event| matches!(event, Event::EnemyStomped { .. }))
        {
            stomp = Some(event.clone());
            break;
        }
        assert_eq!(query::session_state(&world), SessionState::Running);
    }

    assert_eq!(
        stomp,
        Some(Event::EnemyStomped {
            enemy: EnemyId::new(0),
            score: 200,
        })
    );
    assert_eq!(query::session_state(&world), SessionState::Running);
    assert_eq!(query::player(&world).velocity_y, -210.0);
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.state, EnemyState::Dead);
}

#[test]
fn dead_enemy_never_moves_collides_or_scores_again() {
    let mut world = ground_world(20);
    drop_onto_enemy(&mut world);
    while query::enemy_view(&world).alive().count() > 0 {
        let _ = tick(&mut world);
        assert_eq!(query::session_state(&world), SessionState::Running);
    }
    let corpse = query::enemy_view(&world).into_vec()[0];
    let score = query::player(&world).score;

    for _ in 0..180 {
        let events = tick(&mut world);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::EnemyStomped { .. })));
    }

    let player = query::player(&world);
    assert!(player.grounded);
    assert!(player.rect.intersects(&corpse.rect));
    assert_eq!(query::session_state(&world), SessionState::Running);
    assert_eq!(query::enemy_view(&world).into_vec()[0], corpse);
    assert_eq!(player.score, score);
}

#[test]
fn walking_into_enemy_loses_in_same_frame() {
    let mut world = ground_world(20);
    let _ = run(
        &mut world,
        [
            Command::SpawnEnemy {
                x: 300.0,
                ground_y: 440.0,
                direction: Direction::Left,
            },
            Command::SetHorizontalIntent {
                intent: HorizontalIntent::Right,
            },
        ],
    );

    let mut contact_frame = None;
    for frame in 0..300 {
        let player = query::player(&world).rect;
        let enemy = query::enemy_view(&world).into_vec()[0].rect;
        let events = tick(&mut world);
        if query::session_state(&world).is_over() {
            contact_frame = Some(frame);
            assert_eq!(
                events.last(),
                Some(&Event::SessionEnded {
                    outcome: Outcome::Lost(LossCause::EnemyContact),
                    score: 0,
                })
            );
            assert!(player.right() + 5.0 > enemy.x());
            break;
        }
    }

    assert!(contact_frame.is_some());
    assert_eq!(
        query::session_state(&world),
        SessionState::Lost(LossCause::EnemyContact)
    );
}

#[test]
fn falling_off_the_screen_loses() {
    let mut world = World::new();
    let mut ended = Vec::new();
    for _ in 0..120 {
        ended.extend(
            tick(&mut world)
                .into_iter()
                .filter(|event| matches!(event, Event::SessionEnded { .. })),
        );
    }

    assert_eq!(
        ended,
        vec![Event::SessionEnded {
            outcome: Outcome::Lost(LossCause::Fell),
            score: 0,
        }]
    );
    assert!(query::player(&world).rect.y() > 480.0);
}

#[test]
fn passing_the_goal_wins_exactly_once() {
    let mut world = ground_world(20);
    let _ = run(
        &mut world,
        [
            Command::PlaceGoal { x: 0.0 },
            Command::SetHorizontalIntent {
                intent: HorizontalIntent::Right,
            },
        ],
    );

    let mut endings = 0;
    for _ in 0..30 {
        endings += tick(&mut world)
            .iter()
            .filter(|event| matches!(event, Event::SessionEnded { .. }))
            .count();
        if query::session_state(&world).is_over() {
            break;
        }
    }
    assert_eq!(endings, 1);
    assert_eq!(query::session_state(&world), SessionState::Won);
    assert!(query::player(&world).rect.x() > 80.0);

    let frozen_player = query::player(&world);
    let frozen_tick = query::tick_index(&world);
    for _ in 0..10 {
        let events = run(&mut world, [Command::Jump, Command::Tick { dt: FRAME }]);
        assert!(events.is_empty());
    }
    assert_eq!(query::player(&world), frozen_player);
    assert_eq!(query::tick_index(&world), frozen_tick);
    assert_eq!(query::session_state(&world), SessionState::Won);
}

#[test]
fn coins_score_once_each() {
    let mut world = ground_world(20);
    let _ = run(
        &mut world,
        [
            Command::PlaceCoin { x: 200.0, y: 420.0 },
            Command::PlaceCoin { x: 200.0, y: 100.0 },
        ],
    );
    walk_to(&mut world, 300.0);
    let _ = run(
        &mut world,
        [Command::SetHorizontalIntent {
            intent: HorizontalIntent::Left,
        }],
    );
    for _ in 0..120 {
        let _ = tick(&mut world);
    }

    let coins = query::coin_view(&world).into_vec();
    assert!(coins[0].collected);
    assert!(!coins[1].collected);
    assert_eq!(query::player(&world).score, 100);
    assert_eq!(query::coin_view(&world).uncollected().count(), 1);
}

#[test]
fn player_and_camera_stay_inside_world_bounds() {
    let mut world = ground_world(120);
    let tuning = query::tuning(&world).clone();
    let _ = run(
        &mut world,
        [Command::SetHorizontalIntent {
            intent: HorizontalIntent::Left,
        }],
    );
    for _ in 0..30 {
        let _ = tick(&mut world);
        assert_eq!(query::camera_offset(&world), 0.0);
        assert!(query::player(&world).rect.x() >= 0.0);
    }
    assert_eq!(query::player(&world).rect.x(), 0.0);

    let _ = run(
        &mut world,
        [Command::SetHorizontalIntent {
            intent: HorizontalIntent::Right,
        }],
    );
    for _ in 0..3_000 {
        let _ = run(&mut world, [Command::Tick { dt: FRAME }]);
        let player = query::player(&world);
        assert!(player.rect.x() <= tuning.player_max_x());
        let offset = query::camera_offset(&world);
        assert!((0.0..=tuning.camera_max_offset()).contains(&offset));
    }
}
