use std::time::{Duration, Instant};

use wrap_snake::config::GameRules;
use wrap_snake::game::GameSession;
use wrap_snake::grid::Cell;
use wrap_snake::input::Direction;
use wrap_snake::snake::SnakeStatus;

/// Fresh session reset at `start` whose only goals are `goals`.
fn session_with_goals(start: Instant, goals: &[Cell]) -> GameSession {
    let mut session =
        GameSession::with_seed(GameRules::default(), 42).expect("default rules are valid");
    session.request_reset_at(start).expect("reset should succeed");
    replace_goals(&mut session, goals);
    session
}

fn replace_goals(session: &mut GameSession, goals: &[Cell]) {
    session.world_mut().clear();
    for goal in goals {
        session
            .world_mut()
            .place_food(*goal)
            .expect("goal placement should succeed");
    }
}

#[test]
fn stepwise_collection_wraparound_and_self_collision() {
    let start = Instant::now();
    let mut session = session_with_goals(
        start,
        &[Cell::new(13, 7), Cell::new(14, 7), Cell::new(15, 7)],
    );

    // Head (12, 7) moves right onto the first goal 1.5 s in: 80 points.
    let now = start + Duration::from_millis(1500);
    assert_eq!(session.tick_at(now), SnakeStatus::Scored);
    assert!((session.score() - 80.0).abs() < 1e-9);
    assert_eq!(
        session.body_segments(),
        vec![Cell::new(12, 8), Cell::new(12, 7), Cell::new(13, 7)]
    );

    // The next two goals are reached instantly and are worth full value.
    assert_eq!(session.tick_at(now), SnakeStatus::Scored);
    assert_eq!(session.tick_at(now), SnakeStatus::Scored);
    assert!((session.score() - 280.0).abs() < 1e-9);
    assert_eq!(session.body_segments().len(), 5);
    assert_eq!(session.speed(), 7.5);

    // Park the respawned goal away from the remaining path.
    replace_goals(&mut session, &[Cell::new(0, 0)]);

    // Nine more steps right wrap the head past x = 23 back to x = 0.
    for _ in 0..9 {
        assert_eq!(session.tick_at(now), SnakeStatus::Normal);
    }
    assert_eq!(session.snake().head(), Cell::new(0, 7));
    assert_eq!(session.body_segments().len(), 5);

    // Queued turns start after the move already in the queue.
    assert!(session.request_direction(Direction::Up));
    assert!(session.request_direction(Direction::Left));
    assert!(session.request_direction(Direction::Down));

    assert_eq!(session.tick_at(now), SnakeStatus::Normal);
    assert_eq!(session.snake().head(), Cell::new(1, 7));
    assert_eq!(session.tick_at(now), SnakeStatus::Normal);
    assert_eq!(session.snake().head(), Cell::new(1, 6));
    assert_eq!(session.tick_at(now), SnakeStatus::Normal);
    assert_eq!(session.snake().head(), Cell::new(0, 6));

    // Down lands on (0, 7), still part of the five-cell body.
    assert_eq!(session.tick_at(now), SnakeStatus::JustDied);
    assert!(session.take_just_died());
    assert!(!session.is_over());

    assert_eq!(session.tick_at(now), SnakeStatus::GameOver);
    assert!(session.is_over());
    let frozen = session.body_segments();
    assert_eq!(session.tick_at(now), SnakeStatus::GameOver);
    assert_eq!(session.body_segments(), frozen);

    session.request_reset_at(now).expect("reset should succeed");
    assert_eq!(session.status(), SnakeStatus::Normal);
    assert_eq!(session.score(), 0.0);
    assert_eq!(session.speed(), 6.0);
    assert_eq!(
        session.body_segments(),
        vec![Cell::new(12, 8), Cell::new(12, 7)]
    );
    assert_eq!(session.goal_cells().len(), 1);
}

#[test]
fn length_is_stable_on_plain_moves_and_grows_on_goals() {
    let start = Instant::now();
    let mut session = session_with_goals(start, &[Cell::new(20, 3)]);

    let mut previous = session.body_segments().len();
    for step in 0..200u64 {
        if step % 7 == 0 {
            let turn = if step % 14 == 0 {
                Direction::Up
            } else {
                Direction::Right
            };
            session.request_direction(turn);
        }

        let status = session.tick_at(start + Duration::from_millis(step * 50));
        let length = session.body_segments().len();
        match status {
            SnakeStatus::Normal => assert_eq!(length, previous),
            SnakeStatus::Scored => assert_eq!(length, previous + 1),
            SnakeStatus::JustDied | SnakeStatus::GameOver => break,
        }
        previous = length;

        let body = session.body_segments();
        assert!(session.goal_cells().iter().all(|goal| !body.contains(goal)));
        assert!(session.score() >= 0.0);
    }
}
