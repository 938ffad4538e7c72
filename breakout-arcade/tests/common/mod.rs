use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::LevelFilter;

use breakout_arcade::breakout::mechanics::{BALL_SIZE, BORDER};
use breakout_arcade::breakout::{BreakoutMechanics, GameEvent};

pub const ARENA_X: i32 = 400;
pub const ARENA_Y: i32 = 600;
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

#[ctor::ctor]
fn init() {
    let _ = env_logger::builder()
        .format_timestamp_secs()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}

/// Ball about to reach the bottom with only one life left
pub fn last_life_mechanics() -> BreakoutMechanics {
    let mut mechanics = BreakoutMechanics::new(ARENA_X, ARENA_Y).unwrap();
    mechanics.lives = 1;
    mechanics.ball.x = 20;
    mechanics.ball.y = ARENA_Y - BORDER - BALL_SIZE - 3;
    mechanics
}

/// Waits until `expected` arrives and returns all events received on the way, including `expected`
pub fn wait_for(events: &Receiver<GameEvent>, expected: GameEvent) -> Vec<GameEvent> {
    let deadline = Instant::now() + EVENT_TIMEOUT;
    let mut received = vec![];
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match events.recv_timeout(remaining) {
            Ok(event) => {
                received.push(event);
                if event == expected {
                    return received;
                }
            }
            Err(RecvTimeoutError::Timeout) => panic!("no {expected:?} within {EVENT_TIMEOUT:?}, got {received:?}"),
            Err(RecvTimeoutError::Disconnected) => panic!("game loop gone before {expected:?}, got {received:?}"),
        }
    }
}
