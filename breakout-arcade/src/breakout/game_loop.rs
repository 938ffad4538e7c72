use std::any::Any;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

use anyhow::{anyhow, Context, Result};

use crate::breakout::game_state::SharedGame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// sent after every step, once the state is consistent again
    StateChanged,
    Won,
    Lost,
}

/// Receives the game loop notifications on the game loop thread.
///
/// Implementations must hand the event over to whoever owns the presentation
/// (e.g. a channel or a repaint request) instead of rendering on the calling thread.
pub trait GameObserver: Send {
    fn notify(&self, event: GameEvent);
}

impl<F> GameObserver for F
    where F: Fn(GameEvent) + Send
{
    fn notify(&self, event: GameEvent) {
        self(event)
    }
}

/// Forwards every event into a channel
pub struct ChannelObserver(Sender<GameEvent>);

impl ChannelObserver {
    pub fn new(sender: Sender<GameEvent>) -> Self {
        Self(sender)
    }
}

impl GameObserver for ChannelObserver {
    fn notify(&self, event: GameEvent) {
        // receiver gone means nobody is interested anymore
        let _ = self.0.send(event);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopConfig {
    /// Stop the loop after a win or loss was signalled.
    /// Off by default - the ball keeps bouncing after the game has ended.
    pub stop_on_game_over: bool,
}

/// Drives the simulation on a dedicated thread: step, notify, sleep - until `running` is cleared
pub struct GameLoop<O> {
    game: SharedGame,
    observer: O,
    config: LoopConfig,
}

impl<O: GameObserver + 'static> GameLoop<O> {
    pub fn new(game: SharedGame, observer: O) -> Self {
        Self { game, observer, config: LoopConfig::default() }
    }

    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start(self) -> Result<GameLoopHandle> {
        let generation = self.game.begin_run()?;
        let game = self.game.clone();
        let spawned = thread::Builder::new()
            .name("breakout-mechanics".to_string())
            .spawn(move || self.run(generation));
        match spawned {
            Ok(join_handle) => Ok(GameLoopHandle { game, generation, join_handle }),
            Err(e) => {
                game.stop_run(generation);
                Err(e).context("failed to spawn the game loop thread")
            }
        }
    }

    fn run(self, generation: u64) {
        log::info!("game loop started - generation {generation}");
        let game = self.game.clone();
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.run_ticks(generation))) {
            log::error!("game loop terminated by a panic: {}", panic_message(payload.as_ref()));
            game.stop_run(generation);
            panic::resume_unwind(payload);
        }
        log::info!("game loop stopped - score: {}", game.score());
    }

    fn run_ticks(&self, generation: u64) {
        loop {
            let outcome = match self.game.step_if_current(generation) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => break,
                Err(e) => {
                    log::error!("game loop terminated: {e:#}");
                    self.game.stop_run(generation);
                    break;
                }
            };

            self.observer.notify(GameEvent::StateChanged);
            if outcome.won {
                self.observer.notify(GameEvent::Won);
            }
            if outcome.lost {
                self.observer.notify(GameEvent::Lost);
            }
            if self.config.stop_on_game_over && (outcome.won || outcome.lost) {
                self.game.stop_run(generation);
                break;
            }

            thread::sleep(self.game.tick_interval());
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload.downcast_ref::<&str>().copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

pub struct GameLoopHandle {
    game: SharedGame,
    generation: u64,
    join_handle: JoinHandle<()>,
}

impl GameLoopHandle {
    /// The loop finishes its current iteration before it exits.
    /// Has no effect on a newer run started after a reinitialization.
    pub fn stop(&self) {
        self.game.stop_run(self.generation);
    }

    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }

    /// By the time the thread has finished, its run is no longer marked as running - panicked or not
    pub fn join(self) -> Result<()> {
        self.join_handle.join()
            .map_err(|_| anyhow!("game loop thread panicked"))
    }
}
