use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{anyhow, ensure, Result};

use crate::breakout::game_object::GameObject;
use crate::breakout::mechanics::{BreakoutMechanics, PaddleDirection, StepOutcome};

/// Read-only copy of the complete game state
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub ball: GameObject,
    pub bat: GameObject,
    pub bricks: Vec<GameObject>,
    pub score: i64,
    pub highscore: i64,
    pub lives: i32,
    pub running: bool,
    pub fast: bool,
}

/// The single shared game state of a session.
///
/// Cloning yields another handle to the same state. Every accessor and every simulation step
/// holds the same exclusive lock, so nobody ever observes a half-updated state.
#[derive(Clone)]
pub struct SharedGame {
    mechanics: Arc<Mutex<BreakoutMechanics>>,
}

impl From<BreakoutMechanics> for SharedGame {
    fn from(mechanics: BreakoutMechanics) -> Self {
        Self {
            mechanics: Arc::new(Mutex::new(mechanics)),
        }
    }
}

impl SharedGame {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(BreakoutMechanics::new(width, height)?.into())
    }

    /// A panicked holder can only have left a step unfinished - readers carry on with what is there
    fn lock(&self) -> MutexGuard<'_, BreakoutMechanics> {
        self.mechanics.lock().unwrap_or_else(|poisoned| {
            log::warn!("game state lock poisoned");
            poisoned.into_inner()
        })
    }

    /// One simulation step as a single atomic unit
    pub fn step(&self) -> Result<StepOutcome> {
        let mut mechanics = self.mechanics.lock()
            .map_err(|_| anyhow!("game state lock poisoned - refusing to continue the simulation"))?;
        mechanics.time_step()
    }

    /// Like [Self::step], but only while the run identified by `generation` is still the running one.
    /// Check and step happen under one lock, so a reinitialization can never slip in between.
    pub fn step_if_current(&self, generation: u64) -> Result<Option<StepOutcome>> {
        let mut mechanics = self.mechanics.lock()
            .map_err(|_| anyhow!("game state lock poisoned - refusing to continue the simulation"))?;
        if !mechanics.running || mechanics.generation != generation {
            return Ok(None);
        }
        mechanics.time_step().map(Some)
    }

    pub fn move_paddle(&self, direction: PaddleDirection) {
        self.lock().move_bat(direction);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let m = self.lock();
        GameSnapshot {
            width: m.width,
            height: m.height,
            ball: m.ball.clone(),
            bat: m.bat.clone(),
            bricks: m.bricks.clone(),
            score: m.score,
            highscore: m.highscore,
            lives: m.lives,
            running: m.running,
            fast: m.fast,
        }
    }

    pub fn ball(&self) -> GameObject { self.lock().ball.clone() }

    pub fn bat(&self) -> GameObject { self.lock().bat.clone() }

    pub fn bricks(&self) -> Vec<GameObject> { self.lock().bricks.clone() }

    pub fn score(&self) -> i64 { self.lock().score }

    pub fn highscore(&self) -> i64 { self.lock().highscore }

    pub fn lives(&self) -> i32 { self.lock().lives }

    pub fn is_running(&self) -> bool { self.lock().running }

    /// `false` makes the game loop exit after its current iteration
    pub fn set_running(&self, value: bool) {
        self.lock().running = value;
    }

    pub fn is_fast(&self) -> bool { self.lock().fast }

    pub fn set_fast(&self, value: bool) {
        self.lock().fast = value;
    }

    pub fn toggle_fast(&self) -> bool {
        let mut m = self.lock();
        m.fast = !m.fast;
        m.fast
    }

    pub fn tick_interval(&self) -> Duration { self.lock().tick_interval() }

    /// Marks the beginning of the one and only run of this session and returns its generation
    pub(crate) fn begin_run(&self) -> Result<u64> {
        let mut m = self.lock();
        ensure!(!m.started, "game already started - reinitialize before starting a new run");
        m.started = true;
        m.running = true;
        Ok(m.generation)
    }

    /// Clears `running`, unless the session was reinitialized since `generation` started
    pub(crate) fn stop_run(&self, generation: u64) {
        let mut m = self.lock();
        if m.generation == generation {
            m.running = false;
        }
    }

    /// Fresh bricks, score and lives. A game loop still alive from before exits without stepping again.
    pub fn reinitialize(&self) {
        let generation = {
            let mut m = self.lock();
            m.reinitialize();
            m.generation
        };
        log::info!("game reinitialized - generation {generation}");
    }
}
