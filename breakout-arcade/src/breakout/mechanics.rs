use std::time::Duration;

use anyhow::{ensure, Result};
use itertools::iproduct;

use crate::breakout::game_object::{GameObject, ObjectColor};

/// Border round the edge of the arena
pub const BORDER: i32 = 6;
/// Height of the menu band at the top, the ball never enters it
pub const MENU_HEIGHT: i32 = 40;

pub const BALL_SIZE: i32 = 16;
pub const BRICK_WIDTH: i32 = 40;
pub const BRICK_HEIGHT: i32 = 20;
pub const BAT_WIDTH: i32 = BRICK_WIDTH * 3;
pub const BAT_HEIGHT: i32 = BRICK_HEIGHT / 4;
/// distance between the bat's top edge and the bottom of the arena
const BAT_DISTANCE_BOTTOM: i32 = BRICK_HEIGHT * 3 / 2;

/// Distance the bat moves on each command
pub const BAT_MOVE: i32 = 15;
/// Distance the ball moves per axis on each step
pub const BALL_MOVE: i32 = 4;

pub const HIT_BRICK: i64 = 100;
pub const HIT_BOTTOM: i64 = -100;
pub const LIVES: i32 = 5;

/// top y and color of each brick row
const BRICK_ROWS: [(i32, ObjectColor); 4] = [
    (100, ObjectColor::Blue),
    (125, ObjectColor::Green),
    (150, ObjectColor::Yellow),
    (175, ObjectColor::Orange),
];

/// score at which fast mode kicks in
pub const FAST_MODE_SCORE: i64 = 4000;
/// highscore at which fast mode is switched off again
pub const NORMAL_MODE_HIGHSCORE: i64 = 5900;
pub const WIN_HIGHSCORE: i64 = 6000;

pub const TICK_INTERVAL: Duration = Duration::from_millis(20);
pub const FAST_TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddleDirection {
    Left,
    Right,
}

impl PaddleDirection {
    pub fn sign(self) -> i32 {
        match self {
            PaddleDirection::Left => -1,
            PaddleDirection::Right => 1,
        }
    }
}

/// What happened during one time step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub bricks_hit: usize,
    pub bottom_hit: bool,
    /// set only on the step which first detected the win
    pub won: bool,
    /// set only on the step which first detected the loss
    pub lost: bool,
}

/// The complete game model. Not synchronized on its own - see [crate::breakout::game_state::SharedGame]
#[derive(Clone, Debug)]
pub struct BreakoutMechanics {
    pub width: i32,
    pub height: i32,
    pub ball: GameObject,
    pub bat: GameObject,
    /// fixed at initialization, bricks only get hidden
    pub bricks: Vec<GameObject>,
    pub score: i64,
    pub highscore: i64,
    pub lives: i32,
    pub running: bool,
    pub fast: bool,
    pub started: bool,
    /// bumped by every reinitialization, a game loop only steps the run it was started for
    pub generation: u64,
    won_signalled: bool,
    lost_signalled: bool,
}

impl BreakoutMechanics {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        ensure!(width > 0 && height > 0, "arena dimensions must be positive, got {width}x{height}");
        Ok(Self {
            width,
            height,
            ball: Self::initial_ball(width, height),
            bat: Self::initial_bat(width, height),
            bricks: Self::initial_bricks(width),
            score: 0,
            highscore: 0,
            lives: LIVES,
            running: false,
            fast: false,
            started: false,
            generation: 0,
            won_signalled: false,
            lost_signalled: false,
        })
    }

    /// Reset score, lives and flags and recreate ball, bat and bricks for a new session
    pub fn reinitialize(&mut self) {
        *self = Self {
            width: self.width,
            height: self.height,
            ball: Self::initial_ball(self.width, self.height),
            bat: Self::initial_bat(self.width, self.height),
            bricks: Self::initial_bricks(self.width),
            score: 0,
            highscore: 0,
            lives: LIVES,
            running: false,
            fast: false,
            started: false,
            generation: self.generation.wrapping_add(1),
            won_signalled: false,
            lost_signalled: false,
        };
    }

    fn initial_ball(width: i32, height: i32) -> GameObject {
        GameObject::new(width / 2, height / 2, BALL_SIZE, BALL_SIZE, ObjectColor::Red)
    }

    fn initial_bat(width: i32, height: i32) -> GameObject {
        GameObject::new(width / 2, height - BAT_DISTANCE_BOTTOM, BAT_WIDTH, BAT_HEIGHT, ObjectColor::Grey)
    }

    /// rows top to bottom, each row left to right
    fn initial_bricks(width: i32) -> Vec<GameObject> {
        let bricks_per_row = width / BRICK_WIDTH;
        iproduct!(BRICK_ROWS, 0..bricks_per_row)
            .map(|((top_y, color), i)| GameObject::new(BRICK_WIDTH * i, top_y, BRICK_WIDTH, BRICK_HEIGHT, color))
            .collect()
    }

    pub fn tick_interval(&self) -> Duration {
        match self.fast {
            true => FAST_TICK_INTERVAL,
            false => TICK_INTERVAL,
        }
    }

    /// Moves the bat one fixed distance, never beyond the borders.
    /// A move towards a border the bat already touches is ignored.
    pub fn move_bat(&mut self, direction: PaddleDirection) {
        let blocked = match direction {
            PaddleDirection::Left => self.bat.x <= BORDER,
            PaddleDirection::Right => self.bat.right() >= self.width - BORDER,
        };
        if blocked {
            log::trace!("move bat {direction:?}: blocked at x={}", self.bat.x);
            return;
        }
        self.bat.set_direction_x(direction.sign());
        self.bat.move_by(BAT_MOVE, 0);
        self.bat.x = self.bat.x.min(self.width - BORDER - self.bat.width()).max(BORDER);
        log::trace!("move bat {direction:?}: x={}", self.bat.x);
    }

    /// physically move one time step forward
    pub fn time_step(&mut self) -> Result<StepOutcome> {
        let mut outcome = StepOutcome::default();

        self.ball.try_move_by(BALL_MOVE, BALL_MOVE)?;
        self.check_wall_collisions(&mut outcome);
        self.clamp_bat();
        self.check_brick_collisions(&mut outcome);

        if self.ball.collides_with(&self.bat) {
            self.ball.reverse_direction_y();
        }

        self.adjust_speed();
        self.check_game_end_situation(&mut outcome);
        Ok(outcome)
    }

    fn check_wall_collisions(&mut self, outcome: &mut StepOutcome) {
        let (x, y) = (self.ball.x, self.ball.y);

        if x >= self.width - BORDER - BALL_SIZE {
            self.ball.reverse_direction_x();
        }
        if x <= BORDER {
            self.ball.reverse_direction_x();
        }

        if y >= self.height - BORDER - BALL_SIZE {
            self.ball.reverse_direction_y();
            self.score = self.score.saturating_add(HIT_BOTTOM);
            self.lives = (self.lives - 1).max(0);
            outcome.bottom_hit = true;
            log::debug!("ball hit the bottom: score={}, lives={}", self.score, self.lives);
        }
        if y <= MENU_HEIGHT {
            self.ball.reverse_direction_y();
        }
    }

    /// the bat halts at the borders and waits for new input - it does not bounce
    fn clamp_bat(&mut self) {
        if self.bat.x <= BORDER {
            self.bat.x = BORDER;
            self.bat.stop_horizontal_motion();
        } else if self.bat.right() >= self.width - BORDER {
            self.bat.x = self.width - BORDER - self.bat.width();
            self.bat.stop_horizontal_motion();
        }
    }

    /// Hits on several bricks within the same step reflect the ball only once
    fn check_brick_collisions(&mut self, outcome: &mut StepOutcome) {
        let ball = &self.ball;
        for brick in self.bricks.iter_mut().filter(|b| b.is_visible()) {
            if ball.collides_with(brick) {
                brick.hide();
                outcome.bricks_hit += 1;
            }
        }

        if outcome.bricks_hit > 0 {
            let award = HIT_BRICK * outcome.bricks_hit as i64;
            self.score = self.score.saturating_add(award);
            self.highscore = self.highscore.saturating_add(award);
            self.ball.reverse_direction_y();
            log::debug!("{} brick(s) hit: score={}, highscore={}", outcome.bricks_hit, self.score, self.highscore);
        }
    }

    /// enabled by score, disabled by highscore
    fn adjust_speed(&mut self) {
        if self.score >= FAST_MODE_SCORE {
            self.fast = true;
        }
        if self.highscore >= NORMAL_MODE_HIGHSCORE {
            self.fast = false;
        }
    }

    fn all_bricks_cleared(&self) -> bool {
        !self.bricks.is_empty() && self.bricks.iter().all(|b| !b.is_visible())
    }

    fn check_game_end_situation(&mut self, outcome: &mut StepOutcome) {
        if !self.won_signalled && (self.highscore >= WIN_HIGHSCORE || self.all_bricks_cleared()) {
            self.won_signalled = true;
            outcome.won = true;
            log::info!("all bricks destroyed - score: {}", self.score);
        }
        if !self.lost_signalled && self.lives == 0 {
            self.lost_signalled = true;
            outcome.lost = true;
            log::info!("all lives lost - score: {}", self.score);
        }
    }
}
