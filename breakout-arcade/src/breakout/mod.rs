pub mod app_game_drawer;
pub mod game_loop;
pub mod game_object;
pub mod game_state;
pub mod mechanics;

pub use game_loop::{ChannelObserver, GameEvent, GameLoop, GameLoopHandle, GameObserver, LoopConfig};
pub use game_object::{GameObject, ObjectColor};
pub use game_state::{GameSnapshot, SharedGame};
pub use mechanics::{BreakoutMechanics, PaddleDirection, StepOutcome};
