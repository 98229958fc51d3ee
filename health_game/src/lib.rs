mod game;
mod health;
mod player;

pub use game::{
    game_loop, random_damage, run, run_with, shutdown_channel, ui_loop, GameError, Outcome, Shutdown,
    ShutdownTrigger, DAMAGE_INTERVAL, MAX_DAMAGE, REPORT_INTERVAL,
};
pub use health::{AtomicHealth, RwLockHealth, SharedHealth, INITIAL_HEALTH};
pub use player::Player;
