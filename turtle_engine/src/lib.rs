//! # turtle_engine
//!
//! The core engine for the Turtle Challenge.
//! A turtle walks a board of mines towards an exit, following sequences of
//! `r` (rotate right) and `m` (move forward) commands.

pub mod error;
pub mod game;
pub mod runner;
pub mod settings;

pub use error::GameError;
pub use error::MoveError;
pub use error::SettingsError;
pub use game::Direction;
pub use game::Game;
pub use game::Outcome;
pub use game::Position;
pub use report::ReportFormat;
pub use settings::BoardConfig;

mod entities;
mod report;
