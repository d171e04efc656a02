use crate::error::{GameError, InvalidDirectionValue, MoveError, SettingsError};
use crate::settings::BoardConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

/// A cell on the board.
///
/// `x` grows to the right and `y` grows downwards, so moving North decreases `y`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// The neighbouring cell one step in the given direction.
    ///
    /// Returns `None` if the step leaves the `i32` coordinate space.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        Some(Position {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// Represents the direction the turtle is facing.
///
/// Variants are declared in clockwise order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The direction after a quarter turn clockwise.
    pub fn rotate_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirectionValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            _ => Err(InvalidDirectionValue(value)),
        }
    }
}

impl FromStr for Direction {
    type Err = SettingsError;

    /// Direction names are case sensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "North" => Ok(Direction::North),
            "East" => Ok(Direction::East),
            "South" => Ok(Direction::South),
            "West" => Ok(Direction::West),
            _ => Err(SettingsError::InvalidDirection),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Represents how a sequence of moves ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The turtle ended on the exit.
    Success,
    /// All moves were made but the turtle did not end on the exit.
    StillInDanger,
    /// The turtle tried to leave the board.
    OutOfBounds,
    /// The turtle stepped on a mine.
    MineHit,
    /// The sequence contained something other than `r` or `m`.
    InvalidMove,
}

impl Outcome {
    /// The label shown to players.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Success!",
            Outcome::StillInDanger => "Still in danger!",
            Outcome::OutOfBounds => "Out of Bounds!",
            Outcome::MineHit => "Mine Hit!",
            Outcome::InvalidMove => "Invalid Move!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the turtle is during a single evaluation.
struct Turtle {
    position: Position,
    direction: Direction,
}

impl Turtle {
    /// Applies one command, returning an outcome if the walk has to stop.
    fn apply(&mut self, command: char, board: &BoardConfig) -> Option<Outcome> {
        match command {
            'r' => {
                self.direction = self.direction.rotate_right();
                None
            }
            'm' => {
                let next = match self.position.step(self.direction) {
                    Some(next) if board.contains(next) => next,
                    _ => return Some(Outcome::OutOfBounds),
                };
                if board.is_mine(next) {
                    return Some(Outcome::MineHit);
                }
                self.position = next;
                None
            }
            _ => Some(Outcome::InvalidMove),
        }
    }
}

/// The Turtle Challenge.
/// Main entry point for evaluating move sequences against a board.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    board: BoardConfig,
}

impl Game {
    /// Creates a new game from an already parsed board.
    pub fn new(board: BoardConfig) -> Game {
        Game { board }
    }

    /// Creates a new game from settings text.
    ///
    /// # Arguments
    /// * `settings` - The four settings lines: board size, start, exit and mines.
    pub fn parse(settings: &str) -> Result<Game, SettingsError> {
        Ok(Game::new(BoardConfig::parse(settings)?))
    }

    /// Creates a new game from a settings file.
    ///
    /// # Arguments
    /// * `settings_file` - The path to the file containing the settings.
    pub fn from_file(settings_file: &str) -> Result<Game, GameError> {
        if settings_file.trim().is_empty() {
            return Err(GameError::EmptySettingsPath);
        }

        if !Path::new(settings_file).is_file() {
            return Err(GameError::SettingsNotFound {
                path: settings_file.to_string(),
            });
        }

        let contents = fs::read_to_string(settings_file).map_err(|source| GameError::Io {
            path: settings_file.to_string(),
            source,
        })?;

        Ok(Game::parse(&contents)?)
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Walks the turtle from its starting point through `moves`.
    ///
    /// Stops at the first command that leaves the board, hits a mine or is not
    /// a valid command. Only the outcome is returned; the turtle is discarded.
    ///
    /// # Arguments
    /// * `moves` - A sequence of `r` (rotate right) and `m` (move forward) commands.
    pub fn evaluate_moves(&self, moves: &str) -> Result<Outcome, MoveError> {
        if moves.trim().is_empty() {
            return Err(MoveError::EmptyMoves);
        }

        let mut turtle = Turtle {
            position: self.board.start,
            direction: self.board.start_direction,
        };

        for command in moves.chars() {
            if let Some(outcome) = turtle.apply(command, &self.board) {
                log::debug!("Sequence {:?} stopped at {:?}: {}", moves, command, outcome);
                return Ok(outcome);
            }
            log::trace!(
                "After {:?} turtle is at ({}, {}) facing {}",
                command,
                turtle.position.x,
                turtle.position.y,
                turtle.direction
            );
        }

        let outcome = if turtle.position == self.board.exit {
            Outcome::Success
        } else {
            Outcome::StillInDanger
        };
        log::debug!("Sequence {:?} finished: {}", moves, outcome);

        Ok(outcome)
    }

    /// Draws the board at its starting state.
    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.board.draw(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = "\
        5x4
        x=0, y=1, dir=North
        x=4, y=2
        mines=1,1;1,3;3,3";

    fn game() -> Game {
        Game::parse(SETTINGS).unwrap()
    }

    #[test]
    fn when_rotating_right_the_direction_turns_clockwise() {
        assert_eq!(Direction::North.rotate_right(), Direction::East);
        assert_eq!(Direction::East.rotate_right(), Direction::South);
        assert_eq!(Direction::South.rotate_right(), Direction::West);
        assert_eq!(Direction::West.rotate_right(), Direction::North);
    }

    #[test]
    fn when_rotating_right_four_times_the_direction_is_unchanged() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            let turned = direction
                .rotate_right()
                .rotate_right()
                .rotate_right()
                .rotate_right();
            assert_eq!(turned, direction);
        }
    }

    #[test]
    fn when_converting_a_raw_value_outside_the_cycle_an_error_is_returned() {
        assert_eq!(Direction::try_from(0), Ok(Direction::North));
        assert_eq!(Direction::try_from(3), Ok(Direction::West));
        assert_eq!(Direction::try_from(4), Err(InvalidDirectionValue(4)));
        assert_eq!(
            InvalidDirectionValue(7).to_string(),
            "Invalid direction: 7"
        );
    }

    #[test]
    fn when_parsing_a_direction_name_the_match_is_case_sensitive() {
        assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("East".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("South".parse::<Direction>(), Ok(Direction::South));
        assert_eq!("West".parse::<Direction>(), Ok(Direction::West));
        assert_eq!(
            "north".parse::<Direction>(),
            Err(SettingsError::InvalidDirection)
        );
        assert_eq!("".parse::<Direction>(), Err(SettingsError::InvalidDirection));
    }

    #[test]
    fn when_stepping_a_position_north_y_decreases() {
        let position = Position::new(2, 2);

        assert_eq!(position.step(Direction::North), Some(Position::new(2, 1)));
        assert_eq!(position.step(Direction::East), Some(Position::new(3, 2)));
        assert_eq!(position.step(Direction::South), Some(Position::new(2, 3)));
        assert_eq!(position.step(Direction::West), Some(Position::new(1, 2)));
    }

    #[test]
    fn when_stepping_past_the_coordinate_space_no_position_is_returned() {
        assert_eq!(Position::new(i32::MIN, 0).step(Direction::West), None);
        assert_eq!(Position::new(0, i32::MAX).step(Direction::South), None);
    }

    #[test]
    fn when_the_turtle_reaches_the_exit_the_outcome_is_success() {
        assert_eq!(game().evaluate_moves("mrmmmmrmm"), Ok(Outcome::Success));
    }

    #[test]
    fn when_a_sequence_contains_an_unknown_command_the_outcome_is_invalid_move() {
        assert_eq!(game().evaluate_moves("mxm"), Ok(Outcome::InvalidMove));
        assert_eq!(game().evaluate_moves("M"), Ok(Outcome::InvalidMove));
        assert_eq!(game().evaluate_moves("m "), Ok(Outcome::InvalidMove));
    }

    #[test]
    fn when_a_sequence_stops_early_later_unknown_commands_are_not_read() {
        assert_eq!(game().evaluate_moves("mmx"), Ok(Outcome::OutOfBounds));
        assert_eq!(game().evaluate_moves("rmx"), Ok(Outcome::MineHit));
    }

    #[test]
    fn when_the_turtle_leaves_the_board_the_outcome_is_out_of_bounds() {
        assert_eq!(game().evaluate_moves("mmmmmm"), Ok(Outcome::OutOfBounds));
    }

    #[test]
    fn when_the_turtle_steps_on_a_mine_the_outcome_is_mine_hit() {
        assert_eq!(game().evaluate_moves("rmmmrmmmrm"), Ok(Outcome::MineHit));
    }

    #[test]
    fn when_the_turtle_stops_before_the_exit_the_outcome_is_still_in_danger() {
        assert_eq!(game().evaluate_moves("r"), Ok(Outcome::StillInDanger));
        assert_eq!(game().evaluate_moves("mrm"), Ok(Outcome::StillInDanger));
    }

    #[test]
    fn when_the_sequence_is_empty_an_input_error_is_returned() {
        assert_eq!(game().evaluate_moves(""), Err(MoveError::EmptyMoves));
        assert_eq!(game().evaluate_moves("  \t"), Err(MoveError::EmptyMoves));
    }

    #[test]
    fn when_leaving_the_board_the_bounds_check_comes_before_the_mine_check() {
        let game = Game::parse(
            "\
            2x2
            x=0, y=0, dir=North
            x=1, y=1
            mines=0,-1",
        )
        .unwrap();

        assert_eq!(game.evaluate_moves("m"), Ok(Outcome::OutOfBounds));
    }

    #[test]
    fn when_the_start_is_outside_the_board_the_turtle_can_still_walk_in() {
        let game = Game::parse(
            "\
            3x3
            x=-1, y=0, dir=East
            x=1, y=0
            mines=",
        )
        .unwrap();

        assert_eq!(game.evaluate_moves("r"), Ok(Outcome::StillInDanger));
        assert_eq!(game.evaluate_moves("mm"), Ok(Outcome::Success));
    }

    #[test]
    fn when_starting_on_the_exit_a_sequence_of_rotations_is_a_success() {
        let game = Game::parse(
            "\
            3x3
            x=1, y=1, dir=South
            x=1, y=1
            mines=",
        )
        .unwrap();

        assert_eq!(game.evaluate_moves("rrrr"), Ok(Outcome::Success));
    }

    #[test]
    fn when_evaluating_many_sequences_the_board_is_not_changed() {
        let game = game();
        let before = game.clone();

        for moves in ["mrmmmmrmm", "mxm", "mmmmmm", "rmmmrmmmrm"] {
            game.evaluate_moves(moves).unwrap();
        }

        assert_eq!(game, before);
    }

    #[test]
    fn when_displaying_an_outcome_the_label_is_used() {
        assert_eq!(Outcome::Success.to_string(), "Success!");
        assert_eq!(Outcome::StillInDanger.to_string(), "Still in danger!");
        assert_eq!(Outcome::OutOfBounds.to_string(), "Out of Bounds!");
        assert_eq!(Outcome::MineHit.to_string(), "Mine Hit!");
        assert_eq!(Outcome::InvalidMove.to_string(), "Invalid Move!");
    }

    #[test]
    fn when_loading_from_an_empty_path_an_input_error_is_returned() {
        assert!(matches!(
            Game::from_file(""),
            Err(GameError::EmptySettingsPath)
        ));
        assert!(matches!(
            Game::from_file("   "),
            Err(GameError::EmptySettingsPath)
        ));
    }

    #[test]
    fn when_loading_from_a_missing_file_a_not_found_error_is_returned() {
        let error = Game::from_file("nonexistent.txt").unwrap_err();

        assert!(matches!(error, GameError::SettingsNotFound { .. }));
        assert_eq!(error.to_string(), "Settings file not found.");
    }

    #[test]
    fn when_loading_from_a_file_the_settings_are_parsed() {
        let path = std::env::temp_dir().join(format!(
            "turtle_engine_game_settings_{}.txt",
            std::process::id()
        ));
        fs::write(&path, SETTINGS).unwrap();

        let game = Game::from_file(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(game.board().width, 5);
        assert_eq!(game.evaluate_moves("mrmmmmrmm"), Ok(Outcome::Success));
    }

    #[test]
    fn when_loading_a_file_with_invalid_content_a_format_error_is_returned() {
        let path = std::env::temp_dir().join(format!(
            "turtle_engine_invalid_settings_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "Invalid Content").unwrap();

        let error = Game::from_file(path.to_str().unwrap()).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            error,
            GameError::Settings(SettingsError::InsufficientLines)
        ));
    }
}
