use crate::entities::Entity;
use crate::error::SettingsError;
use crate::game::{Direction, Position};
use crossterm::{
    queue,
    style::{Color, Print, SetForegroundColor},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::LazyLock;

static BOARD_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^x]*)x([^x]*)$").expect("board size pattern is valid"));

static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^=]*=([^=]*)").expect("field pattern is valid"));

/// The board a game is played on.
///
/// Start, exit and mines are not checked against the board bounds; they only
/// matter if the turtle walks onto them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub start: Position,
    pub start_direction: Direction,
    pub exit: Position,
    pub mines: HashSet<Position>,
}

impl BoardConfig {
    /// Parses the settings text.
    ///
    /// Blank lines are skipped and lines after the fourth are ignored. The
    /// remaining lines are, in order:
    ///
    /// ```text
    /// 5x4
    /// x=0, y=1, dir=North
    /// x=4, y=2
    /// mines=1,1;1,3;3,3
    /// ```
    pub fn parse(settings: &str) -> Result<BoardConfig, SettingsError> {
        let lines: Vec<&str> = settings
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < 4 {
            return Err(SettingsError::InsufficientLines);
        }

        let (width, height) = parse_board_size(lines[0])?;
        let (start, start_direction) = parse_start(lines[1])?;
        let exit = parse_exit(lines[2])?;
        let mines = parse_mines(lines[3])?;

        log::debug!(
            "Parsed {}x{} board, start ({}, {}) facing {}, exit ({}, {}), {} mines",
            width,
            height,
            start.x,
            start.y,
            start_direction,
            exit.x,
            exit.y,
            mines.len()
        );

        Ok(BoardConfig {
            width,
            height,
            start,
            start_direction,
            exit,
            mines,
        })
    }

    /// Whether the position lies within `[0, width) x [0, height)`.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub fn is_mine(&self, position: Position) -> bool {
        self.mines.contains(&position)
    }

    /// Draws the board with the turtle at its starting position.
    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let entity = self.entity_at(Position::new(x, y));
                queue!(
                    out,
                    SetForegroundColor(entity.map_or(Color::Reset, |entity| entity.color())),
                    Print(entity.map_or('.', |entity| entity.char())),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            queue!(out, Print("\n"))?;
        }

        out.flush()
    }

    fn entity_at(&self, position: Position) -> Option<Entity> {
        // The turtle is drawn over whatever it starts on
        if position == self.start {
            Some(Entity::Turtle(self.start_direction))
        } else if self.is_mine(position) {
            Some(Entity::Mine)
        } else if position == self.exit {
            Some(Entity::Exit)
        } else {
            None
        }
    }
}

fn parse_board_size(line: &str) -> Result<(i32, i32), SettingsError> {
    let captures = BOARD_SIZE
        .captures(line)
        .ok_or(SettingsError::InvalidBoardSize)?;

    let width = parse_int(&captures[1]).ok_or(SettingsError::InvalidBoardSize)?;
    let height = parse_int(&captures[2]).ok_or(SettingsError::InvalidBoardSize)?;

    if width <= 0 || height <= 0 {
        return Err(SettingsError::InvalidBoardSize);
    }

    Ok((width, height))
}

fn parse_start(line: &str) -> Result<(Position, Direction), SettingsError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(SettingsError::InvalidStartFormat);
    }

    let x = field_value(fields[0]).ok_or(SettingsError::InvalidStartFormat)?;
    let y = field_value(fields[1]).ok_or(SettingsError::InvalidStartFormat)?;
    let x = parse_int(x).ok_or(SettingsError::InvalidStartCoordinates)?;
    let y = parse_int(y).ok_or(SettingsError::InvalidStartCoordinates)?;

    let direction = field_value(fields[2])
        .ok_or(SettingsError::InvalidStartFormat)?
        .trim()
        .parse::<Direction>()?;

    Ok((Position::new(x, y), direction))
}

fn parse_exit(line: &str) -> Result<Position, SettingsError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 2 {
        return Err(SettingsError::InvalidExitFormat);
    }

    let x = field_value(fields[0])
        .and_then(parse_int)
        .ok_or(SettingsError::InvalidExitFormat)?;
    let y = field_value(fields[1])
        .and_then(parse_int)
        .ok_or(SettingsError::InvalidExitFormat)?;

    Ok(Position::new(x, y))
}

fn parse_mines(line: &str) -> Result<HashSet<Position>, SettingsError> {
    let (_, mines) = line
        .split_once('=')
        .ok_or(SettingsError::InvalidMineFormat)?;
    let mines = mines.trim();

    if mines.is_empty() {
        return Ok(HashSet::new());
    }

    mines.split(';').map(parse_mine).collect()
}

fn parse_mine(entry: &str) -> Result<Position, SettingsError> {
    match entry.split(',').collect::<Vec<_>>()[..] {
        [x, y] => match (parse_int(x), parse_int(y)) {
            (Some(x), Some(y)) => Ok(Position::new(x, y)),
            _ => Err(SettingsError::InvalidMineFormat),
        },
        _ => Err(SettingsError::InvalidMineFormat),
    }
}

/// The value of a `key=value` field, up to any further `=`. The key itself is not checked.
fn field_value(field: &str) -> Option<&str> {
    FIELD
        .captures(field)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}
