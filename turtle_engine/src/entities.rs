use crate::game::Direction;
use crossterm::style::Color;

/// Something that occupies a cell when the board is drawn.
///
/// Empty cells have no entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Mine,
    Exit,
    Turtle(Direction),
}

impl Entity {
    pub fn char(&self) -> char {
        match self {
            Entity::Mine => '*',
            Entity::Exit => 'E',
            // Point the turtle the way it is facing
            Entity::Turtle(Direction::North) => '^',
            Entity::Turtle(Direction::East) => '>',
            Entity::Turtle(Direction::South) => 'v',
            Entity::Turtle(Direction::West) => '<',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Entity::Mine => Color::Red,
            Entity::Exit => Color::Green,
            Entity::Turtle(_) => Color::Yellow,
        }
    }
}
