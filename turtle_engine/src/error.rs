//! Error types for loading settings, evaluating moves and running a batch.

use thiserror::Error;

/// Errors raised while parsing the settings text.
///
/// Each variant names the line role that was rejected. The display strings are
/// part of the output contract of the runner and must not change.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SettingsError {
    #[error("Game settings file must contain at least 4 lines.")]
    InsufficientLines,

    #[error("Invalid board size format. Expected 'NxM'.")]
    InvalidBoardSize,

    #[error("Invalid starting position format. Expected 'x=X, y=Y, dir=Direction'.")]
    InvalidStartFormat,

    #[error("Invalid starting position coordinates.")]
    InvalidStartCoordinates,

    #[error("Invalid direction. Valid values are North, East, South, or West.")]
    InvalidDirection,

    #[error("Invalid exit point format. Expected 'x=X, y=Y'.")]
    InvalidExitFormat,

    #[error("Invalid mine format. Expected 'X,Y'.")]
    InvalidMineFormat,
}

impl SettingsError {
    /// The 1-based settings line the error refers to.
    ///
    /// `None` when the text as a whole is rejected.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InsufficientLines => None,
            Self::InvalidBoardSize => Some(1),
            Self::InvalidStartFormat | Self::InvalidStartCoordinates | Self::InvalidDirection => {
                Some(2)
            }
            Self::InvalidExitFormat => Some(3),
            Self::InvalidMineFormat => Some(4),
        }
    }
}

/// Errors raised by the caller's misuse of the move evaluator.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MoveError {
    #[error("Moves cannot be null or empty.")]
    EmptyMoves,
}

/// Errors raised while loading a game from a settings file.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Settings file path cannot be null or empty.")]
    EmptySettingsPath,

    #[error("Settings file not found.")]
    SettingsNotFound { path: String },

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write results: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Raw direction value outside the four cardinal directions.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Invalid direction: {0}")]
pub struct InvalidDirectionValue(pub u8);

/// The command line could not be turned into a runner configuration.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UsageError {
    #[error("Usage: turtle_engine game-settings moves [--json] [--draw]")]
    MissingArguments,

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}
