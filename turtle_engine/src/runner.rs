//! Batch evaluation of move sequences read from files.

use crate::error::{GameError, UsageError};
use crate::game::Game;
use crate::report::{create_reporter, ReportFormat};
use std::fs;
use std::io::{self, Write};

/// What the command line asked for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunnerConfig {
    pub settings_file: String,
    pub moves_file: String,
    pub format: ReportFormat,
    pub draw: bool,
}

impl RunnerConfig {
    /// Builds the configuration from the command line arguments, without the program name.
    ///
    /// # Arguments
    /// * `args` - `<game-settings> <moves> [--json] [--draw]`, flags in any position.
    pub fn from_args<I>(args: I) -> Result<RunnerConfig, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut format = ReportFormat::Text;
        let mut draw = false;

        for arg in args {
            match arg.as_str() {
                "--json" => format = ReportFormat::Json,
                "--draw" => draw = true,
                _ if arg.starts_with("--") => return Err(UsageError::UnknownOption(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        match (positional.next(), positional.next()) {
            (Some(settings_file), Some(moves_file)) => Ok(RunnerConfig {
                settings_file,
                moves_file,
                format,
                draw,
            }),
            _ => Err(UsageError::MissingArguments),
        }
    }
}

/// Loads the game and the move sequences, then reports every sequence to `out`.
///
/// A sequence that cannot be evaluated is reported and the batch carries on.
pub fn run<W: Write + 'static>(config: &RunnerConfig, out: W) -> Result<(), GameError> {
    let game = Game::from_file(&config.settings_file)?;
    let moves = fs::read(&config.moves_file).map_err(|source| GameError::Io {
        path: config.moves_file.clone(),
        source,
    })?;
    // Undecodable bytes become U+FFFD and fail that sequence only
    let moves = String::from_utf8_lossy(&moves);

    log::info!(
        "Evaluating {} sequences from {}",
        moves.lines().count(),
        config.moves_file
    );

    evaluate_all(&game, moves.lines(), config, out).map_err(GameError::Output)
}

/// Reports every sequence in `sequences` against `game`.
pub fn evaluate_all<'a, W, I>(
    game: &Game,
    sequences: I,
    config: &RunnerConfig,
    mut out: W,
) -> io::Result<()>
where
    W: Write + 'static,
    I: IntoIterator<Item = &'a str>,
{
    if config.draw {
        game.draw(&mut out)?;
        writeln!(out)?;
    }

    let mut reporter = create_reporter(config.format, out);
    for moves in sequences {
        let result = game.evaluate_moves(moves);
        if let Err(e) = &result {
            log::warn!("Could not evaluate sequence {:?}: {}", moves, e);
        }
        reporter.report(moves, &result)?;
    }

    reporter.flush()
}
