use super::error::LoadError;
use super::input::open_input;
use super::types::{GameIndex, ScheduleGame};
use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

#[derive(Deserialize)]
struct ScheduleDocument {
    games: Vec<Value>,
}

/// Loads the schedule under test: `{"games": [[key, {...}], ...]}`.
/// A `.zst` suffix selects zstd decoding.
pub fn load_schedule(path: &Path) -> Result<GameIndex<ScheduleGame>, LoadError> {
    let input = open_input(path)?;
    let games = parse_schedule(input, path)?;
    info!("Loaded {} scheduled games from '{}'", games.len(), path.display());
    Ok(games)
}

/// Parses a schedule document, keying each pair by its record's `gamekey`.
/// Every entry must be a two-element array whose second element is a game.
pub fn parse_schedule<R: Read>(
    reader: R,
    source: &Path,
) -> Result<GameIndex<ScheduleGame>, LoadError> {
    let document: ScheduleDocument =
        serde_json::from_reader(reader).map_err(|source_err| LoadError::Json {
            path: source.to_path_buf(),
            source: source_err,
        })?;

    let mut games = GameIndex::new();
    for (index, entry) in document.games.into_iter().enumerate() {
        let malformed = |reason: String| LoadError::MalformedEntry {
            path: source.to_path_buf(),
            index,
            reason,
        };

        let Value::Array(mut pair) = entry else {
            return Err(malformed("expected a [key, game] pair".to_string()));
        };
        if pair.len() != 2 {
            return Err(malformed(format!(
                "expected a [key, game] pair, found {} elements",
                pair.len()
            )));
        }

        let Some(record) = pair.pop() else {
            return Err(malformed("expected a [key, game] pair".to_string()));
        };
        let game: ScheduleGame =
            serde_json::from_value(record).map_err(|err| malformed(err.to_string()))?;
        games.insert(game.gamekey.to_string(), game);
    }
    Ok(games)
}
