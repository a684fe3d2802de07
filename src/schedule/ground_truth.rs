use super::config::ErrorPolicy;
use super::error::LoadError;
use super::input::{open_input, payload_extension};
use super::types::{GameIndex, GroundTruthGame};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

const GAME_KEY_FIELD: &str = "gameKey";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SourceFormat {
    Json,
    Xml,
}

impl SourceFormat {
    fn detect(path: &Path) -> Option<Self> {
        match payload_extension(path)?.as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct GroundTruthDocument {
    #[serde(rename = "gameSchedules")]
    game_schedules: Vec<Value>,
}

/// Loads every `.json` / `.xml` file (optionally `.zst` compressed) in `dir`.
///
/// Files are read in glob order; a game key seen again in a later file
/// takes that file's record.
pub fn load_ground_truth(
    dir: &Path,
    policy: ErrorPolicy,
) -> Result<GameIndex<GroundTruthGame>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy()))
        .join("*")
        .to_string_lossy()
        .into_owned();
    let entries = glob::glob(&pattern).map_err(|source| LoadError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut games = GameIndex::new();
    for entry in entries {
        let loaded = entry
            .map_err(|err| LoadError::Io {
                path: err.path().to_path_buf(),
                source: err.into(),
            })
            .and_then(|path| load_file(&path).map(|file_games| (path, file_games)));

        match loaded {
            Ok((path, Some(file_games))) => {
                info!("Loaded {} games from '{}'", file_games.len(), path.display());
                let replaced = games.extend_from(file_games);
                if replaced > 0 {
                    debug!(
                        "'{}' replaced {} previously loaded games",
                        path.display(),
                        replaced
                    );
                }
            }
            Ok((path, None)) => {
                debug!("Skipping '{}': not a schedule file", path.display());
            }
            Err(err) => match policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => warn!("Skipping ground truth file: {}", err),
            },
        }
    }

    Ok(games)
}

fn load_file(path: &Path) -> Result<Option<GameIndex<GroundTruthGame>>, LoadError> {
    if !path.is_file() {
        return Ok(None);
    }
    let Some(format) = SourceFormat::detect(path) else {
        return Ok(None);
    };

    let input = open_input(path)?;
    let games = match format {
        SourceFormat::Json => parse_json_schedule(input, path)?,
        SourceFormat::Xml => parse_xml_schedule(input, path)?,
    };
    Ok(Some(games))
}

/// Parses a JSON document of the form `{"gameSchedules": [{...}, ...]}`.
pub fn parse_json_schedule<R: Read>(
    reader: R,
    source: &Path,
) -> Result<GameIndex<GroundTruthGame>, LoadError> {
    let document: GroundTruthDocument =
        serde_json::from_reader(reader).map_err(|source_err| LoadError::Json {
            path: source.to_path_buf(),
            source: source_err,
        })?;

    let mut games = GameIndex::new();
    for (index, record) in document.game_schedules.into_iter().enumerate() {
        let Some(game_key) = record.get(GAME_KEY_FIELD).and_then(key_text) else {
            return Err(LoadError::MissingAttribute {
                path: source.to_path_buf(),
                index,
                attribute: GAME_KEY_FIELD,
            });
        };
        let game = decode_record(record, &game_key, source)?;
        games.insert(game_key, game);
    }
    Ok(games)
}

/// Parses an XML document whose second top-level element holds one child
/// element per game, each carrying the game fields as attributes.
pub fn parse_xml_schedule<R: Read>(
    mut reader: R,
    source: &Path,
) -> Result<GameIndex<GroundTruthGame>, LoadError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source_err| LoadError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(&text, options).map_err(
        |source_err| LoadError::Xml {
            path: source.to_path_buf(),
            source: source_err,
        },
    )?;

    let container = document
        .root_element()
        .children()
        .filter(|node| node.is_element())
        .nth(1)
        .ok_or_else(|| LoadError::MissingContainer {
            path: source.to_path_buf(),
        })?;

    let mut games = GameIndex::new();
    for (index, node) in container
        .children()
        .filter(|node| node.is_element())
        .enumerate()
    {
        let Some(game_key) = node.attribute(GAME_KEY_FIELD) else {
            return Err(LoadError::MissingAttribute {
                path: source.to_path_buf(),
                index,
                attribute: GAME_KEY_FIELD,
            });
        };

        let attributes: Map<String, Value> = node
            .attributes()
            .map(|attr| (attr.name().to_string(), Value::String(attr.value().to_string())))
            .collect();
        let game = decode_record(Value::Object(attributes), game_key, source)?;
        games.insert(game_key.to_string(), game);
    }
    Ok(games)
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn decode_record(
    record: Value,
    game_key: &str,
    source: &Path,
) -> Result<GroundTruthGame, LoadError> {
    serde_json::from_value(record).map_err(|source_err| LoadError::InvalidRecord {
        path: source.to_path_buf(),
        game_key: game_key.to_string(),
        source: source_err,
    })
}
