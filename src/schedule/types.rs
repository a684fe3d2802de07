use super::error::CompareError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// Scalar that sources encode either as a string or as an integer.
/// XML attributes are always strings; JSON feeds mix both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    /// Any other JSON value, only ever compared by its printed form.
    Other(Value),
}

impl FieldValue {
    /// Integer value, accepting numeric text with surrounding whitespace.
    pub fn as_integer(&self, field: &'static str) -> Result<i64, CompareError> {
        match self {
            Self::Int(value) => Ok(*value),
            Self::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| CompareError::InvalidInteger {
                    field,
                    value: raw.clone(),
                }),
            Self::Other(value) => Err(CompareError::InvalidInteger {
                field,
                value: value.to_string(),
            }),
        }
    }

    pub fn as_text(&self, field: &'static str) -> Result<&str, CompareError> {
        match self {
            Self::Text(raw) => Ok(raw),
            other => Err(CompareError::InvalidText {
                field,
                value: other.to_string(),
            }),
        }
    }

    /// Compares printed forms, so `57167` matches `"57167"`.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FieldValue", into = "String")]
pub enum SeasonType {
    Regular,
    Preseason,
    ProBowl,
    Postseason,
    /// Any code outside REG/PRE/PRO/POST, kept verbatim.
    Other(String),
}

impl SeasonType {
    pub fn code(&self) -> &str {
        match self {
            Self::Regular => "REG",
            Self::Preseason => "PRE",
            Self::ProBowl => "PRO",
            Self::Postseason => "POST",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for SeasonType {
    fn from(code: &str) -> Self {
        match code {
            "REG" => Self::Regular,
            "PRE" => Self::Preseason,
            "PRO" => Self::ProBowl,
            "POST" => Self::Postseason,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SeasonType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "REG" | "PRE" | "PRO" | "POST" => Self::from(code.as_str()),
            _ => Self::Other(code),
        }
    }
}

impl From<FieldValue> for SeasonType {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(code) => Self::from(code),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<SeasonType> for String {
    fn from(season_type: SeasonType) -> Self {
        match season_type {
            SeasonType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One game from the authoritative schedule feed.
///
/// Only the join key, id and season type are needed to file a game as
/// missing; the rest is read when a comparison reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundTruthGame {
    pub game_key: FieldValue,
    pub game_id: FieldValue,
    pub season_type: SeasonType,
    pub home_team_abbr: Option<FieldValue>,
    pub visitor_team_abbr: Option<FieldValue>,
    /// `M/D/YYYY`
    pub game_date: Option<FieldValue>,
    /// `HH:MM:SS`, 24-hour clock, US Eastern.
    pub game_time_eastern: Option<FieldValue>,
    pub week: Option<FieldValue>,
    pub season: Option<FieldValue>,
}

/// One game from the locally produced schedule. Everything but `gamekey`
/// may be absent or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleGame {
    pub gamekey: FieldValue,
    pub eid: Option<FieldValue>,
    pub home: Option<FieldValue>,
    pub away: Option<FieldValue>,
    pub day: Option<FieldValue>,
    pub month: Option<FieldValue>,
    pub year: Option<FieldValue>,
    pub week: Option<FieldValue>,
    pub season_type: Option<SeasonType>,
    /// `H:MM`, 12-hour clock.
    pub time: Option<FieldValue>,
    pub meridiem: Option<FieldValue>,
    /// Three-letter weekday abbreviation (`Sun`, `Mon`, ...).
    pub wday: Option<FieldValue>,
}

/// Insertion-ordered map from game key to record.
///
/// Re-inserting a key replaces the record but keeps the position of the
/// first insertion, so iteration order is the order keys were first seen.
#[derive(Debug, Clone)]
pub struct GameIndex<T> {
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
}

impl<T> Default for GameIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T> GameIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under `key`, returning the record it replaced.
    pub fn insert(&mut self, key: String, record: T) -> Option<T> {
        match self.positions.entry(key) {
            Entry::Occupied(slot) => {
                let idx = *slot.get();
                Some(std::mem::replace(&mut self.entries[idx].1, record))
            }
            Entry::Vacant(slot) => {
                let idx = self.entries.len();
                self.entries.push((slot.key().clone(), record));
                slot.insert(idx);
                None
            }
        }
    }

    /// Merges `other` into `self`; records from `other` win on collision.
    pub fn extend_from(&mut self, other: GameIndex<T>) -> usize {
        let mut replaced = 0;
        for (key, record) in other.entries {
            if self.insert(key, record).is_some() {
                replaced += 1;
            }
        }
        replaced
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<T> FromIterator<(String, T)> for GameIndex<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, record) in iter {
            index.insert(key, record);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_deserializes_string_or_integer() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[2017090700, "2017090700"]"#).unwrap();
        assert_eq!(values[0], FieldValue::Int(2017090700));
        assert_eq!(values[1], FieldValue::Text("2017090700".to_string()));
        assert_eq!(values[0].to_string(), values[1].to_string());
    }

    #[test]
    fn test_field_value_as_integer_trims_text() {
        assert_eq!(FieldValue::from(" 17 ").as_integer("week").unwrap(), 17);
        assert_eq!(FieldValue::from(2017_i64).as_integer("season").unwrap(), 2017);
    }

    #[test]
    fn test_field_value_as_integer_rejects_non_numeric() {
        let err = FieldValue::from("WC").as_integer("week").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidInteger { field: "week", .. }
        ));
    }

    #[test]
    fn test_season_type_round_trips_codes() {
        for code in ["REG", "PRE", "PRO", "POST"] {
            let parsed = SeasonType::from(code);
            assert!(!matches!(parsed, SeasonType::Other(_)));
            assert_eq!(parsed.code(), code);
        }
        assert_eq!(SeasonType::from("HOF"), SeasonType::Other("HOF".to_string()));
        assert_eq!(String::from(SeasonType::Postseason), "POST");
    }

    #[test]
    fn test_season_type_deserializes_from_json_string() {
        let parsed: SeasonType = serde_json::from_str(r#""POST""#).unwrap();
        assert_eq!(parsed, SeasonType::Postseason);
        let unknown: SeasonType = serde_json::from_str(r#""EXH""#).unwrap();
        assert_eq!(unknown.to_string(), "EXH");
        let numeric: SeasonType = serde_json::from_str("3").unwrap();
        assert_eq!(numeric, SeasonType::Other("3".to_string()));
    }

    #[test]
    fn test_field_value_keeps_unexpected_json_values() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[1.5, true]"#).unwrap();
        assert_eq!(values[0].to_string(), "1.5");
        assert!(matches!(
            values[1].as_integer("day"),
            Err(CompareError::InvalidInteger { field: "day", .. })
        ));
        assert!(matches!(
            values[1].as_text("wday"),
            Err(CompareError::InvalidText { field: "wday", .. })
        ));
    }

    #[test]
    fn test_field_value_matches_across_encodings() {
        assert!(FieldValue::from(2017091007_i64).matches(&FieldValue::from("2017091007")));
        assert!(FieldValue::from("NYJ").matches(&FieldValue::from("NYJ")));
        assert!(!FieldValue::from("NYJ").matches(&FieldValue::from("nyj")));
    }

    #[test]
    fn test_schedule_game_only_requires_gamekey() {
        let game: ScheduleGame = serde_json::from_str(
            r#"{"gamekey": "57167", "away": "KC", "meridiem": null, "wday": null}"#,
        )
        .unwrap();
        assert_eq!(game.gamekey, FieldValue::from("57167"));
        assert_eq!(game.away, Some(FieldValue::from("KC")));
        assert_eq!(game.meridiem, None);
        assert_eq!(game.wday, None);
        assert_eq!(game.season_type, None);

        assert!(serde_json::from_str::<ScheduleGame>(r#"{"away": "KC"}"#).is_err());
    }

    #[test]
    fn test_ground_truth_game_without_kickoff_time_loads() {
        let game: GroundTruthGame = serde_json::from_str(
            r#"{"gameKey": 57600, "gameId": 2018020400, "seasonType": "POST",
                "homeTeamAbbr": "TBD", "visitorTeamAbbr": "TBD", "week": 22}"#,
        )
        .unwrap();
        assert_eq!(game.season_type, SeasonType::Postseason);
        assert_eq!(game.game_time_eastern, None);
        assert_eq!(game.game_date, None);

        assert!(serde_json::from_str::<GroundTruthGame>(r#"{"gameKey": 1, "gameId": 2}"#).is_err());
    }

    #[test]
    fn test_game_index_overwrite_keeps_first_position() {
        let mut index = GameIndex::new();
        assert!(index.insert("a".to_string(), 1).is_none());
        assert!(index.insert("b".to_string(), 2).is_none());
        assert_eq!(index.insert("a".to_string(), 3), Some(1));

        let entries: Vec<(&str, &i32)> = index.iter().collect();
        assert_eq!(entries, vec![("a", &3), ("b", &2)]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_game_index_extend_from_later_wins() {
        let mut first: GameIndex<&str> =
            [("k1".to_string(), "old"), ("k2".to_string(), "keep")].into_iter().collect();
        let second: GameIndex<&str> =
            [("k1".to_string(), "new"), ("k3".to_string(), "added")].into_iter().collect();

        assert_eq!(first.extend_from(second), 1);
        assert_eq!(first.get("k1"), Some(&"new"));
        assert_eq!(first.get("k2"), Some(&"keep"));
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["k1", "k2", "k3"]);
    }

    #[test]
    fn test_game_index_lookup_missing_key() {
        let index: GameIndex<u8> = GameIndex::new();
        assert!(index.is_empty());
        assert!(!index.contains_key("missing"));
        assert_eq!(index.get("missing"), None);
    }
}
