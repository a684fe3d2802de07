use super::error::CompareError;
use super::types::{FieldValue, GroundTruthGame, ScheduleGame, SeasonType};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Date a time-only or weekday-only parse resolves onto (`strptime` convention).
static PARSE_ANCHOR: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());

const GAME_DATE_FORMAT: &str = "%m/%d/%Y";
const KICKOFF_FORMAT: &str = "%H:%M:%S";
const LISTED_TIME_FORMAT: &str = "%I:%M,%p";

/// Postseason weeks continue the 17-week regular season.
const POSTSEASON_WEEK_OFFSET: i64 = 17;
/// Playoff round 4 is the championship game, which sits one week later
/// (after the pro bowl week).
const CHAMPIONSHIP_ROUND: i64 = 4;

/// Outcome of comparing one candidate game against its ground-truth record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    IncorrectAwayTeam,
    IncorrectDay,
    IncorrectGameId,
    IncorrectHomeTeam,
    IncorrectMonth,
    IncorrectSeasonType,
    MissingMeridiem,
    IncorrectMeridiem,
    /// Kickoff time wrong under both the listed meridiem and PM.
    IncorrectDate,
    IncorrectWeekday,
    IncorrectWeek,
    IncorrectYear,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::IncorrectAwayTeam => "Incorrect Away Team",
            Self::IncorrectDay => "Incorrect Day",
            Self::IncorrectGameId => "Incorrect Game ID",
            Self::IncorrectHomeTeam => "Incorrect Home Team",
            Self::IncorrectMonth => "Incorrect Month",
            Self::IncorrectSeasonType => "Incorrect Season Type",
            Self::MissingMeridiem => "Missing Meridiem",
            Self::IncorrectMeridiem => "Incorrect Meridiem",
            Self::IncorrectDate => "Incorrect Date",
            Self::IncorrectWeekday => "Incorrect Weekday",
            Self::IncorrectWeek => "Incorrect Week",
            Self::IncorrectYear => "Incorrect Year",
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Where the expected weekday of a game comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekdaySource {
    /// Weekday of the parsed kickoff time. A bare time parse carries no
    /// date, so both sides land on the parse anchor and only the listed
    /// abbreviation's validity is checked.
    #[default]
    KickoffTime,
    /// Weekday of the ground truth `gameDate`.
    GameDate,
}

impl FromStr for WeekdaySource {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("kickoff-time") {
            Ok(Self::KickoffTime)
        } else if normalized.eq_ignore_ascii_case("game-date") {
            Ok(Self::GameDate)
        } else {
            Err(format!(
                "Invalid weekday source '{}'. Supported values: 'kickoff-time' or 'game-date'.",
                normalized
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparator {
    weekday_source: WeekdaySource,
}

impl Comparator {
    pub fn new(weekday_source: WeekdaySource) -> Self {
        Self { weekday_source }
    }

    /// Checks `listed` against `truth` field by field and returns the first
    /// mismatch. Fields are only read once the checks before them pass.
    pub fn compare(
        &self,
        truth: &GroundTruthGame,
        listed: &ScheduleGame,
    ) -> Result<Verdict, CompareError> {
        let away = required(&listed.away, "away")?;
        if !away.matches(required(&truth.visitor_team_abbr, "visitorTeamAbbr")?) {
            return Ok(Verdict::IncorrectAwayTeam);
        }

        let game_date = parse_game_date(required(&truth.game_date, "gameDate")?)?;
        if integer(&listed.day, "day")? != i64::from(game_date.day()) {
            return Ok(Verdict::IncorrectDay);
        }
        if !required(&listed.eid, "eid")?.matches(&truth.game_id) {
            return Ok(Verdict::IncorrectGameId);
        }
        let home = required(&listed.home, "home")?;
        if !home.matches(required(&truth.home_team_abbr, "homeTeamAbbr")?) {
            return Ok(Verdict::IncorrectHomeTeam);
        }
        if integer(&listed.month, "month")? != i64::from(game_date.month()) {
            return Ok(Verdict::IncorrectMonth);
        }
        let season_type = listed
            .season_type
            .as_ref()
            .ok_or(CompareError::MissingField {
                field: "season_type",
            })?;
        if *season_type != truth.season_type {
            return Ok(Verdict::IncorrectSeasonType);
        }

        let kickoff = parse_kickoff(required(&truth.game_time_eastern, "gameTimeEastern")?)?;
        let Some(meridiem) = &listed.meridiem else {
            return Ok(Verdict::MissingMeridiem);
        };
        let meridiem = meridiem.as_text("meridiem")?;
        let time = required(&listed.time, "time")?.as_text("time")?;
        if parse_listed_time(time, meridiem)? != kickoff {
            return if parse_listed_time(time, "PM")? == kickoff {
                Ok(Verdict::IncorrectMeridiem)
            } else {
                Ok(Verdict::IncorrectDate)
            };
        }

        let listed_weekday = parse_weekday(required(&listed.wday, "wday")?)?;
        let weekday_matches = match self.weekday_source {
            // Neither a "%a" parse nor a "%H:%M:%S" parse sets a date.
            WeekdaySource::KickoffTime => {
                PARSE_ANCHOR.weekday() == PARSE_ANCHOR.and_time(kickoff).weekday()
            }
            WeekdaySource::GameDate => listed_weekday == game_date.weekday(),
        };
        if !weekday_matches {
            return Ok(Verdict::IncorrectWeekday);
        }

        if effective_week(listed)? != integer(&truth.week, "week")? {
            return Ok(Verdict::IncorrectWeek);
        }
        if integer(&listed.year, "year")? != integer(&truth.season, "season")? {
            return Ok(Verdict::IncorrectYear);
        }

        Ok(Verdict::Correct)
    }
}

/// Week number on the ground truth's scale: postseason rounds follow the
/// regular season, and the championship round skips one extra week.
pub fn effective_week(listed: &ScheduleGame) -> Result<i64, CompareError> {
    let listed_week = integer(&listed.week, "week")?;
    let mut week = listed_week;
    if listed.season_type == Some(SeasonType::Postseason) {
        week += POSTSEASON_WEEK_OFFSET;
        if listed_week == CHAMPIONSHIP_ROUND {
            week += 1;
        }
    }
    Ok(week)
}

fn required<'a>(
    value: &'a Option<FieldValue>,
    field: &'static str,
) -> Result<&'a FieldValue, CompareError> {
    value.as_ref().ok_or(CompareError::MissingField { field })
}

fn integer(value: &Option<FieldValue>, field: &'static str) -> Result<i64, CompareError> {
    required(value, field)?.as_integer(field)
}

fn parse_game_date(value: &FieldValue) -> Result<NaiveDate, CompareError> {
    let raw = value.as_text("gameDate")?;
    NaiveDate::parse_from_str(raw.trim(), GAME_DATE_FORMAT).map_err(|source| {
        CompareError::InvalidDate {
            field: "gameDate",
            value: raw.to_string(),
            source,
        }
    })
}

fn parse_kickoff(value: &FieldValue) -> Result<NaiveTime, CompareError> {
    let raw = value.as_text("gameTimeEastern")?;
    NaiveTime::parse_from_str(raw.trim(), KICKOFF_FORMAT).map_err(|source| {
        CompareError::InvalidTime {
            field: "gameTimeEastern",
            value: raw.to_string(),
            source,
        }
    })
}

fn parse_listed_time(time: &str, meridiem: &str) -> Result<NaiveTime, CompareError> {
    let combined = format!("{},{}", time.trim(), meridiem.trim());
    NaiveTime::parse_from_str(&combined, LISTED_TIME_FORMAT).map_err(|source| {
        CompareError::InvalidTime {
            field: "time",
            value: combined,
            source,
        }
    })
}

/// Three-letter abbreviation only; chrono alone would also take full names.
fn parse_weekday(value: &FieldValue) -> Result<Weekday, CompareError> {
    let raw = value.as_text("wday")?.trim();
    let invalid = || CompareError::InvalidWeekday {
        value: raw.to_string(),
    };
    if raw.len() != 3 {
        return Err(invalid());
    }
    raw.parse::<Weekday>().map_err(|_| invalid())
}
