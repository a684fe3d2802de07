use super::compare::WeekdaySource;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_GROUND_TRUTH_DIR: &str = "ground_truth";
pub const DEFAULT_SCHEDULE_PATH: &str = "schedule.json";

/// What to do with a ground-truth file or a game that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run at the first error.
    #[default]
    Abort,
    /// Log a warning and carry on without the file or game.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("abort") {
            Ok(Self::Abort)
        } else if normalized.eq_ignore_ascii_case("skip") {
            Ok(Self::Skip)
        } else {
            Err(format!(
                "Invalid error policy '{}'. Supported values: 'abort' or 'skip'.",
                normalized
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub ground_truth_dir: PathBuf,
    pub schedule_path: PathBuf,
    pub weekday_source: WeekdaySource,
    pub on_error: ErrorPolicy,
}

impl ReconcileConfig {
    pub fn new(ground_truth_dir: impl Into<PathBuf>, schedule_path: impl Into<PathBuf>) -> Self {
        Self {
            ground_truth_dir: ground_truth_dir.into(),
            schedule_path: schedule_path.into(),
            ..Self::default()
        }
    }

    pub fn with_weekday_source(mut self, weekday_source: WeekdaySource) -> Self {
        self.weekday_source = weekday_source;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            ground_truth_dir: PathBuf::from(DEFAULT_GROUND_TRUTH_DIR),
            schedule_path: PathBuf::from(DEFAULT_SCHEDULE_PATH),
            weekday_source: WeekdaySource::default(),
            on_error: ErrorPolicy::default(),
        }
    }
}
