mod candidate;
mod compare;
mod config;
mod error;
mod ground_truth;
mod input;
mod reconcile;
mod report;
mod types;

pub mod logging;

pub use candidate::{load_schedule, parse_schedule};
pub use compare::{Comparator, Verdict, WeekdaySource, effective_week};
pub use config::{ErrorPolicy, ReconcileConfig};
pub use error::{CompareError, LoadError, ReconcileError};
pub use ground_truth::{load_ground_truth, parse_json_schedule, parse_xml_schedule};
pub use input::Compression;
pub use reconcile::{reconcile, run};
pub use report::{IncorrectGame, ReconcileReport, SkippedGame};
pub use types::{FieldValue, GameIndex, GroundTruthGame, ScheduleGame, SeasonType};
