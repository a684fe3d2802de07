use super::candidate::load_schedule;
use super::compare::Comparator;
use super::config::{ErrorPolicy, ReconcileConfig};
use super::error::ReconcileError;
use super::ground_truth::load_ground_truth;
use super::report::ReconcileReport;
use super::types::{GameIndex, GroundTruthGame, ScheduleGame};
use log::{debug, info, warn};

/// Loads both sources named by `config` and reconciles them.
pub fn run(config: &ReconcileConfig) -> Result<ReconcileReport, ReconcileError> {
    let truth = load_ground_truth(&config.ground_truth_dir, config.on_error)?;
    let schedule = load_schedule(&config.schedule_path)?;
    info!(
        "Reconciling {} ground truth games against {} scheduled games",
        truth.len(),
        schedule.len()
    );

    let comparator = Comparator::new(config.weekday_source);
    reconcile(&truth, &schedule, &comparator, config.on_error)
}

/// Walks the ground truth in order: games the schedule lacks go to the
/// missing bucket of their season type, games it has are compared.
pub fn reconcile(
    truth: &GameIndex<GroundTruthGame>,
    schedule: &GameIndex<ScheduleGame>,
    comparator: &Comparator,
    policy: ErrorPolicy,
) -> Result<ReconcileReport, ReconcileError> {
    let mut report = ReconcileReport::new();

    for (game_key, game) in truth.iter() {
        let game_id = game.game_id.to_string();

        let Some(listed) = schedule.get(game_key) else {
            if !report.record_missing(&game.season_type, game_id) {
                debug!(
                    "Game '{}' is missing but has unclassified season type '{}'",
                    game_key, game.season_type
                );
            }
            continue;
        };

        match comparator.compare(game, listed) {
            Ok(verdict) if verdict.is_correct() => {}
            Ok(verdict) => report.record_incorrect(game_id, verdict),
            Err(source) => match policy {
                ErrorPolicy::Abort => {
                    return Err(ReconcileError::Compare {
                        game_key: game_key.to_string(),
                        source,
                    });
                }
                ErrorPolicy::Skip => {
                    warn!("Skipping game '{}': {}", game_key, source);
                    report.record_skipped(game_id, source.to_string());
                }
            },
        }
    }

    Ok(report)
}
