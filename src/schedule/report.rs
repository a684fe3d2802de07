//! Reconciliation results: the four missing-game buckets, the incorrect games,
//! and any games that could not be compared.

use super::compare::Verdict;
use super::types::SeasonType;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncorrectGame {
    pub game_id: String,
    pub reason: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGame {
    pub game_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub missing_regular: Vec<String>,
    pub missing_preseason: Vec<String>,
    pub missing_pro_bowl: Vec<String>,
    pub missing_postseason: Vec<String>,
    pub incorrect: Vec<IncorrectGame>,
    /// Games whose fields could not be parsed (only filled when skipping errors).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedGame>,
}

impl ReconcileReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a ground-truth game that the schedule lacks under its season
    /// type. Returns false (and files nothing) for unknown season types.
    pub fn record_missing(&mut self, season_type: &SeasonType, game_id: String) -> bool {
        let bucket = match season_type {
            SeasonType::Regular => &mut self.missing_regular,
            SeasonType::Preseason => &mut self.missing_preseason,
            SeasonType::ProBowl => &mut self.missing_pro_bowl,
            SeasonType::Postseason => &mut self.missing_postseason,
            SeasonType::Other(_) => return false,
        };
        bucket.push(game_id);
        true
    }

    pub fn record_incorrect(&mut self, game_id: String, reason: Verdict) {
        self.incorrect.push(IncorrectGame { game_id, reason });
    }

    pub fn record_skipped(&mut self, game_id: String, error: String) {
        self.skipped.push(SkippedGame { game_id, error });
    }

    pub fn missing_count(&self) -> usize {
        self.missing_regular.len()
            + self.missing_preseason.len()
            + self.missing_pro_bowl.len()
            + self.missing_postseason.len()
    }

    /// Missing, incorrect and skipped games combined.
    pub fn discrepancy_count(&self) -> usize {
        self.missing_count() + self.incorrect.len() + self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.discrepancy_count() == 0
    }

    /// Five labelled lines, plus a sixth for skipped games when there are any.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Missing regular season games: {}",
            format_ids(&self.missing_regular)
        );
        let _ = writeln!(
            out,
            "Missing preseason games: {}",
            format_ids(&self.missing_preseason)
        );
        let _ = writeln!(
            out,
            "Missing pro bowl games: {}",
            format_ids(&self.missing_pro_bowl)
        );
        let _ = writeln!(
            out,
            "Missing postseason games: {}",
            format_ids(&self.missing_postseason)
        );
        let incorrect = self
            .incorrect
            .iter()
            .map(|game| format_pair(&game.game_id, game.reason.label()));
        let _ = writeln!(out, "Incorrect games: {}", format_list(incorrect));

        if !self.skipped.is_empty() {
            let skipped = self
                .skipped
                .iter()
                .map(|game| format_pair(&game.game_id, &game.error));
            let _ = writeln!(out, "Skipped games: {}", format_list(skipped));
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Python `repr` quoting: double quotes when that avoids escaping a `'`.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\");
    if value.contains('\'') && !value.contains('"') {
        format!("\"{escaped}\"")
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

fn format_pair(game_id: &str, detail: &str) -> String {
    format!("({}, {})", quote(game_id), quote(detail))
}

fn format_ids(ids: &[String]) -> String {
    format_list(ids.iter().map(|id| quote(id)))
}

fn format_list(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}
