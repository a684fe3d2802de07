//! Reconciles a locally produced schedule file against ground-truth schedule
//! data, reporting missing games and the first field discrepancy per game.

mod schedule;

pub use schedule::*;
