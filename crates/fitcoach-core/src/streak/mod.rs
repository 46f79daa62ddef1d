//! Engagement streaks derived from daily check-ins.

mod tracker;

pub use tracker::{streak_length, StreakSnapshot, StreakSummary, StreakTracker};
