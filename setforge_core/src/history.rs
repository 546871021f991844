//! Workout-history utilities: persistence-format load/save, feedback
//! enrichment, and the summary statistics progression analysis runs on.
//!
//! History is supplied by the caller and never mutated in place; every
//! operation here returns fresh values.

use crate::types::{Archetype, FeedbackRecord, HistoryEntry, SessionFeedback};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

/// Recovery score assumed when no feedback exists.
pub const DEFAULT_RECOVERY_SCORE: f64 = 7.0;

/// Load a history array from a JSON file.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let contents = std::fs::read_to_string(path)?;
    let history: Vec<HistoryEntry> = serde_json::from_str(&contents)?;
    tracing::debug!(entries = history.len(), "loaded history from {:?}", path);
    Ok(history)
}

/// Save a history array to a JSON file.
pub fn save_history(path: &Path, history: &[HistoryEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(history)?;
    std::fs::write(path, contents)?;
    Ok(())
}

// ============================================================================
// Enrichment
// ============================================================================

/// Merge external RPE/feedback records into history entries, matching by
/// session id first and falling back to same-day date match. Entries that
/// already carry a value keep it.
pub fn enrich_history(
    history: &[HistoryEntry],
    records: &[FeedbackRecord],
) -> Vec<HistoryEntry> {
    history
        .iter()
        .map(|entry| {
            let record = records.iter().find(|r| {
                r.session_id.map(|id| id == entry.id).unwrap_or(false)
                    || r.date.date_naive() == entry.date.date_naive()
            });
            let Some(record) = record else {
                return entry.clone();
            };

            let mut enriched = entry.clone();
            if enriched.rpe.is_none() {
                enriched.rpe = record.rpe;
            }
            let feedback = enriched.feedback.get_or_insert_with(SessionFeedback::default);
            if feedback.difficulty.is_none() {
                feedback.difficulty = record.difficulty;
            }
            if feedback.satisfaction.is_none() {
                feedback.satisfaction = record.satisfaction;
            }
            enriched
        })
        .collect()
}

// ============================================================================
// Summary Statistics
// ============================================================================

/// Entries within the last `days` before `now`, newest first.
pub fn within_window(history: &[HistoryEntry], now: DateTime<Utc>, days: i64) -> Vec<HistoryEntry> {
    let cutoff = now - Duration::days(days);
    let mut recent: Vec<HistoryEntry> = history
        .iter()
        .filter(|e| e.date >= cutoff && e.date <= now)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
}

/// Days since the most recent session of the given archetype, if any.
pub fn days_since_last(
    history: &[HistoryEntry],
    archetype: Archetype,
    now: DateTime<Utc>,
) -> Option<i64> {
    history
        .iter()
        .filter(|e| e.archetype == archetype)
        .map(|e| e.date)
        .max()
        .map(|last| (now - last).num_days())
}

/// Count of consecutive sessions at or above the high-intensity
/// threshold, walking backwards from the most recent session.
pub fn consecutive_high_intensity(history: &[HistoryEntry], threshold: f64) -> u32 {
    let mut sorted: Vec<&HistoryEntry> = history.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut count = 0;
    for entry in sorted {
        if entry.effective_intensity() >= threshold {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Average recovery score over entries with feedback: `10 - difficulty`,
/// defaulting to [`DEFAULT_RECOVERY_SCORE`] when no feedback exists.
pub fn average_recovery_score(history: &[HistoryEntry]) -> f64 {
    let scores: Vec<f64> = history
        .iter()
        .filter_map(|e| e.feedback.as_ref())
        .filter_map(|f| f.difficulty)
        .map(|d| (10.0 - d).clamp(0.0, 10.0))
        .collect();
    if scores.is_empty() {
        return DEFAULT_RECOVERY_SCORE;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Average effective intensity over entries within the trend window.
pub fn average_intensity(history: &[HistoryEntry]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let total: f64 = history.iter().map(|e| e.effective_intensity()).sum();
    Some(total / history.len() as f64)
}
