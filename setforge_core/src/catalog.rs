//! Built-in movement catalog plus filtering and sampling operations.
//!
//! The catalog is immutable, lazily built once, and read-only for the life
//! of the process. Stored as a `Vec` rather than a map so iteration order
//! is stable, which the seeded sampling relies on.

use crate::rng::SeededRandom;
use crate::types::{EnergySystem, LoadTier, Movement, MovementPattern, Plane, Slot};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached movement catalog - built once and reused across all operations
static MOVEMENT_CATALOG: Lazy<Vec<Movement>> = Lazy::new(build_movement_catalog);

/// Movements removed by the `low_impact` constraint.
pub const LOW_IMPACT_BLOCKLIST: [&str; 6] = [
    "box_jump",
    "jump_squat",
    "burpee",
    "jumping_jack",
    "jump_rope",
    "sprint_interval",
];

/// Get a reference to the cached movement catalog
pub fn movement_catalog() -> &'static [Movement] {
    &MOVEMENT_CATALOG
}

/// Look up a movement by id.
pub fn movement_by_id(id: &str) -> Option<&'static Movement> {
    MOVEMENT_CATALOG.iter().find(|m| m.id == id)
}

#[allow(clippy::too_many_arguments)]
fn mv(
    id: &str,
    name: &str,
    pattern: MovementPattern,
    equipment: &[&str],
    plane: Plane,
    energy_system: EnergySystem,
    load_tier: LoadTier,
    complexity: u8,
    unilateral: bool,
    compound: bool,
) -> Movement {
    Movement {
        id: id.to_string(),
        name: name.to_string(),
        pattern,
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        plane,
        energy_system,
        load_tier,
        complexity,
        unilateral,
        compound,
    }
}

fn build_movement_catalog() -> Vec<Movement> {
    use EnergySystem::*;
    use LoadTier::*;
    use MovementPattern::*;
    use Plane::*;

    vec![
        // ====================================================================
        // Hinge
        // ====================================================================
        mv("barbell_deadlift", "Barbell Deadlift", Hinge, &["barbell"], Sagittal, Alactic, Heavy, 4, false, true),
        mv("romanian_deadlift", "Romanian Deadlift", Hinge, &["barbell", "dumbbell"], Sagittal, Alactic, Heavy, 3, false, true),
        mv("kb_swing", "Kettlebell Swing", Hinge, &["kettlebell"], Sagittal, Glycolytic, Moderate, 3, false, true),
        mv("single_leg_rdl", "Single-Leg Romanian Deadlift", Hinge, &["dumbbell", "kettlebell", "bodyweight"], Sagittal, Alactic, Light, 4, true, false),
        mv("hip_thrust", "Barbell Hip Thrust", Hinge, &["barbell", "bench"], Sagittal, Alactic, Heavy, 2, false, true),
        mv("good_morning", "Good Morning", Hinge, &["barbell"], Sagittal, Alactic, Moderate, 3, false, true),
        mv("glute_bridge", "Glute Bridge", Hinge, &["bodyweight", "floor"], Sagittal, Aerobic, Bodyweight, 1, false, false),
        mv("clean_and_press", "Clean and Press", Hinge, &["barbell", "dumbbell"], Sagittal, Glycolytic, Heavy, 5, false, true),
        // ====================================================================
        // Squat
        // ====================================================================
        mv("back_squat", "Back Squat", Squat, &["barbell", "squat_rack"], Sagittal, Alactic, Heavy, 4, false, true),
        mv("front_squat", "Front Squat", Squat, &["barbell", "squat_rack"], Sagittal, Alactic, Heavy, 5, false, true),
        mv("goblet_squat", "Goblet Squat", Squat, &["dumbbell", "kettlebell"], Sagittal, Alactic, Moderate, 2, false, true),
        mv("air_squat", "Air Squat", Squat, &["bodyweight"], Sagittal, Aerobic, Bodyweight, 1, false, true),
        mv("box_jump", "Box Jump", Squat, &["box"], Sagittal, Alactic, Bodyweight, 3, false, true),
        mv("jump_squat", "Jump Squat", Squat, &["bodyweight"], Sagittal, Glycolytic, Bodyweight, 2, false, true),
        mv("wall_sit", "Wall Sit", Squat, &["bodyweight"], Sagittal, Aerobic, Bodyweight, 1, false, false),
        mv("thruster", "Thruster", Squat, &["barbell", "dumbbell"], Sagittal, Glycolytic, Moderate, 4, false, true),
        mv("sled_push", "Sled Push", Squat, &["sled"], Sagittal, Glycolytic, Moderate, 2, false, true),
        mv("burpee", "Burpee", Squat, &["bodyweight", "floor"], Sagittal, Glycolytic, Bodyweight, 2, false, true),
        mv("jumping_jack", "Jumping Jack", Squat, &["bodyweight"], Frontal, Glycolytic, Bodyweight, 1, false, false),
        mv("jump_rope", "Jump Rope", Squat, &["jump_rope"], Sagittal, Aerobic, Bodyweight, 2, false, false),
        mv("bike_erg", "Bike Erg", Squat, &["bike"], Sagittal, Aerobic, Bodyweight, 1, false, true),
        // ====================================================================
        // Mono (single-leg / split stance)
        // ====================================================================
        mv("walking_lunge", "Walking Lunge", Mono, &["bodyweight", "dumbbell"], Sagittal, Mixed, Light, 2, true, true),
        mv("reverse_lunge", "Reverse Lunge", Mono, &["bodyweight", "dumbbell"], Sagittal, Mixed, Light, 2, true, true),
        mv("bulgarian_split_squat", "Bulgarian Split Squat", Mono, &["bench", "dumbbell"], Sagittal, Alactic, Moderate, 3, true, true),
        mv("step_up", "Step-Up", Mono, &["box", "dumbbell"], Sagittal, Mixed, Light, 2, true, true),
        mv("lateral_lunge", "Lateral Lunge", Mono, &["bodyweight", "dumbbell"], Frontal, Mixed, Light, 2, true, true),
        mv("sprint_interval", "Sprint Interval", Mono, &["bodyweight"], Sagittal, Glycolytic, Bodyweight, 2, false, true),
        // ====================================================================
        // Push
        // ====================================================================
        mv("bench_press", "Bench Press", Push, &["barbell", "bench"], Sagittal, Alactic, Heavy, 3, false, true),
        mv("overhead_press", "Overhead Press", Push, &["barbell", "dumbbell"], Sagittal, Alactic, Heavy, 3, false, true),
        mv("pushup", "Push-Up", Push, &["bodyweight", "floor"], Sagittal, Aerobic, Bodyweight, 1, false, true),
        mv("db_incline_press", "Dumbbell Incline Press", Push, &["dumbbell", "bench"], Sagittal, Alactic, Moderate, 2, false, true),
        mv("dip", "Dip", Push, &["dip_station"], Sagittal, Alactic, Bodyweight, 3, false, true),
        mv("pike_pushup", "Pike Push-Up", Push, &["bodyweight", "floor"], Sagittal, Alactic, Bodyweight, 2, false, true),
        // ====================================================================
        // Pull
        // ====================================================================
        mv("pullup", "Pull-Up", Pull, &["pullup_bar"], Sagittal, Alactic, Bodyweight, 3, false, true),
        mv("barbell_row", "Barbell Row", Pull, &["barbell"], Sagittal, Alactic, Heavy, 3, false, true),
        mv("db_row", "Dumbbell Row", Pull, &["dumbbell", "bench"], Sagittal, Alactic, Moderate, 2, true, true),
        mv("band_pull_apart", "Band Pull-Apart", Pull, &["bands"], Frontal, Aerobic, Light, 1, false, false),
        mv("face_pull", "Face Pull", Pull, &["bands", "cable"], Transverse, Aerobic, Light, 2, false, false),
        mv("inverted_row", "Inverted Row", Pull, &["barbell", "squat_rack"], Sagittal, Alactic, Bodyweight, 2, false, true),
        mv("row_erg", "Row Erg", Pull, &["rower"], Sagittal, Aerobic, Bodyweight, 2, false, true),
        // ====================================================================
        // Core
        // ====================================================================
        mv("plank", "Plank", Core, &["bodyweight", "floor"], Sagittal, Aerobic, Bodyweight, 1, false, false),
        mv("hollow_hold", "Hollow Hold", Core, &["bodyweight", "floor"], Sagittal, Aerobic, Bodyweight, 2, false, false),
        mv("hanging_knee_raise", "Hanging Knee Raise", Core, &["pullup_bar"], Sagittal, Alactic, Bodyweight, 2, false, false),
        mv("deadbug", "Deadbug", Core, &["bodyweight", "floor"], Sagittal, Aerobic, Bodyweight, 1, false, false),
        mv("mountain_climber", "Mountain Climber", Core, &["bodyweight", "floor"], Sagittal, Glycolytic, Bodyweight, 2, false, false),
        mv("bear_crawl", "Bear Crawl", Core, &["bodyweight", "floor"], Multi, Mixed, Bodyweight, 2, false, true),
        // ====================================================================
        // Carry
        // ====================================================================
        mv("farmer_carry", "Farmer Carry", Carry, &["dumbbell", "kettlebell"], Sagittal, Mixed, Moderate, 1, false, false),
        mv("suitcase_carry", "Suitcase Carry", Carry, &["dumbbell", "kettlebell"], Frontal, Mixed, Moderate, 2, true, false),
        mv("overhead_carry", "Overhead Carry", Carry, &["dumbbell", "kettlebell"], Sagittal, Mixed, Moderate, 3, false, false),
        // ====================================================================
        // Rotation
        // ====================================================================
        mv("russian_twist", "Russian Twist", Rotation, &["bodyweight", "floor"], Transverse, Glycolytic, Bodyweight, 1, false, false),
        mv("pallof_press", "Pallof Press", Rotation, &["bands", "cable"], Transverse, Aerobic, Light, 2, false, false),
        mv("woodchopper", "Woodchopper", Rotation, &["dumbbell", "cable", "bands"], Transverse, Glycolytic, Light, 2, false, false),
    ]
}

/// Validate catalog integrity: unique ids, tagged equipment, sane complexity.
pub fn validate_catalog(movements: &[Movement]) -> Result<()> {
    let mut seen = HashSet::new();
    for m in movements {
        if !seen.insert(m.id.as_str()) {
            return Err(Error::CatalogValidation(format!(
                "duplicate movement id: {}",
                m.id
            )));
        }
        if m.equipment.is_empty() {
            return Err(Error::CatalogValidation(format!(
                "movement {} has no equipment tags",
                m.id
            )));
        }
        if m.complexity == 0 || m.complexity > 5 {
            return Err(Error::CatalogValidation(format!(
                "movement {} has complexity {} outside 1-5",
                m.id, m.complexity
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Filtering
// ============================================================================

/// Keep movements with at least one equipment tag in `available`.
pub fn filter_by_equipment(pool: &[Movement], available: &[String]) -> Vec<Movement> {
    pool.iter()
        .filter(|m| m.equipment.iter().any(|e| available.contains(e)))
        .cloned()
        .collect()
}

/// Remove movements violating any constraint. Unknown constraint strings
/// are no-ops (fail open).
pub fn avoid_constraints(pool: &[Movement], constraints: &[String]) -> Vec<Movement> {
    let mut result: Vec<Movement> = pool.to_vec();
    for constraint in constraints {
        match constraint.as_str() {
            "low_impact" => {
                result.retain(|m| !LOW_IMPACT_BLOCKLIST.contains(&m.id.as_str()));
            }
            "upper_only" => {
                result.retain(|m| m.pattern.is_upper());
            }
            "lower_only" => {
                result.retain(|m| m.pattern.is_lower());
            }
            other => {
                if let Some(tag) = other.strip_prefix("no_") {
                    result.retain(|m| !m.equipment.iter().any(|e| e == tag));
                }
                // anything else: no-op
            }
        }
    }
    result
}

/// Keep movements at or below the complexity ceiling.
pub fn filter_by_complexity(pool: &[Movement], ceiling: u8) -> Vec<Movement> {
    pool.iter()
        .filter(|m| m.complexity <= ceiling)
        .cloned()
        .collect()
}

// ============================================================================
// Balanced Sampling
// ============================================================================

/// Options for [`sample_balanced`].
#[derive(Clone, Debug)]
pub struct SampleOptions {
    /// Maximum selections per movement pattern.
    pub pattern_cap: u32,
    /// Patterns to cycle through when filling slots, in priority order.
    pub preferred_patterns: Vec<MovementPattern>,
    /// Guarantee the first selection is a compound movement.
    pub ensure_compound: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            pattern_cap: 2,
            preferred_patterns: Vec::new(),
            ensure_compound: false,
        }
    }
}

/// Select up to `count` movements favoring even pattern distribution.
///
/// All tie-breaking goes through `rng`. A pool exhausted before `count`
/// is reached yields a short result, never an error.
pub fn sample_balanced(
    pool: &[Movement],
    count: usize,
    rng: &mut SeededRandom,
    options: &SampleOptions,
) -> Vec<Movement> {
    let mut pattern_counts = [0u32; 8];
    sample_balanced_with_counts(pool, count, &mut pattern_counts, rng, options)
}

/// Like [`sample_balanced`] but threading pattern counts through the
/// caller, so successive slot resolutions share one per-session tally.
/// The cap is soft: a pool with only at-cap patterns left still fills.
pub fn sample_balanced_with_counts(
    pool: &[Movement],
    count: usize,
    pattern_counts: &mut [u32; 8],
    rng: &mut SeededRandom,
    options: &SampleOptions,
) -> Vec<Movement> {
    let mut selected: Vec<Movement> = Vec::with_capacity(count);

    let is_taken = |selected: &[Movement], m: &Movement| selected.iter().any(|s| s.id == m.id);

    if options.ensure_compound && selected.len() < count {
        let compounds: Vec<&Movement> = pool.iter().filter(|m| m.compound).collect();
        if let Some(first) = rng.choice(&compounds) {
            pattern_counts[first.pattern.index()] += 1;
            selected.push((*first).clone());
        }
    }

    let mut preference_cursor = 0usize;
    while selected.len() < count {
        // First try the next preferred pattern that is still under cap.
        let mut candidates: Vec<&Movement> = Vec::new();
        if !options.preferred_patterns.is_empty() {
            for offset in 0..options.preferred_patterns.len() {
                let idx = (preference_cursor + offset) % options.preferred_patterns.len();
                let pattern = options.preferred_patterns[idx];
                if pattern_counts[pattern.index()] >= options.pattern_cap {
                    continue;
                }
                candidates = pool
                    .iter()
                    .filter(|m| m.pattern == pattern && !is_taken(&selected, m))
                    .collect();
                if !candidates.is_empty() {
                    preference_cursor = idx + 1;
                    break;
                }
            }
        }

        // Fall back to any under-cap movement, then to any movement at all.
        if candidates.is_empty() {
            candidates = pool
                .iter()
                .filter(|m| {
                    pattern_counts[m.pattern.index()] < options.pattern_cap
                        && !is_taken(&selected, m)
                })
                .collect();
        }
        if candidates.is_empty() {
            candidates = pool.iter().filter(|m| !is_taken(&selected, m)).collect();
        }

        match rng.choice(&candidates) {
            Some(pick) => {
                pattern_counts[pick.pattern.index()] += 1;
                selected.push((*pick).clone());
            }
            None => break, // pool exhausted; return what we have
        }
    }

    selected
}

// ============================================================================
// Slot Resolution
// ============================================================================

/// One step in the slot-filter relaxation sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotRelaxation {
    /// Full filter: pattern + compound + unilateral + energy system.
    Strict,
    /// Pattern match only.
    PatternOnly,
}

/// Relaxation steps tried in order when resolving a slot. A slot that
/// yields nothing after the last step is omitted by the caller.
pub const SLOT_RELAXATION_ORDER: [SlotRelaxation; 2] =
    [SlotRelaxation::Strict, SlotRelaxation::PatternOnly];

/// Candidates for a slot under a given relaxation step.
pub fn slot_candidates<'a>(
    pool: &'a [Movement],
    slot: &Slot,
    relaxation: SlotRelaxation,
) -> Vec<&'a Movement> {
    pool.iter()
        .filter(|m| {
            if let Some(pattern) = slot.pattern {
                if m.pattern != pattern {
                    return false;
                }
            }
            if relaxation == SlotRelaxation::Strict {
                if let Some(compound) = slot.compound {
                    if m.compound != compound {
                        return false;
                    }
                }
                if let Some(unilateral) = slot.unilateral {
                    if m.unilateral != unilateral {
                        return false;
                    }
                }
                if let Some(energy) = slot.energy_system {
                    if m.energy_system != energy {
                        return false;
                    }
                }
            }
            true
        })
        .collect()
}

/// Resolve a slot to up to `slot.count` movements, relaxing the filter
/// step by step. May return fewer than requested, or none.
///
/// Selection goes through [`sample_balanced_with_counts`], so a session
/// that threads `pattern_counts` across slots steers flexible slots away
/// from patterns already at the cap.
pub fn resolve_slot(
    pool: &[Movement],
    slot: &Slot,
    already_chosen: &[String],
    pattern_counts: &mut [u32; 8],
    rng: &mut SeededRandom,
    options: &SampleOptions,
) -> Vec<Movement> {
    for relaxation in SLOT_RELAXATION_ORDER {
        let candidates: Vec<Movement> = slot_candidates(pool, slot, relaxation)
            .into_iter()
            .filter(|m| !already_chosen.contains(&m.id))
            .cloned()
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let picked = sample_balanced_with_counts(
            &candidates,
            slot.count as usize,
            pattern_counts,
            rng,
            options,
        );
        if !picked.is_empty() {
            return picked;
        }
    }
    tracing::debug!(pattern = ?slot.pattern, "slot has no candidates after relaxation, omitting");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_catalog_validates() {
        validate_catalog(movement_catalog()).unwrap();
        assert!(movement_catalog().len() >= 40);
    }

    #[test]
    fn test_catalog_covers_every_pattern() {
        for pattern in MovementPattern::ALL {
            assert!(
                movement_catalog().iter().any(|m| m.pattern == pattern),
                "no movements for pattern {}",
                pattern
            );
        }
    }

    #[test]
    fn test_movement_by_id() {
        assert!(movement_by_id("back_squat").is_some());
        assert!(movement_by_id("nonexistent").is_none());
    }

    #[test]
    fn test_filter_by_equipment_intersection() {
        let available = strings(&["barbell", "squat_rack"]);
        let filtered = filter_by_equipment(movement_catalog(), &available);
        assert!(filtered.iter().any(|m| m.id == "back_squat"));
        assert!(filtered.iter().any(|m| m.id == "barbell_deadlift"));
        assert!(!filtered.iter().any(|m| m.id == "kb_swing"));
        assert!(!filtered.iter().any(|m| m.id == "pushup"));
    }

    #[test]
    fn test_no_barbell_constraint() {
        let constrained =
            avoid_constraints(movement_catalog(), &strings(&["no_barbell"]));
        assert!(!constrained.iter().any(|m| m.id == "back_squat"));
        assert!(!constrained.iter().any(|m| m.id == "barbell_deadlift"));
        assert!(constrained.iter().any(|m| m.id == "goblet_squat"));
    }

    #[test]
    fn test_low_impact_constraint() {
        let constrained =
            avoid_constraints(movement_catalog(), &strings(&["low_impact"]));
        for blocked in LOW_IMPACT_BLOCKLIST {
            assert!(!constrained.iter().any(|m| m.id == blocked));
        }
        assert!(constrained.iter().any(|m| m.id == "air_squat"));
    }

    #[test]
    fn test_upper_lower_constraints() {
        let upper = avoid_constraints(movement_catalog(), &strings(&["upper_only"]));
        assert!(upper.iter().all(|m| m.pattern.is_upper()));

        let lower = avoid_constraints(movement_catalog(), &strings(&["lower_only"]));
        assert!(lower.iter().all(|m| m.pattern.is_lower()));
    }

    #[test]
    fn test_unknown_constraint_is_noop() {
        let before = movement_catalog().len();
        let after =
            avoid_constraints(movement_catalog(), &strings(&["definitely_unknown"]));
        assert_eq!(before, after.len());
    }

    #[test]
    fn test_complexity_ceiling() {
        let easy = filter_by_complexity(movement_catalog(), 2);
        assert!(easy.iter().all(|m| m.complexity <= 2));
        assert!(!easy.iter().any(|m| m.id == "front_squat")); // complexity 5
    }

    #[test]
    fn test_sample_balanced_respects_pattern_cap() {
        let mut rng = SeededRandom::from_seed("balance");
        let options = SampleOptions {
            pattern_cap: 2,
            ..Default::default()
        };
        let picked = sample_balanced(movement_catalog(), 8, &mut rng, &options);
        assert_eq!(picked.len(), 8);

        let mut counts = [0u32; 8];
        for m in &picked {
            counts[m.pattern.index()] += 1;
        }
        assert!(counts.iter().all(|c| *c <= 2));
    }

    #[test]
    fn test_sample_balanced_compound_first() {
        let mut rng = SeededRandom::from_seed("compound");
        let options = SampleOptions {
            ensure_compound: true,
            ..Default::default()
        };
        let picked = sample_balanced(movement_catalog(), 5, &mut rng, &options);
        assert!(picked[0].compound);
    }

    #[test]
    fn test_sample_balanced_deterministic() {
        let options = SampleOptions {
            preferred_patterns: vec![MovementPattern::Squat, MovementPattern::Push],
            ..Default::default()
        };
        let mut a = SeededRandom::from_seed("det");
        let mut b = SeededRandom::from_seed("det");
        let pick_a: Vec<String> = sample_balanced(movement_catalog(), 6, &mut a, &options)
            .into_iter()
            .map(|m| m.id)
            .collect();
        let pick_b: Vec<String> = sample_balanced(movement_catalog(), 6, &mut b, &options)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(pick_a, pick_b);
    }

    #[test]
    fn test_sample_balanced_short_pool() {
        let mut rng = SeededRandom::from_seed("short");
        let pool: Vec<Movement> = movement_catalog()
            .iter()
            .filter(|m| m.pattern == MovementPattern::Carry)
            .cloned()
            .collect();
        let picked = sample_balanced(&pool, 10, &mut rng, &SampleOptions::default());
        assert!(picked.len() <= pool.len());
        assert!(!picked.is_empty());
    }

    fn resolve(slot: &Slot, pool: &[Movement], taken: &[String], seed: &str) -> Vec<Movement> {
        let mut rng = SeededRandom::from_seed(seed);
        let mut counts = [0u32; 8];
        resolve_slot(pool, slot, taken, &mut counts, &mut rng, &SampleOptions::default())
    }

    #[test]
    fn test_resolve_slot_strict_match() {
        let slot = Slot {
            count: 1,
            pattern: Some(MovementPattern::Squat),
            compound: Some(true),
            unilateral: None,
            energy_system: None,
        };
        let picked = resolve(&slot, movement_catalog(), &[], "slot");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].pattern, MovementPattern::Squat);
        assert!(picked[0].compound);
    }

    #[test]
    fn test_resolve_slot_relaxes_to_pattern_only() {
        // Carries have no compound movements, so the strict filter is empty
        // and resolution must fall back to pattern-only.
        let slot = Slot {
            count: 1,
            pattern: Some(MovementPattern::Carry),
            compound: Some(true),
            unilateral: None,
            energy_system: None,
        };
        let picked = resolve(&slot, movement_catalog(), &[], "relax");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].pattern, MovementPattern::Carry);
    }

    #[test]
    fn test_resolve_slot_empty_pool_is_omitted() {
        let slot = Slot {
            count: 2,
            pattern: Some(MovementPattern::Carry),
            compound: None,
            unilateral: None,
            energy_system: None,
        };
        // Barbell-only pool has no carries at all.
        let pool = filter_by_equipment(
            movement_catalog(),
            &strings(&["barbell"]),
        );
        let picked = resolve(&slot, &pool, &[], "empty");
        assert!(picked.is_empty());
    }

    #[test]
    fn test_resolve_slot_excludes_already_chosen() {
        let slot = Slot {
            count: 3,
            pattern: Some(MovementPattern::Carry),
            compound: None,
            unilateral: None,
            energy_system: None,
        };
        let taken = vec!["farmer_carry".to_string()];
        let picked = resolve(&slot, movement_catalog(), &taken, "dedup");
        assert!(picked.iter().all(|m| m.id != "farmer_carry"));
    }

    #[test]
    fn test_resolve_slot_avoids_patterns_at_cap() {
        // A flexible aerobic slot with squats already at the cap must
        // steer to another pattern, whatever the seed.
        let slot = Slot {
            count: 1,
            pattern: None,
            compound: None,
            unilateral: None,
            energy_system: Some(EnergySystem::Aerobic),
        };
        for seed in ["a", "b", "c", "d", "e", "f"] {
            let mut rng = SeededRandom::from_seed(seed);
            let mut counts = [0u32; 8];
            counts[MovementPattern::Squat.index()] = 2;
            let picked = resolve_slot(
                movement_catalog(),
                &slot,
                &[],
                &mut counts,
                &mut rng,
                &SampleOptions::default(),
            );
            assert_eq!(picked.len(), 1);
            assert_ne!(picked[0].pattern, MovementPattern::Squat);
        }
    }

    #[test]
    fn test_resolve_slot_fills_declared_pattern_even_at_cap() {
        // Template-declared patterns are the session's design; the cap is
        // soft and never empties such a slot.
        let slot = Slot {
            count: 1,
            pattern: Some(MovementPattern::Squat),
            compound: Some(true),
            unilateral: None,
            energy_system: None,
        };
        let mut rng = SeededRandom::from_seed("soft-cap");
        let mut counts = [0u32; 8];
        counts[MovementPattern::Squat.index()] = 2;
        let picked = resolve_slot(
            movement_catalog(),
            &slot,
            &[],
            &mut counts,
            &mut rng,
            &SampleOptions::default(),
        );
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].pattern, MovementPattern::Squat);
    }
}
