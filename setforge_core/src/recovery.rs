//! Warm-up and cool-down planning.
//!
//! Preparation and recovery movements live in their own sub-library,
//! separate from the main movement catalog. Plans are keyed to the main
//! workout's movement patterns and the session intensity, and draw from
//! derived rng sub-streams so they never perturb main-block sampling.

use crate::config::RecoveryConfig;
use crate::rng::SeededRandom;
use crate::types::{Exercise, MovementPattern};
use once_cell::sync::Lazy;

/// Category of a preparation/recovery movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrepCategory {
    GeneralMobility,
    PatternPrep,
    Activation,
    DynamicFlow,
    Breathing,
    Stretch,
    Restorative,
}

/// A movement in the warm-up/cool-down sub-library.
#[derive(Clone, Debug)]
pub struct PrepMovement {
    pub id: String,
    pub name: String,
    pub category: PrepCategory,
    /// Patterns this movement prepares or releases. Empty = general.
    pub patterns: Vec<MovementPattern>,
    pub equipment: Vec<String>,
    pub sets: u32,
    pub duration_seconds: u32,
}

/// A planned warm-up or cool-down sequence.
#[derive(Clone, Debug)]
pub struct RecoveryPlan {
    pub exercises: Vec<Exercise>,
    pub estimated_minutes: u32,
}

static PREP_CATALOG: Lazy<Vec<PrepMovement>> = Lazy::new(build_prep_catalog);

/// Get a reference to the cached preparation/recovery sub-library
pub fn prep_catalog() -> &'static [PrepMovement] {
    &PREP_CATALOG
}

/// Look up a preparation movement by id.
pub fn prep_movement_by_id(id: &str) -> Option<&'static PrepMovement> {
    PREP_CATALOG.iter().find(|m| m.id == id)
}

fn prep(
    id: &str,
    name: &str,
    category: PrepCategory,
    patterns: &[MovementPattern],
    equipment: &[&str],
    sets: u32,
    duration_seconds: u32,
) -> PrepMovement {
    PrepMovement {
        id: id.to_string(),
        name: name.to_string(),
        category,
        patterns: patterns.to_vec(),
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        sets,
        duration_seconds,
    }
}

fn build_prep_catalog() -> Vec<PrepMovement> {
    use MovementPattern::*;
    use PrepCategory::*;

    vec![
        // General mobility
        prep("arm_circles", "Arm Circles", GeneralMobility, &[], &["bodyweight"], 1, 45),
        prep("hip_circles", "Hip Circles", GeneralMobility, &[], &["bodyweight"], 1, 45),
        prep("cat_cow", "Cat-Cow", GeneralMobility, &[], &["bodyweight", "floor"], 1, 45),
        prep("worlds_greatest_stretch", "World's Greatest Stretch", GeneralMobility, &[], &["bodyweight", "floor"], 1, 60),
        // Pattern preparation
        prep("hip_hinge_drill", "Hip Hinge Drill", PatternPrep, &[Hinge], &["bodyweight"], 2, 30),
        prep("deep_squat_hold", "Deep Squat Hold", PatternPrep, &[Squat], &["bodyweight"], 2, 30),
        prep("scap_pushup", "Scapular Push-Up", PatternPrep, &[Push], &["bodyweight", "floor"], 2, 30),
        prep("shoulder_swings", "Shoulder Swings", PatternPrep, &[Pull, Push], &["bodyweight"], 2, 30),
        prep("band_pull_prep", "Band Pull Prep", PatternPrep, &[Pull], &["bands"], 2, 30),
        prep("core_brace_drill", "Core Brace Drill", PatternPrep, &[Core], &["bodyweight", "floor"], 2, 30),
        prep("split_stance_rock", "Split Stance Rock", PatternPrep, &[Mono], &["bodyweight"], 2, 30),
        prep("torso_rotations", "Torso Rotations", PatternPrep, &[Rotation], &["bodyweight"], 1, 45),
        prep("shoulder_pack_drill", "Shoulder Pack Drill", PatternPrep, &[Carry], &["bodyweight"], 2, 30),
        // Activation
        prep("glute_bridge_activation", "Glute Bridge Activation", Activation, &[], &["bodyweight", "floor"], 2, 30),
        prep("band_monster_walk", "Band Monster Walk", Activation, &[], &["bands"], 2, 30),
        prep("plank_shoulder_tap", "Plank Shoulder Tap", Activation, &[], &["bodyweight", "floor"], 2, 30),
        prep("calf_raise_activation", "Calf Raise Activation", Activation, &[], &["bodyweight"], 2, 30),
        // Dynamic flow
        prep("inchworm", "Inchworm", DynamicFlow, &[], &["bodyweight", "floor"], 1, 60),
        prep("lunge_flow", "Lunge Flow", DynamicFlow, &[], &["bodyweight"], 1, 60),
        prep("bear_crawl_flow", "Bear Crawl Flow", DynamicFlow, &[], &["bodyweight", "floor"], 1, 45),
        // Breathing
        prep("box_breathing", "Box Breathing", Breathing, &[], &["bodyweight"], 1, 180),
        // Stretches
        prep("hamstring_stretch", "Hamstring Stretch", Stretch, &[Hinge], &["bodyweight", "floor"], 1, 60),
        prep("deep_squat_stretch", "Deep Squat Stretch", Stretch, &[Squat], &["bodyweight"], 1, 60),
        prep("couch_stretch", "Couch Stretch", Stretch, &[Mono], &["bodyweight", "floor"], 1, 60),
        prep("doorway_pec_stretch", "Doorway Pec Stretch", Stretch, &[Push], &["bodyweight"], 1, 60),
        prep("lat_stretch", "Lat Stretch", Stretch, &[Pull], &["bodyweight"], 1, 60),
        prep("childs_pose", "Child's Pose", Stretch, &[Core], &["bodyweight", "floor"], 1, 60),
        // Restorative
        prep("legs_up_wall", "Legs Up the Wall", Restorative, &[], &["bodyweight", "floor"], 1, 120),
        prep("supine_twist", "Supine Twist", Restorative, &[], &["bodyweight", "floor"], 1, 90),
        prep("standing_forward_fold", "Standing Forward Fold", Restorative, &[], &["bodyweight"], 1, 90),
    ]
}

/// Pattern to release in the cool-down for each main-block pattern.
fn stretch_pattern_for(pattern: MovementPattern) -> MovementPattern {
    use MovementPattern::*;
    match pattern {
        Hinge => Hinge,
        Squat => Squat,
        Mono => Mono,
        Push => Push,
        Pull => Pull,
        Core => Core,
        Carry => Pull,
        Rotation => Core,
    }
}

/// True when the session intensity warrants an extended cool-down block.
pub fn needs_extended_cooldown(intensity: u8, config: &RecoveryConfig) -> bool {
    intensity >= config.extended_cooldown_intensity
}

fn usable(m: &PrepMovement, equipment: &[String], chosen: &[String]) -> bool {
    !chosen.contains(&m.id) && m.equipment.iter().any(|e| equipment.contains(e))
}

fn pick_one(
    category: PrepCategory,
    pattern: Option<MovementPattern>,
    equipment: &[String],
    chosen: &mut Vec<String>,
    rng: &mut SeededRandom,
) -> Option<&'static PrepMovement> {
    let candidates: Vec<&'static PrepMovement> = PREP_CATALOG
        .iter()
        .filter(|m| m.category == category)
        .filter(|m| pattern.map(|p| m.patterns.contains(&p)).unwrap_or(true))
        .filter(|m| usable(m, equipment, chosen))
        .collect();
    let pick = rng.choice(&candidates).copied()?;
    chosen.push(pick.id.clone());
    Some(pick)
}

fn to_exercise(m: &PrepMovement) -> Exercise {
    Exercise {
        movement_id: m.id.clone(),
        name: m.name.clone(),
        sets: m.sets,
        reps: format!("{}s", m.duration_seconds),
        load_percent: None,
        duration_seconds: Some(m.duration_seconds),
        notes: None,
    }
}

fn plan_minutes(exercises: &[&PrepMovement]) -> u32 {
    let total_seconds: u32 = exercises.iter().map(|m| m.sets * m.duration_seconds).sum();
    total_seconds.div_ceil(60)
}

// ============================================================================
// Warm-up
// ============================================================================

/// Build the warm-up sequence for the session.
///
/// Opens with general mobility, then up to three pattern-specific preps
/// for the main workout's distinct patterns, then activation and dynamic
/// flow as the target duration allows.
pub fn generate_warmup(
    main_patterns: &[MovementPattern],
    equipment: &[String],
    target_minutes: u32,
    seed: &str,
    config: &RecoveryConfig,
) -> RecoveryPlan {
    let mut rng = SeededRandom::derived(seed, "_warmup");
    let mut chosen: Vec<String> = Vec::new();
    let mut picks: Vec<&'static PrepMovement> = Vec::new();

    if let Some(m) = pick_one(
        PrepCategory::GeneralMobility,
        None,
        equipment,
        &mut chosen,
        &mut rng,
    ) {
        picks.push(m);
    }

    let mut distinct: Vec<MovementPattern> = Vec::new();
    for p in main_patterns {
        if !distinct.contains(p) {
            distinct.push(*p);
        }
    }
    for pattern in distinct.iter().take(3) {
        if let Some(m) = pick_one(
            PrepCategory::PatternPrep,
            Some(*pattern),
            equipment,
            &mut chosen,
            &mut rng,
        ) {
            picks.push(m);
        }
    }

    if target_minutes >= config.activation_min_minutes {
        if let Some(m) = pick_one(
            PrepCategory::Activation,
            None,
            equipment,
            &mut chosen,
            &mut rng,
        ) {
            picks.push(m);
        }
    }
    if target_minutes >= config.flow_min_minutes {
        if let Some(m) = pick_one(
            PrepCategory::DynamicFlow,
            None,
            equipment,
            &mut chosen,
            &mut rng,
        ) {
            picks.push(m);
        }
    }

    let estimated_minutes = plan_minutes(&picks).clamp(5, target_minutes.max(5));
    RecoveryPlan {
        exercises: picks.iter().map(|m| to_exercise(m)).collect(),
        estimated_minutes,
    }
}

// ============================================================================
// Cool-down
// ============================================================================

/// Build the cool-down sequence for the session.
///
/// High-intensity sessions open with a breathing drill and get a longer
/// base duration. Stretches map from the main patterns through a fixed
/// pattern table; a restorative pose always closes the sequence.
pub fn generate_cooldown(
    main_patterns: &[MovementPattern],
    equipment: &[String],
    intensity: u8,
    seed: &str,
    config: &RecoveryConfig,
) -> RecoveryPlan {
    let mut rng = SeededRandom::derived(seed, "_cooldown");
    let mut chosen: Vec<String> = Vec::new();
    let mut picks: Vec<&'static PrepMovement> = Vec::new();

    let extended = needs_extended_cooldown(intensity, config);
    let base_minutes = if extended { 8 } else { 5 };

    if extended {
        if let Some(m) = pick_one(
            PrepCategory::Breathing,
            None,
            equipment,
            &mut chosen,
            &mut rng,
        ) {
            picks.push(m);
        }
    }

    let mut stretch_patterns: Vec<MovementPattern> = Vec::new();
    for p in main_patterns {
        let mapped = stretch_pattern_for(*p);
        if !stretch_patterns.contains(&mapped) {
            stretch_patterns.push(mapped);
        }
    }
    for pattern in stretch_patterns.iter().take(2) {
        if let Some(m) = pick_one(
            PrepCategory::Stretch,
            Some(*pattern),
            equipment,
            &mut chosen,
            &mut rng,
        ) {
            picks.push(m);
        }
    }

    if let Some(m) = pick_one(
        PrepCategory::Restorative,
        None,
        equipment,
        &mut chosen,
        &mut rng,
    ) {
        picks.push(m);
    }

    let estimated_minutes = plan_minutes(&picks).max(base_minutes);
    RecoveryPlan {
        exercises: picks.iter().map(|m| to_exercise(m)).collect(),
        estimated_minutes,
    }
}
