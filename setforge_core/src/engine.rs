//! The workout generation orchestrator.
//!
//! Composes the seeded random source, catalogs, intensity mapper,
//! progression analyzer, and warm-up/cool-down planner into one validated
//! workout. Pure and synchronous: for a fixed seed, history, and clock
//! the output is bit-for-bit reproducible.

use crate::catalog::{
    avoid_constraints, filter_by_complexity, filter_by_equipment, movement_by_id,
    movement_catalog, resolve_slot, SampleOptions,
};
use crate::config::Config;
use crate::intensity::{
    apply_health_caps, clamp_intensity, create_session_intensity_plan, get_intensity_parameters,
    intensity_label,
};
use crate::progression::{generate_progression_directives, FeedbackSource};
use crate::recovery::{
    generate_cooldown, generate_warmup, needs_extended_cooldown, prep_movement_by_id,
    RecoveryPlan,
};
use crate::rng::SeededRandom;
use crate::templates::select_template;
use crate::types::{
    BlockKind, BlockStructure, Exercise, GenerationChoices, GenerationRequest, GenerationResult,
    HealthModifiers, HistoryEntry, Movement, MovementPattern, Template, Workout, WorkoutBlock,
    WorkoutMetadata,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};

const MIN_MINUTES: u32 = 5;
const MAX_MINUTES: u32 = 120;

/// Generate a workout for the request against the supplied history.
///
/// `feedback` is an optional external RPE lookup used only to enrich
/// history before progression analysis; its failure never fails the call.
pub fn generate_workout(
    request: &GenerationRequest,
    history: &[HistoryEntry],
    feedback: Option<&dyn FeedbackSource>,
    config: &Config,
) -> Result<GenerationResult> {
    generate_workout_at(request, history, feedback, config, Utc::now())
}

/// Like [`generate_workout`] but with an explicit clock, so history-window
/// math is reproducible in tests.
pub fn generate_workout_at(
    request: &GenerationRequest,
    history: &[HistoryEntry],
    feedback: Option<&dyn FeedbackSource>,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<GenerationResult> {
    if request.minutes < MIN_MINUTES || request.minutes > MAX_MINUTES {
        return Err(Error::InvalidRequest(format!(
            "minutes must be between {} and {}, got {}",
            MIN_MINUTES, MAX_MINUTES, request.minutes
        )));
    }
    if request.seed.is_empty() {
        return Err(Error::InvalidRequest("seed must not be empty".to_string()));
    }

    let health = request.health.clone().unwrap_or_default();
    let target = clamp_intensity(request.target_intensity);
    let capped = apply_health_caps(target, &health);

    // Progression runs on its own derived stream so that consuming it
    // never shifts main-block sampling.
    let mut progression_rng = SeededRandom::derived(&request.seed, "_progression");
    let directives = generate_progression_directives(
        request.user_id.as_deref(),
        history,
        request.archetype,
        feedback,
        &mut progression_rng,
        &config.progression,
        now,
    );

    let adjusted =
        (i16::from(capped) + i16::from(directives.intensity_delta)).clamp(1, 10) as u8;

    let mut rng = SeededRandom::from_seed(&request.seed);
    let workout_id = format!("wkt-{:08x}", rng.next_u32());

    let template = select_template(request.archetype, request.minutes, adjusted, &mut rng)
        .ok_or(Error::NoTemplate {
            archetype: request.archetype,
            minutes: request.minutes,
        })?;

    // Health caps are a safety bound, so they re-apply even to a
    // progression-raised intensity.
    let params = get_intensity_parameters(adjusted, &health);
    let effective = params.level;

    tracing::info!(
        seed = %request.seed,
        template = %template.id,
        target,
        capped,
        effective,
        progression = %directives.progression_type,
        "generating workout"
    );

    // Main work honors exactly the equipment the request lists; only the
    // warm-up/cool-down planners may additionally assume floor space and
    // bodyweight drills.
    let pool = filter_by_complexity(
        &avoid_constraints(
            &filter_by_equipment(movement_catalog(), &main_equipment(request)),
            &request.constraints,
        ),
        params.complexity_ceiling,
    );
    let recovery_equipment = recovery_equipment(request);

    let main_patterns = declared_patterns(template);
    let warmup_target = warmup_target_minutes(request.minutes);
    let warmup = generate_warmup(
        &main_patterns,
        &recovery_equipment,
        warmup_target,
        &request.seed,
        &config.recovery,
    );

    let load_percent = round1(
        (params.load_percent_mid() * directives.load_multiplier).clamp(20.0, 100.0),
    );
    let volume_scale = params.volume_multiplier * directives.volume_multiplier;

    let mut blocks: Vec<WorkoutBlock> = vec![recovery_block(
        "Warm-Up",
        BlockKind::Warmup,
        &warmup,
    )];
    let mut movement_ids: Vec<String> =
        warmup.exercises.iter().map(|e| e.movement_id.clone()).collect();
    let mut patterns_used: Vec<MovementPattern> = Vec::new();

    let sampling = SampleOptions {
        pattern_cap: config.sampling.pattern_cap,
        ..SampleOptions::default()
    };
    let mut pattern_counts = [0u32; 8];

    for template_block in &template.blocks {
        let mut chosen: Vec<Movement> = Vec::new();
        for slot in &template_block.slots {
            let picked = resolve_slot(
                &pool,
                slot,
                &movement_ids,
                &mut pattern_counts,
                &mut rng,
                &sampling,
            );
            for m in picked {
                movement_ids.push(m.id.clone());
                chosen.push(m);
            }
        }
        if chosen.is_empty() {
            tracing::debug!(block = %template_block.name, "block resolved no movements, omitting");
            continue;
        }

        for m in &chosen {
            if !patterns_used.contains(&m.pattern) {
                patterns_used.push(m.pattern);
            }
        }

        let exercises: Vec<Exercise> = chosen
            .iter()
            .map(|m| materialize_exercise(m, &template_block.structure, volume_scale, load_percent))
            .collect();
        let estimated_minutes = estimate_block_minutes(&template_block.structure, &exercises);

        blocks.push(WorkoutBlock {
            name: template_block.name.clone(),
            kind: template_block.kind,
            structure: template_block.structure.clone(),
            exercises,
            estimated_minutes,
        });
    }

    let cooldown = if needs_extended_cooldown(effective, &config.recovery) {
        let plan = generate_cooldown(
            &main_patterns,
            &recovery_equipment,
            effective,
            &request.seed,
            &config.recovery,
        );
        movement_ids.extend(plan.exercises.iter().map(|e| e.movement_id.clone()));
        Some(plan)
    } else {
        None
    };
    if let Some(plan) = &cooldown {
        blocks.push(recovery_block("Cool-Down", BlockKind::Cooldown, plan));
    }

    let total_minutes = blocks
        .iter()
        .map(|b| b.estimated_minutes)
        .sum::<f64>()
        .round()
        .max(1.0) as u32;

    let description = build_description(request, template, target, capped, &directives);
    let coaching_notes = build_coaching_notes(target, capped, &health, &directives);

    let workout = Workout {
        id: workout_id,
        name: format!("{} {} Session", intensity_label(effective), request.archetype),
        description,
        total_minutes,
        estimated_intensity: effective,
        blocks,
        coaching_notes,
        metadata: WorkoutMetadata {
            template_id: template.id.clone(),
            patterns_used,
            equipment: request.equipment.clone(),
            progression_type: directives.progression_type,
            progression_reasoning: directives.reasoning.clone(),
        },
    };

    validate_workout(&workout)?;

    let choices = GenerationChoices {
        template_id: template.id.clone(),
        movement_ids,
        progression_type: directives.progression_type,
    };
    let intensity_plan = create_session_intensity_plan(request.minutes, effective, &health);

    Ok(GenerationResult {
        workout,
        choices,
        intensity_plan,
    })
}

// ============================================================================
// Assembly Helpers
// ============================================================================

/// Equipment for warm-up/cool-down planning: the requested list plus
/// implicit bodyweight and floor space, unless a constraint names them.
fn recovery_equipment(request: &GenerationRequest) -> Vec<String> {
    let mut equipment = request.equipment.clone();
    for implicit in ["bodyweight", "floor"] {
        let excluded = request
            .constraints
            .iter()
            .any(|c| c == &format!("no_{}", implicit));
        if !excluded && !equipment.iter().any(|e| e == implicit) {
            equipment.push(implicit.to_string());
        }
    }
    equipment
}

/// Equipment for main-block filtering: exactly what the request lists.
/// A request listing nothing trains with bodyweight alone.
fn main_equipment(request: &GenerationRequest) -> Vec<String> {
    if request.equipment.is_empty() {
        recovery_equipment(request)
    } else {
        request.equipment.clone()
    }
}

/// Distinct patterns the template's slots declare, in block order.
fn declared_patterns(template: &Template) -> Vec<MovementPattern> {
    let mut patterns = Vec::new();
    for block in &template.blocks {
        for slot in &block.slots {
            if let Some(p) = slot.pattern {
                if !patterns.contains(&p) {
                    patterns.push(p);
                }
            }
        }
    }
    patterns
}

fn warmup_target_minutes(session_minutes: u32) -> u32 {
    if session_minutes >= 45 {
        10
    } else if session_minutes >= 25 {
        8
    } else {
        6
    }
}

fn recovery_block(name: &str, kind: BlockKind, plan: &RecoveryPlan) -> WorkoutBlock {
    WorkoutBlock {
        name: name.to_string(),
        kind,
        structure: BlockStructure::Circuit {
            rounds: 1,
            work_seconds: 45,
            rest_seconds: 0,
        },
        exercises: plan.exercises.clone(),
        estimated_minutes: f64::from(plan.estimated_minutes),
    }
}

fn materialize_exercise(
    movement: &Movement,
    structure: &BlockStructure,
    volume_scale: f64,
    load_percent: f64,
) -> Exercise {
    let base_sets = structure.work_sets();
    let sets = if matches!(
        structure,
        BlockStructure::Straight { .. } | BlockStructure::Superset { .. }
    ) {
        ((f64::from(base_sets) * volume_scale).round() as u32).max(1)
    } else {
        base_sets
    };

    let duration_seconds = match structure {
        BlockStructure::Circuit { work_seconds, .. }
        | BlockStructure::Interval { work_seconds, .. } => Some(*work_seconds),
        _ => None,
    };

    Exercise {
        movement_id: movement.id.clone(),
        name: movement.name.clone(),
        sets,
        reps: structure.rep_scheme(),
        load_percent: structure.takes_load().then_some(load_percent),
        duration_seconds,
        notes: movement.unilateral.then(|| "per side".to_string()),
    }
}

/// Minute estimate per block. Set-based blocks use ~1.5 working minutes
/// per set plus inter-set rest; timed structures use their clock.
fn estimate_block_minutes(structure: &BlockStructure, exercises: &[Exercise]) -> f64 {
    match structure {
        BlockStructure::Straight { rest_seconds, .. } => {
            let total_sets: u32 = exercises.iter().map(|e| e.sets).sum();
            f64::from(total_sets) * 1.5 + f64::from(total_sets * rest_seconds) / 60.0
        }
        BlockStructure::Superset { rest_seconds, .. } => {
            let rounds = exercises.iter().map(|e| e.sets).max().unwrap_or(0);
            let work: u32 = exercises.iter().map(|e| e.sets).sum();
            f64::from(work) * 1.0 + f64::from(rounds * rest_seconds) / 60.0
        }
        BlockStructure::Circuit {
            rounds,
            work_seconds,
            rest_seconds,
        } => {
            let per_round = work_seconds * exercises.len() as u32 + rest_seconds;
            f64::from(rounds * per_round) / 60.0
        }
        BlockStructure::Interval {
            rounds,
            work_seconds,
            rest_seconds,
        } => f64::from(rounds * (work_seconds + rest_seconds)) / 60.0,
        BlockStructure::Emom { minutes, .. } | BlockStructure::Amrap { minutes } => {
            f64::from(*minutes)
        }
    }
}

fn capping_notice(target: u8, capped: u8) -> Option<String> {
    (capped < target).then(|| {
        format!(
            "Intensity capped from {} to {} based on today's health signals",
            target, capped
        )
    })
}

fn build_description(
    request: &GenerationRequest,
    template: &Template,
    target: u8,
    capped: u8,
    directives: &crate::types::ProgressionDirectives,
) -> String {
    let mut description = format!(
        "A {}-minute {} session built on the {} template.",
        request.minutes,
        request.archetype.to_string().to_lowercase(),
        template.name
    );
    if let Some(notice) = capping_notice(target, capped) {
        description.push(' ');
        description.push_str(&notice);
        description.push('.');
    }
    if directives.deload {
        description.push_str(" This is a deload session with reduced load and volume.");
    } else if (directives.load_multiplier - 1.0).abs() > f64::EPSILON {
        description.push_str(" Loads are adjusted from your recent baseline.");
    }
    description
}

fn build_coaching_notes(
    target: u8,
    capped: u8,
    health: &HealthModifiers,
    directives: &crate::types::ProgressionDirectives,
) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(notice) = capping_notice(target, capped) {
        notes.push(notice);
    }
    if directives.deload {
        notes.push("Deload session: move well, leave plenty in the tank".to_string());
    } else {
        notes.push(format!("Progression focus: {}", directives.progression_type));
    }
    notes.push(directives.reasoning.clone());

    let low = |v: Option<f64>, t: f64| v.map(|x| x < t).unwrap_or(false);
    if low(health.vitality, 40.0) || low(health.overall, 40.0) || low(health.recovery, 30.0) {
        notes.push(
            "Health scores are low today; keep effort conservative and stop early if needed"
                .to_string(),
        );
    }
    notes
}

// ============================================================================
// Validation
// ============================================================================

/// Structural validation of an assembled workout. A failure here is an
/// internal logic defect, not bad input.
pub fn validate_workout(workout: &Workout) -> Result<()> {
    if workout.id.is_empty() || workout.name.is_empty() || workout.description.is_empty() {
        return Err(Error::InvalidWorkout(
            "missing id, name, or description".to_string(),
        ));
    }
    if workout.total_minutes == 0 {
        return Err(Error::InvalidWorkout("total minutes must be positive".to_string()));
    }
    if workout.estimated_intensity == 0 {
        return Err(Error::InvalidWorkout(
            "estimated intensity must be positive".to_string(),
        ));
    }
    if workout.blocks.is_empty() {
        return Err(Error::InvalidWorkout("workout has no blocks".to_string()));
    }
    if workout.coaching_notes.is_empty() {
        return Err(Error::InvalidWorkout("workout has no coaching notes".to_string()));
    }
    if workout.metadata.template_id.is_empty() {
        return Err(Error::InvalidWorkout("metadata missing template id".to_string()));
    }

    for (bi, block) in workout.blocks.iter().enumerate() {
        if block.name.is_empty() {
            return Err(Error::InvalidWorkout(format!("block {} has no name", bi)));
        }
        if block.exercises.is_empty() {
            return Err(Error::InvalidWorkout(format!(
                "block {} ({}) has no exercises",
                bi, block.name
            )));
        }
        for (ei, exercise) in block.exercises.iter().enumerate() {
            if exercise.movement_id.is_empty() || exercise.name.is_empty() {
                return Err(Error::InvalidWorkout(format!(
                    "block {} exercise {} missing movement reference",
                    bi, ei
                )));
            }
            if movement_by_id(&exercise.movement_id).is_none()
                && prep_movement_by_id(&exercise.movement_id).is_none()
            {
                return Err(Error::InvalidWorkout(format!(
                    "block {} exercise {} references unknown movement {}",
                    bi, ei, exercise.movement_id
                )));
            }
            if exercise.sets == 0 {
                return Err(Error::InvalidWorkout(format!(
                    "block {} exercise {} has zero sets",
                    bi, ei
                )));
            }
            if exercise.reps.is_empty() {
                return Err(Error::InvalidWorkout(format!(
                    "block {} exercise {} has no rep scheme",
                    bi, ei
                )));
            }
        }
    }
    Ok(())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Archetype;

    fn request(
        archetype: Archetype,
        minutes: u32,
        intensity: u8,
        equipment: &[&str],
        seed: &str,
    ) -> GenerationRequest {
        GenerationRequest {
            archetype,
            minutes,
            target_intensity: intensity,
            equipment: equipment.iter().map(|e| e.to_string()).collect(),
            constraints: Vec::new(),
            health: None,
            user_id: None,
            seed: seed.to_string(),
        }
    }

    fn full_gym() -> Vec<&'static str> {
        vec![
            "barbell",
            "squat_rack",
            "dumbbell",
            "kettlebell",
            "bench",
            "bands",
            "pullup_bar",
            "box",
            "rower",
        ]
    }

    fn generate(req: &GenerationRequest) -> GenerationResult {
        generate_workout(req, &[], None, &Config::default()).unwrap()
    }

    #[test]
    fn test_determinism_byte_for_byte() {
        let req = request(Archetype::Strength, 45, 8, &full_gym(), "user42_2024-03-01");
        let a = generate(&req);
        let b = generate(&req);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&request(Archetype::Mixed, 45, 6, &full_gym(), "seed-a"));
        let b = generate(&request(Archetype::Mixed, 45, 6, &full_gym(), "seed-b"));
        assert_ne!(a.choices.movement_ids, b.choices.movement_ids);
    }

    #[test]
    fn test_example_scenario_strength_45() {
        let req = request(
            Archetype::Strength,
            45,
            8,
            &["barbell", "squat_rack"],
            "user123_2024-01-15",
        );
        let result = generate(&req);
        let workout = &result.workout;

        assert_eq!(result.choices.template_id, "strength_full_45");
        assert_eq!(workout.estimated_intensity, 8);
        assert!(workout
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Warmup && !b.exercises.is_empty()));

        // Main work includes a loaded compound squat or hinge at >= 75%.
        let loaded_compound = workout
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Main)
            .flat_map(|b| &b.exercises)
            .filter_map(|e| {
                let m = movement_by_id(&e.movement_id)?;
                Some((m, e.load_percent?))
            })
            .any(|(m, load)| {
                m.compound
                    && matches!(
                        m.pattern,
                        MovementPattern::Squat | MovementPattern::Hinge
                    )
                    && load >= 75.0
            });
        assert!(loaded_compound);

        assert_eq!(
            workout.metadata.progression_type,
            crate::types::ProgressionType::Load
        );
        assert_eq!(
            workout.metadata.progression_reasoning,
            "Conservative start due to no recent history"
        );
    }

    #[test]
    fn test_capping_scenario() {
        let mut req = request(
            Archetype::Strength,
            45,
            8,
            &["barbell", "squat_rack"],
            "user123_2024-01-15",
        );
        req.health = Some(HealthModifiers {
            vitality: Some(30.0),
            ..Default::default()
        });
        let result = generate(&req);

        assert!(result.workout.estimated_intensity <= 6);
        assert!(result.workout.description.contains("capped"));
        assert!(result
            .workout
            .coaching_notes
            .iter()
            .any(|n| n.contains("capped")));
    }

    #[test]
    fn test_structural_completeness_grid() {
        let config = Config::default();
        for archetype in Archetype::ALL {
            for minutes in [5u32, 15, 30, 45, 60, 90, 120] {
                for intensity in [1u8, 5, 10] {
                    let req = request(archetype, minutes, intensity, &full_gym(), "grid-seed");
                    let result = generate_workout(&req, &[], None, &config)
                        .unwrap_or_else(|e| {
                            panic!("{} {}min int{}: {}", archetype, minutes, intensity, e)
                        });
                    validate_workout(&result.workout).unwrap();
                    assert!(result
                        .workout
                        .blocks
                        .iter()
                        .any(|b| b.kind == BlockKind::Warmup));
                    if needs_extended_cooldown(
                        result.workout.estimated_intensity,
                        &config.recovery,
                    ) {
                        assert!(result
                            .workout
                            .blocks
                            .iter()
                            .any(|b| b.kind == BlockKind::Cooldown));
                    }
                }
            }
        }
    }

    fn main_block_movements(result: &GenerationResult) -> Vec<&'static Movement> {
        result
            .workout
            .blocks
            .iter()
            .filter(|b| b.kind != BlockKind::Warmup && b.kind != BlockKind::Cooldown)
            .flat_map(|b| &b.exercises)
            .filter_map(|e| movement_by_id(&e.movement_id))
            .collect()
    }

    #[test]
    fn test_equipment_respect() {
        let req = request(Archetype::Mixed, 45, 6, &["kettlebell"], "equip-seed");
        let result = generate(&req);

        let movements = main_block_movements(&result);
        assert!(!movements.is_empty());
        for m in movements {
            assert!(
                m.equipment.iter().any(|e| e == "kettlebell"),
                "{} uses unavailable equipment",
                m.id
            );
        }
    }

    #[test]
    fn test_main_blocks_never_assume_unlisted_equipment() {
        // Bodyweight-only movements must not appear in main work when the
        // request lists real equipment with no overlap.
        let requested = ["barbell", "squat_rack"];
        for i in 0..6 {
            let req = request(
                Archetype::Strength,
                45,
                8,
                &requested,
                &format!("gear-{}", i),
            );
            let result = generate(&req);
            for m in main_block_movements(&result) {
                assert!(
                    m.equipment.iter().any(|e| requested.contains(&e.as_str())),
                    "seed gear-{}: {} needs none of the requested equipment",
                    i,
                    m.id
                );
            }
        }
    }

    #[test]
    fn test_empty_equipment_falls_back_to_bodyweight() {
        let req = request(Archetype::Mixed, 30, 5, &[], "no-gear");
        let result = generate(&req);

        let movements = main_block_movements(&result);
        assert!(!movements.is_empty());
        for m in movements {
            assert!(
                m.equipment
                    .iter()
                    .any(|e| e == "bodyweight" || e == "floor"),
                "{} needs equipment the request never listed",
                m.id
            );
        }
    }

    #[test]
    fn test_pattern_cap_config_shapes_sampling() {
        let default_config = Config::default();
        let mut tight = Config::default();
        tight.sampling.pattern_cap = 1;

        let equipment = [
            "barbell",
            "squat_rack",
            "dumbbell",
            "bench",
            "rower",
            "bands",
            "bodyweight",
            "floor",
        ];
        let mut diverged = false;
        for i in 0..16 {
            let req = request(Archetype::Mixed, 70, 6, &equipment, &format!("cap-{}", i));
            let loose = generate_workout(&req, &[], None, &default_config).unwrap();
            let strict = generate_workout(&req, &[], None, &tight).unwrap();
            if serde_json::to_string(&loose).unwrap() != serde_json::to_string(&strict).unwrap() {
                diverged = true;
                break;
            }
        }
        assert!(diverged, "pattern cap never influenced sampling");
    }

    #[test]
    fn test_no_barbell_constraint_respected() {
        let mut req = request(Archetype::Strength, 45, 7, &full_gym(), "constraint-seed");
        req.constraints = vec!["no_barbell".to_string()];
        let result = generate(&req);

        for block in &result.workout.blocks {
            for exercise in &block.exercises {
                if let Some(m) = movement_by_id(&exercise.movement_id) {
                    assert!(
                        !m.equipment.iter().any(|e| e == "barbell"),
                        "{} requires a barbell",
                        m.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_invalid_minutes_rejected() {
        let too_short = request(Archetype::Strength, 3, 5, &full_gym(), "seed");
        assert!(matches!(
            generate_workout(&too_short, &[], None, &Config::default()),
            Err(Error::InvalidRequest(_))
        ));
        let too_long = request(Archetype::Strength, 200, 5, &full_gym(), "seed");
        assert!(generate_workout(&too_long, &[], None, &Config::default()).is_err());
    }

    #[test]
    fn test_empty_seed_rejected() {
        let req = request(Archetype::Strength, 45, 5, &full_gym(), "");
        assert!(matches!(
            generate_workout(&req, &[], None, &Config::default()),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_cooldown_only_when_intense() {
        let hot = generate(&request(Archetype::Strength, 45, 8, &full_gym(), "hot"));
        assert!(hot
            .workout
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Cooldown));

        let easy = generate(&request(Archetype::Endurance, 30, 3, &full_gym(), "easy"));
        assert!(!easy
            .workout
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Cooldown));
    }

    #[test]
    fn test_coaching_notes_always_present() {
        let result = generate(&request(Archetype::Endurance, 30, 4, &full_gym(), "notes"));
        assert!(!result.workout.coaching_notes.is_empty());
    }

    #[test]
    fn test_total_minutes_positive_and_plausible() {
        let result = generate(&request(Archetype::Strength, 45, 8, &full_gym(), "time"));
        assert!(result.workout.total_minutes > 0);
        // Warm-up plus four main blocks plus cool-down should land in the
        // broad vicinity of the request.
        assert!(result.workout.total_minutes >= 20);
        assert!(result.workout.total_minutes <= 90);
    }

    #[test]
    fn test_intensity_plan_attached() {
        let result = generate(&request(Archetype::Mixed, 60, 6, &full_gym(), "plan"));
        assert_eq!(result.intensity_plan.total_minutes, 60);
        assert!(!result.intensity_plan.phases.is_empty());
    }

    #[test]
    fn test_choices_cover_all_exercises() {
        let result = generate(&request(Archetype::Strength, 45, 8, &full_gym(), "choices"));
        for block in &result.workout.blocks {
            for exercise in &block.exercises {
                assert!(result.choices.movement_ids.contains(&exercise.movement_id));
            }
        }
    }

    #[test]
    fn test_validate_rejects_malformed_workout() {
        let result = generate(&request(Archetype::Strength, 45, 8, &full_gym(), "valid"));
        let mut broken = result.workout.clone();
        broken.blocks[0].exercises[0].sets = 0;
        let err = validate_workout(&broken).unwrap_err();
        assert!(err.to_string().contains("zero sets"));

        let mut unknown = result.workout;
        unknown.blocks[1].exercises[0].movement_id = "not_a_movement".to_string();
        assert!(validate_workout(&unknown).is_err());
    }
}
