//! Built-in workout templates and template selection.
//!
//! Templates are archetype-bound structural recipes. Like the movement
//! catalog they are immutable, lazily built, and read-only at runtime.
//! Selection narrows by archetype and duration, prefers an intensity-range
//! match, and breaks remaining ties through the seeded rng so the choice
//! stays reproducible.

use crate::rng::SeededRandom;
use crate::types::{
    Archetype, BlockKind, BlockStructure, EnergySystem, MovementPattern, Slot, Template,
    TemplateBlock,
};
use once_cell::sync::Lazy;

static TEMPLATE_CATALOG: Lazy<Vec<Template>> = Lazy::new(build_template_catalog);

/// Get a reference to the cached template catalog
pub fn template_catalog() -> &'static [Template] {
    &TEMPLATE_CATALOG
}

/// All templates for one archetype.
pub fn templates_for(archetype: Archetype) -> Vec<&'static Template> {
    TEMPLATE_CATALOG
        .iter()
        .filter(|t| t.archetype == archetype)
        .collect()
}

// ============================================================================
// Slot and block builders
// ============================================================================

fn pattern_slot(pattern: MovementPattern) -> Slot {
    Slot {
        count: 1,
        pattern: Some(pattern),
        compound: None,
        unilateral: None,
        energy_system: None,
    }
}

fn compound_slot(pattern: MovementPattern) -> Slot {
    Slot {
        compound: Some(true),
        ..pattern_slot(pattern)
    }
}

fn unilateral_slot(pattern: MovementPattern) -> Slot {
    Slot {
        unilateral: Some(true),
        ..pattern_slot(pattern)
    }
}

fn energy_slot(energy_system: EnergySystem) -> Slot {
    Slot {
        count: 1,
        pattern: None,
        compound: None,
        unilateral: None,
        energy_system: Some(energy_system),
    }
}

fn block(
    name: &str,
    kind: BlockKind,
    structure: BlockStructure,
    slots: Vec<Slot>,
) -> TemplateBlock {
    TemplateBlock {
        name: name.to_string(),
        kind,
        structure,
        slots,
    }
}

fn straight(sets: u32, reps: &str, rest_seconds: u32) -> BlockStructure {
    BlockStructure::Straight {
        sets,
        reps: reps.to_string(),
        rest_seconds,
    }
}

fn superset(sets: u32, reps: &str, rest_seconds: u32) -> BlockStructure {
    BlockStructure::Superset {
        sets,
        reps: reps.to_string(),
        rest_seconds,
    }
}

fn circuit(rounds: u32, work_seconds: u32, rest_seconds: u32) -> BlockStructure {
    BlockStructure::Circuit {
        rounds,
        work_seconds,
        rest_seconds,
    }
}

fn interval(rounds: u32, work_seconds: u32, rest_seconds: u32) -> BlockStructure {
    BlockStructure::Interval {
        rounds,
        work_seconds,
        rest_seconds,
    }
}

fn emom(minutes: u32, reps_per_minute: u32) -> BlockStructure {
    BlockStructure::Emom {
        minutes,
        reps_per_minute,
    }
}

fn amrap(minutes: u32) -> BlockStructure {
    BlockStructure::Amrap { minutes }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    archetype: Archetype,
    minutes: (u32, u32),
    intensity: (u8, u8),
    blocks: Vec<TemplateBlock>,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        archetype,
        min_minutes: minutes.0,
        max_minutes: minutes.1,
        min_intensity: intensity.0,
        max_intensity: intensity.1,
        blocks,
    }
}

fn build_template_catalog() -> Vec<Template> {
    use Archetype::*;
    // The Conditioning block kind collides with the archetype; alias it.
    use BlockKind::Conditioning as Conditioning_;
    use BlockKind::{Accessory, Main};
    use EnergySystem::Aerobic;
    use MovementPattern::*;

    vec![
        // ====================================================================
        // Strength
        // ====================================================================
        template(
            "strength_express_25",
            "Express Strength",
            Strength,
            (15, 35),
            (3, 8),
            vec![
                block("Main Lift", Main, straight(3, "5", 120), vec![compound_slot(Hinge)]),
                block(
                    "Assistance Pair",
                    Accessory,
                    superset(3, "8", 75),
                    vec![pattern_slot(Push), pattern_slot(Pull)],
                ),
            ],
        ),
        template(
            "strength_full_45",
            "Full Strength Session",
            Strength,
            (40, 60),
            (5, 9),
            vec![
                block("Primary Lift", Main, straight(4, "5", 150), vec![compound_slot(Squat)]),
                block("Secondary Hinge", Main, straight(3, "8", 120), vec![compound_slot(Hinge)]),
                block(
                    "Upper Pairing",
                    Accessory,
                    superset(3, "8-10", 90),
                    vec![pattern_slot(Push), pattern_slot(Pull)],
                ),
                block(
                    "Trunk & Carry Finisher",
                    Accessory,
                    circuit(3, 40, 20),
                    vec![pattern_slot(Core), pattern_slot(Carry)],
                ),
            ],
        ),
        template(
            "strength_volume_70",
            "Volume Strength Session",
            Strength,
            (60, 85),
            (4, 8),
            vec![
                block("Primary Lift", Main, straight(5, "5", 180), vec![compound_slot(Squat)]),
                block("Secondary Lift", Main, straight(4, "6", 150), vec![compound_slot(Hinge)]),
                block(
                    "Press & Pull",
                    Accessory,
                    superset(4, "8", 90),
                    vec![pattern_slot(Push), pattern_slot(Pull)],
                ),
                block(
                    "Unilateral Work",
                    Accessory,
                    straight(3, "10", 75),
                    vec![unilateral_slot(Mono)],
                ),
                block(
                    "Trunk Circuit",
                    Accessory,
                    circuit(3, 40, 20),
                    vec![pattern_slot(Core), pattern_slot(Rotation)],
                ),
            ],
        ),
        template(
            "strength_marathon_100",
            "Marathon Strength Session",
            Strength,
            (85, 120),
            (4, 8),
            vec![
                block("Primary Lift", Main, straight(6, "4", 210), vec![compound_slot(Squat)]),
                block("Secondary Lift", Main, straight(5, "6", 180), vec![compound_slot(Hinge)]),
                block("Press Block", Main, straight(4, "8", 120), vec![compound_slot(Push)]),
                block("Pull Block", Main, straight(4, "8", 120), vec![compound_slot(Pull)]),
                block(
                    "Unilateral Pair",
                    Accessory,
                    superset(3, "10", 90),
                    vec![unilateral_slot(Mono), pattern_slot(Core)],
                ),
                block("Carry Finisher", Accessory, circuit(3, 45, 30), vec![pattern_slot(Carry)]),
            ],
        ),
        // ====================================================================
        // Conditioning
        // ====================================================================
        template(
            "cond_ignite_15",
            "Ignition",
            Conditioning,
            (5, 20),
            (4, 9),
            vec![
                block("Primer EMOM", Conditioning_, emom(6, 10), vec![pattern_slot(Hinge)]),
                block(
                    "Burner",
                    Conditioning_,
                    amrap(6),
                    vec![pattern_slot(Squat), pattern_slot(Push), pattern_slot(Core)],
                ),
            ],
        ),
        template(
            "cond_engine_30",
            "Engine Builder",
            Conditioning,
            (25, 40),
            (4, 9),
            vec![
                block("Engine Intervals", Conditioning_, interval(6, 60, 60), vec![energy_slot(Aerobic)]),
                block("Power EMOM", Conditioning_, emom(10, 8), vec![compound_slot(Hinge)]),
                block(
                    "Grind Circuit",
                    Conditioning_,
                    circuit(3, 40, 20),
                    vec![pattern_slot(Squat), pattern_slot(Core), pattern_slot(Push)],
                ),
            ],
        ),
        template(
            "cond_gauntlet_50",
            "The Gauntlet",
            Conditioning,
            (40, 65),
            (5, 10),
            vec![
                block("Long Intervals", Conditioning_, interval(8, 90, 60), vec![energy_slot(Aerobic)]),
                block("Strength-Endurance EMOM", Conditioning_, emom(12, 6), vec![compound_slot(Hinge)]),
                block(
                    "Gauntlet Circuit",
                    Conditioning_,
                    circuit(4, 45, 15),
                    vec![
                        pattern_slot(Squat),
                        pattern_slot(Push),
                        pattern_slot(Pull),
                        pattern_slot(Core),
                    ],
                ),
            ],
        ),
        // ====================================================================
        // Mixed
        // ====================================================================
        template(
            "mixed_foundation_30",
            "Foundation Mix",
            Mixed,
            (20, 40),
            (3, 8),
            vec![
                block("Strength Opener", Main, straight(3, "6", 120), vec![compound_slot(Squat)]),
                block(
                    "Hybrid Circuit",
                    Conditioning_,
                    circuit(3, 40, 20),
                    vec![pattern_slot(Hinge), pattern_slot(Push), pattern_slot(Core)],
                ),
            ],
        ),
        template(
            "mixed_builder_45",
            "Builder Mix",
            Mixed,
            (40, 60),
            (4, 9),
            vec![
                block("Strength Opener", Main, straight(4, "5", 150), vec![compound_slot(Hinge)]),
                block(
                    "Push-Pull Superset",
                    Accessory,
                    superset(3, "8", 90),
                    vec![pattern_slot(Push), pattern_slot(Pull)],
                ),
                block(
                    "Conditioning Finisher",
                    Conditioning_,
                    amrap(8),
                    vec![pattern_slot(Squat), pattern_slot(Core)],
                ),
            ],
        ),
        template(
            "mixed_long_70",
            "Long Mix",
            Mixed,
            (60, 90),
            (3, 8),
            vec![
                block("Strength A", Main, straight(4, "6", 150), vec![compound_slot(Squat)]),
                block("Strength B", Main, straight(3, "8", 120), vec![compound_slot(Push)]),
                block("Aerobic Intervals", Conditioning_, interval(6, 60, 60), vec![energy_slot(Aerobic)]),
                block(
                    "Trunk Circuit",
                    Accessory,
                    circuit(3, 40, 20),
                    vec![pattern_slot(Core), pattern_slot(Rotation)],
                ),
            ],
        ),
        // ====================================================================
        // Endurance
        // ====================================================================
        template(
            "endurance_base_30",
            "Base Endurance",
            Endurance,
            (15, 40),
            (2, 7),
            vec![
                block("Steady Intervals", Conditioning_, interval(4, 180, 60), vec![energy_slot(Aerobic)]),
                block(
                    "Support Circuit",
                    Accessory,
                    circuit(2, 45, 15),
                    vec![pattern_slot(Core), pattern_slot(Mono)],
                ),
            ],
        ),
        template(
            "endurance_steady_60",
            "Steady State",
            Endurance,
            (45, 75),
            (2, 7),
            vec![
                block("Long Intervals", Conditioning_, interval(5, 300, 90), vec![energy_slot(Aerobic)]),
                block("Tempo EMOM", Conditioning_, emom(10, 12), vec![pattern_slot(Squat)]),
                block("Trunk Stability", Accessory, circuit(3, 40, 20), vec![pattern_slot(Core)]),
            ],
        ),
        template(
            "endurance_century_90",
            "Century Ride",
            Endurance,
            (75, 120),
            (2, 6),
            vec![
                block("Base Block", Conditioning_, interval(6, 420, 120), vec![energy_slot(Aerobic)]),
                block("Cadence EMOM", Conditioning_, emom(12, 14), vec![pattern_slot(Squat)]),
                block(
                    "Durability Circuit",
                    Accessory,
                    circuit(3, 45, 15),
                    vec![unilateral_slot(Mono), pattern_slot(Core)],
                ),
            ],
        ),
    ]
}

// ============================================================================
// Selection
// ============================================================================

/// Select a template for the request, or `None` when the archetype has no
/// templates at all.
///
/// Narrowing order: exact archetype + duration containment; conditioning
/// broadens to mixed/endurance when empty; prefer an intensity-range match;
/// finally fall back to the archetype template with the closest midpoint
/// duration. Ties are always broken via `rng`.
pub fn select_template(
    archetype: Archetype,
    minutes: u32,
    target_intensity: u8,
    rng: &mut SeededRandom,
) -> Option<&'static Template> {
    let mut candidates: Vec<&'static Template> = TEMPLATE_CATALOG
        .iter()
        .filter(|t| t.archetype == archetype && t.duration_contains(minutes))
        .collect();

    if candidates.is_empty() && archetype == Archetype::Conditioning {
        candidates = TEMPLATE_CATALOG
            .iter()
            .filter(|t| {
                matches!(t.archetype, Archetype::Mixed | Archetype::Endurance)
                    && t.duration_contains(minutes)
            })
            .collect();
    }

    if !candidates.is_empty() {
        let preferred: Vec<&'static Template> = candidates
            .iter()
            .copied()
            .filter(|t| t.intensity_contains(target_intensity))
            .collect();
        let pool = if preferred.is_empty() {
            &candidates
        } else {
            &preferred
        };
        return rng.choice(pool).copied();
    }

    // Nothing contains the duration: closest-midpoint fallback within
    // the requested archetype.
    let archetype_templates: Vec<&'static Template> = TEMPLATE_CATALOG
        .iter()
        .filter(|t| t.archetype == archetype)
        .collect();
    if archetype_templates.is_empty() {
        return None;
    }

    let best_distance = archetype_templates
        .iter()
        .map(|t| t.midpoint_minutes().abs_diff(minutes))
        .min()?;
    let closest: Vec<&'static Template> = archetype_templates
        .into_iter()
        .filter(|t| t.midpoint_minutes().abs_diff(minutes) == best_distance)
        .collect();
    rng.choice(&closest).copied()
}
