//! Core domain types for the Setforge workout generation engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Movements and their taxonomy (pattern, plane, energy system)
//! - Templates, blocks, and slots
//! - Health modifiers and workout history
//! - Progression directives
//! - The generated workout output shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Movement Types
// ============================================================================

/// Biomechanical category of an exercise.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Hinge,
    Squat,
    Push,
    Pull,
    Core,
    /// Mono/unilateral lower-body work (lunges, step-ups, split stances).
    Mono,
    Carry,
    Rotation,
}

impl MovementPattern {
    /// All patterns in canonical order. Index positions are stable and used
    /// for deterministic per-pattern bookkeeping during sampling.
    pub const ALL: [MovementPattern; 8] = [
        MovementPattern::Hinge,
        MovementPattern::Squat,
        MovementPattern::Push,
        MovementPattern::Pull,
        MovementPattern::Core,
        MovementPattern::Mono,
        MovementPattern::Carry,
        MovementPattern::Rotation,
    ];

    /// Stable index into [`MovementPattern::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// True for patterns dominated by the upper body.
    pub fn is_upper(self) -> bool {
        matches!(
            self,
            MovementPattern::Push
                | MovementPattern::Pull
                | MovementPattern::Core
                | MovementPattern::Carry
                | MovementPattern::Rotation
        )
    }

    /// True for patterns dominated by the lower body.
    pub fn is_lower(self) -> bool {
        matches!(
            self,
            MovementPattern::Hinge
                | MovementPattern::Squat
                | MovementPattern::Mono
                | MovementPattern::Core
        )
    }
}

impl fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MovementPattern::Hinge => "hinge",
            MovementPattern::Squat => "squat",
            MovementPattern::Push => "push",
            MovementPattern::Pull => "pull",
            MovementPattern::Core => "core",
            MovementPattern::Mono => "mono",
            MovementPattern::Carry => "carry",
            MovementPattern::Rotation => "rotation",
        };
        write!(f, "{}", s)
    }
}

/// Primary plane of motion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    Sagittal,
    Frontal,
    Transverse,
    Multi,
}

/// Dominant energy system the movement trains.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnergySystem {
    Alactic,
    Glycolytic,
    Aerobic,
    Mixed,
}

/// How much external load the movement can meaningfully take.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LoadTier {
    Bodyweight,
    Light,
    Moderate,
    Heavy,
}

/// An exercise definition. Movements are immutable and catalog-owned;
/// there is no per-user mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    pub name: String,
    pub pattern: MovementPattern,
    /// Equipment tags; a movement is usable when at least one tag
    /// intersects the available-equipment list.
    pub equipment: Vec<String>,
    pub plane: Plane,
    pub energy_system: EnergySystem,
    pub load_tier: LoadTier,
    /// Technical complexity, 1 (anyone) to 5 (needs coaching).
    pub complexity: u8,
    pub unilateral: bool,
    pub compound: bool,
}

// ============================================================================
// Template Types
// ============================================================================

/// High-level training goal that selects a template family.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Strength,
    Conditioning,
    Mixed,
    Endurance,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Strength,
        Archetype::Conditioning,
        Archetype::Mixed,
        Archetype::Endurance,
    ];
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Archetype::Strength => "Strength",
            Archetype::Conditioning => "Conditioning",
            Archetype::Mixed => "Mixed",
            Archetype::Endurance => "Endurance",
        };
        write!(f, "{}", s)
    }
}

/// Role a block plays within the session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Warmup,
    Main,
    Accessory,
    Conditioning,
    Cooldown,
}

/// Set/rep/time scheme for a block, keyed by structure so each variant
/// carries only the fields that make sense for it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "structure", rename_all = "snake_case")]
pub enum BlockStructure {
    Straight {
        sets: u32,
        reps: String,
        rest_seconds: u32,
    },
    Superset {
        sets: u32,
        reps: String,
        rest_seconds: u32,
    },
    Circuit {
        rounds: u32,
        work_seconds: u32,
        rest_seconds: u32,
    },
    Emom {
        minutes: u32,
        reps_per_minute: u32,
    },
    Amrap {
        minutes: u32,
    },
    Interval {
        rounds: u32,
        work_seconds: u32,
        rest_seconds: u32,
    },
}

impl BlockStructure {
    /// Working sets (rounds/minutes for timed structures) per exercise.
    pub fn work_sets(&self) -> u32 {
        match self {
            BlockStructure::Straight { sets, .. } | BlockStructure::Superset { sets, .. } => *sets,
            BlockStructure::Circuit { rounds, .. } | BlockStructure::Interval { rounds, .. } => {
                *rounds
            }
            BlockStructure::Emom { minutes, .. } => *minutes,
            BlockStructure::Amrap { .. } => 1,
        }
    }

    /// Inter-set rest in seconds, where the structure has any.
    pub fn rest_seconds(&self) -> u32 {
        match self {
            BlockStructure::Straight { rest_seconds, .. }
            | BlockStructure::Superset { rest_seconds, .. }
            | BlockStructure::Circuit { rest_seconds, .. }
            | BlockStructure::Interval { rest_seconds, .. } => *rest_seconds,
            BlockStructure::Emom { .. } | BlockStructure::Amrap { .. } => 0,
        }
    }

    /// Rep scheme shown to the athlete, derived per structure.
    pub fn rep_scheme(&self) -> String {
        match self {
            BlockStructure::Straight { reps, .. } | BlockStructure::Superset { reps, .. } => {
                reps.clone()
            }
            BlockStructure::Circuit { work_seconds, .. }
            | BlockStructure::Interval { work_seconds, .. } => format!("{}s", work_seconds),
            BlockStructure::Emom { reps_per_minute, .. } => format!("{}/min", reps_per_minute),
            BlockStructure::Amrap { .. } => "max".to_string(),
        }
    }

    /// True when exercises in this structure take a percentage load.
    pub fn takes_load(&self) -> bool {
        matches!(
            self,
            BlockStructure::Straight { .. } | BlockStructure::Superset { .. }
        )
    }
}

/// A template's declaration of how many movements of what kind to pick.
/// `None` fields mean "no restriction".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Slot {
    pub count: u32,
    pub pattern: Option<MovementPattern>,
    pub compound: Option<bool>,
    pub unilateral: Option<bool>,
    pub energy_system: Option<EnergySystem>,
}

/// One structural block within a template.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateBlock {
    pub name: String,
    pub kind: BlockKind,
    pub structure: BlockStructure,
    pub slots: Vec<Slot>,
}

/// An archetype-bound structural recipe for a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub min_intensity: u8,
    pub max_intensity: u8,
    pub blocks: Vec<TemplateBlock>,
}

impl Template {
    pub fn duration_contains(&self, minutes: u32) -> bool {
        minutes >= self.min_minutes && minutes <= self.max_minutes
    }

    pub fn intensity_contains(&self, intensity: u8) -> bool {
        intensity >= self.min_intensity && intensity <= self.max_intensity
    }

    pub fn midpoint_minutes(&self) -> u32 {
        (self.min_minutes + self.max_minutes) / 2
    }
}

// ============================================================================
// Health Modifiers and Intensity
// ============================================================================

/// Externally supplied wellness snapshot. All fields optional; an absent
/// field never caps intensity.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct HealthModifiers {
    pub vitality: Option<f64>,
    pub performance_potential: Option<f64>,
    /// 0-10 scale; higher is more stressed.
    pub stress: Option<f64>,
    pub recovery: Option<f64>,
    pub circadian_alignment: Option<f64>,
    pub overall: Option<f64>,
}

/// Concrete training parameters for one intensity level.
/// Derived per generation, never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IntensityParams {
    pub level: u8,
    pub total_sets: u32,
    pub rest_seconds: u32,
    pub time_under_tension_seconds: u32,
    pub load_percent_low: f64,
    pub load_percent_high: f64,
    pub complexity_ceiling: u8,
    pub volume_multiplier: f64,
}

impl IntensityParams {
    /// Midpoint of the load-percentage range.
    pub fn load_percent_mid(&self) -> f64 {
        (self.load_percent_low + self.load_percent_high) / 2.0
    }
}

/// Role of one phase within a session intensity wave.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseRole {
    Ramp,
    Peak,
    Taper,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IntensityPhase {
    pub role: PhaseRole,
    pub minutes: u32,
    pub intensity: f64,
}

/// Ramp/peak/taper wave across the session duration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionIntensityPlan {
    pub total_minutes: u32,
    pub phases: Vec<IntensityPhase>,
}

// ============================================================================
// History and Feedback
// ============================================================================

/// Subjective feedback attached to a completed session.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionFeedback {
    /// 0-10; how hard the session felt.
    pub difficulty: Option<f64>,
    /// 0-10; how good the session felt.
    pub satisfaction: Option<f64>,
}

/// Immutable record of a past generated/completed workout, supplied by
/// the persistence layer. The generator never mutates these.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub archetype: Archetype,
    pub target_intensity: u8,
    pub actual_intensity: Option<f64>,
    pub volume_sets: Option<u32>,
    pub avg_load_percent: Option<f64>,
    /// Subjective effort rating (RPE), 0-10.
    pub rpe: Option<f64>,
    pub completed: bool,
    pub feedback: Option<SessionFeedback>,
}

impl HistoryEntry {
    /// Intensity actually experienced, falling back to the target.
    pub fn effective_intensity(&self) -> f64 {
        self.actual_intensity
            .unwrap_or(f64::from(self.target_intensity))
    }
}

/// One row from an external RPE/feedback lookup, used only to enrich
/// history entries before progression analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub session_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub rpe: Option<f64>,
    pub difficulty: Option<f64>,
    pub satisfaction: Option<f64>,
}

// ============================================================================
// Progression Types
// ============================================================================

/// The scheme a progression decision follows.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionType {
    Load,
    Volume,
    Density,
    Deload,
    Hold,
}

impl fmt::Display for ProgressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgressionType::Load => "load",
            ProgressionType::Volume => "volume",
            ProgressionType::Density => "density",
            ProgressionType::Deload => "deload",
            ProgressionType::Hold => "hold",
        };
        write!(f, "{}", s)
    }
}

/// Mesocycle phase inferred from recent history.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    Accumulation,
    Intensification,
    Realization,
    Deload,
}

/// Output of the progression analyzer: how this session should differ
/// from the athlete's recent baseline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionDirectives {
    pub load_multiplier: f64,
    pub volume_multiplier: f64,
    pub intensity_delta: i8,
    pub deload: bool,
    pub progression_type: ProgressionType,
    pub reasoning: String,
}

impl Default for ProgressionDirectives {
    fn default() -> Self {
        Self {
            load_multiplier: 1.0,
            volume_multiplier: 1.0,
            intensity_delta: 0,
            deload: false,
            progression_type: ProgressionType::Hold,
            reasoning: "Maintaining current training parameters".to_string(),
        }
    }
}

// ============================================================================
// Request and Output Types
// ============================================================================

/// A generation request as received from the caller (HTTP layer, CLI).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub archetype: Archetype,
    pub minutes: u32,
    pub target_intensity: u8,
    pub equipment: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub health: Option<HealthModifiers>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Seed string (user-hash + day + optional nonce). Equal seeds with
    /// equal history reproduce the workout bit-for-bit.
    pub seed: String,
}

/// A concrete exercise in the output plan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub movement_id: String,
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub load_percent: Option<f64>,
    pub duration_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// One materialized block of the output plan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutBlock {
    pub name: String,
    pub kind: BlockKind,
    pub structure: BlockStructure,
    pub exercises: Vec<Exercise>,
    pub estimated_minutes: f64,
}

/// Summary of which template/progression/movements produced the workout,
/// intended for persistence and debug replay.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutMetadata {
    pub template_id: String,
    pub patterns_used: Vec<MovementPattern>,
    pub equipment: Vec<String>,
    pub progression_type: ProgressionType,
    pub progression_reasoning: String,
}

/// The engine's sole output: a fully structured workout plan.
/// Constructed fresh on every call and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_minutes: u32,
    pub estimated_intensity: u8,
    pub blocks: Vec<WorkoutBlock>,
    pub coaching_notes: Vec<String>,
    pub metadata: WorkoutMetadata,
}

/// Audit record of every choice the generator made. Fully determined by
/// `(seed, history)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationChoices {
    pub template_id: String,
    pub movement_ids: Vec<String>,
    pub progression_type: ProgressionType,
}

/// Everything `generate_workout` returns to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    pub workout: Workout,
    pub choices: GenerationChoices,
    pub intensity_plan: SessionIntensityPlan,
}
