//! Intensity mapping: target intensity + health modifiers → concrete
//! training parameters.
//!
//! The base table is keyed by integer intensity 1-10. Health modifiers
//! only ever cap intensity downward; absent fields never cap.

use crate::types::{
    HealthModifiers, IntensityParams, IntensityPhase, PhaseRole, SessionIntensityPlan,
};

/// Base parameters per intensity level:
/// (sets, rest s, TUT s, load low %, load high %, complexity ceiling, volume mult)
const BASE_TABLE: [(u32, u32, u32, f64, f64, u8, f64); 10] = [
    (8, 45, 30, 40.0, 50.0, 2, 0.70),   // 1
    (10, 50, 30, 45.0, 55.0, 2, 0.80),  // 2
    (12, 55, 35, 50.0, 60.0, 3, 0.90),  // 3
    (14, 60, 35, 55.0, 65.0, 3, 1.00),  // 4
    (16, 75, 40, 60.0, 70.0, 4, 1.05),  // 5
    (18, 90, 40, 65.0, 75.0, 4, 1.10),  // 6
    (20, 105, 45, 72.0, 82.0, 4, 1.15), // 7
    (22, 120, 45, 80.0, 90.0, 5, 1.10), // 8
    (24, 150, 50, 84.0, 94.0, 5, 1.00), // 9
    (24, 180, 50, 88.0, 98.0, 5, 0.90), // 10
];

/// Clamp a requested intensity into the supported 1-10 range.
pub fn clamp_intensity(level: u8) -> u8 {
    level.clamp(1, 10)
}

/// Human-readable label for an intensity level, used in workout names.
pub fn intensity_label(level: u8) -> &'static str {
    match clamp_intensity(level) {
        1..=3 => "Light",
        4..=6 => "Moderate",
        7..=8 => "Vigorous",
        _ => "Max-Effort",
    }
}

/// Reduce the effective intensity per health modifiers. Each condition
/// clamps a ceiling independently; the tightest applicable ceiling wins.
/// The result is never above the (clamped) target and never below 1.
pub fn apply_health_caps(target: u8, modifiers: &HealthModifiers) -> u8 {
    let mut capped = clamp_intensity(target);

    let below = |value: Option<f64>, threshold: f64| value.map(|v| v < threshold).unwrap_or(false);
    let above = |value: Option<f64>, threshold: f64| value.map(|v| v > threshold).unwrap_or(false);

    if below(modifiers.vitality, 40.0) || below(modifiers.overall, 40.0) {
        capped = capped.min(6);
    }
    if below(modifiers.performance_potential, 35.0) {
        capped = capped.min(5);
    }
    if above(modifiers.stress, 7.0) {
        capped = capped.min(4);
    }
    if below(modifiers.recovery, 30.0) {
        capped = capped.min(5);
    }

    capped.max(1)
}

/// Look up training parameters for a target intensity, after health
/// capping and performance-based volume adjustment.
pub fn get_intensity_parameters(target: u8, modifiers: &HealthModifiers) -> IntensityParams {
    let level = apply_health_caps(target, modifiers);
    let (sets, rest, tut, load_lo, load_hi, complexity, volume) =
        BASE_TABLE[usize::from(level) - 1];

    let mut params = IntensityParams {
        level,
        total_sets: sets,
        rest_seconds: rest,
        time_under_tension_seconds: tut,
        load_percent_low: load_lo,
        load_percent_high: load_hi,
        complexity_ceiling: complexity,
        volume_multiplier: volume,
    };

    adjust_volume_for_performance(&mut params, modifiers);
    params
}

/// Under low performance potential, trim volume 20% (set floor 6) and
/// bias toward shorter rest and lower load percentages.
fn adjust_volume_for_performance(params: &mut IntensityParams, modifiers: &HealthModifiers) {
    let low_performance = modifiers
        .performance_potential
        .map(|p| p < 35.0)
        .unwrap_or(false);
    if !low_performance {
        return;
    }

    params.volume_multiplier *= 0.8;
    params.total_sets = ((f64::from(params.total_sets) * 0.8).floor() as u32).max(6);
    params.rest_seconds = ((f64::from(params.rest_seconds) * 0.85).floor() as u32).max(30);
    params.load_percent_low = (params.load_percent_low - 5.0).max(30.0);
    params.load_percent_high = (params.load_percent_high - 5.0).max(35.0);
}

// ============================================================================
// Session Intensity Plan
// ============================================================================

/// Build a ramp → peak → taper intensity wave across the session.
///
/// Three phases for short sessions, up to six for long ones. Session
/// length shrinks by 20% when circadian alignment is below 35.
pub fn create_session_intensity_plan(
    minutes: u32,
    effective_intensity: u8,
    modifiers: &HealthModifiers,
) -> SessionIntensityPlan {
    let low_circadian = modifiers
        .circadian_alignment
        .map(|c| c < 35.0)
        .unwrap_or(false);
    let total_minutes = if low_circadian {
        ((f64::from(minutes) * 0.8).round() as u32).max(1)
    } else {
        minutes.max(1)
    };

    let phase_count = match total_minutes {
        0..=29 => 3,
        30..=59 => 4,
        60..=89 => 5,
        _ => 6,
    };

    let base = f64::from(clamp_intensity(effective_intensity));
    let phases = if phase_count == 3 {
        fixed_three_phase(total_minutes, base)
    } else {
        sine_wave_phases(total_minutes, base, phase_count)
    };

    SessionIntensityPlan {
        total_minutes,
        phases,
    }
}

/// Fixed 25/50/25 ramp/peak/taper split.
fn fixed_three_phase(total_minutes: u32, base: f64) -> Vec<IntensityPhase> {
    let ramp = ((f64::from(total_minutes) * 0.25).round() as u32).max(1);
    let taper = ramp;
    let peak = total_minutes.saturating_sub(ramp + taper).max(1);
    vec![
        IntensityPhase {
            role: PhaseRole::Ramp,
            minutes: ramp,
            intensity: round1(base * 0.6),
        },
        IntensityPhase {
            role: PhaseRole::Peak,
            minutes: peak,
            intensity: base,
        },
        IntensityPhase {
            role: PhaseRole::Taper,
            minutes: taper,
            intensity: round1(base * 0.5),
        },
    ]
}

/// Sine-shaped wave: intensity rises through the first half, peaks in
/// the middle, tapers at the end.
fn sine_wave_phases(total_minutes: u32, base: f64, phase_count: u32) -> Vec<IntensityPhase> {
    let per_phase = total_minutes / phase_count;
    let remainder = total_minutes % phase_count;
    let mid = phase_count / 2;

    (0..phase_count)
        .map(|i| {
            let t = (f64::from(i) + 0.5) / f64::from(phase_count);
            let intensity = round1(base * (0.55 + 0.45 * (std::f64::consts::PI * t).sin()));
            let role = if i == 0 {
                PhaseRole::Ramp
            } else if i == phase_count - 1 {
                PhaseRole::Taper
            } else if i.abs_diff(mid) <= phase_count / 4 {
                PhaseRole::Peak
            } else if i < mid {
                PhaseRole::Ramp
            } else {
                PhaseRole::Taper
            };
            // Leftover minutes land in the middle phase.
            let minutes = if i == mid {
                per_phase + remainder
            } else {
                per_phase
            }
            .max(1);
            IntensityPhase {
                role,
                minutes,
                intensity,
            }
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_table_lookup() {
        let none = HealthModifiers::default();
        let p = get_intensity_parameters(8, &none);
        assert_eq!(p.level, 8);
        assert_eq!(p.total_sets, 22);
        assert_eq!(p.load_percent_low, 80.0);
        assert_eq!(p.load_percent_high, 90.0);

        // Out-of-range targets clamp into 1-10.
        assert_eq!(get_intensity_parameters(0, &none).level, 1);
        assert_eq!(get_intensity_parameters(14, &none).level, 10);
    }

    #[test]
    fn test_no_modifiers_no_cap() {
        let none = HealthModifiers::default();
        for target in 1..=10u8 {
            assert_eq!(apply_health_caps(target, &none), target);
        }
    }

    #[test]
    fn test_vitality_cap() {
        let modifiers = HealthModifiers {
            vitality: Some(30.0),
            ..Default::default()
        };
        assert_eq!(apply_health_caps(8, &modifiers), 6);
        assert_eq!(apply_health_caps(5, &modifiers), 5); // below the cap already
    }

    #[test]
    fn test_tightest_cap_wins() {
        let modifiers = HealthModifiers {
            vitality: Some(30.0),             // cap 6
            performance_potential: Some(20.0), // cap 5
            stress: Some(9.0),                 // cap 4
            ..Default::default()
        };
        assert_eq!(apply_health_caps(10, &modifiers), 4);
    }

    #[test]
    fn test_cap_floors_at_one() {
        let modifiers = HealthModifiers {
            stress: Some(10.0),
            ..Default::default()
        };
        assert_eq!(apply_health_caps(1, &modifiers), 1);
    }

    #[test]
    fn test_capping_never_increases() {
        let grid = [
            HealthModifiers::default(),
            HealthModifiers {
                vitality: Some(35.0),
                ..Default::default()
            },
            HealthModifiers {
                recovery: Some(20.0),
                stress: Some(8.0),
                ..Default::default()
            },
            HealthModifiers {
                overall: Some(10.0),
                performance_potential: Some(10.0),
                ..Default::default()
            },
        ];
        for target in 1..=10u8 {
            for modifiers in &grid {
                assert!(apply_health_caps(target, modifiers) <= target);
            }
        }
    }

    #[test]
    fn test_capping_monotone_in_vitality() {
        // Worsening one modifier must never raise the capped result.
        for target in 1..=10u8 {
            let better = HealthModifiers {
                vitality: Some(50.0),
                ..Default::default()
            };
            let worse = HealthModifiers {
                vitality: Some(30.0),
                ..Default::default()
            };
            assert!(
                apply_health_caps(target, &worse) <= apply_health_caps(target, &better)
            );
        }
    }

    #[test]
    fn test_low_performance_trims_volume() {
        let modifiers = HealthModifiers {
            performance_potential: Some(30.0),
            ..Default::default()
        };
        let p = get_intensity_parameters(8, &modifiers);
        // Capped to 5 (performance < 35), then volume trimmed 20%.
        assert_eq!(p.level, 5);
        assert_eq!(p.total_sets, 12); // floor(16 * 0.8)
        assert!(p.rest_seconds < 75);
        assert!(p.load_percent_low < 60.0);
    }

    #[test]
    fn test_volume_floor_of_six_sets() {
        let modifiers = HealthModifiers {
            performance_potential: Some(10.0),
            vitality: Some(10.0),
            recovery: Some(10.0),
            ..Default::default()
        };
        let p = get_intensity_parameters(1, &modifiers);
        assert!(p.total_sets >= 6);
    }

    #[test]
    fn test_three_phase_plan_for_short_session() {
        let plan = create_session_intensity_plan(20, 6, &HealthModifiers::default());
        assert_eq!(plan.total_minutes, 20);
        assert_eq!(plan.phases.len(), 3);
        assert_eq!(plan.phases[0].role, PhaseRole::Ramp);
        assert_eq!(plan.phases[1].role, PhaseRole::Peak);
        assert_eq!(plan.phases[2].role, PhaseRole::Taper);
        assert_eq!(
            plan.phases.iter().map(|p| p.minutes).sum::<u32>(),
            plan.total_minutes
        );
    }

    #[test]
    fn test_wave_plan_for_long_session() {
        let plan = create_session_intensity_plan(90, 7, &HealthModifiers::default());
        assert_eq!(plan.phases.len(), 6);
        assert_eq!(plan.phases[0].role, PhaseRole::Ramp);
        assert_eq!(plan.phases.last().unwrap().role, PhaseRole::Taper);
        assert_eq!(
            plan.phases.iter().map(|p| p.minutes).sum::<u32>(),
            plan.total_minutes
        );
        // Peak phase runs hotter than the opening ramp.
        let first = plan.phases[0].intensity;
        let max = plan
            .phases
            .iter()
            .map(|p| p.intensity)
            .fold(f64::MIN, f64::max);
        assert!(max > first);
    }

    #[test]
    fn test_low_circadian_shortens_session() {
        let modifiers = HealthModifiers {
            circadian_alignment: Some(20.0),
            ..Default::default()
        };
        let plan = create_session_intensity_plan(60, 6, &modifiers);
        assert_eq!(plan.total_minutes, 48);
    }

    #[test]
    fn test_intensity_labels() {
        assert_eq!(intensity_label(2), "Light");
        assert_eq!(intensity_label(5), "Moderate");
        assert_eq!(intensity_label(8), "Vigorous");
        assert_eq!(intensity_label(10), "Max-Effort");
    }
}
