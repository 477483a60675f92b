use crate::models::{Food, PlanMode};
use crate::planner::nutrients::{energy_kcal_per_100g, kcal_per_unit};

/// Canonical resolved form of one plan value.
///
/// All three fields are written together by `resolve_plan`; nothing else
/// in the crate sets one without recomputing the other two.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedPortion {
    pub grams: f64,
    pub kcal: f64,
    pub percent: f64,
}

/// Round to one decimal place.
#[inline]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Resolve a raw `(mode, value)` input for one food into the canonical
/// `{grams, kcal, percent}` triple.
///
/// Unit-based foods ignore the mode: `value` is a unit count, kcal comes
/// from the per-unit density and grams stays 0 (unit mass is not tracked).
/// `total_target_kcal` is the percent-mode denominator (sum of every
/// person's meals x kcal-per-meal); when it is 0 percent-mode resolves to
/// 0 kcal rather than dividing by zero.
pub fn resolve_plan(food: &Food, mode: PlanMode, value: f64, total_target_kcal: f64) -> ResolvedPortion {
    if food.is_unit_based() {
        let kcal = round1(value * kcal_per_unit(food));
        return ResolvedPortion {
            grams: 0.0,
            kcal,
            percent: derived_percent(kcal, total_target_kcal),
        };
    }

    let kcal_per_100g = energy_kcal_per_100g(&food.nutrients);

    let kcal = match mode {
        PlanMode::Calories => value,
        PlanMode::Grams => value / 100.0 * kcal_per_100g,
        PlanMode::Percent => {
            if total_target_kcal > 0.0 {
                value / 100.0 * total_target_kcal
            } else {
                0.0
            }
        }
    };
    let kcal = round1(kcal);

    let grams = match mode {
        // grams is authoritative input, keep it as entered
        PlanMode::Grams => round1(value),
        _ => grams_from_kcal(kcal, kcal_per_100g),
    };

    let percent = match mode {
        // echo the user's percent to avoid rounding drift
        PlanMode::Percent => round1(value),
        _ => derived_percent(kcal, total_target_kcal),
    };

    ResolvedPortion { grams, kcal, percent }
}

/// Convert a plan value from one input mode to another.
///
/// Resolves under the old mode, then picks the field matching the new
/// mode, so switching modes never changes the kcal/grams the user meant
/// (round-trip-safe to one-decimal rounding).
pub fn switch_mode(
    food: &Food,
    old_mode: PlanMode,
    old_value: f64,
    new_mode: PlanMode,
    total_target_kcal: f64,
) -> f64 {
    let resolved = resolve_plan(food, old_mode, old_value, total_target_kcal);
    match new_mode {
        PlanMode::Grams => resolved.grams,
        PlanMode::Calories => resolved.kcal,
        PlanMode::Percent => resolved.percent,
    }
}

fn grams_from_kcal(kcal: f64, kcal_per_100g: f64) -> f64 {
    if kcal > 0.0 && kcal_per_100g > 0.0 {
        round1(kcal / kcal_per_100g * 100.0)
    } else {
        0.0
    }
}

fn derived_percent(kcal: f64, total_target_kcal: f64) -> f64 {
    if total_target_kcal > 0.0 {
        round1(kcal / total_target_kcal * 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Food {
        Food::weight_based(1, "Rice", 200.0)
    }

    #[test]
    fn test_grams_mode() {
        let resolved = resolve_plan(&rice(), PlanMode::Grams, 150.0, 4000.0);
        assert_eq!(resolved.grams, 150.0);
        assert_eq!(resolved.kcal, 300.0);
        assert_eq!(resolved.percent, 7.5);
    }

    #[test]
    fn test_calories_mode() {
        let resolved = resolve_plan(&rice(), PlanMode::Calories, 300.0, 4000.0);
        assert_eq!(resolved.kcal, 300.0);
        assert_eq!(resolved.grams, 150.0);
        assert_eq!(resolved.percent, 7.5);
    }

    #[test]
    fn test_percent_mode_echoes_value() {
        let resolved = resolve_plan(&rice(), PlanMode::Percent, 7.5, 4000.0);
        assert_eq!(resolved.percent, 7.5);
        assert_eq!(resolved.kcal, 300.0);
        assert_eq!(resolved.grams, 150.0);
    }

    #[test]
    fn test_percent_mode_zero_target() {
        let resolved = resolve_plan(&rice(), PlanMode::Percent, 25.0, 0.0);
        assert_eq!(resolved.kcal, 0.0);
        assert_eq!(resolved.grams, 0.0);
        // the echoed percent is kept even though kcal collapsed to 0
        assert_eq!(resolved.percent, 25.0);
    }

    #[test]
    fn test_zero_density_food_yields_zero_grams() {
        let unknown = Food::weight_based(9, "Mystery", 0.0);
        let resolved = resolve_plan(&unknown, PlanMode::Calories, 300.0, 4000.0);
        assert_eq!(resolved.kcal, 300.0);
        assert_eq!(resolved.grams, 0.0);
    }

    #[test]
    fn test_unit_based_ignores_mode() {
        // 50 g egg at 150 kcal/100g -> 75 kcal/unit; 3 eggs -> 225 kcal, 0 g
        let egg = Food::unit_based(2, "Egg", 150.0, "egg", 50.0);
        for mode in [PlanMode::Grams, PlanMode::Calories, PlanMode::Percent] {
            let resolved = resolve_plan(&egg, mode, 3.0, 4000.0);
            assert_eq!(resolved.kcal, 225.0);
            assert_eq!(resolved.grams, 0.0);
        }
    }

    #[test]
    fn test_switch_grams_to_calories() {
        let new_value = switch_mode(&rice(), PlanMode::Grams, 150.0, PlanMode::Calories, 4000.0);
        assert_eq!(new_value, 300.0);
    }

    #[test]
    fn test_switch_round_trip() {
        let food = rice();
        let total = 4000.0;
        let as_percent = switch_mode(&food, PlanMode::Grams, 150.0, PlanMode::Percent, total);
        let back = switch_mode(&food, PlanMode::Percent, as_percent, PlanMode::Grams, total);
        assert!((back - 150.0).abs() <= 0.1);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(29.61), 29.6);
        assert_eq!(round1(29.65), 29.7);
        assert_eq!(round1(0.0), 0.0);
    }
}
