use crate::models::{Food, Nutrient, NUTRIENT_NUMBER_ENERGY, NUTRIENT_NUMBER_ENERGY_CUSTOM};
use crate::planner::resolve::round1;

/// Best available kcal-per-100g value from a food's nutrient list.
///
/// Matches by nutrient number ("208" standard, "999" custom), by an
/// "atwater general" name, or by an "energy" name with a kcal unit.
/// Returns 0.0 when no entry matches; callers treat 0 as "nutrient data
/// unavailable", never as a valid zero-calorie food.
pub fn energy_kcal_per_100g(nutrients: &[Nutrient]) -> f64 {
    nutrients
        .iter()
        .find(|n| {
            n.number == NUTRIENT_NUMBER_ENERGY
                || n.number == NUTRIENT_NUMBER_ENERGY_CUSTOM
                || n.name.to_lowercase().contains("atwater general")
                || (n.name.to_lowercase().contains("energy")
                    && n.unit.eq_ignore_ascii_case("kcal"))
        })
        .map(|n| n.value)
        .unwrap_or(0.0)
}

/// Kcal per discrete unit for a unit-based food, rounded to one decimal.
///
/// Returns 0.0 for weight-based foods.
pub fn kcal_per_unit(food: &Food) -> f64 {
    let Some(grams_per_unit) = food.grams_per_unit else {
        return 0.0;
    };
    let kcal_per_100g = energy_kcal_per_100g(&food.nutrients);
    if kcal_per_100g <= 0.0 || grams_per_unit <= 0.0 {
        return 0.0;
    }
    round1(grams_per_unit / 100.0 * kcal_per_100g)
}
