use std::collections::HashMap;

use crate::models::Group;
use crate::planner::resolve::ResolvedPortion;

/// Sum of resolved kcal over a group's ingredients.
///
/// Ingredients with no resolved plan contribute 0. Pure fold, recomputed
/// on demand; plans mutate too often to cache this.
pub fn group_planned_kcal(group: &Group, resolved: &HashMap<u64, ResolvedPortion>) -> f64 {
    group
        .ingredients
        .iter()
        .map(|ing| resolved.get(&ing.food_id).map(|r| r.kcal).unwrap_or(0.0))
        .sum()
}

/// Sum of resolved raw (pre-cooking) grams over a group's ingredients.
///
/// Unit-based ingredients resolve to 0 grams, so they contribute nothing.
pub fn group_raw_weight_grams(group: &Group, resolved: &HashMap<u64, ResolvedPortion>) -> f64 {
    group
        .ingredients
        .iter()
        .map(|ing| resolved.get(&ing.food_id).map(|r| r.grams).unwrap_or(0.0))
        .sum()
}
