use std::collections::HashMap;

use crate::models::{Food, Group, IngredientPlan};
use crate::planner::resolve::resolve_plan;

/// Drop plans whose food id no longer resolves against the catalog.
///
/// Orphaned plans are stale data, not errors; they disappear silently.
pub fn prune_stale_plans(
    plans: &[IngredientPlan],
    foods: &HashMap<u64, Food>,
) -> Vec<IngredientPlan> {
    plans
        .iter()
        .filter(|p| foods.contains_key(&p.food_id))
        .cloned()
        .collect()
}

/// Drop group ingredient references whose food id left the catalog.
pub fn prune_stale_group_ingredients(groups: &[Group], foods: &HashMap<u64, Food>) -> Vec<Group> {
    groups
        .iter()
        .map(|group| {
            let mut group = group.clone();
            group.ingredients.retain(|i| foods.contains_key(&i.food_id));
            group
        })
        .collect()
}

/// Re-resolve every plan's `{grams, kcal, percent}` from its raw
/// `(mode, value)` against the current food catalog and total target.
///
/// This is the single writer of the resolved triple; it runs after any
/// change to people (percent denominator), food nutrient data, or a plan
/// value. Idempotent: unchanged inputs produce identical output.
pub fn resolve_all_plans(
    plans: &[IngredientPlan],
    foods: &HashMap<u64, Food>,
    total_target_kcal: f64,
) -> Vec<IngredientPlan> {
    plans
        .iter()
        .filter_map(|plan| {
            let food = foods.get(&plan.food_id)?;
            let resolved = resolve_plan(food, plan.mode, plan.value, total_target_kcal);
            let mut plan = plan.clone();
            plan.grams = resolved.grams;
            plan.kcal = resolved.kcal;
            plan.percent = resolved.percent;
            Some(plan)
        })
        .collect()
}

/// Refresh every group ingredient's resolved fields from the matching
/// shared plan by food id.
///
/// Pure transform: inputs are untouched. Ingredients with no matching
/// shared plan reset to defaults, so grams/kcal/percent never diverge
/// silently from the plan step.
pub fn sync_group_ingredients_from_plans(
    groups: &[Group],
    plans: &[IngredientPlan],
) -> Vec<Group> {
    let shared_by_food: HashMap<u64, &IngredientPlan> = plans
        .iter()
        .filter(|p| p.is_shared())
        .map(|p| (p.food_id, p))
        .collect();

    groups
        .iter()
        .map(|group| {
            let mut group = group.clone();
            for ingredient in &mut group.ingredients {
                match shared_by_food.get(&ingredient.food_id) {
                    Some(plan) => {
                        ingredient.mode = plan.mode;
                        ingredient.value = plan.value;
                        ingredient.grams = plan.grams;
                        ingredient.kcal = plan.kcal;
                        ingredient.percent = plan.percent;
                    }
                    None => ingredient.reset_resolved(),
                }
            }
            group
        })
        .collect()
}
