use std::collections::HashMap;

use crate::error::{PrepError, Result};
use crate::models::{
    AllocationMode, Food, Group, IngredientPlan, Person, PersonGroupAllocation, PlanMode,
};
use crate::planner::{
    self, distribute, group_planned_kcal, group_planned_shares, group_raw_weight_grams,
    resolve_all_plans, sync_group_ingredients_from_plans, PersonPortion, ResolvedPortion,
};
use crate::state::persistence::PlanState;

/// Owns the whole planning session: food catalog, people, groups, plans
/// and per-group allocations.
///
/// Every mutation ends in a synchronous `resync` pass, so reads always see
/// resolved values computed from the current food/people snapshot. The
/// pure planner functions do the math; this type is the only writer.
pub struct PlanStateManager {
    foods: HashMap<u64, Food>,
    people: Vec<Person>,
    groups: Vec<Group>,
    plans: Vec<IngredientPlan>,
    allocations: Vec<PersonGroupAllocation>,
    next_food_id: u64,
}

impl PlanStateManager {
    pub fn new() -> Self {
        Self::from_state(PlanState::default())
    }

    pub fn from_state(state: PlanState) -> Self {
        let next_food_id = state.foods.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        let foods: HashMap<u64, Food> = state.foods.into_iter().map(|f| (f.id, f)).collect();
        let mut manager = Self {
            foods,
            people: state.people,
            groups: state.groups,
            plans: state.plans,
            allocations: state.allocations,
            next_food_id,
        };
        manager.resync();
        manager
    }

    /// Snapshot for persistence.
    pub fn to_state(&self) -> PlanState {
        let mut foods: Vec<Food> = self.foods.values().cloned().collect();
        foods.sort_by_key(|f| f.id);
        PlanState {
            foods,
            people: self.people.clone(),
            groups: self.groups.clone(),
            plans: self.plans.clone(),
            allocations: self.allocations.clone(),
        }
    }

    // ── foods ────────────────────────────────────────────────────────────

    /// Add a food to the catalog, assigning the next id.
    pub fn add_food(&mut self, mut food: Food) -> u64 {
        let id = self.next_food_id;
        self.next_food_id += 1;
        food.id = id;
        self.foods.insert(id, food);
        self.resync();
        id
    }

    /// Replace an existing food's record (custom food edited).
    pub fn update_food(&mut self, food: Food) -> Result<()> {
        if !self.foods.contains_key(&food.id) {
            return Err(PrepError::FoodNotFound(food.name));
        }
        self.foods.insert(food.id, food);
        self.resync();
        Ok(())
    }

    /// Remove a food; its plans and group references are pruned on resync.
    pub fn remove_food(&mut self, food_id: u64) -> Result<()> {
        if self.foods.remove(&food_id).is_none() {
            return Err(PrepError::FoodNotFound(format!("id {}", food_id)));
        }
        self.resync();
        Ok(())
    }

    pub fn find_food(&self, food_id: u64) -> Option<&Food> {
        self.foods.get(&food_id)
    }

    pub fn find_food_by_name(&self, name: &str) -> Option<&Food> {
        self.foods
            .values()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// All foods, ordered by id.
    pub fn all_foods(&self) -> Vec<&Food> {
        let mut foods: Vec<&Food> = self.foods.values().collect();
        foods.sort_by_key(|f| f.id);
        foods
    }

    /// Foods not referenced by any group; cooked and portioned individually.
    pub fn ungrouped_foods(&self) -> Vec<&Food> {
        self.all_foods()
            .into_iter()
            .filter(|f| !self.groups.iter().any(|g| g.contains_food(f.id)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    // ── people ───────────────────────────────────────────────────────────

    pub fn add_person(&mut self, person: Person) {
        self.people.push(person);
        self.resync();
    }

    pub fn remove_person(&mut self, person_id: &str) -> Result<()> {
        let before = self.people.len();
        self.people.retain(|p| p.id != person_id);
        if self.people.len() == before {
            return Err(PrepError::PersonNotFound(person_id.to_string()));
        }
        self.plans
            .retain(|p| p.person_id.as_deref() != Some(person_id));
        self.allocations.retain(|a| a.person_id != person_id);
        self.resync();
        Ok(())
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Percent-mode denominator: sum of every person's meal-plan target.
    pub fn total_target_kcal(&self) -> f64 {
        self.people.iter().map(|p| p.total_target_kcal()).sum()
    }

    // ── groups ───────────────────────────────────────────────────────────

    pub fn add_group(&mut self, id: &str, name: &str) {
        let position = self.groups.len() as u32;
        self.groups.push(Group::new(id, name, position));
    }

    pub fn remove_group(&mut self, group_id: &str) -> Result<()> {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != group_id);
        if self.groups.len() == before {
            return Err(PrepError::GroupNotFound(group_id.to_string()));
        }
        self.allocations.retain(|a| a.group_id != group_id);
        for (position, group) in self.groups.iter_mut().enumerate() {
            group.position = position as u32;
        }
        Ok(())
    }

    pub fn rename_group(&mut self, group_id: &str, name: &str) -> Result<()> {
        let group = self.group_mut(group_id)?;
        group.name = name.to_string();
        Ok(())
    }

    pub fn add_food_to_group(&mut self, group_id: &str, food_id: u64) -> Result<()> {
        if !self.foods.contains_key(&food_id) {
            return Err(PrepError::FoodNotFound(format!("id {}", food_id)));
        }
        self.group_mut(group_id)?.add_food(food_id);
        self.resync();
        Ok(())
    }

    pub fn remove_food_from_group(&mut self, group_id: &str, food_id: u64) -> Result<()> {
        self.group_mut(group_id)?.remove_food(food_id);
        Ok(())
    }

    /// Record the measured post-cook weight for a group.
    pub fn set_cooked_weight(&mut self, group_id: &str, grams: f64) -> Result<()> {
        let group = self.group_mut(group_id)?;
        group.cooked_weight_grams = if grams > 0.0 { Some(grams) } else { None };
        Ok(())
    }

    pub fn find_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    fn group_mut(&mut self, group_id: &str) -> Result<&mut Group> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| PrepError::GroupNotFound(group_id.to_string()))
    }

    // ── plans ────────────────────────────────────────────────────────────

    /// Upsert a plan entry for `(food_id, person_id)` and re-resolve.
    ///
    /// The resolved triple is never written directly; it always comes out
    /// of the resolver on the resync that follows.
    pub fn set_plan(
        &mut self,
        food_id: u64,
        person_id: Option<String>,
        mode: PlanMode,
        value: f64,
    ) -> Result<()> {
        if !self.foods.contains_key(&food_id) {
            return Err(PrepError::FoodNotFound(format!("id {}", food_id)));
        }
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };

        match self
            .plans
            .iter_mut()
            .find(|p| p.food_id == food_id && p.person_id == person_id)
        {
            Some(plan) => {
                plan.mode = mode;
                plan.value = value;
            }
            None => self
                .plans
                .push(IngredientPlan::new(food_id, person_id, mode, value)),
        }
        self.resync();
        Ok(())
    }

    /// Switch a plan's input mode, carrying the resolved amount over so the
    /// intended kcal/grams do not change.
    pub fn switch_plan_mode(
        &mut self,
        food_id: u64,
        person_id: Option<String>,
        new_mode: PlanMode,
    ) -> Result<f64> {
        let food = self
            .foods
            .get(&food_id)
            .ok_or_else(|| PrepError::FoodNotFound(format!("id {}", food_id)))?;
        let total = self.total_target_kcal();

        let plan = self
            .plans
            .iter()
            .find(|p| p.food_id == food_id && p.person_id == person_id);
        let new_value = match plan {
            Some(plan) => planner::switch_mode(food, plan.mode, plan.value, new_mode, total),
            None => 0.0,
        };

        self.set_plan(food_id, person_id, new_mode, new_value)?;
        Ok(new_value)
    }

    pub fn plans(&self) -> &[IngredientPlan] {
        &self.plans
    }

    pub fn find_plan(&self, food_id: u64, person_id: Option<&str>) -> Option<&IngredientPlan> {
        self.plans
            .iter()
            .find(|p| p.food_id == food_id && p.person_id.as_deref() == person_id)
    }

    /// Resolved portions of the shared plans, keyed by food id.
    pub fn resolved_by_food(&self) -> HashMap<u64, ResolvedPortion> {
        self.plans
            .iter()
            .filter(|p| p.is_shared())
            .map(|p| {
                (
                    p.food_id,
                    ResolvedPortion {
                        grams: p.grams,
                        kcal: p.kcal,
                        percent: p.percent,
                    },
                )
            })
            .collect()
    }

    /// Total planned kcal over all shared plans.
    pub fn total_planned_kcal(&self) -> f64 {
        self.plans
            .iter()
            .filter(|p| p.is_shared())
            .map(|p| p.kcal)
            .sum()
    }

    /// Total planned raw grams over all shared plans.
    pub fn total_planned_grams(&self) -> f64 {
        self.plans
            .iter()
            .filter(|p| p.is_shared())
            .map(|p| p.grams)
            .sum()
    }

    // ── allocations ──────────────────────────────────────────────────────

    /// Upsert one person's explicit claim on one group.
    pub fn set_allocation(
        &mut self,
        person_id: &str,
        group_id: &str,
        mode: AllocationMode,
        value: f64,
    ) {
        self.allocations
            .retain(|a| !(a.person_id == person_id && a.group_id == group_id));
        self.allocations.push(PersonGroupAllocation {
            person_id: person_id.to_string(),
            group_id: group_id.to_string(),
            mode,
            value,
        });
    }

    pub fn remove_allocation(&mut self, person_id: &str, group_id: &str) {
        self.allocations
            .retain(|a| !(a.person_id == person_id && a.group_id == group_id));
    }

    pub fn allocations(&self) -> &[PersonGroupAllocation] {
        &self.allocations
    }

    // ── derived views ────────────────────────────────────────────────────

    /// Planned and raw totals for one group.
    pub fn group_totals(&self, group_id: &str) -> Result<(f64, f64)> {
        let group = self
            .find_group(group_id)
            .ok_or_else(|| PrepError::GroupNotFound(group_id.to_string()))?;
        let resolved = self.resolved_by_food();
        Ok((
            group_planned_kcal(group, &resolved),
            group_raw_weight_grams(group, &resolved),
        ))
    }

    /// Per-person adjusted portions for a cooked group.
    ///
    /// Uses the group's planned kcal against its measured cooked weight;
    /// an uncooked group distributes all-zero portions.
    pub fn group_distribution(&self, group_id: &str) -> Result<Vec<PersonPortion>> {
        let group = self
            .find_group(group_id)
            .ok_or_else(|| PrepError::GroupNotFound(group_id.to_string()))?;
        let resolved = self.resolved_by_food();
        let planned_kcal = group_planned_kcal(group, &resolved);
        let cooked_grams = group.cooked_weight_grams.unwrap_or(0.0);

        let shares = group_planned_shares(&self.people, group_id, &self.allocations, planned_kcal);
        Ok(distribute(&shares, planned_kcal, cooked_grams))
    }

    /// Per-person adjusted portions for an ungrouped food, given its
    /// measured cooked weight.
    pub fn ungrouped_distribution(
        &self,
        food_id: u64,
        cooked_grams: f64,
    ) -> Result<Vec<PersonPortion>> {
        if !self.foods.contains_key(&food_id) {
            return Err(PrepError::FoodNotFound(format!("id {}", food_id)));
        }
        let planned_kcal = self
            .find_plan(food_id, None)
            .map(|p| p.kcal)
            .unwrap_or(0.0);

        // no per-food allocations exist; prorate by overall targets
        let shares = group_planned_shares(&self.people, "", &self.allocations, planned_kcal);
        Ok(distribute(&shares, planned_kcal, cooked_grams))
    }

    /// Total planned kcal attributed to one person: their personal plan
    /// entries plus every shared entry.
    pub fn planned_kcal_for_person(&self, person_id: &str) -> f64 {
        self.plans
            .iter()
            .filter(|p| p.is_shared() || p.person_id.as_deref() == Some(person_id))
            .map(|p| p.kcal)
            .sum()
    }

    /// Per-meal ingredient breakdown for one person.
    ///
    /// Returns `(food name, kcal per meal, grams per meal)` rows.
    pub fn per_meal_breakdown(&self, person_id: &str) -> Vec<(String, f64, f64)> {
        let Some(person) = self.people.iter().find(|p| p.id == person_id) else {
            return Vec::new();
        };
        if person.meals_count == 0 {
            return Vec::new();
        }
        let meals = person.meals_count as f64;

        self.plans
            .iter()
            .filter(|p| p.is_shared() || p.person_id.as_deref() == Some(person_id))
            .filter_map(|plan| {
                let food = self.foods.get(&plan.food_id)?;
                Some((food.name.clone(), plan.kcal / meals, plan.grams / meals))
            })
            .collect()
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    pub fn clear_people(&mut self) {
        self.people.clear();
        self.plans.retain(|p| p.is_shared());
        self.allocations.clear();
        self.resync();
    }

    pub fn clear_groups(&mut self) {
        self.groups.clear();
        self.allocations.clear();
    }

    pub fn clear_plans(&mut self) {
        self.plans.clear();
        self.resync();
    }

    /// Full reset: everything goes at once.
    pub fn clear_all(&mut self) {
        self.foods.clear();
        self.people.clear();
        self.groups.clear();
        self.plans.clear();
        self.allocations.clear();
        self.next_food_id = 1;
    }

    // ── synchronization ──────────────────────────────────────────────────

    /// Prune stale references, re-resolve every plan against the current
    /// food/people snapshot, and refresh group ingredients.
    ///
    /// Runs synchronously after every mutation; idempotent on unchanged
    /// input, so calling it again is always safe.
    fn resync(&mut self) {
        let total = self.total_target_kcal();
        let pruned = planner::prune_stale_plans(&self.plans, &self.foods);
        self.plans = resolve_all_plans(&pruned, &self.foods, total);
        let groups = planner::prune_stale_group_ingredients(&self.groups, &self.foods);
        self.groups = sync_group_ingredients_from_plans(&groups, &self.plans);
    }
}

impl Default for PlanStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with_basics() -> PlanStateManager {
        let mut manager = PlanStateManager::new();
        manager.add_person(Person::new("p1", "Alice", 5, 600.0));
        manager.add_person(Person::new("p2", "Bob", 2, 500.0));
        manager.add_food(Food::weight_based(0, "Rice", 200.0));
        manager.add_food(Food::unit_based(0, "Egg", 150.0, "egg", 50.0));
        manager
    }

    #[test]
    fn test_add_food_assigns_ids() {
        let manager = manager_with_basics();
        assert_eq!(manager.len(), 2);
        assert!(manager.find_food(1).is_some());
        assert!(manager.find_food(2).is_some());
        assert_eq!(manager.find_food_by_name("rice").unwrap().id, 1);
    }

    #[test]
    fn test_set_plan_resolves() {
        let mut manager = manager_with_basics();
        manager.set_plan(1, None, PlanMode::Grams, 150.0).unwrap();

        let plan = manager.find_plan(1, None).unwrap();
        assert_eq!(plan.grams, 150.0);
        assert_eq!(plan.kcal, 300.0);
        // 300 of 4000 target
        assert_eq!(plan.percent, 7.5);
    }

    #[test]
    fn test_people_change_rederives_percent_plans() {
        let mut manager = manager_with_basics();
        manager.set_plan(1, None, PlanMode::Percent, 10.0).unwrap();
        assert_eq!(manager.find_plan(1, None).unwrap().kcal, 400.0);

        // Bob leaves: denominator drops from 4000 to 3000
        manager.remove_person("p2").unwrap();
        assert_eq!(manager.find_plan(1, None).unwrap().kcal, 300.0);
    }

    #[test]
    fn test_remove_food_prunes_plans_and_groups() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Breakfast");
        manager.add_food_to_group("g1", 2).unwrap();
        manager.set_plan(2, None, PlanMode::Calories, 3.0).unwrap();

        manager.remove_food(2).unwrap();
        assert!(manager.find_plan(2, None).is_none());
        assert!(manager.find_group("g1").unwrap().ingredients.is_empty());
    }

    #[test]
    fn test_switch_plan_mode_preserves_amount() {
        let mut manager = manager_with_basics();
        manager.set_plan(1, None, PlanMode::Grams, 150.0).unwrap();

        let new_value = manager
            .switch_plan_mode(1, None, PlanMode::Calories)
            .unwrap();
        assert_eq!(new_value, 300.0);

        let plan = manager.find_plan(1, None).unwrap();
        assert_eq!(plan.mode, PlanMode::Calories);
        assert_eq!(plan.grams, 150.0);
        assert_eq!(plan.kcal, 300.0);
    }

    #[test]
    fn test_group_sync_carries_resolved_values() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Stir Fry");
        manager.add_food_to_group("g1", 1).unwrap();
        manager.set_plan(1, None, PlanMode::Grams, 150.0).unwrap();

        let group = manager.find_group("g1").unwrap();
        assert_eq!(group.ingredients[0].kcal, 300.0);
        assert_eq!(group.ingredients[0].grams, 150.0);
    }

    #[test]
    fn test_group_distribution_proportional() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Stir Fry");
        manager.add_food_to_group("g1", 1).unwrap();
        manager.set_plan(1, None, PlanMode::Grams, 200.0).unwrap(); // 400 kcal
        manager.set_cooked_weight("g1", 360.0).unwrap();

        let portions = manager.group_distribution("g1").unwrap();
        assert_eq!(portions.len(), 2);
        // Alice 3000 vs Bob 1000 target -> 0.75 / 0.25
        assert!((portions[0].adjusted_kcal_total - 300.0).abs() < 1e-9);
        assert!((portions[1].adjusted_kcal_total - 100.0).abs() < 1e-9);
        assert!((portions[0].adjusted_grams_total - 270.0).abs() < 1e-9);
        assert!((portions[1].adjusted_grams_total - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncooked_group_distributes_zero_grams() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Stir Fry");
        manager.add_food_to_group("g1", 1).unwrap();
        manager.set_plan(1, None, PlanMode::Grams, 200.0).unwrap();

        let portions = manager.group_distribution("g1").unwrap();
        for portion in &portions {
            assert_eq!(portion.adjusted_grams_total, 0.0);
        }
    }

    #[test]
    fn test_ungrouped_foods() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Stir Fry");
        manager.add_food_to_group("g1", 1).unwrap();

        let ungrouped = manager.ungrouped_foods();
        assert_eq!(ungrouped.len(), 1);
        assert_eq!(ungrouped[0].id, 2);
    }

    #[test]
    fn test_clear_people_keeps_shared_plans() {
        let mut manager = manager_with_basics();
        manager.set_plan(1, None, PlanMode::Grams, 150.0).unwrap();
        manager
            .set_plan(1, Some("p1".to_string()), PlanMode::Grams, 80.0)
            .unwrap();

        manager.clear_people();
        assert_eq!(manager.plans().len(), 1);
        assert!(manager.plans()[0].is_shared());
        // percent denominator is now 0; derived percent collapses
        assert_eq!(manager.plans()[0].percent, 0.0);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut manager = manager_with_basics();
        manager.add_group("g1", "Stir Fry");
        manager.add_food_to_group("g1", 1).unwrap();
        manager.set_plan(1, None, PlanMode::Grams, 150.0).unwrap();

        let state = manager.to_state();
        let restored = PlanStateManager::from_state(state);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.find_plan(1, None).unwrap().kcal, 300.0);
        assert_eq!(restored.find_group("g1").unwrap().ingredients.len(), 1);
    }
}
