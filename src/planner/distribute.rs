use crate::models::{AllocationMode, Person, PersonGroupAllocation};

/// One person's input to the distribution engine: their share of the
/// planned, pre-cook kcal pool.
#[derive(Debug, Clone)]
pub struct PersonShare {
    pub person_id: String,
    pub name: String,
    pub meals_count: u32,
    pub planned_share_kcal: f64,
}

/// One person's adjusted portion of a cooked pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPortion {
    pub person_id: String,
    pub name: String,
    pub adjusted_kcal_total: f64,
    pub adjusted_grams_total: f64,
    pub adjusted_kcal_per_meal: f64,
    pub adjusted_grams_per_meal: f64,
}

/// Split an actual (post-cook) kcal/grams pool across people in proportion
/// to their planned shares.
///
/// Cooked totals almost never match the planned sum (water loss, rounding,
/// substitutions), so each person keeps their *relative* share of the pool
/// rather than their absolute planned kcal. When every planned share is 0
/// the split is equal, so output is deterministic before any planning
/// input exists. Zero pools give all-zero portions, never NaN; zero people
/// gives an empty list.
pub fn distribute(
    people: &[PersonShare],
    total_available_kcal: f64,
    total_cooked_grams: f64,
) -> Vec<PersonPortion> {
    if people.is_empty() {
        return Vec::new();
    }

    let sum_planned: f64 = people.iter().map(|p| p.planned_share_kcal).sum();
    let equal_share = 1.0 / people.len() as f64;

    people
        .iter()
        .map(|person| {
            let share = if sum_planned > 0.0 {
                person.planned_share_kcal / sum_planned
            } else {
                equal_share
            };

            let adjusted_kcal_total = share * total_available_kcal.max(0.0);
            let adjusted_grams_total = share * total_cooked_grams.max(0.0);
            let meals = person.meals_count as f64;
            let (kcal_per_meal, grams_per_meal) = if person.meals_count > 0 {
                (adjusted_kcal_total / meals, adjusted_grams_total / meals)
            } else {
                (0.0, 0.0)
            };

            PersonPortion {
                person_id: person.person_id.clone(),
                name: person.name.clone(),
                adjusted_kcal_total,
                adjusted_grams_total,
                adjusted_kcal_per_meal: kcal_per_meal,
                adjusted_grams_per_meal: grams_per_meal,
            }
        })
        .collect()
}

/// Planned shares for one group.
///
/// If anyone holds an explicit allocation for the group, explicit values
/// win and people without one get a zero share (kcal allocations are taken
/// as-is, percent allocations are relative to the group's planned kcal).
/// With no explicit allocations at all, each person's share is their
/// overall meal-plan target, so the group is prorated like the whole plan.
pub fn group_planned_shares(
    people: &[Person],
    group_id: &str,
    allocations: &[PersonGroupAllocation],
    group_planned_kcal: f64,
) -> Vec<PersonShare> {
    let group_allocs: Vec<&PersonGroupAllocation> = allocations
        .iter()
        .filter(|a| a.group_id == group_id)
        .collect();

    people
        .iter()
        .map(|person| {
            let planned_share_kcal = if group_allocs.is_empty() {
                person.total_target_kcal()
            } else {
                group_allocs
                    .iter()
                    .find(|a| a.person_id == person.id)
                    .map(|a| match a.mode {
                        AllocationMode::Kcal => a.value,
                        AllocationMode::Percent => a.value / 100.0 * group_planned_kcal,
                    })
                    .unwrap_or(0.0)
            };

            PersonShare {
                person_id: person.id.clone(),
                name: person.name.clone(),
                meals_count: person.meals_count,
                planned_share_kcal,
            }
        })
        .collect()
}
