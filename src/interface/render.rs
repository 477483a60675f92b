use crate::models::Food;
use crate::planner::{kcal_per_unit, energy_kcal_per_100g, PersonPortion};
use crate::state::PlanStateManager;

/// Display all plan entries with resolved values and the remaining budget.
pub fn display_plan_overview(manager: &PlanStateManager) {
    let plans: Vec<_> = manager.plans().iter().filter(|p| p.is_shared()).collect();
    if plans.is_empty() {
        println!("No plan entries yet.");
        return;
    }

    println!();
    println!("=== Plan ===");
    println!();

    let max_name_len = plans
        .iter()
        .filter_map(|p| manager.find_food(p.food_id).map(|f| f.name.len()))
        .max()
        .unwrap_or(10);

    for plan in &plans {
        let Some(food) = manager.find_food(plan.food_id) else {
            continue;
        };
        if food.is_unit_based() {
            println!(
                "  {:<width$}  {:>7.1} {}  | {:>7.1} kcal ({:>5.1}%)",
                food.name,
                plan.value,
                food.unit_label.as_deref().unwrap_or("unit"),
                plan.kcal,
                plan.percent,
                width = max_name_len
            );
        } else {
            println!(
                "  {:<width$}  {:>7.1} g     | {:>7.1} kcal ({:>5.1}%)  [{}]",
                food.name,
                plan.grams,
                plan.kcal,
                plan.percent,
                plan.mode,
                width = max_name_len
            );
        }
    }

    let total_target = manager.total_target_kcal();
    let planned = manager.total_planned_kcal();
    let remaining = total_target - planned;

    println!();
    println!("--- Totals ---");
    println!("Planned: {:.1} kcal, {:.1} g raw", planned, manager.total_planned_grams());
    println!("Target:  {:.1} kcal", total_target);
    if total_target > 0.0 {
        let percent = (remaining / total_target * 100.0).abs();
        let label = if remaining < 0.0 { "over" } else { "remaining" };
        println!("{:.1} kcal ({:.1}%) {}", remaining.abs(), percent, label);
    }
    println!();
}

/// Display per-person adjusted portions for one cooked pool.
pub fn display_distribution(title: &str, portions: &[PersonPortion]) {
    println!();
    println!("=== {} ===", title);

    if portions.is_empty() {
        println!("  (no people configured)");
        println!();
        return;
    }

    let max_name_len = portions.iter().map(|p| p.name.len()).max().unwrap_or(10);

    for portion in portions {
        println!(
            "  {:<width$}  {:>7.1} g / meal | {:>7.1} kcal / meal | total {:>7.1} g, {:>7.1} kcal",
            portion.name,
            portion.adjusted_grams_per_meal,
            portion.adjusted_kcal_per_meal,
            portion.adjusted_grams_total,
            portion.adjusted_kcal_total,
            width = max_name_len
        );
    }
    println!();
}

/// Display each group with its ingredients and planned totals.
pub fn display_groups(manager: &PlanStateManager) {
    let groups = manager.groups();
    if groups.is_empty() {
        println!("No groups yet.");
        return;
    }

    println!();
    for group in groups {
        let (kcal, grams) = manager.group_totals(&group.id).unwrap_or((0.0, 0.0));
        let cooked = group
            .cooked_weight_grams
            .map(|w| format!("{:.0} g cooked", w))
            .unwrap_or_else(|| "not yet cooked".to_string());

        println!(
            "[{}] {} — {:.1} kcal planned, {:.1} g raw, {}",
            group.position + 1,
            group.name,
            kcal,
            grams,
            cooked
        );
        for ingredient in &group.ingredients {
            let name = manager
                .find_food(ingredient.food_id)
                .map(|f| f.name.as_str())
                .unwrap_or("(unknown)");
            println!(
                "    {} — {:.1} g, {:.1} kcal ({:.1}%)",
                name, ingredient.grams, ingredient.kcal, ingredient.percent
            );
        }
    }
    println!();
}

/// Display per-person targets, planned totals and per-meal breakdown.
pub fn display_person_summary(manager: &PlanStateManager) {
    let people = manager.people();
    if people.is_empty() {
        println!("No people configured.");
        return;
    }

    println!();
    println!("=== People ({}) ===", people.len());

    for person in people {
        let planned = manager.planned_kcal_for_person(&person.id);
        println!();
        println!(
            "{} — {} meals x {:.0} kcal (target {:.0} kcal, planned {:.1} kcal)",
            person.name,
            person.meals_count,
            person.calories_per_meal,
            person.total_target_kcal(),
            planned
        );

        for (food_name, kcal_per_meal, grams_per_meal) in manager.per_meal_breakdown(&person.id) {
            println!(
                "    {} — {:.1} kcal, {:.1} g per meal",
                food_name, kcal_per_meal, grams_per_meal
            );
        }
    }
    println!();
}

/// Display a simple list of foods with their energy density.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        if food.is_unit_based() {
            println!(
                "  [{}] {} - {:.1} kcal / {}",
                food.id,
                food.name,
                kcal_per_unit(food),
                food.unit_label.as_deref().unwrap_or("unit")
            );
        } else {
            println!(
                "  [{}] {} - {:.1} kcal / 100 g",
                food.id,
                food.name,
                energy_kcal_per_100g(&food.nutrients)
            );
        }
    }
    println!();
}
