use prep_planner_rs::models::{Food, Person, PlanMode};
use prep_planner_rs::state::{load_state, save_state, PlanStateManager};
use tempfile::NamedTempFile;

fn seeded_manager() -> PlanStateManager {
    let mut manager = PlanStateManager::new();
    manager.add_person(Person::new("p1", "Alice", 5, 600.0));
    manager.add_person(Person::new("p2", "Bob", 2, 500.0));
    manager.add_food(Food::weight_based(0, "Rice", 200.0));
    manager.add_food(Food::weight_based(0, "Chicken", 165.0));
    manager.add_food(Food::unit_based(0, "Egg", 150.0, "egg", 50.0));
    manager
}

#[test]
fn test_full_session_flow() {
    let mut manager = seeded_manager();

    // plan step
    manager.set_plan(1, None, PlanMode::Grams, 200.0).unwrap(); // 400 kcal
    manager.set_plan(2, None, PlanMode::Calories, 330.0).unwrap(); // 200 g
    manager.set_plan(3, None, PlanMode::Calories, 4.0).unwrap(); // 4 eggs = 300 kcal

    assert_eq!(manager.total_planned_kcal(), 1030.0);
    assert_eq!(manager.total_planned_grams(), 400.0);

    // build step
    manager.add_group("g1", "Stir Fry");
    manager.add_food_to_group("g1", 1).unwrap();
    manager.add_food_to_group("g1", 2).unwrap();

    let (group_kcal, group_grams) = manager.group_totals("g1").unwrap();
    assert_eq!(group_kcal, 730.0);
    assert_eq!(group_grams, 400.0);

    // cook step: 400 g raw cooks down to 340 g
    manager.set_cooked_weight("g1", 340.0).unwrap();
    let portions = manager.group_distribution("g1").unwrap();

    // Alice target 3000 vs Bob 1000 -> 0.75 / 0.25 of 730 kcal / 340 g
    assert!((portions[0].adjusted_kcal_total - 547.5).abs() < 1e-9);
    assert!((portions[1].adjusted_kcal_total - 182.5).abs() < 1e-9);
    assert!((portions[0].adjusted_grams_total - 255.0).abs() < 1e-9);
    assert!((portions[1].adjusted_grams_total - 85.0).abs() < 1e-9);

    let kcal_sum: f64 = portions.iter().map(|p| p.adjusted_kcal_total).sum();
    assert!((kcal_sum - group_kcal).abs() < 1e-6);
}

#[test]
fn test_editing_food_rederives_plans() {
    let mut manager = seeded_manager();
    manager.set_plan(1, None, PlanMode::Grams, 200.0).unwrap();
    assert_eq!(manager.find_plan(1, None).unwrap().kcal, 400.0);

    // custom food edited: rice density corrected
    let mut rice = manager.find_food(1).unwrap().clone();
    rice.set_nutrient("Energy", "208", "kcal", 130.0);
    manager.update_food(rice).unwrap();

    let plan = manager.find_plan(1, None).unwrap();
    assert_eq!(plan.grams, 200.0);
    assert_eq!(plan.kcal, 260.0);
}

#[test]
fn test_removing_food_prunes_everywhere() {
    let mut manager = seeded_manager();
    manager.add_group("g1", "Breakfast");
    manager.add_food_to_group("g1", 3).unwrap();
    manager.set_plan(3, None, PlanMode::Calories, 4.0).unwrap();

    manager.remove_food(3).unwrap();

    assert!(manager.find_plan(3, None).is_none());
    assert!(manager.find_group("g1").unwrap().ingredients.is_empty());
    let (kcal, grams) = manager.group_totals("g1").unwrap();
    assert_eq!(kcal, 0.0);
    assert_eq!(grams, 0.0);
}

#[test]
fn test_persistence_preserves_resolved_session() {
    let mut manager = seeded_manager();
    manager.add_group("g1", "Stir Fry");
    manager.add_food_to_group("g1", 1).unwrap();
    manager.set_plan(1, None, PlanMode::Percent, 10.0).unwrap(); // 10% of 4000
    manager.set_cooked_weight("g1", 500.0).unwrap();

    let file = NamedTempFile::new().unwrap();
    save_state(file.path(), &manager.to_state()).unwrap();

    let restored = PlanStateManager::from_state(load_state(file.path()).unwrap());
    let plan = restored.find_plan(1, None).unwrap();
    assert_eq!(plan.kcal, 400.0);
    assert_eq!(plan.percent, 10.0);

    let group = restored.find_group("g1").unwrap();
    assert_eq!(group.cooked_weight_grams, Some(500.0));
    assert_eq!(group.ingredients[0].kcal, 400.0);

    let portions = restored.group_distribution("g1").unwrap();
    let grams_sum: f64 = portions.iter().map(|p| p.adjusted_grams_total).sum();
    assert!((grams_sum - 500.0).abs() < 1e-6);
}

#[test]
fn test_reset_lifecycle() {
    let mut manager = seeded_manager();
    manager.add_group("g1", "Stir Fry");
    manager.set_plan(1, None, PlanMode::Grams, 100.0).unwrap();

    manager.clear_all();
    assert!(manager.is_empty());
    assert!(manager.people().is_empty());
    assert!(manager.groups().is_empty());
    assert!(manager.plans().is_empty());

    // ids restart after a full reset
    let id = manager.add_food(Food::weight_based(0, "Oats", 380.0));
    assert_eq!(id, 1);
}
