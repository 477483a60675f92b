use clap::Parser;
use std::path::Path;

use prep_planner_rs::cli::{Cli, Command};
use prep_planner_rs::error::Result;
use prep_planner_rs::interface::{
    display_distribution, display_food_list, display_groups, display_person_summary,
    display_plan_overview, export_portions_csv, find_food_fuzzy, prompt_cooked_weight,
    prompt_food, prompt_number, prompt_person, prompt_plan_mode, prompt_yes_no,
};
use prep_planner_rs::models::{AllocationMode, PlanMode};
use prep_planner_rs::state::{load_state, save_state, PlanStateManager};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Setup => cmd_setup(&cli.file),
        Command::Foods => cmd_foods(&cli.file),
        Command::Build => cmd_build(&cli.file),
        Command::Plan => cmd_plan(&cli.file),
        Command::Allocate => cmd_allocate(&cli.file),
        Command::Cook => cmd_cook(&cli.file),
        Command::Summary => cmd_summary(&cli.file),
        Command::Export { out } => cmd_export(&cli.file, &out),
        Command::Reset {
            people,
            groups,
            plans,
            all,
        } => cmd_reset(&cli.file, people, groups, plans, all),
    }
}

fn load_manager(file_path: &str) -> Result<PlanStateManager> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Ok(PlanStateManager::new());
    }
    Ok(PlanStateManager::from_state(load_state(path)?))
}

fn save_manager(file_path: &str, manager: &PlanStateManager) -> Result<()> {
    save_state(file_path, &manager.to_state())?;
    println!("Session saved to {}", file_path);
    Ok(())
}

/// Add people to the session.
fn cmd_setup(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    loop {
        let id = format!("p{}", manager.people().len() + 1);
        let person = prompt_person(&id)?;
        println!(
            "Added {}: {} meals x {:.0} kcal = {:.0} kcal total",
            person.name,
            person.meals_count,
            person.calories_per_meal,
            person.total_target_kcal()
        );
        manager.add_person(person);

        if !prompt_yes_no("Add another person?", false)? {
            break;
        }
    }

    display_person_summary(&manager);
    save_manager(file_path, &manager)
}

/// Add custom foods to the catalog.
fn cmd_foods(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    loop {
        let food = prompt_food()?;
        if !food.is_valid() {
            println!("Skipping invalid food entry.");
        } else {
            let name = food.name.clone();
            let id = manager.add_food(food);
            println!("Added [{}] {}", id, name);
        }

        if !prompt_yes_no("Add another food?", false)? {
            break;
        }
    }

    display_food_list(&manager.all_foods(), "Catalog");
    save_manager(file_path, &manager)
}

/// Create groups and assign foods to them.
fn cmd_build(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    if manager.is_empty() {
        println!("No foods in the catalog. Run 'foods' first.");
        return Ok(());
    }

    loop {
        let name: String = dialoguer::Input::new()
            .with_prompt("Group name")
            .interact_text()?;
        let group_id = format!("g{}", manager.groups().len() + 1);
        manager.add_group(&group_id, name.trim());

        loop {
            let input: String = dialoguer::Input::new()
                .with_prompt("Add food by name (empty to finish group)")
                .allow_empty(true)
                .interact_text()?;
            if input.trim().is_empty() {
                break;
            }

            match find_food_fuzzy(&input, &manager.all_foods())? {
                Some(food_id) => {
                    manager.add_food_to_group(&group_id, food_id)?;
                    let name = manager.find_food(food_id).map(|f| f.name.clone());
                    println!("Added {} to the group", name.unwrap_or_default());
                }
                None => continue,
            }
        }

        if !prompt_yes_no("Create another group?", false)? {
            break;
        }
    }

    display_groups(&manager);
    save_manager(file_path, &manager)
}

/// Enter or adjust the shared plan value for each food.
fn cmd_plan(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    if manager.is_empty() {
        println!("No foods in the catalog. Run 'foods' first.");
        return Ok(());
    }
    if manager.people().is_empty() {
        println!("Warning: no people configured; percent-mode plans resolve to 0 kcal.");
    }

    let catalog: Vec<(u64, String, bool, String)> = manager
        .all_foods()
        .iter()
        .map(|f| {
            (
                f.id,
                f.name.clone(),
                f.is_unit_based(),
                f.unit_label.clone().unwrap_or_else(|| "unit".to_string()),
            )
        })
        .collect();

    for (food_id, name, unit_based, unit_label) in catalog {
        if !prompt_yes_no(&format!("Plan '{}'?", name), true)? {
            continue;
        }

        if unit_based {
            // unit counts ignore the mode; stored as a calories-mode plan
            let current = manager.find_plan(food_id, None).map(|p| p.value).unwrap_or(0.0);
            let count = prompt_number(&format!("How many {}s of {}?", unit_label, name), current)?;
            manager.set_plan(food_id, None, PlanMode::Calories, count)?;
        } else {
            let current_mode = manager
                .find_plan(food_id, None)
                .map(|p| p.mode)
                .unwrap_or_default();
            let mode = prompt_plan_mode(current_mode)?;

            // carry the amount over when the user changes mode mid-plan
            let default_value = if manager.find_plan(food_id, None).is_some() {
                manager.switch_plan_mode(food_id, None, mode)?
            } else {
                0.0
            };

            let value = prompt_number(&format!("Amount in {}", mode), default_value)?;
            manager.set_plan(food_id, None, mode, value)?;
        }

        if let Some(plan) = manager.find_plan(food_id, None) {
            println!(
                "  -> {:.1} g, {:.1} kcal ({:.1}% of target)",
                plan.grams, plan.kcal, plan.percent
            );
        }
    }

    display_plan_overview(&manager);
    save_manager(file_path, &manager)
}

/// Give one person an explicit share of one group.
fn cmd_allocate(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    if manager.people().is_empty() || manager.groups().is_empty() {
        println!("Need at least one person and one group. Run 'setup' and 'build' first.");
        return Ok(());
    }

    let person_names: Vec<String> = manager.people().iter().map(|p| p.name.clone()).collect();
    let person_idx = dialoguer::Select::new()
        .with_prompt("Person")
        .items(&person_names)
        .default(0)
        .interact()?;
    let person_id = manager.people()[person_idx].id.clone();

    let group_names: Vec<String> = manager.groups().iter().map(|g| g.name.clone()).collect();
    let group_idx = dialoguer::Select::new()
        .with_prompt("Group")
        .items(&group_names)
        .default(0)
        .interact()?;
    let group_id = manager.groups()[group_idx].id.clone();

    let mode_idx = dialoguer::Select::new()
        .with_prompt("Allocation mode")
        .items(&["kcal", "percent of group"])
        .default(0)
        .interact()?;
    let mode = if mode_idx == 0 {
        AllocationMode::Kcal
    } else {
        AllocationMode::Percent
    };

    let value = prompt_number("Allocation value", 0.0)?;
    manager.set_allocation(&person_id, &group_id, mode, value);
    println!(
        "Allocated {} -> {} ({:.1})",
        person_names[person_idx], group_names[group_idx], value
    );

    save_manager(file_path, &manager)
}

/// Enter cooked weights and show the adjusted distribution.
fn cmd_cook(file_path: &str) -> Result<()> {
    let mut manager = load_manager(file_path)?;

    if manager.groups().is_empty() && manager.ungrouped_foods().is_empty() {
        println!("Nothing to cook. Run 'build' first.");
        return Ok(());
    }

    let group_ids: Vec<(String, String)> = manager
        .groups()
        .iter()
        .map(|g| (g.id.clone(), g.name.clone()))
        .collect();

    for (group_id, group_name) in &group_ids {
        let current = manager
            .find_group(group_id)
            .and_then(|g| g.cooked_weight_grams);
        let grams = prompt_cooked_weight(group_name, current)?;
        manager.set_cooked_weight(group_id, grams)?;

        let (planned_kcal, raw_grams) = manager.group_totals(group_id)?;
        println!(
            "{}: {:.1} kcal planned, {:.1} g raw -> {:.1} g cooked",
            group_name, planned_kcal, raw_grams, grams
        );

        let portions = manager.group_distribution(group_id)?;
        display_distribution(group_name, &portions);
    }

    // ungrouped foods are weighed and portioned one by one
    let ungrouped: Vec<(u64, String)> = manager
        .ungrouped_foods()
        .iter()
        .map(|f| (f.id, f.name.clone()))
        .collect();

    for (food_id, name) in &ungrouped {
        if manager.find_plan(*food_id, None).is_none() {
            continue;
        }
        let grams = prompt_cooked_weight(name, None)?;
        let portions = manager.ungrouped_distribution(*food_id, grams)?;
        display_distribution(name, &portions);
    }

    save_manager(file_path, &manager)
}

/// Show the whole session at a glance.
fn cmd_summary(file_path: &str) -> Result<()> {
    let manager = load_manager(file_path)?;

    display_person_summary(&manager);
    display_groups(&manager);
    display_plan_overview(&manager);

    Ok(())
}

/// Export per-person portions to CSV.
fn cmd_export(file_path: &str, out: &str) -> Result<()> {
    let manager = load_manager(file_path)?;
    let rows = export_portions_csv(out, &manager)?;
    println!("Wrote {} portion rows to {}", rows, out);
    Ok(())
}

/// Reset parts of the session.
fn cmd_reset(file_path: &str, people: bool, groups: bool, plans: bool, all: bool) -> Result<()> {
    if !people && !groups && !plans && !all {
        println!("Please specify at least one reset option:");
        println!("  --people  Remove all people");
        println!("  --groups  Remove all groups");
        println!("  --plans   Remove all plan entries");
        println!("  --all     Clear the whole session");
        return Ok(());
    }

    let mut manager = load_manager(file_path)?;

    if all {
        manager.clear_all();
        println!("Cleared the whole session.");
    } else {
        if people {
            manager.clear_people();
            println!("Removed all people.");
        }
        if groups {
            manager.clear_groups();
            println!("Removed all groups.");
        }
        if plans {
            manager.clear_plans();
            println!("Removed all plan entries.");
        }
    }

    save_manager(file_path, &manager)
}
