use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PrepError, Result};
use crate::models::{Food, Person, PlanMode};

/// Prompt for a non-negative number with a default.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PrepError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if value < 0.0 {
        return Err(PrepError::InvalidInput(
            "Value must not be negative".to_string(),
        ));
    }
    Ok(value)
}

/// Prompt for one person: name, meal count, target kcal per meal.
pub fn prompt_person(id: &str) -> Result<Person> {
    let name: String = Input::new().with_prompt("Person name").interact_text()?;

    let meals = prompt_number("How many meals will they eat from this prep?", 5.0)? as u32;
    if meals == 0 {
        return Err(PrepError::InvalidInput(
            "Meal count must be at least 1".to_string(),
        ));
    }

    let calories_per_meal = prompt_number("Target calories per meal", 600.0)?;
    if calories_per_meal <= 0.0 {
        return Err(PrepError::InvalidInput(
            "Calories per meal must be positive".to_string(),
        ));
    }

    Ok(Person::new(id, name.trim(), meals, calories_per_meal))
}

/// Prompt for one custom food, weight-based or unit-based.
///
/// The returned food has id 0; the state manager assigns the real id.
pub fn prompt_food() -> Result<Food> {
    let name: String = Input::new().with_prompt("Food name").interact_text()?;
    let kcal_per_100g = prompt_number("Calories per 100 g", 0.0)?;

    let unit_based = Confirm::new()
        .with_prompt("Is this food counted in units (egg, slice) instead of grams?")
        .default(false)
        .interact()?;

    if !unit_based {
        return Ok(Food::weight_based(0, name.trim(), kcal_per_100g));
    }

    let unit_label: String = Input::new()
        .with_prompt("Unit label (e.g. egg, slice)")
        .interact_text()?;
    let grams_per_unit = prompt_number("Grams per unit", 50.0)?;
    if grams_per_unit <= 0.0 {
        return Err(PrepError::InvalidInput(
            "Grams per unit must be positive".to_string(),
        ));
    }

    Ok(Food::unit_based(
        0,
        name.trim(),
        kcal_per_100g,
        unit_label.trim(),
        grams_per_unit,
    ))
}

/// Find a food by name: exact case-insensitive match first, then fuzzy
/// candidates above 0.7 similarity with a selection prompt.
pub fn find_food_fuzzy(input: &str, foods: &[&Food]) -> Result<Option<u64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(food) = foods
        .iter()
        .find(|f| f.name.to_lowercase() == input.to_lowercase())
    {
        return Ok(Some(food.id));
    }

    let mut candidates: Vec<(&&Food, f64)> = foods
        .iter()
        .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &input.to_lowercase())))
        .filter(|(_, score)| *score > 0.7)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        println!("No matching food found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let food = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", food.name))
            .default(true)
            .interact()?;
        return Ok(confirm.then_some(food.id));
    }

    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|(f, _)| f.name.clone())
        .collect();
    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    if selection < options.len() {
        Ok(Some(candidates[selection].0.id))
    } else {
        Ok(None)
    }
}

/// Prompt for the input mode of a plan value.
pub fn prompt_plan_mode(current: PlanMode) -> Result<PlanMode> {
    let modes = [PlanMode::Grams, PlanMode::Calories, PlanMode::Percent];
    let options: Vec<String> = modes.iter().map(|m| m.to_string()).collect();
    let default = modes.iter().position(|m| *m == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Input mode")
        .items(&options)
        .default(default)
        .interact()?;

    Ok(modes[selection])
}

/// Prompt for a group's measured cooked weight.
pub fn prompt_cooked_weight(name: &str, current: Option<f64>) -> Result<f64> {
    prompt_number(
        &format!("Cooked weight of '{}' in grams", name),
        current.unwrap_or(0.0),
    )
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
