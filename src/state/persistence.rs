use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Food, Group, IngredientPlan, Person, PersonGroupAllocation};

/// Whole planning session as persisted on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanState {
    #[serde(rename = "Foods", default)]
    pub foods: Vec<Food>,

    #[serde(rename = "People", default)]
    pub people: Vec<Person>,

    #[serde(rename = "Groups", default)]
    pub groups: Vec<Group>,

    #[serde(rename = "Plans", default)]
    pub plans: Vec<IngredientPlan>,

    #[serde(rename = "Allocations", default)]
    pub allocations: Vec<PersonGroupAllocation>,
}

/// Load a planning session from a JSON file.
///
/// Foods are deduplicated by id (last occurrence wins).
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<PlanState> {
    let content = fs::read_to_string(path)?;
    let mut state: PlanState = serde_json::from_str(&content)?;

    let mut seen: HashMap<u64, Food> = HashMap::new();
    for food in state.foods.drain(..) {
        seen.insert(food.id, food);
    }
    let mut foods: Vec<Food> = seen.into_values().collect();
    foods.sort_by_key(|f| f.id);
    state.foods = foods;

    Ok(state)
}

/// Save a planning session to a JSON file (pretty-printed).
pub fn save_state<P: AsRef<Path>>(path: P, state: &PlanState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}
