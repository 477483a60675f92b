use serde::{Deserialize, Serialize};

use crate::models::PlanMode;

/// One food reference inside a group, carrying the resolved portion last
/// synced from the shared ingredient plans.
///
/// Groups never own foods; `food_id` points into the session catalog and a
/// stale reference (food removed) is pruned on the next sync pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupIngredient {
    #[serde(rename = "FoodId")]
    pub food_id: u64,

    #[serde(rename = "Mode", default)]
    pub mode: PlanMode,

    #[serde(rename = "Value", default)]
    pub value: f64,

    #[serde(rename = "Grams", default)]
    pub grams: f64,

    #[serde(rename = "Kcal", default)]
    pub kcal: f64,

    #[serde(rename = "Percent", default)]
    pub percent: f64,
}

impl GroupIngredient {
    pub fn new(food_id: u64) -> Self {
        Self {
            food_id,
            mode: PlanMode::default(),
            value: 0.0,
            grams: 0.0,
            kcal: 0.0,
            percent: 0.0,
        }
    }

    /// Clear the resolved fields back to defaults (no matching plan).
    pub fn reset_resolved(&mut self) {
        self.mode = PlanMode::default();
        self.value = 0.0;
        self.grams = 0.0;
        self.kcal = 0.0;
        self.percent = 0.0;
    }
}

/// A cooked batch combining one or more ingredients, weighed once as a
/// whole after cooking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Display order in the build/cook steps.
    #[serde(rename = "Position", default)]
    pub position: u32,

    #[serde(rename = "Ingredients", default)]
    pub ingredients: Vec<GroupIngredient>,

    /// Measured weight after cooking; absent until the cook step.
    #[serde(rename = "CookedWeightGrams", default, skip_serializing_if = "Option::is_none")]
    pub cooked_weight_grams: Option<f64>,
}

impl Group {
    pub fn new(id: &str, name: &str, position: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            ingredients: Vec::new(),
            cooked_weight_grams: None,
        }
    }

    #[inline]
    pub fn contains_food(&self, food_id: u64) -> bool {
        self.ingredients.iter().any(|i| i.food_id == food_id)
    }

    /// Add a food reference if not already present. Returns true if added.
    pub fn add_food(&mut self, food_id: u64) -> bool {
        if self.contains_food(food_id) {
            return false;
        }
        self.ingredients.push(GroupIngredient::new(food_id));
        true
    }

    /// Remove a food reference. Returns true if it was present.
    pub fn remove_food(&mut self, food_id: u64) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.food_id != food_id);
        self.ingredients.len() != before
    }

    /// Whether a cooked weight has been entered for this group.
    #[inline]
    pub fn is_cooked(&self) -> bool {
        self.cooked_weight_grams.map(|w| w > 0.0).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_food_deduplicates() {
        let mut group = Group::new("g1", "Stir Fry", 0);
        assert!(group.add_food(1));
        assert!(!group.add_food(1));
        assert_eq!(group.ingredients.len(), 1);
    }

    #[test]
    fn test_remove_food() {
        let mut group = Group::new("g1", "Stir Fry", 0);
        group.add_food(1);
        group.add_food(2);
        assert!(group.remove_food(1));
        assert!(!group.remove_food(1));
        assert_eq!(group.ingredients.len(), 1);
    }

    #[test]
    fn test_is_cooked() {
        let mut group = Group::new("g1", "Stir Fry", 0);
        assert!(!group.is_cooked());
        group.cooked_weight_grams = Some(0.0);
        assert!(!group.is_cooked());
        group.cooked_weight_grams = Some(850.0);
        assert!(group.is_cooked());
    }
}
