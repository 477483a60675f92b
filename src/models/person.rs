use serde::{Deserialize, Serialize};

/// A person eating from the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// How many discrete meals this person eats from the prep.
    #[serde(rename = "MealsCount")]
    pub meals_count: u32,

    /// Target kcal per meal.
    #[serde(rename = "CaloriesPerMeal")]
    pub calories_per_meal: f64,
}

impl Person {
    pub fn new(id: &str, name: &str, meals_count: u32, calories_per_meal: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            meals_count,
            calories_per_meal,
        }
    }

    /// Total kcal this person plans to eat over all their meals.
    #[inline]
    pub fn total_target_kcal(&self) -> f64 {
        self.meals_count as f64 * self.calories_per_meal
    }

    pub fn is_valid(&self) -> bool {
        self.meals_count > 0 && self.calories_per_meal > 0.0
    }
}
