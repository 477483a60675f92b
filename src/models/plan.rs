use serde::{Deserialize, Serialize};

/// Input mode for an ingredient plan value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    #[default]
    Grams,
    Calories,
    Percent,
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanMode::Grams => "grams",
            PlanMode::Calories => "kcal",
            PlanMode::Percent => "percent",
        };
        write!(f, "{}", s)
    }
}

/// A user's allocation of one food, keyed by `(food_id, person_id)`.
///
/// `value` is the raw input in the unit implied by `mode`; the resolved
/// triple `{grams, kcal, percent}` is recomputed by the plan resolver
/// whenever food data or the total-calorie denominator changes. Only the
/// resolver writes the triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientPlan {
    #[serde(rename = "FoodId")]
    pub food_id: u64,

    /// None for a shared (whole-table) plan entry.
    #[serde(rename = "PersonId", default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,

    #[serde(rename = "Mode")]
    pub mode: PlanMode,

    #[serde(rename = "Value")]
    pub value: f64,

    #[serde(rename = "Grams", default)]
    pub grams: f64,

    #[serde(rename = "Kcal", default)]
    pub kcal: f64,

    #[serde(rename = "Percent", default)]
    pub percent: f64,
}

impl IngredientPlan {
    pub fn new(food_id: u64, person_id: Option<String>, mode: PlanMode, value: f64) -> Self {
        Self {
            food_id,
            person_id,
            mode,
            value,
            grams: 0.0,
            kcal: 0.0,
            percent: 0.0,
        }
    }

    /// Whether this plan is the shared (non-per-person) entry for its food.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.person_id.is_none()
    }
}

/// Mode for an explicit per-person-per-group allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    Kcal,
    Percent,
}

/// One person's explicit claim on one group's planned calories.
///
/// `Percent` values are relative to the group's planned kcal; `Kcal`
/// values are absolute. Groups with no explicit allocations fall back to
/// each person's overall meal-plan target when distributing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonGroupAllocation {
    #[serde(rename = "PersonId")]
    pub person_id: String,

    #[serde(rename = "GroupId")]
    pub group_id: String,

    #[serde(rename = "Mode")]
    pub mode: AllocationMode,

    #[serde(rename = "Value")]
    pub value: f64,
}
