use serde::{Deserialize, Serialize};

/// Standard USDA nutrient number for energy in kcal.
pub const NUTRIENT_NUMBER_ENERGY: &str = "208";

/// Fallback nutrient number used for custom/local energy entries.
pub const NUTRIENT_NUMBER_ENERGY_CUSTOM: &str = "999";

/// A single nutrient entry on a food record.
///
/// `value` is the amount per 100 g of the food.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Number", default)]
    pub number: String,

    #[serde(rename = "Unit")]
    pub unit: String,

    #[serde(rename = "Value")]
    pub value: f64,
}

/// A food record in the session catalog.
///
/// A food is either weight-based (kcal per 100 g is the meaningful density)
/// or unit-based (counted in discrete items like eggs or slices, carrying
/// `grams_per_unit` and a display `unit_label`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(rename = "Id")]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Nutrients", default)]
    pub nutrients: Vec<Nutrient>,

    /// Display label for unit-based foods ("egg", "slice").
    #[serde(rename = "UnitLabel", default, skip_serializing_if = "Option::is_none")]
    pub unit_label: Option<String>,

    /// Grams per discrete unit; present only for unit-based foods.
    #[serde(rename = "GramsPerUnit", default, skip_serializing_if = "Option::is_none")]
    pub grams_per_unit: Option<f64>,
}

impl Food {
    /// Build a weight-based food with a single kcal/100g energy entry.
    pub fn weight_based(id: u64, name: &str, kcal_per_100g: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            nutrients: vec![Nutrient {
                name: "Energy".to_string(),
                number: NUTRIENT_NUMBER_ENERGY.to_string(),
                unit: "kcal".to_string(),
                value: kcal_per_100g,
            }],
            unit_label: None,
            grams_per_unit: None,
        }
    }

    /// Build a unit-based food (counted in discrete items).
    pub fn unit_based(
        id: u64,
        name: &str,
        kcal_per_100g: f64,
        unit_label: &str,
        grams_per_unit: f64,
    ) -> Self {
        let mut food = Self::weight_based(id, name, kcal_per_100g);
        food.unit_label = Some(unit_label.to_string());
        food.grams_per_unit = Some(grams_per_unit);
        food
    }

    /// Whether this food is counted in discrete units rather than grams.
    #[inline]
    pub fn is_unit_based(&self) -> bool {
        self.grams_per_unit.is_some()
    }

    /// Add or replace a nutrient entry by name (case-insensitive).
    pub fn set_nutrient(&mut self, name: &str, number: &str, unit: &str, value: f64) {
        if let Some(existing) = self
            .nutrients
            .iter_mut()
            .find(|n| n.name.eq_ignore_ascii_case(name))
        {
            existing.value = value;
            existing.unit = unit.to_string();
            existing.number = number.to_string();
        } else {
            self.nutrients.push(Nutrient {
                name: name.to_string(),
                number: number.to_string(),
                unit: unit.to_string(),
                value,
            });
        }
    }

    /// Basic validation: non-negative nutrient values, and a positive
    /// grams-per-unit when the food is unit-based.
    pub fn is_valid(&self) -> bool {
        self.nutrients.iter().all(|n| n.value >= 0.0)
            && self.grams_per_unit.map(|g| g > 0.0).unwrap_or(true)
    }

    /// Canonical key for name lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_based_has_energy_entry() {
        let food = Food::weight_based(1, "Rice", 130.0);
        assert!(!food.is_unit_based());
        assert_eq!(food.nutrients.len(), 1);
        assert_eq!(food.nutrients[0].number, NUTRIENT_NUMBER_ENERGY);
        assert_eq!(food.nutrients[0].value, 130.0);
    }

    #[test]
    fn test_unit_based_flag() {
        let food = Food::unit_based(2, "Egg", 150.0, "egg", 50.0);
        assert!(food.is_unit_based());
        assert_eq!(food.unit_label.as_deref(), Some("egg"));
    }

    #[test]
    fn test_set_nutrient_replaces_by_name() {
        let mut food = Food::weight_based(1, "Rice", 130.0);
        food.set_nutrient("energy", NUTRIENT_NUMBER_ENERGY, "kcal", 140.0);
        assert_eq!(food.nutrients.len(), 1);
        assert_eq!(food.nutrients[0].value, 140.0);
    }

    #[test]
    fn test_is_valid_rejects_zero_grams_per_unit() {
        let mut food = Food::unit_based(2, "Egg", 150.0, "egg", 50.0);
        assert!(food.is_valid());
        food.grams_per_unit = Some(0.0);
        assert!(!food.is_valid());
    }
}
