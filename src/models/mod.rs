mod food;
mod group;
mod person;
mod plan;

pub use food::{Food, Nutrient, NUTRIENT_NUMBER_ENERGY, NUTRIENT_NUMBER_ENERGY_CUSTOM};
pub use group::{Group, GroupIngredient};
pub use person::Person;
pub use plan::{AllocationMode, IngredientPlan, PersonGroupAllocation, PlanMode};
