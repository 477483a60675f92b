pub mod aggregate;
pub mod distribute;
pub mod nutrients;
pub mod resolve;
pub mod sync;

pub use aggregate::{group_planned_kcal, group_raw_weight_grams};
pub use distribute::{distribute, group_planned_shares, PersonPortion, PersonShare};
pub use nutrients::{energy_kcal_per_100g, kcal_per_unit};
pub use resolve::{resolve_plan, round1, switch_mode, ResolvedPortion};
pub use sync::{
    prune_stale_group_ingredients, prune_stale_plans, resolve_all_plans,
    sync_group_ingredients_from_plans,
};
