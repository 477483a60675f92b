mod export;
mod prompts;
mod render;

pub use export::export_portions_csv;
pub use prompts::{
    find_food_fuzzy, prompt_cooked_weight, prompt_food, prompt_number, prompt_person,
    prompt_plan_mode, prompt_yes_no,
};
pub use render::{
    display_distribution, display_food_list, display_groups, display_person_summary,
    display_plan_overview,
};
