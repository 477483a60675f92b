use std::path::Path;

use crate::error::Result;
use crate::state::PlanStateManager;

/// Write every cooked group's per-person portions to a CSV file.
///
/// Returns the number of data rows written. Uncooked groups still appear,
/// with zero gram portions, so the file always covers the whole plan.
pub fn export_portions_csv<P: AsRef<Path>>(path: P, manager: &PlanStateManager) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "group",
        "person",
        "kcal_total",
        "grams_total",
        "kcal_per_meal",
        "grams_per_meal",
    ])?;

    let mut rows = 0;
    for group in manager.groups() {
        for portion in manager.group_distribution(&group.id)? {
            let kcal_total = format!("{:.1}", portion.adjusted_kcal_total);
            let grams_total = format!("{:.1}", portion.adjusted_grams_total);
            let kcal_per_meal = format!("{:.1}", portion.adjusted_kcal_per_meal);
            let grams_per_meal = format!("{:.1}", portion.adjusted_grams_per_meal);
            writer.write_record([
                group.name.as_str(),
                portion.name.as_str(),
                kcal_total.as_str(),
                grams_total.as_str(),
                kcal_per_meal.as_str(),
                grams_per_meal.as_str(),
            ])?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}
