use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use crate::model::{MealRecipeRef, MealType, ScheduledMeal};
use crate::store::Dataset;

/// All scheduled meals on a given calendar date, in stored order.
pub fn scheduled_for_date<'a>(dataset: &'a Dataset, date: NaiveDate) -> Vec<&'a ScheduledMeal> {
    dataset
        .scheduled_meals
        .iter()
        .filter(|s| s.date == date)
        .collect()
}

/// UI-time check used before inserting into a calendar slot: true if any
/// entry already scheduled on `date` resolves to the given meal type. This
/// is not a stored constraint; the data model itself allows duplicates.
pub fn slot_taken(dataset: &Dataset, date: NaiveDate, meal_type: MealType) -> bool {
    scheduled_for_date(dataset, date).iter().any(|scheduled| {
        let types = match (scheduled.recipe_id, scheduled.meal_id) {
            (Some(recipe_id), _) => dataset
                .recipe_by_id(recipe_id)
                .map(|r| r.meal_types())
                .unwrap_or_default(),
            (None, Some(meal_id)) => dataset
                .meal_by_id(meal_id)
                .map(|m| m.meal_types.clone())
                .unwrap_or_default(),
            (None, None) => Vec::new(),
        };
        types.contains(&meal_type)
    })
}

/// Schedule a recipe onto a date. The recipe_id reference is authoritative;
/// the attached snapshot list exists only for display.
pub fn schedule_recipe(
    dataset: &mut Dataset,
    recipe_id: i64,
    date: NaiveDate,
    servings: u32,
    notes: String,
) -> Result<i64> {
    if dataset.recipe_by_id(recipe_id).is_none() {
        bail!("cannot schedule non-existent recipe ID {}", recipe_id);
    }
    let id = next_scheduled_id(dataset);
    dataset.scheduled_meals.push(ScheduledMeal {
        id,
        date,
        servings,
        notes,
        created_at: Utc::now().to_rfc3339(),
        recipe_id: Some(recipe_id),
        meal_id: None,
        recipes: vec![MealRecipeRef { recipe_id, servings }],
    });
    Ok(id)
}

/// Schedule a meal onto a date, snapshotting its per-recipe serving counts
/// for display.
pub fn schedule_meal(
    dataset: &mut Dataset,
    meal_id: i64,
    date: NaiveDate,
    servings: u32,
    notes: String,
) -> Result<i64> {
    let snapshot = match dataset.meal_by_id(meal_id) {
        Some(meal) => meal.recipes.clone(),
        None => bail!("cannot schedule non-existent meal ID {}", meal_id),
    };
    let id = next_scheduled_id(dataset);
    dataset.scheduled_meals.push(ScheduledMeal {
        id,
        date,
        servings,
        notes,
        created_at: Utc::now().to_rfc3339(),
        recipe_id: None,
        meal_id: Some(meal_id),
        recipes: snapshot,
    });
    Ok(id)
}

/// Remove a scheduled meal. Scheduled entries are never edited in place;
/// changes are modeled as delete + recreate.
pub fn remove_scheduled(dataset: &mut Dataset, scheduled_id: i64) -> bool {
    let before = dataset.scheduled_meals.len();
    dataset.scheduled_meals.retain(|s| s.id != scheduled_id);
    dataset.scheduled_meals.len() != before
}

fn next_scheduled_id(dataset: &Dataset) -> i64 {
    dataset
        .scheduled_meals
        .iter()
        .map(|s| s.id)
        .max()
        .unwrap_or(0)
        + 1
}
