use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Meal, MealRecipeRef, Recipe, ScheduledMeal};

const NOTES: &[&str] = &[
    "", "Double the sides", "Guests coming over", "Use up leftovers first", "Prep the night before",
];

/// Spread `count` scheduled entries over a two-week window starting today,
/// alternating between recipe and meal targets where both exist. The id
/// reference is authoritative; the attached recipes list is a display
/// snapshot taken at scheduling time.
pub fn generate_scheduled(
    count: usize,
    recipes: &[Recipe],
    meals: &[Meal],
    rng: &mut StdRng,
) -> Vec<ScheduledMeal> {
    let mut scheduled = Vec::with_capacity(count);
    if recipes.is_empty() && meals.is_empty() {
        return scheduled;
    }
    let today = Utc::now().date_naive();

    for index in 0..count {
        let date = today + Duration::days((index % 14) as i64);
        let id = (index + 1) as i64;
        let use_meal = !meals.is_empty() && (recipes.is_empty() || index % 2 == 1);
        let notes = NOTES[rng.gen_range(0..NOTES.len())].to_string();

        let entry = if use_meal {
            let meal = &meals[index % meals.len()];
            ScheduledMeal {
                id,
                date,
                servings: meal.total_servings.max(1),
                notes,
                created_at: format!("2025-08-{:02}T08:00:00Z", (index % 28) + 1),
                recipe_id: None,
                meal_id: Some(meal.id),
                recipes: meal.recipes.clone(),
            }
        } else {
            let recipe = recipes.choose(rng).unwrap_or(&recipes[0]);
            ScheduledMeal {
                id,
                date,
                servings: recipe.servings.max(1),
                notes,
                created_at: format!("2025-08-{:02}T08:00:00Z", (index % 28) + 1),
                recipe_id: Some(recipe.id),
                meal_id: None,
                recipes: vec![MealRecipeRef { recipe_id: recipe.id, servings: recipe.servings }],
            }
        };
        scheduled.push(entry);
    }
    scheduled
}
