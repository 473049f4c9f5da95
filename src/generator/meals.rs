use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Meal, MealRecipeRef, MealType, Recipe};

const MEAL_NAMES: &[&str] = &[
    "Sunday Family Dinner", "Quick Weeknight Fix", "Meal-Prep Monday", "Cozy Night In",
    "Lazy Brunch Spread", "Post-Workout Plate", "Game Day Spread", "Midweek Reset",
    "Pantry Clean-Out", "Guest Night Menu",
];

/// Group generated recipes into planning-level meals. Each meal references
/// 2-3 recipes; total servings is the largest constituent serving count and
/// estimated time sums each constituent's prep and cook minutes.
pub fn generate_meals(count: usize, recipes: &[Recipe], rng: &mut StdRng) -> Vec<Meal> {
    let mut meals = Vec::with_capacity(count);
    if recipes.is_empty() {
        return meals;
    }

    for index in 0..count {
        let take = rng.gen_range(2..=3.min(recipes.len().max(2)));
        let mut chosen: Vec<&Recipe> = recipes.choose_multiple(rng, take).collect();
        chosen.sort_by_key(|r| r.id);

        let refs: Vec<MealRecipeRef> = chosen
            .iter()
            .map(|r| MealRecipeRef { recipe_id: r.id, servings: r.servings })
            .collect();
        let total_servings = refs.iter().map(|r| r.servings).max().unwrap_or(1);
        let estimated_time = chosen.iter().map(|r| r.prep_time + r.cook_time).sum();

        let mut meal_types: Vec<MealType> = Vec::new();
        for meal_type in chosen.iter().flat_map(|r| r.meal_types()) {
            if !meal_types.contains(&meal_type) {
                meal_types.push(meal_type);
            }
        }
        if meal_types.is_empty() {
            meal_types.push(MealType::Dinner);
        }

        let base_name = MEAL_NAMES[index % MEAL_NAMES.len()];
        let name = if index < MEAL_NAMES.len() {
            base_name.to_string()
        } else {
            format!("{} {}", base_name, index / MEAL_NAMES.len() + 1)
        };

        let created_at = format!("2025-07-{:02}T18:00:00Z", (index % 28) + 1);
        meals.push(Meal {
            id: (index + 1) as i64,
            name: name.clone(),
            description: format!("{} built from {} house recipes.", name, refs.len()),
            recipes: refs,
            total_servings,
            meal_types,
            labels: vec!["planned".to_string()],
            tags: vec!["demo".to_string()],
            estimated_time,
            created_at: created_at.clone(),
            updated_at: created_at,
        });
    }
    meals
}
