pub mod ingredients;
pub mod meals;
pub mod recipes;
pub mod scheduled;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::store::Dataset;

/// How much demo data to produce. Counts mirror the generator CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub items: usize,
    pub recipes: usize,
    pub meals: usize,
    pub scheduled: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            items: 40,
            recipes: 20,
            meals: 8,
            scheduled: 14,
            seed: 0,
        }
    }
}

/// Produce a full demo dataset: ingredients, regular recipes, combo recipes
/// built through the composition engine, meals, and a fortnight of scheduled
/// meals. Entity content is deterministic for a given config (seed included);
/// scheduled dates are anchored to the current date so the demo calendar
/// always has upcoming entries.
pub fn generate(config: &GeneratorConfig) -> Dataset {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let ingredients = ingredients::generate_ingredients(config.items, &mut rng);
    let recipes = recipes::generate_recipes(config.recipes, &ingredients, &mut rng);
    let meals = meals::generate_meals(config.meals, &recipes, &mut rng);
    let scheduled_meals =
        scheduled::generate_scheduled(config.scheduled, &recipes, &meals, &mut rng);

    let mut dataset = Dataset {
        ingredients,
        recipes,
        meals,
        scheduled_meals,
    };
    dataset.recompute_ingredient_stats();
    dataset
}
