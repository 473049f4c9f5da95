use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::composition::{compose_combo, select_combo_constituents, ComboConstituent, ComboMetadata};
use crate::model::{Ingredient, LineItem, MealType, Recipe, RecipeType};

const TITLE_STYLES: &[&str] = &[
    "Roasted", "Creamy", "Spicy", "Herbed", "Crispy", "Slow-Cooked", "Garlic", "Honey-Glazed",
    "Smoky", "One-Pan",
];
const TITLE_DISHES: &[&str] = &[
    "Chicken Skillet", "Beef Stew", "Vegetable Curry", "Pasta Bake", "Fried Rice",
    "Fish Tacos", "Mashed Potatoes", "Lentil Soup", "Breakfast Hash", "Grain Bowl",
    "Stir Fry", "Fried Chicken", "Shepherd's Pie", "Omelette", "Noodle Salad",
];
const EXTRA_LABELS: &[&str] = &[
    "quick", "family-favorite", "weeknight", "make-ahead", "one-pot", "vegetarian-friendly",
];
const INSTRUCTION_POOL: &[&str] = &[
    "Prep and measure all ingredients before starting.",
    "Heat a large pan over medium-high heat with a little oil.",
    "Add the aromatics and cook until fragrant.",
    "Add the main ingredients and cook, stirring occasionally.",
    "Season to taste and adjust the consistency.",
    "Simmer until everything is cooked through.",
    "Rest for a few minutes, then serve warm.",
];
const QUANTITY_STEPS: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0];

/// Combo templates: a display name plus the title substrings the matching
/// policy tries to satisfy from already-generated regular recipes.
const COMBO_TEMPLATES: &[(&str, &[&str])] = &[
    ("Fried Chicken Dinner", &["fried chicken", "mashed potatoes"]),
    ("Weeknight Comfort Plate", &["stew", "grain bowl"]),
];

/// Generate `count` regular recipes over the ingredient pool, then append
/// combo recipes assembled from the templates through the composition
/// engine. Meal-type labels cycle so every meal type has coverage.
pub fn generate_recipes(count: usize, ingredients: &[Ingredient], rng: &mut StdRng) -> Vec<Recipe> {
    let mut recipes = Vec::with_capacity(count + COMBO_TEMPLATES.len());

    for index in 0..count {
        let id = (index + 1) as i64;
        let style = TITLE_STYLES[index % TITLE_STYLES.len()];
        let dish = TITLE_DISHES[(index / TITLE_STYLES.len() + index) % TITLE_DISHES.len()];
        let title = format!("{} {}", style, dish);
        let meal_type = MealType::ALL[index % MealType::ALL.len()];

        let mut labels = vec![meal_type.label().to_string()];
        labels.push(EXTRA_LABELS[index % EXTRA_LABELS.len()].to_string());

        let instruction_count = rng.gen_range(3..=5);
        let instructions: Vec<String> = (0..instruction_count)
            .map(|step| INSTRUCTION_POOL[step % INSTRUCTION_POOL.len()].to_string())
            .collect();

        let item_count = rng.gen_range(3..=6.min(ingredients.len().max(3)));
        let mut chosen: Vec<&Ingredient> = ingredients.choose_multiple(rng, item_count).collect();
        chosen.sort_by_key(|i| i.id);
        let items: Vec<LineItem> = chosen
            .iter()
            .map(|ingredient| LineItem {
                item_id: ingredient.id,
                quantity: *QUANTITY_STEPS.choose(rng).unwrap_or(&1.0),
                unit: ingredient.default_unit.clone(),
            })
            .collect();

        recipes.push(Recipe {
            id,
            title: title.clone(),
            description: format!("{} made from scratch with everyday staples.", title),
            recipe_type: RecipeType::Regular,
            image_url: format!("images/recipe_{}.jpg", id),
            servings: *[2u32, 4, 4, 6].choose(rng).unwrap_or(&4),
            prep_time: rng.gen_range(5..=30),
            cook_time: rng.gen_range(10..=60),
            created_at: created_at_for(index),
            instructions,
            labels,
            items,
            combo_recipes: vec![],
        });
    }

    append_combos(&mut recipes);
    recipes
}

/// Assemble one combo per template, skipping templates that cannot find at
/// least two constituents.
fn append_combos(recipes: &mut Vec<Recipe>) {
    let mut next_id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;

    for (name, desired) in COMBO_TEMPLATES {
        let (mut combo, created_at) = {
            let selected = select_combo_constituents(desired, recipes);
            if selected.len() < 2 {
                continue;
            }
            let constituents: Vec<ComboConstituent> = selected
                .iter()
                .map(|&recipe| ComboConstituent {
                    recipe,
                    requested_servings: recipe.servings,
                })
                .collect();
            let meal_types = selected
                .first()
                .map(|r| r.meal_types())
                .unwrap_or_default();
            let metadata = ComboMetadata {
                id: next_id,
                title: name.to_string(),
                description: format!("{}: a ready-made pairing of house favorites.", name),
                image_url: format!("images/recipe_{}.jpg", next_id),
                labels: vec!["family-favorite".to_string()],
                meal_types,
            };
            let lookup = recipes.iter().map(|r| (r.id, r)).collect();
            let created_at = selected
                .first()
                .map(|r| r.created_at.clone())
                .unwrap_or_default();
            match compose_combo(&constituents, metadata, &lookup) {
                Ok(combo) => (combo, created_at),
                Err(_) => continue,
            }
        };
        // Creation timestamp is the caller's job; reuse the first
        // constituent's so generated data stays deterministic.
        combo.created_at = created_at;
        recipes.push(combo);
        next_id += 1;
    }
}

fn created_at_for(index: usize) -> String {
    // Spread authorship over a fixed window so fixtures are stable.
    let day = (index % 28) + 1;
    format!("2025-06-{:02}T09:00:00Z", day)
}
