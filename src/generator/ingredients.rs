use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Ingredient, IngredientCategory, IngredientStats, Nutrition};

const PRODUCE: &[&str] = &[
    "Carrots", "Broccoli", "Spinach", "Bell Peppers", "Onions", "Garlic", "Tomatoes",
    "Zucchini", "Mushrooms", "Sweet Potatoes", "Kale", "Cucumbers",
];
const MEAT: &[&str] = &[
    "Chicken Breast", "Ground Beef", "Pork Chops", "Salmon Fillet", "Turkey Mince",
    "Bacon", "Chicken Thighs", "Shrimp",
];
const DAIRY: &[&str] = &[
    "Butter", "Whole Milk", "Cheddar Cheese", "Greek Yogurt", "Heavy Cream",
    "Parmesan", "Mozzarella", "Sour Cream",
];
const PANTRY: &[&str] = &[
    "Olive Oil", "Soy Sauce", "Canned Tomatoes", "Chicken Stock", "Honey",
    "Peanut Butter", "Dijon Mustard", "Black Beans",
];
const FROZEN: &[&str] = &["Frozen Peas", "Frozen Corn", "Frozen Berries", "Frozen Spinach"];
const BAKERY: &[&str] = &["Sourdough Loaf", "Tortillas", "Burger Buns", "Pita Bread"];
const GRAINS: &[&str] = &["Jasmine Rice", "Spaghetti", "Rolled Oats", "Quinoa", "Couscous", "Flour"];

const UNITS: &[&str] = &["g", "kg", "cups", "tbsp", "tsp", "pieces", "packages", "cans", "ml"];

fn pool_for(category: IngredientCategory) -> &'static [&'static str] {
    match category {
        IngredientCategory::Produce => PRODUCE,
        IngredientCategory::Meat => MEAT,
        IngredientCategory::Dairy => DAIRY,
        IngredientCategory::Pantry => PANTRY,
        IngredientCategory::Frozen => FROZEN,
        IngredientCategory::Bakery => BAKERY,
        IngredientCategory::Grains => GRAINS,
    }
}

fn storage_notes_for(category: IngredientCategory) -> &'static str {
    match category {
        IngredientCategory::Produce => "Keep in the crisper drawer",
        IngredientCategory::Meat => "Refrigerate, use within 3 days",
        IngredientCategory::Dairy => "Refrigerate below 5°C",
        IngredientCategory::Pantry => "Store in a cool dry cupboard",
        IngredientCategory::Frozen => "Keep frozen until needed",
        IngredientCategory::Bakery => "Best within 2 days, freezes well",
        IngredientCategory::Grains => "Airtight container, away from light",
    }
}

/// Generate `count` demo ingredients, cycling through the category pools so
/// every category is represented. Names are suffixed with a batch number once
/// a pool is exhausted, keeping ids and names unique.
pub fn generate_ingredients(count: usize, rng: &mut StdRng) -> Vec<Ingredient> {
    let mut ingredients = Vec::with_capacity(count);
    let mut pool_positions = [0usize; 7];

    for index in 0..count {
        let category = IngredientCategory::ALL[index % IngredientCategory::ALL.len()];
        let pool = pool_for(category);
        let position = pool_positions[index % IngredientCategory::ALL.len()];
        pool_positions[index % IngredientCategory::ALL.len()] += 1;

        let base_name = pool[position % pool.len()];
        let name = if position < pool.len() {
            base_name.to_string()
        } else {
            format!("{} (batch {})", base_name, position / pool.len() + 1)
        };

        let calories = rng.gen_range(20.0..500.0_f64);
        let nutrition = Nutrition {
            protein: (rng.gen_range(0.0..30.0_f64) * 10.0).round() / 10.0,
            carbs: (rng.gen_range(0.0..60.0_f64) * 10.0).round() / 10.0,
            fat: (rng.gen_range(0.0..40.0_f64) * 10.0).round() / 10.0,
            calories: calories.round(),
        };

        let mut labels = vec![category.as_str().to_string()];
        if nutrition.protein > 15.0 {
            labels.push("high-protein".to_string());
        }
        if nutrition.calories < 100.0 {
            labels.push("light".to_string());
        }

        ingredients.push(Ingredient {
            id: (index + 1) as i64,
            name,
            category,
            default_unit: UNITS.choose(rng).unwrap_or(&"g").to_string(),
            storage_notes: storage_notes_for(category).to_string(),
            nutrition,
            labels,
            stats: IngredientStats::default(),
        });
    }
    ingredients
}
