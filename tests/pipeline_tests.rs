use std::collections::HashMap;

use meal_planner::composition::{compose_combo, ComboConstituent, ComboMetadata};
use meal_planner::generator::{generate, GeneratorConfig};
use meal_planner::integrity_validator::{
    validate_references, validate_structure, StructureRequirements,
};
use meal_planner::model::{
    Ingredient, IngredientCategory, IngredientStats, LineItem, MealType, Nutrition, Recipe,
    RecipeType,
};
use meal_planner::store::{export_envelope, import_envelope, Dataset};

fn butter() -> Ingredient {
    Ingredient {
        id: 1,
        name: "Butter".to_string(),
        category: IngredientCategory::Dairy,
        default_unit: "packages".to_string(),
        storage_notes: "Refrigerate".to_string(),
        nutrition: Nutrition { protein: 0.9, carbs: 0.1, fat: 81.0, calories: 717.0 },
        labels: vec!["baking".to_string()],
        stats: IngredientStats::default(),
    }
}

fn recipe_with_butter(id: i64, title: &str, servings: u32, quantity: f64) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        description: "Uses butter as the primary fat".to_string(),
        recipe_type: RecipeType::Regular,
        image_url: String::new(),
        servings,
        prep_time: 10,
        cook_time: 20,
        created_at: "2025-05-01T00:00:00Z".to_string(),
        instructions: vec!["Melt the butter and proceed.".to_string()],
        labels: vec!["Dinner".to_string()],
        items: vec![LineItem { item_id: 1, quantity, unit: "packages".to_string() }],
        combo_recipes: vec![],
    }
}

// Recipe A: 4 servings, 1 package. Recipe B: 2 servings, 0.5 packages.
// At 4 requested servings each, A contributes 1 and B contributes 1; the
// combo's single merged line item is 2.0 packages.
#[test]
fn test_end_to_end_butter_combo_scenario() {
    let a = recipe_with_butter(1, "Butter Bake", 4, 1.0);
    let b = recipe_with_butter(2, "Butter Sauce", 2, 0.5);
    let recipes = vec![a, b];
    let lookup: HashMap<i64, &Recipe> = recipes.iter().map(|r| (r.id, r)).collect();

    let combo = compose_combo(
        &[
            ComboConstituent { recipe: &recipes[0], requested_servings: 4 },
            ComboConstituent { recipe: &recipes[1], requested_servings: 4 },
        ],
        ComboMetadata {
            id: 3,
            title: "Butter Dinner".to_string(),
            description: "Everything butter, together".to_string(),
            image_url: String::new(),
            labels: vec![],
            meal_types: vec![MealType::Dinner],
        },
        &lookup,
    )
    .unwrap();

    assert_eq!(
        combo.items,
        vec![LineItem { item_id: 1, quantity: 2.0, unit: "packages".to_string() }]
    );
    assert_eq!(combo.servings, 4);

    let mut dataset = Dataset {
        ingredients: vec![butter()],
        recipes,
        meals: vec![],
        scheduled_meals: vec![],
    };
    let mut with_combo = dataset.clone();
    with_combo.recipes.push(combo);
    assert!(validate_references(&with_combo).is_empty());

    // The combo's snapshot does not follow later edits to a constituent.
    let frozen_quantity = with_combo.recipes[2].items[0].quantity;
    dataset.recipes[0].items[0].quantity = 5.0;
    assert_eq!(with_combo.recipes[2].items[0].quantity, frozen_quantity);
}

#[test]
fn test_generated_fixture_round_trips_through_a_file() {
    let dataset = generate(&GeneratorConfig {
        items: 20,
        recipes: 10,
        meals: 4,
        scheduled: 6,
        seed: 42,
    });
    assert!(validate_references(&dataset).is_empty());

    let requirements = StructureRequirements {
        min_ingredients: 10,
        min_regular_recipes: 5,
        min_distinct_labels: 5,
    };
    assert!(validate_structure(&dataset, &requirements).is_empty());

    let envelope = export_envelope(&dataset);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo_data.json");
    std::fs::write(&path, serde_json::to_string_pretty(&envelope).unwrap()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let restored = import_envelope(&raw).unwrap();
    assert_eq!(restored.ingredients.len(), dataset.ingredients.len());
    assert_eq!(restored.recipes.len(), dataset.recipes.len());
    assert_eq!(restored.meals.len(), dataset.meals.len());
    assert_eq!(restored.scheduled_meals.len(), dataset.scheduled_meals.len());
    assert!(validate_references(&restored).is_empty());
}

#[test]
fn test_validator_names_the_broken_reference() {
    let mut dataset = Dataset {
        ingredients: vec![butter()],
        recipes: vec![recipe_with_butter(1, "Butter Bake", 4, 1.0)],
        meals: vec![],
        scheduled_meals: vec![],
    };
    dataset.recipes[0]
        .items
        .push(LineItem { item_id: 999, quantity: 1.0, unit: "cups".to_string() });

    let issues = validate_references(&dataset);
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0],
        "Recipe \"Butter Bake\" references non-existent ingredient ID 999"
    );
}
