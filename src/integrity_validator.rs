use serde_json::Value;

use crate::model::{MealType, RecipeType};
use crate::store::Dataset;

/// Thresholds for the stricter, generator-side structural checks.
#[derive(Debug, Clone, Copy)]
pub struct StructureRequirements {
    pub min_ingredients: usize,
    pub min_regular_recipes: usize,
    pub min_distinct_labels: usize,
}

impl Default for StructureRequirements {
    fn default() -> Self {
        StructureRequirements {
            min_ingredients: 10,
            min_regular_recipes: 5,
            min_distinct_labels: 5,
        }
    }
}

/// Walk the dataset graph and report every dangling reference as a
/// human-readable issue string. Never errors and never mutates: an empty
/// result means every reference resolves.
pub fn validate_references(dataset: &Dataset) -> Vec<String> {
    let mut issues = Vec::new();
    let ingredient_ids = dataset.ingredient_ids();
    let recipe_ids = dataset.recipe_ids();
    let meal_ids = dataset.meal_ids();

    for recipe in &dataset.recipes {
        for item in &recipe.items {
            if !ingredient_ids.contains(&item.item_id) {
                issues.push(format!(
                    "Recipe \"{}\" references non-existent ingredient ID {}",
                    recipe.title, item.item_id
                ));
            }
        }
        for combo_ref in &recipe.combo_recipes {
            if combo_ref.recipe_id == recipe.id {
                issues.push(format!(
                    "Recipe \"{}\" references itself as a combo constituent",
                    recipe.title
                ));
            } else if !recipe_ids.contains(&combo_ref.recipe_id) {
                issues.push(format!(
                    "Recipe \"{}\" references non-existent recipe ID {}",
                    recipe.title, combo_ref.recipe_id
                ));
            }
        }
    }

    for meal in &dataset.meals {
        for meal_ref in &meal.recipes {
            if !recipe_ids.contains(&meal_ref.recipe_id) {
                issues.push(format!(
                    "Meal \"{}\" references non-existent recipe ID {}",
                    meal.name, meal_ref.recipe_id
                ));
            }
        }
    }

    for scheduled in &dataset.scheduled_meals {
        if let Some(recipe_id) = scheduled.recipe_id {
            if !recipe_ids.contains(&recipe_id) {
                issues.push(format!(
                    "Scheduled meal {} references non-existent recipe ID {}",
                    scheduled.id, recipe_id
                ));
            }
        }
        if let Some(meal_id) = scheduled.meal_id {
            if !meal_ids.contains(&meal_id) {
                issues.push(format!(
                    "Scheduled meal {} references non-existent meal ID {}",
                    scheduled.id, meal_id
                ));
            }
        }
    }

    issues
}

/// Structural checks applied to generated or imported datasets on top of the
/// reference walk: entity counts, field lengths, per-meal-type coverage, and
/// required non-empty fields.
pub fn validate_structure(dataset: &Dataset, requirements: &StructureRequirements) -> Vec<String> {
    let mut issues = Vec::new();

    if dataset.ingredients.len() < requirements.min_ingredients {
        issues.push(format!(
            "Expected at least {} ingredients, found {}",
            requirements.min_ingredients,
            dataset.ingredients.len()
        ));
    }
    let regular_count = dataset.recipes.iter().filter(|r| r.is_regular()).count();
    if regular_count < requirements.min_regular_recipes {
        issues.push(format!(
            "Expected at least {} regular recipes, found {}",
            requirements.min_regular_recipes, regular_count
        ));
    }

    let mut distinct_labels: Vec<&str> = dataset
        .recipes
        .iter()
        .flat_map(|r| r.labels.iter().map(String::as_str))
        .collect();
    distinct_labels.sort_unstable();
    distinct_labels.dedup();
    if distinct_labels.len() < requirements.min_distinct_labels {
        issues.push(format!(
            "Expected at least {} distinct recipe labels, found {}",
            requirements.min_distinct_labels,
            distinct_labels.len()
        ));
    }

    for meal_type in MealType::ALL {
        let covered = dataset
            .recipes
            .iter()
            .any(|r| r.labels.iter().any(|l| l == meal_type.label()));
        if !covered {
            issues.push(format!(
                "No recipe carries the \"{}\" meal-type label",
                meal_type.label()
            ));
        }
    }

    for ingredient in &dataset.ingredients {
        if ingredient.name.is_empty() {
            issues.push(format!("Ingredient {} has an empty name", ingredient.id));
        }
        if ingredient.default_unit.is_empty() {
            issues.push(format!(
                "Ingredient \"{}\" has an empty default unit",
                ingredient.name
            ));
        }
        if ingredient.labels.is_empty() {
            issues.push(format!("Ingredient \"{}\" has no labels", ingredient.name));
        }
    }

    for recipe in &dataset.recipes {
        if recipe.title.len() <= 3 {
            issues.push(format!(
                "Recipe {} title \"{}\" is too short (must exceed 3 characters)",
                recipe.id, recipe.title
            ));
        }
        if recipe.description.len() <= 10 {
            issues.push(format!(
                "Recipe \"{}\" description is too short (must exceed 10 characters)",
                recipe.title
            ));
        }
        if recipe.labels.is_empty() {
            issues.push(format!("Recipe \"{}\" has no labels", recipe.title));
        }
        if recipe.servings == 0 {
            issues.push(format!("Recipe \"{}\" has zero servings", recipe.title));
        }
        for (idx, instruction) in recipe.instructions.iter().enumerate() {
            if instruction.len() <= 5 {
                issues.push(format!(
                    "Recipe \"{}\" instruction {} is too short (must exceed 5 characters)",
                    recipe.title,
                    idx + 1
                ));
            }
        }
        for item in &recipe.items {
            if item.quantity <= 0.0 {
                issues.push(format!(
                    "Recipe \"{}\" has a non-positive quantity for ingredient ID {}",
                    recipe.title, item.item_id
                ));
            }
        }
        if recipe.recipe_type == RecipeType::Combo && recipe.combo_recipes.is_empty() {
            issues.push(format!(
                "Combo recipe \"{}\" has an empty combo_recipes list",
                recipe.title
            ));
        }
    }

    for meal in &dataset.meals {
        if meal.name.is_empty() {
            issues.push(format!("Meal {} has an empty name", meal.id));
        }
        if meal.recipes.is_empty() {
            issues.push(format!("Meal \"{}\" contains no recipes", meal.name));
        }
    }

    for scheduled in &dataset.scheduled_meals {
        if scheduled.recipe_id.is_none() && scheduled.meal_id.is_none() {
            issues.push(format!(
                "Scheduled meal {} targets neither a recipe nor a meal",
                scheduled.id
            ));
        }
        if scheduled.servings == 0 {
            issues.push(format!("Scheduled meal {} has zero servings", scheduled.id));
        }
    }

    issues
}

/// Scan raw entity JSON for deprecated fields the model deliberately
/// excludes. Cost tracking was removed from the system; a `cost` field
/// anywhere in an entity marks stale fixture data.
pub fn check_forbidden_fields(raw: &Value) -> Vec<String> {
    let mut issues = Vec::new();
    scan_forbidden(raw, "$", &mut issues);
    issues
}

fn scan_forbidden(value: &Value, path: &str, issues: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key == "cost" {
                    issues.push(format!("Forbidden field \"cost\" present at {}", path));
                }
                scan_forbidden(nested, &format!("{}.{}", path, key), issues);
            }
        }
        Value::Array(entries) => {
            for (idx, nested) in entries.iter().enumerate() {
                scan_forbidden(nested, &format!("{}[{}]", path, idx), issues);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Ingredient, IngredientCategory, IngredientStats, LineItem, Meal, MealRecipeRef, Nutrition,
        Recipe, RecipeType, ScheduledMeal,
    };
    use chrono::NaiveDate;

    fn ingredient(id: i64, name: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            category: IngredientCategory::Pantry,
            default_unit: "g".to_string(),
            storage_notes: "Keep sealed".to_string(),
            nutrition: Nutrition::default(),
            labels: vec!["staple".to_string()],
            stats: IngredientStats::default(),
        }
    }

    fn recipe(id: i64, title: &str, items: Vec<LineItem>) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            description: "A test recipe with a long enough description".to_string(),
            recipe_type: RecipeType::Regular,
            image_url: String::new(),
            servings: 4,
            prep_time: 10,
            cook_time: 20,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            instructions: vec!["Cook everything together until done.".to_string()],
            labels: vec!["Dinner".to_string()],
            items,
            combo_recipes: vec![],
        }
    }

    #[test]
    fn test_dangling_ingredient_reference_reported_once() {
        let mut dataset = Dataset::default();
        dataset.ingredients.push(ingredient(1, "Flour"));
        dataset.recipes.push(recipe(
            1,
            "Mystery Bake",
            vec![
                LineItem { item_id: 1, quantity: 500.0, unit: "g".to_string() },
                LineItem { item_id: 999, quantity: 1.0, unit: "cups".to_string() },
            ],
        ));

        let issues = validate_references(&dataset);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            "Recipe \"Mystery Bake\" references non-existent ingredient ID 999"
        );

        // Removing the bad line item clears the report.
        dataset.recipes[0].items.pop();
        assert!(validate_references(&dataset).is_empty());
    }

    #[test]
    fn test_dangling_meal_and_scheduled_references() {
        let mut dataset = Dataset::default();
        dataset.meals.push(Meal {
            id: 1,
            name: "Phantom Dinner".to_string(),
            description: "References a recipe that is gone".to_string(),
            recipes: vec![MealRecipeRef { recipe_id: 42, servings: 2 }],
            total_servings: 2,
            meal_types: vec![MealType::Dinner],
            labels: vec![],
            tags: vec![],
            estimated_time: 30,
            created_at: String::new(),
            updated_at: String::new(),
        });
        dataset.scheduled_meals.push(ScheduledMeal {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            servings: 2,
            notes: String::new(),
            created_at: String::new(),
            recipe_id: Some(42),
            meal_id: None,
            recipes: vec![],
        });

        let issues = validate_references(&dataset);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("Meal \"Phantom Dinner\""));
        assert!(issues[1].contains("Scheduled meal 1"));
    }

    #[test]
    fn test_structure_checks_flag_short_fields_and_bad_quantities() {
        let mut dataset = Dataset::default();
        dataset.ingredients.push(ingredient(1, "Salt"));
        let mut bad = recipe(
            1,
            "Pie",
            vec![LineItem { item_id: 1, quantity: 0.0, unit: "g".to_string() }],
        );
        bad.description = "too short".to_string();
        bad.instructions = vec!["Stir.".to_string()];
        dataset.recipes.push(bad);

        let requirements = StructureRequirements {
            min_ingredients: 1,
            min_regular_recipes: 1,
            min_distinct_labels: 1,
        };
        let issues = validate_structure(&dataset, &requirements);
        assert!(issues.iter().any(|i| i.contains("title \"Pie\" is too short")));
        assert!(issues.iter().any(|i| i.contains("description is too short")));
        assert!(issues.iter().any(|i| i.contains("instruction 1 is too short")));
        assert!(issues.iter().any(|i| i.contains("non-positive quantity")));
    }

    #[test]
    fn test_combo_without_constituents_flagged() {
        let mut dataset = Dataset::default();
        let mut combo = recipe(1, "Empty Combo Plate", vec![]);
        combo.recipe_type = RecipeType::Combo;
        dataset.recipes.push(combo);

        let requirements = StructureRequirements {
            min_ingredients: 0,
            min_regular_recipes: 0,
            min_distinct_labels: 0,
        };
        let issues = validate_structure(&dataset, &requirements);
        assert!(issues
            .iter()
            .any(|i| i.contains("empty combo_recipes list")));
    }

    #[test]
    fn test_forbidden_cost_field_detected() {
        let raw = serde_json::json!({
            "items": [
                {"id": 1, "name": "Butter", "cost": 3.99},
                {"id": 2, "name": "Flour"}
            ]
        });
        let issues = check_forbidden_fields(&raw);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("$.items[0]"));

        assert!(check_forbidden_fields(&serde_json::json!({"id": 1})).is_empty());
    }
}
