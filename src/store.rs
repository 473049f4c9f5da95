use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde_json::Value;

use crate::integrity_validator::check_forbidden_fields;
use crate::model::{Ingredient, Meal, Recipe, ScheduledMeal};

/// Current export envelope version.
pub const EXPORT_VERSION: &str = "1.0";

/// Storage keys the browser-side persistence layer files each collection
/// under; the envelope's `schema` section maps logical names to these.
const STORAGE_KEYS: [(&str, &str); 4] = [
    ("items", "mealplanner_items"),
    ("recipes", "mealplanner_recipes"),
    ("meals", "mealplanner_meals"),
    ("scheduled_meals", "mealplanner_scheduled_meals"),
];

/// The four entity collections, owned by whoever constructed them. There is
/// no module-level singleton: the embedding application creates a Dataset,
/// hands it to the pure functions in this crate, and owns its lifecycle.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    #[serde(alias = "items")]
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub scheduled_meals: Vec<ScheduledMeal>,
}

impl Dataset {
    pub fn ingredient_by_id(&self, id: i64) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn recipe_by_id(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn meal_by_id(&self, id: i64) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Id-keyed recipe map for the aggregation and composition passes.
    pub fn recipe_lookup(&self) -> HashMap<i64, &Recipe> {
        self.recipes.iter().map(|r| (r.id, r)).collect()
    }

    pub fn ingredient_ids(&self) -> HashSet<i64> {
        self.ingredients.iter().map(|i| i.id).collect()
    }

    pub fn recipe_ids(&self) -> HashSet<i64> {
        self.recipes.iter().map(|r| r.id).collect()
    }

    pub fn meal_ids(&self) -> HashSet<i64> {
        self.meals.iter().map(|m| m.id).collect()
    }

    /// Refresh each ingredient's cached usage statistics by scanning every
    /// recipe's line items. The cached values are display conveniences; this
    /// scan is the only thing that makes them current again after edits.
    pub fn recompute_ingredient_stats(&mut self) {
        let mut counts: HashMap<i64, u32> = HashMap::new();
        let mut totals: HashMap<i64, f64> = HashMap::new();
        for recipe in &self.recipes {
            let mut seen_in_recipe: HashSet<i64> = HashSet::new();
            for item in &recipe.items {
                if seen_in_recipe.insert(item.item_id) {
                    *counts.entry(item.item_id).or_insert(0) += 1;
                }
                *totals.entry(item.item_id).or_insert(0.0) += item.quantity;
            }
        }
        for ingredient in &mut self.ingredients {
            let count = counts.get(&ingredient.id).copied().unwrap_or(0);
            let total = totals.get(&ingredient.id).copied().unwrap_or(0.0);
            ingredient.stats.recipe_count = count;
            ingredient.stats.total_quantity = crate::quantity_aggregator::round_quantity(total);
            ingredient.stats.avg_quantity = if count > 0 {
                crate::quantity_aggregator::round_quantity(total / count as f64)
            } else {
                0.0
            };
        }
    }
}

/// Serialize a dataset into the export envelope: top-level `version`,
/// `exported` timestamp, `schema` (logical collection name to storage key),
/// and `data` (the same logical names to entity arrays). Ingredients travel
/// under the legacy `items` name.
pub fn export_envelope(dataset: &Dataset) -> Value {
    let schema: BTreeMap<&str, &str> = STORAGE_KEYS.iter().copied().collect();
    serde_json::json!({
        "version": EXPORT_VERSION,
        "exported": Utc::now().to_rfc3339(),
        "schema": schema,
        "data": {
            "items": dataset.ingredients,
            "recipes": dataset.recipes,
            "meals": dataset.meals,
            "scheduled_meals": dataset.scheduled_meals,
        },
    })
}

/// Parse an export envelope back into a Dataset. Requires a non-null
/// `version`, a `schema` object, and `data.items` / `data.recipes` arrays;
/// meals and scheduled meals are optional. Legacy `ingredient_id` fields are
/// normalized to `item_id` during deserialization, and stale fixture fields
/// (such as `cost`) are rejected.
pub fn import_envelope(raw: &Value) -> Result<Dataset> {
    if raw.get("version").map_or(true, Value::is_null) {
        bail!("import envelope is missing a version");
    }
    let Some(schema) = raw.get("schema") else {
        bail!("import envelope is missing its schema section");
    };
    if !schema.is_object() {
        bail!("import envelope schema must be an object");
    }
    let Some(data) = raw.get("data") else {
        bail!("import envelope is missing its data section");
    };
    for required in ["items", "recipes"] {
        if !data.get(required).map_or(false, Value::is_array) {
            bail!("import envelope data.{} must be an array", required);
        }
    }

    let forbidden = check_forbidden_fields(data);
    if !forbidden.is_empty() {
        bail!("import rejected: {}", forbidden.join("; "));
    }

    let ingredients: Vec<Ingredient> = serde_json::from_value(data["items"].clone())
        .context("failed to parse ingredients from data.items")?;
    let recipes: Vec<Recipe> = serde_json::from_value(data["recipes"].clone())
        .context("failed to parse recipes from data.recipes")?;
    let meals: Vec<Meal> = match data.get("meals") {
        Some(value) if !value.is_null() => {
            serde_json::from_value(value.clone()).context("failed to parse data.meals")?
        }
        _ => Vec::new(),
    };
    let scheduled_meals: Vec<ScheduledMeal> = match data.get("scheduled_meals") {
        Some(value) if !value.is_null() => serde_json::from_value(value.clone())
            .context("failed to parse data.scheduled_meals")?,
        _ => Vec::new(),
    };

    Ok(Dataset {
        ingredients,
        recipes,
        meals,
        scheduled_meals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        IngredientCategory, IngredientStats, LineItem, Nutrition, RecipeType,
    };

    fn ingredient(id: i64, name: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            category: IngredientCategory::Dairy,
            default_unit: "packages".to_string(),
            storage_notes: "Refrigerate".to_string(),
            nutrition: Nutrition { protein: 1.0, carbs: 0.1, fat: 81.0, calories: 717.0 },
            labels: vec!["baking".to_string()],
            stats: IngredientStats::default(),
        }
    }

    fn recipe(id: i64, title: &str, items: Vec<LineItem>) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            description: "A test recipe with enough description".to_string(),
            recipe_type: RecipeType::Regular,
            image_url: String::new(),
            servings: 4,
            prep_time: 10,
            cook_time: 20,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            instructions: vec!["Combine and bake until golden.".to_string()],
            labels: vec!["Dinner".to_string()],
            items,
            combo_recipes: vec![],
        }
    }

    #[test]
    fn test_recompute_ingredient_stats() {
        let mut dataset = Dataset::default();
        dataset.ingredients.push(ingredient(1, "Butter"));
        dataset.ingredients.push(ingredient(2, "Cream"));
        dataset.recipes.push(recipe(
            1,
            "Butter Bake",
            vec![
                LineItem { item_id: 1, quantity: 1.0, unit: "packages".to_string() },
                LineItem { item_id: 1, quantity: 0.5, unit: "tbsp".to_string() },
            ],
        ));
        dataset.recipes.push(recipe(
            2,
            "Butter Sauce",
            vec![LineItem { item_id: 1, quantity: 2.0, unit: "packages".to_string() }],
        ));

        dataset.recompute_ingredient_stats();

        let butter = dataset.ingredient_by_id(1).unwrap();
        // Two distinct recipes use butter; total quantity sums every line item.
        assert_eq!(butter.stats.recipe_count, 2);
        assert_eq!(butter.stats.total_quantity, 3.5);
        assert_eq!(butter.stats.avg_quantity, 1.75);

        let cream = dataset.ingredient_by_id(2).unwrap();
        assert_eq!(cream.stats.recipe_count, 0);
        assert_eq!(cream.stats.avg_quantity, 0.0);
    }

    #[test]
    fn test_export_then_import_preserves_collections() {
        let mut dataset = Dataset::default();
        dataset.ingredients.push(ingredient(1, "Butter"));
        dataset.recipes.push(recipe(
            1,
            "Butter Bake",
            vec![LineItem { item_id: 1, quantity: 1.0, unit: "packages".to_string() }],
        ));

        let envelope = export_envelope(&dataset);
        assert_eq!(envelope["version"], EXPORT_VERSION);
        assert_eq!(envelope["schema"]["items"], "mealplanner_items");
        assert!(envelope["exported"].is_string());

        let restored = import_envelope(&envelope).unwrap();
        assert_eq!(restored.ingredients.len(), 1);
        assert_eq!(restored.recipes.len(), 1);
        assert_eq!(restored.recipes[0].items[0].item_id, 1);
    }

    #[test]
    fn test_import_accepts_legacy_ingredient_id_items() {
        let raw = serde_json::json!({
            "version": "1.0",
            "exported": "2025-01-01T00:00:00Z",
            "schema": {"items": "mealplanner_items", "recipes": "mealplanner_recipes"},
            "data": {
                "items": [{
                    "id": 1, "name": "Butter", "category": "dairy",
                    "default_unit": "packages", "storage_notes": "",
                    "nutrition": {"protein": 0.0, "carbs": 0.0, "fat": 0.0, "calories": 0.0},
                    "labels": ["baking"]
                }],
                "recipes": [{
                    "id": 1, "title": "Butter Bake",
                    "description": "Old fixture recipe entry",
                    "recipe_type": "regular", "image_url": "", "servings": 4,
                    "prep_time": 5, "cook_time": 10,
                    "created_at": "2025-01-01T00:00:00Z",
                    "instructions": ["Bake it thoroughly."],
                    "labels": ["Dinner"],
                    "items": [{"ingredient_id": 1, "quantity": 1.0, "unit": "packages"}]
                }]
            }
        });
        let dataset = import_envelope(&raw).unwrap();
        assert_eq!(dataset.recipes[0].items[0].item_id, 1);
    }

    #[test]
    fn test_import_rejects_missing_version_and_missing_arrays() {
        let no_version = serde_json::json!({
            "schema": {}, "data": {"items": [], "recipes": []}
        });
        assert!(import_envelope(&no_version).is_err());

        let no_recipes = serde_json::json!({
            "version": "1.0", "schema": {}, "data": {"items": []}
        });
        assert!(import_envelope(&no_recipes).is_err());
    }

    #[test]
    fn test_import_rejects_cost_field() {
        let raw = serde_json::json!({
            "version": "1.0",
            "schema": {},
            "data": {
                "items": [{"id": 1, "name": "Butter", "category": "dairy",
                    "default_unit": "packages", "storage_notes": "",
                    "nutrition": {"protein": 0.0, "carbs": 0.0, "fat": 0.0, "calories": 0.0},
                    "labels": ["baking"], "cost": 4.99}],
                "recipes": []
            }
        });
        let err = import_envelope(&raw).unwrap_err();
        assert!(err.to_string().contains("cost"));
    }
}
