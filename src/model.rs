use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage category an ingredient belongs to (mirrors the shopping-list
/// sections the UI groups by).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Produce,
    Meat,
    Dairy,
    Pantry,
    Frozen,
    Bakery,
    Grains,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 7] = [
        IngredientCategory::Produce,
        IngredientCategory::Meat,
        IngredientCategory::Dairy,
        IngredientCategory::Pantry,
        IngredientCategory::Frozen,
        IngredientCategory::Bakery,
        IngredientCategory::Grains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Produce => "produce",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Pantry => "pantry",
            IngredientCategory::Frozen => "frozen",
            IngredientCategory::Bakery => "bakery",
            IngredientCategory::Grains => "grains",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Capitalized form used as a recipe label member ("Breakfast", "Lunch", ...).
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeType {
    Regular,
    Combo,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Nutrition {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
}

/// Usage statistics cached on an Ingredient. Not authoritative: always
/// re-derivable by scanning recipes, refreshed via
/// `Dataset::recompute_ingredient_stats`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngredientStats {
    pub recipe_count: u32,
    pub total_quantity: f64,
    pub avg_quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub category: IngredientCategory,
    pub default_unit: String,
    pub storage_notes: String,
    pub nutrition: Nutrition,
    pub labels: Vec<String>,
    #[serde(flatten)]
    pub stats: IngredientStats,
}

/// One (ingredient, quantity, unit) triple attached to a recipe. Older
/// fixture data names the ingredient reference `ingredient_id`; the alias
/// normalizes it at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(alias = "ingredient_id")]
    pub item_id: i64,
    pub quantity: f64,
    pub unit: String,
}

/// Reference from a combo recipe to one of its constituents. The multiplier
/// is display metadata; the effective scaling is already baked into the
/// combo's aggregated items at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRef {
    pub recipe_id: i64,
    pub servings: f64,
    #[serde(default = "default_multiplier")]
    pub servings_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub recipe_type: RecipeType,
    pub image_url: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub created_at: String,
    pub instructions: Vec<String>,
    pub labels: Vec<String>,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_recipes: Vec<ComboRef>,
}

impl Recipe {
    pub fn is_regular(&self) -> bool {
        self.recipe_type == RecipeType::Regular
    }

    /// Meal types encoded as capitalized label members.
    pub fn meal_types(&self) -> Vec<MealType> {
        MealType::ALL
            .iter()
            .copied()
            .filter(|mt| self.labels.iter().any(|l| l == mt.label()))
            .collect()
    }
}

/// Per-recipe serving count inside a Meal or inside a ScheduledMeal's
/// display snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecipeRef {
    pub recipe_id: i64,
    pub servings: u32,
}

/// Planning-level grouping of recipes. Distinct from a combo recipe: a Meal
/// does not carry an aggregated ingredient list; equivalent aggregation is
/// computed on demand at scheduling/export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub recipes: Vec<MealRecipeRef>,
    /// Maximum per-recipe servings among constituents, not a sum.
    pub total_servings: u32,
    pub meal_types: Vec<MealType>,
    pub labels: Vec<String>,
    pub tags: Vec<String>,
    /// Sum of each constituent recipe's prep_time + cook_time, in minutes.
    pub estimated_time: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Assignment of a Recipe or a Meal to a calendar date. Exactly one of
/// `recipe_id` / `meal_id` is the authoritative target; the `recipes` list is
/// a display snapshot that callers may refresh but must never write through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMeal {
    pub id: i64,
    pub date: NaiveDate,
    pub servings: u32,
    pub notes: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_id: Option<i64>,
    #[serde(default)]
    pub recipes: Vec<MealRecipeRef>,
}
