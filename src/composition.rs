use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::model::{ComboRef, LineItem, Meal, MealType, Recipe, RecipeType};
use crate::quantity_aggregator::{aggregate, AggregationSource};

/// Marker label identifying a recipe as a combination of other recipes.
pub const COMBO_MARKER_LABEL: &str = "Recipe Combo";

/// One constituent of a combo under construction, with the serving count the
/// combo wants from it.
#[derive(Debug, Clone, Copy)]
pub struct ComboConstituent<'a> {
    pub recipe: &'a Recipe,
    pub requested_servings: u32,
}

/// Caller-supplied identity and presentation fields for a new combo recipe.
#[derive(Debug, Clone)]
pub struct ComboMetadata {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub labels: Vec<String>,
    pub meal_types: Vec<MealType>,
}

/// True if following `recipe`'s combo links (transitively, via `lookup`)
/// would ever reach `target_id`. Used to refuse combo cycles at construction.
pub fn combo_would_cycle(target_id: i64, recipe: &Recipe, lookup: &HashMap<i64, &Recipe>) -> bool {
    let mut stack: Vec<i64> = recipe.combo_recipes.iter().map(|r| r.recipe_id).collect();
    let mut seen: HashSet<i64> = HashSet::new();
    while let Some(id) = stack.pop() {
        if id == target_id {
            return true;
        }
        if !seen.insert(id) {
            continue;
        }
        if let Some(nested) = lookup.get(&id) {
            stack.extend(nested.combo_recipes.iter().map(|r| r.recipe_id));
        }
    }
    false
}

/// Build a combo Recipe from two or more existing recipes.
///
/// Policy: servings is the maximum requested count (the combo is sized to the
/// largest individual requirement, not the sum); prep_time is the sum of
/// constituent prep times (prep steps are sequential); cook_time is the
/// maximum constituent cook time (cooking overlaps). The ingredient list is a
/// fixed snapshot aggregated at creation time; it does not track later edits
/// to the constituents.
///
/// `created_at` is left empty for the caller to stamp at insertion time.
pub fn compose_combo(
    constituents: &[ComboConstituent],
    metadata: ComboMetadata,
    lookup: &HashMap<i64, &Recipe>,
) -> Result<Recipe> {
    if constituents.len() < 2 {
        bail!(
            "a combo recipe needs at least 2 constituents, got {}",
            constituents.len()
        );
    }
    let mut seen_ids = HashSet::new();
    for constituent in constituents {
        let recipe = constituent.recipe;
        if recipe.id == metadata.id {
            bail!("combo recipe {} cannot reference itself", metadata.id);
        }
        if !seen_ids.insert(recipe.id) {
            bail!("recipe {} appears twice in the same combo", recipe.id);
        }
        if combo_would_cycle(metadata.id, recipe, lookup) {
            bail!(
                "adding recipe {} to combo {} would create a cycle",
                recipe.id,
                metadata.id
            );
        }
    }

    let servings = constituents
        .iter()
        .map(|c| c.requested_servings)
        .max()
        .unwrap_or(1);
    let prep_time = constituents.iter().map(|c| c.recipe.prep_time).sum();
    let cook_time = constituents
        .iter()
        .map(|c| c.recipe.cook_time)
        .max()
        .unwrap_or(0);

    let sources: Vec<AggregationSource> = constituents
        .iter()
        .map(|c| {
            AggregationSource::new(
                &c.recipe.items,
                c.recipe.servings as f64,
                c.requested_servings as f64,
            )
        })
        .collect();
    let items = aggregate(&sources);

    let mut labels = metadata.labels;
    if !labels.iter().any(|l| l == COMBO_MARKER_LABEL) {
        labels.push(COMBO_MARKER_LABEL.to_string());
    }
    for meal_type in &metadata.meal_types {
        if !labels.iter().any(|l| l == meal_type.label()) {
            labels.push(meal_type.label().to_string());
        }
    }

    let combo_recipes = constituents
        .iter()
        .map(|c| ComboRef {
            recipe_id: c.recipe.id,
            servings: c.requested_servings as f64,
            servings_multiplier: 1.0,
        })
        .collect();

    Ok(Recipe {
        id: metadata.id,
        title: metadata.title,
        description: metadata.description,
        recipe_type: RecipeType::Combo,
        image_url: metadata.image_url,
        servings,
        prep_time,
        cook_time,
        created_at: String::new(),
        instructions: vec![
            "Prepare each component following its own recipe's instructions.".to_string(),
            "Coordinate timing so all components finish together.".to_string(),
            "Plate the components together and serve.".to_string(),
        ],
        labels,
        items,
        combo_recipes,
    })
}

/// Aggregate a Meal's effective shopping list from its constituent recipes.
/// Unresolvable recipe references are skipped; a meal with zero valid
/// references yields an empty list (with a warning) rather than an error.
pub fn aggregate_meal_items(meal: &Meal, lookup: &HashMap<i64, &Recipe>) -> Vec<LineItem> {
    let sources: Vec<AggregationSource> = meal
        .recipes
        .iter()
        .filter_map(|meal_ref| {
            lookup.get(&meal_ref.recipe_id).map(|recipe| {
                AggregationSource::new(
                    &recipe.items,
                    recipe.servings as f64,
                    meal_ref.servings as f64,
                )
            })
        })
        .collect();

    if sources.is_empty() && !meal.recipes.is_empty() {
        tracing::warn!(
            meal_id = meal.id,
            meal_name = %meal.name,
            "meal has no resolvable recipe references; aggregated list is empty"
        );
    }
    aggregate(&sources)
}

/// Pick constituents for a combo from a template of desired title substrings.
/// Each slot takes the first unused regular recipe whose title contains the
/// substring (case-insensitive), falling back to an arbitrary unused regular
/// recipe. Stops when every slot is filled or no recipes remain.
pub fn select_combo_constituents<'a>(desired: &[&str], recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let mut used: HashSet<i64> = HashSet::new();
    let mut selected = Vec::new();

    for want in desired {
        let want_lower = want.to_lowercase();
        let matched = recipes
            .iter()
            .filter(|r| r.is_regular() && !used.contains(&r.id))
            .find(|r| r.title.to_lowercase().contains(&want_lower))
            .or_else(|| {
                recipes
                    .iter()
                    .find(|r| r.is_regular() && !used.contains(&r.id))
            });
        match matched {
            Some(recipe) => {
                used.insert(recipe.id);
                selected.push(recipe);
            }
            None => break,
        }
    }
    selected
}
