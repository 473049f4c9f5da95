use anyhow::{bail, Context, Result};
use meal_planner::cli::parse_args;
use meal_planner::generator::{generate, GeneratorConfig};
use meal_planner::integrity_validator::{
    validate_references, validate_structure, StructureRequirements,
};
use meal_planner::store::export_envelope;
use tokio::fs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();

    let config = GeneratorConfig {
        items: cli_args.items,
        recipes: cli_args.recipes,
        meals: cli_args.meals,
        scheduled: cli_args.scheduled,
        seed: cli_args.seed,
    };
    println!(
        "Generating demo data: {} ingredients, {} recipes, {} meals, {} scheduled meals (seed {})",
        config.items, config.recipes, config.meals, config.scheduled, config.seed
    );
    let dataset = generate(&config);
    println!(
        "Generated {} recipes total ({} combos)",
        dataset.recipes.len(),
        dataset.recipes.iter().filter(|r| !r.is_regular()).count()
    );

    if cli_args.validate {
        println!("Validating generated dataset...");
        let mut issues = validate_references(&dataset);
        issues.extend(validate_structure(&dataset, &StructureRequirements::default()));
        if issues.is_empty() {
            println!("Validation passed: no issues found.");
        } else {
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
            bail!("validation failed with {} issue(s)", issues.len());
        }
    }

    let envelope = export_envelope(&dataset);
    let contents = serde_json::to_string_pretty(&envelope)?;
    fs::write(&cli_args.output, contents)
        .await
        .with_context(|| format!("Failed to write fixture file '{}'", cli_args.output))?;
    println!("Wrote fixture to {}", cli_args.output);

    Ok(())
}
