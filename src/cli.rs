use clap::Parser;

/// Demo-data generator for the meal planner: produces a self-contained JSON
/// fixture (ingredients, recipes, meals, scheduled meals) in the standard
/// export-envelope format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the fixture file to write
    #[arg(long, default_value = "demo_data.json")]
    pub output: String,

    /// Number of regular recipes to generate
    #[arg(long, default_value_t = 20)]
    pub recipes: usize,

    /// Number of ingredients to generate
    #[arg(long, default_value_t = 40)]
    pub items: usize,

    /// Number of meals to generate
    #[arg(long, default_value_t = 8)]
    pub meals: usize,

    /// Number of scheduled meals to generate
    #[arg(long, default_value_t = 14)]
    pub scheduled: usize,

    /// Run the referential-integrity and structural validators on the
    /// generated dataset and fail on any issue
    #[arg(long)]
    pub validate: bool,

    /// Seed for the random generator (same seed, same fixture content)
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
