use log::{debug, error};
use std::env;
use std::process::ExitCode;

use foody::constants::QUERY_API_KEY;
use foody::{FoodyConfig, MainViewModel, NetworkResult, RecipeQuery};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let config = FoodyConfig::load()?;

    // Extra query parameters as key=value arguments, applied over the defaults
    let overrides = env::args()
        .skip(1)
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => Err(format!("Expected key=value, got '{}'", arg)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut query = RecipeQuery::default_search(config.api_key.clone().unwrap_or_default());
    for (key, value) in overrides {
        query.insert(key, value);
    }
    if query.get(QUERY_API_KEY).map_or(true, str::is_empty) {
        return Err("No API key: set FOODY__API_KEY or pass apiKey=<key>".into());
    }
    debug!("{:?}", query);

    let view_model = MainViewModel::builder().config(config).build()?;

    match view_model.fetch_recipes(&query).await {
        NetworkResult::Success(food) => {
            for recipe in food.results.unwrap_or_default() {
                println!(
                    "{}\t{} ({} min, {} likes)",
                    recipe.id, recipe.title, recipe.ready_in_minutes, recipe.aggregate_likes
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        NetworkResult::Error { message, .. } => {
            error!("{}", message);
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
        NetworkResult::Loading => Ok(ExitCode::FAILURE),
    }
}
