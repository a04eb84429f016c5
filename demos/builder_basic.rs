//! Basic usage of the RecipeImporter builder API
//!
//! This example demonstrates the three input sources:
//! 1. URL: fetch a page and run the extraction tiers
//! 2. Text: extract a recipe from a social media caption
//! 3. Image: extract a recipe from a photo of a recipe card
//!
//! Text and image imports need an API key in `ANTHROPIC_API_KEY` (or
//! `OPENAI_API_KEY` together with `.provider(ProviderKind::OpenAI)`).

use recipe_import::parsers::format_ingredient;
use recipe_import::{ProviderKind, RecipeImporter};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Use Case 1: URL ===");
    let recipe = RecipeImporter::builder()
        .url("https://www.bbcgoodfood.com/recipes/classic-cottage-pie")
        .timeout(Duration::from_secs(20))
        .build()
        .await?;

    println!("{} ({})", recipe.title, recipe.source_name);
    for ingredient in &recipe.ingredients {
        println!("  - {}", format_ingredient(ingredient));
    }
    println!("\nInstructions:\n{}", recipe.instructions);

    println!("\n=== Use Case 2: Caption ===");
    let caption = r#"
Best pancakes ever 🥞
- 250 g flour
- 2 eggs
- 500 ml milk
- pinch of salt
Whisk everything, rest 10 min, fry in butter. #breakfast #pancakes
"#;
    match RecipeImporter::builder()
        .text(caption)
        .provider(ProviderKind::Anthropic)
        .build()
        .await
    {
        Ok(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
        Err(e) => println!("Caption import failed: {e}"),
    }

    println!("\n=== Use Case 3: Photo ===");
    match RecipeImporter::builder()
        .image("recipe-card.jpg")
        .build()
        .await
    {
        Ok(recipe) => println!("{} with {} ingredients", recipe.title, recipe.ingredients.len()),
        Err(e) => println!("Photo import failed: {e}"),
    }

    Ok(())
}
