//! Simple API usage with convenience functions
//!
//! Photo and caption imports report failures in the returned
//! `ExtractionResult` instead of an `Err`.

use recipe_import::{extract_from_caption_text, parse_recipe_url};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== URL Import ===");
    match parse_recipe_url("https://www.seriouseats.com/the-best-chili-recipe").await {
        Ok(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
        // Fetch and extraction errors carry a message meant for the user
        Err(e) => println!("{e}"),
    }

    println!("\n=== Caption Import ===");
    let result = extract_from_caption_text(
        "Quick garlic noodles: 200g noodles, 4 cloves garlic, 2 tbsp butter, 1 tbsp soy sauce. \
         Cook noodles, fry garlic in butter, toss with soy.",
    )
    .await;
    match result.data {
        Some(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
        None => println!("{}", result.error.unwrap_or_default()),
    }

    Ok(())
}
