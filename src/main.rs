use clap::Parser;
use log::debug;
use recipe_import::{ProviderKind, RecipeImporter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Import a recipe from a web page, a photo or a caption and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "recipe-import", version, about)]
struct Cli {
    /// Recipe page URL
    #[arg(required_unless_present_any = ["text", "image"], conflicts_with_all = ["text", "image"])]
    url: Option<String>,

    /// Caption or pasted recipe text
    #[arg(long, conflicts_with = "image")]
    text: Option<String>,

    /// Photo of a recipe (JPEG, PNG or WebP)
    #[arg(long)]
    image: Option<PathBuf>,

    /// Model provider: anthropic or openai
    #[arg(long, env = "RECIPE_IMPORT_PROVIDER")]
    provider: Option<ProviderKind>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{cli:?}");

    let mut builder = RecipeImporter::builder();
    if let Some(url) = cli.url {
        builder = builder.url(url);
    } else if let Some(text) = cli.text {
        builder = builder.text(text);
    } else if let Some(path) = cli.image {
        builder = builder.image(path);
    }
    if let Some(provider) = cli.provider {
        builder = builder.provider(provider);
    }
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }

    match builder.build().await {
        Ok(recipe) => match serde_json::to_string_pretty(&recipe) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize recipe: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
