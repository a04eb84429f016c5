use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mockito::{Matcher, Server};
use recipe_import::{ImportError, ProviderKind, RecipeImporter};
use serde_json::json;
use std::time::Duration;

const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const MODEL_RECIPE: &str = r#"{"title": "Hummus", "ingredients": ["1 can chickpeas", "2 tbsp tahini"], "instructions": ["Blend everything until smooth."], "servings": 4, "language": "en"}"#;

#[tokio::test]
async fn test_builder_requires_source() {
    let result = RecipeImporter::builder().build().await;

    assert!(matches!(result, Err(ImportError::BuilderError(_))));
    assert!(result.unwrap_err().to_string().contains("No input source"));
}

#[tokio::test]
async fn test_builder_rejects_empty_text() {
    let result = RecipeImporter::builder().text("   ").build().await;
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[tokio::test]
async fn test_builder_rejects_invalid_url() {
    let result = RecipeImporter::builder()
        .url("recipes/pancakes")
        .api_key("unused")
        .build()
        .await;
    assert!(matches!(result, Err(ImportError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_builder_text_with_openai() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer k")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-test"})))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": MODEL_RECIPE}}]}).to_string())
        .create_async()
        .await;

    let recipe = RecipeImporter::builder()
        .text("Hummus: 1 can chickpeas, 2 tbsp tahini. Blend until smooth. Serves 4.")
        .provider(ProviderKind::OpenAI)
        .api_key("k")
        .model("gpt-test")
        .base_url(server.url())
        .build()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(recipe.title, "Hummus");
    assert_eq!(recipe.ingredients[1].unit, "tbsp");
    assert_eq!(recipe.servings, Some(4));
}

#[tokio::test]
async fn test_builder_text_without_recipe() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "{\"error\": \"no_recipe\"}"}}]}).to_string())
        .create_async()
        .await;

    let err = RecipeImporter::builder()
        .text("Happy Monday everyone! New video tomorrow.")
        .provider(ProviderKind::OpenAI)
        .api_key("k")
        .base_url(server.url())
        .build()
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Extraction(_)));
    assert_eq!(err.to_string(), "No recipe found in this text.");
}

#[tokio::test]
async fn test_builder_image_file_with_anthropic() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "k")
        .match_body(Matcher::Regex(r#""media_type":"image/png""#.to_string()))
        .with_status(200)
        .with_body(json!({"content": [{"type": "text", "text": MODEL_RECIPE}]}).to_string())
        .create_async()
        .await;

    let path = std::env::temp_dir().join(format!("recipe-card-{}.png", std::process::id()));
    tokio::fs::write(&path, STANDARD.decode(TINY_PNG).unwrap())
        .await
        .unwrap();

    let result = RecipeImporter::builder()
        .image(&path)
        .provider(ProviderKind::Anthropic)
        .api_key("k")
        .base_url(server.url())
        .build()
        .await;
    let _ = tokio::fs::remove_file(&path).await;

    mock.assert_async().await;
    assert_eq!(result.unwrap().title, "Hummus");
}

#[tokio::test]
async fn test_builder_missing_image_file() {
    let result = RecipeImporter::builder()
        .image("/definitely/not/here.jpg")
        .api_key("k")
        .build()
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ImportError::BuilderError(_)));
    assert!(err.to_string().contains("not/here.jpg"));
}

#[tokio::test]
async fn test_builder_url_uses_structured_data() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/hummus")
        .with_status(200)
        .with_body(
            r#"<html><script type="application/ld+json">
            {"@type": "Recipe", "name": "Hummus", "recipeIngredient": ["1 can chickpeas"]}
            </script></html>"#,
        )
        .create_async()
        .await;

    let recipe = RecipeImporter::builder()
        .url(format!("{}/hummus", server.url()))
        .timeout(Duration::from_secs(5))
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Hummus");
    assert_eq!(recipe.ingredients[0].unit, "can");
    assert_eq!(recipe.ingredients[0].ingredient_name, "chickpeas");
}

#[test]
fn test_builder_method_chaining() {
    // Compiles only if every setter returns the builder
    let _builder = RecipeImporter::builder()
        .url("https://example.com/recipe")
        .text("recipe text")
        .image_base64(TINY_PNG, "image/png")
        .provider(ProviderKind::Anthropic)
        .timeout(Duration::from_secs(30))
        .api_key("k")
        .model("claude-test")
        .base_url("http://localhost:8080");
}
