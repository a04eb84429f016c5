use recipe_import::url_to_text::html::extractors::{Extractor, MicroDataExtractor, ParsingContext};
use recipe_import::Extraction;

const EASY_RECIPE_HTML: &str = r#"
<html lang="en">
<body>
<div id="easyrecipe-557-0" class="easyrecipe" itemscope itemtype="http://schema.org/Recipe">
    <div itemprop="name" class="ERSName">Mom's Famous Banana Bread</div>
    <div itemprop="description" class="ERSSummary">Mom was kind enough to share her famous banana bread recipe with us!</div>
    <img itemprop="image" src="https://example.com/banana-bread.jpg" />
    <div itemprop="author" itemscope itemtype="http://schema.org/Person">
        <span itemprop="name">Cooking Divine</span>
    </div>
    <div itemprop="recipeCategory">Breakfast</div>
    <div itemprop="recipeCuisine">American</div>
    <div itemprop="keywords">banana, bread, sweet</div>

    <div class="ERSTimes">
        <div class="ERSTime">
            <div class="ERSTimeHeading">Prep time</div>
            <div class="ERSTimeItem">
                <time itemprop="prepTime" datetime="PT10M">10 mins</time>
            </div>
        </div>
        <div class="ERSTime ERSTimeRight">
            <div class="ERSTimeHeading">Cook time</div>
            <div class="ERSTimeItem">
                <time itemprop="cookTime" datetime="PT1H">1 hour</time>
            </div>
        </div>
    </div>

    <div class="divERSHeadItems">
        <div class="ERSServes">Serves: <span itemprop="recipeYield">12 servings</span></div>
    </div>

    <div class="ERSIngredients">
        <div class="ERSIngredientsHeader ERSHeading">Ingredients</div>
        <ul>
            <li class="ingredient" itemprop="ingredients">5 Tablespoons Butter (room temperature)</li>
            <li class="ingredient" itemprop="ingredients">1 Cup White Sugar</li>
            <li class="ingredient" itemprop="ingredients">1 Large Egg</li>
        </ul>
    </div>

    <div class="ERSInstructions">
        <div class="ERSInstructionsHeader ERSHeading">Directions</div>
        <ol>
            <li class="instruction" itemprop="recipeInstructions">Preheat oven to 350 degrees and heavily grease a 9 inch bread pan.</li>
            <li class="instruction" itemprop="recipeInstructions">Beat butter and sugar until light, fluffy and well blended.</li>
        </ol>
    </div>
</div>
</body>
</html>
"#;

#[test]
fn test_microdata_extraction() {
    let context = ParsingContext::new(
        "https://www.cookingdivine.com/recipes/banana-bread/",
        EASY_RECIPE_HTML,
    );

    let Extraction::Recipe(recipe) = MicroDataExtractor.parse(&context) else {
        panic!("Failed to extract recipe");
    };

    assert_eq!(recipe.title, "Mom's Famous Banana Bread");
    assert_eq!(
        recipe.description,
        "Mom was kind enough to share her famous banana bread recipe with us!"
    );
    assert_eq!(recipe.image_url.as_deref(), Some("https://example.com/banana-bread.jpg"));
    assert_eq!(recipe.language.as_deref(), Some("en"));

    assert_eq!(recipe.ingredients.len(), 3);
    let butter = &recipe.ingredients[0];
    assert_eq!(butter.quantity, Some(5.0));
    assert_eq!(butter.unit, "tablespoons");
    assert_eq!(butter.ingredient_name, "Butter");
    assert_eq!(butter.notes, "room temperature");
    assert_eq!(recipe.ingredients[1].unit, "cup");
    assert_eq!(recipe.ingredients[1].ingredient_name, "White Sugar");

    assert_eq!(
        recipe.instructions,
        "Preheat oven to 350 degrees and heavily grease a 9 inch bread pan.\n\
         Beat butter and sugar until light, fluffy and well blended."
    );

    assert_eq!(recipe.prep_time_minutes, Some(10));
    assert_eq!(recipe.cook_time_minutes, Some(60));
    assert_eq!(recipe.servings, Some(12));
    assert_eq!(
        recipe.tags,
        vec!["breakfast", "american", "banana", "bread", "sweet"]
    );
    assert_eq!(recipe.source_name, "cookingdivine.com");
}

#[test]
fn test_data_vocabulary_recipe() {
    let html = r#"
    <div itemscope itemtype="http://data-vocabulary.org/Recipe">
        <h1 itemprop="name">Tomato Soup</h1>
        <span itemprop="ingredient">1 can tomatoes</span>
        <div itemprop="instructions">
            Simmer the tomatoes.
            Blend until smooth.
        </div>
    </div>
    "#;
    let context = ParsingContext::new("https://example.com/soup", html);

    let Extraction::Recipe(recipe) = MicroDataExtractor.parse(&context) else {
        panic!("Failed to extract recipe");
    };
    assert_eq!(recipe.title, "Tomato Soup");
    assert_eq!(recipe.instructions, "Simmer the tomatoes.\nBlend until smooth.");
}

#[test]
fn test_no_microdata() {
    let html = "<html><body><h1>Blog</h1><p>Nothing to cook here.</p></body></html>";
    let context = ParsingContext::new("https://example.com/blog", html);
    assert_eq!(MicroDataExtractor.parse(&context), Extraction::NoRecipe);
}
