use recipe_clipper::{extract_recipe, ImportError};

const URL: &str = "https://cooking.nytimes.com/recipes/1-best-pancakes";

fn page(yield_label: &str) -> String {
    format!(
        r#"
        <html>
        <head><title>Best Pancakes Recipe - NYT Cooking</title></head>
        <body>
            <img src="https://img.example/pancakes.jpg">
            <dl>
                <dt>Total Time</dt>
                <dd class="pantry--ui">30 minutes</dd>
            </dl>
            <div class="ingredients_recipeYield_k2j4">
                <span class="pantry--ui ingredients_fontOverride_8x1q">{yield_label}</span>
            </div>
            <div class="recipebody_ingredients-block_5h2n">
                <ul>
                    <li><span class="ingredient_quantity_p0w3">2 cups</span>all-purpose flour</li>
                    <li>Salt to taste</li>
                </ul>
            </div>
            <div class="recipebody_prep-block_9t6m">
                <ol>
                    <li>
                        <div class="pantry--ui-lg-strong preparation_stepNumber_a1">Step 1</div>
                        <p class="pantry--body-long">Whisk the dry ingredients.</p>
                    </li>
                    <li>
                        <div class="pantry--ui-lg-strong preparation_stepNumber_a2">Step 2</div>
                        <p class="pantry--body-long">Cook until golden.</p>
                    </li>
                </ol>
            </div>
            <div class="tips_tips_4r8s">
                <span class="pantry--label">Tip</span>
                <ul><li class="pantry--body-long">Rest the batter overnight for a lighter crumb.</li></ul>
            </div>
        </body>
        </html>
        "#
    )
}

#[test]
fn extracts_recipe_with_trailing_tip_step() {
    let extraction = extract_recipe(URL, &page("8 to 10"), None).unwrap();
    let recipe = extraction.recipe;

    assert_eq!(recipe.title, "Best Pancakes");
    assert_eq!(recipe.source, "New York Times Cooking");
    // This source never publishes an active time.
    assert!(recipe.active_time.is_none());
    assert_eq!(recipe.total_time.as_deref(), Some("30 minutes"));

    assert_eq!(
        recipe.ingredients,
        vec!["2 cups all-purpose flour", "Salt to taste"]
    );
    assert!(recipe.food_list.is_none());

    // The Tips block is always appended after the numbered steps.
    assert_eq!(recipe.steps, vec!["Step 1", "Step 2", "Tip"]);
    assert_eq!(recipe.steps.len(), recipe.instructions.len());
    assert_eq!(recipe.instructions[0], "Whisk the dry ingredients.");
    assert_eq!(
        recipe.instructions[2],
        "Rest the batter overnight for a lighter crumb."
    );

    assert_eq!(
        extraction.image_url.as_deref(),
        Some("https://img.example/pancakes.jpg")
    );
}

#[test]
fn bare_digit_yield_gets_servings_suffix() {
    let recipe = extract_recipe(URL, &page("8 to 10"), None).unwrap().recipe;
    assert_eq!(recipe.servings.as_deref(), Some("8 to 10 Servings"));
}

#[test]
fn yield_with_serving_word_is_used_verbatim() {
    let recipe = extract_recipe(URL, &page("Serves 12"), None).unwrap().recipe;
    assert_eq!(recipe.servings.as_deref(), Some("Serves 12"));
}

#[test]
fn yield_not_ending_in_digit_is_used_verbatim() {
    let recipe = extract_recipe(URL, &page("About 2 dozen cookies"), None)
        .unwrap()
        .recipe;
    assert_eq!(recipe.servings.as_deref(), Some("About 2 dozen cookies"));
}

#[test]
fn missing_ingredients_block_is_a_hard_failure() {
    let html = r#"
        <html>
        <head><title>Bare Recipe - NYT Cooking</title></head>
        <body><div class="recipebody_prep-block_1"><ol></ol></div></body>
        </html>
    "#;
    let err = extract_recipe(URL, html, None).unwrap_err();
    match err {
        ImportError::MissingSection {
            source_name,
            section,
        } => {
            assert_eq!(source_name, "New York Times Cooking");
            assert_eq!(section, "ingredients");
        }
        other => panic!("expected MissingSection, got {other:?}"),
    }
}

#[test]
fn missing_preparation_block_is_a_hard_failure() {
    let html = r#"
        <html>
        <head><title>Bare Recipe - NYT Cooking</title></head>
        <body><div class="recipebody_ingredients-block_1"><ul></ul></div></body>
        </html>
    "#;
    let err = extract_recipe(URL, html, None).unwrap_err();
    assert!(
        matches!(err, ImportError::MissingSection { ref section, .. } if section == "preparation")
    );
}
