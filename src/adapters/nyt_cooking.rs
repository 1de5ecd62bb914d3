use log::warn;
use regex::Regex;
use scraper::Html;

use super::{missing_section, page_title, selector, text_of, SourceAdapter};
use crate::error::ImportError;
use crate::model::RawFields;

const SOURCE_NAME: &str = "New York Times Cooking";

/// NYT Cooking tags its recipe body with build-hashed class names
/// ("recipebody_ingredients-block_ab12"), so every lookup goes through a
/// class-prefix match. The site publishes total time only; active time is
/// always absent. No fraction glyphs appear, so no text normalization runs.
pub struct NytCookingAdapter;

impl SourceAdapter for NytCookingAdapter {
    fn extract(&self, document: &Html) -> Result<RawFields, ImportError> {
        let mut fields = RawFields::default();

        let title = page_title(document).ok_or_else(|| missing_section(SOURCE_NAME, "title"))?;
        let title = title.split(" - ").next().unwrap_or(&title);
        fields.title = title.strip_suffix(" Recipe").unwrap_or(title).to_string();

        fields.total_time = document
            .select(&selector("dd.pantry--ui"))
            .next()
            .map(text_of);

        if let Some(yield_block) = document
            .select(&selector(r#"div[class*="ingredients_recipeYield_"]"#))
            .next()
        {
            if let Some(label) = yield_block
                .select(&selector(r#"span[class*="ingredients_fontOverride_"]"#))
                .next()
            {
                fields.servings = Some(style_servings(text_of(label)));
            }
        }

        let ingredients_block = document
            .select(&selector(r#"div[class*="recipebody_ingredients-block_"]"#))
            .next()
            .ok_or_else(|| missing_section(SOURCE_NAME, "ingredients"))?;

        let quantity_selector = selector(r#"span[class*="ingredient_quantity_"]"#);
        for item in ingredients_block.select(&selector("li")) {
            let text = text_of(item).trim().to_string();
            match item.select(&quantity_selector).next() {
                Some(span) => {
                    let quantity = text_of(span);
                    // The quantity repeats at the head of the item's full
                    // text; the remainder is the ingredient name.
                    let name: String = text.chars().skip(quantity.chars().count()).collect();
                    fields.ingredients.push(format!("{quantity} {name}"));
                }
                None => fields.ingredients.push(text),
            }
        }

        let preparation_block = document
            .select(&selector(r#"div[class*="recipebody_prep-block_"]"#))
            .next()
            .ok_or_else(|| missing_section(SOURCE_NAME, "preparation"))?;

        let step_number_selector = selector(r#"div[class*="preparation_stepNumber_"]"#);
        let body_selector = selector("p.pantry--body-long");
        for item in preparation_block.select(&selector("li")) {
            let Some(number) = item.select(&step_number_selector).next() else {
                continue;
            };
            match item.select(&body_selector).next() {
                Some(body) => {
                    fields.steps.push(text_of(number));
                    fields.instructions.push(text_of(body));
                }
                None => warn!(
                    "{SOURCE_NAME}: step \"{}\" has no instruction body, skipping",
                    text_of(number)
                ),
            }
        }

        // An optional Tips block trails the numbered steps and becomes one
        // synthetic extra step. Always an append, never an insertion.
        if let Some(tips) = document
            .select(&selector(r#"div[class*="tips_tips_"]"#))
            .next()
        {
            let heading = tips.select(&selector("span.pantry--label")).next();
            let body = tips.select(&selector("li.pantry--body-long")).next();
            if let (Some(heading), Some(body)) = (heading, body) {
                fields.steps.push(text_of(heading));
                fields.instructions.push(text_of(body));
            }
        }

        fields.image_url = document
            .select(&selector("img"))
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        Ok(fields)
    }
}

/// Yield labels ending in a bare digit get a " Servings" suffix unless a
/// serving word is already present; anything else ("8 to 10 servings",
/// "one 9-inch pie") passes through verbatim.
fn style_servings(text: String) -> String {
    let ends_in_digit = text.chars().last().is_some_and(|c| c.is_ascii_digit());
    if !ends_in_digit {
        return text;
    }
    let serving_word = Regex::new("(?i)serv(es|ings)").unwrap();
    if serving_word.is_match(&text) {
        text
    } else {
        format!("{text} Servings")
    }
}

#[cfg(test)]
mod tests {
    use super::style_servings;

    #[test]
    fn bare_digit_yield_gets_suffix() {
        assert_eq!(style_servings("8 to 10".into()), "8 to 10 Servings");
        assert_eq!(style_servings("4".into()), "4 Servings");
    }

    #[test]
    fn serving_word_is_not_doubled() {
        assert_eq!(style_servings("Serves 12".into()), "Serves 12");
    }

    #[test]
    fn non_digit_endings_pass_through() {
        assert_eq!(
            style_servings("About 2 dozen cookies".into()),
            "About 2 dozen cookies"
        );
    }
}
