use log::debug;
use scraper::{ElementRef, Html};

use super::{
    leading_text, missing_section, page_title, parent_element, selector, text_of, SourceAdapter,
};
use crate::error::ImportError;
use crate::model::RawFields;
use crate::normalize::Normalizer;
use crate::reconcile::reconcile_do_ahead;

const SOURCE_NAME: &str = "Bon Appetit";

/// Bon Appetit lays its recipe out as heading-anchored sections: an
/// "Ingredients" h2 whose container holds amount paragraphs paired
/// positionally with description divs, and a "Preparation" h2 whose
/// container holds h4 step numbers and instruction paragraphs. Timing is
/// published as adjacent label/value paragraph pairs anywhere on the page.
pub struct BonAppetitAdapter;

impl SourceAdapter for BonAppetitAdapter {
    fn extract(&self, document: &Html) -> Result<RawFields, ImportError> {
        let normalizer = Normalizer::new();
        let mut fields = RawFields::default();

        let title = page_title(document).ok_or_else(|| missing_section(SOURCE_NAME, "title"))?;
        fields.title = normalizer.normalize(title.split(" | ").next().unwrap_or(&title));

        let p_selector = selector("p");

        // "Active Time" / "Total Time" labels sit in their own paragraph,
        // with the value in the next one. First match wins per label.
        let paragraphs: Vec<ElementRef> = document.select(&p_selector).collect();
        for pair in paragraphs.windows(2) {
            let label = text_of(pair[0]);
            if label == "Active Time" && fields.active_time.is_none() {
                fields.active_time = Some(normalizer.normalize(&text_of(pair[1])));
            } else if label == "Total Time" && fields.total_time.is_none() {
                fields.total_time = Some(normalizer.normalize(&text_of(pair[1])));
            }
        }

        let mut ingredients_heading = None;
        let mut preparation_heading = None;
        for heading in document.select(&selector("h2")) {
            match text_of(heading).as_str() {
                "Ingredients" => ingredients_heading = Some(heading),
                "Preparation" => preparation_heading = Some(heading),
                _ => {}
            }
        }

        let ingredients_container = ingredients_heading
            .and_then(parent_element)
            .ok_or_else(|| missing_section(SOURCE_NAME, "Ingredients"))?;

        // First paragraph of the section is the servings line, unless it is
        // a one-character placeholder.
        let section_paragraphs: Vec<ElementRef> =
            ingredients_container.select(&p_selector).collect();
        if let Some(first) = section_paragraphs.first() {
            let text = text_of(*first);
            if text.chars().count() > 1 {
                fields.servings = Some(normalizer.normalize(&text));
            }
        }

        // Amount paragraphs pair positionally with description divs. An
        // amount slot whose first child is markup rather than text counts as
        // "no amount" for that row.
        let amounts: Vec<Option<String>> = section_paragraphs
            .iter()
            .skip(1)
            .map(|p| leading_text(*p))
            .collect();
        let descriptions: Vec<String> = ingredients_container
            .select(&selector("div"))
            .skip(1)
            .map(text_of)
            .collect();

        fields.ingredients = amounts
            .into_iter()
            .zip(descriptions)
            .map(|(amount, description)| match amount {
                Some(amount) => normalizer.normalize(&format!("{amount} {description}")),
                None => normalizer.normalize(&description),
            })
            .collect();

        let preparation_container = preparation_heading
            .and_then(parent_element)
            .ok_or_else(|| missing_section(SOURCE_NAME, "Preparation"))?;

        let labels: Vec<String> = preparation_container
            .select(&selector("h4"))
            .filter_map(leading_text)
            .collect();
        let instructions: Vec<String> = preparation_container
            .select(&p_selector)
            .map(text_of)
            .collect();
        debug!(
            "{SOURCE_NAME}: {} step labels, {} instruction paragraphs",
            labels.len(),
            instructions.len()
        );

        let (steps, instructions) = reconcile_do_ahead(SOURCE_NAME, labels, instructions)?;
        fields.steps = steps;
        fields.instructions = instructions
            .iter()
            .map(|instruction| normalizer.normalize(instruction))
            .collect();

        // Narrow-viewport srcset entry: "<url> <width>, ..." - the URL is
        // the second-to-last whitespace-delimited token.
        let narrow_source = selector(r#"source[media="(max-width: 767px)"]"#);
        if let Some(element) = document.select(&narrow_source).next() {
            if let Some(srcset) = element.value().attr("srcset") {
                let parts: Vec<&str> = srcset.split(' ').collect();
                if parts.len() >= 2 {
                    fields.image_url = Some(parts[parts.len() - 2].to_string());
                }
            }
        }

        Ok(fields)
    }
}
