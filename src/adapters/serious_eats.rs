use log::debug;
use scraper::{ElementRef, Html, Selector};

use super::{missing_section, page_title, selector, text_of, SourceAdapter};
use crate::error::ImportError;
use crate::model::RawFields;
use crate::normalize::Normalizer;

const SOURCE_NAME: &str = "Serious Eats";

/// Serious Eats publishes structured ingredient markup (each ingredient
/// paragraph nests a span marking the canonical food name) but no step
/// headings at all, so step labels are synthesized sequentially. A trailing
/// "Notes" heading is followed by body paragraphs whose element IDs advance
/// by two, which the adapter walks and folds into one synthetic final step.
pub struct SeriousEatsAdapter;

impl SourceAdapter for SeriousEatsAdapter {
    fn extract(&self, document: &Html) -> Result<RawFields, ImportError> {
        let normalizer = Normalizer::new();
        let mut fields = RawFields::default();

        let title = page_title(document).ok_or_else(|| missing_section(SOURCE_NAME, "title"))?;
        fields.title = title.replace(" Recipe", "");

        fields.active_time = read_meta(document, &normalizer, "div.project-meta__active-time");
        fields.total_time = read_meta(document, &normalizer, "div.project-meta__total-time");
        fields.servings = read_meta(document, &normalizer, "div.project-meta__recipe-serving");

        let ingredient_list = document
            .select(&selector("ul.structured-ingredients__list.text-passage"))
            .next()
            .ok_or_else(|| missing_section(SOURCE_NAME, "ingredients"))?;

        let name_selector = selector(r#"span[data-ingredient-name="true"]"#);
        let mut food_list = Vec::new();
        for paragraph in ingredient_list.select(&selector("p")) {
            let name = paragraph
                .select(&name_selector)
                .next()
                .ok_or_else(|| missing_section(SOURCE_NAME, "ingredient name marker"))?;
            fields.ingredients.push(text_of(paragraph));
            food_list.push(text_of(name).to_lowercase());
        }
        fields.food_list = Some(food_list);

        let instruction_group = document
            .select(&selector(
                "ol.comp.mntl-sc-block-group--OL.mntl-sc-block.mntl-sc-block-startgroup",
            ))
            .next()
            .ok_or_else(|| missing_section(SOURCE_NAME, "preparation"))?;

        // No site-provided labels exist; synthesize "Step N" in document
        // order.
        for (index, paragraph) in instruction_group
            .select(&selector("p.comp.mntl-sc-block.mntl-sc-block-html"))
            .enumerate()
        {
            fields.steps.push(format!("Step {}", index + 1));
            fields
                .instructions
                .push(normalizer.normalize(&text_of(paragraph)));
        }

        if let Some(notes) = self.collect_notes(document, &normalizer)? {
            fields.steps.push("Notes".to_string());
            fields.instructions.push(notes);
        }

        if let Some(image) = document.select(&selector("figure img")).next() {
            fields.image_url = image
                .value()
                .attr("src")
                .or_else(|| image.value().attr("data-src"))
                .map(str::to_string);
        }

        Ok(fields)
    }
}

impl SeriousEatsAdapter {
    /// Finds a content heading containing "Notes" and walks its body
    /// paragraphs: the first body ID is the heading ID plus one, and each
    /// further paragraph's ID advances by two. Returns the concatenated,
    /// normalized note text, or an error when the heading exists but no body
    /// follows it.
    fn collect_notes(
        &self,
        document: &Html,
        normalizer: &Normalizer,
    ) -> Result<Option<String>, ImportError> {
        let heading_selector = selector(
            r#"h2.comp.mntl-sc-block.lifestyle-sc-block-heading.mntl-sc-block-heading[id^="mntl-sc-block_"]"#,
        );

        let mut notes_heading: Option<ElementRef> = None;
        for heading in document.select(&heading_selector) {
            if text_of(heading).contains("Notes") {
                notes_heading = Some(heading);
            }
        }
        let Some(heading) = notes_heading else {
            return Ok(None);
        };
        let Some(id) = heading.value().attr("id") else {
            return Ok(None);
        };
        let Some((prefix, last)) = id.rsplit_once('-') else {
            return Ok(None);
        };
        let Ok(start) = last.parse::<u32>() else {
            return Ok(None);
        };

        let mut body_id = start + 1;
        let mut notes_text = String::new();
        loop {
            let body_selector = Selector::parse(&format!(r#"p[id="{prefix}-{body_id}"]"#)).unwrap();
            match document.select(&body_selector).next() {
                Some(paragraph) => {
                    notes_text.push(' ');
                    notes_text.push_str(text_of(paragraph).trim());
                    body_id += 2;
                }
                None => break,
            }
        }

        if notes_text.is_empty() {
            // A Notes heading with no body means the markup shifted under
            // us; failing beats silently dropping the section.
            return Err(missing_section(SOURCE_NAME, "Notes body"));
        }
        debug!("{SOURCE_NAME}: collected notes block starting at id {}", start + 1);
        Ok(Some(normalizer.normalize(&notes_text)))
    }
}

/// Reads the value text out of one of the fixed-label recipe metadata
/// sub-blocks in the project meta strip.
fn read_meta(document: &Html, normalizer: &Normalizer, block_css: &str) -> Option<String> {
    document
        .select(&selector(block_css))
        .next()
        .and_then(|block| block.select(&selector(".meta-text__data")).next())
        .map(|data| normalizer.normalize(&text_of(data)))
}
