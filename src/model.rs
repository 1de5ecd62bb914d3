use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// The closed set of sites the engine knows how to scrape, plus a free-form
/// name for manually entered recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    BonAppetit,
    NytCooking,
    SeriousEats,
    Other(String),
}

impl Source {
    /// Picks a source by URL pattern. Returns `None` for URLs no site
    /// adapter covers; those fall back to manual entry.
    pub fn from_url(url: &str) -> Option<Source> {
        if url.contains("bonappetit") {
            Some(Source::BonAppetit)
        } else if url.contains("nytimes") {
            Some(Source::NytCooking)
        } else if url.contains("seriouseats") {
            Some(Source::SeriousEats)
        } else {
            None
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Source::BonAppetit => "Bon Appetit",
            Source::NytCooking => "New York Times Cooking",
            Source::SeriousEats => "Serious Eats",
            Source::Other(name) => name,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw field bundle an adapter extracts from one document, before
/// assembly into the canonical record.
#[derive(Debug, Default)]
pub struct RawFields {
    pub title: String,
    pub active_time: Option<String>,
    pub total_time: Option<String>,
    pub servings: Option<String>,
    pub ingredients: Vec<String>,
    pub food_list: Option<Vec<String>>,
    pub steps: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
}

/// The canonical recipe record.
///
/// `steps` and `instructions` are parallel: `steps[i]` is the label of
/// `instructions[i]`. Every adapter restores that correspondence before the
/// record is assembled, and [`Recipe::assemble`] re-checks it as a safety
/// net. Optional fields serialize as null when the source does not publish
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub url: String,
    pub source: String,
    pub title: String,
    pub active_time: Option<String>,
    pub total_time: Option<String>,
    pub servings: Option<String>,
    pub ingredients: Vec<String>,
    pub food_list: Option<Vec<String>>,
    pub steps: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub my_notes: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Recipe {
    /// Combines source/url/type metadata and a raw field bundle into the
    /// canonical record, enforcing its invariants.
    pub fn assemble(
        source: &Source,
        url: &str,
        kind: Option<String>,
        raw: RawFields,
    ) -> Result<Recipe, ImportError> {
        if raw.title.is_empty() {
            return Err(ImportError::InvalidField {
                field: "title".into(),
                reason: format!("{source} produced an empty title"),
            });
        }
        if raw.steps.len() != raw.instructions.len() {
            return Err(ImportError::InvariantViolation {
                source_name: source.name().to_string(),
                steps: raw.steps.len(),
                instructions: raw.instructions.len(),
            });
        }

        Ok(Recipe {
            url: url.to_string(),
            source: source.name().to_string(),
            title: raw.title,
            active_time: raw.active_time,
            total_time: raw.total_time,
            servings: raw.servings,
            ingredients: raw.ingredients,
            food_list: raw.food_list,
            steps: raw.steps,
            instructions: raw.instructions,
            my_notes: None,
            kind,
        })
    }
}
