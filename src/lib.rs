pub mod adapters;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod store;

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, USER_AGENT};
use scraper::Html;

use crate::adapters::{
    BonAppetitAdapter, ManualAdapter, NytCookingAdapter, SeriousEatsAdapter, SourceAdapter,
};

pub use crate::adapters::{FieldSupply, StdinFieldSupply};
pub use crate::config::{load_config, AppConfig};
pub use crate::error::ImportError;
pub use crate::model::{RawFields, Recipe, Source};
pub use crate::normalize::Normalizer;

/// A fully extracted recipe plus the image URL handed to the external image
/// collaborator. The image is resolved by the adapter but never fetched as
/// part of extraction.
#[derive(Debug)]
pub struct Extraction {
    pub recipe: Recipe,
    pub image_url: Option<String>,
}

/// Fetches the raw page markup for a recipe URL.
pub fn fetch_document(url: &str, config: &AppConfig) -> Result<String, ImportError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, config.user_agent.parse()?);

    let body = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()?
        .get(url)
        .headers(headers)
        .send()?
        .error_for_status()?
        .text()?;
    Ok(body)
}

/// Runs the adapter selected by URL pattern over already fetched markup and
/// assembles the canonical record.
pub fn extract_recipe(
    url: &str,
    html: &str,
    kind: Option<String>,
) -> Result<Extraction, ImportError> {
    let source =
        Source::from_url(url).ok_or_else(|| ImportError::UnknownSource(url.to_string()))?;
    extract_with_source(&source, url, html, kind)
}

/// Same as [`extract_recipe`], with the source chosen explicitly.
pub fn extract_with_source(
    source: &Source,
    url: &str,
    html: &str,
    kind: Option<String>,
) -> Result<Extraction, ImportError> {
    let document = Html::parse_document(html);
    let mut raw = match source {
        Source::BonAppetit => BonAppetitAdapter.extract(&document),
        Source::NytCooking => NytCookingAdapter.extract(&document),
        Source::SeriousEats => SeriousEatsAdapter.extract(&document),
        Source::Other(_) => return Err(ImportError::UnknownSource(url.to_string())),
    }?;
    debug!(
        "{source}: extracted \"{}\" with {} ingredients and {} steps",
        raw.title,
        raw.ingredients.len(),
        raw.steps.len()
    );

    let image_url = raw.image_url.take();
    let recipe = Recipe::assemble(source, url, kind, raw)?;
    Ok(Extraction { recipe, image_url })
}

/// Fetches a recipe page and extracts it in one call.
pub fn import_recipe(
    url: &str,
    kind: Option<String>,
    config: &AppConfig,
) -> Result<Extraction, ImportError> {
    let html = fetch_document(url, config)?;
    extract_recipe(url, &html, kind)
}

/// Builds a recipe from manually supplied fields for sources the engine has
/// no adapter for.
pub fn manual_recipe(
    source_name: &str,
    url: &str,
    kind: Option<String>,
    supply: &mut dyn FieldSupply,
) -> Result<Recipe, ImportError> {
    let raw = ManualAdapter.extract(supply)?;
    Recipe::assemble(&Source::Other(source_name.to_string()), url, kind, raw)
}
