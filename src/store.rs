use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::config::AppConfig;
use crate::error::ImportError;
use crate::model::Recipe;

/// Writes the canonical record as pretty-printed JSON under
/// `<dir>/<title>.json`, creating the directory if needed.
pub fn save_recipe(recipe: &Recipe, dir: &Path) -> Result<PathBuf, ImportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", recipe.title));
    fs::write(&path, serde_json::to_string_pretty(recipe)?)?;
    debug!("saved canonical record to {}", path.display());
    Ok(path)
}

/// Loads a previously saved canonical record by title.
pub fn load_recipe(dir: &Path, title: &str) -> Result<Recipe, ImportError> {
    let path = dir.join(format!("{title}.json"));
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Image collaborator: retrieves the adapter-resolved image URL and stores
/// the bytes under a path keyed by the recipe title.
pub fn download_image(
    image_url: &str,
    dir: &Path,
    title: &str,
    config: &AppConfig,
) -> Result<PathBuf, ImportError> {
    fs::create_dir_all(dir)?;
    let bytes = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()?
        .get(image_url)
        .send()?
        .error_for_status()?
        .bytes()?;
    let path = dir.join(format!("{title}.png"));
    fs::write(&path, &bytes)?;
    debug!("saved recipe image to {}", path.display());
    Ok(path)
}
