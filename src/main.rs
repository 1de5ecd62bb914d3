use std::env;
use std::path::Path;

use recipe_clipper::{
    import_recipe, load_config, manual_recipe, store, Source, StdinFieldSupply,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut url = None;
    let mut file = None;
    let mut source = None;
    let mut kind = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => url = args.next(),
            "--file" => file = args.next(),
            "--source" => source = args.next(),
            "--type" => kind = args.next(),
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    let config = load_config()?;
    let jsons_dir = Path::new(&config.jsons_dir).to_path_buf();

    // Re-loading an existing record; rendering is the caller's business.
    if let Some(title) = file {
        let recipe = store::load_recipe(&jsons_dir, &title)?;
        println!(
            "Loaded \"{}\" from {} ({} ingredients, {} steps)",
            recipe.title,
            recipe.source,
            recipe.ingredients.len(),
            recipe.steps.len()
        );
        return Ok(());
    }

    let recipe = match &url {
        Some(url) if Source::from_url(url).is_some() => {
            let extraction = import_recipe(url, kind, &config)?;
            if let Some(image_url) = &extraction.image_url {
                store::download_image(
                    image_url,
                    Path::new(&config.images_dir),
                    &extraction.recipe.title,
                    &config,
                )?;
            }
            extraction.recipe
        }
        _ => {
            // No adapter covers this URL: fall back to manual entry.
            let source_name =
                source.ok_or("provide --source <name> to enter a recipe manually")?;
            let mut supply = StdinFieldSupply;
            manual_recipe(&source_name, url.as_deref().unwrap_or(""), kind, &mut supply)?
        }
    };

    let path = store::save_recipe(&recipe, &jsons_dir)?;
    println!("Saved \"{}\" to {}", recipe.title, path.display());
    Ok(())
}
