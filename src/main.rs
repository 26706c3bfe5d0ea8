use std::env;

use log::debug;
use recipebox::{AppConfig, Phase, Recipe, RecipeStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    debug!("Loaded config: {config:?}");
    let mut store = RecipeStore::from_config(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        // No arguments: the default feed.
        None => {
            store.init().await;
            print_list(&store);
        }
        Some("search") => {
            let text = args[1..].join(" ");
            if text.trim().is_empty() {
                return Err("Usage: recipebox search <text>".into());
            }
            store.set_search(text).await;
            print_list(&store);
        }
        Some("category") => {
            let name = args.get(1).ok_or("Usage: recipebox category <name>")?;
            store.set_category(Some(name.clone())).await;
            print_list(&store);
        }
        Some("categories") => {
            store.load_categories().await;
            if let Some(message) = store.error() {
                return Err(message.into());
            }
            for category in store.categories() {
                println!("{:>3}  {}", category.id, category.name);
            }
        }
        Some("show") => {
            let id = args.get(1).ok_or("Usage: recipebox show <id>")?;
            match store.client().lookup(id).await? {
                Some(recipe) => print_detail(&recipe, store.is_favorite(&recipe.id)),
                None => println!("No recipe with id {id}"),
            }
        }
        Some("fav") => {
            let id = args.get(1).ok_or("Usage: recipebox fav <id>")?;
            if store.toggle_favorite(id)? {
                println!("Added {id} to favorites");
            } else {
                println!("Removed {id} from favorites");
            }
        }
        Some("favorites") => {
            let ids: Vec<String> = store.favorites().ids().to_vec();
            if ids.is_empty() {
                println!("No favorites yet. Browse recipes and add some with 'fav <id>'.");
            }
            for id in ids {
                match store.client().lookup(&id).await? {
                    Some(recipe) => print_card(&recipe, true),
                    None => println!("  {id}  (no longer in the catalog)"),
                }
            }
        }
        Some(other) => {
            return Err(format!(
                "Unknown command '{other}'. Commands: search, category, categories, show, fav, favorites"
            )
            .into());
        }
    }

    Ok(())
}

fn print_list(store: &RecipeStore) {
    if let Some(message) = store.error() {
        eprintln!("Something went wrong: {message}");
        return;
    }
    if store.phase() == Phase::Ready && store.recipes().is_empty() {
        println!("No recipes found. Try changing your search or filter.");
        return;
    }

    let count = store.recipes().len();
    println!("{count} recipe{} found", if count == 1 { "" } else { "s" });
    for recipe in store.recipes() {
        print_card(recipe, store.is_favorite(&recipe.id));
    }
}

fn print_card(recipe: &Recipe, favorite: bool) {
    let marker = if favorite { "*" } else { " " };
    let mut facets = Vec::new();
    if let Some(category) = &recipe.category {
        facets.push(category.as_str());
    }
    if let Some(area) = &recipe.area {
        facets.push(area.as_str());
    }
    if facets.is_empty() {
        println!("{marker} {}  {}", recipe.id, recipe.name);
    } else {
        println!("{marker} {}  {}  [{}]", recipe.id, recipe.name, facets.join(" / "));
    }
}

fn print_detail(recipe: &Recipe, favorite: bool) {
    print_card(recipe, favorite);
    if !recipe.tag_list().is_empty() {
        println!("  tags: {}", recipe.tag_list().join(", "));
    }

    if !recipe.ingredients.is_empty() {
        println!("\nIngredients:");
        for ingredient in &recipe.ingredients {
            if ingredient.measure.is_empty() {
                println!("  - {}", ingredient.name);
            } else {
                println!("  - {} ({})", ingredient.name, ingredient.measure);
            }
        }
    }

    let steps = recipe.steps();
    if !steps.is_empty() {
        println!("\nInstructions:");
        for (index, step) in steps.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }

    if let Some(youtube) = &recipe.youtube {
        println!("\nVideo: {youtube}");
    }
    if let Some(source) = &recipe.source {
        println!("Source: {source}");
    }
}
