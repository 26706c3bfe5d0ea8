use mockito::{Matcher, ServerGuard};
use recipebox::{CatalogClient, Favorites, Phase, Query, Recipe, RecipeStore};
use tempfile::TempDir;

fn meal_json(id: &str, name: &str) -> String {
    format!(
        r#"{{"idMeal": "{id}", "strMeal": "{name}", "strCategory": "Chicken", "strInstructions": "Cook."}}"#
    )
}

fn meal(id: &str, name: &str) -> Recipe {
    serde_json::from_str(&meal_json(id, name)).unwrap()
}

/// Store wired to the mock server, with its favorites file in a fresh
/// temp dir. The TempDir must outlive the store.
fn new_store(server: &ServerGuard) -> (RecipeStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = RecipeStore::new(
        CatalogClient::new(server.url(), None),
        Favorites::load(dir.path().join("favorites.json")),
        "chicken",
    );
    (store, dir)
}

async fn mock_search(server: &mut ServerGuard, term: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), term.into()))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_successful_search_replaces_list() {
    let mut server = mockito::Server::new_async().await;
    let _pasta = mock_search(
        &mut server,
        "pasta",
        &format!(
            r#"{{"meals": [{}, {}]}}"#,
            meal_json("1", "Carbonara"),
            meal_json("2", "Arrabiata")
        ),
    )
    .await;
    let _rice = mock_search(
        &mut server,
        "rice",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("3", "Risotto")),
    )
    .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("pasta").await;
    assert_eq!(store.phase(), Phase::Ready);
    assert_eq!(store.recipes().len(), 2);
    assert!(store.error().is_none());

    store.set_search("rice").await;
    assert_eq!(store.recipes().len(), 1);
    assert_eq!(store.recipes()[0].name, "Risotto");
}

#[tokio::test]
async fn test_failed_search_clears_list_and_sets_message() {
    let mut server = mockito::Server::new_async().await;
    let _ok = mock_search(
        &mut server,
        "pasta",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("1", "Carbonara")),
    )
    .await;
    let _broken = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "broken".into()))
        .with_status(500)
        .create_async()
        .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("pasta").await;
    assert_eq!(store.recipes().len(), 1);

    store.set_search("broken").await;
    assert_eq!(store.phase(), Phase::Error);
    assert!(store.recipes().is_empty());
    let message = store.error().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_search_text_wins_over_category() {
    let mut server = mockito::Server::new_async().await;
    let _soup = mock_search(
        &mut server,
        "soup",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("5", "Leek Soup")),
    )
    .await;
    // While search text is set, the category endpoint must never be hit.
    let filter = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("soup").await;
    store.set_category(Some("Beef".to_string())).await;

    assert_eq!(store.selected_category(), Some("Beef"));
    assert_eq!(store.active_query(), Query::Search("soup".to_string()));
    assert_eq!(store.recipes()[0].name, "Leek Soup");
    filter.assert_async().await;
}

#[tokio::test]
async fn test_clearing_search_falls_through_to_category() {
    let mut server = mockito::Server::new_async().await;
    let _soup = mock_search(
        &mut server,
        "soup",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("5", "Leek Soup")),
    )
    .await;
    let _filter = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Dessert".into()))
        .with_status(200)
        .with_body(format!(r#"{{"meals": [{}]}}"#, meal_json("8", "Trifle")))
        .create_async()
        .await;
    let _lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "8".into()))
        .with_status(200)
        .with_body(format!(r#"{{"meals": [{}]}}"#, meal_json("8", "Sherry Trifle")))
        .create_async()
        .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("soup").await;
    store.set_category(Some("Dessert".to_string())).await;
    assert_eq!(store.recipes()[0].name, "Leek Soup");

    store.set_search("").await;
    assert_eq!(store.active_query(), Query::Category("Dessert".to_string()));
    // The category listing went through the detail fan-out.
    assert_eq!(store.recipes()[0].name, "Sherry Trifle");
}

#[tokio::test]
async fn test_clearing_both_filters_runs_default_query() {
    let mut server = mockito::Server::new_async().await;
    let _pasta = mock_search(
        &mut server,
        "pasta",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("1", "Carbonara")),
    )
    .await;
    let _default = mock_search(
        &mut server,
        "chicken",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("9", "Roast Chicken")),
    )
    .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("pasta").await;
    store.clear_filters().await;

    assert_eq!(store.active_query(), Query::Search("chicken".to_string()));
    assert_eq!(store.phase(), Phase::Ready);
    assert_eq!(store.recipes()[0].name, "Roast Chicken");
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let server = mockito::Server::new_async().await;
    let (mut store, _dir) = new_store(&server);

    let (old_ticket, old_query) = store.begin_query();
    let (new_ticket, new_query) = store.begin_query();

    // The slow earlier response lands after the newer query was issued.
    store.complete_query(old_ticket, &old_query, Ok(vec![meal("1", "Stale")]));
    assert_eq!(store.phase(), Phase::Loading);
    assert!(store.recipes().is_empty());

    store.complete_query(new_ticket, &new_query, Ok(vec![meal("2", "Fresh")]));
    assert_eq!(store.phase(), Phase::Ready);
    assert_eq!(store.recipes()[0].name, "Fresh");

    // A stale response after completion changes nothing either.
    store.complete_query(old_ticket, &old_query, Ok(vec![meal("1", "Stale")]));
    assert_eq!(store.recipes()[0].name, "Fresh");
}

#[tokio::test]
async fn test_category_load_failure_keeps_recipe_list() {
    let mut server = mockito::Server::new_async().await;
    let _pasta = mock_search(
        &mut server,
        "pasta",
        &format!(r#"{{"meals": [{}]}}"#, meal_json("1", "Carbonara")),
    )
    .await;
    let _categories = server
        .mock("GET", "/categories.php")
        .with_status(500)
        .create_async()
        .await;

    let (mut store, _dir) = new_store(&server);

    store.set_search("pasta").await;
    store.load_categories().await;

    assert_eq!(store.error(), Some("Could not load categories"));
    assert!(store.categories().is_empty());
    // The current list and its phase are untouched.
    assert_eq!(store.phase(), Phase::Ready);
    assert_eq!(store.recipes().len(), 1);
}

#[tokio::test]
async fn test_categories_populate_from_server() {
    let mut server = mockito::Server::new_async().await;
    let _categories = server
        .mock("GET", "/categories.php")
        .with_status(200)
        .with_body(
            r#"{"categories": [
                {"idCategory": "1", "strCategory": "Beef"},
                {"idCategory": "2", "strCategory": "Chicken"}
            ]}"#,
        )
        .create_async()
        .await;

    let (mut store, _dir) = new_store(&server);
    store.load_categories().await;

    assert_eq!(store.categories().len(), 2);
    assert_eq!(store.categories()[0].name, "Beef");
}

#[tokio::test]
async fn test_favorite_toggle_and_filtered_view() {
    let mut server = mockito::Server::new_async().await;
    let _pasta = mock_search(
        &mut server,
        "pasta",
        &format!(
            r#"{{"meals": [{}, {}]}}"#,
            meal_json("1", "Carbonara"),
            meal_json("2", "Arrabiata")
        ),
    )
    .await;

    let (mut store, _dir) = new_store(&server);
    store.set_search("pasta").await;

    store.toggle_favorite("2").unwrap();
    assert!(store.is_favorite("2"));
    assert!(!store.is_favorite("1"));

    let favorites: Vec<&str> = store
        .favorite_recipes()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(favorites, vec!["Arrabiata"]);

    store.toggle_favorite("2").unwrap();
    assert!(store.favorite_recipes().is_empty());
}
