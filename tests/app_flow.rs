//! App state machine driven through intents and fetch events, no network

use catbox::api::{FetchError, ImageOutcome};
use catbox::app::{App, Pane, FACT_FAILED, IMAGE_FAILED, NO_IMAGES};
use catbox::storage::MemoryStore;
use catbox::theme::Theme;
use catbox::{AppEvent, Breed, FavoriteKind, FavoritesStore, FetchRequest};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn app() -> (App, UnboundedReceiver<FetchRequest>) {
    let (tx, rx) = unbounded_channel();
    let favorites = FavoritesStore::new(Box::new(MemoryStore::new()));
    (App::new(30, Theme::default(), favorites, Some(tx)), rx)
}

fn breeds() -> Vec<Breed> {
    vec![
        Breed { id: "abys".into(), name: "Abyssinian".into() },
        Breed { id: "sibe".into(), name: "Siberian".into() },
    ]
}

fn next_fact_generation(rx: &mut UnboundedReceiver<FetchRequest>) -> u64 {
    match rx.try_recv() {
        Ok(FetchRequest::Fact { generation }) => generation,
        other => panic!("expected a fact request, got {other:?}"),
    }
}

fn next_image_request(rx: &mut UnboundedReceiver<FetchRequest>) -> (u64, Option<String>) {
    match rx.try_recv() {
        Ok(FetchRequest::Image { generation, breed_id }) => (generation, breed_id),
        other => panic!("expected an image request, got {other:?}"),
    }
}

#[test]
fn favoriting_a_fact_appends_one_entry_and_clears_the_slot() {
    let (mut app, mut rx) = app();
    app.fetch_fact();
    let generation = next_fact_generation(&mut rx);
    app.on_event(AppEvent::FactFetched { generation, result: Ok("Cats sleep 70% of their lives.".into()) });

    let before = app.favorites().len();
    let item = app.favorite_fact().expect("fact was fetched");
    assert_eq!(item.kind, FavoriteKind::Fact);
    assert_eq!(item.content, "Cats sleep 70% of their lives.");
    assert_eq!(app.favorites().len(), before + 1);
    assert_eq!(app.fact().value(), None);

    // Slot is empty now: a second favorite is a no-op
    assert!(app.favorite_fact().is_none());
    assert_eq!(app.favorites().len(), before + 1);
    // The text stays on screen
    assert_eq!(app.fact_text(), "Cats sleep 70% of their lives.");
}

#[test]
fn empty_breed_result_leaves_slot_unset_and_favorites_alone() {
    let (mut app, mut rx) = app();
    app.on_event(AppEvent::BreedsFetched(Ok(breeds())));
    app.select_breed(Some(1));

    let (generation, breed_id) = next_image_request(&mut rx);
    assert_eq!(breed_id.as_deref(), Some("sibe"));

    app.on_event(AppEvent::ImageFetched { generation, result: Ok(ImageOutcome::Empty) });
    assert_eq!(app.image().value(), None);
    assert!(!app.image().is_pending());
    assert_eq!(app.image_notice(), Some(NO_IMAGES));
    assert_eq!(app.toast_message(), Some(NO_IMAGES));
    assert!(app.favorite_image().is_none());
    assert!(app.favorites().is_empty());
}

#[test]
fn stale_results_are_discarded() {
    let (mut app, mut rx) = app();
    app.fetch_fact();
    let old = next_fact_generation(&mut rx);
    app.fetch_fact();
    let new = next_fact_generation(&mut rx);

    app.on_event(AppEvent::FactFetched { generation: new, result: Ok("new".into()) });
    app.on_event(AppEvent::FactFetched { generation: old, result: Ok("old".into()) });
    assert_eq!(app.fact().value(), Some("new"));
    assert_eq!(app.fact_text(), "new");
}

#[test]
fn fetch_failures_show_fallback_text() {
    let (mut app, mut rx) = app();
    app.fetch_fact();
    let generation = next_fact_generation(&mut rx);
    app.on_event(AppEvent::FactFetched { generation, result: Err(FetchError::Status(503)) });
    assert_eq!(app.fact_text(), FACT_FAILED);
    assert_eq!(app.fact().value(), None);
    assert!(app.favorite_fact().is_none());

    app.fetch_image();
    let (generation, breed_id) = next_image_request(&mut rx);
    assert_eq!(breed_id, None);
    app.on_event(AppEvent::ImageFetched {
        generation,
        result: Err(FetchError::Network("connection refused".into())),
    });
    assert_eq!(app.image_shown(), None);
    assert_eq!(app.image_notice(), Some(IMAGE_FAILED));
}

#[test]
fn favorited_image_keeps_showing() {
    let (mut app, mut rx) = app();
    app.fetch_image();
    let (generation, _) = next_image_request(&mut rx);
    let url = "https://cdn2.thecatapi.com/images/MTY3ODIyMQ.jpg";
    app.on_event(AppEvent::ImageFetched { generation, result: Ok(ImageOutcome::Found(url.into())) });

    let item = app.favorite_image().expect("image was fetched");
    assert_eq!(item.kind, FavoriteKind::Image);
    assert_eq!(app.image_shown(), Some(url));
    assert_eq!(app.favorites_view().images.len(), 1);
}

#[test]
fn breed_refresh_keeps_selection_by_id() {
    let (mut app, mut rx) = app();
    app.on_event(AppEvent::BreedsFetched(Ok(breeds())));
    app.select_breed_id(Some("sibe"));
    let _ = next_image_request(&mut rx);

    let mut reordered = breeds();
    reordered.reverse();
    app.on_event(AppEvent::BreedsFetched(Ok(reordered)));
    assert_eq!(app.selected_breed().map(|b| b.id.as_str()), Some("sibe"));

    // Failed refresh keeps what we had
    app.on_event(AppEvent::BreedsFetched(Err(FetchError::Status(500))));
    assert_eq!(app.breeds().len(), 2);

    app.select_breed_id(Some("nope"));
    let (_, breed_id) = next_image_request(&mut rx);
    assert_eq!(breed_id, None);
    assert!(app.selected_breed().is_none());
}

#[test]
fn favorites_pane_removes_selected_entry() {
    let (mut app, mut rx) = app();
    for fact in ["one", "two"] {
        app.fetch_fact();
        let generation = next_fact_generation(&mut rx);
        app.on_event(AppEvent::FactFetched { generation, result: Ok(fact.into()) });
        app.favorite_fact();
    }

    app.set_pane(Pane::Favorites);
    app.down();
    assert_eq!(app.selected_favorite().map(|e| e.content), Some("two".to_string()));
    assert_eq!(app.copy_content().as_deref(), Some("two"));

    app.activate();
    let remaining: Vec<_> = app.favorites().items().iter().map(|i| i.content.as_str()).collect();
    assert_eq!(remaining, ["one"]);
    assert_eq!(app.favorites_cursor(), 0);

    app.clear_favorites();
    assert!(app.favorites().is_empty());
    assert!(!app.remove_selected_favorite());
}

#[test]
fn quit_event_sets_flag() {
    let (mut app, _rx) = app();
    assert!(!app.quit_flag());
    app.on_event(AppEvent::Quit);
    assert!(app.quit_flag());
}

#[test]
fn selected_favorite_can_be_removed_from_any_pane() {
    let (mut app, mut rx) = app();
    app.fetch_fact();
    let generation = next_fact_generation(&mut rx);
    app.on_event(AppEvent::FactFetched { generation, result: Ok("Cats have 230 bones.".into()) });
    app.favorite_fact();

    app.set_pane(Pane::Breeds);
    assert!(app.remove_selected_favorite());
    assert!(app.favorites().is_empty());
    assert_eq!(app.pane(), Pane::Breeds);
    assert!(!app.remove_selected_favorite());
}
