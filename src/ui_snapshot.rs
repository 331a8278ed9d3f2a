//! UI snapshot and action types for DOM-based rendering
//!
//! The wasm façade serializes [`UiSnapshot`] for the page and feeds
//! [`UiAction`]s back in. Both sides speak JSON.

use serde::{Deserialize, Serialize};

use crate::app::{App, Pane, ToastKind};
use crate::favorites::FavoritesView;
use crate::types::Breed;

/// Snapshot of App state for DOM rendering (one-way data flow: Rust → JS)
#[derive(Debug, Clone, Serialize)]
pub struct UiSnapshot {
    /// Focused pane (0=Fact, 1=Image, 2=Breeds, 3=Favorites)
    pub focused_pane: usize,
    pub fact: FactPane,
    pub image: ImagePane,
    pub breeds: BreedsPane,
    pub favorites: FavoritesView,
    pub toast: Option<Toast>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactPane {
    /// What the fact area shows: the fact, a failure message, or empty
    pub text: String,
    /// Present only while the fact can still be favorited
    pub candidate: Option<String>,
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagePane {
    pub url: Option<String>,
    pub candidate: Option<String>,
    pub notice: Option<String>,
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreedsPane {
    pub rows: Vec<Breed>,
    pub selected_id: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub message: String,
    pub error: bool,
}

impl UiSnapshot {
    pub fn from_app(app: &App) -> Self {
        let toast = app.toast_message().map(|message| Toast {
            message: message.to_string(),
            error: app.toast_kind() == Some(ToastKind::Error),
        });

        Self {
            focused_pane: app.pane().index(),
            fact: FactPane {
                text: app.fact_text().to_string(),
                candidate: app.fact().value().map(str::to_string),
                pending: app.fact().is_pending(),
            },
            image: ImagePane {
                url: app.image_shown().map(str::to_string),
                candidate: app.image().value().map(str::to_string),
                notice: app.image_notice().map(str::to_string),
                pending: app.image().is_pending(),
            },
            breeds: BreedsPane {
                rows: app.breeds().to_vec(),
                selected_id: app.selected_breed().map(|b| b.id.clone()),
                loading: app.breeds_loading(),
            },
            favorites: app.favorites_view(),
            toast,
        }
    }
}

/// User actions from DOM (data flow: JS → Rust)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum UiAction {
    // ----- Fetching -----
    FetchFact,
    FetchImage,
    /// Breed dropdown changed; `None` (or "") means any breed
    SelectBreed {
        #[serde(default)]
        id: Option<String>,
    },

    // ----- Favorites -----
    FavoriteFact,
    FavoriteImage,
    RemoveFavorite { id: String },
    ClearFavorites,

    // ----- Focus -----
    FocusPane { pane: usize },
}

pub fn apply_action(app: &mut App, action: UiAction) {
    match action {
        UiAction::FetchFact => app.fetch_fact(),
        UiAction::FetchImage => app.fetch_image(),
        UiAction::SelectBreed { id } => {
            let id = id.filter(|s| !s.trim().is_empty());
            app.select_breed_id(id.as_deref());
        }
        UiAction::FavoriteFact => {
            app.favorite_fact();
        }
        UiAction::FavoriteImage => {
            app.favorite_image();
        }
        UiAction::RemoveFavorite { id } => {
            if !app.remove_favorite(&id) {
                log::debug!("[ui] remove for unknown favorite {id}");
            }
        }
        UiAction::ClearFavorites => app.clear_favorites(),
        UiAction::FocusPane { pane } => {
            if let Some(p) = Pane::ALL.get(pane) {
                app.set_pane(*p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesStore;
    use crate::storage::MemoryStore;
    use crate::theme::Theme;
    use crate::types::{AppEvent, FetchRequest};
    use tokio::sync::mpsc::unbounded_channel;

    fn app() -> (App, tokio::sync::mpsc::UnboundedReceiver<FetchRequest>) {
        let (tx, rx) = unbounded_channel();
        let favorites = FavoritesStore::new(Box::new(MemoryStore::new()));
        (App::new(30, Theme::default(), favorites, Some(tx)), rx)
    }

    #[test]
    fn actions_parse_from_tagged_json() {
        let a: UiAction = serde_json::from_str(r#"{"type":"RemoveFavorite","id":"abc"}"#).unwrap();
        assert_eq!(a, UiAction::RemoveFavorite { id: "abc".into() });
        let b: UiAction = serde_json::from_str(r#"{"type":"SelectBreed"}"#).unwrap();
        assert_eq!(b, UiAction::SelectBreed { id: None });
        assert!(serde_json::from_str::<UiAction>(r#"{"type":"Explode"}"#).is_err());
    }

    #[test]
    fn select_breed_sends_filtered_image_request() {
        let (mut app, mut rx) = app();
        app.on_event(AppEvent::BreedsFetched(Ok(vec![
            Breed { id: "abys".into(), name: "Abyssinian".into() },
            Breed { id: "beng".into(), name: "Bengal".into() },
        ])));

        apply_action(&mut app, UiAction::SelectBreed { id: Some("beng".into()) });
        assert_eq!(
            rx.try_recv().unwrap(),
            FetchRequest::Image { generation: 1, breed_id: Some("beng".into()) }
        );

        apply_action(&mut app, UiAction::SelectBreed { id: Some(String::new()) });
        assert_eq!(rx.try_recv().unwrap(), FetchRequest::Image { generation: 2, breed_id: None });
    }

    #[test]
    fn snapshot_reflects_candidates_and_favorites() {
        let (mut app, mut rx) = app();
        apply_action(&mut app, UiAction::FetchFact);
        let Ok(FetchRequest::Fact { generation }) = rx.try_recv() else {
            panic!("expected a fact request");
        };
        assert!(UiSnapshot::from_app(&app).fact.pending);

        app.on_event(AppEvent::FactFetched { generation, result: Ok("Cats have 32 ear muscles.".into()) });
        let snap = UiSnapshot::from_app(&app);
        assert_eq!(snap.fact.candidate.as_deref(), Some("Cats have 32 ear muscles."));

        apply_action(&mut app, UiAction::FavoriteFact);
        let snap = UiSnapshot::from_app(&app);
        assert_eq!(snap.fact.candidate, None);
        assert_eq!(snap.fact.text, "Cats have 32 ear muscles.");
        assert_eq!(snap.favorites.facts.len(), 1);
        assert!(snap.toast.is_some_and(|t| !t.error));

        let id = snap.favorites.facts[0].remove.id.clone();
        apply_action(&mut app, UiAction::RemoveFavorite { id });
        assert!(UiSnapshot::from_app(&app).favorites.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let (app, _rx) = app();
        let json = serde_json::to_value(UiSnapshot::from_app(&app)).unwrap();
        assert_eq!(json["focused_pane"], 0);
        assert!(json["favorites"]["facts"].as_array().unwrap().is_empty());
        assert!(json["toast"].is_null());
    }
}
