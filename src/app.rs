use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ImageOutcome;
use crate::favorites::{FavoriteEntry, FavoritesStore, FavoritesView};
use crate::platform::Instant;
use crate::theme::Theme;
use crate::types::{AppEvent, Breed, FavoriteItem, FavoriteKind, FetchRequest};

pub const FACT_FAILED: &str = "Failed to load a cat fact. Please try again.";
pub const IMAGE_FAILED: &str = "Failed to load a cat image. Please try again.";
pub const NO_IMAGES: &str = "No images found for this breed.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind { Info, Error }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane { Fact, Image, Breeds, Favorites }

impl Pane {
    pub const ALL: [Pane; 4] = [Pane::Fact, Pane::Image, Pane::Breeds, Pane::Favorites];

    pub fn index(self) -> usize {
        match self {
            Pane::Fact => 0,
            Pane::Image => 1,
            Pane::Breeds => 2,
            Pane::Favorites => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Fact => "Fact",
            Pane::Image => "Image",
            Pane::Breeds => "Breeds",
            Pane::Favorites => "Favorites",
        }
    }
}

/// One fetched-but-not-yet-favorited value (the current fact or image URL).
///
/// Every fetch bumps `generation`; a completion carrying an older generation
/// is stale and gets dropped, so a slow response can't overwrite a newer one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSlot {
    value: Option<String>,
    generation: u64,
    pending: bool,
}

impl CandidateSlot {
    pub fn value(&self) -> Option<&str> { self.value.as_deref() }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn is_pending(&self) -> bool { self.pending }

    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// Apply a fetch result. Returns `false` (and changes nothing) when stale.
    pub fn complete(&mut self, generation: u64, value: Option<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.pending = false;
        self.value = value;
        true
    }

    /// The request for `generation` never left; stop waiting for it.
    fn abandon(&mut self, generation: u64) {
        if generation == self.generation {
            self.pending = false;
        }
    }

    /// Hand the value over for favoriting, leaving the slot empty.
    pub fn take(&mut self) -> Option<String> {
        self.value.take()
    }
}

pub struct App {
    quit: bool,
    pane: Pane,

    fact: CandidateSlot,
    fact_text: String,          // what the fact pane shows (fact or failure message)

    image: CandidateSlot,
    image_shown: Option<String>,  // URL on display; survives favoriting like the fact text
    image_notice: Option<String>,

    breeds: Vec<Breed>,
    breeds_loading: bool,
    breed_cursor: usize,
    selected_breed: Option<usize>,

    favorites: FavoritesStore,
    fav_cursor: usize,

    fps: u32,
    theme: Theme,

    toast_message: Option<(String, ToastKind, Instant)>,

    fetch_tx: Option<UnboundedSender<FetchRequest>>,
}

impl App {
    pub fn new(
        fps: u32,
        theme: Theme,
        favorites: FavoritesStore,
        fetch_tx: Option<UnboundedSender<FetchRequest>>,
    ) -> Self {
        Self {
            quit: false,
            pane: Pane::Fact,
            fact: CandidateSlot::default(),
            fact_text: String::new(),
            image: CandidateSlot::default(),
            image_shown: None,
            image_notice: None,
            breeds: Vec::new(),
            breeds_loading: false,
            breed_cursor: 0,
            selected_breed: None,
            favorites,
            fav_cursor: 0,
            fps,
            theme,
            toast_message: None,
            fetch_tx,
        }
    }

    // ----- getters -----
    pub fn fps(&self) -> u32 { self.fps }
    pub fn theme(&self) -> Theme { self.theme }
    pub fn quit_flag(&self) -> bool { self.quit }
    pub fn pane(&self) -> Pane { self.pane }
    pub fn fact(&self) -> &CandidateSlot { &self.fact }
    pub fn fact_text(&self) -> &str { &self.fact_text }
    pub fn image(&self) -> &CandidateSlot { &self.image }
    pub fn image_shown(&self) -> Option<&str> { self.image_shown.as_deref() }
    pub fn image_notice(&self) -> Option<&str> { self.image_notice.as_deref() }
    pub fn breeds(&self) -> &[Breed] { &self.breeds }
    pub fn breeds_loading(&self) -> bool { self.breeds_loading }
    pub fn breed_cursor(&self) -> usize { self.breed_cursor }
    pub fn favorites(&self) -> &FavoritesStore { &self.favorites }
    pub fn favorites_view(&self) -> FavoritesView { self.favorites.render() }
    pub fn favorites_cursor(&self) -> usize { self.fav_cursor }

    pub fn selected_breed(&self) -> Option<&Breed> {
        self.selected_breed.and_then(|i| self.breeds.get(i))
    }

    /// Show a toast notification for 3 seconds
    pub fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast_message = Some((msg.into(), ToastKind::Info, Instant::now()));
    }

    pub fn show_error(&mut self, msg: impl Into<String>) {
        self.toast_message = Some((msg.into(), ToastKind::Error, Instant::now()));
    }

    /// Get current toast message if still active
    pub fn toast_message(&self) -> Option<&str> {
        self.active_toast().map(|(msg, _)| msg)
    }

    pub fn toast_kind(&self) -> Option<ToastKind> {
        self.active_toast().map(|(_, kind)| kind)
    }

    fn active_toast(&self) -> Option<(&str, ToastKind)> {
        const TOAST_DURATION: Duration = Duration::from_secs(3);
        self.toast_message.as_ref().and_then(|(msg, kind, time)| {
            if time.elapsed() < TOAST_DURATION { Some((msg.as_str(), *kind)) } else { None }
        })
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }

    // ----- fetching -----
    pub fn fetch_fact(&mut self) {
        let generation = self.fact.begin_fetch();
        if !self.send_request(FetchRequest::Fact { generation }) {
            self.fact.abandon(generation);
        }
    }

    /// Fetch an image, filtered by the selected breed if there is one.
    pub fn fetch_image(&mut self) {
        let generation = self.image.begin_fetch();
        let breed_id = self.selected_breed().map(|b| b.id.clone());
        if !self.send_request(FetchRequest::Image { generation, breed_id }) {
            self.image.abandon(generation);
        }
    }

    pub fn fetch_breeds(&mut self) {
        self.breeds_loading = self.send_request(FetchRequest::Breeds);
    }

    /// Pick a breed filter (`None` = any breed) and fetch a matching image.
    pub fn select_breed(&mut self, index: Option<usize>) {
        self.selected_breed = index.filter(|&i| i < self.breeds.len());
        if let Some(i) = self.selected_breed {
            self.breed_cursor = i;
        }
        self.fetch_image();
    }

    /// Same as [`App::select_breed`], addressed by breed id. An unknown id
    /// falls back to no filter.
    pub fn select_breed_id(&mut self, id: Option<&str>) {
        let index = id.and_then(|id| {
            let found = self.breeds.iter().position(|b| b.id == id);
            if found.is_none() {
                log::warn!("[app] unknown breed id {id:?}, fetching without filter");
            }
            found
        });
        self.select_breed(index);
    }

    /// Drop the breed filter without fetching.
    pub fn clear_breed_filter(&mut self) {
        self.selected_breed = None;
    }

    fn send_request(&mut self, req: FetchRequest) -> bool {
        let Some(tx) = &self.fetch_tx else {
            log::warn!("[app] no fetch worker, dropping {req:?}");
            return false;
        };
        if tx.send(req).is_err() {
            log::error!("[app] fetch worker is gone");
            self.show_error("Network worker stopped. Restart catbox.");
            return false;
        }
        true
    }

    // ----- favorites -----
    /// Move the current fact into favorites. No-op when there is none.
    pub fn favorite_fact(&mut self) -> Option<FavoriteItem> {
        let fact = self.fact.take().filter(|s| !s.is_empty())?;
        let item = self.favorites.add(FavoriteKind::Fact, fact);
        self.show_toast("Fact saved to favorites");
        Some(item)
    }

    /// Move the current image into favorites. No-op when there is none.
    pub fn favorite_image(&mut self) -> Option<FavoriteItem> {
        let url = self.image.take().filter(|s| !s.is_empty())?;
        let item = self.favorites.add(FavoriteKind::Image, url);
        self.show_toast("Image saved to favorites");
        Some(item)
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        let removed = self.favorites.remove(id);
        if removed {
            self.clamp_fav_cursor();
        }
        removed
    }

    pub fn remove_selected_favorite(&mut self) -> bool {
        match self.selected_favorite().map(|e| e.id) {
            Some(id) => self.remove_favorite(&id),
            None => false,
        }
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.fav_cursor = 0;
        self.show_toast("Favorites cleared");
    }

    /// Favorites in display order: facts first, then images.
    pub fn favorite_rows(&self) -> Vec<(FavoriteKind, FavoriteEntry)> {
        let view = self.favorites.render();
        view.facts
            .into_iter()
            .map(|e| (FavoriteKind::Fact, e))
            .chain(view.images.into_iter().map(|e| (FavoriteKind::Image, e)))
            .collect()
    }

    pub fn selected_favorite(&self) -> Option<FavoriteEntry> {
        self.favorite_rows().into_iter().nth(self.fav_cursor).map(|(_, e)| e)
    }

    fn clamp_fav_cursor(&mut self) {
        let len = self.favorites.len();
        if self.fav_cursor >= len {
            self.fav_cursor = len.saturating_sub(1);
        }
    }

    // ----- navigation -----
    pub fn next_pane(&mut self) {
        self.pane = Pane::ALL[(self.pane.index() + 1) % Pane::ALL.len()];
    }

    pub fn prev_pane(&mut self) {
        self.pane = Pane::ALL[(self.pane.index() + Pane::ALL.len() - 1) % Pane::ALL.len()];
    }

    pub fn set_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }

    pub fn up(&mut self) {
        match self.pane {
            Pane::Breeds => self.breed_cursor = self.breed_cursor.saturating_sub(1),
            Pane::Favorites => self.fav_cursor = self.fav_cursor.saturating_sub(1),
            _ => {}
        }
    }

    pub fn down(&mut self) {
        match self.pane {
            Pane::Breeds => {
                if self.breed_cursor + 1 < self.breeds.len() {
                    self.breed_cursor += 1;
                }
            }
            Pane::Favorites => {
                if self.fav_cursor + 1 < self.favorites.len() {
                    self.fav_cursor += 1;
                }
            }
            _ => {}
        }
    }

    /// Enter: the obvious action for the focused pane.
    pub fn activate(&mut self) {
        match self.pane {
            Pane::Fact => self.fetch_fact(),
            Pane::Image => self.fetch_image(),
            Pane::Breeds => {
                if !self.breeds.is_empty() {
                    self.select_breed(Some(self.breed_cursor));
                }
            }
            Pane::Favorites => {
                self.remove_selected_favorite();
            }
        }
    }

    /// Text to put on the clipboard for the focused pane.
    pub fn copy_content(&self) -> Option<String> {
        match self.pane {
            Pane::Fact => self.fact.value().map(str::to_string).or_else(|| {
                (!self.fact_text.is_empty() && self.fact_text != FACT_FAILED).then(|| self.fact_text.clone())
            }),
            Pane::Image => self.image_shown.clone(),
            Pane::Breeds => self.breeds.get(self.breed_cursor).map(|b| b.name.clone()),
            Pane::Favorites => self.selected_favorite().map(|e| e.content),
        }
    }

    // ----- events -----
    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Quit => self.quit = true,
            AppEvent::FactFetched { generation, result } => {
                let value = result.as_ref().ok().cloned();
                if !self.fact.complete(generation, value) {
                    log::debug!("[app] stale fact (gen {generation}, current {})", self.fact.generation());
                    return;
                }
                self.fact_text = match result {
                    Ok(fact) => fact,
                    Err(_) => FACT_FAILED.to_string(),
                };
            }
            AppEvent::ImageFetched { generation, result } => {
                let value = match &result {
                    Ok(ImageOutcome::Found(url)) => Some(url.clone()),
                    _ => None,
                };
                if !self.image.complete(generation, value) {
                    log::debug!("[app] stale image (gen {generation}, current {})", self.image.generation());
                    return;
                }
                match result {
                    Ok(ImageOutcome::Found(url)) => {
                        self.image_shown = Some(url);
                        self.image_notice = None;
                    }
                    Ok(ImageOutcome::Empty) => {
                        self.image_shown = None;
                        self.image_notice = Some(NO_IMAGES.to_string());
                        self.show_error(NO_IMAGES);
                    }
                    Err(_) => {
                        self.image_shown = None;
                        self.image_notice = Some(IMAGE_FAILED.to_string());
                        self.show_error(IMAGE_FAILED);
                    }
                }
            }
            AppEvent::BreedsFetched(result) => {
                self.breeds_loading = false;
                match result {
                    Ok(breeds) => self.set_breeds(breeds),
                    Err(e) => log::warn!("[app] keeping {} known breeds after error: {e}", self.breeds.len()),
                }
            }
        }
    }

    /// Replace the catalog, keeping the current filter if its id survives.
    fn set_breeds(&mut self, breeds: Vec<Breed>) {
        let selected_id = self.selected_breed().map(|b| b.id.clone());
        self.breeds = breeds;
        self.selected_breed = selected_id.and_then(|id| self.breeds.iter().position(|b| b.id == id));
        if self.breed_cursor >= self.breeds.len() {
            self.breed_cursor = self.breeds.len().saturating_sub(1);
        }
    }
}
