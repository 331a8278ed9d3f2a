#![cfg_attr(target_arch = "wasm32", no_main)]

// DOM-based web frontend for catbox.
//
// JS side:
//   import init, { WasmApp } from "./catbox-web-dom.js";
//   const app = new WasmApp();
//   const snap = JSON.parse(app.snapshot_json());
//   const snap2 = JSON.parse(app.handle_action_json(JSON.stringify({ type: "SelectBreed", id: "beng" })));

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::window;

    use tokio::sync::mpsc::{error::TryRecvError, unbounded_channel, UnboundedReceiver};

    use catbox::{
        api::CatApi,
        fetch_worker, platform,
        storage::{KvStore, LocalStorage, MemoryStore},
        theme::Theme,
        types::FetchRequest,
        ui_snapshot::{apply_action, UiAction, UiSnapshot},
        App, AppEvent, Config, FavoritesStore,
    };

    /// Initialize logging and theme CSS variables on page load.
    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        let _ = platform::init_logging("");

        if let Some(win) = window() {
            if let Some(doc) = win.document() {
                if let Some(root) = doc.document_element() {
                    if let Some(html_root) = root.dyn_ref::<web_sys::HtmlElement>() {
                        for (name, value) in Theme::default().to_css_vars() {
                            if let Err(e) = html_root.style().set_property(name, &value) {
                                log::warn!("[theme] Failed to set CSS var {}: {:?}", name, e);
                            }
                        }
                        log::info!("[theme] CSS variables injected");
                    }
                }
            }
        }
    }

    /// Wasm-exposed app wrapper.
    ///
    /// Holds the core App and the receiver for fetch results.
    #[wasm_bindgen]
    pub struct WasmApp {
        app: App,
        event_rx: UnboundedReceiver<AppEvent>,
    }

    #[wasm_bindgen]
    impl WasmApp {
        /// Load favorites, start the fetch worker and ask for the breed list.
        #[wasm_bindgen(constructor)]
        #[allow(clippy::new_without_default)]
        pub fn new() -> WasmApp {
            let config = Config::web_defaults();

            let store: Box<dyn KvStore> = match LocalStorage::open() {
                Some(ls) => Box::new(ls),
                None => {
                    log::warn!("[WasmApp] localStorage unavailable, favorites last for this page only");
                    Box::new(MemoryStore::new())
                }
            };
            let favorites = FavoritesStore::new(store);

            let (event_tx, event_rx) = unbounded_channel::<AppEvent>();
            let (fetch_tx, fetch_rx) = unbounded_channel::<FetchRequest>();
            spawn_local(fetch_worker::run_fetch_worker(CatApi::from_config(&config), fetch_rx, event_tx));

            let mut app = App::new(config.render_fps, config.theme, favorites, Some(fetch_tx));
            app.fetch_breeds();

            WasmApp { app, event_rx }
        }

        /// Get a fresh snapshot as JSON (drains pending events first).
        #[wasm_bindgen]
        pub fn snapshot_json(&mut self) -> String {
            self.drain_events();
            self.snapshot()
        }

        /// Apply an action (JSON-encoded UiAction) and return an updated snapshot.
        #[wasm_bindgen]
        pub fn handle_action_json(&mut self, action_json: String) -> String {
            self.drain_events();

            match serde_json::from_str::<UiAction>(&action_json) {
                Ok(action) => apply_action(&mut self.app, action),
                Err(e) => {
                    log::warn!("Failed to deserialize UiAction ({e}): {action_json:?}");
                }
            }

            self.snapshot()
        }
    }

    impl WasmApp {
        fn drain_events(&mut self) {
            loop {
                match self.event_rx.try_recv() {
                    Ok(ev) => self.app.on_event(ev),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        log::warn!("[WasmApp] Event channel disconnected");
                        break;
                    }
                }
            }
        }

        fn snapshot(&self) -> String {
            serde_json::to_string(&UiSnapshot::from_app(&self.app)).unwrap_or_else(|e| {
                log::error!("Failed to serialize UiSnapshot: {e}");
                "{}".to_string()
            })
        }
    }
}

// Native builds: just provide a stub main so `cargo build --all-features` doesn't explode.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("catbox-web-dom is only supported on wasm32 (browser) target.");
}
